//! Regalo - Digital Gift Voucher Shop
//!
//! This crate implements payment webhook ingestion for Mercado Pago with
//! idempotent voucher activation and confirmation email dispatch.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
