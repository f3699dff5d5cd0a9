//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresVoucherStore` - Voucher storage with compare-and-set transitions

mod voucher_store;

pub use voucher_store::PostgresVoucherStore;
