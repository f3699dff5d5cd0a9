//! Resend email adapter.
//!
//! Implements the `VoucherMailer` trait against the Resend HTTP API.
//! Every failure mode collapses into the returned `DeliveryReport`;
//! nothing here can make an activation look unsuccessful.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ResendConfig::new(api_key, "Regalo <vouchers@regalo.shop>");
//! let mailer = ResendMailer::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::time::Duration;

use crate::ports::{DeliveryReport, DeliveryStatus, GiftCardEmail, VoucherMailer};

/// Per-request timeout for calls to the Resend API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resend API configuration.
#[derive(Clone)]
pub struct ResendConfig {
    /// API key (re_...).
    api_key: SecretString,

    /// Sender in "Name <address>" form.
    from_header: String,

    /// Base URL for the API (default: https://api.resend.com).
    api_base_url: String,
}

impl ResendConfig {
    /// Create a new Resend configuration.
    pub fn new(api_key: impl Into<String>, from_header: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from_header: from_header.into(),
            api_base_url: "https://api.resend.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Resend mailer adapter.
///
/// Sends the purchaser receipt and the recipient gift card as two
/// independent deliveries, concurrently. A self-gift (purchaser and
/// recipient share one inbox) sends the gift card once.
pub struct ResendMailer {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendMailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: ResendConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Send one email, folding every failure into the returned status.
    async fn send_one(&self, to: &str, subject: &str, html: &str) -> DeliveryStatus {
        let url = format!("{}/emails", self.config.api_base_url);

        let body = json!({
            "from": self.config.from_header,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => DeliveryStatus::Sent,
            Ok(response) => {
                let status = response.status().as_u16();
                let error_text = response.text().await.unwrap_or_default();
                DeliveryStatus::Failed(format!("Resend returned {}: {}", status, error_text))
            }
            Err(e) => DeliveryStatus::Failed(format!("Resend request failed: {}", e)),
        }
    }
}

#[async_trait]
impl VoucherMailer for ResendMailer {
    async fn send_gift_card_emails(&self, email: &GiftCardEmail) -> DeliveryReport {
        let card_subject = format!("{} sent you a gift voucher!", email.purchaser_name);
        let card_html = gift_card_html(email);

        if email.is_self_gift() {
            // One inbox, one email: the gift card carries everything the
            // receipt would have said.
            let status = self
                .send_one(&email.recipient_email, &card_subject, &card_html)
                .await;
            return DeliveryReport::single(status);
        }

        let receipt_subject = format!("Your {} gift voucher is on its way", email.amount_display);
        let receipt_html = receipt_html(email);

        let (purchaser, recipient) = futures::future::join(
            self.send_one(&email.purchaser_email, &receipt_subject, &receipt_html),
            self.send_one(&email.recipient_email, &card_subject, &card_html),
        )
        .await;

        DeliveryReport {
            purchaser,
            recipient,
        }
    }
}

/// Render the gift card email sent to the recipient.
fn gift_card_html(email: &GiftCardEmail) -> String {
    let message_block = match &email.personal_message {
        Some(message) => format!(
            r#"<p style="font-style: italic; color: #4b5563;">&ldquo;{}&rdquo;</p>"#,
            html_escape(message)
        ),
        None => String::new(),
    };

    format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
  <div style="border: 2px solid {color}; border-radius: 12px; padding: 24px; text-align: center;">
    <h1 style="color: {color}; margin-top: 0;">{title}</h1>
    <p style="font-size: 18px;">Hi {recipient},</p>
    <p>{purchaser} sent you a gift voucher worth</p>
    <p style="font-size: 32px; font-weight: bold; color: {color};">{amount}</p>
    {message_block}
    <p style="color: #6b7280; font-size: 14px;">
      Valid for {valid_days} more days, until {expires}.
    </p>
  </div>
</div>"#,
        color = email.color_hex,
        title = html_escape(&email.title),
        recipient = html_escape(&email.recipient_name),
        purchaser = html_escape(&email.purchaser_name),
        amount = email.amount_display,
        message_block = message_block,
        valid_days = email.valid_days,
        expires = email.expires_display,
    )
}

/// Render the purchase receipt email sent to the purchaser.
fn receipt_html(email: &GiftCardEmail) -> String {
    format!(
        r#"<div style="font-family: sans-serif; max-width: 480px; margin: 0 auto;">
  <h1 style="color: {color};">Payment confirmed</h1>
  <p>Hi {purchaser},</p>
  <p>
    Your gift voucher of <strong>{amount}</strong> has been activated and
    sent to {recipient} at {recipient_email}.
  </p>
  <p style="color: #6b7280; font-size: 14px;">
    The voucher is valid until {expires}.
  </p>
</div>"#,
        color = email.color_hex,
        purchaser = html_escape(&email.purchaser_name),
        amount = email.amount_display,
        recipient = html_escape(&email.recipient_name),
        recipient_email = html_escape(&email.recipient_email),
        expires = email.expires_display,
    )
}

/// Escape user-provided text for safe HTML interpolation.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
