//! Display derivation for voucher emails and rendering.
//!
//! Everything shown to a purchaser or recipient is derived here from the
//! stored voucher: title, template color, formatted amount, and the
//! remaining validity window. Amounts are formatted with integer math so
//! no float rounding can leak into customer-facing text.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::foundation::Timestamp;

use super::Voucher;

/// Default style for templates the lookup table does not know.
const DEFAULT_TEMPLATE: TemplateStyle = TemplateStyle {
    title: "Gift Voucher",
    color_hex: "#1f2937",
};

/// Title and accent color attached to a checkout template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStyle {
    /// Default title when the purchaser set no custom one.
    pub title: &'static str,
    /// Accent color used in emails and rendered vouchers.
    pub color_hex: &'static str,
}

/// Static lookup of known checkout templates.
static TEMPLATE_STYLES: Lazy<HashMap<&'static str, TemplateStyle>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        "birthday",
        TemplateStyle {
            title: "Happy Birthday!",
            color_hex: "#db2777",
        },
    );
    map.insert(
        "christmas",
        TemplateStyle {
            title: "Merry Christmas",
            color_hex: "#b91c1c",
        },
    );
    map.insert(
        "thank_you",
        TemplateStyle {
            title: "Thank You",
            color_hex: "#b45309",
        },
    );
    map.insert(
        "congratulations",
        TemplateStyle {
            title: "Congratulations!",
            color_hex: "#15803d",
        },
    );
    map.insert(
        "love",
        TemplateStyle {
            title: "With Love",
            color_hex: "#be123c",
        },
    );
    map.insert("classic", DEFAULT_TEMPLATE);
    map
});

/// Resolve the style for a template name, falling back to the default.
pub fn template_style(template_name: &str) -> TemplateStyle {
    TEMPLATE_STYLES
        .get(template_name)
        .copied()
        .unwrap_or(DEFAULT_TEMPLATE)
}

/// Format an amount in cents as "<CUR> <major>.<minor>" using integer math.
pub fn format_amount_cents(amount_cents: i64, currency: &str) -> String {
    format!("{} {}.{:02}", currency, amount_cents / 100, amount_cents % 100)
}

/// Derived, customer-facing view of a voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherPresentation {
    /// Custom title if the purchaser set one, else the template default.
    pub title: String,

    /// Accent color of the picked template.
    pub color_hex: String,

    /// Face value as display text, e.g. "EUR 50.00".
    pub amount_display: String,

    /// Expiry date as display text, e.g. "2026-12-31".
    pub expires_display: String,

    /// Whole days of validity left, floored at zero.
    pub valid_days: i64,
}

impl VoucherPresentation {
    /// Derive the presentation for a voucher as of now.
    pub fn from_voucher(voucher: &Voucher) -> Self {
        Self::at(voucher, &Timestamp::now())
    }

    fn at(voucher: &Voucher, now: &Timestamp) -> Self {
        let style = template_style(&voucher.template_name);
        let title = voucher
            .custom_title
            .clone()
            .unwrap_or_else(|| style.title.to_string());

        Self {
            title,
            color_hex: style.color_hex.to_string(),
            amount_display: format_amount_cents(voucher.amount_cents, &voucher.currency),
            expires_display: voucher.expires_at.as_datetime().format("%Y-%m-%d").to_string(),
            valid_days: voucher.expires_at.duration_since(now).num_days().max(0),
        }
    }
}
