//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    #[serde(default)]
    pub resend_api_key: String,

    /// Sender email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Base URL of the Resend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whether emails are actually sent; disabled deployments log instead
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl EmailConfig {
    /// Get the From header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled {
            if self.resend_api_key.is_empty() {
                return Err(ValidationError::MissingRequired("EMAIL_RESEND_API_KEY"));
            }
            if !self.resend_api_key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            base_url: default_base_url(),
            enabled: default_enabled(),
        }
    }
}

fn default_from_email() -> String {
    "vouchers@regalo.shop".to_string()
}

fn default_from_name() -> String {
    "Regalo".to_string()
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_format() {
        let config = EmailConfig {
            from_email: "gifts@example.com".to_string(),
            from_name: "Gift Shop".to_string(),
            ..Default::default()
        };
        assert_eq!(config.from_header(), "Gift Shop <gifts@example.com>");
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = EmailConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_key_prefix() {
        let config = EmailConfig {
            resend_api_key: "sk_live_xxx".to_string(), // Wrong prefix
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            resend_api_key: "re_123abc".to_string(),
            from_email: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_disabled_skips_key_check() {
        let config = EmailConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = EmailConfig {
            resend_api_key: "re_123abc".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
