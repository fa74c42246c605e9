//! Environment-driven configuration.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Settings for the generative-text provider.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: SecretString,
    pub api_base: String,
    /// Model used for question and report generation.
    pub model: String,
    /// Cheaper model used by the demo chat assistant.
    pub chat_model: String,
    pub timeout_secs: u64,
}

impl LlmSettings {
    /// Build settings from environment variables.
    /// Returns `None` if `OPENAI_API_KEY` is not set (generation disabled).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;

        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model = std::env::var("LEADFLOW_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let chat_model =
            std::env::var("LEADFLOW_CHAT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let timeout_secs: u64 = std::env::var("LEADFLOW_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(120);

        Some(Self {
            api_key: SecretString::from(api_key),
            api_base,
            model,
            chat_model,
            timeout_secs,
        })
    }
}

/// SMTP + branding configuration for report dispatch.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// From address on every outbound message.
    pub from_address: String,
    /// Internal address that receives lead notifications and serves as reply-to.
    pub business_email: String,
    pub brand_name: String,
    pub booking_url: String,
}

impl MailerConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_HOST` is not set (dispatch disabled).
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;

        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_address = std::env::var("MAIL_FROM_ADDRESS").unwrap_or_else(|_| username.clone());
        let business_email =
            std::env::var("BUSINESS_EMAIL").unwrap_or_else(|_| from_address.clone());
        let brand_name = std::env::var("BRAND_NAME").unwrap_or_else(|_| "Leadflow".to_string());
        let booking_url = std::env::var("BOOKING_URL").unwrap_or_default();

        Some(Self {
            smtp_host,
            smtp_port,
            username,
            password,
            from_address,
            business_email,
            brand_name,
            booking_url,
        })
    }
}

/// Contact-form relay configuration (third-party forms endpoint).
#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub endpoint: String,
    pub access_key: SecretString,
}

impl ContactConfig {
    /// Returns `None` if `CONTACT_FORM_ACCESS_KEY` is not set (relay disabled).
    pub fn from_env() -> Option<Self> {
        let access_key = std::env::var("CONTACT_FORM_ACCESS_KEY").ok()?;
        let endpoint = std::env::var("CONTACT_FORM_ENDPOINT")
            .unwrap_or_else(|_| "https://api.web3forms.com/submit".to_string());
        Some(Self {
            endpoint,
            access_key: SecretString::from(access_key),
        })
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub llm: Option<LlmSettings>,
    pub mailer: Option<MailerConfig>,
    pub contact: Option<ContactConfig>,
}

impl AppConfig {
    /// Read the full configuration from the environment.
    ///
    /// Absent optional sections disable their feature; the affected routes
    /// answer with a configuration error instead of failing at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("not a valid port number: {s}"),
            })?,
            Err(_) => 3001,
        };

        Ok(Self {
            port,
            llm: LlmSettings::from_env(),
            mailer: MailerConfig::from_env(),
            contact: ContactConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_settings_none_without_key() {
        // SAFETY: test runs single-threaded over this var.
        unsafe { std::env::remove_var("OPENAI_API_KEY") };
        assert!(LlmSettings::from_env().is_none());
    }

    #[test]
    fn mailer_config_none_without_host() {
        unsafe { std::env::remove_var("SMTP_HOST") };
        assert!(MailerConfig::from_env().is_none());
    }
}
