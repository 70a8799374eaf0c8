//! Configuration module
//!
//! Loads and validates the JSON configuration file holding the Rundeck
//! connection settings, Mandrill credentials and the recipient list. Keys use
//! PascalCase (`RundeckServerUrl`, `MandrillRecipients`, ...).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use failwatch_core::digest::DEFAULT_SYSTEM_NAME;
use failwatch_core::domain::message::{Recipient, Sender};
use failwatch_mailer::DEFAULT_API_URL;
use serde::Deserialize;

/// File looked up next to the executable when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "conf.json";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run configuration
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Rundeck base URL (e.g., "https://rundeck.example.com")
    pub rundeck_server_url: String,

    /// API version used in request paths (e.g., "12")
    pub rundeck_api_version: String,

    pub rundeck_auth_token: String,

    pub mandrill_key: String,

    pub mandrill_from_email: String,

    pub mandrill_from_name: String,

    /// Recipients, in the order they are added to the message
    pub mandrill_recipients: Vec<RecipientEntry>,

    /// Mandrill API base URL
    #[serde(default = "default_mandrill_api_url")]
    pub mandrill_api_url: String,

    /// Timeout applied to each outbound HTTP call
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Name shown between brackets at the start of the subject
    #[serde(default = "default_system_name")]
    pub system_name: String,
}

/// One entry of `MandrillRecipients`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecipientEntry {
    pub email: String,

    pub name: String,

    /// "to", "cc" or "bcc", passed to Mandrill as given
    pub send_type: String,
}

fn default_mandrill_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_system_name() -> String {
    DEFAULT_SYSTEM_NAME.to_string()
}

impl Config {
    /// `conf.json` in the directory holding the running executable
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        let dir = exe
            .parent()
            .context("The running executable has no parent directory")?;
        Ok(dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Reads, parses and validates a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config = Self::from_json(&contents)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;

        Ok(config)
    }

    /// Parses and validates a configuration document
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(contents).context("Invalid configuration document")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !is_http_url(&self.rundeck_server_url) {
            anyhow::bail!("RundeckServerUrl must start with http:// or https://");
        }

        if self.rundeck_api_version.trim().is_empty() {
            anyhow::bail!("RundeckApiVersion cannot be empty");
        }

        if self.rundeck_auth_token.trim().is_empty() {
            anyhow::bail!("RundeckAuthToken cannot be empty");
        }

        if self.mandrill_key.trim().is_empty() {
            anyhow::bail!("MandrillKey cannot be empty");
        }

        if self.mandrill_from_email.trim().is_empty() {
            anyhow::bail!("MandrillFromEmail cannot be empty");
        }

        if self.mandrill_from_name.trim().is_empty() {
            anyhow::bail!("MandrillFromName cannot be empty");
        }

        if self.mandrill_recipients.is_empty() {
            anyhow::bail!("MandrillRecipients must list at least one recipient");
        }

        if let Some(position) = self
            .mandrill_recipients
            .iter()
            .position(|recipient| recipient.email.trim().is_empty())
        {
            anyhow::bail!("MandrillRecipients[{}] has no Email", position);
        }

        for (position, recipient) in self.mandrill_recipients.iter().enumerate() {
            if recipient.name.trim().is_empty() {
                anyhow::bail!("MandrillRecipients[{}] has no Name", position);
            }
            if recipient.send_type.trim().is_empty() {
                anyhow::bail!("MandrillRecipients[{}] has no SendType", position);
            }
        }

        if !is_http_url(&self.mandrill_api_url) {
            anyhow::bail!("MandrillApiUrl must start with http:// or https://");
        }

        if self.request_timeout_secs == 0 {
            anyhow::bail!("RequestTimeoutSecs must be greater than 0");
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sender(&self) -> Sender {
        Sender {
            email: self.mandrill_from_email.clone(),
            name: self.mandrill_from_name.clone(),
        }
    }

    /// Recipients in configured order
    pub fn recipients(&self) -> Vec<Recipient> {
        self.mandrill_recipients
            .iter()
            .map(|entry| Recipient {
                email: entry.email.clone(),
                name: entry.name.clone(),
                send_type: entry.send_type.clone(),
            })
            .collect()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rundeck_server_url", &self.rundeck_server_url)
            .field("rundeck_api_version", &self.rundeck_api_version)
            .field("rundeck_auth_token", &"***")
            .field("mandrill_key", &"***")
            .field("mandrill_from_email", &self.mandrill_from_email)
            .field("mandrill_from_name", &self.mandrill_from_name)
            .field("mandrill_recipients", &self.mandrill_recipients)
            .field("mandrill_api_url", &self.mandrill_api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("system_name", &self.system_name)
            .finish()
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "RundeckServerUrl": "https://rundeck.example.com",
        "RundeckApiVersion": "12",
        "RundeckAuthToken": "token-abc",
        "MandrillKey": "key-xyz",
        "MandrillFromEmail": "rundeck@example.com",
        "MandrillFromName": "Rundeck",
        "MandrillRecipients": [
            {"Email": "ops@example.com", "Name": "Ops", "SendType": "to"},
            {"Email": "lead@example.com", "Name": "Lead", "SendType": "cc"},
            {"Email": "audit@example.com", "Name": "Audit", "SendType": "bcc"}
        ]
    }"#;

    fn minimal() -> Config {
        Config::from_json(MINIMAL).unwrap()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = minimal();

        assert_eq!(config.rundeck_server_url, "https://rundeck.example.com");
        assert_eq!(config.mandrill_api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.system_name, "RunDeck");
    }

    #[test]
    fn test_optional_fields_override_defaults() {
        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        value["MandrillApiUrl"] = "http://localhost:9000/api/1.0".into();
        value["RequestTimeoutSecs"] = 5.into();
        value["SystemName"] = "Rundeck Prod".into();

        let config = Config::from_json(&value.to_string()).unwrap();
        assert_eq!(config.mandrill_api_url, "http://localhost:9000/api/1.0");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.system_name, "Rundeck Prod");
    }

    #[test]
    fn test_recipients_keep_order_and_type() {
        let recipients = minimal().recipients();

        let emails: Vec<&str> = recipients.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(
            emails,
            vec!["ops@example.com", "lead@example.com", "audit@example.com"]
        );
        assert_eq!(recipients[1].send_type, "cc");
        assert_eq!(recipients[2].send_type, "bcc");
        assert_eq!(recipients[2].name, "Audit");
    }

    #[test]
    fn test_sender() {
        let sender = minimal().sender();
        assert_eq!(sender.email, "rundeck@example.com");
        assert_eq!(sender.name, "Rundeck");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        value.as_object_mut().unwrap().remove("RundeckAuthToken");

        let err = Config::from_json(&value.to_string()).unwrap_err();
        assert!(format!("{err:#}").contains("RundeckAuthToken"));
    }

    #[test]
    fn test_missing_sender_name_or_recipient_fields_are_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        value.as_object_mut().unwrap().remove("MandrillFromName");
        let err = Config::from_json(&value.to_string()).unwrap_err();
        assert!(format!("{err:#}").contains("MandrillFromName"));

        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        value["MandrillRecipients"] = serde_json::json!([{"Email": "ops@example.com"}]);
        let err = Config::from_json(&value.to_string()).unwrap_err();
        assert!(format!("{err:#}").contains("Name"));

        let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
        value["MandrillRecipients"] =
            serde_json::json!([{"Email": "ops@example.com", "Name": "Ops"}]);
        let err = Config::from_json(&value.to_string()).unwrap_err();
        assert!(format!("{err:#}").contains("SendType"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = minimal();
        assert!(config.validate().is_ok());

        config.rundeck_server_url = "rundeck.example.com".to_string();
        assert!(config.validate().is_err());
        config.rundeck_server_url = "http://rundeck.local:4440".to_string();
        assert!(config.validate().is_ok());

        config.rundeck_auth_token = " ".to_string();
        assert!(config.validate().is_err());
        config.rundeck_auth_token = "token".to_string();

        config.rundeck_api_version = String::new();
        assert!(config.validate().is_err());
        config.rundeck_api_version = "12".to_string();

        config.mandrill_key = String::new();
        assert!(config.validate().is_err());
        config.mandrill_key = "key".to_string();

        config.mandrill_from_email = String::new();
        assert!(config.validate().is_err());
        config.mandrill_from_email = "rundeck@example.com".to_string();

        config.mandrill_from_name = " ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "MandrillFromName cannot be empty");
        config.mandrill_from_name = "Rundeck".to_string();

        config.mandrill_recipients[2].name = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "MandrillRecipients[2] has no Name");
        config.mandrill_recipients[2].name = "Audit".to_string();

        config.mandrill_recipients[0].send_type = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "MandrillRecipients[0] has no SendType");
        config.mandrill_recipients[0].send_type = "to".to_string();

        config.mandrill_recipients[1].email = String::new();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "MandrillRecipients[1] has no Email");

        config.mandrill_recipients.clear();
        assert!(config.validate().is_err());
        config.mandrill_recipients = minimal().mandrill_recipients;

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.request_timeout_secs = 10;

        config.mandrill_api_url = "ftp://mandrill".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let debug = format!("{:?}", minimal());
        assert!(!debug.contains("token-abc"));
        assert!(!debug.contains("key-xyz"));
        assert!(debug.contains("rundeck.example.com"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.mandrill_recipients.len(), 3);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.json");

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("conf.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid configuration document"));
    }

    #[test]
    fn test_default_path_is_next_to_executable() {
        let path = Config::default_path().unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_CONFIG_FILE);
    }
}
