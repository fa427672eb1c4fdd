use std::path::PathBuf;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_UTC_OFFSET_HOURS, PRODUCTION_API_URL, SANDBOX_API_URL};
use crate::crypto::SignType;
use crate::error::Error;
use crate::keys::{KeyPair, PrivateKeyEncoding};

/// Which gateway to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Sandbox,
}

impl Environment {
    pub fn api_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_API_URL,
            Environment::Sandbox => SANDBOX_API_URL,
        }
    }
}

/// Client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub app_id: String,
    #[serde(default)]
    pub partner_id: String,
    #[serde(default)]
    pub environment: Environment,
    /// Overrides the environment's gateway URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub sign_type: SignType,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_path: Option<PathBuf>,
    #[serde(default)]
    pub private_key_encoding: PrivateKeyEncoding,
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, environment: Environment) -> Self {
        Self {
            app_id: app_id.into(),
            partner_id: String::new(),
            environment,
            endpoint: None,
            sign_type: SignType::default(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            timeout_secs: None,
            private_key_path: None,
            public_key_path: None,
            private_key_encoding: PrivateKeyEncoding::default(),
        }
    }

    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = partner_id.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_sign_type(mut self, sign_type: SignType) -> Self {
        self.sign_type = sign_type;
        self
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// Gateway URL in effect.
    pub fn api_url(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.api_url())
    }

    /// Offset applied to the `timestamp` field.
    pub fn utc_offset(&self) -> Result<FixedOffset, Error> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                Error::Config(format!(
                    "utc_offset_hours out of range: {}",
                    self.utc_offset_hours
                ))
            })
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), Error> {
        if self.app_id.trim().is_empty() {
            return Err(Error::Config("app_id must not be empty".to_string()));
        }
        if self.api_url().is_empty() {
            return Err(Error::Config("endpoint must not be empty".to_string()));
        }
        self.utc_offset()?;
        Ok(())
    }

    /// Load the key pair named by `private_key_path` / `public_key_path`.
    pub fn load_key_pair(&self) -> Result<KeyPair, Error> {
        let private_key_path = self
            .private_key_path
            .as_deref()
            .ok_or_else(|| Error::Config("private_key_path is not set".to_string()))?;
        KeyPair::from_pem_files(
            private_key_path,
            self.public_key_path.as_deref(),
            self.private_key_encoding,
        )
    }
}
