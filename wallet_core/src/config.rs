//! Wallet core configuration with TOML file support.

use serde::{Deserialize, Serialize};

use ecash_utils::LogFormat;

use crate::error::WalletError;
use crate::schedule::DenominationFeeKind;

/// Configuration for the wallet core.
///
/// Can be loaded from a TOML file via [`WalletCoreConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCoreConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,

    /// Log level filter, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub fees: FeesConfig,
}

/// Which coins the selector may draw from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Exchange base URLs whose coins may be selected. Empty allows all.
    #[serde(default)]
    pub allowed_exchanges: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeesConfig {
    /// Denomination fee kinds included in exchange fee summaries.
    #[serde(default = "default_fee_kinds")]
    pub denomination_fee_kinds: Vec<DenominationFeeKind>,
}

impl Default for FeesConfig {
    fn default() -> Self {
        Self {
            denomination_fee_kinds: default_fee_kinds(),
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fee_kinds() -> Vec<DenominationFeeKind> {
    DenominationFeeKind::ALL.to_vec()
}

impl WalletCoreConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, WalletError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        let config: Self = toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if self.log_level.trim().is_empty() {
            return Err(WalletError::Config("log_level must not be empty".into()));
        }
        if let Some(url) = self.selection.allowed_exchanges.iter().find(|u| u.trim().is_empty()) {
            return Err(WalletError::Config(format!(
                "allowed_exchanges contains an empty URL: {url:?}"
            )));
        }
        let kinds = &self.fees.denomination_fee_kinds;
        if kinds.is_empty() {
            return Err(WalletError::Config(
                "denomination_fee_kinds must list at least one kind".into(),
            ));
        }
        if (1..kinds.len()).any(|i| kinds[..i].contains(&kinds[i])) {
            return Err(WalletError::Config(
                "denomination_fee_kinds contains duplicates".into(),
            ));
        }
        Ok(())
    }

    /// Install the global tracing subscriber as configured.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been set.
    pub fn init_logging(&self) {
        ecash_utils::init_logging(self.log_format, &self.log_level);
    }
}

impl Default for WalletCoreConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            selection: SelectionConfig::default(),
            fees: FeesConfig::default(),
        }
    }
}
