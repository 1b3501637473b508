use crate::core::dashboards::Pricing;
use crate::utils::error::{InventoryError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sheets,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub sheets: Option<SheetsConfig>,
    pub csv: Option<CsvConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub access_token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_containers_sheet")]
    pub containers_sheet: String,
    #[serde(default = "default_movements_sheet")]
    pub movements_sheet: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    pub directory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

fn default_api_base() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_containers_sheet() -> String {
    "containers".to_string()
}

fn default_movements_sheet() -> String {
    "movements".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InventoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InventoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable; unknown
    /// variables are left untouched so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InventoryError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match &self.logging.format {
            None => Ok(LogFormat::default()),
            Some(value) => {
                LogFormat::parse(value).ok_or_else(|| InventoryError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: value.clone(),
                    reason: "expected 'compact' or 'json'".to_string(),
                })
            }
        }
    }
}

fn reject_unresolved(field: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(InventoryError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: "environment variable is not set".to_string(),
        });
    }
    Ok(())
}

impl Validate for SheetsConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("store.sheets.spreadsheet_id", &self.spreadsheet_id)?;
        reject_unresolved("store.sheets.spreadsheet_id", &self.spreadsheet_id)?;
        validate_non_empty_string("store.sheets.access_token", &self.access_token)?;
        reject_unresolved("store.sheets.access_token", &self.access_token)?;
        validate_url("store.sheets.api_base", &self.api_base)?;
        validate_non_empty_string("store.sheets.containers_sheet", &self.containers_sheet)?;
        validate_non_empty_string("store.sheets.movements_sheet", &self.movements_sheet)?;
        validate_range("store.sheets.timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        match self.store.backend {
            StoreBackend::Sheets => {
                validate_required_field("store.sheets", &self.store.sheets)?.validate()?;
            }
            StoreBackend::Csv => {
                let csv = validate_required_field("store.csv", &self.store.csv)?;
                validate_path("store.csv.directory", &csv.directory)?;
            }
        }

        if !self.pricing.sale_price_per_unit.is_finite() || self.pricing.sale_price_per_unit < 0.0
        {
            return Err(InventoryError::InvalidConfigValueError {
                field: "pricing.sale_price_per_unit".to_string(),
                value: self.pricing.sale_price_per_unit.to_string(),
                reason: "must be a non-negative amount".to_string(),
            });
        }
        if !self.pricing.monthly_rent_per_unit.is_finite()
            || self.pricing.monthly_rent_per_unit < 0.0
        {
            return Err(InventoryError::InvalidConfigValueError {
                field: "pricing.monthly_rent_per_unit".to_string(),
                value: self.pricing.monthly_rent_per_unit.to_string(),
                reason: "must be a non-negative amount".to_string(),
            });
        }

        self.log_format()?;
        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
