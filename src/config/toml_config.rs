use crate::adapters::storage::is_plain_slot_name;
use crate::core::catalog::{default_plans, Catalog};
use crate::core::shop::{SlotNames, CART_SLOT, CONSENT_SLOT, LAST_ORDER_SLOT};
use crate::domain::model::Plan;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_distinct, validate_non_empty_string, validate_one_of, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static env var pattern"));

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    /// Replaces the built-in catalog when present.
    pub plans: Option<Vec<Plan>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
    pub cart_key: String,
    pub consent_key: String,
    pub last_order_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: "./shop-data".to_string(),
            cart_key: CART_SLOT.to_string(),
            consent_key: CONSENT_SLOT.to_string(),
            last_order_key: LAST_ORDER_SLOT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

impl ShopConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| ShopError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn slot_names(&self) -> SlotNames {
        SlotNames {
            cart: self.storage.cart_key.clone(),
            consent: self.storage.consent_key.clone(),
            last_order: self.storage.last_order_key.clone(),
        }
    }

    pub fn catalog(&self) -> Result<Catalog> {
        match &self.plans {
            Some(plans) => Catalog::new(plans.clone()),
            None => Catalog::new(default_plans()),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::File {
            validate_path("storage.path", &self.storage.path)?;
        }

        validate_non_empty_string("storage.cart_key", &self.storage.cart_key)?;
        validate_non_empty_string("storage.consent_key", &self.storage.consent_key)?;
        validate_non_empty_string("storage.last_order_key", &self.storage.last_order_key)?;
        validate_distinct(
            "storage keys",
            [
                self.storage.cart_key.as_str(),
                self.storage.consent_key.as_str(),
                self.storage.last_order_key.as_str(),
            ],
        )?;
        if self.storage.backend == StorageBackend::File {
            for (field, key) in [
                ("storage.cart_key", &self.storage.cart_key),
                ("storage.consent_key", &self.storage.consent_key),
                ("storage.last_order_key", &self.storage.last_order_key),
            ] {
                if !is_plain_slot_name(key) {
                    return Err(ShopError::InvalidConfigValueError {
                        field: field.to_string(),
                        value: key.clone(),
                        reason: "File slots need a plain file name (letters, digits, '_', '-', '.')"
                            .to_string(),
                    });
                }
            }
        }

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        if matches!(&self.plans, Some(plans) if plans.is_empty()) {
            return Err(ShopError::InvalidConfigValueError {
                field: "plans".to_string(),
                value: "[]".to_string(),
                reason: "Catalog needs at least one plan".to_string(),
            });
        }
        self.catalog()?;

        Ok(())
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = ShopConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShopConfig::default());
        assert_eq!(config.slot_names(), SlotNames::default());
        assert_eq!(config.catalog().unwrap(), Catalog::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
backend = "memory"
cart_key = "demo_cart"

[logging]
level = "debug"
json = true

[[plans]]
id = "solo"
name = "Solo"
price_monthly = 99
seats = 1

[[plans]]
id = "team"
name = "Team"
price_monthly = 399
seats = 10
desc = "Small teams."
"#;

        let config = ShopConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.slot_names().cart, "demo_cart");
        assert_eq!(config.slot_names().last_order, LAST_ORDER_SLOT);
        assert!(config.logging.json);

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.plans().len(), 2);
        assert_eq!(catalog.price_of("team"), Some(399));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SKIPASS_TEST_DATA_DIR", "/tmp/skipass-test");

        let config = ShopConfig::from_toml_str(
            r#"
[storage]
path = "${SKIPASS_TEST_DATA_DIR}"
"#,
        )
        .unwrap();
        assert_eq!(config.storage.path, "/tmp/skipass-test");

        std::env::remove_var("SKIPASS_TEST_DATA_DIR");
    }

    #[test]
    fn test_colliding_slot_names_are_rejected() {
        let config = ShopConfig::from_toml_str(
            r#"
[storage]
cart_key = "same"
consent_key = "same"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_slot_names_must_be_plain_file_names() {
        let nested = ShopConfig::from_toml_str("[storage]\ncart_key = \"a/b\"").unwrap();
        let err = nested.validate().unwrap_err();
        assert!(matches!(
            err,
            ShopError::InvalidConfigValueError { ref field, .. } if field == "storage.cart_key"
        ));

        let spaced = ShopConfig::from_toml_str("[storage]\nlast_order_key = \"my order\"").unwrap();
        assert!(spaced.validate().is_err());

        // Memory slots are not files, so any distinct name is fine.
        let memory =
            ShopConfig::from_toml_str("[storage]\nbackend = \"memory\"\ncart_key = \"my cart\"")
                .unwrap();
        assert!(memory.validate().is_ok());
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let level = ShopConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap();
        assert!(level.validate().is_err());

        let duplicate_plans = ShopConfig::from_toml_str(
            r#"
[[plans]]
id = "a"
name = "A"
price_monthly = 1
seats = 1

[[plans]]
id = "a"
name = "A again"
price_monthly = 2
seats = 1
"#,
        )
        .unwrap();
        assert!(duplicate_plans.validate().is_err());

        assert!(ShopConfig::from_toml_str("[storage]\nbackend = \"s3\"").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\npath = \"./elsewhere\"\n")
            .unwrap();

        let config = ShopConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.path, "./elsewhere");
    }
}
