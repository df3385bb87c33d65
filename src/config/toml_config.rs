use crate::adapters::{StaticProvider, WebProvider};
use crate::domain::model::{CalcSettings, DEFAULT_UPPER_BOUND};
use crate::domain::ports::NumberProvider;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalcConfig {
    #[serde(default)]
    pub calculator: CalculatorConfig,
    pub provider: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub upper_bound: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub r#type: ProviderType,
    pub endpoint: Option<String>,
    pub separator: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Static,
    Web,
}

impl ProviderConfig {
    pub fn web(endpoint: impl Into<String>) -> Self {
        Self {
            r#type: ProviderType::Web,
            endpoint: Some(endpoint.into()),
            separator: None,
            timeout_seconds: None,
            values: None,
        }
    }
}

impl CalcConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalcError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are kept as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalcError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(bound) = self.calculator.upper_bound {
            validation::validate_positive_number("calculator.upper_bound", bound, 1)?;
        }

        if let Some(provider) = &self.provider {
            if let Some(separator) = &provider.separator {
                validation::validate_non_empty_string("provider.separator", separator)?;
            }
            if let Some(timeout) = provider.timeout_seconds {
                let timeout = i64::try_from(timeout).unwrap_or(i64::MAX);
                validation::validate_positive_number("provider.timeout_seconds", timeout, 1)?;
            }
            if provider.r#type == ProviderType::Web {
                let endpoint =
                    validation::validate_required_field("provider.endpoint", &provider.endpoint)?;
                validation::validate_url("provider.endpoint", endpoint)?;
            }
        }

        Ok(())
    }

    pub fn settings(&self) -> CalcSettings {
        CalcSettings {
            upper_bound: self.calculator.upper_bound.unwrap_or(DEFAULT_UPPER_BOUND),
        }
    }

    /// Builds the configured provider. Fails when no `[provider]` section is
    /// present.
    pub fn build_provider(&self) -> Result<Box<dyn NumberProvider>> {
        let provider = validation::validate_required_field("provider", &self.provider)?;

        match provider.r#type {
            ProviderType::Static => {
                let static_provider = match &provider.values {
                    Some(values) => StaticProvider::new(values.clone()),
                    None => StaticProvider::default(),
                };
                Ok(Box::new(static_provider))
            }
            ProviderType::Web => {
                let endpoint =
                    validation::validate_required_field("provider.endpoint", &provider.endpoint)?;
                let mut web_provider = WebProvider::new(endpoint.clone());
                if let Some(separator) = &provider.separator {
                    web_provider = web_provider.with_separator(separator.clone());
                }
                if let Some(seconds) = provider.timeout_seconds {
                    web_provider = web_provider.with_timeout(Duration::from_secs(seconds))?;
                }
                Ok(Box::new(web_provider))
            }
        }
    }
}

impl Validate for CalcConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
