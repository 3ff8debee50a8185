use crate::config::pricing::PricingConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    pub service_area: Option<ServiceAreaConfig>,
    pub geocoding: Option<GeocodingConfig>,
    pub leads: Option<LeadConfig>,
}

/// Reference point distances are measured from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceAreaConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance_km: f64,
}

impl Default for ServiceAreaConfig {
    fn default() -> Self {
        Self {
            name: "Hamburg".to_string(),
            latitude: 53.5511,
            longitude: 9.9937,
            max_distance_km: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadConfig {
    pub endpoint: Option<String>,
    pub output_dir: Option<String>,
    pub source: Option<String>,
}

impl GeocodingConfig {
    pub const DEFAULT_USER_AGENT: &'static str = "renovation-quote/0.1";

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(Self::DEFAULT_USER_AGENT)
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("Germany")
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(500))
    }
}

impl QuoteConfig {
    pub const DEFAULT_LEAD_SOURCE: &'static str = "quote-calculator";

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string, substituting `${VAR}` placeholders first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        Ok(toml::from_str(&processed_content)?)
    }

    /// Unset variables are left in place so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        self.pricing.validate()?;

        if let Some(area) = &self.service_area {
            validate_range("service_area.latitude", area.latitude, -90.0, 90.0)?;
            validate_range("service_area.longitude", area.longitude, -180.0, 180.0)?;
            validate_range("service_area.max_distance_km", area.max_distance_km, 0.0, 20_000.0)?;
        }

        if let Some(geocoding) = &self.geocoding {
            validate_url("geocoding.endpoint", &geocoding.endpoint)?;
            validate_non_empty_string("geocoding.user_agent", geocoding.user_agent())?;
        }

        if let Some(leads) = &self.leads {
            if leads.endpoint.is_none() && leads.output_dir.is_none() {
                return Err(QuoteError::MissingConfigError {
                    field: "leads.endpoint or leads.output_dir".to_string(),
                });
            }
            if let Some(endpoint) = &leads.endpoint {
                validate_url("leads.endpoint", endpoint)?;
            }
            if let Some(dir) = &leads.output_dir {
                validate_path("leads.output_dir", dir)?;
            }
        }

        Ok(())
    }

    pub fn service_area(&self) -> ServiceAreaConfig {
        self.service_area.clone().unwrap_or_default()
    }
}

impl ConfigProvider for QuoteConfig {
    fn lead_endpoint(&self) -> Option<&str> {
        self.leads.as_ref().and_then(|l| l.endpoint.as_deref())
    }

    fn lead_output_dir(&self) -> Option<&str> {
        self.leads.as_ref().and_then(|l| l.output_dir.as_deref())
    }

    fn lead_source(&self) -> &str {
        self.leads
            .as_ref()
            .and_then(|l| l.source.as_deref())
            .unwrap_or(Self::DEFAULT_LEAD_SOURCE)
    }

    fn geocoding_endpoint(&self) -> Option<&str> {
        self.geocoding.as_ref().map(|g| g.endpoint.as_str())
    }
}

impl Validate for QuoteConfig {
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
    fn test_parse_full_config() {
        let toml_content = r#"
[pricing.wall]
base = 9.5

[pricing.adjustments]
minimum_order = 200.0

[service_area]
name = "Hamburg"
latitude = 53.55
longitude = 9.99
max_distance_km = 150.0

[geocoding]
endpoint = "https://nominatim.openstreetmap.org/search"
debounce_ms = 300

[leads]
endpoint = "https://example.com/api/leads"
source = "landing-page"
"#;

        let config = QuoteConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pricing.wall.base, 9.5);
        assert_eq!(config.pricing.wall.ceiling, 8.50);
        assert_eq!(config.pricing.adjustments.minimum_order, 200.0);
        assert_eq!(config.service_area().max_distance_km, 150.0);
        assert_eq!(
            config.geocoding.as_ref().unwrap().debounce(),
            Duration::from_millis(300)
        );
        assert_eq!(config.lead_source(), "landing-page");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = QuoteConfig::from_toml_str("").unwrap();
        assert_eq!(config.pricing, PricingConfig::default());
        assert_eq!(config.service_area(), ServiceAreaConfig::default());
        assert_eq!(config.lead_source(), QuoteConfig::DEFAULT_LEAD_SOURCE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_QUOTE_LEAD_ENDPOINT", "https://leads.example.com/api");

        let toml_content = r#"
[leads]
endpoint = "${TEST_QUOTE_LEAD_ENDPOINT}"
"#;

        let config = QuoteConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.lead_endpoint(), Some("https://leads.example.com/api"));

        std::env::remove_var("TEST_QUOTE_LEAD_ENDPOINT");
    }

    #[test]
    fn test_unset_placeholder_fails_validation() {
        let toml_content = r#"
[geocoding]
endpoint = "${TEST_QUOTE_UNSET_GEOCODER}"
"#;

        let config = QuoteConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_leads_section_needs_a_target() {
        let config = QuoteConfig::from_toml_str("[leads]\nsource = \"x\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(QuoteError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = QuoteConfig::from_toml_str("[pricing.wall\nbase = 1");
        assert!(matches!(result, Err(QuoteError::TomlError(_))));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pricing.flooring]\nepoxy = 140.0\n")
            .unwrap();

        let config = QuoteConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pricing.flooring.epoxy, 140.0);
    }
}
