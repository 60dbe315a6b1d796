//! # Settings
//!
//! Runtime configuration and wiring of providers into a service.
//!
//! Settings are layered in this order, later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. `REMIT__*` environment variables, with `__` separating nested keys,
//!    for example `REMIT__AGGREGATION__TIMEOUT_MS=5000`
//!
//! A `.env` file in the working directory is loaded into the environment
//! first when present.
//!
//! A provider section that is absent means the provider is not registered.
//!
//! # Example file
//!
//! ```toml
//! [aggregation]
//! timeout_ms = 15000
//! per_provider_timeout_ms = 10000
//!
//! [logging]
//! format = "json"
//! level = "info"
//!
//! [providers.wise]
//! api_key = "..."
//! profile_id = "12345"
//! sandbox = true
//!
//! [providers.worldremit]
//! api_key = "..."
//! api_secret = "..."
//! ```

use crate::application::error::ApplicationError;
use crate::application::services::{AggregationConfig, RemittanceHub, RemittanceService};
use crate::infrastructure::logging::{LogFormat, LoggingError, init_logging};
use crate::infrastructure::providers::{
    ProviderError, RemitlyConfig, RemitlyProvider, RemittanceProvider, SimulatedProvider,
    SimulatedProviderConfig, WiseConfig, WiseProvider, WorldRemitConfig, WorldRemitProvider,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REMIT";

/// Errors raised while loading settings or wiring providers.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configuration sources could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// A provider could not be constructed from its settings.
    #[error("failed to configure provider {provider}: {source}")]
    Provider {
        /// Settings section of the provider.
        provider: &'static str,
        /// Construction error.
        #[source]
        source: ProviderError,
    },

    /// A simulated provider could not be constructed from its settings.
    #[error("failed to configure simulated provider {name}: {source}")]
    Simulated {
        /// Configured provider name.
        name: String,
        /// Construction error.
        #[source]
        source: ProviderError,
    },

    /// The providers could not be assembled into a hub.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

fn default_level() -> String {
    "info".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

/// Per-provider settings. Absent sections are not registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidersSettings {
    /// Wise credentials.
    #[serde(default)]
    pub wise: Option<WiseConfig>,
    /// Remitly credentials.
    #[serde(default)]
    pub remitly: Option<RemitlyConfig>,
    /// WorldRemit credentials.
    #[serde(default)]
    pub worldremit: Option<WorldRemitConfig>,
    /// In-process simulated providers, registered after the live ones.
    #[serde(default)]
    pub simulated: Vec<SimulatedProviderConfig>,
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceSettings {
    /// Quote aggregation limits.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Provider credentials.
    #[serde(default)]
    pub providers: ProvidersSettings,
    /// Log output.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl RemittanceSettings {
    /// Loads settings from an optional file and the environment.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Load` if the file is missing or malformed,
    /// or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!(path = %env_file.display(), "loaded .env file");
        }

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            wise = settings.providers.wise.is_some(),
            remitly = settings.providers.remitly.is_some(),
            worldremit = settings.providers.worldremit.is_some(),
            simulated = settings.providers.simulated.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Installs the global tracing subscriber described by these settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Logging` if the level is not a valid filter
    /// or a subscriber is already installed.
    pub fn init_logging(&self) -> Result<(), SettingsError> {
        Ok(init_logging(self.logging.format, &self.logging.level)?)
    }

    /// Builds the configured providers and wraps them in a service.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider cannot be constructed or two
    /// providers share a name.
    pub fn build_service(&self) -> Result<RemittanceService, SettingsError> {
        let hub = RemittanceHub::new(build_providers(&self.providers)?)?
            .with_config(self.aggregation.clone());
        Ok(RemittanceService::new(Arc::new(hub)))
    }
}

/// Builds adapters for every configured provider, in the order Wise,
/// Remitly, WorldRemit, then simulated providers in file order.
///
/// # Errors
///
/// Returns an error if an adapter rejects its settings.
pub fn build_providers(
    settings: &ProvidersSettings,
) -> Result<Vec<Arc<dyn RemittanceProvider>>, SettingsError> {
    let mut providers: Vec<Arc<dyn RemittanceProvider>> = Vec::new();

    if let Some(config) = &settings.wise {
        let provider = WiseProvider::new(config.clone()).map_err(|source| {
            SettingsError::Provider {
                provider: "wise",
                source,
            }
        })?;
        providers.push(Arc::new(provider));
    }
    if let Some(config) = &settings.remitly {
        let provider = RemitlyProvider::new(config.clone()).map_err(|source| {
            SettingsError::Provider {
                provider: "remitly",
                source,
            }
        })?;
        providers.push(Arc::new(provider));
    }
    if let Some(config) = &settings.worldremit {
        let provider = WorldRemitProvider::new(config.clone()).map_err(|source| {
            SettingsError::Provider {
                provider: "worldremit",
                source,
            }
        })?;
        providers.push(Arc::new(provider));
    }
    for config in &settings.simulated {
        let provider = SimulatedProvider::new(config.clone()).map_err(|source| {
            SettingsError::Simulated {
                name: config.name().to_string(),
                source,
            }
        })?;
        providers.push(Arc::new(provider));
    }

    tracing::info!(
        providers = ?providers.iter().map(|p| p.name().as_str()).collect::<Vec<_>>(),
        "providers configured"
    );
    Ok(providers)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(extension: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    mod load {
        use super::*;

        #[test]
        fn reads_toml_file() {
            let file = write_settings(
                ".toml",
                r#"
                [aggregation]
                timeout_ms = 5000
                max_quotes = 3

                [logging]
                format = "json"

                [providers.wise]
                api_key = "wise-key"
                profile_id = "42"
                sandbox = true

                [providers.worldremit]
                api_key = "wr-key"
                api_secret = "wr-secret"
                "#,
            );

            let settings = RemittanceSettings::load(Some(file.path())).unwrap();

            assert_eq!(settings.aggregation.timeout_ms, 5000);
            assert_eq!(settings.aggregation.per_provider_timeout_ms, 10_000);
            assert_eq!(settings.aggregation.max_quotes, Some(3));
            assert_eq!(settings.logging.format, LogFormat::Json);
            assert_eq!(settings.logging.level, "info");
            assert!(settings.providers.wise.is_some());
            assert!(settings.providers.remitly.is_none());
            assert!(settings.providers.worldremit.is_some());
        }

        #[test]
        fn reads_json_file_with_simulated_providers() {
            let file = write_settings(
                ".json",
                r#"{
                    "providers": {
                        "simulated": [
                            {
                                "name": "Sandbox",
                                "exchange_rate": "1.2",
                                "fee_model": { "type": "flat", "value": "15" },
                                "currencies": ["USD", "PHP"],
                                "countries": ["US", "PH"]
                            }
                        ]
                    }
                }"#,
            );

            let settings = RemittanceSettings::load(Some(file.path())).unwrap();
            assert_eq!(settings.providers.simulated.len(), 1);
            assert_eq!(settings.providers.simulated[0].name(), "Sandbox");
            assert_eq!(settings.aggregation, AggregationConfig::default());
        }

        #[test]
        fn missing_file_is_an_error() {
            let result = RemittanceSettings::load(Some(Path::new("/nonexistent/remit.toml")));
            assert!(matches!(result.unwrap_err(), SettingsError::Load(_)));
        }
    }

    mod build {
        use super::*;

        #[test]
        fn fixed_registration_order() {
            let settings = ProvidersSettings {
                wise: Some(WiseConfig::new("k", "1")),
                remitly: Some(RemitlyConfig::new("k")),
                worldremit: Some(WorldRemitConfig::new("k", "s")),
                simulated: vec![SimulatedProviderConfig::new("Sandbox", rust_decimal::Decimal::ONE)],
            };

            let providers = build_providers(&settings).unwrap();
            let names: Vec<&str> = providers.iter().map(|p| p.name().as_str()).collect();
            assert_eq!(names, ["Wise", "Remitly", "WorldRemit", "Sandbox"]);
        }

        #[test]
        fn absent_sections_register_nothing() {
            let providers = build_providers(&ProvidersSettings::default()).unwrap();
            assert!(providers.is_empty());
        }

        #[test]
        fn invalid_simulated_provider_is_reported_by_name() {
            let settings = ProvidersSettings {
                simulated: vec![SimulatedProviderConfig::new("Broken", rust_decimal::Decimal::ZERO)],
                ..Default::default()
            };

            let err = build_providers(&settings).unwrap_err();
            assert!(matches!(err, SettingsError::Simulated { ref name, .. } if name == "Broken"));
        }

        #[test]
        fn duplicate_simulated_names_fail_service_build() {
            let settings = RemittanceSettings {
                providers: ProvidersSettings {
                    simulated: vec![
                        SimulatedProviderConfig::new("Twin", rust_decimal::Decimal::ONE),
                        SimulatedProviderConfig::new("Twin", rust_decimal::Decimal::ONE),
                    ],
                    ..Default::default()
                },
                ..Default::default()
            };

            let err = settings.build_service().unwrap_err();
            assert!(matches!(
                err,
                SettingsError::Application(ApplicationError::DuplicateProvider(_))
            ));
        }
    }

    #[test]
    fn debug_output_hides_secrets() {
        let settings = ProvidersSettings {
            worldremit: Some(WorldRemitConfig::new("wr-key-123", "wr-secret-456")),
            ..Default::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("wr-key-123"));
        assert!(!debug.contains("wr-secret-456"));
    }
}
