use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ChainConfig, ChainId, FetchSettings, LoggingConfig, Settings, MAX_PAGE_SIZE};

/// Prefix for environment overrides, e.g. `AZURO_FEES__FETCH__PAGE_SIZE=500`.
pub const ENV_PREFIX: &str = "AZURO_FEES";

/// Loads the application configuration.
///
/// The TOML file at `path` is optional; anything it leaves out falls back to the
/// built-in defaults, including the chain table. Environment variables prefixed
/// with [`ENV_PREFIX`] override both. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
    finish(builder)
}

/// Parses configuration from an in-memory TOML document.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Settings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_document_uses_builtin_defaults() {
        let settings = load_config_from_str("").unwrap();
        assert_eq!(settings.fetch.page_size, 1000);
        assert_eq!(settings.fetch.max_pages, None);
        assert_eq!(settings.fetch.request_timeout, Duration::from_secs(60));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.chains.len(), 5);

        let polygon = settings.chain(ChainId::Polygon).unwrap();
        assert_eq!(polygon.start_timestamp, 1675209600);
        assert!(polygon.endpoint.ends_with("azuro-api-polygon-v3"));
        assert_eq!(settings.chain(ChainId::Chiliz).unwrap().start_timestamp, 1716422400);
    }

    #[test]
    fn chain_table_from_file_replaces_builtin() {
        let settings = load_config_from_str(
            r#"
            [fetch]
            page_size = 500
            max_pages = 20
            request_timeout = "15s"

            [chains.linea]
            endpoint = "http://localhost:8000/subgraphs/name/linea"
            start_timestamp = 1691452800
            "#,
        )
        .unwrap();

        assert_eq!(settings.fetch.page_size, 500);
        assert_eq!(settings.fetch.max_pages, Some(20));
        assert_eq!(settings.fetch.request_timeout, Duration::from_secs(15));
        assert_eq!(settings.chains.len(), 1);
        assert_eq!(
            settings.chain(ChainId::Linea).unwrap().endpoint,
            "http://localhost:8000/subgraphs/name/linea"
        );
        assert!(matches!(
            settings.chain(ChainId::Polygon),
            Err(ConfigError::UnknownChain(name)) if name == "polygon"
        ));
    }

    #[test]
    fn environment_overrides_apply_without_a_file() {
        // SAFETY: no other test in this crate reads this variable.
        unsafe { std::env::set_var("AZURO_FEES__FETCH__PAGE_SIZE", "500") };
        let result = load_config(Path::new("/nonexistent/azuro-fees/config.toml"));
        unsafe { std::env::remove_var("AZURO_FEES__FETCH__PAGE_SIZE") };

        let settings = result.unwrap();
        assert_eq!(settings.fetch.page_size, 500);
        assert_eq!(settings.fetch.request_timeout, Duration::from_secs(60));
        assert_eq!(settings.chains.len(), 5);
        assert!(settings.chain(ChainId::Linea).is_ok());
    }

    #[test]
    fn rejects_oversized_pages() {
        let err = load_config_from_str("[fetch]\npage_size = 5000\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_zero_page_cap() {
        let err = load_config_from_str("[fetch]\nmax_pages = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_blank_endpoint() {
        let err = load_config_from_str(
            "[chains.xdai]\nendpoint = \" \"\nstart_timestamp = 1654646400\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("xdai")));
    }

    #[test]
    fn chain_ids_parse_case_insensitively() {
        assert_eq!("Polygon".parse::<ChainId>().unwrap(), ChainId::Polygon);
        assert_eq!("gnosis".parse::<ChainId>().unwrap(), ChainId::Xdai);
        assert_eq!(ChainId::Arbitrum.to_string(), "arbitrum");
        assert!("solana".parse::<ChainId>().is_err());
    }
}
