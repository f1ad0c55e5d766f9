use serde::Deserialize;

/// Runtime configuration, resolved from defaults, an optional
/// `pengaduan.toml` next to the binary, and `PENGADUAN_*` environment
/// variables (highest precedence).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database connection string, e.g. `sqlite://pengaduan.db?mode=rwc`.
    pub database_url: String,
    /// Socket address the HTTP server binds to.
    pub listen_addr: String,
}

impl AppConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns a `config::ConfigError` if a source is malformed or the
    /// resolved values cannot be deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("database_url", "sqlite::memory:")?
            .set_default("listen_addr", "0.0.0.0:3000")?
            .add_source(config::File::with_name("pengaduan").required(false))
            .add_source(config::Environment::with_prefix("PENGADUAN"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve() {
        let cfg = AppConfig::load().expect("defaults should always resolve");
        assert!(!cfg.database_url.is_empty());
        assert!(cfg.listen_addr.contains(':'));
    }
}
