use config::Config;
use serde::Deserialize;
use tracing::debug;

/// Upper bound the catalog accepts for a single `BatchCreatePartition` call.
pub const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistrationConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Checks a batch size against the catalog's per-call limit.
pub fn validate_batch_size(batch_size: usize) -> crate::Result<()> {
    if batch_size == 0 || batch_size > MAX_BATCH_SIZE {
        return Err(crate::Error::InvalidInput(format!(
            "batch size must be between 1 and {}, got {}",
            MAX_BATCH_SIZE, batch_size
        )));
    }
    Ok(())
}

impl Settings {
    /// Loads settings from an optional file, then `PARTITIONER__*` environment variables.
    pub fn new(path: Option<&str>) -> crate::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("PARTITIONER").separator("__"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    /// Call once logging is initialised; the log level itself comes from these settings.
    pub fn log_loaded(&self) {
        debug!(
            region = ?self.catalog.region,
            endpoint = ?self.catalog.endpoint,
            batch_size = self.registration.batch_size,
            log_level = %self.logging.level,
            "Loaded settings"
        );
    }

    pub fn validate(&self) -> crate::Result<()> {
        validate_batch_size(self.registration.batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::new(None).unwrap();
        assert_eq!(settings.registration.batch_size, 100);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[catalog]
region = "eu-west-1"
endpoint = "http://localhost:4566"

[registration]
batch_size = 25

[logging]
level = "debug"
"#
        )
        .unwrap();

        let settings = Settings::new(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(settings.catalog.region.as_deref(), Some("eu-west-1"));
        assert_eq!(
            settings.catalog.endpoint.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(settings.registration.batch_size, 25);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let result = Settings::new(Some("/nonexistent/partitioner.toml"));
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_batch_size() {
        assert!(validate_batch_size(1).is_ok());
        assert!(validate_batch_size(MAX_BATCH_SIZE).is_ok());
        assert!(matches!(
            validate_batch_size(0),
            Err(crate::Error::InvalidInput(_))
        ));
        assert!(validate_batch_size(MAX_BATCH_SIZE + 1).is_err());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_loaded_reaches_subscriber() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || Settings::default().log_loaded());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Loaded settings"));
        assert!(output.contains("batch_size=100"));
        assert!(output.contains("log_level=info"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_batch() {
        let mut settings = Settings::default();
        settings.registration.batch_size = 0;
        assert!(settings.validate().is_err());

        settings.registration.batch_size = 101;
        assert!(settings.validate().is_err());

        settings.registration.batch_size = 100;
        assert!(settings.validate().is_ok());
    }
}
