use std::env;
use std::str::FromStr;
use anyhow::{anyhow, bail, Context, Result};

pub const DEFAULT_TABLE: &str = "sku_warehouse";

/// Which record store the service runs against
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Spanner(SpannerConfig),
    /// Process-local store, for development and tests
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
    pub table: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub service_port: u16,
    pub service_host: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Spanner,
    Memory,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "spanner" => Ok(Backend::Spanner),
            "memory" => Ok(Backend::Memory),
            other => Err(anyhow!(
                "STORE_BACKEND must be one of: spanner, memory, got '{}'",
                other
            )),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{} environment variable is required", key))
        };

        let backend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "spanner".to_string())
            .parse::<Backend>()?;

        let store = match backend {
            Backend::Memory => StoreConfig::Memory,
            Backend::Spanner => {
                let table = lookup("SPANNER_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
                validate_table_name(&table)?;

                StoreConfig::Spanner(SpannerConfig {
                    emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                    project: required("SPANNER_PROJECT")?,
                    instance: required("SPANNER_INSTANCE")?,
                    database: required("SPANNER_DATABASE")?,
                    table,
                })
            }
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            store,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        match &self.store {
            StoreConfig::Spanner(spanner) => {
                tracing::info!("  Store backend: spanner");
                tracing::info!("  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
                tracing::info!("  Spanner project: {}", spanner.project);
                tracing::info!("  Spanner instance: {}", spanner.instance);
                tracing::info!("  Spanner database: {}", spanner.database);
                tracing::info!("  Spanner table: {}", spanner.table);
            }
            StoreConfig::Memory => {
                tracing::info!("  Store backend: memory (records are lost on exit)");
            }
        }
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

/// The table name is spliced into SQL, so it must be a plain identifier
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!(
            "SPANNER_TABLE must start with a letter and contain only letters, digits and underscores, got '{}'",
            table
        );
    }
    Ok(())
}
