use crate::Error;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Cap on the history window the analytics engine pulls.
    pub history_window: i64,
    /// Cadence of the background expiry sweep.
    pub sweep_interval_secs: u64,
    /// Default page size for the admin history view.
    pub page_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Parse("DATABASE_URL is not set".to_string()))?;

        Ok(Self {
            database_url,
            history_window: env_or("ALERTA_HISTORY_WINDOW", 1000)?,
            sweep_interval_secs: env_or("ALERTA_SWEEP_INTERVAL_SECS", 60)?,
            page_size: env_or("ALERTA_PAGE_SIZE", 20)?,
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, Error> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Parse(format!("invalid value for {key}: {raw}"))),
        Err(_) => Ok(default),
    }
}
