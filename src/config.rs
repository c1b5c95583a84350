use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

/// Process configuration, read from the environment (and `.env` if present).
///
/// | Env Var                    | Default             |
/// |----------------------------|---------------------|
/// | `DATABASE_URL`             | `sqlite://todos.db` |
/// | `HOST`                     | `127.0.0.1`         |
/// | `PORT`                     | `3000`              |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://todos.db".to_string());
        let host: IpAddr = lookup("HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse()
            .context("HOST must be an IP address")?;
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;
        let max_connections: u32 = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;
        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be a positive integer");
        }
        Ok(Self { database_url, host, port, max_connections })
    }

    pub fn addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}
