use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use url::Url;

/// Live football proxy for the API-Football v3 service
#[derive(Parser, Debug, Clone)]
#[command(name = "football-live-proxy", version, about)]
pub struct Config {
    /// API-Football key, sent as x-rapidapi-key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Upstream host, sent as x-rapidapi-host
    #[arg(long, env = "API_HOST", default_value = "v3.football.api-sports.io")]
    pub api_host: String,

    /// Upstream base URL
    #[arg(
        long,
        env = "API_BASE_URL",
        default_value = "https://v3.football.api-sports.io"
    )]
    pub api_base_url: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0")]
    pub listen_addr: IpAddr,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Background live-match refresh interval in seconds
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "30")]
    pub refresh_interval_secs: u64,

    /// Timeout for each upstream request in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "10")]
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("API_KEY must not be empty");
        }
        if self.api_host.trim().is_empty() {
            anyhow::bail!("API_HOST must not be empty");
        }
        let base = Url::parse(&self.api_base_url)
            .map_err(|e| anyhow::anyhow!("API_BASE_URL is not a valid URL: {}", e))?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("API_BASE_URL must use http or https");
        }
        if self.refresh_interval_secs == 0 {
            anyhow::bail!("refresh_interval_secs must be positive");
        }
        if !(1..=60).contains(&self.upstream_timeout_secs) {
            anyhow::bail!("upstream_timeout_secs must be between 1 and 60");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
