#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Maximum number of undelivered notifications. `None` = unbounded.
    /// Set via CATALOG_MAX_PENDING_NOTIFICATIONS; 0 or unset disables the bound.
    pub max_pending_notifications: Option<usize>,
    /// Extra origin allowed by CORS besides localhost. Set via DASHBOARD_ORIGIN.
    pub dashboard_origin: String,
    /// Set LOG_FORMAT=json for JSON log lines.
    pub json_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            max_pending_notifications: None,
            dashboard_origin: "http://localhost:3000".into(),
            json_logs: false,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let defaults = Config::default();

    let port = match std::env::var("CATALOG_PORT") {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("CATALOG_PORT is not a valid port: {}", raw))?,
        Err(_) => defaults.port,
    };

    Ok(Config {
        port,
        max_pending_notifications: parse_limit(
            std::env::var("CATALOG_MAX_PENDING_NOTIFICATIONS").ok().as_deref(),
        ),
        dashboard_origin: std::env::var("DASHBOARD_ORIGIN").unwrap_or(defaults.dashboard_origin),
        json_logs: std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false),
    })
}

fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}
