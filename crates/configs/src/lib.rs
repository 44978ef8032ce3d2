use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_CUSTOMER_PORT: u16 = 8081;
pub const DEFAULT_RENTAL_PORT: u16 = 8080;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub customer_service: CustomerServiceConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: String,
    /// 0 表示未配置，由各服务使用自己的默认端口
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Json,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("storage.backend must be memory or json, got {other}")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::Memory, data_dir: default_data_dir() }
    }
}

/// Where the rental service finds the customer directory (`customer.service.url`).
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerServiceConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CustomerServiceConfig {
    fn default() -> Self {
        Self { url: String::new(), timeout_secs: default_timeout_secs() }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_timeout_secs() -> u64 { 10 }
fn default_customer_service_url() -> String { format!("http://127.0.0.1:{DEFAULT_CUSTOMER_PORT}") }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to defaults when the file
    /// is absent, then apply environment overrides and validate.
    pub fn load_and_validate(default_port: u16) -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate(default_port)?;
        Ok(cfg)
    }

    /// Environment wins over the file. `lookup` is injected so tests stay off the
    /// process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be in 1..=65535, got {port}"))?;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(url) = lookup("CUSTOMER_SERVICE_URL") {
            self.customer_service.url = url;
        }
        if let Some(secs) = lookup("CUSTOMER_SERVICE_TIMEOUT_SECS") {
            self.customer_service.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| anyhow!("CUSTOMER_SERVICE_TIMEOUT_SECS must be a positive integer, got {secs}"))?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self, default_port: u16) -> Result<()> {
        self.server.normalize(default_port);
        self.storage.validate()?;
        self.customer_service.normalize();
        self.customer_service.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self, default_port: u16) {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            self.port = default_port;
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::Json && self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must be set for the json backend"));
        }
        Ok(())
    }
}

impl CustomerServiceConfig {
    fn normalize(&mut self) {
        let trimmed = self.url.trim();
        self.url = if trimmed.is_empty() {
            default_customer_service_url()
        } else {
            trimmed.to_string()
        };
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("customer_service.url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("customer_service.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
