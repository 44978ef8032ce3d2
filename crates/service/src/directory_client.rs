//! Outbound client for the customer directory.
//!
//! The rental catalog resolves an address by calling the directory's
//! `GET /customers/{name}/address` and relaying the body as-is.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use common::metrics::{CATALOG_DIRECTORY_CALLS_TOTAL, CATALOG_DIRECTORY_CALL_DURATION};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DirectoryClientError {
    #[error("invalid customer service url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("customer service unreachable: {0}")]
    Transport(String),
    #[error("customer service answered with status {0}")]
    Status(u16),
}

/// Resolve a customer name to its address through the directory.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    async fn resolve_address(&self, name: &str) -> Result<String, DirectoryClientError>;
}

/// reqwest-backed client with an explicit request timeout. No retries.
#[derive(Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: Url,
}

impl HttpDirectoryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DirectoryClientError> {
        let parsed = Url::parse(base_url).map_err(|e| DirectoryClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(DirectoryClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base url".into(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryClientError::Transport(e.to_string()))?;
        Ok(Self { client, base_url: parsed })
    }

    /// `{base}/customers/{name}/address`, with `name` encoded as one path segment.
    pub fn address_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["customers", name, "address"]);
        }
        url
    }

    async fn fetch(&self, url: Url) -> Result<String, DirectoryClientError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DirectoryClientError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DirectoryClientError::Status(status.as_u16()));
        }
        resp.text()
            .await
            .map_err(|e| DirectoryClientError::Transport(e.to_string()))
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn resolve_address(&self, name: &str) -> Result<String, DirectoryClientError> {
        let url = self.address_url(name);
        info!(url = %url, "Requesting URL");

        let started = Instant::now();
        let result = self.fetch(url).await;
        CATALOG_DIRECTORY_CALL_DURATION.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(_) => CATALOG_DIRECTORY_CALLS_TOTAL.with_label_values(&["ok"]).inc(),
            Err(e) => {
                CATALOG_DIRECTORY_CALLS_TOTAL.with_label_values(&["error"]).inc();
                warn!(error = %e, "customer service call failed");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Router};
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn spawn(router: Router) -> anyhow::Result<String> {
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await { eprintln!("server error: {}", e); }
        });
        Ok(format!("http://{}:{}", addr.ip(), addr.port()))
    }

    fn client(base: &str) -> HttpDirectoryClient {
        HttpDirectoryClient::new(base, Duration::from_secs(2)).expect("client")
    }

    #[test]
    fn url_composition() {
        let c = client("http://customers:8081");
        assert_eq!(
            c.address_url("Jean Dupont").as_str(),
            "http://customers:8081/customers/Jean%20Dupont/address"
        );
        // trailing slash and a path prefix are both kept sane
        let c = client("http://gw/api/");
        assert_eq!(c.address_url("Luc").as_str(), "http://gw/api/customers/Luc/address");
        // a slash inside the name stays inside its segment
        assert_eq!(c.address_url("a/b").as_str(), "http://gw/api/customers/a%2Fb/address");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(
            HttpDirectoryClient::new("not a url", Duration::from_secs(1)),
            Err(DirectoryClientError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpDirectoryClient::new("mailto:x@y", Duration::from_secs(1)),
            Err(DirectoryClientError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn relays_body_verbatim() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/customers/:name/address",
            get(|Path(name): Path<String>| async move { format!("address of {name}") }),
        );
        let base = spawn(router).await?;

        let body = client(&base).resolve_address("Jean Dupont").await?;
        assert_eq!(body, "address of Jean Dupont");
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/customers/:name/address",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn(router).await?;

        let err = client(&base).resolve_address("Jean Dupont").await.unwrap_err();
        assert!(matches!(err, DirectoryClientError::Status(500)));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_directory_is_a_transport_error() -> anyhow::Result<()> {
        // grab a free port, then close it
        let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let err = client(&format!("http://{addr}")).resolve_address("Jean Dupont").await.unwrap_err();
        assert!(matches!(err, DirectoryClientError::Transport(_)));
        Ok(())
    }

    #[tokio::test]
    async fn hung_directory_times_out() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/customers/:name/address",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let base = spawn(router).await?;
        let client = HttpDirectoryClient::new(&base, Duration::from_millis(200))?;

        let started = Instant::now();
        let err = client.resolve_address("Jean Dupont").await.unwrap_err();
        assert!(matches!(err, DirectoryClientError::Transport(_)));
        assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
        Ok(())
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
    }

    #[tokio::test]
    async fn logs_target_url_once_per_lookup() -> anyhow::Result<()> {
        let router = Router::new().route(
            "/customers/:name/address",
            get(|| async { "12 Rue de la Paix, Paris" }),
        );
        let base = spawn(router).await?;

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        // current_thread 运行时：订阅者对本测试内的调用生效
        let _guard = tracing::subscriber::set_default(subscriber);

        let body = client(&base).resolve_address("Jean Dupont").await?;
        assert_eq!(body, "12 Rue de la Paix, Paris");

        let logged = String::from_utf8(buf.0.lock().unwrap().clone())?;
        assert_eq!(logged.matches("customers/Jean%20Dupont/address").count(), 1, "{logged}");
        Ok(())
    }
}
