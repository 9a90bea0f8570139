//! HTTP client used to reach the gateway

use crate::{
    error::{AppError, Result},
    models::{Config, GatewayRequest, GatewayResponse},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Network seam of the generator; tests swap in recording doubles
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// GET the request's URL and return the full body, whatever the status
    async fn get(&self, request: &GatewayRequest) -> Result<GatewayResponse>;
}

/// reqwest-backed client with a hard per-request bound
pub struct HttpGatewayClient {
    client: Client,
    request_timeout: Duration,
}

impl HttpGatewayClient {
    /// Create a client whose requests give up after `request_timeout`
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            // One connection per request, nothing kept alive in between
            .pool_max_idle_per_host(0)
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            request_timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.timeout())
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn get(&self, request: &GatewayRequest) -> Result<GatewayResponse> {
        let url = request.url()?;
        let started = Instant::now();

        let exchange = async {
            let response = self.client.get(url.clone()).send().await?;
            let status_code = response.status().as_u16();
            let body = response.bytes().await
                .map_err(|e| AppError::http_request(format!("Failed to read body of GET {}: {}", url, e)))?;
            Ok::<_, AppError>((status_code, body.to_vec()))
        };

        let (status_code, body) = timeout(self.request_timeout, exchange).await
            .map_err(|_| AppError::timeout(format!(
                "GET {} did not complete within {:?}", url, self.request_timeout
            )))??;

        Ok(GatewayResponse {
            status_code,
            body,
            elapsed: started.elapsed(),
        })
    }
}
