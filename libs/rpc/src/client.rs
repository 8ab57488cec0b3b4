use std::time::Duration;

use tonic::transport::{Channel, Endpoint};

use metrics_proto::MetricsRequest;
use metrics_proto::metrics_service_client::MetricsServiceClient;

use crate::error::RpcError;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Верхняя граница ожидания готовности канала.
    pub connect_timeout: Duration,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    inner: MetricsServiceClient<Channel>,
    endpoint: String,
}

impl MetricsClient {
    /// Подключиться к серверу. Без retry: ошибка или таймаут сразу наверх.
    pub async fn connect(config: &ClientConfig) -> Result<Self, RpcError> {
        let uri = config.uri();
        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| RpcError::InvalidUri(format!("{uri}: {e}")))?
            .connect_timeout(config.connect_timeout);

        let channel = tokio::time::timeout(config.connect_timeout, endpoint.connect())
            .await
            .map_err(|_| RpcError::ConnectTimeout {
                endpoint: uri.clone(),
                timeout: config.connect_timeout,
            })??;

        tracing::info!(endpoint = %uri, "connected to metrics server");
        Ok(Self {
            inner: MetricsServiceClient::new(channel),
            endpoint: uri,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Отправить batch, вернуть текст ответа сервера.
    pub async fn send_metrics(&mut self, request: MetricsRequest) -> Result<String, RpcError> {
        let records = request.metrics.len();
        let response = self.inner.send_metrics(request).await?;
        let message = response.into_inner().message;
        tracing::debug!(endpoint = %self.endpoint, records, response = %message, "metrics sent");
        Ok(message)
    }
}
