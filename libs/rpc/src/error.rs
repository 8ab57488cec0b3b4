use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("invalid endpoint uri: {0}")]
    InvalidUri(String),

    #[error("connect to {endpoint} timed out after {timeout:?}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    #[error("connection error: {0}")]
    Connection(#[from] tonic::transport::Error),

    #[error("rpc failed: {0}")]
    Status(#[from] tonic::Status),

    #[error("serve: {0}")]
    Serve(#[source] tonic::transport::Error),
}

/// Ошибка обработки batch на сервере; текст уходит клиенту в `Status::internal`.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(detail: impl std::fmt::Display) -> Self {
        Self(detail.to_string())
    }
}
