use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use bench_api::{Batch, IntoBatch};
use metrics_proto::metrics_service_server::{self, MetricsServiceServer};
use metrics_proto::{MetricsRequest, MetricsResponse};

use crate::error::{HandlerError, RpcError};

/// Обработка принятого batch. Вызывается в blocking-пуле tokio,
/// поэтому может делать синхронный I/O.
pub trait BatchHandler: Send + Sync + 'static {
    fn handle(&self, batch: Batch) -> Result<String, HandlerError>;
}

/// Реализация gRPC-сервиса поверх [`BatchHandler`].
pub struct MetricsService<H> {
    handler: Arc<H>,
    permits: Arc<Semaphore>,
}

impl<H: BatchHandler> MetricsService<H> {
    /// `workers` — максимум одновременно обрабатываемых запросов (минимум 1).
    pub fn new(handler: H, workers: usize) -> Self {
        Self {
            handler: Arc::new(handler),
            permits: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    pub fn into_server(self) -> MetricsServiceServer<Self> {
        MetricsServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl<H: BatchHandler> metrics_service_server::MetricsService for MetricsService<H> {
    async fn send_metrics(
        &self,
        request: Request<MetricsRequest>,
    ) -> Result<Response<MetricsResponse>, Status> {
        let remote = request.remote_addr();
        let batch = request
            .into_inner()
            .into_batch()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        let records = batch.len();
        tracing::info!(remote = ?remote, records, "metrics received");

        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| Status::unavailable("server is shutting down"))?;

        let handler = Arc::clone(&self.handler);
        let result = tokio::task::spawn_blocking(move || handler.handle(batch))
            .await
            .map_err(|e| Status::internal(format!("handler task failed: {e}")))?;

        match result {
            Ok(message) => Ok(Response::new(MetricsResponse { message })),
            Err(e) => {
                tracing::error!(stage = "handle", records, error = %e, "batch processing failed");
                Err(Status::internal(e.to_string()))
            }
        }
    }
}

/// Обслуживать `listener` до отмены `token`.
///
/// После отмены новые соединения не принимаются, текущие запросы
/// дорабатывают; ограничение по времени накладывает вызывающий.
pub async fn serve<H: BatchHandler>(
    listener: TcpListener,
    service: MetricsService<H>,
    token: CancellationToken,
) -> Result<(), RpcError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(addr = %addr, "grpc server listening");
    }

    Server::builder()
        .add_service(service.into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), token.cancelled())
        .await
        .map_err(RpcError::Serve)?;

    tracing::info!("grpc server stopped");
    Ok(())
}
