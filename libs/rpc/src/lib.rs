//! gRPC-обвязка сервиса `metrics.MetricsService`.
//!
//! Клиент отправляет Protobuf-batch, сервер передаёт канонический
//! [`bench_api::Batch`] в [`BatchHandler`] — шов между транспортом и
//! логикой замеров. Handler выполняется в `spawn_blocking`, число
//! одновременно обрабатываемых запросов ограничено семафором.

mod client;
mod error;
mod server;

pub use client::{ClientConfig, MetricsClient};
pub use error::{HandlerError, RpcError};
pub use server::{BatchHandler, MetricsService, serve};

pub use metrics_proto::{MetricsRequest, MetricsResponse};

/// Ответ сервера на успешно обработанный batch.
pub const SUCCESS_MESSAGE: &str = "Data received and processed.";
