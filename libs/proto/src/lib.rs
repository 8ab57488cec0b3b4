//! Фиксированная Protobuf-схема бенчмарка (`proto/metrics.proto`) и
//! gRPC stubs сервиса `metrics.MetricsService`.
//!
//! Сообщения — prost-derive структуры, теги полей совпадают с `.proto`.
//! Канонический [`bench_api::ServerMetrics`] конвертируется в/из wire-типов
//! через `From`, так что транспорт и кодеки работают с одной моделью.

use bench_api::{Batch, CodecError, IntoBatch};

include!(concat!(env!("OUT_DIR"), "/metrics.MetricsService.rs"));

// ════════════════════════════════════════════════════════════════
//  Messages
// ════════════════════════════════════════════════════════════════

#[derive(Clone, PartialEq, prost::Message)]
pub struct ServerMetrics {
    #[prost(string, tag = "1")]
    pub server_id: String,
    #[prost(double, tag = "2")]
    pub cpu_usage: f64,
    #[prost(double, tag = "3")]
    pub memory_usage: f64,
    #[prost(double, tag = "4")]
    pub disk_usage: f64,
    #[prost(string, tag = "5")]
    pub timestamp: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MetricsRequest {
    #[prost(message, repeated, tag = "1")]
    pub metrics: Vec<ServerMetrics>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MetricsResponse {
    #[prost(string, tag = "1")]
    pub message: String,
}

// ════════════════════════════════════════════════════════════════
//  Canonical model conversions
// ════════════════════════════════════════════════════════════════

impl From<&bench_api::ServerMetrics> for ServerMetrics {
    fn from(m: &bench_api::ServerMetrics) -> Self {
        Self {
            server_id: m.server_id.clone(),
            cpu_usage: m.cpu_usage,
            memory_usage: m.memory_usage,
            disk_usage: m.disk_usage,
            timestamp: m.timestamp.clone(),
        }
    }
}

impl From<ServerMetrics> for bench_api::ServerMetrics {
    fn from(m: ServerMetrics) -> Self {
        Self {
            server_id: m.server_id,
            cpu_usage: m.cpu_usage,
            memory_usage: m.memory_usage,
            disk_usage: m.disk_usage,
            timestamp: m.timestamp,
        }
    }
}

impl MetricsRequest {
    pub fn from_batch(batch: &[bench_api::ServerMetrics]) -> Self {
        Self {
            metrics: batch.iter().map(ServerMetrics::from).collect(),
        }
    }
}

impl IntoBatch for MetricsRequest {
    fn into_batch(self) -> Result<Batch, CodecError> {
        Ok(self.metrics.into_iter().map(bench_api::ServerMetrics::from).collect())
    }
}
