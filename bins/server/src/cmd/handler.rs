use bench_api::Batch;
use bench_harness::ArtifactStore;
use bench_harness::measure::process_batch;
use metrics_rpc::{BatchHandler, HandlerError, SUCCESS_MESSAGE};

/// Сохраняет каждый принятый batch во все форматы и замеряет decode.
pub struct StoreHandler {
    store: ArtifactStore,
}

impl StoreHandler {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }
}

impl BatchHandler for StoreHandler {
    fn handle(&self, batch: Batch) -> Result<String, HandlerError> {
        match process_batch(&self.store, &batch) {
            Ok(Some(report)) => {
                tracing::info!(
                    records = report.records,
                    json_deser_s = report.times.json_deser_time,
                    proto_deser_s = report.times.proto_deser_time,
                    flat_deser_s = report.times.flat_deser_time,
                    "batch processed"
                );
                Ok(SUCCESS_MESSAGE.to_string())
            }
            // empty batch or missing artifact: already logged, client still gets an ack
            Ok(None) => Ok(SUCCESS_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!(kind = %e.kind(), error = %e, "batch processing failed");
                Err(HandlerError::new(e))
            }
        }
    }
}
