use bench_api::{Codec, DataFormat};
use bench_harness::{ArtifactStore, Generator, encode_all, validate_batch};
use codec_protobuf::ProtobufCodec;
use metrics_rpc::{ClientConfig, MetricsClient};

use crate::config::Effective;
use crate::error::ClientError;

// ═══════════════════════════════════════════════════════════════
//  generate → validate → encode (timed) → transmit
// ═══════════════════════════════════════════════════════════════

pub async fn run(eff: &Effective) -> Result<(), ClientError> {
    tracing::info!(
        count = eff.count,
        seed = ?eff.seed,
        server = %format!("{}:{}", eff.server_host, eff.server_port),
        results = %eff.results_path.display(),
        "client starting"
    );
    let store = ArtifactStore::open(&eff.results_path)?;

    let batch = Generator::new(eff.seed).generate(eff.count);
    tracing::info!(records = batch.len(), "metrics generated");

    validate_batch(&batch).inspect_err(|e| {
        tracing::error!(stage = "validate", error = %e, "batch rejected");
    })?;

    let mut encoded = encode_all(&batch)?;
    for e in encoded.iter() {
        tracing::info!(
            format = %e.format,
            bytes = e.bytes.len(),
            elapsed_s = e.elapsed.as_secs_f64(),
            "serialized"
        );
    }
    store.write_times(&encoded.serialize_times())?;

    // the exact bytes measured above go on the wire
    let proto = encoded
        .take(DataFormat::Protobuf)
        .ok_or(ClientError::MissingEncoding(DataFormat::Protobuf))?;
    let request = ProtobufCodec.decode(&proto)?;

    let config = ClientConfig::new(&eff.server_host, eff.server_port).connect_timeout(eff.connect_timeout);
    let reply = transmit(&config, request).await.inspect_err(|e| {
        tracing::error!(stage = "transmit", endpoint = %config.uri(), error = %e, "transmission failed");
    })?;

    tracing::info!(response = %reply, "server response");
    Ok(())
}

async fn transmit(config: &ClientConfig, request: metrics_rpc::MetricsRequest) -> Result<String, ClientError> {
    let mut client = MetricsClient::connect(config).await?;
    tracing::info!(endpoint = %client.endpoint(), records = request.metrics.len(), "sending protobuf batch");
    Ok(client.send_metrics(request).await?)
}
