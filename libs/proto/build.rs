//! Генерация gRPC stubs для `metrics.MetricsService`.
//!
//! Сообщения объявлены вручную через `prost::Message` derive (см. `src/lib.rs`),
//! поэтому используется manual builder tonic-build — protoc не нужен.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let send_metrics = tonic_build::manual::Method::builder()
        .name("send_metrics")
        .route_name("SendMetrics")
        .input_type("crate::MetricsRequest")
        .output_type("crate::MetricsResponse")
        .codec_path("tonic::codec::ProstCodec")
        .build();

    let service = tonic_build::manual::Service::builder()
        .name("MetricsService")
        .package("metrics")
        .method(send_metrics)
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}
