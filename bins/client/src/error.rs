use bench_harness::BenchError;
use metrics_rpc::RpcError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Bench(#[from] BenchError),

    #[error("{0}")]
    Codec(#[from] bench_api::CodecError),

    #[error("{0}")]
    Rpc(#[from] RpcError),

    #[error("no {0} encoding produced")]
    MissingEncoding(bench_api::DataFormat),
}

impl ClientError {
    /// Категория для структурного поля `kind` в логе.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Bench(e) => match e.kind() {
                bench_harness::ErrorKind::Validation => "validation",
                bench_harness::ErrorKind::Codec => "codec",
                bench_harness::ErrorKind::Io => "io",
                bench_harness::ErrorKind::Config => "config",
            },
            ClientError::Codec(_) | ClientError::MissingEncoding(_) => "codec",
            ClientError::Rpc(_) => "transport",
        }
    }
}
