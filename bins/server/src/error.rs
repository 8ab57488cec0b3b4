use bench_harness::BenchError;
use metrics_rpc::RpcError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    Bench(#[from] BenchError),

    #[error("{0}")]
    Rpc(#[from] RpcError),

    #[error("bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },

    #[error("signal: {0}")]
    Signal(#[from] std::io::Error),

    #[error("runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("server task: {0}")]
    Join(#[from] tokio::task::JoinError),
}
