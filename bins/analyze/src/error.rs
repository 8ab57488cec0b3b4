use std::path::PathBuf;

use bench_harness::BenchError;

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    Bench(#[from] BenchError),

    #[error("missing artifacts (run the benchmark first): {}", display_paths(.0))]
    MissingArtifacts(Vec<PathBuf>),

    #[error("write chart '{}': {source}", path.display())]
    Chart { path: PathBuf, source: std::io::Error },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
