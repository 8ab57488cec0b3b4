use std::path::PathBuf;

use clap::Args;

use bench_harness::config::{DEFAULT_CONFIG_FILE, load_optional, require};

use crate::error::AnalyzeError;

#[derive(Args, Clone, Debug)]
pub struct AnalyzeArgs {
    /// Путь к bench.toml
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, env = "BENCH_CONFIG")]
    pub config: PathBuf,

    /// Каталог результатов прогона
    #[arg(long, env = "RESULTS_PATH")]
    pub results_path: Option<PathBuf>,

    /// Куда писать SVG (по умолчанию — каталог результатов)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Каталог для analyze.log
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Итоговая конфигурация после мержа: bench.toml < env/CLI
#[derive(Debug)]
pub struct Effective {
    pub results_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: Option<PathBuf>,
}

impl Effective {
    pub fn new(args: &AnalyzeArgs) -> Result<Self, AnalyzeError> {
        let cfg = load_optional(&args.config)?;
        let results_path = require(args.results_path.clone().or(cfg.results_path), "results_path", "RESULTS_PATH")?;

        Ok(Self {
            output_dir: args
                .output_dir
                .clone()
                .or(cfg.output_dir)
                .unwrap_or_else(|| results_path.clone()),
            results_path,
            log_dir: args.log_dir.clone().or(cfg.log_dir),
        })
    }
}
