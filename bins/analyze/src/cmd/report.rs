use std::path::{Path, PathBuf};

use bench_api::DataFormat;
use bench_harness::ArtifactStore;
use bench_harness::timing::{DeserializeTimes, SerializeTimes, TimingFile};

use crate::chart::{Axes, Series, bar_chart, line_chart};
use crate::config::Effective;
use crate::error::AnalyzeError;

pub const SIZE_CHART: &str = "size_comparison.svg";
pub const PERFORMANCE_CHART: &str = "performance_comparison.svg";

/// Проверить артефакты прогона и отрисовать оба графика.
pub fn run(eff: &Effective) -> Result<Vec<PathBuf>, AnalyzeError> {
    tracing::info!(results = %eff.results_path.display(), "starting analysis");
    let store = ArtifactStore::open(&eff.results_path)?;

    let missing = store.missing();
    if !missing.is_empty() {
        for path in &missing {
            tracing::error!(path = %path.display(), "artifact not found");
        }
        return Err(AnalyzeError::MissingArtifacts(missing));
    }
    tracing::info!("all artifacts found");

    let labels: Vec<&str> = DataFormat::ALL.iter().map(|f| f.label()).collect();
    let sizes = DataFormat::ALL
        .iter()
        .map(|f| store.size(*f).map(|bytes| bytes as f64))
        .collect::<Result<Vec<_>, _>>()?;
    let serialize = seconds(&store.read_times::<SerializeTimes>()?);
    let deserialize = seconds(&store.read_times::<DeserializeTimes>()?);

    let size_svg = bar_chart(
        &Axes {
            title: "File Size Comparison",
            x_label: "Format",
            y_label: "Size (bytes)",
            categories: &labels,
        },
        &sizes,
    );
    let performance_svg = line_chart(
        &Axes {
            title: "Performance Comparison",
            x_label: "Format",
            y_label: "Time (seconds)",
            categories: &labels,
        },
        &[
            Series { name: "Serialization", values: &serialize },
            Series { name: "Deserialization", values: &deserialize },
        ],
    );

    std::fs::create_dir_all(&eff.output_dir)
        .map_err(|source| AnalyzeError::Chart { path: eff.output_dir.clone(), source })?;
    let written = vec![
        write_chart(&eff.output_dir.join(SIZE_CHART), &size_svg)?,
        write_chart(&eff.output_dir.join(PERFORMANCE_CHART), &performance_svg)?,
    ];
    tracing::info!(dir = %eff.output_dir.display(), "graphs generated");
    Ok(written)
}

fn seconds<T: TimingFile>(times: &T) -> Vec<f64> {
    DataFormat::ALL.iter().map(|f| times.seconds(*f)).collect()
}

fn write_chart(path: &Path, svg: &str) -> Result<PathBuf, AnalyzeError> {
    std::fs::write(path, svg).map_err(|source| AnalyzeError::Chart { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "chart written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_api::ServerMetrics;
    use bench_harness::encode_all;
    use bench_harness::measure::process_batch;

    fn complete_run(dir: &Path) {
        let store = ArtifactStore::open(dir).unwrap();
        let batch: Vec<_> = (0..10)
            .map(|i| ServerMetrics::new(format!("srv{i}"), 1.0, 2.0, 3.0, "2024-01-01T00:00:00"))
            .collect();
        store.write_times(&encode_all(&batch).unwrap().serialize_times()).unwrap();
        process_batch(&store, &batch).unwrap().unwrap();
    }

    #[test]
    fn renders_both_charts() {
        let results = tempfile::tempdir().unwrap();
        complete_run(results.path());
        let out = results.path().join("charts");

        let eff = Effective {
            results_path: results.path().to_path_buf(),
            output_dir: out.clone(),
            log_dir: None,
        };
        let written = run(&eff).unwrap();

        assert_eq!(written, vec![out.join(SIZE_CHART), out.join(PERFORMANCE_CHART)]);
        let perf = std::fs::read_to_string(out.join(PERFORMANCE_CHART)).unwrap();
        assert!(perf.contains("Serialization"));
    }

    #[test]
    fn missing_artifact_fails() {
        let results = tempfile::tempdir().unwrap();
        complete_run(results.path());
        std::fs::remove_file(results.path().join("metrics.flatbuf")).unwrap();

        let eff = Effective {
            results_path: results.path().to_path_buf(),
            output_dir: results.path().to_path_buf(),
            log_dir: None,
        };
        match run(&eff) {
            Err(AnalyzeError::MissingArtifacts(paths)) => {
                assert_eq!(paths, vec![results.path().join("metrics.flatbuf")]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(!results.path().join(SIZE_CHART).exists());
    }
}
