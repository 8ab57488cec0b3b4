use std::fs;
use std::path::{Path, PathBuf};

use bench_api::DataFormat;

use crate::error::BenchError;
use crate::timing::{DeserializeTimes, SerializeTimes, TimingFile};

/// Каталог результатов: три закодированных batch и два файла замеров.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Открыть каталог, создав его при необходимости.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, BenchError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| BenchError::artifact(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, format: DataFormat) -> PathBuf {
        self.root.join(format.artifact_file())
    }

    pub fn times_path<T: TimingFile>(&self) -> PathBuf {
        self.root.join(T::FILE_NAME)
    }

    /// Все пять артефактов прогона в порядке отчёта.
    pub fn all_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = DataFormat::ALL.iter().map(|f| self.path(*f)).collect();
        paths.push(self.times_path::<SerializeTimes>());
        paths.push(self.times_path::<DeserializeTimes>());
        paths
    }

    pub fn missing(&self) -> Vec<PathBuf> {
        self.all_paths().into_iter().filter(|p| !p.exists()).collect()
    }

    pub fn exists(&self, format: DataFormat) -> bool {
        self.path(format).exists()
    }

    pub fn write(&self, format: DataFormat, bytes: &[u8]) -> Result<PathBuf, BenchError> {
        let path = self.path(format);
        write_file(&path, bytes)?;
        tracing::debug!(format = %format, path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(path)
    }

    pub fn read(&self, format: DataFormat) -> Result<Vec<u8>, BenchError> {
        let path = self.path(format);
        fs::read(&path).map_err(|e| BenchError::artifact(path, e))
    }

    pub fn size(&self, format: DataFormat) -> Result<u64, BenchError> {
        let path = self.path(format);
        fs::metadata(&path)
            .map(|m| m.len())
            .map_err(|e| BenchError::artifact(path, e))
    }

    pub fn write_times<T: TimingFile>(&self, times: &T) -> Result<PathBuf, BenchError> {
        let path = self.times_path::<T>();
        let json = serde_json::to_vec_pretty(times)
            .map_err(|source| BenchError::Timing { path: path.clone(), source })?;
        write_file(&path, &json)?;
        tracing::info!(path = %path.display(), "timings saved");
        Ok(path)
    }

    pub fn read_times<T: TimingFile>(&self) -> Result<T, BenchError> {
        let path = self.times_path::<T>();
        let data = fs::read(&path).map_err(|e| BenchError::artifact(&path, e))?;
        serde_json::from_slice(&data).map_err(|source| BenchError::Timing { path, source })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), BenchError> {
    fs::write(path, bytes).map_err(|e| {
        tracing::error!(stage = "persist", path = %path.display(), error = %e, "artifact write failed");
        BenchError::artifact(path, e)
    })
}
