//! Ядро бенчмарка: генерация batch, валидация, замеры encode/decode,
//! запись и чтение артефактов, общий слой конфигурации и логирования.
//!
//! Клиент выполняет шаги generate → validate → [`bench::encode_all`] →
//! передача; сервер для каждого принятого batch — [`measure::process_batch`].

pub mod artifacts;
pub mod bench;
pub mod config;
pub mod error;
pub mod generate;
pub mod measure;
pub mod telemetry;
pub mod timing;
pub mod validate;

pub use artifacts::ArtifactStore;
pub use bench::{Encoded, EncodedSet, encode_all};
pub use error::{BenchError, ErrorKind};
pub use generate::Generator;
pub use timing::{DeserializeTimes, FormatTimes, SerializeTimes};
pub use validate::validate_batch;
