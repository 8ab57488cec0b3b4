//! Общие типы бенчмарка сериализации: модель записи, контракт кодека,
//! идентификаторы форматов и ошибки кодеков.
//!
//! Все три кодека (JSON, Protobuf, FlatBuffers) и транспортный слой
//! работают с одним каноническим типом [`ServerMetrics`].

mod codec;
mod error;
mod format;
mod record;

pub use codec::{Codec, IntoBatch};
pub use error::CodecError;
pub use format::DataFormat;
pub use record::{Batch, ServerMetrics};
