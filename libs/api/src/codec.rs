use crate::{Batch, CodecError, DataFormat, ServerMetrics};

/// Кодек одного формата: симметричная пара encode/decode.
///
/// Сигнатуры одинаковы для всех форматов, чтобы замеры были сопоставимы.
/// `decode` возвращает *нативную* декодированную форму формата — для JSON
/// это готовый [`Batch`], для Protobuf материализованный граф сообщений,
/// для FlatBuffers view поверх исходного буфера. Канонический batch из неё
/// получается через [`IntoBatch`].
pub trait Codec {
    type Decoded<'a>: IntoBatch;

    fn format(&self) -> DataFormat;

    /// Детерминированная сериализация без побочных эффектов.
    fn encode(&self, batch: &[ServerMetrics]) -> Result<Vec<u8>, CodecError>;

    fn decode<'a>(&self, data: &'a [u8]) -> Result<Self::Decoded<'a>, CodecError>;

    /// `decode` + материализация в канонический batch.
    fn decode_batch(&self, data: &[u8]) -> Result<Batch, CodecError> {
        self.decode(data)?.into_batch()
    }
}

/// Материализация декодированной формы в канонический [`Batch`].
pub trait IntoBatch {
    fn into_batch(self) -> Result<Batch, CodecError>;
}

impl IntoBatch for Batch {
    fn into_batch(self) -> Result<Batch, CodecError> {
        Ok(self)
    }
}
