use std::time::Duration;

use bench_api::{Codec, DataFormat, ServerMetrics};
use codec_flatbuffers::FlatBuffersCodec;
use codec_json::JsonCodec;
use codec_protobuf::ProtobufCodec;

use crate::error::BenchError;
use crate::timing::{FormatTimes, SerializeTimes, timed};

/// Результат кодирования batch одним форматом.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub format: DataFormat,
    pub bytes: Vec<u8>,
    pub elapsed: Duration,
}

/// Все три кодирования одного batch в порядке [`DataFormat::ALL`].
#[derive(Debug, Clone)]
pub struct EncodedSet {
    entries: Vec<Encoded>,
}

impl EncodedSet {
    pub fn get(&self, format: DataFormat) -> Option<&Encoded> {
        self.entries.iter().find(|e| e.format == format)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Encoded> {
        self.entries.iter()
    }

    /// Забрать байты одного формата (например, для передачи по RPC).
    pub fn take(&mut self, format: DataFormat) -> Option<Vec<u8>> {
        self.entries
            .iter_mut()
            .find(|e| e.format == format)
            .map(|e| std::mem::take(&mut e.bytes))
    }

    pub fn times(&self) -> FormatTimes {
        let mut times = FormatTimes::default();
        for e in &self.entries {
            times.set(e.format, e.elapsed);
        }
        times
    }

    pub fn serialize_times(&self) -> SerializeTimes {
        self.times().into()
    }
}

/// Закодировать batch всеми форматами по очереди, замеряя каждый `encode`.
///
/// Замеры последовательные, в одном потоке. Первая ошибка прерывает прогон.
pub fn encode_all(batch: &[ServerMetrics]) -> Result<EncodedSet, BenchError> {
    let entries = vec![
        encode_timed(&JsonCodec, batch)?,
        encode_timed(&ProtobufCodec, batch)?,
        encode_timed(&FlatBuffersCodec, batch)?,
    ];
    Ok(EncodedSet { entries })
}

fn encode_timed<C: Codec>(codec: &C, batch: &[ServerMetrics]) -> Result<Encoded, BenchError> {
    let format = codec.format();
    let (result, elapsed) = timed(|| codec.encode(batch));
    let bytes = result.inspect_err(|e| {
        tracing::error!(stage = "encode", format = %format, error = %e, "encode failed");
    })?;

    tracing::debug!(
        format = %format,
        records = batch.len(),
        bytes = bytes.len(),
        elapsed_s = elapsed.as_secs_f64(),
        "encoded"
    );
    Ok(Encoded { format, bytes, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::Generator;

    #[test]
    fn encodes_in_fixed_order() {
        let set = encode_all(&Generator::new(Some(3)).generate(10)).unwrap();
        let order: Vec<_> = set.iter().map(|e| e.format).collect();
        assert_eq!(order, DataFormat::ALL);
        assert!(set.iter().all(|e| !e.bytes.is_empty()));
    }

    #[test]
    fn take_leaves_other_formats() {
        let mut set = encode_all(&Generator::new(Some(3)).generate(2)).unwrap();
        let proto = set.take(DataFormat::Protobuf).unwrap();
        assert!(!proto.is_empty());
        assert!(set.get(DataFormat::Protobuf).unwrap().bytes.is_empty());
        assert!(!set.get(DataFormat::Json).unwrap().bytes.is_empty());
    }

    #[test]
    fn empty_batch_still_encodes() {
        let set = encode_all(&[]).unwrap();
        assert_eq!(set.get(DataFormat::Json).unwrap().bytes, b"[]");
        assert!(set.get(DataFormat::Protobuf).unwrap().bytes.is_empty());
    }
}
