use bench_api::{Batch, Codec, CodecError, DataFormat, ServerMetrics};

/// Tagged-text кодек: массив JSON-объектов с именованными полями.
///
/// Decode — полный разбор текста в [`Batch`], ленивого доступа нет.
pub struct JsonCodec;

impl Codec for JsonCodec {
    type Decoded<'a> = Batch;

    fn format(&self) -> DataFormat {
        DataFormat::Json
    }

    fn encode(&self, batch: &[ServerMetrics]) -> Result<Vec<u8>, CodecError> {
        // serde_json writes NaN/inf as null, which would not decode back
        for (i, m) in batch.iter().enumerate() {
            for (name, value) in [
                ("cpu_usage", m.cpu_usage),
                ("memory_usage", m.memory_usage),
                ("disk_usage", m.disk_usage),
            ] {
                if !value.is_finite() {
                    return Err(CodecError::encode(
                        DataFormat::Json,
                        format!("record {i} ({}): {name} is {value}", m.server_id),
                    ));
                }
            }
        }
        serde_json::to_vec(batch).map_err(|e| CodecError::encode(DataFormat::Json, e))
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Result<Batch, CodecError> {
        serde_json::from_slice(data).map_err(|e| CodecError::decode(DataFormat::Json, e))
    }
}
