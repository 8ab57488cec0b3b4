use prost::Message;

use bench_api::{Codec, CodecError, DataFormat, ServerMetrics};
use metrics_proto::MetricsRequest;

/// Schema-binary кодек поверх фиксированной схемы `metrics.proto`.
///
/// Decode разбирает весь поток и строит по одному владеющему
/// `metrics_proto::ServerMetrics` на запись — это и есть замеряемая
/// стоимость "parse step".
pub struct ProtobufCodec;

impl Codec for ProtobufCodec {
    type Decoded<'a> = MetricsRequest;

    fn format(&self) -> DataFormat {
        DataFormat::Protobuf
    }

    fn encode(&self, batch: &[ServerMetrics]) -> Result<Vec<u8>, CodecError> {
        Ok(MetricsRequest::from_batch(batch).encode_to_vec())
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Result<MetricsRequest, CodecError> {
        MetricsRequest::decode(data).map_err(|e| CodecError::decode(DataFormat::Protobuf, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_scenario() {
        let batch: Vec<_> = (0..3)
            .map(|i| ServerMetrics::new(format!("srv{i}"), 10.5, 20.0, 30.25, "2024-01-01T00:00:00"))
            .collect();
        let bytes = ProtobufCodec.encode(&batch).unwrap();
        let decoded = ProtobufCodec.decode(&bytes).unwrap();
        assert_eq!(decoded.metrics.len(), 3);
        assert_eq!(decoded.metrics[2].server_id, "srv2");
        assert_eq!(ProtobufCodec.decode_batch(&bytes).unwrap(), batch);
    }

    #[test]
    fn empty_batch_encodes_to_empty_message() {
        let bytes = ProtobufCodec.encode(&[]).unwrap();
        assert!(bytes.is_empty());
        assert!(ProtobufCodec.decode_batch(&bytes).unwrap().is_empty());
    }

    #[test]
    fn truncated_input_is_decode_error() {
        let batch = vec![ServerMetrics::new("srv0", 1.0, 2.0, 3.0, "2024-01-01T00:00:00")];
        let bytes = ProtobufCodec.encode(&batch).unwrap();
        let err = ProtobufCodec.decode(&bytes[..bytes.len() - 3]).unwrap_err();
        assert_eq!(err.format(), DataFormat::Protobuf);
    }

    #[test]
    fn negative_zero_decodes_as_default() {
        // proto3 omits a double equal to 0.0, sign included
        let batch = vec![ServerMetrics::new("srv0", -0.0, 1.0, 2.0, "t")];
        let bytes = ProtobufCodec.encode(&batch).unwrap();
        let back = ProtobufCodec.decode_batch(&bytes).unwrap();
        assert_eq!(back, batch);
        assert_eq!(back[0].cpu_usage.to_bits(), 0.0f64.to_bits());
    }
}
