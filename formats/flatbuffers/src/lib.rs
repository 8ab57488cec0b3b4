//! Zero-copy кодек на FlatBuffers.
//!
//! Encode — [`MetricsRequestBuilder`] поверх `flatbuffers::FlatBufferBuilder`.
//! Decode — [`MetricsRequestView::root`]: проверяет только root offset и
//! root vtable, поэтому стоимость почти не зависит от размера batch.
//! Поля читаются по требованию через offset-арифметику над исходным буфером.

mod builder;
mod view;

pub use builder::MetricsRequestBuilder;
pub use view::{MetricsRequestView, MetricsVector, ServerMetricsView};

use bench_api::{Codec, CodecError, DataFormat, ServerMetrics};

/// Vtable slot'ы полей из `schema/metrics.fbs`.
pub(crate) mod slot {
    use flatbuffers::VOffsetT;

    pub const SERVER_ID: VOffsetT = 4;
    pub const CPU_USAGE: VOffsetT = 6;
    pub const MEMORY_USAGE: VOffsetT = 8;
    pub const DISK_USAGE: VOffsetT = 10;
    pub const TIMESTAMP: VOffsetT = 12;

    pub const METRICS: VOffsetT = 4;
}

/// Начальный размер буфера builder'а; растёт по необходимости.
const INITIAL_CAPACITY: usize = 1024;

pub struct FlatBuffersCodec;

impl Codec for FlatBuffersCodec {
    type Decoded<'a> = MetricsRequestView<'a>;

    fn format(&self) -> DataFormat {
        DataFormat::FlatBuffers
    }

    fn encode(&self, batch: &[ServerMetrics]) -> Result<Vec<u8>, CodecError> {
        let mut builder = MetricsRequestBuilder::with_capacity(INITIAL_CAPACITY);
        for metrics in batch {
            builder.push(metrics);
        }
        Ok(builder.finish())
    }

    fn decode<'a>(&self, data: &'a [u8]) -> Result<MetricsRequestView<'a>, CodecError> {
        MetricsRequestView::root(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bench_api::IntoBatch;

    fn scenario() -> Vec<ServerMetrics> {
        (0..3)
            .map(|i| ServerMetrics::new(format!("srv{i}"), 10.5, 20.0, 30.25, "2024-01-01T00:00:00"))
            .collect()
    }

    #[test]
    fn roundtrip_scenario() {
        let batch = scenario();
        let bytes = FlatBuffersCodec.encode(&batch).unwrap();
        assert_eq!(FlatBuffersCodec.decode_batch(&bytes).unwrap(), batch);
    }

    #[test]
    fn view_reads_fields_in_place() {
        let batch = scenario();
        let bytes = FlatBuffersCodec.encode(&batch).unwrap();
        let view = FlatBuffersCodec.decode(&bytes).unwrap();
        let metrics = view.metrics().unwrap();
        assert_eq!(metrics.len(), 3);

        let second = metrics.get(1).unwrap();
        assert_eq!(second.server_id().unwrap(), "srv1");
        assert_eq!(second.disk_usage().unwrap(), 30.25);

        // &str borrows straight from the encoded buffer
        let id = second.server_id().unwrap();
        let range = bytes.as_ptr_range();
        assert!(range.contains(&id.as_ptr()));
    }

    #[test]
    fn empty_batch_is_empty_vector() {
        let bytes = FlatBuffersCodec.encode(&[]).unwrap();
        let view = FlatBuffersCodec.decode(&bytes).unwrap();
        assert!(view.metrics().unwrap().is_empty());
        assert!(view.into_batch().unwrap().is_empty());
    }

    #[test]
    fn signed_zero_keeps_its_bits() {
        let batch = vec![ServerMetrics::new("srv0", -0.0, 0.0, f64::MAX, "")];
        let bytes = FlatBuffersCodec.encode(&batch).unwrap();
        let back = FlatBuffersCodec.decode_batch(&bytes).unwrap();
        assert_eq!(back[0].cpu_usage.to_bits(), (-0.0f64).to_bits());
        assert_eq!(back[0].disk_usage, f64::MAX);
        assert_eq!(back[0].timestamp, "");
    }

    #[test]
    fn truncated_buffers_never_panic() {
        let bytes = FlatBuffersCodec.encode(&scenario()).unwrap();
        for len in 0..bytes.len() {
            let _ = FlatBuffersCodec.decode_batch(&bytes[..len]);
        }
        assert!(FlatBuffersCodec.decode(&bytes[..3]).is_err());
    }

    #[test]
    fn decode_is_lazy() {
        let bytes = FlatBuffersCodec.encode(&scenario()).unwrap();
        let view = FlatBuffersCodec.decode(&bytes).unwrap();
        let metrics = view.metrics().unwrap();
        assert!(metrics.get(3).is_err());
        // nothing is materialized until into_batch walks the vector
        assert_eq!(view.into_batch().unwrap().len(), 3);
    }
}
