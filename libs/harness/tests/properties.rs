//! Property-based tests for the three codecs and their cross-format agreement.

use proptest::prelude::*;

use bench_api::{Codec, ServerMetrics};
use bench_harness::{Generator, encode_all};
use codec_flatbuffers::FlatBuffersCodec;
use codec_json::JsonCodec;
use codec_protobuf::ProtobufCodec;

/// Any finite double; NaN never compares equal and inf has no JSON form.
fn arb_gauge() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |v| v.is_finite())
}

fn arb_metrics() -> impl Strategy<Value = ServerMetrics> {
    (".*", arb_gauge(), arb_gauge(), arb_gauge(), ".*")
        .prop_map(|(id, cpu, mem, disk, ts)| ServerMetrics::new(id, cpu, mem, disk, ts))
}

fn arb_batch() -> impl Strategy<Value = Vec<ServerMetrics>> {
    prop::collection::vec(arb_metrics(), 0..20)
}

fn roundtrip<C: Codec>(codec: &C, batch: &[ServerMetrics]) -> Vec<ServerMetrics> {
    let bytes = codec.encode(batch).expect("encode");
    codec.decode_batch(&bytes).expect("decode")
}

proptest! {
    #[test]
    fn json_roundtrip(batch in arb_batch()) {
        prop_assert_eq!(roundtrip(&JsonCodec, &batch), batch);
    }

    #[test]
    fn protobuf_roundtrip(batch in arb_batch()) {
        prop_assert_eq!(roundtrip(&ProtobufCodec, &batch), batch);
    }

    #[test]
    fn flatbuffers_roundtrip(batch in arb_batch()) {
        prop_assert_eq!(roundtrip(&FlatBuffersCodec, &batch), batch);
    }

    #[test]
    fn formats_agree(batch in arb_batch()) {
        let json = roundtrip(&JsonCodec, &batch);
        let proto = roundtrip(&ProtobufCodec, &batch);
        let flat = roundtrip(&FlatBuffersCodec, &batch);
        prop_assert_eq!(&json, &proto);
        prop_assert_eq!(&proto, &flat);
    }

    #[test]
    fn size_grows_with_prefix(batch in prop::collection::vec(arb_metrics(), 1..15)) {
        for k in 1..=batch.len() {
            let shorter = encode_all(&batch[..k - 1]).expect("encode");
            let longer = encode_all(&batch[..k]).expect("encode");
            for (a, b) in shorter.iter().zip(longer.iter()) {
                prop_assert!(a.bytes.len() <= b.bytes.len(), "{} shrank at k={}", a.format, k);
            }
        }
    }

    #[test]
    fn text_not_smaller_than_best_binary(seed in any::<u64>(), count in 1usize..200) {
        let batch = Generator::new(Some(seed)).generate(count);
        let set = encode_all(&batch).expect("encode");
        let size = |f| set.get(f).map(|e| e.bytes.len()).unwrap_or_default();

        let json = size(bench_api::DataFormat::Json);
        let best_binary = size(bench_api::DataFormat::Protobuf).min(size(bench_api::DataFormat::FlatBuffers));
        prop_assert!(json >= best_binary, "json {} < binary {}", json, best_binary);
    }
}

#[test]
fn generated_empty_batch_roundtrips_everywhere() {
    let batch = Generator::new(None).generate(0);
    assert!(roundtrip(&JsonCodec, &batch).is_empty());
    assert!(roundtrip(&ProtobufCodec, &batch).is_empty());
    assert!(roundtrip(&FlatBuffersCodec, &batch).is_empty());
}

#[test]
fn scenario_roundtrips_in_order() {
    let batch: Vec<_> = (0..3)
        .map(|i| ServerMetrics::new(format!("srv{i}"), 10.5, 20.0, 30.25, "2024-01-01T00:00:00"))
        .collect();
    for decoded in [
        roundtrip(&JsonCodec, &batch),
        roundtrip(&ProtobufCodec, &batch),
        roundtrip(&FlatBuffersCodec, &batch),
    ] {
        assert_eq!(decoded, batch);
    }
}
