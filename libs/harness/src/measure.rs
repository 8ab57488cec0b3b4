//! Серверная половина прогона: сохранить три кодирования принятого batch,
//! замерить read + decode каждого файла, записать замеры и сверить форматы.

use std::time::{Duration, Instant};

use bench_api::{Codec, DataFormat, ServerMetrics};
use codec_flatbuffers::FlatBuffersCodec;
use codec_json::JsonCodec;
use codec_protobuf::ProtobufCodec;

use crate::artifacts::ArtifactStore;
use crate::bench::{EncodedSet, encode_all};
use crate::error::BenchError;
use crate::timing::{DeserializeTimes, FormatTimes};

/// Итог обработки одного batch.
#[derive(Debug, Clone)]
pub struct Report {
    pub records: usize,
    pub sizes: Vec<(DataFormat, usize)>,
    pub times: DeserializeTimes,
}

/// Закодировать batch всеми форматами и записать три файла.
///
/// Пустой batch не сохраняется: `Ok(None)` и warning в лог.
pub fn save_metrics(store: &ArtifactStore, batch: &[ServerMetrics]) -> Result<Option<EncodedSet>, BenchError> {
    if batch.is_empty() {
        tracing::warn!("received empty batch, nothing to save");
        return Ok(None);
    }

    let encoded = encode_all(batch)?;
    for e in encoded.iter() {
        store.write(e.format, &e.bytes)?;
    }
    tracing::info!(records = batch.len(), dir = %store.root().display(), "metrics saved");
    Ok(Some(encoded))
}

/// Замерить чтение файла + `decode` для каждого формата.
///
/// Если какого-то файла нет — ошибка в лог и `Ok(None)`, без частичных замеров.
pub fn measure_deserialize(store: &ArtifactStore) -> Result<Option<DeserializeTimes>, BenchError> {
    if let Some(format) = DataFormat::ALL.into_iter().find(|f| !store.exists(*f)) {
        tracing::error!(
            stage = "decode",
            format = %format,
            path = %store.path(format).display(),
            "artifact missing, deserialization skipped"
        );
        return Ok(None);
    }

    let mut times = FormatTimes::default();
    times.set(DataFormat::Json, time_decode(&JsonCodec, store)?);
    times.set(DataFormat::Protobuf, time_decode(&ProtobufCodec, store)?);
    times.set(DataFormat::FlatBuffers, time_decode(&FlatBuffersCodec, store)?);
    Ok(Some(times.into()))
}

fn time_decode<C: Codec>(codec: &C, store: &ArtifactStore) -> Result<Duration, BenchError> {
    let format = codec.format();
    let path = store.path(format);

    let start = Instant::now();
    let data = std::fs::read(&path).map_err(|e| BenchError::artifact(&path, e))?;
    let decoded = codec.decode(&data).inspect_err(|e| {
        tracing::error!(stage = "decode", format = %format, error = %e, "decode failed");
    })?;
    let elapsed = start.elapsed();
    std::hint::black_box(&decoded);

    tracing::debug!(format = %format, elapsed_s = elapsed.as_secs_f64(), "decoded");
    Ok(elapsed)
}

/// Сверить, что все три файла декодируются в `expected`.
///
/// Вызывается вне замеров: материализует полный batch каждого формата.
pub fn verify_equivalence(store: &ArtifactStore, expected: &[ServerMetrics]) -> Result<(), BenchError> {
    verify(&JsonCodec, store, expected)?;
    verify(&ProtobufCodec, store, expected)?;
    verify(&FlatBuffersCodec, store, expected)
}

fn verify<C: Codec>(codec: &C, store: &ArtifactStore, expected: &[ServerMetrics]) -> Result<(), BenchError> {
    let format = codec.format();
    let decoded = codec.decode_batch(&store.read(format)?)?;

    if decoded.len() != expected.len() {
        return Err(BenchError::Mismatch {
            format,
            detail: format!("{} records, expected {}", decoded.len(), expected.len()),
        });
    }
    if let Some(i) = decoded.iter().zip(expected).position(|(a, b)| a != b) {
        return Err(BenchError::Mismatch {
            format,
            detail: format!("record {i}: {:?} != {:?}", decoded[i], expected[i]),
        });
    }
    Ok(())
}

/// Полная обработка принятого batch: save → measure → write timings → verify.
pub fn process_batch(store: &ArtifactStore, batch: &[ServerMetrics]) -> Result<Option<Report>, BenchError> {
    let Some(encoded) = save_metrics(store, batch)? else {
        return Ok(None);
    };
    let Some(times) = measure_deserialize(store)? else {
        return Ok(None);
    };
    store.write_times(&times)?;

    let sizes: Vec<_> = encoded.iter().map(|e| (e.format, e.bytes.len())).collect();
    for (format, bytes) in &sizes {
        tracing::info!(format = %format, bytes, "artifact size");
    }

    verify_equivalence(store, batch)?;

    Ok(Some(Report { records: batch.len(), sizes, times }))
}
