use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use bench_api::DataFormat;

/// Выполнить `f` и вернуть результат вместе с wall-clock длительностью.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Длительности по форматам, собираемые в ходе замера.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormatTimes {
    pub json: Duration,
    pub protobuf: Duration,
    pub flatbuffers: Duration,
}

impl FormatTimes {
    pub fn set(&mut self, format: DataFormat, elapsed: Duration) {
        match format {
            DataFormat::Json => self.json = elapsed,
            DataFormat::Protobuf => self.protobuf = elapsed,
            DataFormat::FlatBuffers => self.flatbuffers = elapsed,
        }
    }
}

/// JSON-файл с замерами, лежащий в каталоге результатов.
pub trait TimingFile: Serialize + DeserializeOwned {
    const FILE_NAME: &'static str;

    /// Секунды для формата.
    fn seconds(&self, format: DataFormat) -> f64;
}

/// `serialize_times.json` — секунды encode по форматам.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SerializeTimes {
    pub json_ser_time: f64,
    pub proto_ser_time: f64,
    pub flat_ser_time: f64,
}

/// `deserialize_times.json` — секунды read + decode по форматам.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeserializeTimes {
    pub json_deser_time: f64,
    pub proto_deser_time: f64,
    pub flat_deser_time: f64,
}

impl TimingFile for SerializeTimes {
    const FILE_NAME: &'static str = "serialize_times.json";

    fn seconds(&self, format: DataFormat) -> f64 {
        match format {
            DataFormat::Json => self.json_ser_time,
            DataFormat::Protobuf => self.proto_ser_time,
            DataFormat::FlatBuffers => self.flat_ser_time,
        }
    }
}

impl TimingFile for DeserializeTimes {
    const FILE_NAME: &'static str = "deserialize_times.json";

    fn seconds(&self, format: DataFormat) -> f64 {
        match format {
            DataFormat::Json => self.json_deser_time,
            DataFormat::Protobuf => self.proto_deser_time,
            DataFormat::FlatBuffers => self.flat_deser_time,
        }
    }
}

impl From<FormatTimes> for SerializeTimes {
    fn from(t: FormatTimes) -> Self {
        Self {
            json_ser_time: t.json.as_secs_f64(),
            proto_ser_time: t.protobuf.as_secs_f64(),
            flat_ser_time: t.flatbuffers.as_secs_f64(),
        }
    }
}

impl From<FormatTimes> for DeserializeTimes {
    fn from(t: FormatTimes) -> Self {
        Self {
            json_deser_time: t.json.as_secs_f64(),
            proto_deser_time: t.protobuf.as_secs_f64(),
            flat_deser_time: t.flatbuffers.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_times_use_fixed_keys() {
        let mut times = FormatTimes::default();
        times.set(DataFormat::Json, Duration::from_millis(1500));
        times.set(DataFormat::FlatBuffers, Duration::from_micros(250));

        let json = serde_json::to_value(SerializeTimes::from(times)).unwrap();
        assert_eq!(json["json_ser_time"], 1.5);
        assert_eq!(json["proto_ser_time"], 0.0);
        assert_eq!(json["flat_ser_time"], 0.00025);
    }

    #[test]
    fn deserialize_times_seconds_by_format() {
        let times = DeserializeTimes { json_deser_time: 3.0, proto_deser_time: 2.0, flat_deser_time: 1.0 };
        let secs: Vec<f64> = DataFormat::ALL.iter().map(|f| times.seconds(*f)).collect();
        assert_eq!(secs, [3.0, 2.0, 1.0]);
    }

    #[test]
    fn timed_measures_closure() {
        let (value, elapsed) = timed(|| {
            std::thread::sleep(Duration::from_millis(5));
            7
        });
        assert_eq!(value, 7);
        assert!(elapsed >= Duration::from_millis(5));
    }
}
