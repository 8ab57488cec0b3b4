use serde::{Deserialize, Serialize};

/// Формат сериализации, участвующий в бенчмарке.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFormat {
    /// Tagged-text: самоописывающий JSON.
    Json,
    /// Schema-binary с полным разбором в объектный граф.
    Protobuf,
    /// Schema-binary с zero-copy доступом через offsets.
    #[serde(rename = "flatbuffers")]
    FlatBuffers,
}

impl DataFormat {
    /// Фиксированный порядок замеров: JSON → Protobuf → FlatBuffers.
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::Protobuf, DataFormat::FlatBuffers];

    /// Имя файла артефакта с закодированным batch.
    pub fn artifact_file(self) -> &'static str {
        match self {
            DataFormat::Json => "metrics.json",
            DataFormat::Protobuf => "metrics.proto.bin",
            DataFormat::FlatBuffers => "metrics.flatbuf",
        }
    }

    /// Подпись для графиков отчёта.
    pub fn label(self) -> &'static str {
        match self {
            DataFormat::Json => "JSON",
            DataFormat::Protobuf => "Protobuf",
            DataFormat::FlatBuffers => "FlatBuffers",
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFormat::Json => write!(f, "json"),
            DataFormat::Protobuf => write!(f, "protobuf"),
            DataFormat::FlatBuffers => write!(f, "flatbuffers"),
        }
    }
}
