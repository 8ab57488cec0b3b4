use crate::DataFormat;

/// Ошибка кодирования/декодирования.
///
/// Для корректного входа под фиксированной схемой не должна возникать;
/// вызывающий трактует её как фатальную для прогона.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{format} encode: {detail}")]
    Encode { format: DataFormat, detail: String },

    #[error("{format} decode: {detail}")]
    Decode { format: DataFormat, detail: String },
}

impl CodecError {
    pub fn encode(format: DataFormat, detail: impl std::fmt::Display) -> Self {
        Self::Encode { format, detail: detail.to_string() }
    }

    pub fn decode(format: DataFormat, detail: impl std::fmt::Display) -> Self {
        Self::Decode { format, detail: detail.to_string() }
    }

    pub fn format(&self) -> DataFormat {
        match self {
            CodecError::Encode { format, .. } | CodecError::Decode { format, .. } => *format,
        }
    }
}
