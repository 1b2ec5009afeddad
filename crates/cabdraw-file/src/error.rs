//! 导出错误定义

use thiserror::Error;

type BoxedCause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}: {source}")]
    Encoding {
        message: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Invalid export input: {0}")]
    InvalidInput(String),
}

impl ExportError {
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn encoding(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Encoding {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(source: std::io::Error) -> Self {
        Self::io("I/O failure during export", source)
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
