use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("unsupported file type: {0}")]
    InvalidFileType(String),

    #[error("file size {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("no extractor available for file type: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse {kind} file: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("translation configuration error: {0}")]
    Config(String),

    #[error("translation request failed after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("translation API error: {0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    pub fn parse(kind: &'static str, source: impl Into<anyhow::Error>) -> Self {
        ProcessError::Parse {
            kind,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
