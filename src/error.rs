use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read input file {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write SARIF output file {path}: {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported SARIF version: {requested} (supported: {supported})")]
    UnsupportedVersion { requested: String, supported: String },

    #[error("failed to serialize SARIF report: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
