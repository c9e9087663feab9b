//! Domain error types.

/// Top-level error type for agriprice.
#[derive(Debug, thiserror::Error)]
pub enum AgriPriceError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load {file}: {reason}")]
    DataLoad { file: String, reason: String },

    #[error("no usable {kind} records loaded")]
    NoData { kind: String },

    #[error(
        "insufficient data for {commodity}: have {observations} monthly observations, need {minimum}"
    )]
    InsufficientData {
        commodity: String,
        observations: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&AgriPriceError> for std::process::ExitCode {
    fn from(err: &AgriPriceError) -> Self {
        let code: u8 = match err {
            AgriPriceError::Io(_) => 1,
            AgriPriceError::ConfigParse { .. }
            | AgriPriceError::ConfigMissing { .. }
            | AgriPriceError::ConfigInvalid { .. } => 2,
            AgriPriceError::DataLoad { .. } | AgriPriceError::NoData { .. } => 3,
            AgriPriceError::InsufficientData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
