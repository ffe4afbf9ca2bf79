use thiserror::Error;

/// Errors raised while sending from the native side to the web UI.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("script of {len} bytes exceeds the maximum JavaScript string length of {max}")]
    ScriptTooLong { len: usize, max: usize },

    #[error("value {0} is not finite and cannot be sent to the UI")]
    NonFiniteValue(f64),

    #[error("no parameter with index {0}")]
    UnknownParam(usize),

    #[error("web view session is already open or opening")]
    AlreadyOpen,

    #[error("failed to serialize JSON message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons an inbound message from the web UI was not dispatched.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("message has no \"msg\" tag")]
    MissingTag,

    #[error("unknown message tag \"{0}\"")]
    UnknownTag(String),

    #[error("invalid fields for \"{tag}\": {source}")]
    InvalidShape {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParamError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("parameter \"{name}\" has an empty or inverted range ({min}..{max})")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("parameter \"{name}\" has default {default} outside its range")]
    DefaultOutOfRange { name: String, default: f64 },

    #[error("parameter \"{name}\" has power curve exponent {exponent}; it must be finite and positive")]
    InvalidShape { name: String, exponent: f64 },
}
