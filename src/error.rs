use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Key format error: {0}")]
    KeyFormat(String),

    #[error("Base64 decode error: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Signature invalid: {0}")]
    SignatureInvalid(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported sign_type: {0}")]
    UnsupportedSignType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable code for telemetry, separating signature failures from
    /// transport and decoding failures.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::KeyFormat(_) => ErrorCode::KeyFormat,
            Error::Encoding(_) => ErrorCode::Encoding,
            Error::SignatureInvalid(_) => ErrorCode::SignatureInvalid,
            Error::Crypto(_) => ErrorCode::Crypto,
            Error::Transport(_) => ErrorCode::Transport,
            Error::Decode(_) => ErrorCode::Decode,
            Error::Config(_) | Error::Io(_) => ErrorCode::Config,
            Error::UnsupportedSignType(_) => ErrorCode::UnsupportedSignType,
        }
    }
}

impl From<rsa::pkcs1::Error> for Error {
    fn from(err: rsa::pkcs1::Error) -> Self {
        Error::KeyFormat(err.to_string())
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(err: rsa::pkcs8::Error) -> Self {
        Error::KeyFormat(err.to_string())
    }
}

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::KeyFormat(err.to_string())
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// Error codes for structured reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "KEY_FORMAT")]
    KeyFormat,
    #[serde(rename = "ENCODING")]
    Encoding,
    #[serde(rename = "SIGNATURE_INVALID")]
    SignatureInvalid,
    #[serde(rename = "CRYPTO")]
    Crypto,
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[serde(rename = "DECODE")]
    Decode,
    #[serde(rename = "CONFIG")]
    Config,
    #[serde(rename = "UNSUPPORTED_SIGN_TYPE")]
    UnsupportedSignType,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::KeyFormat => "KEY_FORMAT",
            ErrorCode::Encoding => "ENCODING",
            ErrorCode::SignatureInvalid => "SIGNATURE_INVALID",
            ErrorCode::Crypto => "CRYPTO",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::Decode => "DECODE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedSignType => "UNSUPPORTED_SIGN_TYPE",
        };
        write!(f, "{}", s)
    }
}
