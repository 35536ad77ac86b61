use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvokitError {
    #[error("Payload parse error: {0}")]
    PayloadParse(String),

    #[error("Crossover error: {0}")]
    Crossover(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, EvokitError>;
