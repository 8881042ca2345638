use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowMapError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Markup decoding failed: {0}")]
    Markup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Geocoding error: {message}")]
    Geocode { message: String },
}

impl From<xmlparser::Error> for ShowMapError {
    fn from(e: xmlparser::Error) -> Self {
        ShowMapError::Markup(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShowMapError>;
