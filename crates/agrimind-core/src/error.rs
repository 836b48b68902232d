use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgriError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Not enough data: need {required} samples, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Numeric failure: {0}")]
    NumericFailure(String),

    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Empty frame sequence")]
    EmptySequence,
}

pub type Result<T> = std::result::Result<T, AgriError>;
