use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 Decode Error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image Decode Error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Invalid Image: {0}")]
    InvalidImage(String),

    #[error("Render Error: {0}")]
    Render(String),

    #[error("Encode Error: {0}")]
    Encode(String),

    #[error("Step {step} failed (permutation {permutation:?}): {source}")]
    Step {
        step: usize,
        permutation: Vec<usize>,
        #[source]
        source: Box<SolverError>,
    },
}

pub type SolveResult<T> = Result<T, SolverError>;
