use thiserror::Error;

#[derive(Error, Debug)]
pub enum PalmError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Incomplete hand skeleton: found {found} landmarks, expected {expected}")]
    IncompleteSkeleton { found: usize, expected: usize },

    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, PalmError>;
