use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomError {
    #[error("Malformed input payload: {0}")]
    MalformedInput(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Image processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, RoomError>;
