use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Non-zero `glGetError` code observed after a frame was drawn.
    #[error("GL error 0x{code:04X}")]
    Gl { code: u32 },

    #[error("window: {0}")]
    Window(String),
}

pub type PlayerResult<T> = Result<T, PlayerError>;
