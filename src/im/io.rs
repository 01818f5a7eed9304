use super::core::{PixelFormat, SourceIm};
use crate::error::{PlayerError, PlayerResult};
use std::path::Path;

impl SourceIm {
    /// Decodes an image file into an RGB8 source.
    pub fn load<P: AsRef<Path>>(path: P) -> PlayerResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| PlayerError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgb8();
        let w = img.width() as usize;
        let h = img.height() as usize;
        Ok(Self {
            w,
            h,
            s: w * 3,
            format: PixelFormat::Rgb8,
            arr: img.into_raw(),
        })
    }
}

// Tests
// -----------------------------------------------------------------------------
