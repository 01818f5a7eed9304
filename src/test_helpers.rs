use crate::im::{PixelFormat, SourceIm};
use crate::texture::TextureUploader;
use std::cell::{Cell, RefCell};

/// Records uploads instead of touching a GPU. Handles are creation indices.
#[derive(Default)]
pub struct RecordingUploader {
    created: Cell<usize>,
    uploads: RefCell<Vec<(usize, u32, u32)>>,
}

impl RecordingUploader {
    /// `(handle, w, h)` for every create and update, in order.
    pub fn uploads(&self) -> Vec<(usize, u32, u32)> {
        self.uploads.borrow().clone()
    }

    pub fn created(&self) -> usize {
        self.created.get()
    }
}

impl TextureUploader for RecordingUploader {
    type Handle = usize;

    fn create(&self, _name: &str, rgb: &image::RgbImage) -> usize {
        let handle = self.created.get();
        self.created.set(handle + 1);
        self.uploads.borrow_mut().push((handle, rgb.width(), rgb.height()));
        handle
    }

    fn update(&self, handle: &mut usize, rgb: &image::RgbImage) {
        self.uploads.borrow_mut().push((*handle, rgb.width(), rgb.height()));
    }
}

/// `w` x `h` image whose channels ramp with x, y and x + y.
pub fn gradient_im(w: usize, h: usize, format: PixelFormat) -> SourceIm {
    let mut im = SourceIm::new(w, h, format);
    let n_ch = format.n_ch();
    for y in 0..h {
        for x in 0..w {
            let v = [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255];
            for ch in 0..n_ch {
                unsafe {
                    *im.get_unchecked_mut(x, y, ch) = v[ch];
                }
            }
        }
    }
    im
}
