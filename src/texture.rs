// GPU texture for the feature tracker panel.
//
// Source images may have any size. They are resampled to power-of-two
// dimensions (mipmapped 2D textures want those) capped at `MAX_TEXTURE_DIM`,
// while the original size is kept separately so the panel can be drawn at the
// source aspect ratio.

use crate::im::SourceIm;
use eframe::egui;
use image::imageops::FilterType;

pub const MAX_TEXTURE_DIM: u32 = 2048;

/// Keeps only the highest set bit of `x` (largest power of two <= `x`).
/// `msb(0) == 0`.
#[inline]
pub fn msb(mut x: u32) -> u32 {
    x |= x >> 1;
    x |= x >> 2;
    x |= x >> 4;
    x |= x >> 8;
    x |= x >> 16;
    x & !(x >> 1)
}

/// Texture dimension used for a source dimension of `dim` pixels.
#[inline]
pub fn capped_pow2(dim: u32) -> u32 {
    msb(dim).min(MAX_TEXTURE_DIM)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureSize {
    pub w: u32,
    pub h: u32,
}

impl TextureSize {
    pub fn for_image(w: usize, h: usize) -> Self {
        let clamp = |d: usize| capped_pow2(d.min(u32::MAX as usize) as u32);
        Self {
            w: clamp(w),
            h: clamp(h),
        }
    }
}

/// Resamples `src` to its texture size and converts it to RGB.
/// Returns `None` for empty images.
pub fn prepare_rgb(src: &SourceIm) -> Option<image::RgbImage> {
    if src.is_empty() {
        return None;
    }
    let size = TextureSize::for_image(src.w, src.h);
    let rgb = src.to_rgb8();
    if rgb.width() == size.w && rgb.height() == size.h {
        return Some(rgb);
    }
    Some(image::imageops::resize(&rgb, size.w, size.h, FilterType::Triangle))
}

/// Where prepared pixels go. The egui context in the app, a recorder in tests.
pub trait TextureUploader {
    type Handle;

    fn create(&self, name: &str, rgb: &image::RgbImage) -> Self::Handle;
    fn update(&self, handle: &mut Self::Handle, rgb: &image::RgbImage);
}

fn texture_options() -> egui::TextureOptions {
    egui::TextureOptions {
        magnification: egui::TextureFilter::Linear,
        minification: egui::TextureFilter::Linear,
        wrap_mode: egui::TextureWrapMode::ClampToEdge,
        mipmap_mode: Some(egui::TextureFilter::Linear),
    }
}

fn color_image(rgb: &image::RgbImage) -> egui::ColorImage {
    egui::ColorImage::from_rgb([rgb.width() as usize, rgb.height() as usize], rgb.as_raw())
}

impl TextureUploader for egui::Context {
    type Handle = egui::TextureHandle;

    fn create(&self, name: &str, rgb: &image::RgbImage) -> egui::TextureHandle {
        self.load_texture(name, color_image(rgb), texture_options())
    }

    fn update(&self, handle: &mut egui::TextureHandle, rgb: &image::RgbImage) {
        handle.set(color_image(rgb), texture_options());
    }
}

/// A source image bound to a GPU texture.
pub struct ImageTexture<H> {
    name: String,
    handle: Option<H>,
    /// Power-of-two size of the uploaded pixels.
    pub texture_size: TextureSize,
    /// Size of the last source image, `[w, h]`.
    pub size: [usize; 2],
}

impl<H> ImageTexture<H> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            handle: None,
            texture_size: TextureSize::default(),
            size: [0, 0],
        }
    }

    pub fn load<U>(uploader: &U, name: &str, image: &SourceIm) -> Self
    where
        U: TextureUploader<Handle = H>,
    {
        let mut tex = Self::new(name);
        tex.update_image(uploader, image);
        tex
    }

    pub fn is_empty(&self) -> bool {
        self.size[0] == 0 || self.size[1] == 0
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Replaces the texture contents with `image`. Runs every frame; there is no
    /// change detection.
    pub fn update_image<U>(&mut self, uploader: &U, image: &SourceIm)
    where
        U: TextureUploader<Handle = H>,
    {
        let new_size = [image.w, image.h];
        if new_size != self.size {
            log::debug!("{}: source size {}x{}", self.name, image.w, image.h);
        }
        self.size = new_size;

        let Some(rgb) = prepare_rgb(image) else {
            return;
        };
        self.texture_size = TextureSize {
            w: rgb.width(),
            h: rgb.height(),
        };

        match &mut self.handle {
            Some(handle) => uploader.update(handle, &rgb),
            None => self.handle = Some(uploader.create(&self.name, &rgb)),
        }
    }

    /// Releases the GPU handle.
    pub fn unload(&mut self) {
        self.handle = None;
    }

    /// Height at which to draw the image when it is `display_w` wide.
    pub fn display_h(&self, display_w: f32) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (display_w / self.size[0] as f32) * self.size[1] as f32
    }
}
