/// Channel layout of a `SourceIm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Rgb8,
    /// Camera frames commonly arrive in this order.
    Bgr8,
    Rgba8,
    Bgra8,
}

impl PixelFormat {
    pub const fn n_ch(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb8 | PixelFormat::Bgr8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
        }
    }

    /// Reads one pixel as RGB. `px` must hold at least `n_ch()` bytes.
    #[inline(always)]
    pub fn rgb_of(self, px: &[u8]) -> [u8; 3] {
        match self {
            PixelFormat::Gray8 => [px[0], px[0], px[0]],
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => [px[0], px[1], px[2]],
            PixelFormat::Bgr8 | PixelFormat::Bgra8 => [px[2], px[1], px[0]],
        }
    }
}

/// Image handed to the viewer for display. Any size, including 0x0.
#[derive(Debug, Clone)]
pub struct SourceIm {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in bytes (>= w * n_ch)
    pub format: PixelFormat,
    pub arr: Vec<u8>,
}

// Constructors
// -----------------------------------------------------------------------------
impl SourceIm {
    pub fn new(w: usize, h: usize, format: PixelFormat) -> Self {
        let s = w * format.n_ch();
        let arr = vec![0u8; s * h];
        Self { w, h, s, format, arr }
    }

    /// A 0x0 image. The viewer treats it as "nothing to show".
    pub fn empty() -> Self {
        Self::new(0, 0, PixelFormat::Bgr8)
    }

    /// Wraps tightly packed rows. Returns `None` if `arr` has the wrong length.
    pub fn from_raw(w: usize, h: usize, format: PixelFormat, arr: Vec<u8>) -> Option<Self> {
        let s = w * format.n_ch();
        if arr.len() != s * h {
            return None;
        }
        Some(Self { w, h, s, format, arr })
    }
}

impl Default for SourceIm {
    fn default() -> Self {
        Self::empty()
    }
}

impl SourceIm {
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &u8 {
        unsafe { self.arr.get_unchecked(y * self.s + x * self.format.n_ch() + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut u8 {
        let n_ch = self.format.n_ch();
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * n_ch + ch) }
    }

    /// Copies into a packed RGB buffer, reordering channels as needed.
    pub fn to_rgb8(&self) -> image::RgbImage {
        let n_ch = self.format.n_ch();
        let mut out = image::RgbImage::new(self.w as u32, self.h as u32);
        for y in 0..self.h {
            let row = &self.arr[y * self.s..y * self.s + self.w * n_ch];
            for (x, px) in row.chunks_exact(n_ch).enumerate() {
                out.put_pixel(x as u32, y as u32, image::Rgb(self.format.rgb_of(px)));
            }
        }
        out
    }
}
