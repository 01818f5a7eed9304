pub mod core;
#[allow(unused_imports)]
pub use core::{PixelFormat, SourceIm};

// Optional extras
// -----------------------------------------------------------------------------

#[cfg(feature = "im-io")]
pub mod io;
