// Library crate root.
//
// The binary (src/main.rs) only parses arguments and opens the window; every
// piece below is usable and testable without one.

pub mod app;
pub mod config;
pub mod error;
pub mod gui;
pub mod im;
pub mod playback;
pub mod scene;
pub mod texture;
pub mod view3d;

#[cfg(test)]
pub mod test_helpers;
