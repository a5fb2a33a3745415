//! Image preprocessing domain — public API.
//!
//! Owns everything between the raw upload bytes and the buffer handed to
//! OCR: orientation metadata, decode + upright resize, binarization.
//! External code should only use the functions exported here.

mod binarize;
mod normalize;
mod orientation;

pub use binarize::{binarize, DEFAULT_THRESHOLD};
pub use normalize::{normalize, MAX_WIDTH};
pub use orientation::{read_orientation, DEFAULT_ORIENTATION};
