#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the resampling primitives.
pub mod error;

/// Image size representation.
pub mod image_size;

/// utilities for interpolation.
pub(crate) mod interpolation;

/// constant-value padding module.
pub mod padding;

/// raster resizing module.
pub mod resize;

pub use crate::error::ImgprocError;
pub use crate::image_size::ImageSize;
pub use crate::padding::pad_constant;
pub use crate::resize::resize_bilinear;
