#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the view module.
pub mod error;

/// Calibrated camera view and its geometric transforms.
pub mod view;

pub use crate::error::ViewError;
pub use crate::view::{CalibratedView, Precision};

pub use camview_imgproc::ImageSize;
