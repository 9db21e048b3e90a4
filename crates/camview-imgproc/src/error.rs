use crate::image_size::ImageSize;

/// An error type for the resampling primitives.
#[derive(thiserror::Error, Debug)]
pub enum ImgprocError {
    /// Error when a padding target is smaller than the source extent.
    #[error("padding target ({target}) is smaller than the source extent ({current})")]
    InvalidPadSize {
        /// The spatial extent of the raster being padded.
        current: ImageSize,
        /// The requested target extent.
        target: ImageSize,
    },
}
