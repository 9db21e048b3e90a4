use camview_imgproc::ImgprocError;

/// An error type for constructing or transforming a calibrated view.
#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    /// Error when the depth raster does not match the bitmap spatial extent.
    #[error("depth shape {found:?} does not match bitmap shape {expected:?}")]
    DepthShapeMismatch {
        /// The expected depth shape (1, H, W) derived from the bitmap.
        expected: (usize, usize, usize),
        /// The shape of the supplied depth raster.
        found: (usize, usize, usize),
    },

    /// Error when a supplied mask does not match the bitmap spatial extent.
    #[error("mask shape {found:?} does not match bitmap spatial extent {expected:?}")]
    MaskShapeMismatch {
        /// The expected mask shape (H, W) derived from the bitmap.
        expected: (usize, usize),
        /// The shape of the supplied mask.
        found: (usize, usize),
    },

    /// Error when the intrinsic matrix has no inverse.
    #[error("intrinsic matrix is singular")]
    SingularIntrinsics,

    /// Error from the raster resampling primitives.
    #[error(transparent)]
    Resample(#[from] ImgprocError),
}
