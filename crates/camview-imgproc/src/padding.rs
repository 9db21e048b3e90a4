use ndarray::{s, Array3, ArrayView3};

use crate::error::ImgprocError;
use crate::image_size::ImageSize;

/// Pad a channel-first raster to `new_size` with a constant value.
///
/// Rows and columns are appended at the bottom/right edge only, so the source
/// content keeps its position and the pixel origin does not move.
///
/// # Arguments
///
/// * `src` - The input raster with shape (C, H, W).
/// * `new_size` - The target spatial extent; must not be smaller than the
///   source extent in either dimension.
/// * `value` - The fill value for the appended region.
///
/// # Returns
///
/// The padded raster with shape (C, Ht, Wt).
///
/// # Errors
///
/// Returns [`ImgprocError::InvalidPadSize`] when `new_size` is smaller than
/// the source extent in either dimension.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use camview_imgproc::{pad_constant, ImageSize};
///
/// let raster = Array3::<f32>::zeros((3, 2, 2));
/// let padded = pad_constant(
///     &raster.view(),
///     ImageSize {
///         width: 4,
///         height: 3,
///     },
///     1.0,
/// )
/// .unwrap();
/// assert_eq!(padded.dim(), (3, 3, 4));
/// ```
pub fn pad_constant<T: Copy>(
    src: &ArrayView3<'_, T>,
    new_size: ImageSize,
    value: T,
) -> Result<Array3<T>, ImgprocError> {
    let (channels, height, width) = src.dim();

    if new_size.height < height || new_size.width < width {
        return Err(ImgprocError::InvalidPadSize {
            current: ImageSize { width, height },
            target: new_size,
        });
    }

    let mut dst = Array3::from_elem((channels, new_size.height, new_size.width), value);
    dst.slice_mut(s![.., ..height, ..width]).assign(src);

    Ok(dst)
}
