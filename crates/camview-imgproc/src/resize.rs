use ndarray::{Array3, ArrayView3, Zip};

use crate::image_size::ImageSize;
use crate::interpolation::bilinear_sample;

/// Resize a channel-first raster to a new size with bilinear interpolation.
///
/// Sample positions follow the half-pixel convention ("align corners" off):
/// the source coordinate for output column `x` is `(x + 0.5) * W / Wt - 0.5`,
/// clamped at the raster borders. `NaN` source values propagate into every
/// output pixel whose interpolation stencil touches them.
///
/// # Arguments
///
/// * `src` - The input raster with shape (C, H, W).
/// * `new_size` - The target spatial extent.
///
/// # Returns
///
/// The resized raster with shape (C, Ht, Wt).
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use camview_imgproc::{resize_bilinear, ImageSize};
///
/// let raster = Array3::<f32>::zeros((3, 5, 4));
/// let resized = resize_bilinear(
///     &raster.view(),
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
/// );
/// assert_eq!(resized.dim(), (3, 3, 2));
/// ```
pub fn resize_bilinear(src: &ArrayView3<'_, f32>, new_size: ImageSize) -> Array3<f32> {
    let (channels, src_h, src_w) = src.dim();
    let mut dst = Array3::<f32>::zeros((channels, new_size.height, new_size.width));

    let v_scale = src_h as f32 / new_size.height as f32;
    let u_scale = src_w as f32 / new_size.width as f32;

    // iterate over the output raster and interpolate the sample values
    Zip::indexed(&mut dst).par_for_each(|(c, y, x), out| {
        let v = ((y as f32 + 0.5) * v_scale - 0.5).max(0.0);
        let u = ((x as f32 + 0.5) * u_scale - 0.5).max(0.0);
        *out = bilinear_sample(src, c, u, v);
    });

    dst
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::Array3;

    use crate::image_size::ImageSize;

    #[test]
    fn resize_constant_field() {
        let src = Array3::from_elem((3, 5, 4), 7.0f32);
        let dst = super::resize_bilinear(
            &src.view(),
            ImageSize {
                width: 2,
                height: 3,
            },
        );
        assert_eq!(dst.dim(), (3, 3, 2));
        assert!(dst.iter().all(|&v| v == 7.0));
    }

    #[test]
    fn resize_upscale_known_values() {
        let src = Array3::from_shape_vec((1, 2, 2), vec![0.0f32, 1.0, 2.0, 3.0]).unwrap();
        let dst = super::resize_bilinear(
            &src.view(),
            ImageSize {
                width: 4,
                height: 4,
            },
        );

        // corner samples clamp to the border pixels
        assert_relative_eq!(dst[[0, 0, 0]], 0.0);
        assert_relative_eq!(dst[[0, 3, 3]], 3.0);
        // interior sample at source position (0.25, 0.25)
        assert_relative_eq!(dst[[0, 1, 1]], 0.75);
    }

    #[test]
    fn resize_propagates_nan() {
        let src = Array3::from_shape_vec((1, 2, 2), vec![0.0f32, f32::NAN, 2.0, 3.0]).unwrap();
        let dst = super::resize_bilinear(
            &src.view(),
            ImageSize {
                width: 1,
                height: 1,
            },
        );
        assert!(dst[[0, 0, 0]].is_nan());
    }
}
