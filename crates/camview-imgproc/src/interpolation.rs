use ndarray::ArrayView3;

/// Kernel for bilinear interpolation on a channel-first raster.
///
/// # Arguments
///
/// * `src` - The input raster with shape (C, H, W).
/// * `c` - The channel to sample.
/// * `u` - The x coordinate of the sample position, in source pixel units.
/// * `v` - The y coordinate of the sample position, in source pixel units.
///
/// # Returns
///
/// The interpolated value. `NaN` source samples propagate into the result.
pub(crate) fn bilinear_sample(src: &ArrayView3<'_, f32>, c: usize, u: f32, v: f32) -> f32 {
    let (_, rows, cols) = src.dim();

    let iu0 = (u.trunc() as usize).min(cols - 1);
    let iv0 = (v.trunc() as usize).min(rows - 1);
    let iu1 = (iu0 + 1).min(cols - 1);
    let iv1 = (iv0 + 1).min(rows - 1);

    let frac_u = u - iu0 as f32;
    let frac_v = v - iv0 as f32;

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    src[[c, iv0, iu0]] * w00
        + src[[c, iv0, iu1]] * w01
        + src[[c, iv1, iu0]] * w10
        + src[[c, iv1, iu1]] * w11
}
