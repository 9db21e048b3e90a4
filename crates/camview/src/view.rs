use nalgebra::{DVector, Matrix2xX, Matrix3, Matrix3xX, Vector3};
use ndarray::{Array2, Array3, ArrayView3, Axis};

use camview_imgproc::{pad_constant, resize_bilinear, ImageSize};

use crate::error::ViewError;

/// Numeric precision target for [`CalibratedView::convert_precision`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// Single precision; calibration values are rounded through f32.
    F32,
    /// Double precision; the native storage of the calibration fields.
    F64,
}

/// The fields walked by the in-place precision conversion. The bitmap is
/// deliberately not part of the set.
#[derive(Clone, Copy)]
enum ViewField {
    K,
    R,
    T,
    Depth,
    Mask,
}

const CONVERTED_FIELDS: [ViewField; 5] = [
    ViewField::K,
    ViewField::R,
    ViewField::T,
    ViewField::Depth,
    ViewField::Mask,
];

/// A calibrated camera view: a pinhole model together with aligned color,
/// depth, and validity rasters.
///
/// The camera follows the standard world-to-camera convention
/// `x_cam = R * x_world + T`, with `K` mapping normalized camera coordinates
/// to pixels. The three rasters share the same spatial extent at all times;
/// [`CalibratedView::new`] enforces it and every transform preserves it.
///
/// All transforms return a new view. The single exception is
/// [`CalibratedView::convert_precision`], which mutates the receiver in place
/// and therefore requires exclusive access.
#[derive(Debug, Clone)]
pub struct CalibratedView {
    /// 3x3 intrinsic matrix (pixel from normalized camera coordinates).
    pub k: Matrix3<f64>,
    /// World-to-camera rotation; expected orthonormal.
    pub r: Matrix3<f64>,
    /// World-to-camera translation.
    pub t: Vector3<f64>,
    /// Color raster, channel-first with shape (C, H, W).
    pub bitmap: Array3<f32>,
    /// Depth raster with shape (1, H, W); `NaN` marks unknown depth.
    pub depth: Array3<f32>,
    /// Per-pixel validity with shape (H, W); `true` marks usable content.
    pub mask: Array2<bool>,
}

impl CalibratedView {
    /// Create a new calibrated view from camera parameters and rasters.
    ///
    /// # Arguments
    ///
    /// * `k` - The 3x3 intrinsic matrix.
    /// * `r` - The world-to-camera rotation.
    /// * `t` - The world-to-camera translation.
    /// * `bitmap` - The color raster with shape (C, H, W).
    /// * `depth` - The depth raster with shape (1, H, W).
    /// * `mask` - Optional validity mask with shape (H, W); all pixels are
    ///   treated as valid when omitted.
    ///
    /// # Errors
    ///
    /// Fails when `depth` is not a single-channel raster matching the bitmap
    /// spatial extent, or when a supplied `mask` extent mismatches the bitmap.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::{Matrix3, Vector3};
    /// use ndarray::Array3;
    /// use camview::CalibratedView;
    ///
    /// let view = CalibratedView::new(
    ///     Matrix3::identity(),
    ///     Matrix3::identity(),
    ///     Vector3::zeros(),
    ///     Array3::zeros((3, 4, 5)),
    ///     Array3::zeros((1, 4, 5)),
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(view.pixel_count(), 20);
    /// assert!(view.mask.iter().all(|&m| m));
    /// ```
    pub fn new(
        k: Matrix3<f64>,
        r: Matrix3<f64>,
        t: Vector3<f64>,
        bitmap: Array3<f32>,
        depth: Array3<f32>,
        mask: Option<Array2<bool>>,
    ) -> Result<Self, ViewError> {
        let (_, height, width) = bitmap.dim();

        if depth.dim() != (1, height, width) {
            return Err(ViewError::DepthShapeMismatch {
                expected: (1, height, width),
                found: depth.dim(),
            });
        }

        let mask = match mask {
            Some(mask) => {
                if mask.dim() != (height, width) {
                    return Err(ViewError::MaskShapeMismatch {
                        expected: (height, width),
                        found: mask.dim(),
                    });
                }
                mask
            }
            None => Array2::from_elem((height, width), true),
        };

        Ok(Self {
            k,
            r,
            t,
            bitmap,
            depth,
            mask,
        })
    }

    /// The inverse of the intrinsic matrix.
    ///
    /// # Errors
    ///
    /// Fails with [`ViewError::SingularIntrinsics`] when `K` has no inverse.
    pub fn k_inverse(&self) -> Result<Matrix3<f64>, ViewError> {
        self.k.try_inverse().ok_or(ViewError::SingularIntrinsics)
    }

    /// The bitmap reinterpreted in height-width-channel layout.
    ///
    /// This is a zero-copy permuted view of the underlying storage.
    pub fn color_hwc(&self) -> ArrayView3<'_, f32> {
        self.bitmap.view().permuted_axes([1, 2, 0])
    }

    /// The spatial extent of the view.
    pub fn spatial_shape(&self) -> ImageSize {
        let (_, height, width) = self.bitmap.dim();
        ImageSize { width, height }
    }

    /// The height of the view in pixels.
    pub fn height(&self) -> usize {
        self.bitmap.dim().1
    }

    /// The width of the view in pixels.
    pub fn width(&self) -> usize {
        self.bitmap.dim().2
    }

    /// The number of pixels in the view.
    pub fn pixel_count(&self) -> usize {
        self.height() * self.width()
    }

    /// Convert the calibration and depth fields to a numeric precision,
    /// in place.
    ///
    /// The conversion walks the fixed field set `K`, `R`, `T`, `depth`,
    /// `mask` and leaves the bitmap untouched. Converting to [`Precision::F32`]
    /// rounds the f64 calibration values through f32; the depth raster is f32
    /// storage already and the mask is boolean, so both pass through.
    /// Converting to [`Precision::F64`] is the identity. The operation is
    /// idempotent.
    ///
    /// This is the one mutating operation on the view; it must not run
    /// concurrently with reads of the same instance, which the borrow on
    /// `&mut self` enforces.
    pub fn convert_precision(&mut self, target: Precision) -> &mut Self {
        for field in CONVERTED_FIELDS {
            match (field, target) {
                (ViewField::K, Precision::F32) => self.k.apply(|x| *x = *x as f32 as f64),
                (ViewField::R, Precision::F32) => self.r.apply(|x| *x = *x as f32 as f64),
                (ViewField::T, Precision::F32) => self.t.apply(|x| *x = *x as f32 as f64),
                // depth storage is f32; both targets leave the values unchanged
                (ViewField::Depth, _) => {}
                // the mask is boolean and carries no numeric precision
                (ViewField::Mask, _) => {}
                (_, Precision::F64) => {}
            }
        }
        self
    }

    /// Resize the view to fit within `target` while preserving aspect ratio.
    ///
    /// The limiting dimension lands exactly on the target; the other one is
    /// scaled by the same factor and ends up at most the target. The rasters
    /// are resampled with bilinear, half-pixel interpolation; the mask is
    /// resampled as a 0/1 field and reinterpreted as boolean. `R` and `T`
    /// carry over unchanged.
    ///
    /// The intrinsic update composes `[[f, 0, f], [0, f, f], [0, 0, 1]]` with
    /// `K`: both focal rows scale by `f` and both principal-point terms shift
    /// by the same `f`, matching the calibration convention of the datasets
    /// this view is built from.
    pub fn scale(&self, target: ImageSize) -> Result<CalibratedView, ViewError> {
        let (height, width) = (self.height() as f64, self.width() as f64);
        let x_factor = height / target.height as f64;
        let y_factor = width / target.width as f64;
        let f = 1.0 / x_factor.max(y_factor);

        let new_size = if x_factor > y_factor {
            ImageSize {
                width: (f * width).round() as usize,
                height: target.height,
            }
        } else {
            ImageSize {
                width: target.width,
                height: (f * height).round() as usize,
            }
        };

        let k_scaler = Matrix3::new(f, 0.0, f, 0.0, f, f, 0.0, 0.0, 1.0);

        let bitmap = resize_bilinear(&self.bitmap.view(), new_size);
        let depth = resize_bilinear(&self.depth.view(), new_size);

        let mask_field = self
            .mask
            .mapv(|m| if m { 1.0f32 } else { 0.0 })
            .insert_axis(Axis(0));
        let mask = resize_bilinear(&mask_field.view(), new_size)
            .index_axis_move(Axis(0), 0)
            .mapv(|v| v != 0.0);

        CalibratedView::new(k_scaler * self.k, self.r, self.t, bitmap, depth, Some(mask))
    }

    /// Enlarge the canvas to exactly `target` by appending rows/columns at
    /// the bottom/right edge.
    ///
    /// The bitmap is padded with zeros, the depth with `NaN` (no depth known)
    /// and the mask with `false` (invalid). The pixel origin does not move, so
    /// the calibration is unchanged.
    ///
    /// # Errors
    ///
    /// Fails when `target` is smaller than the current extent in either
    /// dimension; padding amounts are never clamped.
    pub fn pad(&self, target: ImageSize) -> Result<CalibratedView, ViewError> {
        let bitmap = pad_constant(&self.bitmap.view(), target, 0.0)?;
        let depth = pad_constant(&self.depth.view(), target, f32::NAN)?;
        let mask = pad_constant(&self.mask.view().insert_axis(Axis(0)), target, false)?
            .index_axis_move(Axis(0), 0);

        CalibratedView::new(self.k, self.r, self.t, bitmap, depth, Some(mask))
    }

    /// Test which of the given pixel coordinates fall inside the image extent.
    ///
    /// A coordinate `(x, y)` is in range when `0 <= x <= W` and `0 <= y <= H`,
    /// inclusive at both ends: pixel coordinates are continuous sample
    /// positions, so the far boundary itself still belongs to the image.
    /// Non-finite coordinates compare out of range. The validity mask is not
    /// consulted.
    pub fn in_range_mask(&self, xy: &Matrix2xX<f64>) -> DVector<bool> {
        let (height, width) = (self.height() as f64, self.width() as f64);

        DVector::from_iterator(
            xy.ncols(),
            xy.column_iter()
                .map(|p| p[0] >= 0.0 && p[1] >= 0.0 && p[0] <= width && p[1] <= height),
        )
    }

    /// Look up the stored depth under each of the given pixel coordinates.
    ///
    /// Coordinates that are in range and finite are truncated to integer
    /// pixel indices and read from the depth raster; every other coordinate
    /// yields `NaN`. Unresolved depth is data, never an error, so callers
    /// filter on `NaN`.
    pub fn fetch_depth(&self, xy: &Matrix2xX<f64>) -> DVector<f64> {
        let in_range = self.in_range_mask(xy);
        let (rows, cols) = (self.height(), self.width());

        DVector::from_iterator(
            xy.ncols(),
            xy.column_iter().zip(in_range.iter()).map(|(p, in_range)| {
                if *in_range && p[0].is_finite() && p[1].is_finite() {
                    // the inclusive range admits x == W and y == H; that
                    // boundary sample maps to the last pixel row/column
                    let x = (p[0].trunc() as usize).min(cols - 1);
                    let y = (p[1].trunc() as usize).min(rows - 1);
                    self.depth[[0, y, x]] as f64
                } else {
                    f64::NAN
                }
            }),
        )
    }

    /// Unproject pixel coordinates into world-space 3D points using the
    /// stored depth.
    ///
    /// Each input column `(x, y)` is homogenized, carried through `K^-1`,
    /// scaled by its depth from [`CalibratedView::fetch_depth`], and moved to
    /// world space with the inverse rigid transform `R^T * (x_cam - T)`.
    /// Columns with unresolved depth come out as `NaN` coordinates rather
    /// than failing.
    ///
    /// # Errors
    ///
    /// Fails only when the intrinsic matrix is singular.
    pub fn unproject(&self, xy: &Matrix2xX<f64>) -> Result<Matrix3xX<f64>, ViewError> {
        let depth = self.fetch_depth(xy);
        let k_inv = self.k_inverse()?;

        let mut xyw = Matrix3xX::from_element(xy.ncols(), 1.0);
        xyw.rows_mut(0, 2).copy_from(xy);

        let mut xyz_cam = k_inv * xyw;
        for (mut col, d) in xyz_cam.column_iter_mut().zip(depth.iter()) {
            col *= *d;
            col -= self.t;
        }

        Ok(self.r.transpose() * xyz_cam)
    }

    /// Project world-space 3D points into pixel coordinates.
    ///
    /// Applies the rigid transform `R * x + T` followed by `K` and the
    /// perspective divide. Precondition: each point must have positive
    /// camera-space depth for a meaningful result; there is no guard against
    /// points on or behind the camera plane.
    pub fn project(&self, xyz_world: &Matrix3xX<f64>) -> Matrix2xX<f64> {
        let mut xyz_cam = self.r * xyz_world;
        for mut col in xyz_cam.column_iter_mut() {
            col += self.t;
        }

        let p = self.k * xyz_cam;
        Matrix2xX::from_fn(p.ncols(), |i, j| p[(i, j)] / p[(2, j)])
    }
}
