use approx::assert_relative_eq;
use nalgebra::{Matrix2xX, Matrix3, Vector3};
use ndarray::Array3;

use camview::{CalibratedView, ImageSize, ViewError};

/// 6x8 view with a non-trivial pose: rotation about the z axis and an offset
/// translation, constant depth of 5.
fn posed_view() -> Result<CalibratedView, ViewError> {
    let k = Matrix3::new(100.0, 0.0, 4.0, 0.0, 100.0, 3.0, 0.0, 0.0, 1.0);
    let (sin, cos) = 0.3f64.sin_cos();
    let r = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
    let t = Vector3::new(0.5, -1.0, 2.0);

    CalibratedView::new(
        k,
        r,
        t,
        Array3::from_elem((3, 6, 8), 0.25f32),
        Array3::from_elem((1, 6, 8), 5.0f32),
        None,
    )
}

#[test]
fn project_unproject_round_trip() -> Result<(), ViewError> {
    let view = posed_view()?;
    let xy = Matrix2xX::from_column_slice(&[0.0, 0.0, 2.0, 1.0, 3.5, 2.5, 7.0, 5.0]);

    let world = view.unproject(&xy)?;
    let reprojected = view.project(&world);

    for j in 0..xy.ncols() {
        assert_relative_eq!(reprojected[(0, j)], xy[(0, j)], epsilon = 1e-9);
        assert_relative_eq!(reprojected[(1, j)], xy[(1, j)], epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn round_trip_survives_scale() -> Result<(), ViewError> {
    let view = posed_view()?.scale(ImageSize {
        width: 4,
        height: 4,
    })?;

    // 6x8 fits a 4x4 target as 3x4
    assert_eq!(
        view.spatial_shape(),
        ImageSize {
            width: 4,
            height: 3
        }
    );

    let xy = Matrix2xX::from_column_slice(&[1.0, 1.0, 2.5, 0.5]);
    let reprojected = view.project(&view.unproject(&xy)?);

    for j in 0..xy.ncols() {
        assert_relative_eq!(reprojected[(0, j)], xy[(0, j)], epsilon = 1e-9);
        assert_relative_eq!(reprojected[(1, j)], xy[(1, j)], epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn pad_keeps_geometry_and_marks_new_region_unresolved() -> Result<(), ViewError> {
    let view = posed_view()?;
    let padded = view.pad(ImageSize {
        width: 10,
        height: 8,
    })?;

    // same calibration, so the same pixel unprojects to the same point
    let xy = Matrix2xX::from_column_slice(&[2.0, 1.0]);
    let before = view.unproject(&xy)?;
    let after = padded.unproject(&xy)?;
    assert_relative_eq!(before, after, epsilon = 1e-12);

    // the appended canvas has no depth, so unprojection there is unresolved
    let xy_padded = Matrix2xX::from_column_slice(&[9.0, 7.0]);
    let world = padded.unproject(&xy_padded)?;
    assert!(world.iter().all(|v| v.is_nan()));

    Ok(())
}
