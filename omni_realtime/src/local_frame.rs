//! Local coordinate frames for placing objects and cameras in the scene.
//!
//! A frame is built from a position plus forward and up seeds. The up seed
//! does not need to be perpendicular to forward: the right axis is derived
//! from both and the up axis is rebuilt from forward and right, so the
//! resulting rotation block is always orthonormal.

use glam::{Mat4, Vec3};
use thiserror::Error;

/// Vectors at or below this length are treated as zero.
pub const MIN_AXIS_LENGTH: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Forward,
    Up,
    /// Derived from forward and up; degenerate when the seeds are parallel.
    Right,
}

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("{0:?} axis has zero or non-finite length")]
    DegenerateAxis(Axis),
}

/// Scale `v` to unit length.
pub fn normalize3(v: Vec3, axis: Axis) -> Result<Vec3, FrameError> {
    let len = v.length();
    if !len.is_finite() || len <= MIN_AXIS_LENGTH {
        return Err(FrameError::DegenerateAxis(axis));
    }
    Ok(v / len)
}

/// Build a transform whose columns are the right, up, and forward axes
/// (w = 0) followed by `position` (w = 1).
pub fn local_frame(position: Vec3, forward: Vec3, up: Vec3) -> Result<Mat4, FrameError> {
    let z_axis = normalize3(forward, Axis::Forward)?;
    let up_seed = normalize3(up, Axis::Up)?;
    let x_axis = normalize3(up_seed.cross(z_axis), Axis::Right)?;
    // Cannot degenerate: z and x are unit length and perpendicular.
    let y_axis = normalize3(z_axis.cross(x_axis), Axis::Up)?;

    Ok(Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        position.extend(1.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec4, b: Vec4) {
        for (lhs, rhs) in a.to_array().into_iter().zip(b.to_array()) {
            assert!((lhs - rhs).abs() <= EPSILON, "{a} != {b}");
        }
    }

    fn assert_orthonormal(frame: &Mat4) {
        let axes = [
            frame.x_axis.truncate(),
            frame.y_axis.truncate(),
            frame.z_axis.truncate(),
        ];
        for (i, a) in axes.iter().enumerate() {
            assert!((a.length() - 1.0).abs() <= EPSILON, "axis {i} length {}", a.length());
            for b in &axes[i + 1..] {
                assert!(a.dot(*b).abs() <= EPSILON, "{a} not orthogonal to {b}");
            }
        }
        assert_eq!(frame.x_axis.w, 0.0);
        assert_eq!(frame.y_axis.w, 0.0);
        assert_eq!(frame.z_axis.w, 0.0);
        assert_eq!(frame.w_axis.w, 1.0);
    }

    #[test]
    fn canonical_axes_give_identity() {
        let frame = local_frame(Vec3::ZERO, Vec3::Z, Vec3::Y).unwrap();
        assert_eq!(frame, Mat4::IDENTITY);
    }

    #[test]
    fn translation_column_is_position_verbatim() {
        let position = Vec3::new(3.5, -2.0, 10.25);
        let frame = local_frame(position, Vec3::Z, Vec3::Y).unwrap();
        assert_eq!(frame.w_axis, position.extend(1.0));
    }

    #[test]
    fn forward_is_normalized_into_z_column() {
        let frame = local_frame(Vec3::ZERO, Vec3::new(0.0, 0.0, 12.0), Vec3::Y).unwrap();
        approx_eq(frame.z_axis, Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn slanted_up_is_reorthogonalized() {
        let forward = Vec3::new(1.0, 0.0, 1.0);
        let up = Vec3::new(0.3, 1.0, 0.0);
        let frame = local_frame(Vec3::ONE, forward, up).unwrap();
        assert_orthonormal(&frame);
        approx_eq(frame.z_axis, forward.normalize().extend(0.0));
        // Rebuilt up stays on the same side as the seed.
        assert!(frame.y_axis.truncate().dot(up) > 0.0);
    }

    #[test]
    fn arbitrary_inputs_are_orthonormal() {
        let cases = [
            (Vec3::new(0.2, -0.7, 0.1), Vec3::new(-1.0, 4.0, 2.0)),
            (Vec3::new(-5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 9.0)),
            (Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        ];
        for (forward, up) in cases {
            let frame = local_frame(Vec3::new(1.0, 2.0, 3.0), forward, up).unwrap();
            assert_orthonormal(&frame);
        }
    }

    #[test]
    fn zero_forward_is_rejected() {
        assert_eq!(
            local_frame(Vec3::ZERO, Vec3::ZERO, Vec3::Y),
            Err(FrameError::DegenerateAxis(Axis::Forward))
        );
    }

    #[test]
    fn zero_up_is_rejected() {
        assert_eq!(
            local_frame(Vec3::ZERO, Vec3::Z, Vec3::ZERO),
            Err(FrameError::DegenerateAxis(Axis::Up))
        );
    }

    #[test]
    fn parallel_seeds_are_rejected() {
        assert_eq!(
            local_frame(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 2.0, 0.0)),
            Err(FrameError::DegenerateAxis(Axis::Right))
        );
    }

    #[test]
    fn near_zero_seeds_are_rejected() {
        assert_eq!(
            local_frame(Vec3::ZERO, Vec3::splat(1e-8), Vec3::Y),
            Err(FrameError::DegenerateAxis(Axis::Forward))
        );
        assert_eq!(
            local_frame(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, MIN_AXIS_LENGTH, 0.0)),
            Err(FrameError::DegenerateAxis(Axis::Up))
        );
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert_eq!(
            normalize3(Vec3::new(f32::NAN, 0.0, 1.0), Axis::Forward),
            Err(FrameError::DegenerateAxis(Axis::Forward))
        );
    }
}
