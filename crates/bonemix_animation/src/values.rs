use glam::{Mat4, Quat, Vec3};

/// Channel values that can be blended between two keys.
///
/// Vectors interpolate component-wise, quaternions spherically.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

/// A sampled bone pose.
///
/// Every channel is optional: `None` means the channel is absent and must not
/// contribute to the composed matrix (translation reads as zero, rotation as
/// identity, scale as one).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyFrame {
    pub translation: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl KeyFrame {
    /// The neutral pose: no channels, composes to `Mat4::IDENTITY`.
    pub const NEUTRAL: Self = Self {
        translation: None,
        rotation: None,
        scale: None,
    };

    #[inline]
    #[must_use]
    pub fn has_translation(&self) -> bool {
        self.translation.is_some()
    }

    #[inline]
    #[must_use]
    pub fn has_rotation(&self) -> bool {
        self.rotation.is_some()
    }

    #[inline]
    #[must_use]
    pub fn has_scale(&self) -> bool {
        self.scale.is_some()
    }

    /// Translation with the absent-channel default applied.
    #[inline]
    #[must_use]
    pub fn translation_or_default(&self) -> Vec3 {
        self.translation.unwrap_or(Vec3::ZERO)
    }

    #[inline]
    #[must_use]
    pub fn rotation_or_default(&self) -> Quat {
        self.rotation.unwrap_or(Quat::IDENTITY)
    }

    #[inline]
    #[must_use]
    pub fn scale_or_default(&self) -> Vec3 {
        self.scale.unwrap_or(Vec3::ONE)
    }

    /// Composes the pose matrix.
    ///
    /// Rotation is applied first, translation is written into the last column,
    /// and scale is post-multiplied. Absent channels leave the matrix untouched.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        let mut matrix = match self.rotation {
            Some(rotation) => Mat4::from_quat(rotation),
            None => Mat4::IDENTITY,
        };

        if let Some(translation) = self.translation {
            matrix.w_axis = translation.extend(1.0);
        }

        if let Some(scale) = self.scale {
            matrix *= Mat4::from_scale(scale);
        }

        matrix
    }

    /// Crossfades two poses channel by channel.
    ///
    /// A channel present on both sides is interpolated with weight `t` towards
    /// `to`; a channel present on one side only is taken unmodified; a channel
    /// absent on both sides stays absent.
    #[must_use]
    pub fn blend(from: &Self, to: &Self, t: f32) -> Self {
        Self {
            translation: blend_channel(from.translation, to.translation, t),
            rotation: blend_channel(from.rotation, to.rotation, t),
            scale: blend_channel(from.scale, to.scale, t),
        }
    }
}

fn blend_channel<T: Interpolatable>(from: Option<T>, to: Option<T>, t: f32) -> Option<T> {
    match (from, to) {
        (Some(a), Some(b)) => Some(T::interpolate_linear(a, b, t)),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn neutral_pose_is_identity() {
        assert_eq!(KeyFrame::NEUTRAL.to_matrix(), Mat4::IDENTITY);
        assert_eq!(KeyFrame::default(), KeyFrame::NEUTRAL);
    }

    #[test]
    fn matrix_matches_trs_composition() {
        let key = KeyFrame {
            translation: Some(Vec3::new(1.0, 2.0, 3.0)),
            rotation: Some(Quat::from_rotation_z(FRAC_PI_2)),
            scale: Some(Vec3::new(2.0, 2.0, 2.0)),
        };

        let expected = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 2.0, 2.0),
            Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(1.0, 2.0, 3.0),
        );
        assert!(key.to_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn translation_only_keeps_identity_basis() {
        let key = KeyFrame {
            translation: Some(Vec3::new(4.0, 0.0, 0.0)),
            ..KeyFrame::NEUTRAL
        };

        let m = key.to_matrix();
        assert_eq!(m.x_axis, glam::Vec4::X);
        assert_eq!(m.y_axis, glam::Vec4::Y);
        assert_eq!(m.z_axis, glam::Vec4::Z);
        assert_eq!(m.w_axis, glam::Vec4::new(4.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn blend_uses_single_sided_channels_unmodified() {
        let a = KeyFrame {
            translation: Some(Vec3::ZERO),
            scale: Some(Vec3::splat(3.0)),
            ..KeyFrame::NEUTRAL
        };
        let b = KeyFrame {
            translation: Some(Vec3::new(10.0, 0.0, 0.0)),
            rotation: Some(Quat::from_rotation_y(1.0)),
            ..KeyFrame::NEUTRAL
        };

        let out = KeyFrame::blend(&a, &b, 0.25);
        assert!(out.translation.unwrap().abs_diff_eq(Vec3::new(2.5, 0.0, 0.0), 1e-5));
        assert_eq!(out.rotation, Some(Quat::from_rotation_y(1.0)));
        assert_eq!(out.scale, Some(Vec3::splat(3.0)));
    }

    #[test]
    fn blend_of_neutral_poses_stays_neutral() {
        let out = KeyFrame::blend(&KeyFrame::NEUTRAL, &KeyFrame::NEUTRAL, 0.5);
        assert_eq!(out, KeyFrame::NEUTRAL);
    }

    #[test]
    fn f32_linear() {
        assert!((f32::interpolate_linear(0.0, 10.0, 0.25) - 2.5).abs() < 1e-6);
    }
}
