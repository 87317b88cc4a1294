//! Movement math on top of `glam`.
//!
//! Conventions follow a Y-up, left-handed world: `+x` is right, `+y` is up,
//! `+z` is forward. A 2D input direction `(x, y)` maps onto the ground plane
//! as `(x, 0, y)`.

pub use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Lifts a 2D ground-plane direction into 3D: `(x, y)` → `(x, 0, y)`.
pub fn ground_direction(v: Vec2) -> Vec3 {
    Vec3::new(v.x, 0.0, v.y)
}

/// Position plus facing.
///
/// Characters only ever turn around the vertical axis, so orientation is a
/// single yaw angle in radians. Yaw 0 faces `+z`; positive yaw turns
/// towards `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub const fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Rotates a local-space vector into world space using this pose's yaw.
    pub fn rotate(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_ground_direction_maps_y_onto_z() {
        assert_eq!(ground_direction(Vec2::new(1.0, 2.0)), Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_pose_rotate_identity_at_zero_yaw() {
        let v = Pose::default().rotate(Vec3::new(1.0, 0.0, 2.0));
        assert!(v.abs_diff_eq(Vec3::new(1.0, 0.0, 2.0), EPS), "{v:?}");
    }

    #[test]
    fn test_pose_rotate_quarter_turn_maps_forward_to_right() {
        let pose = Pose::new(Vec3::ZERO, FRAC_PI_2);
        let v = pose.rotate(Vec3::Z);
        assert!(v.abs_diff_eq(Vec3::X, EPS), "{v:?}");
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_pose_serializes_position_as_array() {
        let json = serde_json::to_string(&Pose::new(Vec3::new(1.0, 2.0, 3.0), 0.5)).unwrap();
        assert_eq!(json, r#"{"position":[1.0,2.0,3.0],"yaw":0.5}"#);
    }
}
