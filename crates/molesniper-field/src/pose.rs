use serde::{Deserialize, Serialize};

/// A player's position and facing direction at a sampled instant.
///
/// The facing vector `(fx, fz)` must be unit length; [`Self::from_heading`]
/// guarantees this by construction, which is how all sampled poses are made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub x: f32,
    pub z: f32,
    pub fx: f32,
    pub fz: f32,
}

impl PlayerPose {
    /// Creates a pose from an explicit facing vector.
    ///
    /// The caller is responsible for `(fx, fz)` being unit length.
    #[must_use]
    pub const fn new(x: f32, z: f32, fx: f32, fz: f32) -> Self {
        Self { x, z, fx, fz }
    }

    /// Creates a pose facing along a heading angle in radians.
    ///
    /// Heading 0 faces +x; the angle increases toward +z.
    #[must_use]
    pub fn from_heading(x: f32, z: f32, heading: f32) -> Self {
        Self::new(x, z, heading.cos(), heading.sin())
    }

    /// Euclidean distance from the player to a world point.
    #[must_use]
    pub fn distance_to(&self, x: f32, z: f32) -> f32 {
        let dx = x - self.x;
        let dz = z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, TAU};

    use super::*;

    #[test]
    fn test_heading_produces_unit_facing() {
        let mut heading = 0.0;
        while heading < TAU {
            let pose = PlayerPose::from_heading(0.0, 0.0, heading);
            let norm = (pose.fx * pose.fx + pose.fz * pose.fz).sqrt();
            assert!((norm - 1.0).abs() < 1e-6, "heading {heading}: norm {norm}");
            heading += 0.1;
        }
    }

    #[test]
    fn test_heading_axes() {
        let east = PlayerPose::from_heading(0.0, 0.0, 0.0);
        assert!((east.fx - 1.0).abs() < 1e-6);
        assert!(east.fz.abs() < 1e-6);

        let south = PlayerPose::from_heading(0.0, 0.0, FRAC_PI_2);
        assert!(south.fx.abs() < 1e-6);
        assert!((south.fz - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to() {
        let pose = PlayerPose::new(120.0, 0.0, 1.0, 0.0);
        assert!((pose.distance_to(123.0, 4.0) - 5.0).abs() < 1e-6);
        assert!(pose.distance_to(120.0, 0.0).abs() < 1e-6);
    }
}
