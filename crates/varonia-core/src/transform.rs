//! Conversion from the authoring convention to the engine convention.
//!
//! The authoring tool writes right-handed, Y-up, meter-based coordinates.
//! The engine consumes left-handed, Z-up, centimeter-based coordinates.
//! Positions and orientations go through the same axis permutation
//! (source z -> forward, x -> right, y -> up) so that a sync anchor's
//! translation and rotation stay consistent when composed.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{METERS_TO_CENTIMETERS, SINGULARITY_THRESHOLD};

/// Pitch/yaw/roll in degrees, as used by the target engine.
///
/// Pitch rotates about the right axis (Y), yaw about the up axis (Z) and roll
/// about the forward axis (X).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const IDENTITY: Rotator = Rotator {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Extract pitch/yaw/roll from a target-convention quaternion.
    ///
    /// The quaternion is used as-is; callers that need a pure rotation should
    /// normalize first. Near the poles (|pitch| = 90) yaw is kept and the
    /// remaining twist is folded into roll.
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let singularity_test = z * x - w * y;
        let yaw_y = 2.0 * (w * z + x * y);
        let yaw_x = 1.0 - 2.0 * (y * y + z * z);
        let yaw = yaw_y.atan2(yaw_x).to_degrees();

        if singularity_test < -SINGULARITY_THRESHOLD {
            let twist = 2.0 * x.atan2(w).to_degrees();
            Self {
                pitch: -90.0,
                yaw,
                roll: normalize_axis(-yaw - twist),
            }
        } else if singularity_test > SINGULARITY_THRESHOLD {
            let twist = 2.0 * x.atan2(w).to_degrees();
            Self {
                pitch: 90.0,
                yaw,
                roll: normalize_axis(yaw - twist),
            }
        } else {
            let pitch = (2.0 * singularity_test).clamp(-1.0, 1.0).asin().to_degrees();
            let roll = (-2.0 * (w * x + y * z))
                .atan2(1.0 - 2.0 * (x * x + y * y))
                .to_degrees();
            Self { pitch, yaw, roll }
        }
    }

    /// Inverse of [`Rotator::from_quat`] for non-degenerate rotations.
    pub fn to_quat(self) -> Quat {
        let (sp, cp) = (self.pitch.to_radians() * 0.5).sin_cos();
        let (sy, cy) = (self.yaw.to_radians() * 0.5).sin_cos();
        let (sr, cr) = (self.roll.to_radians() * 0.5).sin_cos();
        Quat::from_xyzw(
            cr * sp * sy - sr * cp * cy,
            -cr * sp * cy - sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Every axis wrapped into (-180, 180].
    pub fn normalized(self) -> Self {
        Self {
            pitch: normalize_axis(self.pitch),
            yaw: normalize_axis(self.yaw),
            roll: normalize_axis(self.roll),
        }
    }

    pub fn is_finite(self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }
}

impl std::fmt::Display for Rotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P={:.3} Y={:.3} R={:.3}", self.pitch, self.yaw, self.roll)
    }
}

/// Wrap an angle in degrees into (-180, 180].
pub fn normalize_axis(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Convert a source position (meters, Y-up) into a target position
/// (centimeters, Z-up): `(z, x, y) * 100`.
#[inline]
pub fn position(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(
        z * METERS_TO_CENTIMETERS,
        x * METERS_TO_CENTIMETERS,
        y * METERS_TO_CENTIMETERS,
    )
}

/// Reorder source quaternion components with the same permutation as
/// [`position`]. No normalization and no sign flips.
#[inline]
pub fn remap_quaternion(x: f32, y: f32, z: f32, w: f32) -> Quat {
    Quat::from_xyzw(z, x, y, w)
}

/// Convert a source orientation into the target engine's rotator.
pub fn orientation(x: f32, y: f32, z: f32, w: f32) -> Rotator {
    Rotator::from_quat(remap_quaternion(x, y, z, w))
}
