//! Spatial algebra primitives for articulated rigid-body dynamics.
//!
//! Follows the conventions of Featherstone's "Rigid Body Dynamics
//! Algorithms": 6D vectors are ordered [angular; linear], and coordinate
//! transforms between link frames are Plücker transforms built from a
//! rotation and an origin offset.

pub mod frame;
pub mod inertia;
pub mod spatial;

pub use frame::Frame;
pub use inertia::SpatialInertia;
pub use spatial::{SpatialMat, SpatialVec};

use nalgebra as na;

/// 3D vector alias.
pub type Vec3 = na::Vector3<f64>;
/// 3x3 matrix alias.
pub type Mat3 = na::Matrix3<f64>;
/// 6D vector alias.
pub type Vec6 = na::Vector6<f64>;
/// 6x6 matrix alias.
pub type Mat6 = na::Matrix6<f64>;
/// Dynamically sized vector (flat generalized state).
pub type DVec = na::DVector<f64>;
/// Dynamically sized matrix.
pub type DMat = na::DMatrix<f64>;

/// Cross-product matrix: `skew(v) * w == v × w`.
#[inline]
pub fn skew(v: &Vec3) -> Mat3 {
    Mat3::new(0.0, -v.z, v.y, v.z, 0.0, -v.x, -v.y, v.x, 0.0)
}

/// Standard gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;
