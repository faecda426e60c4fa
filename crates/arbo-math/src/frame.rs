//! Coordinate frames and Plücker transforms between them.

use crate::{Mat3, Mat6, SpatialVec, Vec3, skew};
use nalgebra as na;

/// A rigid coordinate transform from frame A to frame B.
///
/// `rot` maps coordinates expressed in A to coordinates expressed in B.
/// `pos` is the origin of B expressed in A's coordinates. Applied to
/// spatial vectors this is the Plücker transform `X` (motion) or `X*`
/// (force).
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Coordinate rotation A → B.
    pub rot: Mat3,
    /// Origin of B in A's coordinates.
    pub pos: Vec3,
}

impl Frame {
    pub fn new(rot: Mat3, pos: Vec3) -> Self {
        Self { rot, pos }
    }

    pub fn identity() -> Self {
        Self {
            rot: Mat3::identity(),
            pos: Vec3::zeros(),
        }
    }

    /// Pure translation: B is A shifted by `pos`.
    pub fn from_translation(pos: Vec3) -> Self {
        Self {
            rot: Mat3::identity(),
            pos,
        }
    }

    /// Coordinate rotation by `angle` about a unit `axis` (no offset).
    ///
    /// This is the transform into a frame that has been *actively* rotated
    /// by `+angle`, so the coordinate map itself is the inverse rotation.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Self {
        let r = na::Rotation3::from_axis_angle(&na::Unit::new_normalize(*axis), angle);
        Self {
            rot: r.matrix().transpose(),
            pos: Vec3::zeros(),
        }
    }

    /// Transform a motion vector (twist) from A to B coordinates.
    pub fn apply_motion(&self, m: &SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.rot * m.ang,
            lin: self.rot * (m.lin - self.pos.cross(&m.ang)),
        }
    }

    /// Transform a force vector (wrench) from A to B coordinates.
    pub fn apply_force(&self, f: &SpatialVec) -> SpatialVec {
        SpatialVec {
            ang: self.rot * (f.ang - self.pos.cross(&f.lin)),
            lin: self.rot * f.lin,
        }
    }

    /// Transform a motion vector from B back to A coordinates.
    pub fn inv_apply_motion(&self, m: &SpatialVec) -> SpatialVec {
        let rt = self.rot.transpose();
        let ang = rt * m.ang;
        SpatialVec {
            lin: rt * m.lin + self.pos.cross(&ang),
            ang,
        }
    }

    /// Transform a force vector from B back to A coordinates.
    pub fn inv_apply_force(&self, f: &SpatialVec) -> SpatialVec {
        let rt = self.rot.transpose();
        let lin = rt * f.lin;
        SpatialVec {
            ang: rt * f.ang + self.pos.cross(&lin),
            lin,
        }
    }

    /// Chain transforms: the result maps A → C given `other`: A → B and
    /// `self`: B → C.
    pub fn compose(&self, other: &Frame) -> Frame {
        Frame {
            rot: self.rot * other.rot,
            pos: other.pos + other.rot.transpose() * self.pos,
        }
    }

    /// The transform B → A.
    pub fn inverse(&self) -> Frame {
        Frame {
            rot: self.rot.transpose(),
            pos: -(self.rot * self.pos),
        }
    }

    /// Map a point expressed in B coordinates into A coordinates.
    #[inline]
    pub fn point_to_outer(&self, p: &Vec3) -> Vec3 {
        self.rot.transpose() * p + self.pos
    }

    /// Map a free vector expressed in A coordinates into B coordinates.
    #[inline]
    pub fn vector_to_inner(&self, v: &Vec3) -> Vec3 {
        self.rot * v
    }

    /// The 6x6 Plücker motion matrix
    /// `X = [R, 0; -R [p]×, R]`.
    pub fn to_motion_matrix(&self) -> Mat6 {
        let mut x = Mat6::zeros();
        let r = self.rot;
        x.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        x.fixed_view_mut::<3, 3>(3, 0).copy_from(&(-r * skew(&self.pos)));
        x.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        x
    }

    /// The 6x6 Plücker force matrix
    /// `X* = [R, -R [p]×; 0, R]`.
    pub fn to_force_matrix(&self) -> Mat6 {
        let mut x = Mat6::zeros();
        let r = self.rot;
        x.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        x.fixed_view_mut::<3, 3>(0, 3).copy_from(&(-r * skew(&self.pos)));
        x.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_twist_alone() {
        let v = SpatialVec::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        let out = Frame::identity().apply_motion(&v);
        assert_relative_eq!(out.to_vec6(), v.to_vec6(), epsilon = 1e-12);
    }

    #[test]
    fn translation_shifts_linear_velocity() {
        // Rotation ω = z about A's origin, re-expressed at a frame whose
        // origin sits at +x: the material point there moves at ω × p = +y.
        let xf = Frame::from_translation(Vec3::x());
        let twist = SpatialVec::new(Vec3::z(), Vec3::zeros());
        let out = xf.apply_motion(&twist);
        assert_relative_eq!(out.ang, Vec3::z(), epsilon = 1e-12);
        assert_relative_eq!(out.lin, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn compose_translations_adds_offsets() {
        let a = Frame::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let b = Frame::from_translation(Vec3::new(0.0, 2.0, 0.0));
        let c = a.compose(&b);
        assert_relative_eq!(c.pos, Vec3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn point_roundtrip_through_inverse() {
        let xf = Frame::new(
            *na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), 0.7).matrix(),
            Vec3::new(1.0, -2.0, 0.5),
        );
        let p = Vec3::new(0.3, 0.4, 0.5);
        let there = xf.inverse().point_to_outer(&p);
        let back = xf.point_to_outer(&there);
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }
}
