//! Revolute joints between a link and its inboard (parent) link.

use crate::SimContext;
use crate::error::{Result, TreeError};
use arbo_math::{Frame, SpatialVec, Vec3};

/// A 1-DOF revolute joint.
///
/// Axis convention: `axis` is a unit vector expressed in the outboard
/// (child) link's frame. At `q = 0` the child frame is aligned with the
/// parent frame, and a revolute axis has the same coordinates in both, so
/// this matches the common "parent frame" reading as well; the tests in
/// this crate pin the convention down explicitly.
#[derive(Debug, Clone)]
pub struct Joint {
    /// Joint angle (radians).
    pub q: f64,
    /// Joint rate (radians/second).
    pub qd: f64,
    /// Actuation torque applied at the joint.
    pub applied: f64,
    /// Rotation axis, unit, child-frame coordinates.
    pub axis: Vec3,
    /// Vector from the parent link origin to the joint, parent frame.
    pub inboard_offset: Vec3,
    /// Vector from the child link origin to the joint, child frame.
    pub outboard_offset: Vec3,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Coulomb friction coefficient, seeded from [`SimContext`].
    pub friction: f64,
}

impl Joint {
    /// Build a revolute joint. The axis is normalized; a near-zero axis
    /// is a construction error.
    pub fn revolute(
        inboard_offset: Vec3,
        outboard_offset: Vec3,
        axis: Vec3,
        ctx: &SimContext,
    ) -> Result<Self> {
        let norm = axis.norm();
        if norm < 1e-9 {
            return Err(TreeError::DegenerateAxis(norm));
        }
        if !(inboard_offset.iter().all(|x| x.is_finite())
            && outboard_offset.iter().all(|x| x.is_finite()))
        {
            return Err(TreeError::NonFiniteOffset);
        }
        Ok(Self {
            q: 0.0,
            qd: 0.0,
            applied: 0.0,
            axis: axis / norm,
            inboard_offset,
            outboard_offset,
            damping: 0.0,
            friction: ctx.joint_friction,
        })
    }

    /// Degrees of freedom.
    pub fn ndof(&self) -> usize {
        1
    }

    /// The coordinate transform from the parent link frame to the child
    /// link frame at the current joint angle.
    ///
    /// The child origin sits at `inboard_offset − R(q)·outboard_offset`
    /// in parent coordinates, where `R(q)` is the active rotation about
    /// the axis.
    pub fn joint_frame(&self) -> Frame {
        let mut f = Frame::from_axis_angle(&self.axis, self.q);
        // f.rot is the parent→child coordinate map R(q)ᵀ.
        f.pos = self.inboard_offset - f.rot.transpose() * self.outboard_offset;
        f
    }

    /// Motion subspace `S` in child-frame coordinates: rotation about the
    /// axis through the joint point, expressed at the child origin.
    pub fn motion_subspace(&self) -> SpatialVec {
        SpatialVec::new(self.axis, self.outboard_offset.cross(&self.axis))
    }

    /// Generalized force at the joint: actuation minus viscous damping
    /// minus Coulomb friction opposing the current rate.
    pub fn generalized_force(&self) -> f64 {
        let coulomb = if self.qd.abs() > 1e-12 {
            self.friction * self.qd.signum()
        } else {
            0.0
        };
        self.applied - self.damping * self.qd - coulomb
    }
}
