//! Kinematic propagation: relative frames, world poses, velocities.

use crate::entity::PhysicalEntity;
use crate::tree::ArticulatedBody;
use arbo_math::SpatialVec;

impl ArticulatedBody {
    /// Recompute the cached transform from the inboard link's frame to
    /// this frame from the joint's current angle and offsets. No-op at
    /// the root (its pose lives in the handle).
    pub fn calc_relative_frame(&mut self) {
        if let Some(joint) = &self.inboard {
            self.rel_frame = joint.joint_frame();
        }
    }

    /// Propagate spatial velocities from this link outward to every
    /// descendant, recomputing relative frames along the way.
    ///
    /// Root-first, single pass: a link's velocity is derived from its
    /// parent's, so this must run before any per-link velocity is read.
    /// A grounded root is pinned to zero velocity first.
    pub fn compute_link_velocities(&mut self) {
        if self.grounded {
            self.handle.set_velocity(SpatialVec::zero());
        }
        let v = self.handle.velocity();
        for child in &mut self.children {
            child.propagate_velocity(&v);
        }
    }

    fn propagate_velocity(&mut self, parent_vel: &SpatialVec) {
        self.calc_relative_frame();
        let Some(joint) = &self.inboard else { return };
        let vel = self.rel_frame.apply_motion(parent_vel) + joint.motion_subspace() * joint.qd;
        self.handle.set_velocity(vel);
        for child in &mut self.children {
            child.propagate_velocity(&vel);
        }
    }

    /// Refresh every outboard link's cached world frame from this link's
    /// current pose, recursively. This is the read-only transform
    /// surface a scene graph polls once per rendered frame.
    pub fn update_links(&mut self) {
        let world = *self.handle.frame();
        for child in &mut self.children {
            child.calc_relative_frame();
            child.handle.set_frame(child.rel_frame.compose(&world));
            child.update_links();
        }
    }
}
