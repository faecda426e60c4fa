//! The rigid-body handle layer.
//!
//! [`PhysicalEntity`] is the seam between the articulated-body tree and
//! whatever provides mass properties and a reference frame; [`RigidBody`]
//! is the concrete entity the rest of this crate simulates.

use arbo_math::{Frame, SpatialInertia, SpatialVec, Vec3};
use nalgebra as na;

/// Number of reals a free 6-DOF pose contributes to the position state:
/// origin (3) plus an orientation quaternion (4).
pub const FREE_STATE_SIZE: usize = 7;
/// Number of reals a free 6-DOF pose contributes to the velocity state.
pub const FREE_DELTA_STATE_SIZE: usize = 6;

/// Mass-property and reference-frame provider for one rigid body.
///
/// The state marshaling methods follow the cursor protocol: each returns
/// the number of reals it consumed from (or produced into) the front of
/// the given slice, so a caller can advance a shared cursor through a
/// flat state vector.
pub trait PhysicalEntity {
    /// Reals of free-motion position state this entity tracks itself.
    fn state_size(&self) -> usize;
    /// Reals of free-motion velocity state this entity tracks itself.
    fn delta_state_size(&self) -> usize;

    fn write_state(&self, out: &mut [f64]) -> usize;
    fn read_state(&mut self, src: &[f64]) -> usize;
    fn write_delta_state(&self, out: &mut [f64]) -> usize;
    fn read_delta_state(&mut self, src: &[f64]) -> usize;

    /// World → body coordinate transform.
    fn frame(&self) -> &Frame;
    fn set_frame(&mut self, frame: Frame);

    fn inertia(&self) -> &SpatialInertia;

    /// Spatial velocity in the body's own frame.
    fn velocity(&self) -> SpatialVec;
    fn set_velocity(&mut self, vel: SpatialVec);

    /// Add an externally specified wrench (body frame). Persists until
    /// [`PhysicalEntity::clear_wrenches`].
    fn apply_wrench(&mut self, wrench: SpatialVec);
    fn clear_wrenches(&mut self);
}

/// A plain rigid body: inertia, world pose, spatial velocity, and a
/// wrench accumulator.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub name: String,
    pub inertia: SpatialInertia,
    /// World → body transform.
    world: Frame,
    /// Spatial velocity in body frame.
    vel: SpatialVec,
    /// User-applied wrench in body frame; persists across force passes.
    external: SpatialVec,
    /// Total wrench for the current dynamics pass (external + per-pass
    /// forces such as gravity). Rebuilt by every force pass.
    accum: SpatialVec,
}

impl RigidBody {
    pub fn new(name: &str, inertia: SpatialInertia) -> Self {
        Self {
            name: name.to_string(),
            inertia,
            world: Frame::identity(),
            vel: SpatialVec::zero(),
            external: SpatialVec::zero(),
            accum: SpatialVec::zero(),
        }
    }

    /// Start a force pass: the accumulator becomes the persistent
    /// external wrench plus `pass_wrench` (gravity and friends).
    pub(crate) fn reset_accumulator(&mut self, pass_wrench: SpatialVec) {
        self.accum = self.external + pass_wrench;
    }

    /// Total wrench accumulated by the last force pass (body frame).
    pub fn accumulated_wrench(&self) -> SpatialVec {
        self.accum
    }

    /// Body orientation as a unit quaternion (body → world rotation).
    fn orientation(&self) -> na::UnitQuaternion<f64> {
        let body_to_world = na::Rotation3::from_matrix_unchecked(self.world.rot.transpose());
        na::UnitQuaternion::from_rotation_matrix(&body_to_world)
    }
}

impl PhysicalEntity for RigidBody {
    fn state_size(&self) -> usize {
        FREE_STATE_SIZE
    }

    fn delta_state_size(&self) -> usize {
        FREE_DELTA_STATE_SIZE
    }

    fn write_state(&self, out: &mut [f64]) -> usize {
        let q = self.orientation();
        out[0] = self.world.pos.x;
        out[1] = self.world.pos.y;
        out[2] = self.world.pos.z;
        out[3] = q.w;
        out[4] = q.i;
        out[5] = q.j;
        out[6] = q.k;
        FREE_STATE_SIZE
    }

    fn read_state(&mut self, src: &[f64]) -> usize {
        let pos = Vec3::new(src[0], src[1], src[2]);
        let q = na::UnitQuaternion::from_quaternion(na::Quaternion::new(
            src[3], src[4], src[5], src[6],
        ));
        self.world = Frame::new(q.to_rotation_matrix().matrix().transpose(), pos);
        FREE_STATE_SIZE
    }

    fn write_delta_state(&self, out: &mut [f64]) -> usize {
        out[0] = self.vel.ang.x;
        out[1] = self.vel.ang.y;
        out[2] = self.vel.ang.z;
        out[3] = self.vel.lin.x;
        out[4] = self.vel.lin.y;
        out[5] = self.vel.lin.z;
        FREE_DELTA_STATE_SIZE
    }

    fn read_delta_state(&mut self, src: &[f64]) -> usize {
        self.vel = SpatialVec::new(
            Vec3::new(src[0], src[1], src[2]),
            Vec3::new(src[3], src[4], src[5]),
        );
        FREE_DELTA_STATE_SIZE
    }

    fn frame(&self) -> &Frame {
        &self.world
    }

    fn set_frame(&mut self, frame: Frame) {
        self.world = frame;
    }

    fn inertia(&self) -> &SpatialInertia {
        &self.inertia
    }

    fn velocity(&self) -> SpatialVec {
        self.vel
    }

    fn set_velocity(&mut self, vel: SpatialVec) {
        debug_assert!(vel.is_finite(), "non-finite velocity on body '{}'", self.name);
        self.vel = vel;
    }

    fn apply_wrench(&mut self, wrench: SpatialVec) {
        debug_assert!(wrench.is_finite(), "non-finite wrench on body '{}'", self.name);
        self.external = self.external + wrench;
    }

    fn clear_wrenches(&mut self) {
        self.external = SpatialVec::zero();
    }
}
