//! Force accumulation across the tree.

use crate::entity::PhysicalEntity;
use crate::tree::ArticulatedBody;
use crate::{SimContext, SpatialVec};

impl ArticulatedBody {
    /// Accumulate per-pass forces (gravity) for this link and every
    /// descendant, on top of any externally applied wrenches.
    ///
    /// Ordering contract: run after [`ArticulatedBody::update_links`]
    /// (gravity needs current orientations) and after
    /// [`ArticulatedBody::compute_link_velocities`] when velocity
    /// dependent forces are in play, and before the dynamics solver
    /// consumes the accumulators. `time` is the simulation time the
    /// forces are evaluated at; gravity ignores it, external force
    /// models need not.
    pub fn apply_forces(&mut self, time: f64, ctx: &SimContext) {
        let _ = time;

        // Gravity as a wrench about the body origin, body coordinates:
        // F = m g, applied at the center of mass.
        let inertia = self.handle.inertia();
        let g_local = self.handle.frame().vector_to_inner(&ctx.gravity);
        let force = g_local * inertia.mass;
        let torque = inertia.com.cross(&force);
        self.handle.reset_accumulator(SpatialVec::new(torque, force));

        for child in &mut self.children {
            child.apply_forces(time, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RigidBody;
    use approx::assert_relative_eq;
    use arbo_math::{GRAVITY, SpatialInertia, Vec3};

    #[test]
    fn gravity_lands_in_every_accumulator() {
        let ctx = SimContext::new().with_gravity(Vec3::new(0.0, -GRAVITY, 0.0));
        let mut root = ArticulatedBody::new(RigidBody::new(
            "root",
            SpatialInertia::sphere(2.0, 0.1),
        ));
        root.make_grounded();
        root.link_revolute(
            RigidBody::new("a", SpatialInertia::sphere(3.0, 0.1)),
            Vec3::zeros(),
            Vec3::zeros(),
            Vec3::z(),
            &ctx,
        )
        .expect("link");

        root.update_links();
        root.apply_forces(0.0, &ctx);

        let f_root = root.handle().accumulated_wrench();
        assert_relative_eq!(f_root.lin, Vec3::new(0.0, -2.0 * GRAVITY, 0.0), epsilon = 1e-12);
        let f_a = root.nth_link(1).expect("a").handle().accumulated_wrench();
        assert_relative_eq!(f_a.lin, Vec3::new(0.0, -3.0 * GRAVITY, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn offset_com_produces_gravity_torque() {
        let ctx = SimContext::new().with_gravity(Vec3::new(0.0, -GRAVITY, 0.0));
        let mut rod = SpatialInertia::rod(1.0, 1.0);
        rod.com = Vec3::new(0.5, 0.0, 0.0); // hangs off to +X
        let mut root = ArticulatedBody::new(RigidBody::new("root", rod));
        root.apply_forces(0.0, &ctx);

        let w = root.handle().accumulated_wrench();
        // τ = c × F = (0.5,0,0) × (0,-g,0) = (0,0,-g/2)
        assert_relative_eq!(w.ang, Vec3::new(0.0, 0.0, -GRAVITY * 0.5), epsilon = 1e-12);
    }

    #[test]
    fn user_wrench_survives_force_passes() {
        let ctx = SimContext::new().with_gravity(Vec3::zeros());
        let mut root = ArticulatedBody::new(RigidBody::new(
            "root",
            SpatialInertia::sphere(1.0, 0.1),
        ));
        root.apply_given_force(SpatialVec::new(Vec3::zeros(), Vec3::x()));

        root.apply_forces(0.0, &ctx);
        root.apply_forces(1.0, &ctx);
        assert_relative_eq!(
            root.handle().accumulated_wrench().lin,
            Vec3::x(),
            epsilon = 1e-12
        );
    }
}
