//! Articulated Body Algorithm — O(n) forward dynamics over the tree.
//!
//! Three passes over the links in pre-order (parents always precede
//! children, so the flattened link array can be swept forward and
//! backward):
//! 1. outward: per-link velocity bias and initial articulated inertia,
//! 2. inward: articulated inertias and bias wrenches folded across
//!    joints into parents,
//! 3. outward: joint and link accelerations.
//!
//! Gravity is consumed from the force accumulators filled by
//! `apply_forces`, so the base acceleration is plain zero; external
//! wrenches applied to individual links ride along for free.

use crate::entity::PhysicalEntity;
use crate::tree::ArticulatedBody;
use crate::{SimContext, SpatialVec};
use arbo_math::{DVec, Frame, SpatialMat};

/// Joints with a smaller projected inertia than this are treated as
/// unactuatable (their acceleration is left at zero).
const MIN_PROJECTED_INERTIA: f64 = 1e-20;

/// Per-link working storage, reused across steps.
#[derive(Debug)]
struct LinkScratch {
    /// Index of the inboard link in the flattened array, or -1 when the
    /// inboard link is the grounded base.
    parent: i32,
    /// Inboard frame → link frame.
    x: Frame,
    /// Motion subspace in link coordinates.
    s: SpatialVec,
    /// Joint rate.
    qd: f64,
    /// Link spatial velocity (from the last velocity pass).
    vel: SpatialVec,
    /// Velocity-product (Coriolis) bias.
    c: SpatialVec,
    /// Articulated inertia.
    i_a: SpatialMat,
    /// Articulated bias wrench.
    p_a: SpatialVec,
    /// External wrench from the last force pass, link coordinates.
    f_ext: SpatialVec,
    /// Generalized force at the joint.
    tau: f64,
    /// `I_a S`, kept between the inward and outward passes.
    u_vec: SpatialVec,
    /// `S · I_a S`.
    d: f64,
    /// `tau − S · p_a`.
    u: f64,
    /// Link spatial acceleration.
    acc: SpatialVec,
}

/// Featherstone forward-dynamics solver.
///
/// Owns per-link scratch storage (capacity is kept across calls) and
/// operates by reference on the tree it is run against. The moving
/// links are the grounded root's descendants, one revolute DOF each.
#[derive(Debug, Default)]
pub struct FeatherstoneSolver {
    links: Vec<LinkScratch>,
}

impl FeatherstoneSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute joint accelerations from the tree's current velocities
    /// and accumulated forces. Results are in pre-order joint order —
    /// the same order the state-vector cursor uses.
    ///
    /// Requires `compute_link_velocities` and `apply_forces` to have run
    /// for the current configuration.
    pub fn forward_dynamics(&mut self, tree: &ArticulatedBody, _ctx: &SimContext) -> DVec {
        debug_assert!(
            tree.is_grounded(),
            "forward dynamics requires a grounded root"
        );

        self.links.clear();
        collect(tree, -1, &mut self.links);
        let nv = self.links.len();
        let mut qdd = DVec::zeros(nv);

        // ── Pass 1: outward — velocity bias and initial bias wrench ──
        for link in self.links.iter_mut() {
            link.c = link.vel.cross_motion(&(link.s * link.qd));
            link.p_a = link.vel.cross_force(&link.i_a.mul_vec(&link.vel)) - link.f_ext;
        }

        // ── Pass 2: inward — fold articulated quantities into parents ──
        for i in (0..nv).rev() {
            let link = &mut self.links[i];
            link.u_vec = link.i_a.mul_vec(&link.s);
            link.d = link.s.dot(&link.u_vec);
            link.u = link.tau - link.s.dot(&link.p_a);

            if link.parent < 0 || link.d.abs() < MIN_PROJECTED_INERTIA {
                continue;
            }

            // I' = I_a − (I_a S)(I_a S)ᵀ / d,  p' = p_a + I' c + (I_a S) u/d
            let i_reduced =
                link.i_a - SpatialMat::outer(&link.u_vec, &link.u_vec).scale(1.0 / link.d);
            let p_reduced =
                link.p_a + i_reduced.mul_vec(&link.c) + link.u_vec * (link.u / link.d);

            // Congruence transform into the parent frame: Xᵀ I' X.
            let x_mot = link.x.to_motion_matrix();
            let i_in_parent = SpatialMat::from_mat6(x_mot.transpose() * i_reduced.0 * x_mot);
            let p_in_parent = link.x.inv_apply_force(&p_reduced);

            let pi = link.parent as usize;
            self.links[pi].i_a = self.links[pi].i_a + i_in_parent;
            self.links[pi].p_a = self.links[pi].p_a + p_in_parent;
        }

        // ── Pass 3: outward — accelerations ──
        for i in 0..nv {
            // The grounded base does not accelerate.
            let a_parent = if self.links[i].parent < 0 {
                SpatialVec::zero()
            } else {
                let parent_acc = self.links[self.links[i].parent as usize].acc;
                self.links[i].x.apply_motion(&parent_acc)
            };

            let link = &mut self.links[i];
            let a_bias = a_parent + link.c;
            if link.d.abs() < MIN_PROJECTED_INERTIA {
                link.acc = a_bias;
                continue;
            }

            let qdd_i = (link.u - link.i_a.mul_vec(&a_bias).dot(&link.s)) / link.d;
            qdd[i] = qdd_i;
            link.acc = a_bias + link.s * qdd_i;
        }

        qdd
    }
}

/// Flatten the moving links (every node below the root) into `out`,
/// pre-order, capturing joint and handle quantities for the sweep.
fn collect(node: &ArticulatedBody, parent: i32, out: &mut Vec<LinkScratch>) {
    let own = if let Some(joint) = node.joint() {
        let idx = out.len() as i32;
        out.push(LinkScratch {
            parent,
            x: *node.relative_frame(),
            s: joint.motion_subspace(),
            qd: joint.qd,
            vel: node.handle().velocity(),
            c: SpatialVec::zero(),
            i_a: node.handle().inertia().to_matrix(),
            p_a: SpatialVec::zero(),
            f_ext: node.handle().accumulated_wrench(),
            tau: joint.generalized_force(),
            u_vec: SpatialVec::zero(),
            d: 0.0,
            u: 0.0,
            acc: SpatialVec::zero(),
        });
        idx
    } else {
        // Tree root: not a moving link; its children attach to the base.
        -1
    };

    for child in node.children() {
        collect(child, own, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RigidBody;
    use approx::assert_relative_eq;
    use arbo_math::{GRAVITY, Mat3, SpatialInertia, Vec3};

    fn ctx() -> SimContext {
        SimContext::new().with_gravity(Vec3::new(0.0, -GRAVITY, 0.0))
    }

    /// A uniform rod pivoting at its upper end, frame at the pivot,
    /// hanging along −Y at q = 0.
    fn pendulum_link(mass: f64, length: f64) -> RigidBody {
        let i = mass * length * length / 12.0;
        RigidBody::new(
            "link",
            SpatialInertia::new(
                mass,
                Vec3::new(0.0, -length / 2.0, 0.0),
                Mat3::from_diagonal(&Vec3::new(i, 0.0, i)),
            ),
        )
    }

    fn base() -> ArticulatedBody {
        let mut root = ArticulatedBody::new(RigidBody::new(
            "base",
            SpatialInertia::point_mass(0.0, Vec3::zeros()),
        ));
        root.make_grounded();
        root
    }

    fn prepare(tree: &mut ArticulatedBody, context: &SimContext) {
        tree.compute_link_velocities();
        tree.update_links();
        tree.apply_forces(0.0, context);
    }

    #[test]
    fn hanging_pendulum_is_in_equilibrium() {
        let context = ctx();
        let mut tree = base();
        tree.link_revolute(
            pendulum_link(1.0, 1.0),
            Vec3::zeros(),
            Vec3::zeros(),
            Vec3::z(),
            &context,
        )
        .expect("link");

        prepare(&mut tree, &context);
        tree.install_featherstone_solver();
        let qdd = tree.run_forward_dynamics(&context).expect("solver installed");
        assert!(qdd[0].abs() < 1e-10, "qdd = {} at equilibrium", qdd[0]);
    }

    #[test]
    fn horizontal_pendulum_matches_analytic_acceleration() {
        // At q = π/2 the rod points along +X, maximal gravity torque:
        // qdd = −(m g L/2) / (m L²/3).
        let (mass, length) = (1.0, 1.0);
        let context = ctx();
        let mut tree = base();
        {
            let link = tree
                .link_revolute(
                    pendulum_link(mass, length),
                    Vec3::zeros(),
                    Vec3::zeros(),
                    Vec3::z(),
                    &context,
                )
                .expect("link");
            link.rotate_around_axis(std::f64::consts::FRAC_PI_2);
        }

        prepare(&mut tree, &context);
        let mut solver = FeatherstoneSolver::new();
        let qdd = solver.forward_dynamics(&tree, &context);

        let expected = -(mass * GRAVITY * length / 2.0) / (mass * length * length / 3.0);
        assert_relative_eq!(qdd[0], expected, epsilon = 1e-9);
    }

    #[test]
    fn double_pendulum_hangs_still() {
        let context = ctx();
        let mut tree = base();
        {
            let link1 = tree
                .link_revolute(
                    pendulum_link(1.0, 1.0),
                    Vec3::zeros(),
                    Vec3::zeros(),
                    Vec3::z(),
                    &context,
                )
                .expect("link1");
            link1
                .link_revolute(
                    pendulum_link(1.0, 1.0),
                    Vec3::new(0.0, -1.0, 0.0),
                    Vec3::zeros(),
                    Vec3::z(),
                    &context,
                )
                .expect("link2");
        }

        prepare(&mut tree, &context);
        let mut solver = FeatherstoneSolver::new();
        let qdd = solver.forward_dynamics(&tree, &context);
        assert!(qdd[0].abs() < 1e-10, "qdd[0] = {}", qdd[0]);
        assert!(qdd[1].abs() < 1e-10, "qdd[1] = {}", qdd[1]);
    }

    #[test]
    fn applied_joint_torque_accelerates_the_joint() {
        // No gravity; a pure joint torque gives qdd = τ / I_pivot.
        let context = SimContext::new().with_gravity(Vec3::zeros());
        let mut tree = base();
        {
            let link = tree
                .link_revolute(
                    pendulum_link(1.0, 1.0),
                    Vec3::zeros(),
                    Vec3::zeros(),
                    Vec3::z(),
                    &context,
                )
                .expect("link");
            link.joint_mut().expect("jointed").applied = 0.5;
        }

        prepare(&mut tree, &context);
        let mut solver = FeatherstoneSolver::new();
        let qdd = solver.forward_dynamics(&tree, &context);
        assert_relative_eq!(qdd[0], 0.5 / (1.0 / 3.0), epsilon = 1e-9);
    }

    #[test]
    fn external_wrench_drives_the_chain() {
        // Push the tip of a hanging link sideways: positive torque about z.
        let context = SimContext::new().with_gravity(Vec3::zeros());
        let mut tree = base();
        tree.link_revolute(
            pendulum_link(1.0, 1.0),
            Vec3::zeros(),
            Vec3::zeros(),
            Vec3::z(),
            &context,
        )
        .expect("link");

        // Force +X applied with a wrench torque about the link origin at
        // the tip (0,-1,0): τ = r × F = (0,-1,0)×(1,0,0) = (0,0,1).
        tree.children_mut()[0]
            .apply_given_force(SpatialVec::new(Vec3::z(), Vec3::x()));

        prepare(&mut tree, &context);
        let mut solver = FeatherstoneSolver::new();
        let qdd = solver.forward_dynamics(&tree, &context);
        // Generalized force = S · f = 1 about z; qdd = 1 / (1/3).
        assert_relative_eq!(qdd[0], 3.0, epsilon = 1e-9);
    }
}
