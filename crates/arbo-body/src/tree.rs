//! The articulated-body tree.
//!
//! Each node owns one rigid-body handle, an optional inboard joint
//! (absent at the root), and its outboard children. Topology is a strict
//! tree: parents own children outright, so cycles and self-links are
//! unrepresentable.

use crate::entity::{PhysicalEntity, RigidBody};
use crate::error::Result;
use crate::featherstone::FeatherstoneSolver;
use crate::ik::IkSolver;
use crate::joint::Joint;
use crate::{SimContext, SpatialVec};
use arbo_math::{DVec, Frame, Vec3};
use log::debug;

/// State the node itself contributes beyond its joint and handle: none.
/// Generalized state lives in the joint (angle/rate) or, for a floating
/// root, in the handle; the node never duplicates it.
pub const NODE_STATE_SIZE: usize = 0;

/// The single active solver attached to a tree root.
///
/// Installing a solver replaces whatever was installed before, so a tree
/// can never have a forward-dynamics and an IK solver active at once.
#[derive(Debug, Default)]
pub enum SolverSlot {
    #[default]
    None,
    Featherstone(FeatherstoneSolver),
    Ik(IkSolver),
}

/// One link of an articulated body, owning its subtree.
#[derive(Debug)]
pub struct ArticulatedBody {
    pub(crate) handle: RigidBody,
    pub(crate) inboard: Option<Joint>,
    pub(crate) children: Vec<ArticulatedBody>,
    pub(crate) grounded: bool,
    /// Cached transform from the inboard link's frame to this link's
    /// frame. Derived data: recomputed by every kinematic pass.
    pub(crate) rel_frame: Frame,
    solver: SolverSlot,
}

impl ArticulatedBody {
    /// Build a tree root around a rigid-body handle. The root starts
    /// ungrounded (floating).
    pub fn new(handle: RigidBody) -> Self {
        Self {
            handle,
            inboard: None,
            children: Vec::new(),
            grounded: false,
            rel_frame: Frame::identity(),
            solver: SolverSlot::None,
        }
    }

    /// Attach `child` to this link through a new revolute joint.
    ///
    /// `inboard_offset` runs from this link's origin to the joint (this
    /// link's frame); `outboard_offset` runs from the child's origin to
    /// the joint (child frame); `axis` is the rotation axis in the
    /// child's frame (see [`Joint`] for the convention). Ownership of the
    /// child passes to this subtree. Returns the new node for chaining.
    pub fn link_revolute(
        &mut self,
        child: RigidBody,
        inboard_offset: Vec3,
        outboard_offset: Vec3,
        axis: Vec3,
        ctx: &SimContext,
    ) -> Result<&mut ArticulatedBody> {
        let joint = Joint::revolute(inboard_offset, outboard_offset, axis, ctx)?;
        let mut node = ArticulatedBody::new(child);
        node.inboard = Some(joint);
        self.children.push(node);
        Ok(self.children.last_mut().expect("just pushed"))
    }

    /// Rotate this link about its inboard joint axis by `theta` radians.
    ///
    /// A direct pose mutation for posing and IK, not a dynamical step.
    /// The root has no inboard joint and is left untouched.
    pub fn rotate_around_axis(&mut self, theta: f64) {
        match &mut self.inboard {
            Some(joint) => joint.q += theta,
            None => debug_assert!(false, "rotate_around_axis called on a tree root"),
        }
    }

    /// Fix the root rigidly to the world frame: no free-motion state.
    pub fn make_grounded(&mut self) {
        self.grounded = true;
    }

    /// Let the root float freely again.
    pub fn make_ungrounded(&mut self) {
        self.grounded = false;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Immutable access to this link's rigid-body handle.
    pub fn handle(&self) -> &RigidBody {
        &self.handle
    }

    /// Mutable access to this link's rigid-body handle.
    pub fn handle_mut(&mut self) -> &mut RigidBody {
        &mut self.handle
    }

    /// This link's inboard joint, if any.
    pub fn joint(&self) -> Option<&Joint> {
        self.inboard.as_ref()
    }

    pub fn joint_mut(&mut self) -> Option<&mut Joint> {
        self.inboard.as_mut()
    }

    /// Outboard children in traversal order.
    pub fn children(&self) -> &[ArticulatedBody] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [ArticulatedBody] {
        &mut self.children
    }

    /// This link's world transform, for the scene-graph collaborator.
    /// Valid after [`ArticulatedBody::update_links`].
    pub fn world_frame(&self) -> &Frame {
        self.handle.frame()
    }

    /// Cached transform from the inboard link's frame to this frame.
    pub fn relative_frame(&self) -> &Frame {
        &self.rel_frame
    }

    /// Number of links in this subtree, including this one.
    pub fn link_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.link_count()).sum::<usize>()
    }

    /// Visit every link in pre-order (this node first, then each child
    /// subtree in child-list order).
    pub fn for_each_link(&self, f: &mut impl FnMut(&ArticulatedBody)) {
        f(self);
        for child in &self.children {
            child.for_each_link(f);
        }
    }

    /// The link at pre-order index `idx` (0 is this node).
    pub fn nth_link(&self, idx: usize) -> Option<&ArticulatedBody> {
        if idx == 0 {
            return Some(self);
        }
        let mut rest = idx - 1;
        for child in &self.children {
            let n = child.link_count();
            if rest < n {
                return child.nth_link(rest);
            }
            rest -= n;
        }
        None
    }

    pub fn nth_link_mut(&mut self, idx: usize) -> Option<&mut ArticulatedBody> {
        if idx == 0 {
            return Some(self);
        }
        let mut rest = idx - 1;
        for child in &mut self.children {
            let n = child.link_count();
            if rest < n {
                return child.nth_link_mut(rest);
            }
            rest -= n;
        }
        None
    }

    /// Install a Featherstone forward-dynamics solver on this root,
    /// replacing any previously installed solver. Returns the solver for
    /// configuration; it operates on this tree when
    /// [`ArticulatedBody::run_forward_dynamics`] is called.
    pub fn install_featherstone_solver(&mut self) -> &mut FeatherstoneSolver {
        debug!("installing Featherstone solver on '{}'", self.handle.name);
        self.solver = SolverSlot::Featherstone(FeatherstoneSolver::new());
        match &mut self.solver {
            SolverSlot::Featherstone(fs) => fs,
            _ => unreachable!(),
        }
    }

    /// Install an inverse-kinematics solver on this root, replacing any
    /// previously installed solver.
    pub fn install_ik_solver(&mut self) -> &mut IkSolver {
        debug!("installing IK solver on '{}'", self.handle.name);
        self.solver = SolverSlot::Ik(IkSolver::new());
        match &mut self.solver {
            SolverSlot::Ik(ik) => ik,
            _ => unreachable!(),
        }
    }

    /// The currently installed solver.
    pub fn solver(&self) -> &SolverSlot {
        &self.solver
    }

    /// Run the installed forward-dynamics solver against the current
    /// link velocities and accumulated forces. Returns joint
    /// accelerations in pre-order joint order, or `None` when no
    /// forward-dynamics solver is installed.
    ///
    /// Requires [`ArticulatedBody::compute_link_velocities`] and
    /// [`ArticulatedBody::apply_forces`] to have run for the current
    /// configuration.
    pub fn run_forward_dynamics(&mut self, ctx: &SimContext) -> Option<DVec> {
        let mut slot = std::mem::take(&mut self.solver);
        let out = match &mut slot {
            SolverSlot::Featherstone(fs) => Some(fs.forward_dynamics(self, ctx)),
            _ => None,
        };
        self.solver = slot;
        out
    }

    /// Run the installed IK solver toward its goal. Returns the final
    /// end-effector residual, or `None` when no IK solver is installed.
    pub fn run_ik(&mut self) -> Option<f64> {
        let mut slot = std::mem::take(&mut self.solver);
        let out = match &mut slot {
            SolverSlot::Ik(ik) => Some(ik.solve(self)),
            _ => None,
        };
        self.solver = slot;
        out
    }

    /// Add an externally specified wrench (this link's frame) to the
    /// force accumulator. Persists until cleared on the handle.
    pub fn apply_given_force(&mut self, wrench: SpatialVec) {
        self.handle.apply_wrench(wrench);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbo_math::SpatialInertia;

    fn body(name: &str) -> RigidBody {
        RigidBody::new(name, SpatialInertia::rod(1.0, 1.0))
    }

    fn ctx() -> SimContext {
        SimContext::default()
    }

    #[test]
    fn linking_builds_a_tree_in_child_order() {
        let mut root = ArticulatedBody::new(body("root"));
        {
            let a = root
                .link_revolute(body("a"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
                .expect("link a");
            a.link_revolute(body("a1"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
                .expect("link a1");
        }
        root.link_revolute(body("b"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
            .expect("link b");

        assert_eq!(root.link_count(), 4);
        let mut names = Vec::new();
        root.for_each_link(&mut |n| names.push(n.handle().name.clone()));
        assert_eq!(names, ["root", "a", "a1", "b"]);
    }

    #[test]
    fn nth_link_matches_preorder() {
        let mut root = ArticulatedBody::new(body("root"));
        let a = root
            .link_revolute(body("a"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
            .expect("link");
        a.link_revolute(body("a1"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
            .expect("link");
        root.link_revolute(body("b"), Vec3::zeros(), Vec3::zeros(), Vec3::z(), &ctx())
            .expect("link");

        assert_eq!(root.nth_link(0).map(|n| n.handle().name.as_str()), Some("root"));
        assert_eq!(root.nth_link(2).map(|n| n.handle().name.as_str()), Some("a1"));
        assert_eq!(root.nth_link(3).map(|n| n.handle().name.as_str()), Some("b"));
        assert!(root.nth_link(4).is_none());
    }

    #[test]
    fn installing_a_second_solver_replaces_the_first() {
        let mut root = ArticulatedBody::new(body("root"));
        root.install_featherstone_solver();
        assert!(matches!(root.solver(), SolverSlot::Featherstone(_)));
        root.install_ik_solver();
        assert!(matches!(root.solver(), SolverSlot::Ik(_)));
    }

    #[test]
    fn grounded_flag_toggles() {
        let mut root = ArticulatedBody::new(body("root"));
        assert!(!root.is_grounded());
        root.make_grounded();
        assert!(root.is_grounded());
        root.make_ungrounded();
        assert!(!root.is_grounded());
    }
}
