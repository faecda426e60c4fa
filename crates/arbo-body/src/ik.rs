//! Inverse kinematics by cyclic coordinate descent.
//!
//! Direct pose mutation (no dynamics): each sweep walks the joints from
//! the end effector back toward the root, turning each one about its own
//! axis to swing the end effector toward the goal. Intended for serial
//! chains; on a branched tree the end effector is simply the last link
//! in pre-order, and joints off its path contribute nothing.

use crate::tree::ArticulatedBody;
use arbo_math::Vec3;

/// Cyclic-coordinate-descent IK solver attached to a tree root.
#[derive(Debug, Clone)]
pub struct IkSolver {
    /// World-space target for the end link's frame origin.
    pub goal: Vec3,
    /// Maximum full sweeps per `solve` call.
    pub max_sweeps: usize,
    /// Stop once the end effector is within this distance of the goal.
    pub tolerance: f64,
}

impl Default for IkSolver {
    fn default() -> Self {
        Self {
            goal: Vec3::zeros(),
            max_sweeps: 64,
            tolerance: 1e-6,
        }
    }
}

impl IkSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the goal pose target (world coordinates).
    pub fn set_goal(&mut self, goal: Vec3) {
        self.goal = goal;
    }

    /// Iterate toward the goal, mutating joint angles in place.
    /// Returns the final end-effector distance to the goal.
    pub fn solve(&self, tree: &mut ArticulatedBody) -> f64 {
        let n = tree.link_count();
        if n < 2 {
            return f64::INFINITY;
        }
        let end = n - 1;
        tree.update_links();

        for _ in 0..self.max_sweeps {
            if self.residual(tree, end) <= self.tolerance {
                break;
            }

            // Leaf to root: joint of link `end` first, then inward.
            for idx in (1..=end).rev() {
                let Some(delta) = self.swing_angle(tree, idx, end) else {
                    continue;
                };
                if let Some(node) = tree.nth_link_mut(idx) {
                    node.rotate_around_axis(delta);
                }
                tree.update_links();
            }
        }

        self.residual(tree, end)
    }

    fn residual(&self, tree: &ArticulatedBody, end: usize) -> f64 {
        match tree.nth_link(end) {
            Some(e) => (e.world_frame().pos - self.goal).norm(),
            None => f64::INFINITY,
        }
    }

    /// Angle that best swings the end effector toward the goal about the
    /// joint of link `idx`, projected into the joint's rotation plane.
    fn swing_angle(&self, tree: &ArticulatedBody, idx: usize, end: usize) -> Option<f64> {
        let node = tree.nth_link(idx)?;
        let joint = node.joint()?;
        let wf = node.world_frame();

        // Axis and pivot in world coordinates.
        let axis = wf.rot.transpose() * joint.axis;
        let pivot = wf.pos + wf.rot.transpose() * joint.outboard_offset;
        let effector = tree.nth_link(end)?.world_frame().pos;

        let u = effector - pivot;
        let w = self.goal - pivot;
        let u_perp = u - axis * u.dot(&axis);
        let w_perp = w - axis * w.dot(&axis);
        if u_perp.norm() < 1e-9 || w_perp.norm() < 1e-9 {
            return None;
        }

        Some(axis.dot(&u_perp.cross(&w_perp)).atan2(u_perp.dot(&w_perp)))
    }
}
