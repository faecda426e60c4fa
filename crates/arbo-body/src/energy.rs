//! Mechanical energy accounting, mostly for conservation regression
//! tests.

use crate::entity::PhysicalEntity;
use crate::tree::ArticulatedBody;
use crate::SimContext;

/// Total kinetic energy of the tree: ½ Σ vᵀ I v over every link.
///
/// Requires a fresh [`ArticulatedBody::compute_link_velocities`] pass.
pub fn kinetic_energy(tree: &ArticulatedBody) -> f64 {
    let mut ke = 0.0;
    tree.for_each_link(&mut |node| {
        let v = node.handle().velocity();
        ke += 0.5 * v.dot(&node.handle().inertia().to_matrix().mul_vec(&v));
    });
    ke
}

/// Total gravitational potential energy: −Σ m g·com_world.
///
/// Requires fresh world frames ([`ArticulatedBody::update_links`]).
pub fn potential_energy(tree: &ArticulatedBody, ctx: &SimContext) -> f64 {
    let mut pe = 0.0;
    tree.for_each_link(&mut |node| {
        let inertia = node.handle().inertia();
        let com_world = node.world_frame().point_to_outer(&inertia.com);
        pe -= inertia.mass * ctx.gravity.dot(&com_world);
    });
    pe
}

/// Kinetic plus potential energy.
pub fn total_energy(tree: &ArticulatedBody, ctx: &SimContext) -> f64 {
    kinetic_energy(tree) + potential_energy(tree, ctx)
}
