//! Three-link chain demo — chaotic swing with an IK epilogue.
//!
//! Simulates a triple pendulum released from a bent pose, then detaches
//! dynamics, installs the IK solver, and drives the tip to a target.

use arbo::{
    ArticulatedBody, RigidBody, SimContext, Simulator,
    arbo_math::{GRAVITY, Mat3, SpatialInertia, Vec3},
    energy::total_energy,
};

fn rod(name: &str, mass: f64, length: f64) -> RigidBody {
    let i = mass * length * length / 12.0;
    RigidBody::new(
        name,
        SpatialInertia::new(
            mass,
            Vec3::new(0.0, -length / 2.0, 0.0),
            Mat3::from_diagonal(&Vec3::new(i, 0.0, i)),
        ),
    )
}

fn main() {
    env_logger::init();

    let ctx = SimContext::new()
        .with_gravity(Vec3::new(0.0, -GRAVITY, 0.0))
        .with_joint_friction(0.01);

    let mut tree = ArticulatedBody::new(RigidBody::new(
        "base",
        SpatialInertia::point_mass(0.0, Vec3::zeros()),
    ));
    tree.make_grounded();
    {
        let upper = tree
            .link_revolute(
                rod("upper", 1.0, 1.0),
                Vec3::zeros(),
                Vec3::zeros(),
                Vec3::z(),
                &ctx,
            )
            .expect("attach upper");
        let middle = upper
            .link_revolute(
                rod("middle", 1.0, 1.0),
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::zeros(),
                Vec3::z(),
                &ctx,
            )
            .expect("attach middle");
        middle
            .link_revolute(
                rod("lower", 1.0, 1.0),
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::zeros(),
                Vec3::z(),
                &ctx,
            )
            .expect("attach lower");
    }
    tree.install_featherstone_solver();

    // Bend the chain and let it go.
    tree.nth_link_mut(1).expect("upper").rotate_around_axis(1.2);
    tree.nth_link_mut(2).expect("middle").rotate_around_axis(-0.6);
    tree.nth_link_mut(3).expect("lower").rotate_around_axis(0.3);
    tree.update_links();
    tree.compute_link_velocities();

    let e0 = total_energy(&tree, &ctx);
    println!("Triple chain: {} links, E0 = {e0:.4} J", tree.link_count() - 1);
    println!("\ntime(s)    q1         q2         q3         tip y      Total E");
    println!("─────────────────────────────────────────────────────────────────");

    let dt = 0.001;
    let mut sim = Simulator::rk4();
    for step in 0..5000 {
        sim.step(&mut tree, &ctx, dt);
        if step % 500 == 0 {
            let qs: Vec<f64> = (1..=3)
                .map(|i| tree.nth_link(i).and_then(|l| l.joint()).map_or(0.0, |j| j.q))
                .collect();
            let tip = tree.nth_link(3).expect("lower").world_frame().pos;
            println!(
                "{:8.3}  {:9.5}  {:9.5}  {:9.5}  {:9.5}  {:9.6}",
                sim.time(),
                qs[0],
                qs[1],
                qs[2],
                tip.y,
                total_energy(&tree, &ctx),
            );
        }
    }

    // IK epilogue: park the tip at a reachable target.
    let goal = Vec3::new(1.2, -1.2, 0.0);
    tree.install_ik_solver().set_goal(goal);
    let residual = tree.run_ik().expect("IK solver installed");
    tree.update_links();
    let tip = tree.nth_link(3).expect("lower").world_frame().pos;
    println!(
        "\nIK to [{:.2}, {:.2}, {:.2}]: tip = [{:.4}, {:.4}, {:.4}], residual = {residual:.2e}",
        goal.x, goal.y, goal.z, tip.x, tip.y, tip.z
    );
}
