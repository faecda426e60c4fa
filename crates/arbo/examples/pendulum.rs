//! Single pendulum demo — prints energy over time and measures the period.

use arbo::{
    ArticulatedBody, RigidBody, SimContext, Simulator,
    arbo_math::{GRAVITY, Mat3, SpatialInertia, Vec3},
    energy::{kinetic_energy, potential_energy, total_energy},
};

fn main() {
    env_logger::init();

    let length = 1.0;
    let mass = 1.0;

    // Revolute about Z, gravity along −Y, rod hangs in −Y at q = 0.
    // CoM at [0, −L/2, 0]; rod inertia about the CoM: I_xx = I_zz = mL²/12.
    let ctx = SimContext::new().with_gravity(Vec3::new(0.0, -GRAVITY, 0.0));
    let mut tree = ArticulatedBody::new(RigidBody::new(
        "base",
        SpatialInertia::point_mass(0.0, Vec3::zeros()),
    ));
    tree.make_grounded();
    tree.link_revolute(
        RigidBody::new(
            "pendulum",
            SpatialInertia::new(
                mass,
                Vec3::new(0.0, -length / 2.0, 0.0),
                Mat3::from_diagonal(&Vec3::new(
                    mass * length * length / 12.0,
                    0.0,
                    mass * length * length / 12.0,
                )),
            ),
        ),
        Vec3::zeros(),
        Vec3::zeros(),
        Vec3::z(),
        &ctx,
    )
    .expect("failed to attach pendulum link");
    tree.install_featherstone_solver();

    // Start at a small angle for the simple-harmonic approximation.
    tree.nth_link_mut(1)
        .expect("pendulum link")
        .rotate_around_axis(0.1);
    tree.update_links();
    tree.compute_link_velocities();

    // Expected period for a compound pendulum: T = 2π√(I/(m g d)),
    // I = mL²/3 about the pivot, d = L/2 from pivot to CoM.
    let i_pivot = mass * length * length / 3.0;
    let d = length / 2.0;
    let expected_period = 2.0 * std::f64::consts::PI * (i_pivot / (mass * GRAVITY * d)).sqrt();
    println!("Expected period: {expected_period:.4} s");

    let e0 = total_energy(&tree, &ctx);
    println!("Initial energy:  {e0:.6} J\n");

    let dt = 0.001;
    let mut sim = Simulator::rk4();
    let mut prev_q = 0.1;
    let mut zero_crossings: Vec<f64> = Vec::new();

    println!("time(s)    q(rad)     qd(rad/s)  KE         PE         Total E");
    println!("─────────────────────────────────────────────────────────────────");

    for step in 0..20_000 {
        sim.step(&mut tree, &ctx, dt);
        let joint = tree
            .nth_link(1)
            .expect("pendulum link")
            .joint()
            .expect("jointed link");
        let (q, qd) = (joint.q, joint.qd);

        if prev_q > 0.0 && q <= 0.0 {
            let frac = prev_q / (prev_q - q);
            zero_crossings.push((step as f64 + frac) * dt);
        }
        prev_q = q;

        if step % 2000 == 0 {
            println!(
                "{:8.3}  {:9.5}  {:9.5}  {:9.6}  {:9.6}  {:9.6}",
                sim.time(),
                q,
                qd,
                kinetic_energy(&tree),
                potential_energy(&tree, &ctx),
                total_energy(&tree, &ctx),
            );
        }
    }

    if zero_crossings.len() >= 2 {
        let n = zero_crossings.len() - 1;
        let measured = (zero_crossings[n] - zero_crossings[0]) / n as f64;
        println!("\nMeasured period: {measured:.4} s (expected {expected_period:.4} s)");
    }

    let drift = (total_energy(&tree, &ctx) - e0).abs();
    println!("Energy drift after {:.1} s: {drift:.2e} J", sim.time());
}
