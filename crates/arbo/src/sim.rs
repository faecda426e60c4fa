//! Fixed-step simulation driver.
//!
//! `Simulator` is the seam between the tree and the integrator: it packs
//! the tree's generalized state into a flat `[q.. | qd..]` buffer, hands
//! it to an `OdeSolver`, and evaluates the derivative by pushing each
//! candidate state back through kinematics, force accumulation, and the
//! installed forward-dynamics solver.

use arbo_body::{ArticulatedBody, SimContext};
use arbo_ode::{ExplicitEuler, OdeSolver, RungeKutta4};

/// Drives an articulated tree forward in time with a pluggable stepper.
///
/// Scratch buffers grow to the largest tree seen and are reused across
/// steps; one instance serves one tree at a time but may be pointed at
/// different trees between steps.
pub struct Simulator {
    stepper: Box<dyn OdeSolver>,
    time: f64,
    y0: Vec<f64>,
    y1: Vec<f64>,
}

impl Simulator {
    /// Classic fourth-order Runge-Kutta stepper.
    pub fn rk4() -> Self {
        Self::with_stepper(Box::new(RungeKutta4::new()))
    }

    /// Explicit Euler stepper. Cheap, drifts; use for smoke tests.
    pub fn euler() -> Self {
        Self::with_stepper(Box::new(ExplicitEuler::new()))
    }

    pub fn with_stepper(stepper: Box<dyn OdeSolver>) -> Self {
        Self {
            stepper,
            time: 0.0,
            y0: Vec::new(),
            y1: Vec::new(),
        }
    }

    /// Simulated time accumulated across `step` calls.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance the tree by one step of length `dt`.
    ///
    /// The root must be grounded: the integrated state is the joint
    /// angles and rates, one real each, packed pre-order. Each derivative
    /// evaluation re-runs kinematics and force accumulation at the
    /// candidate state, so intermediate stepper stages see consistent
    /// gravity and velocity-dependent joint forces. Without an installed
    /// forward-dynamics solver accelerations are zero and the step is
    /// purely kinematic.
    pub fn step(&mut self, tree: &mut ArticulatedBody, ctx: &SimContext, dt: f64) {
        debug_assert!(tree.is_grounded(), "driver integrates jointed state only");
        let nq = tree.state_size_links();
        debug_assert_eq!(nq, tree.delta_state_size_links());
        let n = 2 * nq;
        if self.y0.len() < n {
            self.y0.resize(n, 0.0);
            self.y1.resize(n, 0.0);
        }
        let Self {
            stepper,
            time,
            y0,
            y1,
        } = self;

        {
            let (q, qd) = y0[..n].split_at_mut(nq);
            let mut cursor = 0;
            tree.write_state_links(q, &mut cursor);
            let mut cursor = 0;
            tree.write_delta_state_links(qd, &mut cursor);
        }

        let t0 = *time;
        let mut deriv = |t: f64, y: &[f64], out: &mut [f64]| {
            let (q, qd) = y.split_at(nq);
            let mut cursor = 0;
            tree.read_state_links(q, &mut cursor);
            let mut cursor = 0;
            tree.read_delta_state_links(qd, &mut cursor);

            tree.update_links();
            tree.compute_link_velocities();
            tree.apply_forces(t, ctx);

            let (dq, dqd) = out.split_at_mut(nq);
            dq.copy_from_slice(qd);
            match tree.run_forward_dynamics(ctx) {
                Some(qdd) => {
                    for (slot, a) in dqd.iter_mut().zip(qdd.iter()) {
                        *slot = *a;
                    }
                }
                None => dqd.fill(0.0),
            }
        };
        stepper.calc_step(t0, t0 + dt, &y0[..n], &mut y1[..n], &mut deriv);
        *time = t0 + dt;

        // Land the tree exactly on the accepted state; the last derivative
        // evaluation left it at an intermediate stage.
        let (q, qd) = y1[..n].split_at(nq);
        let mut cursor = 0;
        tree.read_state_links(q, &mut cursor);
        let mut cursor = 0;
        tree.read_delta_state_links(qd, &mut cursor);
        tree.update_links();
        tree.compute_link_velocities();
    }

    /// Take `steps` equal steps of length `dt`.
    pub fn simulate(&mut self, tree: &mut ArticulatedBody, ctx: &SimContext, dt: f64, steps: usize) {
        log::trace!("advancing {steps} steps of {dt} s from t = {}", self.time);
        for _ in 0..steps {
            self.step(tree, ctx, dt);
        }
    }
}
