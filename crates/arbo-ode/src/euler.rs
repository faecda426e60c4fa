//! Explicit (forward) Euler stepper.

use crate::{DerivFn, OdeSolver, reserve};

/// First-order reference stepper: `y1 = y0 + h * f(t0, y0)`.
///
/// Cheap baseline for debugging and for stiff-free systems where accuracy
/// does not matter; prefer [`crate::RungeKutta4`] for anything simulated
/// over more than a handful of steps.
#[derive(Debug, Default)]
pub struct ExplicitEuler {
    dy: Vec<f64>,
}

impl ExplicitEuler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OdeSolver for ExplicitEuler {
    fn calc_step(&mut self, t0: f64, t1: f64, y0: &[f64], y1: &mut [f64], deriv: &mut DerivFn) {
        let n = y0.len();
        debug_assert_eq!(n, y1.len(), "state and output lengths must match");
        if n == 0 {
            return;
        }
        reserve(&mut self.dy, n);

        let h = t1 - t0;
        deriv(t0, y0, &mut self.dy[..n]);
        for i in 0..n {
            y1[i] = y0[i] + h * self.dy[i];
        }
    }

    fn scratch_len(&self) -> usize {
        self.dy.len()
    }
}
