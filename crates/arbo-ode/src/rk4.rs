//! Classic 4th-order Runge-Kutta stepper.

use crate::{DerivFn, OdeSolver, reserve};

/// The reference integrator: one step of the classic RK4 scheme,
/// elementwise over the flat state vector.
///
/// ```text
/// h  = t1 - t0
/// k1 = h * f(t0,       y0)
/// k2 = h * f(t0 + h/2, y0 + k1/2)
/// k3 = h * f(t0 + h/2, y0 + k2/2)
/// k4 = h * f(t0 + h,   y0 + k3)
/// y1 = y0 + (k1 + 2 k2 + 2 k3 + k4) / 6
/// ```
///
/// Local truncation error O(h⁵), global error O(h⁴).
#[derive(Debug, Default)]
pub struct RungeKutta4 {
    /// Stage derivative output.
    dy: Vec<f64>,
    /// Intermediate state fed to the derivative function.
    yt: Vec<f64>,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
}

impl RungeKutta4 {
    pub fn new() -> Self {
        Self::default()
    }

    fn grow(&mut self, len: usize) {
        reserve(&mut self.dy, len);
        reserve(&mut self.yt, len);
        reserve(&mut self.k1, len);
        reserve(&mut self.k2, len);
        reserve(&mut self.k3, len);
        reserve(&mut self.k4, len);
    }
}

impl OdeSolver for RungeKutta4 {
    fn calc_step(&mut self, t0: f64, t1: f64, y0: &[f64], y1: &mut [f64], deriv: &mut DerivFn) {
        let n = y0.len();
        debug_assert_eq!(n, y1.len(), "state and output lengths must match");
        if n == 0 {
            return;
        }
        self.grow(n);

        let h = t1 - t0;
        let half = 0.5 * h;

        // Stage 1: slope at the start point.
        deriv(t0, y0, &mut self.dy[..n]);
        for i in 0..n {
            self.k1[i] = h * self.dy[i];
            self.yt[i] = y0[i] + 0.5 * self.k1[i];
        }

        // Stage 2: slope at the midpoint using k1.
        deriv(t0 + half, &self.yt[..n], &mut self.dy[..n]);
        for i in 0..n {
            self.k2[i] = h * self.dy[i];
            self.yt[i] = y0[i] + 0.5 * self.k2[i];
        }

        // Stage 3: slope at the midpoint using k2.
        deriv(t0 + half, &self.yt[..n], &mut self.dy[..n]);
        for i in 0..n {
            self.k3[i] = h * self.dy[i];
            self.yt[i] = y0[i] + self.k3[i];
        }

        // Stage 4: slope at the end point.
        deriv(t1, &self.yt[..n], &mut self.dy[..n]);
        for i in 0..n {
            self.k4[i] = h * self.dy[i];
            y1[i] = y0[i]
                + (self.k1[i] + 2.0 * self.k2[i] + 2.0 * self.k3[i] + self.k4[i]) / 6.0;
        }
    }

    fn scratch_len(&self) -> usize {
        self.dy.len()
    }
}
