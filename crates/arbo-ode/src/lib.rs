//! Fixed-step ODE integration over flat state vectors.
//!
//! The dynamics layer marshals generalized state into a plain `[f64]`
//! slice; the steppers here advance it in time through a caller-supplied
//! derivative function. Steppers own their scratch buffers, which grow on
//! demand to the largest state length seen and are never shrunk. One
//! stepper instance is meant for single-threaded, synchronous use; the
//! `&mut self` receiver makes concurrent stepping of a shared instance
//! unrepresentable.

pub mod euler;
pub mod rk4;

pub use euler::ExplicitEuler;
pub use rk4::RungeKutta4;

/// A derivative function `dydt(t, y, out)`.
///
/// Must fill every element of `out` (same length as `y`) with dy/dt at
/// time `t`. It is evaluated at intermediate states chosen by the
/// stepper and must not depend on evaluation order.
pub type DerivFn<'a> = dyn FnMut(f64, &[f64], &mut [f64]) + 'a;

/// A one-step ODE integrator.
pub trait OdeSolver {
    /// Advance `y0` from time `t0` to `t1`, writing the result to `y1`.
    ///
    /// Preconditions (unchecked in release builds, this is the hot loop):
    /// `y0.len() == y1.len()`. A zero-length state is legal and returns
    /// immediately.
    fn calc_step(&mut self, t0: f64, t1: f64, y0: &[f64], y1: &mut [f64], deriv: &mut DerivFn);

    /// Current scratch capacity in elements (largest state length seen).
    fn scratch_len(&self) -> usize;
}

/// Grow a scratch buffer to `len` elements if it is smaller.
///
/// Contents are scratch and are discarded on growth; existing capacity is
/// kept when `len` is not larger.
pub(crate) fn reserve(buf: &mut Vec<f64>, len: usize) {
    if buf.len() < len {
        buf.clear();
        buf.resize(len, 0.0);
    }
}
