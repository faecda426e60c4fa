//! Errors reported during tree construction.
//!
//! Numerical trouble inside the simulation loop (NaN propagation,
//! degenerate configurations) is deliberately *not* represented here; it
//! flows silently through the state vector, with `debug_assert!` checks
//! in debug builds only.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("revolute joint axis is degenerate (norm {0:.3e})")]
    DegenerateAxis(f64),

    #[error("joint offsets must be finite")]
    NonFiniteOffset,
}

pub type Result<T> = std::result::Result<T, TreeError>;
