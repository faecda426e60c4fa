//! Explicit simulation configuration.

use arbo_math::{GRAVITY, Vec3};

/// Configuration threaded through tree construction and force passes.
///
/// `joint_friction` is the default Coulomb coefficient a joint picks up
/// when it is created; individual joints may override it afterwards.
/// Keeping this on a context value instead of process-wide state means
/// two trees built with different contexts never interfere.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    /// Gravity vector in world coordinates.
    pub gravity: Vec3,
    /// Default Coulomb friction coefficient for newly created joints.
    pub joint_friction: f64,
}

impl SimContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_joint_friction(mut self, friction: f64) -> Self {
        self.joint_friction = friction;
        self
    }
}

impl Default for SimContext {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -GRAVITY),
            joint_friction: 0.0,
        }
    }
}
