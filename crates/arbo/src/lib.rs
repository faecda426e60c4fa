//! arbo — articulated rigid-body dynamics.
//!
//! This is the umbrella crate that provides the `Simulator` fixed-step
//! driver and re-exports core types from the sub-crates: spatial algebra
//! from `arbo-math`, flat-state ODE steppers from `arbo-ode`, and the
//! articulated tree with its solvers from `arbo-body`.
//!
//! A minimal session:
//!
//! ```
//! use arbo::{ArticulatedBody, RigidBody, SimContext, Simulator, SpatialInertia, Vec3};
//!
//! let ctx = SimContext::default();
//! let mut tree = ArticulatedBody::new(RigidBody::new(
//!     "base",
//!     SpatialInertia::point_mass(0.0, Vec3::zeros()),
//! ));
//! tree.make_grounded();
//! tree.link_revolute(
//!     RigidBody::new("arm", SpatialInertia::rod(1.0, 1.0)),
//!     Vec3::zeros(),
//!     Vec3::zeros(),
//!     Vec3::z(),
//!     &ctx,
//! )?;
//! tree.install_featherstone_solver();
//!
//! let mut sim = Simulator::rk4();
//! sim.simulate(&mut tree, &ctx, 1e-3, 100);
//! # Ok::<(), arbo::TreeError>(())
//! ```

pub mod sim;

pub use sim::Simulator;

pub use arbo_body::{
    self, ArticulatedBody, FeatherstoneSolver, IkSolver, Joint, PhysicalEntity, RigidBody,
    SimContext, SolverSlot, TreeError, energy,
};
pub use arbo_math::{self, Frame, SpatialInertia, SpatialMat, SpatialVec, Vec3};
pub use arbo_ode::{self, DerivFn, ExplicitEuler, OdeSolver, RungeKutta4};
