//! Articulated rigid-body trees.
//!
//! An [`ArticulatedBody`] is a tree of rigid links connected by revolute
//! joints: the root wraps a rigid-body handle, children hang off joints
//! with explicit inboard/outboard offsets. The tree owns its children,
//! marshals generalized state to and from flat vectors through an
//! explicit cursor, propagates kinematics root-first, and runs whichever
//! solver (Featherstone forward dynamics or CCD inverse kinematics) is
//! installed on the root.

pub mod context;
pub mod energy;
pub mod entity;
pub mod error;
pub mod featherstone;
pub mod forces;
pub mod ik;
pub mod joint;
pub mod kinematics;
pub mod marshal;
pub mod tree;

pub use context::SimContext;
pub use entity::{FREE_DELTA_STATE_SIZE, FREE_STATE_SIZE, PhysicalEntity, RigidBody};
pub use error::{Result, TreeError};
pub use featherstone::FeatherstoneSolver;
pub use ik::IkSolver;
pub use joint::Joint;
pub use tree::{ArticulatedBody, NODE_STATE_SIZE, SolverSlot};

pub use arbo_math::{Frame, SpatialInertia, SpatialVec};
