//! Flat state-vector marshaling.
//!
//! The integrator works on a flat `[f64]` buffer. Each node contributes
//! its own reals (joint angle at a jointed link; free pose at an
//! ungrounded root; nothing at a grounded root), packed in pre-order
//! depth-first traversal, children in child-list order. Every operation
//! advances an explicit shared cursor and returns the number of reals it
//! consumed, which makes the per-node length contract testable.
//!
//! The traversal order is load-bearing: a write followed by a read of
//! the same tree must visit links identically or state is cross-assigned
//! between bodies. Do not mutate topology between a matching write/read
//! pair.

use crate::entity::PhysicalEntity;
use crate::tree::{ArticulatedBody, NODE_STATE_SIZE};

impl ArticulatedBody {
    /// Position-state reals contributed by this node alone.
    pub fn state_size(&self) -> usize {
        NODE_STATE_SIZE
            + match &self.inboard {
                Some(joint) => joint.ndof(),
                None if self.grounded => 0,
                None => self.handle.state_size(),
            }
    }

    /// Velocity-state reals contributed by this node alone.
    pub fn delta_state_size(&self) -> usize {
        NODE_STATE_SIZE
            + match &self.inboard {
                Some(joint) => joint.ndof(),
                None if self.grounded => 0,
                None => self.handle.delta_state_size(),
            }
    }

    /// Total position-state reals for this subtree.
    pub fn state_size_links(&self) -> usize {
        self.state_size() + self.children.iter().map(|c| c.state_size_links()).sum::<usize>()
    }

    /// Total velocity-state reals for this subtree.
    pub fn delta_state_size_links(&self) -> usize {
        self.delta_state_size()
            + self
                .children
                .iter()
                .map(|c| c.delta_state_size_links())
                .sum::<usize>()
    }

    /// Extract this node's own position state into the front of `out`.
    /// Returns the number of reals written.
    pub fn write_state(&self, out: &mut [f64]) -> usize {
        match &self.inboard {
            Some(joint) => {
                out[0] = joint.q;
                joint.ndof()
            }
            None if self.grounded => 0,
            None => self.handle.write_state(out),
        }
    }

    /// Apply this node's own position state from the front of `src`.
    /// Returns the number of reals consumed.
    pub fn read_state(&mut self, src: &[f64]) -> usize {
        match &mut self.inboard {
            Some(joint) => {
                joint.q = src[0];
                joint.ndof()
            }
            None if self.grounded => 0,
            None => self.handle.read_state(src),
        }
    }

    /// Extract this node's own velocity state. Returns reals written.
    pub fn write_delta_state(&self, out: &mut [f64]) -> usize {
        match &self.inboard {
            Some(joint) => {
                out[0] = joint.qd;
                joint.ndof()
            }
            None if self.grounded => 0,
            None => self.handle.write_delta_state(out),
        }
    }

    /// Apply this node's own velocity state. Returns reals consumed.
    pub fn read_delta_state(&mut self, src: &[f64]) -> usize {
        match &mut self.inboard {
            Some(joint) => {
                joint.qd = src[0];
                joint.ndof()
            }
            None if self.grounded => 0,
            None => self.handle.read_delta_state(src),
        }
    }

    /// Extract position state for the whole subtree, pre-order, through
    /// the shared `cursor`. Returns reals written by this subtree.
    pub fn write_state_links(&self, out: &mut [f64], cursor: &mut usize) -> usize {
        let start = *cursor;
        *cursor += self.write_state(&mut out[*cursor..]);
        for child in &self.children {
            child.write_state_links(out, cursor);
        }
        *cursor - start
    }

    /// Apply position state for the whole subtree, pre-order, through
    /// the shared `cursor`. Returns reals consumed by this subtree.
    pub fn read_state_links(&mut self, src: &[f64], cursor: &mut usize) -> usize {
        let start = *cursor;
        *cursor += self.read_state(&src[*cursor..]);
        for child in &mut self.children {
            child.read_state_links(src, cursor);
        }
        *cursor - start
    }

    /// Extract velocity state for the whole subtree, pre-order.
    pub fn write_delta_state_links(&self, out: &mut [f64], cursor: &mut usize) -> usize {
        let start = *cursor;
        *cursor += self.write_delta_state(&mut out[*cursor..]);
        for child in &self.children {
            child.write_delta_state_links(out, cursor);
        }
        *cursor - start
    }

    /// Apply velocity state for the whole subtree, pre-order.
    pub fn read_delta_state_links(&mut self, src: &[f64], cursor: &mut usize) -> usize {
        let start = *cursor;
        *cursor += self.read_delta_state(&src[*cursor..]);
        for child in &mut self.children {
            child.read_delta_state_links(src, cursor);
        }
        *cursor - start
    }
}
