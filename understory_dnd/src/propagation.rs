// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation order for standards dispatch.
//!
//! ## Overview
//!
//! Reconstructs the root→target path of a node through a [`ParentLookup`] and
//! emits the capture → target → bubble sequence a host walks when it runs
//! listeners.
//!
//! - Capture visits ancestors from the root down, excluding the target.
//! - Target visits the target once.
//! - Bubble visits ancestors from the parent up, and only when the event bubbles.
//!
//! Legacy dispatch has no capture phase; see [`bubble_chain`].

use alloc::vec;
use alloc::vec::Vec;

/// Phases of event propagation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root-to-parent traversal.
    Capture,
    /// Target node.
    Target,
    /// Parent-to-root traversal.
    Bubble,
}

/// Look up the parent of a node to reconstruct a root→target path.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A parent provider where every node is a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// A single propagation step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node whose listeners run in this step.
    pub node: K,
}

/// Root→target path, target inclusive.
///
/// The caller ensures ancestry is acyclic.
pub fn ancestry<K: Copy>(target: K, parents: &impl ParentLookup<K>) -> Vec<K> {
    let mut out = Vec::new();
    let mut cur = target;
    loop {
        out.push(cur);
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Capture → target → bubble steps for `target`.
///
/// ```
/// use understory_dnd::propagation::{propagation_path, ParentLookup, Phase};
///
/// struct Chain;
/// impl ParentLookup<u32> for Chain {
///     fn parent_of(&self, n: &u32) -> Option<u32> { n.checked_sub(1) }
/// }
///
/// let steps: Vec<_> = propagation_path(2_u32, &Chain, true)
///     .into_iter()
///     .map(|s| (s.phase, s.node))
///     .collect();
/// assert_eq!(steps, [
///     (Phase::Capture, 0),
///     (Phase::Capture, 1),
///     (Phase::Target, 2),
///     (Phase::Bubble, 1),
///     (Phase::Bubble, 0),
/// ]);
/// ```
pub fn propagation_path<K: Copy>(
    target: K,
    parents: &impl ParentLookup<K>,
    bubbles: bool,
) -> Vec<Step<K>> {
    let path = ancestry(target, parents);
    // `ancestry` always ends with the target.
    let ancestors = &path[..path.len() - 1];
    let mut out = Vec::with_capacity(path.len() * 2);
    // Capture: root→parent
    for &node in ancestors {
        out.push(Step {
            phase: Phase::Capture,
            node,
        });
    }
    out.push(Step {
        phase: Phase::Target,
        node: target,
    });
    // Bubble: parent→root
    if bubbles {
        for &node in ancestors.iter().rev() {
            out.push(Step {
                phase: Phase::Bubble,
                node,
            });
        }
    }
    out
}

/// Target then ancestors (when `bubbles`), as walked by legacy named triggers.
pub fn bubble_chain<K: Copy>(
    target: K,
    parents: &impl ParentLookup<K>,
    bubbles: bool,
) -> Vec<Step<K>> {
    let mut out = vec![Step {
        phase: Phase::Target,
        node: target,
    }];
    if bubbles {
        let mut cur = target;
        while let Some(p) = parents.parent_of(&cur) {
            out.push(Step {
                phase: Phase::Bubble,
                node: p,
            });
            cur = p;
        }
    }
    out
}
