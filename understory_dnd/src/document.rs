// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory document host.
//!
//! ## Overview
//!
//! [`Document`] is a minimal element tree with listener registration for both
//! dispatch mechanisms. It lets drag sequences run deterministically without a
//! live page:
//! - [`Document::add_event_listener`] registers standards listeners, walked in
//!   capture → target → bubble order (see [`propagation`](crate::propagation)).
//! - [`Document::set_handler`] registers legacy named handlers such as
//!   `"ondrop"`, walked target → ancestors when the event bubbles.
//! - [`Document::element`] and [`Document::legacy_element`] hand out
//!   [`Element`]s bound to one mechanism or the other.
//!
//! ## Listener order
//!
//! At the target, capture listeners run before non-capture ones; otherwise
//! registration order is kept. [`SyntheticEvent::stop_propagation`] ends
//! delivery once the current node's listeners have run.
//!
//! ## Re-entrancy
//!
//! Listeners are snapshotted per node before they run, so a listener may
//! dispatch further events into the same document. A listener that is already
//! running is skipped rather than re-entered.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use log::{debug, trace};

use crate::dispatch::{DispatchEvent, Element, FireEvent};
use crate::event::SyntheticEvent;
use crate::propagation::{ParentLookup, Phase, bubble_chain, propagation_path};

/// Handle of an element in a [`Document`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a registered standards listener.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// Where a listener is being run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Delivery {
    /// Propagation phase.
    pub phase: Phase,
    /// Element the event was dispatched to.
    pub target: NodeId,
    /// Element whose listener is running.
    pub current_target: NodeId,
}

type Listener<V> = Rc<RefCell<dyn FnMut(&mut SyntheticEvent<V>, &Delivery)>>;

struct Registration<V> {
    id: ListenerId,
    event_type: String,
    capture: bool,
    listener: Listener<V>,
}

struct Node<V> {
    parent: Option<NodeId>,
    listeners: Vec<Registration<V>>,
    handlers: BTreeMap<String, Listener<V>>,
}

/// A tree of elements with registered listeners.
pub struct Document<V> {
    nodes: Vec<Node<V>>,
    next_listener: u64,
}

impl<V> Default for Document<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> core::fmt::Debug for Document<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let listeners: usize = self.nodes.iter().map(|n| n.listeners.len()).sum();
        let handlers: usize = self.nodes.iter().map(|n| n.handlers.len()).sum();
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("listeners", &listeners)
            .field("handlers", &handlers)
            .finish_non_exhaustive()
    }
}

impl<V> Document<V> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_listener: 0,
        }
    }

    /// Add an element, optionally as a child of `parent`.
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this document.
    pub fn create_element(&mut self, parent: Option<NodeId>) -> NodeId {
        if let Some(p) = parent {
            assert!(self.contains(p), "parent {p:?} is not in this document");
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            parent,
            listeners: Vec::new(),
            handlers: BTreeMap::new(),
        });
        id
    }

    /// Whether `node` belongs to this document.
    pub fn contains(&self, node: NodeId) -> bool {
        node.idx() < self.nodes.len()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Register a standards listener for `event_type` on `node`.
    ///
    /// Capture listeners run on the way down; others at the target and on the
    /// way up.
    ///
    /// # Panics
    ///
    /// If `node` does not belong to this document.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        capture: bool,
        listener: impl FnMut(&mut SyntheticEvent<V>, &Delivery) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let listener: Listener<V> = Rc::new(RefCell::new(listener));
        self.node_mut(node).listeners.push(Registration {
            id,
            event_type: event_type.to_string(),
            capture,
            listener,
        });
        trace!("added listener {id:?} for `{event_type}` on {node:?}");
        id
    }

    /// Remove a standards listener. Returns false if it was not registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(n) = self.nodes.get_mut(node.idx()) else {
            return false;
        };
        let Some(pos) = n.listeners.iter().position(|r| r.id == id) else {
            return false;
        };
        n.listeners.remove(pos);
        true
    }

    /// Install the legacy handler `name` (e.g. `"ondrop"`) on `node`, replacing
    /// any previous one.
    ///
    /// # Panics
    ///
    /// If `node` does not belong to this document.
    pub fn set_handler(
        &mut self,
        node: NodeId,
        name: &str,
        handler: impl FnMut(&mut SyntheticEvent<V>, &Delivery) + 'static,
    ) {
        let handler: Listener<V> = Rc::new(RefCell::new(handler));
        self.node_mut(node)
            .handlers
            .insert(name.to_string(), handler);
    }

    /// Remove the legacy handler `name`. Returns false if none was set.
    pub fn clear_handler(&mut self, node: NodeId, name: &str) -> bool {
        self.nodes
            .get_mut(node.idx())
            .is_some_and(|n| n.handlers.remove(name).is_some())
    }

    /// `node` as an element using standards dispatch.
    pub fn element(&self, node: NodeId) -> Element<'_, V> {
        Element::standard(StandardNode { doc: self, node })
    }

    /// `node` as an element using the legacy named trigger.
    pub fn legacy_element(&self, node: NodeId) -> Element<'_, V> {
        Element::legacy(LegacyNode { doc: self, node })
    }

    /// Run standards listeners for `event` dispatched to `target`.
    pub fn dispatch_to(&self, target: NodeId, event: &mut SyntheticEvent<V>) {
        if !self.contains(target) {
            debug!("dispatch to unknown {target:?}; skipped");
            return;
        }
        for step in propagation_path(target, self, event.bubbles()) {
            let listeners = self.listeners_for(step.node, event.event_type(), step.phase);
            let delivery = Delivery {
                phase: step.phase,
                target,
                current_target: step.node,
            };
            for listener in &listeners {
                Self::invoke(listener, event, &delivery);
            }
            if event.propagation_stopped() {
                trace!(
                    "propagation of `{}` stopped at {:?}",
                    event.event_type(),
                    step.node
                );
                break;
            }
        }
    }

    /// Run the legacy handler `handler` for `event` on `target`, then on its
    /// ancestors when the event bubbles.
    pub fn fire_on(&self, target: NodeId, handler: &str, event: &mut SyntheticEvent<V>) {
        if !self.contains(target) {
            debug!("fire `{handler}` on unknown {target:?}; skipped");
            return;
        }
        for step in bubble_chain(target, self, event.bubbles()) {
            let Some(listener) = self.nodes[step.node.idx()]
                .handlers
                .get(handler)
                .map(Rc::clone)
            else {
                continue;
            };
            let delivery = Delivery {
                phase: step.phase,
                target,
                current_target: step.node,
            };
            Self::invoke(&listener, event, &delivery);
            if event.propagation_stopped() {
                break;
            }
        }
    }

    fn node_mut(&mut self, node: NodeId) -> &mut Node<V> {
        self.nodes
            .get_mut(node.idx())
            .expect("NodeId is not in this document")
    }

    fn listeners_for(&self, node: NodeId, event_type: &str, phase: Phase) -> Vec<Listener<V>> {
        let Some(n) = self.nodes.get(node.idx()) else {
            return Vec::new();
        };
        let matching = |capture: bool| {
            n.listeners
                .iter()
                .filter(move |r| r.capture == capture && r.event_type == event_type)
                .map(|r| Rc::clone(&r.listener))
        };
        match phase {
            Phase::Capture => matching(true).collect(),
            Phase::Target => matching(true).chain(matching(false)).collect(),
            Phase::Bubble => matching(false).collect(),
        }
    }

    fn invoke(listener: &Listener<V>, event: &mut SyntheticEvent<V>, delivery: &Delivery) {
        match listener.try_borrow_mut() {
            Ok(mut f) => (*f)(event, delivery),
            Err(_) => debug!(
                "listener already running for `{}` on {:?}; skipped",
                event.event_type(),
                delivery.current_target
            ),
        }
    }
}

impl<V> ParentLookup<NodeId> for Document<V> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.idx()).and_then(|n| n.parent)
    }
}

struct StandardNode<'a, V> {
    doc: &'a Document<V>,
    node: NodeId,
}

impl<V> DispatchEvent<V> for StandardNode<'_, V> {
    fn dispatch_event(&self, event: &mut SyntheticEvent<V>) {
        self.doc.dispatch_to(self.node, event);
    }
}

struct LegacyNode<'a, V> {
    doc: &'a Document<V>,
    node: NodeId,
}

impl<V> FireEvent<V> for LegacyNode<'_, V> {
    fn fire_event(&self, handler: &str, event: &mut SyntheticEvent<V>) {
        self.doc.fire_on(self.node, handler, event);
    }
}
