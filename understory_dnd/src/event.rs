// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic events: type name, flags, and the owned data carrier.
//!
//! ## Overview
//!
//! A [`SyntheticEvent`] is built by an [`EventFactory`](crate::factory::EventFactory),
//! handed to [`dispatch`](crate::dispatch::dispatch), and discarded afterwards.
//! Its [`DataCarrier`] outlives it: dispatch returns the carrier so the next
//! step of the drag can take it over.

use alloc::format;
use alloc::string::String;

use crate::carrier::DataCarrier;

/// Type name of the event fired on the source when a drag begins.
pub const DRAG_START: &str = "dragstart";
/// Type name of the event fired on the target when the payload is released.
pub const DROP: &str = "drop";
/// Type name of the event fired back on the source when the drag finishes.
pub const DRAG_END: &str = "dragend";

bitflags::bitflags! {
    /// Event flags: construction-time traits plus state set by listeners.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// Event propagates back up through ancestors after the target.
        const BUBBLES             = 0b0000_0001;
        /// Listeners may prevent the default action.
        const CANCELABLE          = 0b0000_0010;
        /// A listener called [`SyntheticEvent::prevent_default`].
        const DEFAULT_PREVENTED   = 0b0000_0100;
        /// A listener called [`SyntheticEvent::stop_propagation`].
        const PROPAGATION_STOPPED = 0b0000_1000;
    }
}

impl EventFlags {
    /// Flags a freshly synthesized drag event carries.
    pub const SYNTHETIC: Self = Self::BUBBLES.union(Self::CANCELABLE);
    const INIT_MASK: Self = Self::BUBBLES.union(Self::CANCELABLE);
}

/// A programmatically constructed event.
///
/// The type name is not validated; any string is stamped on unchanged.
#[derive(Debug)]
pub struct SyntheticEvent<V> {
    event_type: String,
    flags: EventFlags,
    data_transfer: DataCarrier<V>,
}

impl<V> SyntheticEvent<V> {
    /// Build an event. Only [`EventFlags::BUBBLES`] and
    /// [`EventFlags::CANCELABLE`] are taken from `init`; state flags start clear.
    pub fn new(
        event_type: impl Into<String>,
        init: EventFlags,
        data_transfer: DataCarrier<V>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            flags: init & EventFlags::INIT_MASK,
            data_transfer,
        }
    }

    /// Event type name, e.g. [`DROP`].
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Name used by the legacy trigger mechanism: `"on"` followed by the type.
    pub fn legacy_handler_name(&self) -> String {
        format!("on{}", self.event_type)
    }

    /// Current flags.
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Whether the event bubbles.
    pub fn bubbles(&self) -> bool {
        self.flags.contains(EventFlags::BUBBLES)
    }

    /// Whether the event is cancelable.
    pub fn cancelable(&self) -> bool {
        self.flags.contains(EventFlags::CANCELABLE)
    }

    /// Mark the default action as prevented. Ignored on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable() {
            self.flags.insert(EventFlags::DEFAULT_PREVENTED);
        }
    }

    /// Whether a listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Stop delivery to further nodes once the current node's listeners finish.
    pub fn stop_propagation(&mut self) {
        self.flags.insert(EventFlags::PROPAGATION_STOPPED);
    }

    /// Whether a listener stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }

    /// The carrier this event currently owns.
    pub fn data_transfer(&self) -> &DataCarrier<V> {
        &self.data_transfer
    }

    /// Mutable access to the carrier.
    pub fn data_transfer_mut(&mut self) -> &mut DataCarrier<V> {
        &mut self.data_transfer
    }

    /// Install `carrier` and return the one it displaced.
    pub fn replace_data_transfer(&mut self, carrier: DataCarrier<V>) -> DataCarrier<V> {
        core::mem::replace(&mut self.data_transfer, carrier)
    }

    /// Consume the event, keeping only its carrier.
    pub fn into_data_transfer(self) -> DataCarrier<V> {
        self.data_transfer
    }
}
