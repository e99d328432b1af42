// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event creation.
//!
//! The host's event-creation primitive is modeled as the [`EventFactory`]
//! trait and injected into [`DragDrop`](crate::drag::DragDrop).
//! [`Synthesizer`] is the in-memory implementation used when no host
//! primitive is needed.

use alloc::string::ToString;

use crate::Error;
use crate::carrier::{CarrierId, DataCarrier};
use crate::event::{EventFlags, SyntheticEvent};

/// Builds bubbling, cancelable events with a fresh, empty carrier.
pub trait EventFactory<V> {
    /// Create an event named `event_type`.
    ///
    /// Any string is accepted. Returns [`Error::EventUnavailable`] when the
    /// host cannot construct events at all.
    fn create_event(&mut self, event_type: &str) -> Result<SyntheticEvent<V>, Error>;
}

impl<V, F: EventFactory<V> + ?Sized> EventFactory<V> for &mut F {
    #[inline]
    fn create_event(&mut self, event_type: &str) -> Result<SyntheticEvent<V>, Error> {
        (**self).create_event(event_type)
    }
}

/// In-memory event factory. Never fails.
///
/// Carrier ids are sequential, starting at `1`.
#[derive(Clone, Debug, Default)]
pub struct Synthesizer {
    issued: u64,
}

impl Synthesizer {
    /// Create a factory that has issued no carriers yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events (and therefore carriers) created so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl<V> EventFactory<V> for Synthesizer {
    fn create_event(&mut self, event_type: &str) -> Result<SyntheticEvent<V>, Error> {
        self.issued += 1;
        let carrier = DataCarrier::new(CarrierId::new(self.issued));
        Ok(SyntheticEvent::new(
            event_type.to_string(),
            EventFlags::SYNTHETIC,
            carrier,
        ))
    }
}
