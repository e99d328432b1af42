// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by event creation.

use alloc::string::String;

/// Failure reported while synthesizing a drag sequence.
///
/// Dispatch itself never fails: an element without a usable mechanism is
/// skipped (see [`Element::Inert`](crate::dispatch::Element::Inert)).
/// The only fault is a host that cannot build an event at all.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The host has no primitive for creating events of this type.
    #[error("host cannot create `{event_type}` events")]
    EventUnavailable {
        /// Type name that was requested.
        event_type: String,
    },
}
