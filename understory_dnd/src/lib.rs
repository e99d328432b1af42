// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic, `no_std` synthetic drag and drop.
//!
//! ## Overview
//!
//! This crate simulates a drag from one element onto another by synthesizing
//! `dragstart`, `drop` and `dragend` events and threading one mock data carrier
//! through them, so listeners observe a coherent sequence.
//! It does not synthesize OS input, compute geometry, or emit intermediate
//! `dragenter`/`dragover` events.
//!
//! ## Pieces
//!
//! - [`factory`]: builds bubbling, cancelable [`SyntheticEvent`](crate::event::SyntheticEvent)s with a fresh
//!   [`DataCarrier`](crate::carrier::DataCarrier). The host's event primitive is the
//!   [`EventFactory`](crate::factory::EventFactory) trait; [`Synthesizer`](crate::factory::Synthesizer) is the in-memory one.
//! - [`dispatch`]: delivers one event to one [`Element`](crate::dispatch::Element). Elements are bound to
//!   either the standards mechanism or the legacy `"on" + type` trigger when they are built.
//! - [`drag`]: [`DragDrop`](crate::drag::DragDrop) runs the three-step handshake and returns a
//!   [`DragReport`](crate::drag::DragReport).
//! - [`document`]: an in-memory element tree with listeners for both mechanisms, walked in
//!   [`propagation`] order.
//!
//! ## Carrier threading
//!
//! The carrier created with `dragstart` is moved into `drop`, and whatever
//! carrier `drop` ends with is moved into `dragend`. Carriers are not `Clone`;
//! a [`CarrierId`](crate::carrier::CarrierId) names one payload for its whole life.
//!
//! ## Example
//!
//! ```
//! use understory_dnd::document::Document;
//! use understory_dnd::drag::drag_and_drop;
//! use understory_dnd::event::{DRAG_END, DRAG_START, DROP};
//!
//! let mut doc: Document<String> = Document::new();
//! let list = doc.create_element(None);
//! let card = doc.create_element(Some(list));
//! let bin = doc.create_element(None);
//!
//! doc.add_event_listener(card, DRAG_START, false, |ev, _| {
//!     ev.data_transfer_mut().set_data("text", "card-7".to_string());
//! });
//! doc.add_event_listener(bin, DROP, false, |ev, _| {
//!     let id = ev.data_transfer().get_data("text").cloned().unwrap_or_default();
//!     ev.data_transfer_mut().set_data("text", format!("{id}:trashed"));
//! });
//! doc.add_event_listener(card, DRAG_END, false, |ev, _| {
//!     assert_eq!(ev.data_transfer().get_data("text").map(String::as_str), Some("card-7:trashed"));
//! });
//!
//! let report = drag_and_drop(&doc.element(card), &doc.element(bin))?;
//! assert_eq!(report.steps.len(), 3);
//! # Ok::<(), understory_dnd::Error>(())
//! ```
//!
//! ## Logging
//!
//! Dispatch emits `trace` records through [`log`]; skipped deliveries and
//! canceled drags are reported at `debug`. Install any `log` backend to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod carrier;
pub mod dispatch;
pub mod document;
pub mod drag;
pub mod event;
pub mod factory;
pub mod propagation;

mod error;

pub use error::Error;
