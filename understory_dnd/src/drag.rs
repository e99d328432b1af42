// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag-and-drop handshake.
//!
//! ## Sequence
//!
//! [`DragDrop::run`] walks three steps, each a fresh event from the injected
//! [`EventFactory`]:
//! 1) `dragstart` on the source, with the event's own carrier.
//! 2) `drop` on the target, carrying the carrier left by step 1.
//! 3) `dragend` on the source, carrying the carrier left by step 2.
//!
//! The carrier moves by value from step to step, so values a listener sets in
//! one step are visible in the next, and [`CarrierId`]s match across steps.
//!
//! ## Cancelation
//!
//! `dragstart` is cancelable, but by default nothing checks it: all three steps
//! run regardless of listener behavior. [`CancelPolicy::AbortOnDragStart`]
//! opts into stopping after a prevented `dragstart`.

use alloc::vec::Vec;

use log::debug;

use crate::Error;
use crate::carrier::{CarrierId, DataCarrier};
use crate::dispatch::{Dispatched, Element, Mechanism, dispatch};
use crate::event::{DRAG_END, DRAG_START, DROP};
use crate::factory::{EventFactory, Synthesizer};

/// What to do when a `dragstart` listener prevents the default action.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CancelPolicy {
    /// Run every step regardless.
    #[default]
    Ignore,
    /// Dispatch neither `drop` nor `dragend` after a prevented `dragstart`.
    AbortOnDragStart,
}

/// How a run ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DragStatus {
    /// All three steps were dispatched.
    Completed,
    /// `dragstart` was prevented under [`CancelPolicy::AbortOnDragStart`].
    Canceled,
}

/// Record of one dispatched step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StepReport {
    /// Event type of the step.
    pub event_type: &'static str,
    /// Mechanism the element was bound to.
    pub mechanism: Mechanism,
    /// Carrier the event held once its listeners finished.
    pub carrier: CarrierId,
    /// Whether a listener prevented the default action.
    pub default_prevented: bool,
}

/// Result of [`DragDrop::run`].
#[derive(Debug)]
pub struct DragReport<V> {
    /// How the run ended.
    pub status: DragStatus,
    /// Dispatched steps, in order.
    pub steps: Vec<StepReport>,
    /// Carrier left by the last dispatched step.
    pub carrier: DataCarrier<V>,
}

/// Drag-and-drop context: an injected event factory plus policy.
///
/// ## Usage
///
/// - Construct with [`DragDrop::new`] for the in-memory [`Synthesizer`], or
///   [`DragDrop::with_factory`] to supply a host factory.
/// - Optionally configure [`DragDrop::set_cancel_policy`].
/// - Call [`DragDrop::run`] once per drag. Runs share nothing but the factory.
#[derive(Clone, Debug, Default)]
pub struct DragDrop<F = Synthesizer> {
    factory: F,
    cancel_policy: CancelPolicy,
}

impl DragDrop<Synthesizer> {
    /// Create a context backed by a fresh [`Synthesizer`].
    pub fn new() -> Self {
        Self::with_factory(Synthesizer::new())
    }
}

impl<F> DragDrop<F> {
    /// Create a context with an explicit event factory.
    pub fn with_factory(factory: F) -> Self {
        Self {
            factory,
            cancel_policy: CancelPolicy::Ignore,
        }
    }

    /// Set the policy applied when `dragstart` is prevented.
    pub fn set_cancel_policy(&mut self, policy: CancelPolicy) {
        self.cancel_policy = policy;
    }

    /// Current cancel policy.
    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    /// The injected factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Drag from `source` and drop onto `target`.
    ///
    /// Errors only when the factory cannot create an event; steps already
    /// dispatched stay dispatched.
    pub fn run<V>(
        &mut self,
        source: &Element<'_, V>,
        target: &Element<'_, V>,
    ) -> Result<DragReport<V>, Error>
    where
        F: EventFactory<V>,
    {
        let mut steps = Vec::with_capacity(3);

        let started = self.step(source, DRAG_START, None, &mut steps)?;
        if started.default_prevented && self.cancel_policy == CancelPolicy::AbortOnDragStart {
            debug!("`{DRAG_START}` prevented; drag canceled");
            return Ok(DragReport {
                status: DragStatus::Canceled,
                steps,
                carrier: started.carrier,
            });
        }

        let dropped = self.step(target, DROP, Some(started.carrier), &mut steps)?;
        let ended = self.step(source, DRAG_END, Some(dropped.carrier), &mut steps)?;

        Ok(DragReport {
            status: DragStatus::Completed,
            steps,
            carrier: ended.carrier,
        })
    }

    fn step<V>(
        &mut self,
        element: &Element<'_, V>,
        event_type: &'static str,
        carrier: Option<DataCarrier<V>>,
        steps: &mut Vec<StepReport>,
    ) -> Result<Dispatched<V>, Error>
    where
        F: EventFactory<V>,
    {
        let event = self.factory.create_event(event_type)?;
        let out = dispatch(element, event, carrier);
        steps.push(StepReport {
            event_type,
            mechanism: out.mechanism,
            carrier: out.carrier.id(),
            default_prevented: out.default_prevented,
        });
        Ok(out)
    }
}

/// Run one drag from `source` to `target` with a fresh [`Synthesizer`].
///
/// ```
/// use understory_dnd::document::Document;
/// use understory_dnd::drag::drag_and_drop;
///
/// let mut doc: Document<u32> = Document::new();
/// let card = doc.create_element(None);
/// let bin = doc.create_element(None);
/// doc.add_event_listener(card, "dragstart", false, |ev, _| {
///     ev.data_transfer_mut().set_data("id", 7);
/// });
///
/// let report = drag_and_drop(&doc.element(card), &doc.element(bin))?;
/// assert_eq!(report.carrier.get_data("id"), Some(&7));
/// # Ok::<(), understory_dnd::Error>(())
/// ```
pub fn drag_and_drop<V>(
    source: &Element<'_, V>,
    target: &Element<'_, V>,
) -> Result<DragReport<V>, Error> {
    DragDrop::new().run(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Delivery, Document, NodeId};
    use crate::event::SyntheticEvent;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn text(ev: &SyntheticEvent<String>) -> String {
        ev.data_transfer()
            .get_data("text")
            .cloned()
            .unwrap_or_else(|| "<undefined>".to_string())
    }

    fn pair() -> (Document<String>, NodeId, NodeId) {
        let mut doc = Document::new();
        let source = doc.create_element(None);
        let target = doc.create_element(None);
        (doc, source, target)
    }

    #[test]
    fn handshake_threads_values_between_listeners() {
        let (mut doc, source, target) = pair();
        let observed = Log::default();

        doc.add_event_listener(source, DRAG_START, false, |ev, _| {
            ev.data_transfer_mut().set_data("text", "hello".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.add_event_listener(target, DROP, false, move |ev, _| {
            sink.borrow_mut().push(text(ev));
            ev.data_transfer_mut()
                .set_data("text", "hello-handled".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.add_event_listener(source, DRAG_END, false, move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let report = drag_and_drop(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(*observed.borrow(), ["hello", "hello-handled"]);
        assert_eq!(report.status, DragStatus::Completed);
        assert_eq!(
            report.carrier.get_data("text").map(String::as_str),
            Some("hello-handled")
        );
    }

    #[test]
    fn one_listener_call_per_step_in_order() {
        let (mut doc, source, target) = pair();
        let log = Log::default();
        for (node, event_type) in [
            (source, DRAG_START),
            (source, DROP),
            (source, DRAG_END),
            (target, DRAG_START),
            (target, DROP),
            (target, DRAG_END),
        ] {
            let sink = Rc::clone(&log);
            let who = if node == source { "source" } else { "target" };
            doc.add_event_listener(node, event_type, false, move |ev, _| {
                let line = alloc::format!("{who}:{}", ev.event_type());
                sink.borrow_mut().push(line);
            });
        }

        drag_and_drop(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(
            *log.borrow(),
            ["source:dragstart", "target:drop", "source:dragend"]
        );
    }

    #[test]
    fn carrier_identity_is_kept_across_steps() {
        let (mut doc, source, target) = pair();
        let ids: Rc<RefCell<Vec<CarrierId>>> = Rc::default();
        for (node, event_type) in [(source, DRAG_START), (target, DROP), (source, DRAG_END)] {
            let sink = Rc::clone(&ids);
            doc.add_event_listener(node, event_type, false, move |ev, _| {
                sink.borrow_mut().push(ev.data_transfer().id());
            });
        }

        let report = drag_and_drop(&doc.element(source), &doc.element(target)).unwrap();
        let ids = ids.borrow();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| *id == ids[0]));
        assert!(report.steps.iter().all(|s| s.carrier == ids[0]));
        assert_eq!(report.carrier.id(), ids[0]);
    }

    #[test]
    fn carrier_swapped_during_drop_reaches_dragend() {
        let (mut doc, source, target) = pair();
        let seen = Log::default();
        doc.add_event_listener(target, DROP, false, |ev, _| {
            let mut fresh = DataCarrier::new(CarrierId::new(99));
            fresh.set_data("text", "replacement".to_string());
            let _old = ev.replace_data_transfer(fresh);
        });
        let sink = Rc::clone(&seen);
        doc.add_event_listener(source, DRAG_END, false, move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let report = drag_and_drop(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(*seen.borrow(), ["replacement"]);
        assert_eq!(report.steps[1].carrier, CarrierId::new(99));
        assert_eq!(report.carrier.id(), CarrierId::new(99));
    }

    #[test]
    fn legacy_elements_follow_the_same_handshake() {
        let (mut doc, source, target) = pair();
        let observed = Log::default();
        doc.set_handler(source, "ondragstart", |ev, _| {
            ev.data_transfer_mut().set_data("text", "hello".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.set_handler(target, "ondrop", move |ev, _| {
            sink.borrow_mut().push(text(ev));
            ev.data_transfer_mut()
                .set_data("text", "hello-handled".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.set_handler(source, "ondragend", move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let (from, onto) = (doc.legacy_element(source), doc.legacy_element(target));
        let report = drag_and_drop(&from, &onto).unwrap();
        assert_eq!(*observed.borrow(), ["hello", "hello-handled"]);
        assert!(report.steps.iter().all(|s| s.mechanism == Mechanism::Legacy));
    }

    #[test]
    fn mixed_mechanisms_share_one_carrier() {
        let (mut doc, source, target) = pair();
        let observed = Log::default();
        doc.add_event_listener(source, DRAG_START, false, |ev, _| {
            ev.data_transfer_mut().set_data("text", "mixed".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.set_handler(target, "ondrop", move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let (from, onto) = (doc.element(source), doc.legacy_element(target));
        let report = drag_and_drop(&from, &onto).unwrap();
        assert_eq!(*observed.borrow(), ["mixed"]);
        let mechanisms: Vec<Mechanism> = report.steps.iter().map(|s| s.mechanism).collect();
        assert_eq!(
            mechanisms,
            vec![Mechanism::Standard, Mechanism::Legacy, Mechanism::Standard]
        );
    }

    #[test]
    fn inert_target_is_skipped_silently() {
        let (mut doc, source, _) = pair();
        let observed = Log::default();
        doc.add_event_listener(source, DRAG_START, false, |ev, _| {
            ev.data_transfer_mut().set_data("text", "kept".to_string());
        });
        let sink = Rc::clone(&observed);
        doc.add_event_listener(source, DRAG_END, false, move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let report = drag_and_drop(&doc.element(source), &Element::Inert).unwrap();
        assert_eq!(*observed.borrow(), ["kept"]);
        assert_eq!(report.steps[1].mechanism, Mechanism::Unsupported);
        assert_eq!(report.status, DragStatus::Completed);
    }

    #[test]
    fn inert_source_still_delivers_drop() {
        let (mut doc, _, target) = pair();
        let observed = Log::default();
        let sink = Rc::clone(&observed);
        doc.add_event_listener(target, DROP, false, move |ev, _| {
            let empty = ev.data_transfer().is_empty();
            sink.borrow_mut().push(empty.to_string());
            sink.borrow_mut().push(text(ev));
        });

        let report = drag_and_drop(&Element::Inert, &doc.element(target)).unwrap();
        assert_eq!(*observed.borrow(), ["true", "<undefined>"]);
        assert_eq!(report.steps[0].mechanism, Mechanism::Unsupported);
        assert_eq!(report.steps[1].mechanism, Mechanism::Standard);
        assert_eq!(report.steps[2].mechanism, Mechanism::Unsupported);
        assert_eq!(report.steps[0].carrier, report.steps[2].carrier);
        assert_eq!(report.status, DragStatus::Completed);
        assert!(report.carrier.is_empty());
    }

    #[test]
    fn same_element_can_be_source_and_target() {
        let mut doc: Document<String> = Document::new();
        let node = doc.create_element(None);
        let log = Log::default();
        for event_type in [DRAG_START, DROP, DRAG_END] {
            let sink = Rc::clone(&log);
            doc.add_event_listener(node, event_type, false, move |ev, _| {
                sink.borrow_mut().push(ev.event_type().to_string());
            });
        }

        let element = doc.element(node);
        drag_and_drop(&element, &element).unwrap();
        assert_eq!(*log.borrow(), ["dragstart", "drop", "dragend"]);
    }

    #[test]
    fn prevented_dragstart_is_ignored_by_default() {
        let (mut doc, source, target) = pair();
        let log = Log::default();
        doc.add_event_listener(source, DRAG_START, false, |ev, _| ev.prevent_default());
        let sink = Rc::clone(&log);
        doc.add_event_listener(target, DROP, false, move |ev, _| {
            sink.borrow_mut().push(ev.event_type().to_string());
        });

        let report = drag_and_drop(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(*log.borrow(), ["drop"]);
        assert!(report.steps[0].default_prevented);
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.status, DragStatus::Completed);
    }

    #[test]
    fn abort_policy_stops_after_prevented_dragstart() {
        let (mut doc, source, target) = pair();
        let log = Log::default();
        doc.add_event_listener(source, DRAG_START, false, |ev, _| {
            ev.data_transfer_mut().set_data("text", "draft".to_string());
            ev.prevent_default();
        });
        for (node, event_type) in [(target, DROP), (source, DRAG_END)] {
            let sink = Rc::clone(&log);
            doc.add_event_listener(node, event_type, false, move |ev, _| {
                sink.borrow_mut().push(ev.event_type().to_string());
            });
        }

        let mut dnd = DragDrop::new();
        dnd.set_cancel_policy(CancelPolicy::AbortOnDragStart);
        let report = dnd.run(&doc.element(source), &doc.element(target)).unwrap();
        assert!(log.borrow().is_empty());
        assert_eq!(report.status, DragStatus::Canceled);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(
            report.carrier.get_data("text").map(String::as_str),
            Some("draft")
        );
    }

    #[test]
    fn abort_policy_completes_when_not_prevented() {
        let (doc, source, target) = pair();
        let mut dnd = DragDrop::new();
        dnd.set_cancel_policy(CancelPolicy::AbortOnDragStart);
        let report = dnd.run(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(report.status, DragStatus::Completed);
        assert_eq!(report.steps.len(), 3);
    }

    #[test]
    fn runs_are_independent() {
        let (mut doc, source, target) = pair();
        let seen = Log::default();
        let counter = Rc::new(RefCell::new(0_u32));
        let count = Rc::clone(&counter);
        doc.add_event_listener(source, DRAG_START, false, move |ev, _| {
            *count.borrow_mut() += 1;
            if *count.borrow() == 1 {
                ev.data_transfer_mut().set_data("text", "first".to_string());
            }
        });
        let sink = Rc::clone(&seen);
        doc.add_event_listener(target, DROP, false, move |ev, _| {
            sink.borrow_mut().push(text(ev));
        });

        let mut dnd = DragDrop::new();
        let first = dnd.run(&doc.element(source), &doc.element(target)).unwrap();
        let second = dnd.run(&doc.element(source), &doc.element(target)).unwrap();
        assert_eq!(*seen.borrow(), ["first", "<undefined>"]);
        assert_ne!(first.carrier.id(), second.carrier.id());
        assert_eq!(dnd.factory().issued(), 6);
    }

    #[test]
    fn factory_failure_propagates_after_earlier_steps() {
        struct DropUnsupported(Synthesizer);
        impl EventFactory<String> for DropUnsupported {
            fn create_event(&mut self, event_type: &str) -> Result<SyntheticEvent<String>, Error> {
                if event_type == DROP {
                    return Err(Error::EventUnavailable {
                        event_type: event_type.to_string(),
                    });
                }
                self.0.create_event(event_type)
            }
        }

        let (mut doc, source, target) = pair();
        let log = Log::default();
        let sink = Rc::clone(&log);
        doc.add_event_listener(source, DRAG_START, false, move |ev, _: &Delivery| {
            sink.borrow_mut().push(ev.event_type().to_string());
        });

        let mut dnd = DragDrop::with_factory(DropUnsupported(Synthesizer::new()));
        let err = dnd
            .run(&doc.element(source), &doc.element(target))
            .unwrap_err();
        assert_eq!(
            err,
            Error::EventUnavailable {
                event_type: "drop".to_string()
            }
        );
        assert_eq!(*log.borrow(), ["dragstart"]);
    }

    #[test]
    fn bubbling_reaches_container_of_the_target() {
        let mut doc: Document<String> = Document::new();
        let source = doc.create_element(None);
        let list = doc.create_element(None);
        let slot = doc.create_element(Some(list));
        let log = Log::default();
        let sink = Rc::clone(&log);
        doc.add_event_listener(list, DROP, false, move |ev, d| {
            assert_eq!(d.current_target, list);
            let reached_from_slot = d.target == slot;
            sink.borrow_mut().push(reached_from_slot.to_string());
            ev.stop_propagation();
        });

        drag_and_drop(&doc.element(source), &doc.element(slot)).unwrap();
        assert_eq!(*log.borrow(), ["true"]);
    }
}
