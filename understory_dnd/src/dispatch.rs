// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delivery of one event to one element.
//!
//! ## Mechanisms
//!
//! Hosts expose one of two ways to run listeners:
//! - [`DispatchEvent`]: the standards mechanism, handed the event object.
//! - [`FireEvent`]: the legacy mechanism, handed `"on" + type` and the event.
//!
//! An [`Element`] fixes the mechanism when it is built, so [`dispatch`] never
//! inspects a target at call time. [`Element::Inert`] stands for a target that
//! exposes neither; dispatching to it does nothing.
//!
//! ## Carrier threading
//!
//! [`dispatch`] optionally installs a carrier from a previous step before
//! delivery and always returns the carrier the event holds afterwards, so the
//! caller can pass it on by value.

use alloc::boxed::Box;

use log::{debug, trace};

use crate::carrier::DataCarrier;
use crate::event::SyntheticEvent;

/// Standards dispatch: deliver the event object to the element's listeners.
pub trait DispatchEvent<V> {
    /// Run every listener registered for `event`'s type, synchronously.
    fn dispatch_event(&self, event: &mut SyntheticEvent<V>);
}

/// Legacy dispatch: trigger the element's handler by name.
pub trait FireEvent<V> {
    /// Run the handler registered as `handler` (e.g. `"ondrop"`), synchronously.
    fn fire_event(&self, handler: &str, event: &mut SyntheticEvent<V>);
}

impl<V, T: DispatchEvent<V> + ?Sized> DispatchEvent<V> for &T {
    #[inline]
    fn dispatch_event(&self, event: &mut SyntheticEvent<V>) {
        (**self).dispatch_event(event);
    }
}

impl<V, T: FireEvent<V> + ?Sized> FireEvent<V> for &T {
    #[inline]
    fn fire_event(&self, handler: &str, event: &mut SyntheticEvent<V>) {
        (**self).fire_event(handler, event);
    }
}

/// Which mechanism an [`Element`] uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mechanism {
    /// [`DispatchEvent`].
    Standard,
    /// [`FireEvent`] with `"on" + type`.
    Legacy,
    /// Neither; dispatch is a no-op.
    Unsupported,
}

/// An event target bound to exactly one dispatch mechanism.
pub enum Element<'a, V> {
    /// Target exposing standards dispatch.
    Standard(Box<dyn DispatchEvent<V> + 'a>),
    /// Target exposing only the legacy named trigger.
    Legacy(Box<dyn FireEvent<V> + 'a>),
    /// Target exposing neither mechanism.
    Inert,
}

impl<V> core::fmt::Debug for Element<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Element").field(&self.mechanism()).finish()
    }
}

impl<'a, V> Element<'a, V> {
    /// Bind a target to the standards mechanism.
    pub fn standard(target: impl DispatchEvent<V> + 'a) -> Self {
        Self::Standard(Box::new(target))
    }

    /// Bind a target to the legacy mechanism.
    pub fn legacy(target: impl FireEvent<V> + 'a) -> Self {
        Self::Legacy(Box::new(target))
    }

    /// Mechanism this element was bound to.
    pub fn mechanism(&self) -> Mechanism {
        match self {
            Self::Standard(_) => Mechanism::Standard,
            Self::Legacy(_) => Mechanism::Legacy,
            Self::Inert => Mechanism::Unsupported,
        }
    }
}

/// Outcome of a single [`dispatch`].
#[derive(Debug)]
pub struct Dispatched<V> {
    /// Carrier held by the event after its listeners ran.
    pub carrier: DataCarrier<V>,
    /// Mechanism that delivered the event.
    pub mechanism: Mechanism,
    /// Whether a listener prevented the default action.
    pub default_prevented: bool,
}

/// Deliver `event` to `element`.
///
/// When `carrier` is `Some`, it replaces the event's own carrier first; the
/// event's original carrier is dropped. Listeners run before this returns.
pub fn dispatch<V>(
    element: &Element<'_, V>,
    mut event: SyntheticEvent<V>,
    carrier: Option<DataCarrier<V>>,
) -> Dispatched<V> {
    if let Some(carrier) = carrier {
        let _fresh = event.replace_data_transfer(carrier);
    }
    match element {
        Element::Standard(target) => {
            trace!(
                "dispatch `{}` (carrier {:?})",
                event.event_type(),
                event.data_transfer().id()
            );
            target.dispatch_event(&mut event);
        }
        Element::Legacy(target) => {
            let handler = event.legacy_handler_name();
            trace!(
                "fire `{handler}` (carrier {:?})",
                event.data_transfer().id()
            );
            target.fire_event(&handler, &mut event);
        }
        Element::Inert => {
            debug!(
                "no dispatch mechanism for `{}`; skipped",
                event.event_type()
            );
        }
    }
    let default_prevented = event.default_prevented();
    Dispatched {
        carrier: event.into_data_transfer(),
        mechanism: element.mechanism(),
        default_prevented,
    }
}
