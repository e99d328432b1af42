// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mock data-transfer payload carried by drag events.
//!
//! ## Identity
//!
//! A [`DataCarrier`] is deliberately not `Clone`. It moves from event to event,
//! so the [`CarrierId`] stamped on it at creation names exactly one payload for
//! its whole life. Comparing ids is how callers check that two steps of a drag
//! saw the same carrier.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Identifier of a [`DataCarrier`].
///
/// Assigned by the [`EventFactory`](crate::factory::EventFactory) that built the
/// owning event. [`Synthesizer`](crate::factory::Synthesizer) hands out
/// sequential ids starting at `1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CarrierId(u64);

impl CarrierId {
    /// Wrap a raw id. Factories are responsible for keeping ids distinct.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A key/value store mimicking a native drag payload.
///
/// Keys are strings; values are whatever the embedding toolkit carries.
/// Last write per key wins.
///
/// ```
/// use understory_dnd::carrier::{CarrierId, DataCarrier};
///
/// let mut dt: DataCarrier<&str> = DataCarrier::new(CarrierId::new(1));
/// dt.set_data("text", "hello");
/// assert_eq!(dt.get_data("text"), Some(&"hello"));
/// assert_eq!(dt.get_data("url"), None);
/// ```
#[derive(Debug)]
pub struct DataCarrier<V> {
    id: CarrierId,
    data: BTreeMap<String, V>,
}

impl<V> DataCarrier<V> {
    /// Create an empty carrier with the given id.
    pub fn new(id: CarrierId) -> Self {
        Self {
            id,
            data: BTreeMap::new(),
        }
    }

    /// Identity of this carrier.
    pub fn id(&self) -> CarrierId {
        self.id
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_data(&mut self, key: impl Into<String>, value: V) {
        self.data.insert(key.into(), value);
    }

    /// Value stored under `key`, or `None` when it was never set.
    pub fn get_data(&self, key: &str) -> Option<&V> {
        self.data.get(key)
    }

    /// Remove the value under `key`, or every value when `key` is `None`.
    pub fn clear_data(&mut self, key: Option<&str>) {
        match key {
            Some(k) => {
                self.data.remove(k);
            }
            None => self.data.clear(),
        }
    }

    /// Keys currently set, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(String::as_str)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been set.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
