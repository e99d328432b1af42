// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancel policies.
//!
//! The source prevents `dragstart`. With the default policy the drag still
//! completes; with `AbortOnDragStart` nothing after `dragstart` is dispatched.
//!
//! Run:
//! - `cargo run -p understory_dnd_demos --example dnd_cancel`

use understory_dnd::document::Document;
use understory_dnd::drag::{CancelPolicy, DragDrop};
use understory_dnd::event::{DRAG_START, DROP};

fn main() {
    let mut doc: Document<()> = Document::new();
    let source = doc.create_element(None);
    let target = doc.create_element(None);

    doc.add_event_listener(source, DRAG_START, false, |ev, _| ev.prevent_default());
    doc.add_event_listener(target, DROP, false, |_, _| println!("  drop delivered"));

    for policy in [CancelPolicy::Ignore, CancelPolicy::AbortOnDragStart] {
        println!("== {policy:?} ==");
        let mut dnd = DragDrop::new();
        dnd.set_cancel_policy(policy);
        match dnd.run(&doc.element(source), &doc.element(target)) {
            Ok(report) => println!("  status={:?} steps={}", report.status, report.steps.len()),
            Err(e) => eprintln!("drag failed: {e}"),
        }
    }
}
