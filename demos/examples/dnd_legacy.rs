// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legacy named handlers.
//!
//! The target only exposes `ondrop`-style handlers, so it is bound to the
//! legacy mechanism; the source keeps standards listeners. The carrier still
//! flows through both.
//!
//! Run:
//! - `cargo run -p understory_dnd_demos --example dnd_legacy`

use understory_dnd::dispatch::Element;
use understory_dnd::document::Document;
use understory_dnd::drag::DragDrop;
use understory_dnd::event::{DRAG_END, DRAG_START};

fn main() {
    let mut doc: Document<u32> = Document::new();
    let source = doc.create_element(None);
    let target = doc.create_element(None);

    doc.add_event_listener(source, DRAG_START, false, |ev, _| {
        ev.data_transfer_mut().set_data("count", 1);
    });
    doc.set_handler(target, "ondrop", |ev, _| {
        let n = ev.data_transfer().get_data("count").copied().unwrap_or(0);
        println!("  ondrop: count={n}");
        ev.data_transfer_mut().set_data("count", n + 1);
    });
    doc.add_event_listener(source, DRAG_END, false, |ev, _| {
        let count = ev.data_transfer().get_data("count");
        println!("  dragend: count={count:?}");
    });

    let mut dnd = DragDrop::new();
    let source_el = doc.element(source);
    for (label, target_el) in [
        ("legacy target", doc.legacy_element(target)),
        ("inert target", Element::Inert),
    ] {
        println!("== {label} ==");
        match dnd.run(&source_el, &target_el) {
            Ok(report) => {
                for s in &report.steps {
                    println!("  {:<9}  mechanism={:?}", s.event_type, s.mechanism);
                }
            }
            Err(e) => eprintln!("drag failed: {e}"),
        }
    }
}
