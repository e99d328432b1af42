// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and drop basics.
//!
//! A card inside a list is dragged onto a trash bin. The bin reads what the
//! card put on the carrier, and the card sees the bin's reply in `dragend`.
//!
//! Run:
//! - `cargo run -p understory_dnd_demos --example dnd_basics`

use understory_dnd::document::{Delivery, Document};
use understory_dnd::drag::drag_and_drop;
use understory_dnd::event::{DRAG_END, DRAG_START, DROP};

fn at(d: &Delivery) -> String {
    format!("{:?} on {:?}", d.phase, d.current_target)
}

fn main() {
    let mut doc: Document<String> = Document::new();
    let list = doc.create_element(None);
    let card = doc.create_element(Some(list));
    let bin = doc.create_element(None);

    doc.add_event_listener(card, DRAG_START, false, |ev, d| {
        println!("  {}: set text=hello", at(d));
        ev.data_transfer_mut().set_data("text", "hello".to_string());
    });
    // Bubbles up from the card.
    doc.add_event_listener(list, DRAG_START, false, |_, d| {
        println!("  {}: list saw the drag begin", at(d));
    });
    doc.add_event_listener(bin, DROP, false, |ev, d| {
        let got = ev.data_transfer().get_data("text").cloned();
        println!("  {}: got text={got:?}", at(d));
        ev.data_transfer_mut()
            .set_data("text", "hello-handled".to_string());
    });
    doc.add_event_listener(card, DRAG_END, false, |ev, d| {
        let got = ev.data_transfer().get_data("text").cloned();
        println!("  {}: got text={got:?}", at(d));
    });

    println!("== Drag card → bin ==");
    match drag_and_drop(&doc.element(card), &doc.element(bin)) {
        Ok(report) => {
            println!("== Steps ({:?}) ==", report.status);
            for s in &report.steps {
                println!(
                    "  {:<9}  mechanism={:?}  carrier={}",
                    s.event_type,
                    s.mechanism,
                    s.carrier.get()
                );
            }
        }
        Err(e) => eprintln!("drag failed: {e}"),
    }
}
