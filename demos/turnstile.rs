//! Turnstile
//!
//! This demo drives a coin-operated turnstile through its events.
//!
//! Key concepts:
//! - Declaring states with `state_enum!`
//! - Validators that veto a transition
//! - Global hooks around every transition
//! - Rendering the event table
//!
//! Run with: cargo run --example turnstile

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use transit::builder::MachineBuilder;
use transit::render::render_table;
use transit::{state_enum, Event, StateMachine};

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
        Broken,
    }
}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    let coins = Arc::new(AtomicU32::new(0));
    let paid = Arc::clone(&coins);
    let counter = Arc::clone(&coins);

    let mut machine = MachineBuilder::new()
        .states(Turnstile::all())
        .initial(Turnstile::Locked)
        .events([
            Event::new("coin", vec![Turnstile::Locked], Turnstile::Unlocked)
                .before(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .validate(move |_, _| {
                    if paid.load(Ordering::SeqCst) % 3 == 0 {
                        Err("coin rejected".into())
                    } else {
                        Ok(())
                    }
                }),
            Event::new("push", vec![Turnstile::Unlocked], Turnstile::Locked),
            Event::new(
                "kick",
                vec![Turnstile::Locked, Turnstile::Unlocked],
                Turnstile::Broken,
            ),
            Event::new("repair", vec![Turnstile::Broken], Turnstile::Locked),
        ])
        .before_all(|event, from, to| println!("  -> {event}: {from:?} to {to:?}"))
        .after_all(|event, _, to| println!("  <- {event}: now {to:?}"))
        .build()
        .expect("turnstile definition is valid");

    println!("{}", render_table(&machine));

    for event in ["coin", "push", "push", "coin", "coin", "push", "kick", "repair"] {
        println!("fire {event}");
        if let Err(err) = machine.fire(event) {
            println!("  !! {err}");
        }
    }

    println!("\nFinal state: {:?}", machine.current_state());
    println!("Coins inserted: {}", coins.load(Ordering::SeqCst));
    println!("Transitions recorded: {}", machine.history().len());

    println!("\n=== Demo Complete ===");
}
