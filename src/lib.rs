#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Sequencer`**: Drives the five crossing lamps through the fixed timed cycle
//! - **`Phase`**: One step of the cycle, from `Idle` around the chain and back
//! - **`Lamp`**: Names one of the five lamp outputs
//! - **`CarLights`** / **`PedLights`**: Grouped lamp patterns written as a unit
//! - **`ButtonMonitor`**: Polls the request button, debounces, fires one cycle per press
//! - **`Lamps`**: Trait to implement for your lamp hardware
//! - **`PushButton`**: Trait to implement for your button hardware
//! - **`Delay`**: Trait to implement for your blocking wait primitive
//!
//! The core is `no_std`-capable and only touches hardware through the three
//! traits. The `rpi` feature (on by default) adds GPIO implementations for
//! Raspberry Pi and enables the controller binary.

pub mod button;
pub mod sequencer;
pub mod time;
pub mod types;

#[cfg(feature = "rpi")]
pub mod rpi;

pub use button::{ButtonMonitor, DEBOUNCE_DELAY, POLL_INTERVAL, PushButton, RELEASE_POLL_INTERVAL};
pub use sequencer::{
    BLINK_COUNT, BLINK_INTERVAL, CAR_AMBER_HOLD, CAR_RED_AMBER_HOLD, Lamps, PED_CROSS_HOLD,
    Sequencer,
};
pub use time::Delay;
#[cfg(feature = "std")]
pub use time::ThreadDelay;
pub use types::{CarLights, Lamp, PedLights, Phase};
