//! Pedestrian crossing controller for Raspberry Pi.
//!
//! Claims the lamp and button pins, puts the display in the idle pattern,
//! then polls the button until interrupted. Ctrl-C only raises a flag; a
//! crossing cycle in progress always finishes before the loop exits and the
//! lamps are forced off.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use log::info;
use pelican_crossing::rpi::{GpioButton, GpioLamps};
use pelican_crossing::{ButtonMonitor, Sequencer, ThreadDelay};
use rppal::gpio::Gpio;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))?;

    let gpio = Gpio::new()?;
    let mut sequencer = Sequencer::new(GpioLamps::new(&gpio)?, ThreadDelay);
    let mut monitor = ButtonMonitor::new(GpioButton::new(&gpio)?, ThreadDelay);

    sequencer.enter_idle();
    info!("pedestrian crossing controller running");
    info!("press the button to request a crossing");

    monitor.run(&mut sequencer, || !shutdown.load(Ordering::SeqCst));

    info!("interrupt received, shutting down");
    sequencer.all_off();
    info!("lamps off, releasing GPIO");

    Ok(())
}
