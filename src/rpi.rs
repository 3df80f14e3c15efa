//! Raspberry Pi GPIO bindings for the crossing hardware.
//!
//! Implements [`Lamps`] and [`PushButton`] over `rppal`. Pin numbers use
//! the BCM scheme. The button input is pulled up internally, so the switch
//! must close the line to ground; an open switch reads released.

use crate::button::PushButton;
use crate::sequencer::Lamps;
use crate::types::Lamp;
use rppal::gpio::{Gpio, InputPin, OutputPin};

/// BCM pin driving the car red lamp.
pub const CAR_RED_PIN: u8 = 17;

/// BCM pin driving the car amber lamp.
pub const CAR_AMBER_PIN: u8 = 27;

/// BCM pin driving the car green lamp.
pub const CAR_GREEN_PIN: u8 = 22;

/// BCM pin driving the pedestrian red lamp.
pub const PED_RED_PIN: u8 = 23;

/// BCM pin driving the pedestrian green lamp.
pub const PED_GREEN_PIN: u8 = 24;

/// BCM pin reading the crossing-request button.
pub const BUTTON_PIN: u8 = 25;

/// The five crossing lamps on their GPIO pins.
///
/// Dropping the handle drives every lamp low before the pins are released,
/// so an interrupted run never leaves the crossing lit.
pub struct GpioLamps {
    car_red: OutputPin,
    car_amber: OutputPin,
    car_green: OutputPin,
    ped_red: OutputPin,
    ped_green: OutputPin,
}

impl GpioLamps {
    /// Claims the five lamp pins as outputs, all driven low.
    pub fn new(gpio: &Gpio) -> Result<Self, rppal::gpio::Error> {
        Ok(Self {
            car_red: gpio.get(CAR_RED_PIN)?.into_output_low(),
            car_amber: gpio.get(CAR_AMBER_PIN)?.into_output_low(),
            car_green: gpio.get(CAR_GREEN_PIN)?.into_output_low(),
            ped_red: gpio.get(PED_RED_PIN)?.into_output_low(),
            ped_green: gpio.get(PED_GREEN_PIN)?.into_output_low(),
        })
    }

    fn pin_mut(&mut self, lamp: Lamp) -> &mut OutputPin {
        match lamp {
            Lamp::CarRed => &mut self.car_red,
            Lamp::CarAmber => &mut self.car_amber,
            Lamp::CarGreen => &mut self.car_green,
            Lamp::PedRed => &mut self.ped_red,
            Lamp::PedGreen => &mut self.ped_green,
        }
    }
}

impl Lamps for GpioLamps {
    fn set(&mut self, lamp: Lamp, on: bool) {
        let pin = self.pin_mut(lamp);
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
    }
}

impl Drop for GpioLamps {
    fn drop(&mut self) {
        for lamp in Lamp::ALL {
            self.pin_mut(lamp).set_low();
        }
    }
}

/// The crossing-request button on its GPIO pin.
pub struct GpioButton {
    pin: InputPin,
}

impl GpioButton {
    /// Claims the button pin as a pulled-up input.
    pub fn new(gpio: &Gpio) -> Result<Self, rppal::gpio::Error> {
        Ok(Self {
            pin: gpio.get(BUTTON_PIN)?.into_input_pullup(),
        })
    }
}

impl PushButton for GpioButton {
    fn is_pressed(&mut self) -> bool {
        // Wired active-low: pressing the button pulls the line to ground.
        self.pin.is_low()
    }
}
