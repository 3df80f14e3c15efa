//! Core types: lamp identifiers, grouped lamp patterns, and the crossing phase.

/// One of the five lamp outputs on the crossing.
///
/// Lamps are write-only: the controller sets levels and never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    /// Red lamp facing car traffic.
    CarRed,

    /// Amber lamp facing car traffic.
    CarAmber,

    /// Green lamp facing car traffic.
    CarGreen,

    /// Red "don't walk" lamp facing pedestrians.
    PedRed,

    /// Green "walk" lamp facing pedestrians.
    PedGreen,
}

impl Lamp {
    /// Every lamp, in the fixed write order used for whole-display updates.
    pub const ALL: [Lamp; 5] = [
        Lamp::CarRed,
        Lamp::CarAmber,
        Lamp::CarGreen,
        Lamp::PedRed,
        Lamp::PedGreen,
    ];
}

/// Levels for the three car-facing lamps, written together as one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarLights {
    /// Car red lamp level.
    pub red: bool,

    /// Car amber lamp level.
    pub amber: bool,

    /// Car green lamp level.
    pub green: bool,
}

impl CarLights {
    /// All car lamps off.
    pub const OFF: Self = Self {
        red: false,
        amber: false,
        green: false,
    };

    /// Green only: cars may drive.
    pub const GREEN: Self = Self {
        red: false,
        amber: false,
        green: true,
    };

    /// Amber only: cars must prepare to stop.
    pub const AMBER: Self = Self {
        red: false,
        amber: true,
        green: false,
    };

    /// Red only: cars must stop.
    pub const RED: Self = Self {
        red: true,
        amber: false,
        green: false,
    };

    /// Red and amber together: cars about to be released.
    pub const RED_AMBER: Self = Self {
        red: true,
        amber: true,
        green: false,
    };
}

/// Levels for the two pedestrian lamps, written together as one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedLights {
    /// Pedestrian red lamp level.
    pub red: bool,

    /// Pedestrian green lamp level.
    pub green: bool,
}

impl PedLights {
    /// Both pedestrian lamps off.
    pub const OFF: Self = Self {
        red: false,
        green: false,
    };

    /// Red only: pedestrians must wait.
    pub const RED: Self = Self {
        red: true,
        green: false,
    };

    /// Green only: pedestrians may cross.
    pub const GREEN: Self = Self {
        red: false,
        green: true,
    };
}

/// The phase of the crossing cycle. Exactly one phase is active at any instant.
///
/// Phases form a fixed linear chain from [`Phase::Idle`] through
/// [`Phase::CarRedAmber`] and back to idle; [`Phase::next`] walks the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// At rest between crossings. Car green, pedestrian red.
    Idle,

    /// Cars warned to stop. Car amber, pedestrian still red.
    CarAmber,

    /// Cars stopped. Car red, pedestrian still red.
    CarRed,

    /// Pedestrians crossing. Pedestrian green, car red.
    PedGreen,

    /// Crossing window closing. Pedestrian green toggling, car red.
    PedBlinking,

    /// Pedestrians stopped again. Pedestrian red, car still red.
    PedRed,

    /// Cars about to be released. Car red and amber together.
    CarRedAmber,
}

impl Phase {
    /// Returns the phase that follows this one in the fixed cycle.
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle => Phase::CarAmber,
            Phase::CarAmber => Phase::CarRed,
            Phase::CarRed => Phase::PedGreen,
            Phase::PedGreen => Phase::PedBlinking,
            Phase::PedBlinking => Phase::PedRed,
            Phase::PedRed => Phase::CarRedAmber,
            Phase::CarRedAmber => Phase::Idle,
        }
    }

    /// Returns the car lamp pattern this phase applies, if it touches the
    /// car group at all.
    pub fn car_lights(self) -> Option<CarLights> {
        match self {
            Phase::Idle => Some(CarLights::GREEN),
            Phase::CarAmber => Some(CarLights::AMBER),
            Phase::CarRed => Some(CarLights::RED),
            Phase::CarRedAmber => Some(CarLights::RED_AMBER),
            Phase::PedGreen | Phase::PedBlinking | Phase::PedRed => None,
        }
    }

    /// Returns the pedestrian lamp pattern this phase applies, if it touches
    /// the pedestrian group at all.
    ///
    /// [`Phase::PedBlinking`] returns `None`: the blink toggles the green
    /// lamp on its own and leaves the rest of the display untouched.
    pub fn ped_lights(self) -> Option<PedLights> {
        match self {
            Phase::Idle => Some(PedLights::RED),
            Phase::PedGreen => Some(PedLights::GREEN),
            Phase::PedRed => Some(PedLights::RED),
            Phase::CarAmber | Phase::CarRed | Phase::PedBlinking | Phase::CarRedAmber => None,
        }
    }
}
