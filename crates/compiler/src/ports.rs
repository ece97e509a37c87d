//! Port Bitmask Aggregator.
//!
//! Turns per-pin GPIO choices into the per-port SET/CLR masks a startup
//! routine writes, e.g. `TRISBCLR = direction_output`. One bit per pin, at
//! the pin's index within its port.
//!
//! | Mask               | Register   | GPIO out | GPIO in | Analog |
//! |--------------------|------------|----------|---------|--------|
//! | `analog_disable`   | ANSELxCLR  | ✓        | ✓       |        |
//! | `direction_output` | TRISxCLR   | ✓        |         |        |
//! | `direction_input`  | TRISxSET   |          | ✓       | ✓      |
//! | `latch_set/clear`  | LATxSET/CLR| by level |         |        |
//! | `pull_up/down`     | CNPUx/CNPDx| flag     | flag    |        |
//! | `open_drain`       | ODCxSET    | flag     |         |        |
//!
//! Peripheral pins contribute nothing here; see [`crate::routing`].

use core::ops::{BitOr, BitOrAssign};

use device::{PinId, Port, PortTable, Signal};
use heapless::Vec;

use crate::error::Error;

/// Pin direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pin is read.
    #[default]
    Input,
    /// Pin is driven.
    Output,
}

/// Output level after reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Driven low.
    #[default]
    Low,
    /// Driven high.
    High,
}

/// What a pin is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital I/O under software control.
    Gpio,
    /// Analog input (ADC, comparator).
    Analog,
    /// Remappable peripheral function.
    Peripheral(Signal),
}

/// Configuration of one physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinConfiguration {
    /// Pin being configured.
    pub pin: PinId,
    /// Usage of the pin.
    pub mode: PinMode,
    /// Direction (GPIO only).
    pub direction: Direction,
    /// Level after reset (GPIO outputs only).
    pub initial_level: Level,
    /// Weak pull-up.
    pub pull_up: bool,
    /// Weak pull-down.
    pub pull_down: bool,
    /// Open-drain output.
    pub open_drain: bool,
}

impl PinConfiguration {
    const fn with_mode(pin: PinId, mode: PinMode, direction: Direction) -> Self {
        Self {
            pin,
            mode,
            direction,
            initial_level: Level::Low,
            pull_up: false,
            pull_down: false,
            open_drain: false,
        }
    }

    /// GPIO output starting at `level`.
    pub const fn gpio_output(pin: PinId, level: Level) -> Self {
        let mut cfg = Self::with_mode(pin, PinMode::Gpio, Direction::Output);
        cfg.initial_level = level;
        cfg
    }

    /// GPIO input.
    pub const fn gpio_input(pin: PinId) -> Self {
        Self::with_mode(pin, PinMode::Gpio, Direction::Input)
    }

    /// Analog input.
    pub const fn analog(pin: PinId) -> Self {
        Self::with_mode(pin, PinMode::Analog, Direction::Input)
    }

    /// Pin carrying a remappable peripheral function.
    pub const fn peripheral(pin: PinId, signal: Signal) -> Self {
        let direction = match signal {
            Signal::Input(_) => Direction::Input,
            Signal::Output(_) => Direction::Output,
        };
        Self::with_mode(pin, PinMode::Peripheral(signal), direction)
    }

    /// Enable the weak pull-up.
    #[must_use]
    pub const fn pull_up(mut self) -> Self {
        self.pull_up = true;
        self
    }

    /// Enable the weak pull-down.
    #[must_use]
    pub const fn pull_down(mut self) -> Self {
        self.pull_down = true;
        self
    }

    /// Make the output open-drain.
    #[must_use]
    pub const fn open_drain(mut self) -> Self {
        self.open_drain = true;
        self
    }

    /// Masks this pin alone contributes.
    pub fn masks(&self) -> PortMasks {
        let bit = self.pin.mask();
        let mut m = PortMasks::default();
        match self.mode {
            PinMode::Gpio => {
                m.analog_disable = bit;
                match self.direction {
                    Direction::Output => {
                        m.direction_output = bit;
                        match self.initial_level {
                            Level::High => m.latch_set = bit,
                            Level::Low => m.latch_clear = bit,
                        }
                        if self.open_drain {
                            m.open_drain = bit;
                        }
                    }
                    Direction::Input => m.direction_input = bit,
                }
                if self.pull_up {
                    m.pull_up = bit;
                }
                if self.pull_down {
                    m.pull_down = bit;
                }
            }
            PinMode::Analog => m.direction_input = bit,
            PinMode::Peripheral(_) => {}
        }
        m
    }
}

/// SET/CLR masks of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortMasks {
    /// `ANSELxCLR`.
    pub analog_disable: u16,
    /// `TRISxCLR`.
    pub direction_output: u16,
    /// `TRISxSET`.
    pub direction_input: u16,
    /// `LATxCLR`.
    pub latch_clear: u16,
    /// `LATxSET`.
    pub latch_set: u16,
    /// `CNPUxSET`.
    pub pull_up: u16,
    /// `CNPDxSET`.
    pub pull_down: u16,
    /// `ODCxSET`.
    pub open_drain: u16,
}

impl PortMasks {
    /// No bits set anywhere.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `(register suffix, mask)` pairs, e.g. `("ANSEL", "CLR", mask)`.
    pub fn registers(&self) -> [(&'static str, &'static str, u16); 8] {
        [
            ("ANSEL", "CLR", self.analog_disable),
            ("TRIS", "CLR", self.direction_output),
            ("TRIS", "SET", self.direction_input),
            ("LAT", "CLR", self.latch_clear),
            ("LAT", "SET", self.latch_set),
            ("CNPU", "SET", self.pull_up),
            ("CNPD", "SET", self.pull_down),
            ("ODC", "SET", self.open_drain),
        ]
    }
}

impl BitOr for PortMasks {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            analog_disable: self.analog_disable | rhs.analog_disable,
            direction_output: self.direction_output | rhs.direction_output,
            direction_input: self.direction_input | rhs.direction_input,
            latch_clear: self.latch_clear | rhs.latch_clear,
            latch_set: self.latch_set | rhs.latch_set,
            pull_up: self.pull_up | rhs.pull_up,
            pull_down: self.pull_down | rhs.pull_down,
            open_drain: self.open_drain | rhs.open_drain,
        }
    }
}

impl BitOrAssign for PortMasks {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Masks of every port with at least one bit set, sorted by port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortMaskSet {
    entries: Vec<(Port, PortMasks), { Port::COUNT }>,
}

impl PortMaskSet {
    /// Masks of `port`, if any pin contributed to it.
    pub fn get(&self, port: Port) -> Option<&PortMasks> {
        self.entries
            .iter()
            .find(|(p, _)| *p == port)
            .map(|(_, m)| m)
    }

    /// `(port, masks)` in port order.
    pub fn iter(&self) -> impl Iterator<Item = (Port, PortMasks)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of ports touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no port is touched.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BitOr for PortMaskSet {
    type Output = Self;

    /// Port-wise union.
    fn bitor(self, rhs: Self) -> Self {
        let mut per_port = [PortMasks::default(); Port::COUNT];
        for (port, masks) in self.iter().chain(rhs.iter()) {
            if let Some(slot) = per_port.get_mut(port.index()) {
                *slot |= masks;
            }
        }
        Self::from_ports(&per_port)
    }
}

impl PortMaskSet {
    fn from_ports(per_port: &[PortMasks; Port::COUNT]) -> Self {
        // One entry per port at most, so `Port::COUNT` capacity always holds.
        let entries = Port::ALL
            .into_iter()
            .zip(per_port.iter().copied())
            .filter(|(_, masks)| !masks.is_empty())
            .collect();
        Self { entries }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PortMaskSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(port, masks)| (port.letter(), masks)))
    }
}

/// Aggregate GPIO and analog pins into per-port masks.
///
/// Rejects pins the package lacks, pins configured twice and pins with
/// both pulls enabled, before any mask is built.
pub fn aggregate(ports: &PortTable, pins: &[PinConfiguration]) -> Result<PortMaskSet, Error> {
    let mut seen = [0u16; Port::COUNT];
    for cfg in pins {
        let pin = cfg.pin;
        if !ports.has(pin) {
            return Err(Error::UnknownPin(pin));
        }
        let slot = seen
            .get_mut(pin.port().index())
            .ok_or(Error::UnknownPin(pin))?;
        if *slot & pin.mask() != 0 {
            return Err(Error::DuplicatePin(pin));
        }
        *slot |= pin.mask();
        if cfg.pull_up && cfg.pull_down {
            return Err(Error::ConflictingPulls(pin));
        }
    }

    let mut per_port = [PortMasks::default(); Port::COUNT];
    for cfg in pins {
        if let Some(slot) = per_port.get_mut(cfg.pin.port().index()) {
            *slot |= cfg.masks();
        }
    }
    let set = PortMaskSet::from_ports(&per_port);
    tracing::debug!(pins = pins.len(), ports = set.len(), "aggregated port masks");
    Ok(set)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
