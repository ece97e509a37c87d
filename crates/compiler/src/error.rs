//! Compiler error type.
//!
//! One enum for every fallible operation. [`Error::kind`] groups variants the
//! way callers react to them: fix the selection ([`ErrorKind::Configuration`]),
//! pick other numbers ([`ErrorKind::Range`]), resolve a pin clash
//! ([`ErrorKind::RoutingConflict`]) or fix malformed input
//! ([`ErrorKind::Validation`]).

use device::{Hertz, PeripheralBus, PinId, Signal, SettingId, SettingValue, TimerId};

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// A selected value has no hardware meaning here.
    Configuration,
    /// A numeric target cannot be reached within register limits.
    Range,
    /// Two pins claim one single-consumer input.
    RoutingConflict,
    /// Caller input is malformed.
    Validation,
}

/// Stage of the system PLL whose frequency is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllStage {
    /// `input / FPLLIDIV`, outside the `FPLLRNG` band.
    Input,
    /// `input / FPLLIDIV * FPLLMULT`, outside 350-700 MHz.
    Vco,
    /// PLL output above the maximum system clock.
    Output,
}

impl core::fmt::Display for PllStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Input => "PLL input",
            Self::Vco => "PLL VCO",
            Self::Output => "PLL output",
        })
    }
}

/// Every way a compile, plan or aggregation can fail.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// Setting has no bit field, or the value has no code in it.
    #[error("{setting} = {value} has no register encoding")]
    UnmappedValue {
        /// Setting that could not be encoded.
        setting: SettingId,
        /// Value without a code.
        value: SettingValue,
    },

    /// Setting is neither selected nor in the catalog.
    #[error("{0} is not in the setting catalog")]
    MissingSetting(SettingId),

    /// A divider or multiplier is not a legal magnitude.
    #[error("{setting} = {value} is not a legal magnitude")]
    IllegalMagnitude {
        /// Clock setting.
        setting: SettingId,
        /// Rejected value.
        value: SettingValue,
    },

    /// System PLL stage outside its legal band.
    #[error("{stage} of {frequency} Hz is out of range")]
    PllOutOfRange {
        /// Offending stage.
        stage: PllStage,
        /// Frequency at that stage.
        frequency: u64,
    },

    /// The pin cannot carry the peripheral function.
    #[error("{signal} cannot be routed to {pin}")]
    UnroutableSignal {
        /// Requested function.
        signal: Signal,
        /// Requested pin.
        pin: PinId,
    },

    /// The bus clock was requested but the bus is switched off.
    #[error("{0} is disabled")]
    BusDisabled(PeripheralBus),

    /// No prescaler brings the period register within range.
    #[error("no prescaler fits {ticks} ticks into a {max_ticks}-tick timer")]
    NoPrescalerFits {
        /// Ticks needed at the smallest prescaler.
        ticks: u128,
        /// Capacity of the period register (PR + 1).
        max_ticks: u64,
    },

    /// The period is shorter than one timer tick.
    #[error("period is shorter than one tick at {bus}")]
    PeriodTooShort {
        /// Timer input clock.
        bus: Hertz,
    },

    /// `UxBRG` would need more than 16 bits.
    #[error("{target} baud needs BRG {value}, above 0xFFFF")]
    BaudGeneratorOverflow {
        /// Requested baud rate.
        target: u32,
        /// Rounded generator value.
        value: u64,
    },

    /// Achieved baud error exceeds the policy limit.
    #[error("baud error {error_percent:.2}% exceeds {limit:.2}%")]
    BaudErrorTooHigh {
        /// Signed error of the plan.
        error_percent: f64,
        /// Policy limit (absolute).
        limit: f64,
    },

    /// Two different pins claim one input function.
    #[error("{signal} claimed by both {first} and {second}")]
    RoutingConflict {
        /// Contested input.
        signal: Signal,
        /// Pin seen first.
        first: PinId,
        /// Pin seen second.
        second: PinId,
    },

    /// A quantity that must be positive was zero.
    #[error("{0} must be positive")]
    NonPositive(&'static str),

    /// Peripheral bus divider outside 1..=128.
    #[error("{bus} divider {divider} is outside 1..=128")]
    InvalidDivider {
        /// Bus being configured.
        bus: PeripheralBus,
        /// Rejected divider.
        divider: u8,
    },

    /// PBCLK1 and PBCLK7 cannot be switched off.
    #[error("{0} cannot be disabled")]
    BusAlwaysOn(PeripheralBus),

    /// Only Timer2/4/6/8 can be combined with their successor.
    #[error("{0} cannot be combined into a 32-bit timer")]
    CannotPair(TimerId),

    /// The same pin is configured twice.
    #[error("{0} is configured more than once")]
    DuplicatePin(PinId),

    /// Pull-up and pull-down on one pin.
    #[error("{0} has both pull-up and pull-down enabled")]
    ConflictingPulls(PinId),

    /// The package does not bond out this pin.
    #[error("{0} does not exist on this package")]
    UnknownPin(PinId),

    /// A fixed-capacity output is full.
    #[error("too many {0}")]
    CapacityExceeded(&'static str),
}

impl Error {
    /// Broad class of the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnmappedValue { .. }
            | Self::MissingSetting(_)
            | Self::IllegalMagnitude { .. }
            | Self::PllOutOfRange { .. }
            | Self::UnroutableSignal { .. }
            | Self::BusDisabled(_) => ErrorKind::Configuration,
            Self::NoPrescalerFits { .. }
            | Self::PeriodTooShort { .. }
            | Self::BaudGeneratorOverflow { .. }
            | Self::BaudErrorTooHigh { .. } => ErrorKind::Range,
            Self::RoutingConflict { .. } => ErrorKind::RoutingConflict,
            Self::NonPositive(_)
            | Self::InvalidDivider { .. }
            | Self::BusAlwaysOn(_)
            | Self::CannotPair(_)
            | Self::DuplicatePin(_)
            | Self::ConflictingPulls(_)
            | Self::UnknownPin(_)
            | Self::CapacityExceeded(_) => ErrorKind::Validation,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
