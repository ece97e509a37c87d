//! Timer identities, classes and TxCON layout.
//!
//! # Sources
//!
//! - PIC32 Family Reference Manual, Section 14 "Timers" (DS60001105)
//! - Timer1 is Type A; Timer2-9 are Type B and pair as 2/3, 4/5, 6/7, 8/9

/// Timer hardware class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerClass {
    /// Timer1: asynchronous capable, four prescalers.
    TypeA,
    /// Timer2-9: eight prescalers, pairable into 32-bit timers.
    TypeB,
}

impl TimerClass {
    /// Supported prescalers, ascending.
    pub const fn prescalers(self) -> &'static [u16] {
        match self {
            Self::TypeA => &[1, 8, 64, 256],
            Self::TypeB => &[1, 2, 4, 8, 16, 32, 64, 256],
        }
    }

    /// Width of the TCKPS field.
    pub const fn tckps_width(self) -> u8 {
        match self {
            Self::TypeA => 2,
            Self::TypeB => 3,
        }
    }

    /// TCKPS code for `prescaler` (its index in [`Self::prescalers`]).
    pub fn tckps(self, prescaler: u16) -> Option<u8> {
        self.prescalers()
            .iter()
            .position(|p| *p == prescaler)
            .and_then(|i| u8::try_from(i).ok())
    }
}

/// Counter width of a timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterWidth {
    /// Single timer, PR ≤ 0xFFFF.
    Bits16,
    /// Paired Type B timers, PR ≤ 0xFFFF_FFFF.
    Bits32,
}

impl RegisterWidth {
    /// Largest number of ticks per period (PR + 1).
    pub const fn max_ticks(self) -> u64 {
        match self {
            Self::Bits16 => 0x1_0000,
            Self::Bits32 => 0x1_0000_0000,
        }
    }
}

/// One of Timer1..Timer9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerId(u8);

impl TimerId {
    /// Timer1.
    pub const T1: Self = Self(1);

    /// Returns `None` outside 1..=9.
    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= 9 {
            Some(Self(n))
        } else {
            None
        }
    }

    /// Timer number.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Hardware class.
    pub const fn class(self) -> TimerClass {
        if self.0 == 1 {
            TimerClass::TypeA
        } else {
            TimerClass::TypeB
        }
    }

    /// Odd partner of an even Type B timer (2 → 3, 4 → 5, ...).
    ///
    /// Only even timers can master a 32-bit pair.
    pub const fn pair_partner(self) -> Option<Self> {
        if self.0 % 2 == 0 {
            Some(Self(self.0.saturating_add(1)))
        } else {
            None
        }
    }
}

impl core::fmt::Display for TimerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Timer{}", self.0)
    }
}

/// Returned when a timer name is not `1..=9`, `T3` or `Timer3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("timer must be 1..=9")]
pub struct UnknownTimer;

impl core::str::FromStr for TimerId {
    type Err = UnknownTimer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("Timer")
            .or_else(|| s.strip_prefix("timer"))
            .or_else(|| s.strip_prefix('T'))
            .or_else(|| s.strip_prefix('t'))
            .unwrap_or(s);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or(UnknownTimer)
    }
}

/// `TxCON.ON`.
pub const TCON_ON: u32 = 1 << 15;
/// Bit position of `TxCON.TCKPS`.
pub const TCON_TCKPS_SHIFT: u8 = 4;
/// `TxCON.T32` (Type B only).
pub const TCON_T32: u32 = 1 << 3;
