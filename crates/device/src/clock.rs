//! Clock sources, PLL limits and peripheral buses.
//!
//! ```text
//!   FRC 8 MHz ──┐
//!               ├─ FPLLICLK ─ ÷FPLLIDIV ─ ×FPLLMULT ─ ÷FPLLODIV ─┐
//!   POSC ───────┘       (PLL input)     (VCO 350-700 MHz)        │
//!                                                                ├─ FNOSC ─ SYSCLK
//!   FRC, POSC, SOSC, LPRC ───────────────────────────────────────┘     │
//!                                                                      ├─ ÷PB1DIV ─ PBCLK1
//!                                                                      ├─ ...
//!                                                                      └─ ÷PB8DIV ─ PBCLK8
//! ```
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), §8 "Oscillator Configuration"
//! - Table 37-16 "System Timing Requirements" (SYSCLK ≤ 252 MHz)

/// A frequency in hertz.
///
/// Zero is not representable; every clock in the tree is running or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hertz(u32);

impl Hertz {
    /// Returns `None` for 0 Hz.
    pub const fn new(hz: u32) -> Option<Self> {
        if hz == 0 {
            None
        } else {
            Some(Self(hz))
        }
    }

    /// Whole megahertz. Returns `None` for 0 or on overflow.
    pub const fn from_mhz(mhz: u32) -> Option<Self> {
        match mhz.checked_mul(1_000_000) {
            Some(hz) => Self::new(hz),
            None => None,
        }
    }

    /// Raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Hertz {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hz = self.0;
        if hz % 1_000_000 == 0 {
            write!(f, "{} MHz", hz / 1_000_000)
        } else if hz % 1_000 == 0 {
            write!(f, "{} kHz", hz / 1_000)
        } else {
            write!(f, "{hz} Hz")
        }
    }
}

/// Fixed oscillator frequencies on the reference board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClockSources {
    /// Internal fast RC oscillator.
    pub frc: Hertz,
    /// Primary (crystal / external) oscillator.
    pub posc: Hertz,
    /// Secondary 32 kHz crystal.
    pub sosc: Hertz,
    /// Internal low-power RC.
    pub lprc: Hertz,
}

impl ClockSources {
    /// FRC 8 MHz, 24 MHz crystal, 32.768 kHz SOSC, 32 kHz LPRC.
    pub const REFERENCE: Self = Self {
        frc: Hertz(8_000_000),
        posc: Hertz(24_000_000),
        sosc: Hertz(32_768),
        lprc: Hertz(32_000),
    };
}

impl Default for ClockSources {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Lowest legal PLL VCO frequency.
pub const PLL_VCO_MIN: Hertz = Hertz(350_000_000);
/// Highest legal PLL VCO frequency.
pub const PLL_VCO_MAX: Hertz = Hertz(700_000_000);
/// Highest legal system clock.
pub const SYSCLK_MAX: Hertz = Hertz(252_000_000);

/// `FPLLRNG` bands as `(token, min_hz, max_hz)` of the PLL input.
///
/// Bands overlap; any band bracketing the input is acceptable.
pub const PLL_INPUT_RANGES: &[(&str, u32, u32)] = &[
    ("RANGE_5_10_MHZ", 5_000_000, 10_000_000),
    ("RANGE_8_16_MHZ", 8_000_000, 16_000_000),
    ("RANGE_13_26_MHZ", 13_000_000, 26_000_000),
    ("RANGE_21_42_MHZ", 21_000_000, 42_000_000),
    ("RANGE_34_68_MHZ", 34_000_000, 68_000_000),
];

/// `FPLLRNG` token meaning the PLL input filter is bypassed.
pub const PLL_RANGE_BYPASS: &str = "RANGE_BYPASS";

/// Whether the `FPLLRNG` band `token` brackets `input`.
///
/// `RANGE_BYPASS` accepts any input. Unknown tokens accept nothing.
pub fn pll_range_accepts(token: &str, input: Hertz) -> bool {
    if token == PLL_RANGE_BYPASS {
        return true;
    }
    PLL_INPUT_RANGES
        .iter()
        .find(|(t, _, _)| *t == token)
        .is_some_and(|(_, lo, hi)| (*lo..=*hi).contains(&input.get()))
}

/// One of the eight peripheral bus clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralBus {
    /// Flash, CPU-side SFRs.
    Pb1,
    /// PMP, I2C, UART, SPI.
    Pb2,
    /// ADC, comparators, timers, output compare, input capture.
    Pb3,
    /// Ports.
    Pb4,
    /// Crypto, RNG, USB, CAN, Ethernet, SQI.
    Pb5,
    /// Unused on this family; present in the OSC register map.
    Pb6,
    /// CPU and deadman timer.
    Pb7,
    /// EBI.
    Pb8,
}

impl PeripheralBus {
    /// Number of buses.
    pub const COUNT: usize = 8;

    /// Every bus in index order.
    pub const ALL: [PeripheralBus; Self::COUNT] = [
        Self::Pb1,
        Self::Pb2,
        Self::Pb3,
        Self::Pb4,
        Self::Pb5,
        Self::Pb6,
        Self::Pb7,
        Self::Pb8,
    ];

    /// Largest PBxDIV divider.
    pub const MAX_DIVIDER: u8 = 128;

    /// Zero-based index (`PBn` → `n - 1`).
    pub const fn index(self) -> usize {
        match self {
            Self::Pb1 => 0,
            Self::Pb2 => 1,
            Self::Pb3 => 2,
            Self::Pb4 => 3,
            Self::Pb5 => 4,
            Self::Pb6 => 5,
            Self::Pb7 => 6,
            Self::Pb8 => 7,
        }
    }

    /// Datasheet clock name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pb1 => "PBCLK1",
            Self::Pb2 => "PBCLK2",
            Self::Pb3 => "PBCLK3",
            Self::Pb4 => "PBCLK4",
            Self::Pb5 => "PBCLK5",
            Self::Pb6 => "PBCLK6",
            Self::Pb7 => "PBCLK7",
            Self::Pb8 => "PBCLK8",
        }
    }

    /// Name of the divider register.
    pub const fn div_register(self) -> &'static str {
        match self {
            Self::Pb1 => "PB1DIV",
            Self::Pb2 => "PB2DIV",
            Self::Pb3 => "PB3DIV",
            Self::Pb4 => "PB4DIV",
            Self::Pb5 => "PB5DIV",
            Self::Pb6 => "PB6DIV",
            Self::Pb7 => "PB7DIV",
            Self::Pb8 => "PB8DIV",
        }
    }

    /// PBCLK1 and PBCLK7 are always on.
    pub const fn can_disable(self) -> bool {
        !matches!(self, Self::Pb1 | Self::Pb7)
    }

    /// Divider after reset: `/1` for PBCLK7, `/2` for the rest.
    pub const fn default_divider(self) -> u8 {
        match self {
            Self::Pb7 => 1,
            _ => 2,
        }
    }
}

impl core::fmt::Display for PeripheralBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bus clocking the timers.
pub const TIMER_BUS: PeripheralBus = PeripheralBus::Pb3;
/// Bus clocking the UARTs.
pub const UART_BUS: PeripheralBus = PeripheralBus::Pb2;

/// `PBxDIV.ON`.
pub const PBDIV_ON: u32 = 1 << 15;
/// `PBxDIV.PBDIV` (divider minus one).
pub const PBDIV_MASK: u32 = 0x7F;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn hertz_rejects_zero() {
        assert!(Hertz::new(0).is_none());
        assert_eq!(Hertz::from_mhz(200).map(Hertz::get), Some(200_000_000));
        assert!(Hertz::from_mhz(5_000).is_none(), "overflows u32");
    }

    #[test]
    fn hertz_display_picks_unit() {
        assert_eq!(Hertz::from_mhz(8).unwrap().to_string(), "8 MHz");
        assert_eq!(Hertz::new(32_000).unwrap().to_string(), "32 kHz");
        assert_eq!(Hertz::new(32_768).unwrap().to_string(), "32768 Hz");
    }

    #[test]
    fn pll_ranges_bracket_frc() {
        let frc = ClockSources::REFERENCE.frc;
        assert!(pll_range_accepts("RANGE_5_10_MHZ", frc));
        assert!(pll_range_accepts("RANGE_8_16_MHZ", frc));
        assert!(!pll_range_accepts("RANGE_13_26_MHZ", frc));
        assert!(pll_range_accepts(PLL_RANGE_BYPASS, frc));
        assert!(!pll_range_accepts("RANGE_NOPE", frc));
    }

    #[test]
    fn only_pb1_and_pb7_are_always_on() {
        let fixed: Vec<_> = PeripheralBus::ALL
            .into_iter()
            .filter(|b| !b.can_disable())
            .collect();
        assert_eq!(fixed, [PeripheralBus::Pb1, PeripheralBus::Pb7]);
    }

    #[test]
    fn bus_index_matches_all_order() {
        for (i, bus) in PeripheralBus::ALL.iter().enumerate() {
            assert_eq!(bus.index(), i, "{bus}");
        }
    }
}
