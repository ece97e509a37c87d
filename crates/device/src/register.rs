//! Configuration word identifiers.
//!
//! The PIC32MZ EF boot flash holds four 32-bit configuration words that the
//! device latches at reset. An erased flash word reads `0xFFFF_FFFF`, so any
//! bit the toolchain does not program stays high.
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), §34.1 "Configuration Bits"
//! - Boot Flash Sequence 1 configuration space at `0x1FC0_FFC0`

/// Value of an erased (unprogrammed) configuration word.
pub const ERASED_WORD: u32 = 0xFFFF_FFFF;

/// One of the four DEVCFG configuration words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterId {
    /// Debug, JTAG, ECC, oscillator gain.
    Devcfg0,
    /// Oscillator selection, watchdog and deadman timers.
    Devcfg1,
    /// System and USB PLL.
    Devcfg2,
    /// User ID, Ethernet pins, one-way lock bits.
    Devcfg3,
}

impl RegisterId {
    /// Number of configuration words.
    pub const COUNT: usize = 4;

    /// All words in index order.
    pub const ALL: [RegisterId; Self::COUNT] =
        [Self::Devcfg0, Self::Devcfg1, Self::Devcfg2, Self::Devcfg3];

    /// All words in the order toolchain headers list them (DEVCFG3 first).
    pub const RENDER_ORDER: [RegisterId; Self::COUNT] =
        [Self::Devcfg3, Self::Devcfg2, Self::Devcfg1, Self::Devcfg0];

    /// Zero-based index (`DEVCFGn` → `n`).
    pub const fn index(self) -> usize {
        match self {
            Self::Devcfg0 => 0,
            Self::Devcfg1 => 1,
            Self::Devcfg2 => 2,
            Self::Devcfg3 => 3,
        }
    }

    /// Register name as printed in the datasheet.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Devcfg0 => "DEVCFG0",
            Self::Devcfg1 => "DEVCFG1",
            Self::Devcfg2 => "DEVCFG2",
            Self::Devcfg3 => "DEVCFG3",
        }
    }

    /// Physical address in Boot Flash Sequence 1.
    pub const fn address(self) -> u32 {
        match self {
            Self::Devcfg3 => 0x1FC0_FFC0,
            Self::Devcfg2 => 0x1FC0_FFC4,
            Self::Devcfg1 => 0x1FC0_FFC8,
            Self::Devcfg0 => 0x1FC0_FFCC,
        }
    }
}

impl core::fmt::Display for RegisterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_all_order() {
        for (i, reg) in RegisterId::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i, "{reg} has index {}", reg.index());
        }
    }

    /// Configuration words are consecutive, DEVCFG3 at the lowest address.
    #[test]
    fn addresses_are_consecutive_words() {
        let addrs = RegisterId::RENDER_ORDER.map(RegisterId::address);
        for pair in addrs.windows(2) {
            assert_eq!(pair[1] - pair[0], 4);
        }
    }
}
