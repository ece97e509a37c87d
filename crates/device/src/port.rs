//! I/O ports and pin identifiers.
//!
//! The 144-pin PIC32MZ EF has ports A-K (there is no port I), each up to 16
//! pins wide. Not every bit is bonded out; [`PortTable`] records which pins
//! exist so aggregation can reject pins the package does not have.

/// An I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    /// PORTA.
    A,
    /// PORTB.
    B,
    /// PORTC.
    C,
    /// PORTD.
    D,
    /// PORTE.
    E,
    /// PORTF.
    F,
    /// PORTG.
    G,
    /// PORTH.
    H,
    /// PORTJ.
    J,
    /// PORTK.
    K,
}

impl Port {
    /// Number of ports.
    pub const COUNT: usize = 10;

    /// Every port, alphabetical.
    pub const ALL: [Port; Self::COUNT] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::J,
        Self::K,
    ];

    /// Port letter.
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::H => 'H',
            Self::J => 'J',
            Self::K => 'K',
        }
    }

    /// Position in [`Self::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::E => 4,
            Self::F => 5,
            Self::G => 6,
            Self::H => 7,
            Self::J => 8,
            Self::K => 9,
        }
    }

    /// Port for an upper- or lower-case letter.
    pub fn from_letter(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        Self::ALL.into_iter().find(|p| p.letter() == c)
    }
}

impl core::fmt::Display for Port {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PORT{}", self.letter())
    }
}

/// A physical pin: port plus bit index 0..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    port: Port,
    bit: u8,
}

impl PinId {
    /// Returns `None` if `bit > 15`.
    pub const fn new(port: Port, bit: u8) -> Option<Self> {
        if bit <= 15 {
            Some(Self { port, bit })
        } else {
            None
        }
    }

    /// Const constructor for static tables; `bit` is masked to 0..=15.
    pub const fn at(port: Port, bit: u8) -> Self {
        Self {
            port,
            bit: bit & 0x0F,
        }
    }

    /// Port of the pin.
    pub const fn port(self) -> Port {
        self.port
    }

    /// Bit index within the port.
    pub const fn bit(self) -> u8 {
        self.bit
    }

    /// Single-bit mask within the port registers.
    #[allow(clippy::arithmetic_side_effects)] // bit ≤ 15 by construction
    pub const fn mask(self) -> u16 {
        1u16 << (self.bit & 0x0F)
    }
}

impl core::fmt::Display for PinId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "R{}{}", self.port.letter(), self.bit)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PinId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returned when text is not a pin name like `RB9`, `B9` or `RPB9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a pin name (expected e.g. RB9)")]
pub struct InvalidPinName;

impl core::str::FromStr for PinId {
    type Err = InvalidPinName;

    /// Accepts `RB9`, `B9` and the PPS form `RPB9`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let body = if s.len() > 2 && s.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("RP")) {
            s.get(2..)
        } else if s.len() > 2 && s.get(..1).is_some_and(|p| p.eq_ignore_ascii_case("R")) {
            s.get(1..)
        } else {
            Some(s)
        }
        .ok_or(InvalidPinName)?;

        let mut chars = body.chars();
        let port = chars
            .next()
            .and_then(Port::from_letter)
            .ok_or(InvalidPinName)?;
        let bit = chars.as_str().parse::<u8>().map_err(|_| InvalidPinName)?;
        Self::new(port, bit).ok_or(InvalidPinName)
    }
}

/// Implemented pins of one package.
#[derive(Debug, Clone, Copy)]
pub struct PortTable {
    /// Bonded-out pin mask per port, indexed by [`Port::index`].
    pub implemented: [u16; Port::COUNT],
}

impl PortTable {
    /// Whether `pin` exists on this package.
    pub fn has(&self, pin: PinId) -> bool {
        self.implemented(pin.port()) & pin.mask() != 0
    }

    /// Implemented-pin mask of `port`.
    pub fn implemented(&self, port: Port) -> u16 {
        self.implemented.get(port.index()).copied().unwrap_or(0)
    }
}
