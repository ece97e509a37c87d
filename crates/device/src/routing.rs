//! Peripheral Pin Select (PPS) routing tables.
//!
//! Remappable pins are split into four groups. An input function reads from
//! one group's pins: its `<SIGNAL>R` register takes the pin's code within the
//! group. An output pin carries one of its group's output functions: its
//! `RP<pin>R` register takes the function's code within the group.
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), Table 12-2 "Input Pin Selection" and
//!   Table 12-3 "Output Pin Selection"

use crate::port::PinId;

/// One of the four PPS pin groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PpsGroup {
    /// Group 1.
    G1,
    /// Group 2.
    G2,
    /// Group 3.
    G3,
    /// Group 4.
    G4,
}

/// Returned when text names no remappable peripheral function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown peripheral signal")]
pub struct UnknownSignal;

macro_rules! pps_signals {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal,)+ }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $(#[doc = $text] $variant,)+
        }

        impl $name {
            /// Every signal, in datasheet order.
            pub const ALL: &'static [$name] = &[$(Self::$variant,)+];

            /// Datasheet function name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl core::str::FromStr for $name {
            type Err = UnknownSignal;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|sig| sig.name().eq_ignore_ascii_case(s))
                    .ok_or(UnknownSignal)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

pps_signals! {
    /// A remappable peripheral input.
    pub enum InputSignal {
        Int1 => "INT1",
        Int2 => "INT2",
        Int3 => "INT3",
        Int4 => "INT4",
        T2ck => "T2CK",
        T3ck => "T3CK",
        T4ck => "T4CK",
        T5ck => "T5CK",
        T6ck => "T6CK",
        T7ck => "T7CK",
        T8ck => "T8CK",
        T9ck => "T9CK",
        Ic1 => "IC1",
        Ic2 => "IC2",
        Ic3 => "IC3",
        Ic4 => "IC4",
        Ic5 => "IC5",
        Ic6 => "IC6",
        Ic7 => "IC7",
        Ic8 => "IC8",
        Ic9 => "IC9",
        U1rx => "U1RX",
        U2rx => "U2RX",
        U3rx => "U3RX",
        U4rx => "U4RX",
        U5rx => "U5RX",
        U6rx => "U6RX",
        U1cts => "U1CTS",
        U2cts => "U2CTS",
        U3cts => "U3CTS",
        U4cts => "U4CTS",
        U5cts => "U5CTS",
        U6cts => "U6CTS",
        Sdi1 => "SDI1",
        Sdi2 => "SDI2",
        Sdi3 => "SDI3",
        Sdi4 => "SDI4",
        Sdi5 => "SDI5",
        Sdi6 => "SDI6",
        Ss1 => "SS1",
        Ss2 => "SS2",
        Ss3 => "SS3",
        Ss4 => "SS4",
        Ss5 => "SS5",
        Ss6 => "SS6",
        C1rx => "C1RX",
        C2rx => "C2RX",
        Refclki1 => "REFCLKI1",
        Refclki3 => "REFCLKI3",
        Refclki4 => "REFCLKI4",
        Ocfa => "OCFA",
    }
}

pps_signals! {
    /// A remappable peripheral output.
    pub enum OutputSignal {
        U1tx => "U1TX",
        U1rts => "U1RTS",
        U2tx => "U2TX",
        U2rts => "U2RTS",
        U3tx => "U3TX",
        U3rts => "U3RTS",
        U4tx => "U4TX",
        U4rts => "U4RTS",
        U5tx => "U5TX",
        U5rts => "U5RTS",
        U6tx => "U6TX",
        U6rts => "U6RTS",
        Sdo1 => "SDO1",
        Sdo2 => "SDO2",
        Sdo3 => "SDO3",
        Sdo4 => "SDO4",
        Sdo5 => "SDO5",
        Sdo6 => "SDO6",
        Ss1 => "SS1",
        Ss2 => "SS2",
        Ss3 => "SS3",
        Ss4 => "SS4",
        Ss5 => "SS5",
        Ss6 => "SS6",
        Oc1 => "OC1",
        Oc2 => "OC2",
        Oc3 => "OC3",
        Oc4 => "OC4",
        Oc5 => "OC5",
        Oc6 => "OC6",
        Oc7 => "OC7",
        Oc8 => "OC8",
        Oc9 => "OC9",
        C1out => "C1OUT",
        C2out => "C2OUT",
        C1tx => "C1TX",
        C2tx => "C2TX",
        Refclko1 => "REFCLKO1",
        Refclko3 => "REFCLKO3",
        Refclko4 => "REFCLKO4",
    }
}

/// A remappable peripheral function of either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Peripheral reads the pin.
    Input(InputSignal),
    /// Peripheral drives the pin.
    Output(OutputSignal),
}

impl Signal {
    /// Datasheet function name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Input(s) => s.name(),
            Self::Output(s) => s.name(),
        }
    }
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A PPS routing register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PpsRegister {
    /// `<SIGNAL>R`, selects the pin an input function reads.
    Input(InputSignal),
    /// `RP<pin>R`, selects the function an output pin carries.
    Output(PinId),
}

impl core::fmt::Display for PpsRegister {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(signal) => write!(f, "{}R", signal.name()),
            Self::Output(pin) => write!(f, "RP{}{}R", pin.port().letter(), pin.bit()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PpsRegister {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// PPS group membership and codes of one device family.
#[derive(Debug, Clone, Copy)]
pub struct RoutingTable {
    /// Remappable pins: `(pin, group, code of the pin in the group)`.
    pub pins: &'static [(PinId, PpsGroup, u8)],
    /// Group each input function reads from.
    pub inputs: &'static [(InputSignal, PpsGroup)],
    /// Output functions per group: `(function, group, code)`.
    pub outputs: &'static [(OutputSignal, PpsGroup, u8)],
}

impl RoutingTable {
    /// Group and in-group code of a remappable pin.
    pub fn pin(&self, pin: PinId) -> Option<(PpsGroup, u8)> {
        self.pins
            .iter()
            .find(|(p, _, _)| *p == pin)
            .map(|(_, group, code)| (*group, *code))
    }

    /// Group an input function reads from.
    pub fn input_group(&self, signal: InputSignal) -> Option<PpsGroup> {
        self.inputs
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, group)| *group)
    }

    /// Value for `<signal>R` that selects `pin`, if the pin can feed `signal`.
    pub fn input_code(&self, signal: InputSignal, pin: PinId) -> Option<u8> {
        let (pin_group, code) = self.pin(pin)?;
        (self.input_group(signal)? == pin_group).then_some(code)
    }

    /// Value for `RP<pin>R` that selects `signal`, if the pin can carry it.
    pub fn output_code(&self, signal: OutputSignal, pin: PinId) -> Option<u8> {
        let (pin_group, _) = self.pin(pin)?;
        self.outputs
            .iter()
            .find(|(s, group, _)| *s == signal && *group == pin_group)
            .map(|(_, _, code)| *code)
    }

    /// Remappable pins able to carry `signal`.
    pub fn pins_for(&self, signal: Signal) -> impl Iterator<Item = PinId> + '_ {
        self.pins.iter().filter_map(move |(pin, _, _)| {
            let routable = match signal {
                Signal::Input(s) => self.input_code(s, *pin).is_some(),
                Signal::Output(s) => self.output_code(s, *pin).is_some(),
            };
            routable.then_some(*pin)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::port::Port;

    fn pin(port: Port, bit: u8) -> PinId {
        PinId::new(port, bit).unwrap()
    }

    #[test]
    fn signal_counts() {
        assert_eq!(InputSignal::ALL.len(), 51);
        assert_eq!(OutputSignal::ALL.len(), 40);
    }

    #[test]
    fn names_parse_back() {
        for s in InputSignal::ALL {
            assert_eq!(s.name().parse(), Ok(*s));
        }
        for s in OutputSignal::ALL {
            assert_eq!(s.name().parse(), Ok(*s));
        }
        assert_eq!("u1rx".parse(), Ok(InputSignal::U1rx));
        assert_eq!("U1RX".parse::<OutputSignal>(), Err(UnknownSignal));
    }

    #[test]
    fn register_names() {
        assert_eq!(PpsRegister::Input(InputSignal::U1rx).to_string(), "U1RXR");
        assert_eq!(PpsRegister::Output(pin(Port::B, 3)).to_string(), "RPB3R");
    }

    #[test]
    fn codes_require_matching_group() {
        static TABLE: RoutingTable = RoutingTable {
            pins: &[
                (PinId::at(Port::B, 9), PpsGroup::G1, 5),
                (PinId::at(Port::B, 3), PpsGroup::G2, 8),
            ],
            inputs: &[(InputSignal::U1rx, PpsGroup::G1)],
            outputs: &[(OutputSignal::U1tx, PpsGroup::G2, 1)],
        };
        assert_eq!(TABLE.input_code(InputSignal::U1rx, pin(Port::B, 9)), Some(5));
        assert_eq!(TABLE.input_code(InputSignal::U1rx, pin(Port::B, 3)), None);
        assert_eq!(TABLE.output_code(OutputSignal::U1tx, pin(Port::B, 3)), Some(1));
        assert_eq!(TABLE.output_code(OutputSignal::U1tx, pin(Port::B, 9)), None);
        assert_eq!(TABLE.input_code(InputSignal::U2rx, pin(Port::B, 9)), None);
        let pins: Vec<_> = TABLE.pins_for(Signal::Input(InputSignal::U1rx)).collect();
        assert_eq!(pins, [pin(Port::B, 9)]);
    }
}
