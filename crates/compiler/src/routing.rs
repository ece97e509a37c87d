//! Pin-Routing Mapper: peripheral pins → PPS register writes.
//!
//! ```text
//! input  U1RX on RPB9:  U1RXR = code of RB9 in U1RX's group
//! output U1TX on RPB3:  RPB3R = code of U1TX in RB3's group
//! ```
//!
//! PPS registers are only writable while `CFGCON.IOLOCK` is clear, so a
//! non-empty plan is bracketed by the unlock sequence.

use device::{InputSignal, OutputSignal, PinId, PpsRegister, RoutingTable, Signal};
use heapless::Vec;

use crate::error::Error;
use crate::ports::{PinConfiguration, PinMode};

/// Largest number of writes one plan holds.
pub const MAX_ROUTING_WRITES: usize = 128;

/// One PPS register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingWrite {
    /// Register written.
    pub register: PpsRegister,
    /// Value written.
    pub value: u8,
    /// Function routed.
    pub signal: Signal,
    /// Pin routed.
    pub pin: PinId,
}

impl RoutingWrite {
    /// Human description, e.g. `U1RX <- RPB9` or `U1TX -> RPB3`.
    pub fn description(&self) -> Description {
        Description(*self)
    }
}

/// [`core::fmt::Display`] adapter returned by [`RoutingWrite::description`].
#[derive(Debug, Clone, Copy)]
pub struct Description(RoutingWrite);

impl core::fmt::Display for Description {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let w = &self.0;
        let arrow = match w.signal {
            Signal::Input(_) => "<-",
            Signal::Output(_) => "->",
        };
        write!(
            f,
            "{} {arrow} RP{}{}",
            w.signal,
            w.pin.port().letter(),
            w.pin.bit()
        )
    }
}

impl core::fmt::Display for RoutingWrite {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} = {}; // {}", self.register, self.value, self.description())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RoutingWrite {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("RoutingWrite", 5)?;
        s.serialize_field("register", &format_args!("{}", self.register))?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("signal", &self.signal)?;
        s.serialize_field("pin", &self.pin)?;
        s.serialize_field("description", &format_args!("{}", self.description()))?;
        s.end()
    }
}

/// Ordered PPS writes: inputs by signal, then outputs by pin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoutingPlan {
    writes: Vec<RoutingWrite, MAX_ROUTING_WRITES>,
}

impl RoutingPlan {
    /// Whether the writes must be bracketed by an `IOLOCK` unlock/lock.
    pub fn unlock_required(&self) -> bool {
        !self.writes.is_empty()
    }
}

impl core::ops::Deref for RoutingPlan {
    type Target = [RoutingWrite];

    fn deref(&self) -> &[RoutingWrite] {
        &self.writes
    }
}

/// Resolve every peripheral pin into its PPS register write.
///
/// GPIO and analog pins are ignored. A pin used twice is rejected with
/// [`Error::DuplicatePin`]; an input function claimed by two pins with
/// [`Error::RoutingConflict`]. An output function may drive several pins.
pub fn resolve_routing(
    table: &RoutingTable,
    pins: &[PinConfiguration],
) -> Result<RoutingPlan, Error> {
    let mut inputs: Vec<(InputSignal, PinId, u8), MAX_ROUTING_WRITES> = Vec::new();
    let mut outputs: Vec<(PinId, OutputSignal, u8), MAX_ROUTING_WRITES> = Vec::new();

    for cfg in pins {
        let PinMode::Peripheral(signal) = cfg.mode else {
            continue;
        };
        let pin = cfg.pin;
        let taken = inputs.iter().any(|(_, p, _)| *p == pin)
            || outputs.iter().any(|(p, _, _)| *p == pin);
        if taken {
            return Err(Error::DuplicatePin(pin));
        }
        let unroutable = Error::UnroutableSignal { signal, pin };
        match signal {
            Signal::Input(input) => {
                if let Some((_, first, _)) = inputs.iter().find(|(s, _, _)| *s == input) {
                    return Err(Error::RoutingConflict {
                        signal,
                        first: *first,
                        second: pin,
                    });
                }
                let code = table.input_code(input, pin).ok_or(unroutable)?;
                inputs
                    .push((input, pin, code))
                    .map_err(|_| Error::CapacityExceeded("routing writes"))?;
            }
            Signal::Output(output) => {
                let code = table.output_code(output, pin).ok_or(unroutable)?;
                outputs
                    .push((pin, output, code))
                    .map_err(|_| Error::CapacityExceeded("routing writes"))?;
            }
        }
    }

    inputs.sort_unstable_by_key(|(signal, _, _)| *signal);
    outputs.sort_unstable_by_key(|(pin, _, _)| *pin);

    let mut writes = Vec::new();
    let input_writes = inputs.iter().map(|&(signal, pin, value)| RoutingWrite {
        register: PpsRegister::Input(signal),
        value,
        signal: Signal::Input(signal),
        pin,
    });
    let output_writes = outputs.iter().map(|&(pin, signal, value)| RoutingWrite {
        register: PpsRegister::Output(pin),
        value,
        signal: Signal::Output(signal),
        pin,
    });
    for write in input_writes.chain(output_writes) {
        tracing::trace!(register = %write.register, value = write.value, "pps write");
        writes
            .push(write)
            .map_err(|_| Error::CapacityExceeded("routing writes"))?;
    }
    tracing::debug!(
        inputs = inputs.len(),
        outputs = outputs.len(),
        "resolved pin routing"
    );
    Ok(RoutingPlan { writes })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use device::{PpsGroup, Port, PIC32MZ_EF};

    fn pin(name: &str) -> PinId {
        name.parse().unwrap()
    }

    fn input(name: &str) -> Signal {
        Signal::Input(name.parse().unwrap())
    }

    fn output(name: &str) -> Signal {
        Signal::Output(name.parse().unwrap())
    }

    static TABLE: RoutingTable = RoutingTable {
        pins: &[
            (PinId::at(Port::B, 9), PpsGroup::G1, 5),
            (PinId::at(Port::D, 2), PpsGroup::G1, 0),
            (PinId::at(Port::B, 3), PpsGroup::G2, 8),
            (PinId::at(Port::F, 1), PpsGroup::G2, 4),
        ],
        inputs: &[
            (InputSignal::U1rx, PpsGroup::G1),
            (InputSignal::U2rx, PpsGroup::G1),
        ],
        outputs: &[(OutputSignal::U1tx, PpsGroup::G2, 1)],
    };

    #[test]
    fn test_uart_pair() {
        let plan = resolve_routing(
            &TABLE,
            &[
                PinConfiguration::peripheral(pin("RB3"), output("U1TX")),
                PinConfiguration::peripheral(pin("RB9"), input("U1RX")),
            ],
        )
        .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].register.to_string(), "U1RXR");
        assert_eq!(plan[0].value, 5);
        assert_eq!(plan[0].description().to_string(), "U1RX <- RPB9");
        assert_eq!(plan[1].register.to_string(), "RPB3R");
        assert_eq!(plan[1].value, 1);
        assert_eq!(plan[1].description().to_string(), "U1TX -> RPB3");
        assert!(plan.unlock_required());
    }

    #[test]
    fn test_sorted_inputs_then_outputs() {
        let plan = resolve_routing(
            &TABLE,
            &[
                PinConfiguration::peripheral(pin("RF1"), output("U1TX")),
                PinConfiguration::peripheral(pin("RD2"), input("U2RX")),
                PinConfiguration::peripheral(pin("RB3"), output("U1TX")),
                PinConfiguration::peripheral(pin("RB9"), input("U1RX")),
            ],
        )
        .unwrap();
        let registers: std::vec::Vec<_> = plan.iter().map(|w| w.register.to_string()).collect();
        assert_eq!(registers, ["U1RXR", "U2RXR", "RPB3R", "RPF1R"]);
    }

    #[test]
    fn test_gpio_pins_ignored() {
        let plan = resolve_routing(
            &TABLE,
            &[PinConfiguration::gpio_input(pin("RB9"))],
        )
        .unwrap();
        assert!(plan.is_empty());
        assert!(!plan.unlock_required());
    }

    #[test]
    fn test_wrong_group_is_unroutable() {
        let err = resolve_routing(
            &TABLE,
            &[PinConfiguration::peripheral(pin("RB3"), input("U1RX"))],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::UnroutableSignal {
                signal: input("U1RX"),
                pin: pin("RB3")
            }
        );
        assert_eq!(err.kind(), crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_input_claimed_twice_conflicts() {
        let err = resolve_routing(
            &TABLE,
            &[
                PinConfiguration::peripheral(pin("RB9"), input("U1RX")),
                PinConfiguration::peripheral(pin("RD2"), input("U1RX")),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::RoutingConflict {
                signal: input("U1RX"),
                first: pin("RB9"),
                second: pin("RD2")
            }
        );
    }

    #[test]
    fn test_pin_used_twice_rejected() {
        let err = resolve_routing(
            &TABLE,
            &[
                PinConfiguration::peripheral(pin("RB9"), input("U1RX")),
                PinConfiguration::peripheral(pin("RB9"), input("U2RX")),
            ],
        )
        .unwrap_err();
        assert_eq!(err, Error::DuplicatePin(pin("RB9")));
    }

    #[test]
    fn test_device_table_routes_uart1() {
        let rx = PIC32MZ_EF
            .routing
            .pins_for(input("U1RX"))
            .next()
            .unwrap();
        let tx = PIC32MZ_EF
            .routing
            .pins_for(output("U1TX"))
            .find(|p| *p != rx)
            .unwrap();
        let plan = resolve_routing(
            &PIC32MZ_EF.routing,
            &[
                PinConfiguration::peripheral(rx, input("U1RX")),
                PinConfiguration::peripheral(tx, output("U1TX")),
            ],
        )
        .unwrap();
        assert_eq!(plan.len(), 2);
    }
}
