//! PIC32MZ EF 144-pin package: implemented pins and PPS groups.
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), Table 1 "144-pin TQFP pin names"
//! - Table 12-2 / 12-3 (input and output pin selection)

use crate::port::{PinId, Port, PortTable};
use crate::routing::{InputSignal, OutputSignal, PpsGroup, RoutingTable};

use InputSignal as I;
use OutputSignal as O;
use PpsGroup::{G1, G2, G3, G4};

/// Bonded-out pins per port (A..K, no I).
pub(super) const PORTS: PortTable = PortTable {
    implemented: [
        0xC6FF, // A
        0xFFFF, // B
        0xF01E, // C
        0xFEFF, // D
        0x03FF, // E
        0x313F, // F
        0xF3C3, // G
        0xFFFF, // H
        0xBFFF, // J
        0x00FF, // K
    ],
};

const fn rp(port: Port, bit: u8) -> PinId {
    PinId::at(port, bit)
}

static PPS_PINS: [(PinId, PpsGroup, u8); 53] = [
    (rp(Port::D, 2), G1, 0),
    (rp(Port::G, 8), G1, 1),
    (rp(Port::F, 4), G1, 2),
    (rp(Port::D, 10), G1, 3),
    (rp(Port::F, 1), G1, 4),
    (rp(Port::B, 9), G1, 5),
    (rp(Port::B, 10), G1, 6),
    (rp(Port::C, 14), G1, 7),
    (rp(Port::B, 5), G1, 8),
    (rp(Port::C, 1), G1, 10),
    (rp(Port::D, 14), G1, 11),
    (rp(Port::G, 1), G1, 12),
    (rp(Port::A, 14), G1, 13),
    (rp(Port::D, 6), G1, 14),
    (rp(Port::D, 3), G2, 0),
    (rp(Port::G, 7), G2, 1),
    (rp(Port::F, 5), G2, 2),
    (rp(Port::D, 11), G2, 3),
    (rp(Port::F, 0), G2, 4),
    (rp(Port::B, 1), G2, 5),
    (rp(Port::E, 5), G2, 6),
    (rp(Port::C, 13), G2, 7),
    (rp(Port::B, 3), G2, 8),
    (rp(Port::C, 4), G2, 10),
    (rp(Port::D, 15), G2, 11),
    (rp(Port::G, 0), G2, 12),
    (rp(Port::A, 15), G2, 13),
    (rp(Port::D, 7), G2, 14),
    (rp(Port::D, 9), G3, 0),
    (rp(Port::G, 6), G3, 1),
    (rp(Port::B, 8), G3, 2),
    (rp(Port::B, 15), G3, 3),
    (rp(Port::D, 4), G3, 4),
    (rp(Port::B, 0), G3, 5),
    (rp(Port::E, 3), G3, 6),
    (rp(Port::B, 7), G3, 7),
    (rp(Port::F, 12), G3, 9),
    (rp(Port::D, 12), G3, 10),
    (rp(Port::F, 8), G3, 11),
    (rp(Port::C, 3), G3, 12),
    (rp(Port::E, 9), G3, 13),
    (rp(Port::D, 1), G4, 0),
    (rp(Port::G, 9), G4, 1),
    (rp(Port::B, 14), G4, 2),
    (rp(Port::D, 0), G4, 3),
    (rp(Port::B, 6), G4, 5),
    (rp(Port::D, 5), G4, 6),
    (rp(Port::B, 2), G4, 7),
    (rp(Port::F, 3), G4, 8),
    (rp(Port::F, 13), G4, 9),
    (rp(Port::F, 2), G4, 11),
    (rp(Port::C, 2), G4, 12),
    (rp(Port::E, 8), G4, 13),
];

static PPS_INPUTS: [(InputSignal, PpsGroup); 51] = [
    (I::Int3, G1),
    (I::T2ck, G1),
    (I::T6ck, G1),
    (I::Ic3, G1),
    (I::Ic7, G1),
    (I::U1rx, G1),
    (I::U2cts, G1),
    (I::U5rx, G1),
    (I::U6cts, G1),
    (I::Sdi1, G1),
    (I::Sdi3, G1),
    (I::Sdi5, G1),
    (I::Ss6, G1),
    (I::Refclki1, G1),
    (I::Int4, G2),
    (I::T5ck, G2),
    (I::T7ck, G2),
    (I::Ic4, G2),
    (I::Ic8, G2),
    (I::U3rx, G2),
    (I::U4cts, G2),
    (I::Sdi2, G2),
    (I::Sdi4, G2),
    (I::C1rx, G2),
    (I::Refclki4, G2),
    (I::Int2, G3),
    (I::T3ck, G3),
    (I::T8ck, G3),
    (I::Ic2, G3),
    (I::Ic5, G3),
    (I::Ic9, G3),
    (I::U1cts, G3),
    (I::U2rx, G3),
    (I::U5cts, G3),
    (I::Ss1, G3),
    (I::Ss3, G3),
    (I::Ss4, G3),
    (I::Ss5, G3),
    (I::C2rx, G3),
    (I::Int1, G4),
    (I::T4ck, G4),
    (I::T9ck, G4),
    (I::Ic1, G4),
    (I::Ic6, G4),
    (I::U3cts, G4),
    (I::U4rx, G4),
    (I::U6rx, G4),
    (I::Ss2, G4),
    (I::Sdi6, G4),
    (I::Ocfa, G4),
    (I::Refclki3, G4),
];

static PPS_OUTPUTS: [(OutputSignal, PpsGroup, u8); 47] = [
    (O::U3tx, G1, 1),
    (O::U4rts, G1, 2),
    (O::Sdo1, G1, 5),
    (O::Sdo2, G1, 6),
    (O::Sdo3, G1, 7),
    (O::Sdo5, G1, 9),
    (O::Ss6, G1, 10),
    (O::Oc3, G1, 11),
    (O::Oc6, G1, 12),
    (O::Refclko4, G1, 13),
    (O::C2out, G1, 14),
    (O::C1tx, G1, 15),
    (O::U1tx, G2, 1),
    (O::U2rts, G2, 2),
    (O::U5tx, G2, 3),
    (O::U6rts, G2, 4),
    (O::Sdo1, G2, 5),
    (O::Sdo2, G2, 6),
    (O::Sdo3, G2, 7),
    (O::Sdo4, G2, 8),
    (O::Sdo5, G2, 9),
    (O::Oc4, G2, 11),
    (O::Oc7, G2, 12),
    (O::Refclko1, G2, 15),
    (O::U3rts, G3, 1),
    (O::U4tx, G3, 2),
    (O::U6tx, G3, 4),
    (O::Ss1, G3, 5),
    (O::Ss3, G3, 7),
    (O::Ss4, G3, 8),
    (O::Ss5, G3, 9),
    (O::Sdo6, G3, 10),
    (O::Oc5, G3, 11),
    (O::Oc8, G3, 12),
    (O::C1out, G3, 14),
    (O::Refclko3, G3, 15),
    (O::U1rts, G4, 1),
    (O::U2tx, G4, 2),
    (O::U5rts, G4, 3),
    (O::U6tx, G4, 4),
    (O::Ss2, G4, 6),
    (O::Sdo4, G4, 8),
    (O::Sdo6, G4, 10),
    (O::Oc2, G4, 11),
    (O::Oc1, G4, 12),
    (O::Oc9, G4, 13),
    (O::C2tx, G4, 15),
];

pub(super) const ROUTING: RoutingTable = RoutingTable {
    pins: &PPS_PINS,
    inputs: &PPS_INPUTS,
    outputs: &PPS_OUTPUTS,
};
