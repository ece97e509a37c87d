//! PIC32MZ EF reference data for the configuration compiler.
//!
//! Everything in this crate is static, immutable data plus the small types
//! needed to describe it. The algorithms that consume it live in the
//! `compiler` crate; keeping the tables here lets tests substitute their own.
//!
//! # Tables
//!
//! | Table                   | Type                       | Used by |
//! |-------------------------|----------------------------|---------|
//! | Setting Catalog         | [`Catalog`]                | selection defaults, value resolution |
//! | Bit Field Map           | [`BitFieldMap`]            | register compiler |
//! | Directive table         | [`DirectiveTable`]         | `#pragma config` mapper |
//! | Clock sources / buses   | [`ClockSources`], [`PeripheralBus`] | frequency model |
//! | Timer classes           | [`TimerClass`]             | timer period calculator |
//! | Port pin map            | [`PortTable`]              | port bitmask aggregator |
//! | PPS groups              | [`RoutingTable`]           | pin-routing mapper |
//!
//! [`PIC32MZ_EF`] bundles all of them for the 144-pin PIC32MZ EF family.
//!
//! # Features
//!
//! - `serde`: `Serialize` derives on reference types (host tooling)
//! - `defmt`: `defmt::Format` derives on plain enums

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Pedantic lints suppressed for this reference-data crate:
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)] // table accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod directives;
pub mod fields;
pub mod pic32mz_ef;
pub mod port;
pub mod register;
pub mod routing;
pub mod setting;
pub mod timer;

pub use clock::{ClockSources, Hertz, PeripheralBus, TIMER_BUS, UART_BUS};
pub use directives::{DirectiveEncoding, DirectiveEntry, DirectiveTable};
pub use fields::{BitFieldDescriptor, BitFieldMap, Encoding, FixedField, LayoutError};
pub use pic32mz_ef::PIC32MZ_EF;
pub use port::{InvalidPinName, PinId, Port, PortTable};
pub use register::RegisterId;
pub use routing::{
    InputSignal, OutputSignal, PpsGroup, PpsRegister, RoutingTable, Signal, UnknownSignal,
};
pub use setting::{
    AllowedValues, Catalog, Setting, SettingId, SettingValue, UnknownSetting, ValueIter,
};
pub use timer::{RegisterWidth, TimerClass, TimerId, UnknownTimer};

/// All reference tables for one device family.
///
/// Tables are borrowed by the compiler at construction and never mutated.
pub struct Device {
    /// Family name, e.g. `"PIC32MZ EF"`.
    pub name: &'static str,
    /// Configuration settings with legal values and defaults.
    pub catalog: Catalog,
    /// DEVCFG bit-field layout.
    pub fields: BitFieldMap,
    /// `#pragma config` token table.
    pub directives: DirectiveTable,
    /// Oscillator frequencies of the reference board.
    pub clocks: ClockSources,
    /// Implemented pins per port.
    pub ports: PortTable,
    /// Peripheral pin select groups.
    pub routing: RoutingTable,
}
