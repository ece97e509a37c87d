//! Peripheral configuration compiler for the PIC32MZ EF.
//!
//! Pure, deterministic transformations from named configuration choices to
//! the numbers a startup routine programs:
//!
//! | Component                  | Entry point                               | Output |
//! |----------------------------|-------------------------------------------|--------|
//! | Register Compiler          | [`RegisterCompiler::compile`]             | DEVCFG0..3 words |
//! | Frequency Model            | [`FrequencyModel::system_clock`], [`ClockTree::derive`] | SYSCLK, PBCLKx |
//! | Timer Period Calculator    | [`plan_timer`], [`plan_for_timer`]        | prescaler, `PRx` |
//! | Baud Rate Calculator       | [`plan_baud`], [`best_baud`]              | `UxBRG`, error % |
//! | Port Bitmask Aggregator    | [`aggregate`]                             | ANSEL/TRIS/LAT/CNPU/CNPD/ODC masks |
//! | Pin-Routing Mapper         | [`resolve_routing`]                       | PPS register writes |
//! | Reverse Directive Mapper   | [`DirectiveMapper::to_directives`]        | `#pragma config` lines |
//!
//! Reference data comes from the `device` crate and is borrowed, never
//! copied or mutated. Nothing here parses text; see the `devcfg` CLI for
//! that.
//!
//! ```
//! use compiler::{RegisterCompiler, SelectionSet};
//! use device::{RegisterId, PIC32MZ_EF};
//!
//! let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
//! let words = RegisterCompiler::new(&PIC32MZ_EF.fields).compile(&selection)?;
//! assert_eq!(words.get(RegisterId::Devcfg2), 0x4001_3190);
//! # Ok::<(), compiler::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize` on every artifact (host tooling)
//! - `defmt`: `defmt::Format` on plain enums

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // every error is an `Error` variant

pub mod baud;
pub mod consistency;
pub mod directives;
pub mod error;
pub mod frequency;
pub mod ports;
pub mod register;
pub mod routing;
pub mod selection;
pub mod timer;

pub use baud::{best_baud, plan_baud, BaudPlan, BaudPolicy, SpeedMode};
pub use consistency::TableMismatch;
pub use directives::{Directive, DirectiveMapper};
pub use error::{Error, ErrorKind, PllStage};
pub use frequency::{BusSetting, ClockTree, FrequencyModel, PllPlan};
pub use ports::{aggregate, Direction, Level, PinConfiguration, PinMode, PortMaskSet, PortMasks};
pub use register::{CompileReport, RegisterCompiler, RegisterWordSet, UnmappedPolicy};
pub use routing::{resolve_routing, RoutingPlan, RoutingWrite};
pub use selection::SelectionSet;
pub use timer::{plan_for_timer, plan_timer, plan_timer_frequency, TimerPlan};
