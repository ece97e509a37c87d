//! PIC32MZ EF family tables (PIC32MZ2048EFH144 and pin-compatible parts).

mod config;
mod pins;

use crate::clock::ClockSources;
use crate::directives::DirectiveTable;
use crate::fields::BitFieldMap;
use crate::setting::Catalog;
use crate::Device;

/// Reference tables for the 144-pin PIC32MZ EF on a 24 MHz crystal board.
pub static PIC32MZ_EF: Device = Device {
    name: "PIC32MZ EF",
    catalog: Catalog {
        settings: &config::SETTINGS,
    },
    fields: BitFieldMap {
        fields: &config::FIELDS,
        fixed: &config::FIXED,
    },
    directives: DirectiveTable {
        entries: &config::DIRECTIVES,
    },
    clocks: ClockSources::REFERENCE,
    ports: pins::PORTS,
    routing: pins::ROUTING,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::register::RegisterId;
    use crate::setting::SettingId;

    #[test]
    fn bit_field_map_is_well_formed() {
        PIC32MZ_EF.fields.validate().expect("layout must not overlap");
    }

    #[test]
    fn every_setting_has_catalog_field_and_directive() {
        for id in SettingId::ALL {
            assert!(PIC32MZ_EF.catalog.get(id).is_some(), "{id} missing from catalog");
            assert!(PIC32MZ_EF.fields.descriptor(id).is_some(), "{id} has no bit field");
            assert!(PIC32MZ_EF.directives.entry(id).is_some(), "{id} has no directive");
        }
    }

    #[test]
    fn catalog_defaults_are_allowed() {
        for s in PIC32MZ_EF.catalog.iter() {
            assert!(s.allowed.contains(&s.default), "{} default {} not allowed", s.id, s.default);
        }
    }

    /// Only DEVCFG1 bit 23 is neither a setting nor a reserved-zero range.
    #[test]
    fn only_devcfg1_bit23_is_uncovered() {
        for reg in RegisterId::ALL {
            let uncovered = !PIC32MZ_EF.fields.covered_mask(reg);
            let expected = if reg == RegisterId::Devcfg1 { 1 << 23 } else { 0 };
            assert_eq!(uncovered, expected, "{reg} uncovered bits {uncovered:#010x}");
        }
    }

    #[test]
    fn directives_follow_register_render_order() {
        let order: Vec<_> = PIC32MZ_EF
            .directives
            .iter()
            .filter_map(|e| PIC32MZ_EF.fields.descriptor(e.setting))
            .map(|d| d.register)
            .collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|r| core::cmp::Reverse(r.index()));
        assert_eq!(order, sorted);
    }

    #[test]
    fn every_pps_pin_is_bonded_out() {
        for (pin, _, _) in PIC32MZ_EF.routing.pins {
            assert!(PIC32MZ_EF.ports.has(*pin), "{pin} is remappable but not implemented");
        }
    }

    #[test]
    fn pps_pins_are_unique() {
        let mut pins: Vec<_> = PIC32MZ_EF.routing.pins.iter().map(|(p, _, _)| *p).collect();
        let total = pins.len();
        pins.sort();
        pins.dedup();
        assert_eq!(pins.len(), total);
    }

    #[test]
    fn every_signal_has_a_group() {
        use crate::routing::{InputSignal, OutputSignal};
        for s in InputSignal::ALL {
            assert!(PIC32MZ_EF.routing.input_group(*s).is_some(), "{s} has no input group");
        }
        for s in OutputSignal::ALL {
            assert!(
                PIC32MZ_EF.routing.outputs.iter().any(|(o, _, _)| o == s),
                "{s} has no output group"
            );
        }
    }
}
