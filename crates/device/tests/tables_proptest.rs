//! Property-based tests over the PIC32MZ EF reference tables.
//! Every legal value of every field must survive insert → extract → decode.

use device::{PinId, Port, SettingValue, PIC32MZ_EF};

proptest::proptest! {
    /// Writing a field into any word leaves every other bit untouched.
    #[test]
    fn field_insert_preserves_other_bits(word in proptest::num::u32::ANY, idx in 0usize..40) {
        let fields = PIC32MZ_EF.fields.fields;
        let d = &fields[idx % fields.len()];
        let mask = d.mask().unwrap();
        for value in d.encoding.values() {
            let code = d.encode(&value).unwrap();
            let written = d.insert(word, code).unwrap();
            assert_eq!(written & !mask, word & !mask,
                "{} = {} disturbed bits outside its field", d.setting, value);
            assert_eq!(d.extract(written), Some(code));
            assert_eq!(d.encoding.decode(code), Some(value),
                "{} code {} does not decode back", d.setting, code);
        }
    }

    /// Pin names print and parse back for every port and bit.
    #[test]
    fn pin_display_parses_back(port_idx in 0usize..Port::COUNT, bit in 0u8..=15) {
        let pin = PinId::new(Port::ALL[port_idx], bit).unwrap();
        let text = pin.to_string();
        assert_eq!(text.parse::<PinId>(), Ok(pin));
        assert_eq!(format!("RP{}{}", pin.port().letter(), pin.bit()).parse::<PinId>(), Ok(pin));
    }

    /// Catalog resolution accepts every legal magnitude of a numeric setting.
    #[test]
    fn catalog_resolves_all_pll_multipliers(mult in 1u32..=128) {
        let id = "FPLLMULT".parse().unwrap();
        assert_eq!(
            PIC32MZ_EF.catalog.resolve(id, &format!("MUL_{mult}")),
            Some(SettingValue::Number(mult))
        );
    }
}

/// Every symbolic catalog value has a code in its bit field.
#[test]
fn catalog_values_all_encode() {
    for setting in PIC32MZ_EF.catalog.iter() {
        let d = PIC32MZ_EF.fields.descriptor(setting.id).unwrap();
        for value in setting.allowed.values() {
            assert!(d.encode(&value).is_some(), "{} = {} has no encoding", setting.id, value);
        }
    }
}
