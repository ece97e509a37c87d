//! Register Compiler: selections → DEVCFG words.
//!
//! ```text
//! words = [0xFFFF_FFFF; 4]
//! for f in fixed:      words[f.reg] = insert(words[f.reg], f)
//! for (s, v) in sel:   words[d.reg] = (words[d.reg] & !mask) | (code << start)
//! ```
//!
//! Fields never overlap (see [`device::BitFieldMap::validate`]), so the words
//! depend only on the set of choices, not on their order.

use device::register::ERASED_WORD;
use device::{BitFieldMap, RegisterId, SettingId, SettingValue};
use heapless::Vec;

use crate::error::Error;
use crate::selection::SelectionSet;

/// The four compiled configuration words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWordSet {
    words: [u32; RegisterId::COUNT],
}

impl RegisterWordSet {
    /// All four words erased.
    pub const ERASED: Self = Self {
        words: [ERASED_WORD; RegisterId::COUNT],
    };

    /// Build from raw words indexed by [`RegisterId::index`].
    pub const fn from_words(words: [u32; RegisterId::COUNT]) -> Self {
        Self { words }
    }

    /// Word of `register`.
    pub fn get(&self, register: RegisterId) -> u32 {
        self.words
            .get(register.index())
            .copied()
            .unwrap_or(ERASED_WORD)
    }

    fn set(&mut self, register: RegisterId, word: u32) {
        if let Some(slot) = self.words.get_mut(register.index()) {
            *slot = word;
        }
    }

    /// `(register, word)` pairs, DEVCFG3 first.
    pub fn iter(&self) -> impl Iterator<Item = (RegisterId, u32)> + '_ {
        RegisterId::RENDER_ORDER
            .into_iter()
            .map(|register| (register, self.get(register)))
    }
}

impl Default for RegisterWordSet {
    fn default() -> Self {
        Self::ERASED
    }
}

impl core::fmt::Display for RegisterWordSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, (register, word)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{register} = {word:#010X}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RegisterWordSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(register, word)| (register.name(), word)))
    }
}

/// What to do with a setting that cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnmappedPolicy {
    /// Fail the compile with [`Error::UnmappedValue`].
    #[default]
    Reject,
    /// Leave the field erased and list the setting in [`CompileReport::skipped`].
    KeepErased,
}

/// Result of a compile under [`UnmappedPolicy::KeepErased`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompileReport {
    /// Compiled words.
    pub words: RegisterWordSet,
    /// Settings left erased because their value has no encoding.
    pub skipped: Vec<SettingId, { SettingId::COUNT }>,
}

/// Packs a [`SelectionSet`] into DEVCFG words using one [`BitFieldMap`].
#[derive(Debug, Clone, Copy)]
pub struct RegisterCompiler<'a> {
    map: &'a BitFieldMap,
    policy: UnmappedPolicy,
}

impl<'a> RegisterCompiler<'a> {
    /// Compiler rejecting unmapped values.
    pub const fn new(map: &'a BitFieldMap) -> Self {
        Self {
            map,
            policy: UnmappedPolicy::Reject,
        }
    }

    /// Same map, different unmapped-value policy.
    #[must_use]
    pub const fn with_policy(self, policy: UnmappedPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Compile `selection` into the four words.
    pub fn compile(&self, selection: &SelectionSet) -> Result<RegisterWordSet, Error> {
        self.compile_report(selection).map(|report| report.words)
    }

    /// Compile and report which settings were left erased.
    ///
    /// `skipped` is always empty under [`UnmappedPolicy::Reject`].
    pub fn compile_report(&self, selection: &SelectionSet) -> Result<CompileReport, Error> {
        let mut words = RegisterWordSet::ERASED;
        for fixed in self.map.fixed {
            let word = fixed
                .apply(words.get(fixed.register))
                .ok_or(Error::CapacityExceeded("bits in a reserved range"))?;
            words.set(fixed.register, word);
        }

        let mut skipped = Vec::new();
        for (setting, value) in selection.iter() {
            match self.place(&mut words, setting, &value) {
                Ok(()) => {}
                Err(_) if self.policy == UnmappedPolicy::KeepErased => {
                    tracing::warn!(%setting, %value, "no encoding, field left erased");
                    skipped
                        .push(setting)
                        .map_err(|_| Error::CapacityExceeded("skipped settings"))?;
                }
                Err(err) => return Err(err),
            }
        }

        tracing::debug!(
            devcfg3 = words.get(RegisterId::Devcfg3),
            devcfg2 = words.get(RegisterId::Devcfg2),
            devcfg1 = words.get(RegisterId::Devcfg1),
            devcfg0 = words.get(RegisterId::Devcfg0),
            settings = selection.len(),
            skipped = skipped.len(),
            "compiled configuration words"
        );
        Ok(CompileReport { words, skipped })
    }

    fn place(
        &self,
        words: &mut RegisterWordSet,
        setting: SettingId,
        value: &SettingValue,
    ) -> Result<(), Error> {
        let unmapped = Error::UnmappedValue {
            setting,
            value: *value,
        };
        let field = self.map.descriptor(setting).ok_or(unmapped)?;
        let code = field.encode(value).ok_or(unmapped)?;
        let word = field
            .insert(words.get(field.register), code)
            .ok_or(unmapped)?;
        tracing::trace!(%setting, %value, code, register = %field.register, "placed field");
        words.set(field.register, word);
        Ok(())
    }

    /// Raw code stored for `setting` in `words`.
    pub fn extract(&self, words: &RegisterWordSet, setting: SettingId) -> Option<u32> {
        let field = self.map.descriptor(setting)?;
        field.extract(words.get(field.register))
    }

    /// Logical value stored for `setting` in `words`.
    ///
    /// `None` if the code matches no value (e.g. an erased field whose
    /// all-ones code is not in the encoding).
    pub fn decode(&self, words: &RegisterWordSet, setting: SettingId) -> Option<SettingValue> {
        let field = self.map.descriptor(setting)?;
        field.encoding.decode(self.extract(words, setting)?)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use device::PIC32MZ_EF;

    fn compiler() -> RegisterCompiler<'static> {
        RegisterCompiler::new(&PIC32MZ_EF.fields)
    }

    /// Default selection reproduces the reference board's words.
    #[test]
    fn test_defaults_match_reference_vector() {
        let sel = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        let words = compiler().compile(&sel).unwrap();
        assert_eq!(words.get(RegisterId::Devcfg3), 0x4300_0000, "DEVCFG3");
        assert_eq!(words.get(RegisterId::Devcfg2), 0x4001_3190, "DEVCFG2");
        assert_eq!(words.get(RegisterId::Devcfg1), 0x5FEA_C7F9, "DEVCFG1");
        assert_eq!(words.get(RegisterId::Devcfg0), 0x403F_F773, "DEVCFG0");
    }

    #[test]
    fn test_empty_selection_programs_only_reserved_bits() {
        let words = compiler().compile(&SelectionSet::new()).unwrap();
        for register in RegisterId::ALL {
            let covered = PIC32MZ_EF.fields.covered_mask(register);
            let fixed_zero = PIC32MZ_EF
                .fields
                .fixed
                .iter()
                .filter(|f| f.register == register)
                .filter_map(|f| device::fields::field_mask(f.bit_start, f.bit_width))
                .fold(0, |acc, m| acc | m);
            assert_eq!(words.get(register), !fixed_zero, "{register}");
            assert_eq!(covered & fixed_zero, fixed_zero);
        }
    }

    #[test]
    fn test_pll_multiplier_lands_in_bits_8_to_14() {
        let sel = SelectionSet::new().with(SettingId::Fpllmult, SettingValue::Number(128));
        let words = compiler().compile(&sel).unwrap();
        assert_eq!(words.get(RegisterId::Devcfg2) & 0x7F00, 0x7F00);
        assert_eq!(compiler().extract(&words, SettingId::Fpllmult), Some(127));
        assert_eq!(
            compiler().decode(&words, SettingId::Fpllmult),
            Some(SettingValue::Number(128))
        );
    }

    #[test]
    fn test_unmapped_value_rejected_by_default() {
        let sel = SelectionSet::new().with(SettingId::Fnosc, SettingValue::Symbol("BOGUS"));
        let err = compiler().compile(&sel).unwrap_err();
        assert_eq!(
            err,
            Error::UnmappedValue {
                setting: SettingId::Fnosc,
                value: SettingValue::Symbol("BOGUS")
            }
        );
    }

    #[test]
    fn test_keep_erased_reports_skipped_setting() {
        let sel = SelectionSet::with_defaults(&PIC32MZ_EF.catalog)
            .with(SettingId::Fpllmult, SettingValue::Number(500));
        let report = compiler()
            .with_policy(UnmappedPolicy::KeepErased)
            .compile_report(&sel)
            .unwrap();
        assert_eq!(report.skipped.as_slice(), [SettingId::Fpllmult]);
        assert_eq!(report.words.get(RegisterId::Devcfg2) & 0x7F00, 0x7F00);
        // Every other DEVCFG2 field still at its default.
        assert_eq!(report.words.get(RegisterId::Devcfg2) & !0x7F00, 0x4001_3190 & !0x7F00);
    }

    #[test]
    fn test_display_lists_devcfg3_first() {
        let text = RegisterWordSet::ERASED.to_string();
        assert!(text.starts_with("DEVCFG3 = 0xFFFFFFFF"), "{text}");
    }
}
