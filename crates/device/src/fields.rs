//! Bit Field Map: where each setting lives inside the DEVCFG words.
//!
//! A [`BitFieldDescriptor`] places one setting at `[bit_start, bit_start + bit_width)`
//! of one register and maps its logical values to integer codes. A
//! [`FixedField`] is a reserved range the family requires at a fixed level;
//! it is programmed on every compile and never belongs to a setting.
//!
//! Invariant (checked by [`BitFieldMap::validate`]): within one register no
//! two ranges overlap, so the compiled words do not depend on the order in
//! which settings are applied.

use crate::register::RegisterId;
use crate::setting::{SettingId, SettingValue, ValueIter};

/// Mask with `width` ones starting at `start`.
///
/// Returns `None` when the range does not fit in 32 bits or `width == 0`.
pub fn field_mask(start: u8, width: u8) -> Option<u32> {
    let end = start.checked_add(width)?;
    if width == 0 || end > 32 {
        return None;
    }
    let ones = u32::MAX.checked_shr(32u32.checked_sub(u32::from(width))?)?;
    ones.checked_shl(u32::from(start))
}

/// Logical value → integer code mapping of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Explicit table; values not listed have no encoding.
    Table(&'static [(SettingValue, u32)]),
    /// `code = n - offset` for every `Number(n)` with `min <= n <= max`.
    Linear {
        /// Smallest legal magnitude.
        min: u32,
        /// Largest legal magnitude.
        max: u32,
        /// Subtracted from the magnitude to get the code.
        offset: u32,
    },
}

impl Encoding {
    /// Code for `value`, if it has one.
    pub fn encode(&self, value: &SettingValue) -> Option<u32> {
        match self {
            Self::Table(entries) => entries
                .iter()
                .find(|(v, _)| v == value)
                .map(|(_, code)| *code),
            Self::Linear { min, max, offset } => {
                let n = value.as_number()?;
                if (*min..=*max).contains(&n) {
                    n.checked_sub(*offset)
                } else {
                    None
                }
            }
        }
    }

    /// Logical value for `code`, if one maps to it.
    pub fn decode(&self, code: u32) -> Option<SettingValue> {
        match self {
            Self::Table(entries) => entries
                .iter()
                .find(|(_, c)| *c == code)
                .map(|(v, _)| *v),
            Self::Linear { min, max, offset } => {
                let n = code.checked_add(*offset)?;
                (*min..=*max).contains(&n).then_some(SettingValue::Number(n))
            }
        }
    }

    /// Every value this encoding accepts.
    pub fn values(&self) -> ValueIter {
        match *self {
            Self::Table(entries) => ValueIter::Encoded(entries.iter()),
            Self::Linear { min, max, .. } => ValueIter::Range(min..=max),
        }
    }
}

/// Placement and encoding of one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitFieldDescriptor {
    /// Setting stored in this field.
    pub setting: SettingId,
    /// Register holding the field.
    pub register: RegisterId,
    /// Lowest bit of the field (0..=31).
    pub bit_start: u8,
    /// Field width (1..=32).
    pub bit_width: u8,
    /// Value → code mapping.
    pub encoding: Encoding,
}

impl BitFieldDescriptor {
    /// In-register mask of the field, or `None` for a malformed descriptor.
    pub fn mask(&self) -> Option<u32> {
        field_mask(self.bit_start, self.bit_width)
    }

    /// Code for `value`, rejecting codes wider than the field.
    pub fn encode(&self, value: &SettingValue) -> Option<u32> {
        let code = self.encoding.encode(value)?;
        let limit = field_mask(0, self.bit_width)?;
        (code <= limit).then_some(code)
    }

    /// Read the field's code back out of a register word.
    pub fn extract(&self, word: u32) -> Option<u32> {
        let mask = self.mask()?;
        (word & mask).checked_shr(u32::from(self.bit_start))
    }

    /// Replace the field in `word` with `code`.
    pub fn insert(&self, word: u32, code: u32) -> Option<u32> {
        let mask = self.mask()?;
        let shifted = code.checked_shl(u32::from(self.bit_start))?;
        Some((word & !mask) | (shifted & mask))
    }
}

/// A reserved range programmed to a fixed value on every compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedField {
    /// Register holding the range.
    pub register: RegisterId,
    /// Lowest bit.
    pub bit_start: u8,
    /// Width in bits.
    pub bit_width: u8,
    /// Value written into the range.
    pub value: u32,
}

impl FixedField {
    /// Replace the range in `word` with the fixed value.
    pub fn apply(&self, word: u32) -> Option<u32> {
        let mask = field_mask(self.bit_start, self.bit_width)?;
        let shifted = self.value.checked_shl(u32::from(self.bit_start))?;
        Some((word & !mask) | (shifted & mask))
    }
}

/// Layout errors found by [`BitFieldMap::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A range is empty or runs past bit 31.
    #[error("{register} field at bit {bit_start} width {bit_width} does not fit in 32 bits")]
    OutOfBounds {
        /// Register of the offending range.
        register: RegisterId,
        /// Start bit.
        bit_start: u8,
        /// Width.
        bit_width: u8,
    },
    /// Two ranges in one register share a bit.
    #[error("{register} bits overlap (shared mask {overlap:#010x})")]
    Overlap {
        /// Register holding both ranges.
        register: RegisterId,
        /// Bits claimed twice.
        overlap: u32,
    },
    /// A setting appears in more than one descriptor.
    #[error("{0} has more than one bit field")]
    DuplicateSetting(SettingId),
    /// An encoded code or fixed value needs more bits than the field has.
    #[error("{register} field at bit {bit_start} holds a code wider than {bit_width} bits")]
    CodeTooWide {
        /// Register of the offending range.
        register: RegisterId,
        /// Start bit.
        bit_start: u8,
        /// Width.
        bit_width: u8,
    },
}

/// The Bit Field Map of one device family.
#[derive(Debug, Clone, Copy)]
pub struct BitFieldMap {
    /// One descriptor per mapped setting.
    pub fields: &'static [BitFieldDescriptor],
    /// Reserved ranges at a fixed level.
    pub fixed: &'static [FixedField],
}

impl BitFieldMap {
    /// Descriptor for `setting`, if it has a field.
    pub fn descriptor(&self, setting: SettingId) -> Option<&BitFieldDescriptor> {
        self.fields.iter().find(|d| d.setting == setting)
    }

    /// Descriptors living in `register`.
    pub fn fields_in(
        &self,
        register: RegisterId,
    ) -> impl Iterator<Item = &'static BitFieldDescriptor> {
        self.fields.iter().filter(move |d| d.register == register)
    }

    /// Bits of `register` claimed by settings or fixed ranges.
    ///
    /// Bits outside this mask are never written and stay erased (high).
    pub fn covered_mask(&self, register: RegisterId) -> u32 {
        let settings = self
            .fields_in(register)
            .filter_map(BitFieldDescriptor::mask);
        let fixed = self
            .fixed
            .iter()
            .filter(|f| f.register == register)
            .filter_map(|f| field_mask(f.bit_start, f.bit_width));
        settings.chain(fixed).fold(0, |acc, m| acc | m)
    }

    /// Check bounds, overlap, duplicate settings and code widths.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (i, d) in self.fields.iter().enumerate() {
            if self
                .fields
                .iter()
                .skip(i.saturating_add(1))
                .any(|other| other.setting == d.setting)
            {
                return Err(LayoutError::DuplicateSetting(d.setting));
            }
            let width_limit = field_mask(0, d.bit_width).ok_or(LayoutError::OutOfBounds {
                register: d.register,
                bit_start: d.bit_start,
                bit_width: d.bit_width,
            })?;
            let too_wide = d
                .encoding
                .values()
                .filter_map(|v| d.encoding.encode(&v))
                .any(|code| code > width_limit);
            if too_wide {
                return Err(LayoutError::CodeTooWide {
                    register: d.register,
                    bit_start: d.bit_start,
                    bit_width: d.bit_width,
                });
            }
        }
        for f in self.fixed {
            let limit = field_mask(0, f.bit_width).ok_or(LayoutError::OutOfBounds {
                register: f.register,
                bit_start: f.bit_start,
                bit_width: f.bit_width,
            })?;
            if f.value > limit {
                return Err(LayoutError::CodeTooWide {
                    register: f.register,
                    bit_start: f.bit_start,
                    bit_width: f.bit_width,
                });
            }
        }
        for register in RegisterId::ALL {
            self.check_overlap(register)?;
        }
        Ok(())
    }

    fn check_overlap(&self, register: RegisterId) -> Result<(), LayoutError> {
        let ranges = self
            .fields_in(register)
            .map(|d| (d.bit_start, d.bit_width))
            .chain(
                self.fixed
                    .iter()
                    .filter(|f| f.register == register)
                    .map(|f| (f.bit_start, f.bit_width)),
            );
        let mut claimed = 0u32;
        for (bit_start, bit_width) in ranges {
            let mask = field_mask(bit_start, bit_width).ok_or(LayoutError::OutOfBounds {
                register,
                bit_start,
                bit_width,
            })?;
            if claimed & mask != 0 {
                return Err(LayoutError::Overlap {
                    register,
                    overlap: claimed & mask,
                });
            }
            claimed |= mask;
        }
        Ok(())
    }
}
