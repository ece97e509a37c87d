//! `#pragma config` directive table.
//!
//! Maps each setting to the XC32 setting name and the token syntax of its
//! values. Symbolic settings list their tokens explicitly; numeric settings
//! render as a prefix plus magnitude (`MUL_50`, `PS1024`) or as fixed-width
//! hex (`USERID = 0xFFFF`).

use crate::setting::{AllowedValues, SettingId, SettingValue, ValueIter};

/// How a setting's values are spelled in a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveEncoding {
    /// Explicit value → token table.
    Tokens(&'static [(SettingValue, &'static str)]),
    /// `prefix` followed by the decimal magnitude.
    Prefixed {
        /// Text before the number.
        prefix: &'static str,
        /// Magnitudes that have a token.
        domain: AllowedValues,
    },
    /// `0x` followed by `digits` upper-case hex digits.
    Hex {
        /// Zero-padded width.
        digits: u8,
        /// Magnitudes that have a token.
        domain: AllowedValues,
    },
}

impl DirectiveEncoding {
    /// Whether `value` has a token.
    pub fn covers(&self, value: &SettingValue) -> bool {
        match self {
            Self::Tokens(entries) => entries.iter().any(|(v, _)| v == value),
            Self::Prefixed { domain, .. } | Self::Hex { domain, .. } => domain.contains(value),
        }
    }

    /// Every value with a token.
    pub fn values(&self) -> ValueIter {
        match *self {
            Self::Tokens(entries) => ValueIter::Tokens(entries.iter()),
            Self::Prefixed { domain, .. } | Self::Hex { domain, .. } => domain.values(),
        }
    }

    /// Write the token for `value`.
    ///
    /// Returns `Ok(false)` without writing anything if `value` has no token.
    pub fn write_token<W: core::fmt::Write>(
        &self,
        out: &mut W,
        value: &SettingValue,
    ) -> Result<bool, core::fmt::Error> {
        if !self.covers(value) {
            return Ok(false);
        }
        match (self, value) {
            (Self::Tokens(entries), _) => match entries.iter().find(|(v, _)| v == value) {
                Some((_, token)) => out.write_str(token)?,
                None => return Ok(false),
            },
            (Self::Prefixed { prefix, .. }, SettingValue::Number(n)) => {
                write!(out, "{prefix}{n}")?;
            }
            (Self::Hex { digits, .. }, SettingValue::Number(n)) => {
                write!(out, "0x{n:0width$X}", width = usize::from(*digits))?;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Directive metadata for one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveEntry {
    /// Setting described.
    pub setting: SettingId,
    /// XC32 setting name on the left of `=`.
    pub name: &'static str,
    /// Token syntax on the right of `=`.
    pub encoding: DirectiveEncoding,
}

/// All directive entries, in header order (DEVCFG3 first).
#[derive(Debug, Clone, Copy)]
pub struct DirectiveTable {
    /// Entries in emission order.
    pub entries: &'static [DirectiveEntry],
}

impl DirectiveTable {
    /// Entry for `setting`.
    pub fn entry(&self, setting: SettingId) -> Option<&DirectiveEntry> {
        self.entries.iter().find(|e| e.setting == setting)
    }

    /// Iterate in emission order.
    pub fn iter(&self) -> core::slice::Iter<'static, DirectiveEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn render(enc: &DirectiveEncoding, value: SettingValue) -> Option<String> {
        let mut s = String::new();
        enc.write_token(&mut s, &value).unwrap().then_some(s)
    }

    #[test]
    fn prefixed_renders_decimal_magnitude() {
        let enc = DirectiveEncoding::Prefixed {
            prefix: "MUL_",
            domain: AllowedValues::Range { min: 1, max: 128 },
        };
        assert_eq!(render(&enc, SettingValue::Number(50)).as_deref(), Some("MUL_50"));
        assert_eq!(render(&enc, SettingValue::Number(200)), None);
    }

    #[test]
    fn hex_pads_to_width() {
        let enc = DirectiveEncoding::Hex {
            digits: 4,
            domain: AllowedValues::Range {
                min: 0,
                max: 0xFFFF,
            },
        };
        assert_eq!(render(&enc, SettingValue::Number(0xAB)).as_deref(), Some("0x00AB"));
    }

    #[test]
    fn tokens_reject_unlisted_values() {
        let enc = DirectiveEncoding::Tokens(&[(SettingValue::Symbol("ON"), "ON")]);
        assert_eq!(render(&enc, SettingValue::Symbol("ON")).as_deref(), Some("ON"));
        assert_eq!(render(&enc, SettingValue::Symbol("OFF")), None);
        assert_eq!(render(&enc, SettingValue::Number(1)), None);
    }
}
