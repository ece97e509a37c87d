//! Reverse Directive Mapper: selections → `#pragma config` lines.
//!
//! Each setting owns its token syntax in the [`DirectiveTable`]; there is no
//! shared value → token lookup. Output follows table order, DEVCFG3 first,
//! the order XC32 headers list them in.

use device::{DirectiveEntry, DirectiveTable, SettingId, SettingValue};
use heapless::Vec;

use crate::selection::SelectionSet;

/// One `#pragma config NAME = TOKEN` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    entry: &'static DirectiveEntry,
    value: SettingValue,
}

impl Directive {
    /// Setting this line configures.
    pub fn setting(&self) -> SettingId {
        self.entry.setting
    }

    /// XC32 setting name.
    pub fn name(&self) -> &'static str {
        self.entry.name
    }

    /// Chosen value.
    pub fn value(&self) -> SettingValue {
        self.value
    }

    /// Right-hand side of the directive, e.g. `MUL_50`.
    pub fn token(&self) -> Token<'_> {
        Token(self)
    }
}

/// [`core::fmt::Display`] adapter returned by [`Directive::token`].
#[derive(Debug, Clone, Copy)]
pub struct Token<'a>(&'a Directive);

impl core::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Directives are only built for covered values.
        self.0.entry.encoding.write_token(f, &self.0.value).map(|_| ())
    }
}

impl core::fmt::Display for Directive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#pragma config {} = {}", self.name(), self.token())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Directive {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Directive", 3)?;
        s.serialize_field("setting", &self.setting())?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("token", &format_args!("{}", self.token()))?;
        s.end()
    }
}

/// Maps a [`SelectionSet`] onto one [`DirectiveTable`].
#[derive(Debug, Clone, Copy)]
pub struct DirectiveMapper<'a> {
    table: &'a DirectiveTable,
}

impl<'a> DirectiveMapper<'a> {
    /// Mapper over `table`.
    pub const fn new(table: &'a DirectiveTable) -> Self {
        Self { table }
    }

    /// Directives for every chosen value with a token, in table order.
    ///
    /// Values without a token, and settings the table does not list, are
    /// skipped with a warning.
    pub fn to_directives(&self, selection: &SelectionSet) -> Vec<Directive, { SettingId::COUNT }> {
        let mut out = Vec::new();
        for entry in self.table.iter() {
            let Some(value) = selection.get(entry.setting).copied() else {
                continue;
            };
            if !entry.encoding.covers(&value) {
                tracing::warn!(setting = %entry.setting, %value, "no directive token, skipped");
                continue;
            }
            if out.push(Directive { entry, value }).is_err() {
                tracing::warn!(setting = %entry.setting, "directive list full, skipped");
            }
        }
        for (setting, _) in selection.iter() {
            if self.table.entry(setting).is_none() {
                tracing::warn!(%setting, "setting has no directive, skipped");
            }
        }
        out
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use device::PIC32MZ_EF;

    fn mapper() -> DirectiveMapper<'static> {
        DirectiveMapper::new(&PIC32MZ_EF.directives)
    }

    #[test]
    fn test_defaults_render_every_setting() {
        let sel = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        let lines = mapper().to_directives(&sel);
        assert_eq!(lines.len(), SettingId::COUNT);
        assert_eq!(lines[0].to_string(), "#pragma config USERID = 0x0000");
        let text: std::vec::Vec<_> = lines.iter().map(ToString::to_string).collect();
        assert!(text.contains(&"#pragma config FPLLMULT = MUL_50".to_string()));
        assert!(text.contains(&"#pragma config FPLLIDIV = DIV_1".to_string()));
        assert!(text.contains(&"#pragma config FNOSC = SPLL".to_string()));
        assert!(text.contains(&"#pragma config WDTPS = PS1024".to_string()));
    }

    #[test]
    fn test_table_order_not_insertion_order() {
        let sel = SelectionSet::new()
            .with(SettingId::Fnosc, SettingValue::Symbol("FRC"))
            .with(SettingId::Userid, SettingValue::Number(0xBEEF));
        let lines = mapper().to_directives(&sel);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].setting(), SettingId::Userid);
        assert_eq!(lines[0].token().to_string(), "0xBEEF");
        assert_eq!(lines[1].name(), "FNOSC");
    }

    #[test]
    fn test_unmapped_value_skipped() {
        let sel = SelectionSet::new()
            .with(SettingId::Fpllmult, SettingValue::Number(500))
            .with(SettingId::Fnosc, SettingValue::Symbol("SPLL"));
        let lines = mapper().to_directives(&sel);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].value(), SettingValue::Symbol("SPLL"));
    }
}
