//! Cross-table consistency check.
//!
//! The catalog, the bit-field map and the directive table each list the
//! values of every setting. They are maintained by hand, so this walks all
//! three and proves they agree on exactly the same `(setting, value)` pairs.

use device::{BitFieldMap, Catalog, DirectiveTable, SettingId, SettingValue};

/// First disagreement found between the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableMismatch {
    /// A catalog setting has no bit field.
    #[error("{0} has no bit field")]
    MissingField(SettingId),

    /// A catalog setting has no directive entry.
    #[error("{0} has no directive entry")]
    MissingDirective(SettingId),

    /// A bit field or directive names a setting the catalog lacks.
    #[error("{0} is not in the catalog")]
    NotInCatalog(SettingId),

    /// The default is not one of the allowed values.
    #[error("default {value} of {setting} is not allowed")]
    IllegalDefault {
        /// Setting checked.
        setting: SettingId,
        /// Its default.
        value: SettingValue,
    },

    /// A legal value has no register encoding.
    #[error("{setting} = {value} has no register encoding")]
    Unencodable {
        /// Setting checked.
        setting: SettingId,
        /// Legal value.
        value: SettingValue,
    },

    /// A legal value has no directive token.
    #[error("{setting} = {value} has no directive token")]
    NoToken {
        /// Setting checked.
        setting: SettingId,
        /// Legal value.
        value: SettingValue,
    },

    /// A table encodes a value the catalog does not allow.
    #[error("{setting} = {value} is encoded but not allowed")]
    ExtraValue {
        /// Setting checked.
        setting: SettingId,
        /// Value only the table knows.
        value: SettingValue,
    },
}

/// Check that `catalog`, `fields` and `directives` describe the same values.
pub fn check(
    catalog: &Catalog,
    fields: &BitFieldMap,
    directives: &DirectiveTable,
) -> Result<(), TableMismatch> {
    for setting in catalog.iter() {
        let id = setting.id;
        if !setting.allowed.contains(&setting.default) {
            return Err(TableMismatch::IllegalDefault {
                setting: id,
                value: setting.default,
            });
        }
        let field = fields
            .descriptor(id)
            .ok_or(TableMismatch::MissingField(id))?;
        let entry = directives
            .entry(id)
            .ok_or(TableMismatch::MissingDirective(id))?;

        for value in setting.allowed.values() {
            if field.encode(&value).is_none() {
                return Err(TableMismatch::Unencodable { setting: id, value });
            }
            if !entry.encoding.covers(&value) {
                return Err(TableMismatch::NoToken { setting: id, value });
            }
        }

        let extra = field
            .encoding
            .values()
            .chain(entry.encoding.values())
            .find(|value| !setting.allowed.contains(value));
        if let Some(value) = extra {
            return Err(TableMismatch::ExtraValue { setting: id, value });
        }
    }

    let orphan = fields
        .fields
        .iter()
        .map(|f| f.setting)
        .chain(directives.iter().map(|e| e.setting))
        .find(|id| catalog.get(*id).is_none());
    if let Some(id) = orphan {
        return Err(TableMismatch::NotInCatalog(id));
    }
    tracing::debug!(settings = catalog.settings.len(), "reference tables consistent");
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use device::{
        AllowedValues, BitFieldDescriptor, DirectiveEncoding, DirectiveEntry, Encoding,
        RegisterId, Setting, PIC32MZ_EF,
    };

    #[test]
    fn test_device_tables_agree() {
        check(
            &PIC32MZ_EF.catalog,
            &PIC32MZ_EF.fields,
            &PIC32MZ_EF.directives,
        )
        .unwrap();
    }

    const ON_OFF: &[&str] = &["ON", "OFF"];
    const CODES: &[(SettingValue, u32)] = &[
        (SettingValue::Symbol("ON"), 1),
        (SettingValue::Symbol("OFF"), 0),
    ];
    const TOKENS: &[(SettingValue, &str)] = &[(SettingValue::Symbol("ON"), "ON")];

    static SETTINGS: [Setting; 1] = [Setting {
        id: SettingId::Fsleep,
        allowed: AllowedValues::Symbols(ON_OFF),
        default: SettingValue::Symbol("OFF"),
        description: "",
    }];
    static FIELDS: [BitFieldDescriptor; 1] = [BitFieldDescriptor {
        setting: SettingId::Fsleep,
        register: RegisterId::Devcfg0,
        bit_start: 10,
        bit_width: 1,
        encoding: Encoding::Table(CODES),
    }];
    static SHORT_DIRECTIVES: [DirectiveEntry; 1] = [DirectiveEntry {
        setting: SettingId::Fsleep,
        name: "FSLEEP",
        encoding: DirectiveEncoding::Tokens(TOKENS),
    }];

    #[test]
    fn test_missing_token_detected() {
        let err = check(
            &Catalog {
                settings: &SETTINGS,
            },
            &BitFieldMap {
                fields: &FIELDS,
                fixed: &[],
            },
            &DirectiveTable {
                entries: &SHORT_DIRECTIVES,
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableMismatch::NoToken {
                setting: SettingId::Fsleep,
                value: SettingValue::Symbol("OFF")
            }
        );
    }

    #[test]
    fn test_orphan_field_detected() {
        let err = check(
            &Catalog { settings: &[] },
            &BitFieldMap {
                fields: &FIELDS,
                fixed: &[],
            },
            &DirectiveTable { entries: &[] },
        )
        .unwrap_err();
        assert_eq!(err, TableMismatch::NotInCatalog(SettingId::Fsleep));
    }
}
