//! Setting Catalog: named configuration settings, legal values and defaults.
//!
//! Settings are identified by an exhaustive enum so every `match` over them
//! is checked for completeness. Values are tagged: symbolic options carry the
//! toolchain token, numeric options carry their magnitude directly, so no
//! consumer ever re-parses text like `"PLL Multiply by 50"`.

/// Every configuration setting exposed for the PIC32MZ EF.
///
/// Variant names upper-case to the XC32 `#pragma config` setting name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingId {
    // ── DEVCFG3 ──────────────────────────────────────────────────────────────
    /// 16-bit user ID.
    Userid,
    /// Ethernet MII (on) or RMII (off).
    Fmiien,
    /// Ethernet default (on) or alternate (off) pins.
    Fethio,
    /// Peripheral pin select one-way configuration.
    Pgl1way,
    /// Peripheral module disable one-way configuration.
    Pmdl1way,
    /// I/O lock one-way configuration.
    Iol1way,
    /// USBID pin controlled by the USB module.
    Fusbidio,
    // ── DEVCFG2 ──────────────────────────────────────────────────────────────
    /// System PLL input divider.
    Fpllidiv,
    /// System PLL input range.
    Fpllrng,
    /// System PLL input clock (FRC or POSC).
    FpllIclk,
    /// System PLL multiplier.
    Fpllmult,
    /// System PLL output divider.
    Fpllodiv,
    /// USB PLL input frequency.
    Upllfsel,
    // ── DEVCFG1 ──────────────────────────────────────────────────────────────
    /// Oscillator selection.
    Fnosc,
    /// Deadman timer count window interval.
    Dmtintv,
    /// Secondary oscillator enable.
    Fsoscen,
    /// Internal/external switch-over.
    Ieso,
    /// Primary oscillator mode.
    Poscmod,
    /// CLKO output on the OSC2 pin.
    Osciofnc,
    /// Clock switching and fail-safe clock monitor.
    Fcksm,
    /// Watchdog timer postscaler.
    Wdtps,
    /// Watchdog behaviour during flash programming.
    Wdtspgm,
    /// Watchdog windowed mode.
    Windis,
    /// Watchdog window size.
    Fwdtwinsz,
    /// Deadman timer count.
    Dmtcnt,
    /// Deadman timer enable.
    Fdmten,
    // ── DEVCFG0 ──────────────────────────────────────────────────────────────
    /// Background debugger.
    Debug,
    /// JTAG port.
    Jtagen,
    /// ICE/ICD communication channel.
    Icesel,
    /// Trace features in the CPU.
    Trcen,
    /// Boot ISA (MIPS32 or microMIPS).
    Bootisa,
    /// Dynamic flash ECC.
    Fecccon,
    /// Flash sleep mode.
    Fsleep,
    /// Debug mode CPU access permission.
    Dbgper,
    /// Soft master clear.
    Smclr,
    /// Secondary oscillator gain.
    Soscgain,
    /// Secondary oscillator boost kick start.
    Soscboost,
    /// Primary oscillator gain.
    Poscgain,
    /// Primary oscillator boost kick start.
    Poscboost,
    /// EJTAG boot.
    Ejtagben,
}

impl SettingId {
    /// Number of settings.
    pub const COUNT: usize = 40;

    /// Every setting, DEVCFG3 first.
    pub const ALL: [SettingId; Self::COUNT] = [
        Self::Userid,
        Self::Fmiien,
        Self::Fethio,
        Self::Pgl1way,
        Self::Pmdl1way,
        Self::Iol1way,
        Self::Fusbidio,
        Self::Fpllidiv,
        Self::Fpllrng,
        Self::FpllIclk,
        Self::Fpllmult,
        Self::Fpllodiv,
        Self::Upllfsel,
        Self::Fnosc,
        Self::Dmtintv,
        Self::Fsoscen,
        Self::Ieso,
        Self::Poscmod,
        Self::Osciofnc,
        Self::Fcksm,
        Self::Wdtps,
        Self::Wdtspgm,
        Self::Windis,
        Self::Fwdtwinsz,
        Self::Dmtcnt,
        Self::Fdmten,
        Self::Debug,
        Self::Jtagen,
        Self::Icesel,
        Self::Trcen,
        Self::Bootisa,
        Self::Fecccon,
        Self::Fsleep,
        Self::Dbgper,
        Self::Smclr,
        Self::Soscgain,
        Self::Soscboost,
        Self::Poscgain,
        Self::Poscboost,
        Self::Ejtagben,
    ];

    /// XC32 setting name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Userid => "USERID",
            Self::Fmiien => "FMIIEN",
            Self::Fethio => "FETHIO",
            Self::Pgl1way => "PGL1WAY",
            Self::Pmdl1way => "PMDL1WAY",
            Self::Iol1way => "IOL1WAY",
            Self::Fusbidio => "FUSBIDIO",
            Self::Fpllidiv => "FPLLIDIV",
            Self::Fpllrng => "FPLLRNG",
            Self::FpllIclk => "FPLLICLK",
            Self::Fpllmult => "FPLLMULT",
            Self::Fpllodiv => "FPLLODIV",
            Self::Upllfsel => "UPLLFSEL",
            Self::Fnosc => "FNOSC",
            Self::Dmtintv => "DMTINTV",
            Self::Fsoscen => "FSOSCEN",
            Self::Ieso => "IESO",
            Self::Poscmod => "POSCMOD",
            Self::Osciofnc => "OSCIOFNC",
            Self::Fcksm => "FCKSM",
            Self::Wdtps => "WDTPS",
            Self::Wdtspgm => "WDTSPGM",
            Self::Windis => "WINDIS",
            Self::Fwdtwinsz => "FWDTWINSZ",
            Self::Dmtcnt => "DMTCNT",
            Self::Fdmten => "FDMTEN",
            Self::Debug => "DEBUG",
            Self::Jtagen => "JTAGEN",
            Self::Icesel => "ICESEL",
            Self::Trcen => "TRCEN",
            Self::Bootisa => "BOOTISA",
            Self::Fecccon => "FECCCON",
            Self::Fsleep => "FSLEEP",
            Self::Dbgper => "DBGPER",
            Self::Smclr => "SMCLR",
            Self::Soscgain => "SOSCGAIN",
            Self::Soscboost => "SOSCBOOST",
            Self::Poscgain => "POSCGAIN",
            Self::Poscboost => "POSCBOOST",
            Self::Ejtagben => "EJTAGBEN",
        }
    }
}

impl core::fmt::Display for SettingId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a setting name is not in [`SettingId::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown configuration setting")]
pub struct UnknownSetting;

impl core::str::FromStr for SettingId {
    type Err = UnknownSetting;

    /// Case-insensitive lookup by XC32 name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownSetting)
    }
}

/// A logical value chosen for a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingValue {
    /// Symbolic option, e.g. `SPLL` or `ON`.
    Symbol(&'static str),
    /// Option carrying a magnitude, e.g. PLL multiplier `50`.
    Number(u32),
}

impl SettingValue {
    /// Magnitude of a numeric value.
    pub const fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Symbol(_) => None,
        }
    }

    /// Token of a symbolic value.
    pub const fn as_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Symbol(s) => Some(*s),
            Self::Number(_) => None,
        }
    }
}

impl core::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Symbol(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The legal value set of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedValues {
    /// A closed set of symbolic tokens.
    Symbols(&'static [&'static str]),
    /// A closed set of magnitudes.
    Numbers(&'static [u32]),
    /// Every magnitude in `min..=max`.
    Range {
        /// Inclusive lower bound.
        min: u32,
        /// Inclusive upper bound.
        max: u32,
    },
}

impl AllowedValues {
    /// Whether `value` is legal.
    pub fn contains(&self, value: &SettingValue) -> bool {
        match (self, value) {
            (Self::Symbols(tokens), SettingValue::Symbol(s)) => tokens.contains(s),
            (Self::Numbers(numbers), SettingValue::Number(n)) => numbers.contains(n),
            (Self::Range { min, max }, SettingValue::Number(n)) => (*min..=*max).contains(n),
            _ => false,
        }
    }

    /// Iterate every legal value in declaration order.
    pub fn values(&self) -> ValueIter {
        match *self {
            Self::Symbols(tokens) => ValueIter::Symbols(tokens.iter()),
            Self::Numbers(numbers) => ValueIter::Numbers(numbers.iter()),
            Self::Range { min, max } => ValueIter::Range(min..=max),
        }
    }
}

/// Iterator over the values of a table domain.
///
/// Shared by [`AllowedValues`], bit-field encodings and directive tables so
/// the consistency check can walk any of them the same way.
#[derive(Debug, Clone)]
pub enum ValueIter {
    /// Symbolic tokens.
    Symbols(core::slice::Iter<'static, &'static str>),
    /// Explicit magnitudes.
    Numbers(core::slice::Iter<'static, u32>),
    /// Inclusive magnitude range.
    Range(core::ops::RangeInclusive<u32>),
    /// Keys of a value → code table.
    Encoded(core::slice::Iter<'static, (SettingValue, u32)>),
    /// Keys of a value → token table.
    Tokens(core::slice::Iter<'static, (SettingValue, &'static str)>),
}

impl Iterator for ValueIter {
    type Item = SettingValue;

    fn next(&mut self) -> Option<SettingValue> {
        match self {
            Self::Symbols(it) => it.next().map(|s| SettingValue::Symbol(*s)),
            Self::Numbers(it) => it.next().map(|n| SettingValue::Number(*n)),
            Self::Range(it) => it.next().map(SettingValue::Number),
            Self::Encoded(it) => it.next().map(|(v, _)| *v),
            Self::Tokens(it) => it.next().map(|(v, _)| *v),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Setting identifier.
    pub id: SettingId,
    /// Legal values.
    pub allowed: AllowedValues,
    /// Value used when the caller does not choose one.
    pub default: SettingValue,
    /// One-line description shown by editors.
    pub description: &'static str,
}

/// The Setting Catalog for one device family.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    /// Entries, in the order editors list them.
    pub settings: &'static [Setting],
}

impl Catalog {
    /// Look up a setting.
    pub fn get(&self, id: SettingId) -> Option<&Setting> {
        self.settings.iter().find(|s| s.id == id)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'static, Setting> {
        self.settings.iter()
    }

    /// Default value of a setting.
    pub fn default_value(&self, id: SettingId) -> Option<SettingValue> {
        self.get(id).map(|s| s.default)
    }

    /// Turn text from an import layer into the catalog's own value.
    ///
    /// Symbols match case-insensitively and resolve to the catalog's static
    /// token. Numbers accept decimal, `0x` hex, and a symbolic prefix such as
    /// `MUL_50`, `DIV_2` or `PS1024`. Returns `None` for anything not legal.
    pub fn resolve(&self, id: SettingId, text: &str) -> Option<SettingValue> {
        let setting = self.get(id)?;
        let text = text.trim();
        let value = match setting.allowed {
            AllowedValues::Symbols(tokens) => tokens
                .iter()
                .find(|t| t.eq_ignore_ascii_case(text))
                .map(|t| SettingValue::Symbol(*t))?,
            AllowedValues::Numbers(_) | AllowedValues::Range { .. } => {
                SettingValue::Number(parse_magnitude(text)?)
            }
        };
        setting.allowed.contains(&value).then_some(value)
    }
}

/// Parse `50`, `0x32`, `MUL_50`, `PS1024`.
fn parse_magnitude(text: &str) -> Option<u32> {
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).ok();
    }
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    let digits = text.trim_start_matches(|c: char| c.is_ascii_alphabetic() || c == '_');
    if digits.len() == text.len() {
        return None;
    }
    digits.parse::<u32>().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    static TINY: Catalog = Catalog {
        settings: &[
            Setting {
                id: SettingId::Fnosc,
                allowed: AllowedValues::Symbols(&["FRC", "SPLL"]),
                default: SettingValue::Symbol("SPLL"),
                description: "Oscillator selection",
            },
            Setting {
                id: SettingId::Fpllmult,
                allowed: AllowedValues::Range { min: 1, max: 128 },
                default: SettingValue::Number(50),
                description: "PLL multiplier",
            },
        ],
    };

    #[test]
    fn setting_names_round_trip_through_from_str() {
        for id in SettingId::ALL {
            assert_eq!(id.name().parse::<SettingId>(), Ok(id));
        }
        assert_eq!("fpllmult".parse::<SettingId>(), Ok(SettingId::Fpllmult));
        assert_eq!("NOPE".parse::<SettingId>(), Err(UnknownSetting));
    }

    #[test]
    fn all_lists_every_setting_once() {
        let mut seen = SettingId::ALL.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), SettingId::COUNT);
    }

    #[test]
    fn resolve_symbol_returns_catalog_token() {
        let v = TINY.resolve(SettingId::Fnosc, "spll").expect("legal symbol");
        assert_eq!(v, SettingValue::Symbol("SPLL"));
        assert!(TINY.resolve(SettingId::Fnosc, "POSC").is_none());
    }

    #[test]
    fn resolve_number_accepts_prefixed_and_hex_forms() {
        assert_eq!(
            TINY.resolve(SettingId::Fpllmult, "MUL_50"),
            Some(SettingValue::Number(50))
        );
        assert_eq!(
            TINY.resolve(SettingId::Fpllmult, "0x20"),
            Some(SettingValue::Number(32))
        );
        assert_eq!(
            TINY.resolve(SettingId::Fpllmult, "50"),
            Some(SettingValue::Number(50))
        );
    }

    #[test]
    fn resolve_rejects_out_of_range_and_text() {
        assert!(TINY.resolve(SettingId::Fpllmult, "129").is_none());
        assert!(TINY.resolve(SettingId::Fpllmult, "fifty").is_none());
        assert!(TINY.resolve(SettingId::Userid, "0").is_none());
    }

    #[test]
    fn range_values_iterate_inclusive() {
        let allowed = AllowedValues::Range { min: 1, max: 3 };
        let values: Vec<_> = allowed.values().collect();
        assert_eq!(
            values,
            [
                SettingValue::Number(1),
                SettingValue::Number(2),
                SettingValue::Number(3)
            ]
        );
    }

    #[test]
    fn symbols_never_contain_numbers() {
        let allowed = AllowedValues::Symbols(&["ON", "OFF"]);
        assert!(!allowed.contains(&SettingValue::Number(1)));
        assert!(allowed.contains(&SettingValue::Symbol("ON")));
    }
}
