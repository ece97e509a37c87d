//! Text input boundary: JSON files and command-line values.
//!
//! Everything past this module works on typed values only.

use std::path::Path;

use anyhow::{bail, Context, Result};
use compiler::{Direction, Level, PinConfiguration, SelectionSet, SpeedMode};
use device::{Catalog, Hertz, InputSignal, OutputSignal, PinId, SettingId, Signal};
use serde::Deserialize;
use serde_json::Value;

/// Parse `{ "FPLLMULT": 50, "FNOSC": "SPLL", "FSOSCEN": true }`.
///
/// Numbers and strings go through [`Catalog::resolve`]; booleans map to
/// `ON` / `OFF`. Key case does not matter.
pub fn parse_selection(catalog: &Catalog, text: &str) -> Result<SelectionSet> {
    let object: serde_json::Map<String, Value> =
        serde_json::from_str(text).context("selection must be a JSON object")?;
    let mut selection = SelectionSet::new();
    for (key, value) in &object {
        let id: SettingId = key
            .parse()
            .with_context(|| format!("unknown setting `{key}`"))?;
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(true) => "ON".to_owned(),
            Value::Bool(false) => "OFF".to_owned(),
            other => bail!("{id}: expected a string, number or bool, got {other}"),
        };
        let resolved = catalog
            .resolve(id, &text)
            .with_context(|| format!("{id}: `{text}` is not a legal value"))?;
        tracing::debug!(%id, value = %resolved, "selection entry");
        selection.insert(id, resolved);
    }
    Ok(selection)
}

/// Read and parse a selection file.
pub fn read_selection(catalog: &Catalog, path: &Path) -> Result<SelectionSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_selection(catalog, &text).with_context(|| format!("in {}", path.display()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModeSpec {
    Gpio,
    Analog,
    Peripheral,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DirectionSpec {
    Input,
    Output,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum LevelSpec {
    Low,
    High,
}

/// One entry of a pins file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PinSpec {
    pin: String,
    mode: ModeSpec,
    #[serde(default)]
    direction: Option<DirectionSpec>,
    #[serde(default)]
    level: Option<LevelSpec>,
    #[serde(default)]
    signal: Option<String>,
    #[serde(default)]
    pull_up: bool,
    #[serde(default)]
    pull_down: bool,
    #[serde(default)]
    open_drain: bool,
}

/// Peripheral function by datasheet name, e.g. `U1RX` or `U1TX`.
pub fn parse_signal(name: &str) -> Result<Signal> {
    if let Ok(input) = name.parse::<InputSignal>() {
        return Ok(Signal::Input(input));
    }
    name.parse::<OutputSignal>()
        .map(Signal::Output)
        .map_err(|_| anyhow::anyhow!("`{name}` is not a remappable peripheral function"))
}

impl PinSpec {
    fn into_configuration(self) -> Result<PinConfiguration> {
        let pin: PinId = self
            .pin
            .parse()
            .with_context(|| format!("bad pin `{}`", self.pin))?;
        let mut cfg = match self.mode {
            ModeSpec::Gpio => match self.direction.unwrap_or(DirectionSpec::Input) {
                DirectionSpec::Input => PinConfiguration::gpio_input(pin),
                DirectionSpec::Output => {
                    let level = match self.level.unwrap_or(LevelSpec::Low) {
                        LevelSpec::Low => Level::Low,
                        LevelSpec::High => Level::High,
                    };
                    PinConfiguration::gpio_output(pin, level)
                }
            },
            ModeSpec::Analog => PinConfiguration::analog(pin),
            ModeSpec::Peripheral => {
                let name = self
                    .signal
                    .as_deref()
                    .with_context(|| format!("{pin}: peripheral pin needs a `signal`"))?;
                PinConfiguration::peripheral(pin, parse_signal(name)?)
            }
        };
        cfg.pull_up = self.pull_up;
        cfg.pull_down = self.pull_down;
        cfg.open_drain = self.open_drain && cfg.direction == Direction::Output;
        Ok(cfg)
    }
}

/// Parse `[{ "pin": "RB3", "mode": "gpio", "direction": "output" }, ...]`.
pub fn parse_pins(text: &str) -> Result<Vec<PinConfiguration>> {
    let specs: Vec<PinSpec> = serde_json::from_str(text).context("pins must be a JSON array")?;
    specs
        .into_iter()
        .enumerate()
        .map(|(i, spec)| {
            spec.into_configuration()
                .with_context(|| format!("pin entry {i}"))
        })
        .collect()
}

/// Read and parse a pins file.
pub fn read_pins(path: &Path) -> Result<Vec<PinConfiguration>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_pins(&text).with_context(|| format!("in {}", path.display()))
}

/// Clap value parser for frequencies: `100000000`, `100M`, `100MHz`, `32768Hz`, `8k`.
pub fn parse_hertz(text: &str) -> Result<Hertz, String> {
    let lower = text.trim().to_ascii_lowercase();
    let body = lower.strip_suffix("hz").unwrap_or(&lower);
    let (digits, scale) = if let Some(d) = body.strip_suffix('m') {
        (d, 1_000_000)
    } else if let Some(d) = body.strip_suffix('k') {
        (d, 1_000)
    } else {
        (body, 1)
    };
    digits
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(scale))
        .and_then(Hertz::new)
        .ok_or_else(|| format!("`{text}` is not a frequency (e.g. 100M, 8000000)"))
}

/// Clap value parser for `--speed`: clocks per bit, `4` or `16`.
pub fn parse_speed(text: &str) -> Result<SpeedMode, String> {
    text.trim()
        .parse::<u8>()
        .ok()
        .and_then(SpeedMode::from_divisor)
        .ok_or_else(|| format!("`{text}` is not a baud divisor (4 or 16)"))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use device::{SettingValue, PIC32MZ_EF};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn selection_resolves_numbers_symbols_and_bools() {
        let sel = parse_selection(
            &PIC32MZ_EF.catalog,
            r#"{ "fpllmult": "MUL_64", "FNOSC": "frc", "FSOSCEN": false, "USERID": 4660 }"#,
        )
        .unwrap();
        assert_eq!(sel.get(SettingId::Fpllmult), Some(&SettingValue::Number(64)));
        assert_eq!(sel.get(SettingId::Fnosc), Some(&SettingValue::Symbol("FRC")));
        assert_eq!(sel.get(SettingId::Fsoscen), Some(&SettingValue::Symbol("OFF")));
        assert_eq!(sel.get(SettingId::Userid), Some(&SettingValue::Number(0x1234)));
    }

    #[test]
    fn selection_rejects_unknown_setting_and_illegal_value() {
        let err = parse_selection(&PIC32MZ_EF.catalog, r#"{ "NOPE": 1 }"#).unwrap_err();
        assert!(err.to_string().contains("unknown setting `NOPE`"), "{err:#}");
        let err = parse_selection(&PIC32MZ_EF.catalog, r#"{ "FPLLMULT": 500 }"#).unwrap_err();
        assert!(err.to_string().contains("not a legal value"), "{err:#}");
    }

    #[test]
    fn selection_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sel.json");
        fs::write(&path, r#"{ "FPLLODIV": "DIV_4" }"#).unwrap();
        let sel = read_selection(&PIC32MZ_EF.catalog, &path).unwrap();
        assert_eq!(sel.get(SettingId::Fpllodiv), Some(&SettingValue::Number(4)));
        assert!(read_selection(&PIC32MZ_EF.catalog, &dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn pins_file_parses_every_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pins.json");
        fs::write(
            &path,
            r#"[
                { "pin": "RB3", "mode": "gpio", "direction": "output", "level": "high", "open_drain": true },
                { "pin": "D5", "mode": "gpio", "pull_up": true },
                { "pin": "RB0", "mode": "analog" },
                { "pin": "RPB9", "mode": "peripheral", "signal": "U1RX" }
            ]"#,
        )
        .unwrap();
        let pins = read_pins(&path).unwrap();
        assert_eq!(pins.len(), 4);
        assert_eq!(pins[0].initial_level, Level::High);
        assert!(pins[0].open_drain);
        assert_eq!(pins[1].direction, Direction::Input);
        assert!(pins[1].pull_up);
        assert_eq!(pins[3].pin.to_string(), "RB9");
        assert_eq!(
            pins[3].mode,
            compiler::PinMode::Peripheral(Signal::Input(InputSignal::U1rx))
        );
    }

    #[test]
    fn peripheral_pin_needs_signal() {
        let err = parse_pins(r#"[{ "pin": "RB9", "mode": "peripheral" }]"#).unwrap_err();
        assert!(format!("{err:#}").contains("needs a `signal`"), "{err:#}");
    }

    #[test]
    fn hertz_suffixes() {
        assert_eq!(parse_hertz("100M").unwrap().get(), 100_000_000);
        assert_eq!(parse_hertz("50MHz").unwrap().get(), 50_000_000);
        assert_eq!(parse_hertz("8k").unwrap().get(), 8_000);
        assert_eq!(parse_hertz("32768Hz").unwrap().get(), 32_768);
        assert!(parse_hertz("0").is_err());
        assert!(parse_hertz("fast").is_err());
    }

    #[test]
    fn speed_divisors() {
        assert_eq!(parse_speed("4"), Ok(SpeedMode::High));
        assert_eq!(parse_speed("16"), Ok(SpeedMode::Standard));
        assert!(parse_speed("8").is_err());
    }
}
