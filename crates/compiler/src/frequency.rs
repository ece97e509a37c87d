//! Frequency Model: system clock and peripheral bus clocks.
//!
//! # System clock
//!
//! `FNOSC` picks the source. With `SPLL` the output is
//!
//! ```text
//! sysclk = pll_input * FPLLMULT / FPLLIDIV / FPLLODIV
//! ```
//!
//! evaluated in `u64` with the multiply first, so 24 MHz / 7 × 128 / 2 is
//! 219 428 571 Hz where a divide-first order gives 219 428 544 Hz.
//!
//! # Sources
//!
//! - PIC32MZ EF datasheet (DS60001320), Figure 8-1 "Oscillator diagram"
//! - §8.3 "SPLLCON" (PLL input range 5-64 MHz, VCO 350-700 MHz)

use device::clock::{self, PBDIV_MASK, PBDIV_ON, PLL_VCO_MAX, PLL_VCO_MIN, SYSCLK_MAX};
use device::{AllowedValues, Catalog, ClockSources, Hertz, PeripheralBus, SettingId, SettingValue};

use crate::error::{Error, PllStage};
use crate::selection::SelectionSet;

/// Intermediate frequencies of the system PLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PllPlan {
    /// Clock entering the PLL (FRC or POSC).
    pub source: Hertz,
    /// After `FPLLIDIV`; must sit in the `FPLLRNG` band.
    pub input: u64,
    /// After `FPLLMULT`; must sit in 350-700 MHz.
    pub vco: u64,
    /// After `FPLLODIV`.
    pub output: Hertz,
}

/// Computes clock frequencies from a selection.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyModel<'a> {
    catalog: &'a Catalog,
    sources: ClockSources,
}

impl<'a> FrequencyModel<'a> {
    /// Model using `catalog` for defaults and `sources` for oscillators.
    pub const fn new(catalog: &'a Catalog, sources: ClockSources) -> Self {
        Self { catalog, sources }
    }

    /// System clock for `selection`; unselected settings take catalog defaults.
    pub fn system_clock(&self, selection: &SelectionSet) -> Result<Hertz, Error> {
        let oscillator = self.symbol(selection, SettingId::Fnosc)?;
        let sysclk = match oscillator {
            "SPLL" => self.pll(selection)?.output,
            "FRC" | "FRCDIV" => self.sources.frc,
            "POSC" => self.sources.posc,
            "SOSC" => self.sources.sosc,
            "LPRC" => self.sources.lprc,
            other => {
                return Err(Error::UnmappedValue {
                    setting: SettingId::Fnosc,
                    value: SettingValue::Symbol(other),
                })
            }
        };
        tracing::debug!(oscillator, sysclk = sysclk.get(), "system clock");
        Ok(sysclk)
    }

    /// System PLL frequencies, with input band and VCO range checked.
    pub fn pll(&self, selection: &SelectionSet) -> Result<PllPlan, Error> {
        let source = match self.symbol(selection, SettingId::FpllIclk)? {
            "PLL_FRC" => self.sources.frc,
            "PLL_POSC" => self.sources.posc,
            other => {
                return Err(Error::UnmappedValue {
                    setting: SettingId::FpllIclk,
                    value: SettingValue::Symbol(other),
                })
            }
        };
        let idiv = u64::from(self.magnitude(selection, SettingId::Fpllidiv)?);
        let mult = u64::from(self.magnitude(selection, SettingId::Fpllmult)?);
        let odiv = u64::from(self.magnitude(selection, SettingId::Fpllodiv)?);

        let scaled = u64::from(source.get())
            .checked_mul(mult)
            .ok_or(Error::PllOutOfRange {
                stage: PllStage::Vco,
                frequency: u64::MAX,
            })?;
        let input = u64::from(source.get())
            .checked_div(idiv)
            .ok_or(Error::NonPositive("FPLLIDIV"))?;
        let vco = scaled
            .checked_div(idiv)
            .ok_or(Error::NonPositive("FPLLIDIV"))?;
        let output = vco.checked_div(odiv).ok_or(Error::NonPositive("FPLLODIV"))?;

        let band = self.symbol(selection, SettingId::Fpllrng)?;
        let in_band = u32::try_from(input)
            .ok()
            .and_then(Hertz::new)
            .is_some_and(|hz| clock::pll_range_accepts(band, hz));
        if !in_band {
            return Err(Error::PllOutOfRange {
                stage: PllStage::Input,
                frequency: input,
            });
        }
        if !(u64::from(PLL_VCO_MIN.get())..=u64::from(PLL_VCO_MAX.get())).contains(&vco) {
            return Err(Error::PllOutOfRange {
                stage: PllStage::Vco,
                frequency: vco,
            });
        }
        let output = u32::try_from(output)
            .ok()
            .and_then(Hertz::new)
            .filter(|hz| *hz <= SYSCLK_MAX)
            .ok_or(Error::PllOutOfRange {
                stage: PllStage::Output,
                frequency: output,
            })?;

        tracing::trace!(source = source.get(), input, vco, output = output.get(), "PLL");
        Ok(PllPlan {
            source,
            input,
            vco,
            output,
        })
    }

    fn value(&self, selection: &SelectionSet, id: SettingId) -> Result<SettingValue, Error> {
        selection
            .get(id)
            .copied()
            .or_else(|| self.catalog.default_value(id))
            .ok_or(Error::MissingSetting(id))
    }

    fn symbol(&self, selection: &SelectionSet, id: SettingId) -> Result<&'static str, Error> {
        let value = self.value(selection, id)?;
        value.as_symbol().ok_or(Error::UnmappedValue { setting: id, value })
    }

    /// A divider or multiplier, which must be a legal `Number` for `id`.
    fn magnitude(&self, selection: &SelectionSet, id: SettingId) -> Result<u32, Error> {
        let value = self.value(selection, id)?;
        let illegal = Error::IllegalMagnitude { setting: id, value };
        let allowed = self
            .catalog
            .get(id)
            .map_or(AllowedValues::Numbers(&[]), |s| s.allowed);
        match value {
            SettingValue::Number(n) if n > 0 && allowed.contains(&value) => Ok(n),
            _ => Err(illegal),
        }
    }
}

/// Divider and enable state of one peripheral bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BusSetting {
    /// Bus being configured.
    pub bus: PeripheralBus,
    /// Divider from SYSCLK, 1..=128.
    pub divider: u8,
    /// Whether the bus clock runs.
    pub enabled: bool,
}

impl BusSetting {
    /// Reset state of `bus`.
    pub const fn reset(bus: PeripheralBus) -> Self {
        Self {
            bus,
            divider: bus.default_divider(),
            enabled: true,
        }
    }

    /// Enabled bus dividing SYSCLK by `divider`.
    pub const fn divided(bus: PeripheralBus, divider: u8) -> Self {
        Self {
            bus,
            divider,
            enabled: true,
        }
    }

    /// Switched-off bus.
    pub const fn disabled(bus: PeripheralBus) -> Self {
        Self {
            bus,
            divider: bus.default_divider(),
            enabled: false,
        }
    }

    /// `PBxDIV` register value: `ON` in bit 15, `divider - 1` in bits 6:0.
    pub fn pbdiv_word(&self) -> u32 {
        let pbdiv = u32::from(self.divider.saturating_sub(1)) & PBDIV_MASK;
        if self.enabled {
            PBDIV_ON | pbdiv
        } else {
            pbdiv
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if !(1..=PeripheralBus::MAX_DIVIDER).contains(&self.divider) {
            return Err(Error::InvalidDivider {
                bus: self.bus,
                divider: self.divider,
            });
        }
        if !self.enabled && !self.bus.can_disable() {
            return Err(Error::BusAlwaysOn(self.bus));
        }
        Ok(())
    }
}

/// SYSCLK plus the eight peripheral bus clocks derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTree {
    sysclk: Hertz,
    buses: [BusSetting; PeripheralBus::COUNT],
}

impl ClockTree {
    /// Reset dividers: every bus /2 except PBCLK7 /1.
    pub fn reset(sysclk: Hertz) -> Self {
        Self {
            sysclk,
            buses: PeripheralBus::ALL.map(BusSetting::reset),
        }
    }

    /// Reset tree with `settings` applied on top (later entries win).
    pub fn derive(sysclk: Hertz, settings: &[BusSetting]) -> Result<Self, Error> {
        let mut tree = Self::reset(sysclk);
        for setting in settings {
            setting.validate()?;
            if let Some(slot) = tree.buses.get_mut(setting.bus.index()) {
                *slot = *setting;
            }
        }
        Ok(tree)
    }

    /// System clock.
    pub const fn sysclk(&self) -> Hertz {
        self.sysclk
    }

    /// Setting of `bus`.
    pub fn setting(&self, bus: PeripheralBus) -> BusSetting {
        self.buses
            .get(bus.index())
            .copied()
            .unwrap_or(BusSetting::reset(bus))
    }

    /// Clock of `bus`; errors if the bus is switched off.
    pub fn bus_clock(&self, bus: PeripheralBus) -> Result<Hertz, Error> {
        let setting = self.setting(bus);
        if !setting.enabled {
            return Err(Error::BusDisabled(bus));
        }
        self.sysclk
            .get()
            .checked_div(u32::from(setting.divider))
            .and_then(Hertz::new)
            .ok_or(Error::NonPositive("peripheral bus clock"))
    }

    /// Every bus setting, PBCLK1 first.
    pub fn iter(&self) -> impl Iterator<Item = BusSetting> + '_ {
        self.buses.iter().copied()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("SYSCLK", &self.sysclk)?;
        for setting in self.iter() {
            match self.bus_clock(setting.bus) {
                Ok(hz) => map.serialize_entry(setting.bus.name(), &hz)?,
                Err(_) => map.serialize_entry(setting.bus.name(), &Option::<Hertz>::None)?,
            }
        }
        map.end()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use device::PIC32MZ_EF;

    fn model() -> FrequencyModel<'static> {
        FrequencyModel::new(&PIC32MZ_EF.catalog, PIC32MZ_EF.clocks)
    }

    fn mhz(n: u32) -> Hertz {
        Hertz::from_mhz(n).unwrap()
    }

    #[test]
    fn test_default_system_clock_is_200_mhz() {
        let sel = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        assert_eq!(model().system_clock(&sel).unwrap(), mhz(200));
        // Empty selection falls back to the same defaults.
        assert_eq!(model().system_clock(&SelectionSet::new()).unwrap(), mhz(200));
    }

    #[test]
    fn test_pll_reports_vco() {
        let plan = model().pll(&SelectionSet::new()).unwrap();
        assert_eq!(plan.input, 8_000_000);
        assert_eq!(plan.vco, 400_000_000);
    }

    #[test]
    fn test_multiply_before_divide() {
        let sel = SelectionSet::new()
            .with(SettingId::FpllIclk, SettingValue::Symbol("PLL_POSC"))
            .with(SettingId::Fpllidiv, SettingValue::Number(7))
            .with(SettingId::Fpllmult, SettingValue::Number(128))
            .with(SettingId::Fpllodiv, SettingValue::Number(2))
            .with(SettingId::Fpllrng, SettingValue::Symbol("RANGE_BYPASS"));
        let plan = model().pll(&sel).unwrap();
        assert_eq!(plan.vco, 438_857_142, "24 MHz × 128 / 7");
        assert_eq!(plan.output.get(), 219_428_571, "divide-first would give 219_428_544");
    }

    #[test]
    fn test_non_pll_sources() {
        let expected = [
            ("FRC", 8_000_000),
            ("POSC", 24_000_000),
            ("SOSC", 32_768),
            ("LPRC", 32_000),
        ];
        for (osc, hz) in expected {
            let sel = SelectionSet::new().with(SettingId::Fnosc, SettingValue::Symbol(osc));
            assert_eq!(model().system_clock(&sel).unwrap().get(), hz, "{osc}");
        }
    }

    #[test]
    fn test_symbol_as_divider_is_illegal() {
        let sel = SelectionSet::new().with(SettingId::Fpllmult, SettingValue::Symbol("MUL_50"));
        let err = model().system_clock(&sel).unwrap_err();
        assert!(matches!(err, Error::IllegalMagnitude { setting: SettingId::Fpllmult, .. }));
    }

    #[test]
    fn test_unlisted_output_divider_is_illegal() {
        let sel = SelectionSet::new().with(SettingId::Fpllodiv, SettingValue::Number(3));
        assert!(matches!(
            model().system_clock(&sel),
            Err(Error::IllegalMagnitude { setting: SettingId::Fpllodiv, .. })
        ));
    }

    #[test]
    fn test_vco_out_of_range() {
        // 8 MHz × 100 = 800 MHz VCO.
        let sel = SelectionSet::new().with(SettingId::Fpllmult, SettingValue::Number(100));
        assert!(matches!(
            model().system_clock(&sel),
            Err(Error::PllOutOfRange { stage: PllStage::Vco, frequency: 800_000_000 })
        ));
    }

    #[test]
    fn test_pll_input_must_match_band() {
        let sel = SelectionSet::new()
            .with(SettingId::Fpllrng, SettingValue::Symbol("RANGE_13_26_MHZ"));
        assert!(matches!(
            model().system_clock(&sel),
            Err(Error::PllOutOfRange { stage: PllStage::Input, .. })
        ));
    }

    #[test]
    fn test_pll_ignored_when_not_selected() {
        let sel = SelectionSet::new()
            .with(SettingId::Fnosc, SettingValue::Symbol("FRC"))
            .with(SettingId::Fpllmult, SettingValue::Number(100));
        assert_eq!(model().system_clock(&sel).unwrap(), mhz(8));
    }

    #[test]
    fn test_default_bus_clocks() {
        let tree = ClockTree::reset(mhz(200));
        assert_eq!(tree.bus_clock(PeripheralBus::Pb2).unwrap(), mhz(100));
        assert_eq!(tree.bus_clock(PeripheralBus::Pb3).unwrap(), mhz(100));
        assert_eq!(tree.bus_clock(PeripheralBus::Pb7).unwrap(), mhz(200));
    }

    #[test]
    fn test_disabled_bus_has_no_clock() {
        let tree =
            ClockTree::derive(mhz(200), &[BusSetting::disabled(PeripheralBus::Pb5)]).unwrap();
        assert_eq!(
            tree.bus_clock(PeripheralBus::Pb5),
            Err(Error::BusDisabled(PeripheralBus::Pb5))
        );
    }

    #[test]
    fn test_pb1_and_pb7_cannot_be_disabled() {
        for bus in [PeripheralBus::Pb1, PeripheralBus::Pb7] {
            assert_eq!(
                ClockTree::derive(mhz(200), &[BusSetting::disabled(bus)]),
                Err(Error::BusAlwaysOn(bus))
            );
        }
    }

    #[test]
    fn test_divider_bounds() {
        let max = BusSetting::divided(PeripheralBus::Pb2, 128);
        assert!(ClockTree::derive(mhz(200), &[max]).is_ok());
        for divider in [0, 129] {
            assert_eq!(
                ClockTree::derive(mhz(200), &[BusSetting::divided(PeripheralBus::Pb2, divider)]),
                Err(Error::InvalidDivider { bus: PeripheralBus::Pb2, divider })
            );
        }
    }

    #[test]
    fn test_pbdiv_word() {
        assert_eq!(BusSetting::reset(PeripheralBus::Pb2).pbdiv_word(), 0x8001);
        assert_eq!(BusSetting::reset(PeripheralBus::Pb7).pbdiv_word(), 0x8000);
        assert_eq!(BusSetting::divided(PeripheralBus::Pb3, 128).pbdiv_word(), 0x807F);
        assert_eq!(BusSetting::disabled(PeripheralBus::Pb4).pbdiv_word(), 0x0001);
    }
}
