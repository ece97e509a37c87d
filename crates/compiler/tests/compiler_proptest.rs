//! Property-based tests for the configuration compiler.
//!
//! Properties checked against the PIC32MZ EF tables:
//! - compiled words do not depend on insertion order of any selection
//! - every legal value reads back out of the compiled words
//! - baud error is bounded by the BRG rounding step
//! - timer plans never overflow their period register
//! - port masks are order independent and equal the union of single pins
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::arithmetic_side_effects)]

use core::time::Duration;

use compiler::{
    aggregate, plan_baud, plan_timer, DirectiveMapper, Error, Level, PinConfiguration,
    PortMaskSet, RegisterCompiler, SelectionSet, SpeedMode,
};
use device::{
    AllowedValues, Hertz, PinId, Port, RegisterWidth, Setting, SettingId, SettingValue, TimerClass,
    PIC32MZ_EF,
};
use proptest::prelude::*;

/// One legal value of `setting`, chosen by `pick`.
fn legal_value(setting: &Setting, pick: &prop::sample::Index) -> SettingValue {
    match setting.allowed {
        AllowedValues::Range { min, max } => {
            // Sample the range instead of collecting it.
            let span = u64::from(max - min) + 1;
            let offset = u32::try_from(pick.index(usize::try_from(span).unwrap())).unwrap();
            SettingValue::Number(min + offset)
        }
        allowed => *pick.get(&allowed.values().collect::<Vec<_>>()),
    }
}

/// Any subset of the catalog, each setting with an arbitrary legal value.
fn selection_entries() -> impl Strategy<Value = Vec<(SettingId, SettingValue)>> {
    let settings = PIC32MZ_EF.catalog.settings.to_vec();
    let len = settings.len();
    proptest::sample::subsequence(settings, 0..=len)
        .prop_flat_map(|settings| {
            let n = settings.len();
            (Just(settings), proptest::collection::vec(any::<prop::sample::Index>(), n))
        })
        .prop_map(|(settings, picks)| {
            settings
                .iter()
                .zip(&picks)
                .map(|(setting, pick)| (setting.id, legal_value(setting, pick)))
                .collect()
        })
}

fn implemented_pins() -> Vec<PinId> {
    Port::ALL
        .into_iter()
        .flat_map(|port| (0u8..16).filter_map(move |bit| PinId::new(port, bit)))
        .filter(|pin| PIC32MZ_EF.ports.has(*pin))
        .collect()
}

fn configure(pin: PinId, kind: u8) -> PinConfiguration {
    match kind % 6 {
        0 => PinConfiguration::gpio_output(pin, Level::Low),
        1 => PinConfiguration::gpio_output(pin, Level::High).open_drain(),
        2 => PinConfiguration::gpio_input(pin),
        3 => PinConfiguration::gpio_input(pin).pull_up(),
        4 => PinConfiguration::gpio_input(pin).pull_down(),
        _ => PinConfiguration::analog(pin),
    }
}

fn pin_configs() -> impl Strategy<Value = Vec<PinConfiguration>> {
    let pins = implemented_pins();
    let len = pins.len();
    proptest::sample::subsequence(pins, 0..=len.min(24))
        .prop_flat_map(|pins| {
            let n = pins.len();
            (Just(pins), proptest::collection::vec(any::<u8>(), n))
        })
        .prop_map(|(pins, kinds)| {
            pins.into_iter()
                .zip(kinds)
                .map(|(pin, kind)| configure(pin, kind))
                .collect()
        })
}

proptest! {
    /// Insertion order of a selection never changes the words.
    #[test]
    fn compile_is_order_independent(
        orders in selection_entries()
            .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle())),
    ) {
        let (entries, shuffled) = orders;
        let forward: SelectionSet = entries.iter().copied().collect();
        let reversed: SelectionSet = entries.iter().rev().copied().collect();
        let shuffled: SelectionSet = shuffled.into_iter().collect();
        let compiler = RegisterCompiler::new(&PIC32MZ_EF.fields);
        let words = compiler.compile(&forward).unwrap();
        prop_assert_eq!(&words, &compiler.compile(&reversed).unwrap());
        prop_assert_eq!(&words, &compiler.compile(&shuffled).unwrap());
        for (id, value) in &entries {
            prop_assert_eq!(compiler.decode(&words, *id), Some(*value));
        }
    }

    /// Any legal value of any setting decodes back out of the compiled words.
    #[test]
    fn legal_values_read_back(setting_idx in 0usize..SettingId::COUNT, pick in any::<prop::sample::Index>()) {
        let setting = &PIC32MZ_EF.catalog.settings[setting_idx];
        let value = legal_value(setting, &pick);
        let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog).with(setting.id, value);
        let compiler = RegisterCompiler::new(&PIC32MZ_EF.fields);
        let words = compiler.compile(&selection).unwrap();
        prop_assert_eq!(compiler.decode(&words, setting.id), Some(value));
    }

    /// `actual / target` is off by at most half a BRG step.
    #[test]
    fn baud_error_bounded_by_rounding(
        clock_hz in 1_000_000u32..=252_000_000,
        target in 300u32..=3_000_000,
        high in any::<bool>(),
    ) {
        let speed = if high { SpeedMode::High } else { SpeedMode::Standard };
        let div = u64::from(speed.divisor());
        prop_assume!(u64::from(clock_hz) >= div * u64::from(target));
        match plan_baud(target, Hertz::new(clock_hz).unwrap(), speed) {
            Ok(plan) => {
                let steps = f64::from(plan.baud_generator_value) + 1.0;
                prop_assert!(plan.error_percent.abs() <= 50.0 / steps + 1e-9,
                    "BRG {} error {}%", plan.baud_generator_value, plan.error_percent);
                prop_assert_eq!(plan.speed_divisor, speed.divisor());
            }
            Err(Error::BaudGeneratorOverflow { value, .. }) => {
                prop_assert!(value > u64::from(u16::MAX));
            }
            Err(other) => prop_assert!(false, "unexpected {other}"),
        }
    }

    /// A plan always fits its register and never overshoots the target.
    #[test]
    fn timer_plan_fits_register(
        period_ns in 1u64..=20_000_000_000,
        bus_mhz in 1u32..=200,
        type_b in any::<bool>(),
        wide in any::<bool>(),
    ) {
        let class = if type_b { TimerClass::TypeB } else { TimerClass::TypeA };
        let width = if wide && type_b { RegisterWidth::Bits32 } else { RegisterWidth::Bits16 };
        let target = Duration::from_nanos(period_ns);
        let bus = Hertz::from_mhz(bus_mhz).unwrap();
        match plan_timer(target, bus, width, class.prescalers()) {
            Ok(plan) => {
                prop_assert!(u64::from(plan.period_register_value) < width.max_ticks());
                prop_assert!(plan.resulting_period <= target);
                prop_assert_eq!(class.tckps(plan.prescaler), Some(plan.prescaler_code));
                // Any smaller prescaler would overflow the register.
                for &smaller in class.prescalers().iter().filter(|&&p| p < plan.prescaler) {
                    let ticks = u128::from(bus.get()) * target.as_nanos()
                        / (1_000_000_000 * u128::from(smaller));
                    prop_assert!(ticks > u128::from(width.max_ticks()));
                }
            }
            Err(Error::NoPrescalerFits { ticks, max_ticks }) => {
                prop_assert!(ticks > u128::from(max_ticks));
            }
            Err(Error::PeriodTooShort { .. }) => {
                let largest = u128::from(*class.prescalers().last().unwrap());
                prop_assert!(u128::from(bus.get()) * target.as_nanos() < 1_000_000_000 * largest);
            }
            Err(other) => prop_assert!(false, "unexpected {other}"),
        }
    }

    /// Port masks ignore pin order and equal the union of single-pin masks.
    #[test]
    fn port_masks_commute_and_union(
        pins in pin_configs().prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle())),
    ) {
        let (pins, shuffled) = pins;
        let all = aggregate(&PIC32MZ_EF.ports, &pins).unwrap();
        prop_assert_eq!(&all, &aggregate(&PIC32MZ_EF.ports, &shuffled).unwrap());

        let union = pins
            .iter()
            .map(|cfg| aggregate(&PIC32MZ_EF.ports, core::slice::from_ref(cfg)).unwrap())
            .fold(PortMaskSet::default(), |acc, set| acc | set);
        prop_assert_eq!(&all, &union);

        let ports: Vec<Port> = all.iter().map(|(port, _)| port).collect();
        let mut sorted = ports.clone();
        sorted.sort();
        prop_assert_eq!(ports, sorted);
    }
}

/// The default configuration reproduces the reference board's words.
#[test]
fn reference_vector() {
    let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
    let words = RegisterCompiler::new(&PIC32MZ_EF.fields)
        .compile(&selection)
        .unwrap();
    assert_eq!(
        words.to_string(),
        "DEVCFG3 = 0x43000000, DEVCFG2 = 0x40013190, DEVCFG1 = 0x5FEAC7F9, DEVCFG0 = 0x403FF773"
    );
}

/// Every emitted directive names a value the compiled words hold.
#[test]
fn directives_agree_with_registers() {
    let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
    let compiler = RegisterCompiler::new(&PIC32MZ_EF.fields);
    let words = compiler.compile(&selection).unwrap();
    let directives = DirectiveMapper::new(&PIC32MZ_EF.directives).to_directives(&selection);
    assert_eq!(directives.len(), selection.len());
    for directive in &directives {
        assert_eq!(
            compiler.decode(&words, directive.setting()),
            Some(directive.value()),
            "{directive}"
        );
    }
    compiler::consistency::check(
        &PIC32MZ_EF.catalog,
        &PIC32MZ_EF.fields,
        &PIC32MZ_EF.directives,
    )
    .unwrap();
    assert!(PIC32MZ_EF.fields.validate().is_ok());
}

/// Default clocks: 200 MHz SYSCLK, 100 MHz on the UART and timer buses.
#[test]
fn default_clock_tree() {
    let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
    let model = compiler::FrequencyModel::new(&PIC32MZ_EF.catalog, PIC32MZ_EF.clocks);
    let sysclk = model.system_clock(&selection).unwrap();
    assert_eq!(sysclk, Hertz::from_mhz(200).unwrap());
    let tree = compiler::ClockTree::reset(sysclk);
    assert_eq!(tree.bus_clock(device::UART_BUS), Ok(Hertz::from_mhz(100).unwrap()));
    assert_eq!(tree.bus_clock(device::TIMER_BUS), Ok(Hertz::from_mhz(100).unwrap()));
}
