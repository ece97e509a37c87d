//! Subcommands: compute an artifact, then print it as text or JSON.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use compiler::{
    aggregate, best_baud, plan_baud, plan_for_timer, resolve_routing, BaudPlan, BaudPolicy,
    ClockTree, Directive, DirectiveMapper, FrequencyModel, PortMaskSet, RegisterCompiler,
    RegisterWordSet, RoutingPlan, SelectionSet, SpeedMode, TimerPlan, UnmappedPolicy,
};
use device::{Device, Hertz, PeripheralBus, SettingId, TimerId, TIMER_BUS, UART_BUS};
use serde::Serialize;

use crate::input;

/// Print `value` as pretty JSON, or hand it to `text`.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("failed to serialize output")?
        );
    } else {
        text(value);
    }
    Ok(())
}

fn heading(title: &str) {
    println!("{}", title.cyan().bold());
}

/// Reset clock tree for the device's default selection.
fn default_clocks(device: &Device) -> Result<ClockTree> {
    let selection = SelectionSet::with_defaults(&device.catalog);
    let sysclk = FrequencyModel::new(&device.catalog, device.clocks)
        .system_clock(&selection)
        .context("default system clock")?;
    Ok(ClockTree::reset(sysclk))
}

fn default_bus_clock(device: &Device, bus: PeripheralBus) -> Result<Hertz> {
    default_clocks(device)?
        .bus_clock(bus)
        .with_context(|| format!("default {bus} clock"))
}

// ─── defaults / compile ─────────────────────────────────────────────────────

/// Words, directives and clocks of one selection.
#[derive(Debug, Serialize)]
pub struct Configuration {
    words: RegisterWordSet,
    skipped: Vec<SettingId>,
    directives: Vec<Directive>,
    clocks: ClockTree,
}

/// Compile `selection` into everything a project header needs.
pub fn configure(
    device: &Device,
    selection: &SelectionSet,
    policy: UnmappedPolicy,
) -> Result<Configuration> {
    let report = RegisterCompiler::new(&device.fields)
        .with_policy(policy)
        .compile_report(selection)
        .context("register compile failed")?;
    let directives = DirectiveMapper::new(&device.directives)
        .to_directives(selection)
        .into_iter()
        .collect();
    let sysclk = FrequencyModel::new(&device.catalog, device.clocks)
        .system_clock(selection)
        .context("system clock")?;
    Ok(Configuration {
        words: report.words,
        skipped: report.skipped.into_iter().collect(),
        directives,
        clocks: ClockTree::reset(sysclk),
    })
}

/// `FPLLMULT, FPLLODIV`
fn skipped_names(skipped: &[SettingId]) -> String {
    skipped
        .iter()
        .copied()
        .map(SettingId::name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_configuration(cfg: &Configuration) {
    heading("Configuration words");
    for (register, word) in cfg.words.iter() {
        println!("  {register} = {word:#010X}");
    }
    if !cfg.skipped.is_empty() {
        println!(
            "{}",
            format!("  ⚠ left erased (no encoding): {}", skipped_names(&cfg.skipped)).yellow()
        );
    }
    println!();

    heading("Directives");
    for directive in &cfg.directives {
        println!("  {directive}");
    }
    println!();

    heading("Clocks");
    println!("  {:<7} {}", "SYSCLK", cfg.clocks.sysclk());
    for setting in cfg.clocks.iter() {
        let bus = setting.bus;
        match cfg.clocks.bus_clock(bus) {
            Ok(hz) => println!(
                "  {:<7} {hz:<10} {} = {:#06X}",
                bus.name(),
                bus.div_register(),
                setting.pbdiv_word()
            ),
            Err(_) => println!("  {:<7} {}", bus.name(), "off".dimmed()),
        }
    }
}

pub fn defaults(device: &Device, json: bool) -> Result<()> {
    let selection = SelectionSet::with_defaults(&device.catalog);
    let cfg = configure(device, &selection, UnmappedPolicy::Reject)?;
    emit(json, &cfg, print_configuration)
}

pub fn compile(
    device: &Device,
    path: &Path,
    keep_erased: bool,
    no_defaults: bool,
    json: bool,
) -> Result<()> {
    let chosen = input::read_selection(&device.catalog, path)?;
    let selection = if no_defaults {
        chosen
    } else {
        let mut selection = SelectionSet::with_defaults(&device.catalog);
        selection.extend(chosen.iter());
        selection
    };
    let policy = if keep_erased {
        UnmappedPolicy::KeepErased
    } else {
        UnmappedPolicy::Reject
    };
    let cfg = configure(device, &selection, policy)?;
    emit(json, &cfg, print_configuration)
}

// ─── baud ───────────────────────────────────────────────────────────────────

/// A baud plan plus the advisory policy verdict.
#[derive(Debug, Serialize)]
pub struct BaudReport {
    clock: Hertz,
    target: u32,
    plan: BaudPlan,
    within_policy: bool,
}

/// Plan `UxBRG`; without `speed` both divisors are tried.
pub fn baud_report(
    device: &Device,
    target: u32,
    clock: Option<Hertz>,
    speed: Option<SpeedMode>,
) -> Result<BaudReport> {
    let clock = match clock {
        Some(hz) => hz,
        None => default_bus_clock(device, UART_BUS)?,
    };
    let plan = match speed {
        Some(speed) => plan_baud(target, clock, speed),
        None => best_baud(target, clock),
    }
    .with_context(|| format!("{target} baud from {clock}"))?;
    let within_policy = BaudPolicy::default().check(&plan).is_ok();
    Ok(BaudReport {
        clock,
        target,
        plan,
        within_policy,
    })
}

fn print_baud(report: &BaudReport) {
    let plan = &report.plan;
    heading(&format!("{} baud from {}", report.target, report.clock));
    println!("  UxBRG       = {} ({:#06X})", plan.baud_generator_value, plan.baud_generator_value);
    println!("  UxMODE.BRGH = {}", u8::from(plan.mode_brgh()));
    println!("  actual      = {:.1} baud", plan.actual_baud);
    let error = format!("  error       = {:+.2}%", plan.error_percent);
    if report.within_policy {
        println!("{}", error.green());
    } else {
        println!("{}", format!("{error}  ⚠ above {:.1}%", BaudPolicy::default().max_error_percent).yellow());
    }
}

pub fn baud(
    device: &Device,
    target: u32,
    clock: Option<Hertz>,
    speed: Option<SpeedMode>,
    json: bool,
) -> Result<()> {
    let report = baud_report(device, target, clock, speed)?;
    emit(json, &report, print_baud)
}

// ─── timer ──────────────────────────────────────────────────────────────────

/// A timer plan and its `TxCON` value.
#[derive(Debug, Serialize)]
pub struct TimerReport {
    clock: Hertz,
    plan: TimerPlan,
    control_word: u32,
}

pub fn timer_report(
    device: &Device,
    timer: TimerId,
    period: Duration,
    clock: Option<Hertz>,
    combined: bool,
) -> Result<TimerReport> {
    let clock = match clock {
        Some(hz) => hz,
        None => default_bus_clock(device, TIMER_BUS)?,
    };
    let plan = plan_for_timer(timer, combined, period, clock)
        .with_context(|| format!("{timer} at {} µs from {clock}", period.as_micros()))?;
    Ok(TimerReport {
        clock,
        control_word: plan.control_word(),
        plan,
    })
}

fn print_timer(report: &TimerReport) {
    let plan = &report.plan;
    let name = plan
        .timer
        .map_or_else(|| "timer".to_owned(), |t| t.to_string());
    match plan.combined_with {
        Some(odd) => heading(&format!("{name}/{odd} (32-bit) from {}", report.clock)),
        None => heading(&format!("{name} from {}", report.clock)),
    }
    println!("  prescaler = 1:{} (TCKPS = {})", plan.prescaler, plan.prescaler_code);
    println!("  PR        = {} ({:#X})", plan.period_register_value, plan.period_register_value);
    println!("  TxCON     = {:#06X}", report.control_word);
    let period = format!(
        "  period    = {:.3} µs",
        plan.resulting_period.as_secs_f64() * 1e6
    );
    if plan.exact {
        println!("{}", format!("{period}  ✓ exact").green());
    } else {
        println!("{}", format!("{period}  (truncated)").yellow());
    }
}

pub fn timer(
    device: &Device,
    timer: TimerId,
    period_us: u64,
    clock: Option<Hertz>,
    combined: bool,
    json: bool,
) -> Result<()> {
    let report = timer_report(device, timer, Duration::from_micros(period_us), clock, combined)?;
    emit(json, &report, print_timer)
}

// ─── pins ───────────────────────────────────────────────────────────────────

/// Port masks and PPS writes for a pin list.
#[derive(Debug, Serialize)]
pub struct PinsReport {
    ports: PortMaskSet,
    routing: RoutingPlan,
    unlock_required: bool,
}

pub fn pins_report(device: &Device, path: &Path) -> Result<PinsReport> {
    let pins = input::read_pins(path)?;
    let ports = aggregate(&device.ports, &pins).context("port masks")?;
    let routing = resolve_routing(&device.routing, &pins).context("pin routing")?;
    Ok(PinsReport {
        ports,
        unlock_required: routing.unlock_required(),
        routing,
    })
}

/// `SYSKEY` unlock, `IOLOCK` clear.
const PPS_UNLOCK: &[&str] = &[
    "SYSKEY = 0x00000000;",
    "SYSKEY = 0xAA996655;",
    "SYSKEY = 0x556699AA;",
    "CFGCONbits.IOLOCK = 0;",
];
/// `IOLOCK` set, `SYSKEY` relock.
const PPS_LOCK: &[&str] = &["CFGCONbits.IOLOCK = 1;", "SYSKEY = 0x00000000;"];

fn print_pins(report: &PinsReport) {
    heading("Port masks");
    for (port, masks) in report.ports.iter() {
        println!("  // {port}");
        for (register, op, mask) in masks.registers() {
            if mask != 0 {
                println!("  {register}{}{op} = {mask:#06X};", port.letter());
            }
        }
    }
    println!();

    heading("Pin routing");
    if !report.unlock_required {
        println!("  {}", "no remappable pins".dimmed());
        return;
    }
    for line in PPS_UNLOCK {
        println!("  {}", line.dimmed());
    }
    for write in report.routing.iter() {
        println!("  {write}");
    }
    for line in PPS_LOCK {
        println!("  {}", line.dimmed());
    }
}

pub fn pins(device: &Device, path: &Path, json: bool) -> Result<()> {
    let report = pins_report(device, path)?;
    emit(json, &report, print_pins)
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
    use device::{RegisterId, SettingValue, PIC32MZ_EF};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_configuration_matches_reference_board() {
        let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        let cfg = configure(&PIC32MZ_EF, &selection, UnmappedPolicy::Reject).unwrap();
        assert_eq!(cfg.words.get(RegisterId::Devcfg1), 0x5FEA_C7F9);
        assert_eq!(cfg.directives.len(), SettingId::COUNT);
        assert_eq!(cfg.clocks.sysclk(), Hertz::from_mhz(200).unwrap());
        assert!(cfg.skipped.is_empty());
    }

    #[test]
    fn configuration_serializes_words_by_name() {
        let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog);
        let cfg = configure(&PIC32MZ_EF, &selection, UnmappedPolicy::Reject).unwrap();
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["words"]["DEVCFG3"], 0x4300_0000u32);
        assert_eq!(json["clocks"]["SYSCLK"], 200_000_000u32);
        assert_eq!(json["directives"][0]["token"], "0x0000");
    }

    #[test]
    fn keep_erased_lists_skipped_setting() {
        let selection = SelectionSet::with_defaults(&PIC32MZ_EF.catalog)
            .with(SettingId::Fpllmult, SettingValue::Number(500));
        assert!(configure(&PIC32MZ_EF, &selection, UnmappedPolicy::Reject).is_err());
        // Out-of-range multiplier also fails the clock model, so drop back to FRC.
        let selection = selection.with(SettingId::Fnosc, SettingValue::Symbol("FRC"));
        let cfg = configure(&PIC32MZ_EF, &selection, UnmappedPolicy::KeepErased).unwrap();
        assert_eq!(cfg.skipped, [SettingId::Fpllmult]);
        assert_eq!(skipped_names(&cfg.skipped), "FPLLMULT");
        assert_eq!(
            skipped_names(&[SettingId::Fpllmult, SettingId::Fpllodiv]),
            "FPLLMULT, FPLLODIV"
        );
    }

    #[test]
    fn baud_defaults_to_uart_bus_clock() {
        let report = baud_report(&PIC32MZ_EF, 115_200, None, None).unwrap();
        assert_eq!(report.clock, Hertz::from_mhz(100).unwrap());
        assert!(report.within_policy);
        let report = baud_report(
            &PIC32MZ_EF,
            115_200,
            Some(Hertz::from_mhz(50).unwrap()),
            Some(SpeedMode::High),
        )
        .unwrap();
        assert_eq!(report.plan.baud_generator_value, 0x6C);
    }

    #[test]
    fn timer_defaults_to_timer_bus_clock() {
        let report = timer_report(
            &PIC32MZ_EF,
            TimerId::new(2).unwrap(),
            Duration::from_millis(1),
            None,
            false,
        )
        .unwrap();
        assert_eq!(report.plan.prescaler, 2);
        assert_eq!(report.plan.period_register_value, 49_999);
        assert_eq!(report.control_word, 0x8010);
        assert!(timer_report(&PIC32MZ_EF, TimerId::T1, Duration::from_millis(1), None, true).is_err());
    }

    #[test]
    fn pins_report_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pins.json");
        fs::write(
            &path,
            r#"[
                { "pin": "RB3", "mode": "gpio", "direction": "output", "level": "high" },
                { "pin": "RE0", "mode": "gpio" }
            ]"#,
        )
        .unwrap();
        let report = pins_report(&PIC32MZ_EF, &path).unwrap();
        let b = report.ports.get(device::Port::B).unwrap();
        assert_eq!(b.direction_output, 0x0008);
        assert_eq!(b.latch_set, 0x0008);
        assert_eq!(report.ports.get(device::Port::E).unwrap().direction_input, 0x0001);
        assert!(!report.unlock_required);
    }

    #[test]
    fn pins_report_rejects_missing_pin() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pins.json");
        fs::write(&path, r#"[{ "pin": "RA8", "mode": "gpio" }]"#).unwrap();
        let err = pins_report(&PIC32MZ_EF, &path).unwrap_err();
        assert!(format!("{err:#}").contains("RA8"), "{err:#}");
    }
}
