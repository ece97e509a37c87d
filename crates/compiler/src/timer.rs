//! Timer Period Calculator.
//!
//! ```text
//! ticks = bus_hz * period / prescaler      (truncating)
//! PRx   = ticks - 1                        (must fit the register width)
//! ```
//!
//! The smallest prescaler that fits wins: it gives the finest resolution.
//!
//! # Sources
//!
//! - PIC32 FRM Section 14 "Timers", Equation 14-1 (period register)

use core::time::Duration;

use device::timer::{TCON_ON, TCON_T32, TCON_TCKPS_SHIFT};
use device::{Hertz, RegisterWidth, TimerClass, TimerId};

use crate::error::Error;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// A chosen prescaler and period register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimerPlan {
    /// Timer this plan is for, if planned through [`plan_for_timer`].
    pub timer: Option<TimerId>,
    /// Chosen prescaler.
    pub prescaler: u16,
    /// `TCKPS` code of the prescaler (its index in the allowed list).
    pub prescaler_code: u8,
    /// Value for `PRx`.
    pub period_register_value: u32,
    /// 16-bit timer or 32-bit pair.
    pub register_width: RegisterWidth,
    /// Period the timer actually produces.
    pub resulting_period: Duration,
    /// Whether `resulting_period` equals the target.
    pub exact: bool,
    /// Odd timer absorbed into a 32-bit pair.
    pub combined_with: Option<TimerId>,
}

impl TimerPlan {
    /// `TxCON` value: `ON`, `TCKPS` and, for a pair, `T32`.
    pub fn control_word(&self) -> u32 {
        let tckps = u32::from(self.prescaler_code)
            .checked_shl(u32::from(TCON_TCKPS_SHIFT))
            .unwrap_or(0);
        let t32 = match self.register_width {
            RegisterWidth::Bits32 => TCON_T32,
            RegisterWidth::Bits16 => 0,
        };
        TCON_ON | tckps | t32
    }
}

/// Period in nanoseconds that `ticks` bus cycles span at `prescaler`.
fn period_of(ticks: u128, prescaler: u16, bus: Hertz) -> Duration {
    let nanos = ticks
        .saturating_mul(u128::from(prescaler))
        .saturating_mul(NANOS_PER_SEC)
        .checked_div(u128::from(bus.get()))
        .unwrap_or(0);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Shared prescaler search.
///
/// `ticks_at(prescaler)` returns `(ticks, exact)`.
fn search(
    bus: Hertz,
    width: RegisterWidth,
    prescalers: &[u16],
    ticks_at: impl Fn(u16) -> (u128, bool),
) -> Result<TimerPlan, Error> {
    if prescalers.contains(&0) {
        return Err(Error::NonPositive("prescaler"));
    }
    let max_ticks = width.max_ticks();
    let mut best: Option<(usize, u16, u128, bool)> = None;
    // Ticks at the smallest prescaler, reported when nothing fits.
    let mut most_ticks: Option<u128> = None;

    for (code, &prescaler) in prescalers.iter().enumerate() {
        let (ticks, exact) = ticks_at(prescaler);
        if most_ticks.map_or(true, |t| ticks > t) {
            most_ticks = Some(ticks);
        }
        if ticks == 0 || ticks > u128::from(max_ticks) {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, p, _, e)) => prescaler < p || (prescaler == p && exact && !e),
        };
        if better {
            best = Some((code, prescaler, ticks, exact));
        }
    }

    match best {
        Some((code, prescaler, ticks, exact)) => {
            let period_register_value = u32::try_from(ticks.saturating_sub(1))
                .map_err(|_| Error::NoPrescalerFits { ticks, max_ticks })?;
            let plan = TimerPlan {
                timer: None,
                prescaler,
                prescaler_code: u8::try_from(code)
                    .map_err(|_| Error::CapacityExceeded("prescalers"))?,
                period_register_value,
                register_width: width,
                resulting_period: period_of(ticks, prescaler, bus),
                exact,
                combined_with: None,
            };
            tracing::debug!(
                prescaler,
                pr = period_register_value,
                exact,
                bus = bus.get(),
                "timer plan"
            );
            Ok(plan)
        }
        None => match most_ticks {
            Some(0) => Err(Error::PeriodTooShort { bus }),
            Some(ticks) => Err(Error::NoPrescalerFits { ticks, max_ticks }),
            None => Err(Error::NoPrescalerFits {
                ticks: 0,
                max_ticks,
            }),
        },
    }
}

/// Plan a timer for a target period.
///
/// `prescalers` are the class's supported values; their position is the
/// `TCKPS` code.
pub fn plan_timer(
    target: Duration,
    bus: Hertz,
    width: RegisterWidth,
    prescalers: &[u16],
) -> Result<TimerPlan, Error> {
    let nanos = target.as_nanos();
    if nanos == 0 {
        return Err(Error::NonPositive("timer period"));
    }
    let bus_hz = u128::from(bus.get());
    search(bus, width, prescalers, |prescaler| {
        let num = bus_hz.saturating_mul(nanos);
        let den = NANOS_PER_SEC.saturating_mul(u128::from(prescaler));
        let ticks = num.checked_div(den).unwrap_or(0);
        let exact = num.checked_rem(den) == Some(0);
        (ticks, exact)
    })
}

/// Plan a timer for a target interrupt frequency.
pub fn plan_timer_frequency(
    target: Hertz,
    bus: Hertz,
    width: RegisterWidth,
    prescalers: &[u16],
) -> Result<TimerPlan, Error> {
    let bus_hz = u128::from(bus.get());
    search(bus, width, prescalers, |prescaler| {
        let den = u128::from(target.get()).saturating_mul(u128::from(prescaler));
        let ticks = bus_hz.checked_div(den).unwrap_or(0);
        let exact = bus_hz.checked_rem(den) == Some(0);
        (ticks, exact)
    })
}

/// Plan a specific timer, optionally combined with its odd successor.
///
/// Only Timer2/4/6/8 can be combined; the pair uses the even timer's
/// prescaler and a 32-bit period register.
pub fn plan_for_timer(
    timer: TimerId,
    combined: bool,
    target: Duration,
    bus: Hertz,
) -> Result<TimerPlan, Error> {
    let class = timer.class();
    let (width, partner) = if combined {
        let partner = match class {
            TimerClass::TypeB => timer.pair_partner(),
            TimerClass::TypeA => None,
        }
        .ok_or(Error::CannotPair(timer))?;
        (RegisterWidth::Bits32, Some(partner))
    } else {
        (RegisterWidth::Bits16, None)
    };
    let mut plan = plan_timer(target, bus, width, class.prescalers())?;
    plan.timer = Some(timer);
    plan.combined_with = partner;
    Ok(plan)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TYPE_A: &[u16] = &[1, 8, 64, 256];
    const TYPE_B: &[u16] = &[1, 2, 4, 8, 16, 32, 64, 256];

    fn mhz(n: u32) -> Hertz {
        Hertz::from_mhz(n).unwrap()
    }

    fn timer(n: u8) -> TimerId {
        TimerId::new(n).unwrap()
    }

    /// 1 ms at 100 MHz is 100 000 ticks: too many for /1, fits at /2.
    #[test]
    fn test_one_ms_at_100_mhz_type_b() {
        let plan = plan_timer(Duration::from_millis(1), mhz(100), RegisterWidth::Bits16, TYPE_B)
            .unwrap();
        assert_eq!(plan.prescaler, 2);
        assert_eq!(plan.prescaler_code, 1);
        assert_eq!(plan.period_register_value, 49_999);
        assert!(plan.exact);
        assert_eq!(plan.resulting_period, Duration::from_millis(1));
    }

    /// Type A has no /2, so the same target needs /8.
    #[test]
    fn test_one_ms_at_100_mhz_type_a() {
        let plan = plan_timer(Duration::from_millis(1), mhz(100), RegisterWidth::Bits16, TYPE_A)
            .unwrap();
        assert_eq!(plan.prescaler, 8);
        assert_eq!(plan.period_register_value, 12_499);
    }

    #[test]
    fn test_truncated_period_is_not_exact() {
        // 100 MHz × 1 µs / 3 does not divide; use a prescaler list forcing /3.
        let plan = plan_timer(Duration::from_nanos(1_000), mhz(100), RegisterWidth::Bits16, &[3])
            .unwrap();
        assert_eq!(plan.period_register_value, 32);
        assert!(!plan.exact);
        assert_eq!(plan.resulting_period, Duration::from_nanos(990));
    }

    #[test]
    fn test_too_long_for_16_bits_fits_32() {
        let one_second = Duration::from_secs(1);
        let err = plan_timer(one_second, mhz(100), RegisterWidth::Bits16, TYPE_B).unwrap_err();
        assert!(matches!(err, Error::NoPrescalerFits { ticks: 100_000_000, max_ticks: 0x1_0000 }));
        let plan = plan_timer(one_second, mhz(100), RegisterWidth::Bits32, TYPE_B).unwrap();
        assert_eq!(plan.prescaler, 1);
        assert_eq!(plan.period_register_value, 99_999_999);
    }

    #[test]
    fn test_period_shorter_than_tick() {
        let err = plan_timer(Duration::from_nanos(5), mhz(100), RegisterWidth::Bits16, TYPE_B)
            .unwrap_err();
        assert_eq!(err, Error::PeriodTooShort { bus: mhz(100) });
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            plan_timer(Duration::ZERO, mhz(100), RegisterWidth::Bits16, TYPE_B),
            Err(Error::NonPositive("timer period"))
        );
    }

    #[test]
    fn test_frequency_target() {
        let plan =
            plan_timer_frequency(Hertz::new(1_000).unwrap(), mhz(100), RegisterWidth::Bits16, TYPE_B)
                .unwrap();
        assert_eq!(plan.prescaler, 2);
        assert_eq!(plan.period_register_value, 49_999);
    }

    #[test]
    fn test_pairing_rules() {
        let plan = plan_for_timer(timer(2), true, Duration::from_secs(1), mhz(100)).unwrap();
        assert_eq!(plan.register_width, RegisterWidth::Bits32);
        assert_eq!(plan.combined_with, Some(timer(3)));
        assert_eq!(plan.control_word(), TCON_ON | TCON_T32);

        for n in [1, 3, 9] {
            assert_eq!(
                plan_for_timer(timer(n), true, Duration::from_millis(1), mhz(100)),
                Err(Error::CannotPair(timer(n))),
                "Timer{n}"
            );
        }
    }

    #[test]
    fn test_control_word_places_tckps() {
        let plan = plan_for_timer(TimerId::T1, false, Duration::from_millis(10), mhz(100)).unwrap();
        // 1 000 000 ticks: /64 gives 15 625.
        assert_eq!(plan.prescaler, 64);
        assert_eq!(plan.control_word(), 0x8020);
    }
}
