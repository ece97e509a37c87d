//! Baud Rate Calculator for the UART baud generators.
//!
//! ```text
//! BRG    = round(clock / (div * target) - 1)      div = 16 (BRGH=0) or 4 (BRGH=1)
//! actual = clock / (div * (BRG + 1))
//! error% = (actual - target) / target * 100
//! ```
//!
//! # Sources
//!
//! - PIC32 FRM Section 21 "UART", Equations 21-1 / 21-2 (BRG formula)

use device::Hertz;

use crate::error::Error;

/// Largest `UxBRG` value.
pub const BRG_MAX: u16 = u16::MAX;

/// Baud clock divisor selected by `UxMODE.BRGH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedMode {
    /// BRGH = 0: 16 clocks per bit.
    #[default]
    Standard,
    /// BRGH = 1: 4 clocks per bit.
    High,
}

impl SpeedMode {
    /// Clocks per bit.
    pub const fn divisor(self) -> u8 {
        match self {
            Self::Standard => 16,
            Self::High => 4,
        }
    }

    /// Mode for a divisor of 16 or 4.
    pub const fn from_divisor(divisor: u8) -> Option<Self> {
        match divisor {
            16 => Some(Self::Standard),
            4 => Some(Self::High),
            _ => None,
        }
    }
}

/// A baud generator setting and the rate it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BaudPlan {
    /// Value for `UxBRG`.
    pub baud_generator_value: u16,
    /// Baud rate the generator actually produces.
    pub actual_baud: f64,
    /// Signed error relative to the target, in percent.
    pub error_percent: f64,
    /// Clocks per bit (16 or 4).
    pub speed_divisor: u8,
}

impl BaudPlan {
    /// Speed mode of the plan.
    pub fn speed(&self) -> SpeedMode {
        SpeedMode::from_divisor(self.speed_divisor).unwrap_or_default()
    }

    /// Value of `UxMODE.BRGH` for this plan.
    pub fn mode_brgh(&self) -> bool {
        self.speed() == SpeedMode::High
    }
}

/// Plan `UxBRG` for `target_baud` from the UART's bus clock.
pub fn plan_baud(target_baud: u32, clock: Hertz, speed: SpeedMode) -> Result<BaudPlan, Error> {
    if target_baud == 0 {
        return Err(Error::NonPositive("baud rate"));
    }
    let clock_hz = f64::from(clock.get());
    let target = f64::from(target_baud);
    let div = f64::from(speed.divisor());

    let brg = libm::fmax(libm::round(clock_hz / (div * target) - 1.0), 0.0);
    if brg > f64::from(BRG_MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // brg >= 0, finite
        let value = brg as u64;
        return Err(Error::BaudGeneratorOverflow {
            target: target_baud,
            value,
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0 <= brg <= 0xFFFF
    let baud_generator_value = brg as u16;

    let actual_baud = clock_hz / (div * (f64::from(baud_generator_value) + 1.0));
    let error_percent = (actual_baud - target) / target * 100.0;
    tracing::debug!(
        target_baud,
        brg = baud_generator_value,
        actual_baud,
        error_percent,
        divisor = speed.divisor(),
        "baud plan"
    );
    Ok(BaudPlan {
        baud_generator_value,
        actual_baud,
        error_percent,
        speed_divisor: speed.divisor(),
    })
}

/// Try 16x then 4x and keep the smaller absolute error (16x on a tie).
pub fn best_baud(target_baud: u32, clock: Hertz) -> Result<BaudPlan, Error> {
    let standard = plan_baud(target_baud, clock, SpeedMode::Standard);
    let high = plan_baud(target_baud, clock, SpeedMode::High);
    match (standard, high) {
        (Ok(s), Ok(h)) => {
            if libm::fabs(h.error_percent) < libm::fabs(s.error_percent) {
                Ok(h)
            } else {
                Ok(s)
            }
        }
        (Ok(s), Err(_)) => Ok(s),
        (Err(_), Ok(h)) => Ok(h),
        (Err(e), Err(_)) => Err(e),
    }
}

/// Advisory limit on baud error.
///
/// [`plan_baud`] never applies it; callers that want the limit call
/// [`BaudPolicy::check`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BaudPolicy {
    /// Largest acceptable absolute error, in percent.
    pub max_error_percent: f64,
}

impl Default for BaudPolicy {
    fn default() -> Self {
        Self {
            max_error_percent: 2.0,
        }
    }
}

impl BaudPolicy {
    /// Error if `plan` misses its target by more than the limit.
    pub fn check(&self, plan: &BaudPlan) -> Result<(), Error> {
        if libm::fabs(plan.error_percent) > libm::fabs(self.max_error_percent) {
            tracing::warn!(
                error_percent = plan.error_percent,
                limit = self.max_error_percent,
                "baud error above policy limit"
            );
            return Err(Error::BaudErrorTooHigh {
                error_percent: plan.error_percent,
                limit: self.max_error_percent,
            });
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn mhz(n: u32) -> Hertz {
        Hertz::from_mhz(n).unwrap()
    }

    #[test]
    fn test_115200_at_50_mhz_high_speed() {
        let plan = plan_baud(115_200, mhz(50), SpeedMode::High).unwrap();
        assert_eq!(plan.baud_generator_value, 0x6C);
        assert!((plan.actual_baud - 114_678.9).abs() < 0.1, "actual {}", plan.actual_baud);
        assert!((plan.error_percent + 0.45).abs() < 0.01, "error {}", plan.error_percent);
        assert!(plan.mode_brgh());
        assert_eq!(plan.speed_divisor, 4);
    }

    #[test]
    fn test_9600_at_100_mhz_standard() {
        // 100e6 / (16 × 9600) - 1 = 650.04 → 650
        let plan = plan_baud(9_600, mhz(100), SpeedMode::Standard).unwrap();
        assert_eq!(plan.baud_generator_value, 650);
        assert!(!plan.mode_brgh());
        assert!(plan.error_percent.abs() < 0.01);
    }

    #[test]
    fn test_target_above_clock_clamps_to_zero() {
        let plan = plan_baud(10_000_000, mhz(8), SpeedMode::Standard).unwrap();
        assert_eq!(plan.baud_generator_value, 0);
        assert!(plan.error_percent < -90.0);
    }

    #[test]
    fn test_overflow_rejected() {
        // 200e6 / (16 × 100) - 1 = 124 999
        let err = plan_baud(100, mhz(200), SpeedMode::Standard).unwrap_err();
        assert_eq!(
            err,
            Error::BaudGeneratorOverflow {
                target: 100,
                value: 124_999
            }
        );
    }

    #[test]
    fn test_zero_target_rejected() {
        assert_eq!(
            plan_baud(0, mhz(50), SpeedMode::High),
            Err(Error::NonPositive("baud rate"))
        );
    }

    #[test]
    fn test_best_baud_prefers_smaller_error() {
        let best = best_baud(115_200, mhz(50)).unwrap();
        let standard = plan_baud(115_200, mhz(50), SpeedMode::Standard).unwrap();
        let high = plan_baud(115_200, mhz(50), SpeedMode::High).unwrap();
        let expected = if high.error_percent.abs() < standard.error_percent.abs() {
            high
        } else {
            standard
        };
        assert_eq!(best, expected);
    }

    #[test]
    fn test_best_baud_falls_back_when_16x_overflows() {
        // 16x needs BRG 124 999; 4x needs 499 999, both overflow.
        assert!(best_baud(100, mhz(200)).is_err());
        // 16x: 200e6 / (16 × 200) - 1 = 62 499 fits.
        assert_eq!(best_baud(200, mhz(200)).unwrap().speed(), SpeedMode::Standard);
    }

    #[test]
    fn test_policy_is_advisory() {
        let plan = plan_baud(10_000_000, mhz(8), SpeedMode::Standard).unwrap();
        assert!(matches!(
            BaudPolicy::default().check(&plan),
            Err(Error::BaudErrorTooHigh { .. })
        ));
        let good = plan_baud(115_200, mhz(50), SpeedMode::High).unwrap();
        assert!(BaudPolicy::default().check(&good).is_ok());
    }
}
