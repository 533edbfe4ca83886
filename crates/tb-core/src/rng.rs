//! Seedable RNG wrapper and named, bounded random-duration generators.
//!
//! Every humanized delay and detection threshold in the framework is drawn
//! through [`BotRng`], never through ad hoc `rand` calls, so a run can be made
//! fully reproducible by fixing the seed.
//!
//! # Distributions
//!
//! A [`DelayRange`] is a closed interval `[min_ms, max_ms]` plus a [`Spread`]:
//!
//! - `Uniform` — every millisecond in the interval equally likely.
//! - `Gaussian { std_dev_ms }` — normal distribution centred on the interval
//!   midpoint, clamped to the interval.  Clamping (rather than re-sampling)
//!   keeps the draw O(1) and puts a little extra mass on the bounds, which
//!   is harmless for timing jitter.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{Millis, TbError, TbResult};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Spread / DelayRange ───────────────────────────────────────────────────────

/// Shape of the distribution inside a [`DelayRange`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Spread {
    #[default]
    Uniform,
    Gaussian { std_dev_ms: f64 },
}

/// A bounded random duration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayRange {
    pub min_ms: Millis,
    pub max_ms: Millis,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spread: Spread,
}

impl DelayRange {
    /// Validated constructor.  Fails if `min_ms > max_ms` or the standard
    /// deviation is negative or not finite.
    pub fn new(min_ms: Millis, max_ms: Millis, spread: Spread) -> TbResult<Self> {
        let range = Self { min_ms, max_ms, spread };
        range.validate()?;
        Ok(range)
    }

    pub const fn uniform(min_ms: Millis, max_ms: Millis) -> Self {
        Self { min_ms, max_ms, spread: Spread::Uniform }
    }

    pub const fn gaussian(min_ms: Millis, max_ms: Millis, std_dev_ms: f64) -> Self {
        Self { min_ms, max_ms, spread: Spread::Gaussian { std_dev_ms } }
    }

    /// A range that always yields `ms`.
    pub const fn fixed(ms: Millis) -> Self {
        Self::uniform(ms, ms)
    }

    pub fn validate(&self) -> TbResult<()> {
        if self.min_ms > self.max_ms {
            return Err(TbError::Config(format!(
                "delay range min {}ms exceeds max {}ms",
                self.min_ms, self.max_ms
            )));
        }
        if let Spread::Gaussian { std_dev_ms } = self.spread {
            if !std_dev_ms.is_finite() || std_dev_ms < 0.0 {
                return Err(TbError::Config(format!(
                    "gaussian std dev must be finite and non-negative, got {std_dev_ms}"
                )));
            }
        }
        Ok(())
    }

    /// Interval midpoint, the mean of the gaussian spread.
    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.min_ms as f64 + self.max_ms as f64) / 2.0
    }

    #[inline]
    pub fn contains(&self, ms: Millis) -> bool {
        (self.min_ms..=self.max_ms).contains(&ms)
    }
}

// ── BotRng ────────────────────────────────────────────────────────────────────

/// Deterministic RNG for one bot run.
///
/// Components that need randomness own a `BotRng` (usually derived from the
/// run's root RNG via [`child`][Self::child]) so they do not perturb each
/// other's sequences.
pub struct BotRng(SmallRng);

impl BotRng {
    pub fn new(seed: u64) -> Self {
        BotRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy, for live runs where reproducibility is unwanted.
    pub fn from_entropy() -> Self {
        BotRng(SmallRng::from_entropy())
    }

    /// Derive an independent child RNG.
    pub fn child(&mut self, offset: u64) -> BotRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        BotRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform integer in `[min, max]`.  Returns `min` if the bounds are
    /// inverted.
    pub fn uniform_ms(&mut self, min: Millis, max: Millis) -> Millis {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }

    /// Normal draw with the given mean and standard deviation, clamped to
    /// `[min, max]`.  A zero or invalid deviation yields the clamped mean.
    pub fn gaussian_ms(&mut self, min: Millis, max: Millis, mean: f64, std_dev: f64) -> Millis {
        if min >= max {
            return min;
        }
        let raw = match Normal::new(mean, std_dev) {
            Ok(normal) if std_dev > 0.0 => normal.sample(&mut self.0),
            _ => mean,
        };
        let clamped = raw.round().clamp(min as f64, max as f64);
        clamped as Millis
    }

    /// Draw a duration from `range`.
    pub fn draw(&mut self, range: &DelayRange) -> Millis {
        match range.spread {
            Spread::Uniform => self.uniform_ms(range.min_ms, range.max_ms),
            Spread::Gaussian { std_dev_ms } => {
                self.gaussian_ms(range.min_ms, range.max_ms, range.midpoint(), std_dev_ms)
            }
        }
    }
}
