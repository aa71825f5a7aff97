use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{MetricProfile, MetricSnapshot, MetricValue, ScenarioId};

/// Per-frame metric synthesis.
///
/// A sampler turns `(elapsed seconds, scenario profile)` into a
/// [`MetricSnapshot`]: each metric oscillates around its base value,
/// `base + amplitude * sin(2π·frequency·t + phase)`, and every result is
/// clamped into the profile bound. Sampling is a pure function of its
/// inputs and the sampler's own immutable configuration, so identical calls
/// always return identical snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    jitter: Option<Jitter>,
}

#[derive(Debug, Clone, Copy)]
struct Jitter {
    seed: u64,
    amplitude: f64,
}

impl Sampler {
    /// A sampler with pure sinusoidal oscillation and no jitter.
    #[must_use]
    pub fn new() -> Self {
        Self { jitter: None }
    }

    /// Adds bounded, seeded jitter on top of the oscillation.
    ///
    /// The jitter for a given `(seed, metric, elapsed)` triple is fixed, so
    /// sampling stays reproducible; `amplitude` is the maximum absolute
    /// offset applied before clamping.
    #[must_use]
    pub fn with_jitter(seed: u64, amplitude: f64) -> Self {
        Self {
            jitter: Some(Jitter {
                seed,
                amplitude: amplitude.abs(),
            }),
        }
    }

    /// Computes the snapshot for a scenario at the given elapsed time.
    #[must_use]
    pub fn sample(
        &self,
        scenario: &ScenarioId,
        profile: &MetricProfile,
        elapsed_seconds: f64,
    ) -> MetricSnapshot {
        let bound = profile.bound();
        let values = profile
            .metrics()
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let angle = TAU * spec.frequency_hz() * elapsed_seconds + spec.phase();
                let mut value = spec.base() + spec.amplitude() * angle.sin();
                if let Some(jitter) = self.jitter {
                    value += jitter.offset(index, elapsed_seconds);
                }
                MetricValue {
                    name: spec.name().to_string(),
                    value: bound.clamp(value),
                }
            })
            .collect();

        MetricSnapshot::new(
            scenario.clone(),
            elapsed_seconds,
            profile.overhead_pct(),
            values,
        )
    }
}

impl Jitter {
    /// Deterministic offset in `[-amplitude, amplitude]` for one metric at
    /// one instant.
    fn offset(self, metric_index: usize, elapsed_seconds: f64) -> f64 {
        let key = self
            .seed
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(metric_index as u64)
            .wrapping_add(elapsed_seconds.to_bits());
        let mut rng = StdRng::seed_from_u64(key);
        rng.random_range(-self.amplitude..=self.amplitude)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
