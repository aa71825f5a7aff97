use serde::Serialize;
use thiserror::Error;

use crate::model::ids::ScenarioId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MetricError {
    #[error("metric name cannot be empty")]
    EmptyName,

    #[error("metric bound must satisfy min < max")]
    InvalidBound,

    #[error("metric amplitude must be >= 0")]
    NegativeAmplitude,

    #[error("metric frequency must be > 0")]
    NonPositiveFrequency,

    #[error("metric '{name}' oscillates outside the profile bound")]
    AmplitudeExceedsBound { name: String },

    #[error("overhead must be between 0 and 100, got {0}")]
    InvalidOverhead(f64),

    #[error("profile must define at least one metric")]
    NoMetrics,
}

//
// ─── BOUND ─────────────────────────────────────────────────────────────────────
//

/// Inclusive range every sampled metric value must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricBound {
    min: f64,
    max: f64,
}

impl MetricBound {
    /// Creates a bound from explicit limits.
    ///
    /// # Errors
    ///
    /// Returns `MetricError::InvalidBound` unless `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, MetricError> {
        if !(min < max) {
            return Err(MetricError::InvalidBound);
        }
        Ok(Self { min, max })
    }

    /// The conventional percentage bound `[0, 100]`.
    #[must_use]
    pub fn percent() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps a value into the bound.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for MetricBound {
    fn default() -> Self {
        Self::percent()
    }
}

//
// ─── METRIC SPEC ───────────────────────────────────────────────────────────────
//

/// Oscillation parameters for one named metric of a scenario.
///
/// A sampled value follows `base + amplitude * sin(2π·frequency·t + phase)`.
/// Metrics within one profile should carry distinct phase offsets so their
/// curves are not perfectly correlated on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSpec {
    name: String,
    base: f64,
    amplitude: f64,
    frequency_hz: f64,
    phase: f64,
}

impl MetricSpec {
    /// Creates a metric spec.
    ///
    /// # Errors
    ///
    /// Returns `MetricError::EmptyName` for a blank name,
    /// `MetricError::NegativeAmplitude` for a negative amplitude, and
    /// `MetricError::NonPositiveFrequency` for a frequency `<= 0`.
    pub fn new(
        name: impl Into<String>,
        base: f64,
        amplitude: f64,
        frequency_hz: f64,
        phase: f64,
    ) -> Result<Self, MetricError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MetricError::EmptyName);
        }
        if amplitude < 0.0 {
            return Err(MetricError::NegativeAmplitude);
        }
        if frequency_hz <= 0.0 {
            return Err(MetricError::NonPositiveFrequency);
        }
        Ok(Self {
            name,
            base,
            amplitude,
            frequency_hz,
            phase,
        })
    }

    /// Creates a steady metric with no oscillation.
    ///
    /// # Errors
    ///
    /// Returns `MetricError::EmptyName` for a blank name.
    pub fn steady(name: impl Into<String>, base: f64) -> Result<Self, MetricError> {
        Self::new(name, base, 0.0, 1.0, 0.0)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    #[must_use]
    pub fn frequency_hz(&self) -> f64 {
        self.frequency_hz
    }

    #[must_use]
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

//
// ─── METRIC PROFILE ────────────────────────────────────────────────────────────
//

/// Static per-scenario metric configuration.
///
/// Immutable once constructed; lessons share profiles by reference and the
/// sampler reads them on every tick. `overhead_pct` is the static
/// overhead/quality estimate for the scenario's tool, reported unchanged in
/// every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricProfile {
    bound: MetricBound,
    overhead_pct: f64,
    metrics: Vec<MetricSpec>,
}

impl MetricProfile {
    /// Creates a profile and checks every metric against the bound.
    ///
    /// # Errors
    ///
    /// Returns `MetricError::NoMetrics` if `metrics` is empty,
    /// `MetricError::InvalidOverhead` for an overhead outside `[0, 100]`, and
    /// `MetricError::AmplitudeExceedsBound` if `base ± amplitude` leaves the
    /// bound for any metric.
    pub fn new(
        bound: MetricBound,
        overhead_pct: f64,
        metrics: Vec<MetricSpec>,
    ) -> Result<Self, MetricError> {
        if metrics.is_empty() {
            return Err(MetricError::NoMetrics);
        }
        if !(0.0..=100.0).contains(&overhead_pct) {
            return Err(MetricError::InvalidOverhead(overhead_pct));
        }
        for spec in &metrics {
            if !bound.contains(spec.base() - spec.amplitude())
                || !bound.contains(spec.base() + spec.amplitude())
            {
                return Err(MetricError::AmplitudeExceedsBound {
                    name: spec.name().to_string(),
                });
            }
        }
        Ok(Self {
            bound,
            overhead_pct,
            metrics,
        })
    }

    /// Creates a profile with the default `[0, 100]` bound.
    ///
    /// # Errors
    ///
    /// Same as [`MetricProfile::new`].
    pub fn percent(overhead_pct: f64, metrics: Vec<MetricSpec>) -> Result<Self, MetricError> {
        Self::new(MetricBound::percent(), overhead_pct, metrics)
    }

    #[must_use]
    pub fn bound(&self) -> MetricBound {
        self.bound
    }

    #[must_use]
    pub fn overhead_pct(&self) -> f64 {
        self.overhead_pct
    }

    #[must_use]
    pub fn metrics(&self) -> &[MetricSpec] {
        &self.metrics
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// One named value inside a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricValue {
    pub name: String,
    pub value: f64,
}

/// Time-varying metric values computed for one animation tick.
///
/// Snapshots are replaced wholesale on every tick; nothing mutates one in
/// place after the sampler builds it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSnapshot {
    scenario: ScenarioId,
    elapsed_seconds: f64,
    overhead_pct: f64,
    values: Vec<MetricValue>,
}

impl MetricSnapshot {
    #[must_use]
    pub fn new(
        scenario: ScenarioId,
        elapsed_seconds: f64,
        overhead_pct: f64,
        values: Vec<MetricValue>,
    ) -> Self {
        Self {
            scenario,
            elapsed_seconds,
            overhead_pct,
            values,
        }
    }

    #[must_use]
    pub fn scenario(&self) -> &ScenarioId {
        &self.scenario
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn overhead_pct(&self) -> f64 {
        self.overhead_pct
    }

    #[must_use]
    pub fn values(&self) -> &[MetricValue] {
        &self.values
    }

    /// Looks up a value by metric name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_rejects_inverted_limits() {
        let err = MetricBound::new(10.0, 10.0).unwrap_err();
        assert_eq!(err, MetricError::InvalidBound);
    }

    #[test]
    fn bound_clamps_values() {
        let bound = MetricBound::percent();
        assert_eq!(bound.clamp(-5.0), 0.0);
        assert_eq!(bound.clamp(105.0), 100.0);
        assert_eq!(bound.clamp(50.0), 50.0);
    }

    #[test]
    fn spec_rejects_blank_name() {
        let err = MetricSpec::new("  ", 50.0, 5.0, 0.5, 0.0).unwrap_err();
        assert_eq!(err, MetricError::EmptyName);
    }

    #[test]
    fn spec_rejects_negative_amplitude() {
        let err = MetricSpec::new("memory", 50.0, -1.0, 0.5, 0.0).unwrap_err();
        assert_eq!(err, MetricError::NegativeAmplitude);
    }

    #[test]
    fn spec_rejects_zero_frequency() {
        let err = MetricSpec::new("memory", 50.0, 1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err, MetricError::NonPositiveFrequency);
    }

    #[test]
    fn profile_rejects_oscillation_outside_bound() {
        let spec = MetricSpec::new("memory", 95.0, 10.0, 0.5, 0.0).unwrap();
        let err = MetricProfile::percent(5.0, vec![spec]).unwrap_err();
        assert!(matches!(
            err,
            MetricError::AmplitudeExceedsBound { ref name } if name == "memory"
        ));
    }

    #[test]
    fn profile_rejects_empty_metric_list() {
        let err = MetricProfile::percent(5.0, Vec::new()).unwrap_err();
        assert_eq!(err, MetricError::NoMetrics);
    }

    #[test]
    fn profile_accepts_in_bound_metrics() {
        let specs = vec![
            MetricSpec::new("memory", 70.0, 10.0, 0.5, 0.0).unwrap(),
            MetricSpec::steady("overhead", 5.0).unwrap(),
        ];
        let profile = MetricProfile::percent(5.0, specs).unwrap();
        assert_eq!(profile.metrics().len(), 2);
        assert_eq!(profile.overhead_pct(), 5.0);
    }

    #[test]
    fn snapshot_lookup_by_name() {
        let scenario = ScenarioId::new("stack_opt").unwrap();
        let snap = MetricSnapshot::new(
            scenario,
            1.5,
            5.0,
            vec![MetricValue {
                name: "memory".into(),
                value: 72.0,
            }],
        );
        assert_eq!(snap.value("memory"), Some(72.0));
        assert_eq!(snap.value("missing"), None);
    }
}
