//! Telemetry source collaborator and the synthetic generator.
//!
//! The real system feeds SWIS Level-2 samples from the ISSDC pipeline; the
//! synthetic source stands in for it with a seeded random series carrying a
//! CME signature burst, matching the dashboard's mock data.

use chrono::{Duration, Utc};
use cw_common::TelemetrySample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample cadence of the generated series.
const SAMPLE_INTERVAL_MINUTES: i64 = 10;

/// Index window carrying the injected CME signature.
const BURST_WINDOW: (usize, usize) = (100, 120);

/// Supplies a finite, time-ordered, replayable sequence of samples.
pub trait TelemetrySource {
    fn samples(&self) -> &[TelemetrySample];

    /// Extract one parameter's series, in time order.
    fn series(&self, parameter: cw_common::Parameter) -> Vec<f64> {
        self.samples().iter().map(|s| s.get(parameter)).collect()
    }
}

/// Seeded synthetic telemetry. Identical seeds give identical series.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    samples: Vec<TelemetrySample>,
}

impl SyntheticSource {
    /// Default series: 24 hours of 10-minute samples.
    pub const DEFAULT_SAMPLES: usize = 144;

    /// Generate `n` samples ending now.
    ///
    /// Baselines per the original mock generator: flux 1e6 + U(0, 2e6),
    /// density 5 + U(0, 10), temperature 1e5 + U(0, 2e5), velocity
    /// 400 + U(0, 200), with an extra burst over indices (100, 120).
    pub fn generate(seed: u64, n: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let now = Utc::now();
        let mut samples = Vec::with_capacity(n);

        for i in 0..n {
            let offset = (n.saturating_sub(1) - i) as i64 * SAMPLE_INTERVAL_MINUTES;
            let in_burst = i > BURST_WINDOW.0 && i < BURST_WINDOW.1;
            let burst = |rng: &mut StdRng, scale: f64| {
                if in_burst {
                    rng.random_range(0.0..scale)
                } else {
                    0.0
                }
            };

            let flux = 1_000_000.0 + rng.random_range(0.0..2_000_000.0) + burst(&mut rng, 5_000_000.0);
            let density = 5.0 + rng.random_range(0.0..10.0) + burst(&mut rng, 30.0);
            let temperature =
                100_000.0 + rng.random_range(0.0..200_000.0) + burst(&mut rng, 500_000.0);
            let velocity = 400.0 + rng.random_range(0.0..200.0) + burst(&mut rng, 800.0);

            samples.push(TelemetrySample {
                timestamp: now - Duration::minutes(offset),
                flux,
                density,
                temperature,
                velocity,
            });
        }

        Self { samples }
    }
}

impl TelemetrySource for SyntheticSource {
    fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }
}
