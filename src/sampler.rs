//! Terrain sampler
//!
//! Turns a signal index into a smoothed amplitude in [-1, 1]. The same call
//! works before (or without) a successful load by synthesizing a slow sine.

use std::f64::consts::TAU;

use crate::consts::{DEFAULT_SAMPLE_RATE, FALLBACK_SINE_HZ, SMOOTH_WINDOW};
use crate::signal::SignalBuffer;

#[derive(Debug, Clone)]
pub struct TerrainSampler {
    signal: Option<SignalBuffer>,
    half_window: usize,
}

impl Default for TerrainSampler {
    fn default() -> Self {
        Self::synthetic()
    }
}

impl TerrainSampler {
    /// Sampler over a loaded signal
    pub fn new(signal: SignalBuffer, half_window: usize) -> Self {
        Self {
            signal: Some(signal),
            half_window,
        }
    }

    /// Sampler that only produces the fallback sine
    pub fn synthetic() -> Self {
        Self {
            signal: None,
            half_window: SMOOTH_WINDOW,
        }
    }

    pub fn with_half_window(mut self, half_window: usize) -> Self {
        self.half_window = half_window;
        self
    }

    /// True when backed by real data
    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }

    pub fn signal(&self) -> Option<&SignalBuffer> {
        self.signal.as_ref()
    }

    pub fn half_window(&self) -> usize {
        self.half_window
    }

    /// Samples in the moving-average window
    pub fn window_len(&self) -> usize {
        self.half_window * 2 + 1
    }

    pub fn sample_rate(&self) -> f64 {
        self.signal
            .as_ref()
            .map(SignalBuffer::sample_rate)
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// Smoothed amplitude centred on `index`
    pub fn sample(&self, index: i64) -> f32 {
        match &self.signal {
            Some(signal) => {
                let w = self.half_window as i64;
                let sum: f32 = (-w..=w).map(|k| signal.get(index + k)).sum();
                sum / self.window_len() as f32
            }
            None => {
                let t = index as f64 / DEFAULT_SAMPLE_RATE;
                (t * TAU * FALLBACK_SINE_HZ).sin() as f32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sampler_from(raw: &[f64], half_window: usize) -> TerrainSampler {
        let signal = SignalBuffer::from_raw(raw, 50.0).unwrap();
        TerrainSampler::new(signal, half_window)
    }

    #[test]
    fn test_constant_signal_averages_to_one() {
        let sampler = sampler_from(&[1.0; 10], SMOOTH_WINDOW);
        for index in [-1000, -1, 0, 5, 9, 10, 12345] {
            assert_eq!(sampler.sample(index), 1.0);
        }
    }

    #[test]
    fn test_window_wraps_around_edges() {
        // [1, 0, 0, 0, -1] with half window 1 at index 0 sees [-1, 1, 0]
        let sampler = sampler_from(&[1.0, 0.0, 0.0, 0.0, -1.0], 1);
        assert_eq!(sampler.sample(0), 0.0);
        // index 4 sees [0, -1, 1]
        assert_eq!(sampler.sample(4), 0.0);
        // index 1 sees [1, 0, 0]
        assert!((sampler.sample(1) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_sine() {
        let sampler = TerrainSampler::synthetic();
        assert!(!sampler.has_signal());
        assert_eq!(sampler.sample(0), 0.0);
        // Quarter period of 0.5 Hz is 0.5 s = 25 samples at 50 Hz
        assert!((sampler.sample(25) - 1.0).abs() < 1e-6);
        assert!((sampler.sample(-25) + 1.0).abs() < 1e-6);
        assert_eq!(sampler.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    proptest! {
        #[test]
        fn prop_sample_is_periodic(
            raw in prop::collection::vec(-100.0f64..100.0, 1..80),
            index in -100_000i64..100_000,
            half_window in 0usize..30
        ) {
            prop_assume!(raw.iter().any(|v| *v != 0.0));
            let sampler = sampler_from(&raw, half_window);
            let len = raw.len() as i64;
            prop_assert_eq!(sampler.sample(index), sampler.sample(index + len));
        }

        #[test]
        fn prop_sample_is_bounded(index in any::<i32>()) {
            let v = TerrainSampler::synthetic().sample(index as i64);
            prop_assert!((-1.0..=1.0).contains(&v));
        }
    }
}
