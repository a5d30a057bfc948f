//! Signal storage
//!
//! The normalized EEG trace is read-only after load and is addressed by any
//! integer index: the terrain scrolls backward past sample 0 on the first
//! frames and forward past the end on long sessions, so indexing wraps.

use crate::error::LoadError;

/// Fixed-length buffer indexed over all integers, wrapping at both ends
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<T> {
    items: Vec<T>,
}

impl<T: Copy> RingBuffer<T> {
    /// Returns `None` for an empty vector (there is nothing to wrap onto)
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Never true once constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index` modulo the length (negative indices count back from the end)
    #[inline]
    pub fn get(&self, index: i64) -> T {
        let len = self.items.len() as i64;
        self.items[index.rem_euclid(len) as usize]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

/// Scale raw samples into [-1, 1] by their peak magnitude
///
/// No centering or filtering happens here. Empty and all-zero inputs are
/// rejected so the caller can fall back to the synthetic wave.
pub fn normalize(raw: &[f64]) -> Result<Vec<f32>, LoadError> {
    if raw.is_empty() {
        return Err(LoadError::EmptySignal);
    }
    if let Some(i) = raw.iter().position(|v| !v.is_finite()) {
        return Err(LoadError::NonFiniteSample(i));
    }

    let max_abs = raw.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max_abs == 0.0 {
        return Err(LoadError::SilentSignal);
    }

    Ok(raw.iter().map(|v| (v / max_abs) as f32).collect())
}

/// Normalized samples plus their rate
#[derive(Debug, Clone)]
pub struct SignalBuffer {
    samples: RingBuffer<f32>,
    sample_rate: f64,
}

impl SignalBuffer {
    /// Normalize `raw` and wrap it
    pub fn from_raw(raw: &[f64], sample_rate: f64) -> Result<Self, LoadError> {
        let normalized = normalize(raw)?;
        let samples = RingBuffer::new(normalized).ok_or(LoadError::EmptySignal)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, index: i64) -> f32 {
        self.samples.get(index)
    }

    /// Recording length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate
    }
}
