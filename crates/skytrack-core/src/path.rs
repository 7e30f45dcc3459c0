//! Append-only trace of the tracked aircraft in polar coordinates.

use crate::models::PolarSample;

/// Ordered polar samples, oldest first.
///
/// Grows for the lifetime of the process. Adjacent samples are never
/// exactly equal in both angle and amplitude.
#[derive(Debug, Clone, Default)]
pub struct FlightPathBuffer {
    samples: Vec<PolarSample>,
}

impl FlightPathBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample` unless it repeats the last stored sample exactly.
    ///
    /// Comparison is strict floating-point equality on both fields, so any
    /// jitter in the upstream position counts as a new sample.
    /// Returns true when the sample was appended.
    pub fn push_if_distinct(&mut self, sample: PolarSample) -> bool {
        let distinct = match self.samples.last() {
            Some(last) => sample.angle != last.angle || sample.amplitude != last.amplitude,
            None => true,
        };
        if distinct {
            self.samples.push(sample);
        }
        distinct
    }

    pub fn samples(&self) -> &[PolarSample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&PolarSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
