// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer sample history and emission throttling

use crate::settings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// One raw pointer position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl StrokeSample {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn at(point: Point, timestamp_ms: u64) -> Self {
        Self::new(point.x, point.y, timestamp_ms)
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// What the sampler decided about a pushed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// First sample of the gesture; becomes the cursor
    Seed,
    /// Too soon after the last emitted glyph
    Throttled,
    /// Eligible for glyph placement
    Accepted,
}

/// Keeps the gesture's samples and gates how often glyphs may be emitted
#[derive(Debug, Clone)]
pub struct PathSampler {
    history: Vec<StrokeSample>,
    last_emission_ms: Option<u64>,
    throttle_ms: u64,
}

impl PathSampler {
    pub fn new(throttle_ms: u64) -> Self {
        Self {
            history: Vec::new(),
            last_emission_ms: None,
            throttle_ms,
        }
    }

    /// Record a sample and classify it
    pub fn push(&mut self, sample: StrokeSample) -> SampleOutcome {
        self.history.push(sample);

        if self.history.len() < 2 {
            return SampleOutcome::Seed;
        }

        if let Some(last) = self.last_emission_ms
            && sample.timestamp_ms.saturating_sub(last) < self.throttle_ms
        {
            return SampleOutcome::Throttled;
        }

        SampleOutcome::Accepted
    }

    /// Note that a glyph was emitted at `timestamp_ms`
    pub fn record_emission(&mut self, timestamp_ms: u64) {
        self.last_emission_ms = Some(timestamp_ms);
    }

    /// Drop the history except for the last two samples
    pub fn finish(&mut self) {
        let keep_from = self.history.len().saturating_sub(2);
        self.history.drain(..keep_from);
    }

    pub fn history(&self) -> &[StrokeSample] {
        &self.history
    }

    pub fn last(&self) -> Option<&StrokeSample> {
        self.history.last()
    }

    /// Direction of travel between the last two samples
    pub fn direction(&self) -> Option<Vec2> {
        match self.history.as_slice() {
            [.., a, b] => Some(b.point() - a.point()),
            _ => None,
        }
    }

    pub fn last_emission_ms(&self) -> Option<u64> {
        self.last_emission_ms
    }
}

impl Default for PathSampler {
    fn default() -> Self {
        Self::new(settings::placement::THROTTLE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_seeds() {
        let mut sampler = PathSampler::default();
        assert_eq!(sampler.push(StrokeSample::new(0.0, 0.0, 0)), SampleOutcome::Seed);
        assert_eq!(sampler.push(StrokeSample::new(5.0, 0.0, 5)), SampleOutcome::Accepted);
    }

    #[test]
    fn test_throttle_counts_from_last_emission() {
        let mut sampler = PathSampler::new(30);
        sampler.push(StrokeSample::new(0.0, 0.0, 0));
        assert_eq!(sampler.push(StrokeSample::new(1.0, 0.0, 10)), SampleOutcome::Accepted);
        assert_eq!(sampler.last_emission_ms(), None);
        sampler.record_emission(10);
        assert_eq!(sampler.last_emission_ms(), Some(10));

        assert_eq!(sampler.push(StrokeSample::new(2.0, 0.0, 39)), SampleOutcome::Throttled);
        assert_eq!(sampler.push(StrokeSample::new(3.0, 0.0, 40)), SampleOutcome::Accepted);
    }

    #[test]
    fn test_finish_keeps_last_two() {
        let mut sampler = PathSampler::default();
        for i in 0..5 {
            sampler.push(StrokeSample::new(i as f64, 0.0, i * 40));
        }
        sampler.finish();
        assert_eq!(sampler.history().len(), 2);
        assert_eq!(sampler.last().map(|s| s.x), Some(4.0));
        assert_eq!(sampler.direction(), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_direction_needs_two_samples() {
        let mut sampler = PathSampler::default();
        assert_eq!(sampler.direction(), None);
        sampler.push(StrokeSample::new(0.0, 0.0, 0));
        assert_eq!(sampler.direction(), None);
    }
}
