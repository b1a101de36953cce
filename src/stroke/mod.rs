// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Turning pointer samples into glyph placements

pub mod placer;
pub mod sampler;

pub use placer::{GlyphPlacer, Placement};
pub use sampler::{PathSampler, SampleOutcome, StrokeSample};
