// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Built-in gradient presets.
//!
//! These are generated at startup and never persisted. All of them run
//! left to right across the target's bounding box.

use super::{ColorStop, GradientCoords, GradientKind, GradientPreset};
use crate::color::Rgba;

/// Keys of the built-in presets, in display order
pub const BUILTIN_KEYS: [&str; 4] = ["rainbow", "sunset", "ocean", "fire"];

/// Whether `key` names a built-in preset
pub fn is_builtin(key: &str) -> bool {
    BUILTIN_KEYS.contains(&key)
}

/// The built-in preset stored under `key`
pub fn builtin(key: &str) -> Option<GradientPreset> {
    let preset = match key {
        "rainbow" => GradientPreset {
            name: Some("Rainbow".to_string()),
            ..horizontal(&[
                (0.0, Rgba::rgb(0xff, 0x00, 0x00)),
                (0.2, Rgba::rgb(0xff, 0xff, 0x00)),
                (0.4, Rgba::rgb(0x00, 0xff, 0x00)),
                (0.6, Rgba::rgb(0x00, 0xff, 0xff)),
                (0.8, Rgba::rgb(0x00, 0x00, 0xff)),
                (1.0, Rgba::rgb(0xff, 0x00, 0xff)),
            ])
        },
        "sunset" => horizontal(&[
            (0.0, Rgba::rgb(0xff, 0x7e, 0x5f)),
            (1.0, Rgba::rgb(0xfe, 0xb4, 0x7b)),
        ]),
        "ocean" => horizontal(&[
            (0.0, Rgba::rgb(0x21, 0x93, 0xb0)),
            (1.0, Rgba::rgb(0x6d, 0xd5, 0xed)),
        ]),
        "fire" => horizontal(&[
            (0.0, Rgba::rgb(0xf1, 0x27, 0x11)),
            (1.0, Rgba::rgb(0xf5, 0xaf, 0x19)),
        ]),
        _ => return None,
    };
    Some(preset)
}

fn horizontal(stops: &[(f64, Rgba)]) -> GradientPreset {
    GradientPreset {
        kind: GradientKind::Linear,
        coords: GradientCoords::HORIZONTAL,
        color_stops: stops
            .iter()
            .map(|&(offset, color)| ColorStop { offset, color })
            .collect(),
        name: None,
        is_custom: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_a_preset() {
        for key in BUILTIN_KEYS {
            let preset = builtin(key).unwrap();
            assert!(!preset.is_custom);
            assert!(preset.color_stops.len() >= 2);
            assert!(preset.is_well_formed());
        }
        assert!(builtin("my-preset").is_none());
    }

    #[test]
    fn test_rainbow_is_named() {
        assert_eq!(builtin("rainbow").unwrap().name.as_deref(), Some("Rainbow"));
        assert_eq!(builtin("sunset").unwrap().name, None);
    }
}
