// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Named gradient presets usable as a text stroke.
//!
//! The registry holds the built-in presets plus any custom ones the user
//! saved. Custom presets are keyed by a slug of their display name and are
//! the only entries written to the key/value store. A stroke refers to a
//! preset as `gradient:<key>`; see `effect::StrokeSpec`.

pub mod presets;

use crate::color::Rgba;
use crate::settings;
use crate::store::{self, KeyValueStore};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Gradient geometry type (only linear is supported)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
}

/// Gradient axis as fractions of the target's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientCoords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl GradientCoords {
    /// Left edge to right edge
    pub const HORIZONTAL: GradientCoords = GradientCoords {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 0.0,
    };

    /// Scale the unit axis to a box of `size`, in box-local coordinates
    pub fn scaled(&self, size: Size) -> (Point, Point) {
        (
            Point::new(self.x1 * size.width, self.y1 * size.height),
            Point::new(self.x2 * size.width, self.y2 * size.height),
        )
    }
}

impl Default for GradientCoords {
    fn default() -> Self {
        Self::HORIZONTAL
    }
}

/// A single gradient stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the axis, `0.0..=1.0`
    pub offset: f64,
    pub color: Rgba,
}

/// A reusable gradient definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPreset {
    #[serde(rename = "type", default)]
    pub kind: GradientKind,
    #[serde(default)]
    pub coords: GradientCoords,
    pub color_stops: Vec<ColorStop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_custom: bool,
}

impl GradientPreset {
    /// Starting point for a new custom preset: black to white, horizontal
    pub fn new_custom() -> Self {
        Self {
            kind: GradientKind::Linear,
            coords: GradientCoords::HORIZONTAL,
            color_stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: Rgba::BLACK,
                },
                ColorStop {
                    offset: 1.0,
                    color: Rgba::WHITE,
                },
            ],
            name: None,
            is_custom: true,
        }
    }

    /// At least two stops with non-decreasing offsets in `0..=1`
    pub fn is_well_formed(&self) -> bool {
        self.color_stops.len() >= 2
            && self
                .color_stops
                .iter()
                .all(|stop| (0.0..=1.0).contains(&stop.offset))
            && self
                .color_stops
                .windows(2)
                .all(|pair| pair[0].offset <= pair[1].offset)
    }

    /// Append a black stop 0.1 past the last one (capped at 1)
    pub fn push_stop(&mut self) {
        let last = self.color_stops.last().map_or(0.0, |stop| stop.offset);
        self.color_stops.push(ColorStop {
            offset: (last + 0.1).min(1.0),
            color: Rgba::BLACK,
        });
    }

    /// Remove the stop at `index`; refuses to drop below two stops
    pub fn remove_stop(&mut self, index: usize) -> bool {
        if self.color_stops.len() <= 2 || index >= self.color_stops.len() {
            return false;
        }
        self.color_stops.remove(index);
        true
    }

}

/// Derive a registry key from a display name.
///
/// Lowercases and collapses every whitespace run to one hyphen. Two names
/// that differ only in case or spacing map to the same key.
pub fn slugify(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('-');
            }
            in_space = true;
        } else {
            key.extend(c.to_lowercase());
            in_space = false;
        }
    }
    key
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Built-in and custom gradient presets, keyed by identifier
pub struct GradientRegistry {
    presets: BTreeMap<String, GradientPreset>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl GradientRegistry {
    /// Registry with the built-in presets only and no persistence
    pub fn new() -> Self {
        let presets = presets::BUILTIN_KEYS
            .iter()
            .filter_map(|&key| presets::builtin(key).map(|p| (key.to_string(), p)))
            .collect();
        Self {
            presets,
            store: None,
        }
    }

    /// Load custom presets from `store` and keep it for later writes.
    ///
    /// A stored entry whose key collides with a built-in is shadowed by the
    /// built-in. Read failures are logged and leave the built-ins only.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let mut registry = Self::new();
        let stored: BTreeMap<String, GradientPreset> =
            match store::load_json(kv.as_ref(), settings::storage::GRADIENT_PRESETS_KEY) {
                Ok(Some(stored)) => stored,
                Ok(None) => BTreeMap::new(),
                Err(e) => {
                    tracing::warn!("Failed to load custom gradient presets: {}", e);
                    BTreeMap::new()
                }
            };

        for (key, mut preset) in stored {
            if presets::is_builtin(&key) {
                tracing::debug!("Stored preset `{}` is shadowed by a built-in", key);
                continue;
            }
            if !preset.is_well_formed() {
                tracing::warn!("Skipping malformed stored gradient preset `{}`", key);
                continue;
            }
            preset.is_custom = true;
            registry.presets.insert(key, preset);
        }

        tracing::info!(
            "Loaded {} gradient presets ({} custom)",
            registry.presets.len(),
            registry.presets.values().filter(|p| p.is_custom).count()
        );
        registry.store = Some(kv);
        registry
    }

    pub fn get(&self, key: &str) -> Option<&GradientPreset> {
        self.presets.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.presets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// All presets in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GradientPreset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Save `preset` as a custom entry named `display_name`.
    ///
    /// Returns the derived key, or `None` if the preset has fewer than two
    /// stops or out-of-order offsets. Any entry already at that key is
    /// replaced, including one with a different display name that
    /// slugifies the same.
    pub fn add(&mut self, preset: GradientPreset, display_name: &str) -> Option<String> {
        let key = slugify(display_name);
        if !preset.is_well_formed() {
            tracing::warn!("Rejected malformed gradient preset `{}`", key);
            return None;
        }
        let preset = GradientPreset {
            name: Some(display_name.to_string()),
            is_custom: true,
            ..preset
        };

        if let Some(previous) = self.presets.insert(key.clone(), preset) {
            if previous.is_custom {
                tracing::info!("Replaced custom gradient preset `{}`", key);
            } else {
                tracing::warn!("Custom gradient preset `{}` shadows a built-in", key);
            }
        } else {
            tracing::info!("Added custom gradient preset `{}`", key);
        }

        self.persist();
        Some(key)
    }

    /// Delete a custom preset. Built-in keys are left untouched.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.presets.get(key).is_some_and(|p| p.is_custom) {
            return false;
        }
        self.presets.remove(key);

        // A custom entry that shadowed a built-in gives the key back to it
        if let Some(builtin) = presets::builtin(key) {
            self.presets.insert(key.to_string(), builtin);
        }

        tracing::info!("Removed custom gradient preset `{}`", key);
        self.persist();
        true
    }

    /// First preset whose stops equal `stops` exactly (length, order,
    /// offsets, colors)
    pub fn find_by_stops(&self, stops: &[ColorStop]) -> Option<&str> {
        self.presets
            .iter()
            .find(|(_, preset)| preset.color_stops == stops)
            .map(|(key, _)| key.as_str())
    }

    /// Snapshot of the custom entries (what gets persisted)
    pub fn custom_presets(&self) -> BTreeMap<String, GradientPreset> {
        self.presets
            .iter()
            .filter(|(_, preset)| preset.is_custom)
            .map(|(key, preset)| (key.clone(), preset.clone()))
            .collect()
    }

    fn persist(&self) {
        let Some(store) = &self.store else {
            return;
        };
        store::save_best_effort(
            store.as_ref(),
            settings::storage::GRADIENT_PRESETS_KEY,
            &self.custom_presets(),
        );
    }
}

impl Default for GradientRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn make_preset() -> GradientPreset {
        GradientPreset {
            color_stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: Rgba::rgb(0x11, 0x22, 0x33),
                },
                ColorStop {
                    offset: 1.0,
                    color: Rgba::rgb(0xaa, 0xbb, 0xcc),
                },
            ],
            ..GradientPreset::new_custom()
        }
    }

    fn stored_keys(kv: &MemoryStore) -> Vec<String> {
        let stored: BTreeMap<String, GradientPreset> =
            store::load_json(kv, settings::storage::GRADIENT_PRESETS_KEY)
                .unwrap()
                .unwrap_or_default();
        stored.into_keys().collect()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Preset"), "my-preset");
        assert_eq!(slugify("Deep   Sea\tBlue"), "deep-sea-blue");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn test_add_get_remove() {
        let mut registry = GradientRegistry::new();
        let key = registry.add(make_preset(), "My Preset");
        assert_eq!(key.as_deref(), Some("my-preset"));

        let preset = registry.get("my-preset").unwrap();
        assert!(preset.is_custom);
        assert_eq!(preset.name.as_deref(), Some("My Preset"));

        assert!(registry.remove("my-preset"));
        assert!(registry.get("my-preset").is_none());
        assert!(!registry.remove("my-preset"));
    }

    #[test]
    fn test_builtin_cannot_be_removed() {
        let mut registry = GradientRegistry::new();
        let before = registry.get("rainbow").cloned();
        assert!(!registry.remove("rainbow"));
        assert_eq!(registry.get("rainbow").cloned(), before);
        assert!(before.is_some());
    }

    #[test]
    fn test_colliding_names_overwrite() {
        let mut registry = GradientRegistry::new();
        let first = registry.add(make_preset(), "My Preset").unwrap();
        let mut other = make_preset();
        other.push_stop();
        let second = registry.add(other, "my   preset").unwrap();

        assert_eq!(first, second);
        let preset = registry.get(&first).unwrap();
        assert_eq!(preset.color_stops.len(), 3);
        assert_eq!(preset.name.as_deref(), Some("my   preset"));
    }

    #[test]
    fn test_removing_shadowing_custom_restores_builtin() {
        let mut registry = GradientRegistry::new();
        registry.add(make_preset(), "Rainbow");
        assert!(registry.get("rainbow").unwrap().is_custom);

        assert!(registry.remove("rainbow"));
        let restored = registry.get("rainbow").unwrap();
        assert!(!restored.is_custom);
        assert_eq!(restored.color_stops.len(), 6);
    }

    #[test]
    fn test_only_custom_presets_persist() {
        let store = Arc::new(MemoryStore::new());
        let mut registry = GradientRegistry::load(store.clone());
        assert!(store.is_empty());

        registry.add(make_preset(), "Mine");
        assert_eq!(stored_keys(&store), vec!["mine".to_string()]);

        registry.remove("mine");
        assert!(stored_keys(&store).is_empty());
    }

    #[test]
    fn test_load_restores_custom_presets() {
        let store = Arc::new(MemoryStore::new());
        GradientRegistry::load(store.clone()).add(make_preset(), "Saved One");

        let reloaded = GradientRegistry::load(store);
        let preset = reloaded.get("saved-one").unwrap();
        assert!(preset.is_custom);
        assert_eq!(preset.color_stops, make_preset().color_stops);
        assert!(reloaded.contains("rainbow"));
    }

    #[test]
    fn test_reloaded_preset_matches_painted_stops() {
        let kv = Arc::new(MemoryStore::new());
        let mut preset = make_preset();
        preset.color_stops[0].color = Rgba::rgb(1, 2, 3).with_alpha(0.123456789);
        let painted = preset.color_stops.clone();
        GradientRegistry::load(kv.clone()).add(preset, "Fine Alpha");

        let reloaded = GradientRegistry::load(kv);
        assert_eq!(reloaded.find_by_stops(&painted), Some("fine-alpha"));
    }

    #[test]
    fn test_load_survives_corrupt_store() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(settings::storage::GRADIENT_PRESETS_KEY, "][")
            .unwrap();
        let registry = GradientRegistry::load(store);
        assert_eq!(registry.len(), presets::BUILTIN_KEYS.len());
    }

    #[test]
    fn test_write_failure_keeps_preset_in_memory() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let mut registry = GradientRegistry::load(store);
        let key = registry.add(make_preset(), "Offline").unwrap();
        assert!(registry.get(&key).is_some());
    }

    #[test]
    fn test_add_rejects_malformed_presets() {
        let store = Arc::new(MemoryStore::new());
        let mut registry = GradientRegistry::load(store.clone());

        let mut one_stop = make_preset();
        one_stop.color_stops.truncate(1);
        assert_eq!(registry.add(one_stop, "Lonely"), None);

        let mut backwards = make_preset();
        backwards.color_stops.reverse();
        assert_eq!(registry.add(backwards, "Backwards"), None);

        assert!(!registry.contains("lonely"));
        assert!(!registry.contains("backwards"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_malformed_entries() {
        let mut one_stop = make_preset();
        one_stop.color_stops.truncate(1);
        let mut stored = BTreeMap::new();
        stored.insert("good".to_string(), make_preset());
        stored.insert("bad".to_string(), one_stop);

        let kv = Arc::new(MemoryStore::new());
        store::save_json(kv.as_ref(), settings::storage::GRADIENT_PRESETS_KEY, &stored).unwrap();

        let registry = GradientRegistry::load(kv);
        assert!(registry.contains("good"));
        assert!(!registry.contains("bad"));
        assert_eq!(registry.len(), presets::BUILTIN_KEYS.len() + 1);
    }

    #[test]
    fn test_find_by_stops_requires_exact_match() {
        let registry = GradientRegistry::new();
        let sunset = registry.get("sunset").unwrap().color_stops.clone();
        assert_eq!(registry.find_by_stops(&sunset), Some("sunset"));

        // A prefix of the rainbow is not the rainbow
        let rainbow = &registry.get("rainbow").unwrap().color_stops;
        assert_eq!(registry.find_by_stops(&rainbow[..2]), None);

        let mut shifted = sunset;
        shifted[1].offset = 0.9;
        assert_eq!(registry.find_by_stops(&shifted), None);
    }

    #[test]
    fn test_stop_editing() {
        let mut preset = GradientPreset::new_custom();
        assert!(!preset.remove_stop(0));

        preset.color_stops[1].offset = 0.95;
        preset.push_stop();
        assert_eq!(preset.color_stops.len(), 3);
        assert_eq!(preset.color_stops[2].offset, 1.0);
        assert!(preset.is_well_formed());

        assert!(preset.remove_stop(1));
        assert_eq!(preset.color_stops.len(), 2);
    }

    #[test]
    fn test_preset_json_shape() {
        let json = serde_json::to_value(presets::builtin("sunset").unwrap()).unwrap();
        assert_eq!(json["type"], "linear");
        assert_eq!(json["colorStops"][0]["color"], "#ff7e5f");
        assert_eq!(json["coords"]["x2"], 1.0);
        assert_eq!(json["isCustom"], false);
    }
}
