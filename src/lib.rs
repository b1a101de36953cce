// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Letterpath: freehand text-path drawing with two-way text effect sync.
//!
//! A pointer gesture becomes a trail of individually rotated glyphs that
//! follow the path. The current text style (fill, stroke color or named
//! gradient, shadow, style flags, alignment) is kept in sync in both
//! directions with whatever glyph or group is selected.

pub mod color;
pub mod config;
pub mod effect;
pub mod fonts;
pub mod gradient;
pub mod metrics;
pub mod replay;
pub mod scene;
pub mod session;
pub mod settings;
pub mod store;
pub mod stroke;
pub mod style;
pub mod tools;

use anyhow::Context;
use config::Config;
use fonts::SystemFonts;
use gradient::GradientRegistry;
use metrics::ParleyMetrics;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use store::{FileStore, KeyValueStore};
use style::StyleState;

/// Entry point for the `letterpath` replay binary
pub fn run() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("letterpath=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(gesture_path) = args.get(1).map(PathBuf::from) else {
        tracing::error!("Usage: letterpath <gesture.json> [config.toml]");
        anyhow::bail!("missing gesture file argument");
    };
    let config = Config::load_or_default(args.get(2).map(Path::new))
        .context("Failed to load config")?;

    let storage_dir = config.storage_dir();
    tracing::info!("Using storage at {}", storage_dir.display());
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(storage_dir));
    let registry = GradientRegistry::load(kv.clone());

    let mut style = StyleState::load(kv);
    if let Some(text) = &config.text {
        style.set_text(text.clone());
    }
    if let Some(family) = &config.font_family {
        style.select_font(family, None, &mut SystemFonts::new());
    }

    let gesture = replay::load_gesture(&gesture_path)?;
    let mut metrics = ParleyMetrics::new();
    let records = replay::replay(
        &gesture,
        &style,
        &registry,
        &mut metrics,
        config.session_options(),
    );
    tracing::info!("Replay placed {} glyphs", records.len());

    let json = serde_json::to_string_pretty(&records).context("Failed to encode glyphs")?;
    println!("{json}");
    Ok(())
}
