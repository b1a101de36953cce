// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Letterpath: replay a recorded gesture and print the placed glyphs

fn main() -> anyhow::Result<()> {
    letterpath::run()
}
