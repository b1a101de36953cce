// Copyright 2025 the Letterpath Authors
// SPDX-License-Identifier: Apache-2.0

//! Conversion of resolved paints to renderer brushes

use super::{LinearGradient, Paint, ShadowPaint};
use peniko::{Brush, Color, ColorStop, ColorStops, Gradient, GradientKind, LinearGradientPosition};

impl Paint {
    /// Brush in the target object's local coordinates
    pub fn to_brush(&self) -> Brush {
        match self {
            Paint::Solid(color) => Brush::Solid(color.to_color()),
            Paint::Linear(gradient) => gradient.to_brush(),
        }
    }
}

impl LinearGradient {
    pub fn to_brush(&self) -> Brush {
        let stops: Vec<ColorStop> = self
            .stops
            .iter()
            .map(|stop| ColorStop::from((stop.offset as f32, stop.color.to_color())))
            .collect();

        // A one-stop gradient is just a color
        if let [only] = self.stops.as_slice() {
            return Brush::Solid(only.color.to_color());
        }

        Brush::Gradient(Gradient {
            kind: GradientKind::Linear(LinearGradientPosition::new(self.start, self.end)),
            stops: ColorStops::from(stops.as_slice()),
            ..Gradient::default()
        })
    }
}

impl ShadowPaint {
    pub fn to_color(&self) -> Color {
        self.color.to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::gradient::ColorStop as PresetStop;
    use kurbo::Point;

    #[test]
    fn test_solid_brush() {
        let brush = Paint::Solid(Rgba::rgb(255, 0, 0)).to_brush();
        assert!(matches!(brush, Brush::Solid(_)));
    }

    #[test]
    fn test_gradient_brush_keeps_stops() {
        let paint = Paint::Linear(LinearGradient {
            start: Point::ZERO,
            end: Point::new(50.0, 0.0),
            stops: vec![
                PresetStop {
                    offset: 0.0,
                    color: Rgba::BLACK,
                },
                PresetStop {
                    offset: 1.0,
                    color: Rgba::WHITE,
                },
            ],
        });
        match paint.to_brush() {
            Brush::Gradient(gradient) => assert_eq!(gradient.stops.len(), 2),
            other => panic!("expected a gradient, got {other:?}"),
        }
    }
}
