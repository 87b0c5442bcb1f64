use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Named colours used across the charts
// ---------------------------------------------------------------------------

pub const STEELBLUE: Color32 = Color32::from_rgb(70, 130, 180);
pub const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
pub const HIGHLIGHT_RED: Color32 = Color32::from_rgb(220, 20, 60);
pub const AXIS_GRAY: Color32 = Color32::from_rgb(60, 60, 60);

// ---------------------------------------------------------------------------
// Viridis ramp
// ---------------------------------------------------------------------------

/// Viridis sampled at t = 0.0, 0.1, …, 1.0.
const VIRIDIS: [(u8, u8, u8); 11] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x24, 0x75),
    (0x41, 0x44, 0x87),
    (0x35, 0x5f, 0x8d),
    (0x2a, 0x78, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x22, 0xa8, 0x84),
    (0x44, 0xbf, 0x70),
    (0x7a, 0xd1, 0x51),
    (0xbd, 0xdf, 0x26),
    (0xfd, 0xe7, 0x25),
];

fn linear(rgb: (u8, u8, u8)) -> LinSrgb<f32> {
    Srgb::new(rgb.0, rgb.1, rgb.2)
        .into_format::<f32>()
        .into_linear()
}

/// Viridis colour for `t` in `[0, 1]` (clamped).
pub fn viridis(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = (scaled - i as f64) as f32;

    let mixed = linear(VIRIDIS[i]).mix(linear(VIRIDIS[i + 1]), frac);
    let srgb: Srgb<f32> = Srgb::from_linear(mixed);
    let rgb: Srgb<u8> = srgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Sequential colour scale: numeric value → Color32
// ---------------------------------------------------------------------------

/// Maps a numeric domain onto the viridis ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    domain: (f64, f64),
}

impl SequentialScale {
    pub fn new(domain: (f64, f64)) -> Self {
        SequentialScale { domain }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let (d0, d1) = self.domain;
        if d0 == d1 {
            return viridis(0.5);
        }
        viridis((value - d0) / (d1 - d0))
    }

    /// Evenly spaced stops for a gradient legend, low → high.
    pub fn legend_stops(n: usize) -> Vec<Color32> {
        let n = n.max(2);
        (0..n).map(|i| viridis(i as f64 / (n - 1) as f64)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(viridis(0.0), Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(viridis(1.0), Color32::from_rgb(0xfd, 0xe7, 0x25));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn sequential_scale_spans_domain() {
        let scale = SequentialScale::new((5.0, 25.0));
        assert_eq!(scale.color_for(5.0), viridis(0.0));
        assert_eq!(scale.color_for(25.0), viridis(1.0));
        assert_ne!(scale.color_for(10.0), scale.color_for(20.0));
    }

    #[test]
    fn degenerate_domain_uses_midpoint() {
        let scale = SequentialScale::new((3.0, 3.0));
        assert_eq!(scale.color_for(3.0), viridis(0.5));
    }

    #[test]
    fn legend_has_requested_stops() {
        let stops = SequentialScale::legend_stops(11);
        assert_eq!(stops.len(), 11);
        assert_eq!(stops[0], viridis(0.0));
    }
}
