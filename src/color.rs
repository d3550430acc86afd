use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart colours: one per plotted series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub data: Color32,
    pub trend: Color32,
    pub moving_average: Color32,
}

impl Default for ChartColors {
    fn default() -> Self {
        match generate_palette(3).as_slice() {
            &[data, trend, moving_average] => ChartColors {
                data,
                trend,
                moving_average,
            },
            _ => ChartColors {
                data: Color32::LIGHT_BLUE,
                trend: Color32::GRAY,
                moving_average: Color32::GOLD,
            },
        }
    }
}
