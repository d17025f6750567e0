use ratatui::style::Color;

use crate::model::{Category, UiConfig};

/// Colors of the note screen. Every slot can be overridden from the
/// `[ui.colors]` table in config.toml, using the field name as the key.
/// Category labels (`work = "#4488FF"`) recolor the category badge.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Paper
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub red: Color,
    /// Ruled line under each text row
    pub rule: Color,
    pub selection_bg: Color,
    category_colors: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            rule: Color::Rgb(0x3D, 0x14, 0x38),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            // Personal, Work, Study, Life, Other
            category_colors: [
                Color::Rgb(0x44, 0xFF, 0x88),
                Color::Rgb(0x44, 0x88, 0xFF),
                Color::Rgb(0x44, 0xDD, 0xFF),
                Color::Rgb(0xFF, 0xD7, 0x00),
                Color::Rgb(0x7D, 0x78, 0xBF),
            ],
        }
    }
}

/// `#RRGGBB` or `#RGB`
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => {
            let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
            Some(Color::Rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}

impl Theme {
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            let Some(slot) = theme.slot_mut(key) else {
                tracing::warn!(key = %key, "unknown color key");
                continue;
            };
            match parse_hex_color(value.trim()) {
                Some(color) => *slot = color,
                None => tracing::warn!(key = %key, value = %value, "ignoring malformed color"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "dim" => &mut self.dim,
            "red" => &mut self.red,
            "rule" => &mut self.rule,
            "selection_bg" => &mut self.selection_bg,
            label => &mut self.category_colors[Category::parse_label(label)?.index()],
        };
        Some(slot)
    }

    pub fn category_color(&self, category: Category) -> Color {
        self.category_colors[category.index()]
    }
}
