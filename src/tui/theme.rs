use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the panel
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub title: Color,
    pub border: Color,
    pub border_error: Color,
    pub error_text: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xC8, 0xC8, 0xC8),
            dim: Color::Rgb(0x70, 0x70, 0x70),
            title: Color::Rgb(0x44, 0xDD, 0xFF),
            border: Color::Rgb(0x50, 0x50, 0x50),
            border_error: Color::Rgb(0xFF, 0x44, 0x44),
            error_text: Color::Rgb(0xFF, 0x44, 0x44),
            selection_bg: Color::Rgb(0x3D, 0x3D, 0x5C),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` overrides, falling back to
    /// defaults for anything unrecognized or malformed.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "dim" => theme.dim = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "border_error" => theme.border_error = color,
                    "error_text" => theme.error_text = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_fg" => theme.selection_fg = color,
                    _ => {}
                }
            }
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#FF4444"), Some(Color::Rgb(0xFF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("#000000"), Some(Color::Rgb(0, 0, 0)));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert_eq!(parse_hex_color("FF4444"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn overrides_apply_and_unknown_keys_are_ignored() {
        let mut ui = UiConfig::default();
        ui.colors.insert("text".to_string(), "#112233".to_string());
        ui.colors.insert("no_such_slot".to_string(), "#445566".to_string());
        ui.colors.insert("border".to_string(), "not-a-color".to_string());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.text, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.border, Theme::default().border);
    }
}
