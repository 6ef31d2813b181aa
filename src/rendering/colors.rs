//! Series colors and terminal styling.
//!
//! `SeriesColor` is backend-neutral: charts turn it into an RGB triple,
//! the terminal renderer into the nearest ANSI style.

use std::fmt;
use std::str::FromStr;

use owo_colors::{OwoColorize, Style};

/// Color of one plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesColor {
    Blue,
    Orange,
    Green,
    Red,
    Purple,
    Gray,
    Black,
    Cyan,
    Magenta,
    Rgb(u8, u8, u8),
}

impl SeriesColor {
    /// RGB triple (matplotlib's tab10 shades for the named colors).
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SeriesColor::Blue => (31, 119, 180),
            SeriesColor::Orange => (255, 127, 14),
            SeriesColor::Green => (44, 160, 44),
            SeriesColor::Red => (214, 39, 40),
            SeriesColor::Purple => (148, 103, 189),
            SeriesColor::Gray => (127, 127, 127),
            SeriesColor::Black => (0, 0, 0),
            SeriesColor::Cyan => (23, 190, 207),
            SeriesColor::Magenta => (227, 119, 194),
            SeriesColor::Rgb(r, g, b) => (*r, *g, *b),
        }
    }

    /// Closest terminal style for sparklines.
    pub fn style(&self) -> Style {
        match self {
            SeriesColor::Blue => Style::new().bright_blue(),
            SeriesColor::Orange => Style::new().yellow(),
            SeriesColor::Green => Style::new().green(),
            SeriesColor::Red => Style::new().red(),
            SeriesColor::Purple => Style::new().magenta(),
            SeriesColor::Gray => Style::new().dimmed(),
            SeriesColor::Black => Style::new(),
            SeriesColor::Cyan => Style::new().cyan(),
            SeriesColor::Magenta => Style::new().bright_magenta(),
            SeriesColor::Rgb(r, g, b) => Style::new().truecolor(*r, *g, *b),
        }
    }
}

impl FromStr for SeriesColor {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("invalid hex color: {value}"));
        }
        match value.to_ascii_lowercase().as_str() {
            "blue" => Ok(SeriesColor::Blue),
            "orange" => Ok(SeriesColor::Orange),
            "green" => Ok(SeriesColor::Green),
            "red" => Ok(SeriesColor::Red),
            "purple" => Ok(SeriesColor::Purple),
            "gray" | "grey" => Ok(SeriesColor::Gray),
            "black" => Ok(SeriesColor::Black),
            "cyan" => Ok(SeriesColor::Cyan),
            "magenta" => Ok(SeriesColor::Magenta),
            other => Err(format!("unknown color: {other}")),
        }
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.rgb();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

fn parse_hex(hex: &str) -> Option<SeriesColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(SeriesColor::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Terminal text styling, switchable off for pipes.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, s: &str, style: Style) -> String {
        if self.enabled {
            s.style(style).to_string()
        } else {
            s.to_string()
        }
    }

    /// Bold heading.
    pub fn heading(&self, s: &str) -> String {
        self.paint(s, Style::new().bold())
    }

    /// Green for improvement, red for regression, dimmed for flat.
    pub fn delta(&self, delta: f64) -> String {
        let text = format!("{:+.4}", delta);
        let style = if delta > 0.0 {
            Style::new().green()
        } else if delta < 0.0 {
            Style::new().red()
        } else {
            Style::new().dimmed()
        };
        self.paint(&text, style)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(s, Style::new().dimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_colors() {
        assert_eq!("blue".parse::<SeriesColor>(), Ok(SeriesColor::Blue));
        assert_eq!("Orange".parse::<SeriesColor>(), Ok(SeriesColor::Orange));
        assert_eq!("grey".parse::<SeriesColor>(), Ok(SeriesColor::Gray));
        assert!("chartreuse".parse::<SeriesColor>().is_err());
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!("#ff8000".parse::<SeriesColor>(), Ok(SeriesColor::Rgb(255, 128, 0)));
        assert!("#ff80".parse::<SeriesColor>().is_err());
        assert!("#gg0000".parse::<SeriesColor>().is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(SeriesColor::Black.to_string(), "#000000");
        assert_eq!(SeriesColor::Rgb(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn test_colorizer_disabled_is_plain() {
        let plain = Colorizer::new(false);
        assert_eq!(plain.heading("Reward"), "Reward");
        assert_eq!(plain.delta(1.5), "+1.5000");
        assert_eq!(plain.delta(-0.25), "-0.2500");
    }

    #[test]
    fn test_colorizer_enabled_adds_escape_codes() {
        let color = Colorizer::new(true);
        let painted = color.heading("Reward");
        assert!(painted.contains("Reward"));
        assert!(painted.contains('\x1b'));
    }
}
