//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::output::RiskBand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Band colors (traffic light pattern)
    pub band_high: Color,
    pub band_moderate: Color,
    pub band_low: Color,

    pub bar_empty: Color,
    pub bar_absent: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub veto_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            band_high: Color::Red,
            band_moderate: Color::Yellow,
            band_low: Color::Green,
            bar_empty: Color::DarkGray,
            bar_absent: Color::Indexed(240),
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            veto_color: Color::LightRed,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            band_high: Color::Rgb(180, 0, 0),
            band_moderate: Color::Rgb(170, 110, 0),
            band_low: Color::Rgb(0, 130, 0),
            bar_empty: Color::Indexed(250),
            bar_absent: Color::Indexed(246),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            veto_color: Color::Red,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 130, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn band_color(&self, band: RiskBand) -> Color {
        match band {
            RiskBand::High => self.band_high,
            RiskBand::Moderate => self.band_moderate,
            RiskBand::Low => self.band_low,
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luminance and
/// falls back to dark when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_dark() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.band_color(RiskBand::High), Color::Red);
        assert_eq!(colors.band_color(RiskBand::Moderate), Color::Yellow);
        assert_eq!(colors.band_color(RiskBand::Low), Color::Green);
    }

    #[test]
    fn test_explicit_theme_skips_detection() {
        assert_eq!(resolve_theme(Theme::Light).title_color, Color::Blue);
        assert_eq!(resolve_theme(Theme::Dark).title_color, Color::Cyan);
    }
}
