//! Midnight theme implementation
//!
//! Charcoal backgrounds with teal and purple accents, matching the
//! study-session look of the web front end.

use ratatui::style::Color;

use super::Theme;

/// Midnight color palette
pub const MIDNIGHT: Theme = Theme {
    name: String::new(), // Will be set properly with const fn when stabilized

    // Background colors
    bg_primary: Color::Rgb(11, 15, 20),   // #0b0f14
    bg_secondary: Color::Rgb(21, 27, 35), // #151b23

    // Foreground colors
    fg_primary: Color::Rgb(226, 232, 240),   // #e2e8f0
    fg_secondary: Color::Rgb(148, 163, 184), // #94a3b8
    fg_muted: Color::Rgb(100, 116, 139),     // #64748b

    // Accent colors
    accent_primary: Color::Rgb(0, 245, 212),     // #00f5d4 teal
    accent_secondary: Color::Rgb(191, 90, 242),  // #bf5af2 purple

    // Semantic colors
    success: Color::Rgb(52, 211, 153), // #34d399
    warning: Color::Rgb(245, 158, 11), // #f59e0b
    error: Color::Rgb(248, 113, 113),  // #f87171

    // UI elements
    border: Color::Rgb(51, 65, 85),           // #334155
    border_focused: Color::Rgb(0, 245, 212),  // #00f5d4
    selection: Color::Rgb(30, 41, 59),        // #1e293b
};

// Workaround for const String
impl Theme {
    pub fn midnight() -> Self {
        Theme { name: "Midnight".to_string(), ..MIDNIGHT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_has_correct_name() {
        assert_eq!(Theme::midnight().name, "Midnight");
    }

    #[test]
    fn midnight_colors_are_rgb() {
        let theme = Theme::midnight();
        assert!(matches!(theme.bg_primary, Color::Rgb(_, _, _)));
        assert!(matches!(theme.accent_primary, Color::Rgb(_, _, _)));
    }
}
