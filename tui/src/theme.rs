//! Colors and styles for the dicebag TUI (Kanagawa Wave palette).

use ratatui::style::{Color, Modifier, Style};

pub mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

    pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
}

pub mod styles {
    use super::{Modifier, Style, colors};

    pub fn group_title(selected: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if selected {
            style.fg(colors::PRIMARY)
        } else {
            style.fg(colors::TEXT_SECONDARY)
        }
    }

    pub fn border(selected: bool) -> Style {
        if selected {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::TEXT_MUTED)
        }
    }

    pub fn die(selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::BG_HIGHLIGHT)
        } else {
            Style::default().fg(colors::TEXT_PRIMARY)
        }
    }

    pub fn total(available: bool) -> Style {
        if available {
            Style::default()
                .fg(colors::GREEN)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_MUTED)
        }
    }

    pub fn key_hint() -> Style {
        Style::default().fg(colors::CYAN)
    }
}
