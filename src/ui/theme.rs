use ratatui::style::{Color, Modifier, Style};

/// Style policy for the whole frame. Two built-in looks, toggled at
/// runtime; switching never touches conversation data.
#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_text_style: Style,
    pub bot_text_style: Style,
    pub typing_indicator_style: Style,
    pub placeholder_style: Style,

    // Chrome
    pub title_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_text_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::White),
            typing_indicator_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            placeholder_style: Style::default().fg(Color::DarkGray),

            title_style: Style::default().fg(Color::Gray),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_text_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(Color::Black),
            typing_indicator_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            placeholder_style: Style::default().fg(Color::Gray),

            title_style: Style::default().fg(Color::DarkGray),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    /// The name the toggle switches to from `current`.
    pub fn toggled_name(current: &str) -> &'static str {
        if current.eq_ignore_ascii_case("light") {
            "dark"
        } else {
            "light"
        }
    }
}
