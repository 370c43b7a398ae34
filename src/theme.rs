use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text: Color,
    pub text_secondary: Color,

    // Specific components
    pub title: Style,
    pub subtitle: Style,
    pub input: Style,
    pub input_disabled: Style,
    pub pending: Style,
    pub error_border: Style,
    pub error_text: Style,
    pub result_border: Style,
    pub copied: Style,
    pub step_number: Style,
    pub footer: Style,
    pub api_online: Style,
    pub api_offline: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text: Color::White,
            text_secondary: Color::Gray,

            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            input: Style::default().fg(Color::White),
            input_disabled: Style::default().fg(Color::DarkGray),
            pending: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            error_border: Style::default().fg(Color::Red),
            error_text: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            result_border: Style::default().fg(Color::Magenta),
            copied: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            step_number: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            api_online: Style::default().fg(Color::Green),
            api_offline: Style::default().fg(Color::Red),
        }
    }
}
