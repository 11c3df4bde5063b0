use ratatui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn base(self) -> Style {
        match self {
            Theme::Light => Style::default().fg(Color::Black).bg(Color::White),
            Theme::Dark => Style::default().fg(Color::White).bg(Color::Black),
        }
    }

    /// Row that is currently in edit mode, the same in both themes.
    pub fn editing_row(self) -> Style {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    }

    pub fn picker(self) -> Style {
        Style::default().fg(Color::Black).bg(Color::Rgb(0x58, 0x81, 0x57))
    }

    pub fn input_border(self, focused: bool) -> Style {
        if focused {
            self.base().fg(Color::LightGreen)
        } else {
            self.base().fg(Color::Green)
        }
    }
}
