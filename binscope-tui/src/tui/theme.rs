use binscope_common::BorderStyle;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub bar: Color,
    pub border: Color,
    pub highlight: Color, // active increment
    pub muted: Color,     // key hints
    pub warning: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            bar: Color::Cyan,
            border: Color::Gray,
            highlight: Color::Yellow,
            muted: Color::DarkGray,
            warning: Color::LightYellow,
            success: Color::LightGreen,
        }
    }
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            bar: Color::Blue,
            border: Color::DarkGray,
            highlight: Color::Magenta,
            muted: Color::Gray,
            warning: Color::Red,
            success: Color::Green,
        }
    }
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            bar: Color::Rgb(136, 192, 208),
            border: Color::Rgb(76, 86, 106),
            highlight: Color::Rgb(235, 203, 139),
            muted: Color::Rgb(76, 86, 106),
            warning: Color::Rgb(208, 135, 112),
            success: Color::Rgb(163, 190, 140),
        }
    }
    pub fn catppuccin() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            bar: Color::Rgb(137, 180, 250),
            border: Color::Rgb(108, 112, 134),
            highlight: Color::Rgb(249, 226, 175),
            muted: Color::Rgb(108, 112, 134),
            warning: Color::Rgb(250, 179, 135),
            success: Color::Rgb(166, 227, 161),
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "nord" => Self::nord(),
            "catppuccin" => Self::catppuccin(),
            _ => Self::dark(),
        }
    }
}

/// Frame glyph family for the histogram box.
pub fn border_type(style: BorderStyle) -> BorderType {
    match style {
        BorderStyle::Plain => BorderType::Plain,
        BorderStyle::Bold => BorderType::Thick,
        BorderStyle::Double => BorderType::Double,
        BorderStyle::Curved => BorderType::Rounded,
        BorderStyle::Quadrant => BorderType::QuadrantOutside,
    }
}
