use std::str::FromStr;

use ratatui::style::Color;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("{0} is not a valid theme (see --list themes for a list of valid options)")]
    UnknownTheme(String),
    #[error("invalid color '{value}' for {role}")]
    InvalidColor { role: &'static str, value: String },
}

/// Colors used to draw the typing screen and the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// background
    pub bgcol: Color,
    /// text not typed yet
    pub fgcol: Color,
    /// correctly typed text
    pub hicol: Color,
    /// the character under the cursor
    pub hicol2: Color,
    /// timer and report accents
    pub hicol3: Color,
    /// incorrectly typed text
    pub errcol: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bgcol: Color::Reset,
            fgcol: Color::DarkGray,
            hicol: Color::Reset,
            hicol2: Color::Green,
            hicol3: Color::Cyan,
            errcol: Color::Red,
        }
    }
}

/// Names of the built-in themes, sorted
pub const THEME_NAMES: &[&str] = &["default", "dracula", "gruvbox", "nord", "solarized"];

fn rgb(hex: u32) -> Color {
    Color::from_u32(hex)
}

impl Theme {
    pub fn builtin(name: &str) -> Option<Theme> {
        let theme = match name {
            "default" => Theme::default(),
            "dracula" => Theme {
                bgcol: rgb(0x282a36),
                fgcol: rgb(0x6272a4),
                hicol: rgb(0xf8f8f2),
                hicol2: rgb(0x50fa7b),
                hicol3: rgb(0xbd93f9),
                errcol: rgb(0xff5555),
            },
            "gruvbox" => Theme {
                bgcol: rgb(0x282828),
                fgcol: rgb(0x928374),
                hicol: rgb(0xebdbb2),
                hicol2: rgb(0xb8bb26),
                hicol3: rgb(0xfabd2f),
                errcol: rgb(0xfb4934),
            },
            "nord" => Theme {
                bgcol: rgb(0x2e3440),
                fgcol: rgb(0x4c566a),
                hicol: rgb(0xeceff4),
                hicol2: rgb(0x88c0d0),
                hicol3: rgb(0x81a1c1),
                errcol: rgb(0xbf616a),
            },
            "solarized" => Theme {
                bgcol: rgb(0x002b36),
                fgcol: rgb(0x586e75),
                hicol: rgb(0x93a1a1),
                hicol2: rgb(0x859900),
                hicol3: rgb(0x268bd2),
                errcol: rgb(0xdc322f),
            },
            _ => return None,
        };
        Some(theme)
    }

    pub fn named(name: &str) -> Result<Theme, ThemeError> {
        Theme::builtin(name).ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }

    /// Replace a single color role, e.g. `("errcol", "#ff0000")`
    pub fn set(&mut self, role: &str, value: &str) -> Result<(), ThemeError> {
        let (role, slot) = match role {
            "bgcol" => ("bgcol", &mut self.bgcol),
            "fgcol" => ("fgcol", &mut self.fgcol),
            "hicol" => ("hicol", &mut self.hicol),
            "hicol2" => ("hicol2", &mut self.hicol2),
            "hicol3" => ("hicol3", &mut self.hicol3),
            "errcol" => ("errcol", &mut self.errcol),
            _ => return Ok(()),
        };
        *slot = parse_color(role, value)?;
        Ok(())
    }
}

/// Accepts `#rrggbb`, color names and `default`
pub fn parse_color(role: &'static str, value: &str) -> Result<Color, ThemeError> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("default") {
        return Ok(Color::Reset);
    }
    Color::from_str(value).map_err(|_| ThemeError::InvalidColor {
        role,
        value: value.to_string(),
    })
}
