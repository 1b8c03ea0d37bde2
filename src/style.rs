//! Visual intents for painted text.
//!
//! A [`Style`] only names *how* text should look. Terminals decide which actual
//! colors back each intent; [`Style::to_console`] is the mapping used by
//! [`ConsoleTerminal`](crate::terminal::ConsoleTerminal).

use serde::{Deserialize, Serialize};

/// Closed palette for [`Style::Custom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// 256-color palette index.
    Fixed(u8),
}

impl Color {
    fn to_console(self) -> console::Color {
        match self {
            Color::Black => console::Color::Black,
            Color::Red => console::Color::Red,
            Color::Green => console::Color::Green,
            Color::Yellow => console::Color::Yellow,
            Color::Blue => console::Color::Blue,
            Color::Magenta => console::Color::Magenta,
            Color::Cyan => console::Color::Cyan,
            Color::White => console::Color::White,
            Color::Fixed(index) => console::Color::Color256(index),
        }
    }
}

/// Semantic style tag attached to every piece of output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Plain,
    Success,
    Info,
    Warning,
    Error,
    Custom(Color),
}

impl Style {
    /// Map the intent onto a `console` style.
    pub fn to_console(self) -> console::Style {
        let base = console::Style::new();
        match self {
            Style::Plain => base,
            Style::Success => base.green(),
            Style::Info => base.cyan(),
            Style::Warning => base.yellow(),
            Style::Error => base.red(),
            Style::Custom(color) => base.fg(color.to_console()),
        }
    }
}
