//! View names and name parsing.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One screen of the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewName {
    MainMenu,
    InputData,
    ViewData,
}

impl ViewName {
    pub const ALL: [ViewName; 3] = [Self::MainMenu, Self::InputData, Self::ViewData];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainMenu => "MainMenu",
            Self::InputData => "InputData",
            Self::ViewData => "ViewData",
        }
    }

    /// Human-readable title shown by presentation layers.
    pub fn title(self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::InputData => "Input data",
            Self::ViewData => "View data",
        }
    }
}

impl Display for ViewName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation failure.
///
/// Only reachable when a view is requested by string at an edge boundary;
/// typed navigation cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    UnknownView(String),
}

impl Display for NavigationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownView(name) => write!(f, "unknown view: `{name}`"),
        }
    }
}

impl Error for NavigationError {}

impl FromStr for ViewName {
    type Err = NavigationError;

    /// Accepts `MainMenu` style and `main_menu` style names.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "MainMenu" | "main_menu" => Ok(Self::MainMenu),
            "InputData" | "input_data" => Ok(Self::InputData),
            "ViewData" | "view_data" => Ok(Self::ViewData),
            other => Err(NavigationError::UnknownView(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationError, ViewName};

    #[test]
    fn parses_both_name_styles() {
        for view in ViewName::ALL {
            assert_eq!(view.as_str().parse::<ViewName>(), Ok(view));
        }
        assert_eq!("view_data".parse::<ViewName>(), Ok(ViewName::ViewData));
    }

    #[test]
    fn rejects_unregistered_name() {
        assert_eq!(
            "MainMenuFrame".parse::<ViewName>(),
            Err(NavigationError::UnknownView("MainMenuFrame".to_string()))
        );
    }
}
