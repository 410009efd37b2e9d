use std::fmt;
use std::str::FromStr;
use std::{error::Error, path::Path};
use toml::Value;
use tui::style::{Color, Modifier, Style, Stylize};

#[derive(Debug)]
pub struct ParseThemeError;

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error parsing theme")
    }
}

impl Error for ParseThemeError {}

fn make_color(c: &str) -> Color {
    if let Ok(c) = colorsys::Rgb::from_hex_str(c) {
        Color::Rgb(c.red() as u8, c.green() as u8, c.blue() as u8)
    } else {
        Color::Reset
    }
}

/// Light/dark selection, persisted as a plain string preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub fn flipped(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Mode::Light => Theme::light(),
            Mode::Dark => Theme::dark(),
        }
    }
}

impl FromStr for Mode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            _ => Err(ParseThemeError),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal stand-in for the OS color-scheme query: COLORFGBG is "fg;bg",
/// where background 7 or 15 indicates a light terminal.
pub fn system_mode() -> Option<Mode> {
    mode_from_colorfgbg(&std::env::var("COLORFGBG").ok()?)
}

fn mode_from_colorfgbg(value: &str) -> Option<Mode> {
    let bg = value.rsplit(';').next()?;
    match bg.trim().parse::<u8>().ok()? {
        7 | 15 => Some(Mode::Light),
        _ => Some(Mode::Dark),
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    base: Style,
    overlay: Option<Style>,
    status: Option<Style>,
    selection: Option<Style>,
    selection_active: Option<Style>,
    border: Option<Style>,
    border_active: Option<Style>,
    scrollbar: Option<Style>,
    success: Option<Style>,
    error: Option<Style>,
}

impl Theme {
    pub fn base(&self) -> Style {
        self.base
    }

    pub fn overlay(&self) -> Style {
        self.overlay.unwrap_or(self.base)
    }

    pub fn status(&self) -> Style {
        self.status.unwrap_or_else(|| self.base())
    }

    pub fn selection(&self) -> Style {
        if let Some(s) = self.selection {
            s
        } else {
            self.active_selection()
        }
    }

    pub fn active_selection(&self) -> Style {
        if let Some(s) = self.selection_active {
            s
        } else {
            self.base.add_modifier(Modifier::REVERSED)
        }
    }

    pub fn border(&self) -> Style {
        if let Some(s) = self.border {
            s
        } else {
            self.active_border().add_modifier(Modifier::DIM)
        }
    }

    pub fn active_border(&self) -> Style {
        if let Some(s) = self.border_active {
            s
        } else {
            self.base
        }
    }

    pub fn scrollbar_thumb(&self) -> Style {
        match self.scrollbar.and_then(|s| s.fg) {
            Some(fg) => Style::default().fg(fg),
            None => Style::default(),
        }
    }

    pub fn scrollbar_track(&self) -> Style {
        match self.scrollbar.and_then(|s| s.bg.or(self.base.bg)) {
            Some(bg) => Style::default().fg(bg),
            None => self.base().dim(),
        }
    }

    /// Style for success-toned status text.
    pub fn success(&self) -> Style {
        self.success.unwrap_or_else(|| self.base().green())
    }

    /// Style for error-toned status text.
    pub fn error(&self) -> Style {
        self.error.unwrap_or_else(|| self.base().red())
    }

    pub fn light() -> Self {
        let paper = make_color("#f8fafc");
        let ink = make_color("#0f172a");
        let slate = make_color("#64748b");
        let sky = make_color("#0284c7");
        let green = make_color("#16a34a");
        let red = make_color("#dc2626");

        Self {
            base: Style::default().fg(ink).bg(paper),
            overlay: Some(Style::default().fg(paper).bg(slate)),
            status: Some(Style::default().fg(slate).bg(paper)),
            selection: Some(Style::default().fg(paper).bg(slate)),
            selection_active: Some(Style::default().fg(paper).bg(sky)),
            border: Some(Style::default().fg(slate)),
            border_active: Some(Style::default().fg(sky)),
            scrollbar: Some(Style::default().fg(slate).bg(paper)),
            success: Some(Style::default().fg(green).bg(paper)),
            error: Some(Style::default().fg(red).bg(paper)),
        }
    }

    pub fn dark() -> Self {
        let night = make_color("#0f172a");
        let fog = make_color("#e2e8f0");
        let slate = make_color("#64748b");
        let sky = make_color("#38bdf8");
        let green = make_color("#4ade80");
        let red = make_color("#f87171");

        Self {
            base: Style::default().fg(fog).bg(night),
            overlay: Some(Style::default().fg(night).bg(fog)),
            status: Some(Style::default().fg(slate).bg(night)),
            selection: Some(Style::default().fg(night).bg(slate)),
            selection_active: Some(Style::default().fg(night).bg(sky)),
            border: Some(Style::default().fg(slate)),
            border_active: Some(Style::default().fg(sky)),
            scrollbar: Some(Style::default().fg(slate).bg(night)),
            success: Some(Style::default().fg(green).bg(night)),
            error: Some(Style::default().fg(red).bg(night)),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Style::default(),
            overlay: None,
            status: None,
            selection: None,
            selection_active: None,
            border: None,
            border_active: None,
            scrollbar: Some(Style::default().dim()),
            success: None,
            error: None,
        }
    }
}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::default()),
            "light" => Ok(Self::light()),
            "dark" => Ok(Self::dark()),
            file => {
                if Path::new(file).exists() {
                    let contents = std::fs::read_to_string(file).or(Err(ParseThemeError))?;
                    let table = contents.parse::<Value>().or(Err(ParseThemeError))?;
                    Self::try_from(&table).or(Err(ParseThemeError))
                } else {
                    Err(ParseThemeError)
                }
            }
        }
    }
}

impl TryFrom<&toml::Value> for Theme {
    type Error = ParseThemeError;

    fn try_from(value: &toml::Value) -> Result<Self, Self::Error> {
        match value {
            toml::Value::String(name) => Self::from_str(name),
            toml::Value::Table(scheme) => {
                let style = |key: &str| scheme.get(key).and_then(|v| try_style_from_toml(v).ok());

                Ok(Self {
                    base: style("base").unwrap_or_default(),
                    overlay: style("overlay"),
                    status: style("status"),
                    selection: style("selection"),
                    selection_active: style("selection_active"),
                    border: style("border"),
                    border_active: style("border_active"),
                    scrollbar: style("scrollbar"),
                    success: style("success"),
                    error: style("error"),
                })
            }
            _ => Err(ParseThemeError),
        }
    }
}

fn try_style_from_toml(value: &toml::Value) -> Result<Style, ParseThemeError> {
    match value {
        toml::Value::String(name) => match name.to_lowercase().as_str() {
            "black" => Ok(Style::default().black()),
            "red" => Ok(Style::default().red()),
            "green" => Ok(Style::default().green()),
            "yellow" => Ok(Style::default().yellow()),
            "blue" => Ok(Style::default().blue()),
            "magenta" => Ok(Style::default().magenta()),
            "cyan" => Ok(Style::default().cyan()),
            "gray" => Ok(Style::default().gray()),
            "lightblack" | "darkgray" => Ok(Style::default().dark_gray()),
            "lightred" => Ok(Style::default().light_red()),
            "lightgreen" => Ok(Style::default().light_green()),
            "lightyellow" => Ok(Style::default().light_yellow()),
            "lightblue" => Ok(Style::default().light_blue()),
            "lightmagenta" => Ok(Style::default().light_magenta()),
            "lightcyan" => Ok(Style::default().light_cyan()),
            "white" => Ok(Style::default().white()),
            hex if hex.starts_with('#') => Ok(Style::default().fg(make_color(hex))),
            _ => Err(ParseThemeError),
        },

        toml::Value::Table(record) => {
            let style = record
                .get("fg")
                .and_then(|v| try_style_from_toml(v).ok())
                .unwrap_or_default();

            match record
                .get("bg")
                .and_then(|v| try_style_from_toml(v).ok())
                .and_then(|s| s.fg)
            {
                Some(bg) => Ok(style.bg(bg)),
                None => Ok(style),
            }
        }

        _ => Err(ParseThemeError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        assert_eq!(Mode::from_str("light").unwrap(), Mode::Light);
        assert_eq!(Mode::from_str("dark").unwrap(), Mode::Dark);
        assert_eq!(Mode::Dark.as_str(), "dark");
        assert!(Mode::from_str("sepia").is_err());
    }

    #[test]
    fn mode_flips() {
        assert_eq!(Mode::Light.flipped(), Mode::Dark);
        assert_eq!(Mode::Dark.flipped(), Mode::Light);
    }

    #[test]
    fn colorfgbg_heuristic() {
        assert_eq!(mode_from_colorfgbg("15;0"), Some(Mode::Dark));
        assert_eq!(mode_from_colorfgbg("0;15"), Some(Mode::Light));
        assert_eq!(mode_from_colorfgbg("0;default;7"), Some(Mode::Light));
        assert_eq!(mode_from_colorfgbg("garbage"), None);
    }

    #[test]
    fn named_themes_parse() {
        assert!(Theme::from_str("light").is_ok());
        assert!(Theme::from_str("dark").is_ok());
        assert!(Theme::from_str("no-such-theme").is_err());
    }

    #[test]
    fn custom_theme_from_toml_table() {
        let table = r##"
            base = { fg = "#e2e8f0", bg = "#0f172a" }
            border_active = "cyan"
            error = "red"
        "##
        .parse::<Value>()
        .unwrap();

        let theme = Theme::try_from(&table).unwrap();
        assert_eq!(theme.base().fg, Some(make_color("#e2e8f0")));
        assert_eq!(theme.base().bg, Some(make_color("#0f172a")));
        assert_eq!(theme.active_border(), Style::default().cyan());
    }

    #[test]
    fn fallbacks_layer_over_base() {
        let theme = Theme::default();
        assert_eq!(theme.overlay(), theme.base());
        assert_eq!(
            theme.active_selection(),
            Style::default().add_modifier(Modifier::REVERSED)
        );
    }
}
