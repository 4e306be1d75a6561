//! Collaborator hooks of the board application

use crate::appdata::{AppData, FontSetting, CW_USEDEFAULT};
use crate::host::{resolve_path, Host};
use crate::{ConfigError, Result};
use std::path::PathBuf;
use tracing::warn;

/// Host hooks backed by [`AppData`]
#[derive(Debug, Clone)]
pub struct BoardHost {
    install_dir: PathBuf,
    data_dir: Option<String>,
}

impl BoardHost {
    /// Relative settings names resolve against `install_dir`
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.into(),
            data_dir: None,
        }
    }

    /// Directory substituted for a leading `~~` in text options
    pub fn with_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

impl Default for BoardHost {
    fn default() -> Self {
        Self::new(".")
    }
}

fn slot<'a, T>(items: &'a mut [T], index: usize, what: &str) -> Result<&'a mut T> {
    items
        .get_mut(index)
        .ok_or_else(|| ConfigError::Schema(format!("{} index {} out of range", what, index)))
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Nicknames in an engine list, one per non-empty line
///
/// The nickname is the leading double-quoted text of a line, or its first
/// word when the line does not start with a quote.
pub fn engine_nicknames(list: &str) -> impl Iterator<Item = &str> {
    list.lines().filter_map(|line| {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix('"') {
            rest.split('"').next()
        } else {
            line.split_whitespace().next()
        }
    })
}

/// Named board sizes and their square size in pixels
pub const BOARD_SIZES: [(&str, i32); 18] = [
    ("Titanic", 129),
    ("Colossal", 116),
    ("Giant", 108),
    ("Huge", 95),
    ("Big", 87),
    ("Large", 80),
    ("Bulky", 72),
    ("Medium", 64),
    ("Moderate", 58),
    ("Average", 54),
    ("Middling", 49),
    ("Mediocre", 45),
    ("Small", 40),
    ("Slim", 37),
    ("Petite", 33),
    ("Dinky", 29),
    ("Teeny", 25),
    ("Tiny", 21),
];

/// Square size of a board-size value
///
/// A value starting with a digit gives the size directly, as the first of
/// its comma-separated numbers. Otherwise it names a size, in any case.
pub fn square_size(board_size: &str) -> Option<i32> {
    if board_size.starts_with(|c: char| c.is_ascii_digit()) {
        let digits: String = board_size
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        return digits.parse().ok();
    }
    BOARD_SIZES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(board_size))
        .map(|&(_, size)| size)
}

fn is_standard_size(size: i32) -> bool {
    BOARD_SIZES.iter().any(|&(_, s)| s == size)
}

/// Split a `sizeN:name` font value into its square size and name
fn sized_font(value: &str) -> Option<(i32, &str)> {
    let (size, name) = value.strip_prefix("size")?.split_once(':')?;
    size.parse().ok().map(|size| (size, name))
}

impl Host<AppData> for BoardHost {
    fn data_dir(&self) -> Option<&str> {
        self.data_dir.as_deref()
    }

    fn search_path(&self, name: &str) -> PathBuf {
        resolve_path(Some(&self.install_dir), name)
    }

    fn is_engine_nickname(&self, state: &AppData, name: &str) -> bool {
        engine_nicknames(&state.first_chess_program_names).any(|nick| nick == name)
    }

    /// Only `#RRGGBB` style values are taken; names are left to the GUI
    fn parse_color(&self, state: &mut AppData, index: usize, value: &str) -> Result<()> {
        let color = slot(&mut state.colors, index, "color")?;
        if value.starts_with('#') {
            *color = value.to_string();
        } else {
            warn!("Ignoring color {} for color {}", value, index);
        }
        Ok(())
    }

    fn color_text(&self, state: &AppData, index: usize) -> Option<String> {
        state.colors.get(index).and_then(|c| non_empty(c))
    }

    fn parse_text_attribs(&self, state: &mut AppData, index: usize, value: &str) -> Result<()> {
        *slot(&mut state.text_attribs, index, "text class")? = value.to_string();
        Ok(())
    }

    fn text_attribs_text(&self, state: &AppData, index: usize) -> Option<String> {
        state.text_attribs.get(index).and_then(|a| non_empty(a))
    }

    /// `sizeN:name` remembers a font for square size N, anything else
    /// replaces the font in use
    fn parse_font(&self, state: &mut AppData, index: usize, value: &str) -> Result<()> {
        let font = slot(&mut state.fonts, index, "font")?;
        match sized_font(value) {
            Some((size, name)) if size >= 0 => {
                font.by_size.insert(size, name.to_string());
            }
            Some(_) => {
                return Err(ConfigError::Hook {
                    option: format!("font {}", index),
                    message: format!("negative square size in {}", value),
                })
            }
            None => font.current = value.to_string(),
        }
        Ok(())
    }

    /// Every remembered size, the font in use counting for the current size
    ///
    /// Off the standard sizes the font in use is written as a plain name.
    fn font_texts(&self, state: &AppData, index: usize) -> Vec<String> {
        let Some(FontSetting { current, by_size }) = state.fonts.get(index) else {
            return Vec::new();
        };

        let mut texts = Vec::new();
        let mut table = by_size.clone();
        if !current.is_empty() {
            if is_standard_size(state.square_size) {
                table.insert(state.square_size, current.clone());
            } else {
                texts.push(current.clone());
            }
        }
        texts.extend(
            table
                .iter()
                .map(|(size, name)| format!("size{}:{}", size, name)),
        );
        texts
    }

    fn parse_board_size(&self, state: &mut AppData, value: &str) -> Result<()> {
        let size = square_size(value).ok_or_else(|| ConfigError::Hook {
            option: "boardSize".to_string(),
            message: format!("unrecognized board size {}", value),
        })?;
        state.board_size = value.to_string();
        state.square_size = size;
        Ok(())
    }

    fn board_size_text(&self, state: &AppData) -> Option<String> {
        non_empty(&state.board_size)
    }

    fn parse_comm_settings(&self, state: &mut AppData, value: &str) -> Result<()> {
        state.comm_port_settings = value.to_string();
        Ok(())
    }

    fn comm_settings_text(&self, state: &AppData) -> Option<String> {
        non_empty(&state.comm_port_settings)
    }

    /// Engines installed before the last save are not installed again
    fn install_allowed(&self, state: &AppData) -> bool {
        state.save_date == 0 || state.date_stamp > state.save_date
    }

    fn ensure_on_screen(&self, state: &mut AppData) {
        let main = &mut state.main_window;
        if main.x != CW_USEDEFAULT && main.x < state.min_x {
            main.x = state.min_x;
        }
        if main.y != CW_USEDEFAULT && main.y < state.min_y {
            main.y = state.min_y;
        }
    }
}
