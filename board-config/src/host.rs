//! Collaborator hooks the engine calls out to
//!
//! The engine never interprets colors, fonts, board sizes, port settings or
//! text attributes. It routes those values to a [`Host`], which owns their
//! representation inside the state `S`, and asks the same host to render them
//! back when settings are saved.

use crate::Result;
use std::path::{Path, PathBuf};

/// Services supplied by the application embedding the engine
///
/// Every method has a neutral default, so a host only implements the hooks
/// its option table actually uses.
pub trait Host<S> {
    /// Installation data directory substituted for a leading `~~`
    fn data_dir(&self) -> Option<&str> {
        None
    }

    /// Resolve a settings or indirection file name to a path
    fn search_path(&self, name: &str) -> PathBuf {
        resolve_path(None, name)
    }

    /// Whether `name` is the nickname of a configured engine
    fn is_engine_nickname(&self, _state: &S, _name: &str) -> bool {
        false
    }

    fn parse_color(&self, _state: &mut S, _index: usize, _value: &str) -> Result<()> {
        Ok(())
    }

    fn color_text(&self, _state: &S, _index: usize) -> Option<String> {
        None
    }

    fn parse_text_attribs(&self, _state: &mut S, _index: usize, _value: &str) -> Result<()> {
        Ok(())
    }

    fn text_attribs_text(&self, _state: &S, _index: usize) -> Option<String> {
        None
    }

    fn parse_font(&self, _state: &mut S, _index: usize, _value: &str) -> Result<()> {
        Ok(())
    }

    /// One value per line to emit; fonts may be saved once per board size
    fn font_texts(&self, _state: &S, _index: usize) -> Vec<String> {
        Vec::new()
    }

    fn parse_board_size(&self, _state: &mut S, _value: &str) -> Result<()> {
        Ok(())
    }

    fn board_size_text(&self, _state: &S) -> Option<String> {
        None
    }

    fn parse_comm_settings(&self, _state: &mut S, _value: &str) -> Result<()> {
        Ok(())
    }

    fn comm_settings_text(&self, _state: &S) -> Option<String> {
        None
    }

    /// Whether an `Install` line may still be added to its list
    fn install_allowed(&self, _state: &S) -> bool {
        true
    }

    /// Called after a `Z` option moved the placement bounds
    fn ensure_on_screen(&self, _state: &mut S) {}
}

/// Host with every hook left at its default
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl<S> Host<S> for NoHooks {}

/// Resolve `name` the way settings files are searched for
///
/// Leading whitespace is dropped, `~/` expands to the home directory,
/// absolute paths are kept, and anything else is taken relative to `base`
/// (or the working directory without one).
pub fn resolve_path(base: Option<&Path>, name: &str) -> PathBuf {
    let name = name.trim_start();

    if let Some(rest) = name.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    match base {
        Some(base) => base.join(path),
        None => path.to_path_buf(),
    }
}
