//! Startup and save sequences of the board application

use crate::appdata::{
    AppData, CLOCK_FONT, COMMENT_FONT, CONSOLE_FONT, COORD_FONT, GAMELIST_FONT, HISTORY_FONT,
    INCREMENT_UNSET, MESSAGE_FONT, TAGS_FONT,
};
use crate::config::EngineConfig;
use crate::engine::OptionEngine;
use crate::frontend::BoardHost;
use crate::lens;
use crate::options::{board_schema, ENGINE_OPTION_MARKER};
use crate::parser::{ParseMode, ParseReport};
use crate::Result;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub type BoardEngine = OptionEngine<AppData, BoardHost>;

/// Moves per session when none or an invalid count is given
pub const MOVES_PER_SESSION: i32 = 40;

const FONT_DEFAULTS: [(usize, &str); 8] = [
    (CLOCK_FONT, "Sans Bold 20"),
    (MESSAGE_FONT, "Sans Bold 9"),
    (COORD_FONT, "Sans Bold 10"),
    (CONSOLE_FONT, "Monospace 10"),
    (TAGS_FONT, "Sans 9"),
    (COMMENT_FONT, "Sans 9"),
    (HISTORY_FONT, "Sans 9"),
    (GAMELIST_FONT, "Sans 9"),
];

/// Engine over the board option table
pub fn board_engine(host: BoardHost, config: EngineConfig) -> Result<BoardEngine> {
    Ok(OptionEngine::new(board_schema()?, host).with_config(config))
}

/// Outcome of [`init_app_data`]
#[derive(Debug, Clone, Default)]
pub struct Startup {
    /// Unrecognized options and files read, across every source
    pub report: ParseReport,
    pub settings_loaded: bool,
    /// `-autoClose` was given; settings were saved if asked for
    pub exit_requested: bool,
}

/// Populate `state` from defaults, the settings file and the command line
///
/// Sources are applied in increasing priority: table defaults, the
/// settings file, `command_line`, the viewer or tourney option strings,
/// then options embedded in the engine command lines. `mode` applies to
/// every source except the settings file, which always tolerates unknown
/// entries.
pub fn init_app_data(
    engine: &BoardEngine,
    state: &mut AppData,
    command_line: &str,
    mode: ParseMode,
) -> Result<Startup> {
    let mut startup = Startup::default();

    engine.apply_defaults(state)?;
    state.settings_file_name = engine.config().settings_file.clone();
    state.time_increment = INCREMENT_UNSET;
    for (index, name) in FONT_DEFAULTS {
        state.fonts[index].current = name.to_string();
    }

    let settings = state.settings_file_name.clone();
    if let Some(report) = engine.load_settings_file(
        state,
        &settings,
        Some(lens!(AppData, settings_file_name)),
        ParseMode::Lenient,
    )? {
        startup.settings_loaded = true;
        startup.report.merge(report);
    }

    startup.report.merge(engine.parse_str(state, command_line, mode)?);

    if state.viewer && !state.viewer_options.is_empty() {
        let options = state.viewer_options.clone();
        startup.report.merge(engine.parse_str(state, &options, mode)?);
    }
    if state.tourney && !state.tourney_options.is_empty() {
        let options = state.tourney_options.clone();
        startup.report.merge(engine.parse_str(state, &options, mode)?);
    }

    if state.second_chess_program.is_empty() {
        state.second_chess_program = state.first_chess_program.clone();
    }

    for which in ["first", "second"] {
        let program = match which {
            "first" => &mut state.first_chess_program,
            _ => &mut state.second_chess_program,
        };
        if let Some(options) = split_engine_options(program, which) {
            debug!("Applying {} engine options: {}", which, options);
            startup.report.merge(engine.parse_str(state, &options, mode)?);
        }
    }

    derive_time_control(state);
    if state.match_mode || state.match_games > 0 {
        state.chess_program = true;
    }
    if state.ics_active || state.no_chess_program {
        state.chess_program = false;
    }

    if state.auto_close {
        if state.save_settings_on_exit {
            save_settings(engine, state)?;
        }
        startup.exit_requested = true;
    }

    Ok(startup)
}

/// Cut board options off an engine command line
///
/// Everything after the marker (and the character following it) is
/// returned with `%s` replaced by `which`; the command line keeps what
/// precedes the character before the marker.
pub fn split_engine_options(program: &mut String, which: &str) -> Option<String> {
    let pos = program.find(ENGINE_OPTION_MARKER)?;

    let mut tail = program[pos + ENGINE_OPTION_MARKER.len()..].chars();
    tail.next();
    let options = substitute_engine(tail.as_str(), which);

    let mut head = program[..pos].chars();
    head.next_back();
    let cut = head.as_str().len();
    program.truncate(cut);

    Some(options)
}

/// Replace `%s` with `which`; `%%` stands for a literal `%`
fn substitute_engine(text: &str, which: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                out.push_str(which);
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Resolve the combined moves-per-session/increment encoding
///
/// Without an explicit increment, a non-positive moves-per-session count
/// stores one in thousandths; otherwise there is no increment.
pub fn derive_time_control(state: &mut AppData) {
    if state.time_increment == INCREMENT_UNSET {
        state.time_increment = if state.moves_per_session <= 0 {
            -(state.moves_per_session as f32) / 1000.0
        } else {
            -1.0
        };
    }
    if state.moves_per_session <= 0 {
        state.moves_per_session = MOVES_PER_SESSION;
    }
}

/// Stamp the save date and write the settings file
///
/// An increment in use is stored as a negative moves-per-session count;
/// `state` itself keeps its count.
pub fn save_settings(engine: &BoardEngine, state: &mut AppData) -> Result<PathBuf> {
    state.save_date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i32::try_from(d.as_secs()).unwrap_or(i32::MAX))
        .unwrap_or(0);

    let snapshot = settings_snapshot(state);
    let path = engine.save_settings(&snapshot, &state.settings_file_name)?;
    info!("Settings saved to {}", path.display());
    Ok(path)
}

/// Copy of `state` as it is written to the settings file
pub fn settings_snapshot(state: &AppData) -> AppData {
    let mut snapshot = state.clone();
    if snapshot.time_increment >= 0.0 {
        snapshot.moves_per_session = (-1000.0 * snapshot.time_increment) as i32;
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_engine_options() {
        let mut program = "fruit WBopt -%sTimeOdds 2".to_string();
        let options = split_engine_options(&mut program, "first").unwrap();
        assert_eq!(options, "-firstTimeOdds 2");
        assert_eq!(program, "fruit");

        let mut program = "fruit WBopt -%sOptions {Hash=64,Load=100%%,%%s}".to_string();
        let options = split_engine_options(&mut program, "second").unwrap();
        assert_eq!(options, "-secondOptions {Hash=64,Load=100%,%s}");

        let mut plain = "crafty".to_string();
        assert!(split_engine_options(&mut plain, "second").is_none());
        assert_eq!(plain, "crafty");
    }

    #[test]
    fn test_derive_time_control() {
        let mut state = AppData {
            time_increment: INCREMENT_UNSET,
            moves_per_session: -2000,
            ..Default::default()
        };
        derive_time_control(&mut state);
        assert_eq!(state.time_increment, 2.0);
        assert_eq!(state.moves_per_session, MOVES_PER_SESSION);

        let mut state = AppData {
            time_increment: INCREMENT_UNSET,
            moves_per_session: 30,
            ..Default::default()
        };
        derive_time_control(&mut state);
        assert_eq!(state.time_increment, -1.0);
        assert_eq!(state.moves_per_session, 30);
    }

    #[test]
    fn test_snapshot_encodes_increment() {
        let state = AppData {
            time_increment: 2.0,
            moves_per_session: 40,
            ..Default::default()
        };
        let snapshot = settings_snapshot(&state);
        assert_eq!(snapshot.moves_per_session, -2000);
        assert_eq!(state.moves_per_session, 40);

        let state = AppData {
            time_increment: -1.0,
            moves_per_session: 40,
            ..Default::default()
        };
        assert_eq!(settings_snapshot(&state).moves_per_session, 40);
    }
}
