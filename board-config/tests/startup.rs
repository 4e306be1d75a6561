//! Startup and save sequences over the board option table

use board_config::cmdline::join_args;
use board_config::frontend::BoardHost;
use board_config::startup::{self, BoardEngine};
use board_config::{AppData, ConfigError, Dialect, EngineConfig, ParseMode};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn engine_in(dir: &Path, dialect: Dialect) -> BoardEngine {
    let config = EngineConfig::default()
        .with_settings_file(dir.join("boardrc").to_string_lossy().into_owned())
        .with_dialect(dialect);
    startup::board_engine(BoardHost::new(dir), config).unwrap()
}

fn start(engine: &BoardEngine, args: &[&str]) -> (AppData, startup::Startup) {
    let mut state = AppData::default();
    let started =
        startup::init_app_data(engine, &mut state, &join_args(args), ParseMode::Lenient).unwrap();
    (state, started)
}

fn settings_text(engine: &BoardEngine, state: &AppData) -> String {
    let mut out = Vec::new();
    engine
        .write_settings(&startup::settings_snapshot(state), &mut out)
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_defaults_without_settings_file() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, started) = start(&engine, &[]);

    assert!(!started.settings_loaded);
    assert!(started.report.is_clean());
    assert_eq!(state.time_control, "5");
    assert_eq!(state.moves_per_session, 40);
    assert_eq!(state.time_increment, -1.0);
    assert_eq!(state.first_chess_program, "fairymax");
    assert_eq!(state.second_chess_program, "fairymax");
    assert_eq!(state.colors[2], "#C8C365");
    assert!(state.save_settings_on_exit);
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let (mut state, _) = start(
        &engine,
        &["-tc", "10", "-mps", "30", "-lsc", "#112233", "-debug", "-sgf", "my games.pgn"],
    );
    assert!(state.debug_mode);
    let path = startup::save_settings(&engine, &mut state).unwrap();
    assert_eq!(path, dir.path().join("boardrc"));
    assert!(state.save_date > 0);

    let (reloaded, started) = start(&engine, &[]);
    assert!(started.settings_loaded);
    assert_eq!(started.report.files, vec![path]);
    assert_eq!(reloaded.time_control, "10");
    assert_eq!(reloaded.moves_per_session, 30);
    assert_eq!(reloaded.colors[2], "#112233");
    assert_eq!(reloaded.save_game_file, "my games.pgn");
    assert_eq!(reloaded.save_date, state.save_date);
    // Not persisted
    assert!(!reloaded.debug_mode);
}

#[test]
fn test_increment_saved_as_negative_moves() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let (mut state, _) = start(&engine, &["-inc", "2"]);
    assert_eq!(state.time_increment, 2.0);
    assert!(settings_text(&engine, &state).contains("\n-movesPerSession -2000\n"));

    startup::save_settings(&engine, &mut state).unwrap();
    let (reloaded, _) = start(&engine, &[]);
    assert_eq!(reloaded.time_increment, 2.0);
    assert_eq!(reloaded.moves_per_session, 40);
}

#[test]
fn test_persist_flag_controls_output() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &[]);
    let text = settings_text(&engine, &state);

    assert!(text.starts_with(";\n; board "));
    assert!(text.contains("\n-timeControl \"5\"\n"));
    assert!(text.contains("\n-lightSquareColor #C8C365\n"));
    assert!(text.contains("\n-saveSettingsOnExit true\n"));
    assert!(!text.contains("-debugMode"));
    assert!(!text.contains("-firstChessProgram "));
    assert!(!text.contains("-settingsFile"));
}

#[test]
fn test_windows_dialect() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Windows);
    let (state, _) = start(&engine, &["/tc=9", "-mps", "20"]);

    assert_eq!(state.time_control, "9");
    assert_eq!(state.moves_per_session, 20);
    assert!(settings_text(&engine, &state).contains("\n/timeControl=\"9\"\n"));
}

#[test]
fn test_positional_game_file_enters_viewer() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &["my game.pgn"]);

    assert_eq!(state.load_game_file, "my game.pgn");
    assert!(state.viewer);
    // Default viewer options
    assert!(state.no_chess_program);
    assert!(!state.save_settings_on_exit);
    assert!(!state.chess_program);
}

#[test]
fn test_positional_inference_by_suffix() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let (state, _) = start(&engine, &["/tmp/club.trn"]);
    assert_eq!(state.tourney_file, "/tmp/club.trn");
    assert!(state.tourney);
    assert!(state.match_mode);
    assert!(state.load_game_file.is_empty());

    let (state, _) = start(&engine, &["start.fen"]);
    assert_eq!(state.load_position_file, "start.fen");
    assert!(state.viewer);
}

#[test]
fn test_positional_engine_nickname() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(
        &engine,
        &["-firstChessProgramNames", "\"Fruit 2.1\" -fcp fruit\ncrafty\n", "crafty"],
    );

    assert_eq!(state.engine_nickname, "crafty");
    assert!(!state.viewer);
}

#[test]
fn test_positional_settings_file() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let theme = dir.path().join("theme.xop");
    std::fs::write(&theme, "-lsc #010203\n-dsc #040506\n").unwrap();

    let (state, started) = start(&engine, &[theme.to_str().unwrap()]);
    assert_eq!(state.colors[2], "#010203");
    assert_eq!(state.colors[3], "#040506");
    assert!(started.report.files.contains(&theme));
    assert!(!state.viewer);
}

#[test]
fn test_indirection_file() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let opts = dir.path().join("match.txt");
    std::fs::write(&opts, "; match setup\r\n-tc 12\r\n-mg {4}\r\n").unwrap();

    let line = format!("@\"{}\" -mps 50", opts.display());
    let mut state = AppData::default();
    let started = startup::init_app_data(&engine, &mut state, &line, ParseMode::Strict).unwrap();

    assert_eq!(state.time_control, "12");
    assert_eq!(state.match_games, 4);
    assert_eq!(state.moves_per_session, 50);
    assert!(state.chess_program);
    assert!(started.report.files.contains(&opts));
}

#[test]
fn test_missing_indirection_is_fatal() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let missing: PathBuf = dir.path().join("nowhere");

    let mut state = AppData::default();
    let line = format!("@{}", missing.display());
    let err = startup::init_app_data(&engine, &mut state, &line, ParseMode::Lenient).unwrap_err();
    assert!(matches!(err, ConfigError::IndirectionOpenFailed(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_unknown_options() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    // Skipping runs to the end of the line
    let mut state = AppData::default();
    let started =
        startup::init_app_data(&engine, &mut state, "-bogus 5 -mps 9\n-tc 7", ParseMode::Lenient)
            .unwrap();
    assert_eq!(state.time_control, "7");
    assert_eq!(state.moves_per_session, 40);
    assert_eq!(started.report.unrecognized, vec!["-bogus".to_string()]);

    let mut state = AppData::default();
    let err = startup::init_app_data(&engine, &mut state, "-bogus 5", ParseMode::Strict).unwrap_err();
    assert!(matches!(err, ConfigError::UnrecognizedOption(ref name) if name == "-bogus"));
}

#[test]
fn test_settings_file_tolerates_unknown_in_strict_mode() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    std::fs::write(dir.path().join("boardrc"), "-retired 1\n-tc 3\n").unwrap();

    let mut state = AppData::default();
    let started = startup::init_app_data(&engine, &mut state, "", ParseMode::Strict).unwrap();
    assert_eq!(state.time_control, "3");
    assert_eq!(started.report.unrecognized, vec!["-retired".to_string()]);
}

#[test]
fn test_bad_values() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let mut state = AppData::default();
    let err = startup::init_app_data(&engine, &mut state, "-mps 4a", ParseMode::Lenient).unwrap_err();
    assert!(matches!(err, ConfigError::BadInteger(ref v) if v == "4a"));

    let err = startup::init_app_data(&engine, &mut state, "-clockMode maybe", ParseMode::Lenient)
        .unwrap_err();
    assert!(matches!(err, ConfigError::BadBoolean(_)));

    let err = startup::init_app_data(&engine, &mut state, "-tc", ParseMode::Lenient).unwrap_err();
    assert!(matches!(err, ConfigError::MissingValue(ref o) if o == "-tc"));
}

#[test]
fn test_engine_options_split_off() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &["-fcp", "fruit WBopt -tc 3"]);

    assert_eq!(state.first_chess_program, "fruit");
    assert_eq!(state.second_chess_program, "fruit");
    assert_eq!(state.time_control, "3");
}

#[test]
fn test_uci_flavor_switch() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &["-fUCCI", "-sUCI"]);

    assert_eq!(state.first_uci_flavor, 2);
    assert_eq!(state.second_uci_flavor, 0);
    assert!(state.second_is_uci);
}

#[test]
fn test_install_engine_accumulates() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(
        &engine,
        &["-installEngine", "crafty", "-installEngine", "gnuchess", "-installEngine", "crafty"],
    );

    assert_eq!(state.first_chess_program_names, "crafty\ngnuchess\n");
}

#[test]
fn test_auto_close_saves_and_exits() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (_, started) = start(&engine, &["-tc", "15", "-autoClose"]);

    assert!(started.exit_requested);
    let saved = std::fs::read_to_string(dir.path().join("boardrc")).unwrap();
    assert!(saved.contains("\n-timeControl \"15\"\n"));
}

#[test]
fn test_window_offsets_follow_main_window() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &["-x", "100", "-y", "50", "-icsX", "20", "-icsY", "-10"]);

    assert_eq!(state.console.x, 120);
    assert_eq!(state.console.y, 40);
    let text = settings_text(&engine, &state);
    assert!(text.contains("\n-icsX 20\n"));
    assert!(text.contains("\n-icsY -10\n"));
}

#[test]
fn test_value_lookup_and_placeholders() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);
    let (state, _) = start(&engine, &["-tc", "40/5", "-mps", "25"]);

    assert_eq!(engine.value_text(&state, "timeControl").as_deref(), Some("40/5"));
    assert_eq!(engine.value_text(&state, "mps").as_deref(), Some("25"));
    assert_eq!(engine.value_text(&state, "lightSquareColor"), None);
    assert_eq!(
        engine.expand_placeholders(&state, "%tc% in %mps%, %nope% 100%%"),
        "40/5 in 25, %nope% 100%%"
    );
}

#[test]
fn test_install_skipped_after_later_save() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    std::fs::write(
        dir.path().join("boardrc"),
        "-saveDate 2000000000\n-date 100\n-installEngine {crafty}\n",
    )
    .unwrap();
    let (state, _) = start(&engine, &[]);
    assert_eq!(state.first_chess_program_names, "");

    std::fs::write(
        dir.path().join("boardrc"),
        "-saveDate 2000000000\n-date 2100000000\n-installEngine {crafty}\n",
    )
    .unwrap();
    let (state, _) = start(&engine, &[]);
    assert_eq!(state.first_chess_program_names, "crafty\n");
}

#[test]
fn test_font_survives_save() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let (mut state, _) = start(&engine, &["-clockFont", "Serif 30"]);
    assert!(settings_text(&engine, &state).contains("\n-clockFont \"Serif 30\"\n"));
    startup::save_settings(&engine, &mut state).unwrap();

    let (reloaded, _) = start(&engine, &[]);
    assert_eq!(reloaded.fonts[0].current, "Serif 30");
}

#[test]
fn test_font_saved_for_board_size() {
    let dir = TempDir::new().unwrap();
    let engine = engine_in(dir.path(), Dialect::Unix);

    let (mut state, _) = start(&engine, &["-size", "Medium", "-clockFont", "Serif 30"]);
    assert_eq!(state.square_size, 64);
    assert!(settings_text(&engine, &state).contains("\n-clockFont \"size64:Serif 30\"\n"));
    startup::save_settings(&engine, &mut state).unwrap();

    let (reloaded, _) = start(&engine, &[]);
    assert_eq!(reloaded.board_size, "Medium");
    assert_eq!(reloaded.square_size, 64);
    assert_eq!(reloaded.fonts[0].by_size.get(&64).map(String::as_str), Some("Serif 30"));
}
