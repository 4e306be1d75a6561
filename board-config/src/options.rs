//! Option table of the board application
//!
//! Table order matters twice: the first entry of a name wins lookups, and
//! serialization follows it. Aliases directly follow the option they stand
//! in for. Window placements come last, main window first, so auxiliary
//! windows are stored relative to an origin that is already known when the
//! file is read back.

use crate::appdata::{
    AppData, CLOCK_FONT, COMMENT_FONT, CONSOLE_FONT, COORD_FONT, CW_USEDEFAULT, GAMELIST_FONT,
    HISTORY_FONT, MESSAGE_FONT, TAGS_FONT,
};
use crate::config::SETTINGS_FILE;
use crate::inference::Matcher;
use crate::lens;
use crate::schema::{OptionDescriptor, OptionKind, Schema};
use crate::Result;

type K = OptionKind<AppData>;

pub const DEFAULT_VIEWER_OPTIONS: &str = "-ncp -engineOutputUp false -saveSettingsOnExit false";
pub const DEFAULT_TOURNEY_OPTIONS: &str = "-ncp -mm -saveSettingsOnExit false";

/// Marker in an engine command line after which board options follow
pub const ENGINE_OPTION_MARKER: &str = "WBopt";

fn opt(name: &'static str, kind: K) -> OptionDescriptor<AppData> {
    OptionDescriptor::new(name, kind)
}

fn alias(name: &'static str, kind: K) -> OptionDescriptor<AppData> {
    OptionDescriptor::alias(name, kind)
}

fn main_x() -> crate::schema::Lens<AppData, i32> {
    lens!(AppData, main_window.x)
}

fn main_y() -> crate::schema::Lens<AppData, i32> {
    lens!(AppData, main_window.y)
}

/// Build the board application's option schema
pub fn board_schema() -> Result<Schema<AppData>> {
    Schema::builder()
        // Targets of positional arguments
        .option(opt("opt", K::SettingsFilename(None)).hidden())
        .option(opt("loadPositionFile", K::Filename(lens!(AppData, load_position_file))).hidden())
        .option(opt("tourneyFile", K::Filename(lens!(AppData, tourney_file))).hidden())
        .option(opt("is", K::String(lens!(AppData, engine_nickname))).hidden())
        .option(opt("loadGameFile", K::Filename(lens!(AppData, load_game_file))).hidden())
        // Settings bookkeeping
        .option(opt("saveDate", K::Int(lens!(AppData, save_date))).persist(true).with_default(0))
        .option(opt("date", K::Int(lens!(AppData, date_stamp))).with_default(0))
        .option(opt("autoClose", K::True(lens!(AppData, auto_close))).with_default(false))
        // Board colors
        .option(opt("whitePieceColor", K::Color(0)).persist(true).with_default("#FFFFCC"))
        .option(alias("wpc", K::Color(0)))
        .option(opt("blackPieceColor", K::Color(1)).persist(true).with_default("#202020"))
        .option(alias("bpc", K::Color(1)))
        .option(opt("lightSquareColor", K::Color(2)).persist(true).with_default("#C8C365"))
        .option(alias("lsc", K::Color(2)))
        .option(opt("darkSquareColor", K::Color(3)).persist(true).with_default("#77A26D"))
        .option(alias("dsc", K::Color(3)))
        .option(opt("highlightSquareColor", K::Color(4)).persist(true).with_default("#FFFF00"))
        .option(alias("hsc", K::Color(4)))
        .option(opt("premoveHighlightColor", K::Color(5)).persist(true).with_default("#FF0000"))
        .option(alias("phc", K::Color(5)))
        .option(opt("lowTimeWarningColor", K::Color(6)).persist(true).with_default("#FF0000"))
        // Time control
        .option(opt("movesPerSession", K::Int(lens!(AppData, moves_per_session))).persist(true).with_default(40))
        .option(alias("mps", K::Int(lens!(AppData, moves_per_session))))
        .option(opt("timeControl", K::String(lens!(AppData, time_control))).persist(true).with_default("5"))
        .option(alias("tc", K::String(lens!(AppData, time_control))))
        .option(opt("timeDelay", K::Float(lens!(AppData, time_delay))).persist(true).with_default(1.0f32))
        .option(alias("td", K::Float(lens!(AppData, time_delay))))
        .option(opt("timeIncrement", K::Float(lens!(AppData, time_increment))))
        .option(alias("inc", K::Float(lens!(AppData, time_increment))))
        .option(opt("searchTime", K::String(lens!(AppData, search_time))).with_default(""))
        .option(alias("st", K::String(lens!(AppData, search_time))))
        .option(opt("clockMode", K::Boolean(lens!(AppData, clock_mode))).with_default(true))
        // Engines
        .option(opt("firstInitString", K::String(lens!(AppData, first_init_string))).with_default("new\nrandom\n"))
        .option(alias("initString", K::String(lens!(AppData, first_init_string))))
        .option(opt("secondInitString", K::String(lens!(AppData, second_init_string))).with_default("new\nrandom\n"))
        .option(opt("firstChessProgram", K::Filename(lens!(AppData, first_chess_program))).with_default("fairymax"))
        .option(alias("fcp", K::Filename(lens!(AppData, first_chess_program))))
        .option(opt("secondChessProgram", K::Filename(lens!(AppData, second_chess_program))).with_default(""))
        .option(alias("scp", K::Filename(lens!(AppData, second_chess_program))))
        .option(opt("firstDirectory", K::Filename(lens!(AppData, first_directory))).with_default("."))
        .option(alias("fd", K::Filename(lens!(AppData, first_directory))))
        .option(opt("secondDirectory", K::Filename(lens!(AppData, second_directory))).with_default("."))
        .option(alias("sd", K::Filename(lens!(AppData, second_directory))))
        .option(opt("firstHost", K::String(lens!(AppData, first_host))).with_default("localhost"))
        .option(alias("fh", K::String(lens!(AppData, first_host))))
        .option(opt("secondHost", K::String(lens!(AppData, second_host))).with_default("localhost"))
        .option(alias("sh", K::String(lens!(AppData, second_host))))
        .option(opt("firstPlaysBlack", K::Boolean(lens!(AppData, first_plays_black))).with_default(false))
        .option(alias("fb", K::True(lens!(AppData, first_plays_black))))
        .option(alias("xfb", K::False(lens!(AppData, first_plays_black))))
        .option(alias("-fb", K::False(lens!(AppData, first_plays_black))))
        .option(opt("noChessProgram", K::Boolean(lens!(AppData, no_chess_program))).with_default(false))
        .option(alias("ncp", K::True(lens!(AppData, no_chess_program))))
        .option(alias("xncp", K::False(lens!(AppData, no_chess_program))))
        .option(alias("-ncp", K::False(lens!(AppData, no_chess_program))))
        .option(opt("firstIsUCI", K::Boolean(lens!(AppData, first_is_uci))).with_default(false))
        .option(alias("fUCI", K::True(lens!(AppData, first_is_uci))))
        .option(alias("firstUCI", K::True(lens!(AppData, first_is_uci))))
        .option(opt("secondIsUCI", K::Boolean(lens!(AppData, second_is_uci))).with_default(false))
        .option(alias("sUCI", K::True(lens!(AppData, second_is_uci))))
        .option(opt("fUCCI", K::Two(lens!(AppData, first_uci_flavor))).with_default(0))
        .option(opt("sUCCI", K::Two(lens!(AppData, second_uci_flavor))).with_default(0))
        .option(opt("fUSI", K::Two(lens!(AppData, first_uci_flavor))))
        .option(opt("sUSI", K::Two(lens!(AppData, second_uci_flavor))))
        .option(opt("firstProtocolVersion", K::Int(lens!(AppData, first_protocol_version))).with_default(2))
        .option(opt("firstNPS", K::Int(lens!(AppData, first_nps))).with_default(-1))
        .option(opt("chessProgram", K::Boolean(lens!(AppData, chess_program))).with_default(false))
        .option(alias("cp", K::True(lens!(AppData, chess_program))))
        .option(alias("xcp", K::False(lens!(AppData, chess_program))))
        .option(alias("-cp", K::False(lens!(AppData, chess_program))))
        .option(opt("recentEngines", K::Int(lens!(AppData, recent_engines))).persist(true).with_default(6))
        .option(opt("recentEngineList", K::String(lens!(AppData, recent_engine_list))).persist(true).with_default(""))
        .option(
            opt("firstChessProgramNames", K::String(lens!(AppData, first_chess_program_names)))
                .persist(true)
                .with_default(""),
        )
        .option(opt("installEngine", K::Install(lens!(AppData, first_chess_program_names))))
        .option(opt("addMasterOption", K::Master))
        // Games and matches
        .option(opt("loadGameFile", K::Filename(lens!(AppData, load_game_file))).with_default(""))
        .option(alias("lgf", K::Filename(lens!(AppData, load_game_file))))
        .option(opt("saveGameFile", K::Filename(lens!(AppData, save_game_file))).persist(true).with_default(""))
        .option(alias("sgf", K::Filename(lens!(AppData, save_game_file))))
        .option(opt("autoSaveGames", K::Boolean(lens!(AppData, auto_save_games))).persist(true).with_default(false))
        .option(alias("autosave", K::True(lens!(AppData, auto_save_games))))
        .option(alias("xautosave", K::False(lens!(AppData, auto_save_games))))
        .option(alias("-autosave", K::False(lens!(AppData, auto_save_games))))
        .option(opt("loadPositionFile", K::Filename(lens!(AppData, load_position_file))).with_default(""))
        .option(alias("lpf", K::Filename(lens!(AppData, load_position_file))))
        .option(opt("tourneyFile", K::Filename(lens!(AppData, tourney_file))).with_default(""))
        .option(alias("tf", K::Filename(lens!(AppData, tourney_file))))
        .option(opt("matchMode", K::Boolean(lens!(AppData, match_mode))).with_default(false))
        .option(alias("mm", K::True(lens!(AppData, match_mode))))
        .option(alias("xmm", K::False(lens!(AppData, match_mode))))
        .option(alias("-mm", K::False(lens!(AppData, match_mode))))
        .option(opt("matchGames", K::Int(lens!(AppData, match_games))).with_default(0))
        .option(alias("mg", K::Int(lens!(AppData, match_games))))
        .option(opt("variant", K::String(lens!(AppData, variant))).with_default("normal"))
        .option(opt("initialMode", K::String(lens!(AppData, initial_mode))).with_default(""))
        .option(alias("mode", K::String(lens!(AppData, initial_mode))))
        .option(opt("viewerOptions", K::String(lens!(AppData, viewer_options))).persist(true).with_default(DEFAULT_VIEWER_OPTIONS))
        .option(opt("tourneyOptions", K::String(lens!(AppData, tourney_options))).persist(true).with_default(DEFAULT_TOURNEY_OPTIONS))
        // Internet chess server
        .option(opt("internetChessServerMode", K::Boolean(lens!(AppData, ics_active))).with_default(false))
        .option(alias("ics", K::True(lens!(AppData, ics_active))))
        .option(alias("xics", K::False(lens!(AppData, ics_active))))
        .option(alias("-ics", K::False(lens!(AppData, ics_active))))
        .option(opt("is", K::String(lens!(AppData, engine_nickname))).with_default(""))
        .option(opt("internetChessServerHost", K::String(lens!(AppData, ics_host))).with_default(""))
        .option(alias("icshost", K::String(lens!(AppData, ics_host))))
        .option(opt("internetChessServerPort", K::String(lens!(AppData, ics_port))).with_default("5000"))
        .option(alias("icsport", K::String(lens!(AppData, ics_port))))
        // Display
        .option(opt("debugMode", K::Boolean(lens!(AppData, debug_mode))).with_default(false))
        .option(alias("debug", K::True(lens!(AppData, debug_mode))))
        .option(alias("xdebug", K::False(lens!(AppData, debug_mode))))
        .option(alias("-debug", K::False(lens!(AppData, debug_mode))))
        .option(opt("monoMode", K::Boolean(lens!(AppData, mono_mode))).persist(true).with_default(false))
        .option(alias("mono", K::True(lens!(AppData, mono_mode))))
        .option(alias("xmono", K::False(lens!(AppData, mono_mode))))
        .option(alias("-mono", K::False(lens!(AppData, mono_mode))))
        .option(opt("showCoords", K::Boolean(lens!(AppData, show_coords))).persist(true).with_default(false))
        .option(opt("flipView", K::Boolean(lens!(AppData, flip_view))).with_default(false))
        .option(opt("animateSpeed", K::Int(lens!(AppData, animate_speed))).persist(true).with_default(10))
        .option(opt("pieceImageDirectory", K::Filename(lens!(AppData, piece_directory))).persist(true).with_default(""))
        .option(alias("pid", K::Filename(lens!(AppData, piece_directory))))
        .option(opt("soundProgram", K::Filename(lens!(AppData, sound_program))).persist(true).with_default("play"))
        .option(
            opt("themeNames", K::String(lens!(AppData, theme_names)))
                .persist(true)
                .with_default("native -upf false -ub false -ubt false -pid \"\"\n"),
        )
        .option(opt("clockFont", K::Font(CLOCK_FONT)).persist(true))
        .option(opt("messageFont", K::Font(MESSAGE_FONT)).persist(true))
        .option(opt("font", K::Font(MESSAGE_FONT)))
        .option(opt("coordFont", K::Font(COORD_FONT)).persist(true))
        .option(opt("tagsFont", K::Font(TAGS_FONT)).persist(true))
        .option(opt("commentFont", K::Font(COMMENT_FONT)).persist(true))
        .option(opt("icsFont", K::Font(CONSOLE_FONT)).persist(true))
        .option(opt("moveHistoryFont", K::Font(HISTORY_FONT)).persist(true))
        .option(opt("gameListFont", K::Font(GAMELIST_FONT)).persist(true))
        // Must follow the fonts, whose sizes depend on it
        .option(opt("boardSize", K::BoardSize).persist(true))
        .option(alias("size", K::BoardSize))
        .option(opt("colorShout", K::Attribs(0)).persist(true))
        .option(opt("colorSShout", K::Attribs(1)).persist(true))
        .option(opt("colorChannel1", K::Attribs(2)).persist(true))
        .option(opt("colorChannel", K::Attribs(3)).persist(true))
        .option(opt("colorKibitz", K::Attribs(4)).persist(true))
        .option(opt("colorTell", K::Attribs(5)).persist(true))
        .option(opt("colorChallenge", K::Attribs(6)).persist(true))
        .option(opt("colorRequest", K::Attribs(7)).persist(true))
        .option(opt("colorSeek", K::Attribs(8)).persist(true))
        .option(opt("colorNormal", K::Attribs(9)).persist(true))
        .option(opt("colorNone", K::Attribs(10)).persist(true))
        .option(opt("comPortSettings", K::CommSettings).persist(true))
        // Settings files
        .option(
            opt("settingsFile", K::SettingsFilename(Some(lens!(AppData, settings_file_name))))
                .with_default(SETTINGS_FILE),
        )
        .option(alias("ini", K::SettingsFilename(Some(lens!(AppData, settings_file_name)))))
        .option(opt("at", K::SettingsFilename(None)))
        .option(opt("saveSettingsFile", K::Filename(lens!(AppData, settings_file_name))))
        .option(opt("backupSettingsFile", K::BackupSettingsFile(lens!(AppData, settings_file_name))))
        .option(opt("saveSettingsOnExit", K::Boolean(lens!(AppData, save_settings_on_exit))).persist(true).with_default(true))
        // Window layout, main window first
        .option(opt("minX", K::Z(lens!(AppData, min_x))))
        .option(opt("minY", K::Z(lens!(AppData, min_y))))
        .option(opt("winWidth", K::Int(lens!(AppData, main_window.width))).persist(true))
        .option(opt("winHeight", K::Int(lens!(AppData, main_window.height))).persist(true))
        .option(opt("x", K::Int(main_x())).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("y", K::Int(main_y())).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("icsUp", K::Boolean(lens!(AppData, console.visible))).persist(true).with_default(false))
        .option(opt("icsX", K::X { slot: lens!(AppData, console.x), origin: main_x() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("icsY", K::Y { slot: lens!(AppData, console.y), origin: main_y() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("icsW", K::Int(lens!(AppData, console.width))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("icsH", K::Int(lens!(AppData, console.height))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("moveHistoryUp", K::Boolean(lens!(AppData, move_history.visible))).persist(true).with_default(true))
        .option(opt("moveHistoryX", K::X { slot: lens!(AppData, move_history.x), origin: main_x() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("moveHistoryY", K::Y { slot: lens!(AppData, move_history.y), origin: main_y() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("moveHistoryW", K::Int(lens!(AppData, move_history.width))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("moveHistoryH", K::Int(lens!(AppData, move_history.height))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("evalGraphUp", K::Boolean(lens!(AppData, eval_graph.visible))).persist(true).with_default(true))
        .option(opt("evalGraphX", K::X { slot: lens!(AppData, eval_graph.x), origin: main_x() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("evalGraphY", K::Y { slot: lens!(AppData, eval_graph.y), origin: main_y() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("evalGraphW", K::Int(lens!(AppData, eval_graph.width))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("evalGraphH", K::Int(lens!(AppData, eval_graph.height))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("engineOutputUp", K::Boolean(lens!(AppData, engine_output.visible))).persist(true).with_default(true))
        .option(opt("engineOutputX", K::X { slot: lens!(AppData, engine_output.x), origin: main_x() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("engineOutputY", K::Y { slot: lens!(AppData, engine_output.y), origin: main_y() }).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("engineOutputW", K::Int(lens!(AppData, engine_output.width))).persist(true).with_default(CW_USEDEFAULT))
        .option(opt("engineOutputH", K::Int(lens!(AppData, engine_output.height))).persist(true).with_default(CW_USEDEFAULT))
        // Positional inference, first match wins
        .positional("loadGameFile")
        .infer(Matcher::Suffix(&[".trn"]), "tourneyFile", Some(lens!(AppData, tourney)))
        .infer(Matcher::Suffix(&[".fen", ".epd"]), "loadPositionFile", Some(lens!(AppData, viewer)))
        .infer(Matcher::Suffix(&[".ini", ".xop"]), "opt", None)
        .infer(Matcher::EngineNickname, "is", None)
        .fallback_effect(lens!(AppData, viewer))
        .build()
}
