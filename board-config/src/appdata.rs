//! Program state of the board application
//!
//! Every option in [`crate::options`] writes into one of these fields.
//! Colors, text attributes, fonts, the board size and port settings are
//! kept as the text the user gave; resolving them is the GUI's business.

use serde::Serialize;
use std::collections::BTreeMap;

/// Fonts the option table addresses by index
pub const NUM_FONTS: usize = 8;
pub const CLOCK_FONT: usize = 0;
pub const MESSAGE_FONT: usize = 1;
pub const COORD_FONT: usize = 2;
pub const CONSOLE_FONT: usize = 3;
pub const TAGS_FONT: usize = 4;
pub const COMMENT_FONT: usize = 5;
pub const HISTORY_FONT: usize = 6;
pub const GAMELIST_FONT: usize = 7;

/// Colors the option table addresses by index
pub const NUM_COLORS: usize = 7;

/// Text classes of the ICS console
pub const NUM_TEXT_CLASSES: usize = 11;

/// Window coordinate meaning "let the window manager decide"
pub const CW_USEDEFAULT: i32 = i32::MIN;

/// Increment value meaning "not given, derive it from moves per session"
pub const INCREMENT_UNSET: f32 = -314159.0;

/// Position, size and visibility of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowPlacement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub visible: bool,
}

impl Default for WindowPlacement {
    fn default() -> Self {
        Self {
            x: CW_USEDEFAULT,
            y: CW_USEDEFAULT,
            width: CW_USEDEFAULT,
            height: CW_USEDEFAULT,
            visible: false,
        }
    }
}

/// One font option: the font in use plus fonts remembered per square size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FontSetting {
    pub current: String,
    pub by_size: BTreeMap<i32, String>,
}

/// Everything the option table reads and writes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppData {
    // Positional arguments
    pub load_game_file: String,
    pub load_position_file: String,
    pub tourney_file: String,
    pub engine_nickname: String,

    // Modes raised by positional arguments
    pub viewer: bool,
    pub tourney: bool,
    pub viewer_options: String,
    pub tourney_options: String,

    // Settings bookkeeping
    pub settings_file_name: String,
    pub save_settings_on_exit: bool,
    pub save_date: i32,
    pub date_stamp: i32,
    pub auto_close: bool,

    // Engines
    pub first_chess_program: String,
    pub second_chess_program: String,
    pub first_directory: String,
    pub second_directory: String,
    pub first_host: String,
    pub second_host: String,
    pub first_init_string: String,
    pub second_init_string: String,
    pub first_chess_program_names: String,
    pub first_is_uci: bool,
    pub second_is_uci: bool,
    /// 2 for UCCI and USI engines
    pub first_uci_flavor: u8,
    pub second_uci_flavor: u8,
    pub first_protocol_version: i32,
    pub first_nps: i32,
    pub first_plays_black: bool,
    pub no_chess_program: bool,
    pub chess_program: bool,
    pub recent_engines: i32,
    pub recent_engine_list: String,

    // Time control
    pub time_control: String,
    pub moves_per_session: i32,
    pub time_increment: f32,
    pub time_delay: f32,
    pub search_time: String,
    pub clock_mode: bool,

    // Games and matches
    pub save_game_file: String,
    pub auto_save_games: bool,
    pub match_mode: bool,
    pub match_games: i32,
    pub variant: String,
    pub initial_mode: String,

    // Internet chess server
    pub ics_active: bool,
    pub ics_host: String,
    pub ics_port: String,

    // Display
    pub debug_mode: bool,
    pub mono_mode: bool,
    pub show_coords: bool,
    pub flip_view: bool,
    pub animate_speed: i32,
    pub piece_directory: String,
    pub sound_program: String,
    pub theme_names: String,
    pub board_size: String,
    pub square_size: i32,
    pub colors: [String; NUM_COLORS],
    pub text_attribs: [String; NUM_TEXT_CLASSES],
    pub fonts: [FontSetting; NUM_FONTS],
    pub comm_port_settings: String,

    // Window layout
    pub min_x: i32,
    pub min_y: i32,
    pub main_window: WindowPlacement,
    pub console: WindowPlacement,
    pub move_history: WindowPlacement,
    pub eval_graph: WindowPlacement,
    pub engine_output: WindowPlacement,
}
