use std::path::PathBuf;

// Application directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "collect-and-run";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const STORE_DB_NAME: &str = "prefs.sled";
pub const LOG_FILE_NAME: &str = "collect-and-run.log";

// =================================================
// Persisted update-check preferences
// =================================================
pub const CFG_LAST_UPDATE_CHECK: &str = "last_update_check";
pub const CFG_SERVER_MESSAGE: &str = "server_message";
pub const CFG_REMIND_UPDATE_VERSION: &str = "remind_update_version";
pub const CFG_REMIND_UPDATE_DATE: &str = "remind_update_date";
pub const CFG_SKIP_UP_TO_VERSION: &str = "skip_up_to_version";

// Value used when a timestamp preference has never been written
pub const DEFAULT_PREF_DATE: &str = "1971-01-01T00:00:01Z";
pub const DEFAULT_REMIND_VERSION: &str = "0.0.0.0";

// =================================================
// Update server
// =================================================
pub const DEFAULT_UPDATE_URL: &str = "http://www.arongranberg.com/astar/version.php";

// Upper bounds for the schedule settings in config.yaml
pub const MAX_CHECK_INTERVAL_DAYS: f64 = 3650.0;
pub const MAX_SCHEDULE_OFFSET_MINUTES: i64 = 60 * 24 * 30;

/// How far `check_for_updates_now` rewinds the last check time.
pub const FORCE_CHECK_REWIND_DAYS: i64 = 5;

// Server message fields
pub const SERVER_MESSAGE_SEPARATOR: char = '|';
pub const SERVER_MESSAGE_DESCRIPTION_FIELD: usize = 1;
pub const SERVER_MESSAGE_FIRST_PAIR_FIELD: usize = 4;
pub const SERVER_KEY_BRANCH_VERSION: &str = "VERSION:branch";
pub const SERVER_KEY_BETA_VERSION: &str = "VERSION:beta";
pub const SERVER_URL_KEY_PREFIX: &str = "URL:";

/// Server data entries known before any server message has been received.
pub const DEFAULT_SERVER_DATA: &[(&str, &str)] = &[
    ("URL:modifiers", "http://www.arongranberg.com/astar/docs/modifiers.php"),
    ("URL:astarpro", "http://arongranberg.com/unity/a-pathfinding/astarpro/"),
    ("URL:documentation", "http://arongranberg.com/astar/docs/"),
    ("URL:findoutmore", "http://arongranberg.com/astar"),
    ("URL:download", "http://arongranberg.com/unity/a-pathfinding/download"),
    ("URL:changelog", "http://arongranberg.com/astar/docs/changelog.php"),
    ("URL:tags", "http://arongranberg.com/astar/docs/tags.php"),
    ("URL:homepage", "http://arongranberg.com/astar/"),
];

/// Returns `<platform dir>/collect-and-run`, falling back to the current directory.
pub fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Directory holding `config.yaml`.
pub fn config_dir() -> PathBuf {
    app_dir(dirs::config_dir())
}

/// Directory holding the preference store and log file.
pub fn data_dir() -> PathBuf {
    app_dir(dirs::data_dir())
}
