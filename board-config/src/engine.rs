//! The option engine facade

use crate::config::EngineConfig;
use crate::defaults;
use crate::host::{Host, NoHooks};
use crate::lookup;
use crate::parser::{self, ParseMode, ParseReport, Scope};
use crate::schema::{Lens, Schema};
use crate::source::{CharSource, FileSource, TextSource};
use crate::usage;
use crate::writer;
use crate::{ConfigError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Ties an option schema to its host hooks and engine settings
///
/// The engine holds no program state. Every operation takes the state it
/// reads or writes, so one engine can serve several state values in turn.
pub struct OptionEngine<S, H = NoHooks> {
    schema: Schema<S>,
    host: H,
    config: EngineConfig,
}

impl<S, H: Host<S>> OptionEngine<S, H> {
    pub fn new(schema: Schema<S>, host: H) -> Self {
        Self {
            schema,
            host,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &Schema<S> {
        &self.schema
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Write every table default into `state`
    pub fn apply_defaults(&self, state: &mut S) -> Result<()> {
        defaults::apply_defaults(&self.schema, &self.host, state)
    }

    /// Parse option text, such as a joined command line
    pub fn parse_str(&self, state: &mut S, text: &str, mode: ParseMode) -> Result<ParseReport> {
        self.parse_source(state, &mut TextSource::new(text), mode)
    }

    /// Parse the file at `path`, failing if it cannot be read
    pub fn parse_file(&self, state: &mut S, path: &Path, mode: ParseMode) -> Result<ParseReport> {
        let mut src = FileSource::open(path)?;
        let mut report = ParseReport {
            files: vec![path.to_path_buf()],
            ..Default::default()
        };
        parser::parse(self, state, &mut src, &mut Scope::new(mode, &mut report))?;
        Ok(report)
    }

    pub fn parse_source(
        &self,
        state: &mut S,
        src: &mut dyn CharSource,
        mode: ParseMode,
    ) -> Result<ParseReport> {
        let mut report = ParseReport::default();
        parser::parse(self, state, src, &mut Scope::new(mode, &mut report))?;
        Ok(report)
    }

    /// Search for and parse a settings file
    ///
    /// Returns `None` when no file was found. On success the resolved path
    /// is written to `storage`.
    pub fn load_settings_file(
        &self,
        state: &mut S,
        name: &str,
        storage: Option<Lens<S, String>>,
        mode: ParseMode,
    ) -> Result<Option<ParseReport>> {
        let mut report = ParseReport::default();
        let mut scope = Scope::new(mode, &mut report);
        if self.read_settings_file(state, name, storage, &mut scope)? {
            Ok(Some(report))
        } else {
            Ok(None)
        }
    }

    /// Open and parse a settings file one level below `scope`
    ///
    /// A name without a `.` that does not resolve is retried with `.ini`
    /// appended. Returns `false` when neither could be opened.
    pub(crate) fn read_settings_file(
        &self,
        state: &mut S,
        name: &str,
        storage: Option<Lens<S, String>>,
        scope: &mut Scope<'_>,
    ) -> Result<bool> {
        if scope.depth >= self.config.max_depth {
            return Err(ConfigError::IndirectionTooDeep(name.to_string()));
        }

        let Some((path, mut src)) = self.open_settings(name) else {
            return Ok(false);
        };

        if let Some(storage) = storage {
            storage.set(state, path.to_string_lossy().into_owned());
        }
        info!("Reading settings from {}", path.display());
        scope.report.files.push(path);

        parser::parse(self, state, &mut src, &mut scope.nested())?;
        Ok(true)
    }

    fn open_settings(&self, name: &str) -> Option<(PathBuf, FileSource)> {
        let mut candidates = vec![name.to_string()];
        if !name.contains('.') {
            candidates.push(format!("{}.ini", name));
        }

        candidates.iter().find_map(|candidate| {
            let path = self.host.search_path(candidate);
            FileSource::open(&path).ok().map(|src| (path, src))
        })
    }

    /// Whether `current` still names the default settings file
    pub(crate) fn is_default_settings_file(&self, current: &str) -> bool {
        current == self.config.settings_file
            || Path::new(current) == self.host.search_path(&self.config.settings_file)
    }

    /// Serialize every persisted option, header included
    pub fn write_settings<W: Write>(&self, state: &S, out: &mut W) -> Result<()> {
        writer::write_settings(self, state, out)
    }

    /// Serialize to the settings file `name`, resolved through the host
    pub fn save_settings(&self, state: &S, name: &str) -> Result<PathBuf> {
        let path = self.host.search_path(name);
        writer::save_to_path(self, state, &path)?;
        Ok(path)
    }

    /// Current value of a text, integer or boolean option as text
    pub fn value_text(&self, state: &S, name: &str) -> Option<String> {
        lookup::value_text(&self.schema, state, name)
    }

    /// Replace `%name%` placeholders with option values
    pub fn expand_placeholders(&self, state: &S, text: &str) -> String {
        lookup::expand_placeholders(&self.schema, state, text)
    }

    /// Human-readable listing of every option
    pub fn usage(&self) -> String {
        usage::usage(&self.schema, self.config.dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens;
    use crate::schema::{OptionDescriptor, OptionKind};
    use tempfile::TempDir;

    #[derive(Default)]
    struct State {
        count: i32,
        settings: String,
        backup: String,
    }

    struct DirHost(PathBuf);

    impl Host<State> for DirHost {
        fn search_path(&self, name: &str) -> PathBuf {
            crate::host::resolve_path(Some(&self.0), name)
        }
    }

    fn engine(dir: &TempDir) -> OptionEngine<State, DirHost> {
        let schema = Schema::builder()
            .option(OptionDescriptor::new("count", OptionKind::Int(lens!(State, count))))
            .option(OptionDescriptor::new(
                "settingsFile",
                OptionKind::SettingsFilename(Some(lens!(State, settings))),
            ))
            .option(OptionDescriptor::new(
                "backupSettingsFile",
                OptionKind::BackupSettingsFile(lens!(State, backup)),
            ))
            .build()
            .unwrap();
        OptionEngine::new(schema, DirHost(dir.path().to_path_buf()))
            .with_config(EngineConfig::default().with_settings_file("main.rc"))
    }

    #[test]
    fn test_indirection_inlines_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("extra.conf"), "-count 9\n").unwrap();

        let engine = engine(&dir);
        let mut state = State::default();
        let report = engine
            .parse_str(&mut state, "-count 1 @extra.conf", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 9);
        assert_eq!(report.files, vec![dir.path().join("extra.conf")]);
    }

    #[test]
    fn test_strict_mode_stops_at_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("old.conf"), "-retired 2\n-count 5\n").unwrap();

        let engine = engine(&dir);
        let mut state = State::default();
        let report = engine
            .parse_str(&mut state, "@old.conf", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 5);
        assert_eq!(report.unrecognized, vec!["-retired".to_string()]);

        let err = engine
            .parse_str(&mut state, "-retired 2", ParseMode::Strict)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedOption(_)));
    }

    #[test]
    fn test_missing_indirection_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut state = State::default();
        let err = engine(&dir)
            .parse_str(&mut state, "@nothere.conf", ParseMode::Lenient)
            .unwrap_err();
        assert!(matches!(err, ConfigError::IndirectionOpenFailed(name) if name == "nothere.conf"));
    }

    #[test]
    fn test_missing_settings_file_with_storage_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut state = State::default();
        engine(&dir)
            .parse_str(&mut state, "-settingsFile nothere -count 3", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 3);
        assert!(state.settings.is_empty());
    }

    #[test]
    fn test_settings_file_ini_retry() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("theme.ini"), "-count 4").unwrap();

        let engine = engine(&dir);
        let mut state = State::default();
        engine
            .parse_str(&mut state, "-settingsFile theme", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 4);
        assert_eq!(state.settings, dir.path().join("theme.ini").to_string_lossy());
    }

    #[test]
    fn test_self_reference_hits_depth_guard() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("loop.conf"), "@loop.conf\n").unwrap();

        let mut state = State::default();
        let err = engine(&dir)
            .parse_str(&mut state, "@loop.conf", ParseMode::Lenient)
            .unwrap_err();
        assert!(matches!(err, ConfigError::IndirectionTooDeep(_)));
    }

    #[test]
    fn test_backup_only_for_default_settings() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("backup.rc"), "-count 8").unwrap();
        let engine = engine(&dir);

        let mut state = State {
            backup: "main.rc".to_string(),
            ..Default::default()
        };
        engine
            .parse_str(&mut state, "-backupSettingsFile backup.rc", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 8);

        let mut state = State {
            backup: "other.rc".to_string(),
            ..Default::default()
        };
        engine
            .parse_str(&mut state, "-backupSettingsFile backup.rc", ParseMode::Strict)
            .unwrap();
        assert_eq!(state.count, 0);
    }

    #[test]
    fn test_load_settings_file_not_found() {
        let dir = TempDir::new().unwrap();
        let mut state = State::default();
        let report = engine(&dir)
            .load_settings_file(&mut state, "absent.rc", None, ParseMode::Lenient)
            .unwrap();
        assert!(report.is_none());
    }
}
