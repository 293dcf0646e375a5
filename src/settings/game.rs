//! The live game settings file and its bundled default.

use std::fs;
use std::path::{Path, PathBuf};

use super::loader::{read_options, read_required_options};
use crate::options::{ensure_valid_key, render_file, OptionSet, OptionsError, Value, ValueKind, DEFAULT_HEADER, OPTION_KEY};

/// Location of the live and default settings files relative to the server root.
pub const LIVE_SETTINGS_PATH: &str = "Pal/Saved/Config/LinuxServer/PalWorldSettings.ini";
pub const DEFAULT_SETTINGS_PATH: &str = "DefaultPalWorldSettings.ini";

/// Where settings are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFiles {
    pub live_file: PathBuf,
    pub default_file: PathBuf,
    pub header: String,
    pub option_key: String,
}

impl SettingsFiles {
    /// Standard dedicated server layout under `root`.
    pub fn under_root(root: &Path) -> Self {
        Self {
            live_file: root.join(LIVE_SETTINGS_PATH),
            default_file: root.join(DEFAULT_SETTINGS_PATH),
            header: DEFAULT_HEADER.to_string(),
            option_key: OPTION_KEY.to_string(),
        }
    }
}

/// Which file the loaded options came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    /// The live file existed and had an options line.
    Configured,
    /// Fell back to the bundled default; the server has not been set up yet.
    Default,
}

/// One loaded settings file. Every mutation is written straight back to the live file.
#[derive(Debug)]
pub struct GameSettings {
    files: SettingsFiles,
    options: OptionSet,
    source: SettingsSource,
}

impl GameSettings {
    /// Load from the live file, or from the default file when the live file
    /// is absent or has no options line.
    pub fn load(files: SettingsFiles) -> Result<Self, OptionsError> {
        if let Some(options) = read_options(&files.live_file, &files.option_key)? {
            tracing::debug!("Loaded {} options from {}", options.len(), files.live_file.display());
            return Ok(Self { files, options, source: SettingsSource::Configured });
        }

        if files.live_file.exists() {
            tracing::warn!(
                "{} has no {} line, using defaults from {}",
                files.live_file.display(),
                files.option_key,
                files.default_file.display()
            );
        }

        let options = match read_required_options(&files.default_file, &files.option_key)? {
            Some(options) => options,
            None => {
                tracing::warn!(
                    "Default settings {} have no {} line",
                    files.default_file.display(),
                    files.option_key
                );
                OptionSet::new()
            }
        };
        tracing::debug!("Loaded {} default options from {}", options.len(), files.default_file.display());

        Ok(Self { files, options, source: SettingsSource::Default })
    }

    pub fn source(&self) -> SettingsSource {
        self.source
    }

    /// Whether the options came from a previously customized live file.
    pub fn is_configured(&self) -> bool {
        self.source == SettingsSource::Configured
    }

    pub fn files(&self) -> &SettingsFiles {
        &self.files
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_int).unwrap_or(default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_float).unwrap_or(default)
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn get_group(&self, key: &str) -> Vec<String> {
        self.get(key).and_then(Value::as_group).map(<[String]>::to_vec).unwrap_or_default()
    }

    /// Store `value` under `key` and rewrite the live file.
    ///
    /// A key or value that would not read back unchanged is rejected before
    /// anything is touched. If the write fails the in-memory options are
    /// restored, so they never disagree with what is on disk.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), OptionsError> {
        ensure_valid_key(key)?;
        value.ensure_persistable()?;

        let previous = self.options.set(key, value);
        if let Err(e) = self.save() {
            match previous {
                Some(old) => {
                    self.options.set(key, old);
                }
                None => {
                    self.options.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Parse `kind` and `text` into a value, then [`set`](Self::set) it.
    ///
    /// Both are validated before anything is touched.
    pub fn set_typed(&mut self, key: &str, kind: &str, text: &str) -> Result<(), OptionsError> {
        let kind: ValueKind = kind.parse()?;
        let value = kind.parse_value(text)?;
        self.set(key, value)
    }

    /// Overwrite the live file with the header and the full options line.
    pub fn save(&self) -> Result<(), OptionsError> {
        let path = &self.files.live_file;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| OptionsError::io(parent, e))?;
        }

        let body = render_file(&self.files.header, &self.files.option_key, &self.options);
        fs::write(path, body).map_err(|e| OptionsError::io(path, e))?;
        tracing::debug!("Wrote {} options to {}", self.options.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DEFAULT_BODY: &str = "[/Script/Pal.PalGameWorldSettings]\n\
        OptionSettings=(Difficulty=None,ExpRate=1.000000,ServerName=\"Default Palworld Server\",PublicPort=8211,RESTAPIEnabled=False,CrossplayPlatforms=(Steam,Xbox,PS5,Mac))\n";

    fn server_root() -> (TempDir, SettingsFiles) {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(DEFAULT_SETTINGS_PATH), DEFAULT_BODY).expect("write default");
        let files = SettingsFiles::under_root(tmp.path());
        (tmp, files)
    }

    #[test]
    fn test_falls_back_to_default_when_live_missing() {
        let (_tmp, files) = server_root();
        let settings = GameSettings::load(files).expect("load");
        assert!(!settings.is_configured());
        assert_eq!(settings.get_str("ServerName", ""), "Default Palworld Server");
        assert_eq!(settings.get_int("PublicPort", 0), 8211);
        assert_eq!(settings.get_float("ExpRate", 0.0), 1.0);
        assert!(!settings.get_bool("RESTAPIEnabled", true));
        assert_eq!(settings.get_group("CrossplayPlatforms"), vec!["Steam", "Xbox", "PS5", "Mac"]);
    }

    #[test]
    fn test_prefers_live_file() {
        let (_tmp, files) = server_root();
        fs::create_dir_all(files.live_file.parent().expect("parent")).expect("mkdir");
        fs::write(&files.live_file, "[/Script/Pal.PalGameWorldSettings]\nOptionSettings=(ServerName=\"Live\")\n")
            .expect("write live");

        let settings = GameSettings::load(files).expect("load");
        assert!(settings.is_configured());
        assert_eq!(settings.get_str("ServerName", ""), "Live");
        assert!(settings.get("PublicPort").is_none());
    }

    #[test]
    fn test_live_file_without_key_uses_default() {
        let (_tmp, files) = server_root();
        fs::create_dir_all(files.live_file.parent().expect("parent")).expect("mkdir");
        fs::write(&files.live_file, "[/Script/Pal.PalGameWorldSettings]\n").expect("write live");

        let settings = GameSettings::load(files).expect("load");
        assert_eq!(settings.source(), SettingsSource::Default);
        assert_eq!(settings.get_int("PublicPort", 0), 8211);
    }

    #[test]
    fn test_missing_default_is_io_error() {
        let tmp = TempDir::new().expect("tmp");
        let err = GameSettings::load(SettingsFiles::under_root(tmp.path())).unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
    }

    #[test]
    fn test_set_writes_through_and_reloads_configured() {
        let (_tmp, files) = server_root();
        let mut settings = GameSettings::load(files.clone()).expect("load");
        settings.set("ServerName", Value::Str("My Server".into())).expect("set");

        let written = fs::read_to_string(&files.live_file).expect("read live");
        assert!(written.starts_with("[/Script/Pal.PalGameWorldSettings]\nOptionSettings=(Difficulty=None,ExpRate=1.0,"));
        assert!(written.ends_with(")\n"));

        let reloaded = GameSettings::load(files).expect("reload");
        assert!(reloaded.is_configured());
        assert_eq!(reloaded.get("ServerName"), Some(&Value::Str("My Server".into())));
        assert_eq!(reloaded.options().keys().collect::<Vec<_>>(), settings.options().keys().collect::<Vec<_>>());
    }

    #[test]
    fn test_set_typed_rejects_unknown_type_without_writing() {
        let (_tmp, files) = server_root();
        let mut settings = GameSettings::load(files.clone()).expect("load");
        let before = settings.options().clone();

        let err = settings.set_typed("ServerName", "dict", "x").unwrap_err();
        assert!(matches!(err, OptionsError::InvalidType(_)));
        assert_eq!(settings.options(), &before);
        assert!(!files.live_file.exists());
    }

    #[test]
    fn test_set_typed_strips_quotes_from_strings() {
        let (_tmp, files) = server_root();
        let mut settings = GameSettings::load(files.clone()).expect("load");
        settings.set_typed("ServerDescription", "string", "a \"quoted\" desc").expect("set");

        let reloaded = GameSettings::load(files).expect("reload");
        assert_eq!(reloaded.get_str("ServerDescription", ""), "a quoted desc");
    }

    #[test]
    fn test_set_rejects_values_that_would_not_reload() {
        let (_tmp, files) = server_root();
        let mut settings = GameSettings::load(files.clone()).expect("load");
        let before = settings.options().clone();

        let rejected = [
            ("ServerName", Value::Str("a\"b".into())),
            ("ServerName", Value::Str("line1\nline2".into())),
            ("PublicPort", Value::Int(-5)),
            ("ExpRate", Value::Float(f64::NAN)),
            ("CrossplayPlatforms", Value::Group(vec!["Steam,Xbox".into()])),
            ("CrossplayPlatforms", Value::Group(vec!["(Steam".into()])),
            ("Difficulty", Value::Literal("a\nb".into())),
        ];
        for (key, value) in rejected {
            let err = settings.set(key, value.clone()).unwrap_err();
            assert!(matches!(err, OptionsError::InvalidValue { .. }), "{key}={value:?} accepted");
        }

        let err = settings.set("Bad=Key", Value::Int(1)).unwrap_err();
        assert!(matches!(err, OptionsError::InvalidKey(_)));

        assert_eq!(settings.options(), &before);
        assert!(!files.live_file.exists());
    }

    #[test]
    fn test_set_typed_rejects_line_breaks() {
        let (_tmp, files) = server_root();
        let mut settings = GameSettings::load(files.clone()).expect("load");

        for (key, kind) in [("ServerName", "string"), ("Difficulty", "literal"), ("CrossplayPlatforms", "group")] {
            let err = settings.set_typed(key, kind, "line1\nline2").unwrap_err();
            assert!(matches!(err, OptionsError::InvalidValue { .. }), "{kind} accepted a newline");
        }
        assert!(!files.live_file.exists());

        settings.set_typed("ServerName", "string", "line1 line2").expect("set");
        let reloaded = GameSettings::load(files).expect("reload");
        assert_eq!(reloaded.get_str("ServerName", ""), "line1 line2");
    }

    #[test]
    fn test_failed_write_restores_previous_value() {
        let (tmp, mut files) = server_root();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write blocker");
        files.live_file = blocker.join("PalWorldSettings.ini");

        let mut settings = GameSettings::load(files).expect("load");
        let err = settings.set("PublicPort", Value::Int(9000)).unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
        assert_eq!(settings.get_int("PublicPort", 0), 8211);

        assert!(settings.set("NewKey", Value::Int(1)).is_err());
        assert!(!settings.options().contains_key("NewKey"));
    }
}
