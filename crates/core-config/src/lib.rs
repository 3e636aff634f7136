//! Configuration loading and parsing.
//!
//! Parses `coverage.toml` (or an override path provided by the binary),
//! reading the `[render]` table:
//!
//! ```toml
//! [render]
//! combining_base = "◌"
//! show_gaps = true
//! show_position_headers = false
//! ```
//!
//! Every key is optional. A missing file yields defaults silently; an
//! unparsable file yields defaults and a `config_parse_failed` warning.
//! Unknown fields are ignored so the file can grow without breaking older
//! binaries.
//!
//! Command-line flags are layered on top via `Config::resolve`: an explicit
//! combining base replaces the file value, and boolean switches can only turn
//! a setting on.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "coverage.toml";
pub const CONFIG_DIR_NAME: &str = "glyph-coverage";
pub use core_model::DEFAULT_COMBINING_BASE;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    #[serde(default = "RenderConfig::default_combining_base")]
    pub combining_base: char,
    #[serde(default)]
    pub show_gaps: bool,
    #[serde(default)]
    pub show_position_headers: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            combining_base: Self::default_combining_base(),
            show_gaps: false,
            show_position_headers: false,
        }
    }
}

impl RenderConfig {
    const fn default_combining_base() -> char {
        DEFAULT_COMBINING_BASE
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from
    pub file: ConfigFile,      // parsed (or default) data
}

/// Values supplied on the command line; `None` / `false` defer to the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub combining_base: Option<char>,
    pub show_gaps: bool,
    pub show_position_headers: bool,
}

/// Final render settings after layering CLI over file over defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub combining_base: char,
    pub show_gaps: bool,
    pub show_position_headers: bool,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                combining_base = %file.render.combining_base,
                show_gaps = file.render.show_gaps,
                show_position_headers = file.render.show_position_headers,
                "config_loaded"
            );
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            // Fall back to defaults rather than aborting the run.
            warn!(
                target: "config",
                path = %path.display(),
                error = %e.message(),
                "config_parse_failed"
            );
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Layer command-line values over the file values.
    pub fn resolve(&self, cli: CliOverrides) -> RenderSettings {
        let render = &self.file.render;
        RenderSettings {
            combining_base: cli.combining_base.unwrap_or(render.combining_base),
            show_gaps: cli.show_gaps || render.show_gaps,
            show_position_headers: cli.show_position_headers || render.show_position_headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert!(cfg.path.is_none());
        assert_eq!(cfg.file.render, RenderConfig::default());
        assert_eq!(cfg.file.render.combining_base, '◌');
    }

    #[test]
    fn parses_render_section() {
        let tmp = write_config(
            "[render]\ncombining_base = \"o\"\nshow_gaps = true\nshow_position_headers = true\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.render.combining_base, 'o');
        assert!(cfg.file.render.show_gaps);
        assert!(cfg.file.render.show_position_headers);
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let tmp = write_config("[render]\nshow_gaps = true\n[unrelated]\nkey = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert!(cfg.file.render.show_gaps);
        assert!(!cfg.file.render.show_position_headers);
        assert_eq!(cfg.file.render.combining_base, DEFAULT_COMBINING_BASE);
    }

    #[test]
    fn parse_failure_logs_and_defaults() {
        // Two characters cannot be a combining base.
        let tmp = write_config("[render]\ncombining_base = \"ab\"\n");
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf()))).unwrap();

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
        assert_eq!(cfg.file.render, RenderConfig::default());
        assert!(cfg.path.is_none());
    }

    #[test]
    fn cli_overrides_file_values() {
        let tmp = write_config("[render]\ncombining_base = \"o\"\nshow_gaps = true\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();

        let settings = cfg.resolve(CliOverrides::default());
        assert_eq!(settings.combining_base, 'o');
        assert!(settings.show_gaps);
        assert!(!settings.show_position_headers);

        let settings = cfg.resolve(CliOverrides {
            combining_base: Some('x'),
            show_gaps: false,
            show_position_headers: true,
        });
        assert_eq!(settings.combining_base, 'x');
        assert!(settings.show_gaps);
        assert!(settings.show_position_headers);
    }

    #[test]
    fn discover_names_coverage_toml() {
        assert!(discover().ends_with(CONFIG_FILE_NAME));
    }
}
