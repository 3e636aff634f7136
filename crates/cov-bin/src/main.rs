//! glyph-coverage entrypoint.
//!
//! Loads one or more weights of a font family, merges their character maps
//! and writes the coverage document to stdout. Diagnostics go to stderr
//! (and optionally a log file) through `tracing`.
use anyhow::{Context, Result};
use clap::Parser;
use core_config::{CliOverrides, Config, RenderSettings, load_from};
use core_fonts::load_weights;
use core_model::{build_metrics_table, merged_codepoints, require_combining_base};
use core_render::{RenderFlags, RenderOptions, RenderStats, render_coverage};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "info";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "glyph-coverage",
    version,
    about = "Generate a Unicode coverage table for a font"
)]
struct Args {
    /// Font file paths; they are searched in order for codepoints.
    #[arg(required = true, num_args = 1..)]
    pub font_paths: Vec<PathBuf>,
    /// Base character drawn under combining marks (default: ◌).
    #[arg(long = "combining-base")]
    pub combining_base: Option<char>,
    /// Show blank lines between coverage gaps.
    #[arg(long = "show-gaps")]
    pub show_gaps: bool,
    /// Show Position headers when switching between narrow and wide blocks.
    #[arg(long = "show-position-headers")]
    pub show_position_headers: bool,
    /// Optional configuration file path (overrides discovery of `coverage.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Also write logs to this file.
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            combining_base: self.combining_base,
            show_gaps: self.show_gaps,
            show_position_headers: self.show_position_headers,
        }
    }
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    /// Stderr subscriber filtered by `RUST_LOG` (default `info`), optionally
    /// teed to `log_file` through a non-blocking appender.
    fn configure_logging(&mut self, log_file: Option<&Path>) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let stderr_layer = fmt::layer().with_writer(io::stderr).without_time();

        let mut guard = None;
        let file_layer = match log_file {
            Some(path) => {
                let dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| Path::new("."));
                let name = path
                    .file_name()
                    .with_context(|| format!("invalid log file path: {}", path.display()))?;
                if path.exists() {
                    let _ = std::fs::remove_file(path);
                }
                let file_appender = tracing_appender::rolling::never(dir, name);
                let (nb_writer, g) = tracing_appender::non_blocking(file_appender);
                guard = Some(g);
                Some(fmt::layer().with_ansi(false).with_writer(nb_writer))
            }
            None => None,
        };

        match tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = guard;
            }
            Err(_err) => {
                // Global tracing subscriber already installed; drop guard so writer shuts down.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }

    fn load_settings(args: &Args) -> Result<RenderSettings> {
        let config: Config = load_from(args.config.clone())?;
        let settings = config.resolve(args.overrides());
        info!(
            target: "runtime.startup",
            config = config.path.as_ref().map(|p| p.display().to_string()).as_deref(),
            config_override = args.config.is_some(),
            combining_base = %settings.combining_base,
            show_gaps = settings.show_gaps,
            show_position_headers = settings.show_position_headers,
            "settings_resolved"
        );
        Ok(settings)
    }
}

fn render_options(settings: &RenderSettings) -> RenderOptions {
    let mut flags = RenderFlags::empty();
    flags.set(RenderFlags::SHOW_GAPS, settings.show_gaps);
    flags.set(RenderFlags::POSITION_HEADERS, settings.show_position_headers);
    RenderOptions::default()
        .with_combining_base(settings.combining_base)
        .with_flags(flags)
}

/// Load, merge, validate and render; the whole pipeline for one invocation.
fn generate(args: &Args) -> Result<RenderStats> {
    let settings = AppStartup::load_settings(args)?;

    let fonts = load_weights(&args.font_paths).context("loading fonts")?;
    let merged = merged_codepoints(&fonts.weights)?;
    require_combining_base(&merged, settings.combining_base)?;
    let table = build_metrics_table(&fonts.weights, &merged)?;

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    let (_, stats) = render_coverage(&table, &fonts.font_name, render_options(&settings), out)
        .context("writing coverage")?;
    Ok(stats)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut startup = AppStartup::new();
    startup.configure_logging(args.log_file.as_deref())?;
    AppStartup::install_panic_hook();

    info!(target: "runtime", fonts = args.font_paths.len(), "startup");
    match generate(&args) {
        Ok(stats) => {
            info!(
                target: "runtime",
                lines = stats.lines_emitted,
                bytes = stats.writer.bytes_written,
                "shutdown"
            );
            Ok(())
        }
        Err(e) => {
            error!(target: "runtime", error = %format!("{e:#}"), "generation_failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "glyph-coverage",
            "Regular.ttf",
            "Bold.ttf",
            "--combining-base",
            "o",
            "--show-gaps",
            "--show-position-headers",
            "--config",
            "cov.toml",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert_eq!(
            args.font_paths,
            vec![PathBuf::from("Regular.ttf"), PathBuf::from("Bold.ttf")]
        );
        assert_eq!(args.combining_base, Some('o'));
        assert!(args.show_gaps);
        assert!(args.show_position_headers);
        assert_eq!(args.config, Some(PathBuf::from("cov.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn font_path_required() {
        assert!(Args::try_parse_from(["glyph-coverage"]).is_err());
    }

    #[test]
    fn combining_base_must_be_one_char() {
        assert!(
            Args::try_parse_from(["glyph-coverage", "a.ttf", "--combining-base", "ab"]).is_err()
        );
    }

    #[test]
    fn settings_map_to_render_flags() {
        let opts = render_options(&RenderSettings {
            combining_base: 'x',
            show_gaps: true,
            show_position_headers: false,
        });
        assert_eq!(opts.combining_base, 'x');
        assert_eq!(opts.flags, RenderFlags::SHOW_GAPS);
    }

    #[test]
    fn unconfigured_run_uses_renderer_defaults() {
        let settings = Config::default().resolve(CliOverrides::default());
        assert_eq!(render_options(&settings), RenderOptions::default());
    }
}
