//! Command-line interface implementation

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{find_config, load_config, FileConfig};
use crate::engine::{Diagnostics, Engine, Options};
use crate::exclude::ExcludePattern;
use crate::stylesheet::{parse, Warning};

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// t3d - Rewrite 2D CSS transforms into GPU-accelerated 3D equivalents
#[derive(Parser)]
#[command(name = "t3d")]
#[command(about = "Rewrite 2D CSS transforms into GPU-accelerated 3D equivalents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite the transforms in a CSS file
    Process {
        /// Input CSS file
        input: PathBuf,

        /// Output file. If omitted, the result goes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file. If omitted, t3d.toml is searched for upward from
        /// the working directory
        #[arg(long)]
        config: Option<PathBuf>,

        /// Selectors to exclude; `/.../` entries are regular expressions.
        /// Adds to any configured list
        #[arg(long = "exclude", value_name = "SELECTOR")]
        exclude: Vec<String>,

        /// Do not inject will-change after a rewrite
        #[arg(long)]
        no_will_change: bool,

        /// Inject will-change even without animation or transition usage
        #[arg(long)]
        no_smart_will_change: bool,

        /// Inject transform-style: preserve-3d
        #[arg(long)]
        preserve3d: bool,

        /// Inject backface-visibility: hidden
        #[arg(long)]
        backface_visibility: bool,

        /// Inject a default transform-origin
        #[arg(long)]
        transform_origin: bool,

        /// Leave @keyframes bodies untouched
        #[arg(long)]
        no_keyframes: bool,

        /// Disable rewrite memoization
        #[arg(long)]
        no_cache: bool,

        /// Ignore vendor-prefixed transform properties and keyframes
        #[arg(long)]
        no_prefixes: bool,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Write a JSON warning report to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

/// JSON shape of `--report`
#[derive(Serialize)]
struct Report<'a> {
    parse_warnings: &'a [Warning],
    warnings: &'a [String],
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            config,
            exclude,
            no_will_change,
            no_smart_will_change,
            preserve3d,
            backface_visibility,
            transform_origin,
            no_keyframes,
            no_cache,
            no_prefixes,
            strict,
            report,
        } => {
            let flags = Flags {
                exclude,
                no_will_change,
                no_smart_will_change,
                preserve3d,
                backface_visibility,
                transform_origin,
                no_keyframes,
                no_cache,
                no_prefixes,
            };
            run_process(&input, output.as_deref(), config.as_deref(), flags, strict, report.as_deref())
        }
    }
}

/// Option flags gathered from the command line.
struct Flags {
    exclude: Vec<String>,
    no_will_change: bool,
    no_smart_will_change: bool,
    preserve3d: bool,
    backface_visibility: bool,
    transform_origin: bool,
    no_keyframes: bool,
    no_cache: bool,
    no_prefixes: bool,
}

/// Build engine options: defaults, then config file, then flags.
fn resolve_options(config_path: Option<&Path>, flags: &Flags) -> Result<Options, String> {
    let file_config = match config_path {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => match find_config() {
            Some(path) => load_config(&path)
                .map_err(|e| format!("{}: {}", path.display(), e))?,
            None => FileConfig::default(),
        },
    };

    let mut options = file_config.into_options().map_err(|e| e.to_string())?;

    for entry in &flags.exclude {
        options
            .exclude_selectors
            .push(ExcludePattern::parse(entry).map_err(|e| e.to_string())?);
    }
    if flags.no_will_change {
        options.add_will_change = false;
    }
    if flags.no_smart_will_change {
        options.smart_will_change = false;
    }
    if flags.preserve3d {
        options.add_preserve3d = true;
    }
    if flags.backface_visibility {
        options.add_backface_visibility = true;
    }
    if flags.transform_origin {
        options.add_transform_origin = true;
    }
    if flags.no_keyframes {
        options.process_keyframes = false;
    }
    if flags.no_cache {
        options.enable_cache = false;
    }
    if flags.no_prefixes {
        options.handle_prefixes = false;
    }

    Ok(options)
}

/// Execute the process command
fn run_process(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    flags: Flags,
    strict: bool,
    report: Option<&Path>,
) -> ExitCode {
    let options = match resolve_options(config_path, &flags) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let source = match fs::read_to_string(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: Cannot read input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut parsed = parse(&source);
    let mut diags = Diagnostics::new();
    Engine::new(options).process(&mut parsed.stylesheet, &mut diags);

    for warning in &parsed.warnings {
        eprintln!("Warning: line {}: {}", warning.line, warning.message);
    }
    for warning in diags.warnings() {
        eprintln!("Warning: {}", warning);
    }

    if let Some(path) = report {
        let body = Report { parse_warnings: &parsed.warnings, warnings: diags.warnings() };
        let json = match serde_json::to_string_pretty(&body) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error: Cannot serialize report: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        };
        if let Err(e) = fs::write(path, json) {
            eprintln!("Error: Cannot write report '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let css = parsed.stylesheet.to_css();
    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &css) {
                eprintln!("Error: Cannot write output file '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        None => print!("{}", css),
    }

    if strict && (!parsed.warnings.is_empty() || !diags.is_empty()) {
        let total = parsed.warnings.len() + diags.len();
        eprintln!("Error: {} warning(s) in strict mode", total);
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}
