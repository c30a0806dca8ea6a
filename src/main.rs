//! t3d - Command-line tool for rewriting 2D CSS transforms into 3D equivalents

use std::process::ExitCode;

use transform3d::cli;

fn main() -> ExitCode {
    cli::run()
}
