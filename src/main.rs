mod cli;

use cli::{Config, logger, read_source_file, write_output};
use hirc::backend::lower_program;
use hirc::frontend::{check_program, report_check_error};
use hirc::pipeline;
use log::{info, warn};
use std::{env, process};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    // Parse configuration
    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return -1;
        }
    };

    if let Err(e) = logger::init(config.verbose) {
        eprintln!("logger unavailable: {e}");
    }

    // Read the source file
    let src = match read_source_file(&config.input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{e}");
            return -1;
        }
    };

    // [1] Lexing and parsing
    info!("[1] parsing {}", config.input_path);
    let parsed = match pipeline::parse(&src) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Exception occured during parse: {e}");
            return -1;
        }
    };
    for diagnostic in &parsed.errors {
        eprintln!("{diagnostic}");
    }

    // Show detailed AST if requested
    if config.show_ast {
        println!("{:#?}", parsed.program);
    }

    // [2] Name checking
    info!("[2] checking names");
    let check_errors = check_program(&parsed.program);
    for error in &check_errors {
        if let Err(e) = report_check_error(&config.input_path, &src, error) {
            warn!("could not render report: {e}");
            eprintln!("{error}");
        }
    }

    if !parsed.is_clean() || !check_errors.is_empty() {
        eprintln!("Confused by earlier errors: aborting");
        return 0;
    }

    // [3] HIR generation
    info!("[3] generating HIR");
    let code = match lower_program(&parsed.program) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Exception occured during code generation: {e}");
            return -1;
        }
    };

    // [4] Output
    info!("[4] writing {} lines to {}", code.len(), config.output_path);
    if let Err(e) = write_output(&config.output_path, &code) {
        eprintln!("Cannot write {}: {e}", config.output_path);
        return -1;
    }

    println!("Finished!");
    0
}
