use hirc::backend::CodeBuffer;
use std::{env, fs, io};
use thiserror::Error;

/// Wrong number of command line arguments
#[derive(Debug, Error)]
#[error("usage: hirc <SimpleC_file> <HIR_file>")]
pub struct UsageError;

/// Configuration for the CLI application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_path: String,
    pub output_path: String,
    pub verbose: bool,
    pub show_ast: bool,
}

impl Config {
    /// Parse the positional arguments (program name excluded) and the
    /// `VERBOSE`/`AST` environment variables
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, UsageError> {
        let args: Vec<String> = args.into_iter().collect();
        let [input_path, output_path] = <[String; 2]>::try_from(args).map_err(|_| UsageError)?;

        let verbose = env::var("VERBOSE").is_ok();
        let show_ast = env::var("AST").is_ok();

        Ok(Config {
            input_path,
            output_path,
            verbose,
            show_ast,
        })
    }
}

/// Read the source file from the given path
pub fn read_source_file(file_path: &str) -> Result<String, String> {
    fs::read_to_string(file_path).map_err(|_| format!("File {file_path} not found!"))
}

/// Write the generated HIR in one go, so a failure leaves no partial file
pub fn write_output(file_path: &str, code: &CodeBuffer) -> io::Result<()> {
    let mut rendered = Vec::new();
    code.write_to(&mut rendered)?;
    fs::write(file_path, rendered)
}
