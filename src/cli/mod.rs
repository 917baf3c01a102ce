pub mod config;
pub mod logger;

pub use config::{Config, read_source_file, write_output};
