//! Runtime Configuration
//!
//! Settings for the `book_catalog` binary. Defaults reproduce the classic report run:
//! read `books.csv`, write 20 random citations to `generated_result.txt`, list the 20 most
//! popular books, then answer author queries for books acquired since 2018.
//!
//! Environment variables are read first and command-line flags override them.

use crate::catalog::CatalogError;
use crate::ingestion::types::{
    parse_encoding, LoadOptions, MalformedPolicy, DEFAULT_DELIMITER, DEFAULT_ENCODING,
};
use crate::report::export::{DEFAULT_EXPORT_PATH, DEFAULT_SAMPLE_SIZE};
use crate::search::engine::{cutoff_for_year, DEFAULT_CUTOFF_YEAR};
use chrono::NaiveDateTime;
use encoding_rs::Encoding;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATH: &str = "books.csv";
pub const DEFAULT_TOP_N: usize = 20;

pub const ENV_INPUT: &str = "CATALOG_INPUT";
pub const ENV_OUTPUT: &str = "CATALOG_OUTPUT";
pub const ENV_BIND: &str = "CATALOG_BIND";
pub const ENV_ENCODING: &str = "CATALOG_ENCODING";

pub const USAGE: &str = "Usage: book_catalog [--input <file>] [--output <file>] [--sample <n>] \
[--top <n>] [--cutoff-year <year>] [--delimiter <char>] [--encoding <label>] \
[--on-malformed halt|skip] \
[--serve <addr:port>] [--no-repl]";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub sample_size: usize,
    pub top_n: usize,
    pub cutoff_year: i32,
    pub delimiter: char,
    /// Encoding of the input file, e.g. `utf-8` or `windows-1251`.
    pub encoding: &'static Encoding,
    pub on_malformed: MalformedPolicy,
    /// When set, serve the read-only HTTP API instead of the interactive loop.
    pub serve: Option<SocketAddr>,
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_EXPORT_PATH),
            sample_size: DEFAULT_SAMPLE_SIZE,
            top_n: DEFAULT_TOP_N,
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            delimiter: DEFAULT_DELIMITER,
            encoding: DEFAULT_ENCODING,
            on_malformed: MalformedPolicy::Halt,
            serve: None,
            interactive: true,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the process environment and `args` (without the
    /// program name).
    pub fn from_env_and_args(args: &[String]) -> Result<Self, CatalogError> {
        Self::from_sources(args, |name| std::env::var(name).ok())
    }

    pub fn from_sources<F>(args: &[String], env: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(input) = env(ENV_INPUT) {
            config.input = PathBuf::from(input);
        }
        if let Some(output) = env(ENV_OUTPUT) {
            config.output = PathBuf::from(output);
        }
        if let Some(bind) = env(ENV_BIND) {
            config.serve = Some(parse_value(ENV_BIND, &bind)?);
        }
        if let Some(label) = env(ENV_ENCODING) {
            config.encoding = parse_encoding(&label)?;
        }

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--input" => {
                    config.input = PathBuf::from(flag_value(args, i)?);
                    i += 2;
                }
                "--output" => {
                    config.output = PathBuf::from(flag_value(args, i)?);
                    i += 2;
                }
                "--sample" => {
                    config.sample_size = parse_value("--sample", flag_value(args, i)?)?;
                    i += 2;
                }
                "--top" => {
                    config.top_n = parse_value("--top", flag_value(args, i)?)?;
                    i += 2;
                }
                "--cutoff-year" => {
                    config.cutoff_year = parse_value("--cutoff-year", flag_value(args, i)?)?;
                    i += 2;
                }
                "--delimiter" => {
                    config.delimiter = parse_value("--delimiter", flag_value(args, i)?)?;
                    i += 2;
                }
                "--encoding" => {
                    config.encoding = parse_encoding(flag_value(args, i)?)?;
                    i += 2;
                }
                "--on-malformed" => {
                    config.on_malformed = flag_value(args, i)?.parse()?;
                    i += 2;
                }
                "--serve" => {
                    config.serve = Some(parse_value("--serve", flag_value(args, i)?)?);
                    i += 2;
                }
                "--no-repl" => {
                    config.interactive = false;
                    i += 1;
                }
                other => {
                    return Err(CatalogError::Configuration(format!(
                        "unknown argument {:?}",
                        other
                    )));
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.sample_size == 0 {
            return Err(CatalogError::Configuration(
                "sample size must be at least 1".to_string(),
            ));
        }
        if self.delimiter == '"' || self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(CatalogError::Configuration(format!(
                "{:?} cannot be used as a delimiter",
                self.delimiter
            )));
        }
        self.cutoff()?;
        Ok(())
    }

    /// First instant of `cutoff_year`.
    pub fn cutoff(&self) -> Result<NaiveDateTime, CatalogError> {
        cutoff_for_year(self.cutoff_year).ok_or_else(|| {
            CatalogError::Configuration(format!(
                "cutoff year {} is out of range",
                self.cutoff_year
            ))
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            policy: self.on_malformed,
            encoding: self.encoding,
        }
    }
}

fn flag_value(args: &[String], i: usize) -> Result<&str, CatalogError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| CatalogError::Configuration(format!("{} requires a value", args[i])))
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, CatalogError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| {
        CatalogError::Configuration(format!("invalid value {:?} for {}: {}", raw, name, e))
    })
}
