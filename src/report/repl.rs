use super::console;
use crate::catalog::{Catalog, CatalogError};
use crate::search::engine::rank_authors;
use chrono::NaiveDateTime;
use std::io::{BufRead, Write};

const PROMPT: &str = "Search authors: ";

/// Reads queries line by line and prints matching books until an empty line or end of input.
///
/// Returns the number of queries answered.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    catalog: &Catalog,
    cutoff: NaiveDateTime,
) -> Result<usize, CatalogError> {
    writeln!(out, "HELP")?;
    writeln!(out, "-. quit: end of input (Ctrl-D, or Ctrl-Z + Enter on Windows) or an empty line.")?;
    console::write_rule(out)?;

    let mut answered = 0;
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let query = line.trim_end_matches(['\n', '\r']);
        if query.is_empty() {
            break;
        }

        let matches = rank_authors(catalog, query, cutoff);
        tracing::debug!("Query {:?}: {} authors", query, matches.len());
        console::write_matches(out, catalog, &matches)?;
        answered += 1;
    }

    writeln!(out, "Goodbye!")?;
    Ok(answered)
}
