use crate::catalog::{Catalog, CatalogError};
use crate::search::types::AuthorMatch;
use std::io::Write;

pub const RULE_WIDTH: usize = 79;

pub fn write_rule<W: Write>(out: &mut W) -> Result<(), CatalogError> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

/// One `# tag` line per distinct tag, sorted.
pub fn write_tags<W: Write>(out: &mut W, catalog: &Catalog) -> Result<(), CatalogError> {
    writeln!(out, "Unique tags:")?;
    for tag in catalog.tag_vocabulary() {
        writeln!(out, "# {}", tag)?;
    }
    write_rule(out)
}

/// Fixed-width table with the book, long-title, and tag counts.
pub fn write_stats<W: Write>(out: &mut W, catalog: &Catalog) -> Result<(), CatalogError> {
    let stats = catalog.stats();
    let rows = [
        ("total books", stats.total_rows),
        ("long titles", stats.long_titles),
        ("unique tags", catalog.tag_count()),
    ];
    for (label, value) in rows {
        writeln!(out, "| {:<16} | {:>5}{:>52}|", label, value, "")?;
    }
    if stats.skipped_rows > 0 {
        writeln!(out, "| {:<16} | {:>5}{:>52}|", "skipped rows", stats.skipped_rows, "")?;
    }
    write_rule(out)
}

/// The `top_n` most read books as `-. {citation}` lines.
pub fn write_popular<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    top_n: usize,
) -> Result<(), CatalogError> {
    writeln!(out, "{} most popular books:", top_n)?;
    for key in catalog.rank_by_popularity(top_n) {
        writeln!(out, "-. {}", catalog.get_citation(key)?)?;
    }
    write_rule(out)
}

/// Every matched author's books as `-. {citation}` lines, or a no-results marker.
pub fn write_matches<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    matches: &[AuthorMatch],
) -> Result<(), CatalogError> {
    if matches.is_empty() {
        writeln!(out, "!. No results")?;
    }
    for m in matches {
        for key in &m.books {
            writeln!(out, "-. {}", catalog.get_citation(*key)?)?;
        }
    }
    write_rule(out)
}
