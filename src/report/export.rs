use crate::catalog::{BookKey, Catalog, CatalogError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_SAMPLE_SIZE: usize = 20;
pub const DEFAULT_EXPORT_PATH: &str = "generated_result.txt";

/// Picks `count` distinct keys uniformly at random, without replacement.
///
/// Asking for more keys than the catalog holds is a configuration error.
pub fn sample_keys<G: Rng + ?Sized>(
    catalog: &Catalog,
    count: usize,
    rng: &mut G,
) -> Result<Vec<BookKey>, CatalogError> {
    let keys = catalog.all_keys();
    if count > keys.len() {
        return Err(CatalogError::Configuration(format!(
            "cannot sample {} distinct books from a catalog of {}",
            count,
            keys.len()
        )));
    }
    Ok(keys.choose_multiple(rng, count).copied().collect())
}

/// `"{index:>2}: {citation}"` for each key, numbered from 0.
pub fn citation_lines(catalog: &Catalog, keys: &[BookKey]) -> Result<Vec<String>, CatalogError> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            catalog
                .get_citation(*key)
                .map(|citation| format!("{:>2}: {}", i, citation))
        })
        .collect()
}

pub fn write_sample<W: Write>(
    out: &mut W,
    catalog: &Catalog,
    keys: &[BookKey],
) -> Result<(), CatalogError> {
    for line in citation_lines(catalog, keys)? {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Samples `count` books and writes their citations to `path`. Returns the sampled keys.
pub fn export_sample_file<G: Rng + ?Sized>(
    catalog: &Catalog,
    count: usize,
    path: &Path,
    rng: &mut G,
) -> Result<Vec<BookKey>, CatalogError> {
    let keys = sample_keys(catalog, count, rng)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_sample(&mut out, catalog, &keys)?;
    out.flush()?;

    tracing::info!("Wrote {} citations to {}", keys.len(), path.display());
    Ok(keys)
}
