//! Ingestion Module Tests
//!
//! Validates the delimited reader and the loader that feeds rows into the catalog.
//!
//! ## Test Scopes
//! - **Reader**: Delimiters, quoting, multi-line fields, blank lines, and line numbers.
//! - **Loader**: Header skipping, malformed-row policies, and loading from disk.

#[cfg(test)]
mod tests {
    use crate::catalog::CatalogError;
    use crate::ingestion::loader::{load_catalog, load_catalog_file};
    use crate::ingestion::reader::DelimitedReader;
    use crate::ingestion::types::{parse_encoding, LoadOptions, MalformedPolicy, SourceRow};
    use crate::search::engine::{cutoff_for_year, search, DEFAULT_CUTOFF_YEAR};
    use std::io::{Cursor, Write};

    const HEADER: &str = "ID;Title;Type;Author;Author (full);Age;Acquired;Price;Readers;Decommissioned;Inventory;Due;Genres\n";

    fn line(id: &str, title: &str, author_full: &str, acquired: &str, readers: &str) -> String {
        format!(
            "{};{};Book;Short;{};16+;{};120.00;{};;INV;;fiction#drama\n",
            id, title, author_full, acquired, readers
        )
    }

    fn read_all(text: &str) -> Vec<SourceRow> {
        DelimitedReader::new(Cursor::new(text.as_bytes().to_vec()), ';')
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    // ============================================================
    // READER TESTS
    // ============================================================

    #[test]
    fn test_reader_splits_on_delimiter() {
        let rows = read_all("a;b;c\n1;2;3\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["a", "b", "c"]);
        assert_eq!(rows[1].fields, vec!["1", "2", "3"]);
        assert_eq!(rows[1].line, 2);
    }

    #[test]
    fn test_reader_keeps_empty_fields() {
        let rows = read_all(";;x;\n");
        assert_eq!(rows[0].fields, vec!["", "", "x", ""]);
    }

    #[test]
    fn test_reader_quoted_delimiter_and_escaped_quote() {
        let rows = read_all("\"Smith; John\";\"He said \"\"hi\"\"\";plain\n");
        assert_eq!(rows[0].fields, vec!["Smith; John", "He said \"hi\"", "plain"]);
    }

    #[test]
    fn test_reader_quote_inside_unquoted_field_is_literal() {
        let rows = read_all("ab\"c;d\n");
        assert_eq!(rows[0].fields, vec!["ab\"c", "d"]);
    }

    #[test]
    fn test_reader_multiline_quoted_field() {
        let rows = read_all("1;\"first\nsecond\";x\n2;y;z\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["1", "first\nsecond", "x"]);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[1].line, 3, "Line numbers count physical lines");
    }

    #[test]
    fn test_reader_crlf_and_blank_lines() {
        let rows = read_all("a;b\r\n\r\n\nc;d\r\n");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["c", "d"]);
        assert_eq!(rows[1].line, 4);
    }

    #[test]
    fn test_reader_no_trailing_newline() {
        let rows = read_all("a;b");
        assert_eq!(rows[0].fields, vec!["a", "b"]);
    }

    #[test]
    fn test_reader_unterminated_quote() {
        let result: Result<Vec<_>, _> =
            DelimitedReader::new(Cursor::new(b"x;\"open\nstill open\n".to_vec()), ';').collect();

        assert!(matches!(result, Err(CatalogError::MalformedRow { line: 1, .. })));
    }

    #[test]
    fn test_reader_invalid_utf8_is_malformed() {
        let bytes = b"ok;fine\nok;\xff\n".to_vec();
        let mut reader = DelimitedReader::new(Cursor::new(bytes), ';');

        assert_eq!(reader.next().unwrap().unwrap().fields, vec!["ok", "fine"]);
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_reader_decodes_configured_encoding() {
        // "Пушкин" in windows-1251
        let bytes = b"1;\xcf\xf3\xf8\xea\xe8\xed\n".to_vec();
        let rows: Vec<_> = DelimitedReader::new(Cursor::new(bytes), ';')
            .with_encoding(encoding_rs::WINDOWS_1251)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows[0].fields, vec!["1", "Пушкин"]);
    }

    // ============================================================
    // LOADER TESTS
    // ============================================================

    #[test]
    fn test_loader_skips_header() {
        let text = format!(
            "{}{}{}",
            HEADER,
            line("1", "Dune", "Frank Herbert", "01.02.2019 10:00", "12"),
            line("2", "Solaris", "Stanislaw Lem", "03.04.2020 11:30", "223.3"),
        );

        let catalog = load_catalog(Cursor::new(text), LoadOptions::default()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.stats().total_rows, 2);
        assert_eq!(catalog.get(2).unwrap().readers, 223);
        assert_eq!(catalog.tag_vocabulary(), vec!["drama", "fiction"]);
    }

    #[test]
    fn test_loader_empty_source() {
        let catalog = load_catalog(Cursor::new(String::new()), LoadOptions::default()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_loader_halts_on_malformed_row() {
        let text = format!(
            "{}{}{}",
            HEADER,
            line("1", "Dune", "Frank Herbert", "01.02.2019 10:00", "12"),
            line("2", "Broken", "Nobody", "yesterday", "1"),
        );

        let err = load_catalog(Cursor::new(text), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn test_loader_skip_policy_continues() {
        let text = format!(
            "{}{}{}{}",
            HEADER,
            line("x", "Bad id", "Nobody", "01.02.2019 10:00", "1"),
            "too;few;fields\n",
            line("3", "Dune", "Frank Herbert", "01.02.2019 10:00", "12"),
        );
        let options = LoadOptions {
            policy: MalformedPolicy::Skip,
            ..LoadOptions::default()
        };

        let catalog = load_catalog(Cursor::new(text), options).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stats().skipped_rows, 2);
        assert!(catalog.contains(3));
    }

    #[test]
    fn test_loader_skip_policy_skips_undecodable_line() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"1;\xff;Book\n");
        bytes.extend_from_slice(line("2", "Dune", "Frank Herbert", "01.02.2019 10:00", "12").as_bytes());
        let options = LoadOptions {
            policy: MalformedPolicy::Skip,
            ..LoadOptions::default()
        };

        let catalog = load_catalog(Cursor::new(bytes), options).unwrap();

        assert_eq!(catalog.all_keys(), vec![2]);
        assert_eq!(catalog.stats().skipped_rows, 1);
    }

    #[test]
    fn test_loader_windows_1251_source_is_searchable() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"7;\xc5\xe2\xe3\xe5\xed\xe8\xe9 \xce\xed\xe5\xe3\xe8\xed;Book;");
        bytes.extend_from_slice(b"\xcf\xf3\xf8\xea\xe8\xed;\xcf\xf3\xf8\xea\xe8\xed;12+;");
        bytes.extend_from_slice(b"01.02.2019 10:00;100.00;5;;INV;;\xf0\xee\xec\xe0\xed\n");
        let options = LoadOptions {
            encoding: encoding_rs::WINDOWS_1251,
            ..LoadOptions::default()
        };

        let catalog = load_catalog(Cursor::new(bytes), options).unwrap();

        assert_eq!(catalog.authors().collect::<Vec<_>>(), vec!["Пушкин"]);
        assert_eq!(catalog.get(7).unwrap().title, "Евгений Онегин");
        assert_eq!(catalog.tag_vocabulary(), vec!["роман"]);

        let cutoff = cutoff_for_year(DEFAULT_CUTOFF_YEAR).unwrap();
        let found = search(&catalog, "пушк", cutoff);
        assert_eq!(found.get("Пушкин"), Some(&vec![7]));
    }

    #[test]
    fn test_loader_windows_1251_source_rejected_as_utf8() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"7;Title;Book;\xcf;\xcf;12+;01.02.2019 10:00;1;5;;INV;;x\n");

        let err = load_catalog(Cursor::new(bytes), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_loader_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}{}{}",
            HEADER,
            line("5", "Dune", "Frank Herbert", "01.02.2019 10:00", "12"),
            line("5", "Dune Messiah", "Frank Herbert", "01.02.2019 10:00", "8"),
        )
        .unwrap();

        let catalog = load_catalog_file(file.path(), LoadOptions::default()).unwrap();

        assert_eq!(catalog.all_keys(), vec![5, 6]);
        assert_eq!(catalog.books_by("Frank Herbert"), Some(&[5, 6][..]));
    }

    #[test]
    fn test_loader_missing_file_is_io_error() {
        let err = load_catalog_file(
            std::path::Path::new("/definitely/not/here.csv"),
            LoadOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    // ============================================================
    // POLICY TESTS
    // ============================================================

    #[test]
    fn test_policy_from_str() {
        assert_eq!("halt".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Halt);
        assert_eq!(" SKIP ".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Skip);
        assert!(matches!(
            "ignore".parse::<MalformedPolicy>(),
            Err(CatalogError::Configuration(_))
        ));
    }

    #[test]
    fn test_parse_encoding_labels() {
        assert_eq!(parse_encoding("utf-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(parse_encoding(" cp1251 ").unwrap(), encoding_rs::WINDOWS_1251);
        assert_eq!(parse_encoding("windows-1251").unwrap(), encoding_rs::WINDOWS_1251);
        assert!(matches!(
            parse_encoding("klingon"),
            Err(CatalogError::Configuration(_))
        ));
        assert!(matches!(
            parse_encoding("utf-16le"),
            Err(CatalogError::Configuration(_))
        ));
    }
}
