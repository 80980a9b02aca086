use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use super::*;
use crate::streamer::ByteSource;

/// Build a fixed-column ATOM record with the family's shared offsets.
fn atom_line(
    serial: u32,
    name: &str,
    res: &str,
    chain: char,
    seq: i32,
    xyz: (f64, f64, f64),
    occ: f64,
    col_a: &str,
    col_b: &str,
    element: &str,
) -> String {
    format!(
        "ATOM  {serial:>5} {name:<4} {res:<3} {chain}{seq:>4}    \
         {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{col_a:>6}    {col_b:>6}{element:>2}",
        x = xyz.0,
        y = xyz.1,
        z = xyz.2,
    )
}

fn dx_header(nx: usize, ny: usize, nz: usize) -> String {
    format!(
        "object 1 class gridpositions counts {nx} {ny} {nz}\n\
         origin 0.0 0.0 0.0\n\
         delta 0.5 0.0 0.0\n\
         delta 0.0 0.5 0.0\n\
         delta 0.0 0.0 0.5\n\
         object 2 class gridconnections counts {nx} {ny} {nz}\n\
         object 3 class array type double rank 0 items {} data follows\n",
        nx * ny * nz
    )
}

fn dxbin_payload(nx: usize, ny: usize, nz: usize, samples: &[f64]) -> Vec<u8> {
    let mut bytes = dx_header(nx, ny, nz).into_bytes();
    for value in samples {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

fn parse(tag: &str, source: ByteSource) -> Result<ParsedRecord, ParseError> {
    FormatRegistry::with_builtin_formats().create(tag, source, &ParserParams::default())?.parse()
}

#[test]
fn unknown_tag_fails_without_fallback() {
    let registry = FormatRegistry::with_builtin_formats();
    let source = ByteSource::from_text("x", "data");
    let err = registry
        .create("unknown-tag", source, &ParserParams::default())
        .err()
        .expect("unregistered tag must fail");
    assert!(matches!(err, ParseError::UnknownFormat(tag) if tag == "unknown-tag"));
}

#[test]
fn builtin_tags_are_registered() {
    let registry = FormatRegistry::with_builtin_formats();
    assert_eq!(
        registry.tags(),
        vec!["dx", "dxbin", "pdb", "pdbqt", "pqr", "text"]
    );
    assert!(registry.contains("dxbin"));
    assert!(!registry.contains("mmcif"));
}

#[test]
fn duplicate_registration_last_wins() {
    let mut registry = FormatRegistry::new();
    registry.register("mol", |source, params| {
        Box::new(TextParser::new(source, params))
    });
    registry.register("mol", |source, params| {
        Box::new(PdbLikeParser::pdb(source, params))
    });
    let parser = registry
        .create("mol", ByteSource::from_text("x", ""), &ParserParams::default())
        .expect("tag is registered");
    assert_eq!(parser.tag(), "pdb");
}

#[test]
fn text_parser_captures_verbatim() {
    let source = ByteSource::from_text("notes.txt", "REMARK free-form\ncontent").with_path("/tmp/notes.txt");
    match parse("text", source).expect("text never fails structurally") {
        ParsedRecord::Text(record) => {
            assert_eq!(record.name, "notes.txt");
            assert_eq!(record.path, "/tmp/notes.txt");
            assert_eq!(record.data, "REMARK free-form\ncontent");
        }
        other => panic!("expected text record, got {other:?}"),
    }
}

#[test]
fn params_override_source_identity() {
    let params = ParserParams {
        name: Some("renamed".to_string()),
        ..ParserParams::default()
    };
    let registry = FormatRegistry::with_builtin_formats();
    let parser = registry
        .create("text", ByteSource::from_text("orig", "x"), &params)
        .expect("tag is registered");
    match parser.parse().expect("parse succeeds") {
        ParsedRecord::Text(record) => assert_eq!(record.name, "renamed"),
        other => panic!("expected text record, got {other:?}"),
    }
}

#[test]
fn pdb_reads_standard_columns() {
    let text = format!(
        "HEADER    test structure\n{}\n{}\nTER\n",
        atom_line(1, "N", "ALA", 'A', 1, (11.0, 12.0, 13.0), 1.0, "20.00", "", "N"),
        atom_line(2, "CA", "ALA", 'A', 1, (12.5, 12.0, 13.0), 0.5, "21.50", "", "C"),
    );
    match parse("pdb", ByteSource::from_text("m.pdb", text)).expect("well-formed pdb") {
        ParsedRecord::Structure(record) => {
            assert_eq!(record.format_tag, "pdb");
            assert_eq!(record.atoms.len(), 2);
            let ca = &record.atoms[1];
            assert_eq!(ca.serial, 2);
            assert_eq!(ca.name, "CA");
            assert_eq!(ca.res_name, "ALA");
            assert_eq!(ca.chain_id, Some('A'));
            assert_eq!(ca.res_seq, 1);
            assert!((ca.x - 12.5).abs() < 1e-6);
            assert!((ca.occupancy - 0.5).abs() < 1e-6);
            assert_eq!(ca.temp_factor, Some(21.5));
            assert_eq!(ca.partial_charge, None);
            assert_eq!(ca.type_tag, None);
            assert_eq!(ca.element, "C");
            assert!(!ca.hetero);
        }
        other => panic!("expected structure record, got {other:?}"),
    }
}

#[test]
fn pdbqt_remaps_charge_and_type_columns() {
    let text = atom_line(1, "NA", "RES", 'A', 1, (0.0, 0.0, 0.0), 1.0, "NA", "-0.347", "");
    match parse("pdbqt", ByteSource::from_text("m.pdbqt", text)).expect("well-formed pdbqt") {
        ParsedRecord::Structure(record) => {
            assert_eq!(record.format_tag, "pdbqt");
            let atom = &record.atoms[0];
            assert_eq!(atom.temp_factor, None);
            assert_eq!(atom.partial_charge, Some(-0.347));
            assert_eq!(atom.type_tag.as_deref(), Some("NA"));
            // Element column empty: falls back to the atom name.
            assert_eq!(atom.element, "N");
        }
        other => panic!("expected structure record, got {other:?}"),
    }
}

#[test]
fn pqr_shares_columns_with_pdb() {
    let line = atom_line(7, "O", "HOH", 'B', 42, (1.0, 2.0, 3.0), 1.0, "15.00", "", "O");
    let pdb = parse("pdb", ByteSource::from_text("m", line.clone())).expect("pdb parses");
    let pqr = parse("pqr", ByteSource::from_text("m", line)).expect("pqr parses");
    match (pdb, pqr) {
        (ParsedRecord::Structure(pdb), ParsedRecord::Structure(pqr)) => {
            assert_eq!(pdb.format_tag, "pdb");
            assert_eq!(pqr.format_tag, "pqr");
            assert_eq!(pdb.atoms.len(), pqr.atoms.len());
            assert_eq!(pdb.atoms[0].temp_factor, pqr.atoms[0].temp_factor);
            assert_eq!(pdb.atoms[0].serial, pqr.atoms[0].serial);
        }
        other => panic!("expected structure records, got {other:?}"),
    }
}

#[test]
fn hetatm_records_are_flagged() {
    let line = atom_line(1, "FE", "HEM", 'A', 1, (0.0, 0.0, 0.0), 1.0, "10.00", "", "FE")
        .replacen("ATOM  ", "HETATM", 1);
    match parse("pdb", ByteSource::from_text("m", line)).expect("hetatm parses") {
        ParsedRecord::Structure(record) => assert!(record.atoms[0].hetero),
        other => panic!("expected structure record, got {other:?}"),
    }
}

#[test]
fn malformed_atom_records_are_skipped() {
    let text = format!(
        "ATOM      1  CA  ALA A   1 not-a-coordinate\n{}\n",
        atom_line(2, "CB", "ALA", 'A', 1, (1.0, 1.0, 1.0), 1.0, "0.00", "", "C"),
    );
    match parse("pdb", ByteSource::from_text("m", text)).expect("parse keeps going") {
        ParsedRecord::Structure(record) => {
            assert_eq!(record.atoms.len(), 1);
            assert_eq!(record.atoms[0].serial, 2);
        }
        other => panic!("expected structure record, got {other:?}"),
    }
}

#[test]
fn first_model_only_stops_at_endmdl() {
    let text = format!(
        "MODEL     1\n{}\nENDMDL\nMODEL     2\n{}\nENDMDL\n",
        atom_line(1, "CA", "ALA", 'A', 1, (0.0, 0.0, 0.0), 1.0, "0.00", "", "C"),
        atom_line(2, "CA", "ALA", 'A', 1, (5.0, 0.0, 0.0), 1.0, "0.00", "", "C"),
    );
    let registry = FormatRegistry::with_builtin_formats();

    let all = registry
        .create("pdb", ByteSource::from_text("m", text.clone()), &ParserParams::default())
        .and_then(|parser| parser.parse())
        .expect("both models parse");
    let first_only = registry
        .create(
            "pdb",
            ByteSource::from_text("m", text),
            &ParserParams {
                first_model_only: Some(true),
                ..ParserParams::default()
            },
        )
        .and_then(|parser| parser.parse())
        .expect("first model parses");

    match (all, first_only) {
        (ParsedRecord::Structure(all), ParsedRecord::Structure(first)) => {
            assert_eq!(all.atoms.len(), 2);
            assert_eq!(first.atoms.len(), 1);
        }
        other => panic!("expected structure records, got {other:?}"),
    }
}

#[test]
fn c_alpha_only_filters_other_atoms() {
    let text = format!(
        "{}\n{}\n",
        atom_line(1, "N", "GLY", 'A', 1, (0.0, 0.0, 0.0), 1.0, "0.00", "", "N"),
        atom_line(2, "CA", "GLY", 'A', 1, (1.0, 0.0, 0.0), 1.0, "0.00", "", "C"),
    );
    let record = FormatRegistry::with_builtin_formats()
        .create(
            "pdb",
            ByteSource::from_text("m", text),
            &ParserParams {
                c_alpha_only: Some(true),
                ..ParserParams::default()
            },
        )
        .and_then(|parser| parser.parse())
        .expect("parse succeeds");
    match record {
        ParsedRecord::Structure(record) => {
            assert_eq!(record.atoms.len(), 1);
            assert_eq!(record.atoms[0].name, "CA");
        }
        other => panic!("expected structure record, got {other:?}"),
    }
}

#[test]
fn dx_text_grid_parses_ascii_samples() {
    let text = format!("{}1.5 2.5 3.5\n4.5\n", dx_header(2, 2, 1));
    match parse("dx", ByteSource::from_text("g.dx", text)).expect("well-formed dx") {
        ParsedRecord::Volume(record) => {
            assert_eq!(
                (record.header.nx, record.header.ny, record.header.nz),
                (2, 2, 1)
            );
            assert_eq!(record.data, vec![1.5, 2.5, 3.5, 4.5]);
            assert_eq!(record.header.delta, [0.5, 0.5, 0.5]);
        }
        other => panic!("expected volume record, got {other:?}"),
    }
}

#[test]
fn dx_text_with_missing_samples_is_truncated() {
    let text = format!("{}1.0 2.0\n", dx_header(2, 2, 1));
    let err = parse("dx", ByteSource::from_text("g.dx", text)).expect_err("two samples short");
    assert!(matches!(
        err,
        ParseError::TruncatedData {
            expected: 4,
            actual: 2
        }
    ));
}

#[test]
fn dxbin_decodes_little_endian_samples() {
    let samples: Vec<f64> = (1..=8).map(f64::from).collect();
    let payload = dxbin_payload(2, 2, 2, &samples);
    let header_len = dx_header(2, 2, 2).len();
    match parse("dxbin", ByteSource::from_bytes("g.dxbin", payload)).expect("well-formed dxbin") {
        ParsedRecord::Volume(record) => {
            assert_eq!(
                (record.header.nx, record.header.ny, record.header.nz),
                (2, 2, 2)
            );
            assert_eq!(record.header_byte_count, header_len);
            assert_eq!(
                record.data,
                vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]
            );
        }
        other => panic!("expected volume record, got {other:?}"),
    }
}

#[test]
fn dxbin_without_extents_line_is_malformed() {
    let payload =
        b"object 3 class array type double rank 0 items 8 data follows\n".to_vec();
    let err =
        parse("dxbin", ByteSource::from_bytes("g", payload)).expect_err("no extents declared");
    assert!(matches!(err, ParseError::MalformedHeader(_)));
}

#[test]
fn dxbin_with_unparsable_extents_is_malformed() {
    let payload = b"object 1 class gridpositions counts two two two\n".to_vec();
    let err = parse("dxbin", ByteSource::from_bytes("g", payload)).expect_err("bad extents");
    assert!(matches!(err, ParseError::MalformedHeader(_)));
}

#[test]
fn dxbin_without_data_marker_is_malformed() {
    let payload = b"object 1 class gridpositions counts 2 2 2\norigin 0 0 0\n".to_vec();
    let err = parse("dxbin", ByteSource::from_bytes("g", payload)).expect_err("no object 3");
    assert!(matches!(err, ParseError::MalformedHeader(_)));
}

#[test]
fn dxbin_short_sample_block_is_truncated() {
    let samples: Vec<f64> = (1..=4).map(f64::from).collect();
    let payload = dxbin_payload(2, 2, 2, &samples);
    let err = parse("dxbin", ByteSource::from_bytes("g", payload)).expect_err("half the samples");
    assert!(matches!(err, ParseError::TruncatedData { .. }));
}

#[test]
fn dxbin_probe_window_can_be_overridden() {
    let samples: Vec<f64> = (1..=8).map(f64::from).collect();
    let payload = dxbin_payload(2, 2, 2, &samples);
    // A probe window too small to reach the data marker fails the header scan.
    let err = FormatRegistry::with_builtin_formats()
        .create(
            "dxbin",
            ByteSource::from_bytes("g", payload),
            &ParserParams {
                header_probe_bytes: Some(16),
                ..ParserParams::default()
            },
        )
        .and_then(|parser| parser.parse())
        .expect_err("probe window excludes the marker");
    assert!(matches!(err, ParseError::MalformedHeader(_)));
}

#[test]
fn gzipped_pdb_parses_end_to_end() {
    let text = format!(
        "{}\n",
        atom_line(1, "CA", "ALA", 'A', 1, (1.0, 2.0, 3.0), 1.0, "8.00", "", "C")
    );
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).expect("in-memory write");
    let compressed = encoder.finish().expect("in-memory finish");

    match parse("pdb", ByteSource::from_bytes("m.pdb.gz", compressed)).expect("gzip pdb parses") {
        ParsedRecord::Structure(record) => {
            assert_eq!(record.atoms.len(), 1);
            assert_eq!(record.atoms[0].temp_factor, Some(8.0));
        }
        other => panic!("expected structure record, got {other:?}"),
    }
}
