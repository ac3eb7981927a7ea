use censo_tools::ScanError;
use censo_tools::extract::{self, EMPTY_MARKER, NOT_AVAILABLE};
use censo_tools::failure::{MemoryFailureSink, ScanFailure};
use censo_tools::model::{Cell, Document, Record, Sheet};
use censo_tools::summary;

fn sheet(name: &str, rows: &[&[&str]]) -> Sheet {
    Sheet::new(
        name,
        rows.iter()
            .map(|row| row.iter().map(|cell| Cell::text(*cell)).collect())
            .collect(),
    )
}

/// Builds a sheet shaped like the real skill forms: labels in the first
/// rows, technology entries in column B of rows 11-20.
fn form_sheet(name: &str, team: &str, collaborator: &str, role: &str, techs: &[&str]) -> Sheet {
    Sheet::new(name, form_rows(team, collaborator, role, techs))
}

fn form_rows(team: &str, collaborator: &str, role: &str, techs: &[&str]) -> Vec<Vec<Cell>> {
    let mut rows = vec![
        vec![Cell::text("Equipe"), Cell::text(team)],
        vec![Cell::text("Colaborador"), Cell::text(collaborator)],
        vec![Cell::text("Função Principal"), Cell::text(role)],
    ];
    while rows.len() < 10 {
        rows.push(vec![Cell::empty(), Cell::empty()]);
    }
    for idx in 0..10 {
        let value = techs.get(idx).copied().unwrap_or("");
        rows.push(vec![Cell::empty(), Cell::text(value)]);
    }
    rows
}

fn extract_all(document: &Document) -> (Vec<Record>, MemoryFailureSink) {
    let mut sink = MemoryFailureSink::default();
    let records = extract::extract(document, &mut sink);
    (records, sink)
}

#[test]
fn emits_one_record_per_technology() {
    let document = Document::new(
        "squad.ods",
        vec![form_sheet(
            "Maria",
            "Plataforma",
            "Maria Souza",
            "Dev",
            &["Python", "Rust", "Rust"],
        )],
    );

    let (records, sink) = extract_all(&document);

    assert!(sink.failures.is_empty());
    assert_eq!(
        records,
        vec![
            Record::new("Plataforma", "Maria Souza", "Dev", "Python"),
            Record::new("Plataforma", "Maria Souza", "Dev", "Rust"),
            Record::new("Plataforma", "Maria Souza", "Dev", "Rust"),
        ]
    );
}

#[test]
fn missing_keywords_default_all_fields_to_na() {
    let rows: Vec<&[&str]> = vec![&["", ""]; 20];
    let document = Document::new("squad.ods", vec![sheet("vazia", &rows)]);

    let (records, sink) = extract_all(&document);

    assert!(sink.failures.is_empty());
    assert_eq!(
        records,
        vec![Record::new(
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            NOT_AVAILABLE,
            EMPTY_MARKER
        )]
    );
}

#[test]
fn blank_anchored_neighbor_defaults_to_na() {
    let document = Document::new(
        "squad.ods",
        vec![form_sheet("Maria", "   ", "Maria Souza", "Dev", &["Python"])],
    );

    let (records, _) = extract_all(&document);

    assert_eq!(
        records,
        vec![Record::new(NOT_AVAILABLE, "Maria Souza", "Dev", "Python")]
    );
}

#[test]
fn anchored_lookup_takes_first_match_in_row_major_order() {
    let mut rows = form_rows("Primeira", "Maria Souza", "Dev", &["Python"]);
    // A second "equipe" label further down must lose to the first one.
    rows[5] = vec![Cell::text("Equipe"), Cell::text("Segunda")];
    let document = Document::new("squad.ods", vec![Sheet::new("Maria", rows)]);

    let (records, _) = extract_all(&document);

    assert_eq!(records[0].team, "Primeira");
}

#[test]
fn anchored_lookup_scans_columns_within_a_row_first() {
    let mut rows = form_rows("ignored", "Maria Souza", "Dev", &["Python"]);
    rows[0] = vec![
        Cell::text("Equipe"),
        Cell::text("Esquerda"),
        Cell::text("Equipe"),
        Cell::text("Direita"),
    ];
    let document = Document::new("squad.ods", vec![Sheet::new("Maria", rows)]);

    let (records, _) = extract_all(&document);

    assert_eq!(records[0].team, "Esquerda");
}

#[test]
fn keyword_in_last_column_yields_na() {
    let mut rows = form_rows("ignored", "Maria Souza", "Dev", &["Python"]);
    rows[0] = vec![Cell::empty(), Cell::text("Equipe")];
    let document = Document::new("squad.ods", vec![Sheet::new("Maria", rows)]);

    let (records, sink) = extract_all(&document);

    assert!(sink.failures.is_empty());
    assert_eq!(records[0].team, NOT_AVAILABLE);
}

#[test]
fn placeholder_and_blank_technologies_are_excluded() {
    let document = Document::new(
        "squad.ods",
        vec![form_sheet(
            "Maria",
            "Plataforma",
            "Maria Souza",
            "Dev",
            &[
                " selecione ",
                "SELECIONE",
                "Selecione",
                "",
                "Selecionado",
                "Python",
            ],
        )],
    );

    let (records, _) = extract_all(&document);

    let technologies: Vec<&str> = records
        .iter()
        .map(|record| record.technology.as_str())
        .collect();
    assert_eq!(technologies, vec!["Selecionado", "Python"]);
}

#[test]
fn sheet_without_technologies_emits_empty_sentinel() {
    let document = Document::new(
        "squad.ods",
        vec![form_sheet(
            "Maria",
            "Plataforma",
            "Maria Souza",
            "Dev",
            &["Selecione"; 10],
        )],
    );

    let (records, _) = extract_all(&document);

    assert_eq!(
        records,
        vec![Record::new("Plataforma", "Maria Souza", "Dev", EMPTY_MARKER)]
    );
}

#[test]
fn short_sheet_is_skipped_and_logged() {
    let mut rows = form_rows("Plataforma", "Maria Souza", "Dev", &["Python"]);
    rows.truncate(12);
    let document = Document::new("squad.ods", vec![Sheet::new("Maria", rows)]);

    let (records, sink) = extract_all(&document);

    assert!(records.is_empty());
    assert_eq!(sink.failures.len(), 1);
    match &sink.failures[0] {
        ScanFailure::Sheet {
            document, sheet, ..
        } => {
            assert_eq!(document, "squad.ods");
            assert_eq!(sheet, "Maria");
        }
        other => panic!("unexpected failure kind: {other:?}"),
    }
}

#[test]
fn malformed_cell_skips_only_the_affected_sheet() {
    let mut bad_rows = form_rows("Plataforma", "Maria Souza", "Dev", &["Python"]);
    bad_rows[12][1] = Cell::Error("#DIV/0!".into());
    let document = Document::new(
        "squad.ods",
        vec![
            Sheet::new("quebrada", bad_rows),
            form_sheet("sólida", "Dados", "João Lima", "Analista", &["SQL"]),
        ],
    );

    let (records, sink) = extract_all(&document);

    assert_eq!(
        records,
        vec![Record::new("Dados", "João Lima", "Analista", "SQL")]
    );
    assert_eq!(sink.failures.len(), 1);
}

#[test]
fn duplicate_normalized_sheet_names_collapse_to_the_last() {
    let document = Document::new(
        "squad.ods",
        vec![
            form_sheet("Maria ", "Plataforma", "Maria Souza", "Dev", &["Python"]),
            form_sheet(" maria", "Plataforma", "Maria Silva", "Dev", &["Rust"]),
        ],
    );

    let (records, _) = extract_all(&document);

    assert_eq!(
        records,
        vec![Record::new("Plataforma", "Maria Silva", "Dev", "Rust")]
    );
}

#[test]
fn sheets_are_processed_in_normalized_name_order() {
    let document = Document::new(
        "squad.ods",
        vec![
            form_sheet("Zeca", "Dados", "Zeca Prado", "Analista", &["SQL"]),
            form_sheet("Ana", "Dados", "Ana Reis", "Dev", &["Python"]),
        ],
    );

    let (records, _) = extract_all(&document);

    assert_eq!(records[0].collaborator, "Ana Reis");
    assert_eq!(records[1].collaborator, "Zeca Prado");
}

#[test]
fn summary_round_trip_counts_distinct_collaborators() {
    let records = vec![
        Record::new("A", "John Doe", "Dev", "Python"),
        Record::new("A", "Jane Roe", "Dev", "Empty"),
    ];

    let summaries = summary::summarize(&records).expect("summary computed");

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].team, "A");
    assert_eq!(summaries[0].collaborator_count, 2);
    let mut first_names = summaries[0].first_names.clone();
    first_names.sort();
    assert_eq!(first_names, vec!["Jane", "John"]);
}

#[test]
fn summary_collapses_exact_duplicate_collaborators_only() {
    let records = vec![
        Record::new("A", "John Doe", "Dev", "Python"),
        Record::new("A", "John Doe", "Dev", "Rust"),
        Record::new("A", "john doe", "Dev", "SQL"),
    ];

    let summaries = summary::summarize(&records).expect("summary computed");

    assert_eq!(summaries[0].collaborator_count, 2);
}

#[test]
fn summary_counts_are_invariant_under_record_order() {
    let mut records = vec![
        Record::new("A", "John Doe", "Dev", "Python"),
        Record::new("B", "Jane Roe", "Dev", "Rust"),
        Record::new("A", "Mary Major", "QA", "Empty"),
    ];
    let forward = summary::summarize(&records).expect("summary computed");
    records.reverse();
    let backward = summary::summarize(&records).expect("summary computed");

    let counts = |summaries: &[summary::TeamSummary]| {
        summaries
            .iter()
            .map(|team| (team.team.clone(), team.collaborator_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(counts(&forward), counts(&backward));
}

#[test]
fn summary_reports_teams_in_sorted_order() {
    let records = vec![
        Record::new("Beta", "John Doe", "Dev", "Python"),
        Record::new("Alfa", "Jane Roe", "Dev", "Rust"),
    ];

    let summaries = summary::summarize(&records).expect("summary computed");

    let teams: Vec<&str> = summaries.iter().map(|team| team.team.as_str()).collect();
    assert_eq!(teams, vec!["Alfa", "Beta"]);
}

#[test]
fn summary_fails_on_collaborator_without_first_name_token() {
    let records = vec![Record::new("A", "   ", "Dev", "Python")];

    let error = summary::summarize(&records).expect_err("blank collaborator must fail");

    match error {
        ScanError::MalformedName { team } => assert_eq!(team, "A"),
        other => panic!("unexpected error: {other}"),
    }
}
