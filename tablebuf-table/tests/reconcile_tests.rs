#![allow(non_snake_case)]

use tablebuf_table::{
    Error, FieldBinding, ReconcileOptions, TableBuffer, TableBuilder, Value, buffer_to_records,
    buffer_to_records_with, ingest_first, record,
};
use tablebuf_test_utils::{ScriptedCursor, ScriptedResultSet, init_tracing_for_tests};

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Simple {
        ID: i64,
        Name: String,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct WithAge {
        ID: i64,
        Name: String,
        Age: i32,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct WithSkippedAge {
        ID: i64,
        Name: String,
        #[column = "-"]
        Age: i32,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Tagged {
        #[column = "ID"]
        id: i64,
        #[column = "Name2"]
        alias: String,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct WrongTag {
        ID: i64,
        #[column = "nick"]
        Name: String,
    }
}

record! {
    #[derive(Debug, Default, PartialEq)]
    struct Nullable {
        ID: i64,
        Name: Option<String>,
    }
}

fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> TableBuffer {
    let mut builder = TableBuilder::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        builder.push_row(row).expect("row width");
    }
    builder.finish()
}

fn two_rows() -> TableBuffer {
    table(
        &["ID", "Name"],
        vec![
            vec![Value::Int64(1), "R1".into()],
            vec![Value::Int64(2), "R2".into()],
        ],
    )
}

fn with_extra_column() -> TableBuffer {
    table(
        &["ID", "Name", "Name2"],
        vec![
            vec![Value::Int64(1), "R1".into(), "X1".into()],
            vec![Value::Int64(2), "R2".into(), "X2".into()],
        ],
    )
}

#[test]
fn simple() {
    let got: Vec<Simple> = buffer_to_records(&two_rows()).unwrap();
    assert_eq!(
        got,
        vec![
            Simple { ID: 1, Name: "R1".into() },
            Simple { ID: 2, Name: "R2".into() },
        ]
    );
}

#[test]
fn extra_buffer_columns_are_tolerated_by_default() {
    let got: Vec<Simple> = buffer_to_records(&with_extra_column()).unwrap();
    assert_eq!(
        got,
        vec![
            Simple { ID: 1, Name: "R1".into() },
            Simple { ID: 2, Name: "R2".into() },
        ]
    );
}

#[test]
fn extra_buffer_columns_fail_when_reporting_is_enabled() {
    let options = ReconcileOptions::default().with_report_unused_buffer_columns(true);
    let err = buffer_to_records_with::<Simple>(&with_extra_column(), &options).unwrap_err();
    assert_eq!(err.to_string(), r#"unused fields in query ["Name2"]"#);
}

#[test]
fn empty_column_names_are_not_reported() {
    let table = table(
        &["ID", "", "Name"],
        vec![vec![Value::Int64(1), Value::Null, "R1".into()]],
    );
    let got = buffer_to_records_with::<Simple>(&table, &ReconcileOptions::strict()).unwrap();
    assert_eq!(got, vec![Simple { ID: 1, Name: "R1".into() }]);
}

#[test]
fn extra_struct_field_is_reported() {
    let err = buffer_to_records::<WithAge>(&two_rows()).unwrap_err();
    match &err {
        Error::UnusedStructFields(fields) => assert_eq!(fields, &["Age"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), r#"unused fields in struct ["Age"]"#);
}

#[test]
fn extra_struct_field_is_allowed_when_reporting_is_disabled() {
    let options = ReconcileOptions::default().with_report_unused_struct_fields(false);
    let got = buffer_to_records_with::<WithAge>(&two_rows(), &options).unwrap();
    assert_eq!(got[1], WithAge { ID: 2, Name: "R2".into(), Age: 0 });
}

#[test]
fn skipped_field_is_neither_bound_nor_reported() {
    let table = table(
        &["ID", "Name", "Age"],
        vec![vec![Value::Int64(1), "R1".into(), Value::Int32(40)]],
    );
    let got: Vec<WithSkippedAge> = buffer_to_records(&table).unwrap();
    assert_eq!(
        got,
        vec![WithSkippedAge { ID: 1, Name: "R1".into(), Age: 0 }]
    );

    let got: Vec<WithSkippedAge> = buffer_to_records(&two_rows()).unwrap();
    assert_eq!(got.len(), 2);
}

#[test]
fn tags_bind_to_named_columns() {
    let got: Vec<Tagged> = buffer_to_records(&with_extra_column()).unwrap();
    assert_eq!(
        got,
        vec![
            Tagged { id: 1, alias: "X1".into() },
            Tagged { id: 2, alias: "X2".into() },
        ]
    );
}

#[test]
fn unmatched_tag_is_reported_with_its_value() {
    let err = buffer_to_records::<WrongTag>(&two_rows()).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"unused fields in struct ["Name(tag=nick)"]"#
    );
}

#[test]
fn both_directions_are_reported_together() {
    let options = ReconcileOptions::strict();
    let err = buffer_to_records_with::<WithAge>(&with_extra_column(), &options).unwrap_err();
    match err {
        Error::Multiple(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(&errors[0], Error::UnusedStructFields(f) if f == &["Age"]));
            assert!(matches!(&errors[1], Error::UnusedBufferColumns(c) if c == &["Name2"]));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn all_unused_fields_are_listed() {
    let table = table(&["Other"], vec![vec![Value::Int64(1)]]);
    let err = buffer_to_records::<WithAge>(&table).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"unused fields in struct ["ID", "Name", "Age"]"#
    );
}

#[test]
fn type_mismatch_names_field_and_types() {
    let table = table(
        &["ID", "Name", "Age"],
        vec![vec![Value::Int64(1), "R1".into(), Value::Int64(40)]],
    );
    let err = buffer_to_records::<WithAge>(&table).unwrap_err();
    match err {
        Error::TypeMismatch {
            field,
            expected,
            actual,
        } => {
            assert_eq!(field, "Age");
            assert_eq!(expected, "int32");
            assert_eq!(actual, "int64");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn nulls_fill_option_fields_only() {
    let table = table(
        &["ID", "Name"],
        vec![
            vec![Value::Int64(1), Value::Null],
            vec![Value::Int64(2), "R2".into()],
        ],
    );
    let got: Vec<Nullable> = buffer_to_records(&table).unwrap();
    assert_eq!(
        got,
        vec![
            Nullable { ID: 1, Name: None },
            Nullable { ID: 2, Name: Some("R2".into()) },
        ]
    );

    let err = buffer_to_records::<Simple>(&table).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "null"));
}

#[test]
fn output_follows_row_order() {
    let rows: Vec<Vec<Value>> = (0..50)
        .rev()
        .map(|i| vec![Value::Int64(i), format!("R{i}").into()])
        .collect();
    let table = table(&["ID", "Name"], rows);
    let got: Vec<Simple> = buffer_to_records(&table).unwrap();
    assert_eq!(got.len(), table.len());
    for (record, row) in got.iter().zip(table.rows()) {
        assert_eq!(&Value::Int64(record.ID), row.value("ID"));
        assert_eq!(&Value::from(record.Name.as_str()), row.value("Name"));
    }
}

#[test]
fn empty_result_set_reconciles_to_nothing() {
    init_tracing_for_tests();
    let cursor = ScriptedCursor::new(vec![ScriptedResultSet::new(["ID", "Name"], vec![])]);
    let table = ingest_first(cursor).unwrap();

    let got: Vec<WithAge> = buffer_to_records(&table).unwrap();
    assert!(got.is_empty());
    let got = buffer_to_records_with::<Simple>(&table, &ReconcileOptions::strict()).unwrap();
    assert!(got.is_empty());
}

#[test]
fn binding_is_reusable_across_tables_with_same_layout() {
    let binding = FieldBinding::<Simple>::bind(&two_rows(), &ReconcileOptions::default()).unwrap();
    let other = table(&["ID", "Name"], vec![vec![Value::Int64(7), "R7".into()]]);
    assert_eq!(
        binding.decode_all(&other).unwrap(),
        vec![Simple { ID: 7, Name: "R7".into() }]
    );
}
