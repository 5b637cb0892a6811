use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;

use nfhs_dashboard::data::{
    filter_exact, kpi, load_file, load_with_columns, longitudinal, CellValue, FilterSelection,
    KeyColumns, LoadError,
};

const SURVEY_CSV: &str = "\
India/States/UTs,Survey,Area,X,Code
Bihar,NFHS-4,Rural,10.0,BR
Bihar,NFHS-5,Rural,12.5,BR
Kerala,NFHS-5,Rural,,KL
";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn loads_csv_with_types_and_indicators() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "survey.csv", SURVEY_CSV);

    let table = load_file(&path).expect("load csv");
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.columns(),
        &["India/States/UTs", "Survey", "Area", "X", "Code"]
    );
    assert_eq!(table.numeric_columns(), &["X".to_string()]);
    assert_eq!(table.records()[2].value("X"), &CellValue::Null);
    assert_eq!(table.records()[1].value("X"), &CellValue::Float(12.5));
}

#[test]
fn csv_na_markers_keep_column_numeric() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "survey.csv",
        "India/States/UTs,Survey,Area,X\nBihar,NFHS-5,Rural,10.0\nGoa,NFHS-5,Rural,NA\n",
    );

    let table = load_file(&path).unwrap();
    assert_eq!(table.numeric_columns(), &["X".to_string()]);
    assert_eq!(table.records()[1].value("X"), &CellValue::Null);

    let rows = filter_exact(&table, &FilterSelection::new("Goa", "NFHS-5", "Rural"));
    assert!(kpi(&rows, "X").is_err());
}

#[test]
fn loads_xlsx_skipping_blank_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Row 0 left blank; header on row 1 repeats "X".
    for (col, name) in ["India/States/UTs", "Survey", "Area", "X", "X"].iter().enumerate() {
        sheet.write_string(1, col as u16, *name).unwrap();
    }
    let data: [(&str, &str, f64, &str); 2] = [
        ("Bihar", "NFHS-5", 12.5, "NA"),
        ("Kerala", "NFHS-5", 3.0, "n/a"),
    ];
    // Row 3 left blank between the two data rows.
    for ((region, survey, x, dup), row) in data.iter().zip([2u32, 4]) {
        sheet.write_string(row, 0, *region).unwrap();
        sheet.write_string(row, 1, *survey).unwrap();
        sheet.write_string(row, 2, "Total").unwrap();
        sheet.write_number(row, 3, *x).unwrap();
        sheet.write_string(row, 4, *dup).unwrap();
    }
    workbook.save(&path).unwrap();

    let table = load_file(&path).expect("load xlsx");
    assert_eq!(
        table.columns(),
        &["India/States/UTs", "Survey", "Area", "X", "X.1"]
    );
    assert_eq!(table.len(), 2);
    assert_eq!(
        table.regions(),
        &[CellValue::from("Bihar"), CellValue::from("Kerala")]
    );
    assert_eq!(
        table.numeric_columns(),
        &["X".to_string(), "X.1".to_string()]
    );
    assert!(table.records()[0].value("X.1").is_null());

    let rows = filter_exact(&table, &FilterSelection::new("Kerala", "NFHS-5", "Total"));
    assert_eq!(kpi(&rows, "X").unwrap().value, 3.0);
}

#[test]
fn bihar_trend_and_kpi() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "survey.csv", SURVEY_CSV);
    let table = load_file(&path).unwrap();

    let trend = longitudinal(&table, &"Bihar".into(), &"Rural".into());
    assert_eq!(trend.indices(), &[0, 1]);

    let rows = filter_exact(&table, &FilterSelection::new("Bihar", "NFHS-5", "Rural"));
    assert_eq!(kpi(&rows, "X").unwrap().value, 12.5);
}

#[test]
fn loading_twice_gives_equal_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "survey.csv", SURVEY_CSV);
    assert_eq!(load_file(&path).unwrap(), load_file(&path).unwrap());
}

#[test]
fn loads_records_oriented_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "survey.json",
        r#"[
            {"India/States/UTs": "Goa", "Survey": "NFHS-5", "Area": "Urban", "X": 4},
            {"India/States/UTs": "Goa", "Survey": "NFHS-4", "Area": "Urban", "X": 3.5, "Y": null}
        ]"#,
    );
    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.columns().last().map(String::as_str), Some("Y"));
    assert_eq!(table.records()[0].value("X"), &CellValue::Integer(4));
    assert!(table.records()[0].value("Y").is_null());
    assert_eq!(table.numeric_columns(), &["X".to_string(), "Y".to_string()]);
}

#[test]
fn loads_parquet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("India/States/UTs", DataType::Utf8, false),
        Field::new("Survey", DataType::Utf8, false),
        Field::new("Area", DataType::Utf8, false),
        Field::new("X", DataType::Float64, true),
        Field::new("Count", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Bihar", "Bihar"])),
            Arc::new(StringArray::from(vec!["NFHS-4", "NFHS-5"])),
            Arc::new(StringArray::from(vec!["Rural", "Rural"])),
            Arc::new(Float64Array::from(vec![Some(10.0), None])),
            Arc::new(Int64Array::from(vec![7, 9])),
        ],
    )
    .unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].value("X"), &CellValue::Float(10.0));
    assert!(table.records()[1].value("X").is_null());
    assert_eq!(table.records()[1].value("Count"), &CellValue::Integer(9));
    assert_eq!(
        table.surveys(),
        &[CellValue::from("NFHS-4"), CellValue::from("NFHS-5")]
    );
}

#[test]
fn custom_key_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "survey.csv", "State,Wave,Area,X\nGoa,NFHS-5,Total,1.25\n");
    assert!(matches!(
        load_file(&path),
        Err(LoadError::MissingColumn(c)) if c == "India/States/UTs"
    ));

    let keys = KeyColumns {
        region: "State".into(),
        survey: "Wave".into(),
        area: "Area".into(),
    };
    let table = load_with_columns(&path, &keys).unwrap();
    let rows = filter_exact(&table, &FilterSelection::new("Goa", "NFHS-5", "Total"));
    assert_eq!(kpi(&rows, "X").unwrap().value, 1.25);
}

#[test]
fn load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.xlsx");
    assert!(matches!(load_file(&missing), Err(LoadError::NotFound { .. })));

    let txt = write(dir.path(), "notes.txt", "hello");
    assert!(matches!(
        load_file(&txt),
        Err(LoadError::UnsupportedFormat(ext)) if ext == "txt"
    ));

    let broken = write(dir.path(), "broken.xlsx", "not a zip archive");
    assert!(matches!(load_file(&broken), Err(LoadError::Parse { .. })));

    let bad_json = write(dir.path(), "bad.json", "{\"not\": \"an array\"}");
    let err = load_file(&bad_json).unwrap_err();
    assert!(err.to_string().contains("Expected top-level JSON array"));

    let empty = write(dir.path(), "empty.json", "[]");
    assert!(matches!(load_file(&empty), Err(LoadError::Empty { .. })));
}
