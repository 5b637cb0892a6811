use proptest::prelude::*;

use nfhs_dashboard::data::model::{normalize_headers, RawTable};
use nfhs_dashboard::data::{
    cross_section, filter_exact, kpi, longitudinal, CellValue, FilterSelection, KeyColumns,
    NoDataReason, RecordTable,
};

const REGIONS: &[&str] = &["Bihar", "Goa", "Kerala"];
const SURVEYS: &[&str] = &["NFHS-4", "NFHS-5"];
const AREAS: &[&str] = &["Urban", "Rural", "Total"];

fn arb_row() -> impl Strategy<Value = (usize, usize, usize, Option<f64>)> {
    (
        0..REGIONS.len(),
        0..SURVEYS.len(),
        0..AREAS.len(),
        prop::option::of(-100.0f64..100.0),
    )
}

fn build(rows: &[(usize, usize, usize, Option<f64>)]) -> RecordTable {
    let raw = RawTable {
        headers: normalize_headers(["India/States/UTs", "Survey", "Area", "X"]),
        rows: rows
            .iter()
            .map(|&(r, s, a, x)| {
                vec![
                    CellValue::from(REGIONS[r]),
                    CellValue::from(SURVEYS[s]),
                    CellValue::from(AREAS[a]),
                    x.map(CellValue::Float).unwrap_or(CellValue::Null),
                ]
            })
            .collect(),
    };
    RecordTable::from_raw(raw, KeyColumns::default()).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_exact_filter_matches_independent_count(
        rows in prop::collection::vec(arb_row(), 0..40),
        r in 0..REGIONS.len(),
        s in 0..SURVEYS.len(),
        a in 0..AREAS.len(),
    ) {
        let table = build(&rows);
        let selection = FilterSelection::new(REGIONS[r], SURVEYS[s], AREAS[a]);
        let result = filter_exact(&table, &selection);

        let expected: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.0 == r && row.1 == s && row.2 == a)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(result.indices(), expected.as_slice());
        for record in result.iter() {
            prop_assert_eq!(record.value("India/States/UTs"), &selection.region);
            prop_assert_eq!(record.value("Survey"), &selection.survey);
            prop_assert_eq!(record.value("Area"), &selection.area);
        }

        match kpi(&result, "X") {
            Ok(k) => {
                let first = rows[expected[0]].3.unwrap();
                prop_assert!((k.value - first).abs() <= 0.005 + 1e-9);
                prop_assert_eq!(k.matching_rows, expected.len());
            }
            Err(e) if expected.is_empty() => {
                prop_assert_eq!(e.reason, NoDataReason::NoMatchingRows);
            }
            Err(e) => {
                prop_assert_eq!(e.reason, NoDataReason::MissingValue);
                prop_assert!(rows[expected[0]].3.is_none());
            }
        }
    }

    #[test]
    fn prop_cross_section_ignores_region(
        rows in prop::collection::vec(arb_row(), 0..40),
        s in 0..SURVEYS.len(),
        a in 0..AREAS.len(),
    ) {
        let table = build(&rows);
        let survey = CellValue::from(SURVEYS[s]);
        let area = CellValue::from(AREAS[a]);
        let result = cross_section(&table, &survey, &area);

        for record in result.iter() {
            prop_assert_eq!(record.value("Survey"), &survey);
            prop_assert_eq!(record.value("Area"), &area);
        }
        let expected = rows.iter().filter(|row| row.1 == s && row.2 == a).count();
        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_longitudinal_ignores_survey(
        rows in prop::collection::vec(arb_row(), 0..40),
        r in 0..REGIONS.len(),
        a in 0..AREAS.len(),
    ) {
        let table = build(&rows);
        let region = CellValue::from(REGIONS[r]);
        let area = CellValue::from(AREAS[a]);
        let result = longitudinal(&table, &region, &area);

        for record in result.iter() {
            prop_assert_eq!(record.value("India/States/UTs"), &region);
            prop_assert_eq!(record.value("Area"), &area);
        }
        let expected = rows.iter().filter(|row| row.0 == r && row.2 == a).count();
        prop_assert_eq!(result.len(), expected);
        prop_assert!(result.indices().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn absent_triple_is_empty_and_no_data() {
    let table = build(&[(0, 0, 0, Some(1.0))]);
    let rows = filter_exact(&table, &FilterSelection::new("Goa", "NFHS-5", "Rural"));
    assert!(rows.is_empty());
    assert_eq!(
        kpi(&rows, "X").unwrap_err().reason,
        NoDataReason::NoMatchingRows
    );
}
