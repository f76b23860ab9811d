use super::*;
use crate::error::RowRejection;

fn row(pairs: &[(&str, &str)]) -> RawRow {
    RawRow::from_pairs(pairs.iter().copied())
}

#[test]
fn canonical_column_normalizes_and_maps_aliases() {
    assert_eq!(canonical_column("  Disease "), "disease");
    assert_eq!(canonical_column("\u{feff}maladie"), "disease");
    assert_eq!(canonical_column("Année"), "year");
    assert_eq!(canonical_column("INDICATEUR"), "indicator");
    assert_eq!(canonical_column("Département"), "region");
    assert_eq!(canonical_column("Unité"), "unit");
    assert_eq!(canonical_column("Source  File"), "source_file");
}

#[test]
fn valid_row_becomes_observation() {
    let obs = Observation::from_raw(&row(&[
        ("disease", "cancer"),
        ("indicator", "prevalence"),
        ("year", "2018"),
        ("value", "4.5"),
        ("region", "Bretagne"),
        ("unit", "%"),
    ]))
    .unwrap();
    assert_eq!(
        obs,
        Observation::new("cancer", "prevalence", 2018)
            .with_value(Some(4.5))
            .with_region("Bretagne")
            .with_unit("%")
    );
}

#[test]
fn french_headers_are_accepted() {
    let obs = Observation::from_raw(&row(&[
        ("maladie", "diabete"),
        ("indicateur", "incidence"),
        ("annee", "2020"),
        ("valeur", "310"),
    ]))
    .unwrap();
    assert_eq!(obs.disease, "diabete");
    assert_eq!(obs.year, 2020);
    assert_eq!(obs.value, Some(310.0));
}

#[test]
fn missing_or_blank_required_field_rejected() {
    let cases = [
        (row(&[("indicator", "prevalence"), ("year", "2018")]), "disease"),
        (row(&[("disease", "  "), ("indicator", "prevalence"), ("year", "2018")]), "disease"),
        (row(&[("disease", "cancer"), ("year", "2018")]), "indicator"),
        (row(&[("disease", "cancer"), ("indicator", "prevalence"), ("year", "")]), "year"),
    ];
    for (raw, field) in cases {
        assert_eq!(Observation::from_raw(&raw).unwrap_err(), RowRejection::MissingField(field));
    }
}

#[test]
fn non_integer_year_rejected() {
    let raw = row(&[("disease", "cancer"), ("indicator", "prevalence"), ("year", "2018.5")]);
    assert_eq!(
        Observation::from_raw(&raw).unwrap_err(),
        RowRejection::InvalidYear("2018.5".to_owned())
    );
    let raw = row(&[("disease", "cancer"), ("indicator", "prevalence"), ("year", "n/a")]);
    assert!(matches!(Observation::from_raw(&raw), Err(RowRejection::InvalidYear(_))));
}

#[test]
fn integral_float_year_accepted() {
    assert_eq!(parse_year("2018.0"), Ok(2018));
    assert_eq!(parse_year(" 1999 "), Ok(1999));
    assert!(parse_year("1e20").is_err());
}

#[test]
fn malformed_value_loads_as_null() {
    for bad in ["", "   ", "abc", "NaN", "inf"] {
        let raw = row(&[
            ("disease", "cancer"),
            ("indicator", "prevalence"),
            ("year", "2018"),
            ("value", bad),
        ]);
        let obs = Observation::from_raw(&raw).unwrap();
        assert_eq!(obs.value, None, "value {bad:?} should load as null");
    }
}

#[test]
fn zero_value_is_not_null() {
    assert_eq!(parse_value(Some("0")), Some(0.0));
    assert_eq!(parse_value(Some("-0.0")), Some(-0.0));
}

#[test]
fn unit_derived_only_when_column_absent() {
    let absent = row(&[("disease", "cardio"), ("indicator", "mortalite"), ("year", "2019")]);
    assert_eq!(Observation::from_raw(&absent).unwrap().unit.as_deref(), Some("pour 100 000 hab"));

    let blank = row(&[
        ("disease", "cardio"),
        ("indicator", "mortalite"),
        ("year", "2019"),
        ("unite", ""),
    ]);
    assert_eq!(Observation::from_raw(&blank).unwrap().unit, None);

    let unknown = row(&[("disease", "cardio"), ("indicator", "hospitalisations"), ("year", "2019")]);
    assert_eq!(Observation::from_raw(&unknown).unwrap().unit, None);
}
