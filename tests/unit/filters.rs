//! Filter stage over the driver fixtures, plus the textual and JSON forms.

use super::common::{date, ids, sample_drivers};
use tabula::filter::active_count;
use tabula::{apply_filters, FieldFilter, MapRecord, QueryError, Value};

#[test]
fn test_multi_select_on_state() {
    let drivers = sample_drivers();
    let filter = FieldFilter::one_of("estadoPais", ["Nuevo León"]);
    assert_eq!(
        ids(&apply_filters(&drivers, &[filter])),
        vec!["DRV-0001", "DRV-0006", "DRV-0007"]
    );
}

#[test]
fn test_filters_and_together() {
    let drivers = sample_drivers();
    let filters = vec![
        FieldFilter::one_of("estadoPais", ["Nuevo León"]),
        FieldFilter::exact("tiendaUltimoPedido", "HEB Lincoln"),
    ];
    assert_eq!(ids(&apply_filters(&drivers, &filters)), vec!["DRV-0007"]);
}

#[test]
fn test_inactive_filters_keep_everything() {
    let drivers = sample_drivers();
    let filters = vec![
        FieldFilter::one_of("estadoDriver", Vec::<&str>::new()),
        FieldFilter::date_range("fechaUltimoPedido", None, None),
        FieldFilter::contains("tiendaUltimoPedido", "  "),
    ];
    assert_eq!(active_count(&filters), 0);
    assert_eq!(apply_filters(&drivers, &filters).len(), drivers.len());
}

#[test]
fn test_contains_ignores_case() {
    let drivers = sample_drivers();
    let filter = FieldFilter::contains("tiendaUltimoPedido", "heb");
    assert_eq!(
        ids(&apply_filters(&drivers, &[filter])),
        vec!["DRV-0001", "DRV-0002", "DRV-0004", "DRV-0005", "DRV-0007"]
    );
}

#[test]
fn test_missing_field_fails_active_filter() {
    let drivers = sample_drivers();
    let filter = FieldFilter::exact("zona", "Norte");
    assert!(apply_filters(&drivers, &[filter]).is_empty());
}

#[test]
fn test_date_range_bounds_are_whole_days() {
    let drivers = sample_drivers();
    let january_10 = FieldFilter::date_range(
        "fechaUltimoPedido",
        Some(date("2024-01-10")),
        Some(date("2024-01-10")),
    );
    assert_eq!(
        ids(&apply_filters(&drivers, &[january_10])),
        vec!["DRV-0001", "DRV-0006"]
    );

    let from_only = FieldFilter::date_range("fechaUltimoPedido", Some(date("2024-01-25")), None);
    assert_eq!(
        ids(&apply_filters(&drivers, &[from_only])),
        vec!["DRV-0004", "DRV-0007"]
    );

    let to_only = FieldFilter::date_range("fechaUltimoPedido", None, Some(date("2023-12-31")));
    assert_eq!(
        ids(&apply_filters(&drivers, &[to_only])),
        vec!["DRV-0003", "DRV-0005"]
    );
}

#[test]
fn test_date_range_accepts_iso_text() {
    let records = vec![
        MapRecord::new().with("id", "A").with("fecha", "2024-03-04T16:20:00"),
        MapRecord::new().with("id", "B").with("fecha", "2024-03-05"),
        MapRecord::new().with("id", "C").with("fecha", "sin fecha"),
    ];
    let filter = FieldFilter::date_range("fecha", Some(date("2024-03-04")), Some(date("2024-03-04")));
    assert_eq!(ids(&apply_filters(&records, &[filter])), vec!["A"]);
}

#[test]
fn test_mixed_types_compare_by_text() {
    let records = vec![
        MapRecord::new().with("id", "A").with("nivel", 5i64),
        MapRecord::new().with("id", "B").with("nivel", 3i64),
    ];
    let filter = FieldFilter::exact("nivel", "5");
    assert_eq!(ids(&apply_filters(&records, &[filter])), vec!["A"]);
}

#[test]
fn test_parse_expressions() {
    assert_eq!(
        "estadoDriver=Habilitado".parse::<FieldFilter>().unwrap(),
        FieldFilter::exact("estadoDriver", "Habilitado")
    );
    assert_eq!(
        "status:in=Nueva, En proceso".parse::<FieldFilter>().unwrap(),
        FieldFilter::one_of("status", ["Nueva", "En proceso"])
    );
    assert_eq!(
        "fecha:from=2024-01-10".parse::<FieldFilter>().unwrap(),
        FieldFilter::date_range("fecha", Some(date("2024-01-10")), None)
    );
    assert_eq!(
        "fecha:to=2024-01-31".parse::<FieldFilter>().unwrap(),
        FieldFilter::date_range("fecha", None, Some(date("2024-01-31")))
    );
    assert_eq!(
        "id:contains=qa-10".parse::<FieldFilter>().unwrap(),
        FieldFilter::contains("id", "qa-10")
    );
}

#[test]
fn test_parse_rejects_malformed_expressions() {
    assert!(matches!(
        "estadoDriver".parse::<FieldFilter>(),
        Err(QueryError::InvalidFilter { .. })
    ));
    assert!(matches!(
        ":in=a,b".parse::<FieldFilter>(),
        Err(QueryError::InvalidFilter { .. })
    ));
    assert!(matches!(
        "fecha:between=2024-01-01".parse::<FieldFilter>(),
        Err(QueryError::InvalidFilter { .. })
    ));
    assert!(matches!(
        "fecha:from=10/01/2024".parse::<FieldFilter>(),
        Err(QueryError::InvalidDate(_))
    ));
}

#[test]
fn test_json_form() {
    let filters: Vec<FieldFilter> = serde_json::from_str(
        r#"[
            {"kind": "multiSelect", "field": "status", "values": ["Nueva", "En proceso"]},
            {"kind": "dateRange", "field": "receivedAt", "from": "2024-01-10"},
            {"kind": "exactMatch", "field": "activo", "value": true},
            {"kind": "textContains", "field": "id", "term": "qa"}
        ]"#,
    )
    .unwrap();

    assert_eq!(filters[0], FieldFilter::one_of("status", ["Nueva", "En proceso"]));
    assert_eq!(
        filters[1],
        FieldFilter::date_range("receivedAt", Some(date("2024-01-10")), None)
    );
    assert_eq!(filters[2], FieldFilter::exact("activo", Value::Bool(true)));
    assert_eq!(filters[3], FieldFilter::contains("id", "qa"));
}
