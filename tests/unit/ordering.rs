//! Sort stage, the column toggle, and pagination.

use super::common::{at, ids, sample_drivers};
use tabula::paginate::total_pages;
use tabula::{
    apply_sort, clamp_page, cycle_sort, paginate, MapRecord, QueryError, SortDirection, SortSpec,
    SortState,
};

fn refs(records: &[MapRecord]) -> Vec<&MapRecord> {
    records.iter().collect()
}

// ============================================================================
// SORT
// ============================================================================

#[test]
fn test_sort_by_full_name() {
    let drivers = sample_drivers();
    let sorted = apply_sort(refs(&drivers), "nombreCompleto", SortDirection::Ascending);
    assert_eq!(
        ids(&sorted),
        vec!["DRV-0005", "DRV-0006", "DRV-0002", "DRV-0003", "DRV-0007", "DRV-0001", "DRV-0004"]
    );
}

#[test]
fn test_sort_column_mixing_dates_and_date_text() {
    let records = vec![
        MapRecord::new().with("id", "s").with("f", "2024-01-10 10:00:00"),
        MapRecord::new().with("id", "d").with("f", at("2024-01-10T09:30:00")),
        MapRecord::new().with("id", "t").with("f", "2024-01-10T09:00:00"),
    ];
    let sorted = apply_sort(refs(&records), "f", SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec!["t", "d", "s"]);

    let sorted = apply_sort(refs(&records), "f", SortDirection::Descending);
    assert_eq!(ids(&sorted), vec!["s", "d", "t"]);
}

#[test]
fn test_sort_dates_descending() {
    let drivers = sample_drivers();
    let sorted = apply_sort(refs(&drivers), "fechaUltimoPedido", SortDirection::Descending);
    assert_eq!(
        ids(&sorted),
        vec!["DRV-0004", "DRV-0007", "DRV-0002", "DRV-0001", "DRV-0006", "DRV-0003", "DRV-0005"]
    );
}

#[test]
fn test_ties_keep_input_order_both_ways() {
    let drivers = sample_drivers();

    let ascending = apply_sort(refs(&drivers), "estadoPais", SortDirection::Ascending);
    assert_eq!(
        ids(&ascending),
        vec!["DRV-0003", "DRV-0005", "DRV-0001", "DRV-0006", "DRV-0007", "DRV-0004", "DRV-0002"]
    );

    let descending = apply_sort(refs(&drivers), "estadoPais", SortDirection::Descending);
    assert_eq!(
        ids(&descending),
        vec!["DRV-0002", "DRV-0004", "DRV-0001", "DRV-0006", "DRV-0007", "DRV-0005", "DRV-0003"]
    );
}

#[test]
fn test_unsorted_and_unknown_key_keep_order() {
    let drivers = sample_drivers();
    let original = ids(&drivers);
    assert_eq!(
        ids(&apply_sort(refs(&drivers), "nombreCompleto", SortDirection::None)),
        original
    );
    assert_eq!(
        ids(&apply_sort(refs(&drivers), "zona", SortDirection::Ascending)),
        original
    );
}

#[test]
fn test_numbers_sort_numerically() {
    let records = vec![
        MapRecord::new().with("id", "a").with("pedidos", 10i64),
        MapRecord::new().with("id", "b").with("pedidos", 9i64),
        MapRecord::new().with("id", "c").with("pedidos", 100i64),
    ];
    let sorted = apply_sort(refs(&records), "pedidos", SortDirection::Ascending);
    assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
}

#[test]
fn test_header_clicks_cycle_three_states() {
    let first = cycle_sort(None, "fecha");
    assert_eq!(first, Some(SortSpec::asc("fecha")));
    let second = cycle_sort(first.as_ref(), "fecha");
    assert_eq!(second, Some(SortSpec::desc("fecha")));
    let third = cycle_sort(second.as_ref(), "fecha");
    assert_eq!(third, None);
    assert_eq!(cycle_sort(third.as_ref(), "fecha"), Some(SortSpec::asc("fecha")));

    // a different column always starts ascending
    assert_eq!(
        cycle_sort(second.as_ref(), "nombreCompleto"),
        Some(SortSpec::asc("nombreCompleto"))
    );
}

#[test]
fn test_sort_state_reports_direction_per_column() {
    let state = SortState::default().click("id").click("id");
    assert_eq!(state.direction_for("id"), SortDirection::Descending);
    assert_eq!(state.direction_for("status"), SortDirection::None);
    assert_eq!(state.click("id").spec(), None);
}

#[test]
fn test_sort_spec_text_form() {
    assert_eq!("fecha:desc".parse::<SortSpec>().unwrap(), SortSpec::desc("fecha"));
    assert_eq!("fecha".parse::<SortSpec>().unwrap(), SortSpec::asc("fecha"));
    assert_eq!(SortSpec::desc("receivedAt").to_string(), "receivedAt:desc");
    assert!(matches!(
        "fecha:sideways".parse::<SortSpec>(),
        Err(QueryError::InvalidSort(_))
    ));
    assert!(matches!(":asc".parse::<SortSpec>(), Err(QueryError::InvalidSort(_))));
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn test_pages_of_twenty() {
    let rows: Vec<u32> = (1..=45).collect();
    let page = paginate(rows.clone(), 3, 20);
    assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 3);

    let first = paginate(rows, 1, 20);
    assert_eq!(first.items.len(), 20);
}

#[test]
fn test_page_past_end_is_empty() {
    let page = paginate((1..=45).collect::<Vec<u32>>(), 9, 20);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 3);
}

#[test]
fn test_zero_page_size_is_one_page() {
    let page = paginate((1..=45).collect::<Vec<u32>>(), 1, 0);
    assert_eq!(page.items.len(), 45);
    assert_eq!(page.total_pages, 1);
    assert!(paginate((1..=45).collect::<Vec<u32>>(), 2, 0).items.is_empty());
}

#[test]
fn test_total_pages_never_zero() {
    assert_eq!(total_pages(0, 20), 1);
    assert_eq!(total_pages(20, 20), 1);
    assert_eq!(total_pages(21, 20), 2);
    assert_eq!(total_pages(7, 0), 1);
}

#[test]
fn test_clamp_page() {
    assert_eq!(clamp_page(0, 45, 20), 1);
    assert_eq!(clamp_page(9, 45, 20), 3);
    assert_eq!(clamp_page(2, 45, 20), 2);
    assert_eq!(clamp_page(5, 0, 20), 1);
}
