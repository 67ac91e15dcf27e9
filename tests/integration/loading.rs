//! Collections and schemas read from disk.

use std::fs;

use super::common::{ids, write_temp, DRIVERS_JSON};
use tabula::{
    export, load_records_json, EntitySchema, ExportFormat, ExportOptions, QueryDescriptor,
    QueryEngine, QueryError, Record, RecordSet, Value,
};

#[test]
fn test_load_preset_from_file() {
    let (_dir, path) = write_temp("drivers.json", DRIVERS_JSON);
    let text = fs::read_to_string(&path).unwrap();
    let drivers = EntitySchema::drivers().load_json(&text).unwrap();

    assert_eq!(drivers.len(), 3);
    let first = &drivers[0];
    assert_eq!(
        first.field("nombreCompleto").map(|v| v.display().into_owned()),
        Some("Roberto Martínez Silva".to_string())
    );
    assert!(matches!(
        first.field("fechaUltimoPedido").as_deref(),
        Some(Value::Date(_))
    ));
}

#[test]
fn test_custom_schema_file_drives_the_query() {
    let schema_json = r#"{
        "name": "pedidos",
        "exportPrefix": "pedidos",
        "columns": [
            {"field": "folio", "label": "Folio"},
            {"field": "cliente.nombre", "label": "Cliente"},
            {"field": "entregado", "label": "Entregado"}
        ],
        "searchFields": ["cliente.nombre"],
        "temporalFields": ["entregado"],
        "defaultSort": {"key": "entregado", "direction": "desc"},
        "defaultPageSize": 2
    }"#;
    let records_json = r#"[
        {"folio": "P-1", "cliente": {"nombre": "Ana Peña"}, "entregado": "2024-05-01T10:00:00"},
        {"folio": "P-2", "cliente": {"nombre": "Luis Ávila"}, "entregado": "2024-05-03T09:30:00"},
        {"folio": "P-3", "cliente": {"nombre": "Ana María Ruiz"}, "entregado": "2024-05-02"}
    ]"#;
    let (_schema_dir, schema_path) = write_temp("pedidos.schema.json", schema_json);
    let (_data_dir, data_path) = write_temp("pedidos.json", records_json);

    let schema = EntitySchema::from_json(&fs::read_to_string(schema_path).unwrap()).unwrap();
    let records = schema
        .load_json(&fs::read_to_string(data_path).unwrap())
        .unwrap();

    let descriptor = schema.default_descriptor().with_search("ana");
    let view = QueryEngine::default().execute(records.records(), &descriptor);
    assert_eq!(
        view.items
            .iter()
            .map(|r| r.field("folio").unwrap().display().into_owned())
            .collect::<Vec<_>>(),
        vec!["P-3", "P-1"]
    );
    assert_eq!(view.page_size, 2);

    let csv = export(&view.items, &schema.columns, &ExportOptions::new(ExportFormat::Csv));
    assert_eq!(
        csv,
        "Folio,Cliente,Entregado\nP-3,Ana María Ruiz,02/05/2024\nP-1,Ana Peña,01/05/2024"
    );
}

#[test]
fn test_export_written_and_read_back() {
    let drivers = EntitySchema::drivers().load_json(DRIVERS_JSON).unwrap();
    let columns = EntitySchema::drivers().columns;
    let view = QueryEngine::default().execute(drivers.records(), &QueryDescriptor::new());
    let body = export(&view.items, &columns, &ExportOptions::new(ExportFormat::Tsv));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drivers_todos_2024-01-15.xls");
    fs::write(&path, &body).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(&path)
        .unwrap();
    let header = reader.headers().unwrap().clone();
    assert_eq!(&header[0], "ID");
    assert_eq!(header.len(), columns.len());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "DRV-0001");
    assert_eq!(&rows[0][8], "10/01/2024");
}

#[test]
fn test_plain_loader_without_schema() {
    let records = load_records_json(
        r#"[{"id": 1, "tags": ["vip", "norte"], "nota": null},
            {"id": 2, "tags": [], "nota": "ok"}]"#,
    )
    .unwrap();
    let set = RecordSet::new(records).unwrap();
    assert_eq!(ids(set.records()), vec!["1", "2"]);
    assert_eq!(set[0].get("tags"), Some(&Value::from("vip, norte")));
    assert_eq!(set[1].get("tags"), Some(&Value::from("")));
}

#[test]
fn test_load_errors() {
    let schema = EntitySchema::drivers();
    assert!(matches!(schema.load_json("{}"), Err(QueryError::NotAnArray)));
    assert!(matches!(
        schema.load_json(r#"[{"id": "a"}, "b"]"#),
        Err(QueryError::NotAnObject { index: 1 })
    ));
    assert!(matches!(schema.load_json("[{\"id\""), Err(QueryError::Json(_))));
    assert!(matches!(
        schema.load_json(r#"[{"id": "a", "curp": "X"}, {"id": "b"}]"#),
        Err(QueryError::SchemaMismatch { index: 1, .. })
    ));

    let err = EntitySchema::from_json(r#"{"name": "x"}"#).unwrap_err();
    assert!(matches!(err, QueryError::Json(_)));
}
