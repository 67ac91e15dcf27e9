// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-entity field tables and collection loading.
//!
//! The three dashboard lists (drivers, aspirants, complaints) run the same
//! pipeline and differ only in which fields are searchable, sortable and
//! filterable, what their columns are called, and what the screen shows
//! before the user touches anything. An [`EntitySchema`] captures exactly
//! that, so one engine serves every list.
//!
//! # Loading
//!
//! [`load_records_json`] turns a JSON array of objects into [`MapRecord`]s:
//!
//! - nested objects flatten to dotted keys (`driver.name`),
//! - arrays become their elements' display text joined with `", "`,
//! - `null` becomes empty text so every record keeps the same field set.
//!
//! [`EntitySchema::prepare`] then parses the schema's temporal fields into
//! dates and materializes composite fields like `nombreCompleto`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::export::Column;
use crate::filter::FieldFilter;
use crate::query::QueryDescriptor;
use crate::sort::SortSpec;
use crate::types::{parse_datetime, MapRecord, RecordSet, Value};

/// A field computed from others at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeField {
    pub name: String,
    pub parts: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    " ".to_string()
}

impl CompositeField {
    pub fn new<I, S>(name: impl Into<String>, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parts: parts.into_iter().map(Into::into).collect(),
            separator: default_separator(),
        }
    }

    /// Join the non-empty parts present on `record`.
    pub fn compose(&self, record: &MapRecord) -> String {
        self.parts
            .iter()
            .filter_map(|part| record.get(part))
            .map(|value| value.display().into_owned())
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

/// Field-mapping table for one entity list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySchema {
    pub name: String,
    /// File-name prefix for exports.
    pub export_prefix: String,
    /// Display and export columns, in order.
    pub columns: Vec<Column>,
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub sortable: Vec<String>,
    #[serde(default)]
    pub filterable: Vec<String>,
    #[serde(default)]
    pub temporal_fields: Vec<String>,
    #[serde(default)]
    pub composites: Vec<CompositeField>,
    #[serde(default)]
    pub default_filters: Vec<FieldFilter>,
    #[serde(default)]
    pub default_sort: Option<SortSpec>,
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default)]
    pub page_sizes: Vec<i64>,
}

fn default_page_size() -> i64 {
    crate::query::DEFAULT_PAGE_SIZE
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl EntitySchema {
    /// Names accepted by [`EntitySchema::by_name`].
    pub const PRESETS: [&'static str; 3] = ["drivers", "aspirants", "complaints"];

    /// Look up a preset. `aspirantes` and `quejas` are accepted as aliases.
    pub fn by_name(name: &str) -> Result<Self, QueryError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "drivers" => Ok(Self::drivers()),
            "aspirants" | "aspirantes" => Ok(Self::aspirants()),
            "complaints" | "quejas" => Ok(Self::complaints()),
            other => Err(QueryError::UnknownEntity(other.to_string())),
        }
    }

    /// Parse a custom table from JSON.
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn drivers() -> Self {
        Self {
            name: "drivers".to_string(),
            export_prefix: "drivers".to_string(),
            columns: vec![
                Column::new("id", "ID"),
                Column::new("nombreCompleto", "Nombre Completo"),
                Column::new("curp", "CURP"),
                Column::new("email", "Correo Electrónico"),
                Column::new("telefono", "Teléfono"),
                Column::new("estadoPais", "Estado"),
                Column::new("estadoDriver", "Estado Driver"),
                Column::new("tiendaUltimoPedido", "Tienda"),
                Column::new("fechaUltimoPedido", "Fecha Último Pedido"),
            ],
            search_fields: strings(&["nombreCompleto", "curp", "email", "telefono"]),
            sortable: strings(&[
                "nombreCompleto",
                "curp",
                "email",
                "telefono",
                "estadoPais",
                "estadoDriver",
                "tiendaUltimoPedido",
                "fechaUltimoPedido",
            ]),
            filterable: strings(&["estadoDriver", "estadoPais", "tiendaUltimoPedido"]),
            temporal_fields: strings(&["fechaUltimoPedido"]),
            composites: vec![CompositeField::new(
                "nombreCompleto",
                ["nombre", "apellidoPaterno", "apellidoMaterno"],
            )],
            default_filters: vec![FieldFilter::one_of("estadoDriver", ["Habilitado"])],
            default_sort: None,
            default_page_size: 20,
            page_sizes: vec![20, 50, 100],
        }
    }

    pub fn aspirants() -> Self {
        Self {
            name: "aspirants".to_string(),
            export_prefix: "aspirantes".to_string(),
            columns: vec![
                Column::new("id", "ID"),
                Column::new("nombreCompleto", "Nombre"),
                Column::new("telefono", "Teléfono"),
                Column::new("email", "Email"),
                Column::new("ubicacion", "Ubicación"),
                Column::new("fecha", "Fecha"),
                Column::new("estadoAplicacion", "Estado Aplicación"),
                Column::new("estadoDocumentacion", "Estado Documentación"),
            ],
            search_fields: strings(&["nombreCompleto", "telefono", "email"]),
            sortable: strings(&[
                "id",
                "nombreCompleto",
                "telefono",
                "email",
                "ubicacion",
                "fecha",
                "estadoAplicacion",
                "estadoDocumentacion",
            ]),
            filterable: strings(&["estadoAplicacion", "estadoDocumentacion", "ubicacion", "fecha"]),
            temporal_fields: strings(&["fecha"]),
            composites: vec![CompositeField::new(
                "nombreCompleto",
                ["nombre", "apellidoPaterno", "apellidoMaterno"],
            )],
            default_filters: vec![FieldFilter::one_of(
                "estadoAplicacion",
                ["Pendiente", "En Revisión", "Propuesta enviada"],
            )],
            default_sort: Some(SortSpec::desc("fecha")),
            default_page_size: 20,
            page_sizes: vec![20, 50, 100],
        }
    }

    pub fn complaints() -> Self {
        Self {
            name: "complaints".to_string(),
            export_prefix: "quejas_aclaraciones".to_string(),
            columns: vec![
                Column::new("id", "ID"),
                Column::new("driverName", "Driver"),
                Column::new("type", "Tipo"),
                Column::new("receivedAt", "Fecha de recepción"),
                Column::new("status", "Estado"),
            ],
            search_fields: strings(&["driverName", "driverRfc"]),
            sortable: strings(&["id", "driverName", "type", "receivedAt", "status", "updatedAt"]),
            filterable: strings(&["id", "updatedAt", "type", "status"]),
            temporal_fields: strings(&["receivedAt", "updatedAt"]),
            composites: Vec::new(),
            default_filters: vec![FieldFilter::one_of("status", ["Nueva", "En proceso"])],
            default_sort: Some(SortSpec::desc("receivedAt")),
            default_page_size: 25,
            page_sizes: vec![25, 50, 100],
        }
    }

    /// What the screen shows before the user touches anything.
    pub fn default_descriptor(&self) -> QueryDescriptor {
        QueryDescriptor {
            search_fields: self.search_fields.clone(),
            filters: self.default_filters.clone(),
            sort: self.default_sort.clone(),
            page: 1,
            page_size: self.default_page_size,
            ..QueryDescriptor::default()
        }
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.sortable.iter().any(|k| k == key)
    }

    pub fn is_filterable(&self, field: &str) -> bool {
        self.filterable.iter().any(|f| f == field)
    }

    /// Header label for `field`, falling back to the field name.
    pub fn label<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map_or(field, |c| c.label.as_str())
    }

    /// Parse temporal fields and materialize composites.
    ///
    /// Temporal text that does not parse stays text (and is logged): a bad
    /// date should cost one cell, not the whole load.
    pub fn prepare(&self, records: Vec<MapRecord>) -> Vec<MapRecord> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, mut record)| {
                for field in &self.temporal_fields {
                    let parsed = match record.get(field) {
                        Some(Value::Text(text)) if !text.trim().is_empty() => {
                            match parse_datetime(text) {
                                Some(date) => Some(date),
                                None => {
                                    warn!(
                                        "record {}: '{}' is not a date in field '{}'",
                                        index, text, field
                                    );
                                    None
                                }
                            }
                        }
                        _ => None,
                    };
                    if let Some(date) = parsed {
                        record.insert(field.as_str(), date);
                    }
                }
                for composite in &self.composites {
                    let value = composite.compose(&record);
                    record.insert(composite.name.as_str(), value);
                }
                record
            })
            .collect()
    }

    /// Load, prepare and schema-check a JSON array of records.
    pub fn load_json(&self, json: &str) -> Result<RecordSet<MapRecord>, QueryError> {
        let records = self.prepare(load_records_json(json)?);
        debug!("loaded {} {} records", records.len(), self.name);
        RecordSet::new(records)
    }
}

/// Parse a JSON array of objects into flat records.
pub fn load_records_json(json: &str) -> Result<Vec<MapRecord>, QueryError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    records_from_value(parsed)
}

/// [`load_records_json`] for an already-parsed document.
pub fn records_from_value(value: serde_json::Value) -> Result<Vec<MapRecord>, QueryError> {
    let serde_json::Value::Array(items) = value else {
        return Err(QueryError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(map) => {
                let mut record = MapRecord::new();
                flatten_into(&mut record, None, map);
                Ok(record)
            }
            _ => Err(QueryError::NotAnObject { index }),
        })
        .collect()
}

fn flatten_into(
    record: &mut MapRecord,
    prefix: Option<&str>,
    map: serde_json::Map<String, serde_json::Value>,
) {
    for (key, value) in map {
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key,
        };
        match value {
            serde_json::Value::Object(inner) => flatten_into(record, Some(&name), inner),
            other => record.insert(name, scalar(other)),
        }
    }
}

fn scalar(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Text(String::new()),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            None => Value::Text(n.to_string()),
        },
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Array(items) => Value::Text(
            items
                .into_iter()
                .map(|item| scalar(item).display().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        // Objects are flattened before reaching here; keep the JSON text if one slips through
        serde_json::Value::Object(map) => Value::Text(serde_json::Value::Object(map).to_string()),
    }
}
