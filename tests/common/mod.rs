//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use tabula::{Record, Segment};

// Re-export canonical fixtures from tabula::testing
pub use tabula::testing::{
    make_complaint, make_driver, sample_aspirants, sample_complaints, sample_drivers,
};

// ============================================================================
// RECORD HELPERS
// ============================================================================

/// The `id` field of each record, in order.
pub fn ids<R: Record>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            r.field("id")
                .map(|v| v.display().into_owned())
                .unwrap_or_default()
        })
        .collect()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("bad test instant")
}

/// Render segments with marked runs in brackets: `"Nuevo [León]"`.
pub fn render(segments: &[Segment<'_>]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.matched {
                format!("[{}]", s.text)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

// ============================================================================
// JSON FIXTURES
// ============================================================================

/// Drivers as a dashboard would send them: flat JSON, dates as ISO text.
pub const DRIVERS_JSON: &str = r#"[
  {"id": "DRV-0001", "nombre": "Roberto", "apellidoPaterno": "Martínez", "apellidoMaterno": "Silva",
   "curp": "MASR880322HNLRLB01", "email": "roberto.martinez@example.com", "telefono": "8112340001",
   "estadoPais": "Nuevo León", "estadoDriver": "Habilitado", "tiendaUltimoPedido": "HEB Cumbres",
   "fechaUltimoPedido": "2024-01-10T23:59:00"},
  {"id": "DRV-0005", "nombre": "Andrea", "apellidoPaterno": "López", "apellidoMaterno": "García",
   "curp": "LOGA900101MDGPRN05", "email": "andrea.lopez@example.com", "telefono": "8112340005",
   "estadoPais": "Durango", "estadoDriver": "Habilitado", "tiendaUltimoPedido": "HEB Valle",
   "fechaUltimoPedido": "2024-01-11T00:00:01"},
  {"id": "DRV-0003", "nombre": "Héctor", "apellidoPaterno": "Romero", "apellidoMaterno": "Díaz",
   "curp": "ROHD850715HCLMZC03", "email": "hector.romero@example.com", "telefono": "8112340003",
   "estadoPais": "Coahuila", "estadoDriver": "Suspendido", "tiendaUltimoPedido": "Mi Tienda",
   "fechaUltimoPedido": "2023-12-20T09:15:00"}
]"#;

/// Write `contents` to `name` inside a fresh temp dir. Keep the dir alive for
/// as long as the path is used.
pub fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    (dir, path)
}
