//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation.
//! The fixtures go through the same [`EntitySchema::prepare`] step as loaded
//! JSON, so dates are real `Value::Date`s and `nombreCompleto` exists.

#![doc(hidden)]

use crate::schema::EntitySchema;
use crate::types::MapRecord;

/// Build one driver row. Dates are ISO-8601 text until `prepare` parses them.
#[allow(clippy::too_many_arguments)]
pub fn make_driver(
    id: &str,
    nombre: &str,
    paterno: &str,
    materno: &str,
    curp: &str,
    estado_pais: &str,
    estado_driver: &str,
    tienda: &str,
    fecha: &str,
) -> MapRecord {
    let email = format!(
        "{}.{}@example.com",
        crate::util::normalize::normalize(nombre),
        crate::util::normalize::normalize(paterno)
    );
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    MapRecord::new()
        .with("id", id)
        .with("nombre", nombre)
        .with("apellidoPaterno", paterno)
        .with("apellidoMaterno", materno)
        .with("curp", curp)
        .with("email", email)
        .with("telefono", format!("811234{:0>4}", digits))
        .with("estadoPais", estado_pais)
        .with("estadoDriver", estado_driver)
        .with("tiendaUltimoPedido", tienda)
        .with("fechaUltimoPedido", fecha)
}

/// Seven drivers covering accents, duplicate statuses and a same-day pair of
/// dates straddling midnight.
pub fn sample_drivers() -> Vec<MapRecord> {
    let rows = vec![
        make_driver("DRV-0001", "Roberto", "Martínez", "Silva", "MASR880322HNLRLB01", "Nuevo León", "Habilitado", "HEB Cumbres", "2024-01-10T23:59:00"),
        make_driver("DRV-0002", "Gabriela", "Ortega", "Estrada", "OEEG900101MTSRSB02", "Tamaulipas", "Habilitado", "HEB Lincoln", "2024-01-11T00:00:01"),
        make_driver("DRV-0003", "Héctor", "Romero", "Díaz", "ROHD850715HCLMZC03", "Coahuila", "Suspendido", "Mi Tienda San Nicolás", "2023-12-20T09:15:00"),
        make_driver("DRV-0004", "Silvia", "Silva", "Muñoz", "SIMS920304MSPLXL04", "San Luis Potosí", "Habilitado", "HEB Valle", "2024-02-01T12:00:00"),
        make_driver("DRV-0005", "Andrea", "López", "García", "LOGA900101MDGPRN05", "Durango", "Deshabilitado", "HEB Cumbres Élite", "2023-11-05T18:30:00"),
        make_driver("DRV-0006", "Fernando", "González", "Rodríguez", "GORF870612HNLNDR06", "Nuevo León", "Habilitado", "Mi Tienda Guadalupe", "2024-01-10T08:00:00"),
        make_driver("DRV-0007", "Patricia", "Peña", "León", "PELP930218MNLXNT07", "Nuevo León", "Habilitado", "HEB Lincoln", "2024-01-25T14:45:00"),
    ];
    EntitySchema::drivers().prepare(rows)
}

#[allow(clippy::too_many_arguments)]
pub fn make_aspirant(
    id: &str,
    nombre: &str,
    paterno: &str,
    materno: &str,
    ubicacion: &str,
    fecha: &str,
    aplicacion: &str,
    documentacion: &str,
) -> MapRecord {
    let digits: String = id.chars().filter(char::is_ascii_digit).collect();
    MapRecord::new()
        .with("id", id)
        .with("nombre", nombre)
        .with("apellidoPaterno", paterno)
        .with("apellidoMaterno", materno)
        .with("telefono", format!("812000{:0>4}", digits))
        .with("email", format!("aspirante{}@example.com", digits))
        .with("ubicacion", ubicacion)
        .with("fecha", fecha)
        .with("estadoAplicacion", aplicacion)
        .with("estadoDocumentacion", documentacion)
}

pub fn sample_aspirants() -> Vec<MapRecord> {
    let rows = vec![
        make_aspirant("ASP-001", "Diego", "Ramírez", "Flores", "Monterrey", "2024-03-01T10:00:00", "Pendiente", "Incompleto"),
        make_aspirant("ASP-002", "Valeria", "Sánchez", "Morales", "San Nicolás", "2024-03-04T16:20:00", "En Revisión", "Completo"),
        make_aspirant("ASP-003", "Alejandro", "Cruz", "Jiménez", "Guadalupe", "2024-02-27T09:00:00", "Aprobado", "Completo"),
        make_aspirant("ASP-004", "Daniela", "Moreno", "Ruiz", "Monterrey", "2024-03-04T08:05:00", "Propuesta enviada", "Revisión"),
        make_aspirant("ASP-005", "Gustavo", "Mendoza", "Castro", "Apodaca", "2024-02-15T13:30:00", "Rechazado", "Pendiente"),
    ];
    EntitySchema::aspirants().prepare(rows)
}

#[allow(clippy::too_many_arguments)]
pub fn make_complaint(
    id: &str,
    driver_id: &str,
    driver_name: &str,
    driver_rfc: &str,
    kind: &str,
    received_at: &str,
    updated_at: &str,
    status: &str,
) -> MapRecord {
    MapRecord::new()
        .with("id", id)
        .with("driverId", driver_id)
        .with("driverName", driver_name)
        .with("driverRfc", driver_rfc)
        .with("driverEmail", format!("{}@example.com", driver_id.to_ascii_lowercase()))
        .with("type", kind)
        .with("receivedAt", received_at)
        .with("updatedAt", updated_at)
        .with("status", status)
}

pub fn sample_complaints() -> Vec<MapRecord> {
    let rows = vec![
        make_complaint("QA-1001", "DRV-0001", "Roberto Martínez Silva", "MASR880322AB1", "Queja", "2024-01-10T09:00:00", "2024-01-12T11:00:00", "Nueva"),
        make_complaint("QA-1002", "DRV-0004", "Silvia Silva Muñoz", "SIMS920304CD2", "Aclaración", "2024-01-11T14:30:00", "2024-01-11T15:00:00", "En proceso"),
        make_complaint("QA-1003", "DRV-0002", "Gabriela Ortega Estrada", "OEEG900101EF3", "Comentario", "2024-01-09T08:15:00", "2024-01-20T10:00:00", "Resuelta"),
        make_complaint("QA-1010", "DRV-0001", "Roberto Martínez Silva", "MASR880322AB1", "Aclaración", "2024-01-15T17:45:00", "2024-01-15T17:45:00", "Nueva"),
        make_complaint("QA-1011", "DRV-0007", "Patricia Peña León", "PELP930218GH4", "Queja", "2024-01-15T17:45:00", "2024-01-16T09:30:00", "Resuelta"),
    ];
    EntitySchema::complaints().prepare(rows)
}
