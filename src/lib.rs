//! Filter, fuzzy-search, sort, paginate and export in-memory record lists.
//!
//! `tabula` is the query engine behind tabular admin screens: a caller holds a
//! collection of homogeneous records plus a [`QueryDescriptor`] describing what
//! the user asked for, and gets back a [`ViewResult`] page. Nothing is cached
//! and nothing is mutated; every call is a pure function of its inputs.
//!
//! # Architecture
//!
//! ```text
//! records ─▶ filter.rs ─▶ search/ladder.rs ─▶ sort.rs ─▶ paginate.rs ─▶ ViewResult
//!                              │                 │
//!                              │                 └─▶ export.rs (CSV / TSV)
//!                              ▼
//!            util/normalize.rs, fuzzy/levenshtein.rs, search/highlight.rs
//! ```
//!
//! # Modules
//!
//! | Module       | Role                                                     |
//! |--------------|----------------------------------------------------------|
//! | `types`      | `Value`, `Record`, match outcomes, `ViewResult`          |
//! | `search`     | match ladder and highlighter                             |
//! | `fuzzy`      | edit distance and similarity                             |
//! | `filter`     | structured field filters                                 |
//! | `sort`       | stable single-key sort, tri-state toggle                 |
//! | `paginate`   | fixed-size pages                                         |
//! | `export`     | delimited text                                           |
//! | `query`      | descriptor, engine, search history                       |
//! | `schema`     | per-entity field tables, JSON loading                    |
//! | `contracts`  | debug-build assertions of the pipeline's properties      |
//!
//! # Usage
//!
//! ```
//! use tabula::{EntitySchema, QueryEngine};
//!
//! let schema = EntitySchema::drivers();
//! let records = schema
//!     .load_json(r#"[{"id": "DRV-0001", "nombre": "Roberto", "apellidoPaterno": "Martínez",
//!                     "apellidoMaterno": "Silva", "curp": "MASR880322HNLRLB01",
//!                     "email": "r@example.com", "telefono": "8112345601",
//!                     "estadoPais": "Nuevo León", "estadoDriver": "Habilitado",
//!                     "tiendaUltimoPedido": "HEB Cumbres",
//!                     "fechaUltimoPedido": "2024-01-10T23:59:00"}]"#)
//!     .unwrap();
//!
//! let descriptor = schema.default_descriptor().with_search("masr");
//! let view = QueryEngine::default().execute(records.records(), &descriptor);
//! assert_eq!(view.total_count, 1);
//! ```

pub mod contracts;
pub mod error;
pub mod export;
pub mod filter;
pub mod fuzzy;
pub mod paginate;
pub mod query;
pub mod schema;
pub mod search;
pub mod sort;
pub mod types;
pub mod util;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use error::QueryError;
pub use export::{
    export, export_filename, to_delimited, Column, ExportFormat, ExportOptions, ExportScope,
};
pub use filter::{apply_filters, FieldFilter};
pub use fuzzy::{similar_within, similarity};
pub use paginate::{clamp_page, paginate, Page};
pub use query::{FieldMatch, QueryDescriptor, QueryEngine, SearchHistory};
pub use schema::{load_records_json, CompositeField, EntitySchema};
pub use search::{highlight, matches_term, matches_term_with, MatchConfig, Term};
pub use sort::{apply_sort, cycle_sort, SortDirection, SortSpec, SortState};
pub use types::{
    MapRecord, MatchResult, MatchStrategy, Record, RecordSet, Segment, Span, Value, ViewResult,
};
pub use util::normalize::normalize;
