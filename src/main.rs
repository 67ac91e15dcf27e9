use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{debug, info};
use serde_json::json;

use tabula::fuzzy::{levenshtein, similarity};
use tabula::{
    export, export_filename, highlight, load_records_json, matches_term_with, normalize, Column,
    EntitySchema, ExportFormat, ExportOptions, ExportScope, FieldFilter, MapRecord,
    QueryDescriptor, QueryEngine, Record, RecordSet, SortSpec,
};

mod cli;
use cli::display::{self, themed, BOLD, RED};
use cli::{Cli, Commands, MatchArgs, OutputFormat, QueryArgs};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Query(args) => run_query(args),
        Commands::Explain {
            text,
            term,
            matching,
        } => run_explain(&text, &term, matching),
        Commands::Similarity { a, b } => run_similarity(&a, &b),
        Commands::Schema { entity } => run_schema(&entity),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", themed(RED, &[BOLD], "error:"), e);
        std::process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// QUERY
// ═══════════════════════════════════════════════════════════════════════════

fn run_query(args: QueryArgs) -> Result<()> {
    let schema = load_schema(&args)?;
    let text = read_input(&args.input)?;

    let records: Vec<MapRecord> = match &schema {
        Some(schema) => schema
            .load_json(&text)
            .with_context(|| format!("Failed to load {} records from {}", schema.name, args.input))?
            .into_inner(),
        None => RecordSet::new(load_records_json(&text)?)
            .with_context(|| format!("Failed to load records from {}", args.input))?
            .into_inner(),
    };
    info!("loaded {} records", records.len());

    let descriptor = build_descriptor(&args, schema.as_ref(), &records)?;
    debug!("descriptor: {:?}", descriptor);

    let engine = QueryEngine::new(args.matching.config());
    let view = engine.execute(&records, &descriptor);

    let columns: Vec<Column> = match &schema {
        Some(schema) => schema.columns.clone(),
        None => records
            .first()
            .map(|r| r.field_names().into_iter().map(Column::bare).collect())
            .unwrap_or_default(),
    };

    match args.format {
        OutputFormat::Table => display::print_table(&view, &columns, &descriptor),
        OutputFormat::Json => {
            let out = json!({
                "totalCount": view.total_count,
                "filteredFrom": view.filtered_from,
                "page": view.page,
                "pageSize": view.page_size,
                "totalPages": view.total_pages,
                "items": view.items,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Csv | OutputFormat::Tsv => {
            let format = if args.format == OutputFormat::Csv {
                ExportFormat::Csv
            } else {
                ExportFormat::Tsv
            };
            let body = export(&view.items, &columns, &ExportOptions::new(format));
            match &args.output {
                Some(target) => {
                    let scope = if args.all {
                        ExportScope::All
                    } else {
                        ExportScope::CurrentPage
                    };
                    let prefix = schema
                        .as_ref()
                        .map_or("registros", |s| s.export_prefix.as_str());
                    let path = export_path(target, prefix, scope, format);
                    fs::write(&path, body)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("✓ wrote {} records to {}", view.items.len(), path.display());
                }
                None => println!("{}", body),
            }
        }
    }
    Ok(())
}

fn load_schema(args: &QueryArgs) -> Result<Option<EntitySchema>> {
    if let Some(path) = &args.schema {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema {}", path.display()))?;
        return Ok(Some(EntitySchema::from_json(&text)?));
    }
    match &args.entity {
        Some(name) => Ok(Some(EntitySchema::by_name(name)?)),
        None => Ok(None),
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read records from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

/// Start from `--descriptor`, the entity defaults, or nothing; then layer the
/// individual flags on top.
fn build_descriptor(
    args: &QueryArgs,
    schema: Option<&EntitySchema>,
    records: &[MapRecord],
) -> Result<QueryDescriptor> {
    let mut descriptor = match (&args.descriptor, schema) {
        (Some(raw), _) => parse_descriptor(raw)?,
        (None, Some(schema)) if !args.no_defaults => schema.default_descriptor(),
        (None, Some(schema)) => QueryDescriptor {
            search_fields: schema.search_fields.clone(),
            page_size: schema.default_page_size,
            ..QueryDescriptor::default()
        },
        (None, None) => QueryDescriptor::default(),
    };

    if !args.fields.is_empty() {
        descriptor = descriptor.with_search_fields(args.fields.iter().cloned());
    }
    if let Some(term) = &args.search {
        descriptor = descriptor.with_search(term.as_str());
        // With no schema and no --field, search every field
        if descriptor.search_fields.is_empty() {
            if let Some(first) = records.first() {
                let fields: Vec<String> =
                    first.field_names().into_iter().map(str::to_string).collect();
                descriptor = descriptor.with_search_fields(fields);
            }
        }
    }
    for expr in &args.filters {
        let filter: FieldFilter = expr.parse()?;
        descriptor = descriptor.with_filter(filter);
    }
    if let Some(sort) = &args.sort {
        let spec: SortSpec = sort.parse()?;
        descriptor = descriptor.with_sort(Some(spec));
    }
    if args.all {
        descriptor = descriptor.with_page_size(0);
    } else if let Some(size) = args.page_size {
        descriptor = descriptor.with_page_size(size);
    }
    if let Some(page) = args.page {
        descriptor = descriptor.with_page(page);
    }
    Ok(descriptor)
}

fn parse_descriptor(raw: &str) -> Result<QueryDescriptor> {
    let text = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor {}", path))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).context("Invalid query descriptor")
}

fn export_path(target: &Path, prefix: &str, scope: ExportScope, format: ExportFormat) -> PathBuf {
    if target.is_dir() {
        target.join(export_filename(
            prefix,
            scope,
            format,
            Local::now().date_naive(),
        ))
    } else {
        target.to_path_buf()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPLAIN / SIMILARITY / SCHEMA
// ═══════════════════════════════════════════════════════════════════════════

fn run_explain(text: &str, term: &str, matching: MatchArgs) -> Result<()> {
    let config = matching.config();
    let result = matches_term_with(text, term, &config);
    let norm_text = normalize(text);
    let norm_term = normalize(term);

    display::section_top("EXPLAIN");
    display::row(&format!(" value       {}", text));
    display::row(&format!(" term        {}", term.trim()));
    display::row(&format!(" normalized  {:?} vs {:?}", norm_text, norm_term));
    display::section_mid("LADDER");
    display::row(&format!(" strategy    {}", display::strategy_label(result.strategy)));
    if let (Some(span), Some(strategy)) = (result.matched_span, result.strategy) {
        let (source, label) = if strategy == tabula::MatchStrategy::Exact {
            (text, "raw")
        } else {
            (norm_text.as_str(), "normalized")
        };
        let covered = source.get(span.start..span.end).unwrap_or("");
        display::row(&format!(
            " span        {}..{} of {} text: {:?}",
            span.start, span.end, label, covered
        ));
    }
    display::row(&format!(
        " similarity  {} (threshold {:.2})",
        display::similarity_colored(similarity(&norm_text, &norm_term), config.fuzzy_threshold),
        config.fuzzy_threshold
    ));
    display::row(&format!(
        " highlight   {}",
        display::segments(&highlight(text, term))
    ));
    display::section_bot();
    Ok(())
}

fn run_similarity(a: &str, b: &str) -> Result<()> {
    let (na, nb) = (normalize(a), normalize(b));
    println!("normalized:  {:?} vs {:?}", na, nb);
    println!("distance:    {}", levenshtein(&na, &nb));
    println!("similarity:  {:.4}", similarity(&na, &nb));
    Ok(())
}

fn run_schema(entity: &str) -> Result<()> {
    let schema = EntitySchema::by_name(entity)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
