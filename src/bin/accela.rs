//! Accela API CLI binary.
//!
//! A command-line interface for reading the Accela Construct API.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use accela::cli::{Cli, Command, Entity, GetEntity, ListArgs};
use accela::{
    AccelaClient, AccelaError, Agency, AgencyEnvironment, AgencyEnvironmentListQuery,
    AgencyListQuery, Document, Download, Get, List, Module, PagedResult, PrettyPrint, Record,
    RecordAddress, RecordAddressListQuery, RecordDocumentListQuery, RecordListQuery, RecordParcel,
    RecordParcelListQuery, RecordType, RecordTypeListQuery,
};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let client = match cli.client_config().and_then(AccelaClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, AccelaError::ConfigMissing(_)) {
                eprintln!(
                    "Hint: Set ACCELA_ACCESS_TOKEN, ACCELA_AGENCY and ACCELA_ENVIRONMENT \
                     or pass --token, --agency and --environment"
                );
            }
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &AccelaClient, cli: Cli) -> accela::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List { entity, args } => handle_list(client, entity, &args, cli.json).await,
        Command::Download { id, output } => handle_download(client, id, output, cli.json).await,
    }
}

async fn handle_get(
    client: &AccelaClient,
    entity: GetEntity,
    id: &str,
    json: bool,
) -> accela::Result<()> {
    match entity {
        GetEntity::Record => {
            let record = Record::get(client, id.to_string()).await?;
            output_single(&record, json)?;
        }
        GetEntity::Document => {
            let document = Document::get(client, parse_document_id(id)?).await?;
            output_single(&document, json)?;
        }
    }
    Ok(())
}

fn parse_document_id(id: &str) -> accela::Result<u64> {
    id.parse()
        .map_err(|_| AccelaError::ConfigInvalid(format!("document ID must be numeric, got '{id}'")))
}

fn require<'a>(value: &'a Option<String>, flag: &str, entity: &str) -> accela::Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| AccelaError::ConfigInvalid(format!("{flag} is required for listing {entity}")))
}

async fn handle_list(
    client: &AccelaClient,
    entity: Entity,
    args: &ListArgs,
    json: bool,
) -> accela::Result<()> {
    let fields = (!args.fields.is_empty()).then(|| args.fields.clone());

    match entity {
        Entity::Records => {
            let query = RecordListQuery {
                module: args.module.clone(),
                record_type: args.record_type.clone(),
                opened_date_after: args.opened_after,
            };
            list_entities::<Record, _, _>(client, &query, args, json, |item| {
                RecordRow::from(item)
            })
            .await
        }
        Entity::Addresses => {
            let query = RecordAddressListQuery {
                is_primary: args.primary,
                fields,
                ..RecordAddressListQuery::for_record(require(&args.record, "--record", "addresses")?)
            };
            list_entities::<RecordAddress, _, _>(client, &query, args, json, |item| {
                AddressRow::from(item)
            })
            .await
        }
        Entity::Parcels => {
            let query = RecordParcelListQuery {
                fields,
                ..RecordParcelListQuery::for_record(require(&args.record, "--record", "parcels")?)
            };
            list_entities::<RecordParcel, _, _>(client, &query, args, json, |item| {
                ParcelRow::from(item)
            })
            .await
        }
        Entity::Documents => {
            let query =
                RecordDocumentListQuery::for_record(require(&args.record, "--record", "documents")?);
            list_entities::<Document, _, _>(client, &query, args, json, |item| {
                DocumentRow::from(item)
            })
            .await
        }
        Entity::Modules => {
            let modules = Module::list(client).await?;
            output_items(&modules, json, |m| ModuleRow::from(m))
        }
        Entity::RecordTypes => {
            let query = RecordTypeListQuery::new(require(&args.module, "--module", "record-types")?);
            list_entities::<RecordType, _, _>(client, &query, args, json, |item| {
                RecordTypeRow::from(item)
            })
            .await
        }
        Entity::Agencies => {
            let query = AgencyListQuery {
                name: args.name.clone(),
            };
            list_entities::<Agency, _, _>(client, &query, args, json, |item| {
                AgencyRow::from(item)
            })
            .await
        }
        Entity::Environments => {
            let agency = args.name.as_deref().unwrap_or_else(|| client.agency());
            let query = AgencyEnvironmentListQuery::for_agency(agency);
            list_entities::<AgencyEnvironment, _, _>(client, &query, args, json, |item| {
                EnvironmentRow::from(item)
            })
            .await
        }
    }
}

async fn list_entities<T, R, F>(
    client: &AccelaClient,
    query: &T::Query,
    args: &ListArgs,
    json: bool,
    to_row: F,
) -> accela::Result<()>
where
    T: List,
    R: Tabled,
    F: Fn(&T) -> R,
{
    let page = T::list(client, query, args.limit, args.offset).await?;
    if args.all {
        let items = page.collect_all().await?;
        output_items(&items, json, to_row)
    } else {
        output_page(&page, json, to_row)
    }
}

async fn handle_download(
    client: &AccelaClient,
    id: u64,
    output: Option<PathBuf>,
    json: bool,
) -> accela::Result<()> {
    let path = match output {
        Some(path) => path,
        None => {
            let document = Document::get(client, id).await?;
            default_download_path(&document)
        }
    };

    let content = Document::download(client, id).await?;
    let content_type = content.content_type().map(str::to_string);
    let written = content.save_to(&path).await?;

    if json {
        let summary = serde_json::json!({
            "id": id,
            "path": path.display().to_string(),
            "bytes": written,
            "content_type": content_type,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Saved {} bytes to {}", written, path.display());
    }
    Ok(())
}

/// The document's own file name, stripped of any directory parts.
fn default_download_path(document: &Document) -> PathBuf {
    document
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).file_name())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("document-{}", document.id)))
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> accela::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_items<T, R, F>(items: &[T], json: bool, to_row: F) -> accela::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &PagedResult<T>, json: bool, to_row: F) -> accela::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        println!("{}", Table::new(page.map(to_row)));
        if page.is_empty() {
            println!("\nNo items at offset {} ({} total)", page.offset, page.total);
        } else {
            let first = u64::from(page.offset) + 1;
            let last = u64::from(page.offset) + page.len() as u64;
            println!("\nItems {}-{} of {}", first, last, page.total);
        }
        if page.has_more {
            println!(
                "More available: --offset {}",
                page.offset.saturating_add(page.limit)
            );
        }
    }
    Ok(())
}

// Table row types for non-JSON output

fn or_blank(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

#[derive(Tabled)]
struct RecordRow {
    id: String,
    custom_id: String,
    #[tabled(rename = "type")]
    record_type: String,
    status: String,
    opened: String,
}

impl From<&Record> for RecordRow {
    fn from(r: &Record) -> Self {
        Self {
            id: or_blank(r.id.as_deref()),
            custom_id: or_blank(r.custom_id.as_deref()),
            record_type: or_blank(r.type_text()),
            status: or_blank(r.status_text()),
            opened: or_blank(r.opened_date.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct AddressRow {
    id: String,
    primary: bool,
    address: String,
}

impl From<&RecordAddress> for AddressRow {
    fn from(a: &RecordAddress) -> Self {
        Self {
            id: or_blank(a.id.as_deref()),
            primary: a.is_primary,
            address: a.display_line(),
        }
    }
}

#[derive(Tabled)]
struct ParcelRow {
    id: String,
    parcel_number: String,
    primary: String,
    owners: usize,
}

impl From<&RecordParcel> for ParcelRow {
    fn from(p: &RecordParcel) -> Self {
        Self {
            id: or_blank(p.id.as_deref()),
            parcel_number: or_blank(p.parcel_number.as_deref()),
            primary: or_blank(p.is_primary.as_deref()),
            owners: p.owners.as_ref().map_or(0, Vec::len),
        }
    }
}

#[derive(Tabled)]
struct DocumentRow {
    id: u64,
    file_name: String,
    #[tabled(rename = "type")]
    content_type: String,
    size: String,
    uploaded: String,
}

impl From<&Document> for DocumentRow {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id,
            file_name: or_blank(d.file_name.as_deref()),
            content_type: or_blank(d.content_type.as_deref()),
            size: d.size.map(|s| s.to_string()).unwrap_or_default(),
            uploaded: d
                .uploaded_date
                .map(|u| u.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ModuleRow {
    value: String,
    text: String,
}

impl From<&Module> for ModuleRow {
    fn from(m: &Module) -> Self {
        Self {
            value: m.value.clone(),
            text: m.text.clone(),
        }
    }
}

#[derive(Tabled)]
struct RecordTypeRow {
    value: String,
    alias: String,
    createable: bool,
}

impl From<&RecordType> for RecordTypeRow {
    fn from(t: &RecordType) -> Self {
        Self {
            value: t.value.clone(),
            alias: t.alias.clone(),
            createable: t.createable,
        }
    }
}

#[derive(Tabled)]
struct AgencyRow {
    name: String,
    display_name: String,
    state: String,
    enabled: String,
}

impl From<&Agency> for AgencyRow {
    fn from(a: &Agency) -> Self {
        Self {
            name: a.name.clone(),
            display_name: or_blank(a.display_name.as_deref()),
            state: or_blank(a.state.as_deref()),
            enabled: a.enabled.map(|e| e.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct EnvironmentRow {
    name: String,
    default: String,
    enabled: String,
    version: String,
}

impl From<&AgencyEnvironment> for EnvironmentRow {
    fn from(e: &AgencyEnvironment) -> Self {
        let flag = |v: Option<bool>| v.map(|b| b.to_string()).unwrap_or_default();
        Self {
            name: e.name.clone(),
            default: flag(e.is_default),
            enabled: flag(e.enabled),
            version: or_blank(e.version.as_deref()),
        }
    }
}
