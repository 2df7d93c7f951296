//! Basic example demonstrating the Accela API client.
//!
//! Run with:
//! ```
//! ACCELA_ACCESS_TOKEN=token ACCELA_AGENCY=CHARLOTTE ACCELA_ENVIRONMENT=PROD \
//!     cargo run --example basic
//! ```

use accela::{AccelaClient, Get, List, Module, Record, RecordListQuery, RecordType, RecordTypeListQuery};
use futures::{pin_mut, TryStreamExt};

#[tokio::main]
async fn main() -> accela::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Accela client...");
    let client = AccelaClient::from_env()?;
    println!(
        "Connected to: {} (agency {}, environment {})",
        client.base_url(),
        client.agency(),
        client.environment()
    );

    // Modules come back in one unpaged response
    println!("\n--- Modules ---");
    let modules = Module::list(&client).await?;
    for module in &modules {
        println!("  - {} ({})", module.text, module.value);
    }

    let Some(module) = modules.first() else {
        println!("\nNo modules configured.");
        return Ok(());
    };

    // Record types of the first module
    println!("\n--- Record types in {} ---", module.value);
    let types = RecordType::list(&client, &RecordTypeListQuery::new(&module.value), 10, 0).await?;
    println!("Found {} record types (total: {})", types.len(), types.total);
    for record_type in &types {
        println!("  - {}", record_type.value);
    }

    // First page of records in that module
    println!("\n--- Records (first page) ---");
    let query = RecordListQuery {
        module: Some(module.value.clone()),
        ..Default::default()
    };
    let page = Record::list(&client, &query, 10, 0).await?;
    println!("Found {} records (total: {})", page.len(), page.total);

    for record in &page {
        println!(
            "  - {} [{}] {}",
            record.id.as_deref().unwrap_or("?"),
            record.status_text().unwrap_or("no status"),
            record.type_text().unwrap_or("")
        );
    }

    // Details of the first record
    if let Some(first) = page.items.first().and_then(|r| r.id.clone()) {
        println!("\n--- Record Details ---");
        let record = Record::get(&client, first).await?;
        println!("  Custom ID: {:?}", record.custom_id);
        println!("  Opened: {:?}", record.opened_date);

        let addresses = record.fetch_addresses(&client).await?;
        println!("  Addresses: {}", addresses.len());
        for address in addresses.iter().filter(|a| a.is_primary) {
            println!("    primary: {}", address.display_line());
        }

        let documents = record.fetch_documents(&client).await?;
        println!("  Documents: {}", documents.len());
        for document in documents.iter().take(5) {
            println!(
                "    #{} {}",
                document.id,
                document.file_name.as_deref().unwrap_or("(unnamed)")
            );
        }
    }

    // Stream the first 25 records lazily, across pages
    println!("\n--- Streaming records ---");
    let stream = page.auto_paging();
    pin_mut!(stream);
    let mut seen = 0;
    while let Some(record) = stream.try_next().await? {
        seen += 1;
        if seen >= 25 {
            break;
        }
        tracing::debug!(id = ?record.id, "streamed record");
    }
    println!("Streamed {} records", seen);

    println!("\nDone!");
    Ok(())
}
