//! Command-line host for the admin catalog.
//!
//! ```text
//! catalogx-admin list [--query Q] [--page N]
//! catalogx-admin facets
//! catalogx-admin export [--query Q]
//! catalogx-admin delete <ID> [--yes]
//! catalogx-admin catalogue
//! ```

use std::io::{BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use catalogx_admin::{
    AdminConfig, CatalogController, CatalogView, DeleteOutcome, DirectorySink, HttpCatalogStore,
    Notice, NoticeLevel, TableBody, require_session,
};
use catalogx_core::ProductId;

#[derive(Debug, Parser)]
#[command(name = "catalogx-admin", about = "Browse, export and prune the product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show one page of the catalog.
    List {
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List the distinct categories.
    Facets,
    /// Write the (filtered) catalog to a CSV file.
    Export {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Delete one product after confirmation.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the catalogue document locator.
    Catalogue,
}

#[tokio::main]
async fn main() -> ExitCode {
    catalogx_observability::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AdminConfig::from_env().context("loading configuration")?;

    let Ok(session) = require_session(config.session()) else {
        eprintln!("not signed in: set CATALOGX_AUTH_TOKEN");
        return Ok(ExitCode::from(2));
    };

    let store = HttpCatalogStore::with_session(&config.api_base_url, &session);
    let mut controller = CatalogController::new(store, session, &config)?;
    // Failures surface as notices below.
    let _ = controller.refresh().await;

    match cli.command {
        Command::List { query, page } => {
            if let Some(query) = query {
                controller.set_query(query);
            }
            controller.go_to_page(page);
            print_view(&controller.view(), &config.export.currency_symbol);
        }
        Command::Facets => {
            for facet in controller.facets() {
                println!("{facet}");
            }
        }
        Command::Export { query } => {
            if let Some(query) = query {
                controller.set_query(query);
            }
            let sink = DirectorySink::new(&config.export_dir);
            let today = chrono::Local::now().date_naive();
            if let Ok(payload) = controller.export(&sink, today) {
                println!("{}", sink.target(&payload.filename).display());
            }
        }
        Command::Delete { id, yes } => {
            let id: ProductId = id.parse()?;
            controller.request_delete(&id)?;

            let confirmed = yes || confirm(controller.delete_prompt().as_deref())?;
            if confirmed {
                if let DeleteOutcome::Failed { .. } = controller.confirm_delete().await {
                    print_notices(controller.take_notices());
                    return Ok(ExitCode::FAILURE);
                }
            } else {
                controller.cancel_delete();
                println!("cancelled");
            }
        }
        Command::Catalogue => println!("{}", controller.catalogue_document()),
    }

    let notices = controller.take_notices();
    let failed = notices.iter().any(Notice::is_error);
    print_notices(notices);
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn confirm(prompt: Option<&str>) -> anyhow::Result<bool> {
    let Some(prompt) = prompt else {
        return Ok(false);
    };
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_view(view: &CatalogView<'_>, currency: &str) {
    if view.summary.search_active {
        println!("{} products found", view.summary.matched);
    } else {
        println!("Total Products: {}", view.summary.total);
    }

    match &view.body {
        TableBody::Busy => println!("loading..."),
        TableBody::Empty(message) => println!("{message}"),
        TableBody::Rows(rows) => {
            for row in rows {
                let record = row.record;
                let category = record
                    .category
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .unwrap_or("N/A");
                let price = record
                    .price()
                    .map(|p| p.with_symbol(currency))
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "{:>4}  {:<24}  {:<16}  {:>10}  {}",
                    row.serial, record.name, category, price, record.id
                );
            }
        }
    }

    if view.show_pagination {
        println!("Page {} of {}", view.page, view.total_pages);
    }
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}
