use axum::{routing::get, Extension, Router};
use book_catalog::catalog::Catalog;
use book_catalog::config::{AppConfig, USAGE};
use book_catalog::ingestion::loader::load_catalog_file;
use book_catalog::report::{console, export, repl};
use book_catalog::search::handlers::{
    handle_get_book, handle_popular, handle_search, handle_stats, handle_tags,
};
use book_catalog::search::types::SearchSettings;
use chrono::NaiveDateTime;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match AppConfig::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };
    let cutoff = config.cutoff()?;

    // 1. Build phase:
    tracing::info!("Decoding input as {}", config.encoding.name());
    let catalog = Arc::new(load_catalog_file(&config.input, config.load_options())?);

    // 2. Report:
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        console::write_rule(&mut out)?;
        console::write_tags(&mut out, &catalog)?;
        console::write_stats(&mut out, &catalog)?;

        let mut rng = rand::thread_rng();
        export::export_sample_file(&catalog, config.sample_size, &config.output, &mut rng)?;

        console::write_popular(&mut out, &catalog, config.top_n)?;
    }

    // 3. Query phase:
    if let Some(addr) = config.serve {
        return serve(catalog, cutoff, addr).await;
    }

    if config.interactive {
        let answered = tokio::task::spawn_blocking(move || {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            repl::run_repl(stdin.lock(), &mut stdout.lock(), &catalog, cutoff)
        })
        .await??;
        tracing::info!("Answered {} queries", answered);
    }

    Ok(())
}

async fn serve(
    catalog: Arc<Catalog>,
    cutoff: NaiveDateTime,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/search", get(handle_search))
        .route("/books/:key", get(handle_get_book))
        .route("/tags", get(handle_tags))
        .route("/popular", get(handle_popular))
        .route("/stats", get(handle_stats))
        .layer(Extension(catalog))
        .layer(Extension(SearchSettings { cutoff }));

    tracing::info!("HTTP server listening on {}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
