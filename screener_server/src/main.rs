// src/main.rs

use std::path::PathBuf;

use screener_server::{run_server, AppState};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let csv_path = std::env::var("WATCHLIST_CSV").unwrap_or_else(|_| "scwatchlist.csv".to_string());
    let state = AppState::from_csv(&PathBuf::from(csv_path));

    println!("Starting screener server at http://127.0.0.1:8080");
    run_server(state).await
}
