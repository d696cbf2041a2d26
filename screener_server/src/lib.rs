// src/lib.rs

pub mod filters;
pub mod format;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod rating;

use std::path::Path;

use chrono::{DateTime, Utc};
use watchlist_service::loader::load_watchlist;
use watchlist_service::models::{StockRecord, WatchlistError};

// Shared immutable state: the watchlist is parsed once at startup and cached
// for the process lifetime. Every view recomputes from it per request.
pub struct AppState {
    pub records: Vec<StockRecord>,
    pub loaded_at: DateTime<Utc>,
    pub load_warning: Option<String>,
}

impl AppState {
    pub fn new(records: Vec<StockRecord>) -> Self {
        AppState {
            records,
            loaded_at: Utc::now(),
            load_warning: None,
        }
    }

    pub fn with_warning(message: String) -> Self {
        AppState {
            records: Vec::new(),
            loaded_at: Utc::now(),
            load_warning: Some(message),
        }
    }

    // A missing file or a broken schema leaves the server running with an
    // empty watchlist and a user-visible warning instead of crashing.
    pub fn from_csv(path: &Path) -> Self {
        match load_watchlist(path) {
            Ok(records) => {
                tracing::info!(count = records.len(), path = %path.display(), "watchlist loaded");
                Self::new(records)
            }
            Err(err @ WatchlistError::MissingColumns(_)) => {
                tracing::error!(%err, "watchlist schema check failed");
                Self::with_warning(err.to_string())
            }
            Err(err) => {
                tracing::warn!(%err, "watchlist unavailable");
                Self::with_warning(err.to_string())
            }
        }
    }
}

pub async fn run_server(state: AppState) -> std::io::Result<()> {
    use actix_web::{web, App, HttpServer};
    use handlers::{
        health_check, industries, overview, rankings, screen, stock_detail, top_picks,
    };

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(screen)
            .service(overview)
            .service(rankings)
            .service(top_picks)
            .service(stock_detail)
            .service(industries)
            .service(health_check)
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}
