//! Actix Web server exposing the dashboard page, its update endpoint and the
//! optional static assets.
//!
//! All handlers read from one immutable [`DataContext`]; nothing is written
//! after startup, so workers share it without locking.

use std::path::{Path, PathBuf};

use actix_web::{App, HttpResponse, HttpServer, web};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::cluster::DataContext;
use crate::dashboard;
use crate::util::is_plain_file_name;

mod page;

use page::{PageOptions, render_page};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub title: String,
    pub assets_dir: PathBuf,
    pub logo: String,
    pub stylesheet: String,
}

/// Shared state backing HTTP handlers.
pub(crate) struct ServerState {
    context: DataContext,
    page: String,
    assets_dir: PathBuf,
}

impl ServerState {
    pub(crate) fn new(context: DataContext, config: &ServerConfig) -> Self {
        let logo = existing_asset(&config.assets_dir, &config.logo);
        let stylesheet = existing_asset(&config.assets_dir, &config.stylesheet);

        let page = render_page(
            context.leaders(),
            &PageOptions {
                title: &config.title,
                logo,
                stylesheet,
            },
        );

        Self {
            context,
            page,
            assets_dir: config.assets_dir.clone(),
        }
    }
}

fn existing_asset<'a>(dir: &Path, name: &'a str) -> Option<&'a str> {
    (is_plain_file_name(name) && dir.join(name).is_file()).then_some(name)
}

#[derive(Deserialize)]
struct UpdateQuery {
    leader: Option<String>,
}

/// Serve the dashboard until the process is stopped.
pub fn serve(context: DataContext, config: &ServerConfig) -> Result<()> {
    let state = web::Data::new(ServerState::new(context, config));
    let bind = (config.host.clone(), config.port);

    actix_web::rt::System::new().block_on(async move {
        let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
            .bind(bind.clone())
            .with_context(|| format!("failed to bind {}:{}", bind.0, bind.1))?;

        info!(host = %bind.0, port = bind.1, "dashboard listening");
        server.run().await.context("HTTP server error")
    })
}

pub(crate) fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_route))
        .route("/update", web::get().to(update_route))
        .route("/assets/{file}", web::get().to(asset_route));
}

/// Serve the pre-rendered dashboard page.
async fn index_route(state: web::Data<ServerState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.page.clone())
}

/// Recompute both figures for the dropdown value.
///
/// A query string that does not decode falls back to the whole dataset.
async fn update_route(
    query: Result<web::Query<UpdateQuery>, actix_web::Error>,
    state: web::Data<ServerState>,
) -> HttpResponse {
    let leader = match &query {
        Ok(query) => query.leader.as_deref(),
        Err(err) => {
            debug!("ignoring malformed update query: {err}");
            None
        }
    };
    HttpResponse::Ok().json(dashboard::update(&state.context, leader))
}

/// Return a file from the assets directory, or 404.
async fn asset_route(file: web::Path<String>, state: web::Data<ServerState>) -> HttpResponse {
    let name = file.into_inner();
    if !is_plain_file_name(&name) {
        return HttpResponse::NotFound().finish();
    }

    let path = state.assets_dir.join(&name);
    match web::block(move || std::fs::read(path)).await {
        Ok(Ok(bytes)) => HttpResponse::Ok()
            .content_type(content_type(&name))
            .body(bytes),
        Ok(Err(err)) => {
            debug!(asset = %name, "asset unavailable: {err}");
            HttpResponse::NotFound().finish()
        }
        Err(err) => {
            error!(asset = %name, "asset read task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn content_type(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("css") => "text/css; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("js") => "text/javascript; charset=utf-8",
        _ => "application/octet-stream",
    }
}
