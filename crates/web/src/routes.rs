// sishc admin panel - Routes and request handlers
// Stateless per-request handlers: every request re-reads the
// configuration file, every mutation rewrites it wholesale.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::info;

use sishc_admin_common::{
    collapse_to_defaults, resolve_defaults, strip_ansi_codes, ConfigStore, ConfigValue, TunnelForm,
};

use crate::error::Result;
use crate::views;

/// Shared application state. Only the store lives here; nothing else
/// survives a request.
pub struct AppState {
    pub store: ConfigStore,
}

/// Create the panel router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(add_form).post(add_tunnel))
        .route("/edit/:name", get(edit_form).post(edit_tunnel))
        .route("/delete/:name", post(delete_tunnel))
        .route("/logs/:name", get(view_logs))
        .route("/config", get(config_form).post(update_config))
        .route("/edit_raw", get(edit_raw_form).post(update_raw))
        .route("/health", get(health))
        .with_state(state)
}

/// Successful POSTs answer 302 back to the list view.
fn redirect_to_index() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// List view: every tunnel with inherited fields resolved for display.
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let config = state.store.load()?;
    let tunnels: Vec<_> = config
        .tunnels
        .iter()
        .cloned()
        .map(|tunnel| resolve_defaults(tunnel, &config))
        .collect();
    Ok(Html(views::index_page(&tunnels)))
}

async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>> {
    let global = state.store.load()?;
    let tunnel = global.tunnels.iter().find(|t| t.name == name);
    Ok(Html(views::edit_page(&name, tunnel, &global)))
}

async fn edit_tunnel(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Form(mut form): Form<TunnelForm>,
) -> Result<Response> {
    let global = state.store.load()?;
    let mut tunnels = global.tunnels.clone();
    // First match only; with duplicate names the later records are
    // unreachable from here.
    let tunnel = tunnels
        .iter_mut()
        .find(|t| t.name == name)
        .with_context(|| format!("no such tunnel: {}", name))?;
    collapse_to_defaults(&mut form, &global);
    form.apply_to(tunnel);
    state.store.save_tunnels(tunnels)?;
    info!("Updated tunnel {}", name);
    Ok(redirect_to_index())
}

async fn delete_tunnel(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response> {
    let mut tunnels = state.store.load_tunnels()?;
    // Every record sharing the name goes; an unknown name is a no-op.
    tunnels.retain(|t| t.name != name);
    state.store.save_tunnels(tunnels)?;
    info!("Deleted tunnel {}", name);
    Ok(redirect_to_index())
}

/// Log view: lines mentioning the tunnel name anywhere, ANSI-stripped,
/// in file order.
async fn view_logs(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Html<String>> {
    let lines: Vec<String> = state
        .store
        .read_log_lines()?
        .iter()
        .filter(|line| line.contains(&name))
        .map(|line| strip_ansi_codes(line).into_owned())
        .collect();
    Ok(Html(views::logs_page(&name, &lines)))
}

async fn config_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let global = state.store.load()?;
    Ok(Html(views::config_page(&global)))
}

/// Structured global editor submission. Every field is required; the
/// ports must parse as integers.
#[derive(Debug, Deserialize)]
pub struct GlobalConfigForm {
    pub ssh_key: String,
    pub local_protocol: String,
    pub local_host: String,
    pub local_port: String,
    pub remote_port: String,
    pub remote_server: String,
}

async fn update_config(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GlobalConfigForm>,
) -> Result<Response> {
    let local_port: i64 = form
        .local_port
        .parse()
        .context("local_port must be an integer")?;
    let remote_port: i64 = form
        .remote_port
        .parse()
        .context("remote_port must be an integer")?;

    let mut config = state.store.load()?;
    config.ssh_key = Some(ConfigValue::Text(form.ssh_key));
    config.local_protocol = Some(ConfigValue::Text(form.local_protocol));
    config.local_host = Some(ConfigValue::Text(form.local_host));
    config.local_port = Some(ConfigValue::Int(local_port));
    config.remote_port = Some(ConfigValue::Int(remote_port));
    config.remote_server = Some(ConfigValue::Text(form.remote_server));
    state.store.save(config)?;
    info!("Updated global config");
    Ok(redirect_to_index())
}

async fn add_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let global = state.store.load()?;
    Ok(Html(views::add_page(&global)))
}

async fn add_tunnel(
    State(state): State<Arc<AppState>>,
    Form(mut form): Form<TunnelForm>,
) -> Result<Response> {
    let global = state.store.load()?;
    let mut tunnels = global.tunnels.clone();
    collapse_to_defaults(&mut form, &global);
    // No uniqueness check: duplicate names are permitted, and only the
    // first match is reachable by edit.
    let name = form.name.clone();
    tunnels.push(form.into_tunnel());
    state.store.save_tunnels(tunnels)?;
    info!("Added tunnel {}", name);
    Ok(redirect_to_index())
}

async fn edit_raw_form(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let raw = state.store.read_raw()?;
    Ok(Html(views::edit_raw_page(&raw)))
}

#[derive(Debug, Deserialize)]
pub struct RawConfigForm {
    pub raw_content: String,
}

/// Raw passthrough: whatever was submitted is written verbatim, valid
/// YAML or not.
async fn update_raw(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RawConfigForm>,
) -> Result<Response> {
    state.store.write_raw(&form.raw_content)?;
    info!("Raw config rewritten");
    Ok(redirect_to_index())
}
