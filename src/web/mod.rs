// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Web UI for browsing the skin catalog

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::query::{
    Facet, FacetOption, FilterState, Gallery, QueryEngine, QueryView, SkinSetFacet,
};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
}

/// Create the web application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let sprites = ServeDir::new(&state.config.sprite_dir);
    let prefix = state.config.web.sprite_url_prefix.trim_end_matches('/').to_string();

    Router::new()
        // Pages
        .route("/", get(index_page))
        // API endpoints
        .route("/api/catalog", get(api_get_catalog))
        .route("/api/facets", get(api_get_facets))
        .route("/api/skins", get(api_get_skins))
        .nest_service(&prefix, sprites)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Each request reads the catalog afresh; the browser session sees one
/// consistent snapshot per page load.
fn load_catalog(state: &AppState) -> Result<Catalog, String> {
    Catalog::load(&state.config.catalog_path).map_err(|e| {
        warn!("Catalog load failed: {}", e);
        e.to_string()
    })
}

fn error_response(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

// === Page Handlers ===

async fn index_page(
    State(state): State<Arc<AppState>>,
    Query(selection): Query<FilterState>,
) -> Html<String> {
    match load_catalog(&state) {
        Ok(catalog) => {
            let view = QueryEngine::new(&catalog).view(&selection);
            Html(render_index(&view, &state.config))
        }
        Err(message) => Html(render_error(&message)),
    }
}

// === API Handlers ===

async fn api_get_catalog(State(state): State<Arc<AppState>>) -> Response {
    match load_catalog(&state) {
        Ok(catalog) => Json(catalog).into_response(),
        Err(message) => error_response(message),
    }
}

async fn api_get_facets(
    State(state): State<Arc<AppState>>,
    Query(selection): Query<FilterState>,
) -> Response {
    match load_catalog(&state) {
        Ok(catalog) => {
            let view = QueryEngine::new(&catalog).view(&selection);
            Json(serde_json::json!({
                "filters": view.filters,
                "primary": view.primary,
                "skin_sets": view.skin_sets,
                "secondary": view.secondary,
            }))
            .into_response()
        }
        Err(message) => error_response(message),
    }
}

async fn api_get_skins(
    State(state): State<Arc<AppState>>,
    Query(selection): Query<FilterState>,
) -> Response {
    match load_catalog(&state) {
        Ok(catalog) => {
            let filters = FilterState::from_selection(&selection);
            let gallery = QueryEngine::new(&catalog).gallery(&filters);
            Json(serde_json::json!({ "filters": filters, "gallery": gallery })).into_response()
        }
        Err(message) => error_response(message),
    }
}

// === Template Rendering ===

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Query string for a filter state, omitting unset fields
fn filter_href(filters: &FilterState) -> String {
    let pairs = [
        ("class", &filters.class),
        ("gender", &filters.gender),
        ("skin_set", &filters.skin_set),
        ("rarity", &filters.rarity),
        ("color", &filters.color),
        ("slot", &filters.slot),
    ];
    let query: Vec<String> = pairs
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    format!("/?{}", query.join("&"))
}

fn base_template(title: &str, content: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Skintag</title>
    <style>
        :root {{
            --bg-primary: #1a1a2e;
            --bg-secondary: #16213e;
            --bg-card: #0f3460;
            --text-primary: #e8e8e8;
            --text-secondary: #a0a0a0;
            --accent: #e94560;
            --border: #2a2a4a;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
        }}
        .container {{ max-width: 1400px; margin: 0 auto; padding: 20px; }}
        nav {{
            background: var(--bg-secondary);
            padding: 15px 20px;
            border-bottom: 1px solid var(--border);
        }}
        nav .logo {{ font-size: 1.5em; font-weight: bold; color: var(--accent); text-decoration: none; }}
        .card {{ background: var(--bg-card); border-radius: 12px; padding: 20px; margin-bottom: 20px; }}
        .card h2 {{ margin-bottom: 15px; color: var(--accent); }}
        .filters {{ display: flex; gap: 20px; flex-wrap: wrap; }}
        select {{ padding: 6px 10px; border-radius: 6px; background: var(--bg-secondary); color: var(--text-primary); border: 1px solid var(--border); }}
        .skin-sets {{ display: flex; gap: 10px; flex-wrap: wrap; }}
        .skin-set {{
            display: inline-block;
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 6px 14px;
            border-radius: 6px;
            color: var(--text-primary);
            text-decoration: none;
        }}
        .skin-set.active {{ background: var(--accent); }}
        .gallery {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 20px; }}
        .skin-item {{ background: var(--bg-secondary); border-radius: 12px; padding: 10px; cursor: pointer; }}
        .skin-item img {{ width: 100%; height: 200px; object-fit: contain; }}
        .skin-details p {{ color: var(--text-secondary); font-size: 0.9em; }}
        .empty-message {{ color: var(--text-secondary); font-style: italic; }}
        .error-message {{ color: var(--accent); }}
        .modal {{ display: none; position: fixed; inset: 0; background: rgba(0,0,0,0.8); align-items: center; justify-content: center; }}
        .modal.open {{ display: flex; }}
        .modal-content {{ background: var(--bg-card); border-radius: 12px; padding: 20px; max-width: 90vw; max-height: 90vh; position: relative; }}
        .modal-content img {{ max-width: 80vw; max-height: 75vh; }}
        .modal-close {{ position: absolute; top: 8px; right: 14px; font-size: 1.6em; cursor: pointer; background: none; border: none; color: var(--text-primary); }}
    </style>
</head>
<body>
    <nav>
        <a href="/" class="logo">Skintag</a>
    </nav>
    <main class="container">
        {}
    </main>
</body>
</html>"#, escape_html(title), content)
}

fn render_error(message: &str) -> String {
    let content = format!(
        r#"<div class="card"><p class="error-message">Error loading skin data: {}</p></div>"#,
        escape_html(message)
    );
    base_template("Error", &content)
}

fn render_select(name: &str, label: &str, options: &[FacetOption], selected: &str) -> String {
    let options_html: String = options
        .iter()
        .map(|o| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&o.value),
                if o.value == selected { " selected" } else { "" },
                escape_html(&o.label)
            )
        })
        .collect();

    format!(
        r#"<label>{} <select name="{}" onchange="this.form.submit()"><option value="">Any</option>{}</select></label>"#,
        escape_html(label),
        name,
        options_html
    )
}

fn plain_options(values: &[String]) -> Vec<FacetOption> {
    values
        .iter()
        .map(|v| FacetOption { value: v.clone(), label: v.clone() })
        .collect()
}

fn hidden(name: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(r#"<input type="hidden" name="{}" value="{}">"#, name, escape_html(value))
    }
}

fn render_index(view: &QueryView<'_>, config: &AppConfig) -> String {
    let filters = &view.filters;

    let primary_html = format!(
        r#"<form method="get" action="/" class="filters">{}{}</form>"#,
        render_select("class", "Class", &plain_options(&view.primary.classes), &filters.class),
        render_select("gender", "Gender", &plain_options(&view.primary.genders), &filters.gender),
    );

    let skin_sets_html = match &view.skin_sets {
        SkinSetFacet::SelectionRequired => {
            r#"<p class="empty-message">Please select a class and gender to see available skin sets.</p>"#.to_string()
        }
        SkinSetFacet::NoSkinSets => {
            r#"<p class="empty-message">No skin sets found for the selected class and gender.</p>"#.to_string()
        }
        SkinSetFacet::Available(sets) => {
            let links: String = sets
                .iter()
                .map(|set| {
                    let mut target = filters.clone();
                    target.set_skin_set(set.id.as_str());
                    format!(
                        r#"<a class="skin-set{}" href="{}">{}</a>"#,
                        if set.id == filters.skin_set { " active" } else { "" },
                        escape_html(&filter_href(&target)),
                        escape_html(&set.name)
                    )
                })
                .collect();
            format!(r#"<div class="skin-sets">{}</div>"#, links)
        }
    };

    let secondary_html = match &view.secondary {
        Some(facets) => format!(
            r#"<form method="get" action="/" class="filters">{}{}{}{}{}{}</form>"#,
            hidden("class", &filters.class),
            hidden("gender", &filters.gender),
            hidden("skin_set", &filters.skin_set),
            render_select("rarity", "Rarity", facets.options(Facet::Rarity), &filters.rarity),
            render_select("color", "Color", facets.options(Facet::Color), &filters.color),
            render_select("slot", "Slot", facets.options(Facet::Slot), &filters.slot),
        ),
        None => String::new(),
    };

    let gallery_html = match &view.gallery {
        Gallery::SelectionRequired | Gallery::SkinSetRequired => {
            r#"<p class="empty-message">Select a skin set to view skins.</p>"#.to_string()
        }
        Gallery::NoSkins => {
            r#"<p class="empty-message">No skins found for the selected filters.</p>"#.to_string()
        }
        Gallery::Entries(entries) => {
            let prefix = config.web.sprite_url_prefix.trim_end_matches('/');
            let placeholder = escape_html(&config.web.placeholder_url);
            let items: String = entries
                .iter()
                .map(|entry| {
                    let record = entry.record;
                    let or_unknown = |v: &str| if v.is_empty() { "Unknown".to_string() } else { escape_html(v) };
                    format!(r#"
                <div class="skin-item" onclick="openModal(this)">
                    <img src="{}/{}" alt="{}" data-placeholder="{}" onerror="this.onerror=null;this.src=this.dataset.placeholder">
                    <div class="skin-details">
                        <h3>{}</h3>
                        <p>Slot: {}</p>
                        <p>Color: {}</p>
                        <p>Rarity: {}</p>
                    </div>
                </div>"#,
                        prefix,
                        urlencoding::encode(entry.filename),
                        escape_html(entry.filename),
                        placeholder,
                        if record.skin_set_name.is_empty() { "Unknown Set".to_string() } else { escape_html(&record.skin_set_name) },
                        or_unknown(&record.slot),
                        or_unknown(&record.color),
                        or_unknown(&record.rarity),
                    )
                })
                .collect();
            format!(r#"<div class="gallery">{}</div>"#, items)
        }
    };

    let content = format!(r#"
        <div class="card">
            <h2>Hero</h2>
            {}
        </div>
        <div class="card">
            <h2>Skin Sets</h2>
            {}
        </div>
        {}
        <div class="card">
            <h2>Skins</h2>
            {}
        </div>
        <div id="modal" class="modal" onclick="if (event.target === this) closeModal()">
            <div class="modal-content">
                <button class="modal-close" onclick="closeModal()">&times;</button>
                <img id="modal-image" src="" alt="">
                <div id="modal-details"></div>
            </div>
        </div>
        <script>
            function openModal(item) {{
                const img = item.querySelector('img');
                document.getElementById('modal-image').src = img.src;
                document.getElementById('modal-image').alt = img.alt;
                document.getElementById('modal-details').innerHTML = item.querySelector('.skin-details').innerHTML;
                document.getElementById('modal').classList.add('open');
            }}
            function closeModal() {{
                document.getElementById('modal').classList.remove('open');
            }}
        </script>
    "#,
        primary_html,
        skin_sets_html,
        if secondary_html.is_empty() { String::new() } else { format!(r#"<div class="card"><h2>Filters</h2>{}</div>"#, secondary_html) },
        gallery_html,
    );

    base_template("Skins", &content)
}

/// Start the web server
pub async fn start_server(config: AppConfig) -> crate::Result<()> {
    let addr = format!("{}:{}", config.web.host, config.web.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Catalog: {:?}", config.catalog_path);
    info!("Sprites: {:?} at {}", config.sprite_dir, config.web.sprite_url_prefix);
    info!("Web UI available at http://{}", addr);

    let router = create_router(Arc::new(AppState { config }));
    axum::serve(listener, router).await
        .map_err(|e| crate::SkintagError::Server(e.to_string()))?;

    Ok(())
}
