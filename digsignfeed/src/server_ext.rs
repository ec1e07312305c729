//! Extension digsignserver: flux JSON, page d'affichage et assets

use crate::model::{DisplaySettings, FeedResponse, LayoutType, SlideKind, SlideWire};
use crate::page::{PageContext, render_gallery_page};
use crate::FeedAssembler;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use digsignserver::Server;
use rust_embed::RustEmbed;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

/// Route de la page d'affichage
pub const PAGE_ROUTE: &str = "/digital-signage";
/// Route des fichiers du client navigateur
pub const ASSETS_ROUTE: &str = "/digsign-assets";
/// Route du flux JSON
pub const FEED_ROUTE: &str = "/api/slides";

#[derive(RustEmbed, Clone)]
#[folder = "assets/"]
struct FeedAssets;

/// Handler pour GET /api/slides
#[utoipa::path(
    get,
    path = "/api/slides",
    responses(
        (status = 200, description = "Current slides and display settings", body = FeedResponse),
        (status = 500, description = "Content store failure")
    ),
    tag = "slides"
)]
pub async fn get_slides(State(assembler): State<Arc<FeedAssembler>>) -> Response {
    match assembler.build_feed().await {
        Ok(feed) => (
            [(header::CACHE_CONTROL, "no-store, max-age=0")],
            Json(feed),
        )
            .into_response(),
        Err(e) => {
            error!("Cannot build slide feed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CACHE_CONTROL, "no-store, max-age=0")],
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Handler pour GET /digital-signage
pub async fn gallery_page(State(assembler): State<Arc<FeedAssembler>>) -> impl IntoResponse {
    let settings = assembler.settings();
    let ctx = PageContext {
        category: settings.category_name(),
        settings: settings.display_settings(),
        panels: settings.panel_content(),
        image_size: settings.image_size(),
        feed_url: FEED_ROUTE.to_string(),
        assets_route: ASSETS_ROUTE.to_string(),
    };
    Html(render_gallery_page(&ctx))
}

/// API OpenAPI du flux
#[derive(OpenApi)]
#[openapi(
    paths(get_slides),
    components(schemas(FeedResponse, SlideWire, SlideKind, DisplaySettings, LayoutType)),
    tags(
        (name = "slides", description = "Digital signage slide feed")
    )
)]
pub struct FeedApiDoc;

/// Trait d'extension pour publier le flux sur digsignserver
pub trait FeedExt {
    /// Enregistre les routes du flux
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /api/slides` - flux JSON, `Cache-Control: no-store`
    /// - `GET /digital-signage` - page d'affichage
    /// - `GET /digsign-assets/*` - script et feuille de style
    /// - `GET /swagger-ui/slides` - documentation Swagger
    async fn init_feed(&mut self, assembler: Arc<FeedAssembler>);
}

impl FeedExt for Server {
    async fn init_feed(&mut self, assembler: Arc<FeedAssembler>) {
        let api_router = Router::new()
            .route("/", get(get_slides))
            .with_state(assembler.clone());
        self.add_openapi(api_router, FeedApiDoc::openapi(), "slides")
            .await;

        self.add_handler_with_state(PAGE_ROUTE, gallery_page, assembler)
            .await;
        self.add_dir::<FeedAssets>(ASSETS_ROUTE).await;

        info!("Slide feed on {}, page on {}", FEED_ROUTE, PAGE_ROUTE);
    }
}
