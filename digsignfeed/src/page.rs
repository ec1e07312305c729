//! Page d'affichage (coquille HTML du carrousel)
//!
//! The page only carries the layout, the initial settings and the script
//! reference. Slides are fetched by the script from the feed endpoint.

use crate::model::{DisplaySettings, LayoutType};
use crate::settings::PanelContent;
use serde_json::json;

pub const LOADING_TEXT: &str = "Loading content...";
pub const FAILED_TEXT: &str = "Failed to load content.";
pub const GALLERY_IMAGE_ALT: &str = "Gallery Image";
pub const CODE_ALT: &str = "Scan for more information";

/// Message affiché quand la catégorie ne contient rien
pub fn no_content_text(category: &str) -> String {
    format!("No content found for category \"{}\".", category)
}

/// Paramètres de rendu de la page
#[derive(Debug, Clone)]
pub struct PageContext {
    pub category: String,
    pub settings: DisplaySettings,
    pub panels: PanelContent,
    pub image_size: (u32, u32),
    /// URL du flux JSON lue par le script
    pub feed_url: String,
    /// Route des fichiers `digsign.js` et `digsign.css`
    pub assets_route: String,
}

/// Échappe le texte pour un contenu ou un attribut HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// JSON sûr à l'intérieur d'un élément `<script>`
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn client_config(ctx: &PageContext) -> serde_json::Value {
    let settings = ctx.settings.clone().sanitized();
    json!({
        "feedUrl": ctx.feed_url,
        "refreshInterval": settings.refresh_interval * 1000,
        "slideDelay": settings.slide_delay * 1000,
        "enableQrCodes": settings.enable_qrcodes,
        "category": ctx.category,
        "i18n": {
            "loading": LOADING_TEXT,
            "noContent": no_content_text(&ctx.category),
            "failedToLoad": FAILED_TEXT,
            "galleryImage": GALLERY_IMAGE_ALT,
            "scanForMore": CODE_ALT,
        }
    })
}

fn carousel_markup() -> String {
    format!(
        r#"<div class="main-content"><div class="gallery" id="digsign-carousel"><p id="digsign-loading">{}</p></div></div>"#,
        LOADING_TEXT
    )
}

fn layout_markup(layout: LayoutType, panels: &PanelContent) -> String {
    let carousel = carousel_markup();
    match layout {
        LayoutType::Fullscreen => format!(
            r#"<div class="digsign-layout digsign-layout-fullscreen">{}</div>"#,
            carousel
        ),
        LayoutType::HeaderAndPanels => format!(
            r#"<div class="digsign-layout digsign-layout-header-panels"><header class="digsign-header">{}</header><div class="digsign-panels"><div class="digsign-main-panel">{}</div><aside class="digsign-right-panel">{}</aside></div></div>"#,
            panels.header, carousel, panels.right
        ),
        LayoutType::TwoPanels => format!(
            r#"<div class="digsign-layout digsign-layout-two-panels"><div class="digsign-panels"><div class="digsign-main-panel">{}</div><aside class="digsign-right-panel">{}</aside></div></div>"#,
            carousel, panels.right
        ),
    }
}

/// Rend la page complète
///
/// Header and right panel HTML are inserted raw. The category name is
/// escaped wherever it appears outside the embedded JSON.
pub fn render_gallery_page(ctx: &PageContext) -> String {
    let assets = ctx.assets_route.trim_end_matches('/');
    let (width, height) = ctx.image_size;

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Digital Signage - {category}</title>
<link rel="stylesheet" href="{assets}/digsign.css">
<style>:root {{ --digsign-slide-width: {width}px; --digsign-slide-height: {height}px; }}</style>
</head>
<body class="digsign-body">
{layout}
<script>window.digsignConfig = {config};</script>
<script src="{assets}/digsign.js"></script>
</body>
</html>
"#,
        category = escape_html(&ctx.category),
        assets = escape_html(assets),
        width = width,
        height = height,
        layout = layout_markup(ctx.settings.layout_type, &ctx.panels),
        config = script_json(&client_config(ctx)),
    )
}
