//! Modèle de données du flux de diapositives
//!
//! [`FeedResponse`] is what the server writes. [`FeedUpdate`] is what a
//! client reads: every settings field is optional there, and a missing or
//! zero value means "keep the current one".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Nature d'une diapositive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Image,
    Html,
}

/// Une unité affichable du carrousel
///
/// For [`SlideKind::Image`], `content` is the image URL and is never empty.
/// For [`SlideKind::Html`], `content` is a pre-sanitized HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SlideWire", try_from = "SlideWire")]
pub struct Slide {
    pub kind: SlideKind,
    pub content: String,
    pub title: Option<String>,
    pub code_image_url: Option<String>,
    pub source_url: String,
}

impl Slide {
    pub fn image(url: impl Into<String>, title: Option<String>, source_url: impl Into<String>) -> Self {
        Self {
            kind: SlideKind::Image,
            content: url.into(),
            title,
            code_image_url: None,
            source_url: source_url.into(),
        }
    }

    pub fn html(fragment: impl Into<String>, title: Option<String>, source_url: impl Into<String>) -> Self {
        Self {
            kind: SlideKind::Html,
            content: fragment.into(),
            title,
            code_image_url: None,
            source_url: source_url.into(),
        }
    }

    pub fn with_code(mut self, code_image_url: Option<String>) -> Self {
        self.code_image_url = code_image_url;
        self
    }
}

/// Représentation JSON d'une diapositive
///
/// The title is written twice: `title` and `post_title` (the field older
/// clients read for image alt text). Readers prefer `title`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlideWire {
    #[serde(rename = "type")]
    pub kind: SlideKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qrcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,
    #[serde(default)]
    pub post_url: String,
}

impl From<Slide> for SlideWire {
    fn from(slide: Slide) -> Self {
        Self {
            kind: slide.kind,
            content: slide.content,
            post_title: slide.title.clone(),
            title: slide.title,
            qrcode: slide.code_image_url,
            post_url: slide.source_url,
        }
    }
}

impl TryFrom<SlideWire> for Slide {
    type Error = String;

    fn try_from(wire: SlideWire) -> Result<Self, Self::Error> {
        if wire.kind == SlideKind::Image && wire.content.trim().is_empty() {
            return Err("image slide without URL".to_string());
        }
        Ok(Self {
            kind: wire.kind,
            content: wire.content,
            title: wire.title.or(wire.post_title).filter(|t| !t.is_empty()),
            code_image_url: wire.qrcode.filter(|q| !q.is_empty()),
            source_url: wire.post_url,
        })
    }
}

/// Disposition de la page d'affichage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LayoutType {
    /// Le carrousel occupe tout l'écran
    #[default]
    #[serde(rename = "fullscreen")]
    Fullscreen,
    /// Bandeau d'en-tête puis carrousel (60 %) et panneau droit (40 %)
    #[serde(rename = "header-panels")]
    HeaderAndPanels,
    /// Carrousel (60 %) et panneau droit (40 %)
    #[serde(rename = "two-panels")]
    TwoPanels,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Fullscreen => "fullscreen",
            LayoutType::HeaderAndPanels => "header-panels",
            LayoutType::TwoPanels => "two-panels",
        }
    }

    pub fn has_header(&self) -> bool {
        matches!(self, LayoutType::HeaderAndPanels)
    }

    pub fn has_right_panel(&self) -> bool {
        !matches!(self, LayoutType::Fullscreen)
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fullscreen" => Ok(LayoutType::Fullscreen),
            "header-panels" => Ok(LayoutType::HeaderAndPanels),
            "two-panels" => Ok(LayoutType::TwoPanels),
            other => Err(format!("unknown layout type: {}", other)),
        }
    }
}

/// Réglages d'affichage pilotés par le serveur
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisplaySettings {
    /// Période de rafraîchissement du flux, en secondes (≥ 1)
    pub refresh_interval: u64,
    /// Durée d'affichage d'une diapositive, en secondes (≥ 1)
    pub slide_delay: u64,
    pub enable_qrcodes: bool,
    pub layout_type: LayoutType,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            refresh_interval: 10,
            slide_delay: 5,
            enable_qrcodes: true,
            layout_type: LayoutType::Fullscreen,
        }
    }
}

impl DisplaySettings {
    /// Intervals floored to one second
    pub fn sanitized(mut self) -> Self {
        self.refresh_interval = self.refresh_interval.max(1);
        self.slide_delay = self.slide_delay.max(1);
        self
    }
}

/// Réponse du point d'accès `/api/slides`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    #[schema(value_type = Vec<SlideWire>)]
    pub slides: Vec<Slide>,
    pub settings: DisplaySettings,
}

/// Réglages partiels lus par un client
///
/// Numbers are read as floats so that any JSON number is accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub refresh_interval: Option<f64>,
    #[serde(default)]
    pub slide_delay: Option<f64>,
    #[serde(default)]
    pub enable_qrcodes: Option<bool>,
    #[serde(default)]
    pub layout_type: Option<String>,
}

/// Flux tel que lu par un client: tout est optionnel
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedUpdate {
    #[serde(default)]
    pub slides: Option<Vec<Slide>>,
    #[serde(default)]
    pub settings: Option<SettingsPatch>,
}

impl FeedUpdate {
    pub fn slides(&self) -> &[Slide] {
        self.slides.as_deref().unwrap_or_default()
    }

    pub fn settings(&self) -> SettingsPatch {
        self.settings.clone().unwrap_or_default()
    }
}

impl From<FeedResponse> for FeedUpdate {
    fn from(response: FeedResponse) -> Self {
        let settings = response.settings;
        Self {
            slides: Some(response.slides),
            settings: Some(SettingsPatch {
                refresh_interval: Some(settings.refresh_interval as f64),
                slide_delay: Some(settings.slide_delay as f64),
                enable_qrcodes: Some(settings.enable_qrcodes),
                layout_type: Some(settings.layout_type.to_string()),
            }),
        }
    }
}
