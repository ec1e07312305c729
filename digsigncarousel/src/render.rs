//! Adaptateurs de rendu
//!
//! A [`SlideRenderer`] applies [`RenderPlan`]s produced by the state machine.
//! [`HtmlRenderer`] keeps the carousel container as markup, the same
//! elements the browser script builds. [`LogRenderer`] reports slide
//! changes through `tracing` for headless runs.

use crate::state::{RenderPlan, View};
use digsignfeed::{Slide, SlideKind};
use tracing::info;

const GALLERY_IMAGE_ALT: &str = "Gallery Image";
const CODE_ALT: &str = "Scan for more information";

/// Applique les plans de rendu
pub trait SlideRenderer: Send {
    /// Remplace tout le contenu affiché par la vue du plan
    fn apply(&mut self, plan: &RenderPlan);

    /// Marque la diapositive `index` comme active (et elle seule)
    fn activate(&mut self, index: usize);
}

/// Élément du conteneur du carrousel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Placeholder(String),
    Slide {
        html: String,
        active: bool,
        /// `None` sans QR code, sinon visibilité de l'overlay
        code_visible: Option<bool>,
    },
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Contenu d'une diapositive, sans l'enveloppe `div.slide`
fn slide_inner(slide: &Slide, codes_visible: bool) -> String {
    let mut html = match slide.kind {
        SlideKind::Image => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(&slide.content),
            escape(slide.title.as_deref().unwrap_or(GALLERY_IMAGE_ALT))
        ),
        SlideKind::Html => {
            let heading = slide
                .title
                .as_deref()
                .map(|t| format!("<h2>{}</h2>", escape(t)))
                .unwrap_or_default();
            // Fragment assaini en amont: inséré tel quel
            format!(r#"<div class="html-content">{}<div>{}</div></div>"#, heading, slide.content)
        }
    };

    if let Some(code) = &slide.code_image_url {
        html.push_str(&format!(
            r#"<div class="qrcode-overlay" style="display: {}"><img src="{}" alt="{}"></div>"#,
            if codes_visible { "block" } else { "none" },
            escape(code),
            CODE_ALT
        ));
    }
    html
}

/// Rendu en mémoire du conteneur `#digsign-carousel`
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    elements: Vec<Element>,
    applied: usize,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Nombre de plans appliqués
    pub fn applied_count(&self) -> usize {
        self.applied
    }

    pub fn placeholder_text(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Placeholder(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Slide { .. }))
            .count()
    }

    pub fn active_indices(&self) -> Vec<usize> {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Slide { .. }))
            .enumerate()
            .filter_map(|(i, e)| matches!(e, Element::Slide { active: true, .. }).then_some(i))
            .collect()
    }

    /// Markup du conteneur
    pub fn markup(&self) -> String {
        self.elements
            .iter()
            .map(|e| match e {
                Element::Placeholder(text) => format!(r#"<p id="digsign-loading">{}</p>"#, escape(text)),
                Element::Slide { html, active, .. } => format!(
                    r#"<div class="slide{}">{}</div>"#,
                    if *active { " active" } else { "" },
                    html
                ),
            })
            .collect()
    }
}

impl SlideRenderer for HtmlRenderer {
    fn apply(&mut self, plan: &RenderPlan) {
        self.applied += 1;
        self.elements = match &plan.view {
            View::Placeholder(placeholder) => vec![Element::Placeholder(placeholder.text())],
            View::Slides {
                slides,
                active,
                codes_visible,
            } => slides
                .iter()
                .enumerate()
                .map(|(i, slide)| Element::Slide {
                    html: slide_inner(slide, *codes_visible),
                    active: i == *active,
                    code_visible: slide.code_image_url.as_ref().map(|_| *codes_visible),
                })
                .collect(),
        };
    }

    fn activate(&mut self, index: usize) {
        let mut i = 0;
        for element in &mut self.elements {
            if let Element::Slide { active, .. } = element {
                *active = i == index;
                i += 1;
            }
        }
    }
}

/// Rendu par les logs, pour un affichage sans écran
#[derive(Debug, Default)]
pub struct LogRenderer {
    slides: Vec<Slide>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn describe(slide: &Slide) -> String {
        match (&slide.kind, &slide.title) {
            (SlideKind::Image, Some(title)) => format!("image \"{}\" ({})", title, slide.content),
            (SlideKind::Image, None) => format!("image {}", slide.content),
            (SlideKind::Html, Some(title)) => format!("html \"{}\"", title),
            (SlideKind::Html, None) => "html".to_string(),
        }
    }
}

impl SlideRenderer for LogRenderer {
    fn apply(&mut self, plan: &RenderPlan) {
        match &plan.view {
            View::Placeholder(placeholder) => {
                self.slides.clear();
                info!("{}", placeholder.text());
            }
            View::Slides {
                slides,
                active,
                codes_visible,
            } => {
                self.slides = slides.clone();
                info!(
                    count = slides.len(),
                    codes = *codes_visible,
                    "Slides replaced"
                );
                self.activate(*active);
            }
        }
    }

    fn activate(&mut self, index: usize) {
        if let Some(slide) = self.slides.get(index) {
            info!(
                index,
                total = self.slides.len(),
                source = %slide.source_url,
                "Showing {}",
                Self::describe(slide)
            );
        }
    }
}
