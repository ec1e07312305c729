//! Production des diapositives à partir du store de contenu

use crate::codes::CodeImageProvider;
use crate::model::Slide;
use crate::Result;
use digsigncontent::{ContentItem, ContentStore, ImageResizer};
use std::sync::Arc;
use tracing::{debug, warn};

/// Règles appliquées à chaque diapositive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePolicy {
    pub image_width: u32,
    pub image_height: u32,
    pub codes_enabled: bool,
}

/// Transforme les éléments publiés d'une catégorie en diapositives
#[derive(Clone)]
pub struct SlideSource {
    store: Arc<dyn ContentStore>,
    resizer: Arc<dyn ImageResizer>,
    codes: Arc<dyn CodeImageProvider>,
}

impl SlideSource {
    pub fn new(
        store: Arc<dyn ContentStore>,
        resizer: Arc<dyn ImageResizer>,
        codes: Arc<dyn CodeImageProvider>,
    ) -> Self {
        Self {
            store,
            resizer,
            codes,
        }
    }

    /// Liste les diapositives de `category`, dans l'ordre du store
    ///
    /// Items with a primary image give an image slide at the policy size.
    /// Other items give an HTML slide from their body, or nothing when the
    /// body is empty. Resize and code failures never fail the call.
    pub async fn list_slides(&self, category: &str, policy: &SlidePolicy) -> Result<Vec<Slide>> {
        let items = self.store.list_published(category).await?;

        let mut slides = Vec::with_capacity(items.len());
        for item in &items {
            let Some(slide) = self.slide_for(item, policy).await else {
                continue;
            };

            let code = if policy.codes_enabled && !item.permalink.is_empty() {
                self.codes.code_url_for(&item.permalink).await
            } else {
                None
            };
            slides.push(slide.with_code(code));
        }

        debug!(category, items = items.len(), slides = slides.len(), "Slides listed");
        Ok(slides)
    }

    async fn slide_for(&self, item: &ContentItem, policy: &SlidePolicy) -> Option<Slide> {
        let title = Some(item.title.clone()).filter(|t| !t.is_empty());

        if item.has_image() {
            let url = match self
                .resizer
                .ensure_size(item, policy.image_width, policy.image_height)
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(slug = %item.slug, error = %e, "Image resize failed, using original");
                    item.image_url().map(str::to_string)
                }
            };

            match url.filter(|u| !u.is_empty()) {
                Some(url) => Some(Slide::image(url, title, item.permalink.clone())),
                None => {
                    debug!(slug = %item.slug, "No usable image URL, item omitted");
                    None
                }
            }
        } else if item.body_html.trim().is_empty() {
            debug!(slug = %item.slug, "Empty body, item omitted");
            None
        } else {
            Some(Slide::html(item.body_html.clone(), title, item.permalink.clone()))
        }
    }
}
