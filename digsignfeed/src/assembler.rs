use crate::Result;
use crate::model::FeedResponse;
use crate::settings::SettingsProvider;
use crate::source::{SlidePolicy, SlideSource};
use std::sync::Arc;

/// Construit la réponse du flux, à neuf à chaque appel
#[derive(Clone)]
pub struct FeedAssembler {
    settings: Arc<dyn SettingsProvider>,
    source: SlideSource,
}

impl FeedAssembler {
    pub fn new(settings: Arc<dyn SettingsProvider>, source: SlideSource) -> Self {
        Self { settings, source }
    }

    pub fn settings(&self) -> &Arc<dyn SettingsProvider> {
        &self.settings
    }

    pub async fn build_feed(&self) -> Result<FeedResponse> {
        let settings = self.settings.display_settings().sanitized();
        let category = self.settings.category_name();
        let (image_width, image_height) = self.settings.image_size();

        let policy = SlidePolicy {
            image_width,
            image_height,
            codes_enabled: settings.enable_qrcodes,
        };
        let slides = self.source.list_slides(&category, &policy).await?;

        Ok(FeedResponse { slides, settings })
    }
}
