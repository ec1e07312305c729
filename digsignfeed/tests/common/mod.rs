// Collaborateurs de test partagés
#![allow(dead_code)]

use async_trait::async_trait;
use digsigncontent::{ContentError, ContentItem, ContentStore, ImageRef, ImageResizer};
use digsignfeed::{
    CodeImageProvider, DisplaySettings, FeedAssembler, PanelContent, SettingsProvider, SlideSource,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemoryStore {
    pub categories: HashMap<String, Vec<ContentItem>>,
    pub fail: bool,
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_published(&self, category: &str) -> digsigncontent::Result<Vec<ContentItem>> {
        if self.fail {
            return Err(ContentError::Io(std::io::Error::other("store offline")));
        }
        Ok(self.categories.get(category).cloned().unwrap_or_default())
    }
}

/// Resizer that fails for the slugs listed in `failing`
#[derive(Default)]
pub struct FakeResizer {
    pub failing: Vec<String>,
    pub calls: Mutex<Vec<(String, u32, u32)>>,
}

#[async_trait]
impl ImageResizer for FakeResizer {
    async fn ensure_size(
        &self,
        item: &ContentItem,
        width: u32,
        height: u32,
    ) -> digsigncontent::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((item.slug.clone(), width, height));
        if self.failing.contains(&item.slug) {
            return Err(ContentError::NoSourceImage(item.slug.clone()));
        }
        Ok(format!("/media/{}-{}x{}.webp", item.slug, width, height))
    }
}

/// Code provider that fails for URLs containing "broken"
#[derive(Default)]
pub struct FakeCodes {
    pub calls: AtomicUsize,
}

#[async_trait]
impl CodeImageProvider for FakeCodes {
    async fn code_url_for(&self, url: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("broken") {
            None
        } else {
            Some(format!("/qrcodes/{}.png", url.rsplit('/').next().unwrap_or("x")))
        }
    }
}

pub struct StaticSettings {
    pub category: String,
    pub settings: Mutex<DisplaySettings>,
}

impl StaticSettings {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            settings: Mutex::new(DisplaySettings::default()),
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn category_name(&self) -> String {
        self.category.clone()
    }

    fn display_settings(&self) -> DisplaySettings {
        self.settings.lock().unwrap().clone()
    }

    fn image_size(&self) -> (u32, u32) {
        (1260, 940)
    }

    fn panel_content(&self) -> PanelContent {
        PanelContent {
            header: "<h1>Lobby</h1>".to_string(),
            right: "<p>Weather</p>".to_string(),
        }
    }
}

pub fn image_item(slug: &str) -> ContentItem {
    ContentItem {
        slug: slug.to_string(),
        title: format!("Title {}", slug),
        permalink: format!("https://example.org/news/{}", slug),
        body_html: "<p>ignored when an image exists</p>".to_string(),
        image: Some(ImageRef {
            path: Some(format!("/content/news/{}.jpg", slug).into()),
            url: Some(format!("https://example.org/uploads/{}.jpg", slug)),
        }),
    }
}

pub fn html_item(slug: &str, body: &str) -> ContentItem {
    ContentItem {
        slug: slug.to_string(),
        title: format!("Title {}", slug),
        permalink: format!("https://example.org/news/{}", slug),
        body_html: body.to_string(),
        image: None,
    }
}

pub struct Fixture {
    pub settings: Arc<StaticSettings>,
    pub resizer: Arc<FakeResizer>,
    pub codes: Arc<FakeCodes>,
    pub assembler: FeedAssembler,
}

pub fn fixture(store: MemoryStore, resizer: FakeResizer) -> Fixture {
    let settings = Arc::new(StaticSettings::new("news"));
    let resizer = Arc::new(resizer);
    let codes = Arc::new(FakeCodes::default());
    let source = SlideSource::new(Arc::new(store), resizer.clone(), codes.clone());
    let assembler = FeedAssembler::new(settings.clone(), source);
    Fixture {
        settings,
        resizer,
        codes,
        assembler,
    }
}

pub fn news_store(items: Vec<ContentItem>) -> MemoryStore {
    let mut store = MemoryStore::default();
    store.categories.insert("news".to_string(), items);
    store
}
