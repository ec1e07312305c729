//! Lecture des réglages d'affichage
//!
//! [`SignageConfigExt`] maps the `signage.*` keys of the configuration.
//! [`SettingsProvider`] is what the feed reads on every request; the
//! configuration implements it, tests use fixed values.

use crate::model::{DisplaySettings, LayoutType};
use anyhow::Result;
use digsignconfig::Config;
use serde_yaml::Value;
use tracing::warn;

const DEFAULT_CATEGORY: &str = "news";
const DEFAULT_IMAGE_WIDTH: usize = 1260;
const DEFAULT_IMAGE_HEIGHT: usize = 940;
const DEFAULT_REFRESH_INTERVAL: usize = 10;
const DEFAULT_SLIDE_DELAY: usize = 5;

/// Contenu HTML des panneaux annexes (déjà assaini côté administration)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelContent {
    pub header: String,
    pub right: String,
}

/// Source des réglages lus à chaque requête
pub trait SettingsProvider: Send + Sync {
    fn category_name(&self) -> String;

    fn display_settings(&self) -> DisplaySettings;

    /// Taille d'affichage des images (largeur, hauteur)
    fn image_size(&self) -> (u32, u32);

    fn panel_content(&self) -> PanelContent {
        PanelContent::default()
    }
}

/// Trait d'extension de digsignconfig pour les réglages d'affichage
pub trait SignageConfigExt {
    fn get_category_name(&self) -> String;
    fn set_category_name(&self, category: &str) -> Result<()>;

    fn get_image_size(&self) -> (u32, u32);

    fn get_refresh_interval(&self) -> u64;
    fn set_refresh_interval(&self, seconds: u64) -> Result<()>;

    fn get_slide_delay(&self) -> u64;
    fn set_slide_delay(&self, seconds: u64) -> Result<()>;

    fn get_enable_qrcodes(&self) -> bool;
    fn set_enable_qrcodes(&self, enabled: bool) -> Result<()>;

    /// Disposition configurée; une valeur inconnue donne `fullscreen`
    fn get_layout_type(&self) -> LayoutType;
    fn set_layout_type(&self, layout: LayoutType) -> Result<()>;

    fn get_panel_content(&self) -> PanelContent;
}

fn clamp_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX).max(1)
}

impl SignageConfigExt for Config {
    fn get_category_name(&self) -> String {
        let category = self.get_string_or(&["signage", "category_name"], DEFAULT_CATEGORY);
        let category = category.trim();
        if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_string()
        }
    }

    fn set_category_name(&self, category: &str) -> Result<()> {
        self.set_value(&["signage", "category_name"], Value::String(category.to_string()))
    }

    fn get_image_size(&self) -> (u32, u32) {
        (
            clamp_u32(self.get_usize_or(&["signage", "image_width"], DEFAULT_IMAGE_WIDTH)),
            clamp_u32(self.get_usize_or(&["signage", "image_height"], DEFAULT_IMAGE_HEIGHT)),
        )
    }

    fn get_refresh_interval(&self) -> u64 {
        self.get_usize_or(&["signage", "refresh_interval"], DEFAULT_REFRESH_INTERVAL)
            .max(1) as u64
    }

    fn set_refresh_interval(&self, seconds: u64) -> Result<()> {
        self.set_value(&["signage", "refresh_interval"], Value::Number(seconds.into()))
    }

    fn get_slide_delay(&self) -> u64 {
        self.get_usize_or(&["signage", "slide_delay"], DEFAULT_SLIDE_DELAY)
            .max(1) as u64
    }

    fn set_slide_delay(&self, seconds: u64) -> Result<()> {
        self.set_value(&["signage", "slide_delay"], Value::Number(seconds.into()))
    }

    fn get_enable_qrcodes(&self) -> bool {
        self.get_bool_or(&["signage", "enable_qrcodes"], true)
    }

    fn set_enable_qrcodes(&self, enabled: bool) -> Result<()> {
        self.set_value(&["signage", "enable_qrcodes"], Value::Bool(enabled))
    }

    fn get_layout_type(&self) -> LayoutType {
        let raw = self.get_string_or(&["signage", "layout_type"], "fullscreen");
        raw.parse().unwrap_or_else(|e| {
            warn!("{}, using fullscreen", e);
            LayoutType::Fullscreen
        })
    }

    fn set_layout_type(&self, layout: LayoutType) -> Result<()> {
        self.set_value(&["signage", "layout_type"], Value::String(layout.to_string()))
    }

    fn get_panel_content(&self) -> PanelContent {
        PanelContent {
            header: self.get_string_or(&["signage", "header_content"], ""),
            right: self.get_string_or(&["signage", "right_panel_content"], ""),
        }
    }
}

impl SettingsProvider for Config {
    fn category_name(&self) -> String {
        self.get_category_name()
    }

    fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            refresh_interval: self.get_refresh_interval(),
            slide_delay: self.get_slide_delay(),
            enable_qrcodes: self.get_enable_qrcodes(),
            layout_type: self.get_layout_type(),
        }
    }

    fn image_size(&self) -> (u32, u32) {
        self.get_image_size()
    }

    fn panel_content(&self) -> PanelContent {
        self.get_panel_content()
    }
}
