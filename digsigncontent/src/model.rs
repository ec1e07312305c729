use std::path::PathBuf;

/// Image principale d'un élément de contenu
///
/// `path` is the local original used to build resized variants. `url` is a
/// public URL of the original, used as is when no variant can be produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    pub path: Option<PathBuf>,
    pub url: Option<String>,
}

/// Un élément publié d'une catégorie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Identifiant stable (nom du fichier sans extension pour le store disque)
    pub slug: String,
    pub title: String,
    /// URL publique de l'élément, cible du QR code
    pub permalink: String,
    /// Corps HTML rendu, supposé déjà assaini
    pub body_html: String,
    pub image: Option<ImageRef>,
}

impl ContentItem {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// URL publique de l'image originale, si connue
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.url.as_deref())
    }
}
