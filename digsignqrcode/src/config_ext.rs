//! Extension pour intégrer le cache de QR codes dans digsignconfig

use crate::CodeImageCache;
use anyhow::Result;
use digsignconfig::Config;
use std::sync::Arc;

const DEFAULT_QRCODES_DIR: &str = "qrcodes";
const DEFAULT_QRCODES_ROUTE: &str = "/qrcodes";

/// Trait d'extension pour gérer le cache de QR codes dans digsignconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use digsignconfig::get_config;
/// use digsignqrcode::QrCodeConfigExt;
///
/// let cache = get_config().create_code_cache()?;
/// ```
pub trait QrCodeConfigExt {
    /// Répertoire du cache (absolu, créé si besoin; default: "qrcodes")
    fn get_qrcodes_dir(&self) -> Result<String>;

    /// Définit le répertoire du cache (absolu ou relatif au config_dir)
    fn set_qrcodes_dir(&self, directory: String) -> Result<()>;

    /// Route HTTP sous laquelle le répertoire est servi (default: "/qrcodes")
    fn get_qrcodes_route(&self) -> String;

    /// Crée un cache configuré, publié sous `{base_url}{route}`
    fn create_code_cache(&self) -> Result<Arc<CodeImageCache>>;
}

impl QrCodeConfigExt for Config {
    fn get_qrcodes_dir(&self) -> Result<String> {
        self.get_managed_dir(&["qrcodes", "directory"], DEFAULT_QRCODES_DIR)
    }

    fn set_qrcodes_dir(&self, directory: String) -> Result<()> {
        self.set_managed_dir(&["qrcodes", "directory"], directory)
    }

    fn get_qrcodes_route(&self) -> String {
        let route = self.get_string_or(&["qrcodes", "route"], DEFAULT_QRCODES_ROUTE);
        format!("/{}", route.trim_matches('/'))
    }

    fn create_code_cache(&self) -> Result<Arc<CodeImageCache>> {
        let dir = self.get_qrcodes_dir()?;
        let prefix = format!("{}{}", self.get_base_url(), self.get_qrcodes_route());
        Ok(Arc::new(CodeImageCache::new(dir, &prefix)))
    }
}
