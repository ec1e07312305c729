//! Extension pour intégrer l'API de configuration de digsignconfig dans digsignserver

use crate::Server;
use anyhow::Result;
use digsignconfig::{ApiDoc, api, get_config};
use utoipa::OpenApi;

/// Trait d'extension pour ajouter l'API de configuration au serveur
pub trait ConfigExt {
    /// Initialise l'API de configuration et enregistre les routes HTTP
    ///
    /// # Routes enregistrées
    ///
    /// - `GET /api/config` - toute la configuration
    /// - `GET /api/config/{path}` - une valeur (ex: signage.slide_delay)
    /// - `POST /api/config` - mise à jour d'une valeur
    /// - `GET /swagger-ui/config` - documentation Swagger
    ///
    /// The API is unauthenticated. `host.config_api: false` keeps it off.
    async fn init_config_api(&mut self) -> Result<()>;
}

impl ConfigExt for Server {
    async fn init_config_api(&mut self) -> Result<()> {
        let config = get_config();

        let api_router = api::create_router(config);
        self.add_openapi(api_router, ApiDoc::openapi(), "config").await;

        Ok(())
    }
}
