use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DigSign Configuration API",
        version = "0.1.0",
        description = "REST API to read and update the DigSign configuration",
    ),
    paths(
        crate::api::get_full_config,
        crate::api::get_config_value,
        crate::api::update_config_value,
    ),
    components(
        schemas(
            crate::api::ConfigValue,
            crate::api::UpdateConfigRequest,
            crate::api::UpdateConfigResponse,
        )
    ),
    tags(
        (name = "config", description = "Configuration management endpoints")
    )
)]
pub struct ApiDoc;
