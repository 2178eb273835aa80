//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use clipvault_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ClipVault API",
        version = "1.0",
        description = "Upload, list, download and delete screen recording clips. Clips are stored as files on disk and indexed in a JSON metadata document."
    ),
    paths(
        handlers::index::service_info,
        handlers::clip_upload::upload_clip,
        handlers::clip_list::list_clips,
        handlers::clip_get::download_clip,
        handlers::clip_delete::delete_clip,
        handlers::clip_view::view_clip,
    ),
    components(
        schemas(
            models::ClipRecord,
            models::MetadataDocument,
            models::UploadResponse,
            models::DeleteResponse,
            models::ServiceInfo,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "service", description = "Service information"),
        (name = "clips", description = "Clip upload, listing, download and deletion"),
    )
)]
pub struct ApiDoc;
