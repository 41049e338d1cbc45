use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct WebsiteLinkDoc {
    pub name: String,
    pub url: String,
}

/// Create payload. Website links are sent as indexed form fields
/// `name_1..name_5` / `url_1..url_5`.
#[derive(utoipa::ToSchema)]
pub struct PartnerInputDoc {
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
    pub name_1: Option<String>,
    pub url_1: Option<String>,
    pub name_2: Option<String>,
    pub url_2: Option<String>,
    pub name_3: Option<String>,
    pub url_3: Option<String>,
    pub name_4: Option<String>,
    pub url_4: Option<String>,
    pub name_5: Option<String>,
    pub url_5: Option<String>,
}

/// Update payload. Any `name_<suffix>`/`url_<suffix>` pair in the body
/// replaces the stored website link list.
#[derive(utoipa::ToSchema)]
pub struct PartnerUpdateDoc {
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::partners::list,
        crate::routes::partners::create,
        crate::routes::partners::get,
        crate::routes::partners::get_by_permalink,
        crate::routes::partners::update,
        crate::routes::partners::delete,
    ),
    components(
        schemas(
            HealthResponse,
            WebsiteLinkDoc,
            PartnerInputDoc,
            PartnerUpdateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "partners")
    )
)]
pub struct ApiDoc;
