use serde::{Deserialize, Serialize};

use crate::partner::{self, decode_website_links, WebsiteLink};

/// Read-only projection of a partner for API responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartnerDTO {
    pub id: i64,
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
    pub website_links: Vec<WebsiteLink>,
    /// Name of the partner on whose behalf the projection was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requesting_partner_name: Option<String>,
}

impl partner::Model {
    pub fn as_dto(&self, requesting_partner_name: Option<String>) -> PartnerDTO {
        PartnerDTO {
            id: self.id,
            name: self.name.clone(),
            primary_hashtag: self.primary_hashtag.clone(),
            secondary_hashtag: self.secondary_hashtag.clone(),
            logo_url: self.logo_url.clone(),
            link_meta: self.link_meta.clone(),
            link_x: self.link_x.clone(),
            link_instagram: self.link_instagram.clone(),
            current_projects: self.current_projects.clone(),
            permalink: self.permalink.clone(),
            website_links: decode_website_links(&self.website_links),
            requesting_partner_name,
        }
    }
}
