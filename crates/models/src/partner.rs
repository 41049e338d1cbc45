use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Upper bound on website links accepted from the fixed `name_1..name_5`
/// / `url_1..url_5` form fields on create.
pub const MAX_WEBSITE_LINKS: usize = 5;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
    /// Always the JSON encoding of an ordered `WebsiteLink` list.
    #[sea_orm(column_type = "Text")]
    pub website_links: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// One named link on a partner's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteLink {
    pub name: String,
    pub url: String,
}

/// Serialize a link list for the `website_links` column.
pub fn encode_website_links(links: &[WebsiteLink]) -> String {
    serde_json::to_string(links).unwrap_or_else(|_| "[]".to_string())
}

/// Parse the stored column; corrupt or empty values decode to no links.
pub fn decode_website_links(raw: &str) -> Vec<WebsiteLink> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Column values for a partner about to be inserted.
#[derive(Clone, Debug, Default)]
pub struct NewPartner {
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
}

pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn get_by_permalink(db: &DatabaseConnection, permalink: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Permalink.eq(permalink))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn get_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert a new partner. No field validation here; database constraints
/// are the only enforcement.
pub async fn create(db: &DatabaseConnection, new: NewPartner) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        name: Set(new.name),
        primary_hashtag: Set(new.primary_hashtag),
        secondary_hashtag: Set(new.secondary_hashtag),
        logo_url: Set(new.logo_url),
        link_meta: Set(new.link_meta),
        link_x: Set(new.link_x),
        link_instagram: Set(new.link_instagram),
        current_projects: Set(new.current_projects),
        permalink: Set(new.permalink),
        website_links: Set(encode_website_links(&new.website_links)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_keeps_link_order() {
        let links = vec![
            WebsiteLink { name: "A".into(), url: "http://a".into() },
            WebsiteLink { name: "C".into(), url: "http://c".into() },
        ];
        let raw = encode_website_links(&links);
        assert_eq!(raw, r#"[{"name":"A","url":"http://a"},{"name":"C","url":"http://c"}]"#);
        assert_eq!(decode_website_links(&raw), links);
    }

    #[test]
    fn encode_empty_list_is_json_array() {
        assert_eq!(encode_website_links(&[]), "[]");
    }

    #[test]
    fn decode_tolerates_corrupt_column() {
        assert!(decode_website_links("").is_empty());
        assert!(decode_website_links("not json").is_empty());
        assert!(decode_website_links(r#"{"name":"not a list"}"#).is_empty());
    }
}
