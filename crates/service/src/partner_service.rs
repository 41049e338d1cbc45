use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use models::partner::{self, encode_website_links, NewPartner, WebsiteLink, MAX_WEBSITE_LINKS};
use models::partner_dto::PartnerDTO;

use crate::errors::ServiceError;

/// Flat request payload for creating a partner. Website links arrive as
/// indexed `name_1..name_5` / `url_1..url_5` form fields; the flattened
/// map catches them alongside any other unrecognized keys, which are
/// ignored.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PartnerInput {
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
    #[serde(flatten)]
    pub link_fields: BTreeMap<String, Value>,
}

/// Flat update payload. Only the named fields can be written; website
/// links are rebuilt from `name_*`/`url_*` pairs in the flattened map
/// and are never assignable directly.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PartnerUpdate {
    pub name: Option<String>,
    pub primary_hashtag: Option<String>,
    pub secondary_hashtag: Option<String>,
    pub logo_url: Option<String>,
    pub link_meta: Option<String>,
    pub link_x: Option<String>,
    pub link_instagram: Option<String>,
    pub current_projects: Option<String>,
    pub permalink: Option<String>,
    #[serde(flatten)]
    pub link_fields: BTreeMap<String, Value>,
}

fn value_as_nonempty_str(v: &Value) -> Option<&str> {
    v.as_str().filter(|s| !s.is_empty())
}

/// Collect links from the fixed indexed create fields. A pair is kept
/// only when both its name and url are present and non-empty.
pub fn collect_indexed_links(fields: &BTreeMap<String, Value>) -> Vec<WebsiteLink> {
    (1..=MAX_WEBSITE_LINKS)
        .filter_map(|i| {
            let name = fields.get(&format!("name_{i}")).and_then(value_as_nonempty_str)?;
            let url = fields.get(&format!("url_{i}")).and_then(value_as_nonempty_str)?;
            Some(WebsiteLink { name: name.to_string(), url: url.to_string() })
        })
        .collect()
}

/// Collect links from arbitrary `name_<suffix>` keys in an update
/// payload. The name must be non-blank and the matching `url_<suffix>`
/// key present; pairs come out in key order.
pub fn collect_suffixed_links(fields: &BTreeMap<String, Value>) -> Vec<WebsiteLink> {
    fields
        .iter()
        .filter_map(|(key, value)| {
            let suffix = key.strip_prefix("name_")?;
            let name = value.as_str()?;
            if name.trim().is_empty() {
                return None;
            }
            let url = fields.get(&format!("url_{suffix}"))?;
            Some(WebsiteLink {
                name: name.to_string(),
                url: url.as_str().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Get a partner by id.
pub async fn get_partner_by_id(db: &DatabaseConnection, partner_id: i64) -> Result<partner::Model, ServiceError> {
    partner::get_by_id(db, partner_id)
        .await?
        .ok_or_else(|| ServiceError::partner_not_found_by_id(partner_id))
}

/// Get a partner by its permalink.
pub async fn get_partner_by_permalink(db: &DatabaseConnection, permalink: &str) -> Result<partner::Model, ServiceError> {
    partner::get_by_permalink(db, permalink)
        .await?
        .ok_or_else(|| ServiceError::partner_not_found_by_permalink(permalink))
}

/// Create a new partner from a flat request payload. The link list is
/// extracted, serialized and stored in one pass; no uniqueness or
/// required-field validation happens at this layer.
#[instrument(skip(db, input))]
pub async fn create_partner(db: &DatabaseConnection, input: PartnerInput) -> Result<partner::Model, ServiceError> {
    let website_links = collect_indexed_links(&input.link_fields);
    let created = partner::create(
        db,
        NewPartner {
            name: input.name,
            primary_hashtag: input.primary_hashtag,
            secondary_hashtag: input.secondary_hashtag,
            logo_url: input.logo_url,
            link_meta: input.link_meta,
            link_x: input.link_x,
            link_instagram: input.link_instagram,
            current_projects: input.current_projects,
            permalink: input.permalink,
            website_links,
        },
    )
    .await?;
    info!(id = created.id, links = ?created.website_links, "created partner");
    Ok(created)
}

/// Update a partner. Mutable columns are overwritten from the `Some`
/// fields of the typed payload; the website link list is rebuilt from
/// the payload's `name_*`/`url_*` pairs and always replaces the stored
/// list, even when no pairs were sent.
#[instrument(skip(db, update))]
pub async fn update_partner(db: &DatabaseConnection, partner_id: i64, update: PartnerUpdate) -> Result<partner::Model, ServiceError> {
    let existing = partner::get_by_id(db, partner_id)
        .await?
        .ok_or_else(|| ServiceError::partner_not_found_by_id(partner_id))?;

    let website_links = collect_suffixed_links(&update.link_fields);

    let mut am: partner::ActiveModel = existing.into();
    if let Some(v) = update.name { am.name = Set(Some(v)); }
    if let Some(v) = update.primary_hashtag { am.primary_hashtag = Set(Some(v)); }
    if let Some(v) = update.secondary_hashtag { am.secondary_hashtag = Set(Some(v)); }
    if let Some(v) = update.logo_url { am.logo_url = Set(Some(v)); }
    if let Some(v) = update.link_meta { am.link_meta = Set(Some(v)); }
    if let Some(v) = update.link_x { am.link_x = Set(Some(v)); }
    if let Some(v) = update.link_instagram { am.link_instagram = Set(Some(v)); }
    if let Some(v) = update.current_projects { am.current_projects = Set(Some(v)); }
    if let Some(v) = update.permalink { am.permalink = Set(Some(v)); }
    am.website_links = Set(encode_website_links(&website_links));
    am.updated_at = Set(Utc::now().into());

    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = updated.id, "updated partner");
    Ok(updated)
}

/// Delete a partner by id. Absent ids signal `NotFound` like every
/// other operation; status-payload translation is the HTTP layer's job.
pub async fn delete_partner(db: &DatabaseConnection, partner_id: i64) -> Result<(), ServiceError> {
    match partner::get_by_id(db, partner_id).await? {
        Some(found) => {
            partner::delete(db, found.id).await?;
            info!(id = partner_id, "deleted partner");
            Ok(())
        }
        None => Err(ServiceError::partner_not_found_by_id(partner_id)),
    }
}

/// Project a partner into its DTO, optionally on behalf of a requesting
/// partner whose name is embedded in the projection.
pub async fn get_partner_dto_by_id(
    db: &DatabaseConnection,
    partner_id: i64,
    request_partner: Option<i64>,
) -> Result<PartnerDTO, ServiceError> {
    let target = get_partner_by_id(db, partner_id).await?;
    match request_partner {
        Some(requesting_id) => {
            let requesting = get_partner_by_id(db, requesting_id).await?;
            Ok(target.as_dto(requesting.name))
        }
        None => Ok(target.as_dto(None)),
    }
}

/// Get all partners.
pub async fn get_all_partners(db: &DatabaseConnection) -> Result<Vec<partner::Model>, ServiceError> {
    Ok(partner::get_all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PARTNER_NOT_FOUND;
    use crate::test_support::get_db;
    use models::partner::decode_website_links;
    use serde_json::json;

    fn fields(v: serde_json::Value) -> BTreeMap<String, Value> {
        serde_json::from_value(v).expect("field map")
    }

    #[test]
    fn indexed_links_keep_order_and_skip_incomplete_pairs() {
        let links = collect_indexed_links(&fields(json!({
            "name_1": "A", "url_1": "http://a",
            "name_2": "missing url",
            "url_2": "",
            "name_3": "C", "url_3": "http://c",
            "url_4": "http://orphan",
        })));
        assert_eq!(
            links,
            vec![
                WebsiteLink { name: "A".into(), url: "http://a".into() },
                WebsiteLink { name: "C".into(), url: "http://c".into() },
            ]
        );
    }

    #[test]
    fn indexed_links_ignore_keys_beyond_the_fifth() {
        let links = collect_indexed_links(&fields(json!({
            "name_5": "E", "url_5": "http://e",
            "name_6": "F", "url_6": "http://f",
        })));
        assert_eq!(links, vec![WebsiteLink { name: "E".into(), url: "http://e".into() }]);
    }

    #[test]
    fn suffixed_links_replace_from_arbitrary_keys() {
        let links = collect_suffixed_links(&fields(json!({
            "name_x": "Foo", "url_x": "http://foo",
        })));
        assert_eq!(links, vec![WebsiteLink { name: "Foo".into(), url: "http://foo".into() }]);
    }

    #[test]
    fn suffixed_links_require_nonblank_name_and_url_key() {
        let links = collect_suffixed_links(&fields(json!({
            "name_a": "  ", "url_a": "http://a",
            "name_b": "NoUrl",
            "name_long_suffix": "Long", "url_long_suffix": "http://long",
        })));
        assert_eq!(links, vec![WebsiteLink { name: "Long".into(), url: "http://long".into() }]);
    }

    #[test]
    fn suffixed_links_come_out_in_key_order() {
        let links = collect_suffixed_links(&fields(json!({
            "name_b": "Second", "url_b": "http://2",
            "name_a": "First", "url_a": "http://1",
        })));
        assert_eq!(links[0].name, "First");
        assert_eq!(links[1].name, "Second");
    }

    #[test]
    fn input_flatten_catches_indexed_fields_next_to_typed_ones() {
        let input: PartnerInput = serde_json::from_value(json!({
            "name": "Acme",
            "permalink": "acme",
            "name_1": "Home", "url_1": "https://acme.example.com",
        }))
        .expect("deserialize input");
        assert_eq!(input.name.as_deref(), Some("Acme"));
        let links = collect_indexed_links(&input.link_fields);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://acme.example.com");
    }

    #[tokio::test]
    async fn partner_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {e}");
                return Ok(());
            }
        };

        let permalink = format!("svc-partner-{}", uuid::Uuid::new_v4());
        let input: PartnerInput = serde_json::from_value(json!({
            "name": "Svc Partner",
            "primary_hashtag": "#svc",
            "permalink": permalink,
            "name_1": "Docs", "url_1": "https://docs.example.com",
            "name_3": "Blog", "url_3": "https://blog.example.com",
            "name_4": "no url for this one",
        }))?;
        let created = create_partner(&db, input).await?;
        let created_links = decode_website_links(&created.website_links);
        assert_eq!(created_links.len(), 2);
        assert_eq!(created_links[0].name, "Docs");
        assert_eq!(created_links[1].name, "Blog");

        let fetched = get_partner_by_id(&db, created.id).await?;
        assert_eq!(fetched.id, created.id);
        let by_permalink = get_partner_by_permalink(&db, &permalink).await?;
        assert_eq!(by_permalink.id, created.id);

        let update: PartnerUpdate = serde_json::from_value(json!({
            "name": "Renamed Partner",
            "link_x": "https://x.com/renamed",
            "name_x": "Foo", "url_x": "http://foo",
        }))?;
        let updated = update_partner(&db, created.id, update).await?;
        assert_eq!(updated.name.as_deref(), Some("Renamed Partner"));
        assert_eq!(updated.link_x.as_deref(), Some("https://x.com/renamed"));
        assert_eq!(updated.permalink.as_deref(), Some(permalink.as_str()));
        assert_eq!(
            decode_website_links(&updated.website_links),
            vec![WebsiteLink { name: "Foo".into(), url: "http://foo".into() }]
        );

        // an update without link pairs clears the stored list
        let cleared = update_partner(&db, created.id, PartnerUpdate::default()).await?;
        assert!(decode_website_links(&cleared.website_links).is_empty());

        let other_input: PartnerInput = serde_json::from_value(json!({
            "name": "Requesting Partner",
            "permalink": format!("svc-requester-{}", uuid::Uuid::new_v4()),
        }))?;
        let other = create_partner(&db, other_input).await?;

        let dto = get_partner_dto_by_id(&db, created.id, None).await?;
        assert!(dto.requesting_partner_name.is_none());
        let dto_with_requester = get_partner_dto_by_id(&db, created.id, Some(other.id)).await?;
        assert_eq!(dto_with_requester.requesting_partner_name, other.name);

        let all = get_all_partners(&db).await?;
        assert!(all.iter().any(|p| p.id == created.id));
        assert!(all.iter().any(|p| p.id == other.id));

        delete_partner(&db, created.id).await?;
        match get_partner_by_id(&db, created.id).await {
            Err(ServiceError::NotFound { sub_code, .. }) => assert_eq!(sub_code, PARTNER_NOT_FOUND),
            other => panic!("expected NotFound after delete, got {other:?}"),
        }
        assert!(matches!(
            delete_partner(&db, created.id).await,
            Err(ServiceError::NotFound { .. })
        ));

        delete_partner(&db, other.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn permalink_lookup_misses_carry_the_permalink() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {e}");
                return Ok(());
            }
        };

        let missing = format!("never-created-{}", uuid::Uuid::new_v4());
        match get_partner_by_permalink(&db, &missing).await {
            Err(ServiceError::NotFound { sub_code, context }) => {
                assert_eq!(sub_code, PARTNER_NOT_FOUND);
                assert!(context.contains(&missing));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        Ok(())
    }
}
