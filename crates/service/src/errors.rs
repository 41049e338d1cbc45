use thiserror::Error;

/// Sub-code attached to partner lookups that miss.
pub const PARTNER_NOT_FOUND: &str = "PARTNER_NOT_FOUND";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {sub_code}: {context}")]
    NotFound { sub_code: &'static str, context: String },
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn partner_not_found_by_id(partner_id: i64) -> Self {
        Self::NotFound { sub_code: PARTNER_NOT_FOUND, context: format!("partner_id={partner_id}") }
    }

    pub fn partner_not_found_by_permalink(permalink: &str) -> Self {
        Self::NotFound { sub_code: PARTNER_NOT_FOUND, context: format!("permalink={permalink}") }
    }
}
