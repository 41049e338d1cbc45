//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates request translation from data access.
//! - Reuses entity definitions and link encoding in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod partner_service;
#[cfg(test)]
pub mod test_support;
