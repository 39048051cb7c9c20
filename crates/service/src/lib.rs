//! Service layer providing business-oriented CRUD operations on top of models.
//! - Validates input before any persistence attempt.
//! - Wraps multi-statement mutations in transactions.
//! - Maps store-level failures into a clear error taxonomy.

pub mod errors;
pub mod actor_service;
pub mod film_service;
pub mod seed;
#[cfg(test)]
pub mod test_support;
