//! Service layer providing CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Exposes persistence behind the `CupcakeRepository` trait.

pub mod errors;
pub mod db;
pub mod cupcake;
#[cfg(test)]
mod test_support;
