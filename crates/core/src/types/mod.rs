//! Core types for the Fakestore storefront.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::Price;
pub use product::{CatalogError, Product, validate_catalog};
