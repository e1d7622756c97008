//! Fakestore Core - catalog types and the cart reducer.
//!
//! This crate is shared by the storefront binary and the integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session access. Every cart transition returns a new value, so
//! it can be exercised without a server.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus the
//!   [`Product`] record and catalog validation
//! - [`cart`] - [`Cart`], its line items, and the add/remove reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartAction, CartLineItem, DrawerState};
pub use types::*;
