//! FoodVerse Core - catalog, cart, and session state.
//!
//! This crate holds everything the storefront needs that does not touch the
//! network. The `foodverse-storefront` server and the `fv-cli` tools both
//! build on it.
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions, and in-memory stores -
//! no I/O, no HTTP clients, no async. Stores take `&mut self` for mutation;
//! callers that share them across threads wrap each store in its own lock.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, roles, statuses, and the product record
//! - [`catalog`] - Filter/sort pipeline producing derived product views
//! - [`cart`] - Line-item cart store
//! - [`session`] - Role state machine and the pluggable credential verifier
//! - [`orders`] - Admin order log and dashboard statistics

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod session;
pub mod types;

pub use cart::{CartLine, CartStore, CartSummary};
pub use catalog::{
    CatalogQuery, CatalogView, Category, CategoryInfo, KNOWN_CATEGORIES, ParsedCatalog,
    PayloadError, SortKey, derive_view, is_menu_item, item_label, parse_catalog_payload,
};
pub use orders::{DashboardStats, Order, OrderLog};
pub use session::{AuthError, Authenticator, FixedCredentials, LoginOutcome, SessionStore};
pub use types::*;
