//! Core types for FoodVerse.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use credential::Credentials;
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{MAX_RATING, Product};
pub use status::*;
