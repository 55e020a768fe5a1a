//! Oakline Core - domain state for the Oakline Interiors storefront.
//!
//! This crate holds everything the storefront needs to reason about what a
//! visitor is browsing and buying:
//! - [`catalog`] - The read-only product catalog
//! - [`cart`] - The visitor's cart (one line per product, quantity >= 1)
//! - [`recently_viewed`] - Most-recent-first product history with a capacity
//! - [`storage`] - The key-value seam the history is persisted through
//! - [`order`] - Orders placed from a cart at checkout
//! - [`inquiry`] - Validated contact form submissions
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no HTTP, no cookies, no
//! session store. Persistence is reached through [`storage::KeyValueStore`],
//! so the same tracker runs against browser cookies in production and a
//! [`storage::MemoryStore`] in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod recently_viewed;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartLineItem};
pub use catalog::{Catalog, Category, Product};
pub use inquiry::{Customer, CustomerFields, Inquiry, InquiryError, ProjectKind};
pub use order::{Order, OrderNumber};
pub use recently_viewed::RecentlyViewed;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
pub use types::*;
