//! Type-safe Key-Value storage layer for the fishmarket storefront.
//!
//! Provides a small byte-level [`KvStore`] trait with in-memory, file and
//! (on wasm32) Spin backends, plus a [`Cache`] wrapper that stores values
//! as JSON text.
//!
//! # Example
//!
//! ```rust,ignore
//! use fishmarket_cache::{Cache, FileStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let cache = Cache::new(FileStore::open(".fishmarket/store")?);
//!
//! // Store a value
//! cache.set("cart:guest", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("cart:guest")?;
//!
//! // Delete a value
//! cache.delete("cart:guest")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;
pub use store::{FileStore, KvStore, MemoryStore};
