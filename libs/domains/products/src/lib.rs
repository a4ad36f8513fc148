//! Products Domain
//!
//! Product catalog: the record model, the store capability with an in-memory and a
//! PostgreSQL implementation, the query/validation service and its HTTP adapter.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, DTO mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Argument checks, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← find / scan / commit(ChangeSet)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, request/response bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{InMemoryProductStore, ProductService, handlers};
//!
//! let service = ProductService::new(InMemoryProductStore::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod service;
pub mod store;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{Product, ProductDto, ProductInfo, ProductListQuery};
pub use postgres::PgProductStore;
pub use service::ProductService;
pub use store::{Change, ChangeSet, InMemoryProductStore, ProductQuery, ProductStore};
