//! # entity-rest - generic entity access over REST
//!
//! The HTTP layer shared by every entity command of a CLI that manages
//! configuration entities (credentials, servers, processors, pipelines,
//! seeds, endpoints, staging buckets) across sibling REST services.
//!
//! ## Features
//!
//! - A base client bound to a URL and an optional API key, with pure
//!   sub-client derivation by path segment
//! - CRUD over opaque JSON documents
//! - All-or-nothing multi-page aggregation for listings and searches
//! - Name-or-id resolution (search, then get)
//! - Bulk export/import with a per-call conflict strategy
//! - One error type carrying the HTTP status and raw body of any failure
//!
//! ## Basic Usage
//!
//! ```no_run
//! use entity_rest::{entity_client, resolve, Crud, Getter, RestClient, Searcher};
//! use serde_json::json;
//!
//! entity_client!(pub struct ServerClient => [
//!     entity_rest::Getter,
//!     entity_rest::Crud,
//!     entity_rest::Searcher,
//!     entity_rest::Cloner,
//! ]);
//!
//! fn main() -> Result<(), entity_rest::RestError> {
//!     let core = RestClient::new("http://localhost:12010/v2", "my-api-key")?;
//!     let servers = ServerClient::new(&core, "server");
//!
//!     let created = servers.create(&json!({
//!         "name": "my-server",
//!         "type": "mongo",
//!         "config": {"servers": ["mongodb://localhost:27017"]}
//!     }))?;
//!     println!("created {}", created["id"]);
//!
//!     // by name or by UUID
//!     let server = resolve(&servers, "my-server")?;
//!     println!("{}", server);
//!
//!     for server in servers.get_all()? {
//!         println!("{}", server["name"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Backup and restore
//!
//! ```no_run
//! use entity_rest::{entity_client, BackupRestore, OnConflict, RestClient};
//! use std::path::Path;
//!
//! entity_client!(pub struct CoreClient => [entity_rest::BackupRestore]);
//!
//! let core = CoreClient::new(&RestClient::new("http://localhost:12010", "")?, "v2");
//! let archive = core.export()?;
//! let path = archive.write_to(Path::new("."))?;
//!
//! let report = core.import(OnConflict::Update, &path)?;
//! for (entity_type, status) in report.statuses() {
//!     println!("{} {} -> {}", entity_type, status.id, status.status);
//! }
//! # Ok::<(), entity_rest::RestError>(())
//! ```

pub mod apikey;
pub mod backup;
pub mod capability;
pub mod client;
pub mod entity;
pub mod error;
pub mod paging;
pub mod resolve;
pub mod response;
pub mod rest;

// Re-export main types for convenience
pub use apikey::{ApiKey, API_KEY_HEADER};
pub use backup::{BackupRestore, Export, ImportReport, ImportStatus, OnConflict};
pub use capability::{Cloner, Enabler, HealthChecker, StatusChecker, Summarizer};
pub use client::Config;
pub use entity::{name_filter, Crud, Endpoint, Getter, Searcher};
pub use error::{RestError, Result};
pub use paging::{paginate, Page, SearchHit};
pub use resolve::{parse_id, resolve, resolve_id};
pub use response::{Entity, QueryParams, Response};
pub use rest::{Body, RequestOptions, RestClient};

// Re-export for callers building methods and documents
pub use reqwest::Method;
pub use serde_json::json;
pub use uuid::Uuid;
