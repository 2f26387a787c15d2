use crate::entity::Endpoint;
use crate::error::Result;
use crate::response::{Entity, QueryParams};
use crate::rest::RequestOptions;
use reqwest::Method;
use uuid::Uuid;

/// `POST {base}/{id}/clone`
pub trait Cloner: Endpoint {
    /// Clone an entity; `params` are forwarded verbatim as query parameters
    /// so each entity type can define its own clone options
    fn clone_entity(&self, id: Uuid, params: QueryParams) -> Result<Entity> {
        self.client()
            .execute(
                Method::POST,
                &format!("{}/clone", id),
                RequestOptions::new().queries(params),
            )?
            .entity()
    }
}

/// `PATCH {base}/{id}/enable` and `PATCH {base}/{id}/disable`
pub trait Enabler: Endpoint {
    /// Enable an entity
    fn enable(&self, id: Uuid) -> Result<Entity> {
        self.client()
            .execute(Method::PATCH, &format!("{}/enable", id), RequestOptions::new())?
            .entity()
    }

    /// Disable an entity
    fn disable(&self, id: Uuid) -> Result<Entity> {
        self.client()
            .execute(Method::PATCH, &format!("{}/disable", id), RequestOptions::new())?
            .entity()
    }
}

/// `GET {base}/summary`: counts keyed by status
pub trait Summarizer: Endpoint {
    /// Fetch the per-status counts
    fn summarize(&self) -> Result<Entity> {
        self.client()
            .execute(Method::GET, "summary", RequestOptions::new())?
            .entity()
    }
}

/// `GET {base}/status`
pub trait StatusChecker: Endpoint {
    /// Fetch the service status
    fn status_check(&self) -> Result<Entity> {
        self.client()
            .execute(Method::GET, "status", RequestOptions::new())?
            .entity()
    }
}

/// `GET {base}/health`, sent without the API key.
pub trait HealthChecker: Endpoint {
    /// Probe service health anonymously
    fn health_check(&self) -> Result<Entity> {
        self.client()
            .anonymous()
            .execute(Method::GET, "health", RequestOptions::new())?
            .entity()
    }
}
