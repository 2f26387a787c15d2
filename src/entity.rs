use crate::error::{RestError, Result};
use crate::paging::{paginate, Page, SearchHit, PAGE_PARAM};
use crate::response::{Entity, QueryParams, Response};
use crate::rest::{RequestOptions, RestClient};
use reqwest::Method;
use serde_json::{json, Value};
use uuid::Uuid;

/// Anything bound to an entity collection URL.
///
/// Capability traits build their default methods on [`Endpoint::client`], so
/// a product client opts into exactly what its API supports, usually via
/// [`entity_client!`](crate::entity_client).
pub trait Endpoint {
    /// Client whose base URL is the entity collection, e.g. `{product}/server`
    fn client(&self) -> &RestClient;
}

/// Read access: `GET {base}/{id}` and the paginated `GET {base}`.
pub trait Getter: Endpoint {
    /// Fetch one entity by id
    fn get(&self, id: Uuid) -> Result<Entity> {
        self.client()
            .execute(Method::GET, &id.to_string(), RequestOptions::new())?
            .entity()
    }

    /// Fetch every entity of the collection, walking all pages
    fn get_all(&self) -> Result<Vec<Entity>> {
        self.get_all_with(QueryParams::new())
    }

    /// Fetch every entity, forwarding extra query parameters on each page
    fn get_all_with(&self, params: QueryParams) -> Result<Vec<Entity>> {
        paginate(|page| {
            let options = RequestOptions::new()
                .queries(params.iter().cloned())
                .query(PAGE_PARAM, page.to_string());
            self.client().execute(Method::GET, "", options)
        })
    }
}

/// Write access on top of [`Getter`].
pub trait Crud: Getter {
    /// `POST {base}` with the document as JSON body
    fn create(&self, document: &Entity) -> Result<Entity> {
        require_payload(document)?;
        self.client()
            .execute(Method::POST, "", RequestOptions::new().json(document.clone()))?
            .entity()
    }

    /// `PUT {base}/{id}` with the document as JSON body
    fn update(&self, id: Uuid, document: &Entity) -> Result<Entity> {
        require_payload(document)?;
        self.client()
            .execute(
                Method::PUT,
                &id.to_string(),
                RequestOptions::new().json(document.clone()),
            )?
            .entity()
    }

    /// `DELETE {base}/{id}`
    fn delete(&self, id: Uuid) -> Result<Entity> {
        self.client()
            .execute(Method::DELETE, &id.to_string(), RequestOptions::new())?
            .entity()
    }
}

/// Filtered search: `POST {base}/search` with a JSON filter.
pub trait Searcher: Endpoint {
    /// Fetch one page of search results
    fn search_page(&self, filter: &Value, page: u64) -> Result<Page<SearchHit>> {
        let response = search_request(self.client(), filter, page)?;
        if response.is_no_content() {
            return Ok(Page {
                content: Vec::new(),
                page_number: Some(page),
                total_pages: Some(0),
            });
        }
        response.apply()
    }

    /// Run a search and collect every page of hits
    fn search(&self, filter: &Value) -> Result<Vec<SearchHit>> {
        paginate(|page| search_request(self.client(), filter, page))
    }

    /// Top-ranked hit whose `name` equals `name`, if any
    fn search_by_name(&self, name: &str) -> Result<Option<SearchHit>> {
        let page = self.search_page(&name_filter(name), 0)?;
        Ok(page.content.into_iter().next())
    }
}

/// `POST {base}/search?page=N` with the filter as body
fn search_request(client: &RestClient, filter: &Value, page: u64) -> Result<Response> {
    let options = RequestOptions::new()
        .query(PAGE_PARAM, page.to_string())
        .json(filter.clone());
    client.execute(Method::POST, "search", options)
}

/// Filter matching entities by exact name.
pub fn name_filter(name: &str) -> Value {
    json!({
        "equals": {
            "field": "name",
            "value": name,
        }
    })
}

fn require_payload(document: &Entity) -> Result<()> {
    if document.is_null() {
        return Err(RestError::EmptyPayload);
    }
    Ok(())
}

/// Declare an entity client type and opt it into a set of capabilities.
///
/// ```no_run
/// use entity_rest::{entity_client, RestClient, Searcher};
///
/// entity_client!(
///     /// Servers of the core product
///     pub struct ServerClient => [entity_rest::Getter, entity_rest::Crud, entity_rest::Searcher]
/// );
///
/// let core = RestClient::new("http://localhost:12010/v2", "api-key")?;
/// let servers = ServerClient::new(&core, "server");
/// let all = servers.search(&serde_json::json!({}))?;
/// # Ok::<(), entity_rest::RestError>(())
/// ```
#[macro_export]
macro_rules! entity_client {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => [$($capability:path),* $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            client: $crate::RestClient,
        }

        impl $name {
            /// Bind the client to `{parent}/{segment}`
            pub fn new(parent: &$crate::RestClient, segment: &str) -> Self {
                Self {
                    client: parent.sub_client(segment),
                }
            }
        }

        impl $crate::Endpoint for $name {
            fn client(&self) -> &$crate::RestClient {
                &self.client
            }
        }

        $(impl $capability for $name {})*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::entity_client!(struct ReadOnly => [Getter]);
    crate::entity_client!(struct Full => [Getter, Crud, Searcher]);

    #[test]
    fn test_entity_client_binds_segment() {
        let parent = RestClient::new("http://localhost/v2", "k").unwrap();
        let client = ReadOnly::new(&parent, "credential");
        assert_eq!(client.client().base_url(), "http://localhost/v2/credential");
        assert_eq!(client.client().api_key().as_str(), "k");
    }

    #[test]
    fn test_create_rejects_null_payload() {
        let parent = RestClient::new("http://localhost:1", "").unwrap();
        let client = Full::new(&parent, "server");
        let err = client.create(&Value::Null).unwrap_err();
        assert!(matches!(err, RestError::EmptyPayload));
        let err = client.update(Uuid::new_v4(), &Value::Null).unwrap_err();
        assert!(matches!(err, RestError::EmptyPayload));
    }

    #[test]
    fn test_name_filter() {
        let filter = name_filter("my server");
        assert_eq!(filter["equals"]["field"], "name");
        assert_eq!(filter["equals"]["value"], "my server");
    }
}
