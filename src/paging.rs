use crate::error::Result;
use crate::response::{Entity, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::trace;

/// Query parameter carrying the zero-based page index.
pub const PAGE_PARAM: &str = "page";

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items of this page; a missing or null field means an empty page
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub content: Vec<T>,
    /// Zero-based index of this page
    #[serde(default)]
    pub page_number: Option<u64>,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: Option<u64>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> Page<T> {
    /// Decide whether another page should be requested after page `requested`.
    ///
    /// `totalPages` is authoritative when present; otherwise the walk goes on
    /// until an empty page. The server's `pageNumber` never moves the cursor
    /// backwards.
    pub fn has_next(&self, requested: u64) -> bool {
        if self.content.is_empty() {
            return false;
        }
        let number = self.page_number.unwrap_or(requested).max(requested);
        match self.total_pages {
            Some(total) => number.checked_add(1).map_or(false, |next| next < total),
            None => true,
        }
    }
}

/// A single search result: an abbreviated, score-ranked projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Abbreviated entity document
    pub source: Entity,
    /// Highlighted fragments, passed through untouched
    #[serde(default)]
    pub highlight: Value,
    /// Relevance score
    #[serde(default)]
    pub score: Option<f64>,
}

impl SearchHit {
    /// Id of the hit's source document
    pub fn id(&self) -> Option<&str> {
        crate::response::entity_id(&self.source)
    }
}

/// Walk all pages and return the concatenated content.
///
/// `fetch` is called with the page index to request. A no-content response
/// (204 or blank body) ends the walk with whatever has been collected, which
/// on page 0 is an empty list. The walk is all-or-nothing: a failed page
/// discards everything accumulated so far.
pub fn paginate<T, F>(mut fetch: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(u64) -> Result<Response>,
{
    let mut items = Vec::new();
    let mut requested = 0;

    loop {
        let response = fetch(requested)?;
        if response.is_no_content() {
            trace!(page = requested, "no content, stopping");
            break;
        }

        let page: Page<T> = response.apply()?;
        let more = page.has_next(requested);
        trace!(
            page = requested,
            items = page.content.len(),
            total_pages = ?page.total_pages,
            "page fetched"
        );
        items.extend(page.content);

        if !more {
            break;
        }
        requested += 1;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;
    use serde_json::json;

    fn page(body: Value) -> Result<Response> {
        Ok(Response::new(200, serde_json::to_vec(&body).unwrap()))
    }

    #[test]
    fn test_paginate_concatenates_in_order() {
        let mut calls = Vec::new();
        let items: Vec<Value> = paginate(|n| {
            calls.push(n);
            page(json!({
                "content": [{"id": format!("{}-a", n)}, {"id": format!("{}-b", n)}],
                "pageNumber": n,
                "totalPages": 3
            }))
        })
        .unwrap();

        assert_eq!(calls, vec![0, 1, 2]);
        let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["0-a", "0-b", "1-a", "1-b", "2-a", "2-b"]);
    }

    #[test]
    fn test_paginate_no_content() {
        let items: Vec<Value> = paginate(|_| Ok(Response::new(204, Vec::new()))).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_paginate_missing_content_field() {
        let items: Vec<Value> = paginate(|_| page(json!({"pageNumber": 0, "totalPages": 0}))).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_paginate_failure_discards_partial() {
        let result: Result<Vec<Value>> = paginate(|n| {
            if n == 1 {
                Err(RestError::http(503, "unavailable".to_string(), None))
            } else {
                page(json!({"content": [{"id": "x"}], "pageNumber": n, "totalPages": 3}))
            }
        });

        let err = result.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_paginate_without_total_pages_stops_on_empty() {
        let items: Vec<Value> = paginate(|n| {
            if n < 2 {
                page(json!({"content": [{"id": n}]}))
            } else {
                page(json!({"content": []}))
            }
        })
        .unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_paginate_stuck_page_number() {
        let mut calls = 0;
        let items: Vec<Value> = paginate(|_| {
            calls += 1;
            page(json!({"content": [{"id": "x"}], "pageNumber": 0, "totalPages": 2}))
        })
        .unwrap();
        assert_eq!(calls, 2);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_paginate_page_number_at_max() {
        let mut calls = 0;
        let items: Vec<Value> = paginate(|_| {
            calls += 1;
            page(json!({"content": [{"id": "x"}], "pageNumber": u64::MAX, "totalPages": 2}))
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_paginate_null_content() {
        let items: Vec<Value> =
            paginate(|_| page(json!({"content": null, "pageNumber": 0, "totalPages": 1}))).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_search_hit_id() {
        let hit: SearchHit = serde_json::from_value(json!({
            "source": {"id": "abc", "name": "n"},
            "highlight": {"name": ["<em>n</em>"]},
            "score": 1.5
        }))
        .unwrap();
        assert_eq!(hit.id(), Some("abc"));
        assert_eq!(hit.score, Some(1.5));
    }
}
