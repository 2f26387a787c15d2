use crate::entity::{Getter, Searcher};
use crate::error::{RestError, Result};
use crate::response::Entity;
use tracing::debug;
use uuid::Uuid;

/// Parse an entity id, failing locally when the text is not a UUID
pub fn parse_id(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| RestError::InvalidId(value.to_string()))
}

/// Resolve a UUID or a name to the id of an existing entity.
///
/// A UUID is returned as-is without any request; a name costs exactly one
/// search request.
pub fn resolve_id<C>(client: &C, name_or_id: &str) -> Result<Uuid>
where
    C: Searcher + ?Sized,
{
    if let Ok(id) = parse_id(name_or_id) {
        return Ok(id);
    }

    let hit = client
        .search_by_name(name_or_id)?
        .ok_or_else(|| RestError::NotFound {
            name: name_or_id.to_string(),
        })?;

    let id = hit.id().ok_or_else(|| {
        RestError::UnexpectedResponse(format!(
            "search hit for {:?} has no id",
            name_or_id
        ))
    })?;
    let id = Uuid::parse_str(id).map_err(|_| {
        RestError::UnexpectedResponse(format!(
            "search hit for {:?} has a malformed id {:?}",
            name_or_id, id
        ))
    })?;

    debug!(name = name_or_id, %id, "resolved name to id");
    Ok(id)
}

/// Resolve a UUID or a name to the full entity document.
///
/// A failing `Get` after a successful search is returned unchanged, so an
/// entity deleted in between surfaces as the server's error rather than as
/// a name miss.
pub fn resolve<C>(client: &C, name_or_id: &str) -> Result<Entity>
where
    C: Searcher + Getter + ?Sized,
{
    let id = resolve_id(client, name_or_id)?;
    client.get(id)
}
