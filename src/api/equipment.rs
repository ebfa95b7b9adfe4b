//! Equipment catalog endpoints

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use serde::Deserialize;
use tokio_stream::{Stream, StreamExt};
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::{Category, EquipmentItem},
};

/// Catalog filters; both are optional and combine with AND
#[derive(Deserialize, IntoParams)]
pub struct EquipmentQuery {
    /// Filter by category
    pub category: Option<Category>,
    /// Case-insensitive substring match on name and description
    pub search: Option<String>,
}

/// List the current equipment catalog
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Current catalog snapshot", body = Vec<EquipmentItem>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> Json<Vec<EquipmentItem>> {
    let snapshot = state.services.catalog.current();
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let items = snapshot
        .iter()
        .filter(|item| query.category.map_or(true, |c| item.category == c))
        .filter(|item| {
            needle.as_deref().map_or(true, |needle| {
                item.name.to_lowercase().contains(needle)
                    || item
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            })
        })
        .cloned()
        .collect();

    Json(items)
}

/// Get one equipment item by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(
        ("id" = u32, Path, description = "Equipment item ID")
    ),
    responses(
        (status = 200, description = "Equipment item", body = EquipmentItem),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<EquipmentItem>> {
    state
        .services
        .catalog
        .item(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Equipment item {} not found", id)))
}

/// Stream catalog snapshots as server-sent events.
///
/// The current snapshot is sent immediately, then one event per catalog
/// change. The feed poll timer runs only while at least one client is
/// connected.
#[utoipa::path(
    get,
    path = "/equipment/events",
    tag = "equipment",
    responses(
        (status = 200, description = "text/event-stream of catalog snapshots")
    )
)]
pub async fn equipment_events(
    State(state): State<crate::AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = state
        .services
        .catalog
        .subscribe()
        .into_stream()
        .map(|snapshot| Event::default().event("catalog").json_data(&*snapshot));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
