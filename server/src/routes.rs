use std::sync::Arc;

use axum::{Json, extract::State as AxumState, extract::rejection::JsonRejection};
use menu::{MAX_QUERY_LEN, MAX_RESULTS, MenuItem};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{error::AppError, gemini, state::State};

/// Loose view of the request body. Field shapes are checked by hand in
/// [`parse_request`] so a missing or mistyped field answers 400 with an
/// `error` body instead of the framework's deserialization rejection.
#[derive(Deserialize)]
pub struct SmartSearchBody {
    #[serde(default)]
    query: Value,
    #[serde(default)]
    menu: Value,
}

/// `POST /smart-search`: rank today's menu against a free-text query by
/// asking the model, then echo back the matching full item records in the
/// model's order.
pub async fn smart_search_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<SmartSearchBody>, JsonRejection>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    // A body that is not a JSON object has no query to speak of.
    let Json(body) = payload.map_err(|_| AppError::InvalidQuery)?;

    let (query, menu) = parse_request(body)?;

    // Frontend should already send only today's available items, this is a
    // safety net.
    let available: Vec<&MenuItem> = menu.iter().filter(|item| item.is_available()).collect();

    let menu_json = gemini::serialize_candidates(&available)?;
    let prompt = gemini::build_prompt(&query, &menu_json);

    let reply = state.gemini.generate(&prompt).await?;

    let Some(ids) = gemini::parse_id_array(&reply) else {
        warn!("Model reply was not a JSON id array, returning no matches");
        warn!("Raw model reply: {reply}");
        return Ok(Json(Vec::new()));
    };

    Ok(Json(resolve_ids(&ids, &available)))
}

fn parse_request(body: SmartSearchBody) -> Result<(String, Vec<MenuItem>), AppError> {
    let Some(query) = body.query.as_str() else {
        return Err(AppError::InvalidQuery);
    };
    if query.is_empty() {
        return Err(AppError::InvalidQuery);
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::QueryTooLong);
    }

    if !body.menu.is_array() {
        return Err(AppError::InvalidMenu);
    }
    let menu: Vec<MenuItem> =
        serde_json::from_value(body.menu.clone()).map_err(|_| AppError::InvalidMenu)?;

    Ok((query.to_string(), menu))
}

/// Maps model-returned ids back onto the candidate set, keeping the model's
/// order, dropping ids it made up, and capping the result.
fn resolve_ids(ids: &[String], available: &[&MenuItem]) -> Vec<MenuItem> {
    ids.iter()
        .filter_map(|id| {
            let found = available.iter().find(|item| &item.id == id);
            if found.is_none() {
                warn!("Model returned unknown item id {id}, dropping");
            }
            found.map(|item| (*item).clone())
        })
        .take(MAX_RESULTS)
        .collect()
}
