use crate::error::ApiError;
use core_types::BetRecord;
use serde::Deserialize;
use std::collections::HashMap;

/// The GraphQL response envelope returned by the subgraph.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<HashMap<String, Option<Vec<BetRecord>>>>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Extracts the bet list for `entity` from a raw response body.
///
/// Any reported GraphQL error fails the page even if partial data came back.
pub fn decode_page(body: &str, entity: &str) -> Result<Vec<BetRecord>, ApiError> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(ApiError::GraphQl(messages.join("; ")));
    }

    response
        .data
        .and_then(|mut data| data.remove(entity))
        .flatten()
        .ok_or_else(|| ApiError::InvalidData(format!("response has no '{entity}' field")))
}
