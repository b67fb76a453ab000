//! Readiness endpoints.
//!
//! Handlers only translate between the wire format and [`ReadinessStore`];
//! the store owns all locking.

use axum::Json;
use axum::body::Bytes;
use axum::debug_handler;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use pod_readiness::{ReadinessStore, ReporterKey};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Wire representation of readiness, used for both requests and responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessBody {
    pub ready: bool,
}

/// Query parameters of a readiness write.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReadinessQuery {
    pub key: Option<String>,
}

impl ReadinessQuery {
    /// Only the first `key` counts when the parameter is repeated.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let key = pairs
            .into_iter()
            .find(|(name, _)| name == "key")
            .map(|(_, value)| value);
        Self { key }
    }
}

/// `GET /healthy`
#[debug_handler]
pub async fn healthy(State(store): State<ReadinessStore>) -> (StatusCode, &'static str) {
    if store.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "NOT READY")
    }
}

/// `GET /pod/readiness`
#[debug_handler]
pub async fn get_readiness(State(store): State<ReadinessStore>) -> Json<ReadinessBody> {
    Json(ReadinessBody {
        ready: store.is_ready(),
    })
}

/// `PATCH /pod/readiness[?key=<name>]`
///
/// The key is checked first, then the body is decoded; the store is only
/// touched once both are valid.
#[debug_handler]
pub async fn patch_readiness(
    State(store): State<ReadinessStore>,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Result<Json<ReadinessBody>, ApiError> {
    let query = ReadinessQuery::from_pairs(pairs);
    let key = ReporterKey::resolve(query.key.as_deref())?;
    let update: ReadinessBody = serde_json::from_slice(&body)?;

    let snapshot = store.report(key, update.ready);
    Ok(Json(ReadinessBody {
        ready: snapshot.ready,
    }))
}
