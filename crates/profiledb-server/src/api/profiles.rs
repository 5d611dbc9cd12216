use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, MessageResponse, ResponseMeta};

pub(super) const NO_MATCH_MESSAGE: &str = "no match found";

#[derive(Debug, Serialize)]
pub(super) struct ProfileItem {
    id: Uuid,
    external_id: String,
    username: String,
    full_name: Option<String>,
    profile_url: Option<String>,
    avatar_url: Option<String>,
    followed_by_viewer: Option<bool>,
    is_verified: Option<bool>,
    followers_count: Option<i64>,
    following_count: Option<i64>,
    biography: Option<String>,
    public_email: Option<String>,
    posts_count: Option<i64>,
    phone_country_code: Option<String>,
    phone_number: Option<String>,
    city: Option<String>,
    address: Option<String>,
    is_private: Option<bool>,
    is_business: Option<bool>,
    external_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<profiledb_db::ProfileRow> for ProfileItem {
    fn from(row: profiledb_db::ProfileRow) -> Self {
        Self {
            id: row.public_id,
            external_id: row.external_id,
            username: row.username,
            full_name: row.full_name,
            profile_url: row.profile_url,
            avatar_url: row.avatar_url,
            followed_by_viewer: row.followed_by_viewer,
            is_verified: row.is_verified,
            followers_count: row.followers_count,
            following_count: row.following_count,
            biography: row.biography,
            public_email: row.public_email,
            posts_count: row.posts_count,
            phone_country_code: row.phone_country_code,
            phone_number: row.phone_number,
            city: row.city,
            address: row.address,
            is_private: row.is_private,
            is_business: row.is_business,
            external_url: row.external_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub(super) async fn list_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ProfileItem>>>, ApiError> {
    let rows = profiledb_db::list_profiles(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows.into_iter().map(ProfileItem::from).collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Case-insensitive substring search on username. An empty result is not an
/// error; it is reported with a message and no data.
pub(super) async fn search_profiles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let rows = profiledb_db::search_profiles_by_username(&state.pool, &username)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let meta = ResponseMeta::new(req_id.0);

    if rows.is_empty() {
        tracing::debug!(fragment = %username, "profile search matched nothing");
        return Ok(Json(MessageResponse::<()> {
            message: NO_MATCH_MESSAGE.to_string(),
            data: None,
            meta,
        })
        .into_response());
    }

    let data: Vec<ProfileItem> = rows.into_iter().map(ProfileItem::from).collect();
    Ok(Json(ApiResponse { data, meta }).into_response())
}
