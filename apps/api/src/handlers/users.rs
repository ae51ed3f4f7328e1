use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use secondhand_application::{CreateUserParams, UpdateUserParams, UserDto};
use secondhand_domain::UserId;

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn list_users_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user_by_mail_handler(
    State(state): State<AppState>,
    Path(mail): Path<String>,
) -> ApiResult<Json<UserDto>> {
    let user = state.user_service.get_user_by_mail(&mail).await?;
    Ok(Json(user))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    let user = state
        .user_service
        .create_user(CreateUserParams {
            mail: payload.mail,
            first_name: payload.first_name,
            last_name: payload.last_name,
            middle_name: payload.middle_name,
        })
        .await?;

    Ok(Json(user))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(mail): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserDto>> {
    let user = state
        .user_service
        .update_user(
            &mail,
            UpdateUserParams {
                first_name: payload.first_name,
                last_name: payload.last_name,
                middle_name: payload.middle_name,
            },
        )
        .await?;

    Ok(Json(user))
}

pub async fn deactivate_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .deactivate_user(UserId::from_i64(id))
        .await?;
    Ok(StatusCode::OK)
}

pub async fn activate_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .user_service
        .activate_user(UserId::from_i64(id))
        .await?;
    Ok(StatusCode::OK)
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(UserId::from_i64(id)).await?;
    Ok(StatusCode::OK)
}
