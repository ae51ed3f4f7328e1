use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use secondhand_application::UserService;
use secondhand_infrastructure::InMemoryUserRepository;

use crate::dto::{CreateUserRequest, UpdateUserRequest};
use crate::state::AppState;

use super::{
    activate_user_handler, create_user_handler, deactivate_user_handler, delete_user_handler,
    get_user_by_mail_handler, list_users_handler, update_user_handler,
};

fn app_state() -> AppState {
    AppState {
        user_service: UserService::new(Arc::new(InMemoryUserRepository::new())),
    }
}

fn create_request(mail: &str) -> CreateUserRequest {
    CreateUserRequest {
        mail: mail.to_owned(),
        first_name: "firstName".to_owned(),
        last_name: "lastName".to_owned(),
        middle_name: String::new(),
    }
}

#[tokio::test]
async fn create_then_get_returns_the_same_representation() {
    let state = app_state();

    let created = create_user_handler(State(state.clone()), Json(create_request("a@x.com"))).await;
    assert!(created.is_ok());
    let Json(created) = created.unwrap_or_else(|_| unreachable!());

    let fetched =
        get_user_by_mail_handler(State(state), Path("a@x.com".to_owned())).await;
    assert!(fetched.is_ok());
    let Json(fetched) = fetched.unwrap_or_else(|_| unreachable!());

    assert_eq!(created, fetched);
    assert_eq!(fetched.mail, "a@x.com");
}

#[tokio::test]
async fn representation_serializes_with_camel_case_fields() {
    let state = app_state();
    let created = create_user_handler(State(state), Json(create_request("a@x.com"))).await;
    assert!(created.is_ok());
    let Json(created) = created.unwrap_or_else(|_| unreachable!());

    let value = serde_json::to_value(&created).unwrap_or_default();

    assert_eq!(value["mail"], "a@x.com");
    assert_eq!(value["firstName"], "firstName");
    assert_eq!(value["lastName"], "lastName");
    assert_eq!(value["middleName"], "");
    assert!(value.get("id").is_none());
    assert!(value.get("active").is_none());
}

#[tokio::test]
async fn get_absent_mail_responds_not_found() {
    let state = app_state();

    let result = get_user_by_mail_handler(State(state), Path("missing@x.com".to_owned())).await;

    assert!(result.is_err());
    let response = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_duplicate_mail_responds_conflict() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );

    let duplicate = create_user_handler(State(state), Json(create_request("a@x.com"))).await;

    assert!(duplicate.is_err());
    let response = duplicate
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_of_inactive_user_responds_unprocessable() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );
    assert!(
        deactivate_user_handler(State(state.clone()), Path(1))
            .await
            .is_ok()
    );

    let result = update_user_handler(
        State(state),
        Path("a@x.com".to_owned()),
        Json(UpdateUserRequest {
            first_name: "firstName2".to_owned(),
            last_name: "lastName2".to_owned(),
            middle_name: "middleName".to_owned(),
        }),
    )
    .await;

    assert!(result.is_err());
    let response = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn update_of_active_user_replaces_the_names() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );

    let result = update_user_handler(
        State(state.clone()),
        Path("a@x.com".to_owned()),
        Json(UpdateUserRequest {
            first_name: "firstName2".to_owned(),
            last_name: "lastName2".to_owned(),
            middle_name: "middleName".to_owned(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let Json(updated) = result.unwrap_or_else(|_| unreachable!());
    assert_eq!(updated.first_name, "firstName2");
    assert_eq!(updated.last_name, "lastName2");
    assert_eq!(updated.middle_name, "middleName");
    assert_eq!(updated.mail, "a@x.com");
}

#[tokio::test]
async fn deactivate_twice_succeeds_both_times() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );

    let first = deactivate_user_handler(State(state.clone()), Path(1)).await;
    let second = deactivate_user_handler(State(state), Path(1)).await;

    assert!(matches!(first, Ok(StatusCode::OK)));
    assert!(matches!(second, Ok(StatusCode::OK)));
}

#[tokio::test]
async fn activate_after_deactivate_permits_updates_again() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );
    assert!(
        deactivate_user_handler(State(state.clone()), Path(1))
            .await
            .is_ok()
    );
    assert!(
        activate_user_handler(State(state.clone()), Path(1))
            .await
            .is_ok()
    );

    let result = update_user_handler(
        State(state),
        Path("a@x.com".to_owned()),
        Json(UpdateUserRequest {
            first_name: "firstName2".to_owned(),
            last_name: "lastName2".to_owned(),
            middle_name: String::new(),
        }),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn deactivate_absent_id_responds_not_found() {
    let state = app_state();

    let result = deactivate_user_handler(State(state), Path(404)).await;

    assert!(result.is_err());
    let response = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_user_from_listing() {
    let state = app_state();
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("a@x.com")))
            .await
            .is_ok()
    );
    assert!(
        create_user_handler(State(state.clone()), Json(create_request("b@x.com")))
            .await
            .is_ok()
    );

    assert!(
        delete_user_handler(State(state.clone()), Path(1))
            .await
            .is_ok()
    );

    let listed = list_users_handler(State(state)).await;
    assert!(listed.is_ok());
    let Json(listed) = listed.unwrap_or_else(|_| unreachable!());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].mail, "b@x.com");
}

#[tokio::test]
async fn delete_absent_id_responds_not_found() {
    let state = app_state();

    let result = delete_user_handler(State(state), Path(404)).await;

    assert!(result.is_err());
    let response = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_with_malformed_mail_responds_bad_request() {
    let state = app_state();

    let result = create_user_handler(State(state), Json(create_request("not-a-mail"))).await;

    assert!(result.is_err());
    let response = result
        .err()
        .unwrap_or_else(|| unreachable!())
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
