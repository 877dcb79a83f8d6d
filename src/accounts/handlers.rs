use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    accounts::{
        dto::{LoginRequest, RegisterRequest, RegisterResponse, UserQuery, UserResponse, UsersResponse},
        errors::AccountError,
        services::Validation,
    },
    response::{ApiError, Envelope},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route("/users", get(list_users))
}

fn decoded<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(e) => {
            error!(error = %e, "failed to decode request body");
            Err(ApiError::bad_request("failed to decode request"))
        }
    }
}

fn validated(check: Validation) -> Result<(), ApiError> {
    check.finish().map_err(|msg| {
        warn!(error = %msg, "invalid request");
        ApiError::bad_request(msg)
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let req = decoded(payload)?;
    validated(
        Validation::default()
            .email("email", &req.email)
            .required("password", &req.password)
            .required("username", &req.username),
    )?;

    let user_id = match state
        .registerer
        .register_user(&req.email, &req.password, &req.username)
        .await
    {
        Ok(id) => id,
        Err(AccountError::DuplicateAccount) => {
            warn!(email = %req.email, "user already exists");
            return Err(ApiError::new(StatusCode::CONFLICT, "user already exists"));
        }
        Err(e) => {
            error!(error = %e, "failed to register user");
            return Err(ApiError::internal("failed to register user"));
        }
    };

    info!(user_id, "user registered");
    Ok(Json(RegisterResponse {
        response: Envelope::ok(),
        user_id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let req = decoded(payload)?;
    validated(
        Validation::default()
            .email("email", &req.email)
            .required("password", &req.password),
    )?;

    let user = match state.loginer.login(&req.email, &req.password).await {
        Ok(u) => u,
        Err(e) if e.is_bad_login() => {
            // One answer for unknown email and wrong password.
            warn!(email = %req.email, reason = %e, "login rejected");
            return Err(ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid email or password",
            ));
        }
        Err(e) => {
            error!(error = %e, "failed to login user");
            return Err(ApiError::internal("failed to login user"));
        }
    };

    info!(user_id = user.id, "user logged in");
    Ok(Json(UserResponse {
        response: Envelope::ok(),
        user,
    }))
}

#[instrument(skip(state, query))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let email = query.email.trim();
    if email.is_empty() {
        return Err(ApiError::bad_request("email query param required"));
    }

    match state.getter.user(email).await {
        Ok(user) => Ok(Json(UserResponse {
            response: Envelope::ok(),
            user,
        })),
        Err(AccountError::NotFound) => Err(ApiError::new(StatusCode::NOT_FOUND, "user not found")),
        Err(e) => {
            error!(error = %e, "failed to get user");
            Err(ApiError::internal("internal error"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.lister.users().await.map_err(|e| {
        error!(error = %e, "failed to get users");
        ApiError::internal("failed to get users")
    })?;

    Ok(Json(UsersResponse {
        response: Envelope::ok(),
        users,
    }))
}
