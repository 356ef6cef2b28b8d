//! User handlers: registration (multipart), login, profile, password, profile picture.

use crate::error::AppError;
use crate::extractors::{ApiJson, ApiPath, SessionContext};
use crate::handlers::upload::{read_form, FormData};
use crate::model::{ChangePassword, LoginRequest, NewUser, Role, UpdateUser};
use crate::response::{self, ok, ok_message};
use crate::service::validation::{self as v, MAX_NAME_LEN};
use crate::service::UserService;
use crate::state::AppState;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

const PROFILE_PIC_FIELD: &str = "ProfilePic";

fn new_user(form: &mut FormData) -> Result<NewUser, AppError> {
    let username = v::required_text("username", form.take_text("username"), MAX_NAME_LEN)?;
    let email = v::required_text("email", form.take_text("email"), MAX_NAME_LEN)?;
    v::email("email", &email)?;
    let password = v::password("password", form.take_text("password"))?;
    let first_name = v::required_text("firstName", form.take_text("firstName"), MAX_NAME_LEN)?;
    let last_name = v::required_text("lastName", form.take_text("lastName"), MAX_NAME_LEN)?;
    let phone = v::optional_text("phone", form.take_text("phone"), MAX_NAME_LEN)?;
    if let Some(p) = &phone {
        v::phone("phone", p)?;
    }
    let role = match v::optional_text("role", form.take_text("role"), MAX_NAME_LEN)? {
        Some(r) => r.parse::<Role>().map_err(|e| AppError::Validation(e.to_string()))?,
        None => Role::Customer,
    };
    Ok(NewUser {
        username,
        email,
        password,
        first_name,
        last_name,
        phone,
        role,
    })
}

/// POST /api/users/register: multipart text fields plus optional `ProfilePic` file.
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;
    let user = new_user(&mut form)?;
    let pic = form
        .take_file(PROFILE_PIC_FIELD)
        .map(|f| f.into_profile_pic())
        .transpose()?;
    let created = UserService::create(&state.pool, &user, pic).await?;
    Ok(response::created("User registered successfully", created))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = v::required_text("username", body.username, MAX_NAME_LEN)?;
    let password = v::required("password", body.password)?;
    match UserService::login(&state.pool, &username, &password).await? {
        Some(session) => {
            tracing::info!(user_id = session.user.user_id, "login");
            Ok(ok("Login successful", session))
        }
        None => Err(AppError::Unauthorized("Invalid username or password".into())),
    }
}

/// GET /api/users/me: the user named by `X-User-Id`.
pub async fn me(State(state): State<AppState>, session: SessionContext) -> Result<impl IntoResponse, AppError> {
    let user_id = session.user_id()?;
    let user = UserService::find(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(ok("User retrieved successfully", user))
}

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(ok("User retrieved successfully", user))
}

pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateUser>,
) -> Result<impl IntoResponse, AppError> {
    let changes = UpdateUser {
        email: v::optional_text("email", body.email, MAX_NAME_LEN)?,
        first_name: v::optional_text("firstName", body.first_name, MAX_NAME_LEN)?,
        last_name: v::optional_text("lastName", body.last_name, MAX_NAME_LEN)?,
        phone: v::optional_text("phone", body.phone, MAX_NAME_LEN)?,
    };
    if let Some(e) = &changes.email {
        v::email("email", e)?;
    }
    if let Some(p) = &changes.phone {
        v::phone("phone", p)?;
    }
    let user = UserService::update(&state.pool, id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(ok("User updated successfully", user))
}

pub async fn change_password(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<ChangePassword>,
) -> Result<impl IntoResponse, AppError> {
    let current = v::required("currentPassword", body.current_password)?;
    let new = v::password("newPassword", body.new_password)?;
    match UserService::change_password(&state.pool, id, &current, &new).await? {
        None => Err(AppError::NotFound("User not found".into())),
        Some(false) => Err(AppError::Unauthorized("Current password is incorrect".into())),
        Some(true) => Ok(ok_message("Password updated successfully")),
    }
}

pub async fn upload_profile_pic(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_form(multipart).await?;
    let pic = form
        .take_file(PROFILE_PIC_FIELD)
        .ok_or_else(|| AppError::Validation(format!("{} is required", PROFILE_PIC_FIELD)))?
        .into_profile_pic()?;
    let user = UserService::set_profile_pic(&state.pool, id, pic)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(ok("Profile picture updated successfully", user))
}

/// Raw bytes with the stored content type.
pub async fn profile_pic(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let pic = UserService::profile_pic(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile picture not found".into()))?;
    Ok(([(header::CONTENT_TYPE, pic.content_type)], pic.bytes))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !UserService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("User not found".into()));
    }
    tracing::info!(user_id = id, "user deleted");
    Ok(ok_message("User deleted successfully"))
}

pub async fn user_restaurants(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows = UserService::restaurants(&state.pool, id).await?;
    response::many(rows, "restaurants")
}
