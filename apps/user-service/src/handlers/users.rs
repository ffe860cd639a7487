//! User profile CRUD.

use actix_web::{Either, HttpResponse, web};
use serde::Serialize;

use bookstore_core::domain::{NewUser, Role, User, UserChanges, present};
use bookstore_core::error::RepoError;
use bookstore_infra::auth::generate_password;
use bookstore_infra::mask_email;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{CreateUserRequest, UpdateUserRequest};
use bookstore_web::{AppError, AppResult};

use super::{find_user, user_not_found};
use crate::state::UserState;

const GENERATED_PASSWORD_LEN: usize = 12;

/// A freshly created user. The generated password is shown exactly once.
#[derive(Serialize)]
struct CreatedUser {
    #[serde(flatten)]
    user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_password: Option<String>,
}

fn parse_role(role: Option<String>) -> Result<Option<Role>, AppError> {
    Ok(present(role).map(|r| r.parse::<Role>()).transpose()?)
}

/// POST /users - JSON or form body.
pub async fn create_user(
    state: web::Data<UserState>,
    body: Either<web::Json<CreateUserRequest>, web::Form<CreateUserRequest>>,
) -> AppResult<HttpResponse> {
    let request = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };

    let (Some(username), Some(email)) = (present(request.username), present(request.email))
    else {
        return Err(AppError::bad_request("Username and email are required"));
    };
    let role = parse_role(request.role)?.unwrap_or_default();

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let (password, generated_password) = match present(request.password) {
        Some(password) => (password, None),
        None => {
            let password = generate_password(GENERATED_PASSWORD_LEN);
            (password.clone(), Some(password))
        }
    };
    let password_hash = state.passwords.hash(&password)?;

    let user = state
        .users
        .create(NewUser {
            username,
            email,
            password_hash,
            first_name: present(request.first_name),
            last_name: present(request.last_name),
            role,
            profile_pic: present(request.profile_pic),
        })
        .await?;

    tracing::info!(
        user_id = user.id,
        email = %mask_email(&user.email),
        generated_password = generated_password.is_some(),
        "User created"
    );
    Ok(HttpResponse::Created().json(CreatedUser {
        user,
        generated_password,
    }))
}

/// GET /users
pub async fn list_users(state: web::Data<UserState>) -> AppResult<HttpResponse> {
    let users = state.users.find_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// GET /users/{id}
pub async fn get_user(state: web::Data<UserState>, id: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = find_user(&state, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id} - partial profile update.
pub async fn update_user(
    state: web::Data<UserState>,
    id: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let request = body.into_inner();
    let changes = UserChanges {
        username: present(request.username),
        email: present(request.email),
        first_name: request.first_name,
        last_name: request.last_name,
        role: parse_role(request.role)?,
        profile_pic: request.profile_pic,
    };
    if changes.is_empty() {
        return Err(AppError::bad_request("No update data provided"));
    }

    let mut user = find_user(&state, id).await?;

    if let Some(username) = &changes.username {
        let taken = state.users.find_by_username(username).await?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
    }
    if let Some(email) = &changes.email {
        let taken = state.users.find_by_email(email).await?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
    }

    user.apply(changes);
    let user = state.users.update(user).await?;
    tracing::info!(user_id = id, "User updated");
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    state: web::Data<UserState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.users.delete(id).await.map_err(|e| match e {
        RepoError::NotFound => user_not_found(),
        other => other.into(),
    })?;

    tracing::info!(user_id = id, "User deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
