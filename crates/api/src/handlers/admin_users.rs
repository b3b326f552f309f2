//! Administrator management of member accounts: approval, blocking, roles,
//! password resets and spreadsheet import/export.

use axum::{
    extract::{Path, Query, State},
    response::Response,
    Json,
};
use courtside_core::{
    errors::CourtError,
    export::{
        parse_users_csv, protect_administrators, users_to_csv, DEFAULT_IMPORT_PASSWORD,
    },
    models::{
        notification::{NewNotification, NotificationKind},
        user::{
            Household, ImportSummary, ImportUsersRequest, NewUser, ResetPasswordRequest, User,
            UserProfile, UserSearchQuery, UserStatus,
        },
    },
    validation::validate_password,
};
use courtside_db::{models::convert_all, repositories};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    handlers::support,
    middleware::{
        auth::{self, AdminUser},
        error_handling::AppError,
    },
    ApiState,
};

fn profiles(users: Vec<User>) -> Vec<UserProfile> {
    users.iter().map(User::profile).collect()
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let rows = repositories::user::list_users(&state.db_pool, query.term())
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(profiles(convert_all(rows)?)))
}

#[axum::debug_handler]
pub async fn list_pending_users(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserProfile>>, AppError> {
    let rows = repositories::user::list_pending_users(&state.db_pool, query.term())
        .await
        .map_err(CourtError::Database)?;
    Ok(Json(profiles(convert_all(rows)?)))
}

/// One account status transition and what it tells the member.
struct StatusChange {
    from: &'static [UserStatus],
    to: UserStatus,
    action: &'static str,
    notification: Option<(NotificationKind, &'static str, &'static str)>,
}

const APPROVE: StatusChange = StatusChange {
    from: &[UserStatus::Pending],
    to: UserStatus::Approved,
    action: "Usuario aprobado",
    notification: Some((
        NotificationKind::Success,
        "Cuenta aprobada",
        "Tu cuenta fue aprobada, ya puedes reservar canchas",
    )),
};

const REJECT: StatusChange = StatusChange {
    from: &[UserStatus::Pending],
    to: UserStatus::Blocked,
    action: "Usuario rechazado",
    notification: Some((
        NotificationKind::Error,
        "Registro rechazado",
        "Tu solicitud de registro fue rechazada",
    )),
};

const BLOCK: StatusChange = StatusChange {
    from: &[UserStatus::Approved],
    to: UserStatus::Blocked,
    action: "Usuario bloqueado",
    notification: Some((
        NotificationKind::Error,
        "Cuenta bloqueada",
        "Tu cuenta fue bloqueada, contacta a la administración",
    )),
};

const UNBLOCK: StatusChange = StatusChange {
    from: &[UserStatus::Blocked],
    to: UserStatus::Approved,
    action: "Usuario desbloqueado",
    notification: Some((
        NotificationKind::Success,
        "Cuenta desbloqueada",
        "Tu cuenta fue desbloqueada",
    )),
};

async fn change_status(
    state: &ApiState,
    admin: &User,
    id: Uuid,
    change: &StatusChange,
) -> Result<UserProfile, AppError> {
    if id == admin.id && change.to != UserStatus::Approved {
        return Err(AppError(CourtError::Validation(
            "You cannot block your own account".to_string(),
        )));
    }

    let user = support::find_user(state, id).await?;
    if !change.from.contains(&user.status) {
        return Err(AppError(CourtError::Conflict(format!(
            "User is {}, expected {}",
            user.status,
            change
                .from
                .iter()
                .map(UserStatus::as_str)
                .collect::<Vec<_>>()
                .join(" or ")
        ))));
    }

    let row = repositories::user::update_user_status(&state.db_pool, id, change.to)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("User with ID {} not found", id)))?;
    let updated = User::try_from(row)?;

    if change.to == UserStatus::Blocked {
        repositories::session::delete_user_sessions(&state.db_pool, id)
            .await
            .map_err(CourtError::Database)?;
    }

    if let Some((kind, title, message)) = change.notification {
        support::notify_user(state, id, NewNotification::new(kind, title, message)).await;
    }
    support::record_change(
        state,
        admin,
        change.action,
        format!("{} <{}>", updated.name, updated.email),
    )
    .await;

    Ok(updated.profile())
}

#[axum::debug_handler]
pub async fn approve_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(change_status(&state, &admin, id, &APPROVE).await?))
}

#[axum::debug_handler]
pub async fn reject_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(change_status(&state, &admin, id, &REJECT).await?))
}

#[axum::debug_handler]
pub async fn block_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(change_status(&state, &admin, id, &BLOCK).await?))
}

#[axum::debug_handler]
pub async fn unblock_user(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(change_status(&state, &admin, id, &UNBLOCK).await?))
}

#[axum::debug_handler]
pub async fn toggle_role(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, AppError> {
    if id == admin.id {
        return Err(AppError(CourtError::Validation(
            "You cannot change your own role".to_string(),
        )));
    }

    let user = support::find_user(&state, id).await?;
    let role = user.role.toggled();
    let row = repositories::user::update_user_role(&state.db_pool, id, role)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(format!("User with ID {} not found", id)))?;
    let updated = User::try_from(row)?;

    support::notify_user(
        &state,
        id,
        NewNotification::new(
            NotificationKind::Info,
            "Rol actualizado",
            format!("Tu rol ahora es: {}", role),
        ),
    )
    .await;
    support::record_change(
        &state,
        &admin,
        "Rol cambiado",
        format!("{} <{}>: {} -> {}", updated.name, updated.email, user.role, role),
    )
    .await;

    Ok(Json(updated.profile()))
}

#[axum::debug_handler]
pub async fn reset_password(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<UserProfile>, AppError> {
    validate_password(&payload.new_password)?;
    let user = support::find_user(&state, id).await?;

    let password_hash = auth::hash_password(&payload.new_password)?;
    repositories::user::update_password_hash(&state.db_pool, id, &password_hash)
        .await
        .map_err(CourtError::Database)?;
    repositories::session::delete_user_sessions(&state.db_pool, id)
        .await
        .map_err(CourtError::Database)?;

    support::notify_user(
        &state,
        id,
        NewNotification::new(
            NotificationKind::Warning,
            "Contraseña restablecida",
            "Un administrador restableció tu contraseña",
        ),
    )
    .await;
    support::record_change(
        &state,
        &admin,
        "Contraseña restablecida",
        format!("{} <{}>", user.name, user.email),
    )
    .await;

    Ok(Json(user.profile()))
}

#[axum::debug_handler]
pub async fn export_users(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Response, AppError> {
    let rows = repositories::user::list_all_users(&state.db_pool)
        .await
        .map_err(CourtError::Database)?;
    let users: Vec<User> = convert_all(rows)?;
    let csv = users_to_csv(&users)?;

    Ok(support::attachment(
        "text/csv; charset=utf-8",
        &format!("usuarios_{}.csv", state.today()),
        csv.into_bytes(),
    ))
}

/// Creates unknown emails and updates known ones from a user sheet.
#[axum::debug_handler]
pub async fn import_users(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<ImportUsersRequest>,
) -> Result<Json<ImportSummary>, AppError> {
    let mut parsed = parse_users_csv(&payload.csv)?;
    let existing: Vec<User> = convert_all(
        repositories::user::list_all_users(&state.db_pool)
            .await
            .map_err(CourtError::Database)?,
    )?;
    protect_administrators(&mut parsed.users, &admin, &existing)?;

    let mut summary = ImportSummary {
        skipped: parsed.skipped,
        ..ImportSummary::default()
    };

    for imported in parsed.users {
        let new_user = NewUser {
            name: imported.name,
            email: imported.email,
            password: imported
                .password
                .clone()
                .unwrap_or_else(|| DEFAULT_IMPORT_PASSWORD.to_string()),
            role: imported.role,
            status: imported.status,
            household: Household::new(imported.manzana, imported.villa),
        };

        let existing = repositories::user::get_user_by_email(&state.db_pool, &new_user.email)
            .await
            .map_err(CourtError::Database)?;

        match existing {
            Some(row) => {
                let password_hash = match &imported.password {
                    Some(password) => Some(auth::hash_password(password)?),
                    None => None,
                };
                repositories::user::update_imported_user(
                    &state.db_pool,
                    row.id,
                    &new_user,
                    password_hash.as_deref(),
                )
                .await
                .map_err(CourtError::Database)?;
                summary.updated += 1;
            }
            None => {
                let password_hash = auth::hash_password(&new_user.password)?;
                repositories::user::create_user(&state.db_pool, &new_user, &password_hash)
                    .await
                    .map_err(CourtError::Database)?;
                summary.created += 1;
            }
        }
    }

    support::record_change(
        &state,
        &admin,
        "Usuarios importados",
        format!(
            "{} creados, {} actualizados, {} omitidos",
            summary.created, summary.updated, summary.skipped
        ),
    )
    .await;

    Ok(Json(summary))
}
