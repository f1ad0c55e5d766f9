use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait, QueryFilter, Set,
};

use crate::core::traits::{CrudResource, MergeIntoActiveModel};
use crate::entities::user::{self, Role, UserCreate, UserUpdate};
use crate::errors::ApiError;
use crate::validation::Validatable;

/// Hash a password for storage.
///
/// # Errors
///
/// Returns a sanitized 500 if hashing fails.
pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::internal("Failed to hash password", Some(err.to_string())))
}

/// Verify a password against a stored hash. Malformed hashes verify as
/// false rather than erroring.
#[must_use]
pub fn verify_password(plain: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Count super admins other than `except`.
async fn other_super_admins(
    db: &DatabaseConnection,
    except: Option<&str>,
) -> Result<u64, ApiError> {
    let mut query = user::Entity::find().filter(user::Column::Role.eq(Role::SuperAdmin));
    if let Some(nip) = except {
        query = query.filter(user::Column::Nip.ne(nip));
    }
    Ok(query.count(db).await?)
}

/// Create a staff account.
///
/// The single-super-admin check here is read-then-write and can race; the
/// partial unique index created by the migration backstops it on SQLite and
/// PostgreSQL.
///
/// # Errors
///
/// Returns a 422 on validation failure, a duplicate NIP, or a second super
/// admin.
pub async fn create(db: &DatabaseConnection, payload: UserCreate) -> Result<user::Model, ApiError> {
    payload.validate()?;

    if user::Entity::find_by_id(payload.nip.clone())
        .one(db)
        .await?
        .is_some()
    {
        return Err(ApiError::validation("nip", "NIP is already taken"));
    }
    if payload.role == Role::SuperAdmin && other_super_admins(db, None).await? > 0 {
        return Err(ApiError::validation(
            "role",
            "Only one super admin may exist",
        ));
    }

    let hash = hash_password(&payload.password)?;
    let nip = payload.nip.clone();
    let model = payload.into_active_model(hash).insert(db).await?;
    tracing::info!(nip = %nip, "Staff account created");
    Ok(model)
}

/// Update a staff account.
///
/// # Errors
///
/// Returns a 404 for unknown NIPs and a 422 when the change would violate
/// the single-super-admin invariant.
pub async fn update(
    db: &DatabaseConnection,
    nip: &str,
    payload: UserUpdate,
) -> Result<user::Model, ApiError> {
    payload.validate()?;
    let model = user::Model::get_one(db, nip.to_string()).await?;

    match payload.role {
        Some(Role::SuperAdmin) if other_super_admins(db, Some(nip)).await? > 0 => {
            return Err(ApiError::validation(
                "role",
                "Only one super admin may exist",
            ));
        }
        Some(Role::Employee)
            if model.role == Role::SuperAdmin && other_super_admins(db, Some(nip)).await? == 0 =>
        {
            return Err(ApiError::validation(
                "role",
                "The last super admin cannot be demoted",
            ));
        }
        _ => {}
    }

    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;
    let mut merged = payload.merge_into_activemodel(model.into_active_model())?;
    if let Some(hash) = password_hash {
        merged.password = Set(hash);
    }
    Ok(merged.update(db).await?)
}

/// Delete a staff account. Super admin accounts cannot be deleted.
///
/// # Errors
///
/// Returns a 404 for unknown NIPs and a 422 for super admin targets.
pub async fn delete(db: &DatabaseConnection, nip: &str) -> Result<(), ApiError> {
    let model = user::Model::get_one(db, nip.to_string()).await?;
    if model.role == Role::SuperAdmin {
        return Err(ApiError::validation(
            "nip",
            "The super admin account cannot be deleted",
        ));
    }
    model.delete(db).await?;
    Ok(())
}
