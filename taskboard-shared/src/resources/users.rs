/// User (account) resource operations
///
/// The account listing is the one read cached under a global, unscoped key
/// (`users`); any account mutation invalidates it. Deleting an account also
/// clears that principal's board and task list entries - the row cascade
/// removes the data, and leaving the cache entries behind would keep serving
/// a deleted tenant's resources until TTL expiry.

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, Cache};
use crate::models::user::{CreateUser, UpdateUser, User};

use super::{ResourceError, Sourced};

fn validate_name(name: &str) -> Result<String, ResourceError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ResourceError::Validation(
            "name must not be empty".to_string(),
        ));
    }
    if name.len() > 100 {
        return Err(ResourceError::Validation(
            "name must be at most 100 characters".to_string(),
        ));
    }
    Ok(name)
}

/// Lists all accounts, cache first
///
/// Password hashes never enter the cache; `User` skips them on
/// serialization.
pub async fn list(db: &PgPool, cache: &Cache) -> Result<Sourced<Vec<User>>, ResourceError> {
    if let Some(users) = cache.get_json::<Vec<User>>(keys::USER_LIST_KEY).await {
        return Ok(Sourced::cached(users));
    }

    let users = User::list(db).await?;
    cache.put_json(keys::USER_LIST_KEY, &users).await;

    Ok(Sourced::fresh(users))
}

/// Creates an account
///
/// `password_hash` must already be hashed by the caller; this layer never
/// sees plaintext credentials.
pub async fn create(
    db: &PgPool,
    cache: &Cache,
    mut data: CreateUser,
) -> Result<User, ResourceError> {
    data.name = validate_name(&data.name)?;

    let user = User::create(db, data).await?;

    cache.invalidate(&[keys::USER_LIST_KEY.to_string()]).await;

    Ok(user)
}

/// Updates an account
pub async fn update(
    db: &PgPool,
    cache: &Cache,
    id: Uuid,
    mut data: UpdateUser,
) -> Result<User, ResourceError> {
    if let Some(ref name) = data.name {
        data.name = Some(validate_name(name)?);
    }

    let user = User::update(db, id, data)
        .await?
        .ok_or(ResourceError::NotFound("User"))?;

    cache.invalidate(&[keys::USER_LIST_KEY.to_string()]).await;

    Ok(user)
}

/// Deletes an account
///
/// Cascades through boards and tasks at the persistence layer; the matching
/// cache casualties are the global account listing plus the deleted
/// principal's own list entries.
pub async fn remove(db: &PgPool, cache: &Cache, id: Uuid) -> Result<(), ResourceError> {
    let deleted = User::delete(db, id).await?;
    if !deleted {
        return Err(ResourceError::NotFound("User"));
    }

    cache
        .invalidate(&[
            keys::USER_LIST_KEY.to_string(),
            keys::board_list(id),
            keys::task_list(id),
        ])
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_validation() {
        assert_eq!(validate_name("  Ada  ").unwrap(), "Ada");
        assert!(matches!(
            validate_name(""),
            Err(ResourceError::Validation(_))
        ));
        assert!(matches!(
            validate_name(&"x".repeat(101)),
            Err(ResourceError::Validation(_))
        ));
    }
}
