/// Board resource operations
///
/// Boards are directly owned: every operation compares `board.owner_id`
/// against the acting principal. The board list is cached per user under
/// `boards_user_<id>`; board writes invalidate it, and a board delete also
/// invalidates the task list because the cascade removes the board's tasks.

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, Cache};
use crate::models::board::{Board, CreateBoard};

use super::{ResourceError, Sourced};

/// Input for creating or retitling a board
#[derive(Debug, Clone)]
pub struct BoardInput {
    /// Board title
    pub title: String,
}

impl BoardInput {
    fn validated_title(self) -> Result<String, ResourceError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ResourceError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if title.len() > 150 {
            return Err(ResourceError::Validation(
                "title must be at most 150 characters".to_string(),
            ));
        }
        Ok(title)
    }
}

/// Lists the principal's boards, cache first
pub async fn list(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
) -> Result<Sourced<Vec<Board>>, ResourceError> {
    let key = keys::board_list(principal);

    if let Some(boards) = cache.get_json::<Vec<Board>>(&key).await {
        return Ok(Sourced::cached(boards));
    }

    let boards = Board::list_by_owner(db, principal).await?;
    cache.put_json(&key, &boards).await;

    Ok(Sourced::fresh(boards))
}

/// Fetches one board through the ownership gate
pub async fn get(db: &PgPool, principal: Uuid, id: Uuid) -> Result<Board, ResourceError> {
    Board::find_by_id_and_owner(db, id, principal)
        .await?
        .ok_or(ResourceError::NotFound("Board"))
}

/// Creates a board owned by the principal
///
/// The owner always comes from the authenticated principal, never from the
/// payload.
pub async fn create(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    input: BoardInput,
) -> Result<Board, ResourceError> {
    let title = input.validated_title()?;

    let board = Board::create(
        db,
        CreateBoard {
            title,
            owner_id: principal,
        },
    )
    .await?;

    cache.invalidate(&[keys::board_list(principal)]).await;

    Ok(board)
}

/// Retitles a board the principal owns
pub async fn update(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    id: Uuid,
    input: BoardInput,
) -> Result<Board, ResourceError> {
    let title = input.validated_title()?;

    let board = get(db, principal, id).await?;

    let updated = Board::update_title(db, board.id, title)
        .await?
        .ok_or(ResourceError::NotFound("Board"))?;

    cache.invalidate(&[keys::board_list(principal)]).await;

    Ok(updated)
}

/// Deletes a board the principal owns
///
/// The persistence layer cascades the delete to the board's tasks, so the
/// principal's task list cache is invalidated alongside the board list even
/// though no task was touched directly.
pub async fn remove(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    id: Uuid,
) -> Result<(), ResourceError> {
    let board = get(db, principal, id).await?;

    Board::delete(db, board.id).await?;

    cache
        .invalidate(&[keys::board_list(principal), keys::task_list(principal)])
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert!(BoardInput {
            title: "Sprint 1".to_string()
        }
        .validated_title()
        .is_ok());

        assert!(matches!(
            BoardInput {
                title: "   ".to_string()
            }
            .validated_title(),
            Err(ResourceError::Validation(_))
        ));

        assert!(matches!(
            BoardInput {
                title: "x".repeat(151)
            }
            .validated_title(),
            Err(ResourceError::Validation(_))
        ));
    }

    #[test]
    fn test_title_is_trimmed() {
        let title = BoardInput {
            title: "  Sprint 1  ".to_string(),
        }
        .validated_title()
        .unwrap();
        assert_eq!(title, "Sprint 1");
    }
}
