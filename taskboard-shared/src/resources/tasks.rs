/// Task resource operations
///
/// Tasks are transitively owned through their board, so every gate here runs
/// the single joined query in [`Task::find_by_id_and_owner`]. Because the
/// payload carries the board foreign key, creation and board moves re-verify
/// the referenced board against the principal before anything is persisted.
///
/// Task writes invalidate both the task list and the board list for the
/// principal. The dual invalidation is deliberate: the board view aggregates
/// its tasks, and a stale aggregate is worse than an extra cache rebuild.

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, Cache};
use crate::models::task::{CreateTask, Task, TaskStatus};

use super::{ResourceError, Sourced};

/// Input for creating a task
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Workflow status; `None` means the default ("todo")
    pub status: Option<String>,

    /// Board to create the task on
    pub board_id: Uuid,
}

/// Input for updating a task
#[derive(Debug, Clone)]
pub struct TaskUpdate {
    /// New title
    pub title: String,

    /// New description
    pub description: String,

    /// New status; `None` keeps the current one
    pub status: Option<String>,

    /// Target board; `None` keeps the current one. A different board is an
    /// explicit move and gets its own ownership check.
    pub board_id: Option<Uuid>,
}

fn validated_title(title: &str) -> Result<String, ResourceError> {
    let title = title.trim().to_string();
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

fn parse_status(status: Option<&str>, fallback: TaskStatus) -> Result<TaskStatus, ResourceError> {
    match status {
        None | Some("") => Ok(fallback),
        Some(s) => TaskStatus::parse(s).ok_or_else(|| {
            ResourceError::Validation(format!(
                "unknown status '{}', expected todo, in-progress or done",
                s
            ))
        }),
    }
}

/// Lists every task on the principal's boards, cache first
pub async fn list(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
) -> Result<Sourced<Vec<Task>>, ResourceError> {
    let key = keys::task_list(principal);

    if let Some(tasks) = cache.get_json::<Vec<Task>>(&key).await {
        return Ok(Sourced::cached(tasks));
    }

    let tasks = Task::list_by_owner(db, principal).await?;
    cache.put_json(&key, &tasks).await;

    Ok(Sourced::fresh(tasks))
}

/// Fetches one task through the transitive ownership gate, cache first
///
/// The single-task key embeds the principal id, so a cache hit can only ever
/// return an entry this principal populated.
pub async fn get(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    id: Uuid,
) -> Result<Sourced<Task>, ResourceError> {
    let key = keys::task_item(principal, id);

    if let Some(task) = cache.get_json::<Task>(&key).await {
        return Ok(Sourced::cached(task));
    }

    let task = Task::find_by_id_and_owner(db, id, principal)
        .await?
        .ok_or(ResourceError::NotFound("Task"))?;

    cache.put_json(&key, &task).await;

    Ok(Sourced::fresh(task))
}

/// Creates a task on a board the principal owns
///
/// The board check is mandatory and happens before the insert: the payload
/// controls the foreign key, so without it any principal could attach tasks
/// to any board. On failure nothing is persisted.
pub async fn create(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    input: NewTask,
) -> Result<Task, ResourceError> {
    let title = validated_title(&input.title)?;
    let status = parse_status(input.status.as_deref(), TaskStatus::Todo)?;

    super::boards::get(db, principal, input.board_id).await?;

    let task = Task::create(
        db,
        CreateTask {
            title,
            description: input.description,
            status,
            board_id: input.board_id,
        },
    )
    .await?;

    cache
        .invalidate(&[keys::board_list(principal), keys::task_list(principal)])
        .await;

    Ok(task)
}

/// Rewrites a task the principal owns
///
/// Moving the task to another board requires that board to pass its own
/// ownership check first; otherwise the update is rejected and the task
/// stays where it is.
pub async fn update(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    id: Uuid,
    input: TaskUpdate,
) -> Result<Task, ResourceError> {
    let title = validated_title(&input.title)?;

    let task = Task::find_by_id_and_owner(db, id, principal)
        .await?
        .ok_or(ResourceError::NotFound("Task"))?;

    let current_status = TaskStatus::parse(&task.status).unwrap_or_default();
    let status = parse_status(input.status.as_deref(), current_status)?;

    let board_id = match input.board_id {
        Some(target) if target != task.board_id => {
            super::boards::get(db, principal, target).await?;
            target
        }
        Some(target) => target,
        None => task.board_id,
    };

    let updated = Task::update(db, task.id, title, input.description, status, board_id)
        .await?
        .ok_or(ResourceError::NotFound("Task"))?;

    cache
        .invalidate(&[
            keys::board_list(principal),
            keys::task_list(principal),
            keys::task_item(principal, id),
        ])
        .await;

    Ok(updated)
}

/// Deletes a task the principal owns
pub async fn remove(
    db: &PgPool,
    cache: &Cache,
    principal: Uuid,
    id: Uuid,
) -> Result<(), ResourceError> {
    let task = Task::find_by_id_and_owner(db, id, principal)
        .await?
        .ok_or(ResourceError::NotFound("Task"))?;

    Task::delete(db, task.id).await?;

    cache
        .invalidate(&[
            keys::board_list(principal),
            keys::task_list(principal),
            keys::task_item(principal, id),
        ])
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_defaults() {
        assert_eq!(
            parse_status(None, TaskStatus::Todo).unwrap(),
            TaskStatus::Todo
        );
        assert_eq!(
            parse_status(Some(""), TaskStatus::Done).unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_parse_status_accepts_fixed_set() {
        assert_eq!(
            parse_status(Some("in-progress"), TaskStatus::Todo).unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            parse_status(Some("done"), TaskStatus::Todo).unwrap(),
            TaskStatus::Done
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown() {
        assert!(matches!(
            parse_status(Some("archived"), TaskStatus::Todo),
            Err(ResourceError::Validation(_))
        ));
    }

    #[test]
    fn test_title_validation() {
        assert!(validated_title("Write spec").is_ok());
        assert!(matches!(
            validated_title(""),
            Err(ResourceError::Validation(_))
        ));
        assert!(matches!(
            validated_title(&"x".repeat(151)),
            Err(ResourceError::Validation(_))
        ));
    }
}
