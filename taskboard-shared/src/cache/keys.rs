/// Cache key scheme
///
/// Keys are persisted in Redis and inspected out-of-band by operational
/// tooling, so the formats here are a wire contract: change them and every
/// existing entry silently becomes unreachable (which reads as a permanent
/// miss, not corruption, but defeats the cache).
///
/// Per-user list entries are scoped by owner id; the account listing is the
/// one global, unscoped entry.

use std::time::Duration;
use uuid::Uuid;

/// TTL for cached lists. Staleness windows beyond explicit invalidation are
/// bounded by this.
pub const LIST_TTL: Duration = Duration::from_secs(3600);

/// Global key for the full account listing. Not principal-scoped; must be
/// invalidated on any account create/update/delete.
pub const USER_LIST_KEY: &str = "users";

/// Key for a user's board list
pub fn board_list(owner_id: Uuid) -> String {
    format!("boards_user_{}", owner_id)
}

/// Key for a user's task list (tasks across all of their boards)
pub fn task_list(owner_id: Uuid) -> String {
    format!("tasks_user_{}", owner_id)
}

/// Key for a single task, scoped to its effective owner
pub fn task_item(owner_id: Uuid, task_id: Uuid) -> String {
    format!("task_user_{}_{}", owner_id, task_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats_are_exact() {
        let owner = Uuid::nil();
        let task = Uuid::max();

        assert_eq!(
            board_list(owner),
            "boards_user_00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            task_list(owner),
            "tasks_user_00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            task_item(owner, task),
            "task_user_00000000-0000-0000-0000-000000000000_ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        assert_eq!(USER_LIST_KEY, "users");
    }

    #[test]
    fn test_keys_are_principal_scoped() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_ne!(board_list(a), board_list(b));
        assert_ne!(task_list(a), task_list(b));
    }

    #[test]
    fn test_list_ttl_is_one_hour() {
        assert_eq!(LIST_TTL, Duration::from_secs(3600));
    }
}
