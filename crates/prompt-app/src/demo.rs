//! Demo user data for the interactive console.

use prompt_users::{MemoryUserStore, UserRecord};

/// Seed the store with a small set of demo users on the given portal.
pub fn populate_demo_users(store: &MemoryUserStore, portal_id: i32) {
    let users = [
        ("jdoe", "Jane Doe", "jane.doe@example.com", &["Admin"][..], false),
        ("bsmith", "Bob Smith", "bob.smith@example.com", &["Editor"], false),
        ("kchen", "Kay Chen", "kay.chen@example.com", &["Editor", "Reviewer"], false),
        ("mlopez", "Maria Lopez", "maria.lopez@example.com", &["Subscriber"], false),
        ("ghost", "Gone User", "gone@example.com", &[], true),
    ];

    for (i, (username, display, email, roles, deleted)) in users.into_iter().enumerate() {
        store.add_user(
            portal_id,
            UserRecord {
                user_id: i as i32 + 1,
                username: username.to_string(),
                display_name: display.to_string(),
                email: email.to_string(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
                last_login: None,
                is_deleted: deleted,
            },
        );
    }
}
