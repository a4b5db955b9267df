//! Per-request execution context passed to command handlers.
//!
//! The host builds one of these per dispatch; nothing here is retained by
//! the core across requests. Permission and authentication checks happen in
//! the host before dispatch, so the context carries identity but no
//! authorization state.

/// The portal (site) a command runs against.
#[derive(Debug, Clone, Default)]
pub struct PortalContext {
    pub portal_id: i32,
    pub portal_name: String,
}

/// The user issuing the command.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: i32,
    pub username: String,
    /// Superusers see host-level data in some commands.
    pub is_superuser: bool,
}

/// Everything a handler's `init` receives besides the raw arguments.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub portal: PortalContext,
    pub user: UserContext,
    /// The page the console UI is currently showing (for relative paging).
    pub current_page: i32,
}

impl RequestContext {
    /// A context for the given portal with an anonymous operator.
    pub fn for_portal(portal_id: i32) -> Self {
        Self {
            portal: PortalContext {
                portal_id,
                portal_name: String::new(),
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_portal_sets_id_only() {
        let ctx = RequestContext::for_portal(7);
        assert_eq!(ctx.portal.portal_id, 7);
        assert_eq!(ctx.user.user_id, 0);
        assert_eq!(ctx.current_page, 0);
    }
}
