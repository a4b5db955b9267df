//! User administration commands.
//!
//! Each command binds its flags from the declared schema, validates in
//! `init` (setting validation state rather than erroring), and reads the
//! portal's users through the [`UserStore`] collaborator in `run`.

use std::sync::Arc;

use prompt_engine::{
    BoundArguments, CommandDescriptor, CommandRegistry, ConsoleCommand, FlagDescriptor,
    ValidationState,
};
use prompt_types::{
    ConsoleResult, RequestContext, Result, StringResources, clamp_page_size, format_with, localize,
};

use crate::store::{UserRecord, UserStore};

/// Resource file holding the user commands' strings.
const USERS_RESOURCE_FILE: &str = "Users";

const FLAG_EMAIL: &str = "email";
const FLAG_USERNAME: &str = "username";
const FLAG_ROLE: &str = "role";
const FLAG_PAGE: &str = "page";
const FLAG_MAX: &str = "max";
const FLAG_ID: &str = "id";

/// Register all user commands into a registry.
pub fn register_user_commands(
    registry: &mut CommandRegistry,
    store: &Arc<dyn UserStore>,
    strings: &Arc<dyn StringResources>,
) -> Result<()> {
    registry.register(list_users_descriptor(store, strings))?;
    registry.register(get_user_descriptor(store, strings))?;
    registry.register(purge_user_descriptor(store, strings))?;
    Ok(())
}

fn to_rows(users: &[UserRecord]) -> Result<Vec<serde_json::Value>> {
    users
        .iter()
        .map(|u| serde_json::to_value(u).map_err(Into::into))
        .collect()
}

/// Search terms accept `%` and `*` wildcards in the console; the store
/// matches substrings, so they are stripped before the query.
fn strip_wildcards(term: &str) -> String {
    term.replace(['%', '*'], "")
}

// ---------------------------------------------------------------------------
// list-users
// ---------------------------------------------------------------------------

fn list_users_flags() -> Vec<FlagDescriptor> {
    vec![
        FlagDescriptor::text(FLAG_EMAIL, "Prompt_ListUsers_FlagEmail"),
        FlagDescriptor::text(FLAG_USERNAME, "Prompt_ListUsers_FlagUsername"),
        FlagDescriptor::text(FLAG_ROLE, "Prompt_ListUsers_FlagRole"),
        FlagDescriptor::integer(FLAG_PAGE, "Prompt_ListUsers_FlagPage").with_default("1"),
        FlagDescriptor::integer(FLAG_MAX, "Prompt_ListUsers_FlagMax").with_default("10"),
    ]
}

fn list_users_descriptor(
    store: &Arc<dyn UserStore>,
    strings: &Arc<dyn StringResources>,
) -> CommandDescriptor {
    let store = Arc::clone(store);
    let strings = Arc::clone(strings);
    let mut descriptor = CommandDescriptor::new(
        "users",
        "list-users",
        "Prompt_ListUsers_Description",
        USERS_RESOURCE_FILE,
        Box::new(move || {
            Ok(Box::new(ListUsersCmd::new(
                Arc::clone(&store),
                Arc::clone(&strings),
            )))
        }),
    );
    for flag in list_users_flags() {
        descriptor = descriptor.flag(flag);
    }
    descriptor
}

/// Lists portal users filtered by email, username, or role.
pub struct ListUsersCmd {
    store: Arc<dyn UserStore>,
    strings: Arc<dyn StringResources>,
    state: ValidationState,
    portal_id: i32,
    email: String,
    username: String,
    role: String,
    page: i32,
    max: i32,
}

impl ListUsersCmd {
    fn new(store: Arc<dyn UserStore>, strings: Arc<dyn StringResources>) -> Self {
        Self {
            store,
            strings,
            state: ValidationState::new(),
            portal_id: 0,
            email: String::new(),
            username: String::new(),
            role: String::new(),
            page: 1,
            max: 10,
        }
    }

    fn localize(&self, key: &str) -> String {
        localize(self.strings.as_ref(), key, USERS_RESOURCE_FILE)
    }
}

impl ConsoleCommand for ListUsersCmd {
    fn init(&mut self, args: &[String], ctx: &RequestContext) {
        self.portal_id = ctx.portal.portal_id;
        let bound = BoundArguments::bind(&list_users_flags(), args);
        self.email = bound.string(FLAG_EMAIL);
        self.username = bound.string(FLAG_USERNAME);
        self.role = bound.string(FLAG_ROLE);
        self.page = bound.integer(FLAG_PAGE);
        self.max = bound.integer(FLAG_MAX);

        // Accepted shapes: bare invocation, paging flags only, or exactly
        // one filter. A single unflagged value is interpreted as an email
        // when it contains '@', a username otherwise.
        let n = args.len();
        let paging_only = (n == 3 && (bound.has_flag(FLAG_PAGE) || bound.has_flag(FLAG_MAX)))
            || (n == 5 && bound.has_flag(FLAG_PAGE) && bound.has_flag(FLAG_MAX));
        if n != 1 && !paging_only {
            if let Some(value) = bound.positional() {
                if value.contains('@') {
                    self.email = value.to_string();
                } else {
                    self.username = value.to_string();
                }
            } else {
                let filters = [&self.email, &self.username, &self.role]
                    .into_iter()
                    .filter(|v| !v.is_empty())
                    .count();
                if filters != 1 {
                    self.state.add_message(format_with(
                        &self.localize("Prompt_OnlyOneFlagRequired"),
                        &[FLAG_EMAIL, FLAG_USERNAME, FLAG_ROLE],
                    ));
                }
            }
        }
    }

    fn run(&mut self) -> Result<ConsoleResult> {
        let max = clamp_page_size(self.max);
        let page_index = if self.page > 0 { self.page - 1 } else { 0 };

        let (users, total) = if !self.role.is_empty() {
            // Exact role match only; a missing role is reported as an
            // error result, not a dispatch failure.
            match self
                .store
                .users_in_role(self.portal_id, &self.role, page_index, max)
            {
                Ok(found) => found,
                Err(e) => return Ok(ConsoleResult::error(e.to_string())),
            }
        } else {
            let term = if !self.username.is_empty() {
                Some(strip_wildcards(&self.username))
            } else if !self.email.is_empty() {
                Some(strip_wildcards(&self.email))
            } else {
                None
            };
            self.store
                .search(self.portal_id, term.as_deref(), page_index, max)?
        };

        Ok(ConsoleResult::paged(
            to_rows(&users)?,
            total as i32,
            self.page,
            self.max,
            self.localize("Prompt_ListUsersOutput"),
            self.localize("noUsers"),
        ))
    }

    fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    fn validation_message(&self) -> &str {
        self.state.message()
    }

    fn local_resource_file(&self) -> &str {
        USERS_RESOURCE_FILE
    }
}

// ---------------------------------------------------------------------------
// get-user
// ---------------------------------------------------------------------------

fn get_user_flags() -> Vec<FlagDescriptor> {
    vec![
        FlagDescriptor::integer(FLAG_ID, "Prompt_GetUser_FlagId"),
        FlagDescriptor::text(FLAG_EMAIL, "Prompt_GetUser_FlagEmail"),
        FlagDescriptor::text(FLAG_USERNAME, "Prompt_GetUser_FlagUsername"),
    ]
}

fn get_user_descriptor(
    store: &Arc<dyn UserStore>,
    strings: &Arc<dyn StringResources>,
) -> CommandDescriptor {
    let store = Arc::clone(store);
    let strings = Arc::clone(strings);
    let mut descriptor = CommandDescriptor::new(
        "users",
        "get-user",
        "Prompt_GetUser_Description",
        USERS_RESOURCE_FILE,
        Box::new(move || {
            Ok(Box::new(GetUserCmd::new(
                Arc::clone(&store),
                Arc::clone(&strings),
            )))
        }),
    );
    for flag in get_user_flags() {
        descriptor = descriptor.flag(flag);
    }
    descriptor
}

/// Fetches a single user by id, email, or username.
pub struct GetUserCmd {
    store: Arc<dyn UserStore>,
    strings: Arc<dyn StringResources>,
    state: ValidationState,
    portal_id: i32,
    user_id: i32,
    email: String,
    username: String,
}

impl GetUserCmd {
    fn new(store: Arc<dyn UserStore>, strings: Arc<dyn StringResources>) -> Self {
        Self {
            store,
            strings,
            state: ValidationState::new(),
            portal_id: 0,
            user_id: 0,
            email: String::new(),
            username: String::new(),
        }
    }

    fn localize(&self, key: &str) -> String {
        localize(self.strings.as_ref(), key, USERS_RESOURCE_FILE)
    }

    fn single(&self, user: &UserRecord) -> Result<ConsoleResult> {
        Ok(ConsoleResult {
            data: vec![serde_json::to_value(user)?],
            paging_info: None,
            records: 1,
            output: self.localize("Prompt_GetUserOutput"),
            is_error: false,
        })
    }
}

impl ConsoleCommand for GetUserCmd {
    fn init(&mut self, args: &[String], ctx: &RequestContext) {
        self.portal_id = ctx.portal.portal_id;
        let bound = BoundArguments::bind(&get_user_flags(), args);
        self.user_id = bound.integer(FLAG_ID);
        self.email = bound.string(FLAG_EMAIL);
        self.username = bound.string(FLAG_USERNAME);

        // A single unflagged value: digits mean a user id, '@' an email,
        // anything else a username.
        if let Some(value) = bound.positional() {
            if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
                self.user_id = value.parse().unwrap_or(0);
            } else if value.contains('@') {
                self.email = value.to_string();
            } else {
                self.username = value.to_string();
            }
        }

        let identifiers = usize::from(self.user_id > 0)
            + usize::from(!self.email.is_empty())
            + usize::from(!self.username.is_empty());
        if identifiers != 1 {
            self.state.add_message(format_with(
                &self.localize("Prompt_OnlyOneFlagRequired"),
                &[FLAG_ID, FLAG_EMAIL, FLAG_USERNAME],
            ));
        }
    }

    fn run(&mut self) -> Result<ConsoleResult> {
        if self.user_id > 0 {
            return match self.store.find(self.portal_id, self.user_id)? {
                Some(user) => self.single(&user),
                None => Ok(ConsoleResult::error(self.localize("userNotFound"))),
            };
        }

        let (term, by_email) = if !self.email.is_empty() {
            (strip_wildcards(&self.email), true)
        } else {
            (strip_wildcards(&self.username), false)
        };
        let (candidates, _) = self.store.search(self.portal_id, Some(&term), 0, 500)?;
        let found = candidates.iter().find(|u| {
            if by_email {
                u.email.eq_ignore_ascii_case(&term)
            } else {
                u.username.eq_ignore_ascii_case(&term)
            }
        });
        match found {
            Some(user) => self.single(user),
            None => Ok(ConsoleResult::error(self.localize("userNotFound"))),
        }
    }

    fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    fn validation_message(&self) -> &str {
        self.state.message()
    }

    fn local_resource_file(&self) -> &str {
        USERS_RESOURCE_FILE
    }
}

// ---------------------------------------------------------------------------
// purge-user
// ---------------------------------------------------------------------------

fn purge_user_flags() -> Vec<FlagDescriptor> {
    vec![FlagDescriptor::integer(FLAG_ID, "Prompt_PurgeUser_FlagId")]
}

fn purge_user_descriptor(
    store: &Arc<dyn UserStore>,
    strings: &Arc<dyn StringResources>,
) -> CommandDescriptor {
    let store = Arc::clone(store);
    let strings = Arc::clone(strings);
    let mut descriptor = CommandDescriptor::new(
        "users",
        "purge-user",
        "Prompt_PurgeUser_Description",
        USERS_RESOURCE_FILE,
        Box::new(move || {
            Ok(Box::new(PurgeUserCmd::new(
                Arc::clone(&store),
                Arc::clone(&strings),
            )))
        }),
    );
    for flag in purge_user_flags() {
        descriptor = descriptor.flag(flag);
    }
    descriptor
}

/// Permanently removes a soft-deleted user.
pub struct PurgeUserCmd {
    store: Arc<dyn UserStore>,
    strings: Arc<dyn StringResources>,
    state: ValidationState,
    portal_id: i32,
    user_id: i32,
}

impl PurgeUserCmd {
    fn new(store: Arc<dyn UserStore>, strings: Arc<dyn StringResources>) -> Self {
        Self {
            store,
            strings,
            state: ValidationState::new(),
            portal_id: 0,
            user_id: 0,
        }
    }

    fn localize(&self, key: &str) -> String {
        localize(self.strings.as_ref(), key, USERS_RESOURCE_FILE)
    }
}

impl ConsoleCommand for PurgeUserCmd {
    fn init(&mut self, args: &[String], ctx: &RequestContext) {
        self.portal_id = ctx.portal.portal_id;
        let bound = BoundArguments::bind(&purge_user_flags(), args);
        self.user_id = bound.integer(FLAG_ID);

        if let Some(value) = bound.positional()
            && !value.is_empty()
            && value.chars().all(|c| c.is_ascii_digit())
        {
            self.user_id = value.parse().unwrap_or(0);
        }

        if self.user_id <= 0 {
            self.state.add_message(format_with(
                &self.localize("Prompt_FlagRequired"),
                &[FLAG_ID],
            ));
        }
    }

    fn run(&mut self) -> Result<ConsoleResult> {
        match self.store.purge(self.portal_id, self.user_id) {
            Ok(true) => Ok(ConsoleResult::message(format_with(
                &self.localize("userPurged"),
                &[&self.user_id.to_string()],
            ))),
            Ok(false) => Ok(ConsoleResult::error(self.localize("userNotDeleted"))),
            Err(e) => Ok(ConsoleResult::error(e.to_string())),
        }
    }

    fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    fn validation_message(&self) -> &str {
        self.state.message()
    }

    fn local_resource_file(&self) -> &str {
        USERS_RESOURCE_FILE
    }
}
