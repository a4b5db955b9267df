//! Prompt console entry point.
//!
//! A line-oriented administrative console over the dispatch engine: reads
//! commands from stdin, dispatches them against the registered command set,
//! and renders result envelopes as text tables. `list` shows the available
//! commands; `exit` quits.

mod config;
mod demo;
mod render;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use prompt_engine::{CommandRegistry, DispatchResponse, Dispatcher};
use prompt_types::{
    LogAudit, PortalContext, RequestContext, StringCatalog, StringResources, UserContext,
};
use prompt_users::{MemoryUserStore, UserStore, register_user_commands};

use config::ConsoleConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConsoleConfig::load(Path::new("prompt.toml"))?;
    log::info!(
        "Starting Prompt console (portal {} '{}')",
        config.portal_id,
        config.portal_name,
    );

    // Built-in English catalog; hosts swap in their own tables.
    let strings: Arc<dyn StringResources> =
        Arc::new(StringCatalog::from_toml(include_str!("../strings.toml"))?);

    // Demo user store.
    let store = MemoryUserStore::new();
    demo::populate_demo_users(&store, config.portal_id);
    let store: Arc<dyn UserStore> = Arc::new(store);

    // Build the command registry once; it is read-only from here on.
    let mut registry = CommandRegistry::new();
    register_user_commands(&mut registry, &store, &strings)?;
    log::info!("Registered {} commands", registry.len());

    let dispatcher = Dispatcher::new(Arc::new(registry), strings, Arc::new(LogAudit));

    let ctx = RequestContext {
        portal: PortalContext {
            portal_id: config.portal_id,
            portal_name: config.portal_name.clone(),
        },
        user: UserContext {
            user_id: 1,
            username: config.operator.clone(),
            is_superuser: true,
        },
        current_page: 0,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();

    loop {
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.eq_ignore_ascii_case("list") {
            println!("{}", render::render_summaries(&dispatcher.list()));
            continue;
        }

        match dispatcher.execute(line, &ctx) {
            DispatchResponse::Ok(envelope) => println!("{}", render::render_envelope(&envelope)),
            DispatchResponse::Help(help) => println!("{}", render::render_help(&help)),
            DispatchResponse::BadRequest(err) => println!("error: {}", err.message),
        }
    }

    Ok(())
}
