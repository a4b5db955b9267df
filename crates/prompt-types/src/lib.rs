//! Foundation types and traits for the Prompt console.
//!
//! This crate contains the host-agnostic core types shared by all Prompt
//! crates: error types, the uniform result/paging model, per-request context,
//! and the localization and audit collaborator traits.

pub mod audit;
pub mod context;
pub mod error;
pub mod model;
pub mod strings;

pub use audit::{AuditLog, AuditRecord, LogAudit, MemoryAudit};
pub use context::{PortalContext, RequestContext, UserContext};
pub use error::{PromptError, Result};
pub use model::{
    ConsoleResult, ErrorEnvelope, PagingInfo, ResponseEnvelope, clamp_page_size, total_pages,
};
pub use strings::{StringCatalog, StringResources, format_with, localize};
