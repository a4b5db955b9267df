//! Dispatch orchestration: resolution, binding, validation, execution,
//! help short-circuiting, and result shaping.
//!
//! Every dispatch attempt that reaches a terminal state other than a help
//! rendering emits exactly one audit record with elapsed wall-clock time.
//! The dispatcher holds only shared read-only collaborators, so one
//! instance serves concurrent requests without locking.

use std::sync::Arc;
use std::time::Instant;

use prompt_types::{
    AuditLog, AuditRecord, ErrorEnvelope, RequestContext, ResponseEnvelope, StringResources,
    format_with, localize,
};

use crate::binder::tokenize;
use crate::command::ConsoleCommand;
use crate::help::{
    CommandHelp, ENGINE_RESOURCE_FILE, render_command_help, render_learn_help, render_syntax_help,
};
use crate::registry::{CommandRegistry, CommandSummary};
use crate::resolver::{Resolution, resolve};

/// Terminal outcome of one dispatch.
#[derive(Debug)]
pub enum DispatchResponse {
    /// The handler ran and produced a result envelope (which may carry an
    /// error-flavored result; the transport status is still success).
    Ok(ResponseEnvelope),
    /// A help rendering, produced without running any handler.
    Help(CommandHelp),
    /// 400-equivalent: unknown command, invalid input, or a failed handler.
    BadRequest(ErrorEnvelope),
}

/// Orchestrates one dispatch call per inbound command line.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    strings: Arc<dyn StringResources>,
    audit: Arc<dyn AuditLog>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        strings: Arc<dyn StringResources>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            registry,
            strings,
            audit,
        }
    }

    /// The registry snapshot this dispatcher serves.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Transport `List()`: summaries of every registered command.
    pub fn list(&self) -> Vec<CommandSummary> {
        self.registry.summaries(self.strings.as_ref())
    }

    /// Transport `Execute()`: run one command line to a terminal outcome.
    pub fn execute(&self, command_line: &str, ctx: &RequestContext) -> DispatchResponse {
        let started = Instant::now();

        let tokens = match tokenize(command_line) {
            Ok(tokens) => tokens,
            Err(e) => return self.finish_error(command_line, started, None, e.to_string()),
        };

        let Some(first) = tokens.first() else {
            let message = self.not_found_message("", None);
            return self.finish_error(command_line, started, None, message);
        };

        let is_help = first.eq_ignore_ascii_case("help");
        if is_help {
            // HELP SYNTAX / HELP LEARN render from the registry alone and,
            // like all help renderings, are not audited.
            match tokens.get(1).map(|t| t.to_ascii_uppercase()).as_deref() {
                Some("SYNTAX") => {
                    return DispatchResponse::Help(render_syntax_help(self.strings.as_ref()));
                },
                Some("LEARN") => {
                    return DispatchResponse::Help(render_learn_help(self.strings.as_ref()));
                },
                None => {
                    let message = self.not_found_message("", None);
                    return self.finish_error(command_line, started, None, message);
                },
                Some(_) => {},
            }
        }

        let target = if is_help { &tokens[1] } else { first };

        let descriptor = match resolve(&self.registry, target) {
            Resolution::Resolved(descriptor) => descriptor,
            Resolution::NotFound { suggestion } => {
                let message = self.not_found_message(target, suggestion.as_deref());
                return self.finish_error(command_line, started, None, message);
            },
        };

        let key = descriptor.full_key();
        let mut handler = match descriptor.instantiate() {
            Ok(handler) => handler,
            Err(e) => {
                log::error!("instantiating {key} failed: {e}");
                return self.finish_error(command_line, started, Some(&key), e.to_string());
            },
        };

        if is_help {
            // The handler is instantiated only for its resource file; init
            // and run are never called in help mode.
            return DispatchResponse::Help(render_command_help(
                descriptor,
                handler.local_resource_file(),
                self.strings.as_ref(),
            ));
        }

        handler.init(&tokens, ctx);
        self.finish(command_line, started, &key, handler)
    }

    /// Run a validated handler and map its outcome, logging the attempt.
    fn finish(
        &self,
        command_line: &str,
        started: Instant,
        type_name: &str,
        mut handler: Box<dyn ConsoleCommand>,
    ) -> DispatchResponse {
        let mut record = AuditRecord::new();
        record.property("Command", command_line);
        record.property("IsValid", handler.is_valid().to_string());
        record.property("TypeName", type_name);

        let response = if handler.is_valid() {
            match handler.run() {
                Ok(result) => {
                    record.property("RecordsAffected", result.records.to_string());
                    record.property("Output", &result.output);
                    DispatchResponse::Ok(ResponseEnvelope::from(result))
                },
                Err(e) => {
                    log::error!("{type_name} failed: {e}");
                    record.exception = Some(e.to_string());
                    DispatchResponse::BadRequest(ErrorEnvelope::bad_request(e.to_string()))
                },
            }
        } else {
            let message = if handler.validation_message().is_empty() {
                localize(self.strings.as_ref(), "CommandError", ENGINE_RESOURCE_FILE)
            } else {
                handler.validation_message().to_string()
            };
            record.property("Output", &message);
            DispatchResponse::BadRequest(ErrorEnvelope::bad_request(message))
        };

        self.log_elapsed(record, started);
        response
    }

    /// Terminal failure before any handler ran.
    fn finish_error(
        &self,
        command_line: &str,
        started: Instant,
        type_name: Option<&str>,
        message: String,
    ) -> DispatchResponse {
        let mut record = AuditRecord::new();
        record.property("Command", command_line);
        record.property("IsValid", "false");
        if let Some(type_name) = type_name {
            record.property("TypeName", type_name);
        }
        record.property("Output", &message);
        self.log_elapsed(record, started);
        DispatchResponse::BadRequest(ErrorEnvelope::bad_request(message))
    }

    fn log_elapsed(&self, mut record: AuditRecord, started: Instant) {
        record.property(
            "ExecutionTime",
            format!("{:.6}s", started.elapsed().as_secs_f64()),
        );
        self.audit.add(record);
    }

    /// Localized not-found message, with a "did you mean" suffix when a
    /// suggestion cleared the similarity threshold.
    fn not_found_message(&self, name: &str, suggestion: Option<&str>) -> String {
        let strings = self.strings.as_ref();
        let mut message = format_with(
            &localize(strings, "CommandNotFound", ENGINE_RESOURCE_FILE),
            &[&name.to_ascii_lowercase()],
        );
        if let Some(suggestion) = suggestion {
            message.push_str(&format_with(
                &localize(strings, "DidYouMean", ENGINE_RESOURCE_FILE),
                &[suggestion],
            ));
        }
        message
    }
}
