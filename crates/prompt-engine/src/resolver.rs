//! Command name resolution.
//!
//! Exact lookup first, then namespace inference for unambiguous bare names,
//! then a "did you mean" suggestion ranked by normalized Levenshtein
//! similarity. Suggestions below the usability threshold are suppressed so
//! distant matches never produce false-positive noise.

use crate::registry::{CommandDescriptor, CommandRegistry};

/// Minimum normalized similarity for a suggestion to be offered.
const SUGGESTION_THRESHOLD: f64 = 0.5;

/// Outcome of resolving the first token of an invocation.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Exactly one registered command matched.
    Resolved(&'a CommandDescriptor),
    /// Nothing matched; `suggestion` is the closest key when one clears
    /// the threshold.
    NotFound { suggestion: Option<String> },
}

/// Resolve a raw command name against the registry.
///
/// A name containing the namespace separator (`.`) is looked up exactly.
/// A bare name is first tried as a key, then inferred to a namespaced
/// command when exactly one registered command shares that bare name.
pub fn resolve<'a>(registry: &'a CommandRegistry, raw_name: &str) -> Resolution<'a> {
    let name = raw_name.to_ascii_uppercase();

    if let Some(descriptor) = registry.lookup(&name) {
        return Resolution::Resolved(descriptor);
    }

    if !name.contains('.') {
        let candidates = registry.all_by_bare_name(&name);
        if candidates.len() == 1 {
            return Resolution::Resolved(candidates[0]);
        }
    }

    Resolution::NotFound {
        suggestion: suggest(registry, &name),
    }
}

/// The closest registered command to `name`, if similar enough.
///
/// Both full keys and bare names are scored (users usually type bare names);
/// the suggestion is always reported as the full key, lowercased for
/// display. Ties keep the first candidate in sorted key order.
fn suggest(registry: &CommandRegistry, name: &str) -> Option<String> {
    let needle = name.to_ascii_lowercase();
    let mut best: Option<(f64, String)> = None;

    for descriptor in registry.all() {
        let key = descriptor.full_key().to_ascii_lowercase();
        let score = strsim::normalized_levenshtein(&needle, &key)
            .max(strsim::normalized_levenshtein(&needle, &descriptor.name));
        if score >= SUGGESTION_THRESHOLD
            && best.as_ref().is_none_or(|(top, _)| score > *top)
        {
            best = Some((score, key));
        }
    }

    best.map(|(_, key)| key)
}
