//! Selection parsing and activation.
//!
//! Turns an operator-supplied selection (exact names, `*` wildcard) into
//! flag flips on a registry. Unknown names are collected and logged, never
//! fatal; one bad name never blocks the valid ones in the same selection.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::registry::Registry;

/// Selection token matching every registered trace point.
pub const WILDCARD: &str = "*";

/// Outcome of applying a selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionReport {
    /// Number of flag writes performed.
    pub matched: usize,
    /// Tokens that matched no registered trace point, in selection order.
    pub unknown: Vec<String>,
}

impl SelectionReport {
    /// True when every token matched at least one trace point.
    pub fn fully_applied(&self) -> bool {
        self.unknown.is_empty()
    }
}

/// Activate every trace point named by the selection.
///
/// Tokens are exact names or [`WILDCARD`]. Activation is a monotonic OR
/// within one call, so token order never changes the final state and
/// re-applying the same selection is idempotent.
pub fn apply_selection<'a, I>(registry: &Registry, tokens: I) -> SelectionReport
where
    I: IntoIterator<Item = &'a str>,
{
    set_selection(registry, tokens, true)
}

/// Deactivate every trace point named by the selection.
///
/// Symmetric to [`apply_selection`], with identical matching semantics.
/// Not needed on the default hot path; exists for tooling that resets
/// activation state between runs.
pub fn clear_selection<'a, I>(registry: &Registry, tokens: I) -> SelectionReport
where
    I: IntoIterator<Item = &'a str>,
{
    set_selection(registry, tokens, false)
}

fn set_selection<'a, I>(registry: &Registry, tokens: I, active: bool) -> SelectionReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = SelectionReport::default();

    for token in tokens {
        if token == WILDCARD {
            report.matched += registry.set_all(active);
            continue;
        }

        match registry.lookup(token) {
            Some(handle) => {
                handle.set_active(active);
                report.matched += 1;
            }
            None => {
                warn!("unknown trace point in selection: {}", token);
                report.unknown.push(token.to_string());
            }
        }
    }

    debug!(
        "selection {} {} trace point flag(s), {} unknown name(s)",
        if active { "activated" } else { "deactivated" },
        report.matched,
        report.unknown.len()
    );
    report
}

/// Split an operator selection string into tokens.
///
/// Tokens are delimited by commas and/or ASCII whitespace; empty tokens
/// are skipped, so `"nvme_cq_spin, nvme_sq_post"` and
/// `"nvme_cq_spin nvme_sq_post"` parse the same.
pub fn split_spec(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}
