//! Per-run context (spec §5 "Shared state", §9 "Global registry").
//!
//! `EvaluatableData` is shared read-only across a whole run.
//! `EvaluationContext` is cheap to clone and may vary per leaf; the core
//! never mutates it, it only threads it down to content-evaluator calls.

use ahb_condition_core::{key, Tree};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The classification a leaf is visited under (spec §3's key taxonomy).
pub type LeafKind = ahb_condition_core::KeyKind;

/// One step down a binary tree during a pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Left,
    Right,
}

/// The position of a leaf within its tree, recorded as the sequence of
/// left/right steps taken from the root. Handed to the `on_visit` hook
/// so a caller can tell which leaf is being reported (spec §5
/// "Ordering... for side-effect purposes (logging)").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Step>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn child(&self, step: Step) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Path(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", if *step == Step::Left { "L" } else { "R" })?;
        }
        Ok(())
    }
}

/// A path into the edifact seed identifying the sub-message an
/// evaluation refers to (spec GLOSSARY "Scope"). Opaque to the core —
/// content evaluators interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scope(String);

impl Scope {
    pub fn root() -> Self {
        Scope(String::new())
    }

    pub fn new(path: impl Into<String>) -> Self {
        Scope(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What gets passed to every content-evaluator call: the current
/// [`Scope`], the per-run entered-text channel the FC evaluator needs
/// (spec §5 "Per-run ambient state"), and the cancellation token.
///
/// Passed by value and never mutated by the core — a leaf may derive a
/// narrower scope for a nested call but always returns to its caller's
/// context afterward.
#[derive(Clone)]
pub struct EvaluationContext {
    pub scope: Scope,
    entered_text: Option<Arc<str>>,
    cancellation: CancellationToken,
    on_visit: Option<Arc<dyn Fn(&Path, LeafKind) + Send + Sync>>,
}

impl EvaluationContext {
    pub fn new(cancellation: CancellationToken) -> Self {
        EvaluationContext {
            scope: Scope::root(),
            entered_text: None,
            cancellation,
            on_visit: None,
        }
    }

    pub fn with_scope(&self, scope: Scope) -> Self {
        EvaluationContext {
            scope,
            ..self.clone()
        }
    }

    pub fn with_entered_text(&self, text: impl Into<Arc<str>>) -> Self {
        EvaluationContext {
            entered_text: Some(text.into()),
            ..self.clone()
        }
    }

    /// Registers a hook the core calls, once per leaf and in the tree's
    /// pre-order, so a caller can wire its own logging (spec §5
    /// "Ordering... for side-effect purposes (logging)"). Visitation
    /// happens as a synchronous walk ahead of the concurrent reduction
    /// (see [`Self::visit_leaves_pre_order`]), so the hook's call order
    /// stays deterministic regardless of which sibling's async work
    /// happens to finish first.
    pub fn with_on_visit(&self, hook: impl Fn(&Path, LeafKind) + Send + Sync + 'static) -> Self {
        EvaluationContext {
            on_visit: Some(Arc::new(hook)),
            ..self.clone()
        }
    }

    /// The user-entered text for the field under evaluation, if any was
    /// supplied for this run (needed by the FC evaluator, spec §5).
    pub fn entered_text(&self) -> Option<&str> {
        self.entered_text.as_deref()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn visit(&self, path: &Path, kind: LeafKind) {
        if let Some(hook) = &self.on_visit {
            hook(path, kind);
        }
    }

    /// Walks `tree` in pre-order, reporting every leaf to the `on_visit`
    /// hook (if one is registered) before any content-evaluator call
    /// runs. A no-op when no hook is registered, so callers that don't
    /// need logging pay nothing beyond the tree walk.
    pub fn visit_leaves_pre_order(&self, tree: &Tree) {
        if self.on_visit.is_none() {
            return;
        }
        fn walk(ctx: &EvaluationContext, tree: &Tree, path: Path) {
            match tree {
                Tree::Leaf(key) => ctx.visit(&path, key::classify(key)),
                Tree::Composition { left, right, .. } => {
                    walk(ctx, left, path.child(Step::Left));
                    walk(ctx, right, path.child(Step::Right));
                }
            }
        }
        walk(self, tree, Path::root());
    }
}

/// The edifact seed (spec GLOSSARY): a JSON representation of an
/// EDIFACT message, used as per-run input data. The core treats this as
/// an opaque, immutable blob — it never inspects it, only threads a
/// reference through to content-evaluator calls, which interpret it
/// however their `(edifact_format, format_version)` pair requires.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatableData(serde_json::Value);

impl EvaluatableData {
    pub fn new(seed: serde_json::Value) -> Self {
        EvaluatableData(seed)
    }

    pub fn seed(&self) -> &serde_json::Value {
        &self.0
    }
}

/// A cooperative cancellation signal (spec §5 "Cancellation"). Plain
/// `Arc<AtomicBool>` rather than a runtime-specific primitive, so this
/// crate stays usable under any async executor.
#[derive(Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), crate::error::Error> {
        if self.is_cancelled() {
            Err(crate::error::Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn cancellation_is_observed_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(token.check().is_err());
    }

    #[test]
    fn context_scope_override_does_not_touch_entered_text() {
        let ctx = EvaluationContext::new(CancellationToken::new()).with_entered_text("hello");
        let nested = ctx.with_scope(Scope::new("/a/b"));
        assert_eq!(nested.scope.as_str(), "/a/b");
        assert_eq!(nested.entered_text(), Some("hello"));
    }

    #[test]
    fn visit_leaves_pre_order_reports_every_leaf_in_order() {
        use std::sync::Mutex;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);
        let ctx = EvaluationContext::new(CancellationToken::new())
            .with_on_visit(move |path, kind| recorded.lock().unwrap().push((path.to_string(), kind)));

        let tree = Tree::and(Tree::leaf("1"), Tree::or(Tree::leaf("2"), Tree::leaf("901")));
        ctx.visit_leaves_pre_order(&tree);

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>(),
            vec!["L", "R.L", "R.R"]
        );
        assert_eq!(seen[2].1, LeafKind::FormatConstraint);
    }

    #[test]
    fn visit_leaves_pre_order_is_a_no_op_without_a_hook() {
        let ctx = EvaluationContext::new(CancellationToken::new());
        ctx.visit_leaves_pre_order(&Tree::leaf("1"));
    }
}
