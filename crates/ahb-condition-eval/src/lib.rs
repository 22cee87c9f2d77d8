//! Package expansion, the multi-valued algebra, and the three
//! evaluators (C7/C8/C9) that turn a parsed AHB expression plus
//! externally-supplied content evaluators into a final result.
//!
//! `ahb-condition-core` owns the data; `ahb-condition-parser` turns
//! strings into that data; this crate is where the data gets acted on.

mod ahb_eval;
mod algebra;
mod categorize;
mod context;
mod dispatch;
mod error;
mod expand;
mod fc_eval;
mod rc_eval;
mod registry;
mod traits;

pub use ahb_eval::{evaluate_ahb_string, evaluate_pairs};
pub use algebra::Reduction;
pub use categorize::{extract as extract_key_sets, KeySets};
pub use context::{CancellationToken, EvaluatableData, EvaluationContext, LeafKind, Path, Scope, Step};
pub use dispatch::{TableFcEvaluator, TableRcEvaluator};
pub use error::Error;
pub use expand::expand as expand_packages;
pub use fc_eval::evaluate as evaluate_format_constraint;
pub use rc_eval::evaluate as evaluate_requirement_constraint;
pub use registry::{
    global_registry, set_global_registry, EdifactFormat, FormatVersion, LogicBundle, Registry,
    RegistryBuilder,
};
pub use traits::{FcEvaluator, FcLeafResult, HintsProvider, PackageResolver, RcEvaluator};
