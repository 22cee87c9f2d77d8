//! Public evaluation-result types: pure data, serializable, produced by
//! `ahb-condition-eval` and consumed by callers. Kept here so the eval
//! crate's internal types can depend on them without creating a cycle
//! back into the eval crate.

use crate::indicator::RequirementIndicator;
use serde::{Deserialize, Serialize};

/// Result of reducing one (indicator, tree) pair's requirement-constraint
/// side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementConstraintEvaluationResult {
    pub fulfilled: bool,
    pub is_conditional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_constraints_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<String>,
}

impl RequirementConstraintEvaluationResult {
    pub fn unconditional_true() -> Self {
        Self {
            fulfilled: true,
            is_conditional: false,
            format_constraints_expression: None,
            hints: None,
        }
    }
}

/// Result of evaluating the residual format-constraint expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConstraintEvaluationResult {
    pub fulfilled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl FormatConstraintEvaluationResult {
    pub fn vacuously_true() -> Self {
        Self {
            fulfilled: true,
            error_message: None,
        }
    }
}

/// The final, stitched-together result of evaluating a whole AHB
/// expression: one requirement indicator plus its requirement-constraint
/// and format-constraint results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhbExpressionEvaluationResult {
    pub requirement_indicator: RequirementIndicator,
    pub requirement_constraint: RequirementConstraintEvaluationResult,
    pub format_constraint: FormatConstraintEvaluationResult,
}
