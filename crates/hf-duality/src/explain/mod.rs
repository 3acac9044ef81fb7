//! Deterministic explanations of duality outcomes.
//!
//! An explanation is the evaluator's result plus an ordered trace of the
//! steps that produced it. Classification itself is always delegated to
//! [`DualityRules::evaluate`]; this module only narrates it.

pub mod value;

pub use value::{StepData, StepValue, record_to_json};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DualityError, DualityResult};
use crate::outcome::{DualityRules, Outcome, OutcomeRequest, OutcomeResult};

/// Edition of the classification rules stamped on every explanation.
pub const RULES_VERSION: &str = "1.0.0";

/// Step code: Hope and Fear summed.
pub const STEP_SUM_DICE: &str = "SUM_DICE";
/// Step code: modifier applied to the dice total.
pub const STEP_APPLY_MODIFIER: &str = "APPLY_MODIFIER";
/// Step code: tie check.
pub const STEP_CHECK_CRIT: &str = "CHECK_CRIT";
/// Step code: comparison against the difficulty.
pub const STEP_CHECK_DIFFICULTY: &str = "CHECK_DIFFICULTY";
/// Step code: final classification.
pub const STEP_SELECT_OUTCOME: &str = "SELECT_OUTCOME";

/// Values computed on the way to the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intermediates {
    /// `hope + fear`.
    pub base_total: i64,
    /// `base_total + modifier`.
    pub total: i64,
    /// Hope and Fear tied.
    pub is_crit: bool,
    /// Result of the difficulty check, if there was one.
    pub meets_difficulty: Option<bool>,
    /// Hope rolled strictly higher.
    pub hope_gt_fear: bool,
    /// Fear rolled strictly higher.
    pub fear_gt_hope: bool,
}

/// One entry of the explanation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainStep {
    /// Stable code for programmatic consumers.
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Structured values behind the message.
    pub data: StepData,
}

impl ExplainStep {
    fn new(code: &str, message: String, data: Vec<(&'static str, StepValue)>) -> Self {
        Self {
            code: code.to_string(),
            message,
            data: data.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    /// Convert the payload to a JSON object for transports with dynamic values.
    pub fn data_json(&self) -> DualityResult<Map<String, Value>> {
        record_to_json(&self.data).map_err(|reason| DualityError::Encoding {
            code: self.code.clone(),
            reason,
        })
    }
}

/// An outcome together with the trace that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    /// The evaluated outcome.
    #[serde(flatten)]
    pub result: OutcomeResult,
    /// Edition of the rules that produced it.
    pub rules_version: String,
    /// Values computed along the way.
    pub intermediates: Intermediates,
    /// Ordered trace.
    pub steps: Vec<ExplainStep>,
}

impl ExplainResult {
    /// The classification.
    pub fn outcome(&self) -> Outcome {
        self.result.outcome
    }

    /// Convert every step's payload, failing the whole explanation if any
    /// step cannot be encoded.
    pub fn steps_json(&self) -> DualityResult<Vec<Map<String, Value>>> {
        self.steps.iter().map(ExplainStep::data_json).collect()
    }
}

impl DualityRules {
    /// Evaluate `request` and explain how the outcome was reached.
    pub fn explain(&self, request: &OutcomeRequest) -> DualityResult<ExplainResult> {
        let result = self.evaluate(request)?;

        let base_total = i64::from(result.hope) + i64::from(result.fear);
        let intermediates = Intermediates {
            base_total,
            total: result.total,
            is_crit: result.is_crit,
            meets_difficulty: result.meets_difficulty,
            hope_gt_fear: result.hope > result.fear,
            fear_gt_hope: result.fear > result.hope,
        };

        let mut steps = vec![
            ExplainStep::new(
                STEP_SUM_DICE,
                format!("Hope {} + Fear {} = {base_total}", result.hope, result.fear),
                vec![
                    ("hope", result.hope.into()),
                    ("fear", result.fear.into()),
                    ("base_total", base_total.into()),
                ],
            ),
            ExplainStep::new(
                STEP_APPLY_MODIFIER,
                format!(
                    "{base_total} {} {} = {}",
                    if result.modifier < 0 { '-' } else { '+' },
                    i64::from(result.modifier).abs(),
                    result.total
                ),
                vec![
                    ("base_total", base_total.into()),
                    ("modifier", result.modifier.into()),
                    ("total", result.total.into()),
                ],
            ),
            ExplainStep::new(
                STEP_CHECK_CRIT,
                if result.is_crit {
                    format!("Hope and Fear both show {}: critical", result.hope)
                } else {
                    "Hope and Fear differ: no critical".to_string()
                },
                vec![
                    ("hope", result.hope.into()),
                    ("fear", result.fear.into()),
                    ("is_crit", result.is_crit.into()),
                ],
            ),
        ];

        if let (Some(difficulty), Some(meets)) = (result.difficulty, result.meets_difficulty) {
            steps.push(ExplainStep::new(
                STEP_CHECK_DIFFICULTY,
                format!(
                    "Total {} {} difficulty {difficulty}",
                    result.total,
                    if meets { "meets" } else { "misses" }
                ),
                vec![
                    ("total", result.total.into()),
                    ("difficulty", difficulty.into()),
                    ("meets_difficulty", meets.into()),
                ],
            ));
        }

        let mut select: Vec<(&'static str, StepValue)> = vec![
            ("outcome", result.outcome.code().into()),
            ("is_crit", result.is_crit.into()),
            ("hope_gt_fear", intermediates.hope_gt_fear.into()),
            ("fear_gt_hope", intermediates.fear_gt_hope.into()),
        ];
        if let Some(meets) = result.meets_difficulty {
            select.push(("meets_difficulty", meets.into()));
        }
        steps.push(ExplainStep::new(
            STEP_SELECT_OUTCOME,
            format!("Outcome: {}", result.outcome),
            select,
        ));

        Ok(ExplainResult {
            result,
            rules_version: RULES_VERSION.to_string(),
            intermediates,
            steps,
        })
    }
}

/// Explain `request` under the default rules.
pub fn explain_outcome(request: &OutcomeRequest) -> DualityResult<ExplainResult> {
    DualityRules::default().explain(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(result: &ExplainResult) -> Vec<&str> {
        result.steps.iter().map(|s| s.code.as_str()).collect()
    }

    #[test]
    fn trace_with_difficulty() {
        let result = explain_outcome(&OutcomeRequest::new(10, 4).with_difficulty(12)).unwrap();
        assert_eq!(
            codes(&result),
            vec![
                STEP_SUM_DICE,
                STEP_APPLY_MODIFIER,
                STEP_CHECK_CRIT,
                STEP_CHECK_DIFFICULTY,
                STEP_SELECT_OUTCOME
            ]
        );
        assert_eq!(result.outcome(), Outcome::SuccessWithHope);
        assert_eq!(result.rules_version, RULES_VERSION);
        assert_eq!(
            result.intermediates,
            Intermediates {
                base_total: 14,
                total: 14,
                is_crit: false,
                meets_difficulty: Some(true),
                hope_gt_fear: true,
                fear_gt_hope: false,
            }
        );
    }

    #[test]
    fn trace_without_difficulty_skips_the_check() {
        let result = explain_outcome(&OutcomeRequest::new(2, 5)).unwrap();
        assert!(!codes(&result).contains(&STEP_CHECK_DIFFICULTY));
        assert_eq!(result.steps.len(), 4);
        let select = result.steps.last().unwrap();
        assert!(!select.data.contains_key("meets_difficulty"));
        assert_eq!(select.data["outcome"], StepValue::from("ROLL_WITH_FEAR"));
    }

    #[test]
    fn messages_read_naturally() {
        let result =
            explain_outcome(&OutcomeRequest::new(3, 9).with_modifier(-2).with_difficulty(10))
                .unwrap();
        let text: Vec<String> = result
            .steps
            .iter()
            .map(|s| format!("{}: {}", s.code, s.message))
            .collect();
        insta::assert_snapshot!(text.join("\n"), @r"
        SUM_DICE: Hope 3 + Fear 9 = 12
        APPLY_MODIFIER: 12 - 2 = 10
        CHECK_CRIT: Hope and Fear differ: no critical
        CHECK_DIFFICULTY: Total 10 meets difficulty 10
        SELECT_OUTCOME: Outcome: Success with Fear
        ");
    }

    #[test]
    fn crit_trace_reports_missed_number() {
        let result = explain_outcome(&OutcomeRequest::new(1, 1).with_difficulty(20)).unwrap();
        assert_eq!(result.outcome(), Outcome::CriticalSuccess);
        let check = &result.steps[3];
        assert_eq!(check.code, STEP_CHECK_DIFFICULTY);
        assert_eq!(check.data["meets_difficulty"], StepValue::Bool(false));
        assert_eq!(result.steps[2].message, "Hope and Fear both show 1: critical");
    }

    #[test]
    fn validation_is_delegated() {
        assert!(matches!(
            explain_outcome(&OutcomeRequest::new(13, 1)),
            Err(DualityError::InvalidDualityDie { .. })
        ));
        assert!(matches!(
            explain_outcome(&OutcomeRequest::new(1, 2).with_difficulty(-5)),
            Err(DualityError::InvalidDifficulty { .. })
        ));
    }

    #[test]
    fn steps_encode_to_json() {
        let request = OutcomeRequest::new(8, 8)
            .with_modifier(2)
            .with_difficulty(15);
        let result = explain_outcome(&request).unwrap();
        let steps = result.steps_json().unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[1]["total"], 18);
        assert_eq!(steps[4]["outcome"], "CRITICAL_SUCCESS");
    }

    #[test]
    fn unencodable_step_fails_the_explanation() {
        let mut result = explain_outcome(&OutcomeRequest::new(4, 6)).unwrap();
        result.steps[0]
            .data
            .insert("odds".to_string(), StepValue::Float(f64::NAN));
        let err = result.steps_json().unwrap_err();
        assert!(matches!(&err, DualityError::Encoding { code, .. } if code == STEP_SUM_DICE));
        assert!(!err.is_client_error());
    }

    #[test]
    fn serialized_result_is_flat() {
        let result = explain_outcome(&OutcomeRequest::new(10, 4).with_difficulty(12)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "SUCCESS_WITH_HOPE");
        assert_eq!(json["total"], 14);
        assert_eq!(json["rules_version"], "1.0.0");
        assert_eq!(json["steps"][0]["code"], "SUM_DICE");
        assert_eq!(json["steps"][0]["data"]["base_total"], 14);
    }
}
