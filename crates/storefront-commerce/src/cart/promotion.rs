//! Promotion codes.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// An active promotion. At most one is applied at a time and it is never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Promotion {
    /// Fraction of the subtotal taken off (0.10 = 10%).
    PercentDiscount { code: String, fraction: f64 },
    /// Shipping charge waived regardless of the threshold.
    FreeShipping { code: String },
}

impl Promotion {
    /// The normalized code that activated this promotion.
    pub fn code(&self) -> &str {
        match self {
            Promotion::PercentDiscount { code, .. } | Promotion::FreeShipping { code } => code,
        }
    }

    /// Discount fraction, zero for promotions that don't discount.
    pub fn discount_fraction(&self) -> f64 {
        match self {
            Promotion::PercentDiscount { fraction, .. } => *fraction,
            Promotion::FreeShipping { .. } => 0.0,
        }
    }

    /// Check if this promotion waives shipping.
    pub fn waives_shipping(&self) -> bool {
        matches!(self, Promotion::FreeShipping { .. })
    }
}

/// What a registered code does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionEffect {
    /// Percentage off the subtotal, as a fraction in [0, 1].
    Percent { fraction: f64 },
    /// Free shipping.
    FreeShipping,
}

/// A registered promotion code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionRule {
    /// Code as typed by the shopper (matched case-insensitively).
    pub code: String,
    /// Effect of the code.
    #[serde(flatten)]
    pub effect: PromotionEffect,
}

impl PromotionRule {
    /// Create a percentage rule.
    pub fn percent(code: impl Into<String>, fraction: f64) -> Self {
        Self {
            code: code.into(),
            effect: PromotionEffect::Percent { fraction },
        }
    }

    /// Create a free shipping rule.
    pub fn free_shipping(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            effect: PromotionEffect::FreeShipping,
        }
    }

    fn activate(&self) -> Promotion {
        let code = normalize_code(&self.code);
        match self.effect {
            PromotionEffect::Percent { fraction } => Promotion::PercentDiscount { code, fraction },
            PromotionEffect::FreeShipping => Promotion::FreeShipping { code },
        }
    }
}

/// Outcome of evaluating user input against the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionOutcome {
    /// The code matched; this promotion is now active.
    Applied(Promotion),
    /// Non-empty input matched nothing; any active promotion was cleared.
    Rejected { code: String },
    /// Blank input; nothing changed.
    Blank,
}

/// Normalize user input: trim and uppercase.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Fixed set of known promotion codes.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionRegistry {
    rules: Vec<PromotionRule>,
}

impl PromotionRegistry {
    /// Build a registry, rejecting blank and duplicate codes.
    pub fn new(rules: Vec<PromotionRule>) -> Result<Self, CommerceError> {
        let mut seen = Vec::with_capacity(rules.len());
        for rule in &rules {
            let code = normalize_code(&rule.code);
            if code.is_empty() {
                return Err(CommerceError::ValidationError(
                    "promotion code must not be blank".to_string(),
                ));
            }
            if seen.contains(&code) {
                return Err(CommerceError::ValidationError(format!(
                    "duplicate promotion code: {}",
                    code
                )));
            }
            if let PromotionEffect::Percent { fraction } = rule.effect {
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(CommerceError::ValidationError(format!(
                        "discount fraction for {} must be within [0, 1], got {}",
                        code, fraction
                    )));
                }
            }
            seen.push(code);
        }
        Ok(Self { rules })
    }

    /// The storefront's codes: `SAVE10` (10% off) and `FREESHIP`.
    pub fn standard() -> Self {
        Self {
            rules: standard_rules(),
        }
    }

    /// Registered rules.
    pub fn rules(&self) -> &[PromotionRule] {
        &self.rules
    }

    /// Look up a code without changing any state.
    pub fn evaluate(&self, input: &str) -> PromotionOutcome {
        let code = normalize_code(input);
        if code.is_empty() {
            return PromotionOutcome::Blank;
        }
        self.rules
            .iter()
            .find(|r| normalize_code(&r.code) == code)
            .map(|r| PromotionOutcome::Applied(r.activate()))
            .unwrap_or(PromotionOutcome::Rejected { code })
    }

    /// Evaluate `input` and update the active promotion accordingly.
    ///
    /// A match replaces the active promotion, a non-match clears it, and
    /// blank input leaves it alone.
    pub fn apply(&self, input: &str, active: &mut Option<Promotion>) -> PromotionOutcome {
        let outcome = self.evaluate(input);
        match &outcome {
            PromotionOutcome::Applied(promotion) => *active = Some(promotion.clone()),
            PromotionOutcome::Rejected { .. } => *active = None,
            PromotionOutcome::Blank => {}
        }
        outcome
    }
}

impl Default for PromotionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rules behind [`PromotionRegistry::standard`].
pub fn standard_rules() -> Vec<PromotionRule> {
    vec![
        PromotionRule::percent("SAVE10", 0.10),
        PromotionRule::free_shipping("FREESHIP"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_case_insensitive_and_trimmed() {
        let registry = PromotionRegistry::standard();
        assert_eq!(
            registry.evaluate("  save10 "),
            PromotionOutcome::Applied(Promotion::PercentDiscount {
                code: "SAVE10".to_string(),
                fraction: 0.10
            })
        );
        assert_eq!(
            registry.evaluate("FreeShip"),
            PromotionOutcome::Applied(Promotion::FreeShipping {
                code: "FREESHIP".to_string()
            })
        );
    }

    #[test]
    fn test_new_code_replaces_active() {
        let registry = PromotionRegistry::standard();
        let mut active = None;
        registry.apply("SAVE10", &mut active);
        registry.apply("FREESHIP", &mut active);
        assert_eq!(active.as_ref().map(Promotion::code), Some("FREESHIP"));
    }

    #[test]
    fn test_unknown_code_clears_active() {
        let registry = PromotionRegistry::standard();
        let mut active = None;
        registry.apply("SAVE10", &mut active);

        let outcome = registry.apply("save20", &mut active);
        assert_eq!(
            outcome,
            PromotionOutcome::Rejected {
                code: "SAVE20".to_string()
            }
        );
        assert!(active.is_none());
    }

    #[test]
    fn test_blank_input_keeps_active() {
        let registry = PromotionRegistry::standard();
        let mut active = None;
        registry.apply("FREESHIP", &mut active);

        assert_eq!(registry.apply("   ", &mut active), PromotionOutcome::Blank);
        assert!(active.as_ref().is_some_and(Promotion::waives_shipping));
    }

    #[test]
    fn test_registry_validation() {
        assert!(PromotionRegistry::new(vec![PromotionRule::percent(" ", 0.1)]).is_err());
        assert!(PromotionRegistry::new(vec![
            PromotionRule::percent("A", 0.1),
            PromotionRule::free_shipping("a"),
        ])
        .is_err());
        assert!(PromotionRegistry::new(vec![PromotionRule::percent("BIG", 1.5)]).is_err());
        assert!(PromotionRegistry::new(standard_rules()).is_ok());
    }

    #[test]
    fn test_rule_deserializes_from_config_shape() {
        let rule: PromotionRule =
            serde_json::from_str(r#"{"code":"SAVE25","kind":"percent","fraction":0.25}"#).unwrap();
        assert_eq!(rule, PromotionRule::percent("SAVE25", 0.25));
        let rule: PromotionRule =
            serde_json::from_str(r#"{"code":"SHIPIT","kind":"free_shipping"}"#).unwrap();
        assert_eq!(rule.effect, PromotionEffect::FreeShipping);
    }
}
