//! CVSS 3.1 base metric definitions and weight tables.
//!
//! The eight metrics, their option codes, and the official weights are fixed
//! by the standard. Tables are `const` and never mutated; the typed enums
//! below index into them, so there is a single source of truth for weights.

use crate::error::VectorError;

/// One selectable option of a base metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricOption {
    pub code: &'static str,
    pub label: &'static str,
    pub weight: f64,
}

const AV_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "N", label: "Network", weight: 0.85 },
    MetricOption { code: "A", label: "Adjacent", weight: 0.62 },
    MetricOption { code: "L", label: "Local", weight: 0.55 },
    MetricOption { code: "P", label: "Physical", weight: 0.20 },
];

const AC_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "L", label: "Low", weight: 0.77 },
    MetricOption { code: "H", label: "High", weight: 0.44 },
];

// Baseline (Scope Unchanged) weights. Scope Changed overrides L and H, see
// `PrivilegesRequired::weight`.
const PR_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "N", label: "None", weight: 0.85 },
    MetricOption { code: "L", label: "Low", weight: 0.62 },
    MetricOption { code: "H", label: "High", weight: 0.27 },
];

const UI_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "N", label: "None", weight: 0.85 },
    MetricOption { code: "R", label: "Required", weight: 0.62 },
];

// Scope is a branch flag in the formula, not a multiplicand. The 0/1 weights
// exist only so the breakdown table has something to show.
const S_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "U", label: "Unchanged", weight: 0.0 },
    MetricOption { code: "C", label: "Changed", weight: 1.0 },
];

const IMPACT_OPTIONS: &[MetricOption] = &[
    MetricOption { code: "N", label: "None", weight: 0.0 },
    MetricOption { code: "L", label: "Low", weight: 0.22 },
    MetricOption { code: "H", label: "High", weight: 0.56 },
];

/// The eight CVSS 3.1 base metrics, in canonical vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    AttackVector,
    AttackComplexity,
    PrivilegesRequired,
    UserInteraction,
    Scope,
    Confidentiality,
    Integrity,
    Availability,
}

impl Metric {
    /// Canonical serialization order: AV, AC, PR, UI, S, C, I, A.
    pub const ALL: [Metric; 8] = [
        Metric::AttackVector,
        Metric::AttackComplexity,
        Metric::PrivilegesRequired,
        Metric::UserInteraction,
        Metric::Scope,
        Metric::Confidentiality,
        Metric::Integrity,
        Metric::Availability,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Metric::AttackVector => "AV",
            Metric::AttackComplexity => "AC",
            Metric::PrivilegesRequired => "PR",
            Metric::UserInteraction => "UI",
            Metric::Scope => "S",
            Metric::Confidentiality => "C",
            Metric::Integrity => "I",
            Metric::Availability => "A",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::AttackVector => "Attack Vector",
            Metric::AttackComplexity => "Attack Complexity",
            Metric::PrivilegesRequired => "Privileges Required",
            Metric::UserInteraction => "User Interaction",
            Metric::Scope => "Scope",
            Metric::Confidentiality => "Confidentiality",
            Metric::Integrity => "Integrity",
            Metric::Availability => "Availability",
        }
    }

    pub fn from_code(code: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.code() == code)
    }

    pub fn options(self) -> &'static [MetricOption] {
        match self {
            Metric::AttackVector => AV_OPTIONS,
            Metric::AttackComplexity => AC_OPTIONS,
            Metric::PrivilegesRequired => PR_OPTIONS,
            Metric::UserInteraction => UI_OPTIONS,
            Metric::Scope => S_OPTIONS,
            Metric::Confidentiality => IMPACT_OPTIONS,
            Metric::Integrity => IMPACT_OPTIONS,
            Metric::Availability => IMPACT_OPTIONS,
        }
    }
}

/// Weight lookup by raw codes, failing on unknown metric or option.
pub fn lookup(metric_code: &str, option_code: &str) -> Result<f64, VectorError> {
    let metric = Metric::from_code(metric_code)
        .ok_or_else(|| VectorError::UnknownMetric(metric_code.to_string()))?;
    metric
        .options()
        .iter()
        .find(|o| o.code == option_code)
        .map(|o| o.weight)
        .ok_or_else(|| VectorError::UnknownOption {
            metric: metric_code.to_string(),
            value: option_code.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackVector {
    Network,
    Adjacent,
    Local,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackComplexity {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivilegesRequired {
    None,
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserInteraction {
    None,
    Required,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Unchanged,
    Changed,
}

/// Impact granularity shared by Confidentiality, Integrity, and Availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactLevel {
    None,
    Low,
    High,
}

// Variant order in each enum matches its table order, so `self as usize`
// indexes the table directly.

impl AttackVector {
    pub fn code(self) -> &'static str {
        AV_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        AV_OPTIONS[self as usize].label
    }

    pub fn weight(self) -> f64 {
        AV_OPTIONS[self as usize].weight
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::Network),
            "A" => Some(Self::Adjacent),
            "L" => Some(Self::Local),
            "P" => Some(Self::Physical),
            _ => None,
        }
    }
}

impl AttackComplexity {
    pub fn code(self) -> &'static str {
        AC_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        AC_OPTIONS[self as usize].label
    }

    pub fn weight(self) -> f64 {
        AC_OPTIONS[self as usize].weight
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Self::Low),
            "H" => Some(Self::High),
            _ => None,
        }
    }
}

impl PrivilegesRequired {
    pub fn code(self) -> &'static str {
        PR_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        PR_OPTIONS[self as usize].label
    }

    /// Weight depends on Scope. Scope-changed overrides: L 0.62 -> 0.68,
    /// H 0.27 -> 0.50; N stays 0.85.
    pub fn weight(self, scope: Scope) -> f64 {
        match (scope, self) {
            (Scope::Changed, Self::Low) => 0.68,
            (Scope::Changed, Self::High) => 0.50,
            _ => PR_OPTIONS[self as usize].weight,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::None),
            "L" => Some(Self::Low),
            "H" => Some(Self::High),
            _ => None,
        }
    }
}

impl UserInteraction {
    pub fn code(self) -> &'static str {
        UI_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        UI_OPTIONS[self as usize].label
    }

    pub fn weight(self) -> f64 {
        UI_OPTIONS[self as usize].weight
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::None),
            "R" => Some(Self::Required),
            _ => None,
        }
    }
}

impl Scope {
    pub fn code(self) -> &'static str {
        S_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        S_OPTIONS[self as usize].label
    }

    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "U" => Some(Self::Unchanged),
            "C" => Some(Self::Changed),
            _ => None,
        }
    }
}

impl ImpactLevel {
    pub fn code(self) -> &'static str {
        IMPACT_OPTIONS[self as usize].code
    }

    pub fn label(self) -> &'static str {
        IMPACT_OPTIONS[self as usize].label
    }

    pub fn weight(self) -> f64 {
        IMPACT_OPTIONS[self as usize].weight
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Self::None),
            "L" => Some(Self::Low),
            "H" => Some(Self::High),
            _ => None,
        }
    }
}

/// A complete choice of all 8 base metrics.
///
/// Complete and valid by construction; the score formula is total over any
/// value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetricSelection {
    pub attack_vector: AttackVector,
    pub attack_complexity: AttackComplexity,
    pub privileges_required: PrivilegesRequired,
    pub user_interaction: UserInteraction,
    pub scope: Scope,
    pub confidentiality: ImpactLevel,
    pub integrity: ImpactLevel,
    pub availability: ImpactLevel,
}

impl Default for MetricSelection {
    /// Baseline `AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N`, scoring 0.0.
    fn default() -> Self {
        Self {
            attack_vector: AttackVector::Network,
            attack_complexity: AttackComplexity::Low,
            privileges_required: PrivilegesRequired::None,
            user_interaction: UserInteraction::None,
            scope: Scope::Unchanged,
            confidentiality: ImpactLevel::None,
            integrity: ImpactLevel::None,
            availability: ImpactLevel::None,
        }
    }
}

impl MetricSelection {
    /// Option code currently chosen for `metric`.
    pub fn get(&self, metric: Metric) -> &'static str {
        match metric {
            Metric::AttackVector => self.attack_vector.code(),
            Metric::AttackComplexity => self.attack_complexity.code(),
            Metric::PrivilegesRequired => self.privileges_required.code(),
            Metric::UserInteraction => self.user_interaction.code(),
            Metric::Scope => self.scope.code(),
            Metric::Confidentiality => self.confidentiality.code(),
            Metric::Integrity => self.integrity.code(),
            Metric::Availability => self.availability.code(),
        }
    }

    /// Human label of the currently chosen option for `metric`.
    pub fn label(&self, metric: Metric) -> &'static str {
        match metric {
            Metric::AttackVector => self.attack_vector.label(),
            Metric::AttackComplexity => self.attack_complexity.label(),
            Metric::PrivilegesRequired => self.privileges_required.label(),
            Metric::UserInteraction => self.user_interaction.label(),
            Metric::Scope => self.scope.label(),
            Metric::Confidentiality => self.confidentiality.label(),
            Metric::Integrity => self.integrity.label(),
            Metric::Availability => self.availability.label(),
        }
    }

    /// Weight that the formula will actually use for `metric`, including the
    /// Scope-dependent Privileges Required override. Scope reports its 0/1
    /// branch flag.
    pub fn effective_weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::AttackVector => self.attack_vector.weight(),
            Metric::AttackComplexity => self.attack_complexity.weight(),
            Metric::PrivilegesRequired => self.privileges_required.weight(self.scope),
            Metric::UserInteraction => self.user_interaction.weight(),
            Metric::Scope => {
                if self.scope.is_changed() {
                    1.0
                } else {
                    0.0
                }
            }
            Metric::Confidentiality => self.confidentiality.weight(),
            Metric::Integrity => self.integrity.weight(),
            Metric::Availability => self.availability.weight(),
        }
    }

    /// Sets one metric from an option code, rejecting codes that are not
    /// valid for that metric.
    pub fn set(&mut self, metric: Metric, code: &str) -> Result<(), VectorError> {
        let unknown = || VectorError::UnknownOption {
            metric: metric.code().to_string(),
            value: code.to_string(),
        };
        match metric {
            Metric::AttackVector => {
                self.attack_vector = AttackVector::from_code(code).ok_or_else(unknown)?
            }
            Metric::AttackComplexity => {
                self.attack_complexity = AttackComplexity::from_code(code).ok_or_else(unknown)?
            }
            Metric::PrivilegesRequired => {
                self.privileges_required = PrivilegesRequired::from_code(code).ok_or_else(unknown)?
            }
            Metric::UserInteraction => {
                self.user_interaction = UserInteraction::from_code(code).ok_or_else(unknown)?
            }
            Metric::Scope => self.scope = Scope::from_code(code).ok_or_else(unknown)?,
            Metric::Confidentiality => {
                self.confidentiality = ImpactLevel::from_code(code).ok_or_else(unknown)?
            }
            Metric::Integrity => {
                self.integrity = ImpactLevel::from_code(code).ok_or_else(unknown)?
            }
            Metric::Availability => {
                self.availability = ImpactLevel::from_code(code).ok_or_else(unknown)?
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_counts() {
        assert_eq!(Metric::AttackVector.options().len(), 4);
        assert_eq!(Metric::AttackComplexity.options().len(), 2);
        assert_eq!(Metric::PrivilegesRequired.options().len(), 3);
        assert_eq!(Metric::UserInteraction.options().len(), 2);
        assert_eq!(Metric::Scope.options().len(), 2);
        assert_eq!(Metric::Confidentiality.options().len(), 3);
    }

    #[test]
    fn test_lookup_known_weights() {
        assert_eq!(lookup("AV", "N").unwrap(), 0.85);
        assert_eq!(lookup("AV", "P").unwrap(), 0.20);
        assert_eq!(lookup("AC", "H").unwrap(), 0.44);
        assert_eq!(lookup("UI", "R").unwrap(), 0.62);
        assert_eq!(lookup("C", "H").unwrap(), 0.56);
        assert_eq!(lookup("A", "L").unwrap(), 0.22);
    }

    #[test]
    fn test_lookup_unknown_metric() {
        assert_eq!(
            lookup("XX", "N"),
            Err(VectorError::UnknownMetric("XX".to_string()))
        );
    }

    #[test]
    fn test_lookup_unknown_option() {
        assert_eq!(
            lookup("AV", "Z"),
            Err(VectorError::UnknownOption {
                metric: "AV".to_string(),
                value: "Z".to_string(),
            })
        );
    }

    #[test]
    fn test_pr_scope_override() {
        assert_eq!(PrivilegesRequired::Low.weight(Scope::Unchanged), 0.62);
        assert_eq!(PrivilegesRequired::Low.weight(Scope::Changed), 0.68);
        assert_eq!(PrivilegesRequired::High.weight(Scope::Unchanged), 0.27);
        assert_eq!(PrivilegesRequired::High.weight(Scope::Changed), 0.50);
        // None is not overridden.
        assert_eq!(PrivilegesRequired::None.weight(Scope::Changed), 0.85);
    }

    #[test]
    fn test_default_baseline() {
        let sel = MetricSelection::default();
        assert_eq!(sel.get(Metric::AttackVector), "N");
        assert_eq!(sel.get(Metric::AttackComplexity), "L");
        assert_eq!(sel.get(Metric::Scope), "U");
        assert_eq!(sel.get(Metric::Confidentiality), "N");
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut sel = MetricSelection::default();
        sel.set(Metric::AttackVector, "P").unwrap();
        sel.set(Metric::Scope, "C").unwrap();
        assert_eq!(sel.get(Metric::AttackVector), "P");
        assert_eq!(sel.attack_vector, AttackVector::Physical);
        assert_eq!(sel.scope, Scope::Changed);
    }

    #[test]
    fn test_set_rejects_bad_code() {
        let mut sel = MetricSelection::default();
        let err = sel.set(Metric::UserInteraction, "X").unwrap_err();
        assert_eq!(
            err,
            VectorError::UnknownOption {
                metric: "UI".to_string(),
                value: "X".to_string(),
            }
        );
        // Selection untouched on failure.
        assert_eq!(sel, MetricSelection::default());
    }
}
