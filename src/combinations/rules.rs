//! Factor assignment rules for the six combination expressions
//!
//! | Rule                | Permanent   | Leading        | Others         |
//! |---------------------|-------------|----------------|----------------|
//! | SLS characteristic  | 1.0         | 1.0            | psi_0          |
//! | SLS frequent        | 1.0         | psi_1          | psi_2          |
//! | SLS quasi-permanent | 1.0         | psi_2          | psi_2          |
//! | ULS 6.10            | gamma       | gamma          | gamma * psi_0  |
//! | ULS 6.10a           | gamma       | gamma * psi_0  | gamma * psi_0  |
//! | ULS 6.10b           | xi * gamma  | gamma          | gamma * psi_0  |
//!
//! gamma is always the unfavourable partial factor of the case's load type.

use super::factors::{FactorTables, LoadBehaviour, PsiKind};
use crate::error::{DesignError, DesignResult};
use crate::loads::{AlternativeVariant, CaseSelection, CombinationType, FactoredCase, LoadCase};

/// One combination expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    SlsCharacteristic,
    SlsFrequent,
    SlsQuasiPermanent,
    UlsBasic,
    UlsAlternativeA,
    UlsAlternativeB,
}

/// Position of a case within a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Permanent,
    Leading,
    Other,
}

/// Factors and audit key produced by a rule
#[derive(Debug, Clone, PartialEq)]
pub struct FactorAssignment {
    pub load_cases: Vec<FactoredCase>,
    pub combination_key: String,
}

impl Rule {
    /// Rules a generator dispatches for one selection; both variants for alternative
    pub fn for_combination_type(combination_type: CombinationType) -> DesignResult<Vec<Rule>> {
        match combination_type {
            CombinationType::Characteristic => Ok(vec![Self::SlsCharacteristic]),
            CombinationType::Frequent => Ok(vec![Self::SlsFrequent]),
            CombinationType::QuasiPermanent => Ok(vec![Self::SlsQuasiPermanent]),
            CombinationType::Basic => Ok(vec![Self::UlsBasic]),
            CombinationType::Alternative => Ok(vec![Self::UlsAlternativeA, Self::UlsAlternativeB]),
            CombinationType::Accidental => {
                Err(DesignError::UnsupportedCombination(combination_type))
            }
        }
    }

    /// The single rule for a type and optional variant selector
    pub fn resolve(
        combination_type: CombinationType,
        variant: Option<AlternativeVariant>,
    ) -> DesignResult<Rule> {
        match (combination_type, variant) {
            (CombinationType::Alternative, Some(AlternativeVariant::A)) => Ok(Self::UlsAlternativeA),
            (CombinationType::Alternative, Some(AlternativeVariant::B)) => Ok(Self::UlsAlternativeB),
            (CombinationType::Alternative, None) => Err(DesignError::MissingAlternativeVariant),
            (_, Some(_)) => Err(DesignError::UnexpectedAlternativeVariant(combination_type)),
            (_, None) => {
                let mut rules = Self::for_combination_type(combination_type)?;
                rules
                    .pop()
                    .ok_or(DesignError::UnsupportedCombination(combination_type))
            }
        }
    }

    pub fn combination_type(&self) -> CombinationType {
        match self {
            Self::SlsCharacteristic => CombinationType::Characteristic,
            Self::SlsFrequent => CombinationType::Frequent,
            Self::SlsQuasiPermanent => CombinationType::QuasiPermanent,
            Self::UlsBasic => CombinationType::Basic,
            Self::UlsAlternativeA | Self::UlsAlternativeB => CombinationType::Alternative,
        }
    }

    pub fn variant(&self) -> Option<AlternativeVariant> {
        match self {
            Self::UlsAlternativeA => Some(AlternativeVariant::A),
            Self::UlsAlternativeB => Some(AlternativeVariant::B),
            _ => None,
        }
    }

    /// Prefix of generated combination labels
    pub fn label_prefix(&self) -> &'static str {
        match self {
            Self::SlsCharacteristic => "SLS-Characteristic",
            Self::SlsFrequent => "SLS-Frequent",
            Self::SlsQuasiPermanent => "SLS-QuasiPermanent",
            Self::UlsBasic => "ULS-Basic(6.10)",
            Self::UlsAlternativeA => "ULS-Alternative(6.10a)",
            Self::UlsAlternativeB => "ULS-Alternative(6.10b)",
        }
    }

    /// Factor components of a case, in key order; empty means unity
    fn components(
        &self,
        role: Role,
        case: &LoadCase,
        tables: &FactorTables,
    ) -> DesignResult<Vec<f64>> {
        // TODO: favourable permanent actions (gamma_G,inf) once the governing clause is settled
        let gamma = || -> DesignResult<f64> {
            tables.gamma(case.load_type(), LoadBehaviour::Unfavourable)
        };
        let psi = |kind: PsiKind| -> DesignResult<f64> {
            let category = case
                .category()
                .ok_or_else(|| DesignError::MissingCategory(case.label().to_string()))?;
            tables.psi(category, kind)
        };

        let components = match (self, role) {
            (Self::SlsCharacteristic, Role::Permanent | Role::Leading) => vec![],
            (Self::SlsCharacteristic, Role::Other) => vec![psi(PsiKind::Psi0)?],

            (Self::SlsFrequent, Role::Permanent) => vec![],
            (Self::SlsFrequent, Role::Leading) => vec![psi(PsiKind::Psi1)?],
            (Self::SlsFrequent, Role::Other) => vec![psi(PsiKind::Psi2)?],

            (Self::SlsQuasiPermanent, Role::Permanent) => vec![],
            (Self::SlsQuasiPermanent, Role::Leading | Role::Other) => vec![psi(PsiKind::Psi2)?],

            (Self::UlsBasic, Role::Permanent | Role::Leading) => vec![gamma()?],
            (Self::UlsBasic, Role::Other) => vec![gamma()?, psi(PsiKind::Psi0)?],

            (Self::UlsAlternativeA, Role::Permanent) => vec![gamma()?],
            (Self::UlsAlternativeA, Role::Leading | Role::Other) => {
                vec![gamma()?, psi(PsiKind::Psi0)?]
            }

            (Self::UlsAlternativeB, Role::Permanent) => vec![tables.xi, gamma()?],
            (Self::UlsAlternativeB, Role::Leading) => vec![gamma()?],
            (Self::UlsAlternativeB, Role::Other) => vec![gamma()?, psi(PsiKind::Psi0)?],
        };
        Ok(components)
    }
}

/// Apply a rule to a case selection
///
/// Terms are emitted permanent first, then the leading case, then the others,
/// each as `f1*f2*label` with unity terms written as the bare label.
pub fn apply(
    rule: Rule,
    selection: &CaseSelection,
    tables: &FactorTables,
) -> DesignResult<FactorAssignment> {
    let roles = selection
        .permanent_cases
        .iter()
        .map(|case| (Role::Permanent, case))
        .chain(selection.leading_variable_case.iter().map(|case| (Role::Leading, case)))
        .chain(selection.other_variable_cases.iter().map(|case| (Role::Other, case)));

    let mut load_cases = Vec::new();
    let mut terms = Vec::new();
    for (role, case) in roles {
        let components = rule.components(role, case, tables)?;
        let factor = components.iter().product::<f64>();

        let mut term: Vec<String> = components.iter().map(|&c| format_factor(c)).collect();
        term.push(case.label().to_string());
        terms.push(term.join("*"));

        load_cases.push(FactoredCase {
            case: case.clone(),
            factor,
        });
    }

    Ok(FactorAssignment {
        load_cases,
        combination_key: terms.join("+"),
    })
}

/// Shortest round-trip form with at least one decimal: `1.0`, `1.35`, `0.85`
pub fn format_factor(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
