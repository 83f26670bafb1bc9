//! Load case combinations

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{LoadCase, LoadDurationClass};
use crate::combinations::{rules, FactorTables, Rule};
use crate::error::{DesignError, DesignResult};

/// Limit state family a combination is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimitState {
    /// Ultimate limit state
    #[serde(rename = "ULS", alias = "uls")]
    Uls,
    /// Serviceability limit state
    #[serde(rename = "SLS", alias = "sls")]
    Sls,
}

impl fmt::Display for LimitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uls => f.write_str("ULS"),
            Self::Sls => f.write_str("SLS"),
        }
    }
}

impl FromStr for LimitState {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ULS" => Ok(Self::Uls),
            "SLS" => Ok(Self::Sls),
            _ => Err(DesignError::invalid("limit state", s)),
        }
    }
}

/// Combination type; the first three belong to SLS, the rest to ULS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationType {
    /// SLS characteristic combination (EN 1990 eq. 6.14b)
    Characteristic,
    /// SLS frequent combination (eq. 6.15b)
    Frequent,
    /// SLS quasi-permanent combination (eq. 6.16b)
    #[serde(alias = "quasi-permanent")]
    QuasiPermanent,
    /// ULS fundamental combination (eq. 6.10)
    Basic,
    /// ULS fundamental combination, less favourable of eq. 6.10a and 6.10b
    Alternative,
    /// ULS accidental design situation (eq. 6.11b)
    Accidental,
}

impl CombinationType {
    /// Limit state the type belongs to
    pub fn limit_state(&self) -> LimitState {
        match self {
            Self::Characteristic | Self::Frequent | Self::QuasiPermanent => LimitState::Sls,
            Self::Basic | Self::Alternative | Self::Accidental => LimitState::Uls,
        }
    }

    /// Fail unless the type is legal for `limit_state`
    pub fn check_limit_state(&self, limit_state: LimitState) -> DesignResult<()> {
        if self.limit_state() != limit_state {
            return Err(DesignError::IncompatibleCombination {
                limit_state,
                combination_type: *self,
            });
        }
        Ok(())
    }
}

impl fmt::Display for CombinationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Characteristic => "characteristic",
            Self::Frequent => "frequent",
            Self::QuasiPermanent => "quasi-permanent",
            Self::Basic => "basic",
            Self::Alternative => "alternative",
            Self::Accidental => "accidental",
        };
        f.pad(name)
    }
}

impl FromStr for CombinationType {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "characteristic" => Ok(Self::Characteristic),
            "frequent" => Ok(Self::Frequent),
            "quasi-permanent" | "quasipermanent" => Ok(Self::QuasiPermanent),
            "basic" => Ok(Self::Basic),
            "alternative" => Ok(Self::Alternative),
            "accidental" => Ok(Self::Accidental),
            _ => Err(DesignError::invalid("combination type", s)),
        }
    }
}

/// Sub-variant of the alternative ULS combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeVariant {
    /// Eq. 6.10a: leading variable action reduced by psi_0
    A,
    /// Eq. 6.10b: permanent actions reduced by xi
    B,
}

impl fmt::Display for AlternativeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("a"),
            Self::B => f.write_str("b"),
        }
    }
}

impl FromStr for AlternativeVariant {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "6.10a" => Ok(Self::A),
            "b" | "6.10b" => Ok(Self::B),
            _ => Err(DesignError::invalid("alternative variant", s)),
        }
    }
}

/// The cases one combination is built from
///
/// Two combinations built from equal selections are duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseSelection {
    pub permanent_cases: Vec<LoadCase>,
    pub leading_variable_case: Option<LoadCase>,
    pub other_variable_cases: Vec<LoadCase>,
}

impl CaseSelection {
    pub fn new(
        permanent_cases: Vec<LoadCase>,
        leading_variable_case: Option<LoadCase>,
        other_variable_cases: Vec<LoadCase>,
    ) -> Self {
        Self {
            permanent_cases,
            leading_variable_case,
            other_variable_cases,
        }
    }

    /// Permanent cases only
    pub fn permanent(permanent_cases: Vec<LoadCase>) -> Self {
        Self::new(permanent_cases, None, Vec::new())
    }

    /// All cases in key order: permanent, leading, others
    pub fn iter(&self) -> impl Iterator<Item = &LoadCase> {
        self.permanent_cases
            .iter()
            .chain(self.leading_variable_case.iter())
            .chain(self.other_variable_cases.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A load case with the factor it carries in a combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoredCase {
    pub case: LoadCase,
    pub factor: f64,
}

/// A factored combination of load cases for one limit state check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadCaseCombination {
    label: String,
    limit_state: LimitState,
    combination_type: CombinationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<AlternativeVariant>,
    #[serde(flatten)]
    selection: CaseSelection,
    load_cases: Vec<FactoredCase>,
    combination_key: String,
    load_duration_class: LoadDurationClass,
}

impl LoadCaseCombination {
    /// Build a combination with the EN 1990 factor tables
    pub fn new(
        label: &str,
        limit_state: LimitState,
        combination_type: CombinationType,
        variant: Option<AlternativeVariant>,
        selection: CaseSelection,
    ) -> DesignResult<Self> {
        Self::with_tables(
            label,
            limit_state,
            combination_type,
            variant,
            selection,
            &FactorTables::eurocode(),
        )
    }

    /// Build a combination with explicit factor tables
    ///
    /// Fails if the type does not belong to `limit_state`, if an alternative
    /// combination has no variant (or another type has one), or if the type
    /// has no factor rule.
    pub fn with_tables(
        label: &str,
        limit_state: LimitState,
        combination_type: CombinationType,
        variant: Option<AlternativeVariant>,
        selection: CaseSelection,
        tables: &FactorTables,
    ) -> DesignResult<Self> {
        combination_type.check_limit_state(limit_state)?;
        let rule = Rule::resolve(combination_type, variant)?;
        Self::from_rule(label, rule, selection, tables)
    }

    /// Build a combination for an already resolved rule
    pub(crate) fn from_rule(
        label: &str,
        rule: Rule,
        selection: CaseSelection,
        tables: &FactorTables,
    ) -> DesignResult<Self> {
        let assignment = rules::apply(rule, &selection, tables)?;
        let load_duration_class =
            LoadDurationClass::governing(selection.iter().map(|case| case.load_duration_class()));

        Ok(Self {
            label: label.to_string(),
            limit_state: rule.combination_type().limit_state(),
            combination_type: rule.combination_type(),
            variant: rule.variant(),
            selection,
            load_cases: assignment.load_cases,
            combination_key: assignment.combination_key,
            load_duration_class,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn limit_state(&self) -> LimitState {
        self.limit_state
    }

    pub fn combination_type(&self) -> CombinationType {
        self.combination_type
    }

    /// Variant of an alternative ULS combination, `None` for all other types
    pub fn variant(&self) -> Option<AlternativeVariant> {
        self.variant
    }

    pub fn selection(&self) -> &CaseSelection {
        &self.selection
    }

    pub fn permanent_cases(&self) -> &[LoadCase] {
        &self.selection.permanent_cases
    }

    pub fn leading_variable_case(&self) -> Option<&LoadCase> {
        self.selection.leading_variable_case.as_ref()
    }

    pub fn other_variable_cases(&self) -> &[LoadCase] {
        &self.selection.other_variable_cases
    }

    /// Factored cases in key order
    pub fn load_cases(&self) -> &[FactoredCase] {
        &self.load_cases
    }

    /// Symbolic audit key, e.g. `1.35*G1+1.5*Q2+1.5*0.6*Q3`
    pub fn combination_key(&self) -> &str {
        &self.combination_key
    }

    /// Most severe duration class of the included cases
    pub fn load_duration_class(&self) -> LoadDurationClass {
        self.load_duration_class
    }

    /// Factor of a load case, `None` if the case is not part of the combination
    pub fn factor(&self, label: &str) -> Option<f64> {
        self.load_cases
            .iter()
            .find(|fc| fc.case.label() == label)
            .map(|fc| fc.factor)
    }

    /// Check if this combination includes a specific load case
    pub fn includes(&self, label: &str) -> bool {
        self.factor(label).is_some()
    }

    /// Factors keyed by case label, for superposing per-case results
    pub fn factor_map(&self) -> HashMap<String, f64> {
        self.load_cases
            .iter()
            .map(|fc| (fc.case.label().to_string(), fc.factor))
            .collect()
    }
}

impl fmt::Display for LoadCaseCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.combination_key)
    }
}
