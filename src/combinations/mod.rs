//! Combination generation
//!
//! Expands load case groups into every combination required for one limit
//! state and combination type:
//!
//! 1. each group is expanded according to its relation
//! 2. the expansions are crossed (one selection per group) and flattened
//! 3. accidental cases are dropped, then duplicate selections
//! 4. every variable case of a selection is tried in turn as the leading one
//! 5. the combination rule assigns factors and the audit key
//!
//! Cost grows with `2^k` for every STANDARD group of `k` cases.

mod factors;
pub(crate) mod rules;

pub use factors::{FactorTables, LoadBehaviour, PartialFactors, PsiFactors, PsiKind};
pub use rules::{format_factor, FactorAssignment, Rule};

use std::collections::HashSet;

use log::{debug, trace};

use crate::error::DesignResult;
use crate::loads::{
    CaseSelection, CombinationType, LimitState, LoadCase, LoadCaseCombination, LoadCaseGroup,
};

/// Generates the combinations of one limit state and combination type
///
/// Results accumulate: every call to [`generate_combinations`] or
/// [`generate_from_sets`] appends to [`combinations`] and the label index
/// keeps counting. Use a fresh generator (or [`generate`]) for an isolated run.
///
/// [`generate_combinations`]: CombinationsGenerator::generate_combinations
/// [`generate_from_sets`]: CombinationsGenerator::generate_from_sets
/// [`combinations`]: CombinationsGenerator::combinations
#[derive(Debug, Clone)]
pub struct CombinationsGenerator {
    limit_state: LimitState,
    combination_type: CombinationType,
    tables: FactorTables,
    combinations: Vec<LoadCaseCombination>,
    next_index: usize,
}

impl CombinationsGenerator {
    /// Create a generator; fails if the type does not belong to the limit state
    pub fn new(limit_state: LimitState, combination_type: CombinationType) -> DesignResult<Self> {
        combination_type.check_limit_state(limit_state)?;
        Ok(Self {
            limit_state,
            combination_type,
            tables: FactorTables::eurocode(),
            combinations: Vec::new(),
            next_index: 0,
        })
    }

    /// Use non-default factor tables
    pub fn with_factors(mut self, tables: FactorTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn limit_state(&self) -> LimitState {
        self.limit_state
    }

    pub fn combination_type(&self) -> CombinationType {
        self.combination_type
    }

    pub fn factors(&self) -> &FactorTables {
        &self.tables
    }

    /// All combinations generated so far
    pub fn combinations(&self) -> &[LoadCaseCombination] {
        &self.combinations
    }

    pub fn into_combinations(self) -> Vec<LoadCaseCombination> {
        self.combinations
    }

    /// Generate combinations for one set of groups
    ///
    /// Returns the number of combinations appended.
    pub fn generate_combinations(&mut self, groups: &[LoadCaseGroup]) -> DesignResult<usize> {
        self.generate_from_sets(&[groups])
    }

    /// Generate combinations for several sets of groups
    ///
    /// Groups are only crossed within their own set. The selections of all sets
    /// are deduplicated together, so a group shared by two sets does not yield
    /// the same combination twice. Nothing is appended if any dispatch fails.
    pub fn generate_from_sets<S>(&mut self, group_sets: &[S]) -> DesignResult<usize>
    where
        S: AsRef<[LoadCaseGroup]>,
    {
        let rules = Rule::for_combination_type(self.combination_type)?;

        let mut selections: Vec<Vec<&LoadCase>> = Vec::new();
        for groups in group_sets {
            // Accidental cases are dropped ahead of deduplication
            selections.extend(cross_groups(groups.as_ref()).into_iter().map(|selection| {
                selection
                    .into_iter()
                    .filter(|case| case.is_permanent() || case.is_variable())
                    .collect::<Vec<_>>()
            }));
        }
        let total = selections.len();
        let selections = unique_selections(selections);
        debug!(
            "{} {}: {} crossed selections, {} unique",
            self.limit_state,
            self.combination_type,
            total,
            selections.len()
        );

        let mut index = self.next_index;
        let mut generated = Vec::new();
        for selection in selections {
            let (permanent_cases, variable_cases): (Vec<LoadCase>, Vec<LoadCase>) = selection
                .into_iter()
                .cloned()
                .partition(|case| case.is_permanent());

            if permanent_cases.is_empty() && variable_cases.is_empty() {
                continue;
            }

            if variable_cases.is_empty() {
                let case_selection = CaseSelection::permanent(permanent_cases);
                generated.extend(self.dispatch(&rules, index, case_selection)?);
                index += 1;
                continue;
            }

            for i in 0..variable_cases.len() {
                let mut other_variable_cases = variable_cases.clone();
                let leading = other_variable_cases.remove(i);
                let case_selection = CaseSelection::new(
                    permanent_cases.clone(),
                    Some(leading),
                    other_variable_cases,
                );
                generated.extend(self.dispatch(&rules, index, case_selection)?);
                index += 1;
            }
        }

        let count = generated.len();
        debug!(
            "{} {}: generated {} combinations",
            self.limit_state, self.combination_type, count
        );
        self.next_index = index;
        self.combinations.extend(generated);
        Ok(count)
    }

    /// Build the combination(s) of every rule for one selection
    fn dispatch(
        &self,
        rules: &[Rule],
        index: usize,
        selection: CaseSelection,
    ) -> DesignResult<Vec<LoadCaseCombination>> {
        let mut combinations = Vec::with_capacity(rules.len());
        for rule in rules {
            let label = format!("{}-{}", rule.label_prefix(), index);
            let combination =
                LoadCaseCombination::from_rule(&label, *rule, selection.clone(), &self.tables)?;
            trace!("{}", combination);
            combinations.push(combination);
        }
        Ok(combinations)
    }
}

/// Generate the combinations of one set of groups with a fresh generator
pub fn generate(
    limit_state: LimitState,
    combination_type: CombinationType,
    groups: &[LoadCaseGroup],
) -> DesignResult<Vec<LoadCaseCombination>> {
    let mut generator = CombinationsGenerator::new(limit_state, combination_type)?;
    generator.generate_combinations(groups)?;
    Ok(generator.into_combinations())
}

/// Cartesian product of the group expansions, flattened in group order
///
/// The last group varies fastest. A case contained in more than one group
/// is kept only at its first position.
fn cross_groups(groups: &[LoadCaseGroup]) -> Vec<Vec<&LoadCase>> {
    let expansions: Vec<Vec<Vec<&LoadCase>>> =
        groups.iter().map(|group| group.combinations()).collect();
    if expansions.iter().any(|expansion| expansion.is_empty()) {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut counters = vec![0usize; expansions.len()];
    loop {
        let mut flattened: Vec<&LoadCase> = Vec::new();
        for (expansion, &counter) in expansions.iter().zip(&counters) {
            for &case in &expansion[counter] {
                if flattened.iter().any(|c| c.label() == case.label()) {
                    debug!("load case '{}' selected by more than one group", case.label());
                    continue;
                }
                flattened.push(case);
            }
        }
        result.push(flattened);

        // Advance the odometer from the last group
        let mut pos = counters.len();
        loop {
            if pos == 0 {
                return result;
            }
            pos -= 1;
            counters[pos] += 1;
            if counters[pos] < expansions[pos].len() {
                break;
            }
            counters[pos] = 0;
        }
    }
}

/// Drop selections whose label sequence was already seen, keeping first occurrences
fn unique_selections(selections: Vec<Vec<&LoadCase>>) -> Vec<Vec<&LoadCase>> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    selections
        .into_iter()
        .filter(|selection| seen.insert(selection.iter().map(|c| c.label().to_string()).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DesignError;
    use crate::loads::{LoadDurationClass, VariableCategory};

    fn labels(selection: &[&LoadCase]) -> Vec<String> {
        selection.iter().map(|c| c.label().to_string()).collect()
    }

    fn wind(label: &str) -> LoadCase {
        LoadCase::variable(label, VariableCategory::Wind, LoadDurationClass::ShortTerm)
    }

    #[test]
    fn test_cross_groups_order() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let w = LoadCaseGroup::exclusive(vec![wind("W1"), wind("W2")]).unwrap();
        let groups = [g, w];
        let crossed = cross_groups(&groups);
        let crossed: Vec<Vec<String>> = crossed.iter().map(|s| labels(s)).collect();
        assert_eq!(
            crossed,
            vec![
                vec!["G1".to_string()],
                vec!["G1".to_string(), "W1".to_string()],
                vec!["G1".to_string(), "W2".to_string()],
            ]
        );
    }

    #[test]
    fn test_cross_no_groups() {
        let groups: Vec<LoadCaseGroup> = Vec::new();
        let crossed = cross_groups(&groups);
        assert_eq!(crossed.len(), 1);
        assert!(crossed[0].is_empty());
    }

    #[test]
    fn test_shared_case_collapsed() {
        let g = LoadCase::permanent("G1");
        let a = LoadCaseGroup::together(vec![g.clone()]).unwrap();
        let b = LoadCaseGroup::together(vec![g, LoadCase::permanent("G2")]).unwrap();
        let groups = [a, b];
        let crossed = cross_groups(&groups);
        assert_eq!(labels(&crossed[0]), vec!["G1", "G2"]);
    }

    #[test]
    fn test_unique_selections() {
        let g1 = LoadCase::permanent("G1");
        let w1 = wind("W1");
        let selections = vec![vec![&g1], vec![&g1, &w1], vec![&g1]];
        let unique = unique_selections(selections);
        assert_eq!(unique.len(), 2);
        assert_eq!(labels(&unique[1]), vec!["G1", "W1"]);
    }

    #[test]
    fn test_generator_rejects_incompatible_type() {
        let err = CombinationsGenerator::new(LimitState::Uls, CombinationType::Frequent).unwrap_err();
        assert!(matches!(err, DesignError::IncompatibleCombination { .. }));
    }

    #[test]
    fn test_leading_variable_loop() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let q = LoadCaseGroup::together(vec![wind("W1"), wind("W2")]).unwrap();
        let combos = generate(LimitState::Sls, CombinationType::Characteristic, &[g, q]).unwrap();

        let keys: Vec<&str> = combos.iter().map(|c| c.combination_key()).collect();
        assert_eq!(keys, vec!["G1+W1+0.6*W2", "G1+W2+0.6*W1"]);
        assert_eq!(combos[0].label(), "SLS-Characteristic-0");
        assert_eq!(combos[1].label(), "SLS-Characteristic-1");
    }

    #[test]
    fn test_empty_selection_skipped() {
        let w = LoadCaseGroup::exclusive(vec![wind("W1")]).unwrap();
        let combos = generate(LimitState::Uls, CombinationType::Basic, &[w]).unwrap();
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].combination_key(), "1.5*W1");
    }

    #[test]
    fn test_accidental_cases_excluded() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let a = LoadCaseGroup::exclusive(vec![LoadCase::accidental("A1")]).unwrap();
        let combos = generate(LimitState::Uls, CombinationType::Basic, &[g, a]).unwrap();
        assert_eq!(combos.len(), 1);
        assert!(!combos[0].includes("A1"));
    }

    #[test]
    fn test_accidental_group_does_not_duplicate_combinations() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let w = LoadCaseGroup::exclusive(vec![wind("W1")]).unwrap();
        let a = LoadCaseGroup::exclusive(vec![
            LoadCase::accidental("A1"),
            LoadCase::accidental("A2"),
        ])
        .unwrap();
        let combos = generate(LimitState::Uls, CombinationType::Basic, &[g, w, a]).unwrap();

        let keys: Vec<&str> = combos.iter().map(|c| c.combination_key()).collect();
        assert_eq!(keys, vec!["1.35*G1", "1.35*G1+1.5*W1"]);
        let unique: HashSet<&str> = keys.iter().copied().collect();
        assert_eq!(unique.len(), combos.len());
        assert_eq!(combos[1].label(), "ULS-Basic(6.10)-1");
    }

    #[test]
    fn test_accidental_type_fails_explicitly() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let mut generator =
            CombinationsGenerator::new(LimitState::Uls, CombinationType::Accidental).unwrap();
        let err = generator.generate_combinations(&[g]).unwrap_err();
        assert!(matches!(err, DesignError::UnsupportedCombination(_)));
        assert!(generator.combinations().is_empty());
    }

    #[test]
    fn test_failed_run_appends_nothing() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let w = LoadCaseGroup::exclusive(vec![wind("W1")]).unwrap();
        let mut tables = FactorTables::eurocode();
        tables.psi.remove(&VariableCategory::Wind);
        let mut generator = CombinationsGenerator::new(LimitState::Sls, CombinationType::Frequent)
            .unwrap()
            .with_factors(tables);

        assert!(generator.generate_combinations(&[g, w]).is_err());
        assert!(generator.combinations().is_empty());
    }

    #[test]
    fn test_alternative_pairs_share_index() {
        let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
        let combos = generate(LimitState::Uls, CombinationType::Alternative, &[g]).unwrap();
        let labels: Vec<&str> = combos.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["ULS-Alternative(6.10a)-0", "ULS-Alternative(6.10b)-0"]
        );
        assert_eq!(combos[0].combination_key(), "1.35*G1");
        assert_eq!(combos[1].combination_key(), "0.85*1.35*G1");
    }
}
