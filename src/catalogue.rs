//! Load catalogue - JSON description of load cases and their groups
//!
//! ```json
//! {
//!   "load_cases": [
//!     { "label": "G1", "load_type": "permanent", "load_duration_class": "permanent" },
//!     { "label": "W1", "load_type": "variable", "category": "wind", "load_duration_class": "short_term" }
//!   ],
//!   "groups": [
//!     { "name": "self-weight", "relation": "together", "load_cases": ["G1"] },
//!     { "name": "wind", "relation": "exclusive", "load_cases": ["W1"] }
//!   ],
//!   "group_sets": [["self-weight", "wind"]]
//! }
//! ```
//!
//! `group_sets` is optional; without it all groups form a single set.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combinations::CombinationsGenerator;
use crate::error::{DesignError, DesignResult};
use crate::loads::{
    CombinationType, LimitState, LoadCase, LoadCaseCombination, LoadCaseGroup, LoadCaseRelation,
};

/// Group entry as written in the catalogue file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    pub relation: LoadCaseRelation,
    pub load_cases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogueFile {
    load_cases: Vec<LoadCase>,
    #[serde(default)]
    groups: Vec<GroupEntry>,
    #[serde(default)]
    group_sets: Option<Vec<Vec<String>>>,
}

/// Validated load cases and groups of one structure
#[derive(Debug, Clone)]
pub struct LoadCatalogue {
    load_cases: Vec<LoadCase>,
    groups: Vec<(String, LoadCaseGroup)>,
    group_sets: Vec<Vec<String>>,
}

impl LoadCatalogue {
    /// Parse and validate a catalogue
    pub fn from_json(json: &str) -> DesignResult<Self> {
        let file: CatalogueFile = serde_json::from_str(json)?;
        Self::from_parts(file.load_cases, file.groups, file.group_sets)
    }

    /// Read a catalogue from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DesignResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build a catalogue from already parsed parts
    pub fn from_parts(
        load_cases: Vec<LoadCase>,
        groups: Vec<GroupEntry>,
        group_sets: Option<Vec<Vec<String>>>,
    ) -> DesignResult<Self> {
        let mut cases: HashMap<String, LoadCase> = HashMap::new();
        let mut ordered = Vec::with_capacity(load_cases.len());
        for case in load_cases {
            if cases.insert(case.label().to_string(), case.clone()).is_some() {
                return Err(DesignError::DuplicateName(case.label().to_string()));
            }
            ordered.push(case);
        }

        let mut names = HashSet::new();
        let mut built = Vec::with_capacity(groups.len());
        for entry in groups {
            if !names.insert(entry.name.clone()) {
                return Err(DesignError::DuplicateName(entry.name));
            }
            let members = entry
                .load_cases
                .iter()
                .map(|label| {
                    cases
                        .get(label)
                        .cloned()
                        .ok_or_else(|| DesignError::LoadCaseNotFound(label.clone()))
                })
                .collect::<DesignResult<Vec<_>>>()?;
            built.push((entry.name, LoadCaseGroup::new(members, entry.relation)?));
        }

        let group_sets = match group_sets {
            Some(sets) => {
                for name in sets.iter().flatten() {
                    if !names.contains(name) {
                        return Err(DesignError::GroupNotFound(name.clone()));
                    }
                }
                sets
            }
            None => vec![built.iter().map(|(name, _)| name.clone()).collect()],
        };

        Ok(Self {
            load_cases: ordered,
            groups: built,
            group_sets,
        })
    }

    /// Load cases in catalogue order
    pub fn load_cases(&self) -> &[LoadCase] {
        &self.load_cases
    }

    pub fn load_case(&self, label: &str) -> Option<&LoadCase> {
        self.load_cases.iter().find(|case| case.label() == label)
    }

    /// Groups in catalogue order
    pub fn groups(&self) -> impl Iterator<Item = &LoadCaseGroup> {
        self.groups.iter().map(|(_, group)| group)
    }

    pub fn group(&self, name: &str) -> DesignResult<&LoadCaseGroup> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, group)| group)
            .ok_or_else(|| DesignError::GroupNotFound(name.to_string()))
    }

    /// Group sets with names resolved to groups
    pub fn group_sets(&self) -> DesignResult<Vec<Vec<LoadCaseGroup>>> {
        self.group_sets
            .iter()
            .map(|set| {
                set.iter()
                    .map(|name| self.group(name).cloned())
                    .collect::<DesignResult<Vec<_>>>()
            })
            .collect()
    }

    /// Run `generator` over every group set of the catalogue
    pub fn generate_into(&self, generator: &mut CombinationsGenerator) -> DesignResult<usize> {
        generator.generate_from_sets(&self.group_sets()?)
    }

    /// Generate the combinations of one limit state with default factors
    pub fn generate(
        &self,
        limit_state: LimitState,
        combination_type: CombinationType,
    ) -> DesignResult<Vec<LoadCaseCombination>> {
        let mut generator = CombinationsGenerator::new(limit_state, combination_type)?;
        self.generate_into(&mut generator)?;
        Ok(generator.into_combinations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::VariableCategory;

    const CATALOGUE: &str = r#"{
        "load_cases": [
            { "label": "G1", "load_type": "permanent", "load_duration_class": "permanent" },
            { "label": "G2", "load_type": "permanent", "load_duration_class": "permanent" },
            { "label": "Q1", "load_type": "variable", "category": "category a", "load_duration_class": "medium_term" },
            { "label": "W1", "load_type": "variable", "category": "wind", "load_duration_class": "short_term" },
            { "label": "W2", "load_type": "variable", "category": "wind", "load_duration_class": "short_term" }
        ],
        "groups": [
            { "name": "self-weight", "relation": "together", "load_cases": ["G1", "G2"] },
            { "name": "imposed", "relation": "standard", "load_cases": ["Q1"] },
            { "name": "wind", "relation": "exclusive", "load_cases": ["W1", "W2"] }
        ]
    }"#;

    #[test]
    fn test_parse_catalogue() {
        let catalogue = LoadCatalogue::from_json(CATALOGUE).unwrap();
        assert_eq!(catalogue.load_cases().len(), 5);
        assert_eq!(catalogue.groups().count(), 3);
        assert_eq!(
            catalogue.load_case("Q1").unwrap().category(),
            Some(VariableCategory::A)
        );
        assert_eq!(
            catalogue.group("wind").unwrap().relation(),
            LoadCaseRelation::Exclusive
        );
        let sets = catalogue.group_sets().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 3);
    }

    #[test]
    fn test_generate_from_catalogue() {
        let catalogue = LoadCatalogue::from_json(CATALOGUE).unwrap();
        let combos = catalogue.generate(LimitState::Uls, CombinationType::Basic).unwrap();
        // [G], [G,W1], [G,W2], [G,Q1], [G,Q1,W1] x2, [G,Q1,W2] x2
        assert_eq!(combos.len(), 8);
        assert!(combos.iter().all(|c| c.includes("G1") && c.includes("G2")));
    }

    #[test]
    fn test_unknown_relation() {
        let json = CATALOGUE.replace("\"exclusive\"", "\"sometimes\"");
        assert!(matches!(
            LoadCatalogue::from_json(&json),
            Err(DesignError::SerializationError(_))
        ));
    }

    #[test]
    fn test_dangling_label() {
        let json = CATALOGUE.replace("[\"W1\", \"W2\"]", "[\"W1\", \"W9\"]");
        assert!(matches!(
            LoadCatalogue::from_json(&json),
            Err(DesignError::LoadCaseNotFound(label)) if label == "W9"
        ));
    }

    #[test]
    fn test_unknown_group_in_set() {
        let cases = vec![LoadCase::permanent("G1")];
        let groups = vec![GroupEntry {
            name: "g".to_string(),
            relation: LoadCaseRelation::Together,
            load_cases: vec!["G1".to_string()],
        }];
        let err = LoadCatalogue::from_parts(cases, groups, Some(vec![vec!["h".to_string()]]))
            .unwrap_err();
        assert!(matches!(err, DesignError::GroupNotFound(name) if name == "h"));
    }

    #[test]
    fn test_variable_without_category_rejected() {
        let json = CATALOGUE.replace(r#""category": "category a", "#, "");
        let err = LoadCatalogue::from_json(&json).unwrap_err();
        assert!(matches!(err, DesignError::SerializationError(_)));
        assert!(err.to_string().contains("Q1"));
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let cases = vec![LoadCase::permanent("G1"), LoadCase::permanent("G1")];
        assert!(matches!(
            LoadCatalogue::from_parts(cases, vec![], None),
            Err(DesignError::DuplicateName(_))
        ));
    }
}
