//! Load case groups and their relation expansion

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use super::LoadCase;
use crate::error::{DesignError, DesignResult};

/// STANDARD groups above this size get a cost warning (2^n sub-selections)
const LARGE_STANDARD_GROUP: usize = 10;

/// Upper bound on the up-front allocation of a power set
const PREALLOCATED_SELECTIONS: usize = 1 << 16;

/// How the load cases of one group may act together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadCaseRelation {
    /// Any subset of the cases may act simultaneously
    Standard,
    /// The cases are inseparable and always act as one block
    Together,
    /// At most one case of the group acts at a time
    Exclusive,
}

impl fmt::Display for LoadCaseRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "standard",
            Self::Together => "together",
            Self::Exclusive => "exclusive",
        };
        f.pad(name)
    }
}

impl FromStr for LoadCaseRelation {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "together" => Ok(Self::Together),
            "exclusive" => Ok(Self::Exclusive),
            _ => Err(DesignError::invalid("relation", s)),
        }
    }
}

/// An ordered group of related load cases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadCaseGroup {
    load_cases: Vec<LoadCase>,
    relation: LoadCaseRelation,
}

impl LoadCaseGroup {
    /// Create a group; a label may appear only once
    pub fn new(load_cases: Vec<LoadCase>, relation: LoadCaseRelation) -> DesignResult<Self> {
        let mut seen = HashSet::new();
        for case in &load_cases {
            if !seen.insert(case.label()) {
                return Err(DesignError::DuplicateName(case.label().to_string()));
            }
        }
        if relation == LoadCaseRelation::Standard && load_cases.len() >= usize::BITS as usize {
            return Err(DesignError::InvalidInput(format!(
                "standard group of {} load cases has too many selections to enumerate",
                load_cases.len()
            )));
        }
        if relation == LoadCaseRelation::Standard && load_cases.len() > LARGE_STANDARD_GROUP {
            warn!(
                "standard group of {} load cases expands to {} selections",
                load_cases.len(),
                1u64 << load_cases.len().min(63)
            );
        }
        Ok(Self {
            load_cases,
            relation,
        })
    }

    pub fn standard(load_cases: Vec<LoadCase>) -> DesignResult<Self> {
        Self::new(load_cases, LoadCaseRelation::Standard)
    }

    pub fn together(load_cases: Vec<LoadCase>) -> DesignResult<Self> {
        Self::new(load_cases, LoadCaseRelation::Together)
    }

    pub fn exclusive(load_cases: Vec<LoadCase>) -> DesignResult<Self> {
        Self::new(load_cases, LoadCaseRelation::Exclusive)
    }

    pub fn load_cases(&self) -> &[LoadCase] {
        &self.load_cases
    }

    pub fn relation(&self) -> LoadCaseRelation {
        self.relation
    }

    pub fn number_of_load_cases(&self) -> usize {
        self.load_cases.len()
    }

    /// Whether a case with this label belongs to the group
    pub fn contains(&self, label: &str) -> bool {
        self.load_cases.iter().any(|case| case.label() == label)
    }

    /// Number of sub-selections `combinations` will produce
    pub fn number_of_combinations(&self) -> usize {
        let n = self.load_cases.len();
        match self.relation {
            LoadCaseRelation::Standard => 1usize.checked_shl(n as u32).unwrap_or(usize::MAX),
            LoadCaseRelation::Together => 1,
            LoadCaseRelation::Exclusive => n + 1,
        }
    }

    /// Every legal sub-selection of the group, in canonical order
    ///
    /// - `Standard`: the power set, by increasing size, lexicographic by index
    ///   within a size
    /// - `Together`: the full case list as a single selection
    /// - `Exclusive`: the empty selection followed by each singleton
    pub fn combinations(&self) -> Vec<Vec<&LoadCase>> {
        match self.relation {
            LoadCaseRelation::Standard => {
                let mut selections =
                    Vec::with_capacity(self.number_of_combinations().min(PREALLOCATED_SELECTIONS));
                for size in 0..=self.load_cases.len() {
                    for indices in index_combinations(self.load_cases.len(), size) {
                        selections.push(indices.iter().map(|&i| &self.load_cases[i]).collect());
                    }
                }
                selections
            }
            LoadCaseRelation::Together => vec![self.load_cases.iter().collect()],
            LoadCaseRelation::Exclusive => {
                let mut selections = Vec::with_capacity(self.load_cases.len() + 1);
                selections.push(Vec::new());
                selections.extend(self.load_cases.iter().map(|case| vec![case]));
                selections
            }
        }
    }
}

/// All `k`-element index subsets of `0..n` in lexicographic order
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());

        // Rightmost position that can still be advanced
        let mut pos = k;
        while pos > 0 && indices[pos - 1] == n - k + pos - 1 {
            pos -= 1;
        }
        if pos == 0 {
            break;
        }
        indices[pos - 1] += 1;
        for j in pos..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
    result
}
