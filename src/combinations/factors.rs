//! Partial and combination factor tables (EN 1990 Annex A1)

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, DesignResult};
use crate::loads::{LoadType, VariableCategory};

/// Whether an action increases or decreases the effect being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBehaviour {
    Favourable,
    Unfavourable,
}

impl fmt::Display for LoadBehaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favourable => f.write_str("favourable"),
            Self::Unfavourable => f.write_str("unfavourable"),
        }
    }
}

/// Which psi factor to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsiKind {
    /// Combination value
    Psi0,
    /// Frequent value
    Psi1,
    /// Quasi-permanent value
    Psi2,
}

/// psi_0 / psi_1 / psi_2 for one variable category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PsiFactors {
    pub psi_0: f64,
    pub psi_1: f64,
    pub psi_2: f64,
}

impl PsiFactors {
    pub const fn new(psi_0: f64, psi_1: f64, psi_2: f64) -> Self {
        Self { psi_0, psi_1, psi_2 }
    }

    pub fn get(&self, kind: PsiKind) -> f64 {
        match kind {
            PsiKind::Psi0 => self.psi_0,
            PsiKind::Psi1 => self.psi_1,
            PsiKind::Psi2 => self.psi_2,
        }
    }
}

/// Partial factors gamma for unfavourable actions, per load type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialFactors {
    pub permanent: f64,
    pub variable: f64,
    pub accidental: f64,
}

/// Complete set of factors used by the combination rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTables {
    /// gamma for unfavourable actions (Set B)
    pub gamma: PartialFactors,
    /// psi factors per variable category
    pub psi: BTreeMap<VariableCategory, PsiFactors>,
    /// Reduction factor for permanent actions in eq. 6.10b
    pub xi: f64,
}

impl FactorTables {
    /// Recommended values of EN 1990 Tables A1.1 and A1.2(B)
    pub fn eurocode() -> Self {
        use VariableCategory::*;

        let psi = [
            (A, PsiFactors::new(0.7, 0.5, 0.3)),
            (B, PsiFactors::new(0.7, 0.5, 0.3)),
            (C, PsiFactors::new(0.7, 0.7, 0.6)),
            (D, PsiFactors::new(0.7, 0.7, 0.6)),
            (E, PsiFactors::new(1.0, 0.9, 0.8)),
            (F, PsiFactors::new(0.7, 0.7, 0.6)),
            (G, PsiFactors::new(0.7, 0.5, 0.3)),
            (H, PsiFactors::new(0.0, 0.0, 0.0)),
            (SnowNordic, PsiFactors::new(0.7, 0.5, 0.2)),
            (SnowAbove1000M, PsiFactors::new(0.7, 0.5, 0.2)),
            (SnowBelow1000M, PsiFactors::new(0.5, 0.2, 0.0)),
            (Wind, PsiFactors::new(0.6, 0.2, 0.0)),
            (Temperature, PsiFactors::new(0.6, 0.5, 0.0)),
        ]
        .into_iter()
        .collect();

        Self {
            gamma: PartialFactors {
                permanent: 1.35,
                variable: 1.5,
                accidental: 1.0,
            },
            psi,
            xi: 0.85,
        }
    }

    /// Load tables from JSON, e.g. a national annex
    pub fn from_json(json: &str) -> DesignResult<Self> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DesignResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every factor is finite and non-negative and that xi lies in (0, 1]
    pub fn validate(&self) -> DesignResult<()> {
        let gammas = [
            ("gamma permanent", self.gamma.permanent),
            ("gamma variable", self.gamma.variable),
            ("gamma accidental", self.gamma.accidental),
        ];
        for (name, value) in gammas {
            if !value.is_finite() || value <= 0.0 {
                return Err(DesignError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        for (category, psi) in &self.psi {
            for value in [psi.psi_0, psi.psi_1, psi.psi_2] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(DesignError::InvalidInput(format!(
                        "psi factors of {} must lie in [0, 1], got {}",
                        category, value
                    )));
                }
            }
        }
        if !self.xi.is_finite() || self.xi <= 0.0 || self.xi > 1.0 {
            return Err(DesignError::InvalidInput(format!(
                "xi must lie in (0, 1], got {}",
                self.xi
            )));
        }
        Ok(())
    }

    /// Partial factor gamma for a load type
    ///
    /// Only the unfavourable branch is defined; favourable actions are not
    /// implemented.
    pub fn gamma(&self, load_type: LoadType, behaviour: LoadBehaviour) -> DesignResult<f64> {
        match behaviour {
            LoadBehaviour::Unfavourable => Ok(match load_type {
                LoadType::Permanent => self.gamma.permanent,
                LoadType::Variable => self.gamma.variable,
                LoadType::Accidental => self.gamma.accidental,
            }),
            LoadBehaviour::Favourable => Err(DesignError::UnimplementedBehaviour(behaviour)),
        }
    }

    pub fn psi_factors(&self, category: VariableCategory) -> DesignResult<&PsiFactors> {
        self.psi
            .get(&category)
            .ok_or_else(|| DesignError::MissingFactor(format!("psi of {}", category)))
    }

    pub fn psi(&self, category: VariableCategory, kind: PsiKind) -> DesignResult<f64> {
        Ok(self.psi_factors(category)?.get(kind))
    }
}

impl Default for FactorTables {
    fn default() -> Self {
        Self::eurocode()
    }
}
