//! Design Loads - Eurocode load case combinations
//!
//! This library decides which load cases act together and with what factor
//! for the limit state checks of EN 1990:
//! - Load case groups with standard, together and exclusive relations
//! - SLS characteristic, frequent and quasi-permanent combinations
//! - ULS fundamental combinations (eq. 6.10, and 6.10a/6.10b)
//! - Governing load duration class of each combination
//!
//! ## Example
//! ```rust
//! use design_loads::prelude::*;
//!
//! let g = LoadCaseGroup::together(vec![LoadCase::permanent("G1")]).unwrap();
//! let wind = LoadCaseGroup::exclusive(vec![
//!     LoadCase::variable("W1", VariableCategory::Wind, LoadDurationClass::ShortTerm),
//!     LoadCase::variable("W2", VariableCategory::Wind, LoadDurationClass::ShortTerm),
//! ])
//! .unwrap();
//!
//! let mut generator = CombinationsGenerator::new(LimitState::Uls, CombinationType::Basic).unwrap();
//! generator.generate_combinations(&[g, wind]).unwrap();
//!
//! let keys: Vec<&str> = generator
//!     .combinations()
//!     .iter()
//!     .map(|c| c.combination_key())
//!     .collect();
//! assert_eq!(keys, vec!["1.35*G1", "1.35*G1+1.5*W1", "1.35*G1+1.5*W2"]);
//! ```

pub mod catalogue;
pub mod combinations;
pub mod error;
pub mod loads;

// Re-export common types
pub mod prelude {
    pub use crate::catalogue::LoadCatalogue;
    pub use crate::combinations::{generate, CombinationsGenerator, FactorTables, LoadBehaviour};
    pub use crate::error::{DesignError, DesignResult};
    pub use crate::loads::{
        AlternativeVariant, CaseSelection, CombinationType, FactoredCase, LimitState, LoadCase,
        LoadCaseCombination, LoadCaseGroup, LoadCaseRelation, LoadDurationClass, LoadType,
        VariableCategory,
    };
}
