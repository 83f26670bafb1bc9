//! Load cases, load case groups and load case combinations

mod load_case;
mod load_case_group;
mod load_combo;

pub use load_case::{LoadCase, LoadDurationClass, LoadType, VariableCategory};
pub use load_case_group::{LoadCaseGroup, LoadCaseRelation};
pub use load_combo::{
    AlternativeVariant, CaseSelection, CombinationType, FactoredCase, LimitState,
    LoadCaseCombination,
};
