//! Load cases

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DesignError, DesignResult};

/// Kind of action a load case represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadType {
    Permanent,
    Variable,
    Accidental,
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Permanent => "permanent",
            Self::Variable => "variable",
            Self::Accidental => "accidental",
        };
        f.pad(name)
    }
}

impl FromStr for LoadType {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permanent" | "g" => Ok(Self::Permanent),
            "variable" | "q" => Ok(Self::Variable),
            "accidental" | "a" => Ok(Self::Accidental),
            _ => Err(DesignError::invalid("load type", s)),
        }
    }
}

/// Category of a variable action (EN 1990 Table A1.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableCategory {
    /// Domestic, residential areas
    #[serde(rename = "a", alias = "category a")]
    A,
    /// Office areas
    #[serde(rename = "b", alias = "category b")]
    B,
    /// Congregation areas
    #[serde(rename = "c", alias = "category c")]
    C,
    /// Shopping areas
    #[serde(rename = "d", alias = "category d")]
    D,
    /// Storage areas
    #[serde(rename = "e", alias = "category e")]
    E,
    /// Traffic area, vehicle weight <= 30 kN
    #[serde(rename = "f", alias = "category f")]
    F,
    /// Traffic area, 30 kN < vehicle weight <= 160 kN
    #[serde(rename = "g", alias = "category g")]
    G,
    /// Roofs
    #[serde(rename = "h", alias = "category h")]
    H,
    /// Snow loads in Finland, Iceland, Norway, Sweden
    #[serde(rename = "snow_nordic", alias = "snow nordic")]
    SnowNordic,
    /// Snow loads elsewhere, site altitude above 1000 m a.s.l.
    #[serde(rename = "snow_above_1000_m", alias = "snow > 1000 m")]
    SnowAbove1000M,
    /// Snow loads elsewhere, site altitude at or below 1000 m a.s.l.
    #[serde(rename = "snow_below_1000_m", alias = "snow < 1000 m")]
    SnowBelow1000M,
    #[serde(rename = "wind")]
    Wind,
    /// Temperature (non-fire) in buildings
    #[serde(rename = "temperature")]
    Temperature,
}

impl VariableCategory {
    /// Every category, in table order
    pub const ALL: [VariableCategory; 13] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::SnowNordic,
        Self::SnowAbove1000M,
        Self::SnowBelow1000M,
        Self::Wind,
        Self::Temperature,
    ];
}

impl fmt::Display for VariableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "category a",
            Self::B => "category b",
            Self::C => "category c",
            Self::D => "category d",
            Self::E => "category e",
            Self::F => "category f",
            Self::G => "category g",
            Self::H => "category h",
            Self::SnowNordic => "snow nordic",
            Self::SnowAbove1000M => "snow > 1000 m",
            Self::SnowBelow1000M => "snow < 1000 m",
            Self::Wind => "wind",
            Self::Temperature => "temperature",
        };
        f.pad(name)
    }
}

impl FromStr for VariableCategory {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("category ").unwrap_or(&normalized);
        match name {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            "f" => Ok(Self::F),
            "g" => Ok(Self::G),
            "h" => Ok(Self::H),
            "snow nordic" | "snow_nordic" => Ok(Self::SnowNordic),
            "snow > 1000 m" | "snow_above_1000_m" => Ok(Self::SnowAbove1000M),
            "snow < 1000 m" | "snow_below_1000_m" => Ok(Self::SnowBelow1000M),
            "wind" => Ok(Self::Wind),
            "temperature" => Ok(Self::Temperature),
            _ => Err(DesignError::invalid("variable category", s)),
        }
    }
}

/// Load duration class (EN 1995-1-1 Table 2.1)
///
/// Ordered by severity: `Permanent` is the least severe, `Instantaneous` the
/// most, so the governing class of a set of cases is its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadDurationClass {
    Permanent,
    #[serde(alias = "long-term")]
    LongTerm,
    #[serde(alias = "medium-term")]
    MediumTerm,
    #[serde(alias = "short-term")]
    ShortTerm,
    Instantaneous,
}

impl LoadDurationClass {
    /// Most severe class among `classes`, `Permanent` when empty
    pub fn governing<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = LoadDurationClass>,
    {
        classes.into_iter().max().unwrap_or(Self::Permanent)
    }
}

impl Default for LoadDurationClass {
    fn default() -> Self {
        Self::Permanent
    }
}

impl fmt::Display for LoadDurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Permanent => "permanent",
            Self::LongTerm => "long-term",
            Self::MediumTerm => "medium-term",
            Self::ShortTerm => "short-term",
            Self::Instantaneous => "instantaneous",
        };
        f.pad(name)
    }
}

impl FromStr for LoadDurationClass {
    type Err = DesignError;

    fn from_str(s: &str) -> DesignResult<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "permanent" => Ok(Self::Permanent),
            "long-term" => Ok(Self::LongTerm),
            "medium-term" => Ok(Self::MediumTerm),
            "short-term" => Ok(Self::ShortTerm),
            "instantaneous" => Ok(Self::Instantaneous),
            _ => Err(DesignError::invalid("load duration class", s)),
        }
    }
}

/// A single characteristic load case as delivered by the model-building layer
///
/// Cases are compared by value; labels are expected to be unique within a model.
/// Fields are read-only once the case is built, deserialization goes through
/// the same checks as [`LoadCase::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLoadCase")]
pub struct LoadCase {
    /// Unique label of the load case
    label: String,
    /// Kind of action
    load_type: LoadType,
    /// Category of a variable action, `None` for permanent and accidental cases
    category: Option<VariableCategory>,
    /// Duration class used by duration-dependent strength checks
    load_duration_class: LoadDurationClass,
}

#[derive(Deserialize)]
struct RawLoadCase {
    label: String,
    load_type: LoadType,
    #[serde(default)]
    category: Option<VariableCategory>,
    load_duration_class: LoadDurationClass,
}

impl TryFrom<RawLoadCase> for LoadCase {
    type Error = DesignError;

    fn try_from(raw: RawLoadCase) -> DesignResult<Self> {
        Self::new(&raw.label, raw.load_type, raw.category, raw.load_duration_class)
    }
}

impl LoadCase {
    /// Create a load case, checking that a category is given iff the case is variable
    pub fn new(
        label: &str,
        load_type: LoadType,
        category: Option<VariableCategory>,
        load_duration_class: LoadDurationClass,
    ) -> DesignResult<Self> {
        if label.trim().is_empty() {
            return Err(DesignError::InvalidInput(
                "load case label must not be empty".to_string(),
            ));
        }
        match (load_type, category) {
            (LoadType::Variable, None) => {
                return Err(DesignError::MissingCategory(label.to_string()))
            }
            (LoadType::Permanent | LoadType::Accidental, Some(_)) => {
                return Err(DesignError::UnexpectedCategory(label.to_string()))
            }
            _ => {}
        }
        Ok(Self {
            label: label.to_string(),
            load_type,
            category,
            load_duration_class,
        })
    }

    /// Permanent action, e.g. self-weight
    pub fn permanent(label: &str) -> Self {
        Self {
            label: label.to_string(),
            load_type: LoadType::Permanent,
            category: None,
            load_duration_class: LoadDurationClass::Permanent,
        }
    }

    /// Variable action of the given category
    pub fn variable(
        label: &str,
        category: VariableCategory,
        load_duration_class: LoadDurationClass,
    ) -> Self {
        Self {
            label: label.to_string(),
            load_type: LoadType::Variable,
            category: Some(category),
            load_duration_class,
        }
    }

    /// Accidental action (impact, explosion)
    pub fn accidental(label: &str) -> Self {
        Self {
            label: label.to_string(),
            load_type: LoadType::Accidental,
            category: None,
            load_duration_class: LoadDurationClass::Instantaneous,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn load_type(&self) -> LoadType {
        self.load_type
    }

    pub fn category(&self) -> Option<VariableCategory> {
        self.category
    }

    pub fn load_duration_class(&self) -> LoadDurationClass {
        self.load_duration_class
    }

    pub fn is_permanent(&self) -> bool {
        self.load_type == LoadType::Permanent
    }

    pub fn is_variable(&self) -> bool {
        self.load_type == LoadType::Variable
    }
}

impl fmt::Display for LoadCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category {
            Some(category) => write!(f, "{} ({}, {})", self.label, self.load_type, category),
            None => write!(f, "{} ({})", self.label, self.load_type),
        }
    }
}
