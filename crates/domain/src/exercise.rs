use std::{collections::BTreeSet, fmt, str::FromStr};

use derive_more::{AsRef, Deref, Display};

use crate::{Demand, EquipmentID};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub link: String,
    pub area: Area,
    pub muscles: BTreeSet<String>,
    pub equipment: Demand,
    pub laterality: Laterality,
    pub category: Category,
}

impl Exercise {
    #[must_use]
    pub fn uses(&self, equipment: &EquipmentID) -> bool {
        self.equipment.get(equipment) > 0
    }

    #[must_use]
    pub fn is_unilateral(&self) -> bool {
        self.laterality == Laterality::Unilateral
    }

    #[must_use]
    pub fn is_active_rest(&self) -> bool {
        self.category == Category::Mobility
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(u32);

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > Self::MAX_LEN {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    const MAX_LEN: usize = 80;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 80 characters or fewer ({0} > 80)")]
    TooLong(usize),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Area {
    Upper,
    Lower,
    Core,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Upper, Area::Lower, Area::Core];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Area::Upper => "upper",
            Area::Lower => "lower",
            Area::Core => "core",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = AreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Area::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or(AreaError::Invalid(s))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AreaError {
    #[error("Invalid area \"{0}\" (expected upper, lower or core)")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Laterality {
    #[default]
    Bilateral,
    Unilateral,
}

impl From<bool> for Laterality {
    fn from(unilateral: bool) -> Self {
        if unilateral {
            Laterality::Unilateral
        } else {
            Laterality::Bilateral
        }
    }
}

/// Strength exercises fill stations, mobility exercises are used for active rest.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Category {
    #[default]
    Strength,
    Mobility,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::tests::data::{KB_PRESS, LUNGE, WORLD_GREATEST_STRETCH};

    use super::*;

    #[test]
    fn test_exercise_uses() {
        assert!(KB_PRESS.uses(&"kb16".into()));
        assert!(!KB_PRESS.uses(&"bench".into()));
        assert!(!WORLD_GREATEST_STRETCH.uses(&"kb16".into()));
    }

    #[test]
    fn test_exercise_is_unilateral() {
        assert!(LUNGE.is_unilateral());
        assert!(!KB_PRESS.is_unilateral());
    }

    #[test]
    fn test_exercise_is_active_rest() {
        assert!(WORLD_GREATEST_STRETCH.is_active_rest());
        assert!(!KB_PRESS.is_active_rest());
    }

    #[rstest]
    #[case("Goblet Squat", Ok(Name("Goblet Squat".to_string())))]
    #[case("  Farmer Carry  ", Ok(Name("Farmer Carry".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    #[case(&"A".repeat(81), Err(NameError::TooLong(81)))]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[rstest]
    #[case("upper", Ok(Area::Upper))]
    #[case(" Lower ", Ok(Area::Lower))]
    #[case("CORE", Ok(Area::Core))]
    #[case("legs", Err(AreaError::Invalid("legs".to_string())))]
    fn test_area_from_str(#[case] value: &str, #[case] expected: Result<Area, AreaError>) {
        assert_eq!(value.parse::<Area>(), expected);
    }

    #[test]
    fn test_area_display() {
        assert_eq!(
            Area::ALL.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["upper", "lower", "core"]
        );
    }

    #[rstest]
    #[case(true, Laterality::Unilateral)]
    #[case(false, Laterality::Bilateral)]
    fn test_laterality_from_bool(#[case] unilateral: bool, #[case] expected: Laterality) {
        assert_eq!(Laterality::from(unilateral), expected);
    }
}
