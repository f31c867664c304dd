//! Livestock classification axes.
//!
//! Every calculation is keyed by two closed sets: the physiological/age
//! [`Subcategory`] of the animal and the [`ProductionSystem`] it is managed in.
//! [`PerSubcategory`] and [`PerSystem`] are fixed-field tables over those sets, so a
//! missing entry is impossible by construction and deserialises to `T::default()`
//! (zero for numeric tables).

use crate::errors::LivestockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Physiological/age class of livestock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcategory {
    Weaning,
    Yearling,
    Young,
    AdultMale,
    AdultFemale,
    Imported,
}

impl Subcategory {
    /// All subcategories in canonical iteration order.
    pub const ALL: [Subcategory; 6] = [
        Subcategory::Weaning,
        Subcategory::Yearling,
        Subcategory::Young,
        Subcategory::AdultMale,
        Subcategory::AdultFemale,
        Subcategory::Imported,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Weaning => "weaning",
            Subcategory::Yearling => "yearling",
            Subcategory::Young => "young",
            Subcategory::AdultMale => "adult_male",
            Subcategory::AdultFemale => "adult_female",
            Subcategory::Imported => "imported",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subcategory {
    type Err = LivestockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcategory::ALL
            .into_iter()
            .find(|sub| sub.as_str() == s.trim())
            .ok_or_else(|| LivestockError::UnknownVariant {
                kind: "subcategory",
                value: s.to_string(),
            })
    }
}

/// Management intensity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionSystem {
    Extensive,
    SemiIntensive,
    Intensive,
}

impl ProductionSystem {
    /// All production systems in canonical iteration order.
    pub const ALL: [ProductionSystem; 3] = [
        ProductionSystem::Extensive,
        ProductionSystem::SemiIntensive,
        ProductionSystem::Intensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionSystem::Extensive => "extensive",
            ProductionSystem::SemiIntensive => "semi_intensive",
            ProductionSystem::Intensive => "intensive",
        }
    }
}

impl fmt::Display for ProductionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductionSystem {
    type Err = LivestockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductionSystem::ALL
            .into_iter()
            .find(|sys| sys.as_str() == s.trim())
            .ok_or_else(|| LivestockError::UnknownVariant {
                kind: "production system",
                value: s.to_string(),
            })
    }
}

/// A value for every [`Subcategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerSubcategory<T> {
    pub weaning: T,
    pub yearling: T,
    pub young: T,
    pub adult_male: T,
    pub adult_female: T,
    pub imported: T,
}

impl<T> PerSubcategory<T> {
    /// Build a table by evaluating `f` for every subcategory.
    pub fn from_fn(mut f: impl FnMut(Subcategory) -> T) -> Self {
        Self {
            weaning: f(Subcategory::Weaning),
            yearling: f(Subcategory::Yearling),
            young: f(Subcategory::Young),
            adult_male: f(Subcategory::AdultMale),
            adult_female: f(Subcategory::AdultFemale),
            imported: f(Subcategory::Imported),
        }
    }

    /// Iterate over `(subcategory, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Subcategory, &T)> {
        Subcategory::ALL.into_iter().map(move |sub| (sub, &self[sub]))
    }
}

impl PerSubcategory<f64> {
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }
}

impl<T> Index<Subcategory> for PerSubcategory<T> {
    type Output = T;

    fn index(&self, index: Subcategory) -> &T {
        match index {
            Subcategory::Weaning => &self.weaning,
            Subcategory::Yearling => &self.yearling,
            Subcategory::Young => &self.young,
            Subcategory::AdultMale => &self.adult_male,
            Subcategory::AdultFemale => &self.adult_female,
            Subcategory::Imported => &self.imported,
        }
    }
}

impl<T> IndexMut<Subcategory> for PerSubcategory<T> {
    fn index_mut(&mut self, index: Subcategory) -> &mut T {
        match index {
            Subcategory::Weaning => &mut self.weaning,
            Subcategory::Yearling => &mut self.yearling,
            Subcategory::Young => &mut self.young,
            Subcategory::AdultMale => &mut self.adult_male,
            Subcategory::AdultFemale => &mut self.adult_female,
            Subcategory::Imported => &mut self.imported,
        }
    }
}

/// A value for every [`ProductionSystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerSystem<T> {
    pub extensive: T,
    pub semi_intensive: T,
    pub intensive: T,
}

impl<T> PerSystem<T> {
    pub fn from_fn(mut f: impl FnMut(ProductionSystem) -> T) -> Self {
        Self {
            extensive: f(ProductionSystem::Extensive),
            semi_intensive: f(ProductionSystem::SemiIntensive),
            intensive: f(ProductionSystem::Intensive),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductionSystem, &T)> {
        ProductionSystem::ALL
            .into_iter()
            .map(move |sys| (sys, &self[sys]))
    }
}

impl PerSystem<f64> {
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }
}

impl<T> Index<ProductionSystem> for PerSystem<T> {
    type Output = T;

    fn index(&self, index: ProductionSystem) -> &T {
        match index {
            ProductionSystem::Extensive => &self.extensive,
            ProductionSystem::SemiIntensive => &self.semi_intensive,
            ProductionSystem::Intensive => &self.intensive,
        }
    }
}

impl<T> IndexMut<ProductionSystem> for PerSystem<T> {
    fn index_mut(&mut self, index: ProductionSystem) -> &mut T {
        match index {
            ProductionSystem::Extensive => &mut self.extensive,
            ProductionSystem::SemiIntensive => &mut self.semi_intensive,
            ProductionSystem::Intensive => &mut self.intensive,
        }
    }
}
