use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Building classification
// ---------------------------------------------------------------------------

/// Top-level building category used for pack selection.
///
/// `None` is the universal wildcard: packs in this category are offered for
/// every other category.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub enum Category {
    Residential,
    Commercial,
    Office,
    Industrial,
    Education,
    #[default]
    None,
}

impl Category {
    /// All concrete categories (excludes the `None` wildcard).
    pub const ALL: [Category; 5] = [
        Category::Residential,
        Category::Commercial,
        Category::Office,
        Category::Industrial,
        Category::Education,
    ];

    /// Number of building levels the host defines for this category.
    pub fn level_count(self) -> u8 {
        match self {
            Category::Residential => 5,
            Category::Commercial | Category::Office | Category::Industrial => 3,
            Category::Education | Category::None => 1,
        }
    }

    /// Whether buildings in this category provide any workplaces.
    pub fn has_workplaces(self) -> bool {
        matches!(
            self,
            Category::Commercial | Category::Office | Category::Industrial | Category::Education
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
            Category::Office => "Office",
            Category::Industrial => "Industrial",
            Category::Education => "Education",
            Category::None => "None",
        }
    }
}

/// Host sub-category within a [`Category`].
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bitcode::Encode,
    bitcode::Decode,
)]
pub enum SubCategory {
    ResidentialLow,
    ResidentialHigh,
    ResidentialLowEco,
    ResidentialHighEco,
    CommercialLow,
    CommercialHigh,
    CommercialLeisure,
    CommercialTourist,
    CommercialEco,
    OfficeGeneric,
    OfficeHighTech,
    IndustrialGeneric,
    IndustrialFarming,
    IndustrialForestry,
    IndustrialOil,
    IndustrialOre,
    ElementarySchool,
    HighSchool,
    #[default]
    Generic,
}

impl SubCategory {
    pub const ALL: [SubCategory; 19] = [
        SubCategory::ResidentialLow,
        SubCategory::ResidentialHigh,
        SubCategory::ResidentialLowEco,
        SubCategory::ResidentialHighEco,
        SubCategory::CommercialLow,
        SubCategory::CommercialHigh,
        SubCategory::CommercialLeisure,
        SubCategory::CommercialTourist,
        SubCategory::CommercialEco,
        SubCategory::OfficeGeneric,
        SubCategory::OfficeHighTech,
        SubCategory::IndustrialGeneric,
        SubCategory::IndustrialFarming,
        SubCategory::IndustrialForestry,
        SubCategory::IndustrialOil,
        SubCategory::IndustrialOre,
        SubCategory::ElementarySchool,
        SubCategory::HighSchool,
        SubCategory::Generic,
    ];

    /// The category this sub-category belongs to in the host's scheme.
    pub fn category(self) -> Category {
        match self {
            SubCategory::ResidentialLow
            | SubCategory::ResidentialHigh
            | SubCategory::ResidentialLowEco
            | SubCategory::ResidentialHighEco => Category::Residential,
            SubCategory::CommercialLow
            | SubCategory::CommercialHigh
            | SubCategory::CommercialLeisure
            | SubCategory::CommercialTourist
            | SubCategory::CommercialEco => Category::Commercial,
            SubCategory::OfficeGeneric | SubCategory::OfficeHighTech => Category::Office,
            SubCategory::IndustrialGeneric
            | SubCategory::IndustrialFarming
            | SubCategory::IndustrialForestry
            | SubCategory::IndustrialOil
            | SubCategory::IndustrialOre => Category::Industrial,
            SubCategory::ElementarySchool | SubCategory::HighSchool => Category::Education,
            SubCategory::Generic => Category::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Result kinds
// ---------------------------------------------------------------------------

/// Kind of cached result. Each kind has its own cache table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    /// Primary unit count: households, total workplaces, or students.
    Population,
    /// Workplace count split into tiers.
    Workplaces,
    /// Commercial visitor places.
    Visitors,
}

impl ResultKind {
    pub const ALL: [ResultKind; 3] = [
        ResultKind::Population,
        ResultKind::Workplaces,
        ResultKind::Visitors,
    ];

    pub fn index(self) -> usize {
        match self {
            ResultKind::Population => 0,
            ResultKind::Workplaces => 1,
            ResultKind::Visitors => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResultKind::Population => "population",
            ResultKind::Workplaces => "workplaces",
            ResultKind::Visitors => "visitors",
        }
    }
}
