use crate::categories::{Category, SubCategory};
use crate::packs::{PackSlot, VANILLA_PACK};

/// Compiled-in defaults for exact `(slot, sub-category)` pairs.
const EXACT: &[(PackSlot, SubCategory, &str)] = &[
    (PackSlot::Population, SubCategory::ResidentialLow, "res-detached"),
    (PackSlot::Population, SubCategory::ResidentialHigh, "res-apartment"),
    (PackSlot::Population, SubCategory::ResidentialLowEco, "res-eco-detached"),
    (PackSlot::Population, SubCategory::ResidentialHighEco, "res-eco-apartment"),
    (PackSlot::Population, SubCategory::CommercialLow, "com-shop"),
    (PackSlot::Population, SubCategory::CommercialHigh, "com-mall"),
    (PackSlot::Population, SubCategory::CommercialLeisure, "com-leisure"),
    (PackSlot::Population, SubCategory::CommercialTourist, "com-tourist"),
    (PackSlot::Population, SubCategory::CommercialEco, "com-eco"),
    (PackSlot::Population, SubCategory::OfficeGeneric, "off-generic"),
    (PackSlot::Population, SubCategory::OfficeHighTech, "off-hightech"),
    (PackSlot::Population, SubCategory::IndustrialGeneric, "ind-factory"),
    (PackSlot::Population, SubCategory::IndustrialFarming, "ind-farming"),
    (PackSlot::Population, SubCategory::IndustrialForestry, "ind-forestry"),
    (PackSlot::Population, SubCategory::IndustrialOil, "ind-oil"),
    (PackSlot::Population, SubCategory::IndustrialOre, "ind-ore"),
    (PackSlot::Population, SubCategory::ElementarySchool, "sch-elementary-students"),
    (PackSlot::Population, SubCategory::HighSchool, "sch-high-students"),
    (PackSlot::School, SubCategory::ElementarySchool, "sch-elementary"),
    (PackSlot::School, SubCategory::HighSchool, "sch-high"),
];

/// Per-category fallback when no exact entry matches.
const BY_CATEGORY: &[(PackSlot, Category, &str)] = &[
    (PackSlot::Population, Category::Residential, "res-detached"),
    (PackSlot::Population, Category::Commercial, "com-shop"),
    (PackSlot::Population, Category::Office, "off-generic"),
    (PackSlot::Population, Category::Industrial, "ind-factory"),
    (PackSlot::Population, Category::Education, "sch-elementary-students"),
    (PackSlot::Population, Category::None, VANILLA_PACK),
    (PackSlot::Floor, Category::Residential, "floor-residential"),
    (PackSlot::Floor, Category::Commercial, "floor-commercial"),
    (PackSlot::Floor, Category::Office, "floor-office"),
    (PackSlot::Floor, Category::Industrial, "floor-industrial"),
    (PackSlot::Floor, Category::Education, "floor-school"),
    (PackSlot::Floor, Category::None, "floor-generic"),
];

/// Last resort per slot; makes the lookup total.
fn slot_fallback(slot: PackSlot) -> &'static str {
    match slot {
        PackSlot::Population => VANILLA_PACK,
        PackSlot::Floor => "floor-generic",
        PackSlot::School => "sch-elementary",
    }
}

/// The compiled-in default pack name for a building class. Never absent.
///
/// An exact entry only applies when the sub-category actually belongs to the
/// requested category.
pub fn base_default(slot: PackSlot, category: Category, sub_category: SubCategory) -> &'static str {
    if sub_category.category() == category {
        if let Some((_, _, name)) = EXACT
            .iter()
            .find(|(s, sub, _)| *s == slot && *sub == sub_category)
        {
            return *name;
        }
    }
    BY_CATEGORY
        .iter()
        .find(|(s, c, _)| *s == slot && *c == category)
        .map_or_else(|| slot_fallback(slot), |(_, _, name)| *name)
}
