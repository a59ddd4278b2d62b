//! Per-observation inventory records.
//!
//! Each observation carries the ordered list of items its player holds. Items
//! come from semi-structured source data, so the weapon class may be missing;
//! a missing class is kept as [`WeaponClass::Unknown`] instead of being
//! dropped, which keeps it visible in distinct-class listings.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Weapon classes that make a player count as properly armed for an entry.
///
/// Matched exactly and case-sensitively.
pub const QUALIFYING_WEAPON_CLASSES: [&str; 2] = ["Rifle", "SMG"];

/// A single inventory item.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Weapon category of the item, absent for items without one
    #[serde(default)]
    pub weapon_class: Option<String>,
}

/// Categorical weapon class extracted from an [`Item`].
///
/// Ordered with every named class before [`WeaponClass::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum WeaponClass {
    Named(String),
    Unknown,
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponClass::Named(name) => fmt::Display::fmt(name, f),
            WeaponClass::Unknown => f.write_str("unknown"),
        }
    }
}

impl Item {
    #[must_use]
    pub fn new(weapon_class: Option<&str>) -> Self {
        Self {
            weapon_class: weapon_class.map(str::to_owned),
        }
    }

    #[must_use]
    pub fn weapon_class(&self) -> WeaponClass {
        self.weapon_class
            .as_ref()
            .map_or(WeaponClass::Unknown, |name| WeaponClass::Named(name.clone()))
    }

    #[must_use]
    pub fn is_qualifying_weapon(&self) -> bool {
        self.weapon_class
            .as_deref()
            .is_some_and(|class| QUALIFYING_WEAPON_CLASSES.contains(&class))
    }
}

/// Ordered items held by a player at one observation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Inventory {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Weapon classes present in this inventory.
    ///
    /// Items without a class contribute [`WeaponClass::Unknown`].
    #[must_use]
    pub fn distinct_weapon_classes(&self) -> BTreeSet<WeaponClass> {
        self.items.iter().map(Item::weapon_class).collect()
    }

    /// Whether any item is a rifle or SMG.
    ///
    /// An empty inventory has no qualifying weapon.
    #[must_use]
    pub fn has_qualifying_weapon(&self) -> bool {
        self.items.iter().any(Item::is_qualifying_weapon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(classes: &[Option<&str>]) -> Inventory {
        classes.iter().map(|c| Item::new(*c)).collect()
    }

    #[test]
    fn test_distinct_weapon_classes_keeps_unknown() {
        let inv = inventory(&[Some("Rifle"), Some("AK47"), Some("SMG"), None, Some("Rifle")]);
        let classes = inv.distinct_weapon_classes();
        let expected = BTreeSet::from([
            WeaponClass::Named("AK47".into()),
            WeaponClass::Named("Rifle".into()),
            WeaponClass::Named("SMG".into()),
            WeaponClass::Unknown,
        ]);
        assert_eq!(classes, expected);
        assert_eq!(classes.last(), Some(&WeaponClass::Unknown));
    }

    #[test]
    fn test_qualifying_weapon_is_exact_match() {
        assert!(inventory(&[Some("Pistols"), Some("Rifle")]).has_qualifying_weapon());
        assert!(inventory(&[Some("SMG")]).has_qualifying_weapon());
        assert!(!inventory(&[Some("rifle"), Some("smg"), Some("AK47")]).has_qualifying_weapon());
        assert!(!inventory(&[None, Some("Grenade")]).has_qualifying_weapon());
        assert!(!Inventory::default().has_qualifying_weapon());
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_extra_fields() {
        let json = r#"[
            {"weapon_class": "Rifle", "item_name": "AK-47", "ammo_in_magazine": 30},
            {"item_name": "C4"},
            {"weapon_class": null}
        ]"#;
        let inv: Inventory = serde_json::from_str(json).unwrap();
        assert_eq!(inv.items().len(), 3);
        assert_eq!(inv.items()[0].weapon_class(), WeaponClass::Named("Rifle".into()));
        assert_eq!(inv.items()[1].weapon_class(), WeaponClass::Unknown);
        assert_eq!(inv.items()[2].weapon_class(), WeaponClass::Unknown);
    }

    #[test]
    fn test_unknown_serializes_as_null() {
        let json = serde_json::to_string(&[WeaponClass::Named("SMG".into()), WeaponClass::Unknown])
            .unwrap();
        assert_eq!(json, r#"["SMG",null]"#);
    }
}
