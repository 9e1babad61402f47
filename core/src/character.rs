//! Player characters, their inventory and the items they carry.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Playable character classes offered on the selection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    /// Nimble class that favours dodging.
    Rogue,
    /// Frail class that wields magic.
    Wizard,
    /// Sturdy class built to absorb blows.
    Warrior,
}

impl CharacterClass {
    /// Every class in selection-screen order.
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Rogue,
        CharacterClass::Wizard,
        CharacterClass::Warrior,
    ];

    /// Human-readable class label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rogue => "Rogue",
            Self::Wizard => "Wizard",
            Self::Warrior => "Warrior",
        }
    }

    const fn preset(self) -> Preset {
        match self {
            Self::Rogue => Preset {
                health: 100,
                defense: 10,
                dodge: 20,
                class_trait: ClassTrait::Stealth(10),
            },
            Self::Wizard => Preset {
                health: 80,
                defense: 10,
                dodge: 10,
                class_trait: ClassTrait::Magic(10),
            },
            Self::Warrior => Preset {
                health: 120,
                defense: 20,
                dodge: 5,
                class_trait: ClassTrait::Strength(10),
            },
        }
    }
}

struct Preset {
    health: u32,
    defense: u32,
    dodge: u32,
    class_trait: ClassTrait,
}

/// Flavour attribute carried by exactly one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassTrait {
    /// Rogue stealth rating.
    Stealth(u32),
    /// Wizard magic rating.
    Magic(u32),
    /// Warrior strength rating.
    Strength(u32),
}

/// Effect applied when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Restores the provided amount of health.
    Heal(u32),
}

/// Items that can be carried in an [`Inventory`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    /// Equippable weapon adding damage to attacks.
    Weapon {
        /// Inventory key of the weapon.
        name: String,
        /// Flavour text.
        description: String,
        /// Damage contributed while equipped.
        damage: u32,
    },
    /// Single-use item applying an [`Effect`].
    Consumable {
        /// Inventory key of the consumable.
        name: String,
        /// Flavour text.
        description: String,
        /// Effect applied on use.
        effect: Effect,
    },
    /// Coins used for transactions.
    Gold {
        /// Number of coins.
        amount: u32,
    },
}

impl Item {
    /// Name under which the item is counted in an inventory.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon { name, .. } | Self::Consumable { name, .. } => name,
            Self::Gold { .. } => "Gold",
        }
    }

    /// Flavour text describing the item.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Weapon { description, .. } | Self::Consumable { description, .. } => {
                description.clone()
            }
            Self::Gold { amount } => format!("{amount} gold coins"),
        }
    }

    /// Reports whether using the item consumes it.
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        matches!(self, Self::Consumable { .. })
    }

    /// Reports whether the item can be equipped as a weapon.
    #[must_use]
    pub const fn is_equippable(&self) -> bool {
        matches!(self, Self::Weapon { .. })
    }
}

/// Item counts keyed by item name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`.
    pub fn add(&mut self, item: &Item) {
        let count = self.items.entry(item.name().to_owned()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Removes one unit of `item`, dropping the entry when it reaches zero.
    ///
    /// Returns `false` when the item was not held.
    pub fn remove(&mut self, item: &Item) -> bool {
        let Some(count) = self.items.get_mut(item.name()) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            let _ = self.items.remove(item.name());
        }
        true
    }

    /// Reports whether at least one unit of `item` is held.
    #[must_use]
    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains_key(item.name())
    }

    /// Number of units held under `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Iterator over `(name, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Reports whether the inventory holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of [`Character::use_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemUse {
    /// A consumable was used up and its effect applied.
    Consumed,
    /// A weapon was equipped.
    Equipped,
    /// The item is not in the inventory.
    NotHeld,
    /// The item is held but has no use action.
    NotUsable,
}

/// Player character created on the selection screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    name: String,
    class: CharacterClass,
    health: u32,
    defense: u32,
    dodge: u32,
    level: u32,
    experience: u32,
    class_trait: ClassTrait,
    inventory: Inventory,
    weapon: Option<String>,
}

impl Character {
    /// Creates a character of `class` named after the class.
    #[must_use]
    pub fn new(class: CharacterClass) -> Self {
        Self::named(class, class.label())
    }

    /// Creates a character of `class` with an explicit name.
    #[must_use]
    pub fn named(class: CharacterClass, name: impl Into<String>) -> Self {
        let preset = class.preset();
        Self {
            name: name.into(),
            class,
            health: preset.health,
            defense: preset.defense,
            dodge: preset.dodge,
            level: 1,
            experience: 0,
            class_trait: preset.class_trait,
            inventory: Inventory::new(),
            weapon: None,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class chosen at creation.
    #[must_use]
    pub const fn class(&self) -> CharacterClass {
        self.class
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Flat damage reduction.
    #[must_use]
    pub const fn defense(&self) -> u32 {
        self.defense
    }

    /// Dodge chance in percent.
    #[must_use]
    pub const fn dodge(&self) -> u32 {
        self.dodge
    }

    /// Experience level, starting at one.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Accumulated experience.
    #[must_use]
    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Class-specific flavour attribute.
    #[must_use]
    pub const fn class_trait(&self) -> ClassTrait {
        self.class_trait
    }

    /// Items carried by the character.
    #[must_use]
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable access to the carried items.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Name of the equipped weapon, if any.
    #[must_use]
    pub fn weapon(&self) -> Option<&str> {
        self.weapon.as_deref()
    }

    /// Equips `item` when it is a weapon held in the inventory.
    pub fn equip_weapon(&mut self, item: &Item) -> bool {
        if !item.is_equippable() || !self.inventory.contains(item) {
            return false;
        }
        self.weapon = Some(item.name().to_owned());
        true
    }

    /// Uses `item` from the inventory.
    pub fn use_item(&mut self, item: &Item) -> ItemUse {
        if !self.inventory.contains(item) {
            return ItemUse::NotHeld;
        }
        match item {
            Item::Consumable { effect, .. } => {
                match effect {
                    Effect::Heal(amount) => self.health = self.health.saturating_add(*amount),
                }
                let _ = self.inventory.remove(item);
                ItemUse::Consumed
            }
            Item::Weapon { .. } => {
                let _ = self.equip_weapon(item);
                ItemUse::Equipped
            }
            Item::Gold { .. } => ItemUse::NotUsable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion() -> Item {
        Item::Consumable {
            name: "Potion".to_owned(),
            description: "A red draught.".to_owned(),
            effect: Effect::Heal(15),
        }
    }

    fn dagger() -> Item {
        Item::Weapon {
            name: "Dagger".to_owned(),
            description: "Short and sharp.".to_owned(),
            damage: 4,
        }
    }

    #[test]
    fn class_presets_match_table() {
        let rogue = Character::new(CharacterClass::Rogue);
        assert_eq!(
            (rogue.health(), rogue.defense(), rogue.dodge()),
            (100, 10, 20)
        );
        assert_eq!(rogue.class_trait(), ClassTrait::Stealth(10));

        let wizard = Character::new(CharacterClass::Wizard);
        assert_eq!(
            (wizard.health(), wizard.defense(), wizard.dodge()),
            (80, 10, 10)
        );
        assert_eq!(wizard.class_trait(), ClassTrait::Magic(10));

        let warrior = Character::new(CharacterClass::Warrior);
        assert_eq!(
            (warrior.health(), warrior.defense(), warrior.dodge()),
            (120, 20, 5)
        );
        assert_eq!(warrior.class_trait(), ClassTrait::Strength(10));
        assert_eq!(warrior.name(), "Warrior");
        assert_eq!(warrior.level(), 1);
        assert_eq!(warrior.experience(), 0);
        assert!(warrior.weapon().is_none());
    }

    #[test]
    fn inventory_counts_by_name() {
        let mut inventory = Inventory::new();
        inventory.add(&potion());
        inventory.add(&potion());
        inventory.add(&Item::Gold { amount: 5 });
        inventory.add(&Item::Gold { amount: 30 });

        assert_eq!(inventory.count("Potion"), 2);
        assert_eq!(inventory.count("Gold"), 2);

        assert!(inventory.remove(&potion()));
        assert!(inventory.remove(&potion()));
        assert!(!inventory.contains(&potion()));
        assert!(!inventory.remove(&potion()));
        assert_eq!(
            inventory.iter().collect::<Vec<_>>(),
            vec![("Gold", 2)],
            "emptied entries must be dropped"
        );
    }

    #[test]
    fn gold_describes_its_amount() {
        let gold = Item::Gold { amount: 12 };
        assert_eq!(gold.name(), "Gold");
        assert_eq!(gold.description(), "12 gold coins");
        assert!(!gold.is_usable());
        assert!(!gold.is_equippable());
    }

    #[test]
    fn using_consumable_heals_and_consumes() {
        let mut wizard = Character::new(CharacterClass::Wizard);
        wizard.inventory_mut().add(&potion());

        assert_eq!(wizard.use_item(&potion()), ItemUse::Consumed);
        assert_eq!(wizard.health(), 95);
        assert_eq!(wizard.use_item(&potion()), ItemUse::NotHeld);
    }

    #[test]
    fn weapons_equip_only_when_held() {
        let mut rogue = Character::new(CharacterClass::Rogue);
        assert!(!rogue.equip_weapon(&dagger()));

        rogue.inventory_mut().add(&dagger());
        assert_eq!(rogue.use_item(&dagger()), ItemUse::Equipped);
        assert_eq!(rogue.weapon(), Some("Dagger"));
        assert_eq!(rogue.inventory().count("Dagger"), 1);

        rogue.inventory_mut().add(&potion());
        assert!(!rogue.equip_weapon(&potion()));
        assert_eq!(rogue.weapon(), Some("Dagger"));
    }

    #[test]
    fn gold_is_not_usable() {
        let mut warrior = Character::new(CharacterClass::Warrior);
        warrior.inventory_mut().add(&Item::Gold { amount: 3 });
        assert_eq!(
            warrior.use_item(&Item::Gold { amount: 3 }),
            ItemUse::NotUsable
        );
        assert_eq!(warrior.inventory().count("Gold"), 1);
    }
}
