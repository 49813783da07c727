//! Equipment, item modifiers, and resources.

use indexmap::IndexMap;

use crate::codec::{FieldDef, FieldMapped};
use crate::field;
use crate::pool::Pool;
use crate::registry::{Handle, RecordData};

/// Pool names an item modifier may enter.
pub const MOD_POOLS: [&str; 3] = ["weapon", "armor", "accessory"];

/// A tradeable resource; items price themselves from these.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceRecord {
    pub id: String,
    pub coin_value: u32,
}

impl FieldMapped for ResourceRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ResourceRecord>] =
            &[field!(ResourceRecord, id), field!(ResourceRecord, coin_value)];
        FIELDS
    }
}

impl RecordData for ResourceRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// One piece of equipment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRecord {
    pub id: String,
    pub modifier_ids: Vec<String>,
    /// Drawn from the weapon pool by loot tables.
    pub pool_weapon: bool,
    pub icon_path: String,
    pub combat_sprite_path: String,
    pub cost_resource_1: String,
    pub cost_resource_2: String,
    /// Derived: coin value of the crafting resources.
    pub coin_cost: u32,
    pub unlocked_with_achievement: bool,
    pub achievement_id: String,

    /// Resolved modifiers; a slot stays `None` when its id is missing.
    pub modifiers: Vec<Option<Handle<ItemModifierRecord>>>,
}

impl FieldMapped for ItemRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ItemRecord>] = &[
            field!(ItemRecord, id),
            field!(ItemRecord, modifier_ids),
            field!(ItemRecord, pool_weapon),
            field!(ItemRecord, icon_path),
            field!(ItemRecord, combat_sprite_path),
            field!(ItemRecord, cost_resource_1),
            field!(ItemRecord, cost_resource_2),
            field!(ItemRecord, coin_cost),
            field!(ItemRecord, unlocked_with_achievement),
            field!(ItemRecord, achievement_id),
        ];
        FIELDS
    }
}

impl RecordData for ItemRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// A modifier applied to generated equipment (quality prefixes and the like).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemModifierRecord {
    pub id: String,
    /// Weighted-pool insertion count.
    pub rarity_rate: u32,
    /// Which of [`MOD_POOLS`] this modifier enters.
    pub pools: Vec<String>,
    pub unlocked_with_achievement: bool,
    pub achievement_id: String,
}

impl FieldMapped for ItemModifierRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ItemModifierRecord>] = &[
            field!(ItemModifierRecord, id),
            field!(ItemModifierRecord, rarity_rate),
            field!(ItemModifierRecord, pools),
            field!(ItemModifierRecord, unlocked_with_achievement),
            field!(ItemModifierRecord, achievement_id),
        ];
        FIELDS
    }
}

/// Modifier registry link state: one weighted pool per equipment slot class.
#[derive(Debug, Default)]
pub struct ItemModifierAux {
    pub pools: IndexMap<String, Pool<Handle<ItemModifierRecord>>>,
}

impl ItemModifierAux {
    /// Pool for a slot class, created empty on first use.
    pub fn pool_mut(&mut self, name: &str) -> &mut Pool<Handle<ItemModifierRecord>> {
        self.pools.entry(name.to_string()).or_default()
    }
}

impl RecordData for ItemModifierRecord {
    type Aux = ItemModifierAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
