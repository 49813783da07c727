//! Spells, statuses, hotkeys, achievements, and pigments.

use crate::behavior::BehaviorRef;
use crate::codec::{FieldDef, FieldMapped};
use crate::field;
use crate::kind::Kind;
use crate::registry::{Handle, RecordData};

/// A castable spell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellRecord {
    pub id: String,
    /// Statuses the spell applies, resolved to handles at link time.
    pub status_ids: Vec<String>,

    // Post-link state.
    pub statuses: Vec<Handle<StatusRecord>>,
}

impl FieldMapped for SpellRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<SpellRecord>] =
            &[field!(SpellRecord, id), field!(SpellRecord, status_ids)];
        FIELDS
    }
}

impl RecordData for SpellRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// A status effect carried by creatures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRecord {
    pub id: String,
    pub texture: String,
    pub sprite_override: BehaviorRef,
    pub sprite_position_override: BehaviorRef,

    // Derived flags.
    pub has_sprite_override: bool,
    pub has_sprite_position_override: bool,
    pub needs_visual_render: bool,
}

impl FieldMapped for StatusRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<StatusRecord>] = &[
            field!(StatusRecord, id),
            field!(StatusRecord, texture),
            field!(StatusRecord, sprite_override),
            field!(StatusRecord, sprite_position_override),
            field!(StatusRecord, has_sprite_override),
            field!(StatusRecord, has_sprite_position_override),
            field!(StatusRecord, needs_visual_render),
        ];
        FIELDS
    }
}

impl RecordData for StatusRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// A rebindable input binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotkeyRecord {
    pub id: String,
    pub default_keys: Vec<String>,
    pub default_mods: Vec<String>,
    /// Live bindings; linking seeds them from the defaults, user
    /// preferences overwrite them later.
    pub bound_keys: Vec<String>,
    pub bound_mods: Vec<String>,
    pub press_action: BehaviorRef,
    pub hold_action: BehaviorRef,
}

impl FieldMapped for HotkeyRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<HotkeyRecord>] = &[
            field!(HotkeyRecord, id),
            field!(HotkeyRecord, default_keys),
            field!(HotkeyRecord, default_mods),
            field!(HotkeyRecord, bound_keys),
            field!(HotkeyRecord, bound_mods),
            field!(HotkeyRecord, press_action),
            field!(HotkeyRecord, hold_action),
        ];
        FIELDS
    }
}

/// Hotkey registry link state.
#[derive(Debug, Default)]
pub struct HotkeyAux {
    /// Every modifier key any binding uses, in link order.
    pub mod_keys: Vec<String>,
    /// Bindings that carry a press or hold action.
    pub action_hotkeys: Vec<Handle<HotkeyRecord>>,
}

impl RecordData for HotkeyRecord {
    type Aux = HotkeyAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// An achievement; other records bind themselves to its unlock list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementRecord {
    pub id: String,
    pub hidden: bool,

    // Post-link state.
    pub unlocks_something: bool,
    /// Records unlocked by earning this achievement, appended during the
    /// single linking pass (each record binds at most once).
    pub unlocks: Vec<(Kind, String)>,
}

impl FieldMapped for AchievementRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<AchievementRecord>] =
            &[field!(AchievementRecord, id), field!(AchievementRecord, hidden)];
        FIELDS
    }
}

impl RecordData for AchievementRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// A pigment morph: a named color range for creature coats.
#[derive(Debug, Clone, PartialEq)]
pub struct PigmentRecord {
    pub id: String,
    pub priority: i32,
    pub shade_from: String,
    pub shade_to: String,

    // Post-link state.
    /// Sequential index assigned at link time, in link order. `-1` until
    /// linked; never reassigned afterward.
    pub index: i32,
    /// Back-link filled by the species trait that owns this pigment.
    pub trait_id: String,
}

impl Default for PigmentRecord {
    fn default() -> Self {
        PigmentRecord {
            id: String::new(),
            priority: 0,
            shade_from: String::new(),
            shade_to: String::new(),
            index: -1,
            trait_id: String::new(),
        }
    }
}

impl FieldMapped for PigmentRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<PigmentRecord>] = &[
            field!(PigmentRecord, id),
            field!(PigmentRecord, priority),
            field!(PigmentRecord, shade_from),
            field!(PigmentRecord, shade_to),
        ];
        FIELDS
    }
}

/// Pigment registry link state.
#[derive(Debug, Default)]
pub struct PigmentAux {
    /// Pigments already linked; the next record's index.
    pub linked_count: u32,
    /// Index to id, in assignment order.
    pub by_index: Vec<String>,
}

impl RecordData for PigmentRecord {
    type Aux = PigmentAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};

    #[test]
    fn test_spell_and_status_roundtrip() {
        let mut spell = SpellRecord::default();
        spell.id = "regrowth".into();
        spell.status_ids = vec!["mending".into()];
        let back: SpellRecord = decode(&encode(&spell)).unwrap();
        assert_eq!(spell, back);

        let mut status = StatusRecord::default();
        status.id = "mending".into();
        status.texture = "effects/mending".into();
        let back: StatusRecord = decode(&encode(&status)).unwrap();
        assert_eq!(status, back);
    }

    #[test]
    fn test_achievement_unlock_list_is_not_declared() {
        let mut ach = AchievementRecord::default();
        ach.id = "first_hunt".into();
        ach.unlocks.push((Kind::Creature, "wolf".into()));

        let raw = encode(&ach);
        assert!(!raw.contains_key("unlocks"));

        let back: AchievementRecord = decode(&raw).unwrap();
        assert!(back.unlocks.is_empty());
    }
}
