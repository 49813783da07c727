//! Creature records and their registry state.

use crate::behavior::BehaviorRef;
use crate::codec::{struct_from_raw, struct_to_raw, FieldDef, FieldError, FieldMapped, FieldValue};
use crate::field;
use crate::raw::RawValue;
use crate::registry::{Handle, RecordData};

use super::{SpellRecord, StyleRecord};

/// Shadow sprite tuning, copied field-by-field onto derived variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadeSpec {
    pub enabled: bool,
    pub ground_path: String,
    pub egg_path: String,
    pub juvenile_path: String,
}

impl FieldMapped for ShadeSpec {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ShadeSpec>] = &[
            field!(ShadeSpec, enabled),
            field!(ShadeSpec, ground_path),
            field!(ShadeSpec, egg_path),
            field!(ShadeSpec, juvenile_path),
        ];
        FIELDS
    }
}

impl FieldValue for ShadeSpec {
    fn to_raw(&self) -> RawValue {
        struct_to_raw(self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        struct_from_raw(raw)
    }
}

/// An RGBA color parsed from an authored hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Rgba> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Rgba { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: 255 }),
            8 => Some(Rgba { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: channel(6)? }),
            _ => None,
        }
    }
}

/// One creature species or variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatureRecord {
    pub id: String,
    /// Templates are cloning sources only; generative routines skip them.
    pub is_template: bool,
    /// Inherit squad size from this record when set.
    pub base_id: String,
    pub squad_size: u32,
    pub is_humanoid: bool,
    /// Set on derived zombie variants; they never derive again.
    pub is_zombie: bool,
    pub is_aquatic: bool,
    pub can_become_zombie: bool,
    pub zombie_auto_derive: bool,
    pub sprite_path: String,
    pub head_sprite_path: String,
    /// Zombie-specific art. When absent the variant reuses the original
    /// sprites and flags dynamic recoloring instead.
    pub zombie_sprite_path: String,
    pub zombie_head_sprite_path: String,
    pub dynamic_sprite_zombie: bool,
    pub has_swim_animation: bool,
    pub shade: ShadeSpec,
    pub color_hex: String,
    pub sound_path: String,
    pub style_id: String,
    pub spell_ids: Vec<String>,
    /// Trait ids granted to this creature by default; trait linking scans
    /// these to build its back-links.
    pub default_trait_ids: Vec<String>,
    pub flip_check: BehaviorRef,
    pub death_action: BehaviorRef,
    pub special_death_action: bool,
    pub unlocked_with_achievement: bool,
    pub achievement_id: String,

    // Post-link state.
    pub style: Option<Handle<StyleRecord>>,
    pub spells: Vec<Handle<SpellRecord>>,
    pub color: Option<Rgba>,
}

impl CreatureRecord {
    /// Id given to the derived zombie variant.
    pub fn zombie_id(&self) -> String {
        format!("{}_zombie", self.id)
    }

    /// A variant is synthesized only for non-template records that opt in.
    /// Derived variants come out ineligible, which makes re-running the
    /// derivation on them a no-op.
    pub fn zombie_eligible(&self) -> bool {
        !self.is_template && self.zombie_auto_derive && self.can_become_zombie
    }
}

impl FieldMapped for CreatureRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<CreatureRecord>] = &[
            field!(CreatureRecord, id),
            field!(CreatureRecord, is_template),
            field!(CreatureRecord, base_id),
            field!(CreatureRecord, squad_size),
            field!(CreatureRecord, is_humanoid),
            field!(CreatureRecord, is_zombie),
            field!(CreatureRecord, is_aquatic),
            field!(CreatureRecord, can_become_zombie),
            field!(CreatureRecord, zombie_auto_derive),
            field!(CreatureRecord, sprite_path),
            field!(CreatureRecord, head_sprite_path),
            field!(CreatureRecord, zombie_sprite_path),
            field!(CreatureRecord, zombie_head_sprite_path),
            field!(CreatureRecord, dynamic_sprite_zombie),
            field!(CreatureRecord, has_swim_animation),
            field!(CreatureRecord, shade),
            field!(CreatureRecord, color_hex),
            field!(CreatureRecord, sound_path),
            field!(CreatureRecord, style_id),
            field!(CreatureRecord, spell_ids),
            field!(CreatureRecord, default_trait_ids),
            field!(CreatureRecord, flip_check),
            field!(CreatureRecord, death_action),
            field!(CreatureRecord, special_death_action),
            field!(CreatureRecord, unlocked_with_achievement),
            field!(CreatureRecord, achievement_id),
        ];
        FIELDS
    }
}

/// Creature registry link state.
#[derive(Debug, Default)]
pub struct CreatureAux {
    /// Linked humanoids, excluding zombie variants.
    pub humanoid_count: u32,
    /// Creatures that travel on water, for spawn placement.
    pub aquatic: Vec<Handle<CreatureRecord>>,
}

impl RecordData for CreatureRecord {
    type Aux = CreatureAux;

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
    fn test_roundtrip_including_behavior_and_shade() {
        let mut wolf = CreatureRecord::default();
        wolf.id = "wolf".into();
        wolf.can_become_zombie = true;
        wolf.squad_size = 4;
        wolf.shade =
            ShadeSpec { enabled: true, ground_path: "shade/wolf".into(), ..Default::default() };
        wolf.flip_check = BehaviorRef::always();

        let raw = encode(&wolf);
        let back: CreatureRecord = decode(&raw).unwrap();
        assert_eq!(wolf, back);
        assert_eq!(back.flip_check.name(), Some(crate::behavior::ALWAYS));
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(Rgba::from_hex("#8040ff"), Some(Rgba { r: 128, g: 64, b: 255, a: 255 }));
        assert_eq!(Rgba::from_hex("00000080"), Some(Rgba { r: 0, g: 0, b: 0, a: 128 }));
        assert_eq!(Rgba::from_hex("#abc"), None);
        assert_eq!(Rgba::from_hex("zzzzzz"), None);
    }

    #[test]
    fn test_zombie_eligibility_guards() {
        let mut rec = CreatureRecord::default();
        rec.id = "wolf".into();
        rec.can_become_zombie = true;
        rec.zombie_auto_derive = true;
        assert!(rec.zombie_eligible());
        assert_eq!(rec.zombie_id(), "wolf_zombie");

        rec.is_template = true;
        assert!(!rec.zombie_eligible());
    }
}
