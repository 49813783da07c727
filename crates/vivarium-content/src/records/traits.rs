//! Trait records: species, creature, and culture families.
//!
//! The families share a common core (opposites, removals, icon, random
//! grants, achievement gating) linked by one generic routine; each family
//! adds its own pools and exclusivity predicates on top.

use crate::behavior::BehaviorRef;
use crate::codec::{FieldDef, FieldError, FieldMapped, FieldValue};
use crate::directory::BuiltinRecord;
use crate::field;
use crate::pool::Pool;
use crate::raw::RawValue;
use crate::registry::{Handle, RecordData};

use super::CreatureRecord;

/// How often a trait surfaces in weighted pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Pool insertion rate: a trait enters a weighted pool this many times.
    pub fn rate(self) -> u32 {
        match self {
            Rarity::Common => 10,
            Rarity::Uncommon => 6,
            Rarity::Rare => 3,
            Rarity::Mythic => 1,
        }
    }

    fn from_index(index: i64) -> Option<Rarity> {
        match index {
            0 => Some(Rarity::Common),
            1 => Some(Rarity::Uncommon),
            2 => Some(Rarity::Rare),
            3 => Some(Rarity::Mythic),
            _ => None,
        }
    }
}

impl FieldValue for Rarity {
    fn to_raw(&self) -> RawValue {
        RawValue::Int(*self as i64)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Int(i) => {
                Rarity::from_index(*i).ok_or(FieldError::Expected {
                    expected: "rarity index in 0..=3",
                    got: "out-of-range integer",
                })
            }
            other => Err(FieldError::expected("rarity index", other)),
        }
    }
}

/// Fields shared by every trait family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitCore {
    pub opposite_ids: Vec<String>,
    pub remove_trait_ids: Vec<String>,
    pub icon_path: String,
    pub random_grant_allowed: bool,
    pub random_grant_rate: u32,
    pub unlocked_with_achievement: bool,
    pub achievement_id: String,

    /// Creatures declaring this trait as a default, resolved at link time.
    pub default_for: Vec<Handle<CreatureRecord>>,
}

impl TraitCore {
    /// Record an opposite by id, keeping the list duplicate-free.
    pub fn add_opposite(&mut self, id: &str) {
        if !self.opposite_ids.iter().any(|existing| existing == id) {
            self.opposite_ids.push(id.to_string());
        }
    }
}

/// Shared-core access for the generic trait linking routine.
pub trait TraitRecord: BuiltinRecord {
    fn core(&self) -> &TraitCore;
    fn core_mut(&mut self) -> &mut TraitCore;
    fn opposites_mut(&mut self) -> &mut Vec<Handle<Self>>;
    fn removes_mut(&mut self) -> &mut Vec<Handle<Self>>;
    fn random_pool(aux: &mut Self::Aux) -> &mut Pool<Handle<Self>>;
}

// ── Species traits ──────────────────────────────────────────────────────

/// A heritable species trait (skins, morphs, egg types).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesTraitRecord {
    pub id: String,
    pub core: TraitCore,
    /// Owning pigment; linking back-fills the pigment's trait id and
    /// copies its priority here.
    pub pigment_id: String,
    pub priority: i32,
    /// Exclusivity predicates. All traits sharing a set predicate become
    /// mutual opposites during linking.
    pub mutation_skin: bool,
    pub pigment_skin: bool,
    pub pigment_egg: bool,
    pub rarity: Rarity,
    pub mutation_pool_add: bool,
    pub mutation_pool_remove: bool,
    pub hatch_action: BehaviorRef,
    pub has_hatch_action: bool,

    // Post-link state.
    pub opposites: Vec<Handle<SpeciesTraitRecord>>,
    pub removes: Vec<Handle<SpeciesTraitRecord>>,
}

impl FieldMapped for SpeciesTraitRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<SpeciesTraitRecord>] = &[
            field!(SpeciesTraitRecord, id),
            field!(SpeciesTraitRecord, pigment_id),
            field!(SpeciesTraitRecord, priority),
            field!(SpeciesTraitRecord, mutation_skin),
            field!(SpeciesTraitRecord, pigment_skin),
            field!(SpeciesTraitRecord, pigment_egg),
            field!(SpeciesTraitRecord, rarity),
            field!(SpeciesTraitRecord, mutation_pool_add),
            field!(SpeciesTraitRecord, mutation_pool_remove),
            field!(SpeciesTraitRecord, hatch_action),
            field!(SpeciesTraitRecord, has_hatch_action),
            field!(SpeciesTraitRecord, opposite_ids: core.opposite_ids),
            field!(SpeciesTraitRecord, remove_trait_ids: core.remove_trait_ids),
            field!(SpeciesTraitRecord, icon_path: core.icon_path),
            field!(SpeciesTraitRecord, random_grant_allowed: core.random_grant_allowed),
            field!(SpeciesTraitRecord, random_grant_rate: core.random_grant_rate),
            field!(SpeciesTraitRecord, unlocked_with_achievement: core.unlocked_with_achievement),
            field!(SpeciesTraitRecord, achievement_id: core.achievement_id),
        ];
        FIELDS
    }
}

/// Species trait registry link state.
#[derive(Debug, Default)]
pub struct SpeciesTraitAux {
    pub random_grant: Pool<Handle<SpeciesTraitRecord>>,
    /// Mutation pools, weighted by rarity rate.
    pub mutation_add: Pool<Handle<SpeciesTraitRecord>>,
    pub mutation_remove: Pool<Handle<SpeciesTraitRecord>>,
}

impl RecordData for SpeciesTraitRecord {
    type Aux = SpeciesTraitAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl TraitRecord for SpeciesTraitRecord {
    fn core(&self) -> &TraitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TraitCore {
        &mut self.core
    }

    fn opposites_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.opposites
    }

    fn removes_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.removes
    }

    fn random_pool(aux: &mut Self::Aux) -> &mut Pool<Handle<Self>> {
        &mut aux.random_grant
    }
}

// ── Creature traits ─────────────────────────────────────────────────────

/// A trait acquired by individual creatures during play.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatureTraitRecord {
    pub id: String,
    pub core: TraitCore,
    pub combat_training: bool,
    pub mutation_box_allowed: bool,
    /// Weighted pool rates; zero keeps the trait out of that pool.
    pub grow_up_rate: u32,
    pub birth_rate: u32,
    pub era_night: bool,
    pub era_moon: bool,
    pub era_only: bool,

    // Post-link state.
    pub opposites: Vec<Handle<CreatureTraitRecord>>,
    pub removes: Vec<Handle<CreatureTraitRecord>>,
}

impl FieldMapped for CreatureTraitRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<CreatureTraitRecord>] = &[
            field!(CreatureTraitRecord, id),
            field!(CreatureTraitRecord, combat_training),
            field!(CreatureTraitRecord, mutation_box_allowed),
            field!(CreatureTraitRecord, grow_up_rate),
            field!(CreatureTraitRecord, birth_rate),
            field!(CreatureTraitRecord, era_night),
            field!(CreatureTraitRecord, era_moon),
            field!(CreatureTraitRecord, era_only),
            field!(CreatureTraitRecord, opposite_ids: core.opposite_ids),
            field!(CreatureTraitRecord, remove_trait_ids: core.remove_trait_ids),
            field!(CreatureTraitRecord, icon_path: core.icon_path),
            field!(CreatureTraitRecord, random_grant_allowed: core.random_grant_allowed),
            field!(CreatureTraitRecord, random_grant_rate: core.random_grant_rate),
            field!(CreatureTraitRecord, unlocked_with_achievement: core.unlocked_with_achievement),
            field!(CreatureTraitRecord, achievement_id: core.achievement_id),
        ];
        FIELDS
    }
}

/// Creature trait registry link state.
#[derive(Debug, Default)]
pub struct CreatureTraitAux {
    pub random_grant: Pool<Handle<CreatureTraitRecord>>,
    pub combat_training: Vec<Handle<CreatureTraitRecord>>,
    pub mutation_box: Vec<Handle<CreatureTraitRecord>>,
    pub grow_up: Pool<Handle<CreatureTraitRecord>>,
    pub birth: Pool<Handle<CreatureTraitRecord>>,
}

impl RecordData for CreatureTraitRecord {
    type Aux = CreatureTraitAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl TraitRecord for CreatureTraitRecord {
    fn core(&self) -> &TraitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TraitCore {
        &mut self.core
    }

    fn opposites_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.opposites
    }

    fn removes_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.removes
    }

    fn random_pool(aux: &mut Self::Aux) -> &mut Pool<Handle<Self>> {
        &mut aux.random_grant
    }
}

// ── Culture traits ──────────────────────────────────────────────────────

/// A trait carried by whole cultures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CultureTraitRecord {
    pub id: String,
    pub core: TraitCore,
    /// Settlement ground plans are mutually exclusive.
    pub settlement_plan: bool,

    // Post-link state.
    pub opposites: Vec<Handle<CultureTraitRecord>>,
    pub removes: Vec<Handle<CultureTraitRecord>>,
}

impl FieldMapped for CultureTraitRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<CultureTraitRecord>] = &[
            field!(CultureTraitRecord, id),
            field!(CultureTraitRecord, settlement_plan),
            field!(CultureTraitRecord, opposite_ids: core.opposite_ids),
            field!(CultureTraitRecord, remove_trait_ids: core.remove_trait_ids),
            field!(CultureTraitRecord, icon_path: core.icon_path),
            field!(CultureTraitRecord, random_grant_allowed: core.random_grant_allowed),
            field!(CultureTraitRecord, random_grant_rate: core.random_grant_rate),
            field!(CultureTraitRecord, unlocked_with_achievement: core.unlocked_with_achievement),
            field!(CultureTraitRecord, achievement_id: core.achievement_id),
        ];
        FIELDS
    }
}

/// Culture trait registry link state.
#[derive(Debug, Default)]
pub struct CultureTraitAux {
    pub random_grant: Pool<Handle<CultureTraitRecord>>,
}

impl RecordData for CultureTraitRecord {
    type Aux = CultureTraitAux;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

impl TraitRecord for CultureTraitRecord {
    fn core(&self) -> &TraitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut TraitCore {
        &mut self.core
    }

    fn opposites_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.opposites
    }

    fn removes_mut(&mut self) -> &mut Vec<Handle<Self>> {
        &mut self.removes
    }

    fn random_pool(aux: &mut Self::Aux) -> &mut Pool<Handle<Self>> {
        &mut aux.random_grant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode, encode};
    use crate::raw::{RawRecord, RawValue};

    #[test]
    fn test_rarity_rates_and_coercion() {
        assert_eq!(Rarity::Common.rate(), 10);
        assert_eq!(Rarity::Mythic.rate(), 1);

        let raw: RawRecord = [
            ("id".to_string(), RawValue::Str("bold".into())),
            ("rarity".to_string(), RawValue::Int(2)),
        ]
        .into_iter()
        .collect();
        let rec: SpeciesTraitRecord = decode(&raw).unwrap();
        assert_eq!(rec.rarity, Rarity::Rare);

        let bad: RawRecord =
            [("rarity".to_string(), RawValue::Int(12))].into_iter().collect();
        assert!(decode::<SpeciesTraitRecord>(&bad).is_err());
    }

    #[test]
    fn test_core_fields_flatten_into_the_record_map() {
        let mut rec = SpeciesTraitRecord::default();
        rec.id = "bold".into();
        rec.core.opposite_ids = vec!["timid".into()];
        rec.core.random_grant_rate = 4;

        let raw = encode(&rec);
        assert!(raw.contains_key("opposite_ids"));
        assert!(raw.contains_key("random_grant_rate"));
        assert!(!raw.contains_key("core"));

        let back: SpeciesTraitRecord = decode(&raw).unwrap();
        assert_eq!(rec, back);
    }

    #[test]
    fn test_add_opposite_deduplicates() {
        let mut core = TraitCore::default();
        core.add_opposite("timid");
        core.add_opposite("timid");
        core.add_opposite("meek");
        assert_eq!(core.opposite_ids, ["timid", "meek"]);
    }
}
