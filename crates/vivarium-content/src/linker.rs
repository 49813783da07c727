//! The linking engine: per-kind dispatch over the load journal.
//!
//! After all loading completes, `resolve_all` walks every record in load
//! order and invokes its kind's resolution routine exactly once. Built-in
//! kinds dispatch through a closed table; extension kinds (and built-in
//! kinds the table leaves out) fall through to routines registered at
//! runtime. A record whose kind has neither gets a warning and is left
//! untouched, and the pass continues.
//!
//! Synthesized records (zombie variants, generated structures) are added
//! to their registries mid-pass but are not themselves linked: the journal
//! is snapshotted when the pass starts, and linking is not re-entrant.

use std::collections::HashMap;

use thiserror::Error;

use crate::directory::{ContentDirectory, DirectoryError};
use crate::kind::Kind;
use crate::link;
use crate::registry::RegistryError;

/// Errors that abort a linking pass or reject a registration.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A routine needed a registry kind that does not exist. Structural,
    /// always fatal.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("kind `{0}` already has a custom linker")]
    DuplicateLinker(String),
    #[error("linking has already started")]
    LinkingStarted,
}

/// A built-in resolution routine.
pub type LinkFn = fn(&mut ContentDirectory, &str) -> Result<(), LinkError>;

/// An externally registered resolution routine. It receives the directory
/// and the record id; the record is reachable through its kind's registry.
pub type CustomLinkFn =
    Box<dyn Fn(&mut ContentDirectory, &str) -> Result<(), LinkError> + Send + Sync>;

/// Counts reported by a completed pass.
#[derive(Debug, Default)]
pub struct LinkStats {
    pub resolved: u32,
    /// Records whose kind had no routine at all.
    pub skipped: u32,
}

/// Dispatches resolution routines and owns the custom-routine table.
pub struct Linker {
    custom: HashMap<String, CustomLinkFn>,
    started: bool,
}

impl Linker {
    pub fn new() -> Linker {
        Linker { custom: HashMap::new(), started: false }
    }

    /// Register a resolution routine for a kind the built-in table does
    /// not cover.
    ///
    /// A second registration for the same kind is rejected and the first
    /// routine retained. Registration after the pass has started is
    /// rejected outright.
    pub fn register_linker(&mut self, tag: &str, routine: CustomLinkFn) -> Result<(), LinkError> {
        if self.started {
            log::error!("custom linker for `{tag}` rejected: linking has already started");
            return Err(LinkError::LinkingStarted);
        }
        if self.custom.contains_key(tag) {
            log::error!("kind `{tag}` already has a custom linker; keeping the first");
            return Err(LinkError::DuplicateLinker(tag.to_string()));
        }
        self.custom.insert(tag.to_string(), routine);
        Ok(())
    }

    /// Run the full linking pass over everything loaded so far, in load
    /// order. Runs at most once per linker.
    pub fn resolve_all(&mut self, dir: &mut ContentDirectory) -> Result<LinkStats, LinkError> {
        if self.started {
            return Err(LinkError::LinkingStarted);
        }
        self.started = true;

        dir.reset_link_state();
        let journal: Vec<(Kind, String)> = dir.journal().to_vec();

        let mut stats = LinkStats::default();
        for (kind, id) in &journal {
            if self.resolve_one(dir, kind, id)? {
                stats.resolved += 1;
            } else {
                stats.skipped += 1;
            }
        }
        log::info!("linked {} records, {} had no routine", stats.resolved, stats.skipped);
        Ok(stats)
    }

    /// Dispatch one record: built-in table first, then the custom table,
    /// else warn and leave the record untouched.
    fn resolve_one(
        &self,
        dir: &mut ContentDirectory,
        kind: &Kind,
        id: &str,
    ) -> Result<bool, LinkError> {
        if let Some(routine) = builtin_routine(kind) {
            routine(dir, id)?;
            return Ok(true);
        }
        if let Some(routine) = self.custom.get(kind.tag()) {
            routine(dir, id)?;
            return Ok(true);
        }
        log::warn!("no linker for kind `{kind}` (record `{id}`)");
        Ok(false)
    }
}

impl Default for Linker {
    fn default() -> Self {
        Self::new()
    }
}

/// The closed dispatch table for built-in kinds.
///
/// Achievements and resources are pure data with no routine of their own;
/// they are left to the warn-and-continue path unless an extension
/// registers one.
fn builtin_routine(kind: &Kind) -> Option<LinkFn> {
    match kind {
        Kind::Creature => Some(link::creature::link_creature),
        Kind::Structure => Some(link::structure::link_structure),
        Kind::Style => Some(link::structure::link_style),
        Kind::SpeciesTrait => Some(link::traits::link_species_trait),
        Kind::CreatureTrait => Some(link::traits::link_creature_trait),
        Kind::CultureTrait => Some(link::traits::link_culture_trait),
        Kind::Item => Some(link::items::link_item),
        Kind::ItemModifier => Some(link::items::link_item_modifier),
        Kind::Spell => Some(link::misc::link_spell),
        Kind::Status => Some(link::misc::link_status),
        Kind::Hotkey => Some(link::misc::link_hotkey),
        Kind::Pigment => Some(link::misc::link_pigment),
        Kind::Achievement | Kind::Resource | Kind::Custom(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_units, SourceUnit};
    use crate::raw::RawValue;
    use crate::records::{Footprint, ShadowTuning};

    fn load(units: &[(&str, &str)]) -> ContentDirectory {
        let mut dir = ContentDirectory::new();
        let units: Vec<SourceUnit> =
            units.iter().map(|(name, text)| SourceUnit::new(*name, *text)).collect();
        let report = load_units(&mut dir, &units).expect("load failed");
        assert_eq!(report.skipped, 0, "units skipped: {:?}", report.failed_units);
        dir
    }

    fn link(dir: &mut ContentDirectory) -> LinkStats {
        Linker::new().resolve_all(dir).expect("link failed")
    }

    #[test]
    fn test_wolf_zombie_scenario() {
        let mut dir = load(&[(
            "wolf.creature.json",
            r#"{
                "id": "wolf",
                "can_become_zombie": true,
                "zombie_auto_derive": true,
                "sprite_path": "creatures/wolf",
                "head_sprite_path": "creatures/wolf_head",
                "shade": { "enabled": true, "ground_path": "shade/wolf" }
            }"#,
        )]);
        link(&mut dir);

        assert!(dir.creatures.contains("wolf"));
        let zombie = dir.creatures.get("wolf_zombie").unwrap();
        assert!(!zombie.is_template);
        assert!(zombie.is_zombie);
        // No dedicated zombie art was authored: the variant reuses the
        // original sprites and flags dynamic recoloring.
        assert!(zombie.dynamic_sprite_zombie);
        assert_eq!(zombie.sprite_path, "creatures/wolf");
        assert_eq!(zombie.shade.ground_path, "shade/wolf");
        assert!(zombie.zombie_sprite_path.is_empty());
    }

    #[test]
    fn test_zombie_with_dedicated_art() {
        let mut dir = load(&[(
            "boar.creature.json",
            r#"{
                "id": "boar",
                "can_become_zombie": true,
                "zombie_auto_derive": true,
                "sprite_path": "creatures/boar",
                "zombie_sprite_path": "creatures/boar_zombie",
                "zombie_head_sprite_path": "creatures/boar_zombie_head"
            }"#,
        )]);
        link(&mut dir);

        let zombie = dir.creatures.get("boar_zombie").unwrap();
        assert!(!zombie.dynamic_sprite_zombie);
        assert_eq!(zombie.sprite_path, "creatures/boar_zombie");
        assert_eq!(zombie.head_sprite_path, "creatures/boar_zombie_head");
    }

    #[test]
    fn test_zombie_derivation_is_guarded_against_rerun() {
        let mut dir = load(&[(
            "wolf.creature.json",
            r#"{ "id": "wolf", "can_become_zombie": true, "zombie_auto_derive": true }"#,
        )]);
        link(&mut dir);
        assert_eq!(dir.creatures.len(), 2);

        // The derived record is born ineligible: re-running the synthesis
        // on it creates nothing.
        let zombie = dir.creatures.get("wolf_zombie").unwrap().clone();
        crate::link::creature::generate_zombie(&mut dir, &zombie);
        assert_eq!(dir.creatures.len(), 2);
    }

    #[test]
    fn test_templates_do_not_derive() {
        let mut dir = load(&[(
            "base_beast.creature.json",
            r#"{ "id": "base_beast", "is_template": true, "can_become_zombie": true, "zombie_auto_derive": true }"#,
        )]);
        link(&mut dir);
        assert_eq!(dir.creatures.len(), 1);
    }

    #[test]
    fn test_creature_reference_fixups() {
        let mut dir = load(&[
            ("elder.creature.json", r#"{ "id": "elder", "squad_size": 12, "is_humanoid": true }"#),
            (
                "settler.creature.json",
                r##"{ "id": "settler", "is_humanoid": true, "base_id": "elder", "color_hex": "#804020", "spell_ids": ["regrowth"] }"##,
            ),
            ("heron.creature.json", r#"{ "id": "heron", "is_aquatic": true }"#),
            ("regrowth.spell.json", r#"{ "id": "regrowth" }"#),
        ]);
        link(&mut dir);

        let settler = dir.creatures.get("settler").unwrap();
        assert_eq!(settler.squad_size, 12);
        assert_eq!(settler.color.unwrap().r, 128);
        assert_eq!(settler.spells.len(), 1);
        // Unset flip checks default to the registered always-true behavior.
        assert_eq!(settler.flip_check.name(), Some(crate::behavior::ALWAYS));

        assert_eq!(dir.creatures.aux.humanoid_count, 2);
        assert_eq!(dir.creatures.aux.aquatic.len(), 1);
        let heron = dir.creatures.record(dir.creatures.aux.aquatic[0]);
        assert_eq!(heron.id, "heron");
    }

    #[test]
    fn test_missing_cross_reference_warns_but_does_not_abort() {
        let mut dir = load(&[(
            "settler.creature.json",
            r#"{ "id": "settler", "style_id": "no_such_style", "spell_ids": ["no_such_spell"] }"#,
        )]);
        let stats = link(&mut dir);
        assert_eq!(stats.resolved, 1);

        let settler = dir.creatures.get("settler").unwrap();
        assert!(settler.style.is_none());
        assert!(settler.spells.is_empty());
    }

    #[test]
    fn test_opposite_trait_symmetry() {
        let mut dir = load(&[
            ("bold.species_trait.json", r#"{ "id": "bold", "mutation_skin": true }"#),
            ("timid.species_trait.json", r#"{ "id": "timid", "mutation_skin": true }"#),
            ("plain.species_trait.json", r#"{ "id": "plain" }"#),
        ]);
        link(&mut dir);

        let bold = dir.species_traits.get("bold").unwrap();
        let timid = dir.species_traits.get("timid").unwrap();
        let plain = dir.species_traits.get("plain").unwrap();

        assert_eq!(bold.core.opposite_ids, ["timid"]);
        assert_eq!(timid.core.opposite_ids, ["bold"]);
        assert!(plain.core.opposite_ids.is_empty());

        // Resolved handle sets point back at each other.
        assert_eq!(bold.opposites, [dir.species_traits.resolve("timid").unwrap()]);
        assert_eq!(timid.opposites, [dir.species_traits.resolve("bold").unwrap()]);
    }

    #[test]
    fn test_weighted_pool_cardinality() {
        // rarity 0 = common, rate 10; rarity 3 = mythic, rate 1.
        let mut dir = load(&[
            (
                "bold.species_trait.json",
                r#"{ "id": "bold", "rarity": 3, "mutation_pool_add": true }"#,
            ),
            (
                "verdant.species_trait.json",
                r#"{ "id": "verdant", "rarity": 0, "mutation_pool_add": true, "mutation_pool_remove": true }"#,
            ),
        ]);
        link(&mut dir);

        let bold = dir.species_traits.resolve("bold").unwrap();
        let verdant = dir.species_traits.resolve("verdant").unwrap();
        let aux = &dir.species_traits.aux;
        assert_eq!(aux.mutation_add.count(bold), 1);
        assert_eq!(aux.mutation_add.count(verdant), 10);
        assert_eq!(aux.mutation_remove.count(verdant), 10);
        assert_eq!(aux.mutation_remove.count(bold), 0);
    }

    #[test]
    fn test_creature_trait_pools_and_era_flag() {
        let mut dir = load(&[(
            "keen.creature_trait.json",
            r#"{ "id": "keen", "birth_rate": 4, "grow_up_rate": 2, "combat_training": true, "era_moon": true }"#,
        )]);
        link(&mut dir);

        let keen = dir.creature_traits.resolve("keen").unwrap();
        let aux = &dir.creature_traits.aux;
        assert_eq!(aux.birth.count(keen), 4);
        assert_eq!(aux.grow_up.count(keen), 2);
        assert_eq!(aux.combat_training, [keen]);
        assert!(dir.creature_traits.get("keen").unwrap().era_only);
    }

    #[test]
    fn test_trait_base_links_defaults_and_random_pool() {
        let mut dir = load(&[
            ("wolf.creature.json", r#"{ "id": "wolf", "default_trait_ids": ["keen"] }"#),
            (
                "keen.creature_trait.json",
                r#"{ "id": "keen", "random_grant_allowed": true, "random_grant_rate": 3, "opposite_ids": ["dull"] }"#,
            ),
            ("dull.creature_trait.json", r#"{ "id": "dull" }"#),
        ]);
        link(&mut dir);

        let keen = dir.creature_traits.get("keen").unwrap();
        assert_eq!(keen.core.default_for.len(), 1);
        assert_eq!(keen.core.icon_path, "ui/icons/keen");
        assert_eq!(keen.opposites, [dir.creature_traits.resolve("dull").unwrap()]);

        let handle = dir.creature_traits.resolve("keen").unwrap();
        assert_eq!(dir.creature_traits.aux.random_grant.count(handle), 3);
    }

    #[test]
    fn test_culture_trait_settlement_plan_opposition() {
        let mut dir = load(&[
            ("gridplan.culture_trait.json", r#"{ "id": "gridplan", "settlement_plan": true }"#),
            ("sprawl.culture_trait.json", r#"{ "id": "sprawl", "settlement_plan": true }"#),
        ]);
        link(&mut dir);

        assert_eq!(dir.culture_traits.get("gridplan").unwrap().core.opposite_ids, ["sprawl"]);
        assert_eq!(dir.culture_traits.get("sprawl").unwrap().core.opposite_ids, ["gridplan"]);
    }

    #[test]
    fn test_pigment_index_monotonic_under_interleaved_load() {
        let mut dir = load(&[
            ("russet.pigment.json", r#"{ "id": "russet" }"#),
            ("wolf.creature.json", r#"{ "id": "wolf" }"#),
            ("slate.pigment.json", r#"{ "id": "slate" }"#),
            ("ivory.pigment.json", r#"{ "id": "ivory" }"#),
        ]);
        link(&mut dir);

        assert_eq!(dir.pigments.get("russet").unwrap().index, 0);
        assert_eq!(dir.pigments.get("slate").unwrap().index, 1);
        assert_eq!(dir.pigments.get("ivory").unwrap().index, 2);
        assert_eq!(dir.pigments.aux.by_index, ["russet", "slate", "ivory"]);
    }

    #[test]
    fn test_pigment_trait_back_link() {
        let mut dir = load(&[
            ("russet.pigment.json", r#"{ "id": "russet", "priority": 7 }"#),
            (
                "verdant.species_trait.json",
                r#"{ "id": "verdant", "pigment_id": "russet" }"#,
            ),
        ]);
        link(&mut dir);

        assert_eq!(dir.pigments.get("russet").unwrap().trait_id, "verdant");
        assert_eq!(dir.species_traits.get("verdant").unwrap().priority, 7);
    }

    #[test]
    fn test_achievement_binding() {
        let mut dir = load(&[
            ("first_hunt.achievement.json", r#"{ "id": "first_hunt" }"#),
            (
                "wolf.creature.json",
                r#"{ "id": "wolf", "unlocked_with_achievement": true, "achievement_id": "first_hunt" }"#,
            ),
            (
                "spear.item.json",
                r#"{ "id": "spear", "unlocked_with_achievement": true, "achievement_id": "first_hunt" }"#,
            ),
        ]);
        let stats = link(&mut dir);
        // The achievement itself has no routine and takes the
        // warn-and-continue path.
        assert_eq!(stats.skipped, 1);

        let achievement = dir.achievements.get("first_hunt").unwrap();
        assert!(achievement.unlocks_something);
        assert_eq!(
            achievement.unlocks,
            [(Kind::Creature, "wolf".to_string()), (Kind::Item, "spear".to_string())]
        );
    }

    #[test]
    fn test_item_cost_and_modifier_resolution() {
        let mut dir = load(&[
            ("iron.resource.json", r#"{ "id": "iron", "coin_value": 6 }"#),
            ("hide.resource.json", r#"{ "id": "hide", "coin_value": 2 }"#),
            (
                "serrated.item_mod.json",
                r#"{ "id": "serrated", "rarity_rate": 5, "pools": ["weapon", "accessory"] }"#,
            ),
            (
                "spear.item.json",
                r#"{
                    "id": "spear",
                    "pool_weapon": true,
                    "modifier_ids": ["serrated", "no_such_mod"],
                    "cost_resource_1": "iron",
                    "cost_resource_2": "hide"
                }"#,
            ),
        ]);
        link(&mut dir);

        let spear = dir.items.get("spear").unwrap();
        assert_eq!(spear.coin_cost, 8);
        assert_eq!(spear.icon_path, "ui/icons/items/icon_spear");
        assert_eq!(spear.combat_sprite_path, "items/weapons/w_spear");
        assert_eq!(spear.modifiers.len(), 2);
        assert!(spear.modifiers[0].is_some());
        assert!(spear.modifiers[1].is_none());

        let serrated = dir.item_mods.resolve("serrated").unwrap();
        assert_eq!(dir.item_mods.aux.pools["weapon"].count(serrated), 5);
        assert_eq!(dir.item_mods.aux.pools["accessory"].count(serrated), 5);
        assert!(!dir.item_mods.aux.pools.contains_key("armor"));
    }

    #[test]
    fn test_style_structure_synthesis() {
        let mut dir = load(&[
            (
                "hall_base.structure.json",
                r#"{ "id": "hall_base", "group": "template" }"#,
            ),
            ("docks_base.structure.json", r#"{ "id": "docks_base" }"#),
            ("fishery_base.structure.json", r#"{ "id": "fishery_base" }"#),
            ("windmill_base.structure.json", r#"{ "id": "windmill_base" }"#),
            (
                "oldgrowth.style.json",
                r#"{
                    "id": "oldgrowth",
                    "is_template": true,
                    "build_orders": {
                        "order_hall": "hall_base",
                        "order_docks": "docks_base",
                        "order_fishery": "fishery_base",
                        "order_windmill": "windmill_base"
                    }
                }"#,
            ),
            (
                "riverfolk.style.json",
                r#"{
                    "id": "riverfolk",
                    "generate_structures": true,
                    "generation_source": "oldgrowth",
                    "styled_build_orders": ["order_hall", "order_docks", "order_fishery", "order_windmill"],
                    "spread_biome_id": "marsh",
                    "material": "reed",
                    "has_shadows": true
                }"#,
            ),
        ]);
        link(&mut dir);

        let hall = dir.structures.get("hall_riverfolk").unwrap();
        assert_eq!(hall.owner_style, "riverfolk");
        assert_eq!(hall.group, "style_core");
        assert!(hall.auto_load);
        assert_eq!(hall.sprite_prefix, "structures/styles/riverfolk/");
        assert_eq!(hall.footprint, Footprint::new(3, 3, 4, 0));
        assert!(hall.spread_biome);
        assert_eq!(hall.spread_biome_id, "marsh");
        assert_eq!(hall.atlas_id, "structures_soft");

        // Upgrade chain wires the fishery into the docks.
        let fishery = dir.structures.get("fishery_riverfolk").unwrap();
        assert!(fishery.can_upgrade);
        assert_eq!(fishery.upgrade_to, "docks_riverfolk");
        let docks = dir.structures.get("docks_riverfolk").unwrap();
        assert_eq!(docks.upgraded_from, "fishery_riverfolk");

        // The windmill's shared footprint tuple comes with shadow tuning.
        let windmill = dir.structures.get("windmill_riverfolk").unwrap();
        assert_eq!(windmill.footprint, Footprint::new(2, 2, 2, 0));
        assert_eq!(windmill.shadow_tuning, ShadowTuning::new(0.4, 0.38, 0.47));

        // The generating style now maps every order to its own structures.
        let riverfolk = dir.styles.get("riverfolk").unwrap();
        assert_eq!(riverfolk.structure_for_order("order_hall"), Some("hall_riverfolk"));

        // Template structures are untouched.
        assert_eq!(dir.structures.get("hall_base").unwrap().owner_style, "");
    }

    #[test]
    fn test_hotkey_defaults_copied_and_collected() {
        let mut dir = load(&[(
            "pause.hotkey.json",
            r#"{ "id": "pause", "default_keys": ["space"], "default_mods": ["shift"], "press_action": "always" }"#,
        )]);
        link(&mut dir);

        let pause = dir.hotkeys.get("pause").unwrap();
        assert_eq!(pause.bound_keys, ["space"]);
        assert_eq!(pause.bound_mods, ["shift"]);
        assert_eq!(dir.hotkeys.aux.mod_keys, ["shift"]);
        assert_eq!(dir.hotkeys.aux.action_hotkeys.len(), 1);
    }

    #[test]
    fn test_status_visual_flags() {
        let mut dir = load(&[
            ("mending.status.json", r#"{ "id": "mending", "texture": "effects/mending" }"#),
            ("silent.status.json", r#"{ "id": "silent" }"#),
        ]);
        link(&mut dir);

        assert!(dir.statuses.get("mending").unwrap().needs_visual_render);
        assert!(!dir.statuses.get("silent").unwrap().needs_visual_render);
    }

    #[test]
    fn test_custom_linker_dispatch() {
        let mut dir = ContentDirectory::new();
        dir.register_kind("weather_front").unwrap();
        load_units(
            &mut dir,
            &[SourceUnit::new("monsoon.weather_front.json", r#"{ "id": "monsoon" }"#)],
        )
        .unwrap();

        let mut linker = Linker::new();
        linker
            .register_linker(
                "weather_front",
                Box::new(|dir, id| {
                    let record = dir.custom_mut("weather_front")?.get_mut(id)?;
                    record.fields.insert("linked".to_string(), RawValue::Bool(true));
                    Ok(())
                }),
            )
            .unwrap();

        let stats = linker.resolve_all(&mut dir).unwrap();
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.skipped, 0);

        let monsoon = dir.custom("weather_front").unwrap().get("monsoon").unwrap();
        assert_eq!(monsoon.fields.get("linked"), Some(&RawValue::Bool(true)));
    }

    #[test]
    fn test_unknown_kind_completes_the_pass() {
        let mut dir = ContentDirectory::new();
        dir.register_kind("weather_front").unwrap();
        load_units(
            &mut dir,
            &[
                SourceUnit::new("monsoon.weather_front.json", r#"{ "id": "monsoon" }"#),
                SourceUnit::new("wolf.creature.json", r#"{ "id": "wolf" }"#),
            ],
        )
        .unwrap();

        // No linker for weather_front: warn, leave untouched, keep going.
        let stats = link(&mut dir);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.skipped, 1);
        let monsoon = dir.custom("weather_front").unwrap().get("monsoon").unwrap();
        assert_eq!(monsoon.fields.len(), 1);
    }

    #[test]
    fn test_duplicate_custom_linker_rejected_first_wins() {
        let mut linker = Linker::new();
        linker.register_linker("weather_front", Box::new(|_, _| Ok(()))).unwrap();
        let err = linker
            .register_linker("weather_front", Box::new(|_, _| panic!("second routine ran")))
            .unwrap_err();
        assert!(matches!(err, LinkError::DuplicateLinker(_)));

        let mut dir = ContentDirectory::new();
        dir.register_kind("weather_front").unwrap();
        load_units(
            &mut dir,
            &[SourceUnit::new("monsoon.weather_front.json", r#"{ "id": "monsoon" }"#)],
        )
        .unwrap();
        linker.resolve_all(&mut dir).unwrap();
    }

    #[test]
    fn test_registration_after_start_rejected_and_single_pass() {
        let mut dir = ContentDirectory::new();
        let mut linker = Linker::new();
        linker.resolve_all(&mut dir).unwrap();

        let err = linker.register_linker("anything", Box::new(|_, _| Ok(()))).unwrap_err();
        assert!(matches!(err, LinkError::LinkingStarted));
        assert!(matches!(linker.resolve_all(&mut dir), Err(LinkError::LinkingStarted)));
    }
}
