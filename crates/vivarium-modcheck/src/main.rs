//! Vivarium Headless Content Harness
//!
//! Validates the sample content pack through the full load + link pipeline
//! without the game. Runs entirely in-process - no rendering, no
//! simulation, no filesystem walking.
//!
//! Usage:
//!   cargo run -p vivarium-modcheck
//!   cargo run -p vivarium-modcheck -- --verbose

use vivarium_content::behavior::{self, BehaviorDef, EffectArgs};
use vivarium_content::codec;
use vivarium_content::directory::ContentDirectory;
use vivarium_content::kind::Kind;
use vivarium_content::linker::Linker;
use vivarium_content::loader::{load_units, SourceUnit};
use vivarium_content::records::{CreatureRecord, Footprint};

// ── Sample pack (same JSON shipped with the game) ───────────────────────

const PACK: &[(&str, &str)] = &[
    ("wolf.creature.json", include_str!("../../../data/base/wolf.creature.json")),
    ("elder.creature.json", include_str!("../../../data/base/elder.creature.json")),
    ("settler.creature.json", include_str!("../../../data/base/settler.creature.json")),
    ("heron.creature.json", include_str!("../../../data/base/heron.creature.json")),
    ("hall_base.structure.json", include_str!("../../../data/base/hall_base.structure.json")),
    ("docks_base.structure.json", include_str!("../../../data/base/docks_base.structure.json")),
    (
        "fishery_base.structure.json",
        include_str!("../../../data/base/fishery_base.structure.json"),
    ),
    (
        "windmill_base.structure.json",
        include_str!("../../../data/base/windmill_base.structure.json"),
    ),
    ("oldgrowth.style.json", include_str!("../../../data/base/oldgrowth.style.json")),
    ("riverfolk.style.json", include_str!("../../../data/base/riverfolk.style.json")),
    ("bold.species_trait.json", include_str!("../../../data/base/bold.species_trait.json")),
    ("timid.species_trait.json", include_str!("../../../data/base/timid.species_trait.json")),
    (
        "verdant.species_trait.json",
        include_str!("../../../data/base/verdant.species_trait.json"),
    ),
    ("keen.creature_trait.json", include_str!("../../../data/base/keen.creature_trait.json")),
    (
        "gridplan.culture_trait.json",
        include_str!("../../../data/base/gridplan.culture_trait.json"),
    ),
    ("sprawl.culture_trait.json", include_str!("../../../data/base/sprawl.culture_trait.json")),
    ("iron.resource.json", include_str!("../../../data/base/iron.resource.json")),
    ("hide.resource.json", include_str!("../../../data/base/hide.resource.json")),
    ("serrated.item_mod.json", include_str!("../../../data/base/serrated.item_mod.json")),
    ("spear.item.json", include_str!("../../../data/base/spear.item.json")),
    ("regrowth.spell.json", include_str!("../../../data/base/regrowth.spell.json")),
    ("mending.status.json", include_str!("../../../data/base/mending.status.json")),
    ("pause.hotkey.json", include_str!("../../../data/base/pause.hotkey.json")),
    ("first_hunt.achievement.json", include_str!("../../../data/base/first_hunt.achievement.json")),
    ("russet.pigment.json", include_str!("../../../data/base/russet.pigment.json")),
    ("slate.pigment.json", include_str!("../../../data/base/slate.pigment.json")),
];

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult { name: name.to_string(), passed, detail: detail.into() }
}

fn howl_dirge(_args: &EffectArgs) -> bool {
    true
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Vivarium Content Harness ===\n");

    // Behaviors referenced by the pack must exist before loading.
    behavior::register(BehaviorDef { name: "howl_dirge", run: howl_dirge });

    let mut dir = ContentDirectory::new();
    let units: Vec<SourceUnit> =
        PACK.iter().map(|(name, text)| SourceUnit::new(*name, *text)).collect();

    let mut results = Vec::new();

    // 1. Load
    let report = match load_units(&mut dir, &units) {
        Ok(report) => report,
        Err(err) => {
            println!("FATAL: {err}");
            std::process::exit(1);
        }
    };
    results.push(check(
        "pack_loads_cleanly",
        report.loaded == units.len() as u32 && report.skipped == 0,
        format!("{} loaded, {} skipped", report.loaded, report.skipped),
    ));

    // 2. Link
    let stats = match Linker::new().resolve_all(&mut dir) {
        Ok(stats) => stats,
        Err(err) => {
            println!("FATAL: {err}");
            std::process::exit(1);
        }
    };
    results.push(check(
        "link_pass_completes",
        stats.resolved > 0,
        format!("{} resolved, {} without a routine", stats.resolved, stats.skipped),
    ));

    results.extend(validate_zombie_synthesis(&dir));
    results.extend(validate_traits(&dir));
    results.extend(validate_style_synthesis(&dir));
    results.extend(validate_items(&dir));
    results.extend(validate_bindings(&dir));
    results.extend(validate_roundtrip(&dir));

    if verbose {
        println!("\n  Registry contents:");
        for (tag, count) in dir.summary() {
            println!("    {tag:15} {count}");
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Zombie synthesis ─────────────────────────────────────────────────

fn validate_zombie_synthesis(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Zombie Synthesis ---");
    let mut results = Vec::new();

    let zombie = dir.creatures.find("wolf_zombie");
    results.push(check(
        "zombie_generated",
        zombie.is_some(),
        if zombie.is_some() { "wolf_zombie present".to_string() } else { "missing".to_string() },
    ));

    if let Some(zombie) = zombie {
        results.push(check(
            "zombie_flags",
            zombie.is_zombie && !zombie.is_template && !zombie.can_become_zombie,
            format!(
                "is_zombie={} is_template={} can_become_zombie={}",
                zombie.is_zombie, zombie.is_template, zombie.can_become_zombie
            ),
        ));
        results.push(check(
            "zombie_visuals",
            zombie.dynamic_sprite_zombie
                && zombie.sprite_path == "creatures/wolf"
                && zombie.shade.ground_path == "shade/wolf",
            format!("sprite={} dynamic={}", zombie.sprite_path, zombie.dynamic_sprite_zombie),
        ));
    }

    results.push(check(
        "no_second_derivation",
        !dir.creatures.contains("wolf_zombie_zombie"),
        "derived variants do not derive again",
    ));

    results
}

// ── 2. Trait linking ────────────────────────────────────────────────────

fn validate_traits(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Trait Linking ---");
    let mut results = Vec::new();

    let bold = dir.species_traits.get("bold").expect("bold loaded");
    let timid = dir.species_traits.get("timid").expect("timid loaded");
    results.push(check(
        "opposite_symmetry",
        bold.core.opposite_ids == vec!["timid".to_string()]
            && timid.core.opposite_ids == vec!["bold".to_string()],
        format!("bold={:?} timid={:?}", bold.core.opposite_ids, timid.core.opposite_ids),
    ));

    // rarity 2 (rare) has rate 3; rarity 0 (common) has rate 10.
    let bold_handle = dir.species_traits.resolve("bold").unwrap();
    let timid_handle = dir.species_traits.resolve("timid").unwrap();
    let aux = &dir.species_traits.aux;
    results.push(check(
        "mutation_pool_cardinality",
        aux.mutation_add.count(bold_handle) == 3
            && aux.mutation_add.count(timid_handle) == 10
            && aux.mutation_remove.count(timid_handle) == 10,
        format!(
            "add: bold={} timid={}, remove: timid={}",
            aux.mutation_add.count(bold_handle),
            aux.mutation_add.count(timid_handle),
            aux.mutation_remove.count(timid_handle)
        ),
    ));

    let keen_handle = dir.creature_traits.resolve("keen").unwrap();
    let keen_aux = &dir.creature_traits.aux;
    results.push(check(
        "creature_trait_pools",
        keen_aux.birth.count(keen_handle) == 4
            && keen_aux.grow_up.count(keen_handle) == 2
            && keen_aux.random_grant.count(keen_handle) == 3
            && keen_aux.combat_training.len() == 1,
        format!(
            "birth={} grow_up={} random={} combat={}",
            keen_aux.birth.count(keen_handle),
            keen_aux.grow_up.count(keen_handle),
            keen_aux.random_grant.count(keen_handle),
            keen_aux.combat_training.len()
        ),
    ));

    let keen = dir.creature_traits.get("keen").unwrap();
    results.push(check(
        "default_trait_back_link",
        keen.core.default_for.len() == 1,
        format!("{} creature(s) grant keen by default", keen.core.default_for.len()),
    ));

    let gridplan = dir.culture_traits.get("gridplan").unwrap();
    let sprawl = dir.culture_traits.get("sprawl").unwrap();
    results.push(check(
        "settlement_plan_opposition",
        gridplan.core.opposite_ids == vec!["sprawl".to_string()]
            && sprawl.core.opposite_ids == vec!["gridplan".to_string()],
        "gridplan and sprawl oppose each other",
    ));

    let russet = dir.pigments.get("russet").unwrap();
    let slate = dir.pigments.get("slate").unwrap();
    let verdant = dir.species_traits.get("verdant").unwrap();
    results.push(check(
        "pigment_links_and_indices",
        russet.trait_id == "verdant"
            && verdant.priority == 7
            && russet.index == 0
            && slate.index == 1,
        format!(
            "russet.trait={} verdant.priority={} indices=({}, {})",
            russet.trait_id, verdant.priority, russet.index, slate.index
        ),
    ));

    results
}

// ── 3. Style structure synthesis ────────────────────────────────────────

fn validate_style_synthesis(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Style Synthesis ---");
    let mut results = Vec::new();

    let generated = ["hall_riverfolk", "docks_riverfolk", "fishery_riverfolk", "windmill_riverfolk"];
    let all_present = generated.iter().all(|id| dir.structures.contains(id));
    results.push(check(
        "structures_generated",
        all_present,
        format!("{}/{} generated structures present", generated
            .iter()
            .filter(|id| dir.structures.contains(id))
            .count(), generated.len()),
    ));
    if !all_present {
        return results;
    }

    let hall = dir.structures.get("hall_riverfolk").unwrap();
    results.push(check(
        "generated_ownership",
        hall.owner_style == "riverfolk"
            && hall.auto_load
            && hall.sprite_prefix == "structures/styles/riverfolk/"
            && hall.spread_biome_id == "marsh",
        format!("owner={} prefix={}", hall.owner_style, hall.sprite_prefix),
    ));
    results.push(check(
        "footprint_table_applied",
        hall.footprint == Footprint::new(3, 3, 4, 0),
        format!("hall footprint {:?}", hall.footprint),
    ));

    let fishery = dir.structures.get("fishery_riverfolk").unwrap();
    let docks = dir.structures.get("docks_riverfolk").unwrap();
    results.push(check(
        "upgrade_chain",
        fishery.can_upgrade
            && fishery.upgrade_to == "docks_riverfolk"
            && docks.upgraded_from == "fishery_riverfolk",
        format!("fishery -> {}", fishery.upgrade_to),
    ));

    results.push(check(
        "templates_untouched",
        dir.structures.get("hall_base").unwrap().owner_style.is_empty(),
        "template structures carry no style ownership",
    ));

    results
}

// ── 4. Items & resources ────────────────────────────────────────────────

fn validate_items(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Items ---");
    let mut results = Vec::new();

    let spear = dir.items.get("spear").expect("spear loaded");
    results.push(check(
        "item_cost_from_resources",
        spear.coin_cost == 8,
        format!("spear costs {} coins (iron 6 + hide 2)", spear.coin_cost),
    ));
    results.push(check(
        "item_modifier_resolved",
        spear.modifiers.len() == 1 && spear.modifiers[0].is_some(),
        format!("{} modifier slot(s)", spear.modifiers.len()),
    ));

    let serrated = dir.item_mods.resolve("serrated").unwrap();
    let pools = &dir.item_mods.aux.pools;
    results.push(check(
        "modifier_pools_weighted",
        pools.get("weapon").map_or(0, |p| p.count(serrated)) == 5
            && pools.get("accessory").map_or(0, |p| p.count(serrated)) == 5
            && !pools.contains_key("armor"),
        format!("weapon={} accessory={}",
            pools.get("weapon").map_or(0, |p| p.count(serrated)),
            pools.get("accessory").map_or(0, |p| p.count(serrated))),
    ));

    results
}

// ── 5. Cross-kind bindings ──────────────────────────────────────────────

fn validate_bindings(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Bindings ---");
    let mut results = Vec::new();

    let achievement = dir.achievements.get("first_hunt").unwrap();
    results.push(check(
        "achievement_unlock_list",
        achievement.unlocks_something
            && achievement.unlocks == vec![(Kind::Creature, "wolf".to_string())],
        format!("{} unlock(s)", achievement.unlocks.len()),
    ));

    let settler = dir.creatures.get("settler").unwrap();
    results.push(check(
        "creature_references_resolved",
        settler.squad_size == 12 && settler.style.is_some() && settler.spells.len() == 1,
        format!(
            "squad={} style_resolved={} spells={}",
            settler.squad_size,
            settler.style.is_some(),
            settler.spells.len()
        ),
    ));

    let pause = dir.hotkeys.get("pause").unwrap();
    results.push(check(
        "hotkey_bindings_seeded",
        pause.bound_keys == vec!["space".to_string()] && dir.hotkeys.aux.action_hotkeys.len() == 1,
        format!("bound_keys={:?}", pause.bound_keys),
    ));

    let mending = dir.statuses.get("mending").unwrap();
    results.push(check(
        "status_visual_flags",
        mending.needs_visual_render,
        "textured status needs visual render",
    ));

    results
}

// ── 6. Round-trip ───────────────────────────────────────────────────────

fn validate_roundtrip(dir: &ContentDirectory) -> Vec<TestResult> {
    println!("--- Round-trip ---");
    let mut results = Vec::new();

    let wolf = dir.creatures.get("wolf").unwrap();

    let text = codec::export_json(wolf);
    let from_json: Result<CreatureRecord, _> = codec::import_json(&text);
    let json_ok = from_json.as_ref().map_or(false, |r| {
        r.id == wolf.id
            && r.shade == wolf.shade
            && r.death_action.name() == wolf.death_action.name()
    });
    results.push(check(
        "json_roundtrip",
        json_ok,
        format!("{} bytes of JSON", text.len()),
    ));

    let binary_ok = codec::export_binary(wolf)
        .ok()
        .and_then(|bytes| codec::import_binary::<CreatureRecord>(&bytes).ok())
        .map_or(false, |r| {
            let reencoded = codec::encode(&r);
            reencoded == codec::encode(wolf)
        });
    results.push(check("binary_roundtrip", binary_ok, "bincode save-slot form"));

    results
}
