//! Structure and architecture-style resolution, including structure
//! synthesis for generating styles.

use crate::directory::ContentDirectory;
use crate::linker::LinkError;
use crate::records::{Footprint, ShadowTuning, StyleRecord};

pub(crate) fn link_structure(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.structures.get(id)?.clone();
    rec.has_step_action = rec.step_action.is_set();
    rec.has_map_icon_color = rec.map_icon_color.is_set();
    rec.has_growth_biome_tags = !rec.growth_biome_tags.is_empty();
    rec.has_spread_biome_tags = !rec.spread_biome_tags.is_empty();
    dir.structures.replace(rec)?;
    Ok(())
}

pub(crate) fn link_style(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.styles.get(id)?.clone();

    if !rec.spread_biome_id.is_empty() {
        rec.spread_biome = true;
    }
    if !rec.is_template {
        // Order keys contributed by other packs join this style's map;
        // the style's own entries win on collision.
        let shared: Vec<(String, String)> =
            rec.shared_build_orders.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        for (key, structure_id) in shared {
            rec.build_orders.entry(key).or_insert(structure_id);
        }
        if rec.generate_structures {
            generate_structures(dir, &mut rec);
        }
    }

    dir.styles.replace(rec)?;
    Ok(())
}

/// Footprint and shadow tuning for generated structures, keyed by order
/// key. Several keys share a tuple, so this lives in one table instead of
/// per-key code.
const ORDER_TUNING: &[(&str, Footprint, Option<ShadowTuning>)] = &[
    ("order_hall", Footprint::new(3, 3, 4, 0), None),
    ("order_library", Footprint::new(2, 2, 2, 0), None),
    ("order_temple", Footprint::new(2, 2, 3, 0), None),
    ("order_tent", Footprint::new(2, 2, 2, 0), None),
    ("order_windmill", Footprint::new(2, 2, 2, 0), Some(ShadowTuning::new(0.4, 0.38, 0.47))),
    ("order_watchtower", Footprint::new(1, 1, 1, 0), None),
];

fn order_tuning(key: &str) -> Option<(Footprint, Option<ShadowTuning>)> {
    ORDER_TUNING.iter().find(|(k, _, _)| *k == key).map(|(_, fp, sh)| (*fp, *sh))
}

/// Clone each of the style's declared build orders from the generation
/// source's template structures, scoping the copies to this style.
fn generate_structures(dir: &mut ContentDirectory, style: &mut StyleRecord) {
    let source_orders = match dir.styles.find(&style.generation_source) {
        Some(source) => source.build_orders.clone(),
        None => {
            log::warn!("{}: generation source `{}` not found", style.id, style.generation_source);
            return;
        }
    };

    for key in style.styled_build_orders.clone() {
        let Some(template_id) = source_orders.get(&key) else {
            log::warn!("{}: no template structure for order `{}`", style.id, key);
            continue;
        };
        let new_id = format!("{}_{}", key.strip_prefix("order_").unwrap_or(&key), style.id);
        let handle = match dir.structures.clone_record(&new_id, template_id) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("{}: structure for order `{}` not generated: {err}", style.id, key);
                continue;
            }
        };

        let generated = dir.structures.record_mut(handle);
        generated.group = "style_core".to_string();
        generated.auto_load = true;
        generated.owner_style = style.id.clone();
        generated.sprite_prefix = format!("structures/styles/{}/", style.id);
        generated.can_upgrade = false;
        generated.has_construction_sprite = true;
        if style.spread_biome {
            generated.spread_biome = true;
            generated.spread_biome_id = style.spread_biome_id.clone();
        }
        generated.material = style.material.clone();
        if generated.material == "reed" {
            generated.atlas_id = "structures_soft".to_string();
        }
        generated.shadow = style.has_shadows;
        generated.burnable = style.burnable_structures;
        generated.acid_affected = style.acid_affected_structures;

        // The fishery upgrades into the docks within the same style.
        match key.as_str() {
            "order_fishery" => {
                generated.upgrade_to = format!("docks_{}", style.id);
                generated.can_upgrade = true;
            }
            "order_docks" => {
                generated.upgraded_from = format!("fishery_{}", style.id);
                generated.disabled_sprites = false;
            }
            _ => {}
        }

        if let Some((footprint, tuning)) = order_tuning(&key) {
            generated.footprint = footprint;
            if generated.shadow {
                if let Some(tuning) = tuning {
                    generated.shadow_tuning = tuning;
                }
            }
        }

        style.build_orders.insert(key.clone(), new_id);
    }
}
