//! Equipment and item-modifier resolution.

use super::bind_achievement;
use crate::directory::ContentDirectory;
use crate::kind::Kind;
use crate::linker::LinkError;
use crate::records::MOD_POOLS;

pub(crate) fn link_item(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.items.get(id)?.clone();

    let mut modifiers = Vec::with_capacity(rec.modifier_ids.len());
    for mod_id in &rec.modifier_ids {
        let resolved = dir.item_mods.resolve(mod_id);
        if resolved.is_none() {
            log::warn!("{}: item modifier `{}` not found", rec.id, mod_id);
        }
        modifiers.push(resolved);
    }
    rec.modifiers = modifiers;

    if rec.pool_weapon {
        rec.combat_sprite_path = format!("items/weapons/w_{}", rec.id);
    }
    // Unpriced items get the stock icon and a cost derived from their
    // crafting resources.
    if rec.icon_path.is_empty() {
        rec.icon_path = format!("ui/icons/items/icon_{}", rec.id);
        rec.coin_cost = resource_cost(dir, &rec.id, &rec.cost_resource_1)
            + resource_cost(dir, &rec.id, &rec.cost_resource_2);
    }

    let achievement_id = rec.achievement_id.clone();
    bind_achievement(dir, Kind::Item, &rec.id, rec.unlocked_with_achievement, &achievement_id);

    dir.items.replace(rec)?;
    Ok(())
}

fn resource_cost(dir: &ContentDirectory, item_id: &str, resource_id: &str) -> u32 {
    if resource_id.is_empty() || resource_id == "none" {
        return 0;
    }
    match dir.resources.find(resource_id) {
        Some(resource) => resource.coin_value,
        None => {
            log::warn!("{item_id}: cost resource `{resource_id}` not found");
            0
        }
    }
}

pub(crate) fn link_item_modifier(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let rec = dir.item_mods.get(id)?.clone();

    if let Some(handle) = dir.item_mods.resolve(&rec.id) {
        for pool_name in &rec.pools {
            if MOD_POOLS.contains(&pool_name.as_str()) {
                dir.item_mods.aux.pool_mut(pool_name).add_times(rec.rarity_rate, handle);
            } else {
                log::warn!("{}: unknown modifier pool `{}`", rec.id, pool_name);
            }
        }
    }

    bind_achievement(dir, Kind::ItemModifier, &rec.id, rec.unlocked_with_achievement, &rec.achievement_id);
    Ok(())
}
