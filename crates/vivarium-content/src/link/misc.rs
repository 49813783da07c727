//! Spell, status, hotkey, and pigment resolution.

use crate::directory::ContentDirectory;
use crate::linker::LinkError;

pub(crate) fn link_spell(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.spells.get(id)?.clone();

    let mut statuses = Vec::with_capacity(rec.status_ids.len());
    for status_id in &rec.status_ids {
        match dir.statuses.resolve(status_id) {
            Some(handle) => statuses.push(handle),
            None => log::warn!("{}: status `{}` not found", rec.id, status_id),
        }
    }
    rec.statuses = statuses;

    dir.spells.replace(rec)?;
    Ok(())
}

pub(crate) fn link_status(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.statuses.get(id)?.clone();

    if rec.sprite_override.is_set() {
        rec.has_sprite_override = true;
        rec.needs_visual_render = true;
    }
    if rec.sprite_position_override.is_set() {
        rec.has_sprite_position_override = true;
    }
    if !rec.texture.is_empty() {
        rec.needs_visual_render = true;
    }

    dir.statuses.replace(rec)?;
    Ok(())
}

pub(crate) fn link_hotkey(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.hotkeys.get(id)?.clone();

    // Live bindings start from the authored defaults; user preferences
    // overwrite them after startup.
    rec.bound_keys = rec.default_keys.clone();
    rec.bound_mods = rec.default_mods.clone();

    for modifier in &rec.default_mods {
        dir.hotkeys.aux.mod_keys.push(modifier.clone());
    }
    if rec.press_action.is_set() || rec.hold_action.is_set() {
        if let Some(handle) = dir.hotkeys.resolve(&rec.id) {
            dir.hotkeys.aux.action_hotkeys.push(handle);
        }
    }

    dir.hotkeys.replace(rec)?;
    Ok(())
}

pub(crate) fn link_pigment(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.pigments.get(id)?.clone();

    // Sequential index: the number of pigments linked before this one.
    // Insertion-order dependent and never reassigned.
    let aux = &mut dir.pigments.aux;
    rec.index = aux.linked_count as i32;
    aux.linked_count += 1;
    aux.by_index.push(rec.id.clone());

    dir.pigments.replace(rec)?;
    Ok(())
}
