//! Creature resolution: reference fixups and zombie variant synthesis.

use crate::behavior::BehaviorRef;
use crate::directory::ContentDirectory;
use crate::kind::Kind;
use crate::linker::LinkError;
use crate::records::{CreatureRecord, Rgba};

pub(crate) fn link_creature(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.creatures.get(id)?.clone();

    generate_zombie(dir, &rec);

    if !rec.is_aquatic && rec.sound_path.is_empty() {
        rec.sound_path = format!("sounds/creatures/{}", rec.id);
    }
    if rec.death_action.is_set() {
        rec.special_death_action = true;
    }
    if !rec.base_id.is_empty() {
        match dir.creatures.find(&rec.base_id) {
            Some(base) => rec.squad_size = base.squad_size,
            None => log::warn!("{}: base creature `{}` not found", rec.id, rec.base_id),
        }
    }
    if rec.is_humanoid && !rec.is_zombie {
        dir.creatures.aux.humanoid_count += 1;
    }
    if !rec.style_id.is_empty() {
        rec.style = dir.styles.resolve(&rec.style_id);
        if rec.style.is_none() {
            log::warn!("{}: style `{}` not found", rec.id, rec.style_id);
        }
    }
    let mut spells = Vec::with_capacity(rec.spell_ids.len());
    for spell_id in &rec.spell_ids {
        match dir.spells.resolve(spell_id) {
            Some(handle) => spells.push(handle),
            None => log::warn!("{}: spell `{}` not found", rec.id, spell_id),
        }
    }
    rec.spells = spells;

    if rec.is_aquatic {
        if let Some(handle) = dir.creatures.resolve(&rec.id) {
            dir.creatures.aux.aquatic.push(handle);
        }
    }
    if !rec.color_hex.is_empty() {
        rec.color = Rgba::from_hex(&rec.color_hex);
        if rec.color.is_none() {
            log::warn!("{}: bad color hex `{}`", rec.id, rec.color_hex);
        }
    }
    if !rec.flip_check.is_set() {
        rec.flip_check = BehaviorRef::always();
    }
    let achievement_id = rec.achievement_id.clone();
    super::bind_achievement(
        dir,
        Kind::Creature,
        &rec.id,
        rec.unlocked_with_achievement,
        &achievement_id,
    );

    dir.creatures.replace(rec)?;
    Ok(())
}

/// Synthesize the zombie variant of an eligible creature.
///
/// The variant is cloned from the source's stored fields before any of the
/// source's own link mutations land, so it inherits authored data only.
/// It comes out ineligible for further derivation, which makes re-running
/// the synthesis on a derived record a no-op.
pub(crate) fn generate_zombie(dir: &mut ContentDirectory, source: &CreatureRecord) {
    if !source.zombie_eligible() {
        return;
    }
    let zombie_id = source.zombie_id();
    let handle = match dir.creatures.clone_record(&zombie_id, &source.id) {
        Ok(handle) => handle,
        Err(err) => {
            log::warn!("{}: zombie variant not generated: {err}", source.id);
            return;
        }
    };

    let zombie = dir.creatures.record_mut(handle);
    zombie.is_template = false;
    zombie.is_zombie = true;
    zombie.can_become_zombie = false;
    zombie.zombie_auto_derive = false;

    // Shade settings carry over from the original, field by field.
    zombie.shade.enabled = source.shade.enabled;
    zombie.shade.ground_path = source.shade.ground_path.clone();
    zombie.shade.egg_path = source.shade.egg_path.clone();
    zombie.shade.juvenile_path = source.shade.juvenile_path.clone();

    if !source.zombie_sprite_path.is_empty() {
        zombie.sprite_path = source.zombie_sprite_path.clone();
        zombie.head_sprite_path = source.zombie_head_sprite_path.clone();
    } else {
        // No dedicated art: reuse the original sprites, recolor at render time.
        zombie.sprite_path = source.sprite_path.clone();
        zombie.head_sprite_path = source.head_sprite_path.clone();
        zombie.dynamic_sprite_zombie = true;
    }
    zombie.zombie_sprite_path.clear();
    zombie.zombie_head_sprite_path.clear();
}
