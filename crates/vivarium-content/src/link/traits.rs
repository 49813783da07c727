//! Trait-family resolution: exclusivity scans, weighted pools, and the
//! shared base-trait steps.

use super::{link_trait_base, oppose_matching};
use crate::directory::ContentDirectory;
use crate::linker::LinkError;

pub(crate) fn link_species_trait(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.species_traits.get(id)?.clone();

    // Pigment back-link: the pigment learns its owning trait, the trait
    // inherits the pigment's priority.
    if !rec.pigment_id.is_empty() {
        match dir.pigments.get_mut(&rec.pigment_id) {
            Ok(pigment) => {
                pigment.trait_id = rec.id.clone();
                rec.priority = pigment.priority;
            }
            Err(err) => log::warn!("{}: pigment binding failed: {err}", rec.id),
        }
    }

    if rec.mutation_skin {
        oppose_matching(dir, &mut rec, |t| t.mutation_skin);
    }
    if rec.pigment_skin {
        oppose_matching(dir, &mut rec, |t| t.pigment_skin);
    }
    if rec.pigment_egg {
        oppose_matching(dir, &mut rec, |t| t.pigment_egg);
    }

    if let Some(handle) = dir.species_traits.resolve(&rec.id) {
        let rate = rec.rarity.rate();
        if rec.mutation_pool_add {
            dir.species_traits.aux.mutation_add.add_times(rate, handle);
        }
        if rec.mutation_pool_remove {
            dir.species_traits.aux.mutation_remove.add_times(rate, handle);
        }
    }

    if rec.pigment_egg && rec.hatch_action.is_set() {
        rec.has_hatch_action = true;
    }

    link_trait_base(dir, &mut rec);
    dir.species_traits.replace(rec)?;
    Ok(())
}

pub(crate) fn link_creature_trait(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.creature_traits.get(id)?.clone();

    if let Some(handle) = dir.creature_traits.resolve(&rec.id) {
        let aux = &mut dir.creature_traits.aux;
        if rec.combat_training {
            aux.combat_training.push(handle);
        }
        if rec.mutation_box_allowed {
            aux.mutation_box.push(handle);
        }
        aux.grow_up.add_times(rec.grow_up_rate, handle);
        aux.birth.add_times(rec.birth_rate, handle);
    }

    rec.era_only = rec.era_night || rec.era_moon;

    link_trait_base(dir, &mut rec);
    dir.creature_traits.replace(rec)?;
    Ok(())
}

pub(crate) fn link_culture_trait(dir: &mut ContentDirectory, id: &str) -> Result<(), LinkError> {
    let mut rec = dir.culture_traits.get(id)?.clone();

    if rec.settlement_plan {
        oppose_matching(dir, &mut rec, |t| t.settlement_plan);
    }

    link_trait_base(dir, &mut rec);
    dir.culture_traits.replace(rec)?;
    Ok(())
}
