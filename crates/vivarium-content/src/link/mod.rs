//! Per-kind resolution routines.
//!
//! Each routine runs exactly once per record, in load order, with the
//! record cloned out of its registry, mutated, and written back. The
//! registry therefore stays fully readable mid-routine, which is what
//! clone-based synthesis and whole-registry scans rely on.
//!
//! A missing cross-reference is a content problem: the routine logs a
//! warning and leaves the field unresolved. Only structural problems (a
//! registry that does not exist) abort the pass.

pub(crate) mod creature;
pub(crate) mod items;
pub(crate) mod misc;
pub(crate) mod structure;
pub(crate) mod traits;

use crate::directory::{BuiltinRecord, ContentDirectory};
use crate::kind::Kind;
use crate::records::TraitRecord;
use crate::registry::RecordData;

/// Append an unlockable record to its achievement's unlock list.
///
/// Linking runs once per record, so every record binds at most once; no
/// extra de-duplication is needed here. A missing achievement id is a
/// content warning, not an abort.
pub(crate) fn bind_achievement(
    dir: &mut ContentDirectory,
    kind: Kind,
    record_id: &str,
    gated: bool,
    achievement_id: &str,
) {
    if !gated {
        return;
    }
    match dir.achievements.get_mut(achievement_id) {
        Ok(achievement) => {
            achievement.unlocks_something = true;
            achievement.unlocks.push((kind, record_id.to_string()));
        }
        Err(err) => log::warn!("{record_id}: achievement binding failed: {err}"),
    }
}

/// Register every other trait matching `pred` as an opposite of `rec`.
///
/// One scan is one-directional; symmetry emerges from the full pass,
/// because every qualifying trait runs the same scan exactly once.
pub(crate) fn oppose_matching<R: TraitRecord>(
    dir: &ContentDirectory,
    rec: &mut R,
    pred: fn(&R) -> bool,
) {
    let mut ids = Vec::new();
    for other in R::registry(dir).iter() {
        if other.id() != rec.id() && pred(other) {
            ids.push(other.id().to_string());
        }
    }
    for id in ids {
        rec.core_mut().add_opposite(&id);
    }
}

/// The linking steps every trait family shares: default-creature
/// back-links, opposite and removal resolution, icon path default, the
/// random-grant pool, and achievement binding.
pub(crate) fn link_trait_base<R: TraitRecord>(dir: &mut ContentDirectory, rec: &mut R) {
    let mut defaults = Vec::new();
    for handle in dir.creatures.handles() {
        let creature = dir.creatures.record(handle);
        if creature.default_trait_ids.iter().any(|t| t == rec.id()) {
            defaults.push(handle);
        }
    }
    rec.core_mut().default_for = defaults;

    let mut opposites = Vec::new();
    for id in &rec.core().opposite_ids {
        match R::registry(dir).resolve(id) {
            Some(handle) => opposites.push(handle),
            None => log::warn!("{}: opposite trait `{}` not found", rec.id(), id),
        }
    }
    *rec.opposites_mut() = opposites;

    let mut removes = Vec::new();
    for id in &rec.core().remove_trait_ids {
        match R::registry(dir).resolve(id) {
            Some(handle) => removes.push(handle),
            None => log::warn!("{}: removed trait `{}` not found", rec.id(), id),
        }
    }
    *rec.removes_mut() = removes;

    if rec.core().icon_path.is_empty() {
        rec.core_mut().icon_path = format!("ui/icons/{}", rec.id());
    }

    if rec.core().random_grant_allowed {
        if let Some(handle) = R::registry(dir).resolve(rec.id()) {
            let rate = rec.core().random_grant_rate;
            R::random_pool(&mut R::registry_mut(dir).aux).add_times(rate, handle);
        }
    }

    let gated = rec.core().unlocked_with_achievement;
    let achievement_id = rec.core().achievement_id.clone();
    bind_achievement(dir, R::KIND, rec.id(), gated, &achievement_id);
}
