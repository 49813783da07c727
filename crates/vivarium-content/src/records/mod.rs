//! Record schemas for every built-in kind.
//!
//! Each record declares its authored fields plus a descriptor table for the
//! codec. Fields holding resolved cross-references (handles) are post-link
//! state: the authored id string is the declared field, the handle is its
//! resolved companion and never serializes.

mod creature;
mod items;
mod misc;
mod structure;
mod traits;

pub use creature::{CreatureAux, CreatureRecord, Rgba, ShadeSpec};
pub use items::{
    ItemModifierAux, ItemModifierRecord, ItemRecord, ResourceRecord, MOD_POOLS,
};
pub use misc::{
    AchievementRecord, HotkeyAux, HotkeyRecord, PigmentAux, PigmentRecord, SpellRecord,
    StatusRecord,
};
pub use structure::{Footprint, ShadowTuning, StructureRecord, StyleRecord};
pub use traits::{
    CreatureTraitAux, CreatureTraitRecord, CultureTraitAux, CultureTraitRecord, Rarity,
    SpeciesTraitAux, SpeciesTraitRecord, TraitCore, TraitRecord,
};

/// A record of an extension-registered kind. Fields stay in raw form; the
/// registering mod's custom linker interprets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModRecord {
    pub id: String,
    pub kind_tag: String,
    pub fields: crate::raw::RawRecord,
}

impl crate::registry::RecordData for ModRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
