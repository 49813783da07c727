//! Structure and architecture-style records.

use indexmap::IndexMap;

use crate::behavior::BehaviorRef;
use crate::codec::{struct_from_raw, struct_to_raw, FieldDef, FieldError, FieldMapped, FieldValue};
use crate::field;
use crate::raw::RawValue;
use crate::registry::RecordData;

/// Physical footprint of a structure: plot size, build height, elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    pub elevation: i32,
}

impl Default for Footprint {
    fn default() -> Self {
        Footprint { width: 1, depth: 1, height: 1, elevation: 0 }
    }
}

impl Footprint {
    pub const fn new(width: u32, depth: u32, height: u32, elevation: i32) -> Footprint {
        Footprint { width, depth, height, elevation }
    }
}

impl FieldMapped for Footprint {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<Footprint>] = &[
            field!(Footprint, width),
            field!(Footprint, depth),
            field!(Footprint, height),
            field!(Footprint, elevation),
        ];
        FIELDS
    }
}

impl FieldValue for Footprint {
    fn to_raw(&self) -> RawValue {
        struct_to_raw(self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        struct_from_raw(raw)
    }
}

/// Shadow placement tuning for structures whose sprite outgrows the plot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShadowTuning {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_y: f32,
}

impl ShadowTuning {
    pub const fn new(scale_x: f32, scale_y: f32, offset_y: f32) -> ShadowTuning {
        ShadowTuning { scale_x, scale_y, offset_y }
    }
}

impl FieldMapped for ShadowTuning {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<ShadowTuning>] = &[
            field!(ShadowTuning, scale_x),
            field!(ShadowTuning, scale_y),
            field!(ShadowTuning, offset_y),
        ];
        FIELDS
    }
}

impl FieldValue for ShadowTuning {
    fn to_raw(&self) -> RawValue {
        struct_to_raw(self)
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        struct_from_raw(raw)
    }
}

/// One buildable structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureRecord {
    pub id: String,
    pub group: String,
    /// Id of the architecture style this structure was generated for.
    pub owner_style: String,
    pub auto_load: bool,
    pub sprite_prefix: String,
    pub can_upgrade: bool,
    pub upgrade_to: String,
    pub upgraded_from: String,
    pub has_construction_sprite: bool,
    pub disabled_sprites: bool,
    pub material: String,
    pub atlas_id: String,
    pub shadow: bool,
    pub shadow_tuning: ShadowTuning,
    pub burnable: bool,
    pub acid_affected: bool,
    pub spread_biome: bool,
    pub spread_biome_id: String,
    pub footprint: Footprint,
    pub growth_biome_tags: Vec<String>,
    pub spread_biome_tags: Vec<String>,
    pub step_action: BehaviorRef,
    pub map_icon_color: BehaviorRef,

    // Derived flags.
    pub has_step_action: bool,
    pub has_map_icon_color: bool,
    pub has_growth_biome_tags: bool,
    pub has_spread_biome_tags: bool,
}

impl FieldMapped for StructureRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<StructureRecord>] = &[
            field!(StructureRecord, id),
            field!(StructureRecord, group),
            field!(StructureRecord, owner_style),
            field!(StructureRecord, auto_load),
            field!(StructureRecord, sprite_prefix),
            field!(StructureRecord, can_upgrade),
            field!(StructureRecord, upgrade_to),
            field!(StructureRecord, upgraded_from),
            field!(StructureRecord, has_construction_sprite),
            field!(StructureRecord, disabled_sprites),
            field!(StructureRecord, material),
            field!(StructureRecord, atlas_id),
            field!(StructureRecord, shadow),
            field!(StructureRecord, shadow_tuning),
            field!(StructureRecord, burnable),
            field!(StructureRecord, acid_affected),
            field!(StructureRecord, spread_biome),
            field!(StructureRecord, spread_biome_id),
            field!(StructureRecord, footprint),
            field!(StructureRecord, growth_biome_tags),
            field!(StructureRecord, spread_biome_tags),
            field!(StructureRecord, step_action),
            field!(StructureRecord, map_icon_color),
            field!(StructureRecord, has_step_action),
            field!(StructureRecord, has_map_icon_color),
            field!(StructureRecord, has_growth_biome_tags),
            field!(StructureRecord, has_spread_biome_tags),
        ];
        FIELDS
    }
}

impl RecordData for StructureRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}

/// An architecture style: the construction identity of a culture.
///
/// Template styles hold the structure set other styles generate from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRecord {
    pub id: String,
    pub is_template: bool,
    /// Opt-in for structure synthesis during linking.
    pub generate_structures: bool,
    /// Style whose build orders supply the templates to clone.
    pub generation_source: String,
    /// Order keys to synthesize structures for.
    pub styled_build_orders: Vec<String>,
    /// Order key to structure id within this style. Template styles author
    /// this; generating styles have it filled during linking.
    pub build_orders: IndexMap<String, String>,
    /// Extra order keys contributed by other packs, merged in at link time.
    pub shared_build_orders: IndexMap<String, String>,
    pub spread_biome_id: String,
    pub spread_biome: bool,
    pub material: String,
    pub has_shadows: bool,
    pub burnable_structures: bool,
    pub acid_affected_structures: bool,
}

impl StyleRecord {
    /// Structure id registered for an order key, if any.
    pub fn structure_for_order(&self, key: &str) -> Option<&str> {
        self.build_orders.get(key).map(String::as_str)
    }
}

impl FieldMapped for StyleRecord {
    fn fields() -> &'static [FieldDef<Self>] {
        static FIELDS: &[FieldDef<StyleRecord>] = &[
            field!(StyleRecord, id),
            field!(StyleRecord, is_template),
            field!(StyleRecord, generate_structures),
            field!(StyleRecord, generation_source),
            field!(StyleRecord, styled_build_orders),
            field!(StyleRecord, build_orders),
            field!(StyleRecord, shared_build_orders),
            field!(StyleRecord, spread_biome_id),
            field!(StyleRecord, spread_biome),
            field!(StyleRecord, material),
            field!(StyleRecord, has_shadows),
            field!(StyleRecord, burnable_structures),
            field!(StyleRecord, acid_affected_structures),
        ];
        FIELDS
    }
}

impl RecordData for StyleRecord {
    type Aux = ();

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }
}
