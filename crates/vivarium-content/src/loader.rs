//! Source loading: text units to raw records to typed records.
//!
//! A source unit is one record: a name carrying the kind tag by extension
//! convention (`wolf.creature.json` has kind `creature`) and a JSON body
//! mapping field names to values. The loader parses the body, decodes it
//! through the codec, and routes the typed record to its registry.
//!
//! Failures are tolerated at unit granularity: a duplicate id or a field
//! that will not coerce drops that one unit with an error in the log, and
//! loading continues. A kind with no registry aborts the whole load; that
//! is a setup mistake, not a content mistake.

use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::directory::{BuiltinRecord, ContentDirectory, DirectoryError, DirectoryRouteError};
use crate::kind::Kind;
use crate::raw;
use crate::records::{
    AchievementRecord, CreatureRecord, CreatureTraitRecord, CultureTraitRecord, HotkeyRecord,
    ItemModifierRecord, ItemRecord, ModRecord, PigmentRecord, ResourceRecord, SpeciesTraitRecord,
    SpellRecord, StatusRecord, StructureRecord, StyleRecord,
};
use crate::registry::{RecordData, RegistryError};

/// One record's worth of source text.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> SourceUnit {
        SourceUnit { name: name.into(), text: text.into() }
    }

    /// Kind tag carried by the unit name: the segment before a trailing
    /// `.json`, so both `wolf.creature.json` and `wolf.creature` work.
    pub fn kind_tag(&self) -> Option<&str> {
        let stem = self.name.strip_suffix(".json").unwrap_or(&self.name);
        let (_, tag) = stem.rsplit_once('.')?;
        if tag.is_empty() {
            None
        } else {
            Some(tag)
        }
    }
}

/// Errors raised while loading one source unit.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unit `{unit}`: name carries no kind tag")]
    NoKindTag { unit: String },
    #[error("unit `{unit}`: record has no id")]
    MissingId { unit: String },
    #[error("unit `{unit}`: {source}")]
    Codec {
        unit: String,
        #[source]
        source: CodecError,
    },
    #[error("unit `{unit}`: {source}")]
    Registry {
        unit: String,
        #[source]
        source: RegistryError,
    },
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl LoadError {
    /// Structural errors abort the whole load; everything else skips the
    /// one bad unit.
    fn is_fatal(&self) -> bool {
        matches!(self, LoadError::Directory(DirectoryError::MissingRegistry(_)))
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: u32,
    pub skipped: u32,
    /// Names of units that failed, for the startup log.
    pub failed_units: Vec<String>,
}

/// Load every unit in order, tolerating per-unit failures.
///
/// Returns an error only for structural problems (a kind with no
/// registry); data problems are logged and counted in the report.
pub fn load_units(
    dir: &mut ContentDirectory,
    units: &[SourceUnit],
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for unit in units {
        match load_unit(dir, unit) {
            Ok(()) => report.loaded += 1,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                log::error!("skipping source unit: {err}");
                report.skipped += 1;
                report.failed_units.push(unit.name.clone());
            }
        }
    }
    log::info!("loaded {} source units, skipped {}", report.loaded, report.skipped);
    Ok(report)
}

/// Load a single unit: parse, decode, route by kind, journal.
pub fn load_unit(dir: &mut ContentDirectory, unit: &SourceUnit) -> Result<(), LoadError> {
    let tag = unit.kind_tag().ok_or_else(|| LoadError::NoKindTag { unit: unit.name.clone() })?;
    let kind = Kind::from_tag(tag);

    let value: serde_json::Value = serde_json::from_str(&unit.text)
        .map_err(|e| LoadError::Codec { unit: unit.name.clone(), source: e.into() })?;
    let fields = raw::record_from_json(&value)
        .ok_or_else(|| LoadError::Codec { unit: unit.name.clone(), source: CodecError::NotAnObject })?;

    match kind {
        Kind::Creature => add_typed::<CreatureRecord>(dir, &fields, unit),
        Kind::Structure => add_typed::<StructureRecord>(dir, &fields, unit),
        Kind::Style => add_typed::<StyleRecord>(dir, &fields, unit),
        Kind::SpeciesTrait => add_typed::<SpeciesTraitRecord>(dir, &fields, unit),
        Kind::CreatureTrait => add_typed::<CreatureTraitRecord>(dir, &fields, unit),
        Kind::CultureTrait => add_typed::<CultureTraitRecord>(dir, &fields, unit),
        Kind::Item => add_typed::<ItemRecord>(dir, &fields, unit),
        Kind::ItemModifier => add_typed::<ItemModifierRecord>(dir, &fields, unit),
        Kind::Spell => add_typed::<SpellRecord>(dir, &fields, unit),
        Kind::Status => add_typed::<StatusRecord>(dir, &fields, unit),
        Kind::Hotkey => add_typed::<HotkeyRecord>(dir, &fields, unit),
        Kind::Achievement => add_typed::<AchievementRecord>(dir, &fields, unit),
        Kind::Pigment => add_typed::<PigmentRecord>(dir, &fields, unit),
        Kind::Resource => add_typed::<ResourceRecord>(dir, &fields, unit),
        Kind::Custom(tag) => {
            if !dir.has_kind(&Kind::Custom(tag.clone())) {
                return Err(DirectoryError::MissingRegistry(tag).into());
            }
            let id = match fields.get("id") {
                Some(crate::raw::RawValue::Str(id)) if !id.is_empty() => id.clone(),
                _ => return Err(LoadError::MissingId { unit: unit.name.clone() }),
            };
            let record = ModRecord { id, kind_tag: tag, fields };
            dir.add_custom(record).map_err(|e| match e {
                DirectoryRouteError::Directory(e) => LoadError::Directory(e),
                DirectoryRouteError::Registry(e) => {
                    LoadError::Registry { unit: unit.name.clone(), source: e }
                }
            })?;
            Ok(())
        }
    }
}

fn add_typed<R: BuiltinRecord + 'static>(
    dir: &mut ContentDirectory,
    fields: &crate::raw::RawRecord,
    unit: &SourceUnit,
) -> Result<(), LoadError> {
    let record: R = codec::decode(fields)
        .map_err(|e| LoadError::Codec { unit: unit.name.clone(), source: e })?;
    if record.id().is_empty() {
        return Err(LoadError::MissingId { unit: unit.name.clone() });
    }
    dir.add(record).map_err(|e| LoadError::Registry { unit: unit.name.clone(), source: e })?;
    Ok(())
}
