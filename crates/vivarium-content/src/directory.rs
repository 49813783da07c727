//! Process-wide kind to registry lookup.
//!
//! The directory owns one registry per built-in kind plus stores for any
//! extension kinds announced before loading. Membership is fixed once
//! loading begins; the registries themselves stay mutable through the end
//! of the linking pass. It also keeps the load journal: the exact order
//! records were added, which is the order linking processes them in.

use std::collections::HashMap;

use thiserror::Error;

use crate::kind::Kind;
use crate::records::{
    AchievementRecord, CreatureRecord, CreatureTraitRecord, CultureTraitRecord, HotkeyRecord,
    ItemModifierRecord, ItemRecord, ModRecord, PigmentRecord, ResourceRecord, SpeciesTraitRecord,
    SpellRecord, StatusRecord, StructureRecord, StyleRecord,
};
use crate::registry::{Handle, RecordData, Registry, RegistryError};

/// Errors raised by directory configuration and routing.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Structural misconfiguration: content arrived for a kind nothing
    /// registered a store for. Always fatal.
    #[error("no registry for kind `{0}` (register the kind before loading)")]
    MissingRegistry(String),
    #[error("kind `{0}` is already registered")]
    DuplicateKind(String),
}

/// All registries, one per kind.
#[derive(Debug)]
pub struct ContentDirectory {
    pub creatures: Registry<CreatureRecord>,
    pub structures: Registry<StructureRecord>,
    pub styles: Registry<StyleRecord>,
    pub species_traits: Registry<SpeciesTraitRecord>,
    pub creature_traits: Registry<CreatureTraitRecord>,
    pub culture_traits: Registry<CultureTraitRecord>,
    pub items: Registry<ItemRecord>,
    pub item_mods: Registry<ItemModifierRecord>,
    pub spells: Registry<SpellRecord>,
    pub statuses: Registry<StatusRecord>,
    pub hotkeys: Registry<HotkeyRecord>,
    pub achievements: Registry<AchievementRecord>,
    pub pigments: Registry<PigmentRecord>,
    pub resources: Registry<ResourceRecord>,
    custom: HashMap<String, Registry<ModRecord>>,
    journal: Vec<(Kind, String)>,
}

impl ContentDirectory {
    pub fn new() -> ContentDirectory {
        ContentDirectory {
            creatures: Registry::new(Kind::Creature),
            structures: Registry::new(Kind::Structure),
            styles: Registry::new(Kind::Style),
            species_traits: Registry::new(Kind::SpeciesTrait),
            creature_traits: Registry::new(Kind::CreatureTrait),
            culture_traits: Registry::new(Kind::CultureTrait),
            items: Registry::new(Kind::Item),
            item_mods: Registry::new(Kind::ItemModifier),
            spells: Registry::new(Kind::Spell),
            statuses: Registry::new(Kind::Status),
            hotkeys: Registry::new(Kind::Hotkey),
            achievements: Registry::new(Kind::Achievement),
            pigments: Registry::new(Kind::Pigment),
            resources: Registry::new(Kind::Resource),
            custom: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// Announce an extension kind, creating its store. Must happen before
    /// any source of that kind is loaded.
    pub fn register_kind(&mut self, tag: &str) -> Result<(), DirectoryError> {
        if Kind::from_tag(tag) != Kind::Custom(tag.to_string()) || self.custom.contains_key(tag) {
            return Err(DirectoryError::DuplicateKind(tag.to_string()));
        }
        self.custom.insert(tag.to_string(), Registry::new(Kind::Custom(tag.to_string())));
        Ok(())
    }

    /// Whether any registry exists for `kind`.
    pub fn has_kind(&self, kind: &Kind) -> bool {
        match kind {
            Kind::Custom(tag) => self.custom.contains_key(tag),
            _ => true,
        }
    }

    /// Store for an extension kind.
    pub fn custom(&self, tag: &str) -> Result<&Registry<ModRecord>, DirectoryError> {
        self.custom.get(tag).ok_or_else(|| DirectoryError::MissingRegistry(tag.to_string()))
    }

    pub fn custom_mut(&mut self, tag: &str) -> Result<&mut Registry<ModRecord>, DirectoryError> {
        self.custom.get_mut(tag).ok_or_else(|| DirectoryError::MissingRegistry(tag.to_string()))
    }

    /// Add a built-in record and journal it for the linking pass.
    pub fn add<R: BuiltinRecord>(&mut self, record: R) -> Result<Handle<R>, RegistryError> {
        let id = record.id().to_string();
        let handle = R::registry_mut(self).add(record)?;
        self.journal.push((R::KIND, id));
        Ok(handle)
    }

    /// Add an extension record and journal it.
    pub fn add_custom(&mut self, record: ModRecord) -> Result<Handle<ModRecord>, DirectoryRouteError> {
        let tag = record.kind_tag.clone();
        let id = record.id.clone();
        let handle = self.custom_mut(&tag)?.add(record)?;
        self.journal.push((Kind::Custom(tag), id));
        Ok(handle)
    }

    /// The load journal: every record in the order it was added.
    pub fn journal(&self) -> &[(Kind, String)] {
        &self.journal
    }

    /// Reset every registry's accumulated link state. Runs once at the
    /// start of a linking pass.
    pub fn reset_link_state(&mut self) {
        self.creatures.reset_aux();
        self.structures.reset_aux();
        self.styles.reset_aux();
        self.species_traits.reset_aux();
        self.creature_traits.reset_aux();
        self.culture_traits.reset_aux();
        self.items.reset_aux();
        self.item_mods.reset_aux();
        self.spells.reset_aux();
        self.statuses.reset_aux();
        self.hotkeys.reset_aux();
        self.achievements.reset_aux();
        self.pigments.reset_aux();
        self.resources.reset_aux();
        for registry in self.custom.values_mut() {
            registry.reset_aux();
        }
    }

    /// Per-registry record counts for startup logs.
    pub fn summary(&self) -> Vec<(String, usize)> {
        let mut counts = vec![
            ("creature".to_string(), self.creatures.len()),
            ("structure".to_string(), self.structures.len()),
            ("style".to_string(), self.styles.len()),
            ("species_trait".to_string(), self.species_traits.len()),
            ("creature_trait".to_string(), self.creature_traits.len()),
            ("culture_trait".to_string(), self.culture_traits.len()),
            ("item".to_string(), self.items.len()),
            ("item_mod".to_string(), self.item_mods.len()),
            ("spell".to_string(), self.spells.len()),
            ("status".to_string(), self.statuses.len()),
            ("hotkey".to_string(), self.hotkeys.len()),
            ("achievement".to_string(), self.achievements.len()),
            ("pigment".to_string(), self.pigments.len()),
            ("resource".to_string(), self.resources.len()),
        ];
        for (tag, registry) in &self.custom {
            counts.push((tag.clone(), registry.len()));
        }
        counts
    }
}

impl Default for ContentDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Routing failure when adding an extension record.
#[derive(Debug, Error)]
pub enum DirectoryRouteError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Maps a built-in record type to its registry within the directory.
pub trait BuiltinRecord: RecordData + crate::codec::FieldMapped {
    const KIND: Kind;

    fn registry(dir: &ContentDirectory) -> &Registry<Self>;
    fn registry_mut(dir: &mut ContentDirectory) -> &mut Registry<Self>;
}

macro_rules! builtin_record {
    ($record:ty, $kind:expr, $field:ident) => {
        impl BuiltinRecord for $record {
            const KIND: Kind = $kind;

            fn registry(dir: &ContentDirectory) -> &Registry<Self> {
                &dir.$field
            }

            fn registry_mut(dir: &mut ContentDirectory) -> &mut Registry<Self> {
                &mut dir.$field
            }
        }
    };
}

builtin_record!(CreatureRecord, Kind::Creature, creatures);
builtin_record!(StructureRecord, Kind::Structure, structures);
builtin_record!(StyleRecord, Kind::Style, styles);
builtin_record!(SpeciesTraitRecord, Kind::SpeciesTrait, species_traits);
builtin_record!(CreatureTraitRecord, Kind::CreatureTrait, creature_traits);
builtin_record!(CultureTraitRecord, Kind::CultureTrait, culture_traits);
builtin_record!(ItemRecord, Kind::Item, items);
builtin_record!(ItemModifierRecord, Kind::ItemModifier, item_mods);
builtin_record!(SpellRecord, Kind::Spell, spells);
builtin_record!(StatusRecord, Kind::Status, statuses);
builtin_record!(HotkeyRecord, Kind::Hotkey, hotkeys);
builtin_record!(AchievementRecord, Kind::Achievement, achievements);
builtin_record!(PigmentRecord, Kind::Pigment, pigments);
builtin_record!(ResourceRecord, Kind::Resource, resources);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_preserves_interleaved_load_order() {
        let mut dir = ContentDirectory::new();

        let mut wolf = CreatureRecord::default();
        wolf.id = "wolf".into();
        dir.add(wolf).unwrap();

        let mut russet = PigmentRecord::default();
        russet.id = "russet".into();
        dir.add(russet).unwrap();

        let mut bear = CreatureRecord::default();
        bear.id = "bear".into();
        dir.add(bear).unwrap();

        let journal: Vec<_> =
            dir.journal().iter().map(|(k, id)| (k.clone(), id.as_str())).collect();
        assert_eq!(
            journal,
            [
                (Kind::Creature, "wolf"),
                (Kind::Pigment, "russet"),
                (Kind::Creature, "bear"),
            ]
        );
    }

    #[test]
    fn test_custom_kind_must_be_registered() {
        let mut dir = ContentDirectory::new();
        assert!(dir.custom("weather_front").is_err());

        dir.register_kind("weather_front").unwrap();
        assert!(dir.custom("weather_front").is_ok());
        assert!(dir.has_kind(&Kind::Custom("weather_front".into())));

        // Second registration is rejected.
        assert!(matches!(
            dir.register_kind("weather_front"),
            Err(DirectoryError::DuplicateKind(_))
        ));
        // Built-in tags cannot be re-registered as custom kinds.
        assert!(dir.register_kind("creature").is_err());
    }

    #[test]
    fn test_add_custom_routes_and_journals() {
        let mut dir = ContentDirectory::new();
        dir.register_kind("weather_front").unwrap();

        let record = ModRecord {
            id: "monsoon".into(),
            kind_tag: "weather_front".into(),
            fields: Default::default(),
        };
        dir.add_custom(record).unwrap();

        assert!(dir.custom("weather_front").unwrap().contains("monsoon"));
        assert_eq!(dir.journal().len(), 1);
    }
}
