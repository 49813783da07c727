//! Record kind discriminator.
//!
//! The kind selects a record's schema, its registry in the directory, and
//! its linking routine. Built-in kinds are a closed set; extension packs may
//! introduce new kinds at runtime, carried as [`Kind::Custom`].

use std::fmt;

/// Discriminator for every record routed through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Creature,
    Structure,
    Style,
    SpeciesTrait,
    CreatureTrait,
    CultureTrait,
    Item,
    ItemModifier,
    Spell,
    Status,
    Hotkey,
    Achievement,
    Pigment,
    Resource,
    /// Extension kind registered at runtime by a mod.
    Custom(String),
}

impl Kind {
    /// Parse a kind tag as carried by source unit names
    /// (`wolf.creature.json` has the tag `creature`).
    ///
    /// Unknown tags become [`Kind::Custom`]; whether such a kind is loadable
    /// depends on the directory having a registered store for it.
    pub fn from_tag(tag: &str) -> Kind {
        match tag {
            "creature" => Kind::Creature,
            "structure" => Kind::Structure,
            "style" => Kind::Style,
            "species_trait" => Kind::SpeciesTrait,
            "creature_trait" => Kind::CreatureTrait,
            "culture_trait" => Kind::CultureTrait,
            "item" => Kind::Item,
            "item_mod" => Kind::ItemModifier,
            "spell" => Kind::Spell,
            "status" => Kind::Status,
            "hotkey" => Kind::Hotkey,
            "achievement" => Kind::Achievement,
            "pigment" => Kind::Pigment,
            "resource" => Kind::Resource,
            other => Kind::Custom(other.to_string()),
        }
    }

    /// The tag form of this kind, the inverse of [`Kind::from_tag`].
    pub fn tag(&self) -> &str {
        match self {
            Kind::Creature => "creature",
            Kind::Structure => "structure",
            Kind::Style => "style",
            Kind::SpeciesTrait => "species_trait",
            Kind::CreatureTrait => "creature_trait",
            Kind::CultureTrait => "culture_trait",
            Kind::Item => "item",
            Kind::ItemModifier => "item_mod",
            Kind::Spell => "spell",
            Kind::Status => "status",
            Kind::Hotkey => "hotkey",
            Kind::Achievement => "achievement",
            Kind::Pigment => "pigment",
            Kind::Resource => "resource",
            Kind::Custom(tag) => tag,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
