//! Vivarium content pipeline - registry and linking engine for moddable
//! world-sim content.
//!
//! Content is authored as declarative JSON records, contributed by the
//! base pack and by extensions, loaded into per-kind registries, and then
//! resolved in a single linking pass that fixes up cross-references,
//! computes derived fields, and synthesizes new records (zombie creature
//! variants, per-style structures) from existing ones.
//!
//! The pipeline has two strict phases with a hard barrier between them:
//! all loading completes before any linking begins, and records link in
//! exactly the order they were loaded. Everything is single-threaded.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`raw`] | Loosely-typed ordered field maps (`RawRecord`, `RawValue`) |
//! | [`codec`] | Descriptor-table codec between typed records and field maps |
//! | [`behavior`] | Named behavior registry backing callback-shaped fields |
//! | [`kind`] | Record kind discriminator (closed built-ins + open extensions) |
//! | [`registry`] | Per-kind id-unique, insertion-ordered stores with handles |
//! | [`directory`] | Process-wide kind to registry lookup plus the load journal |
//! | [`loader`] | Source unit parsing, decoding, and routing |
//! | [`linker`] | Per-kind dispatch engine and the custom-routine table |
//! | [`pool`] | Weighted multisets for rate-proportional random selection |
//! | [`records`] | Record schemas and registry link state for every kind |
//!
//! # Example
//!
//! ```rust
//! use vivarium_content::prelude::*;
//!
//! let mut dir = ContentDirectory::new();
//! let units = [SourceUnit::new(
//!     "wolf.creature.json",
//!     r#"{ "id": "wolf", "can_become_zombie": true, "zombie_auto_derive": true }"#,
//! )];
//! load_units(&mut dir, &units).unwrap();
//!
//! Linker::new().resolve_all(&mut dir).unwrap();
//! assert!(dir.creatures.contains("wolf_zombie"));
//! ```

pub mod behavior;
pub mod codec;
pub mod directory;
pub mod kind;
mod link;
pub mod linker;
pub mod loader;
pub mod pool;
pub mod raw;
pub mod records;
pub mod registry;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::codec::{decode, encode, export_json, import_json};
    pub use crate::directory::ContentDirectory;
    pub use crate::kind::Kind;
    pub use crate::linker::Linker;
    pub use crate::loader::{load_units, SourceUnit};
    pub use crate::records::*;
    pub use crate::registry::{Handle, Registry};
}
