//! Named behavior registry.
//!
//! Callback-shaped record fields cannot be serialized directly, so records
//! hold a [`BehaviorRef`]: a reference to a behavior registered by name
//! before loading begins. The codec writes only the name; decoding resolves
//! it back through this registry. Executable state never touches the wire.

use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, RwLock};

use crate::codec::{FieldError, FieldValue};
use crate::raw::RawValue;

/// Context handed to a behavior when the simulation invokes it.
#[derive(Debug, Clone, Copy)]
pub struct EffectArgs<'a> {
    /// Id of the record the behavior is attached to.
    pub source_id: &'a str,
    /// Kind-specific magnitude (spell power, status stacks, ...).
    pub strength: f32,
}

/// Signature shared by all registered behaviors.
pub type EffectFn = fn(&EffectArgs) -> bool;

/// A named behavior. The name is the serialized identity.
#[derive(Clone, Copy)]
pub struct BehaviorDef {
    pub name: &'static str,
    pub run: EffectFn,
}

/// Name of the built-in behavior that always succeeds, used as the default
/// for check-style fields left unset by the author.
pub const ALWAYS: &str = "always";

fn always(_args: &EffectArgs) -> bool {
    true
}

static BEHAVIORS: LazyLock<RwLock<HashMap<&'static str, BehaviorDef>>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(ALWAYS, BehaviorDef { name: ALWAYS, run: always });
    RwLock::new(map)
});

/// Register a behavior under its name. Must happen before any source that
/// references the name is loaded.
///
/// A duplicate name is rejected (the first registration wins) and reported
/// through the log, mirroring the custom-linker policy.
pub fn register(def: BehaviorDef) -> bool {
    let mut map = BEHAVIORS.write().expect("behavior registry poisoned");
    if map.contains_key(def.name) {
        log::error!("behavior `{}` is already registered", def.name);
        return false;
    }
    map.insert(def.name, def);
    true
}

/// Look up a behavior by name.
pub fn lookup(name: &str) -> Option<BehaviorDef> {
    BEHAVIORS.read().expect("behavior registry poisoned").get(name).copied()
}

/// A record field holding an optional reference to a named behavior.
#[derive(Clone, Copy, Default)]
pub struct BehaviorRef(Option<BehaviorDef>);

impl BehaviorRef {
    /// Resolve `name` through the registry. `None` if unregistered.
    pub fn named(name: &str) -> Option<BehaviorRef> {
        lookup(name).map(|def| BehaviorRef(Some(def)))
    }

    /// The built-in always-true behavior.
    pub fn always() -> BehaviorRef {
        BehaviorRef(lookup(ALWAYS))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn name(&self) -> Option<&'static str> {
        self.0.map(|def| def.name)
    }

    /// Invoke the behavior. An unset reference reports `false`.
    pub fn run(&self, args: &EffectArgs) -> bool {
        match self.0 {
            Some(def) => (def.run)(args),
            None => false,
        }
    }
}

/// Equality is by name: two references to the same registered behavior are
/// the same reference, which is what the round-trip contract compares.
impl PartialEq for BehaviorRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Debug for BehaviorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "BehaviorRef({name})"),
            None => write!(f, "BehaviorRef(unset)"),
        }
    }
}

impl FieldValue for BehaviorRef {
    fn to_raw(&self) -> RawValue {
        match self.name() {
            Some(name) => RawValue::Str(name.to_string()),
            None => RawValue::Null,
        }
    }

    fn from_raw(raw: &RawValue) -> Result<Self, FieldError> {
        match raw {
            RawValue::Null => Ok(BehaviorRef::default()),
            RawValue::Str(name) if name.is_empty() => Ok(BehaviorRef::default()),
            RawValue::Str(name) => BehaviorRef::named(name)
                .ok_or_else(|| FieldError::UnknownBehavior { name: name.clone() }),
            other => Err(FieldError::expected("behavior name", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_args: &EffectArgs) -> bool {
        false
    }

    #[test]
    fn test_register_and_resolve() {
        register(BehaviorDef { name: "test_never", run: never });
        let r = BehaviorRef::named("test_never").unwrap();
        assert_eq!(r.name(), Some("test_never"));
        assert!(!r.run(&EffectArgs { source_id: "x", strength: 1.0 }));
    }

    #[test]
    fn test_duplicate_registration_rejected_first_wins() {
        assert!(register(BehaviorDef { name: "test_dup", run: never }));
        assert!(!register(BehaviorDef { name: "test_dup", run: always }));
        let r = BehaviorRef::named("test_dup").unwrap();
        assert!(!r.run(&EffectArgs { source_id: "x", strength: 0.0 }));
    }

    #[test]
    fn test_always_is_builtin() {
        let r = BehaviorRef::always();
        assert!(r.is_set());
        assert!(r.run(&EffectArgs { source_id: "x", strength: 0.0 }));
    }

    #[test]
    fn test_unset_reference() {
        let r = BehaviorRef::default();
        assert!(!r.is_set());
        assert_eq!(r.name(), None);
        assert!(!r.run(&EffectArgs { source_id: "x", strength: 0.0 }));
    }
}
