//! Command-line flag layer.
//!
//! The loader works against the [`FlagSource`] trait so the core has no
//! dependency on any argument parser. [`StaticFlags`] is a plain in-memory
//! implementation; the `cli` module (behind the `clap` feature) adapts clap's
//! parsed matches.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Result, TierconfError};
use crate::store::Setter;
use crate::value::Value;

/// Current and declared-default text of one registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub value: String,
    pub default: String,
}

impl Flag {
    /// A flag counts as set when its value differs from its default.
    pub fn is_changed(&self) -> bool {
        self.value != self.default
    }
}

/// Anything that can look up registered flags by exact name.
pub trait FlagSource {
    fn lookup(&self, name: &str) -> Option<Flag>;
}

/// In-memory flag registry.
#[derive(Debug, Clone, Default)]
pub struct StaticFlags {
    flags: HashMap<String, Flag>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with a default. Its value starts out equal to the default.
    pub fn define(mut self, name: &str, default: &str) -> Self {
        self.flags.insert(
            name.to_string(),
            Flag {
                value: default.to_string(),
                default: default.to_string(),
            },
        );
        self
    }

    /// Assign a value to a registered flag.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let flag = self
            .flags
            .get_mut(name)
            .ok_or_else(|| TierconfError::UnknownFlag(name.to_string()))?;
        flag.value = value.to_string();
        Ok(())
    }
}

impl FlagSource for StaticFlags {
    fn lookup(&self, name: &str) -> Option<Flag> {
        self.flags.get(name).cloned()
    }
}

/// Set each requested key from a registered flag whose value differs from its default.
///
/// Keys are matched against flag names exactly. Flags still at their default
/// are skipped, so values from earlier layers survive. Every key must name a
/// registered flag: an unknown key fails with [`TierconfError::UnknownFlag`]
/// before anything is written.
pub fn from_flags<S, F>(keys: &[&str], sink: &mut S, flags: &F) -> Result<()>
where
    S: Setter + ?Sized,
    F: FlagSource + ?Sized,
{
    let resolved = keys
        .iter()
        .map(|key| {
            flags
                .lookup(key)
                .map(|flag| (*key, flag))
                .ok_or_else(|| TierconfError::UnknownFlag(key.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut written = 0;
    for (key, flag) in resolved {
        if flag.is_changed() {
            trace!(key, value = %flag.value, "flag changed from default");
            sink.set(key, Value::Str(flag.value));
            written += 1;
        }
    }
    debug!(source = "flags", written, "loaded flags");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::RecordingSink;
    use crate::store::{BoolGetter, Getter, IntGetter, Store, StringSetter};

    fn flags() -> StaticFlags {
        StaticFlags::new()
            .define("retry", "false")
            .define("port", "8080")
            .define("name", "")
    }

    #[test]
    fn changed_flags_are_written() {
        let mut f = flags();
        f.set("retry", "true").unwrap();
        let mut store = Store::new();
        from_flags(&["retry", "port"], &mut store, &f).unwrap();
        assert!(store.get_bool("retry"));
        assert!(store.get("port").is_none());
    }

    #[test]
    fn default_valued_flags_keep_earlier_layers() {
        let mut store = Store::new();
        store.set_string("port", "9000");
        from_flags(&["port"], &mut store, &flags()).unwrap();
        assert_eq!(store.get_int("port"), 9000);
    }

    #[test]
    fn flag_set_back_to_default_is_not_written() {
        let mut f = flags();
        f.set("port", "8080").unwrap();
        let mut sink = RecordingSink::default();
        from_flags(&["port"], &mut sink, &f).unwrap();
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn unknown_flag_fails_without_writing() {
        let mut f = flags();
        f.set("retry", "true").unwrap();
        let mut sink = RecordingSink::default();
        let err = from_flags(&["retry", "missing"], &mut sink, &f).unwrap_err();
        assert!(matches!(err, TierconfError::UnknownFlag(ref k) if k == "missing"));
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn names_are_case_sensitive() {
        let err = from_flags(&["RETRY"], &mut Store::new(), &flags()).unwrap_err();
        assert!(matches!(err, TierconfError::UnknownFlag(_)));
    }

    #[test]
    fn empty_key_list_writes_nothing() {
        let mut sink = RecordingSink::default();
        from_flags(&[], &mut sink, &flags()).unwrap();
        assert!(sink.writes.is_empty());
    }

    #[test]
    fn setting_unregistered_flag_fails() {
        let mut f = flags();
        assert!(f.set("nope", "1").is_err());
    }
}
