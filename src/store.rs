//! The typed key/value store and the capabilities it exposes.
//!
//! Loaders only need [`Setter`]; application code usually reads through the
//! typed getters. Typed getters and setters are blanket-implemented for every
//! [`Getter`] / [`Setter`], so a custom sink gets them for free.
//!
//! Keys are stored exactly as the caller spelled them. Case folding happens in
//! the loaders, not here: `"port"` and `"PORT"` are two different entries.
//!
//! The store has no internal locking. Finish loading before sharing it across
//! threads, or wrap it in a mutex if it must be mutated concurrently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TierconfError};
use crate::registry::ConfigOption;
use crate::value::Value;

/// Read access to raw values. A missing key is `None`, never an error.
pub trait Getter {
    fn get(&self, key: &str) -> Option<&Value>;
}

/// Write access used by loaders. `set` always replaces any previous value.
pub trait Setter {
    fn set(&mut self, key: &str, value: Value);
}

/// Both halves of the store interface.
pub trait Provider: Getter + Setter {}

impl<T: Getter + Setter + ?Sized> Provider for T {}

pub trait StringGetter {
    /// Text form of the value, `""` when missing.
    fn get_string(&self, key: &str) -> String;
}

pub trait IntGetter {
    /// Base-10 integer, `0` when missing or unconvertible.
    fn get_int(&self, key: &str) -> i64;
}

pub trait BoolGetter {
    /// `false` when missing or not one of the accepted boolean spellings.
    fn get_bool(&self, key: &str) -> bool;
}

pub trait Float32Getter {
    fn get_float32(&self, key: &str) -> f32;
}

pub trait Float64Getter {
    fn get_float64(&self, key: &str) -> f64;
}

impl<T: Getter + ?Sized> StringGetter for T {
    fn get_string(&self, key: &str) -> String {
        self.get(key).map(Value::coerce_string).unwrap_or_default()
    }
}

impl<T: Getter + ?Sized> IntGetter for T {
    fn get_int(&self, key: &str) -> i64 {
        self.get(key).map(Value::coerce_int).unwrap_or_default()
    }
}

impl<T: Getter + ?Sized> BoolGetter for T {
    fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(Value::coerce_bool).unwrap_or_default()
    }
}

impl<T: Getter + ?Sized> Float32Getter for T {
    fn get_float32(&self, key: &str) -> f32 {
        self.get(key).map(Value::coerce_f32).unwrap_or_default()
    }
}

impl<T: Getter + ?Sized> Float64Getter for T {
    fn get_float64(&self, key: &str) -> f64 {
        self.get(key).map(Value::coerce_f64).unwrap_or_default()
    }
}

pub trait StringSetter {
    fn set_string(&mut self, key: &str, value: &str);
}

pub trait IntSetter {
    fn set_int(&mut self, key: &str, value: i64);
}

pub trait BoolSetter {
    fn set_bool(&mut self, key: &str, value: bool);
}

pub trait Float32Setter {
    fn set_float32(&mut self, key: &str, value: f32);
}

pub trait Float64Setter {
    fn set_float64(&mut self, key: &str, value: f64);
}

impl<T: Setter + ?Sized> StringSetter for T {
    fn set_string(&mut self, key: &str, value: &str) {
        self.set(key, Value::from(value));
    }
}

impl<T: Setter + ?Sized> IntSetter for T {
    fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, Value::Int(value));
    }
}

impl<T: Setter + ?Sized> BoolSetter for T {
    fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }
}

impl<T: Setter + ?Sized> Float32Setter for T {
    fn set_float32(&mut self, key: &str, value: f32) {
        self.set(key, Value::from(value));
    }
}

impl<T: Setter + ?Sized> Float64Setter for T {
    fn set_float64(&mut self, key: &str, value: f64) {
        self.set(key, Value::Float(value));
    }
}

/// In-memory configuration store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    values: HashMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `values`.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Seed a store from a flat TOML document (`port = 8080`).
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|source| TierconfError::TomlSeed { source })
    }

    /// Seed a store from a flat JSON object (`{"port": 8080}`).
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|source| TierconfError::JsonSeed { source })
    }

    /// Store an option record under `name`, replacing whatever was there.
    ///
    /// Option records share the key namespace with plain settings.
    pub fn insert(&mut self, name: &str, option: ConfigOption) {
        self.values.insert(name.to_string(), option.into());
    }

    /// Remove the entry under `name`, option record or not.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// The option record stored under `name`, if that entry is one.
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        match self.values.get(name) {
            Some(Value::Option(opt)) => Some(&**opt),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All entries sorted by key, for listings and diagnostics.
    pub fn entries(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> =
            self.values.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Getter for Store {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl Setter for Store {
    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Store {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::with_values(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_zero_values() {
        let store = Store::new();
        assert!(store.get("nope").is_none());
        assert_eq!(store.get_string("nope"), "");
        assert_eq!(store.get_int("nope"), 0);
        assert!(!store.get_bool("nope"));
        assert_eq!(store.get_float32("nope"), 0.0);
        assert_eq!(store.get_float64("nope"), 0.0);
    }

    #[test]
    fn set_overwrites() {
        let mut store = Store::new();
        store.set_string("port", "80");
        store.set_int("port", 8080);
        assert_eq!(store.get("port"), Some(&Value::Int(8080)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn typed_setters_store_as_is() {
        let mut store = Store::new();
        store.set_bool("verbose", true);
        store.set_float64("ratio", 0.25);
        store.set_float32("pi", 3.5);
        assert_eq!(store.get("verbose"), Some(&Value::Bool(true)));
        assert_eq!(store.get("ratio"), Some(&Value::Float(0.25)));
        assert_eq!(store.get_float32("pi"), 3.5);
    }

    #[test]
    fn float32_setter_reads_back_as_written() {
        let mut store = Store::new();
        store.set_float32("ratio", 0.1);
        assert_eq!(store.get_string("ratio"), "0.1");
        assert_eq!(store.get_float64("ratio"), 0.1);
        assert_eq!(store.get_float32("ratio"), 0.1_f32);
    }

    #[test]
    fn out_of_range_float_text_reads_zero() {
        let store = Store::with_values([("big64", "1e400"), ("big32", "1e39")]);
        assert_eq!(store.get_float64("big64"), 0.0);
        assert_eq!(store.get_float32("big32"), 0.0);
        assert_eq!(Store::with_values([("x", 1e39_f64)]).get_float32("x"), 0.0);
    }

    #[test]
    fn string_values_coerce_on_read() {
        let store = Store::with_values([
            ("port", "4928"),
            ("pi", "3.142"),
            ("verbose", "false"),
            ("email", "test@example.com"),
        ]);
        assert_eq!(store.get_int("port"), 4928);
        assert_eq!(store.get_float64("pi"), 3.142);
        assert_eq!(store.get_float32("pi"), 3.142_f32);
        assert!(!store.get_bool("verbose"));
        assert_eq!(store.get_int("email"), 0);
        assert_eq!(store.get_string("email"), "test@example.com");
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut store = Store::new();
        store.set_string("Port", "1");
        assert!(store.get("port").is_none());
        assert_eq!(store.get_int("Port"), 1);
    }

    #[test]
    fn insert_and_remove_option_records() {
        let mut store = Store::new();
        store.insert("port", ConfigOption::new("port", 8080, "Listen port"));
        assert_eq!(store.option("port").unwrap().help, "Listen port");
        assert_eq!(store.get_int("port"), 0);

        store.insert("port", ConfigOption::new("port", 9090, "Replaced"));
        assert_eq!(store.option("port").unwrap().value, Value::Int(9090));

        assert!(store.remove("port").is_some());
        assert!(store.get("port").is_none());
        assert!(store.remove("port").is_none());
    }

    #[test]
    fn option_lookup_ignores_scalars() {
        let store = Store::with_values([("port", 1)]);
        assert!(store.option("port").is_none());
    }

    #[test]
    fn seed_from_toml() {
        let store = Store::from_toml_str("port = 8080\nhost = \"localhost\"\ndebug = true").unwrap();
        assert_eq!(store.get_int("port"), 8080);
        assert_eq!(store.get_string("host"), "localhost");
        assert!(store.get_bool("debug"));
    }

    #[test]
    fn seed_from_json() {
        let store = Store::from_json_str(r#"{"port": "4928", "pi": 3.142}"#).unwrap();
        assert_eq!(store.get_int("port"), 4928);
        assert_eq!(store.get_float64("pi"), 3.142);
    }

    #[test]
    fn seed_rejects_nested_tables() {
        let err = Store::from_toml_str("[database]\nurl = 1").unwrap_err();
        assert!(matches!(err, TierconfError::TomlSeed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn seed_json_error_keeps_source() {
        let err = Store::from_json_str("{\"port\": [1, 2]}").unwrap_err();
        assert!(matches!(err, TierconfError::JsonSeed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn entries_sorted() {
        let store: Store = [("b", 2), ("a", 1)].into_iter().collect();
        let keys: Vec<&str> = store.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    fn bump_port<P: Provider + ?Sized>(provider: &mut P) {
        let next = provider.get_int("port") + 1;
        provider.set_int("port", next);
    }

    #[test]
    fn provider_reads_and_writes() {
        let mut store = Store::with_values([("port", "8080")]);
        bump_port(&mut store);
        assert_eq!(store.get("port"), Some(&Value::Int(8081)));
    }

    #[test]
    fn works_through_trait_objects() {
        let mut store = Store::new();
        {
            let sink: &mut dyn Setter = &mut store;
            sink.set_string("retry", "true");
        }
        let reader: &dyn Getter = &store;
        assert!(reader.get_bool("retry"));
    }
}
