//! Named options with defaults and help text.
//!
//! An [`OptionRegistry`] is built once by the application's configuration
//! bootstrap and passed to whatever needs it (help rendering, flag
//! registration, the defaults layer). It is a plain value, not global state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::parse::FileFormat;
use crate::store::{Setter, Store};
use crate::value::Value;

/// A configurable setting: its name, default value and help text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub name: String,
    pub value: Value,
    pub help: String,
}

impl ConfigOption {
    pub fn new(name: &str, value: impl Into<Value>, help: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            help: help.to_string(),
        }
    }
}

/// Ordered table of [`ConfigOption`]s, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionRegistry {
    options: Vec<ConfigOption>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option. Re-registering a name replaces the earlier entry in place.
    pub fn register(&mut self, option: ConfigOption) -> &mut Self {
        match self.options.iter_mut().find(|o| o.name == option.name) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, name: &str, value: impl Into<Value>, help: &str) -> Self {
        self.register(ConfigOption::new(name, value, help));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Defaults layer: write the default of every requested key that has a
    /// registered option. Unregistered keys are left alone.
    pub fn load_defaults<S: Setter + ?Sized>(&self, keys: &[&str], sink: &mut S) {
        let mut written = 0;
        for key in keys {
            if let Some(option) = self.get(key) {
                sink.set(key, option.value.clone());
                written += 1;
            }
        }
        debug!(source = "defaults", written, "loaded registry defaults");
    }

    /// Render a sample file in `format`, one assignment per option.
    ///
    /// With a comment prefix, help lines are written as comments and options
    /// without a usable default (option records, empty strings) are commented
    /// out. Without one, only the assignments are written and options without
    /// a usable default are left out, so the output always parses back to the
    /// defaults.
    pub fn template(&self, format: &FileFormat) -> String {
        let comment = format
            .comment_prefixes
            .iter()
            .find(|p| !p.is_empty())
            .map(String::as_str);

        let mut out = String::new();
        for option in &self.options {
            if let Some(comment) = comment {
                for line in option.help.lines() {
                    out.push_str(&format!("{comment} {line}\n"));
                }
            }
            let key = option.name.to_uppercase();
            match (option.value.as_text(), comment) {
                (Some(text), _) if !text.is_empty() => {
                    out.push_str(&format!("{key}{}{text}\n", format.delimiter));
                }
                (_, Some(comment)) => {
                    out.push_str(&format!("{comment} {key}{}\n", format.delimiter));
                }
                (_, None) => continue,
            }
            if comment.is_some() {
                out.push('\n');
            }
        }
        out
    }

    /// A store holding every registered default under its option name.
    pub fn defaults_store(&self) -> Store {
        Store::with_values(
            self.options
                .iter()
                .map(|o| (o.name.clone(), o.value.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::sample_registry;
    use crate::store::{Getter, IntGetter, StringGetter};

    #[test]
    fn registration_order_preserved() {
        let reg = sample_registry();
        assert_eq!(reg.names(), vec!["port", "database", "verbose", "pi"]);
    }

    #[test]
    fn reregister_replaces_in_place() {
        let mut reg = sample_registry();
        reg.register(ConfigOption::new("port", 9000, "Other port"));
        assert_eq!(reg.len(), 4);
        assert_eq!(reg.names()[0], "port");
        assert_eq!(reg.get("port").unwrap().value, Value::Int(9000));
    }

    #[test]
    fn load_defaults_only_requested_keys() {
        let reg = sample_registry();
        let mut store = Store::new();
        reg.load_defaults(&["port", "unknown"], &mut store);
        assert_eq!(store.get_int("port"), 4928);
        assert!(store.get("database").is_none());
        assert!(store.get("unknown").is_none());
    }

    #[test]
    fn defaults_store_holds_everything() {
        let store = sample_registry().defaults_store();
        assert_eq!(store.len(), 4);
        assert_eq!(store.get_string("database"), "sqlite");
    }

    #[test]
    fn template_documents_each_option() {
        let template = sample_registry().template(&FileFormat::default().comment_prefix("#"));
        assert!(template.contains("# Listen port\nPORT=4928\n"));
        assert!(template.contains("DATABASE=sqlite"));
    }

    #[test]
    fn template_parses_back_to_defaults() {
        let format = FileFormat::new(":").comment_prefix("//");
        let template = sample_registry().template(&format);
        let parsed = crate::parse::parse(&template, &format).unwrap();
        assert_eq!(parsed["PORT"], "4928");
        assert_eq!(parsed["VERBOSE"], "false");
        assert_eq!(parsed["PI"], "3.142");
        assert_eq!(parsed.len(), 4);
    }

    #[test]
    fn template_comments_out_empty_defaults() {
        let reg = OptionRegistry::new().with("token", "", "API token");
        let template = reg.template(&FileFormat::default().comment_prefix("#"));
        assert!(template.contains("# TOKEN=\n"));
    }

    #[test]
    fn template_without_comment_prefix_has_no_help_lines() {
        let reg = OptionRegistry::new()
            .with("port", 8080, "Listen port, e.g. PORT=8080")
            .with("token", "", "API token");
        let format = FileFormat::default();
        let template = reg.template(&format);
        assert_eq!(template, "PORT=8080\n");

        let parsed = crate::parse::parse(&template, &format).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["PORT"], "8080");
    }

    #[test]
    fn serializes_as_list() {
        let reg = OptionRegistry::new().with("port", 8080, "Listen port");
        let json = serde_json::to_value(&reg).unwrap();
        assert_eq!(json[0]["name"], "port");
        assert_eq!(json[0]["value"], 8080);
        assert_eq!(json[0]["help"], "Listen port");
    }
}
