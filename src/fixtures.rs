#[cfg(test)]
pub mod test {
    use std::collections::HashMap;

    use crate::registry::OptionRegistry;
    use crate::store::Setter;
    use crate::value::Value;

    /// Sample settings shared by the loader tests.
    pub const SAMPLE: [(&str, &str); 5] = [
        ("port", "4928"),
        ("database", "sqlite"),
        ("email", "test@example.com"),
        ("pi", "3.142"),
        ("verbose", "false"),
    ];

    /// A config file covering [`SAMPLE`], with comments and noise lines.
    pub const SAMPLE_FILE: &str = "\
# sample configuration
PORT=4928
database=sqlite
  // EMAIL=commented@example.com
EMAIL=test@example.com
PI=3.142
not an assignment
VERBOSE=false
EMPTY=
";

    /// Synthetic environment: each sample key upper-cased behind `prefix`.
    pub fn sample_env(prefix: &str) -> HashMap<String, String> {
        SAMPLE
            .iter()
            .map(|(k, v)| (format!("{prefix}{}", k.to_uppercase()), v.to_string()))
            .collect()
    }

    pub fn sample_registry() -> OptionRegistry {
        OptionRegistry::new()
            .with("port", 4928, "Listen port")
            .with("database", "sqlite", "Storage backend")
            .with("verbose", false, "Chatty output")
            .with("pi", 3.142, "Circle constant")
    }

    /// A sink that records every write in order.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub writes: Vec<(String, Value)>,
    }

    impl Setter for RecordingSink {
        fn set(&mut self, key: &str, value: Value) {
            self.writes.push((key.to_string(), value));
        }
    }

    #[test]
    fn sample_env_uppercases_names() {
        let env = sample_env("APP_");
        assert_eq!(env["APP_PORT"], "4928");
        assert_eq!(env.len(), SAMPLE.len());
    }
}
