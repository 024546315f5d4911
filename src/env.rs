use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::store::Setter;
use crate::value::Value;

/// Options for [`from_env`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvOptions {
    /// Prepended verbatim to the upper-cased key, e.g. `"MYAPP_"` makes key
    /// `retry` read `MYAPP_RETRY`. No separator is inserted and no case change
    /// is applied to the prefix.
    pub prefix: String,
}

impl EnvOptions {
    pub fn prefixed(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Environment variable name for `key`.
    pub fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_uppercase())
    }
}

/// Set each requested key from the process environment.
///
/// Values are written under the caller's spelling of the key. A key whose
/// variable is unset (or not valid UTF-8) is left untouched in the sink.
pub fn from_env<S: Setter + ?Sized>(keys: &[&str], sink: &mut S, opts: &EnvOptions) {
    from_env_with(keys, sink, opts, |name| std::env::var(name).ok());
}

/// Like [`from_env`] but resolving names through `lookup`.
///
/// Takes a closure so tests can pass a synthetic environment instead of the
/// real one.
pub fn from_env_with<S, F>(keys: &[&str], sink: &mut S, opts: &EnvOptions, lookup: F)
where
    S: Setter + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    let mut written = 0;
    for key in keys {
        let name = opts.var_name(key);
        if let Some(value) = lookup(&name) {
            trace!(key = %key, var = %name, "env value found");
            sink.set(key, Value::Str(value));
            written += 1;
        }
    }
    debug!(source = "env", prefix = %opts.prefix, written, "loaded environment");
}
