//! Layered key/value configuration from environment variables, command-line
//! flags and delimited text files, merged into one store with forgiving typed
//! reads.
//!
//! ```ignore
//! let store = Layers::new(["port", "retry"])
//!     .env(EnvOptions::prefixed("MYAPP_"))
//!     .optional_file("/etc/myapp.conf", FileFormat::default().comment_prefix("#"))
//!     .flags(&flags)
//!     .load()?;
//!
//! let port = store.get_int("port");
//! ```
//!
//! # Two halves
//!
//! - **Loaders** ([`from_env`], [`from_file`], [`from_reader`], [`from_flags`],
//!   [`OptionRegistry::load_defaults`]) read one source each and write the
//!   requested keys into any [`Setter`].
//! - **The store** ([`Store`]) keeps values as written and coerces on read.
//!
//! # Requested keys only
//!
//! Every loader takes the list of keys the caller wants and resolves only
//! those. A config file or environment full of unrelated entries never leaks
//! into the store.
//!
//! # Key case
//!
//! Loaders match keys case-insensitively against their source and write them
//! back under the caller's spelling:
//!
//! | Source | Key `retry` reads |
//! |--------|-------------------|
//! | Env (prefix `MYAPP_`) | `MYAPP_RETRY` |
//! | File | any line whose key upper-cases to `RETRY` |
//! | Flags | the flag registered as exactly `retry` |
//!
//! The store itself is case-sensitive. It never folds keys.
//!
//! # Layer precedence
//!
//! There is no fixed precedence, only order: each write replaces the previous
//! value, so whatever runs last wins. [`Layers`] applies sources in the order
//! they were added. A source that does not define a key leaves it alone:
//!
//! - env: unset variables are not written (not even as `""`),
//! - files: missing keys and empty values are not written,
//! - flags: flags still at their declared default are not written.
//!
//! # File format
//!
//! One `KEY<delimiter>value` per line, split on the first delimiter. Keys are
//! trimmed, values are not. Comment prefixes are literal strings and match
//! after optional leading whitespace. No quoting, escaping or continuation
//! lines. See [`FileFormat`].
//!
//! # Reading values
//!
//! Typed getters never fail. A missing key or a value that does not convert
//! reads as the zero value: `""`, `0`, `0.0`, `false`. Booleans accept
//! `1 t T TRUE true True` and `0 f F FALSE false False`.
//!
//! # Errors
//!
//! Only file layers and the flag layer can fail, with a [`TierconfError`]:
//! missing path, path that is not a file, read failure, unusable format, or a
//! key with no registered flag. Malformed lines are skipped, never errors.

pub mod error;

#[cfg(feature = "clap")]
mod cli;
mod env;
mod file;
mod flags;
mod fs;
mod layers;
mod parse;
mod registry;
mod store;
mod value;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{ClapFlags, registry_args};
pub use env::{EnvOptions, from_env, from_env_with};
pub use error::{Result, TierconfError};
pub use file::{from_file, from_reader};
pub use flags::{Flag, FlagSource, StaticFlags, from_flags};
pub use fs::is_file;
pub use layers::Layers;
pub use parse::{FileFormat, parse};
pub use registry::{ConfigOption, OptionRegistry};
pub use store::{
    BoolGetter, BoolSetter, Float32Getter, Float32Setter, Float64Getter, Float64Setter, Getter,
    IntGetter, IntSetter, Provider, Setter, Store, StringGetter, StringSetter,
};
pub use value::{Value, parse_bool};
