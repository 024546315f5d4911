//! Ordered composition of loaders.
//!
//! ```text
//! Registry defaults     .defaults(&registry)
//!        ↑ overridden by
//! Environment vars      .env(EnvOptions::prefixed("MYAPP_"))
//!        ↑ overridden by
//! Config files          .file(path, format), later files win
//!        ↑ overridden by
//! CLI flags             .flags(&source)
//! ```
//!
//! That is the conventional order, but nothing enforces it: layers run in the
//! order they were added and every write replaces the previous value. Each
//! layer is sparse, so a key one source does not define falls through to
//! whatever an earlier layer wrote.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::{EnvOptions, from_env, from_env_with};
use crate::error::{Result, TierconfError};
use crate::file::from_file;
use crate::flags::{FlagSource, from_flags};
use crate::parse::FileFormat;
use crate::registry::OptionRegistry;
use crate::store::{Setter, Store};

type EnvLookup<'a> = Box<dyn Fn(&str) -> Option<String> + 'a>;

enum Layer<'a> {
    Defaults(&'a OptionRegistry),
    Env(EnvOptions),
    EnvLookup(EnvOptions, EnvLookup<'a>),
    File {
        path: PathBuf,
        format: FileFormat,
        optional: bool,
    },
    Flags(&'a dyn FlagSource),
}

/// Builder collecting the keys to resolve and the sources to read them from.
pub struct Layers<'a> {
    keys: Vec<String>,
    layers: Vec<Layer<'a>>,
}

impl<'a> Layers<'a> {
    /// Start with the keys every layer should resolve. Sources never import
    /// keys outside this list.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            layers: Vec::new(),
        }
    }

    /// Resolve every option registered in `registry`, seeded with its defaults.
    pub fn from_registry(registry: &'a OptionRegistry) -> Self {
        Self::new(registry.names()).defaults(registry)
    }

    pub fn defaults(mut self, registry: &'a OptionRegistry) -> Self {
        self.layers.push(Layer::Defaults(registry));
        self
    }

    pub fn env(mut self, opts: EnvOptions) -> Self {
        self.layers.push(Layer::Env(opts));
        self
    }

    /// Environment layer resolved through `lookup` instead of the process env.
    pub fn env_lookup<F>(mut self, opts: EnvOptions, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'a,
    {
        self.layers.push(Layer::EnvLookup(opts, Box::new(lookup)));
        self
    }

    /// A file that must exist. Any failure aborts loading.
    pub fn file(mut self, path: impl AsRef<Path>, format: FileFormat) -> Self {
        self.layers.push(Layer::File {
            path: path.as_ref().to_path_buf(),
            format,
            optional: false,
        });
        self
    }

    /// A file that is skipped when missing or not a regular file. Read and
    /// format errors still abort loading.
    pub fn optional_file(mut self, path: impl AsRef<Path>, format: FileFormat) -> Self {
        self.layers.push(Layer::File {
            path: path.as_ref().to_path_buf(),
            format,
            optional: true,
        });
        self
    }

    pub fn flags(mut self, source: &'a dyn FlagSource) -> Self {
        self.layers.push(Layer::Flags(source));
        self
    }

    /// Apply every layer, in order, to a fresh store.
    pub fn load(&self) -> Result<Store> {
        let mut store = Store::new();
        self.load_into(&mut store)?;
        Ok(store)
    }

    /// Apply every layer, in order, on top of whatever `sink` already holds.
    ///
    /// Stops at the first failing layer; writes from earlier layers stay in place.
    pub fn load_into<S: Setter + ?Sized>(&self, sink: &mut S) -> Result<()> {
        let keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();

        for layer in &self.layers {
            match layer {
                Layer::Defaults(registry) => registry.load_defaults(&keys, sink),
                Layer::Env(opts) => from_env(&keys, sink, opts),
                Layer::EnvLookup(opts, lookup) => from_env_with(&keys, sink, opts, lookup),
                Layer::File {
                    path,
                    format,
                    optional,
                } => match from_file(path, &keys, sink, format) {
                    Ok(()) => {}
                    Err(TierconfError::NotExist { .. } | TierconfError::NotAFile { .. })
                        if *optional =>
                    {
                        debug!(path = %path.display(), "skipping optional config file");
                    }
                    Err(e) => return Err(e),
                },
                Layer::Flags(source) => from_flags(&keys, sink, *source)?,
            }
        }
        Ok(())
    }
}
