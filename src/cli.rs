//! Clap adapter for tierconf.
//!
//! This module is the **optional integration layer** between the
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! Two pieces:
//!
//! - [`registry_args`] turns an [`OptionRegistry`] into clap `--name` args, so
//!   every option gets a flag carrying its default and help text.
//! - [`ClapFlags`] exposes a parsed command as a [`FlagSource`] for the flag layer.
//!
//! Parse with [`Command::try_get_matches_from_mut`] (or `get_matches_mut`) so the
//! command you hand to [`ClapFlags`] is the built one, with implicit defaults
//! such as `false` for `SetTrue` switches filled in.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::flags::{Flag, FlagSource};
use crate::registry::OptionRegistry;
use crate::value::Value;

/// A parsed clap command viewed as a set of registered flags.
pub struct ClapFlags<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
}

impl<'a> ClapFlags<'a> {
    pub fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self { command, matches }
    }
}

impl FlagSource for ClapFlags<'_> {
    /// Looks the arg up by id. The value counts as the default unless it came
    /// from the command line or clap's env fallback.
    fn lookup(&self, name: &str) -> Option<Flag> {
        let arg = self.command.get_arguments().find(|a| a.get_id() == name)?;
        let default = arg
            .get_default_values()
            .first()
            .map(|v| v.to_string_lossy().into_owned())
            .unwrap_or_default();

        let explicit = matches!(
            self.matches.value_source(name),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        );
        let value = if explicit {
            self.matches
                .try_get_raw(name)
                .ok()
                .flatten()
                .and_then(|mut raw| raw.next())
                .map(|v| v.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            default.clone()
        };

        Some(Flag { value, default })
    }
}

/// One `--name` arg per registered option.
///
/// Options defaulting to `false` become switches (`--verbose`); everything else
/// takes a value and carries the default's text form.
pub fn registry_args(registry: &OptionRegistry) -> Vec<Arg> {
    registry
        .iter()
        .map(|option| {
            let arg = Arg::new(option.name.clone())
                .long(option.name.clone())
                .help(option.help.clone());
            match &option.value {
                Value::Bool(false) => arg.action(ArgAction::SetTrue),
                value => {
                    let arg = arg.action(ArgAction::Set).value_name("VALUE");
                    match value.as_text() {
                        Some(text) if !text.is_empty() => arg.default_value(text),
                        _ => arg,
                    }
                }
            }
        })
        .collect()
}
