//! # tierconf demo application
//!
//! A sample CLI that layers defaults, environment variables, a config file
//! and command-line flags into one store, then prints what it resolved.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example tierconf_demo
//! cargo run --example tierconf_demo -- --template > tierconf-demo.conf
//! ```
//!
//! | Layer           | How to exercise it                                                  |
//! |-----------------|---------------------------------------------------------------------|
//! | Defaults        | `cargo run --example tierconf_demo`                                 |
//! | Env var         | `TIERCONF_DEMO_PORT=9999 cargo run --example tierconf_demo`         |
//! | Config file     | Put `PORT=7000` in `./tierconf-demo.conf`, or pass `--config FILE`  |
//! | Flag            | `cargo run --example tierconf_demo -- --port 1234 --retry`          |
//! | Logging         | `RUST_LOG=tierconf=trace cargo run --example tierconf_demo`         |

mod options;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use tierconf::{
    BoolGetter, ClapFlags, EnvOptions, FileFormat, Float64Getter, IntGetter, Layers,
    StringGetter, registry_args,
};

const DEFAULT_FILE: &str = "tierconf-demo.conf";

fn command(registry: &tierconf::OptionRegistry) -> Command {
    Command::new("tierconf-demo")
        .about("Sample app for tierconf's layered configuration")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Config file to read (default: ./tierconf-demo.conf if present)"),
        )
        .arg(
            Arg::new("template")
                .long("template")
                .action(ArgAction::SetTrue)
                .help("Print a commented config file with every default and exit"),
        )
        .args(registry_args(registry))
}

fn ansi_color_code(name: &str) -> &str {
    match name {
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        _ => "\x1b[0m",
    }
}

const RESET: &str = "\x1b[0m";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let registry = options::registry();
    let format = FileFormat::default().comment_prefixes(["#", "//"]);

    let mut cmd = command(&registry);
    let matches = cmd.get_matches_mut();

    if matches.get_flag("template") {
        print!("{}", registry.template(&format));
        return;
    }

    let flags = ClapFlags::new(&cmd, &matches);
    let layers = Layers::from_registry(&registry).env(EnvOptions::prefixed("TIERCONF_DEMO_"));
    let layers = match matches.get_one::<String>("config") {
        Some(path) => layers.file(path, format),
        None => layers.optional_file(DEFAULT_FILE, format),
    };

    let store = layers.flags(&flags).load().unwrap_or_else(|e| {
        eprintln!("Failed to load config:\n{e}");
        std::process::exit(1);
    });

    let color_name = store.get_string("color");
    let color = ansi_color_code(&color_name);
    println!(
        "{color}{}{RESET} listening on {}:{}",
        store.get_string("name"),
        store.get_string("host"),
        store.get_int("port")
    );
    println!(
        "retry={} timeout={}s",
        store.get_bool("retry"),
        store.get_float64("timeout")
    );
}
