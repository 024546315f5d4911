//! Option table for the demo application.
//!
//! Every option here becomes a `--name` flag, an env var
//! (`TIERCONF_DEMO_<NAME>`) and a `NAME=value` line in the config file.

use tierconf::OptionRegistry;

pub fn registry() -> OptionRegistry {
    OptionRegistry::new()
        .with("name", "demo", "Display name for the service.")
        .with("host", "127.0.0.1", "Address to bind.")
        .with("port", 8080, "Port to listen on.")
        .with("retry", false, "Retry failed requests.")
        .with("timeout", 2.5, "Request timeout in seconds.")
        .with("color", "yellow", "Output color (red, green, yellow, blue).")
}
