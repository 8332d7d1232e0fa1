//! Shell completion script generation

use clap::Command;
use clap_complete::{Generator, generate};
use std::io::Write;

/// Write completions for `app` to `out`
pub fn write_completions<G: Generator>(generator: G, app: &mut Command, out: &mut dyn Write) {
    let name = app.get_name().to_string();
    generate(generator, app, name, out);
}

/// Generate shell completions on stdout
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    write_completions(generator, app, &mut std::io::stdout());
}
