use crate::cli::io;
use crate::cli::output::{plain, section};
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    section("Available commands");
    for entry in registry.list() {
        plain(format!("  {:<12} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for details. Quote notes that contain spaces.");
}

pub fn print_command(entry: &CommandEntry) {
    section(format!("Help: {}", entry.name));
    plain(format!("  Description: {}", entry.description));
    plain(format!("  Usage: {}", entry.usage));
}
