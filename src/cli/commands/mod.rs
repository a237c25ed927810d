pub mod config;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command; the order here is the order `help` lists them.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        transaction::definitions(),
        report::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}
