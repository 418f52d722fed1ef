pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;
use crate::ledger::RecordKind;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in transaction::definitions()
        .into_iter()
        .chain(report::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
}

/// Optional leading `income`/`expense` argument.
pub(crate) fn parse_kind_arg(arg: Option<&&str>) -> Result<Option<RecordKind>, CommandError> {
    arg.map(|value| {
        value
            .parse::<RecordKind>()
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))
    })
    .transpose()
}
