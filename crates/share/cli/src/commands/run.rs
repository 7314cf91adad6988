//! Action script runner

use std::path::Path;

use share_engine::{Action, ShareSession};

use crate::error::CliResult;
use crate::output::{self, print_info, print_warning, OutputFormat};

/// Apply a JSON array of actions in order, then print the final snapshot.
///
/// Refused actions are reported and skipped; they never stop the script.
/// Returns the number of refused actions.
pub fn execute(
    session: &mut ShareSession,
    script: &Path,
    format: OutputFormat,
) -> CliResult<usize> {
    let contents = std::fs::read_to_string(script)?;
    let actions: Vec<Action> = serde_json::from_str(&contents)?;
    let refused = apply_all(session, &actions);

    print_info(&format!(
        "applied {} of {} actions",
        actions.len() - refused,
        actions.len()
    ));
    output::print_snapshot(session, format)?;
    Ok(refused)
}

fn apply_all(session: &mut ShareSession, actions: &[Action]) -> usize {
    let mut refused = 0;
    for (i, action) in actions.iter().enumerate() {
        if let Err(err) = session.apply(action) {
            refused += 1;
            print_warning(&format!("action {} ({}) refused: {}", i + 1, action.name(), err));
        }
    }
    refused
}
