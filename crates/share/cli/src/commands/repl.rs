//! Interactive line-oriented front end.
//!
//! Rows are the 1-based positions shown in the table. They are resolved to
//! participant ids against the current snapshot before an action is built,
//! so a delete or sort never makes a later command hit the wrong entry.

use std::io::BufRead;

use share_engine::{Action, AddCategory, Applied, ParticipantId, ShareSession, SortField};

use crate::error::{CliError, CliResult};
use crate::output::{self, format_amount, print_info, print_success, print_warning, OutputFormat};

const HELP: &str = "\
commands:
  total [amount]                 edit the total pool
  reserved [amount]              edit the reserved pool
  add <name> <score> [allocated|reserved]
  rename <row> [name]
  score <row> [score]
  estimate <row> [amount]        fix a share by hand (becomes manual)
  cycle <row>                    allocated <-> reserved, manual -> allocated
  delete <row>
  sort <name|category|score|estimate>
  show | help | quit
an edit given without its value prompts for it; an empty line or `cancel` abandons it";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Total(Option<String>),
    Reserved(Option<String>),
    Add {
        name: String,
        score: String,
        category: Option<AddCategory>,
    },
    Rename { row: usize, name: Option<String> },
    Score { row: usize, value: Option<String> },
    Estimate { row: usize, value: Option<String> },
    Cycle { row: usize },
    Delete { row: usize },
    Sort(SortField),
    Show,
    Help,
    Quit,
}

fn parse_row(token: Option<&str>) -> CliResult<usize> {
    let token = token.ok_or_else(|| CliError::InvalidInput("missing row number".into()))?;
    match token.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row),
        _ => Err(CliError::InvalidInput(format!("not a row number: {}", token))),
    }
}

fn rest(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

fn parse_add_category(token: &str) -> Option<AddCategory> {
    match token.to_ascii_lowercase().as_str() {
        "allocated" => Some(AddCategory::Allocated),
        "reserved" => Some(AddCategory::Reserved),
        _ => None,
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> CliResult<Option<Command>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((keyword, args)) = tokens.split_first() else {
        return Ok(None);
    };
    if keyword.starts_with('#') {
        return Ok(None);
    }

    let command = match keyword.to_ascii_lowercase().as_str() {
        "total" => Command::Total(rest(args)),
        "reserved" => Command::Reserved(rest(args)),
        "add" => {
            let mut args = args.to_vec();
            let category = args.last().and_then(|t| parse_add_category(t));
            if category.is_some() {
                args.pop();
            }
            let (score, name) = match args.split_last() {
                Some((score, name)) if !name.is_empty() => (score.to_string(), name.join(" ")),
                _ => {
                    return Err(CliError::InvalidInput(
                        "usage: add <name> <score> [allocated|reserved]".into(),
                    ))
                }
            };
            Command::Add {
                name,
                score,
                category,
            }
        }
        "rename" => Command::Rename {
            row: parse_row(args.first().copied())?,
            name: rest(args.get(1..).unwrap_or_default()),
        },
        "score" => Command::Score {
            row: parse_row(args.first().copied())?,
            value: rest(args.get(1..).unwrap_or_default()),
        },
        "estimate" => Command::Estimate {
            row: parse_row(args.first().copied())?,
            value: rest(args.get(1..).unwrap_or_default()),
        },
        "cycle" => Command::Cycle {
            row: parse_row(args.first().copied())?,
        },
        "delete" | "rm" => Command::Delete {
            row: parse_row(args.first().copied())?,
        },
        "sort" => {
            let field = args
                .first()
                .ok_or_else(|| CliError::InvalidInput("missing sort field".into()))?;
            Command::Sort(
                field
                    .parse::<SortField>()
                    .map_err(|e| CliError::InvalidInput(e.to_string()))?,
            )
        }
        "show" | "list" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(CliError::InvalidInput(format!(
                "unknown command `{}` (try `help`)",
                other
            )))
        }
    };
    Ok(Some(command))
}

/// Field awaiting a value on the next line.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Total,
    Reserved,
    Name(ParticipantId),
    Score(ParticipantId),
    Estimate(ParticipantId),
}

impl Field {
    fn action(self, value: String) -> Action {
        match self {
            Field::Total => Action::EditTotalPool { value },
            Field::Reserved => Action::EditReservedPool { value },
            Field::Name(participant) => Action::RenameParticipant {
                participant,
                name: value,
            },
            Field::Score(participant) => Action::EditScore {
                participant,
                score: value,
            },
            Field::Estimate(participant) => Action::EditEstimate {
                participant,
                estimate: value,
            },
        }
    }

    /// Committed value shown while the edit is pending.
    fn current(self, session: &ShareSession) -> String {
        let participant = |id: ParticipantId| session.participant(id).ok();
        match self {
            Field::Total => format_amount(session.pool().total()),
            Field::Reserved => format_amount(session.pool().reserved()),
            Field::Name(id) => participant(id).map(|p| p.name.clone()).unwrap_or_default(),
            Field::Score(id) => participant(id)
                .map(|p| p.score.to_string())
                .unwrap_or_default(),
            Field::Estimate(id) => participant(id)
                .map(|p| format_amount(p.estimate))
                .unwrap_or_default(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Field::Total => "total pool",
            Field::Reserved => "reserved pool",
            Field::Name(_) => "name",
            Field::Score(_) => "score",
            Field::Estimate(_) => "estimate",
        }
    }
}

/// REPL state: the session plus at most one pending edit.
pub struct Repl<'a> {
    session: &'a mut ShareSession,
    format: OutputFormat,
    pending: Option<Field>,
}

/// What the caller should do after a line.
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

impl<'a> Repl<'a> {
    pub fn new(session: &'a mut ShareSession, format: OutputFormat) -> Self {
        Self {
            session,
            format,
            pending: None,
        }
    }

    fn row_id(&self, row: usize) -> CliResult<ParticipantId> {
        self.session
            .id_at(row - 1)
            .ok_or_else(|| CliError::InvalidInput(format!("no participant in row {}", row)))
    }

    /// Apply a value to `field` now, or open a pending edit for it.
    fn edit(&mut self, field: Field, value: Option<String>) -> CliResult<()> {
        match value {
            Some(value) => self.apply(field.action(value)),
            None => {
                print_info(&format!(
                    "new {} (currently {}; empty line cancels):",
                    field.label(),
                    field.current(self.session)
                ));
                self.pending = Some(field);
                Ok(())
            }
        }
    }

    /// Apply an action; a refusal is reported and the snapshot is kept.
    fn apply(&mut self, action: Action) -> CliResult<()> {
        match self.session.apply(&action) {
            Ok(Applied::Added { participant }) => {
                if let Ok(p) = self.session.participant(participant) {
                    print_success(&format!("added {} ({})", p.name, p.category));
                }
                output::print_snapshot(self.session, self.format)
            }
            Ok(Applied::Removed { participant }) => {
                print_success(&format!("deleted {}", participant.name));
                output::print_snapshot(self.session, self.format)
            }
            Ok(Applied::Sorted { field, direction }) => {
                print_success(&format!("sorted by {} ({})", field, direction));
                output::print_snapshot(self.session, self.format)
            }
            Ok(Applied::Changed) | Ok(Applied::CategoryChanged { .. }) => {
                output::print_snapshot(self.session, self.format)
            }
            Err(err) => {
                tracing::debug!(action = action.name(), error = %err, "Action refused");
                print_warning(&format!("{}; previous value kept", err));
                Ok(())
            }
        }
    }

    /// Handle one input line.
    pub fn handle_line(&mut self, line: &str) -> CliResult<Flow> {
        if let Some(field) = self.pending.take() {
            let value = line.trim();
            if value.is_empty() || value.eq_ignore_ascii_case("cancel") {
                print_info(&format!(
                    "edit cancelled, {} stays {}",
                    field.label(),
                    field.current(self.session)
                ));
            } else {
                self.apply(field.action(value.to_string()))?;
            }
            return Ok(Flow::Continue);
        }

        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                print_warning(&err.to_string());
                return Ok(Flow::Continue);
            }
        };

        let result = match command {
            Command::Total(value) => self.edit(Field::Total, value),
            Command::Reserved(value) => self.edit(Field::Reserved, value),
            Command::Add {
                name,
                score,
                category,
            } => self.apply(Action::AddParticipant {
                name,
                score,
                category,
            }),
            Command::Rename { row, name } => self
                .row_id(row)
                .and_then(|id| self.edit(Field::Name(id), name)),
            Command::Score { row, value } => self
                .row_id(row)
                .and_then(|id| self.edit(Field::Score(id), value)),
            Command::Estimate { row, value } => self
                .row_id(row)
                .and_then(|id| self.edit(Field::Estimate(id), value)),
            Command::Cycle { row } => self
                .row_id(row)
                .and_then(|participant| self.apply(Action::CycleCategory { participant })),
            Command::Delete { row } => self
                .row_id(row)
                .and_then(|participant| self.apply(Action::DeleteParticipant { participant })),
            Command::Sort(field) => self.apply(Action::SortColumn { field }),
            Command::Show => output::print_snapshot(self.session, self.format),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => return Ok(Flow::Quit),
        };

        match result {
            Err(CliError::InvalidInput(message)) => {
                print_warning(&message);
                Ok(Flow::Continue)
            }
            other => other.map(|_| Flow::Continue),
        }
    }
}

/// Run the REPL over `input` until it ends or `quit` is entered
pub fn execute(
    session: &mut ShareSession,
    format: OutputFormat,
    input: impl BufRead,
) -> CliResult<()> {
    output::print_snapshot(session, format)?;
    let mut repl = Repl::new(session, format);
    for line in input.lines() {
        if repl.handle_line(&line?)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
