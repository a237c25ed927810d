use std::io::{self, BufRead, Lines, StdinLock};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::commands::report;
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::config::CONFIG_KEYS;
use crate::domain::{Category, TransactionType};

pub const SCRIPT_ENV: &str = "FINANCE_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    let mut input = match mode {
        CliMode::Interactive => {
            let input = LineSource::editor(&context)?;
            output::section("Personal Finance Dashboard");
            if let Err(err) = report::print_dashboard(&mut context) {
                context.report_error(err)?;
            }
            output::hint("Type `help` for commands, `add` to record a transaction.");
            input
        }
        CliMode::Script => LineSource::Script(io::stdin().lock().lines()),
    };

    while context.running {
        let line = match input.next_line(&context.prompt())? {
            Line::Text(line) => line,
            Line::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Line::End => {
                if mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        };
        match handle_line(&mut context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    tracing::debug!(transactions = context.ledger().len(), "shell finished");
    Ok(())
}

enum Line {
    Text(String),
    Interrupted,
    End,
}

/// Where command lines come from: a line editor on a terminal, raw stdin otherwise.
enum LineSource {
    Editor(Box<Editor<CommandHelper, DefaultHistory>>),
    Script(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn editor(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(context.command_names())));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(LineSource::Editor(Box::new(editor)))
    }

    fn next_line(&mut self, prompt: &str) -> Result<Line, CliError> {
        match self {
            LineSource::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        editor.add_history_entry(line.as_str()).ok();
                    }
                    Ok(Line::Text(line))
                }
                Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
                Err(ReadlineError::Eof) => Ok(Line::End),
                Err(err) => Err(err.into()),
            },
            LineSource::Script(lines) => match lines.next() {
                Some(line) => Ok(Line::Text(line?)),
                None => Ok(Line::End),
            },
        }
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.to_string());
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(input)
}

/// Tab completion for command names and the fixed vocabularies their
/// arguments draw from.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Candidates for the word at `position` (0 is the command itself).
    fn vocabulary(&self, words: &[&str], position: usize) -> Vec<String> {
        if position == 0 {
            return self.commands.clone();
        }
        let command = words[0].to_ascii_lowercase();
        match (command.as_str(), position) {
            ("add" | "new", 2) => Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            ("add" | "new", 3) => TransactionType::ALL
                .iter()
                .map(|kind| kind.as_str().to_string())
                .collect(),
            ("config", 1) => owned(&["show", "set", "reset"]),
            ("config", 2) if words[1].eq_ignore_ascii_case("set") => owned(CONFIG_KEYS),
            ("history", 1) => owned(&["all"]),
            ("help", 1) => self.commands.clone(),
            _ => Vec::new(),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = prefix[start..].to_ascii_lowercase();

        let candidates = self
            .vocabulary(&words, words.len())
            .into_iter()
            .filter(|word| word.to_ascii_lowercase().starts_with(&needle))
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, candidates))
    }
}
