//! Line-oriented front end: a rustyline prompt for people, stdin for scripts.

use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::commands::{CONFIG_KEYS, EDIT_FIELDS, FUNDS_DIRECTIONS};
use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::warning as output_warning;

/// Set to run commands from stdin without prompts or line editing.
pub const SCRIPT_ENV: &str = "BILL_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => {
            context.show_bills();
            run_interactive(&mut context)
        }
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    loop {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();
                match handle_line(context, line) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            // Ctrl-C and Ctrl-D both leave the shell, after the unsaved-changes check.
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match handle_line(context, line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output_warning(err);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_ascii_lowercase(), raw, &args)
}

/// Values offered for the argument at `position` (1-based, after the command).
fn argument_choices(command: &str, position: usize) -> &'static [&'static str] {
    match (command, position) {
        ("edit", 2) => EDIT_FIELDS,
        ("funds", 1) => FUNDS_DIRECTIONS,
        ("config", 1) => &["show", "set"],
        ("config", 2) => CONFIG_KEYS,
        _ => &[],
    }
}

/// Completes command names, then the fixed keywords some commands take.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    /// Returns where the word under the cursor starts and what may replace it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let preceding: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();

        let pool: Vec<String> = match preceding.as_slice() {
            [] => self.commands.clone(),
            [command] if command == "help" => self.commands.clone(),
            [command, ..] => argument_choices(command, preceding.len())
                .iter()
                .map(|choice| choice.to_string())
                .collect(),
        };
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .collect();
        (start, matches)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec!["list", "edit", "exit", "funds", "config", "help", "ls"])
    }

    #[test]
    fn completes_command_names() {
        assert_eq!(helper().candidates("e"), (0, vec!["edit".into(), "exit".into()]));
        assert_eq!(helper().candidates("L").1, vec!["list".to_string(), "ls".into()]);
    }

    #[test]
    fn completes_edit_field_after_row() {
        assert_eq!(helper().candidates("edit 2 a"), (7, vec!["amount".into()]));
        assert_eq!(helper().candidates("edit 2 ").1.len(), EDIT_FIELDS.len());
        assert!(helper().candidates("edit ").1.is_empty());
    }

    #[test]
    fn completes_funds_direction_and_config_keys() {
        assert_eq!(helper().candidates("funds s"), (6, vec!["sub".into()]));
        assert_eq!(helper().candidates("config set co").1.len(), 2);
        assert_eq!(helper().candidates("help fu").1, vec!["funds".to_string()]);
    }

    #[test]
    fn free_text_arguments_get_no_suggestions() {
        assert!(helper().candidates("add rent 04/0").1.is_empty());
        assert!(helper().candidates("list x").1.is_empty());
    }
}
