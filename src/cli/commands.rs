//! Command handlers. Rows are numbered from 1 in every command.

use std::path::PathBuf;

use crate::{
    core::BillEdit,
    domain::{BillDraft, Displayable},
    utils::build_info,
};

use super::{
    core::{CommandError, CommandResult},
    io as cli_io,
    output,
    registry::{CommandEntry, CommandRegistry},
    shell_context::ShellContext,
};

/// Fields accepted by `edit`, in the order they are offered for completion.
pub(crate) const EDIT_FIELDS: &[&str] = &["name", "date", "amount", "paid"];
pub(crate) const FUNDS_DIRECTIONS: &[&str] = &["add", "sub"];
pub(crate) const CONFIG_KEYS: &[&str] = &[
    "data_dir",
    "bills_file",
    "balance_file",
    "color",
    "confirm_rollover",
];

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "list",
        "Show every bill with the balance and totals",
        "list",
        cmd_list,
    ));
    registry.register(CommandEntry::new(
        "add",
        "Add a bill; omitted fields start blank",
        "add [name] [MM/DD] [amount]",
        cmd_add,
    ));
    registry.register(CommandEntry::new(
        "edit",
        "Change one field of a bill",
        "edit <row> <name|date|amount|paid> <value>",
        cmd_edit,
    ));
    registry.register(CommandEntry::new(
        "paid",
        "Toggle the paid flag of a bill",
        "paid <row>",
        cmd_paid,
    ));
    registry.register(CommandEntry::new(
        "delete",
        "Remove a bill; later rows move up",
        "delete <row>",
        cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "funds",
        "Add to or subtract from the balance",
        "funds <add|sub> [amount]",
        cmd_funds,
    ));
    registry.register(CommandEntry::new(
        "totals",
        "Show unpaid total and remaining balance",
        "totals",
        cmd_totals,
    ));
    registry.register(CommandEntry::new(
        "save",
        "Validate all rows and write both documents",
        "save",
        cmd_save,
    ));
    registry.register(CommandEntry::new(
        "rollover",
        "Advance due dates a month, clear paid flags, zero the balance and save",
        "rollover",
        cmd_rollover,
    ));
    registry.register(CommandEntry::new(
        "reload",
        "Discard unsaved changes and re-read the documents",
        "reload",
        cmd_reload,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [set <key> <value>]",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "version",
        "Show build information",
        "version",
        cmd_version,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or show usage for one",
        "help [command]",
        cmd_help,
    ));
    registry.register(CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit));
    registry.alias("ls", "list");
    registry.alias("rm", "delete");
    registry.alias("quit", "exit");
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_bills();
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 3 {
        return Err(usage_error("add [name] [MM/DD] [amount]"));
    }
    let mut draft = BillDraft::blank();
    if let Some(name) = args.first() {
        draft.name = name.to_string();
    }
    if let Some(due_date) = args.get(1) {
        draft.due_date = due_date.to_string();
    }
    if let Some(amount) = args.get(2) {
        draft.amount = amount.to_string();
    }
    let index = context.store.add_bill(draft);
    cli_io::print_success(format!("Added bill in row {}.", index + 1));
    context.show_totals();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row, field, value @ ..] = args else {
        return Err(usage_error("edit <row> <name|date|amount|paid> <value>"));
    };
    let index = parse_row(row, context.store.len())?;
    let value = value.join(" ");
    let edit = match field.to_ascii_lowercase().as_str() {
        "name" => BillEdit::Name(value),
        "date" | "due" | "due_date" => BillEdit::DueDate(value),
        "amount" => BillEdit::Amount(value),
        "paid" => BillEdit::Paid(parse_flag(&value)?),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown field `{}`; expected one of {}",
                other,
                EDIT_FIELDS.join(", ")
            )))
        }
    };
    context.store.update_bill(index, edit)?;
    cli_io::print_success(format!("Updated row {}.", index + 1));
    context.show_totals();
    Ok(())
}

fn cmd_paid(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(usage_error("paid <row>"));
    };
    let index = parse_row(row, context.store.len())?;
    let paid = context.store.toggle_paid(index)?;
    let label = if paid { "paid" } else { "unpaid" };
    cli_io::print_success(format!("Row {} marked {}.", index + 1, label));
    context.show_totals();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [row] = args else {
        return Err(usage_error("delete <row>"));
    };
    let index = parse_row(row, context.store.len())?;
    let removed = context.store.delete_bill(index)?;
    cli_io::print_success(format!(
        "Deleted row {} ({}).",
        index + 1,
        removed.display_label()
    ));
    context.show_totals();
    Ok(())
}

fn cmd_funds(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (direction, amount) = match args {
        [direction] => (*direction, None),
        [direction, amount] => (*direction, Some(*amount)),
        _ => return Err(usage_error("funds <add|sub> [amount]")),
    };
    let adding = match direction.to_ascii_lowercase().as_str() {
        "add" | "+" => true,
        "sub" | "subtract" | "-" => false,
        _ => return Err(usage_error("funds <add|sub> [amount]")),
    };
    let amount = match amount {
        Some(raw) => cli_io::parse_positive_amount(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "`{}` is not an amount greater than zero",
                raw
            ))
        })?,
        None if context.is_interactive() => {
            let prompt = if adding {
                "Enter amount to add"
            } else {
                "Enter amount to subtract"
            };
            cli_io::prompt_positive_amount(&context.theme, prompt)?
        }
        None => return Err(usage_error("funds <add|sub> <amount>")),
    };
    if adding {
        context.store.add_funds(amount)?;
    } else {
        context.store.subtract_funds(amount)?;
    }
    cli_io::print_success(format!(
        "Balance is now ${:.2}.",
        context.store.balance().balance
    ));
    context.show_totals();
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_totals();
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.store.persist()?;
    cli_io::print_success("Changes saved to file!");
    context.show_totals();
    Ok(())
}

fn cmd_rollover(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.config.confirm_rollover
        && !context.confirm(
            "Roll over to next month? Paid flags and the balance will be reset.",
            false,
        )?
    {
        cli_io::print_info("Rollover cancelled.");
        return Ok(());
    }
    context.store.rollover()?;
    cli_io::print_success("Rolled over to next month and saved.");
    context.show_bills();
    Ok(())
}

fn cmd_reload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store.is_dirty() && !context.confirm("Discard unsaved changes?", false)? {
        return Ok(());
    }
    context.store.reload()?;
    cli_io::print_success("Reloaded bills from disk.");
    context.show_bills();
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            let config = &context.config;
            println!("config file:       {}", context.config_manager.config_path().display());
            println!("data dir:          {}", config.resolve_data_dir().display());
            println!("bills file:        {}", config.bills_file);
            println!("balance file:      {}", config.balance_file);
            println!("color:             {}", config.ui_color_enabled);
            println!("confirm rollover:  {}", config.confirm_rollover);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            let mut updated = context.config.clone();
            match key.to_ascii_lowercase().as_str() {
                "data_dir" => updated.data_dir = Some(PathBuf::from(value)),
                "bills_file" => updated.bills_file = value,
                "balance_file" => updated.balance_file = value,
                "color" => updated.ui_color_enabled = parse_flag(&value)?,
                "confirm_rollover" => updated.confirm_rollover = parse_flag(&value)?,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown setting `{}`; expected one of {}",
                        other,
                        CONFIG_KEYS.join(", ")
                    )))
                }
            }
            context.config_manager.save(&updated)?;
            let relocated = updated.storage_paths() != context.config.storage_paths();
            context.config = updated;
            cli_io::print_success(format!("Saved `{}`.", key));
            if relocated {
                cli_io::print_info("Document location changes apply on next start.");
            }
            Ok(())
        }
        _ => Err(usage_error("config [set <key> <value>]")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    println!("{}", build_info::current().summary());
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.registry.get(&name.to_ascii_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no help for unknown command `{}`", name))
        })?;
        println!("{}", entry.description);
        println!("usage: {}", entry.usage);
        return Ok(());
    }
    output::section("Commands");
    for entry in context.registry.list() {
        println!("  {:<32} {}", entry.usage, entry.description);
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm_exit()? {
        return Ok(());
    }
    Err(CommandError::ExitRequested)
}

fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

/// Converts a 1-based row argument into a store index.
fn parse_row(raw: &str, len: usize) -> Result<usize, CommandError> {
    let row: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a row number", raw)))?;
    if row == 0 || row > len {
        return Err(CommandError::InvalidArguments(format!(
            "row {} does not exist (1-{})",
            row, len
        )));
    }
    Ok(row - 1)
}

fn parse_flag(raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected yes or no, got `{}`",
            other
        ))),
    }
}
