// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `budgetto shell` command implementation.
//!
//! An interactive REPL over the category page. The prompt shows which
//! dialog is open; `name` and `note` edit the open form and `submit` sends
//! it. Notifications are printed after every command.

use budgetto_config::BudgettoConfig;
use budgetto_core::CategoryId;
use budgetto_store::{CategoryForm, CategoryPage, ModeTag};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::commands::{self, CliError};

const HELP: &str = "\
commands:
  list              show categories (cached)
  refresh           refetch categories from the server
  new               open the create dialog
  edit ID           open the update dialog for a category
  delete ID         open the delete dialog for a category
  name TEXT         set the name field of the open form
  note TEXT         set the note field of the open form
  submit            submit the open dialog
  cancel            close the open dialog
  mode              show the open dialog
  whoami            show the signed-in user
  login | logout    start or end the session
  help              show this help
  /quit             leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Refresh,
    New,
    Edit(CategoryId),
    Delete(CategoryId),
    Name(String),
    Note(String),
    Submit,
    Cancel,
    Mode,
    WhoAmI,
    Login,
    Logout,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let id = || {
            rest.parse::<CategoryId>()
                .map_err(|_| format!("`{word}` needs a numeric category id"))
        };

        match word {
            "list" | "ls" => Ok(Self::List),
            "refresh" => Ok(Self::Refresh),
            "new" => Ok(Self::New),
            "edit" => id().map(Self::Edit),
            "delete" | "rm" => id().map(Self::Delete),
            "name" => Ok(Self::Name(rest.to_string())),
            "note" => Ok(Self::Note(rest.to_string())),
            "submit" => Ok(Self::Submit),
            "cancel" => Ok(Self::Cancel),
            "mode" => Ok(Self::Mode),
            "whoami" => Ok(Self::WhoAmI),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            "help" | "?" => Ok(Self::Help),
            "/quit" | "/exit" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`; type `help`")),
        }
    }
}

/// Runs the `budgetto shell` interactive REPL.
pub async fn run_shell(config: &BudgettoConfig) -> Result<(), CliError> {
    let page = commands::build_page(config)?;
    let mut form = CategoryForm::new();

    let mut rl = DefaultEditor::new().map_err(|e| CliError::Readline(e.to_string()))?;

    println!("{}", "budgetto shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "/quit".yellow());

    if page.context().identity.session().is_authenticated {
        report(&page, page.load().await.map(|rows| {
            print!("{}", commands::render_rows(&rows));
        }))
        .await;
    } else {
        println!("{}", "not signed in; type `login` to start a session".yellow());
    }

    loop {
        let prompt = prompt_for(page.context().mode.tag());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let command = match ShellCommand::parse(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        eprintln!("{}: {message}", "error".red());
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    break;
                }
                debug!(?command, "shell command");
                let result = execute(&page, &mut form, command, &config.identity.return_to).await;
                report(&page, result).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn prompt_for(tag: ModeTag) -> String {
    match tag {
        ModeTag::View => format!("{}> ", "budgetto".green()),
        other => format!("{}[{}]> ", "budgetto".green(), other.to_string().cyan()),
    }
}

async fn report<E: Into<CliError>>(page: &CategoryPage, result: Result<(), E>) {
    commands::print_notifications(page).await;
    if let Err(e) = result {
        eprintln!("{}: {}", "error".red(), e.into());
    }
}

/// Executes one shell command against the page and the open form.
pub async fn execute(
    page: &CategoryPage,
    form: &mut CategoryForm,
    command: ShellCommand,
    return_to: &str,
) -> Result<(), CliError> {
    let ctx = page.context();
    match command {
        ShellCommand::List => print!("{}", commands::render_rows(&page.load().await?)),
        ShellCommand::Refresh => print!("{}", commands::render_rows(&page.refresh().await?)),
        ShellCommand::New => page.open_create(form),
        ShellCommand::Edit(id) => {
            page.open_update(id, form)?;
            println!("editing `{}` (note: `{}`)", form.name, form.note);
        }
        ShellCommand::Delete(id) => {
            let target = page.open_delete(id)?;
            println!("delete `{}`? type `submit` to confirm", target.name);
        }
        ShellCommand::Name(name) => form.set_name(name),
        ShellCommand::Note(note) => form.set_note(note),
        ShellCommand::Submit => {
            let outcome = match ctx.mode.tag() {
                ModeTag::Create => page.create.submit(form).await,
                ModeTag::Update => page.update.submit(form).await,
                ModeTag::Delete => page.delete.confirm().await,
                ModeTag::View => return Err(CliError::Closed),
            };
            commands::finish(outcome)?;
        }
        ShellCommand::Cancel => {
            let closed = match ctx.mode.tag() {
                ModeTag::Create => page.create.cancel(form),
                ModeTag::Update => page.update.cancel(form),
                ModeTag::Delete => page.delete.cancel(),
                ModeTag::View => false,
            };
            if !closed && ctx.mode.tag() != ModeTag::View {
                return Err(CliError::Busy);
            }
        }
        ShellCommand::Mode => {
            let mode = ctx.mode.mode();
            match mode.target() {
                Some(target) => println!("{} #{} {}", mode.tag(), target.id, target.name),
                None => println!("{}", mode.tag()),
            }
        }
        ShellCommand::WhoAmI => {
            let session = ctx.identity.session();
            match session.user {
                Some(user) if session.is_authenticated => println!(
                    "{} <{}>",
                    user.name.as_deref().unwrap_or("unknown"),
                    user.email.as_deref().unwrap_or("no email")
                ),
                _ => println!("not signed in"),
            }
        }
        ShellCommand::Login => {
            ctx.identity.login_with_redirect().await?;
            println!("signed in");
            print!("{}", commands::render_rows(&page.load().await?));
        }
        ShellCommand::Logout => {
            ctx.identity.logout(Some(return_to)).await?;
            println!("signed out");
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => {}
    }
    Ok(())
}
