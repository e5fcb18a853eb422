// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `budgetto categories ...` one-shot commands.
//!
//! Each command drives the same page and dialog flows the shell uses, so a
//! one-shot create behaves exactly like `new`, `name`, `submit` in the shell.

use std::sync::Arc;

use budgetto_client::{ApiClient, HttpCategoryService, StaticIdentity};
use budgetto_config::BudgettoConfig;
use budgetto_core::{BudgettoError, Category, CategoryId, FieldError, IdentityProvider};
use budgetto_store::{
    CategoryForm, CategoryPage, DialogContext, Notification, NotificationKind, PageActionError,
    SubmitOutcome,
};
use clap::Subcommand;
use colored::Colorize;
use thiserror::Error;

/// Category subcommands.
#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// List all categories.
    List,
    /// Create a category.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Update a category's name and/or note.
    Update {
        id: CategoryId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete a category.
    Delete { id: CategoryId },
}

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Budgetto(#[from] BudgettoError),

    #[error(transparent)]
    PageAction(#[from] PageActionError),

    #[error("{}", describe_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("another submission is still in progress")]
    Busy,

    #[error("no dialog is open")]
    Closed,

    #[error("the dialog changed before the server answered; run `list` to see the result")]
    Discarded,

    #[error("failed to render output: {0}")]
    Render(String),

    #[error("readline error: {0}")]
    Readline(String),
}

fn describe_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Wires the HTTP service and static identity into a category page.
pub fn build_page(config: &BudgettoConfig) -> Result<CategoryPage, CliError> {
    let identity: Arc<dyn IdentityProvider> =
        Arc::new(StaticIdentity::from_config(&config.identity));
    let api = ApiClient::from_config(&config.api)?;
    let service = Arc::new(HttpCategoryService::new(api, identity.clone()));
    Ok(CategoryPage::new(DialogContext::new(service, identity)))
}

pub async fn run(config: &BudgettoConfig, command: CategoryCommand) -> Result<(), CliError> {
    let page = build_page(config)?;
    let result = execute(&page, command).await;
    print_notifications(&page).await;
    result
}

/// Runs one command against an already-built page.
pub async fn execute(page: &CategoryPage, command: CategoryCommand) -> Result<(), CliError> {
    match command {
        CategoryCommand::List => {
            let rows = page.load().await?;
            print!("{}", render_rows(&rows));
            Ok(())
        }
        CategoryCommand::Create { name, note } => {
            page.load().await?;
            let mut form = CategoryForm::new();
            page.open_create(&mut form);
            form.set_name(name);
            form.set_note(note);
            finish(page.create.submit(&mut form).await)
        }
        CategoryCommand::Update { id, name, note } => {
            page.load().await?;
            let mut form = CategoryForm::new();
            page.open_update(id, &mut form)?;
            if let Some(name) = name {
                form.set_name(name);
            }
            if let Some(note) = note {
                form.set_note(note);
            }
            finish(page.update.submit(&mut form).await)
        }
        CategoryCommand::Delete { id } => {
            page.load().await?;
            page.open_delete(id)?;
            finish(page.delete.confirm().await)
        }
    }
}

/// Maps a dialog outcome onto the command's exit status.
pub fn finish(outcome: SubmitOutcome) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Completed(_) => Ok(()),
        SubmitOutcome::Invalid(fields) => Err(CliError::Invalid(fields)),
        SubmitOutcome::Failed(err) => Err(err.into()),
        SubmitOutcome::Busy => Err(CliError::Busy),
        SubmitOutcome::Closed => Err(CliError::Closed),
        SubmitOutcome::Discarded => Err(CliError::Discarded),
    }
}

/// Fixed-width table of categories. Default categories are marked.
pub fn render_rows(rows: &[Arc<Category>]) -> String {
    if rows.is_empty() {
        return "no categories\n".to_string();
    }

    let name_width = rows
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:>6}  {:<name_width$}  {:<8}  NOTE\n", "ID", "NAME", "OWNER");
    for category in rows {
        let owner = if category.is_editable { "you" } else { "default" };
        out.push_str(&format!(
            "{:>6}  {:<name_width$}  {:<8}  {}\n",
            category.id,
            category.name,
            owner,
            category.note_or_empty()
        ));
    }
    out
}

/// Prints and clears pending notifications.
pub async fn print_notifications(page: &CategoryPage) {
    for notification in page.context().toasts.drain().await {
        print_notification(&notification);
    }
}

fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => println!(
            "{} {}",
            notification.title.green().bold(),
            notification.description
        ),
        NotificationKind::Error => eprintln!(
            "{} {}",
            notification.title.red().bold(),
            notification.description
        ),
    }
}
