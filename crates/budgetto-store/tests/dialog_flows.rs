// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dialog and page flows driven against the mock category service.

use std::sync::Arc;

use budgetto_core::BudgettoError;
use budgetto_store::{
    CategoryForm, CategoryMode, ModeTag, NotificationKind, PageActionError, QueryKey,
    SubmitOutcome,
};
use budgetto_test_utils::{CategoryHarness, MockCall, category};

fn seeded() -> Vec<budgetto_core::Category> {
    vec![
        category(1, "Salary", None),
        category(2, "Rent", Some("auth0|me")),
        category(3, "Food", Some("auth0|me")),
    ]
}

async fn loaded_harness() -> CategoryHarness {
    CategoryHarness::builder()
        .with_categories(seeded())
        .build()
        .loaded()
        .await
        .expect("initial load")
}

fn names(h: &CategoryHarness) -> Vec<String> {
    h.page.rows().iter().map(|c| c.name.clone()).collect()
}

#[tokio::test]
async fn create_success_prepends_and_returns_to_view() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();

    h.page.open_create(&mut form);
    assert!(h.page.create.is_open());
    form.set_name("Groceries");

    let outcome = h.page.create.submit(&mut form).await;
    assert!(outcome.is_completed(), "got {outcome:?}");

    assert_eq!(h.page.rows()[0].name, "Groceries");
    assert_eq!(h.page.rows().len(), 4);
    assert_eq!(h.ctx().mode.tag(), ModeTag::View);
    assert_eq!(form, CategoryForm::default());

    let notes = h.notifications().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[0].title, "Created successfully");
    assert!(notes[0].description.contains("Groceries"));
}

#[tokio::test]
async fn create_rejection_leaves_cache_and_mode_untouched() {
    let h = loaded_harness().await;
    let before = h.page.rows();
    let mut form = CategoryForm::new();
    h.page.open_create(&mut form);
    form.set_name("Groceries");

    h.api
        .fail_next(BudgettoError::Http {
            status: 400,
            message: "Item already exists.".into(),
        })
        .await;
    let outcome = h.page.create.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.status() == Some(400)));
    assert_eq!(h.page.rows(), before);
    assert_eq!(h.ctx().mode.tag(), ModeTag::Create);
    assert_eq!(form.name, "Groceries");

    let notes = h.notifications().await;
    assert!(notes.iter().all(|n| n.kind == NotificationKind::Error));
    assert_eq!(notes[0].description, "Item already exists.");
}

#[tokio::test]
async fn blank_name_never_reaches_the_service() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();
    h.page.open_create(&mut form);
    form.set_name("  ");

    let outcome = h.page.create.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref f) if f[0].field == "name"));
    assert!(form.field_error("name").is_some());
    assert_eq!(h.api.calls().await, vec![MockCall::List]);
    assert_eq!(h.ctx().mode.tag(), ModeTag::Create);
}

#[tokio::test]
async fn submit_on_closed_dialog_is_rejected() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();
    form.set_name("Groceries");
    assert!(matches!(
        h.page.create.submit(&mut form).await,
        SubmitOutcome::Closed
    ));
    assert!(matches!(h.page.delete.confirm().await, SubmitOutcome::Closed));
}

#[tokio::test]
async fn update_prefills_and_replaces_only_the_target() {
    let h = loaded_harness().await;
    let before = h.page.rows();
    let mut form = CategoryForm::new();

    let target = h.page.open_update(2, &mut form).unwrap();
    assert_eq!(target.name, "Rent");
    assert_eq!(form.name, "Rent");
    assert_eq!(form.note, "");

    form.set_name("Housing");
    let outcome = h.page.update.submit(&mut form).await;
    assert!(outcome.is_completed(), "got {outcome:?}");

    let after = h.page.rows();
    assert_eq!(names(&h), vec!["Salary", "Housing", "Food"]);
    assert!(Arc::ptr_eq(&before[0], &after[0]));
    assert!(Arc::ptr_eq(&before[2], &after[2]));
    assert_eq!(h.ctx().mode.mode(), CategoryMode::View);
    assert!(h.notifications().await[0]
        .description
        .contains("Housing updated successfully"));
}

#[tokio::test]
async fn update_of_vanished_category_reports_not_found() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();
    h.page.open_update(3, &mut form).unwrap();
    h.api
        .fail_next(BudgettoError::Http {
            status: 404,
            message: "Requested item was not found.".into(),
        })
        .await;

    let outcome = h.page.update.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(h.ctx().mode.tag(), ModeTag::Update);
    assert_eq!(
        h.notifications().await[0].description,
        "Requested item was not found."
    );
}

#[tokio::test]
async fn delete_removes_row_and_shows_server_message() {
    let h = loaded_harness().await;
    h.page.open_delete(3).unwrap();

    let outcome = h.page.delete.confirm().await;
    assert!(outcome.is_completed());
    assert_eq!(names(&h), vec!["Salary", "Rent"]);
    assert_eq!(h.ctx().mode.tag(), ModeTag::View);

    let notes = h.notifications().await;
    assert_eq!(notes[0].title, "Deleted successfully");
    assert_eq!(notes[0].description, "Item deleted successfully");
}

#[tokio::test]
async fn default_and_unknown_rows_cannot_be_edited() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();

    assert_eq!(
        h.page.open_update(1, &mut form).unwrap_err(),
        PageActionError::NotEditable(1)
    );
    assert_eq!(
        h.page.open_delete(99).unwrap_err(),
        PageActionError::UnknownCategory(99)
    );
    assert_eq!(h.ctx().mode.tag(), ModeTag::View);
}

#[tokio::test]
async fn cancel_returns_to_view_and_clears_form() {
    let h = loaded_harness().await;
    let mut form = CategoryForm::new();
    h.page.open_update(2, &mut form).unwrap();

    assert!(h.page.update.cancel(&mut form));
    assert_eq!(h.ctx().mode.tag(), ModeTag::View);
    assert_eq!(form, CategoryForm::default());
    assert!(!h.page.update.cancel(&mut form));
}

#[tokio::test]
async fn second_submit_and_cancel_are_rejected_while_busy() {
    let h = CategoryHarness::builder()
        .with_categories(seeded())
        .gated()
        .build();
    h.release();
    let h = h.loaded().await.unwrap();

    let mut form = CategoryForm::new();
    h.page.open_create(&mut form);
    form.set_name("Travel");
    let mut other = CategoryForm::new();
    other.set_name("Other");
    let mut cancel_form = CategoryForm::new();

    let (first, (second, cancelled)) = tokio::join!(h.page.create.submit(&mut form), async {
        while !h.page.create.is_busy() {
            tokio::task::yield_now().await;
        }
        let second = h.page.create.submit(&mut other).await;
        let cancelled = h.page.create.cancel(&mut cancel_form);
        h.release();
        (second, cancelled)
    });

    assert!(matches!(second, SubmitOutcome::Busy));
    assert!(!cancelled);
    assert!(first.is_completed(), "got {first:?}");
    assert!(!h.page.create.is_busy());

    let creates = h
        .api
        .calls()
        .await
        .into_iter()
        .filter(|c| matches!(c, MockCall::Create(_)))
        .count();
    assert_eq!(creates, 1);
}

#[tokio::test]
async fn result_arriving_after_mode_change_is_discarded() {
    let h = CategoryHarness::builder()
        .with_categories(seeded())
        .gated()
        .build();
    h.release();
    let h = h.loaded().await.unwrap();

    let mut form = CategoryForm::new();
    h.page.open_create(&mut form);
    form.set_name("Travel");

    let (outcome, ()) = tokio::join!(h.page.create.submit(&mut form), async {
        while !h.page.create.is_busy() {
            tokio::task::yield_now().await;
        }
        h.ctx().mode.set_mode(CategoryMode::View);
        h.release();
    });

    assert!(matches!(outcome, SubmitOutcome::Discarded), "got {outcome:?}");
    assert!(h.notifications().await.is_empty());
    assert_eq!(h.ctx().mode.tag(), ModeTag::View);
    assert!(!names(&h).contains(&"Travel".to_string()));
    assert!(h.ctx().cache.needs_fetch(QueryKey::Categories));

    // The server did commit; the next load picks it up.
    h.release();
    let rows = h.page.load().await.unwrap();
    assert_eq!(rows[0].name, "Travel");
    assert_eq!(h.api.list_calls().await, 2);
}

#[tokio::test]
async fn load_is_served_from_cache_until_refresh() {
    let h = loaded_harness().await;
    h.page.load().await.unwrap();
    assert_eq!(h.api.list_calls().await, 1);

    h.page.refresh().await.unwrap();
    assert_eq!(h.api.list_calls().await, 2);
}

#[tokio::test]
async fn load_without_session_is_an_auth_error() {
    let h = CategoryHarness::builder().signed_out().build();
    let err = h.page.load().await.unwrap_err();
    assert!(err.is_auth());
    assert!(h.api.calls().await.is_empty());
}

#[tokio::test]
async fn token_failure_on_submit_invalidates_session() {
    let h = loaded_harness().await;
    let before = h.page.rows();
    let mut form = CategoryForm::new();
    h.page.open_create(&mut form);
    form.set_name("Groceries");

    h.identity.fail_tokens();
    let outcome = h.page.create.submit(&mut form).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_auth()), "got {outcome:?}");
    assert_eq!(h.identity.invalidations(), 1);
    assert!(!h.ctx().identity.session().is_authenticated);
    assert_eq!(h.ctx().mode.tag(), ModeTag::Create);
    assert_eq!(h.page.rows(), before);
    assert_eq!(h.api.calls().await, vec![MockCall::List]);
    assert_eq!(h.api.items().await.len(), 3);
    assert_eq!(h.notifications().await[0].title, "Create failed");
}

#[tokio::test]
async fn server_auth_rejection_on_delete_invalidates_session() {
    let h = loaded_harness().await;
    h.page.open_delete(2).unwrap();

    h.api.fail_next(BudgettoError::auth("token expired")).await;
    let outcome = h.page.delete.confirm().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ref e) if e.is_auth()));
    assert_eq!(h.identity.invalidations(), 1);
    assert_eq!(h.ctx().mode.tag(), ModeTag::Delete);
    assert_eq!(h.page.rows().len(), 3);
    assert_eq!(h.notifications().await[0].title, "Delete failed");
}

#[tokio::test]
async fn auth_failure_after_mode_change_still_invalidates_session() {
    let h = CategoryHarness::builder()
        .with_categories(seeded())
        .gated()
        .build();
    h.release();
    let h = h.loaded().await.unwrap();
    h.page.open_delete(3).unwrap();
    h.api.fail_next(BudgettoError::auth("token expired")).await;

    let (outcome, ()) = tokio::join!(h.page.delete.confirm(), async {
        while !h.page.delete.is_busy() {
            tokio::task::yield_now().await;
        }
        h.ctx().mode.set_mode(CategoryMode::View);
        h.release();
    });

    assert!(matches!(outcome, SubmitOutcome::Discarded), "got {outcome:?}");
    assert_eq!(h.identity.invalidations(), 1);
    assert!(h.notifications().await.is_empty());
    assert_eq!(h.page.rows().len(), 3);
}
