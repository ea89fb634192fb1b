//! Integration tests for the note CRUD surface.
//!
//! These drive the real router against an in-memory database and cover
//! the observable contract of the notes app:
//! - per-user list scoping and ordering
//! - form rendering on add and edit (prefill included)
//! - slug collision handling with the field-level warning message
//! - ownership masking (404 for non-owners, record untouched)
//! - slug derivation from titles, Cyrillic included

mod support;

use axum::http::StatusCode;
use scrawl_core::{slugify, NoteRepository, SLUG_TAKEN_WARNING};
use scrawl_db::test_fixtures::{login_token, TestDataBuilder};
use support::*;

#[tokio::test]
async fn test_list_shows_only_the_current_users_notes() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_user("chekhov")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .with_note("chekhov", "The Seagull", "A play.", Some("the-seagull"))
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("War and Peace"));
    assert!(!body.contains("The Seagull"));
}

#[tokio::test]
async fn test_list_renders_newest_note_first() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note("tolstoy", "First note", "one", Some("first-note"))
        .with_note("tolstoy", "Second note", "two", Some("second-note"))
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let body = body_string(get(&app, "/notes", Some(&cookie)).await).await;
    let second_pos = body.find("Second note").expect("second note in list");
    let first_pos = body.find("First note").expect("first note in list");
    assert!(second_pos < first_pos, "newest note should render first");
}

#[tokio::test]
async fn test_add_form_renders_all_inputs() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/add", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"<form method="POST" action="/notes/add">"#));
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains(r#"name="text""#));
    assert!(body.contains(r#"name="slug""#));
}

#[tokio::test]
async fn test_edit_form_is_prefilled_from_the_note() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/war-and-peace/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"<form method="POST" action="/notes/war-and-peace/edit">"#));
    assert!(body.contains(r#"value="War and Peace""#));
    assert!(body.contains("Draft one."));
    assert!(body.contains(r#"value="war-and-peace""#));
}

#[tokio::test]
async fn test_create_with_explicit_slug() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);

    let response = post_form(
        &app,
        "/notes/add",
        "title=Grocery+list&text=milk+and+bread&slug=groceries",
        Some(&cookie),
    )
    .await;
    assert_redirect(&response, "/notes/done");

    let note = db
        .notes
        .fetch_owned("groceries", user.id)
        .await
        .expect("created note resolves by slug");
    assert_eq!(note.title, "Grocery list");
    assert_eq!(note.text, "milk and bread");
}

#[tokio::test]
async fn test_create_without_slug_derives_from_title() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);

    let body = format!(
        "title={}&text={}",
        urlencoding::encode("Новый заголовок"),
        urlencoding::encode("Черновик")
    );
    let response = post_form(&app, "/notes/add", &body, Some(&cookie)).await;
    assert_redirect(&response, "/notes/done");

    let note = db
        .notes
        .fetch_owned("novyj-zagolovok", user.id)
        .await
        .expect("derived slug resolves");
    assert_eq!(note.slug, slugify("Новый заголовок"));
    assert_eq!(note.title, "Новый заголовок");
}

#[tokio::test]
async fn test_duplicate_slug_rerenders_with_warning_and_creates_nothing() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_user("chekhov")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("chekhov")).await);
    let before = db.notes.count().await.expect("count");

    let response = post_form(
        &app,
        "/notes/add",
        "title=Other+book&text=words&slug=war-and-peace",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let expected = format!("war-and-peace{}", SLUG_TAKEN_WARNING);
    assert!(
        body.contains(&expected),
        "form should show the colliding slug with the warning suffix"
    );
    // Submitted values survive the re-render
    assert!(body.contains(r#"value="Other book""#));
    assert_eq!(db.notes.count().await.expect("count"), before);
}

#[tokio::test]
async fn test_empty_title_rerenders_without_creating() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = post_form(&app, "/notes/add", "title=&text=body", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("This field is required."));
    assert_eq!(db.notes.count().await.expect("count"), 0);
}

#[tokio::test]
async fn test_owner_can_view_the_detail_page() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/war-and-peace", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("War and Peace"));
    assert!(body.contains("Draft one."));
}

#[tokio::test]
async fn test_non_owner_detail_view_is_masked_as_not_found() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_user("chekhov")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("chekhov")).await);

    let response = get(&app, "/notes/war-and-peace", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_slug_is_not_found_even_for_owner() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/no-such-note", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_edit_updates_and_redirects_to_success() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);

    let response = post_form(
        &app,
        "/notes/war-and-peace/edit",
        "title=War+and+Peace+II&text=Second+draft.&slug=war-and-peace-ii",
        Some(&cookie),
    )
    .await;
    assert_redirect(&response, "/notes/done");

    let note = db
        .notes
        .fetch_owned("war-and-peace-ii", user.id)
        .await
        .expect("note resolves under new slug");
    assert_eq!(note.title, "War and Peace II");
    assert_eq!(note.text, "Second draft.");
    assert!(
        db.notes.fetch_owned("war-and-peace", user.id).await.is_err(),
        "old slug should be gone"
    );
}

#[tokio::test]
async fn test_edit_with_cleared_slug_rederives_from_title() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);

    let response = post_form(
        &app,
        "/notes/war-and-peace/edit",
        "title=Peace+and+War&text=Draft+two.&slug=",
        Some(&cookie),
    )
    .await;
    assert_redirect(&response, "/notes/done");

    let note = db
        .notes
        .fetch_owned("peace-and-war", user.id)
        .await
        .expect("rederived slug resolves");
    assert_eq!(note.title, "Peace and War");
}

#[tokio::test]
async fn test_edit_to_taken_slug_rerenders_and_changes_nothing() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .with_note(
            "tolstoy",
            "Anna Karenina",
            "Also a draft.",
            Some("anna-karenina"),
        )
        .build()
        .await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);

    let response = post_form(
        &app,
        "/notes/anna-karenina/edit",
        "title=Anna+Karenina&text=Also+a+draft.&slug=war-and-peace",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let expected = format!("war-and-peace{}", SLUG_TAKEN_WARNING);
    assert!(body.contains(&expected));

    let untouched = db
        .notes
        .fetch_owned("anna-karenina", user.id)
        .await
        .expect("edited note keeps its slug");
    assert_eq!(untouched.title, "Anna Karenina");
}

#[tokio::test]
async fn test_non_owner_edit_is_masked_and_mutates_nothing() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_user("chekhov")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let owner = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, data.user("chekhov")).await);

    let page = get(&app, "/notes/war-and-peace/edit", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::NOT_FOUND);

    let response = post_form(
        &app,
        "/notes/war-and-peace/edit",
        "title=Hijacked&text=gotcha",
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let note = db
        .notes
        .fetch_owned("war-and-peace", owner.id)
        .await
        .expect("note still belongs to its owner");
    assert_eq!(note.title, "War and Peace");
    assert_eq!(note.text, "Draft one.");
}

#[tokio::test]
async fn test_delete_confirmation_page_posts_back_to_delete() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/war-and-peace/delete", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"action="/notes/war-and-peace/delete""#));
    assert!(body.contains("War and Peace"));
}

#[tokio::test]
async fn test_owner_delete_removes_the_note() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let user = data.user("tolstoy");
    let cookie = session_cookie(&login_token(&db, user).await);
    let before = db.notes.count().await.expect("count");

    let response = post_form(&app, "/notes/war-and-peace/delete", "", Some(&cookie)).await;
    assert_redirect(&response, "/notes/done");

    assert_eq!(db.notes.count().await.expect("count"), before - 1);
    assert!(db.notes.fetch_owned("war-and-peace", user.id).await.is_err());
}

#[tokio::test]
async fn test_non_owner_delete_is_masked_and_deletes_nothing() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db)
        .with_user("tolstoy")
        .with_user("chekhov")
        .with_note(
            "tolstoy",
            "War and Peace",
            "Draft one.",
            Some("war-and-peace"),
        )
        .build()
        .await;
    let cookie = session_cookie(&login_token(&db, data.user("chekhov")).await);
    let before = db.notes.count().await.expect("count");

    let response = post_form(&app, "/notes/war-and-peace/delete", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(db.notes.count().await.expect("count"), before);
}

#[tokio::test]
async fn test_success_page_renders_after_login() {
    let (app, db) = test_app().await;
    let data = TestDataBuilder::new(&db).with_user("tolstoy").build().await;
    let cookie = session_cookie(&login_token(&db, data.user("tolstoy")).await);

    let response = get(&app, "/notes/done", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Your change has been saved."));
}
