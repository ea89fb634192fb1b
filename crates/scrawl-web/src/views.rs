//! HTML views for the scrawl web surface.
//!
//! No template engine: every page is a `format!` document assembled from
//! the shared shell below, and every interpolated value goes through
//! `html_escape`.

use scrawl_core::{Note, User};

use crate::forms::NoteForm;

/// Simple HTML escaping for security.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Shared page shell: header, nav reflecting the auth state, styles.
fn page(title: &str, user: Option<&User>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<a href="/notes">My notes</a>
            <a href="/notes/add">Add note</a>
            <form class="inline" method="POST" action="/auth/logout">
                <button type="submit" class="linklike">Log out ({username})</button>
            </form>"#,
            username = html_escape(&user.username)
        ),
        None => r#"<a href="/auth/login">Log in</a>
            <a href="/auth/signup">Sign up</a>"#
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - scrawl</title>
    <style>
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
            background: #f7f9fc;
            color: #333;
        }}
        header {{
            background: #1a1a2e;
            padding: 14px 24px;
            display: flex;
            align-items: center;
            justify-content: space-between;
        }}
        header .brand {{
            color: #fff;
            font-weight: 600;
            font-size: 18px;
            text-decoration: none;
        }}
        nav {{ display: flex; align-items: center; gap: 16px; }}
        nav a {{ color: #c7d2fe; text-decoration: none; font-size: 14px; }}
        nav a:hover {{ color: #fff; }}
        form.inline {{ display: inline; }}
        button.linklike {{
            background: none;
            border: none;
            color: #c7d2fe;
            font-size: 14px;
            cursor: pointer;
            padding: 0;
        }}
        button.linklike:hover {{ color: #fff; }}
        main {{ max-width: 720px; margin: 32px auto; padding: 0 16px; }}
        h1 {{ font-size: 24px; margin-bottom: 16px; }}
        p {{ margin-bottom: 12px; }}
        label {{ display: block; font-size: 14px; font-weight: 500; color: #555; margin-bottom: 4px; }}
        input[type="text"], input[type="password"], textarea {{
            width: 100%;
            padding: 10px;
            border: 1px solid #ccd4e0;
            border-radius: 8px;
            font-size: 15px;
            font-family: inherit;
        }}
        .hint {{ font-size: 12px; color: #888; }}
        button[type="submit"] {{
            background: #667eea;
            color: #fff;
            border: none;
            border-radius: 8px;
            padding: 10px 20px;
            font-size: 15px;
            font-weight: 600;
            cursor: pointer;
        }}
        button.danger {{ background: #e65100; }}
        ul.errorlist {{
            list-style: none;
            background: #fff3e0;
            border-left: 4px solid #ff9800;
            padding: 8px 12px;
            margin-bottom: 8px;
            border-radius: 0 8px 8px 0;
            font-size: 13px;
            color: #e65100;
        }}
        ul.notes {{ list-style: none; }}
        ul.notes li {{
            background: #fff;
            border-radius: 8px;
            padding: 12px 16px;
            margin-bottom: 8px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }}
        a.note-title {{ color: #333; font-weight: 600; text-decoration: none; }}
        .note-actions a {{ color: #667eea; font-size: 13px; text-decoration: none; margin-left: 8px; }}
        .note-text {{
            background: #fff;
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 16px;
            line-height: 1.5;
        }}
        .meta {{ font-size: 13px; color: #888; font-family: monospace; }}
        .alt {{ font-size: 14px; color: #555; }}
    </style>
</head>
<body>
    <header><a class="brand" href="/">scrawl</a><nav>{nav}</nav></header>
    <main>
{body}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav,
        body = body,
    )
}

/// Errorlist markup when the error belongs to the named field.
fn field_errors(error: Option<(&str, &str)>, field: &str) -> String {
    match error {
        Some((f, message)) if f == field => format!(
            "<ul class=\"errorlist\"><li>{}</li></ul>\n    ",
            html_escape(message)
        ),
        _ => String::new(),
    }
}

/// Public landing page.
pub fn landing_page(user: Option<&User>) -> String {
    let cta = match user {
        Some(_) => r#"<p><a href="/notes">Go to your notes</a></p>"#,
        None => {
            r#"<p><a href="/auth/signup">Sign up</a> or <a href="/auth/login">log in</a> to start writing.</p>"#
        }
    };
    let body = format!(
        "<h1>scrawl</h1>\n<p>A small place for your notes. Every note gets a clean, readable URL.</p>\n{}",
        cta
    );
    page("Welcome", user, &body)
}

/// The current user's notes, newest first.
pub fn list_page(user: &User, notes: &[Note]) -> String {
    let body = if notes.is_empty() {
        r#"<h1>My notes</h1>
<p>No notes yet. <a href="/notes/add">Write the first one.</a></p>"#
            .to_string()
    } else {
        let items: String = notes
            .iter()
            .map(|note| {
                format!(
                    r#"    <li>
        <a class="note-title" href="/notes/{slug}">{title}</a>
        <span class="note-actions"><a href="/notes/{slug}/edit">edit</a><a href="/notes/{slug}/delete">delete</a></span>
    </li>
"#,
                    slug = html_escape(&note.slug),
                    title = html_escape(&note.title),
                )
            })
            .collect();
        format!("<h1>My notes</h1>\n<ul class=\"notes\">\n{}</ul>", items)
    };
    page("My notes", Some(user), &body)
}

/// The add/edit form. `error` is a (field, message) pair rendered as an
/// errorlist above the matching input.
pub fn note_form_page(
    user: &User,
    heading: &str,
    action: &str,
    form: &NoteForm,
    error: Option<(&str, &str)>,
) -> String {
    let body = format!(
        r#"<h1>{heading}</h1>
<form method="POST" action="{action}">
    {title_errors}<p>
        <label for="id_title">Title</label>
        <input type="text" id="id_title" name="title" value="{title}" maxlength="100">
    </p>
    {text_errors}<p>
        <label for="id_text">Text</label>
        <textarea id="id_text" name="text" rows="10">{text}</textarea>
    </p>
    {slug_errors}<p>
        <label for="id_slug">Slug</label>
        <input type="text" id="id_slug" name="slug" value="{slug}">
        <span class="hint">Leave blank to derive one from the title.</span>
    </p>
    <button type="submit">Save</button>
</form>"#,
        heading = html_escape(heading),
        action = html_escape(action),
        title_errors = field_errors(error, "title"),
        text_errors = field_errors(error, "text"),
        slug_errors = field_errors(error, "slug"),
        title = html_escape(&form.title),
        text = html_escape(&form.text),
        slug = html_escape(&form.slug),
    );
    page(heading, Some(user), &body)
}

/// A single note, shown only to its owner.
pub fn detail_page(user: &User, note: &Note) -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<p class="meta">/notes/{slug} &middot; updated {updated}</p>
<div class="note-text">{text}</div>
<p class="note-actions"><a href="/notes/{slug}/edit">Edit</a><a href="/notes/{slug}/delete">Delete</a><a href="/notes">Back to list</a></p>"#,
        title = html_escape(&note.title),
        slug = html_escape(&note.slug),
        updated = note.updated_at_utc.format("%Y-%m-%d %H:%M UTC"),
        text = html_escape(&note.text).replace('\n', "<br>\n"),
    );
    page(&note.title, Some(user), &body)
}

/// Delete confirmation.
pub fn delete_page(user: &User, note: &Note) -> String {
    let body = format!(
        r#"<h1>Delete note</h1>
<p>Delete &quot;{title}&quot;? This cannot be undone.</p>
<form method="POST" action="/notes/{slug}/delete">
    <button type="submit" class="danger">Delete</button>
    <a href="/notes/{slug}">Cancel</a>
</form>"#,
        title = html_escape(&note.title),
        slug = html_escape(&note.slug),
    );
    page("Delete note", Some(user), &body)
}

/// Post-save landing page.
pub fn success_page(user: &User) -> String {
    let body = r#"<h1>Done</h1>
<p>Your change has been saved.</p>
<p><a href="/notes">Back to your notes</a></p>"#;
    page("Done", Some(user), body)
}

/// Login form. `error` is the generic failed-login message.
pub fn login_page(next: &str, username: &str, error: Option<&str>) -> String {
    let error_html = match error {
        Some(message) => format!(
            "<ul class=\"errorlist\"><li>{}</li></ul>\n",
            html_escape(message)
        ),
        None => String::new(),
    };
    let body = format!(
        r#"<h1>Log in</h1>
{error_html}<form method="POST" action="/auth/login">
    <input type="hidden" name="next" value="{next}">
    <p>
        <label for="id_username">Username</label>
        <input type="text" id="id_username" name="username" value="{username}" autofocus>
    </p>
    <p>
        <label for="id_password">Password</label>
        <input type="password" id="id_password" name="password">
    </p>
    <button type="submit">Log in</button>
</form>
<p class="alt">No account? <a href="/auth/signup{signup_query}">Sign up</a></p>"#,
        error_html = error_html,
        next = html_escape(next),
        username = html_escape(username),
        signup_query = next_query(next),
    );
    page("Log in", None, &body)
}

/// Registration form. `error` is a (field, message) pair.
pub fn signup_page(next: &str, username: &str, error: Option<(&str, &str)>) -> String {
    let body = format!(
        r#"<h1>Sign up</h1>
<form method="POST" action="/auth/signup">
    <input type="hidden" name="next" value="{next}">
    {username_errors}<p>
        <label for="id_username">Username</label>
        <input type="text" id="id_username" name="username" value="{username}" autofocus>
    </p>
    {password_errors}<p>
        <label for="id_password">Password</label>
        <input type="password" id="id_password" name="password">
    </p>
    <button type="submit">Create account</button>
</form>
<p class="alt">Already registered? <a href="/auth/login{login_query}">Log in</a></p>"#,
        next = html_escape(next),
        username_errors = field_errors(error, "username"),
        password_errors = field_errors(error, "password"),
        username = html_escape(username),
        login_query = next_query(next),
    );
    page("Sign up", None, &body)
}

/// Querystring that forwards a non-empty `next` between login and signup.
fn next_query(next: &str) -> String {
    if next.is_empty() {
        String::new()
    } else {
        format!("?next={}", urlencoding::encode(next))
    }
}

/// 404 page. Also shown for notes the requester does not own.
pub fn not_found_page() -> String {
    let body = r#"<h1>Not found</h1>
<p>There is nothing at this address.</p>
<p><a href="/notes">Back to your notes</a></p>"#;
    page("Not found", None, body)
}

/// Generic error page.
pub fn error_page(status: &str, detail: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>",
        html_escape(status),
        html_escape(detail)
    );
    page(status, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scrawl_core::new_v7;

    fn test_user(username: &str) -> User {
        User {
            id: new_v7(),
            username: username.to_string(),
            created_at_utc: Utc::now(),
        }
    }

    fn test_note(user: &User, title: &str, text: &str, slug: &str) -> Note {
        Note {
            id: new_v7(),
            author_id: user.id,
            title: title.to_string(),
            text: text.to_string(),
            slug: slug.to_string(),
            created_at_utc: Utc::now(),
            updated_at_utc: Utc::now(),
        }
    }

    #[test]
    fn test_html_escape_all_specials() {
        assert_eq!(
            html_escape(r#"<b>"it's" & more</b>"#),
            "&lt;b&gt;&quot;it&#39;s&quot; &amp; more&lt;/b&gt;"
        );
    }

    #[test]
    fn test_html_escape_plain_text_unchanged() {
        assert_eq!(html_escape("plain text-123_ok"), "plain text-123_ok");
    }

    #[test]
    fn test_form_page_escapes_submitted_values() {
        let user = test_user("alice");
        let form = NoteForm {
            title: "<script>alert(1)</script>".to_string(),
            text: "body".to_string(),
            slug: String::new(),
        };
        let html = note_form_page(&user, "Add a note", "/notes/add", &form, None);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_form_page_places_error_at_field() {
        let user = test_user("alice");
        let form = NoteForm::default();
        let html = note_form_page(
            &user,
            "Add a note",
            "/notes/add",
            &form,
            Some(("slug", "taken")),
        );
        assert!(html.contains("errorlist"));
        assert!(html.contains("<li>taken</li>"));
    }

    #[test]
    fn test_form_page_without_error_has_no_errorlist_items() {
        let user = test_user("alice");
        let html = note_form_page(&user, "Add a note", "/notes/add", &NoteForm::default(), None);
        assert!(!html.contains("<ul class=\"errorlist\">"));
    }

    #[test]
    fn test_login_page_carries_next_in_hidden_input() {
        let html = login_page("/notes/add", "", None);
        assert!(html.contains(r#"<input type="hidden" name="next" value="/notes/add">"#));
    }

    #[test]
    fn test_nav_shows_logout_for_user() {
        let user = test_user("bob");
        let html = list_page(&user, &[]);
        assert!(html.contains("Log out (bob)"));
        assert!(!html.contains(r#"href="/auth/login""#));
    }

    #[test]
    fn test_nav_shows_login_for_anonymous() {
        let html = landing_page(None);
        assert!(html.contains(r#"href="/auth/login""#));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn test_detail_page_escapes_text_and_keeps_line_breaks() {
        let user = test_user("carol");
        let note = test_note(&user, "Title", "line one\nline <two>", "title");
        let html = detail_page(&user, &note);
        assert!(html.contains("line one<br>\nline &lt;two&gt;"));
    }

    #[test]
    fn test_delete_page_posts_to_delete_route() {
        let user = test_user("dave");
        let note = test_note(&user, "Gone soon", "x", "gone-soon");
        let html = delete_page(&user, &note);
        assert!(html.contains(r#"action="/notes/gone-soon/delete""#));
    }
}
