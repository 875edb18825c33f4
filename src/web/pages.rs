//! Minimal HTML pages
//!
//! Inline-string markup; the pages are demo scaffolding around the
//! login flow, not a UI.

use crate::Error;
use crate::user::UserInfo;

/// Escape a value for interpolation into HTML text or attributes.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 40rem;
            margin: 3rem auto;
            padding: 0 1rem;
        }}
        .error {{ color: #c0392b; }}
        form {{ margin: 1rem 0; }}
    </style>
</head>
<body>
{body}
</body>
</html>"#
    )
}

/// Landing page for anonymous visitors.
pub fn index_signed_out() -> String {
    page(
        "Sign in",
        r#"    <h1>Welcome</h1>
    <p>You are not signed in.</p>
    <form method="post" action="/login">
        <button type="submit">Sign in</button>
    </form>"#,
    )
}

/// Landing page for a signed-in user.
pub fn index_signed_in(user: &UserInfo) -> String {
    let body = format!(
        r#"    <h1>Welcome, {login}</h1>
    <p><a href="/profile">Profile</a></p>
    <form method="post" action="/logout">
        <button type="submit">Sign out</button>
    </form>"#,
        login = escape(&user.login),
    );
    page("Welcome", &body)
}

/// Profile page with an optional error line.
pub fn profile(user: &UserInfo, error: Option<&str>) -> String {
    let clients = if user.authorized_clients.is_empty() {
        "        <li>none</li>\n".to_string()
    } else {
        user.authorized_clients
            .iter()
            .map(|client| {
                format!(
                    "        <li>{} ({})</li>\n",
                    escape(&client.name),
                    escape(&client.id)
                )
            })
            .collect()
    };

    let error_line = error.map_or(String::new(), |message| {
        format!("    <p class=\"error\">{}</p>\n", escape(message))
    });

    let body = format!(
        r#"    <h1>Profile</h1>
{error_line}    <dl>
        <dt>Id</dt><dd>{id}</dd>
        <dt>Login</dt><dd>{login}</dd>
        <dt>Name</dt><dd>{name}</dd>
    </dl>
    <h2>Authorized clients</h2>
    <ul>
{clients}    </ul>
    <form method="post" action="/profile">
        <input type="text" name="name" placeholder="New name" required>
        <button type="submit">Rename</button>
    </form>
    <form method="post" action="/logout">
        <button type="submit">Sign out</button>
    </form>"#,
        id = escape(&user.id),
        login = escape(&user.login),
        name = escape(&user.name),
    );
    page("Profile", &body)
}

/// Error page shown when a login attempt aborts.
pub fn error_page(error: &Error) -> String {
    let body = format!(
        r#"    <h1>Sign-in failed</h1>
    <p class="error">{}</p>
    <p><a href="/">Back</a></p>"#,
        escape(&error.to_string()),
    );
    page("Sign-in failed", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ClientInfo;

    #[test]
    fn escapes_markup_in_user_fields() {
        let user = UserInfo {
            id: "u1".to_string(),
            login: "<script>alert(1)</script>".to_string(),
            name: "a&b".to_string(),
            authorized_clients: vec![],
        };

        let html = profile(&user, None);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn profile_lists_clients_in_order() {
        let user = UserInfo {
            authorized_clients: vec![
                ClientInfo {
                    id: "c2".to_string(),
                    name: "Second".to_string(),
                },
                ClientInfo {
                    id: "c1".to_string(),
                    name: "First".to_string(),
                },
            ],
            ..UserInfo::default()
        };

        let html = profile(&user, None);
        let second = html.find("Second").unwrap();
        let first = html.find("First").unwrap();
        assert!(second < first);
    }

    #[test]
    fn profile_shows_error_line() {
        let html = profile(&UserInfo::default(), Some("update failed"));
        assert!(html.contains("update failed"));
        assert!(html.contains("class=\"error\""));
    }
}
