//! HTML pages

use crate::services::Roster;

const STYLE: &str = r#"
      body { font-family: system-ui, sans-serif; max-width: 32rem; margin: 2rem auto; padding: 0 1rem; }
      h1 { font-size: 1.6rem; }
      .message { padding: 0.6rem 0.8rem; background: #eef6ee; border-left: 4px solid #3a8f3a; }
      ol { padding-left: 1.4rem; }
      form input[type=text] { padding: 0.4rem; width: 70%; }
      form button { padding: 0.4rem 0.8rem; }
"#;

/// Sign-up form, prefilled with the remembered name when there is one.
pub fn index(base_path: &str, remembered_name: Option<&str>) -> String {
    let base = escape(base_path);
    let value = escape(remembered_name.unwrap_or_default());

    let body = format!(
        r#"    <h1>Playing today?</h1>
    <form method="post" action="{base}submit">
      <label for="name">Name</label>
      <input type="text" id="name" name="name" value="{value}" autofocus>
      <button type="submit">Sign me up</button>
    </form>
    <p><a href="{base}players">See who's playing</a></p>
"#
    );

    layout("Sign up", &body)
}

/// Today's roster, with an optional status line above it.
pub fn players(base_path: &str, roster: &Roster, message: Option<&str>) -> String {
    let base = escape(base_path);
    let mut body = format!("    <h1>Playing on {}</h1>\n", roster.day);

    if let Some(message) = message {
        body.push_str(&format!("    <p class=\"message\">{}</p>\n", escape(message)));
    }

    if roster.names.is_empty() {
        body.push_str("    <p>No one has signed up yet.</p>\n");
    } else {
        body.push_str(&format!("    <p>{} signed up</p>\n    <ol>\n", roster.names.len()));
        for name in &roster.names {
            body.push_str(&format!("      <li>{}</li>\n", escape(name)));
        }
        body.push_str("    </ol>\n");
    }

    body.push_str(&format!("    <p><a href=\"{base}\">Back to sign-up</a></p>\n"));

    layout("Today's players", &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{STYLE}    </style>
  </head>
  <body>
{body}  </body>
</html>
"#
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Roster {
        Roster {
            day: "2024-06-01".parse().unwrap(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_index_links_use_base_path() {
        let html = index("/hoops/", None);
        assert!(html.contains(r#"action="/hoops/submit""#));
        assert!(html.contains(r#"href="/hoops/players""#));
        assert!(html.contains(r#"value="""#));
    }

    #[test]
    fn test_index_prefills_remembered_name() {
        let html = index("/", Some("Alice \"Ace\""));
        assert!(html.contains(r#"value="Alice &quot;Ace&quot;""#));
    }

    #[test]
    fn test_players_lists_names_in_order() {
        let html = players("/", &roster(&["Bob", "Alice"]), None);
        assert!(html.contains("Playing on 2024-06-01"));
        assert!(html.contains("2 signed up"));
        let bob = html.find("<li>Bob</li>").unwrap();
        let alice = html.find("<li>Alice</li>").unwrap();
        assert!(bob < alice);
        assert!(!html.contains("class=\"message\""));
    }

    #[test]
    fn test_players_empty_roster() {
        let html = players("/", &roster(&[]), None);
        assert!(html.contains("No one has signed up yet."));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn test_players_escapes_message_and_names() {
        let html = players(
            "/",
            &roster(&["<script>"]),
            Some("<script> has been added for today's game!"),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("<li>&lt;script&gt;</li>"));
        assert!(html.contains("&lt;script&gt; has been added for today&#39;s game!"));
    }
}
