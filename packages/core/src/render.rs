//! Human-readable text rendering of search results and repositories.
//!
//! The output is stable plain text suitable for terminals and logs. It is not
//! a canonical format; only the JSON wire format is normative.

use crate::convert::DEFAULT_TIMESTAMP_PATTERN;
use crate::types::Repository;

/// Render one repository in detail.
///
/// ```text
/// hatena/Hatena-Textbook  [Rust]  ★ 2100  forks 190  issues 3
/// "Textbook for the Hatena summer internship"
///
/// Homepage: https://hatena.example
///
/// owner: hatena (Organization)  branch: master  score: 83.50
/// created: 2014-07-22T03:17:31Z  updated: 2018-02-07T09:10:11Z  pushed: 2017-12-01T00:00:00Z
/// https://github.com/hatena/Hatena-Textbook
/// ```
pub fn render_repository(repo: &Repository) -> String {
    let mut out = String::new();

    // header line
    let language = repo
        .language
        .as_deref()
        .map(|l| format!("  [{}]", l))
        .unwrap_or_default();
    let flags = match (repo.is_private, repo.fork) {
        (true, true) => "  (private, fork)",
        (true, false) => "  (private)",
        (false, true) => "  (fork)",
        (false, false) => "",
    };
    out.push_str(&format!(
        "{}{}{}  ★ {}  forks {}  issues {}",
        repo.full_name,
        language,
        flags,
        repo.stargazers_count,
        repo.forks_count,
        repo.open_issues_count
    ));
    out.push('\n');

    if let Some(description) = &repo.description {
        out.push_str(&wrap_content(description, 80));
        out.push('\n');
    }

    if let Some(homepage) = repo.homepage.as_deref().filter(|h| !h.is_empty()) {
        out.push('\n');
        out.push_str(&format!("Homepage: {}\n", homepage));
    }

    // footer
    out.push('\n');
    out.push_str(&format!(
        "owner: {} ({})  branch: {}  score: {:.2}\n",
        repo.owner.login, repo.owner.account_type, repo.default_branch, repo.score
    ));
    let pushed = repo
        .pushed_at
        .map(|p| format!("  pushed: {}", p.format(DEFAULT_TIMESTAMP_PATTERN)))
        .unwrap_or_default();
    out.push_str(&format!(
        "created: {}  updated: {}{}\n",
        repo.created_at.format(DEFAULT_TIMESTAMP_PATTERN),
        repo.updated_at.format(DEFAULT_TIMESTAMP_PATTERN),
        pushed
    ));
    out.push_str(&format!("{}\n", repo.html_url));

    out
}

/// Render a page of search results, one line per repository.
///
/// ```text
/// 2 repositories (showing 2)
/// ──────────────────────────
///   hatena/Hatena-Textbook             ★ 2100  Textbook for the Hatena summer…
///   hatena/example                     ★ 3
/// ```
pub fn render_search(total_count: i64, incomplete_results: bool, items: &[Repository]) -> String {
    let mut out = render_search_header(total_count, incomplete_results, items.len());
    for repo in items {
        let excerpt = repo
            .description
            .as_deref()
            .map(|d| format!("  {}", truncate(d, 40)))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<34} ★ {}{}\n",
            repo.full_name, repo.stargazers_count, excerpt
        ));
    }

    out
}

/// The two-line summary that heads a page of results: total hits, how many
/// this page shows, and whether GitHub gave up before counting everything.
pub fn render_search_header(total_count: i64, incomplete_results: bool, shown: usize) -> String {
    let header = format!(
        "{} repositor{} (showing {}){}",
        total_count,
        if total_count == 1 { "y" } else { "ies" },
        shown,
        if incomplete_results { "  [incomplete]" } else { "" }
    );
    let rule = "─".repeat(header.chars().count());
    format!("{}\n{}\n", header, rule)
}

// --- helpers -----------------------------------------------------------------

/// Quote `content`, wrapping on whitespace so no line exceeds `width`
/// characters. A single word longer than `width` stays on its own line.
fn wrap_content(content: &str, width: usize) -> String {
    if content.chars().count() <= width {
        return format!("\"{}\"", content);
    }
    let mut result = String::from("\"");
    let mut line_len = 1usize;
    for word in content.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 1 && line_len + word_len + 1 > width {
            result.push('\n');
            result.push(' ');
            line_len = 1;
        } else if line_len > 1 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }
    result.push('"');
    result
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.trim();
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

// --- tests -------------------------------------------------------------------
