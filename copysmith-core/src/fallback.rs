//! Local HTML description used when the remote generator is unavailable.
//!
//! The renderer is a pure function of `(title, raw_info)`: no I/O, no shared
//! state, and the same input always produces the same bytes.

use std::sync::LazyLock;

use regex::Regex;

/// Markdown-style bullet: `*` or `-` followed by whitespace (a BOM counts).
static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*-][\s\x{FEFF}]+").expect("Invalid bullet regex"));

/// Characters that disqualify the first line from being the intro paragraph.
const NON_INTRO_CHARS: [char; 3] = [':', '*', '-'];

/// Fewest bullet lines that are treated as a feature list.
const MIN_FEATURE_BULLETS: usize = 2;

/// Byte order mark, which pasted text often starts with.
const BOM: char = '\u{FEFF}';

fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Raw info split into trimmed, non-empty lines.
fn info_lines(raw_info: &str) -> Vec<&str> {
    raw_info
        .lines()
        .map(trim_line)
        .filter(|l| !l.is_empty())
        .collect()
}

fn is_bullet(line: &str) -> bool {
    BULLET_REGEX.is_match(line)
}

/// `key: value` split on the first colon, both sides trimmed.
fn spec_item(line: &str) -> Option<String> {
    let (key, value) = line.split_once(':')?;
    Some(format!(
        "<li><strong>{}:</strong> {}</li>",
        key.trim(),
        value.trim()
    ))
}

fn feature_item(line: &str) -> String {
    format!("<li>{}</li>", BULLET_REGEX.replace(line, ""))
}

fn intro_sentence(title: &str, first_line: Option<&str>) -> String {
    match first_line {
        Some(line) if !line.contains(NON_INTRO_CHARS) => line.to_string(),
        _ => format!("Discover the {} crafted for modern needs.", title),
    }
}

fn push_list(out: &mut Vec<String>, class: &str, items: &[String]) {
    out.push(format!("  <ul class=\"{}\">", class));
    out.extend(items.iter().map(|item| format!("    {}", item)));
    out.push("  </ul>".to_string());
}

/// Render a product description from loosely structured notes.
///
/// Lines are classified as feature bullets (only when at least two bullet
/// lines exist), `key: value` specification items, or neither. The first
/// line becomes the intro paragraph when it has no `:`, `*` or `-`.
///
/// `title` and the raw lines are inserted verbatim, without HTML escaping.
pub fn render_fallback(title: &str, raw_info: &str) -> String {
    let lines = info_lines(raw_info);

    let bullet_count = lines.iter().filter(|l| is_bullet(l)).count();
    let promote = bullet_count >= MIN_FEATURE_BULLETS;

    let (feature_lines, other_lines): (Vec<&str>, Vec<&str>) = lines
        .iter()
        .copied()
        .partition(|l| promote && is_bullet(l));

    let features: Vec<String> = feature_lines.into_iter().map(feature_item).collect();
    let specs: Vec<String> = other_lines.into_iter().filter_map(spec_item).collect();

    let mut out = vec![
        "<div class=\"product-description\">".to_string(),
        format!("  <h2>{}</h2>", title),
        format!("  <p>{}</p>", intro_sentence(title, lines.first().copied())),
    ];

    if !features.is_empty() {
        push_list(&mut out, "features", &features);
    }

    if !specs.is_empty() {
        out.push("  <h3>Key Details</h3>".to_string());
        push_list(&mut out, "specs", &specs);
    }

    out.push(format!(
        "  <p class=\"cta\">Upgrade your experience with the {} today.</p>",
        title
    ));
    out.push("</div>".to_string());

    out.join("\n")
}
