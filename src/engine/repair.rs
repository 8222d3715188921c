/*!
 * Structural repair of known degenerate patterns in translator output.
 *
 * Translators routinely hand back duplicated empty headings, headings
 * nested inside paragraphs, and doubled inline pairs. This post-pass
 * corrects those specific shapes and nothing else; it is applied to the
 * assembled string after reconstruction and is idempotent.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound on fixpoint iterations; the rule set converges in two or
/// three passes on real content.
const MAX_PASSES: usize = 8;

/// Heading rules, one set per level (the regex crate has no
/// backreferences, so levels are expanded at build time).
static HEADING_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    let mut rules = Vec::new();
    for level in 1..=6u8 {
        // An empty heading immediately followed by a populated heading of
        // the same level collapses to the populated one.
        rules.push((
            Regex::new(&format!(r"<h{0}>\s*</h{0}>\s*<h{0}>", level))
                .expect("Invalid heading collapse regex"),
            format!("<h{level}>"),
        ));
        // Headings do not belong inside paragraphs; hoist to sibling level.
        rules.push((
            Regex::new(&format!(r"(?s)<p>\s*(<h{0}[^>]*>.*?</h{0}>)\s*</p>", level))
                .expect("Invalid heading hoist regex"),
            "$1".to_string(),
        ));
        // Whatever empty heading pairs remain are deleted.
        rules.push((
            Regex::new(&format!(r"<h{0}>\s*</h{0}>", level))
                .expect("Invalid empty heading regex"),
            String::new(),
        ));
    }
    rules
});

/// Doubled inline pairs like `<i><i>x</i></i>` collapse to a single pair.
static DOUBLED_INLINE_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    ["i", "b", "u"]
        .iter()
        .map(|tag| {
            (
                Regex::new(&format!(r"<{0}><{0}>([^<]*)</{0}></{0}>", tag))
                    .expect("Invalid doubled tag regex"),
                format!("<{tag}>$1</{tag}>"),
            )
        })
        .collect()
});

/// Apply all repair rules until the string stops changing.
pub fn repair_markup(content: &str) -> String {
    let mut current = content.to_string();
    for _ in 0..MAX_PASSES {
        let mut next = current.clone();
        for (pattern, replacement) in HEADING_RULES.iter().chain(DOUBLED_INLINE_RULES.iter()) {
            next = pattern.replace_all(&next, replacement.as_str()).into_owned();
        }
        if next == current {
            break;
        }
        current = next;
    }
    current
}
