//! Label text handling: canonical matching keys and suffix parsing.

use std::sync::LazyLock;

use regex_lite::Regex;

// Word boundaries for these are checked by `replace_whole_words`, since
// `regex-lite` only knows ASCII `\b`.
static SAINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"saint").expect("valid regex"));
static ST_DOTTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"st\.").expect("valid regex"));
static ST_BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"st").expect("valid regex"));
static OBSERVED_STACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"observed(?:,\s*observed)+").expect("valid regex"));
static OBSERVED_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(observed(?:,\s*)*\)").expect("valid regex"));

/// Words that never distinguish one holiday from another.
const STOP_WORDS: [&str; 4] = ["day", "the", "holiday", "hol"];

/// A display-invisible key used only to decide whether two labels name the
/// same holiday.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reduce a label to its [`CanonicalKey`].
///
/// The steps run in a fixed order, each on the previous result. Note that
/// the `St` and `Pancake Day` tokens are inserted after lowercasing and so
/// keep their capitals.
pub fn canonicalise(label: &str) -> CanonicalKey {
    let canon = label.to_lowercase();
    let canon = canon.replace('&', "and");
    let canon = replace_whole_words(&canon, &SAINT, "St");
    // `st.` only stands alone when a word follows the dot directly
    let canon = replace_whole_words(&canon, &ST_DOTTED, "St");
    let canon = replace_whole_words(&canon, &ST_BARE, "St");
    let canon = canon.replace("shrove tuesday", "Pancake Day");

    let canon: String = canon
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();

    // Only word characters and whitespace remain, so whole-word removal is
    // token filtering, and joining collapses the whitespace.
    let words: Vec<&str> = canon
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word))
        .collect();

    CanonicalKey(words.join(" "))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_boundary(before: Option<char>, after: Option<char>) -> bool {
    before.is_some_and(is_word_char) != after.is_some_and(is_word_char)
}

/// Replace matches of `re` that start and end on a Unicode word boundary.
fn replace_whole_words(text: &str, re: &Regex, with: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    for m in re.find_iter(text) {
        let (head, tail) = (&text[..m.start()], &text[m.end()..]);
        let matched = m.as_str();
        if is_boundary(head.chars().next_back(), matched.chars().next())
            && is_boundary(matched.chars().next_back(), tail.chars().next())
        {
            out.push_str(&text[copied..m.start()]);
            out.push_str(with);
            copied = m.end();
        }
    }

    out.push_str(&text[copied..]);
    out
}

/// Split `"Name (Region)"` into `("Name", "Region")`.
///
/// Needs a space before the final `(` and a non-empty region with no `)`
/// in it. Anything else has no region suffix.
pub fn split_region_suffix(label: &str) -> Option<(&str, &str)> {
    let body = label.strip_suffix(')')?;
    let open = body.rfind(" (")?;
    let region = &body[open + 2..];
    if region.is_empty() || region.contains(')') {
        return None;
    }
    Some((body[..open].trim(), region.trim()))
}

/// Split a label into its name and trailing country code.
///
/// `(observed)` is not a country: it stays part of the name. Unbalanced or
/// empty suffixes leave the whole label as the name.
pub fn split_country_suffix(label: &str) -> (String, Option<String>) {
    let trimmed = label.trim();
    let parsed = trimmed.strip_suffix(')').and_then(|body| {
        let open = body.rfind('(')?;
        let code = body[open + 1..].trim();
        if code.is_empty() || code.contains(')') {
            return None;
        }
        Some((body[..open].trim(), code))
    });

    match parsed {
        Some((name, code)) if code.eq_ignore_ascii_case("observed") => {
            (format!("{} (observed)", name), None)
        }
        Some((name, code)) => (name.to_string(), Some(code.to_string())),
        None => (trimmed.to_string(), None),
    }
}

/// Collapse stacked `observed, observed` suffixes into one `(observed)`.
pub fn normalise_observed(label: &str) -> String {
    let label = OBSERVED_STACK.replace_all(label, "observed");
    OBSERVED_TRAILING
        .replace_all(&label, "(observed)")
        .into_owned()
}
