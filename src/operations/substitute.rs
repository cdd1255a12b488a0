//! Placeholder substitution engine
//!
//! Replaces `{{name}}` tokens in plain text. Runs over the raw configuration
//! before YAML parsing, so an override can land anywhere in the document,
//! and over the document templates during rendering.

use crate::error::GenError;
use core::borrow::Borrow;
use core::hash::Hash;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// `{{` + a non-empty run of non-brace characters + `}}`
#[expect(clippy::expect_used, reason = "Constant pattern")]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid"));

/// Replace every `{{name}}` whose name is in `vars` with its value
///
/// Unknown placeholders are left verbatim. Substituted values are not scanned
/// again, so a value containing `{{other}}` is inserted literally.
#[must_use]
#[inline]
pub fn substitute<K, V>(text: &str, vars: &HashMap<K, V>) -> String
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    if vars.is_empty() {
        return text.to_owned();
    }

    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            vars.get(&caps[1])
                .map_or_else(|| caps[0].to_owned(), |value| value.as_ref().to_owned())
        })
        .into_owned()
}

/// Like [`substitute`], but every placeholder must resolve
///
/// # Errors
///
/// Returns an error if:
/// - A placeholder names a variable that is not in `vars`
#[inline]
pub fn substitute_strict<K, V>(text: &str, vars: &HashMap<K, V>) -> Result<String, GenError>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = vars.get(name.as_str()).ok_or_else(|| {
            GenError::render(format!("Template references undefined field '{}'", name.as_str()))
        })?;

        out.push_str(&text[last..whole.start()]);
        out.push_str(value.as_ref());
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

/// Distinct placeholder names in `text`, in order of first appearance
#[must_use]
#[inline]
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_owned());
        }
    }
    names
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[test]
    fn replaces_known_placeholders() {
        let vars = vars(&[
            ("what_are_we", "music makers"),
            ("what_are_we_also", "dreamers of dreams"),
        ]);
        let out = substitute(
            "We are the {{what_are_we}}, And we are the {{what_are_we_also}}",
            &vars,
        );
        assert_eq!(out, "We are the music makers, And we are the dreamers of dreams");
    }

    #[test]
    fn leaves_unknown_placeholders_verbatim() {
        let vars = vars(&[("known", "yes")]);
        let out = substitute("{{known}} and {{unknown}}", &vars);
        assert_eq!(out, "yes and {{unknown}}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let vars = vars(&[("outer", "{{inner}}"), ("inner", "boom")]);
        assert_eq!(substitute("x={{outer}}", &vars), "x={{inner}}");
    }

    #[test]
    fn can_substitute_structure() {
        let vars = vars(&[("OWNERS", "[a@example.com, b@example.com]")]);
        let out = substitute("owners: {{OWNERS}}\n", &vars);
        assert_eq!(out, "owners: [a@example.com, b@example.com]\n");
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let vars = vars(&[("ID", "web")]);
        assert_eq!(substitute("{{ID}}-{{ID}}", &vars), "web-web");
    }

    #[test]
    fn empty_braces_are_not_placeholders() {
        let vars = vars(&[("", "nothing")]);
        assert_eq!(substitute("{{}}", &vars), "{{}}");
        assert!(placeholders("{{}}").is_empty());
    }

    #[test]
    fn strict_fails_on_unknown_placeholder() {
        let vars = vars(&[("id", "\"web\"")]);
        assert_eq!(substitute_strict("\"id\": {{id}}", &vars).unwrap(), "\"id\": \"web\"");

        let err = substitute_strict("{{id}} {{missing}}", &vars).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn placeholders_are_distinct_and_ordered() {
        assert_eq!(
            placeholders("{{b}} {{a}} {{b}} {{c}}"),
            vec!["b".to_owned(), "a".to_owned(), "c".to_owned()]
        );
    }
}
