//! Animation name extraction from `animation` shorthand values
//!
//! `animation: slide 2s ease-in-out infinite` names one animation,
//! `slide`; the remaining tokens are durations and keywords. The tracker
//! splits a value on whitespace and commas and filters everything that
//! cannot be an animation identifier, leaving the candidate names.

use crate::stylesheet::Rule;
use crate::util::strip_vendor_prefix;

/// Keywords that can appear in `animation` shorthand but are never
/// animation names: CSS-wide keywords, iteration/direction/fill/play-state
/// values, and timing-function keywords.
const ANIMATION_KEYWORDS: [&str; 21] = [
    "none",
    "inherit",
    "initial",
    "unset",
    "infinite",
    "alternate",
    "forwards",
    "backwards",
    "both",
    "normal",
    "reverse",
    "alternate-reverse",
    "ease",
    "linear",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
    "paused",
    "running",
];

/// Whether a property (after vendor-prefix stripping) names animations.
pub fn is_animation_name_property(prop: &str) -> bool {
    let bare = strip_vendor_prefix(prop);
    bare.eq_ignore_ascii_case("animation") || bare.eq_ignore_ascii_case("animation-name")
}

/// Extract candidate animation names from a rule's `animation` and
/// `animation-name` declarations.
///
/// # Example
///
/// ```
/// use transform3d::animations::extract_animation_names;
/// use transform3d::stylesheet::parse;
///
/// let result = parse(".x { animation: slide 2s ease-in-out infinite; }");
/// let rule = result.stylesheet.rules().next().unwrap();
/// assert_eq!(extract_animation_names(rule), vec!["slide"]);
/// ```
pub fn extract_animation_names(rule: &Rule) -> Vec<String> {
    let mut names = Vec::new();

    for decl in &rule.decls {
        if !is_animation_name_property(&decl.prop) {
            continue;
        }
        for token in decl.value.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() || is_animation_keyword(token) || is_time_or_percentage(token) {
                continue;
            }
            names.push(token.to_string());
        }
    }

    names
}

fn is_animation_keyword(token: &str) -> bool {
    ANIMATION_KEYWORDS.iter().any(|k| token.eq_ignore_ascii_case(k))
}

/// Matches duration (`2s`, `150ms`), percentage, and bare-number tokens,
/// with an optional leading sign (negative delays are legal CSS).
fn is_time_or_percentage(token: &str) -> bool {
    let body = token.strip_prefix(|c| c == '-' || c == '+').unwrap_or(token);
    let digits = body
        .strip_suffix("ms")
        .or_else(|| body.strip_suffix('s'))
        .or_else(|| body.strip_suffix('%'))
        .unwrap_or(body);

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}
