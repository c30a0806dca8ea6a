//! End-to-end engine tests through the public API
//!
//! Each test parses CSS text, runs the engine, and checks the serialized
//! output, mirroring how the CLI drives the library.

use transform3d::engine::{Diagnostics, Engine, Options};
use transform3d::exclude::parse_patterns;
use transform3d::stylesheet::parse;

/// Parse, process, serialize.
fn process(css: &str, options: Options) -> (String, Diagnostics) {
    let mut parsed = parse(css);
    assert!(parsed.warnings.is_empty(), "fixture should parse cleanly: {:?}", parsed.warnings);
    let mut diags = Diagnostics::new();
    Engine::new(options).process(&mut parsed.stylesheet, &mut diags);
    (parsed.stylesheet.to_css(), diags)
}

fn process_default(css: &str) -> String {
    let (out, diags) = process(css, Options::default());
    assert!(diags.is_empty(), "unexpected warnings: {:?}", diags.warnings());
    out
}

fn exclude(entries: &[&str]) -> Options {
    let entries: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
    Options { exclude_selectors: parse_patterns(&entries).unwrap(), ..Options::default() }
}

#[test]
fn rewrites_every_legacy_function() {
    let cases = [
        ("translate(10px, 20px)", "translate3d(10px, 20px, 0)"),
        ("translate(10px)", "translate3d(10px, 0, 0)"),
        ("translateX(10px)", "translate3d(10px, 0, 0)"),
        ("translateY(20px)", "translate3d(0, 20px, 0)"),
        ("scale(1.5)", "scale3d(1.5, 1.5, 1)"),
        ("scale(2, 0.5)", "scale3d(2, 0.5, 1)"),
        ("scaleX(1.5)", "scale3d(1.5, 1, 1)"),
        ("scaleY(1.5)", "scale3d(1, 1.5, 1)"),
        ("rotate(45deg)", "rotate3d(0, 0, 1, 45deg)"),
        (
            "matrix(1, 0, 0, 1, 10, 20)",
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 10, 20, 0, 1)",
        ),
    ];

    for (input, expected) in cases {
        let out = process_default(&format!(".t {{ transform: {}; }}", input));
        assert!(
            out.contains(&format!("transform: {};", expected)),
            "expected '{}' for '{}', got:\n{}",
            expected,
            input,
            out
        );
    }
}

#[test]
fn composes_multiple_functions_in_order() {
    let out = process_default(".t { transform: translateX(10px) scale(1.5) rotate(45deg); }");
    assert!(out.contains(
        "transform: translate3d(10px, 0, 0) scale3d(1.5, 1.5, 1) rotate3d(0, 0, 1, 45deg);"
    ));
}

#[test]
fn already_3d_values_unchanged() {
    let css = ".t { transform: translate3d(10px, 20px, 0) scale3d(1, 1, 1); }";
    let out = process_default(css);
    assert!(out.contains("transform: translate3d(10px, 20px, 0) scale3d(1, 1, 1);"));
}

#[test]
fn calc_and_var_arguments_pass_through() {
    let out = process_default(
        ".t { transform: translateX(calc(10px + 5%)) scale(var(--scale)); }",
    );
    assert!(out.contains(
        "transform: translate3d(calc(10px + 5%), 0, 0) scale3d(var(--scale), var(--scale), 1);"
    ));
}

#[test]
fn deeply_nested_calc_captured_whole() {
    let out = process_default(".t { transform: scale(calc(var(--scale) * 1.2)) rotate(180deg); }");
    assert!(out.contains("scale3d(calc(var(--scale) * 1.2), calc(var(--scale) * 1.2), 1)"));
    assert!(out.contains("rotate3d(0, 0, 1, 180deg)"));
}

#[test]
fn exclusion_leaves_rule_unrewritten() {
    let css = ".test { transform: translateX(10px); }\n\
               .no-transform { transform: translateX(10px); }";
    let (out, diags) = process(css, exclude(&[".no-transform"]));
    assert!(diags.is_empty());
    assert!(out.contains(".test {\n  transform: translate3d(10px, 0, 0);\n}"));
    assert!(out.contains(".no-transform {\n  transform: translateX(10px);\n}"));
}

#[test]
fn exclusion_by_regex_pattern() {
    let css = ".test { transform: translateX(10px); }\n\
               .no-transform { transform: translateX(10px); }\n\
               .no-gpu { transform: translateX(10px); }";
    let (out, _) = process(css, exclude(&["/\\.no-/"]));
    assert!(out.contains(".test {\n  transform: translate3d(10px, 0, 0);\n}"));
    assert!(out.contains(".no-transform {\n  transform: translateX(10px);\n}"));
    assert!(out.contains(".no-gpu {\n  transform: translateX(10px);\n}"));
}

#[test]
fn keyframes_bodies_rewritten() {
    let css = "@keyframes move {\n  0% { transform: translateX(0); }\n  100% { transform: translateX(100px); }\n}";
    let out = process_default(css);
    assert!(out.contains("transform: translate3d(0, 0, 0);"));
    assert!(out.contains("transform: translate3d(100px, 0, 0);"));
}

#[test]
fn keyframes_of_excluded_selectors_skipped() {
    let css = ".no-transform { animation: move 1s; }\n\
               @keyframes move {\n  0% { transform: translateX(0); }\n  100% { transform: translateX(100px); }\n}";
    let (out, diags) = process(css, exclude(&[".no-transform"]));
    assert!(diags.is_empty());
    assert!(out.contains("transform: translateX(0);"));
    assert!(out.contains("transform: translateX(100px);"));
    assert!(!out.contains("translate3d"));
}

#[test]
fn keyframes_of_other_selectors_still_processed() {
    let css = ".no-transform { animation: still 1s; }\n\
               .mover { animation: move 1s; }\n\
               @keyframes still { to { transform: scale(2); } }\n\
               @keyframes move { to { transform: scale(3); } }";
    let (out, _) = process(css, exclude(&[".no-transform"]));
    assert!(out.contains("transform: scale(2);"));
    assert!(out.contains("transform: scale3d(3, 3, 1);"));
}

#[test]
fn smart_will_change_tracks_animation_usage() {
    let css = ".with-animation { transform: translateX(10px); transition: transform 0.3s; }\n\
               .no-animation { transform: translateX(10px); }";
    let out = process_default(css);

    let (with, without) = out.split_once(".no-animation").unwrap();
    assert!(with.contains("will-change: transform;"));
    assert!(with.contains("transform: translate3d(10px, 0, 0);"));
    assert!(without.contains("transform: translate3d(10px, 0, 0);"));
    assert!(!without.contains("will-change"));
}

#[test]
fn decorations_are_idempotent_across_runs() {
    let options = Options {
        smart_will_change: false,
        add_preserve3d: true,
        add_backface_visibility: true,
        add_transform_origin: true,
        ..Options::default()
    };

    let mut parsed = parse(".t { transform: translateX(10px); }");
    let mut diags = Diagnostics::new();

    let mut first_engine = Engine::new(options.clone());
    first_engine.process(&mut parsed.stylesheet, &mut diags);
    let first = parsed.stylesheet.to_css();

    // A fresh engine over the already-processed tree must change nothing
    let mut second_engine = Engine::new(options);
    second_engine.process(&mut parsed.stylesheet, &mut diags);
    let second = parsed.stylesheet.to_css();

    assert_eq!(first, second);
    assert_eq!(second.matches("will-change").count(), 1);
    assert_eq!(second.matches("transform-style").count(), 1);
    assert_eq!(second.matches("backface-visibility").count(), 1);
    assert_eq!(second.matches("transform-origin").count(), 1);
}

#[test]
fn cache_returns_identical_output() {
    let mut engine = Engine::new(Options::default());
    let mut diags = Diagnostics::new();

    let css = ".a { transform: translateX(10px); }\n.b { transform: translateX(10px); }";
    let mut parsed = parse(css);
    engine.process(&mut parsed.stylesheet, &mut diags);

    let out = parsed.stylesheet.to_css();
    let rewritten: Vec<&str> =
        out.lines().filter(|l| l.contains("translate3d")).map(|l| l.trim()).collect();
    assert_eq!(rewritten.len(), 2);
    assert_eq!(rewritten[0], rewritten[1]);
    assert!(diags.is_empty());
}

#[test]
fn prefixed_transform_properties_handled() {
    let out = process_default(".t { -webkit-transform: translateX(10px); }");
    assert!(out.contains("-webkit-transform: translate3d(10px, 0, 0);"));
}

#[test]
fn media_query_rules_participate() {
    let css = "@media (min-width: 600px) {\n  .t { transform: rotate(90deg); }\n}";
    let out = process_default(css);
    assert!(out.contains("transform: rotate3d(0, 0, 1, 90deg);"));
}

#[test]
fn malformed_value_warns_and_survives() {
    let css = ".t { transform: translate(10px !broken; color: red; }";
    let mut parsed = parse(css);
    let mut diags = Diagnostics::new();
    Engine::new(Options::default()).process(&mut parsed.stylesheet, &mut diags);

    assert!(!diags.is_empty());
    assert!(diags.warnings()[0].contains("translate(10px"));
}

#[test]
fn empty_stylesheet_is_fine() {
    let (out, diags) = process("", Options::default());
    assert_eq!(out, "");
    assert!(diags.is_empty());
}
