//! Rewrite orchestration over a stylesheet tree
//!
//! The engine walks rules, rewrites transform declarations, injects the
//! configured compositing hints, then walks `@keyframes` at-rules (bare and
//! vendor-prefixed), skipping blocks whose animation names are only
//! referenced by excluded selectors. A run never aborts: per-value failures
//! become warnings in the diagnostics sink and the original text stays in
//! place.

use std::collections::HashSet;

use crate::animations::extract_animation_names;
use crate::exclude::{is_excluded, ExcludePattern};
use crate::rewrite::Rewriter;
use crate::stylesheet::{Node, Rule, Stylesheet};
use crate::util::{is_transform_prop, strip_vendor_prefix};

/// Engine options. Every field has a documented default; construct with
/// struct-update syntax over `Options::default()`.
#[derive(Debug, Clone)]
pub struct Options {
    /// Selectors matching any entry are skipped entirely. Default: empty.
    pub exclude_selectors: Vec<ExcludePattern>,
    /// Inject `will-change: transform` after a successful rewrite.
    /// Default: true.
    pub add_will_change: bool,
    /// Only inject the hint when the rule already shows animation or
    /// transition usage. Default: true.
    pub smart_will_change: bool,
    /// Inject `transform-style: preserve-3d`. Default: false.
    pub add_preserve3d: bool,
    /// Inject `backface-visibility: hidden`. Default: false.
    pub add_backface_visibility: bool,
    /// Inject `transform-origin: 50% 50%`. Default: false.
    pub add_transform_origin: bool,
    /// Rewrite transform values inside keyframe blocks. Default: true.
    pub process_keyframes: bool,
    /// Memoize rewrite results for the engine's lifetime. Default: true.
    pub enable_cache: bool,
    /// Also match vendor-prefixed transform properties and keyframe
    /// at-rule names. Default: true.
    pub handle_prefixes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            exclude_selectors: Vec::new(),
            add_will_change: true,
            smart_will_change: true,
            add_preserve3d: false,
            add_backface_visibility: false,
            add_transform_origin: false,
            process_keyframes: true,
            enable_cache: true,
            handle_prefixes: true,
        }
    }
}

/// Non-fatal warning sink for a run.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

/// The rewrite engine. Owns its options and its value cache, so separate
/// engines never contaminate each other.
///
/// # Example
///
/// ```
/// use transform3d::engine::{Diagnostics, Engine, Options};
/// use transform3d::stylesheet::parse;
///
/// let mut result = parse(".box { transform: translateX(10px); }");
/// let mut diags = Diagnostics::new();
/// Engine::new(Options::default()).process(&mut result.stylesheet, &mut diags);
///
/// assert!(result.stylesheet.to_css().contains("translate3d(10px, 0, 0)"));
/// assert!(diags.is_empty());
/// ```
#[derive(Debug)]
pub struct Engine {
    options: Options,
    rewriter: Rewriter,
}

impl Engine {
    pub fn new(options: Options) -> Self {
        let rewriter = Rewriter::new(options.enable_cache);
        Self { options, rewriter }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Rewrite the stylesheet in place.
    ///
    /// Infallible by contract: every per-value failure is reported through
    /// `diags` and leaves that value untouched. Partial results stay in
    /// place; there is no rollback.
    pub fn process(&mut self, sheet: &mut Stylesheet, diags: &mut Diagnostics) {
        let excluded_animations = self.collect_excluded_animations(sheet);

        for rule in sheet.rules_mut() {
            if is_excluded(&rule.selector, &self.options.exclude_selectors) {
                continue;
            }

            let animated =
                !self.options.smart_will_change || has_animation_or_transition(rule);

            for i in 0..rule.decls.len() {
                if !is_transform_prop(&rule.decls[i].prop, self.options.handle_prefixes) {
                    continue;
                }
                if self.rewrite_decl_value(rule, i, diags) {
                    self.inject_decorations(rule, animated);
                }
            }
        }

        if self.options.process_keyframes {
            self.process_keyframes(sheet, &excluded_animations, diags);
        }
    }

    /// Animation names referenced by excluded rules, gathered before the
    /// main pass so their keyframe blocks can be skipped by name.
    fn collect_excluded_animations(&self, sheet: &Stylesheet) -> HashSet<String> {
        let mut names = HashSet::new();
        if !self.options.process_keyframes || self.options.exclude_selectors.is_empty() {
            return names;
        }
        for rule in sheet.rules() {
            if is_excluded(&rule.selector, &self.options.exclude_selectors) {
                names.extend(extract_animation_names(rule));
            }
        }
        names
    }

    fn process_keyframes(
        &mut self,
        sheet: &mut Stylesheet,
        excluded_animations: &HashSet<String>,
        diags: &mut Diagnostics,
    ) {
        for at_rule in sheet.keyframes_mut() {
            if at_rule.is_prefixed() && !self.options.handle_prefixes {
                continue;
            }
            if excluded_animations.contains(at_rule.params.trim()) {
                continue;
            }

            for node in &mut at_rule.nodes {
                let keyframe = match node {
                    Node::Rule(rule) => rule,
                    _ => continue,
                };
                for i in 0..keyframe.decls.len() {
                    if !is_transform_prop(&keyframe.decls[i].prop, self.options.handle_prefixes) {
                        continue;
                    }
                    // No decoration injection inside keyframe bodies
                    self.rewrite_decl_value(keyframe, i, diags);
                }
            }
        }
    }

    /// Rewrite one declaration's value in place. Returns true when the
    /// value actually changed.
    fn rewrite_decl_value(&mut self, rule: &mut Rule, i: usize, diags: &mut Diagnostics) -> bool {
        let original = rule.decls[i].value.clone();
        match self.rewriter.rewrite(&original) {
            Ok(rewritten) => {
                if rewritten != original {
                    rule.decls[i].value = rewritten;
                    true
                } else {
                    false
                }
            }
            Err(e) => {
                diags.warn(e.to_string());
                false
            }
        }
    }

    /// Append the configured sibling declarations, each only once.
    fn inject_decorations(&self, rule: &mut Rule, animated: bool) {
        if self.options.add_will_change && animated {
            let present = rule
                .decls
                .iter()
                .any(|d| d.prop.eq_ignore_ascii_case("will-change") && d.value.contains("transform"));
            if !present {
                rule.append("will-change", "transform");
            }
        }

        if self.options.add_preserve3d && !rule.has_prop("transform-style") {
            rule.append("transform-style", "preserve-3d");
        }

        if self.options.add_backface_visibility && !rule.has_prop("backface-visibility") {
            rule.append("backface-visibility", "hidden");
        }

        if self.options.add_transform_origin {
            let present = rule
                .decls
                .iter()
                .any(|d| strip_vendor_prefix(&d.prop).eq_ignore_ascii_case("transform-origin"));
            if !present {
                rule.append("transform-origin", "50% 50%");
            }
        }
    }
}

/// Whether a rule carries any `transition`/`animation`-family property,
/// bare or vendor-prefixed.
fn has_animation_or_transition(rule: &Rule) -> bool {
    rule.decls.iter().any(|d| {
        let bare = strip_vendor_prefix(&d.prop).to_ascii_lowercase();
        bare == "transition"
            || bare == "animation"
            || bare.starts_with("transition-")
            || bare.starts_with("animation-")
    })
}
