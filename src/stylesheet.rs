//! Stylesheet tree, lenient CSS parser, and serializer
//!
//! The tree is the engine's input contract: rules expose a selector and
//! ordered declaration children, at-rules expose a name, a params string,
//! and nested nodes; declarations support in-place value replacement and
//! sibling appends. The parser is lenient: malformed input produces
//! warnings with line numbers and the salvageable remainder, never a hard
//! abort. The serializer writes the mutated tree back out.
//!
//! Only the structure the engine consumes is modeled. Values, selectors,
//! and at-rule params are opaque text.

use crate::util::strip_vendor_prefix;
use serde::Serialize;

/// A `prop: value` declaration. The value is raw text, `!important` and
/// all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self { prop: prop.into(), value: value.into() }
    }
}

/// A style rule: selector plus ordered declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rule {
    pub selector: String,
    pub decls: Vec<Declaration>,
}

impl Rule {
    /// Append a declaration after the existing ones.
    pub fn append(&mut self, prop: impl Into<String>, value: impl Into<String>) {
        self.decls.push(Declaration::new(prop, value));
    }

    /// Whether any declaration has exactly this property name.
    pub fn has_prop(&self, prop: &str) -> bool {
        self.decls.iter().any(|d| d.prop.eq_ignore_ascii_case(prop))
    }
}

/// An at-rule: `@name params { nodes }` or `@name params;`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub nodes: Vec<Node>,
    pub has_block: bool,
}

impl AtRule {
    /// Whether this is a `@keyframes` at-rule, bare or vendor-prefixed.
    pub fn is_keyframes(&self) -> bool {
        strip_vendor_prefix(&self.name).eq_ignore_ascii_case("keyframes")
    }

    /// Whether the at-rule name carries a vendor prefix.
    pub fn is_prefixed(&self) -> bool {
        strip_vendor_prefix(&self.name).len() != self.name.len()
    }
}

/// A node in a stylesheet or at-rule body. Bare declarations appear in
/// declaration-holding at-rules such as `@font-face`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Decl(Declaration),
}

/// The parsed stylesheet root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    /// Iterate rules outside keyframe bodies, descending into grouping
    /// at-rules like `@media`.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        let mut out = Vec::new();
        collect_rules(&self.nodes, &mut out);
        out.into_iter()
    }

    /// Mutable variant of [`Stylesheet::rules`].
    pub fn rules_mut(&mut self) -> Vec<&mut Rule> {
        let mut out = Vec::new();
        collect_rules_mut(&mut self.nodes, &mut out);
        out
    }

    /// Mutable references to every `@keyframes` at-rule (bare or
    /// prefixed), wherever it sits in the tree.
    pub fn keyframes_mut(&mut self) -> Vec<&mut AtRule> {
        let mut out = Vec::new();
        collect_keyframes_mut(&mut self.nodes, &mut out);
        out
    }

    /// Serialize the tree back to CSS text.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_node(&mut out, node, 0);
        }
        out
    }
}

fn collect_rules<'a>(nodes: &'a [Node], out: &mut Vec<&'a Rule>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => out.push(rule),
            Node::AtRule(at) if !at.is_keyframes() => collect_rules(&at.nodes, out),
            _ => {}
        }
    }
}

fn collect_rules_mut<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut Rule>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => out.push(rule),
            Node::AtRule(at) if !at.is_keyframes() => collect_rules_mut(&mut at.nodes, out),
            _ => {}
        }
    }
}

fn collect_keyframes_mut<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut AtRule>) {
    for node in nodes {
        if let Node::AtRule(at) = node {
            if at.is_keyframes() {
                out.push(at);
            } else {
                collect_keyframes_mut(&mut at.nodes, out);
            }
        }
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Rule(rule) => {
            out.push_str(&format!("{}{} {{\n", indent, rule.selector));
            for decl in &rule.decls {
                out.push_str(&format!("{}  {}: {};\n", indent, decl.prop, decl.value));
            }
            out.push_str(&format!("{}}}\n", indent));
        }
        Node::AtRule(at) => {
            let head = if at.params.is_empty() {
                format!("@{}", at.name)
            } else {
                format!("@{} {}", at.name, at.params)
            };
            if !at.has_block {
                out.push_str(&format!("{}{};\n", indent, head));
                return;
            }
            out.push_str(&format!("{}{} {{\n", indent, head));
            for inner in &at.nodes {
                write_node(out, inner, depth + 1);
            }
            out.push_str(&format!("{}}}\n", indent));
        }
        Node::Decl(decl) => {
            out.push_str(&format!("{}{}: {};\n", indent, decl.prop, decl.value));
        }
    }
}

/// A warning generated while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

impl Warning {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(), line }
    }
}

/// Result of parsing CSS text.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub stylesheet: Stylesheet,
    pub warnings: Vec<Warning>,
}

/// Parse CSS text leniently.
///
/// Comments are stripped; strings and parenthesized groups are opaque, so
/// `;`, `{`, and `}` inside them never terminate anything. Anything
/// unparseable is skipped with a warning carrying its line number.
///
/// # Example
///
/// ```
/// use transform3d::stylesheet::parse;
///
/// let result = parse(".box { transform: translateX(10px); }");
/// assert!(result.warnings.is_empty());
/// let rule = result.stylesheet.rules().next().unwrap();
/// assert_eq!(rule.selector, ".box");
/// assert_eq!(rule.decls[0].value, "translateX(10px)");
/// ```
pub fn parse(input: &str) -> ParseResult {
    let mut parser = Parser { chars: input.chars().collect(), pos: 0, line: 1, warnings: Vec::new() };
    let nodes = parser.parse_nodes(true);
    ParseResult { stylesheet: Stylesheet { nodes }, warnings: parser.warnings }
}

/// What ended a prelude scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delim {
    BlockOpen,
    Semicolon,
    BlockClose,
    Eof,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    warnings: Vec<Warning>,
}

impl Parser {
    fn warn(&mut self, message: impl Into<String>) {
        let line = self.line;
        self.warnings.push(Warning::new(message, line));
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    /// Skip whitespace and `/* ... */` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek2() == Some('*') => {
                    self.bump();
                    self.bump();
                    self.skip_comment_body();
                }
                _ => return,
            }
        }
    }

    fn skip_comment_body(&mut self) {
        let open_line = self.line;
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return;
                }
                Some(_) => {}
                None => {
                    self.warnings
                        .push(Warning::new("unterminated comment", open_line));
                    return;
                }
            }
        }
    }

    /// Read text up to the next structural delimiter at top nesting level.
    fn read_prelude(&mut self) -> (String, Delim) {
        let mut text = String::new();
        let mut paren_depth = 0usize;
        let mut in_string: Option<char> = None;

        loop {
            // Comments can appear mid-prelude
            if in_string.is_none() && self.peek() == Some('/') && self.peek2() == Some('*') {
                self.bump();
                self.bump();
                self.skip_comment_body();
                continue;
            }

            let c = match self.peek() {
                Some(c) => c,
                None => return (text, Delim::Eof),
            };

            if let Some(quote) = in_string {
                self.bump();
                text.push(c);
                if c == '\\' {
                    if let Some(escaped) = self.bump() {
                        text.push(escaped);
                    }
                } else if c == quote {
                    in_string = None;
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    in_string = Some(c);
                    self.bump();
                    text.push(c);
                }
                '(' => {
                    paren_depth += 1;
                    self.bump();
                    text.push(c);
                }
                ')' => {
                    paren_depth = paren_depth.saturating_sub(1);
                    self.bump();
                    text.push(c);
                }
                '{' if paren_depth == 0 => {
                    self.bump();
                    return (text, Delim::BlockOpen);
                }
                ';' if paren_depth == 0 => {
                    self.bump();
                    return (text, Delim::Semicolon);
                }
                '}' if paren_depth == 0 => {
                    // Delimiter left for the caller
                    return (text, Delim::BlockClose);
                }
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }
    }

    /// Parse nodes until end of input (`top`) or the closing `}` of the
    /// current block.
    fn parse_nodes(&mut self, top: bool) -> Vec<Node> {
        let mut nodes = Vec::new();

        loop {
            self.skip_trivia();

            if self.peek().is_none() {
                if !top {
                    self.warn("unclosed block at end of input");
                }
                return nodes;
            }

            if self.peek() == Some('}') {
                self.bump();
                if top {
                    self.warn("unexpected '}'");
                    continue;
                }
                return nodes;
            }

            let (prelude, delim) = self.read_prelude();
            let prelude = prelude.trim().to_string();

            match delim {
                Delim::BlockOpen => {
                    if prelude.is_empty() {
                        self.warn("block with empty prelude, skipping");
                        self.parse_nodes(false);
                    } else if let Some(at) = prelude.strip_prefix('@') {
                        let (name, params) = split_at_rule(at);
                        let inner = self.parse_nodes(false);
                        nodes.push(Node::AtRule(AtRule {
                            name,
                            params,
                            nodes: inner,
                            has_block: true,
                        }));
                    } else {
                        let body = self.parse_nodes(false);
                        let mut rule = Rule { selector: prelude, decls: Vec::new() };
                        for inner in body {
                            match inner {
                                Node::Decl(d) => rule.decls.push(d),
                                Node::Rule(r) => {
                                    self.warn(format!(
                                        "nested rule '{}' inside '{}' ignored",
                                        r.selector, rule.selector
                                    ));
                                }
                                Node::AtRule(a) => {
                                    self.warn(format!(
                                        "at-rule '@{}' inside '{}' ignored",
                                        a.name, rule.selector
                                    ));
                                }
                            }
                        }
                        nodes.push(Node::Rule(rule));
                    }
                }
                Delim::Semicolon | Delim::BlockClose | Delim::Eof => {
                    if !prelude.is_empty() {
                        if let Some(node) = self.statement_node(&prelude) {
                            nodes.push(node);
                        }
                    }
                    if delim == Delim::BlockClose {
                        // Re-enters the loop, which consumes the '}'
                        continue;
                    }
                    if delim == Delim::Eof {
                        if !top {
                            self.warn("unclosed block at end of input");
                        }
                        return nodes;
                    }
                }
            }
        }
    }

    /// A prelude terminated by `;` (or end of block): a declaration or a
    /// blockless at-rule.
    fn statement_node(&mut self, prelude: &str) -> Option<Node> {
        if let Some(at) = prelude.strip_prefix('@') {
            let (name, params) = split_at_rule(at);
            return Some(Node::AtRule(AtRule { name, params, nodes: Vec::new(), has_block: false }));
        }

        match prelude.split_once(':') {
            Some((prop, value)) if !prop.trim().is_empty() => Some(Node::Decl(Declaration::new(
                prop.trim(),
                value.trim(),
            ))),
            _ => {
                self.warn(format!("expected declaration, got '{}'", prelude));
                None
            }
        }
    }
}

/// Split `keyframes move` into name and params.
fn split_at_rule(text: &str) -> (String, String) {
    match text.split_once(char::is_whitespace) {
        Some((name, params)) => (name.to_string(), params.trim().to_string()),
        None => (text.to_string(), String::new()),
    }
}
