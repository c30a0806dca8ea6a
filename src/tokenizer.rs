//! Function-call extraction from CSS value strings
//!
//! Locates `name(...)` occurrences inside a larger value and splits the
//! parenthesized content into top-level arguments. The scan tracks bracket
//! depth, so arguments may themselves contain nested calls like
//! `calc(var(--x) * 2)` at any depth; commas inside a nested group are
//! never split points.

/// A single matched function call inside a value string.
///
/// `start..end` are byte offsets covering the whole call, from the first
/// byte of the function name through the closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub start: usize,
    pub end: usize,
    /// Top-level arguments, trimmed of surrounding whitespace.
    pub args: Vec<String>,
}

/// Error for a function call whose parentheses never balance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unbalanced parentheses while matching {function}() in '{value}'")]
pub struct Unbalanced {
    pub function: String,
    pub value: String,
}

/// Find the next call to `name` in `value`, searching from byte offset
/// `from`.
///
/// The literal `(` must immediately follow the function name, so
/// `translate3d(` is never matched when scanning for `translate`, and
/// `translateX(` is never matched either.
///
/// Returns `Ok(None)` when no further occurrence exists, and an error when
/// an occurrence opens but never closes.
///
/// # Examples
///
/// ```
/// use transform3d::tokenizer::find_call;
///
/// let call = find_call("translate(10px, 20px)", "translate", 0)
///     .unwrap()
///     .unwrap();
/// assert_eq!(call.args, vec!["10px", "20px"]);
///
/// // Nested groups keep their commas
/// let call = find_call("translate(var(--x, 4px), 2px)", "translate", 0)
///     .unwrap()
///     .unwrap();
/// assert_eq!(call.args, vec!["var(--x, 4px)", "2px"]);
/// ```
pub fn find_call(value: &str, name: &str, from: usize) -> Result<Option<FunctionCall>, Unbalanced> {
    let needle = format!("{}(", name);
    let rel = match value[from..].find(&needle) {
        Some(p) => p,
        None => return Ok(None),
    };
    let start = from + rel;
    let content_start = start + needle.len();

    let content_len = match matching_paren(&value[content_start..]) {
        Some(len) => len,
        None => {
            return Err(Unbalanced { function: name.to_string(), value: value.to_string() });
        }
    };

    let content = &value[content_start..content_start + content_len];
    let end = content_start + content_len + 1; // past the closing paren

    Ok(Some(FunctionCall { start, end, args: split_args(content) }))
}

/// Return the byte length of the content before the parenthesis closing an
/// already-open group, or `None` if the group never closes.
///
/// The input starts just after an opening `(`.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split function-call content on top-level commas only.
///
/// Each argument is trimmed of surrounding whitespace; internal whitespace
/// is preserved byte-for-byte. All-whitespace content yields no arguments.
pub fn split_args(content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut piece_start = 0usize;

    for (i, c) in content.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(content[piece_start..i].trim().to_string());
                piece_start = i + 1;
            }
            _ => {}
        }
    }
    args.push(content[piece_start..].trim().to_string());

    args
}
