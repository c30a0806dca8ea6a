//! 2D-to-3D transform function rewriting
//!
//! Applies the conversion table below across a transform value string,
//! leaving all argument text byte-for-byte intact:
//!
//! | Legacy call            | 3D output                                    |
//! |------------------------|----------------------------------------------|
//! | `translate(x[, y])`    | `translate3d(x, y, 0)` (`y` defaults to `0`) |
//! | `translateX(x)`        | `translate3d(x, 0, 0)`                       |
//! | `translateY(y)`        | `translate3d(0, y, 0)`                       |
//! | `scale(x[, y])`        | `scale3d(x, y, 1)` (`y` defaults to `x`)     |
//! | `scaleX(x)`            | `scale3d(x, 1, 1)`                           |
//! | `scaleY(y)`            | `scale3d(1, y, 1)`                           |
//! | `rotate(a)`            | `rotate3d(0, 0, 1, a)`                       |
//! | `matrix(a,b,c,d,tx,ty)`| `matrix3d(a,b,0,0, c,d,0,0, 0,0,1,0, tx,ty,0,1)` |
//!
//! A call whose argument count does not fit its rule is left untouched.

use crate::tokenizer::{find_call, Unbalanced};
use std::collections::HashMap;

/// The legacy 2D transform functions the rewriter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformFunction {
    Translate,
    TranslateX,
    TranslateY,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    Matrix,
}

/// Rewrite pass order. Later passes run on the output of earlier ones, so a
/// value mixing several functions is composed correctly. `TranslateX` after
/// `Translate` is safe because matching requires the literal `(` right
/// after the bare name.
pub const REWRITE_ORDER: [TransformFunction; 8] = [
    TransformFunction::Translate,
    TransformFunction::TranslateX,
    TransformFunction::TranslateY,
    TransformFunction::Scale,
    TransformFunction::ScaleX,
    TransformFunction::ScaleY,
    TransformFunction::Rotate,
    TransformFunction::Matrix,
];

impl TransformFunction {
    /// The bare CSS function name this pass matches.
    pub fn name(&self) -> &'static str {
        match self {
            TransformFunction::Translate => "translate",
            TransformFunction::TranslateX => "translateX",
            TransformFunction::TranslateY => "translateY",
            TransformFunction::Scale => "scale",
            TransformFunction::ScaleX => "scaleX",
            TransformFunction::ScaleY => "scaleY",
            TransformFunction::Rotate => "rotate",
            TransformFunction::Matrix => "matrix",
        }
    }

    /// Build the 3D replacement for a matched call, or `None` when the
    /// argument count does not fit the rule (the call is then left as-is).
    fn expand(&self, args: &[String]) -> Option<String> {
        if args.iter().any(|a| a.is_empty()) {
            return None;
        }

        match self {
            TransformFunction::Translate => match args {
                [x] => Some(format!("translate3d({}, 0, 0)", x)),
                [x, y] => Some(format!("translate3d({}, {}, 0)", x, y)),
                _ => None,
            },
            TransformFunction::TranslateX => match args {
                [x] => Some(format!("translate3d({}, 0, 0)", x)),
                _ => None,
            },
            TransformFunction::TranslateY => match args {
                [y] => Some(format!("translate3d(0, {}, 0)", y)),
                _ => None,
            },
            TransformFunction::Scale => match args {
                [x] => Some(format!("scale3d({}, {}, 1)", x, x)),
                [x, y] => Some(format!("scale3d({}, {}, 1)", x, y)),
                _ => None,
            },
            TransformFunction::ScaleX => match args {
                [x] => Some(format!("scale3d({}, 1, 1)", x)),
                _ => None,
            },
            TransformFunction::ScaleY => match args {
                [y] => Some(format!("scale3d(1, {}, 1)", y)),
                _ => None,
            },
            TransformFunction::Rotate => match args {
                [a] => Some(format!("rotate3d(0, 0, 1, {})", a)),
                _ => None,
            },
            TransformFunction::Matrix => match args {
                [a, b, c, d, tx, ty] => Some(format!(
                    "matrix3d({}, {}, 0, 0, {}, {}, 0, 0, 0, 0, 1, 0, {}, {}, 0, 1)",
                    a, b, c, d, tx, ty
                )),
                _ => None,
            },
        }
    }
}

/// Error type for rewrite failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RewriteError {
    /// A matched call never closes its parentheses
    #[error(transparent)]
    Unbalanced(#[from] Unbalanced),
}

/// Value rewriter with an instance-owned memo cache.
///
/// The cache maps exact input strings to their rewritten output and lives
/// as long as the rewriter; it is a pure-function memo, so a hit always
/// equals rerunning the passes from scratch. A failed input is cached as
/// itself so repeated failures do not rescan. There is no eviction.
///
/// # Example
///
/// ```
/// use transform3d::rewrite::Rewriter;
///
/// let mut rewriter = Rewriter::new(true);
/// let out = rewriter.rewrite("translateX(10px) scale(1.5)").unwrap();
/// assert_eq!(out, "translate3d(10px, 0, 0) scale3d(1.5, 1.5, 1)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    cache: HashMap<String, String>,
    caching: bool,
}

impl Rewriter {
    /// Create a rewriter; `caching` enables the memo cache.
    pub fn new(caching: bool) -> Self {
        Self { cache: HashMap::new(), caching }
    }

    /// Number of memoized values.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Rewrite every legacy 2D transform call in `value`.
    ///
    /// Empty input comes back unchanged. On failure the error carries the
    /// offending value and the caller is expected to keep the original
    /// text; the original is memoized so the same input does not re-fail
    /// the scan.
    pub fn rewrite(&mut self, value: &str) -> Result<String, RewriteError> {
        if value.is_empty() {
            return Ok(String::new());
        }

        if self.caching {
            if let Some(hit) = self.cache.get(value) {
                return Ok(hit.clone());
            }
        }

        match rewrite_value(value) {
            Ok(out) => {
                if self.caching {
                    self.cache.insert(value.to_string(), out.clone());
                }
                Ok(out)
            }
            Err(e) => {
                if self.caching {
                    self.cache.insert(value.to_string(), value.to_string());
                }
                Err(e)
            }
        }
    }
}

/// Run all eight rewrite passes over `value`, uncached.
pub fn rewrite_value(value: &str) -> Result<String, RewriteError> {
    let mut result = value.to_string();
    for func in REWRITE_ORDER {
        result = rewrite_calls(&result, func)?;
    }
    Ok(result)
}

/// Rewrite every non-overlapping call to one function within `value`.
fn rewrite_calls(value: &str, func: TransformFunction) -> Result<String, RewriteError> {
    let name = func.name();
    let mut out = String::with_capacity(value.len() + 16);
    let mut cursor = 0usize;

    while let Some(call) = find_call(value, name, cursor)? {
        out.push_str(&value[cursor..call.start]);
        match func.expand(&call.args) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(&value[call.start..call.end]),
        }
        cursor = call.end;
    }
    out.push_str(&value[cursor..]);

    Ok(out)
}
