//! Vendor-prefix helpers shared across the engine

/// Browser prefixes recognized on property names and keyframe at-rules.
pub const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-moz-", "-ms-", "-o-"];

/// Transform property names matched when prefix handling is on.
pub const PREFIXED_TRANSFORM_PROPS: [&str; 5] =
    ["transform", "-webkit-transform", "-moz-transform", "-ms-transform", "-o-transform"];

/// Strip a known vendor prefix from a property name, if present.
///
/// ```
/// use transform3d::util::strip_vendor_prefix;
///
/// assert_eq!(strip_vendor_prefix("-webkit-transform"), "transform");
/// assert_eq!(strip_vendor_prefix("transform"), "transform");
/// assert_eq!(strip_vendor_prefix("-x-unknown"), "-x-unknown");
/// ```
pub fn strip_vendor_prefix(prop: &str) -> &str {
    for prefix in VENDOR_PREFIXES {
        if let Some(bare) = prop.strip_prefix(prefix) {
            return bare;
        }
    }
    prop
}

/// Whether `prop` is a transform property the engine rewrites, given the
/// prefix-handling setting.
pub fn is_transform_prop(prop: &str, handle_prefixes: bool) -> bool {
    if handle_prefixes {
        PREFIXED_TRANSFORM_PROPS.iter().any(|p| prop.eq_ignore_ascii_case(p))
    } else {
        prop.eq_ignore_ascii_case("transform")
    }
}
