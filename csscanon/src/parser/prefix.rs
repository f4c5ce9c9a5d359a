const VENDOR_PREFIXES: [&str; 4] = ["-o-", "-moz-", "-ms-", "-webkit-"];

/// Strips one vendor prefix (`-o-`, `-moz-`, `-ms-`, `-webkit-`), e.g.
/// `-webkit-keyframes` becomes `keyframes`.
pub fn strip_vendor_prefix(name: &str) -> &str {
    return VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name);
}

/// Strips a leading `min-` or `max-`, as used by media features.
pub fn strip_min_max_prefix(name: &str) -> &str {
    return name
        .strip_prefix("min-")
        .or_else(|| name.strip_prefix("max-"))
        .unwrap_or(name);
}
