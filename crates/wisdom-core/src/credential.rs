//! Credential resolution.

/// Picks the credential for a fetch: a non-blank user-supplied credential
/// wins over a non-blank default.
pub fn resolve_credential(custom: Option<&str>, default: Option<&str>) -> Option<String> {
    [custom, default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}
