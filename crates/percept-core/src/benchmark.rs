/// Substring that marks a brand as the reference point when no benchmark is configured.
pub const IDEAL_MARKER: &str = "IDEAL";

/// Resolves the reference ("ideal") brand.
///
/// Order: exact case-insensitive match on `configured`, then the first brand whose name
/// contains `IDEAL` (case-insensitive), then none. A blank `configured` name is ignored.
pub fn resolve_benchmark<'a>(
    brand_names: impl IntoIterator<Item = &'a str>,
    configured: Option<&str>,
) -> Option<usize> {
    let names: Vec<String> = brand_names.into_iter().map(str::to_uppercase).collect();

    if let Some(wanted) = configured.filter(|s| !s.is_empty()) {
        let wanted = wanted.to_uppercase();
        if let Some(i) = names.iter().position(|n| *n == wanted) {
            return Some(i);
        }
        tracing::debug!(
            benchmark = %wanted,
            "configured benchmark not found; trying IDEAL marker"
        );
    }

    names.iter().position(|n| n.contains(IDEAL_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_marker_is_the_fallback() {
        let names = ["Acme", "IDEAL", "Zenith"];
        assert_eq!(resolve_benchmark(names, None), Some(1));
    }

    #[test]
    fn configured_name_beats_the_marker() {
        let names = ["Acme", "IDEAL", "Zenith"];
        assert_eq!(resolve_benchmark(names, Some("Zenith")), Some(2));
        assert_eq!(resolve_benchmark(names, Some("zenith")), Some(2));
    }

    #[test]
    fn unknown_configured_name_falls_back_to_marker() {
        let names = ["Acme", "my ideal brand"];
        assert_eq!(resolve_benchmark(names, Some("Nope")), Some(1));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(resolve_benchmark(["Acme", "Zenith"], Some("")), None);
        assert_eq!(resolve_benchmark(std::iter::empty(), None), None);
    }
}
