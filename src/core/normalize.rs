use std::collections::HashSet;

/// Lowercase a free-text label and strip every non-alphanumeric character
///
/// "CS-501" and "cs 501" both normalize to "cs501". Case folding and the
/// alphanumeric test follow Unicode rules, so "Ökonomie" keeps its "ö".
/// Lowercasing runs first: it can emit combining marks ("İ" becomes "i"
/// plus U+0307) that the filter must still see.
#[inline]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Containment match on normalized labels
///
/// Matches when both normalized strings are non-empty and either one
/// contains the other. This is a heuristic: "CS" does not match
/// "Computer Science".
#[inline]
pub fn labels_match(a: &str, b: &str) -> bool {
    normalized_match(&normalize(a), &normalize(b))
}

/// Same as [`labels_match`] for inputs that are already normalized
#[inline]
pub fn normalized_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Number of `viewer` labels that match at least one of `candidate`'s
///
/// Each viewer label counts at most once, however many candidate labels
/// it matches.
pub fn count_shared(viewer: &[String], candidate: &[String]) -> usize {
    let candidate: Vec<String> = candidate
        .iter()
        .map(|c| normalize(c))
        .filter(|c| !c.is_empty())
        .collect();

    viewer
        .iter()
        .map(|v| normalize(v))
        .filter(|v| candidate.iter().any(|c| normalized_match(v, c)))
        .count()
}

/// Parse a comma-separated availability string into trimmed, lowercased slots
pub fn parse_slots(availability: &str) -> HashSet<String> {
    availability
        .split(',')
        .map(|slot| slot.trim().to_lowercase())
        .filter(|slot| !slot.is_empty())
        .collect()
}

/// Size of the intersection of two parsed availability strings
pub fn shared_slots(a: &str, b: &str) -> usize {
    let a = parse_slots(a);
    let b = parse_slots(b);
    a.intersection(&b).count()
}
