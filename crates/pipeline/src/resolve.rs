use crate::model::Row;

/// Resolve a canonical field against a row using an ordered candidate list
/// of historically-used header names.
///
/// The first candidate that matches any header wins, so list order encodes
/// priority (e.g. "Delegate" before "Crew Leader" for event years that used
/// both). Matching is case-insensitive and ignores stray whitespace that
/// export tools introduce around header text; when two columns both match a
/// candidate, the leftmost column wins. Returns the trimmed cell value, or
/// `""` when no candidate matches.
pub fn resolve<'r>(row: &'r Row, candidates: &[String]) -> &'r str {
    for candidate in candidates {
        let wanted = candidate.trim();
        for (header, value) in row.iter() {
            if header.trim().eq_ignore_ascii_case(wanted) {
                return value.trim();
            }
        }
    }
    ""
}

/// Whether any candidate matches any header in `headers`. Used for the
/// dataset-level required-column check before building records.
pub fn any_candidate_matches<'h, I>(headers: I, candidates: &[String]) -> bool
where
    I: IntoIterator<Item = &'h str>,
{
    let headers: Vec<&str> = headers.into_iter().collect();
    candidates.iter().any(|candidate| {
        let wanted = candidate.trim();
        headers
            .iter()
            .any(|h| h.trim().eq_ignore_ascii_case(wanted))
    })
}
