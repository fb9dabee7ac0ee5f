use itertools::Itertools;

use super::IgdbGame;

/// Canonical form of a game title used for matching and cache keys.
///
/// Lowercases, strips trademark/registration/copyright glyphs and collapses
/// whitespace. Diacritics are left untouched.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace(['\u{2122}', '\u{00AE}', '\u{00A9}'], "")
        .split_whitespace()
        .join(" ")
}

/// Selects the candidate that best matches `normalized_title`.
///
/// Preference order: exact normalized-name equality, then equality against a
/// candidate's parent title, then the first candidate as ranked by upstream
/// relevance. Ties break by list order.
pub fn best_match(normalized_title: &str, candidates: Vec<IgdbGame>) -> Option<IgdbGame> {
    if let Some(pos) = candidates
        .iter()
        .position(|game| normalize_title(&game.name) == normalized_title)
    {
        return candidates.into_iter().nth(pos);
    }

    if let Some(pos) = candidates.iter().position(|game| {
        game.parent_titles()
            .any(|title| normalize_title(title) == normalized_title)
    }) {
        return candidates.into_iter().nth(pos);
    }

    candidates.into_iter().next()
}
