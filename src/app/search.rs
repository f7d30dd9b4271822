use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

pub(super) fn matching_names(names: &[&str], query: &str) -> Vec<bool> {
    let query = query.trim();
    if query.is_empty() {
        return vec![false; names.len()];
    }

    let matcher = SkimMatcherV2::default();
    names
        .iter()
        .map(|name| fuzzy_match_score(&matcher, name, query).is_some())
        .collect()
}
