use std::collections::HashSet;
use std::sync::Arc;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use euro_circles::pipeline::RenderedChart;

use super::super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

impl ViewModel {
    /// Scene indices of leaves whose country name fuzzy-matches the search box.
    pub(in crate::app) fn search_matches(
        &mut self,
        chart: &RenderedChart,
    ) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.generation == chart.generation
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = chart
            .scene
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_country())
            .filter(|(_, node)| fuzzy_match_score(&matcher, &node.name, query).is_some())
            .map(|(index, _)| index)
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            generation: chart.generation,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }
}
