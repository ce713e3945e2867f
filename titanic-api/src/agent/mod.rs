//! Keyword-routed query agent.
//!
//! Questions are matched against ordered keyword tables: the outer table
//! picks a topic handler, each handler runs its own phrase cascade. First
//! match wins at every level, so table order is part of the contract
//! ("average" matches before "ages", "percentage" before anything else).
//! Routing is deterministic: the same question over the same dataset always
//! produces the same answer.

mod handlers;

use crate::dataset::Dataset;
use crate::response::Answer;

/// Topic a question is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Percentage,
    Count,
    Average,
    Chart,
    ColumnAnalysis,
}

/// Outer routing table: any keyword hit selects the topic, in order.
/// Substring matching is deliberate ("how many people" hits "how many",
/// "percentages" hits "percentage").
const TOPIC_RULES: &[(&[&str], Topic)] = &[
    (&["percentage", "%"], Topic::Percentage),
    (&["count", "how many", "number"], Topic::Count),
    (&["average", "mean", "fare"], Topic::Average),
    (&["histogram", "distribution", "ages"], Topic::Chart),
];

/// Route a question to its topic. Unmatched questions fall through to
/// column analysis.
pub fn route(question: &str) -> Topic {
    let q = question.to_lowercase();
    for (keywords, topic) in TOPIC_RULES {
        if keywords.iter().any(|k| q.contains(k)) {
            return *topic;
        }
    }
    Topic::ColumnAnalysis
}

/// Answer a question against the dataset.
///
/// Never fails: statistics errors and unparseable questions become answer
/// text, so the caller always gets something to show the user.
pub fn answer(dataset: &Dataset, question: &str) -> Answer {
    let topic = route(question);
    tracing::debug!(?topic, question, "Routed question");

    let q = question.to_lowercase();
    match topic {
        Topic::Percentage => handlers::percentage(dataset, &q),
        Topic::Count => handlers::count(dataset, &q),
        Topic::Average => handlers::average(dataset, &q),
        Topic::Chart => handlers::chart(dataset, &q),
        Topic::ColumnAnalysis => handlers::column_analysis(dataset, &q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_percentage() {
        assert_eq!(route("What percentage of passengers were male?"), Topic::Percentage);
        assert_eq!(route("what % survived"), Topic::Percentage);
    }

    #[test]
    fn test_route_count() {
        assert_eq!(route("How many passengers embarked from each port?"), Topic::Count);
        assert_eq!(route("Count the survivors"), Topic::Count);
        assert_eq!(route("the NUMBER of women aboard"), Topic::Count);
    }

    #[test]
    fn test_route_average() {
        assert_eq!(route("What was the average ticket fare?"), Topic::Average);
        assert_eq!(route("mean age of passengers"), Topic::Average);
        // "fare" alone is enough to select the average handler
        assert_eq!(route("fare?"), Topic::Average);
    }

    #[test]
    fn test_route_chart() {
        assert_eq!(route("Show me a histogram of passenger ages"), Topic::Chart);
        assert_eq!(route("age distribution please"), Topic::Chart);
    }

    #[test]
    fn test_route_fallback() {
        assert_eq!(route("Tell me about the sex column"), Topic::ColumnAnalysis);
        assert_eq!(route("Tell me a joke"), Topic::ColumnAnalysis);
    }

    #[test]
    fn test_route_precedence() {
        // A question hitting both tables goes to the earlier one.
        assert_eq!(
            route("What percentage is the average fare of the total?"),
            Topic::Percentage
        );
        // "average" contains no count keyword, "how many" wins over "ages".
        assert_eq!(route("How many different ages are there?"), Topic::Count);
    }

    #[test]
    fn test_route_is_case_insensitive() {
        assert_eq!(route("WHAT PERCENTAGE SURVIVED?"), Topic::Percentage);
    }
}
