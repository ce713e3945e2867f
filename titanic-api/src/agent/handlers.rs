//! Topic handlers: one per routed topic, each with its own phrase cascade.
//!
//! Handlers take the lowercased question, consult the dataset, and always
//! return an [`Answer`]. Recoverable statistics errors are formatted into
//! the answer text; only the HTTP layer can mark a response unsuccessful.

use crate::dataset::{Dataset, Value};
use crate::response::Answer;
use crate::viz;
use titanic_common::Result;

/// A cell value usable in a static rule table.
#[derive(Debug, Clone, Copy)]
enum RuleValue {
    Text(&'static str),
    Int(i64),
}

impl RuleValue {
    fn to_value(self) -> Value {
        match self {
            Self::Text(s) => Value::text(s),
            Self::Int(v) => Value::Int(v),
        }
    }
}

/// Percentage cascade: (trigger phrases, column, cell value, answer label).
///
/// Order matters: "female" contains "male" and "women" contains "men", so
/// every phrasing of a female-passenger question hits the male rule first.
/// The female rule is shadowed and kept that way.
const PERCENTAGE_RULES: &[(&[&str], &str, RuleValue, &str)] = &[
    (&["male", "men"], "Sex", RuleValue::Text("male"), "male passengers"),
    (&["female", "women"], "Sex", RuleValue::Text("female"), "female passengers"),
    (&["survived"], "Survived", RuleValue::Int(1), "passengers who survived"),
    (&["died", "perished"], "Survived", RuleValue::Int(0), "passengers who died"),
    (&["first class", "1st class"], "Pclass", RuleValue::Int(1), "passengers in first class"),
    (&["second class", "2nd class"], "Pclass", RuleValue::Int(2), "passengers in second class"),
    (&["third class", "3rd class"], "Pclass", RuleValue::Int(3), "passengers in third class"),
    (
        &["southampton", "s port"],
        "Embarked",
        RuleValue::Text("S"),
        "passengers who embarked from Southampton",
    ),
    (
        &["cherbourg", "c port"],
        "Embarked",
        RuleValue::Text("C"),
        "passengers who embarked from Cherbourg",
    ),
    (
        &["queenstown", "q port"],
        "Embarked",
        RuleValue::Text("Q"),
        "passengers who embarked from Queenstown",
    ),
];

/// Aliases accepted for column names, in match order. "survived" last so
/// that questions mentioning other columns alongside survival resolve to
/// the named column.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("sex", "Sex"),
    ("gender", "Sex"),
    ("class", "Pclass"),
    ("ticket_class", "Pclass"),
    ("embarked", "Embarked"),
    ("port", "Embarked"),
    ("survived", "Survived"),
];

fn find_column(q: &str) -> Option<&'static str> {
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| q.contains(alias))
        .map(|(_, column)| *column)
}

/// Percentage of passengers with a characteristic.
pub fn percentage(dataset: &Dataset, q: &str) -> Answer {
    for (phrases, column, value, label) in PERCENTAGE_RULES {
        if phrases.iter().any(|p| q.contains(p)) {
            return match dataset.percentage_of(column, &value.to_value()) {
                Ok(pct) => {
                    Answer::text(format!("The percentage of {} was {:.2}%", label, pct))
                }
                Err(e) => Answer::text(format!("Error calculating percentage: {}", e)),
            };
        }
    }

    Answer::text(
        "I couldn't parse your request. Please ask about passenger percentages in a clearer way.",
    )
}

/// Count of passengers with a characteristic.
pub fn count(dataset: &Dataset, q: &str) -> Answer {
    match count_text(dataset, q) {
        Ok(Some(text)) => Answer::text(text),
        Ok(None) => Answer::text(
            "I couldn't parse your request. Please ask about passenger counts in a clearer way.",
        ),
        Err(e) => Answer::text(format!("Error counting passengers: {}", e)),
    }
}

fn count_text(dataset: &Dataset, q: &str) -> Result<Option<String>> {
    let text = if q.contains("embark") {
        if q.contains("southampton") || q.contains("s port") {
            let n = dataset.count_of("Embarked", &Value::text("S"))?;
            format!("{} passengers embarked from Southampton (S)", n)
        } else if q.contains("cherbourg") || q.contains("c port") {
            let n = dataset.count_of("Embarked", &Value::text("C"))?;
            format!("{} passengers embarked from Cherbourg (C)", n)
        } else if q.contains("queenstown") || q.contains("q port") {
            let n = dataset.count_of("Embarked", &Value::text("Q"))?;
            format!("{} passengers embarked from Queenstown (Q)", n)
        } else {
            let s = dataset.count_of("Embarked", &Value::text("S"))?;
            let c = dataset.count_of("Embarked", &Value::text("C"))?;
            let queenstown = dataset.count_of("Embarked", &Value::text("Q"))?;
            format!(
                "Passengers embarked from: Southampton: {}, Cherbourg: {}, Queenstown: {}",
                s, c, queenstown
            )
        }
    } else if q.contains("surviv") {
        let survived = dataset.count_of("Survived", &Value::Int(1))?;
        let died = dataset.count_of("Survived", &Value::Int(0))?;
        format!("Number of survivors: {}, Number who died: {}", survived, died)
    } else if q.contains("male") || q.contains("men") {
        // Same substring quirk as the percentage cascade: "female" and
        // "women" both land here, shadowing the branch below.
        let n = dataset.count_of("Sex", &Value::text("male"))?;
        format!("There were {} male passengers", n)
    } else if q.contains("women") {
        let n = dataset.count_of("Sex", &Value::text("female"))?;
        format!("There were {} female passengers", n)
    } else if q.contains("first class") || q.contains("1st class") {
        let n = dataset.count_of("Pclass", &Value::Int(1))?;
        format!("There were {} first-class passengers", n)
    } else if q.contains("second class") || q.contains("2nd class") {
        let n = dataset.count_of("Pclass", &Value::Int(2))?;
        format!("There were {} second-class passengers", n)
    } else if q.contains("third class") || q.contains("3rd class") {
        let n = dataset.count_of("Pclass", &Value::Int(3))?;
        format!("There were {} third-class passengers", n)
    } else {
        return Ok(None);
    };

    Ok(Some(text))
}

/// Average of a numeric column. Only age and fare are understood.
pub fn average(dataset: &Dataset, q: &str) -> Answer {
    // "average" itself contains "age", so an unspecific "what's the
    // average?" reports the average age.
    let result = if q.contains("age") {
        dataset
            .average("Age")
            .map(|v| format!("The average age of passengers was {:.2} years", v))
    } else if q.contains("fare") || q.contains("ticket price") || q.contains("price") {
        dataset
            .average("Fare")
            .map(|v| format!("The average ticket fare was ${:.2}", v))
    } else {
        return Answer::text(
            "I can calculate averages for age and fare. Please specify which one you're interested in.",
        );
    };

    match result {
        Ok(text) => Answer::text(text),
        Err(e) => Answer::text(format!("Error calculating average: {}", e)),
    }
}

/// Chart requests: survival-rate, pie, and bar charts when the question
/// names a groupable column, otherwise the age histogram.
pub fn chart(dataset: &Dataset, q: &str) -> Answer {
    if q.contains("surviv") {
        // Grouping survival by itself is meaningless; skip that alias.
        let group = COLUMN_ALIASES
            .iter()
            .find(|(alias, column)| *column != "Survived" && q.contains(alias))
            .map(|(_, column)| *column);
        if let Some(column) = group {
            return match viz::survival_rate_chart(dataset, column) {
                Ok(svg) => Answer::with_chart(
                    format!("I've created a chart of survival rates by {}.", column),
                    svg,
                ),
                Err(e) => Answer::text(format!("Error generating chart: {}", e)),
            };
        }
    }

    if q.contains("pie") {
        if let Some(column) = find_column(q) {
            return match viz::pie_chart(dataset, column) {
                Ok(svg) => {
                    Answer::with_chart(format!("I've created a pie chart of {}.", column), svg)
                }
                Err(e) => Answer::text(format!("Error generating chart: {}", e)),
            };
        }
    }

    if q.contains("bar") {
        if let Some(column) = find_column(q) {
            return match viz::bar_chart(dataset, column) {
                Ok(svg) => {
                    Answer::with_chart(format!("I've created a bar chart of {}.", column), svg)
                }
                Err(e) => Answer::text(format!("Error generating chart: {}", e)),
            };
        }
    }

    match viz::age_histogram(dataset) {
        Ok(svg) => Answer::with_chart(
            "I've created a histogram showing the distribution of passenger ages.",
            svg,
        ),
        Err(e) => Answer::text(format!("Error generating age histogram: {}", e)),
    }
}

/// Breakdown of a categorical column named (or aliased) in the question.
pub fn column_analysis(dataset: &Dataset, q: &str) -> Answer {
    let Some(column) = find_column(q) else {
        return Answer::text(
            "I couldn't identify which column you want analyzed. Try asking about sex, class, embarkation, or survival.",
        );
    };

    match breakdown(dataset, column) {
        Ok(text) => Answer::text(text),
        Err(e) => Answer::text(format!("Error analyzing column: {}", e)),
    }
}

fn breakdown(dataset: &Dataset, column: &str) -> Result<String> {
    let line = |value: Value, label: &str| -> Result<String> {
        let pct = dataset.percentage_of(column, &value)?;
        let n = dataset.count_of(column, &value)?;
        Ok(format!("{}: {:.2}% ({} passengers)", label, pct, n))
    };

    let text = match column {
        "Sex" => format!(
            "Passenger sex breakdown:\n{}\n{}",
            line(Value::text("male"), "Male")?,
            line(Value::text("female"), "Female")?,
        ),
        "Pclass" => format!(
            "Passenger class breakdown:\n{}\n{}\n{}",
            line(Value::Int(1), "First Class")?,
            line(Value::Int(2), "Second Class")?,
            line(Value::Int(3), "Third Class")?,
        ),
        "Embarked" => format!(
            "Port of embarkation breakdown:\n{}\n{}\n{}",
            line(Value::text("S"), "Southampton (S)")?,
            line(Value::text("C"), "Cherbourg (C)")?,
            line(Value::text("Q"), "Queenstown (Q)")?,
        ),
        "Survived" => format!(
            "Survival breakdown:\n{}\n{}",
            line(Value::Int(1), "Survived")?,
            line(Value::Int(0), "Died")?,
        ),
        other => serde_json::to_string(&dataset.column_stats(other)?)
            .map(|stats| format!("Statistics for {}: {}", other, stats))?,
    };

    Ok(text)
}

// ============================================================================
// Tests
// ============================================================================
