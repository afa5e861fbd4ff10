use std::sync::LazyLock;

use regex::Regex;

static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+|\D+").expect("static pattern is valid"));

/// One run of a natural sort key. Numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortPart {
    Number(u128),
    Text(String),
}

/// Sort key where "Epic 2" comes before "Epic 10" and case is ignored.
pub fn natural_sort_key(text: &str) -> Vec<SortPart> {
    RUNS.find_iter(text)
        .map(|run| {
            let run = run.as_str();
            if run.as_bytes()[0].is_ascii_digit() {
                SortPart::Number(run.parse().unwrap_or(u128::MAX))
            } else {
                SortPart::Text(run.to_lowercase())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_runs() {
        assert_eq!(
            natural_sort_key("Epic 10b"),
            vec![
                SortPart::Text("epic ".to_string()),
                SortPart::Number(10),
                SortPart::Text("b".to_string()),
            ]
        );
        assert_eq!(natural_sort_key(""), vec![]);
    }

    #[test]
    fn orders_numbers_numerically() {
        let mut summaries = vec!["10. Reporting", "2. Checkout", "1. Login", "b extra", "A extra"];
        summaries.sort_by_key(|summary| natural_sort_key(summary));
        assert_eq!(
            summaries,
            vec!["1. Login", "2. Checkout", "10. Reporting", "A extra", "b extra"]
        );
    }
}
