//! Keyword classification over page text.
//!
//! Everything here works on plain strings so the heuristics can be checked
//! without any HTML. Matching is case-insensitive and a keyword matches when
//! it occurs inside a single text node.

use crate::config::{ExperienceRule, Vocabulary};
use crate::models::{Experience, Salary};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// ASCII digit groups, allowing `,`, space, NBSP or narrow NBSP as thousands separators
    static ref NUMBER: Regex = Regex::new(r"[0-9]+(?:[,\x{20}\x{a0}\x{202f}][0-9]{3})*").unwrap();
}

/// Lowercased text nodes of a page region
#[derive(Debug, Clone, Default)]
pub struct PageText {
    nodes: Vec<String>,
}

impl PageText {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let nodes = nodes
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .filter(|n| !n.trim().is_empty())
            .collect();
        Self { nodes }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.nodes.iter().any(|n| n.contains(&keyword))
    }

    pub fn contains_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.iter().any(|k| self.contains(k.as_ref()))
    }

    /// Vocabulary entries present in the text, in vocabulary order
    pub fn matching(&self, vocabulary: &Vocabulary) -> Vec<String> {
        vocabulary
            .entries()
            .iter()
            .filter(|entry| self.contains(entry))
            .cloned()
            .collect()
    }
}

/// First rule (in table order) with any keyword present in the text
pub fn classify_experience(text: &PageText, rules: &[ExperienceRule]) -> Option<Experience> {
    rules
        .iter()
        .find(|rule| text.contains_any(&rule.keywords))
        .map(|rule| rule.level)
}

/// All integers in a salary fragment, thousands separators removed.
///
/// `None` when some number does not fit in a `u64`.
pub fn salary_numbers(text: &str) -> Option<Vec<u64>> {
    NUMBER
        .find_iter(text)
        .map(|m| {
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .collect()
}

/// Salary bounds of a fragment; unreadable numbers leave both bounds unset
pub fn parse_salary(text: &str) -> Salary {
    match salary_numbers(text) {
        Some(numbers) => Salary::from_numbers(&numbers),
        None => {
            debug!("Ignoring unreadable salary text: {}", text);
            Salary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn text(nodes: &[&str]) -> PageText {
        PageText::new(nodes.iter().copied())
    }

    #[test]
    fn keywords_match_ignoring_case() {
        let page = text(&["Fully REMOTE position"]);
        assert!(page.contains("remote"));
        assert!(page.contains("Remote"));
        assert!(!page.contains("office"));
    }

    #[test]
    fn cyrillic_keywords_match_ignoring_case() {
        let settings = Settings::default();
        let page = text(&["Можлива Віддалена робота"]);
        assert!(page.contains_any(&settings.remote_keywords));
        assert!(!page.contains_any(&settings.part_time_keywords));

        let page = text(&["Оплата ПОГОДИННО"]);
        assert!(page.contains_any(&settings.part_time_keywords));
    }

    #[test]
    fn keyword_must_sit_inside_one_node() {
        let page = text(&["part", "time"]);
        assert!(!page.contains("part time"));
    }

    #[test]
    fn experience_follows_rule_priority_not_page_order() {
        let settings = Settings::default();
        let page = text(&["We need a Senior engineer", "or a strong Middle one"]);
        assert_eq!(
            classify_experience(&page, &settings.experience_rules),
            Some(Experience::Middle)
        );
    }

    #[test]
    fn experience_synonyms_map_to_canonical_levels() {
        let settings = Settings::default();
        let rules = &settings.experience_rules;
        assert_eq!(
            classify_experience(&text(&["Looking for a Teamlead"]), rules),
            Some(Experience::TechLead)
        );
        assert_eq!(
            classify_experience(&text(&["techlead wanted"]), rules),
            Some(Experience::TechLead)
        );
        assert_eq!(
            classify_experience(&text(&["Стажер Python"]), rules),
            Some(Experience::Trainee)
        );
        assert_eq!(classify_experience(&text(&["Python developer"]), rules), None);
    }

    #[test]
    fn matching_follows_vocabulary_order() {
        let settings = Settings::default();
        let page = text(&["Stack: Redis, AWS and Django; flask for admin"]);
        assert_eq!(
            page.matching(&settings.technologies),
            vec!["Django", "Flask", "AWS", "Redis"]
        );
    }

    #[test]
    fn matching_only_returns_vocabulary_entries() {
        let settings = Settings::default();
        let page = text(&["Rust, Go, Kubernetes"]);
        assert!(page.matching(&settings.technologies).is_empty());

        let page = text(&["Backend team, machine learning platform"]);
        assert_eq!(
            page.matching(&settings.tags),
            vec!["Backend", "Machine Learning"]
        );
    }

    #[test]
    fn salary_single_number() {
        let salary = parse_salary("до $4500");
        assert_eq!(salary.min, Some(4500));
        assert_eq!(salary.max, Some(4500));
    }

    #[test]
    fn salary_range_keeps_textual_order() {
        let salary = parse_salary("$2500–3500");
        assert_eq!((salary.min, salary.max), (Some(2500), Some(3500)));

        let salary = parse_salary("$6000–4000");
        assert_eq!((salary.min, salary.max), (Some(6000), Some(4000)));
    }

    #[test]
    fn salary_thousands_separators_are_removed() {
        assert_eq!(salary_numbers("$1,500–2,000"), Some(vec![1500, 2000]));
        assert_eq!(
            salary_numbers("40\u{a0}000 – 60 000 грн"),
            Some(vec![40000, 60000])
        );
    }

    #[test]
    fn salary_without_numbers_is_unset() {
        assert_eq!(parse_salary("за домовленістю"), Salary::default());
    }

    #[test]
    fn salary_above_u32_range_is_kept() {
        let salary = parse_salary("up to 5000000000 UAH");
        assert_eq!(salary.min, Some(5_000_000_000));
        assert_eq!(salary.max, Some(5_000_000_000));
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        assert_eq!(salary_numbers("$２５００"), Some(vec![]));
        assert_eq!(parse_salary("$２５００"), Salary::default());
        assert_eq!(parse_salary("$٢٥٠٠–3000"), Salary::from_numbers(&[3000]));
    }

    #[test]
    fn salary_beyond_u64_is_unset() {
        assert_eq!(salary_numbers("99999999999999999999999"), None);
        assert_eq!(parse_salary("$99999999999999999999999"), Salary::default());
    }
}
