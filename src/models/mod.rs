use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical seniority levels, in classification priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Experience {
    Trainee,
    Junior,
    Middle,
    Senior,
    #[serde(rename = "Tech Lead")]
    TechLead,
}

impl Experience {
    pub fn label(&self) -> &'static str {
        match self {
            Experience::Trainee => "Trainee",
            Experience::Junior => "Junior",
            Experience::Middle => "Middle",
            Experience::Senior => "Senior",
            Experience::TechLead => "Tech Lead",
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Salary bounds as listed on the page.
///
/// Bounds keep the order in which the page lists them; nothing is swapped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Salary {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl Salary {
    pub fn from_numbers(numbers: &[u64]) -> Self {
        match *numbers {
            [single] => Self {
                min: Some(single),
                max: Some(single),
            },
            [min, max] => Self {
                min: Some(min),
                max: Some(max),
            },
            _ => Self::default(),
        }
    }
}

/// One listing's extracted attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vacancy {
    pub url: String,
    pub is_remote: bool,
    pub is_part_time: bool,
    pub experience: Option<Experience>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub technologies: Vec<String>,
    pub tags: Vec<String>,
    pub scraped_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_number_sets_both_bounds() {
        let salary = Salary::from_numbers(&[3000]);
        assert_eq!(salary.min, Some(3000));
        assert_eq!(salary.max, Some(3000));
    }

    #[test]
    fn two_numbers_keep_textual_order() {
        let salary = Salary::from_numbers(&[5000, 2000]);
        assert_eq!(salary.min, Some(5000));
        assert_eq!(salary.max, Some(2000));
    }

    #[test]
    fn no_numbers_or_too_many_leave_bounds_unset() {
        assert_eq!(Salary::from_numbers(&[]), Salary::default());
        assert_eq!(Salary::from_numbers(&[1, 2, 3]), Salary::default());
    }

    #[test]
    fn tech_lead_label_has_a_space() {
        assert_eq!(Experience::TechLead.to_string(), "Tech Lead");
        assert_eq!(
            serde_json::to_string(&Experience::TechLead).unwrap(),
            "\"Tech Lead\""
        );
    }
}
