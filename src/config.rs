use crate::error::{Result, ScrapeError};
use crate::models::Experience;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable naming an optional JSON settings file
pub const CONFIG_ENV: &str = "VACANCY_SCOUT_CONFIG";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

/// Keyword vocabulary matched by substring against page text.
///
/// Entries are unique ignoring case; the first spelling wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary(Vec<String>);

impl Vocabulary {
    pub fn entries(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Vocabulary {
    fn from(words: Vec<String>) -> Self {
        let mut entries: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let lowered = word.to_lowercase();
            if !entries.iter().any(|e| e.to_lowercase() == lowered) {
                entries.push(word);
            }
        }
        Self(entries)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.0
    }
}

impl From<&[&str]> for Vocabulary {
    fn from(words: &[&str]) -> Self {
        words.iter().map(|w| w.to_string()).collect::<Vec<_>>().into()
    }
}

/// Maps a set of keyword synonyms to one canonical level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceRule {
    pub level: Experience,
    pub keywords: Vec<String>,
}

impl ExperienceRule {
    fn new(level: Experience, keywords: &[&str]) -> Self {
        Self {
            level,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Immutable run configuration, shared by reference with every component
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root, e.g. `https://jobs.dou.ua/`
    pub base_url: String,
    /// Search term sent as the `search` query parameter
    pub search: String,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    pub tags: Vocabulary,
    pub technologies: Vocabulary,
    pub remote_keywords: Vec<String>,
    pub part_time_keywords: Vec<String>,
    /// Checked in order; the first rule with a matching keyword wins
    pub experience_rules: Vec<ExperienceRule>,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Pretty JSON dump of all records, written next to the CSV when set
    pub json_snapshot: Option<PathBuf>,
    pub max_concurrent_requests: usize,
    /// Upper bound on "load more" rounds
    pub max_pages: u32,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let headers = [
            ("Host", "jobs.dou.ua"),
            ("User-Agent", DEFAULT_USER_AGENT),
            ("Referer", "https://jobs.dou.ua/"),
            ("Accept-Language", "en-US,en;q=0.9"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let tags: &[&str] = &[
            "Backend",
            "Back-End",
            "Frontend",
            "Front-End",
            "Scarping",
            "Machine Learning",
        ];
        let technologies: &[&str] = &[
            "Django",
            "Flask",
            "Pytorch",
            "TensorFlow",
            "AWS",
            "Postgres",
            "Apache",
            "Redis",
            "C#",
            "Fastapi",
            "Flask",
            "SQLAlchemy",
            "Azure",
            "Playwright",
            "RabbitMQ",
            "Airflow",
        ];

        Self {
            base_url: "https://jobs.dou.ua/".to_string(),
            search: "python".to_string(),
            headers,
            tags: tags.into(),
            technologies: technologies.into(),
            remote_keywords: vec!["віддален".to_string(), "remote".to_string()],
            part_time_keywords: vec![
                "part time".to_string(),
                "part-time".to_string(),
                "погодинно".to_string(),
            ],
            experience_rules: vec![
                ExperienceRule::new(Experience::Trainee, &["Trainee", "Стажер"]),
                ExperienceRule::new(Experience::Junior, &["Junior"]),
                ExperienceRule::new(Experience::Middle, &["Middle"]),
                ExperienceRule::new(Experience::Senior, &["Senior"]),
                ExperienceRule::new(
                    Experience::TechLead,
                    &["Tech Lead", "Techlead", "Teamlead"],
                ),
            ],
            output_dir: PathBuf::from(".."),
            output_file: "vacancies_data.csv".to_string(),
            json_snapshot: None,
            max_concurrent_requests: 16,
            max_pages: 500,
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Validated settings from the file named by `VACANCY_SCOUT_CONFIG`, or the defaults
    pub fn load() -> Result<Self> {
        let settings = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("search term is empty"));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ScrapeError::InvalidConfig(
                "max_concurrent_requests must be at least 1",
            ));
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::InvalidConfig("max_pages must be at least 1"));
        }
        Url::parse(&self.base_url)?;
        Ok(())
    }

    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// `{base}/vacancies/?search={query}`
    pub fn search_url(&self) -> Result<Url> {
        self.endpoint("/vacancies/")
    }

    /// `{base}/vacancies/xhr-load/?search={query}`
    pub fn load_more_url(&self) -> Result<Url> {
        self.endpoint("/vacancies/xhr-load/")
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base()?.join(path)?;
        url.query_pairs_mut().append_pair("search", &self.search);
        Ok(url)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
