use crate::error::Result;
use crate::models::Vacancy;
use std::path::Path;

/// Column order of the CSV file
pub const HEADER: [&str; 8] = [
    "url",
    "experience",
    "salary_max",
    "salary_min",
    "is_remote",
    "is_part_time",
    "technologies",
    "tags",
];

fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// `['Django', 'AWS']`
fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn format_number(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn record(vacancy: &Vacancy) -> [String; 8] {
    [
        vacancy.url.clone(),
        vacancy
            .experience
            .map(|e| e.to_string())
            .unwrap_or_default(),
        format_number(vacancy.salary_max),
        format_number(vacancy.salary_min),
        format_bool(vacancy.is_remote).to_string(),
        format_bool(vacancy.is_part_time).to_string(),
        format_list(&vacancy.technologies),
        format_list(&vacancy.tags),
    ]
}

/// Write the header and one row per vacancy, replacing any existing file
pub fn write_csv(vacancies: &[Vacancy], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for vacancy in vacancies {
        writer.write_record(record(vacancy))?;
    }
    writer.flush()?;
    Ok(())
}

/// Pretty JSON array of all vacancies
pub fn write_json_snapshot(vacancies: &[Vacancy], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(vacancies)?;
    std::fs::write(path, json)?;
    Ok(())
}
