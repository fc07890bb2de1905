use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::aggregate::companies::CompanyOverview;
use crate::aggregate::jobs::JobRow;
use crate::aggregate::locations::LocationView;
use crate::aggregate::overview::Overview;
use crate::aggregate::requirements::Requirements;
use crate::aggregate::{Count, Measure};
use crate::company::CompanyMatch;
use crate::filter::FilterOptions;
use crate::ingest::locations::LocationLevel;
use crate::models::{RiskAssessment, RiskCategory};

/// Rows of a time series shown without `--verbose`.
const SERIES_PREVIEW: usize = 14;

pub fn banner(data_dir: &Path, jobs: usize, companies: usize) {
    println!(
        "\n {} v{}",
        "jobscope".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        " Data: {}  ({} jobs after filters, {} companies)\n",
        data_dir.display(),
        jobs,
        companies
    );
}

pub fn render_overview(view: &Overview, verbose: bool) {
    summary_box(&[
        ("Total jobs".to_string(), view.total_jobs.to_string()),
        (
            "Posting days".to_string(),
            view.postings_per_day.len().to_string(),
        ),
    ]);

    section("Job postings by date");
    let mut table = new_table(&["Date", "Postings", "Average salary"]);
    let days = tail(&view.postings_per_day, verbose);
    for day in days {
        let salary = view
            .salary_per_day
            .iter()
            .find(|s| s.date == day.date)
            .map(|s| money(s.avg_salary))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(day.date.to_string()),
            Cell::new(day.count).set_alignment(CellAlignment::Right),
            Cell::new(salary).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);

    section("Salary distribution");
    let mut table = new_table(&["Range", "Jobs"]);
    for bin in view.salary_histogram.iter().filter(|b| b.count > 0) {
        table.add_row(vec![
            Cell::new(format!("{} – {}", money(bin.lower), money(bin.upper))),
            Cell::new(bin.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);

    count_table("Seniority level", "Seniority", &view.seniority);
    count_table("Workplace", "Workplace", &view.workplace);
    count_table("Employment type", "Type", &view.employment_type);
    count_table("Job function", "Function", &view.job_function);
}

pub fn render_locations(view: &LocationView) {
    let place = match view.level {
        LocationLevel::State => "State",
        LocationLevel::City => "City",
    };

    section(&format!("Job density by {}", place.to_lowercase()));
    if view.density.is_empty() {
        println!(" No {}-level coordinates available.\n", place.to_lowercase());
    } else {
        let mut table = new_table(&[place, "Latitude", "Longitude", "Jobs"]);
        for p in &view.density {
            table.add_row(vec![
                Cell::new(&p.location),
                Cell::new(format!("{:.4}", p.latitude)),
                Cell::new(format!("{:.4}", p.longitude)),
                Cell::new(p.jobs).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}", table);
    }

    count_table("Top by job count", place, &view.top_by_jobs);
    measure_table("Top by average salary", place, "Average salary", &view.top_by_salary, true);
    measure_table(
        "Top by job count, adjusted by population",
        place,
        "Adjusted jobs",
        &view.population_adjusted,
        false,
    );
    measure_table(
        "Top by average salary, adjusted by cost of living",
        place,
        "Adjusted salary",
        &view.cost_adjusted,
        true,
    );
}

pub fn render_requirements(view: &Requirements) {
    count_table("Top degrees", "Degree", &view.degrees);
    count_table("Top skills", "Skill", &view.skills);

    section("Minimum years of experience (0-20)");
    if view.experience.is_empty() {
        println!(" Experience data not available.\n");
        return;
    }
    let mut table = new_table(&["Years", "Jobs"]);
    for row in &view.experience {
        table.add_row(vec![
            Cell::new(row.years).set_alignment(CellAlignment::Right),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn render_companies(view: &CompanyOverview) {
    summary_box(&[(
        "Total companies".to_string(),
        view.total_companies.to_string(),
    )]);

    count_table("Industries", "Industry", &view.industries);

    section("Top companies by average salary (10+ postings)");
    if view.top_by_salary.is_empty() {
        println!(" Company average salary data not available.\n");
    } else {
        let mut table = new_table(&["Company", "Average salary", "Postings"]);
        for row in &view.top_by_salary {
            table.add_row(vec![
                Cell::new(&row.company),
                Cell::new(money(row.avg_salary)).set_alignment(CellAlignment::Right),
                Cell::new(row.postings).set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}", table);
    }

    count_table("Top companies by job count", "Company", &view.top_by_jobs);
    count_table("Top schools", "School", &view.top_schools);
    count_table("Top skills", "Skill", &view.top_skills);
    count_table(
        "Top companies hiring without experience",
        "Company",
        &view.newbie_friendly,
    );
    count_table(
        "Top companies hiring internship & entry level",
        "Company",
        &view.entry_level,
    );

    section("Companies founded per year (1900-present)");
    if view.founded_per_year.is_empty() {
        println!(" Founding data not available.\n");
        return;
    }
    let mut table = new_table(&["Year", "Companies"]);
    for row in &view.founded_per_year {
        table.add_row(vec![
            Cell::new(row.year),
            Cell::new(row.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn render_jobs(rows: &[JobRow]) {
    section(&format!("Jobs lookup ({} shown)", rows.len()));
    let mut table = new_table(&[
        "Title",
        "Company",
        "Location",
        "Posted",
        "Workplace",
        "Salary",
        "Seniority",
        "Type",
        "Function",
        "Risk",
        "Job URL",
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(opt(&row.title)),
            Cell::new(opt(&row.company)),
            Cell::new(opt(&row.location)),
            Cell::new(
                row.posted_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(opt(&row.workplace)),
            Cell::new(opt(&row.salary)),
            Cell::new(opt(&row.seniority_level)),
            Cell::new(opt(&row.employment_type)),
            Cell::new(opt(&row.job_function)),
            risk_cell(&row.risk),
            Cell::new(opt(&row.job_url)),
        ]);
    }

    println!("{}", table);
}

pub fn render_risk(name: &str, assessment: &RiskAssessment, suggestions: &[String]) {
    let mut table = new_table(&["Company", "Risk", "Explanation"]);
    table.add_row(vec![
        Cell::new(name),
        risk_cell(assessment),
        Cell::new(assessment.explanation),
    ]);
    println!("{}", table);

    if !suggestions.is_empty() {
        println!(" {} {}", "Did you mean:".bold(), suggestions.join(", "));
    }
}

pub fn render_lookup(query: &str, matches: &[CompanyMatch]) {
    if matches.is_empty() {
        println!(
            " {} No company resembles \"{}\".",
            "[NO MATCH]".yellow().bold(),
            query
        );
        return;
    }

    let mut table = new_table(&["Company", "Similarity", "Risk", "Explanation"]);
    for m in matches {
        table.add_row(vec![
            Cell::new(&m.name),
            Cell::new(format!("{:.2}", m.similarity)).set_alignment(CellAlignment::Right),
            risk_cell(&m.assessment),
            Cell::new(m.assessment.explanation),
        ]);
    }
    println!("{}", table);
}

pub fn render_filters(options: &FilterOptions) {
    let mut table = new_table(&["Filter", "Values"]);
    let range = options
        .date_range
        .map(|(lo, hi)| format!("{} to {}", lo, hi))
        .unwrap_or_else(|| "no dated postings".to_string());

    table.add_row(vec![Cell::new("--from / --to"), Cell::new(range)]);
    table.add_row(vec![Cell::new("--state"), Cell::new(options.states.join(", "))]);
    table.add_row(vec![
        Cell::new("--workplace"),
        Cell::new(options.workplaces.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("--seniority"),
        Cell::new(options.seniority_levels.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("--title"),
        Cell::new(options.job_titles.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("--function"),
        Cell::new(options.job_functions.join(", ")),
    ]);
    table.add_row(vec![
        Cell::new("--salary"),
        Cell::new(options.salary_bands.join(", ")),
    ]);
    println!("{}", table);
}

fn risk_cell(assessment: &RiskAssessment) -> Cell {
    let color = match assessment.category {
        RiskCategory::PotentialScam => Color::Red,
        RiskCategory::High => Color::Yellow,
        RiskCategory::Low => Color::Green,
        RiskCategory::NotInDatabase => Color::DarkGrey,
    };
    Cell::new(assessment.category.to_string())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_table(title: &str, label: &str, counts: &[Count]) {
    section(title);
    if counts.is_empty() {
        println!(" {} data not available.\n", label);
        return;
    }
    let mut table = new_table(&[label, "Count"]);
    for c in counts {
        table.add_row(vec![
            Cell::new(&c.label),
            Cell::new(c.count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

fn measure_table(title: &str, label: &str, value_label: &str, rows: &[Measure], as_money: bool) {
    section(title);
    if rows.is_empty() {
        println!(" {} data not available.\n", label);
        return;
    }
    let mut table = new_table(&[label, value_label]);
    for m in rows {
        let value = if as_money {
            money(m.value)
        } else {
            format!("{:.1}", m.value)
        };
        table.add_row(vec![
            Cell::new(&m.label),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn section(title: &str) {
    println!(" {}\n", title.bold());
}

fn summary_box(lines: &[(String, String)]) {
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48}  │", "SUMMARY".bold());
    for (label, value) in lines {
        println!(" │  {:<48}  │", format!("{:<20} : {}", label, value));
    }
    println!(" └────────────────────────────────────────────────────┘\n");
}

/// The last rows of a series, or all of them when verbose.
fn tail<T>(rows: &[T], verbose: bool) -> &[T] {
    if verbose || rows.len() <= SERIES_PREVIEW {
        rows
    } else {
        &rows[rows.len() - SERIES_PREVIEW..]
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Whole dollars with thousands separators.
fn money(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        format!("-${}", out)
    } else {
        format!("${}", out)
    }
}
