use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use working_time::{
    DateRange, HolidayCalendar, InMemoryWorkingTimeStore, PersonId, Settings,
    SettingsJurisdictionProvider, WorkingTimeCalendar, WorkingTimeCalendarService,
    WorkingTimeConfiguration, load_configurations_from_csv, load_configurations_from_json,
    load_holidays_from_json,
};

/// Print half-day working-time calendars for persons.
#[derive(Debug, Parser)]
#[command(name = "working-time", version)]
struct Args {
    /// Working-time records, `.json` snapshot or `.csv`
    #[arg(long)]
    configurations: PathBuf,

    /// Public holidays as JSON
    #[arg(long)]
    holidays: Option<PathBuf>,

    /// Default jurisdiction; read from settings when omitted
    #[arg(long)]
    jurisdiction: Option<String>,

    /// Calendar year to compute
    #[arg(long, conflicts_with_all = ["from", "to"])]
    year: Option<i32>,

    /// First date (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Person ids; all persons of the records file when omitted
    #[arg(long = "person")]
    persons: Vec<i64>,

    /// Build calendars in parallel
    #[arg(long)]
    parallel: bool,
}

fn load_configurations(
    path: &Path,
) -> Result<Vec<WorkingTimeConfiguration>, Box<dyn std::error::Error>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let configurations = if is_csv {
        load_configurations_from_csv(path)?
    } else {
        load_configurations_from_json(path)?
    };
    Ok(configurations)
}

fn render_calendar_as_text_table(calendar: &WorkingTimeCalendar) -> String {
    let header = ["date", "weekday", "morning", "noon", "day_length"];
    let rows: Vec<[String; 5]> = calendar
        .iter()
        .map(|(date, info)| {
            [
                date.to_string(),
                date.weekday().to_string(),
                info.morning().as_str().to_string(),
                info.noon().as_str().to_string(),
                info.day_length().to_string(),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.len());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[&str]| {
        let mut line = String::from("|");
        for (ci, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&header[..]));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&render_row(&cells[..]));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let range = match (args.year, args.from, args.to) {
        (Some(year), _, _) => DateRange::for_year(year).ok_or("year out of range")?,
        (None, Some(from), Some(to)) => DateRange::new(from, to),
        _ => {
            let year = chrono::Local::now().year();
            DateRange::for_year(year).ok_or("year out of range")?
        }
    };

    let settings = match args.jurisdiction {
        Some(code) => Settings::default().with_default_jurisdiction(code.as_str()),
        None => Settings::load()?,
    };

    let configurations = load_configurations(&args.configurations)?;
    let persons: Vec<PersonId> = if args.persons.is_empty() {
        configurations
            .iter()
            .map(|c| c.person)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        args.persons.into_iter().map(PersonId).collect()
    };

    let holidays = match &args.holidays {
        Some(path) => load_holidays_from_json(path)?,
        None => HolidayCalendar::new(),
    };

    let store = InMemoryWorkingTimeStore::new(configurations)?;
    let service = WorkingTimeCalendarService::new(
        store,
        holidays,
        SettingsJurisdictionProvider::new(settings.clone()),
    )
    .with_settings(&settings);
    let service = if args.parallel { service.parallel(true) } else { service };

    let calendars = service.get_working_times_by_persons(&persons, &range)?;

    for person in &persons {
        let Some(calendar) = calendars.get(person) else {
            continue;
        };
        println!("Person {person} ({} .. {})", range.start_date(), range.end_date());
        if calendar.is_empty() {
            println!("No working time configured.\n");
            continue;
        }
        println!("{}", render_calendar_as_text_table(calendar));
        println!("Working time: {}\n", calendar.working_time(&range));
    }
    Ok(())
}
