//! Command-line presentation for the agenda engine.
//!
//! # Responsibility
//! - Open the configured database and render engine views as plain text.
//! - Keep the core free of any presentation concerns.

use agenda_core::db::open_db;
use agenda_core::{
    core_version, init_logging, AgendaConfig, AgendaItem, SqliteScheduler, TaskItem, WeeklyView,
};
use chrono::{Local, NaiveDate};
use log::info;
use std::error::Error;
use std::process::ExitCode;

const USAGE: &str = "usage: agenda_cli <week [YYYY-MM-DD] | day [YYYY-MM-DD] | upcoming [days] | counts | next-id | version>";

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let (command, argument) = match args.as_slice() {
        [] => ("week", None),
        [command] => (command.as_str(), None),
        [command, argument] => (command.as_str(), Some(argument.as_str())),
        _ => return Err(USAGE.into()),
    };

    if command == "version" {
        println!("agenda_core version={}", core_version());
        return Ok(());
    }

    let config = AgendaConfig::from_env()?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())?;
    }
    let conn = open_db(&config.db_path)?;
    let scheduler = SqliteScheduler::sqlite(&conn);
    info!("event=cli_command module=cli status=start command={command}");

    match command {
        "week" => print_week(&scheduler.generate_weekly_schedule(parse_date(argument)?)),
        "day" => {
            let date = parse_date(argument)?;
            println!("{date} ({})", date.format("%A"));
            print_items(&scheduler.agendas_for_day(date));
        }
        "upcoming" => {
            let days = match argument {
                Some(value) => value.parse()?,
                None => config.upcoming_days,
            };
            let today = Local::now().date_naive();
            print_tasks(&scheduler.upcoming_tasks(today, days));
        }
        "counts" => {
            for (label, count) in scheduler.agenda_counts().labeled() {
                println!("{label}: {count}");
            }
        }
        "next-id" => match scheduler.next_id()? {
            Some(id) => println!("{id}"),
            None => return Err("agenda id space exhausted".into()),
        },
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

fn parse_date(argument: Option<&str>) -> Result<NaiveDate, Box<dyn Error>> {
    match argument {
        Some(value) => Ok(NaiveDate::parse_from_str(value, "%Y-%m-%d")?),
        None => Ok(Local::now().date_naive()),
    }
}

fn print_week(view: &WeeklyView) {
    for (weekday, items) in view.iter() {
        println!("{weekday} {}", view.date_of(weekday));
        print_items(items);
    }
}

fn print_items(items: &[AgendaItem]) {
    if items.is_empty() {
        println!("  -");
    }
    for item in items {
        match item {
            AgendaItem::Task(task) => {
                println!("  [{}] {} (task #{})", task.priority, task.title, task.id)
            }
            AgendaItem::Regular(_) | AgendaItem::Special(_) => {
                let time = item
                    .time_of_day()
                    .map(|time| time.format("%H:%M").to_string())
                    .unwrap_or_default();
                println!("  {time} {} ({} #{})", item.title(), item.kind(), item.id());
            }
        }
    }
}

fn print_tasks(tasks: &[TaskItem]) {
    if tasks.is_empty() {
        println!("no upcoming tasks");
    }
    for task in tasks {
        println!("{} [{}] {}", task.due_date, task.priority, task.title);
    }
}
