mod app;
mod calendar;
mod context;
mod help;
mod list;
mod marking;
mod numerals;
mod theme;
use crate::app::App;
use crate::list::{CalendarList, ListOptions, DEFAULT_RANGE};
use crate::marking::{load_markings, MarkingMap, YMD_FMT};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime, Weekday};

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    marks_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    list: ListOptions,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('H') | Arg::Long("horizontal") => opts.list.horizontal = true,
                Arg::Long("hide-arrows") => opts.list.hide_arrows = true,
                Arg::Long("show-extra-days") => opts.list.hide_extra_days = false,
                Arg::Long("monday") => opts.list.first_day = Weekday::Monday,
                Arg::Long("numerals") => opts.list.numerals = parser.value()?.parse()?,
                Arg::Long("range") => {
                    let range = parser.value()?.parse()?;
                    opts.list.past_range = range;
                    opts.list.future_range = range;
                }
                Arg::Long("marks") => opts.marks_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let marked_dates = match opts.marks_file.as_deref() {
                    Some(path) => load_markings(path)
                        .with_context(|| format!("failed to load marks from {}", path.display()))?,
                    None => MarkingMap::new(),
                };
                log::info!("Starting calendar list at {}", opts.date.unwrap_or(today));
                let list = CalendarList::new(
                    opts.date.unwrap_or(today),
                    today,
                    opts.list,
                    marked_dates,
                );
                let app = App::new(list, today, opts.marks_file);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: calist [<options>] [YYYY-MM-DD]");
                println!();
                println!("Scrollable terminal calendar list with per-date markings");
                println!();
                println!("Options:");
                println!("  -H, --horizontal  Show one month at a time with arrows");
                println!("  --hide-arrows     Do not show the month arrows");
                println!("  --show-extra-days Show the days of adjacent months");
                println!("  --monday          Start weeks on Monday");
                println!("  --numerals <NAME> Digits to use: latin, arabic, or devanagari");
                println!("  --range <N>       Months to list before and after the start date [default: {DEFAULT_RANGE}]");
                println!("  --marks <FILE>    Read date markings from a TOML file");
                println!("  --log-file <FILE> Write log messages to FILE");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")?;
    Ok(handle)
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
