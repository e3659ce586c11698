use slog::{Drain, Level, Logger};
use time::{format_description, OffsetDateTime};

pub struct TermLogFormat<D>
where
    D: slog_term::Decorator,
{
    decorator: D,
}

impl<D: slog_term::Decorator> TermLogFormat<D> {
    pub fn new(decorator: D) -> TermLogFormat<D> {
        TermLogFormat { decorator }
    }
}

impl<D: slog_term::Decorator> slog::Drain for TermLogFormat<D> {
    type Ok = ();
    type Err = std::io::Error;

    fn log(
        &self,
        record: &slog::Record<'_>,
        values: &slog::OwnedKVList,
    ) -> std::result::Result<Self::Ok, Self::Err> {
        self.decorator.with_record(record, values, |decorator| {
            if record.level() <= slog::Level::Warning {
                decorator.start_level()?;
                write!(decorator, "{}: ", record.level().as_str())?;
                // start_whitespace resets to normal coloring after printing the level
                decorator.start_whitespace()?;
            }

            decorator.start_msg()?;
            write!(decorator, "{}", record.msg())?;

            decorator.start_whitespace()?;
            writeln!(decorator)?;

            decorator.flush()?;
            Ok(())
        })
    }
}

/// Map `-v`/`-q` counts to a level. `None` silences everything.
pub(crate) fn log_level(verbose: u8, quiet: u8) -> Option<Level> {
    match i16::from(verbose) - i16::from(quiet) {
        i16::MIN..=-4 => None,
        -3 => Some(Level::Critical),
        -2 => Some(Level::Error),
        -1 => Some(Level::Warning),
        0 => Some(Level::Info),
        1 => Some(Level::Debug),
        _ => Some(Level::Trace),
    }
}

pub(crate) fn new_logger(level: Option<Level>) -> Logger {
    let Some(level) = level else {
        return Logger::root(slog::Discard, slog::o!());
    };
    let decorator = slog_term::TermDecorator::new().build();
    let drain = TermLogFormat::new(decorator).fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, slog::o!())
}

/// Render nanoseconds since the epoch as a UTC timestamp.
pub(crate) fn format_expiration(expiration: u64) -> anyhow::Result<String> {
    let expiration = OffsetDateTime::from_unix_timestamp_nanos(i128::from(expiration))?;
    let timestamp_format =
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second] UTC")?;
    Ok(expiration.format(&timestamp_format)?)
}
