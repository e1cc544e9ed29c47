use log::{Level, LevelFilter, Log, Metadata, Record};
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static LOGGER: CliLogger = CliLogger;

/// The logger behind the library's `log` output.
///
/// Everything goes to stderr so that tag listings on stdout stay clean
/// enough to pipe. Warnings from the codec (tolerated malformations,
/// skipped files) show up here.
pub struct CliLogger;

impl CliLogger {
    pub fn setup() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Info);
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (color, label) = match record.level() {
            Level::Error => (Color::Red, "error"),
            Level::Warn => (Color::Yellow, "warning"),
            _ => (Color::Cyan, "info"),
        };

        let mut err = StandardStream::stderr(ColorChoice::Auto);

        // Failing to write a log line shouldn't take the program down.
        let _ = err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(err, "{}: ", label);
        let _ = err.reset();
        let _ = writeln!(err, "{}", record.args());
    }

    fn flush(&self) {}
}
