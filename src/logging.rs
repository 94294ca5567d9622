//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// How chatty the CLI is, from `-q` / `-v` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    fn to_filter(self) -> String {
        format!("codeport={}", self.to_level())
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flag-derived
/// filter.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.to_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity >= Verbosity::Trace)
        .with_line_number(verbosity >= Verbosity::Trace)
        .compact();

    let result = if verbosity <= Verbosity::Normal {
        subscriber.without_time().try_init()
    } else {
        subscriber.try_init()
    };

    // A subscriber may already be installed (e.g. by a test harness).
    if let Err(e) = result {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
