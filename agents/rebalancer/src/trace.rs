use eyre::Result;
use serde::Deserialize;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    prelude::*,
    registry::LookupSpan,
    Layer,
};

/// Basic output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Multi-line, human readable
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// Newline delimited JSON
    Json,
}

impl Style {
    /// The fmt layer for this style. Output goes to stderr, stdout is kept for
    /// artifacts.
    fn layer<S>(self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self {
            Style::Pretty => layer.pretty().boxed(),
            Style::Compact => layer.compact().boxed(),
            Style::Json => layer.json().boxed(),
        }
    }
}

/// Logging level. A "higher level" means more will be logged.
#[derive(
    Default, Debug, Clone, Copy, Deserialize, PartialOrd, Ord, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Off
    Off = 0,
    /// Error
    Error = 1,
    /// Warn
    Warn = 2,
    /// Debug
    Debug = 3,
    /// Trace
    Trace = 5,
    /// Info
    #[serde(other)]
    #[default]
    Info = 4,
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> LevelFilter {
        match level {
            Level::Off => LevelFilter::OFF,
            Level::Error => LevelFilter::ERROR,
            Level::Warn => LevelFilter::WARN,
            Level::Debug => LevelFilter::DEBUG,
            Level::Trace => LevelFilter::TRACE,
            Level::Info => LevelFilter::INFO,
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TracingConfig {
    #[serde(default)]
    pub(crate) fmt: Style,
    #[serde(default)]
    pub(crate) level: Level,
}

impl TracingConfig {
    fn targets(&self) -> Targets {
        let mut target_layer = Targets::new().with_default(self.level);
        if self.level < Level::Trace {
            // only show these debug and trace logs at trace level
            target_layer = target_layer.with_target("hyper", Level::Info);
            target_layer = target_layer.with_target("reqwest", Level::Info);
            target_layer = target_layer.with_target("tendermint_rpc", Level::Info);
        }
        target_layer
    }

    /// Attempt to instantiate and register a tracing subscriber setup from
    /// settings.
    pub fn start_tracing(&self) -> Result<()> {
        let err_layer = tracing_error::ErrorLayer::default();

        let subscriber = tracing_subscriber::Registry::default()
            .with(self.targets())
            .with(self.fmt.layer())
            .with(err_layer);

        subscriber.try_init()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_reads_as_info() {
        let config: TracingConfig =
            serde_json::from_str(r#"{"fmt": "json", "level": "verbose"}"#).unwrap();

        assert_eq!(config.fmt, Style::Json);
        assert_eq!(config.level, Level::Info);
    }

    #[test]
    fn levels_are_ordered_by_verbosity() {
        assert!(Level::Off < Level::Error);
        assert!(Level::Error < Level::Warn);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Trace);
        assert_eq!(LevelFilter::from(Level::Warn), LevelFilter::WARN);
    }

    #[test]
    fn noisy_targets_are_capped_below_trace() {
        let config = TracingConfig {
            fmt: Style::Compact,
            level: Level::Debug,
        };

        let targets = config.targets();

        assert!(!targets.would_enable("tendermint_rpc::client", &tracing::Level::DEBUG));
        assert!(targets.would_enable("rebalancer", &tracing::Level::DEBUG));
    }
}
