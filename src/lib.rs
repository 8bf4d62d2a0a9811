//! Huddle library exports for testing

use clap::ValueEnum;

pub mod adapter;
pub mod core;
pub mod media;
pub mod transport;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Replay a scripted meeting (built-in or `--seed-file`)
    #[default]
    Seed,
    /// Nobody else joins
    Offline,
}

impl TransportKind {
    /// Name used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Seed => "seed",
            TransportKind::Offline => "offline",
        }
    }
}
