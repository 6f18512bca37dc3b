use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Subscription services a family can be formed for.
///
/// The set and each service's capacity are fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Netflix,
    Grammarly,
    Spotify,
    Beeline,
    Gpt,
    YandexPlus,
}

/// Returned when a token does not name a known service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown service: {0}")]
pub struct UnknownService(pub String);

impl Service {
    /// Every service, in keyboard display order.
    pub const ALL: [Service; 6] = [
        Service::Netflix,
        Service::Grammarly,
        Service::Spotify,
        Service::Beeline,
        Service::Gpt,
        Service::YandexPlus,
    ];

    /// Number of members that completes a family.
    pub fn capacity(self) -> usize {
        match self {
            Service::Netflix => 4,
            Service::Grammarly => 5,
            Service::Spotify => 6,
            Service::Beeline => 5,
            Service::Gpt => 4,
            Service::YandexPlus => 8,
        }
    }

    /// Name as users type it in commands.
    pub fn name(self) -> &'static str {
        match self {
            Service::Netflix => "Netflix",
            Service::Grammarly => "Grammarly",
            Service::Spotify => "Spotify",
            Service::Beeline => "Beeline",
            Service::Gpt => "GPT",
            Service::YandexPlus => "Yandex+",
        }
    }
}

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .iter()
            .copied()
            .find(|service| service.name() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
