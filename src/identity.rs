use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Namespace assumed when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Path that marks the non-leveled wandering trader profession.
pub const WANDERING_TRADER_PATH: &str = "wandering_trader";

/// Namespaced resource identifier (e.g., `minecraft:librarian`).
///
/// Used for profession ids, trade kinds, and every item/structure/dimension
/// reference inside an entry. Parsing mirrors the host's resource-location
/// rules so a document that loads here also resolves on the host.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Build an identifier from parts, validating both segments.
    pub fn new(namespace: &str, path: &str) -> Option<Self> {
        if !valid_namespace(namespace) || !valid_path(path) {
            return None;
        }
        Some(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Identifier from compile-time literals already known to be valid.
    pub(crate) fn from_static(namespace: &'static str, path: &'static str) -> Self {
        debug_assert!(valid_namespace(namespace) && valid_path(path));
        Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        }
    }

    /// Parse `namespace:path` or a bare `path` (defaulting to `minecraft`).
    ///
    /// Returns `None` rather than erroring; callers attach the field name
    /// that held the bad value.
    pub fn try_parse(raw: &str) -> Option<Self> {
        match raw.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, raw),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// True for the reserved wandering trader profession, in any namespace.
    pub fn is_wandering_trader(&self) -> bool {
        self.path == WANDERING_TRADER_PATH
    }
}

fn valid_namespace(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'))
}

fn valid_path(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-' | '/')
        })
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::try_parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid identifier '{value}'")))
    }
}

/// Experience tier a profession's trades are grouped under.
///
/// The five labels are fixed; documents naming any other tier are rejected
/// as a whole.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Tier {
    Novice,
    Apprentice,
    Journeyman,
    Expert,
    Master,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Novice,
        Tier::Apprentice,
        Tier::Journeyman,
        Tier::Expert,
        Tier::Master,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Novice => "novice",
            Tier::Apprentice => "apprentice",
            Tier::Journeyman => "journeyman",
            Tier::Expert => "expert",
            Tier::Master => "master",
        }
    }

    /// Numeric level as the host counts it (1 through 5).
    pub fn level(&self) -> u8 {
        match self {
            Tier::Novice => 1,
            Tier::Apprentice => 2,
            Tier::Journeyman => 3,
            Tier::Expert => 4,
            Tier::Master => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}
