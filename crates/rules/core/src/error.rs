//! Common error infrastructure for rules-core.
//!
//! Each concern owns a small error enum (`ConfigError` for construction-time
//! mistakes, `DiceFormatError` for notation parsing, `LookupError` for table
//! lookups). They all implement [`RulesError`] so callers can classify a
//! failure without matching on every variant.
//!
//! Programmer errors that indicate a broken invariant (for example a
//! `Bounds` whose minimum exceeds its maximum) are not represented here: they
//! panic at the point of evaluation.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: user-supplied input was malformed (retry with new input)
/// - **Lookup**: a value fell outside a finite table (no extrapolation)
/// - **Configuration**: a value type was wired incorrectly at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Malformed input that the caller can report back to the user.
    ///
    /// Examples: badly formatted dice notation
    Validation,

    /// A lookup fell outside the domain of a fixed table.
    ///
    /// Examples: ability score outside the point-buy table
    Lookup,

    /// A construction-time mistake; the triggering operation should abort.
    ///
    /// Examples: ability-derived bonus without an ability key, unknown synergy skill
    Configuration,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Lookup => "lookup",
            Self::Configuration => "configuration",
        }
    }

    /// Returns true if the caller can meaningfully recover (e.g. re-prompt).
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation | Self::Lookup)
    }
}

/// Common trait for all rules-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Construction-time wiring mistakes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("ability-derived bonus has no ability key")]
    MissingAbility,

    #[error("unknown ability '{0}'")]
    UnknownAbility(String),

    #[error("skill '{skill}' lists unknown synergy skill '{synergy}'")]
    UnknownSynergy { skill: String, synergy: String },

    #[error("no skill named '{0}'")]
    UnknownSkill(String),
}

impl RulesError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAbility => "CONFIG_MISSING_ABILITY",
            Self::UnknownAbility(_) => "CONFIG_UNKNOWN_ABILITY",
            Self::UnknownSynergy { .. } => "CONFIG_UNKNOWN_SYNERGY",
            Self::UnknownSkill(_) => "CONFIG_UNKNOWN_SKILL",
        }
    }
}

/// A dice notation string that does not match `[N]dS[(+|-)B]`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("badly formatted roll string: {input:?}")]
pub struct DiceFormatError {
    pub input: String,
}

impl DiceFormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

impl RulesError for DiceFormatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "DICE_FORMAT"
    }
}

/// Lookups into finite rule tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("ability score {score} has no point-buy cost")]
    PointCost { score: i32 },
}

impl RulesError for LookupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Lookup
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PointCost { .. } => "LOOKUP_POINT_COST",
        }
    }
}
