//! Structured reading of free-text exercise descriptions.
//!
//! Descriptions are free text, but the app suggests a convention:
//! `Back Squat - 5 sets x 15 reps - 30 kg - 10 min`. [`ExerciseDetail`]
//! pulls those pieces back out on a best-effort basis for display. The
//! description string stays the stored value; nothing here is persisted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static SETS_REPS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*sets?\s*x\s*(\d+)\s*reps?$")
        .unwrap_or_else(|e| panic!("Invalid sets/reps regex: {e}"))
});

static MINUTES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*min(?:ute)?s?$")
        .unwrap_or_else(|e| panic!("Invalid minutes regex: {e}"))
});

static LOAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\d+(?:\.\d+)?\s*(?:kg|lbs?)|bodyweight)$")
        .unwrap_or_else(|e| panic!("Invalid load regex: {e}"))
});

/// Exercise details recovered from a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseDetail {
    /// Exercise name, the first segment.
    pub name: String,
    /// Number of sets.
    pub sets: Option<u32>,
    /// Repetitions per set.
    pub reps: Option<u32>,
    /// Weight used, as written (`30 kg`, `bodyweight`).
    pub load: Option<String>,
    /// Time spent on the exercise.
    pub minutes: Option<u32>,
}

impl ExerciseDetail {
    /// Parse a ` - ` separated description.
    ///
    /// Segments that match no known shape are ignored. Returns `None` for a
    /// blank description.
    #[must_use]
    pub fn parse(description: &str) -> Option<Self> {
        let mut segments = description.split(" - ").map(str::trim).filter(|s| !s.is_empty());
        let name = segments.next()?.to_string();

        let mut detail = Self {
            name,
            ..Self::default()
        };

        for segment in segments {
            if let Some(caps) = SETS_REPS_PATTERN.captures(segment) {
                detail.sets = caps[1].parse().ok();
                detail.reps = caps[2].parse().ok();
            } else if let Some(caps) = MINUTES_PATTERN.captures(segment) {
                detail.minutes = caps[1].parse().ok();
            } else if LOAD_PATTERN.is_match(segment) {
                detail.load = Some(segment.to_string());
            }
        }

        Some(detail)
    }

    /// Whether anything beyond the name was recognized.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        self.sets.is_some() || self.reps.is_some() || self.load.is_some() || self.minutes.is_some()
    }
}

impl fmt::Display for ExerciseDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (self.sets, self.reps) {
            (Some(sets), Some(reps)) => write!(f, " - {sets} sets x {reps} reps")?,
            (Some(sets), None) => write!(f, " - {sets} sets")?,
            (None, Some(reps)) => write!(f, " - {reps} reps")?,
            (None, None) => {}
        }
        if let Some(load) = &self.load {
            write!(f, " - {load}")?;
        }
        if let Some(minutes) = self.minutes {
            write!(f, " - {minutes} min")?;
        }
        Ok(())
    }
}
