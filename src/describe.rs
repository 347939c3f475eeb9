use serde::Serialize;
use std::fmt;

use crate::change::{Change, ChangeKind, Severity};

/// Hard field-length limit imposed by the check-report consumer.
pub const TITLE_LIMIT: usize = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Failure,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Failure => write!(f, "failure"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// The reviewer-facing rendering of a change: a clamped title, a guidance
/// message, and the annotation level.
#[derive(Debug, Clone)]
pub struct Description {
    pub title: String,
    pub message: String,
    pub level: Level,
}

pub fn describe(change: &Change) -> Description {
    let level = match change.severity() {
        Severity::Breaking => Level::Failure,
        Severity::Dangerous => Level::Warning,
    };
    let message = catalog(change.kind)
        .map(str::to_string)
        .unwrap_or_else(|| change.description.clone());

    Description {
        title: clamp_title(&change.description),
        message,
        level,
    }
}

/// One canonical guidance paragraph per change kind. Kinds absent from the
/// catalog fall back to the raw change description.
fn catalog(kind: ChangeKind) -> Option<&'static str> {
    match kind {
        ChangeKind::TypeRemoved => Some(
            "Removing a type is a breaking change. It is preferable to deprecate and \
             remove all references to this type first.",
        ),
        ChangeKind::FieldRemoved => Some(
            "Removing a field is a breaking change.\n\
             It is preferable to deprecate the field before removing it.",
        ),
        ChangeKind::EnumValueRemoved => Some(
            "Removing a value is a breaking change.\n\
             It is preferable to deprecate the value before removing it.",
        ),
        ChangeKind::RequiredArgOrInputFieldAdded => Some(
            "Adding a non-null field to an existing input type will cause existing \
             queries that use this input type to error because they will not provide \
             a value for this new field.",
        ),
        ChangeKind::ArgTypeChanged => Some(
            "Changing the type of a field's argument can cause existing queries that \
             use this argument to error.",
        ),
        ChangeKind::EnumValueAdded => Some(
            "Adding an enum value may break existing clients that were not\n\
             programming defensively against an added case when querying an enum.",
        ),
        ChangeKind::ArgDefaultValueChanged => Some(
            "Changing the default value for an argument may change the runtime \
             behaviour of a field if it was never provided.",
        ),
        ChangeKind::OptionalArgAdded | ChangeKind::OptionalInputFieldAdded => {
            Some("Non breaking")
        }
        ChangeKind::FieldTypeChanged => None,
    }
}

fn clamp_title(raw: &str) -> String {
    raw.chars().take(TITLE_LIMIT).collect()
}
