use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Breaking,
    Dangerous,
}

/// Which of the two schema texts a change should be pointed at.
///
/// A removed field can only be anchored in the schema where it still
/// existed; every other change is anchored where the new shape is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSide {
    Baseline,
    Candidate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    TypeRemoved,
    FieldRemoved,
    EnumValueRemoved,
    RequiredArgOrInputFieldAdded,
    FieldTypeChanged,
    ArgTypeChanged,
    EnumValueAdded,
    ArgDefaultValueChanged,
    OptionalArgAdded,
    OptionalInputFieldAdded,
}

impl ChangeKind {
    pub fn severity(self) -> Severity {
        match self {
            ChangeKind::TypeRemoved
            | ChangeKind::FieldRemoved
            | ChangeKind::EnumValueRemoved
            | ChangeKind::RequiredArgOrInputFieldAdded
            | ChangeKind::FieldTypeChanged
            | ChangeKind::ArgTypeChanged => Severity::Breaking,
            ChangeKind::EnumValueAdded
            | ChangeKind::ArgDefaultValueChanged
            | ChangeKind::OptionalArgAdded
            | ChangeKind::OptionalInputFieldAdded => Severity::Dangerous,
        }
    }

    pub fn locate_in(self) -> SchemaSide {
        match self {
            ChangeKind::FieldRemoved => SchemaSide::Baseline,
            _ => SchemaSide::Candidate,
        }
    }
}

/// A single structural difference between two schema documents.
///
/// The subject of the change is carried as structured fields rather than
/// being re-extracted from `description` later.
#[derive(Debug, Clone)]
pub struct Change {
    pub kind: ChangeKind,
    pub type_name: String,
    pub field_name: Option<String>,
    pub description: String,
}

impl Change {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ChangeKind; 10] = [
        ChangeKind::TypeRemoved,
        ChangeKind::FieldRemoved,
        ChangeKind::EnumValueRemoved,
        ChangeKind::RequiredArgOrInputFieldAdded,
        ChangeKind::FieldTypeChanged,
        ChangeKind::ArgTypeChanged,
        ChangeKind::EnumValueAdded,
        ChangeKind::ArgDefaultValueChanged,
        ChangeKind::OptionalArgAdded,
        ChangeKind::OptionalInputFieldAdded,
    ];

    #[test]
    fn severity_is_determined_by_kind() {
        let dangerous = [
            ChangeKind::EnumValueAdded,
            ChangeKind::ArgDefaultValueChanged,
            ChangeKind::OptionalArgAdded,
            ChangeKind::OptionalInputFieldAdded,
        ];
        for kind in ALL_KINDS {
            let expected = if dangerous.contains(&kind) {
                Severity::Dangerous
            } else {
                Severity::Breaking
            };
            assert_eq!(kind.severity(), expected);
        }
    }

    #[test]
    fn only_field_removed_is_located_in_baseline() {
        for kind in ALL_KINDS {
            let expected = if kind == ChangeKind::FieldRemoved {
                SchemaSide::Baseline
            } else {
                SchemaSide::Candidate
            };
            assert_eq!(kind.locate_in(), expected);
        }
    }
}
