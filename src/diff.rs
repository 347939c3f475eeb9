use graphql_parser::schema::{
    Definition, Document, EnumType, Field, InputValue, Type, TypeDefinition,
};

use std::collections::{HashMap, HashSet};
use std::ops::Index;

use crate::change::{Change, ChangeKind, Severity};

/// The ordered outcome of comparing two schema documents: every breaking
/// change first, then every dangerous change, each class in the order it
/// was discovered walking the baseline document.
#[derive(Debug)]
pub struct Diff(Vec<Change>);

impl Diff {
    fn new(changes: Vec<Change>) -> Self {
        let (breaking, dangerous): (Vec<_>, Vec<_>) = changes
            .into_iter()
            .partition(|c| c.severity() == Severity::Breaking);
        Self(breaking.into_iter().chain(dangerous).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_breaking(&self) -> bool {
        self.0.iter().any(|c| c.severity() == Severity::Breaking)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.0.iter()
    }

    pub fn breaking(&self) -> Vec<&Change> {
        self.0
            .iter()
            .filter(|c| c.severity() == Severity::Breaking)
            .collect()
    }

    pub fn dangerous(&self) -> Vec<&Change> {
        self.0
            .iter()
            .filter(|c| c.severity() == Severity::Dangerous)
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Index<usize> for Diff {
    type Output = Change;

    fn index(&self, index: usize) -> &Change {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compare two schema documents and return the classified changes.
pub fn diff_schemas<'a>(
    baseline: &Document<'a, String>,
    candidate: &Document<'a, String>,
) -> Diff {
    let old_types = type_definitions(baseline);
    let new_types: HashMap<&str, &TypeDefinition<'a, String>> =
        type_definitions(candidate).into_iter().collect();
    let old_names: HashSet<&str> = old_types.iter().map(|(n, _)| *n).collect();

    let mut changes = Vec::new();

    for (name, old_def) in &old_types {
        match new_types.get(name) {
            None => changes.push(Change {
                kind: ChangeKind::TypeRemoved,
                type_name: (*name).to_string(),
                field_name: None,
                description: format!("{name} was removed."),
            }),
            Some(new_def) => diff_type(name, old_def, new_def, &mut changes),
        }
    }

    for (name, _) in type_definitions(candidate) {
        if !old_names.contains(name) {
            log::debug!("type {name} was added");
        }
    }

    Diff::new(changes)
}

// ---------------------------------------------------------------------------
// Layer 1: Type definitions
// ---------------------------------------------------------------------------

fn type_definitions<'d, 'a>(
    doc: &'d Document<'a, String>,
) -> Vec<(&'d str, &'d TypeDefinition<'a, String>)> {
    doc.definitions
        .iter()
        .filter_map(|def| match def {
            Definition::TypeDefinition(ty) => Some((type_name(ty), ty)),
            _ => None,
        })
        .collect()
}

fn type_name<'d>(ty: &'d TypeDefinition<'_, String>) -> &'d str {
    match ty {
        TypeDefinition::Scalar(t) => &t.name,
        TypeDefinition::Object(t) => &t.name,
        TypeDefinition::Interface(t) => &t.name,
        TypeDefinition::Union(t) => &t.name,
        TypeDefinition::Enum(t) => &t.name,
        TypeDefinition::InputObject(t) => &t.name,
    }
}

fn kind_label(ty: &TypeDefinition<'_, String>) -> &'static str {
    match ty {
        TypeDefinition::Scalar(_) => "a scalar type",
        TypeDefinition::Object(_) => "an object type",
        TypeDefinition::Interface(_) => "an interface type",
        TypeDefinition::Union(_) => "a union type",
        TypeDefinition::Enum(_) => "an enum type",
        TypeDefinition::InputObject(_) => "an input type",
    }
}

fn diff_type<'a>(
    name: &str,
    old: &TypeDefinition<'a, String>,
    new: &TypeDefinition<'a, String>,
    out: &mut Vec<Change>,
) {
    match (old, new) {
        (TypeDefinition::Object(o), TypeDefinition::Object(n)) => {
            diff_fields(name, &o.fields, &n.fields, out);
        }
        (TypeDefinition::Interface(o), TypeDefinition::Interface(n)) => {
            diff_fields(name, &o.fields, &n.fields, out);
        }
        (TypeDefinition::Enum(o), TypeDefinition::Enum(n)) => {
            diff_enum(name, o, n, out);
        }
        (TypeDefinition::InputObject(o), TypeDefinition::InputObject(n)) => {
            diff_input_fields(name, &o.fields, &n.fields, out);
        }
        (TypeDefinition::Union(o), TypeDefinition::Union(n)) => {
            // Union membership changes have no kind of their own.
            for member in &o.types {
                if !n.types.contains(member) {
                    log::warn!("unclassified change: {member} was removed from union type {name}");
                }
            }
            for member in &n.types {
                if !o.types.contains(member) {
                    log::warn!("unclassified change: {member} was added to union type {name}");
                }
            }
        }
        (TypeDefinition::Scalar(_), TypeDefinition::Scalar(_)) => {}
        (o, n) => {
            log::warn!(
                "unclassified change: {name} changed from {} to {}",
                kind_label(o),
                kind_label(n)
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Layer 2: Object and interface fields
// ---------------------------------------------------------------------------

fn diff_fields<'a>(
    type_name: &str,
    old_fields: &[Field<'a, String>],
    new_fields: &[Field<'a, String>],
    out: &mut Vec<Change>,
) {
    let new_by_name: HashMap<&str, &Field<'a, String>> =
        new_fields.iter().map(|f| (f.name.as_str(), f)).collect();

    for old_field in old_fields {
        let field_name = old_field.name.as_str();
        match new_by_name.get(field_name) {
            None => out.push(Change {
                kind: ChangeKind::FieldRemoved,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!("{type_name}.{field_name} was removed."),
            }),
            Some(new_field) => {
                if !is_safe_type_change(&old_field.field_type, &new_field.field_type) {
                    out.push(Change {
                        kind: ChangeKind::FieldTypeChanged,
                        type_name: type_name.to_string(),
                        field_name: Some(field_name.to_string()),
                        description: format!(
                            "{type_name}.{field_name} changed type from {} to {}.",
                            type_repr(&old_field.field_type),
                            type_repr(&new_field.field_type),
                        ),
                    });
                }
                diff_arguments(
                    type_name,
                    field_name,
                    &old_field.arguments,
                    &new_field.arguments,
                    out,
                );
            }
        }
    }

    let old_names: HashSet<&str> = old_fields.iter().map(|f| f.name.as_str()).collect();
    for new_field in new_fields {
        if !old_names.contains(new_field.name.as_str()) {
            log::debug!("field {type_name}.{} was added", new_field.name);
        }
    }
}

// ---------------------------------------------------------------------------
// Layer 3: Field arguments
// ---------------------------------------------------------------------------

fn diff_arguments<'a>(
    type_name: &str,
    field_name: &str,
    old_args: &[InputValue<'a, String>],
    new_args: &[InputValue<'a, String>],
    out: &mut Vec<Change>,
) {
    let new_by_name: HashMap<&str, &InputValue<'a, String>> =
        new_args.iter().map(|a| (a.name.as_str(), a)).collect();
    let old_by_name: HashMap<&str, &InputValue<'a, String>> =
        old_args.iter().map(|a| (a.name.as_str(), a)).collect();

    for old_arg in old_args {
        let arg_name = old_arg.name.as_str();
        match new_by_name.get(arg_name) {
            None => {
                // Argument removal has no kind of its own.
                log::warn!(
                    "unclassified change: {type_name}.{field_name} arg {arg_name} was removed"
                );
            }
            Some(new_arg) => {
                if !is_safe_type_change(&old_arg.value_type, &new_arg.value_type) {
                    out.push(Change {
                        kind: ChangeKind::ArgTypeChanged,
                        type_name: type_name.to_string(),
                        field_name: Some(field_name.to_string()),
                        description: format!(
                            "{type_name}.{field_name} arg {arg_name} has changed type from {} to {}",
                            type_repr(&old_arg.value_type),
                            type_repr(&new_arg.value_type),
                        ),
                    });
                } else if old_arg.value_type == new_arg.value_type
                    && old_arg.default_value != new_arg.default_value
                {
                    out.push(Change {
                        kind: ChangeKind::ArgDefaultValueChanged,
                        type_name: type_name.to_string(),
                        field_name: Some(field_name.to_string()),
                        description: format!(
                            "{type_name}.{field_name} arg {arg_name} has changed defaultValue"
                        ),
                    });
                }
            }
        }
    }

    for new_arg in new_args {
        let arg_name = new_arg.name.as_str();
        if old_by_name.contains_key(arg_name) {
            continue;
        }
        if is_required_input(new_arg) {
            out.push(Change {
                kind: ChangeKind::RequiredArgOrInputFieldAdded,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!(
                    "A required arg {arg_name} on {type_name}.{field_name} was added"
                ),
            });
        } else {
            out.push(Change {
                kind: ChangeKind::OptionalArgAdded,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!(
                    "An optional arg {arg_name} on {type_name}.{field_name} was added"
                ),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Layer 4: Enum values
// ---------------------------------------------------------------------------

fn diff_enum<'a>(
    type_name: &str,
    old: &EnumType<'a, String>,
    new: &EnumType<'a, String>,
    out: &mut Vec<Change>,
) {
    let old_values: HashSet<&str> = old.values.iter().map(|v| v.name.as_str()).collect();
    let new_values: HashSet<&str> = new.values.iter().map(|v| v.name.as_str()).collect();

    for value in &old.values {
        if !new_values.contains(value.name.as_str()) {
            out.push(Change {
                kind: ChangeKind::EnumValueRemoved,
                type_name: type_name.to_string(),
                field_name: None,
                description: format!(
                    "{} was removed from enum type {type_name}.",
                    value.name
                ),
            });
        }
    }

    for value in &new.values {
        if !old_values.contains(value.name.as_str()) {
            out.push(Change {
                kind: ChangeKind::EnumValueAdded,
                type_name: type_name.to_string(),
                field_name: None,
                description: format!("{} was added to enum type {type_name}.", value.name),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Layer 5: Input object fields
// ---------------------------------------------------------------------------

fn diff_input_fields<'a>(
    type_name: &str,
    old_fields: &[InputValue<'a, String>],
    new_fields: &[InputValue<'a, String>],
    out: &mut Vec<Change>,
) {
    let new_by_name: HashMap<&str, &InputValue<'a, String>> =
        new_fields.iter().map(|f| (f.name.as_str(), f)).collect();
    let old_by_name: HashMap<&str, &InputValue<'a, String>> =
        old_fields.iter().map(|f| (f.name.as_str(), f)).collect();

    for old_field in old_fields {
        let field_name = old_field.name.as_str();
        match new_by_name.get(field_name) {
            None => out.push(Change {
                kind: ChangeKind::FieldRemoved,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!("{type_name}.{field_name} was removed."),
            }),
            Some(new_field) => {
                if !is_safe_type_change(&old_field.value_type, &new_field.value_type) {
                    out.push(Change {
                        kind: ChangeKind::FieldTypeChanged,
                        type_name: type_name.to_string(),
                        field_name: Some(field_name.to_string()),
                        description: format!(
                            "{type_name}.{field_name} changed type from {} to {}.",
                            type_repr(&old_field.value_type),
                            type_repr(&new_field.value_type),
                        ),
                    });
                }
            }
        }
    }

    for new_field in new_fields {
        let field_name = new_field.name.as_str();
        if old_by_name.contains_key(field_name) {
            continue;
        }
        if is_required_input(new_field) {
            out.push(Change {
                kind: ChangeKind::RequiredArgOrInputFieldAdded,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!(
                    "A required field {field_name} on input type {type_name} was added."
                ),
            });
        } else {
            out.push(Change {
                kind: ChangeKind::OptionalInputFieldAdded,
                type_name: type_name.to_string(),
                field_name: Some(field_name.to_string()),
                description: format!(
                    "An optional field {field_name} on input type {type_name} was added."
                ),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Type compatibility
// ---------------------------------------------------------------------------

/// Relaxing non-null to nullable is the only compatible change; tightening
/// nullability, changing the named base type, or changing the list wrapping
/// all break existing operations.
fn is_safe_type_change<'a>(old: &Type<'a, String>, new: &Type<'a, String>) -> bool {
    match (old, new) {
        (Type::NonNullType(o), Type::NonNullType(n)) => is_safe_type_change(o, n),
        (Type::NonNullType(o), n) => is_safe_type_change(o, n),
        (_, Type::NonNullType(_)) => false,
        (Type::NamedType(o), Type::NamedType(n)) => o == n,
        (Type::ListType(o), Type::ListType(n)) => is_safe_type_change(o, n),
        _ => false,
    }
}

fn is_required_input(input: &InputValue<'_, String>) -> bool {
    matches!(input.value_type, Type::NonNullType(_)) && input.default_value.is_none()
}

fn type_repr(ty: &Type<'_, String>) -> String {
    match ty {
        Type::NamedType(name) => name.clone(),
        Type::ListType(inner) => format!("[{}]", type_repr(inner)),
        Type::NonNullType(inner) => format!("{}!", type_repr(inner)),
    }
}
