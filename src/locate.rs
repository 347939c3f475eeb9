use graphql_parser::Pos;
use graphql_parser::schema::{Definition, Document, TypeDefinition};

/// A 1-based line span in a schema text. Anchors are always single-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineSpan {
    fn at(line: usize) -> Self {
        Self {
            start_line: line,
            end_line: line,
        }
    }
}

/// Where an annotation lands when its subject cannot be found at all.
pub const FALLBACK_SPAN: LineSpan = LineSpan {
    start_line: 1,
    end_line: 3,
};

/// Find the source line of `type_name` (and, when given, of
/// `field_name` inside it) in a parsed schema document.
///
/// Lookup failures are recovered, not fatal: an unknown type falls back
/// to [`FALLBACK_SPAN`], an unknown field falls back to the line of the
/// enclosing type. Both paths leave a diagnostic in the log.
pub fn locate(
    doc: &Document<'_, String>,
    type_name: &str,
    field_name: Option<&str>,
) -> LineSpan {
    let Some(def) = find_type(doc, type_name) else {
        log::warn!("could not find type {type_name} in schema, anchoring at top of file");
        return FALLBACK_SPAN;
    };

    let mut position = type_position(def);
    if let Some(field) = field_name {
        match field_position(def, field) {
            Some(p) => position = p,
            None => {
                log::warn!(
                    "could not find field {type_name}.{field}, anchoring at the type definition"
                );
            }
        }
    }

    LineSpan::at(position.line)
}

fn find_type<'d, 'a>(
    doc: &'d Document<'a, String>,
    name: &str,
) -> Option<&'d TypeDefinition<'a, String>> {
    doc.definitions.iter().find_map(|def| match def {
        Definition::TypeDefinition(ty) if type_name(ty) == name => Some(ty),
        _ => None,
    })
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

fn type_position(ty: &TypeDefinition<'_, String>) -> Pos {
    match ty {
        TypeDefinition::Scalar(t) => t.position,
        TypeDefinition::Object(t) => t.position,
        TypeDefinition::Interface(t) => t.position,
        TypeDefinition::Union(t) => t.position,
        TypeDefinition::Enum(t) => t.position,
        TypeDefinition::InputObject(t) => t.position,
    }
}

fn field_position(ty: &TypeDefinition<'_, String>, field: &str) -> Option<Pos> {
    match ty {
        TypeDefinition::Object(t) => t
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.position),
        TypeDefinition::Interface(t) => t
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.position),
        TypeDefinition::InputObject(t) => t
            .fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.position),
        TypeDefinition::Enum(t) => t
            .values
            .iter()
            .find(|v| v.name == field)
            .map(|v| v.position),
        TypeDefinition::Scalar(_) | TypeDefinition::Union(_) => None,
    }
}

#[cfg(test)]
mod tests;
