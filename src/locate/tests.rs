use super::*;

fn parse(sdl: &str) -> Document<'_, String> {
    graphql_parser::parse_schema::<String>(sdl).expect("test schema should parse")
}

const SDL: &str = "\
type Query {
  ping: String
  posts(limit: Int): [Post]
}

type Post {
  id: Int!
  title: String
}

enum UserRole {
  ROLE_ADMIN
  ROLE_USER
}

input PostFilter {
  author: String
  tag: String
}
";

#[test]
fn finds_type_line() {
    let doc = parse(SDL);
    let span = locate(&doc, "Post", None);
    assert_eq!(span, LineSpan { start_line: 6, end_line: 6 });
}

#[test]
fn finds_field_line() {
    let doc = parse(SDL);
    let span = locate(&doc, "Post", Some("title"));
    assert_eq!(span.start_line, 8);
    assert_eq!(span.end_line, span.start_line);
}

#[test]
fn finds_enum_value_line() {
    let doc = parse(SDL);
    let span = locate(&doc, "UserRole", Some("ROLE_USER"));
    assert_eq!(span.start_line, 13);
}

#[test]
fn finds_input_field_line() {
    let doc = parse(SDL);
    let span = locate(&doc, "PostFilter", Some("tag"));
    assert_eq!(span.start_line, 18);
}

#[test]
fn unknown_type_falls_back_to_top_of_file() {
    let doc = parse(SDL);
    assert_eq!(locate(&doc, "Missing", None), FALLBACK_SPAN);
    assert_eq!(locate(&doc, "Missing", Some("field")), FALLBACK_SPAN);
}

#[test]
fn unknown_field_falls_back_to_the_type_line() {
    let doc = parse(SDL);
    let span = locate(&doc, "Post", Some("missing"));
    assert_eq!(span, LineSpan { start_line: 6, end_line: 6 });
}

#[test]
fn anchors_are_single_line() {
    let doc = parse(SDL);
    for (ty, field) in [("Query", None), ("Query", Some("posts")), ("UserRole", None)] {
        let span = locate(&doc, ty, field);
        assert_eq!(span.start_line, span.end_line);
    }
}
