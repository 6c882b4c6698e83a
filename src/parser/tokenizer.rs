//! Script tokenization.
//!
//! Scripts are a sequence of shell-style statements separated by `;`.
//! Splitting is intentionally simple: a `;` inside a string literal or a
//! document body also terminates a statement. Scripts that embed `;` in
//! data must be rewritten to avoid it.

/// Split a script into trimmed, non-empty statements.
///
/// Empty segments and segments starting with `//` are dropped, so a
/// trailing `;` or a comment line never produces a statement.
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with("//"))
        .map(str::to_string)
        .collect()
}

/// Extract the argument text of a statement: everything between the first
/// `(` and the *last* `)`.
///
/// Using the last `)` keeps nested parentheses inside document literals
/// intact. Returns an empty string when the statement carries no argument
/// list.
pub fn argument_text(statement: &str) -> &str {
    let Some(open) = statement.find('(') else {
        return "";
    };
    let Some(close) = statement.rfind(')') else {
        return "";
    };
    if close <= open {
        return "";
    }
    statement[open + 1..close].trim()
}

/// Split argument text into the first argument and the remainder, honoring
/// brace and bracket nesting.
///
/// Only the first top-level comma splits; everything after it is returned
/// verbatim as the second argument. Statements in this dialect take at
/// most two document arguments.
pub fn split_arguments(params: &str) -> (String, Option<String>) {
    let mut depth: i32 = 0;

    for (i, ch) in params.char_indices() {
        match ch {
            '{' | '[' => depth += 1,
            '}' | ']' => depth -= 1,
            ',' if depth == 0 => {
                let first = params[..i].trim().to_string();
                let rest = params[i + 1..].trim().to_string();
                return (first, Some(rest));
            }
            _ => {}
        }
    }

    (params.trim().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_statements_basic() {
        let stmts = split_statements("use testdb; db.users.find({})");
        assert_eq!(stmts, vec!["use testdb", "db.users.find({})"]);
    }

    #[test]
    fn test_split_statements_drops_empty_and_comments() {
        let stmts = split_statements("// setup\n; db.users.drop() ;;");
        assert_eq!(stmts, vec!["db.users.drop()"]);
    }

    #[test]
    fn test_split_statements_whitespace_only() {
        assert!(split_statements("  \n\t ").is_empty());
    }

    #[test]
    fn test_argument_text_nested_parens() {
        let stmt = r#"db.users.find({ "a": "(x)" })"#;
        assert_eq!(argument_text(stmt), r#"{ "a": "(x)" }"#);
    }

    #[test]
    fn test_argument_text_empty() {
        assert_eq!(argument_text("db.users.drop()"), "");
        assert_eq!(argument_text("use testdb"), "");
    }

    #[test]
    fn test_argument_text_unbalanced() {
        // Malformed input is surfaced as-is; the document parser rejects it.
        assert_eq!(argument_text("db.foo.bar({)"), "{");
    }

    #[test]
    fn test_split_arguments_single() {
        let (first, second) = split_arguments(r#"{ "name": "a" }"#);
        assert_eq!(first, r#"{ "name": "a" }"#);
        assert!(second.is_none());
    }

    #[test]
    fn test_split_arguments_nested_commas() {
        let (first, second) =
            split_arguments(r#"{ "tags": ["a", "b"] }, { "$set": { "x": 1 } }"#);
        assert_eq!(first, r#"{ "tags": ["a", "b"] }"#);
        assert_eq!(second.as_deref(), Some(r#"{ "$set": { "x": 1 } }"#));
    }

    #[test]
    fn test_split_arguments_empty() {
        let (first, second) = split_arguments("");
        assert_eq!(first, "");
        assert!(second.is_none());
    }
}
