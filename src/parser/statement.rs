//! Statement classification.
//!
//! Each tokenized statement is mapped onto a closed set of shapes before
//! anything touches the database. Classification looks only at the text;
//! argument bodies are carried verbatim and parsed later by the executor
//! that needs them.

use crate::error::{ParseError, Result};
use crate::parser::tokenizer::argument_text;

/// A classified script statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `use <name>` - switch the session's current database.
    Use(String),

    /// A collection-scoped operation: `db.<collection>.<method>(<args>)`
    /// or `db.getCollection("<collection>").<method>(<args>)`.
    Collection {
        collection: String,
        method: String,
        args: String,
    },

    /// A database-level administrative operation.
    Admin(AdminStatement),

    /// Anything else. The raw text is handed to the server as a command
    /// document if it parses as one.
    Raw(String),
}

/// Database-level operations recognized by name.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminStatement {
    CreateCollection(String),
    DropDatabase,
    ListCollections,
    RunCommand(String),
    Stats,
}

impl Statement {
    /// Classify a single trimmed statement.
    ///
    /// Routing is by priority: `use` first, then the quoted
    /// `getCollection` form, then the dotted collection form, then the
    /// admin set, and finally the raw fallback. A statement with a `.`
    /// between the `db.` prefix and the first `(` addresses a collection;
    /// otherwise the method name is matched against the admin set.
    pub fn parse(text: &str) -> Result<Statement> {
        let lower = text.to_lowercase();

        if lower == "use" || lower.starts_with("use ") {
            let name = text[3..].trim();
            if name.is_empty() {
                return Err(ParseError::InvalidStatement(
                    "use statement requires a database name".to_string(),
                )
                .into());
            }
            return Ok(Statement::Use(name.to_string()));
        }

        if let Some(rest) = text.strip_prefix("db.getCollection(") {
            return parse_get_collection(text, rest);
        }

        if let Some(rest) = text.strip_prefix("db.") {
            let paren = rest.find('(').unwrap_or(rest.len());
            if let Some(dot) = rest[..paren].find('.') {
                let collection = rest[..dot].trim().to_string();
                let method = rest[dot + 1..paren].trim().to_string();
                if collection.is_empty() || method.is_empty() {
                    return Err(ParseError::InvalidStatement(text.to_string()).into());
                }
                return Ok(Statement::Collection {
                    collection,
                    method,
                    args: argument_text(text).to_string(),
                });
            }

            let method = rest[..paren].trim();
            let args = argument_text(text);
            match method {
                "createCollection" => {
                    let name = unquote(args);
                    if name.is_empty() {
                        return Err(ParseError::InvalidStatement(
                            "createCollection requires a collection name".to_string(),
                        )
                        .into());
                    }
                    return Ok(Statement::Admin(AdminStatement::CreateCollection(name)));
                }
                "dropDatabase" => return Ok(Statement::Admin(AdminStatement::DropDatabase)),
                "getCollectionNames" | "listCollections" => {
                    return Ok(Statement::Admin(AdminStatement::ListCollections));
                }
                "runCommand" => {
                    return Ok(Statement::Admin(AdminStatement::RunCommand(
                        args.to_string(),
                    )));
                }
                "stats" => return Ok(Statement::Admin(AdminStatement::Stats)),
                _ => {}
            }
        }

        Ok(Statement::Raw(text.to_string()))
    }
}

/// Parse `db.getCollection("name").method(args)`.
///
/// The collection name sits between the first `(` and the first `)`;
/// surrounding quotes of either kind are stripped. The remainder after the
/// closing `)` carries the method call.
fn parse_get_collection(text: &str, rest: &str) -> Result<Statement> {
    let Some(close) = rest.find(')') else {
        return Err(ParseError::InvalidStatement(text.to_string()).into());
    };
    let collection = unquote(&rest[..close]);
    if collection.is_empty() {
        return Err(ParseError::InvalidStatement(
            "getCollection requires a collection name".to_string(),
        )
        .into());
    }

    let call = rest[close + 1..].trim_start_matches('.');
    let Some(paren) = call.find('(') else {
        return Err(ParseError::InvalidStatement(text.to_string()).into());
    };
    let method = call[..paren].trim().to_string();
    if method.is_empty() {
        return Err(ParseError::InvalidStatement(text.to_string()).into());
    }

    Ok(Statement::Collection {
        collection,
        method,
        args: argument_text(call).to_string(),
    })
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_statement() {
        assert_eq!(
            Statement::parse("use testdb").unwrap(),
            Statement::Use("testdb".to_string())
        );
    }

    #[test]
    fn test_use_without_name_fails() {
        assert!(Statement::parse("use ").is_err());
        assert!(Statement::parse("use").is_err());
    }

    #[test]
    fn test_dotted_collection_form() {
        let stmt = Statement::parse(r#"db.users.find({ "active": true })"#).unwrap();
        assert_eq!(
            stmt,
            Statement::Collection {
                collection: "users".to_string(),
                method: "find".to_string(),
                args: r#"{ "active": true }"#.to_string(),
            }
        );
    }

    #[test]
    fn test_get_collection_form() {
        let stmt = Statement::parse(r#"db.getCollection("user.events").countDocuments({})"#)
            .unwrap();
        assert_eq!(
            stmt,
            Statement::Collection {
                collection: "user.events".to_string(),
                method: "countDocuments".to_string(),
                args: "{}".to_string(),
            }
        );
    }

    #[test]
    fn test_get_collection_single_quotes() {
        let stmt = Statement::parse("db.getCollection('logs').drop()").unwrap();
        assert_eq!(
            stmt,
            Statement::Collection {
                collection: "logs".to_string(),
                method: "drop".to_string(),
                args: String::new(),
            }
        );
    }

    #[test]
    fn test_admin_create_collection() {
        let stmt = Statement::parse(r#"db.createCollection("events")"#).unwrap();
        assert_eq!(
            stmt,
            Statement::Admin(AdminStatement::CreateCollection("events".to_string()))
        );
    }

    #[test]
    fn test_admin_run_command() {
        let stmt = Statement::parse("db.runCommand({ping:1})").unwrap();
        assert_eq!(
            stmt,
            Statement::Admin(AdminStatement::RunCommand("{ping:1}".to_string()))
        );
    }

    #[test]
    fn test_admin_list_collections_aliases() {
        assert_eq!(
            Statement::parse("db.getCollectionNames()").unwrap(),
            Statement::Admin(AdminStatement::ListCollections)
        );
        assert_eq!(
            Statement::parse("db.listCollections()").unwrap(),
            Statement::Admin(AdminStatement::ListCollections)
        );
    }

    #[test]
    fn test_admin_stats_and_drop_database() {
        assert_eq!(
            Statement::parse("db.stats()").unwrap(),
            Statement::Admin(AdminStatement::Stats)
        );
        assert_eq!(
            Statement::parse("db.dropDatabase()").unwrap(),
            Statement::Admin(AdminStatement::DropDatabase)
        );
    }

    #[test]
    fn test_unknown_database_method_is_raw() {
        let stmt = Statement::parse("db.serverStatus()").unwrap();
        assert_eq!(stmt, Statement::Raw("db.serverStatus()".to_string()));
    }

    #[test]
    fn test_bare_document_is_raw() {
        let stmt = Statement::parse("{ ping: 1 }").unwrap();
        assert_eq!(stmt, Statement::Raw("{ ping: 1 }".to_string()));
    }

    #[test]
    fn test_dotted_form_wins_over_admin_names() {
        // A collection that happens to be named like an admin method still
        // routes to the collection executor.
        let stmt = Statement::parse("db.stats.find({})").unwrap();
        assert!(matches!(stmt, Statement::Collection { ref collection, .. } if collection == "stats"));
    }
}
