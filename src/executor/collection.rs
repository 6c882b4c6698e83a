//! Collection-scoped operation execution.

use bson::{Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use tracing::debug;

use crate::error::{ExecutionError, Result};
use crate::parser::{parse_document, parse_value, split_arguments};

/// Execute one collection-scoped method and render its result line.
///
/// `args` is the raw argument text between the statement's parentheses;
/// each method parses what it needs from it. Unknown methods fail with
/// the full statement text so the report shows what was rejected.
pub async fn execute_collection(
    db: &Database,
    collection: &str,
    method: &str,
    args: &str,
    statement: &str,
) -> Result<String> {
    let coll = db.collection::<Document>(collection);
    debug!(collection, method, "executing collection operation");

    match method {
        "find" => {
            let filter = parse_document(args)?;
            let cursor = coll.find(filter).await?;
            let docs: Vec<Document> = cursor.try_collect().await?;
            Ok(format!("Found {} documents", docs.len()))
        }
        "findOne" => {
            let filter = parse_document(args)?;
            let mut cursor = coll.find(filter).limit(1).await?;
            match cursor.try_next().await? {
                Some(doc) => Ok(format!("Document found: {doc}")),
                None => Ok("No document found".to_string()),
            }
        }
        "insertOne" => {
            let doc = parse_document(args)?;
            coll.insert_one(doc).await?;
            Ok("Document inserted successfully".to_string())
        }
        "insertMany" => {
            let docs = parse_document_array(args)?;
            let inserted = docs.len();
            coll.insert_many(docs).await?;
            Ok(format!("{inserted} documents inserted successfully"))
        }
        "updateOne" => {
            let (filter, update) = parse_filter_and_update(args, method)?;
            let result = coll.update_one(filter, update).await?;
            Ok(format!("Updated {} document(s)", result.modified_count))
        }
        "updateMany" => {
            let (filter, update) = parse_filter_and_update(args, method)?;
            let result = coll.update_many(filter, update).await?;
            Ok(format!(
                "Updated {} of {} matched document(s)",
                result.modified_count, result.matched_count
            ))
        }
        "replaceOne" => {
            let (filter, replacement) = parse_filter_and_update(args, method)?;
            let result = coll.replace_one(filter, replacement).await?;
            Ok(format!("Replaced {} document(s)", result.modified_count))
        }
        "deleteOne" => {
            let filter = parse_document(args)?;
            let result = coll.delete_one(filter).await?;
            Ok(format!("Deleted {} document(s)", result.deleted_count))
        }
        "deleteMany" => {
            let filter = parse_document(args)?;
            let result = coll.delete_many(filter).await?;
            Ok(format!("Deleted {} document(s)", result.deleted_count))
        }
        "countDocuments" => {
            let filter = parse_document(args)?;
            let count = coll.count_documents(filter).await?;
            Ok(format!("Count: {count}"))
        }
        "drop" => {
            coll.drop().await?;
            Ok(format!("Collection '{collection}' dropped"))
        }
        "createIndex" => {
            let (keys_text, options_text) = split_arguments(args);
            let keys = parse_document(&keys_text)?;
            if keys.is_empty() {
                return Err(ExecutionError::InvalidParameters(
                    "createIndex requires an index keys document".to_string(),
                )
                .into());
            }
            let mut model = IndexModel::builder().keys(keys).build();
            model.options = options_text
                .map(|text| parse_index_options(&text))
                .transpose()?;
            let result = coll.create_index(model).await?;
            Ok(format!("Index '{}' created", result.index_name))
        }
        "dropIndex" => {
            let name = args.trim().trim_matches(|c| c == '"' || c == '\'');
            if name.is_empty() {
                return Err(ExecutionError::InvalidParameters(
                    "dropIndex requires an index name".to_string(),
                )
                .into());
            }
            coll.drop_index(name).await?;
            Ok(format!("Index '{name}' dropped"))
        }
        _ => Err(ExecutionError::UnsupportedCommand(statement.to_string()).into()),
    }
}

/// Parse the two-document argument form used by update and replace.
fn parse_filter_and_update(args: &str, method: &str) -> Result<(Document, Document)> {
    let (filter_text, update_text) = split_arguments(args);
    let Some(update_text) = update_text else {
        return Err(ExecutionError::InvalidParameters(format!(
            "{method} requires a filter and an update document"
        ))
        .into());
    };
    Ok((parse_document(&filter_text)?, parse_document(&update_text)?))
}

/// Parse an array literal of documents, as taken by `insertMany`.
fn parse_document_array(args: &str) -> Result<Vec<Document>> {
    let Bson::Array(items) = parse_value(args)? else {
        return Err(ExecutionError::InvalidParameters(
            "insertMany requires an array of documents".to_string(),
        )
        .into());
    };

    items
        .into_iter()
        .map(|item| match item {
            Bson::Document(doc) => Ok(doc),
            _ => Err(ExecutionError::InvalidParameters(
                "insertMany array elements must be documents".to_string(),
            )
            .into()),
        })
        .collect()
}

/// Build driver index options from a shell options document.
///
/// Only `unique`, `name`, and `sparse` are honored; other fields are
/// ignored rather than rejected.
fn parse_index_options(text: &str) -> Result<IndexOptions> {
    let doc = parse_document(text)?;

    let mut options = IndexOptions::default();
    options.unique = doc.get_bool("unique").ok();
    options.name = doc.get_str("name").ok().map(String::from);
    options.sparse = doc.get_bool("sparse").ok();

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_and_update() {
        let (filter, update) =
            parse_filter_and_update(r#"{ "a": 1 }, { "$set": { "b": 2 } }"#, "updateOne").unwrap();
        assert_eq!(filter, bson::doc! { "a": 1 });
        assert_eq!(update, bson::doc! { "$set": { "b": 2 } });
    }

    #[test]
    fn test_parse_filter_and_update_missing_second_arg() {
        let err = parse_filter_and_update(r#"{ "a": 1 }"#, "updateOne").unwrap_err();
        assert!(err.to_string().contains("updateOne requires"));
    }

    #[test]
    fn test_parse_document_array() {
        let docs = parse_document_array(r#"[{ "a": 1 }, { "a": 2 }]"#).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_parse_document_array_rejects_scalars() {
        assert!(parse_document_array("[1, 2]").is_err());
        assert!(parse_document_array(r#"{ "a": 1 }"#).is_err());
    }

    #[test]
    fn test_parse_index_options() {
        let options =
            parse_index_options(r#"{ "unique": true, "name": "email_1", "ttl": 60 }"#).unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.name.as_deref(), Some("email_1"));
        assert_eq!(options.sparse, None);
    }
}
