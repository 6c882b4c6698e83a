use serde::{Deserialize, Serialize};

/// Structured error information extracted from MongoDB driver errors.
///
/// Serialized to JSON for the per-command `error_detail` field of
/// execution reports.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub(crate) error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<ErrorDetails>,
}

/// Additional detail extracted from the server's error details document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) key: Option<bson::Document>,
}

impl ErrorInfo {
    /// Convert error info to pretty-printed JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Extract structured information from a MongoDB error using the driver API.
///
/// This uses the driver's typed error structures directly instead of parsing
/// the rendered message.
pub fn extract_error_info(error: &mongodb::error::Error) -> ErrorInfo {
    use mongodb::error::{ErrorKind, WriteFailure};

    let mut info = ErrorInfo::default();

    match error.kind.as_ref() {
        ErrorKind::Write(write_failure) => {
            info.error_type = Some("mongo.write_error".to_string());

            match write_failure {
                WriteFailure::WriteError(write_error) => {
                    info.code = Some(write_error.code);
                    info.message = Some(write_error.message.clone());
                    info.name = error_name(write_error.code);
                    info.details = Some(details_from(&write_error.details));
                }
                WriteFailure::WriteConcernError(wc_error) => {
                    info.code = Some(wc_error.code);
                    info.message = Some(wc_error.message.clone());
                    info.name = error_name(wc_error.code);
                }
                _ => {}
            }
        }
        ErrorKind::Command(command_error) => {
            info.error_type = Some("mongo.command_error".to_string());
            info.code = Some(command_error.code);
            info.message = Some(command_error.message.clone());
            info.name = error_name(command_error.code);
        }
        ErrorKind::InsertMany(insert_error) => {
            info.error_type = Some("mongo.insert_many_error".to_string());

            if let Some(first) = insert_error
                .write_errors
                .as_ref()
                .and_then(|errs| errs.first())
            {
                info.code = Some(first.code);
                info.message = Some(first.message.clone());
                info.name = error_name(first.code);
                info.details = Some(details_from(&first.details));
            } else if let Some(wc_error) = &insert_error.write_concern_error {
                info.code = Some(wc_error.code);
                info.message = Some(wc_error.message.clone());
                info.name = error_name(wc_error.code);
            }
        }
        ErrorKind::Authentication { message, .. } => {
            info.error_type = Some("mongo.authentication_error".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::InvalidArgument { message, .. } => {
            info.error_type = Some("mongo.invalid_argument".to_string());
            info.message = Some(message.clone());
        }
        ErrorKind::ServerSelection { message, .. } => {
            info.error_type = Some("mongo.server_selection_error".to_string());
            info.message = Some(message.clone());
        }
        _ => {
            info.message = Some(error.to_string());
        }
    }

    info
}

/// Human-readable error name for well-known server error codes.
fn error_name(code: i32) -> Option<String> {
    let name = match code {
        11000 | 11001 => "DuplicateKey",
        13 => "Unauthorized",
        18 => "AuthenticationFailed",
        26 => "NamespaceNotFound",
        50 => "MaxTimeMSExpired",
        121 => "DocumentValidationFailure",
        _ => return None,
    };

    Some(name.to_string())
}

/// Pull collection, index, and key information out of an errInfo document.
fn details_from(error_details: &Option<bson::Document>) -> ErrorDetails {
    let mut details = ErrorDetails {
        collection: None,
        index: None,
        key: None,
    };

    let Some(doc) = error_details else {
        return details;
    };

    if let Some(bson::Bson::String(ns)) = doc.get("namespace").or_else(|| doc.get("ns")) {
        details.collection = Some(ns.clone());
    }

    if let Some(bson::Bson::String(idx)) = doc.get("index").or_else(|| doc.get("indexName")) {
        details.index = Some(idx.clone());
    }

    if let Some(bson::Bson::Document(key_doc)) =
        doc.get("keyPattern").or_else(|| doc.get("keyValue"))
    {
        details.key = Some(key_doc.clone());
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_name_known_codes() {
        assert_eq!(error_name(11000).as_deref(), Some("DuplicateKey"));
        assert_eq!(error_name(26).as_deref(), Some("NamespaceNotFound"));
        assert_eq!(error_name(999), None);
    }

    #[test]
    fn test_details_from_document() {
        let doc = bson::doc! {
            "ns": "testdb.users",
            "indexName": "email_1",
            "keyValue": { "email": "a@b.c" },
        };
        let details = details_from(&Some(doc));
        assert_eq!(details.collection.as_deref(), Some("testdb.users"));
        assert_eq!(details.index.as_deref(), Some("email_1"));
        assert!(details.key.is_some());
    }

    #[test]
    fn test_details_from_none() {
        let details = details_from(&None);
        assert!(details.collection.is_none());
        assert!(details.index.is_none());
        assert!(details.key.is_none());
    }

    #[test]
    fn test_error_info_serializes_without_empty_fields() {
        let info = ErrorInfo {
            error_type: Some("mongo.command_error".to_string()),
            code: Some(26),
            name: Some("NamespaceNotFound".to_string()),
            message: Some("ns not found".to_string()),
            details: None,
        };
        let json = info.to_json().unwrap();
        assert!(json.contains("\"code\": 26"));
        assert!(!json.contains("details"));
    }
}
