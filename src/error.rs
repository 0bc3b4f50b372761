//! Error types for glTF document handling
//!
//! Every fallible operation in this crate returns [`Result`]. Errors carry an
//! error code for categorization plus enough context (JSON path, extension
//! name, property context) to locate the problem.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and binary container errors
//! - **E2xxx**: JSON parsing and schema errors
//! - **E3xxx**: Document invariant errors
//! - **E4xxx**: Extension dispatch errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: Malformed GLB container
//! - `E2001`: Input is not valid JSON
//! - `E2002`: Schema violation
//! - `E2003`: Invalid document structure
//! - `E3002`: No scene available as default
//! - `E3003`: Duplicate id on append
//! - `E3004`: Empty id appended with the throw-on-empty policy
//! - `E3005`: Invariant violation (transform, camera, image source, empty
//!   required arrays, sparse index type)
//! - `E3006`: Extension present in both typed and opaque form
//! - `E3007`: Extension not declared in `extensionsUsed`
//! - `E3008`: Required extension missing from `extensionsUsed`
//! - `E4001`: Typed extension payload not attached
//! - `E4002`: No serializer registered for an extension payload
//!
//! Missing-key errors carry no code: their text, `key <id> not in
//! container`, is matched verbatim by existing tooling.
//! [`Error::is_invariant_violation`] groups them with E3005 to E3008, since a
//! dangling id is a broken document invariant.

use std::io;
use thiserror::Error;

use crate::property::PropertyContext;

/// Result type for glTF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building, reading or writing glTF documents
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing a stream
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - Truncated stream
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed binary glTF container
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Wrong magic number or unsupported container version
    /// - Declared length disagrees with the actual data
    /// - Missing or misplaced JSON chunk
    #[error("[E1002] Invalid GLB container: {0}")]
    Container(String),

    /// The input could not be parsed as JSON
    ///
    /// **Error Code**: E2001
    ///
    /// **Suggestions**:
    /// - Check for trailing commas or unbalanced braces
    /// - Verify the text encoding is UTF-8
    #[error("[E2001] The document is invalid due to bad JSON formatting: {0}")]
    MalformedInput(String),

    /// The JSON document failed schema validation
    ///
    /// **Error Code**: E2002
    ///
    /// `path` is a JSON pointer (`#/accessors/0/count`) to the offending value.
    #[error("[E2002] Schema violation at {path} due to {description}")]
    SchemaViolation {
        /// JSON pointer to the failing value
        path: String,
        /// What the schema rule expected
        description: String,
    },

    /// The JSON document passed schema validation but cannot be mapped onto
    /// the document model
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - A value has the wrong JSON type
    /// - An index is negative or not an integer
    /// - A camera sub-object does not match its `type`
    #[error("[E2003] Invalid document: {0}")]
    InvalidDocument(String),

    /// A referenced id does not exist in its registry
    ///
    /// The message text is fixed and carries no error code.
    #[error("key {0} not in container")]
    NotFound(String),

    /// The document has neither a default scene nor any scene at all
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Document has no default scene and no scenes to fall back on")]
    DefaultSceneNotFound,

    /// An entity with the same id already exists in the registry
    ///
    /// **Error Code**: E3003
    #[error("[E3003] Duplicate id '{0}'")]
    DuplicateId(String),

    /// An entity with an empty id was appended with the throw-on-empty policy
    ///
    /// **Error Code**: E3004
    #[error("[E3004] Cannot append an entity with an empty id")]
    EmptyId,

    /// A document-level invariant does not hold
    ///
    /// **Error Code**: E3005
    ///
    /// **Common Causes**:
    /// - A node carries both a non-identity matrix and a non-identity TRS
    /// - A camera projection has `zfar <= znear` or a zero magnification
    /// - An image has both (or neither) a URI and a buffer view
    #[error("[E3005] Invariant violation: {0}")]
    InvariantViolation(String),

    /// A property holds the same extension name in both the typed and the
    /// opaque channel
    ///
    /// **Error Code**: E3006
    #[error(
        "[E3006] Extension '{0}' is present both as a registered payload and as an unregistered value"
    )]
    ExtensionCollision(String),

    /// An extension is present on a property but not listed in
    /// `extensionsUsed`
    ///
    /// **Error Code**: E3007
    ///
    /// **Suggestions**:
    /// - Call `Document::declare_extension` for every extension you attach
    #[error("[E3007] Extension '{0}' is not declared in extensionsUsed")]
    UndeclaredExtension(String),

    /// An entry of `extensionsRequired` is missing from `extensionsUsed`
    ///
    /// **Error Code**: E3008
    #[error("[E3008] Required extension '{0}' is not present in extensionsUsed")]
    MissingExtensionDeclaration(String),

    /// Typed extension access found no payload of the requested kind
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Extension payload '{0}' not found")]
    ExtensionNotFound(String),

    /// No serializer is registered for a payload kind in a property context
    ///
    /// **Error Code**: E4002
    ///
    /// **Suggestions**:
    /// - Register the payload kind for this context on the serializer
    /// - Use `WriterConfig::with_all_extensions` for the built-in KHR set
    #[error("[E4002] No handler registered for extension '{extension}' in context {context}")]
    NoHandler {
        /// Payload kind that could not be encoded
        extension: String,
        /// Owning property context
        context: PropertyContext,
    },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(io::Error::other(err))
        } else {
            Error::MalformedInput(err.to_string())
        }
    }
}

impl Error {
    /// Create an InvalidDocument error located at a JSON path
    ///
    /// # Example
    /// ```ignore
    /// Error::invalid_at("#/nodes/2/children", "expected an array of indices")
    /// ```
    pub fn invalid_at(path: &str, message: &str) -> Self {
        Error::InvalidDocument(format!("{}: {}", path, message))
    }

    /// Create an InvalidDocument error for a missing required member
    pub fn missing_member(path: &str, member: &str) -> Self {
        Error::InvalidDocument(format!(
            "{} is missing required member '{}'",
            path, member
        ))
    }

    /// Create a SchemaViolation error
    pub fn schema(path: impl Into<String>, description: impl Into<String>) -> Self {
        Error::SchemaViolation {
            path: path.into(),
            description: description.into(),
        }
    }

    /// Whether this error reports a broken document invariant
    ///
    /// True for invariant, collision, declaration and dangling-key errors;
    /// false for I/O, syntax and dispatch errors.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_)
                | Error::InvariantViolation(_)
                | Error::ExtensionCollision(_)
                | Error::UndeclaredExtension(_)
                | Error::MissingExtensionDeclaration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_verbatim() {
        let err = Error::NotFound("bar".to_string());
        assert_eq!(err.to_string(), "key bar not in container");
    }

    #[test]
    fn test_error_codes_in_messages() {
        let err = Error::EmptyId;
        assert!(err.to_string().starts_with("[E3004]"));

        let err = Error::schema("#/asset", "missing member 'version'");
        assert_eq!(
            err.to_string(),
            "[E2002] Schema violation at #/asset due to missing member 'version'"
        );

        let err = Error::NoHandler {
            extension: "KHR_materials_unlit".to_string(),
            context: PropertyContext::Node,
        };
        let msg = err.to_string();
        assert!(msg.contains("[E4002]"));
        assert!(msg.contains("KHR_materials_unlit"));
        assert!(msg.contains("Node"));
    }

    #[test]
    fn test_invalid_at_helper() {
        let err = Error::invalid_at("#/nodes/0/mesh", "expected a non-negative integer");
        assert_eq!(
            err.to_string(),
            "[E2003] Invalid document: #/nodes/0/mesh: expected a non-negative integer"
        );
    }

    #[test]
    fn test_invariant_classification() {
        assert!(Error::NotFound("x".into()).is_invariant_violation());
        assert!(Error::ExtensionCollision("x".into()).is_invariant_violation());
        assert!(Error::MissingExtensionDeclaration("x".into()).is_invariant_violation());
        assert!(Error::UndeclaredExtension("x".into()).is_invariant_violation());
        assert!(Error::InvariantViolation("x".into()).is_invariant_violation());
        assert!(!Error::DuplicateId("x".into()).is_invariant_violation());
        assert!(!Error::ExtensionNotFound("x".into()).is_invariant_violation());
        assert!(!Error::DefaultSceneNotFound.is_invariant_violation());
        assert!(!Error::MalformedInput("x".into()).is_invariant_violation());
        assert!(!Error::EmptyId.is_invariant_violation());
    }

    #[test]
    fn test_serde_json_error_maps_to_malformed() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{ bad")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::MalformedInput(_)));
    }
}
