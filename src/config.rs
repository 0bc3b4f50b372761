//! Reader and writer configuration
//!
//! Both configurations are cheap to clone: handler tables and schema
//! validators are shared through [`Arc`].

use std::fmt;
use std::sync::Arc;

use crate::extension::{ExtensionDeserializer, ExtensionSerializer};
use crate::schema::{CoreSchema, SchemaValidator};

/// Configuration for decoding glTF documents
///
/// # Example
///
/// ```
/// use libgltf::ParserConfig;
///
/// // Built-in extension decoders, core schema checks, invariant checks
/// let config = ParserConfig::with_all_extensions();
/// assert!(config.check_invariants());
///
/// // Keep every extension opaque and skip the schema
/// let raw = ParserConfig::new().without_schema();
/// assert!(raw.deserializer().is_empty());
/// ```
#[derive(Clone)]
pub struct ParserConfig {
    deserializer: Arc<ExtensionDeserializer>,
    schema: Option<Arc<dyn SchemaValidator>>,
    check_invariants: bool,
}

impl ParserConfig {
    /// Configuration with no extension decoders
    ///
    /// Every extension stays in the opaque channel.
    pub fn new() -> Self {
        Self {
            deserializer: Arc::new(ExtensionDeserializer::new()),
            schema: Some(Arc::new(CoreSchema)),
            check_invariants: true,
        }
    }

    /// Configuration that decodes every built-in extension
    pub fn with_all_extensions() -> Self {
        #[cfg(feature = "khr")]
        {
            Self::new().with_deserializer(crate::extensions::khr_deserializer())
        }
        #[cfg(not(feature = "khr"))]
        {
            Self::new()
        }
    }

    /// Use the given extension decoders
    pub fn with_deserializer(mut self, deserializer: ExtensionDeserializer) -> Self {
        self.deserializer = Arc::new(deserializer);
        self
    }

    /// Share an existing decoder table
    pub fn with_shared_deserializer(mut self, deserializer: Arc<ExtensionDeserializer>) -> Self {
        self.deserializer = deserializer;
        self
    }

    /// Validate input with a custom schema service
    pub fn with_schema(mut self, schema: Arc<dyn SchemaValidator>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Skip schema validation
    pub fn without_schema(mut self) -> Self {
        self.schema = None;
        self
    }

    /// Enable or disable the invariant checks run after decoding
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }

    /// Extension decoders in use
    pub fn deserializer(&self) -> &ExtensionDeserializer {
        &self.deserializer
    }

    /// Schema service in use, if any
    pub fn schema(&self) -> Option<&dyn SchemaValidator> {
        self.schema.as_deref()
    }

    /// Whether invariants are checked after decoding
    pub fn check_invariants(&self) -> bool {
        self.check_invariants
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::with_all_extensions()
    }
}

impl fmt::Debug for ParserConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserConfig")
            .field("deserializer", &self.deserializer)
            .field("schema", &self.schema.is_some())
            .field("check_invariants", &self.check_invariants)
            .finish()
    }
}

/// Configuration for encoding glTF documents
#[derive(Debug, Clone)]
pub struct WriterConfig {
    serializer: Arc<ExtensionSerializer>,
    pretty: bool,
}

impl WriterConfig {
    /// Pretty-printing configuration with no extension encoders
    ///
    /// Writing a document that holds a typed payload fails with
    /// [`Error::NoHandler`](crate::Error::NoHandler) under this
    /// configuration.
    pub fn new() -> Self {
        Self {
            serializer: Arc::new(ExtensionSerializer::new()),
            pretty: true,
        }
    }

    /// Configuration that encodes every built-in extension
    pub fn with_all_extensions() -> Self {
        #[cfg(feature = "khr")]
        {
            Self::new().with_serializer(crate::extensions::khr_serializer())
        }
        #[cfg(not(feature = "khr"))]
        {
            Self::new()
        }
    }

    /// Use the given extension encoders
    pub fn with_serializer(mut self, serializer: ExtensionSerializer) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Share an existing encoder table
    pub fn with_shared_serializer(mut self, serializer: Arc<ExtensionSerializer>) -> Self {
        self.serializer = serializer;
        self
    }

    /// Indent output with four spaces (`true`) or emit it on one line
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Extension encoders in use
    pub fn serializer(&self) -> &ExtensionSerializer {
        &self.serializer
    }

    /// Whether output is indented
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::with_all_extensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .without_schema()
            .with_invariant_checks(false);
        assert!(config.schema().is_none());
        assert!(!config.check_invariants());
        assert!(config.deserializer().is_empty());
    }

    #[cfg(feature = "khr")]
    #[test]
    fn test_all_extensions_registers_khr_handlers() {
        let parser = ParserConfig::with_all_extensions();
        assert!(
            parser
                .deserializer()
                .has_handler("KHR_materials_unlit", crate::PropertyContext::Material)
        );

        let writer = WriterConfig::with_all_extensions();
        assert!(!writer.serializer().is_empty());
        assert!(writer.pretty());
    }

    #[test]
    fn test_writer_config_compact() {
        let config = WriterConfig::new().with_pretty(false);
        assert!(!config.pretty());
        assert!(config.serializer().is_empty());
    }
}
