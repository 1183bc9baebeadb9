//! Tool Definitions
//!
//! A tool is a named, remotely invocable operation: a literal description,
//! the JSON Schema of its arguments, and a type-erased async handler.
//!
//! Handlers are typed at construction time. [`Tool::new`] takes a function
//! over a parameter struct `P`, derives the input schema from `P`, and wraps
//! the function so that raw JSON arguments are deserialized into `P` before
//! the call.

mod error;
mod registry;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::ToolError;
pub use registry::{RegistryError, ToolRegistry};

/// JSON object carrying tool arguments or a schema.
pub type JsonObject = serde_json::Map<String, Value>;

/// Result type returned by every tool handler.
pub type ToolResult = Result<Value, ToolError>;

/// Type-erased tool handler.
pub type ToolHandler = Arc<dyn Fn(JsonObject) -> BoxFuture<'static, ToolResult> + Send + Sync>;

/// A registered tool: name, description, input schema and handler.
#[derive(Clone)]
pub struct Tool {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    handler: ToolHandler,
}

impl Tool {
    /// Build a tool from a typed handler.
    ///
    /// The input schema is generated from `P`. Arguments that fail to
    /// deserialize into `P` resolve to [`ToolError::InvalidArguments`]
    /// without invoking `handler`.
    pub fn new<P, F, Fut, E>(name: &'static str, description: &'static str, handler: F) -> Self
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Into<ToolError> + 'static,
    {
        let input_schema = Arc::new(input_schema_for::<P>());
        let erased: ToolHandler = Arc::new(move |args: JsonObject| {
            match serde_json::from_value::<P>(Value::Object(args)) {
                Ok(params) => handler(params)
                    .map(|r: Result<Value, E>| r.map_err(Into::<ToolError>::into))
                    .boxed(),
                Err(e) => future::ready(Err(ToolError::InvalidArguments(e.to_string()))).boxed(),
            }
        });

        Self {
            name,
            description,
            input_schema,
            handler: erased,
        }
    }

    /// Tool name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// JSON Schema of the tool's arguments.
    #[must_use]
    pub fn input_schema(&self) -> Arc<JsonObject> {
        Arc::clone(&self.input_schema)
    }

    /// Invoke the handler with raw JSON arguments.
    pub fn call(&self, args: JsonObject) -> BoxFuture<'static, ToolResult> {
        (self.handler)(args)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Generate an MCP-compatible (draft-07, object-typed) schema for `P`.
fn input_schema_for<P: JsonSchema>() -> JsonObject {
    let schema = schemars::generate::SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<P>();

    let mut object = match serde_json::to_value(&schema) {
        Ok(Value::Object(object)) => object,
        _ => JsonObject::new(),
    };
    object
        .entry("type")
        .or_insert_with(|| Value::String("object".to_string()));
    object
}
