//! Contents of a declaration file.
//!
//! Upstream parsers pair every function-like node with the documentation
//! block attached to it and, for class members, the block of the enclosing
//! class:
//!
//! ```json
//! {
//!   "declarations": [
//!     {
//!       "jsdoc": { "tags": [{ "tag": "returns", "type": "string" }] },
//!       "function": { "kind": "function", "body": { "type": "BlockStatement", "body": [] } }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::ast::{FunctionNode, SourceLocation};
use crate::jsdoc::DocComment;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationFile {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub function: FunctionNode,
    #[serde(default)]
    pub jsdoc: Option<DocComment>,
    #[serde(default)]
    pub class_jsdoc: Option<DocComment>,
}

impl Declaration {
    /// Where findings on this declaration are reported: the doc block if it
    /// has a location, otherwise the function itself.
    pub fn report_location(&self) -> SourceLocation {
        self.jsdoc
            .as_ref()
            .and_then(|doc| doc.loc)
            .or(self.function.loc)
            .unwrap_or_default()
    }
}
