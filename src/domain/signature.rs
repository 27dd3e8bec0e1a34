// Method identity for calltree.
// A signature is the node identity of the call graph and the registry key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural identity of a method: declaring class, name, parameter types,
/// and return type. Equality and hashing are by value, so signatures from
/// the graph edge set and the class enumeration compare interchangeably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub class_name: String,
    pub method_name: String,
    #[serde(default)]
    pub parameter_types: Vec<String>,
    pub return_type: String,
}

impl MethodSignature {
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        parameter_types: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            parameter_types,
            return_type: return_type.into(),
        }
    }

    /// Root-section header form: `<Class: name>`.
    pub fn header(&self) -> String {
        format!("<{}: {}>", self.class_name, self.method_name)
    }

    /// Call-tree line form: `<Class: ReturnType name>`.
    pub fn qualified(&self) -> String {
        format!("<{}: {} {}>", self.class_name, self.return_type, self.method_name)
    }
}

/// Full form with parameter types, used by the raw graph dumps where
/// overloads must stay distinguishable.
impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}: {} {}({})>",
            self.class_name,
            self.return_type,
            self.method_name,
            self.parameter_types.join(",")
        )
    }
}
