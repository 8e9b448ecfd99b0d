use serde::{Deserialize, Serialize};

/// JSON form is the bare value: `null`, `true`, `1.5`, `"text"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}
