//! Trees and tokens as JSON

use serde_json::{Map, Value, json};

use crate::{Expr, Token, lexer::unescape_phrase};

/// Convert an expression tree to JSON.
///
/// Every node has a `kind`; leaves carry `text` (and phrases their decoded
/// `value`), `INDEX` nodes carry `index`, interior nodes list `children`.
pub fn expr_to_json(expr: &Expr) -> Value {
    let mut node = Map::new();
    node.insert("kind".to_string(), Value::String(expr.kind().to_string()));

    match expr {
        Expr::Index { index, .. } => {
            node.insert("index".to_string(), Value::String(index.clone()));
        }
        Expr::Phrase(text) => {
            node.insert("text".to_string(), Value::String(text.clone()));
            // Parsed phrases always decode; a hand-built one may not.
            let value = unescape_phrase(text).map_or(Value::Null, Value::String);
            node.insert("value".to_string(), value);
        }
        _ => {
            if let Some(text) = expr.text() {
                node.insert("text".to_string(), Value::String(text.to_string()));
            }
        }
    }

    let children = expr.children();
    if !children.is_empty() {
        node.insert(
            "children".to_string(),
            Value::Array(children.into_iter().map(expr_to_json).collect()),
        );
    }
    Value::Object(node)
}

pub fn token_to_json(token: &Token) -> Value {
    json!({
        "kind": token.kind.name(),
        "text": token.text,
        "offset": token.position.offset,
        "line": token.position.line,
        "column": token.position.column,
        "hidden": token.is_hidden(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_tree_json() {
        let json = expr_to_json(&parse(r#"tags[2] = "a\tb""#).unwrap());
        assert_eq!(
            json,
            json!({
                "kind": "=",
                "children": [
                    {"kind": "INDEX", "index": "2", "children": [{"kind": "NAME", "text": "tags"}]},
                    {"kind": "PHRASE", "text": "\"a\\tb\"", "value": "a\tb"}
                ]
            })
        );
    }

    #[test]
    fn test_undecodable_phrase_has_null_value() {
        let phrase = Expr::Phrase(r#""\uD800""#.to_string());
        assert_eq!(
            expr_to_json(&phrase),
            json!({"kind": "PHRASE", "text": "\"\\uD800\"", "value": null})
        );
    }
}
