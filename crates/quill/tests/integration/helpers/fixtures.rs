pub const NEVER: &str =
    "JSDoc @returns declaration set with \"never\" but return expression is present in function.";
pub const MISSING: &str =
    "JSDoc @returns declaration present but return expression not available in function.";

/// A declaration file with one function documented on line 3 by a single
/// `@tag {type_expression}`. `function` is the JSON of the function node.
pub fn declaration_file(tag: &str, type_expression: &str, function: &str) -> String {
    format!(
        r#"{{
    "declarations": [
        {{
            "jsdoc": {{
                "tags": [{{ "tag": "{tag}", "type": "{type_expression}" }}],
                "loc": {{ "start": {{ "line": 3, "column": 0 }}, "end": {{ "line": 5, "column": 3 }} }}
            }},
            "function": {function}
        }}
    ]
}}"#
    )
}

pub const RETURN_FIVE: &str = r#"{
    "body": {
        "type": "BlockStatement",
        "body": [{ "type": "ReturnStatement", "argument": { "type": "Literal", "value": 5 } }]
    }
}"#;

pub const RETURN_NOTHING: &str = r#"{
    "body": {
        "type": "BlockStatement",
        "body": [{ "type": "ReturnStatement", "argument": null }]
    }
}"#;

pub const GENERATOR: &str = r#"{
    "generator": true,
    "body": {
        "type": "BlockStatement",
        "body": [{ "type": "ExpressionStatement", "expression": { "type": "YieldExpression" } }]
    }
}"#;
