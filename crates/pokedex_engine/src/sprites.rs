use serde_json::Value;

/// Depth-first walk of an untyped JSON value collecting every string leaf
/// accepted by `keep`. Object members are visited in document order and
/// arrays in index order. Repeated strings are kept once, at first sight.
pub fn collect_strings(value: &Value, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        match node {
            Value::String(text) => {
                if keep(text) && !found.contains(text) {
                    found.push(text.clone());
                }
            }
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(members) => {
                let children: Vec<&Value> = members.values().collect();
                stack.extend(children.into_iter().rev());
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }
    found
}

/// Every HTTP(S) URL anywhere inside a sprite payload.
pub fn harvest_urls(sprites: &Value) -> Vec<String> {
    collect_strings(sprites, looks_like_url)
}

fn looks_like_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

