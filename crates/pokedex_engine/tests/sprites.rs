use pokedex_engine::{collect_strings, harvest_urls};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn harvests_nested_urls_depth_first_without_duplicates() {
    let sprites = json!({
        "other": { "home": { "front_default": "http://x" } },
        "front_default": "http://y",
        "back_default": null,
        "versions": [ { "icon": "http://x" }, "not a url", 7 ]
    });

    assert_eq!(harvest_urls(&sprites), vec!["http://x", "http://y"]);
}

#[test]
fn custom_predicates_select_other_leaves() {
    let value = json!({ "a": "keep-1", "b": ["drop", { "c": "keep-2" }] });

    assert_eq!(
        collect_strings(&value, |s| s.starts_with("keep")),
        vec!["keep-1", "keep-2"]
    );
}

#[test]
fn scalar_root_is_handled() {
    assert_eq!(
        harvest_urls(&json!("https://only.test/a.png")),
        vec!["https://only.test/a.png"]
    );
    assert!(harvest_urls(&json!(null)).is_empty());
}
