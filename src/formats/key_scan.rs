/*!
 * Scan arbitrary JSON for keys written in Chinese characters.
 *
 * Projects that use source-language strings as keys can seed a new string
 * catalog, or a plain key list, from any JSON dump of those keys.
 */

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static HAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Han}").expect("han pattern is valid"));

/// Whether `text` contains at least one Han ideograph
pub fn contains_han(text: &str) -> bool {
    HAN_RE.is_match(text)
}

/// Object keys containing Han ideographs, at any depth, sorted and deduplicated
pub fn collect_han_keys(value: &Value) -> Vec<String> {
    let mut keys = BTreeSet::new();
    collect(value, &mut keys);
    keys.into_iter().collect()
}

/// One key per line, newline-terminated
pub fn render_key_list(keys: &[String]) -> String {
    keys.iter().map(|key| format!("{}\n", key)).collect()
}

fn collect(value: &Value, keys: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if contains_han(key) {
                    keys.insert(key.clone());
                }
                collect(child, keys);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect(item, keys)),
        _ => {}
    }
}
