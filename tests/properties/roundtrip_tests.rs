use std::collections::BTreeMap;

use proptest::prelude::*;

use skillcheck::frontmatter::{Value, parse_fallback};

fn arb_word() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9][a-zA-Z0-9 ,.]{0,20}[a-zA-Z0-9]"
}

fn arb_scalars() -> impl Strategy<Value = BTreeMap<String, (String, bool)>> {
    prop::collection::btree_map(r"s_[a-z][a-z0-9_-]{0,8}", (arb_word(), any::<bool>()), 1..6)
}

fn arb_nested() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(r"[a-z][a-z0-9-]{0,10}", arb_word(), 1..5)
}

fn quoted(value: &str, quote: bool) -> String {
    if quote {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn encode(
    scalars: &BTreeMap<String, (String, bool)>,
    nested: &BTreeMap<String, String>,
    items: &[String],
) -> String {
    let mut out = String::new();
    for (key, (value, quote)) in scalars {
        out.push_str(&format!("{key}: {}\n", quoted(value, *quote)));
    }
    out.push_str("meta:\n");
    for (key, value) in nested {
        out.push_str(&format!("  {key}: {value}\n"));
    }
    out.push_str("items:\n");
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
    out
}

proptest! {
    #[test]
    fn restricted_grammar_roundtrip(
        scalars in arb_scalars(),
        nested in arb_nested(),
        items in prop::collection::vec(arb_word(), 1..5),
    ) {
        let parsed = parse_fallback(&encode(&scalars, &nested, &items));

        prop_assert_eq!(parsed.len(), scalars.len() + 2);
        for (key, (value, _)) in &scalars {
            prop_assert_eq!(parsed.get(key), Some(&Value::String(value.clone())));
        }

        let meta = parsed.get("meta").and_then(Value::as_map);
        prop_assert!(meta.is_some());
        let meta = meta.unwrap();
        prop_assert_eq!(meta.len(), nested.len());
        for (key, value) in &nested {
            prop_assert_eq!(meta.get(key), Some(&Value::String(value.clone())));
        }

        let expected: Vec<Value> = items.iter().map(|item| Value::String(item.clone())).collect();
        prop_assert_eq!(parsed.get("items"), Some(&Value::List(expected)));
    }

    #[test]
    fn fallback_never_panics(text in any::<String>()) {
        let _ = parse_fallback(&text);
    }
}
