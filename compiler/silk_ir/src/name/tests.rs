use super::*;
use std::collections::HashMap;

#[test]
fn test_name_equality_is_by_content() {
    assert_eq!(Name::new("x"), Name::from("x"));
    assert_eq!(Name::new("x"), Name::from(String::from("x")));
    assert_ne!(Name::new("x"), Name::new("y"));
}

#[test]
fn test_name_lookup_by_str() {
    let mut map = HashMap::new();
    map.insert(Name::new("total"), 1);
    assert_eq!(map.get("total"), Some(&1));
    assert_eq!(map.get("missing"), None);
}

#[test]
fn test_name_clone_shares_text() {
    let a = Name::new("shared");
    let b = a.clone();
    assert!(std::ptr::eq(a.as_str(), b.as_str()));
}

#[test]
fn test_name_display_and_debug() {
    let name = Name::new("counter");
    assert_eq!(name.to_string(), "counter");
    assert_eq!(format!("{name:?}"), "Name(\"counter\")");
}

#[test]
fn test_name_ord() {
    let mut names = vec![Name::new("b"), Name::new("a"), Name::new("c")];
    names.sort();
    let sorted: Vec<&str> = names.iter().map(Name::as_str).collect();
    assert_eq!(sorted, ["a", "b", "c"]);
}
