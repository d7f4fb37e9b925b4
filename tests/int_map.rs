// IntMap integration tests.
//
// Invariants exercised:
// - Values move in and out by ownership: put returns the replaced value,
//   remove returns the stored value.
// - Payload factories only run for absent keys.
// - Growth never drops or duplicates owned values.
use int_keyed_map::IntMap;
use std::rc::Rc;

#[test]
fn put_get_remove_owned() {
    let mut m: IntMap<String> = IntMap::new(8);
    assert_eq!(m.put(4, "four".to_string()), None);
    assert_eq!(m.put(-4, "minus four".to_string()), None);
    assert_eq!(m.get(4).map(String::as_str), Some("four"));
    assert_eq!(m.get(-4).map(String::as_str), Some("minus four"));
    assert_eq!(m.remove(4), Some("four".to_string()));
    assert_eq!(m.get(4), None);
    assert_eq!(m.len(), 1);
}

// Test: every stored value is dropped exactly once.
// Verifies: growth relinks values without cloning; remove and clear release them.
#[test]
fn growth_and_clear_release_values() {
    let token = Rc::new(());
    let mut m: IntMap<Rc<()>> = IntMap::new(3);
    for k in 0..64 {
        m.put(k * 3, token.clone());
    }
    assert_eq!(Rc::strong_count(&token), 65);
    assert!(m.remove(0).is_some());
    assert_eq!(Rc::strong_count(&token), 64);
    m.clear();
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
fn get_mut_and_for_each() {
    let mut m: IntMap<Vec<i32>> = IntMap::new(4);
    m.put(1, vec![1]);
    m.put(2, vec![2]);
    m.get_mut(1).expect("present").push(10);
    let mut total = 0;
    m.for_each(|k, v| total += k * v.iter().sum::<i32>());
    assert_eq!(total, 11 + 4);
}

#[test]
fn put_if_absent_returns_existing() {
    let mut m: IntMap<&'static str> = IntMap::new(4);
    assert_eq!(m.put_if_absent(8, "a"), None);
    assert_eq!(m.put_if_absent(8, "b"), Some(&"a"));
    assert_eq!(m.get(8), Some(&"a"));
}

#[test]
fn debug_renders_pairs() {
    let m: IntMap<&str> = [(1, "x")].into_iter().collect();
    assert_eq!(format!("{m:?}"), r#"{1: "x"}"#);
}
