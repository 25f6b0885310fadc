use super::*;

#[test]
fn test_clones_share_writes() {
    let a = SharedMutableRegistry::new(Vec::<u32>::new());
    let b = a.clone();
    b.write().push(7);
    assert_eq!(*a.read(), vec![7]);
    assert!(a.ptr_eq(&b));
}

#[test]
fn test_independent_registries_are_distinct() {
    let a = SharedMutableRegistry::<Vec<u32>>::default();
    let b = SharedMutableRegistry::<Vec<u32>>::default();
    assert!(!a.ptr_eq(&b));
}

#[test]
fn test_debug_shows_contents() {
    let reg = SharedMutableRegistry::new(vec![1, 2]);
    assert_eq!(format!("{reg:?}"), "SharedMutableRegistry([1, 2])");
}
