use super::*;

#[test]
fn test_sets_are_dense_and_disjoint() {
    let mut classes = EquivalenceClasses::new();
    let ids: Vec<GroupId> = (0..4).map(|_| classes.add_set()).collect();

    assert_eq!(ids, vec![GroupId(0), GroupId(1), GroupId(2), GroupId(3)]);
    assert_eq!(classes.len(), 4);
    for &id in &ids {
        assert_eq!(classes.find(id), id);
        assert_eq!(classes.owner(id), None);
    }
}

#[test]
fn test_union_merges_transitively() {
    let mut classes = EquivalenceClasses::new();
    let a = classes.add_set();
    let b = classes.add_set();
    let c = classes.add_set();
    let d = classes.add_set();

    let root = classes.union(a, b);
    assert!(root == a || root == b);
    classes.union(b, c);

    assert!(classes.same_class(a, c));
    assert_eq!(classes.find(a), classes.find(c));
    assert!(!classes.same_class(a, d));
}

#[test]
fn test_owner_survives_union_in_either_direction() {
    let mut classes = EquivalenceClasses::new();
    let owner = classes.add_set();
    let joiner = classes.add_set();
    let late = classes.add_set();
    classes.set_owner(owner, owner);

    classes.union(joiner, owner);
    classes.union(owner, late);

    assert_eq!(classes.owner(joiner), Some(owner));
    assert_eq!(classes.owner(late), Some(owner));
    assert_eq!(classes.owner(owner), Some(owner));
}
