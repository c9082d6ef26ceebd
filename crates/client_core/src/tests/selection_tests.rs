use super::*;

fn id(value: &str) -> Identity {
    Identity::from(value)
}

#[test]
fn starts_empty() {
    let registry = SelectionRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.has("Sunday"));
}

#[test]
fn add_and_remove_are_idempotent() {
    let mut registry = SelectionRegistry::new();

    registry.add(id("Sunday"));
    registry.add(id("Sunday"));
    assert!(registry.has("Sunday"));
    assert_eq!(registry.len(), 1);

    registry.remove("Sunday");
    registry.remove("Sunday");
    assert!(!registry.has("Sunday"));
    assert!(registry.is_empty());
}

#[test]
fn removing_absent_identity_is_a_no_op() {
    let mut registry = SelectionRegistry::new();
    registry.add(id("Guernica"));

    registry.remove("Starry Night");

    assert_eq!(registry.identities(), vec![id("Guernica")]);
}

#[test]
fn membership_reflects_last_operation_per_identity() {
    let operations: &[(&str, bool)] = &[
        ("a", true),
        ("b", true),
        ("a", false),
        ("c", true),
        ("b", true),
        ("a", true),
        ("c", false),
        ("c", false),
        ("b", false),
        ("a", true),
    ];

    let mut registry = SelectionRegistry::new();
    for (identity, add) in operations {
        if *add {
            registry.add(id(identity));
        } else {
            registry.remove(identity);
        }
    }

    assert!(registry.has("a"));
    assert!(!registry.has("b"));
    assert!(!registry.has("c"));

    // Replaying only one identity's operations gives the same answer.
    for target in ["a", "b", "c"] {
        let mut isolated = SelectionRegistry::new();
        for (identity, add) in operations.iter().filter(|(identity, _)| *identity == target) {
            if *add {
                isolated.add(id(identity));
            } else {
                isolated.remove(identity);
            }
        }
        assert_eq!(isolated.has(target), registry.has(target), "identity {target}");
    }
}

#[test]
fn add_many_matches_repeated_add_and_leaves_others_alone() {
    let mut bulk = SelectionRegistry::new();
    bulk.add(id("Guernica"));
    bulk.add_many([id("Sunday"), id("Starry Night"), id("Sunday")]);

    let mut single = SelectionRegistry::new();
    single.add(id("Guernica"));
    single.add(id("Sunday"));
    single.add(id("Starry Night"));

    assert_eq!(bulk, single);
    assert_eq!(
        bulk.identities(),
        vec![id("Guernica"), id("Starry Night"), id("Sunday")]
    );
}
