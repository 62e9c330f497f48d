use super::*;

#[test]
fn minted_tokens_strictly_increase() {
    let mut gate = ResolutionGate::new();
    let first = gate.mint();
    let second = gate.mint();
    let third = gate.mint();

    assert!(first < second && second < third);
    assert_eq!(gate.latest_minted(), Some(third));
    assert_eq!(gate.highest_resolved(), None);
}

#[test]
fn first_resolution_is_always_admitted() {
    let mut gate = ResolutionGate::new();
    let first = gate.mint();
    let _second = gate.mint();

    assert!(gate.admit(first));
    assert_eq!(gate.highest_resolved(), Some(first));
}

#[test]
fn older_resolution_after_newer_is_refused() {
    let mut gate = ResolutionGate::new();
    let older = gate.mint();
    let newer = gate.mint();

    assert!(gate.admit(newer));
    assert!(!gate.admit(older));
    assert_eq!(gate.highest_resolved(), Some(newer));
}

#[test]
fn resolutions_in_issue_order_are_all_admitted() {
    let mut gate = ResolutionGate::new();
    let tokens: Vec<_> = (0..4).map(|_| gate.mint()).collect();

    for token in &tokens {
        assert!(gate.admit(*token));
    }
    assert_eq!(gate.highest_resolved(), tokens.last().copied());
}

#[test]
fn same_token_is_admitted_once() {
    let mut gate = ResolutionGate::new();
    let token = gate.mint();

    assert!(gate.admit(token));
    assert!(!gate.admit(token));
}
