//! Conversation state store behaviour through the public API

mod helpers;

use std::sync::Arc;
use std::thread;
use proptest::prelude::*;
use gedie::state::{ConversationData, ConversationField, ConversationState, ConversationStateStore};
use helpers::{OTHER_USER, TEST_USER};

#[test]
fn test_merge_preserves_earlier_fields() {
    let store = ConversationStateStore::new();

    store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(3));
    store.set_state(TEST_USER, ConversationState::ConfirmingExpense, ConversationData::with_amount(42.5));

    let data = store.get_data(TEST_USER);
    assert_eq!(data.category_id, Some(3));
    assert_eq!(data.amount, Some(42.5));
    assert_eq!(store.get_state(TEST_USER), ConversationState::ConfirmingExpense);
}

#[test]
fn test_update_preserves_state_and_other_fields() {
    let store = ConversationStateStore::new();
    store.set_state(TEST_USER, ConversationState::WaitingDescription, ConversationData {
        category_id: Some(1),
        amount: Some(10.0),
        ..Default::default()
    });

    store.update_data(TEST_USER, ConversationField::Description("almoço".to_string()));

    let data = store.get_data(TEST_USER);
    assert_eq!(store.get_state(TEST_USER), ConversationState::WaitingDescription);
    assert_eq!(data.category_id, Some(1));
    assert_eq!(data.amount, Some(10.0));
    assert_eq!(data.description.as_deref(), Some("almoço"));
}

#[test]
fn test_update_on_unknown_user_creates_idle_entry() {
    let store = ConversationStateStore::new();

    store.update_data(TEST_USER, ConversationField::CategoryId(9));

    assert_eq!(store.get_state(TEST_USER), ConversationState::Idle);
    assert_eq!(store.get_data(TEST_USER).category_id, Some(9));
    assert_eq!(store.list_all_states().len(), 1);
}

#[test]
fn test_clear_resets_fully() {
    let store = ConversationStateStore::new();
    store.set_state(TEST_USER, ConversationState::ConfirmingExpense, ConversationData {
        category_id: Some(1),
        amount: Some(5.0),
        ..Default::default()
    });

    store.clear_state(TEST_USER);

    assert_eq!(store.get_state(TEST_USER), ConversationState::Idle);
    assert!(store.get_data(TEST_USER).is_empty());
    assert!(!store.is_waiting_input(TEST_USER));
    assert!(store.list_all_states().is_empty());

    // Clearing twice is harmless
    store.clear_state(TEST_USER);
}

#[test]
fn test_reads_do_not_create_entries() {
    let store = ConversationStateStore::new();

    assert_eq!(store.get_state(TEST_USER), ConversationState::Idle);
    assert!(store.get_data(TEST_USER).is_empty());
    assert!(!store.is_waiting_input(TEST_USER));

    assert!(store.list_all_states().is_empty());
    assert_eq!(store.stats().total, 0);
}

#[test]
fn test_idempotent_overwrite() {
    let store = ConversationStateStore::new();
    store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(4));

    store.update_data(TEST_USER, ConversationField::Amount(7.25));
    let once = store.get_data(TEST_USER);
    store.update_data(TEST_USER, ConversationField::Amount(7.25));

    assert_eq!(store.get_data(TEST_USER), once);
}

#[test]
fn test_waiting_input_states() {
    let store = ConversationStateStore::new();
    let expected = [
        (ConversationState::Idle, false),
        (ConversationState::SelectingCategory, false),
        (ConversationState::WaitingAmount, true),
        (ConversationState::WaitingDescription, true),
        (ConversationState::ConfirmingExpense, false),
    ];

    for (state, waiting) in expected {
        store.set_state(TEST_USER, state, ConversationData::default());
        assert_eq!(store.is_waiting_input(TEST_USER), waiting, "state {}", state);
    }
}

#[test]
fn test_full_expense_flow_in_store() {
    let store = ConversationStateStore::new();

    store.set_state(TEST_USER, ConversationState::SelectingCategory, ConversationData::default());
    store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(3));
    assert!(store.is_waiting_input(TEST_USER));

    store.update_data(TEST_USER, ConversationField::Amount(42.5));
    let gathered = store.get_data(TEST_USER);
    store.set_state(TEST_USER, ConversationState::ConfirmingExpense, gathered);

    let data = store.get_data(TEST_USER);
    assert_eq!(data.category_id, Some(3));
    assert_eq!(data.amount, Some(42.5));
    assert!(!store.is_waiting_input(TEST_USER));

    store.clear_state(TEST_USER);
    assert_eq!(store.get_state(TEST_USER), ConversationState::Idle);
    assert!(store.get_data(TEST_USER).is_empty());
}

#[test]
fn test_two_users_are_independent() {
    let store = ConversationStateStore::new();

    store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(1));
    store.set_state(OTHER_USER, ConversationState::WaitingDescription, ConversationData::with_category(2));
    store.clear_state(TEST_USER);

    assert_eq!(store.get_state(TEST_USER), ConversationState::Idle);
    assert_eq!(store.get_state(OTHER_USER), ConversationState::WaitingDescription);
    assert_eq!(store.get_data(OTHER_USER).category_id, Some(2));
}

#[test]
fn test_list_all_states_summary() {
    let store = ConversationStateStore::new();
    store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(3));
    store.set_state(OTHER_USER, ConversationState::SelectingCategory, ConversationData::default());

    let states = store.list_all_states();

    assert_eq!(states.len(), 2);
    assert!(states[&TEST_USER].starts_with("waiting_amount - "));
    assert!(states[&TEST_USER].contains("category_id: 3"));
    assert!(states[&OTHER_USER].starts_with("selecting_category - "));
}

#[test]
fn test_concurrent_users_do_not_interfere() {
    let store = Arc::new(ConversationStateStore::new());

    let handles: Vec<_> = (1..=8i64)
        .map(|user_id| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..100 {
                    store.set_state(user_id, ConversationState::WaitingAmount, ConversationData::with_category(user_id));
                    store.update_data(user_id, ConversationField::Amount(round as f64 + 1.0));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for user_id in 1..=8i64 {
        let data = store.get_data(user_id);
        assert_eq!(data.category_id, Some(user_id));
        assert_eq!(data.amount, Some(100.0));
    }
}

fn partial_data() -> impl Strategy<Value = ConversationData> {
    (
        proptest::option::of(1i64..1_000),
        proptest::option::of(0.01f64..10_000.0),
        proptest::option::of("[a-z ]{1,12}"),
    )
        .prop_map(|(category_id, amount, description)| ConversationData {
            category_id,
            amount,
            description,
            photo_analysis: None,
        })
}

proptest! {
    #[test]
    fn prop_each_field_keeps_its_last_set_value(partials in proptest::collection::vec(partial_data(), 1..8)) {
        let store = ConversationStateStore::new();

        for partial in &partials {
            store.set_state(TEST_USER, ConversationState::ConfirmingExpense, partial.clone());
        }

        let data = store.get_data(TEST_USER);
        prop_assert_eq!(data.category_id, partials.iter().rev().find_map(|p| p.category_id));
        prop_assert_eq!(data.amount, partials.iter().rev().find_map(|p| p.amount));
        prop_assert_eq!(data.description, partials.iter().rev().find_map(|p| p.description.clone()));
    }

    #[test]
    fn prop_update_never_touches_state(amount in 0.01f64..10_000.0) {
        let store = ConversationStateStore::new();
        store.set_state(TEST_USER, ConversationState::WaitingAmount, ConversationData::with_category(1));

        store.update_data(TEST_USER, ConversationField::Amount(amount));

        prop_assert_eq!(store.get_state(TEST_USER), ConversationState::WaitingAmount);
        prop_assert_eq!(store.get_data(TEST_USER).category_id, Some(1));
    }
}
