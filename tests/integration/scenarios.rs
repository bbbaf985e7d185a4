//! End-to-end walks over a catalog with an in-memory flag store

use crate::common::catalog_of;
use firstrun::store::DEFAULT_FLAG_KEY;
use firstrun::{ButtonPolicy, MemoryStore, NavEvent, Navigator, NextLabel};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_five_page_fresh_install() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let (mut nav, first) = Navigator::initialize(catalog_of(5)?, store.clone());

    let mut rendered = vec![first.index()];
    for _ in 0..4 {
        rendered.push(nav.on_next()?.and_then(|e| e.index()));
    }
    assert_eq!(rendered, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(store.write_count(), 0);

    assert_eq!(nav.on_next()?, Some(NavEvent::Redirect));
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.get(DEFAULT_FLAG_KEY), Some(json!("true")));
    Ok(())
}

#[test]
fn test_single_page_catalog_is_first_and_last() -> Result<(), Box<dyn std::error::Error>> {
    let (mut nav, first) = Navigator::initialize(catalog_of(1)?, MemoryStore::new());

    let NavEvent::RenderPage { index, policy, .. } = first else {
        return Err("expected RenderPage".into());
    };
    assert_eq!(index, 0);
    assert_eq!(
        policy,
        ButtonPolicy {
            back_enabled: false,
            next_label: NextLabel::Finish
        }
    );

    assert_eq!(nav.on_next()?, Some(NavEvent::Redirect));
    assert!(nav.is_completed());
    Ok(())
}

#[test]
fn test_page_change_out_of_range_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let (mut nav, _) = Navigator::initialize(catalog_of(5)?, MemoryStore::new());
    nav.on_next()?;

    let result = nav.on_page_changed(7);
    assert!(matches!(
        result,
        Err(firstrun::Error::OutOfRange {
            index: 7,
            page_count: 5
        })
    ));
    assert_eq!(nav.current_index(), 1);
    Ok(())
}

#[test]
fn test_completed_flag_skips_all_pages() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::with_entry(DEFAULT_FLAG_KEY, json!("yes"));
    let (mut nav, first) = Navigator::initialize(catalog_of(5)?, store.clone());

    assert_eq!(first, NavEvent::Redirect);
    assert_eq!(nav.on_next()?, None);
    assert_eq!(nav.on_back(), None);
    assert_eq!(nav.on_page_changed(2)?, None);
    assert_eq!(store.write_count(), 0);
    Ok(())
}

#[test]
fn test_back_at_first_page_emits_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let (mut nav, _) = Navigator::initialize(catalog_of(3)?, MemoryStore::new());
    let before = nav.state();

    assert_eq!(nav.on_back(), None);
    assert_eq!(nav.on_back(), None);
    assert_eq!(nav.state(), before);
    Ok(())
}

#[test]
fn test_policy_follows_every_transition() -> Result<(), Box<dyn std::error::Error>> {
    let (mut nav, _) = Navigator::initialize(catalog_of(4)?, MemoryStore::new());
    let expected = [
        (false, NextLabel::Next),
        (true, NextLabel::Next),
        (true, NextLabel::Next),
        (true, NextLabel::Finish),
    ];

    for (index, (back_enabled, next_label)) in expected.iter().enumerate() {
        nav.on_page_changed(index)?;
        assert_eq!(nav.policy().back_enabled, *back_enabled);
        assert_eq!(nav.policy().next_label, *next_label);
    }

    nav.on_back();
    assert_eq!(nav.policy().next_label, NextLabel::Next);
    Ok(())
}

#[test]
fn test_swipe_then_finish() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let (mut nav, _) = Navigator::initialize(catalog_of(5)?, store.clone());

    let event = nav.on_page_changed(4)?;
    assert_eq!(event.and_then(|e| e.index()), Some(4));
    assert_eq!(nav.on_next()?, Some(NavEvent::Redirect));
    assert_eq!(store.write_count(), 1);
    Ok(())
}
