//! Tests for completion flag persistence across restarts

use crate::common::{TestFixture, catalog_of};
use firstrun::store::{DEFAULT_FLAG_KEY, FlagStore, completed_at_key};
use firstrun::{NavEvent, Navigator};

#[test]
fn test_completion_survives_restart() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let (mut nav, first) = Navigator::initialize(catalog_of(3)?, fixture.store());
    assert_eq!(first.index(), Some(0));
    nav.on_next()?;
    nav.on_next()?;
    assert_eq!(nav.on_next()?, Some(NavEvent::Redirect));
    drop(nav);

    assert!(fixture.store_path.exists());
    let (relaunched, first) = Navigator::initialize(catalog_of(3)?, fixture.store());
    assert_eq!(first, NavEvent::Redirect);
    assert!(relaunched.is_completed());
    Ok(())
}

#[test]
fn test_unfinished_onboarding_restarts_at_first_page() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let (mut nav, _) = Navigator::initialize(catalog_of(3)?, fixture.store());
    nav.on_next()?;
    nav.on_next()?;
    drop(nav);

    assert!(!fixture.store_path.exists());
    let (relaunched, first) = Navigator::initialize(catalog_of(3)?, fixture.store());
    assert_eq!(first.index(), Some(0));
    assert_eq!(relaunched.current_index(), 0);
    Ok(())
}

#[test]
fn test_completion_records_timestamp() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let (mut nav, _) = Navigator::initialize(catalog_of(1)?, fixture.store());
    nav.on_next()?;

    let stamp = fixture.store().read(&completed_at_key(DEFAULT_FLAG_KEY))?;
    let stamp = stamp
        .as_ref()
        .and_then(|v| v.as_str())
        .ok_or("missing timestamp")?;
    chrono::DateTime::parse_from_rfc3339(stamp)?;
    Ok(())
}

#[test]
fn test_unwritable_store_surfaces_error_and_retries() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    // A directory where the preferences file should be makes every write fail.
    std::fs::create_dir_all(&fixture.store_path)?;

    let (mut nav, first) = Navigator::initialize(catalog_of(1)?, fixture.store());
    assert_eq!(first.index(), Some(0));

    let err = nav.on_next().err().ok_or("expected a store error")?;
    assert!(err.is_store_unavailable());
    assert!(!nav.is_completed());

    std::fs::remove_dir(&fixture.store_path)?;
    assert_eq!(nav.on_next()?, Some(NavEvent::Redirect));
    Ok(())
}

#[test]
fn test_unreadable_store_shows_onboarding() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;
    std::fs::create_dir_all(fixture.root().join("prefs"))?;
    std::fs::write(&fixture.store_path, "{ this is not json")?;

    let (mut nav, first) = Navigator::initialize(catalog_of(2)?, fixture.store());
    assert_eq!(first.index(), Some(0));

    nav.on_skip()?;
    assert!(fixture.store().is_completed(DEFAULT_FLAG_KEY)?);
    Ok(())
}

#[test]
fn test_custom_flag_key_is_independent() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let (mut nav, _) = Navigator::initialize_with_key(catalog_of(1)?, fixture.store(), "tourSeen");
    nav.on_next()?;

    let store = fixture.store();
    assert!(store.is_completed("tourSeen")?);
    assert!(!store.is_completed(DEFAULT_FLAG_KEY)?);
    Ok(())
}

#[test]
fn test_reset_shows_onboarding_again() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = TestFixture::new()?;

    let (mut nav, _) = Navigator::initialize(catalog_of(2)?, fixture.store());
    nav.on_skip()?;

    fixture.store().clear(DEFAULT_FLAG_KEY)?;

    let (_, first) = Navigator::initialize(catalog_of(2)?, fixture.store());
    assert_eq!(first.index(), Some(0));
    Ok(())
}
