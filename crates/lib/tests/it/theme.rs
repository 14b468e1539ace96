//! Theme preference integration tests

use pfeps_session::{
    constants::{THEME_KEY, TOKEN_KEY, USER_KEY},
    session::SessionState,
    storage::Storage,
    theme::{ThemeMode, ThemePreference},
    transport::{DEV_EMAIL, DEV_PASSWORD},
};

use crate::helpers::{open_session, test_storage};

#[test]
fn defaults_to_dark_when_nothing_is_stored() {
    let theme = ThemePreference::load(test_storage());
    assert_eq!(theme.mode(), ThemeMode::Dark);
}

#[test]
fn only_the_exact_light_marker_selects_light() {
    let storage = test_storage();
    storage.set(THEME_KEY, "light").unwrap();
    assert_eq!(ThemePreference::load(storage.clone()).mode(), ThemeMode::Light);

    storage.set(THEME_KEY, "LIGHT").unwrap();
    assert_eq!(ThemePreference::load(storage.clone()).mode(), ThemeMode::Dark);

    storage.set(THEME_KEY, "blue").unwrap();
    assert_eq!(ThemePreference::load(storage).mode(), ThemeMode::Dark);
}

#[test]
fn toggle_writes_through_synchronously() {
    let storage = test_storage();
    let theme = ThemePreference::load(storage.clone());

    assert_eq!(theme.toggle(), ThemeMode::Light);
    assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));

    assert_eq!(theme.toggle(), ThemeMode::Dark);
    assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[tokio::test]
async fn toggling_never_touches_the_session() {
    let (session, storage) = open_session();
    session.login(DEV_EMAIL, DEV_PASSWORD).await.unwrap();
    let token_before = storage.get(TOKEN_KEY).unwrap();
    let user_before = storage.get(USER_KEY).unwrap();

    let theme = ThemePreference::load(storage.clone());
    theme.toggle();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Authenticated);
    assert!(snapshot.user.is_some());
    assert_eq!(storage.get(TOKEN_KEY).unwrap(), token_before);
    assert_eq!(storage.get(USER_KEY).unwrap(), user_before);
}
