// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

#[wasm_bindgen_test]
fn session_mounts_and_unmounts() {
    uzy::start_session().unwrap();
    assert!(by_id("uzy-canvas").is_some());
    assert!(by_id("uzy-start").is_some());
    assert_eq!(by_id("uzy-start").and_then(|b| b.text_content()).as_deref(), Some("ВЗАИМОДЕЙСТВОВАТЬ"));

    assert!(uzy::begin().unwrap());
    assert!(!uzy::begin().unwrap());
    // nothing to answer during the transition
    assert!(!uzy::select_choice(0).unwrap());

    uzy::stop_session().unwrap();
    assert!(by_id("uzy-root").is_none());
    assert!(uzy::begin().is_err());
    assert!(uzy::stop_session().is_err());
}

#[wasm_bindgen_test]
fn dialogue_box_sits_inside_the_jitter_anchor() {
    uzy::start_session().unwrap();
    let dialogue = by_id("uzy-dialogue").expect("dialogue box");
    let parent = dialogue.parent_element().expect("anchor");
    assert_eq!(parent.id(), "uzy-dialogue-anchor");
    assert_eq!(parent.class_name(), "");
    assert!(!dialogue.class_name().contains("uzy-jitter"));
    uzy::stop_session().unwrap();
}

#[wasm_bindgen_test]
fn restart_replaces_the_session() {
    uzy::start_session().unwrap();
    uzy::start_session().unwrap();
    assert!(by_id("uzy-canvas").is_some());
    uzy::stop_session().unwrap();
    // only one session was live
    assert!(uzy::stop_session().is_err());
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen_test]
fn configure_requires_valid_json() {
    uzy::start_session().unwrap();
    assert!(uzy::configure(r#"{"count": 20}"#).is_ok());
    assert!(uzy::configure("{").is_err());
    uzy::stop_session().unwrap();
}

#[wasm_bindgen_test]
fn log_level_names() {
    assert!(uzy::set_log_level("debug"));
    assert!(!uzy::set_log_level("chatty"));
}
