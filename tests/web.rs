// Browser tests for the DOM layer: `wasm-pack test --headless --firefox`.
// All tests share one mounted game, so each starts from `reset()`.
#![cfg(target_arch = "wasm32")]

use cat_catch::{InputSource, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn by_id(id: &str) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

fn text_of(id: &str) -> Option<String> {
    by_id(id)?.text_content()
}

fn display_of(id: &str) -> String {
    by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .and_then(|el| el.style().get_property_value("display").ok())
        .unwrap_or_default()
}

fn cat(slot: usize) -> Element {
    by_id(&format!("spot{}", slot + 1))
        .and_then(|spot| spot.query_selector(".cat").ok().flatten())
        .expect("cat element")
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

fn fresh_game() {
    cat_catch::mount_game().expect("mount");
    dom::with_game(|g| g.reset()).expect("mounted");
}

// Start a round and jump to its first spawn; returns the slot showing a cat.
fn first_cat() -> usize {
    dom::with_game(|g| {
        g.start();
        let t = g.now_ms() + g.config().spawn_interval_ms;
        g.advance(t);
        g.shown_slot()
    })
    .flatten()
    .expect("a cat after the first spawn")
}

fn dispatch(target: &Element, kind: &str) {
    let evt = Event::new(kind).expect("event");
    target.dispatch_event(&evt).expect("dispatch");
}

#[wasm_bindgen_test]
fn mount_builds_board_and_idle_readouts() {
    fresh_game();
    assert!(dom::is_mounted());
    for slot in 1..=9 {
        assert!(text_of(&format!("spot{slot}")).is_some());
    }
    assert_eq!(text_of("score").as_deref(), Some("0"));
    assert_eq!(text_of("time").as_deref(), Some("30"));
    assert_eq!(text_of("startBtn").as_deref(), Some("Start Game"));
    assert_eq!(display_of("gameOver"), "none");
}

#[wasm_bindgen_test]
fn start_and_reset_update_controls() {
    fresh_game();
    cat_catch::start_game().expect("start");
    assert_eq!(text_of("startBtn").as_deref(), Some("Playing..."));
    assert_eq!(dom::with_game(|g| g.state().running), Some(true));

    cat_catch::reset_game().expect("reset");
    assert_eq!(text_of("startBtn").as_deref(), Some("Start Game"));
    assert_eq!(text_of("time").as_deref(), Some("30"));
    assert_eq!(dom::with_game(|g| g.state().running), Some(false));
}

#[wasm_bindgen_test]
fn cat_classes_follow_spawn_and_catch() {
    fresh_game();
    let slot = first_cat();
    let el = cat(slot);
    assert!(has_class(&el, "show"));
    assert!(!has_class(&el, "clicked"));

    dispatch(&el, "click");
    assert!(has_class(&el, "clicked"));
    assert!(!has_class(&el, "show"));
    assert_eq!(text_of("score").as_deref(), Some("10"));

    dom::with_game(|g| {
        let t = g.now_ms() + g.config().hit_effect_ms;
        g.advance(t);
    });
    assert!(!has_class(&el, "clicked"));
    assert!(!has_class(&el, "show"));
}

#[wasm_bindgen_test]
fn game_over_panel_shows_final_score_and_play_again_resets() {
    fresh_game();
    let slot = first_cat();
    dom::with_game(|g| {
        g.activate(slot, InputSource::Click);
        let t = g.now_ms() + 30_000;
        g.advance(t);
    });
    assert_eq!(text_of("finalScore").as_deref(), Some("10"));
    assert_eq!(display_of("gameOver"), "block");
    assert_eq!(text_of("time").as_deref(), Some("0"));
    assert_eq!(text_of("startBtn").as_deref(), Some("Start Game"));
    assert!((0..9).all(|s| !has_class(&cat(s), "show")));

    let again = by_id("playAgainBtn")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .expect("play again button");
    again.click();
    assert_eq!(display_of("gameOver"), "none");
    assert_eq!(text_of("time").as_deref(), Some("30"));
    assert_eq!(text_of("score").as_deref(), Some("0"));
}

#[wasm_bindgen_test]
fn cancelled_touch_releases_the_guard() {
    fresh_game();
    let slot = first_cat();
    let empty = cat((slot + 1) % 9);
    dispatch(&empty, "touchstart");
    dispatch(&empty, "touchcancel");
    dispatch(&cat(slot), "click");
    assert_eq!(dom::with_game(|g| g.state().score), Some(10));
}
