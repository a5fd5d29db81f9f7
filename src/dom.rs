//! Browser surface for Cat Catch.
//!
//! Finds (or builds) the board markup, forwards clicks and touches to the
//! controller, drives its clock from `requestAnimationFrame`, and renders the
//! events it emits. All game rules stay in [`crate::game`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAudioElement, HtmlButtonElement, HtmlElement, window};

use crate::error::UiError;
use crate::game::feedback::{ScoreRank, start_button_label, time_style};
use crate::game::slot::{CAT_SOUNDS, CLICKED_CLASS, SHOW_CLASS, slot_element_id};
use crate::game::{Cue, GameController, GameEvent, GameState, InputSource, SlotState};

const SCORE_ID: &str = "score";
const TIME_ID: &str = "time";
const SCORE_COMMENT_ID: &str = "scoreComment";
const START_BTN_ID: &str = "startBtn";
const RESET_BTN_ID: &str = "resetBtn";
const GAME_OVER_ID: &str = "gameOver";
const FINAL_SCORE_ID: &str = "finalScore";
const PLAY_AGAIN_BTN_ID: &str = "playAgainBtn";

// Fallback board injected when the host page doesn't provide one.
const BOARD_STYLE: &str = "\
.cc-board{display:grid;grid-template-columns:repeat(3,96px);gap:10px;margin:16px auto;width:max-content}\
.spot{width:96px;height:96px;border-radius:50%;background:#6b4f3a;display:flex;align-items:center;justify-content:center}\
.cat{font-size:56px;visibility:hidden;cursor:pointer;user-select:none;transition:transform .1s}\
.cat.show{visibility:visible}\
.cat.clicked{visibility:visible;transform:scale(.8);opacity:.6}\
#gameOver{display:none}";

struct Page {
    score: Element,
    time: HtmlElement,
    score_comment: Element,
    start_btn: HtmlButtonElement,
    game_over: HtmlElement,
    final_score: Element,
    cats: Vec<Element>,
    sounds: HashMap<&'static str, HtmlAudioElement>, // one element per clip
    play_failed: Closure<dyn FnMut(JsValue)>,
}

struct App {
    controller: GameController,
    page: Page,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Attach the game to the current page. Calling it again is a no-op.
pub fn mount() -> Result<(), UiError> {
    if is_mounted() {
        return Ok(());
    }
    let win = window().ok_or(UiError::NoWindow)?;
    let doc = win.document().ok_or(UiError::NoDocument)?;
    if win.performance().is_none() {
        warn!("window.performance unavailable, the game clock will stay at 0");
    }

    let controller = GameController::default();
    ensure_markup(&doc, controller.config().slot_count)?;
    let page = Page::locate(&doc, controller.config().slot_count)?;

    attach_click(&doc, START_BTN_ID, |g| g.start())?;
    attach_click(&doc, RESET_BTN_ID, |g| g.reset())?;
    attach_click(&doc, PLAY_AGAIN_BTN_ID, |g| g.reset())?;
    for (slot, cat) in page.cats.iter().enumerate() {
        attach_cat(cat, slot)?;
    }

    page.render_snapshot(controller.state(), controller.slots());
    APP.with(|cell| cell.replace(Some(App { controller, page })));
    start_frame_loop();
    info!("cat catch mounted");
    Ok(())
}

pub fn is_mounted() -> bool {
    APP.with(|cell| cell.borrow().is_some())
}

/// Bring the clock up to date, run `f` against the controller and render
/// whatever it emitted. Returns `None` if the game isn't mounted.
pub fn with_game<T>(f: impl FnOnce(&mut GameController) -> T) -> Option<T> {
    APP.with(|cell| {
        let mut guard = cell.borrow_mut();
        let app = guard.as_mut()?;
        app.controller.advance(now_ms());
        let out = f(&mut app.controller);
        let events = app.controller.drain_events();
        app.page.render(&events);
        Some(out)
    })
}

fn now_ms() -> u64 {
    clock_ms(window().and_then(|w| w.performance()).map(|p| p.now()))
}

// Without `performance` the clock stays at 0; mount() warns about it once.
fn clock_ms(performance_now: Option<f64>) -> u64 {
    performance_now.map_or(0, |ms| ms.max(0.0) as u64)
}

fn element(doc: &Document, id: &str) -> Result<Element, UiError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| UiError::MissingElement(id.to_string()))
}

fn typed_element<T: JsCast>(doc: &Document, id: &str) -> Result<T, UiError> {
    element(doc, id)?
        .dyn_into::<T>()
        .map_err(|_| UiError::WrongElement(id.to_string()))
}

fn ensure_markup(doc: &Document, slot_count: usize) -> Result<(), UiError> {
    if doc.get_element_by_id(&slot_element_id(0)).is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or(UiError::NoDocument)?;

    let style = doc.create_element("style")?;
    style.set_text_content(Some(BOARD_STYLE));
    body.append_child(&style)?;

    let spots: String = (0..slot_count)
        .map(|slot| {
            format!(
                "<div class='spot' id='{}'><div class='cat'>🐱</div></div>",
                slot_element_id(slot)
            )
        })
        .collect();
    let root = doc.create_element("div")?;
    root.set_id("cc-root");
    root.set_attribute(
        "style",
        "font-family:'Fira Code', monospace; text-align:center; color:#333;",
    )?;
    root.set_inner_html(&format!(
        "<div>Score: <span id='{SCORE_ID}'>0</span> | Time: <span id='{TIME_ID}'>0</span></div>\
         <div id='{SCORE_COMMENT_ID}'></div>\
         <div class='cc-board'>{spots}</div>\
         <button id='{START_BTN_ID}'></button> <button id='{RESET_BTN_ID}'>Reset</button>\
         <div id='{GAME_OVER_ID}'>Game over! Final score: <span id='{FINAL_SCORE_ID}'>0</span> \
         <button id='{PLAY_AGAIN_BTN_ID}'>Play Again</button></div>"
    ));
    body.append_child(&root)?;
    Ok(())
}

fn attach_click(
    doc: &Document,
    id: &str,
    action: fn(&mut GameController),
) -> Result<(), UiError> {
    let target = element(doc, id)?;
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        with_game(action);
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn attach_cat(cat: &Element, slot: usize) -> Result<(), UiError> {
    let click = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        with_game(|g| g.activate(slot, InputSource::Click));
    }) as Box<dyn FnMut(_)>);
    cat.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
    click.forget();

    let touch_start = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        with_game(|g| g.activate(slot, InputSource::Touch));
    }) as Box<dyn FnMut(_)>);
    cat.add_event_listener_with_callback("touchstart", touch_start.as_ref().unchecked_ref())?;
    touch_start.forget();

    // A cancelled touch (scroll, system gesture) must free the guard too.
    let touch_release = Closure::wrap(Box::new(move |evt: web_sys::Event| {
        // no synthetic click after a tap we already handled
        if evt.type_() == "touchend" {
            evt.prevent_default();
        }
        with_game(|g| g.release_touch());
    }) as Box<dyn FnMut(_)>);
    for kind in ["touchend", "touchcancel"] {
        cat.add_event_listener_with_callback(kind, touch_release.as_ref().unchecked_ref())?;
    }
    touch_release.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        // advance() inside with_game fires whatever timers came due
        with_game(|_| ());
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

impl Page {
    fn locate(doc: &Document, slot_count: usize) -> Result<Self, UiError> {
        let cats = (0..slot_count)
            .map(|slot| -> Result<Element, UiError> {
                let id = slot_element_id(slot);
                element(doc, &id)?
                    .query_selector(".cat")?
                    .ok_or(UiError::MissingElement(format!("{id} .cat")))
            })
            .collect::<Result<Vec<_>, UiError>>()?;
        // A clip that fails to load only silences the slots using it.
        let mut sounds = HashMap::new();
        for src in CAT_SOUNDS {
            if sounds.contains_key(src) {
                continue;
            }
            match HtmlAudioElement::new_with_src(src) {
                Ok(audio) => {
                    sounds.insert(src, audio);
                }
                Err(e) => warn!("audio {src}: {e:?}"),
            }
        }
        let play_failed = Closure::wrap(Box::new(|err: JsValue| {
            warn!("cue playback rejected: {err:?}");
        }) as Box<dyn FnMut(JsValue)>);
        Ok(Self {
            score: element(doc, SCORE_ID)?,
            time: typed_element(doc, TIME_ID)?,
            score_comment: element(doc, SCORE_COMMENT_ID)?,
            start_btn: typed_element(doc, START_BTN_ID)?,
            game_over: typed_element(doc, GAME_OVER_ID)?,
            final_score: element(doc, FINAL_SCORE_ID)?,
            cats,
            sounds,
            play_failed,
        })
    }

    fn render_snapshot(&self, state: GameState, slots: &[SlotState]) {
        self.show_score(state.score);
        self.show_time(state.time_left);
        self.show_controls(state.running);
        self.show_game_over(None);
        for (slot, s) in slots.iter().enumerate() {
            self.show_slot(slot, *s);
        }
    }

    fn render(&self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Started => {
                    self.show_controls(true);
                    self.show_game_over(None);
                }
                GameEvent::ScoreChanged(score) => self.show_score(score),
                GameEvent::TimeChanged(time_left) => self.show_time(time_left),
                GameEvent::SlotChanged { slot, state } => self.show_slot(slot, state),
                GameEvent::CueRequested(cue) => self.play_cue(cue),
                GameEvent::GameOver { final_score } => {
                    self.show_controls(false);
                    self.show_game_over(Some(final_score));
                }
                GameEvent::Reset => {
                    self.show_controls(false);
                    self.show_game_over(None);
                }
            }
        }
    }

    fn show_score(&self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
        self.score_comment
            .set_text_content(Some(ScoreRank::from_score(score).comment()));
    }

    fn show_time(&self, time_left: u32) {
        self.time.set_text_content(Some(&time_left.to_string()));
        let style = time_style(time_left);
        let css = self.time.style();
        if let Err(e) = css
            .set_property("color", style.color)
            .and_then(|()| css.set_property("font-weight", style.font_weight))
        {
            warn!("timer style: {e:?}");
        }
    }

    fn show_controls(&self, running: bool) {
        self.start_btn
            .set_text_content(Some(start_button_label(running)));
        self.start_btn.set_disabled(running);
    }

    fn show_game_over(&self, final_score: Option<u32>) {
        if let Some(score) = final_score {
            self.final_score.set_text_content(Some(&score.to_string()));
        }
        let display = if final_score.is_some() { "block" } else { "none" };
        if let Err(e) = self.game_over.style().set_property("display", display) {
            warn!("game over panel: {e:?}");
        }
    }

    fn show_slot(&self, slot: usize, state: SlotState) {
        let Some(cat) = self.cats.get(slot) else {
            return;
        };
        let classes = cat.class_list();
        let res = classes.remove_2(SHOW_CLASS, CLICKED_CLASS).and_then(|()| {
            match state.css_class() {
                Some(class) => classes.add_1(class),
                None => Ok(()),
            }
        });
        if let Err(e) = res {
            warn!("slot {slot} class update: {e:?}");
        }
    }

    fn play_cue(&self, cue: Cue) {
        if let Some(audio) = cue.sound.and_then(|src| self.sounds.get(src)) {
            // restart so rapid hits on the same slot each meow
            audio.set_current_time(0.0);
            match audio.play() {
                // autoplay policy or a missing file rejects asynchronously
                Ok(promise) => {
                    let _ = promise.catch(&self.play_failed);
                }
                Err(e) => warn!("cue for slot {}: {e:?}", cue.slot),
            }
        }
        if let Some(w) = window() {
            w.navigator().vibrate_with_duration(cue.vibrate_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_truncates_and_falls_back_to_zero() {
        assert_eq!(clock_ms(Some(1_234.9)), 1_234);
        assert_eq!(clock_ms(Some(-5.0)), 0);
        assert_eq!(clock_ms(None), 0);
    }
}
