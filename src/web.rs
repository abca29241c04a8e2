//! Browser glue: canvas + DOM overlay, input listeners and the frame loop.
//!
//! The running [`Session`] lives in a thread-local cell. Every callback (frame,
//! pointer, clicks, resize) borrows it, mutates it and returns; nothing else
//! holds on to it. Listeners outlive a stopped session and simply find the cell
//! empty.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window, window};

use crate::canvas::CanvasSurface;
use crate::config::{ParticleConfig, SessionTiming};
use crate::emotion::EmotionState;
use crate::error::{Result, UzyError};
use crate::script::DIALOGUE_SEQUENCE;
use crate::session::{Phase, Session};

const ROOT_ID: &str = "uzy-root";

const CSS: &str = "
@keyframes uzy-fade-in { from { opacity: 0; transform: translateY(10px); } to { opacity: 1; transform: translateY(0); } }
@keyframes uzy-jitter { 0% { transform: translate(0,0); } 25% { transform: translate(1px,-1px); } 50% { transform: translate(-1px,1px); } 75% { transform: translate(1px,1px); } 100% { transform: translate(0,0); } }
@keyframes uzy-pulse { 50% { opacity: .3; } }
.uzy-jitter { animation: uzy-jitter .2s infinite linear; }
.uzy-fade { animation: uzy-fade-in 1.2s forwards ease-out; }
.uzy-caret { display:inline-block; width:6px; height:16px; margin-left:4px; background:rgba(255,255,255,.4); animation: uzy-pulse 1s infinite; }
.uzy-choice { pointer-events:auto; cursor:pointer; padding:12px 32px; background:rgba(255,255,255,.05); border:1px solid rgba(255,255,255,.1); border-radius:999px; color:rgba(255,255,255,.5); font-size:11px; letter-spacing:.2em; text-transform:uppercase; }
.uzy-choice:hover { color:#fff; border-color:rgba(255,255,255,.4); }
";

struct WebSession {
    session: Session,
    rng: SmallRng,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    overlay: Overlay,
    frame_id: Option<i32>,
}

impl WebSession {
    fn frame(&mut self, now: f64) {
        self.session.advance(now);
        self.session.render(&mut self.surface);
        self.overlay.sync(&self.session);
    }

    fn fit_viewport(&mut self, size: DVec2) {
        self.canvas.set_width(size.x as u32);
        self.canvas.set_height(size.y as u32);
        self.session.resize(size.x, size.y);
    }
}

thread_local! {
    static SESSION: RefCell<Option<WebSession>> = const { RefCell::new(None) };
    static WINDOW_LISTENERS: Cell<bool> = const { Cell::new(false) };
}

fn with_session<T>(f: impl FnOnce(&mut WebSession) -> T) -> Option<T> {
    SESSION.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub fn now() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

fn viewport(win: &Window) -> DVec2 {
    let w = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
    let h = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
    DVec2::new(w, h)
}

// --- Mount / teardown --------------------------------------------------------

pub fn mount(config: ParticleConfig) -> Result<()> {
    if SESSION.with(|cell| cell.borrow().is_some()) {
        unmount()?;
    }
    let win = window().ok_or(UzyError::NoWindow)?;
    let doc = win.document().ok_or(UzyError::NoDocument)?;
    let body = doc.body().ok_or(UzyError::NoBody)?;
    body.set_attribute("style", "margin:0; background:#020617; overflow:hidden; cursor:none; font-family:sans-serif;")?;

    let root = ensure(&doc, &body, "div", ROOT_ID, "position:fixed; inset:0;")?;
    let size = viewport(&win);

    let canvas: HtmlCanvasElement = ensure(&doc, &root, "canvas", "uzy-canvas", "position:fixed; inset:0; pointer-events:none; z-index:0;")?
        .dyn_into()
        .map_err(|_| UzyError::ElementType("uzy-canvas"))?;
    canvas.set_width(size.x as u32);
    canvas.set_height(size.y as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(UzyError::NoContext)?
        .dyn_into()
        .map_err(|_| UzyError::NoContext)?;

    let overlay = Overlay::build(&doc, &root)?;

    let mut rng = SmallRng::from_entropy();
    let session = Session::new(&mut rng, config, SessionTiming::default(), DIALOGUE_SEQUENCE, size);
    tracing::info!(width = size.x, height = size.y, particles = session.field().ambient().len(), "session mounted");

    SESSION.with(|cell| {
        cell.replace(Some(WebSession {
            session,
            rng,
            canvas,
            surface: CanvasSurface::new(ctx),
            overlay,
            frame_id: None,
        }))
    });

    install_listeners(&win, &doc)?;
    start_loop();
    Ok(())
}

pub fn unmount() -> Result<()> {
    let Some(mut web) = SESSION.with(|cell| cell.borrow_mut().take()) else {
        return Err(UzyError::NoSession);
    };
    web.session.end();
    if let (Some(id), Some(win)) = (web.frame_id, window()) {
        win.cancel_animation_frame(id)?;
    }
    if let Some(root) = window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(ROOT_ID)) {
        root.remove();
    }
    Ok(())
}

pub fn begin() -> Result<bool> {
    let t = now();
    with_session(|web| web.session.begin(t)).ok_or(UzyError::NoSession)
}

pub fn select_choice(index: usize) -> Result<bool> {
    let t = now();
    with_session(|web| web.session.select_choice(index, t)).ok_or(UzyError::NoSession)
}

pub fn reconfigure(config: ParticleConfig) -> Result<()> {
    with_session(|web| web.session.reconfigure(&mut web.rng, config)).ok_or(UzyError::NoSession)
}

// --- Listeners ---------------------------------------------------------------

fn install_listeners(win: &Window, doc: &Document) -> Result<()> {
    if !WINDOW_LISTENERS.replace(true) {
        install_window_listeners(win)?;
    }
    if let Some(start) = doc.get_element_by_id("uzy-start") {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            if let Err(err) = begin() {
                tracing::warn!(%err, "start ignored");
            }
        }) as Box<dyn FnMut(_)>);
        start.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    for index in 0..2 {
        let Some(button) = doc.get_element_by_id(&format!("uzy-choice-{index}")) else { continue };
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            if let Err(err) = select_choice(index) {
                tracing::warn!(%err, index, "choice ignored");
            }
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// Window listeners survive unmount; they are installed once per page.
fn install_window_listeners(win: &Window) -> Result<()> {
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
            with_session(|web| {
                web.session.pointer_moved(x, y);
                web.overlay.move_cursor(x, y);
            });
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            let Some(win) = window() else { return };
            let size = viewport(&win);
            with_session(|web| web.fit_viewport(size));
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

// --- Frame loop --------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    let Some(win) = window() else { return };
    let borrowed = cb.borrow();
    let Some(closure) = borrowed.as_ref() else { return };
    match win.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => {
            with_session(|web| web.frame_id = Some(id));
        }
        Err(err) => tracing::error!(?err, "requestAnimationFrame failed"),
    }
}

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        // a stopped session ends the loop
        if with_session(|web| web.frame(ts)).is_some() {
            request_frame(&f);
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

// --- DOM overlay -------------------------------------------------------------

fn ensure(doc: &Document, parent: &Element, tag: &str, id: &str, style: &str) -> Result<Element> {
    let el = match doc.get_element_by_id(id) {
        Some(el) => el,
        None => {
            let el = doc.create_element(tag)?;
            el.set_id(id);
            parent.append_child(&el)?;
            el
        }
    };
    el.set_attribute("style", style)?;
    Ok(el)
}

/// What the overlay currently shows; only differences are written to the DOM.
#[derive(Clone, Debug, PartialEq)]
struct OverlayView {
    phase: Phase,
    vitality: u32,
    status: EmotionState,
    text: &'static str,
    typing: bool,
    choices: [Option<&'static str>; 2],
    response: Option<&'static str>,
}

impl OverlayView {
    fn of(session: &Session) -> Self {
        let choices = session.choices();
        Self {
            phase: session.phase(),
            vitality: session.vitality(),
            status: session.status(),
            text: session.dialogue_text(),
            typing: session.dialogue().is_typing(),
            choices: [choices.first().map(|c| c.label), choices.get(1).map(|c| c.label)],
            response: session.last_response(),
        }
    }
}

struct Overlay {
    menu: Element,
    hud: Element,
    energy_value: Element,
    energy_bar: Element,
    status_dot: Element,
    status_label: Element,
    anchor: Element,
    dialogue: Element,
    response: Element,
    response_text: Element,
    text: Element,
    caret: Element,
    choice_row: Element,
    choices: [Element; 2],
    cursor: Element,
    shown: Option<OverlayView>,
}

impl Overlay {
    fn build(doc: &Document, root: &Element) -> Result<Self> {
        let style = ensure(doc, root, "style", "uzy-style", "")?;
        style.set_inner_html(CSS);

        let menu = ensure(doc, root, "div", "uzy-menu", MENU_STYLE)?;
        let title = ensure(doc, &menu, "h1", "uzy-title", "color:#fff; font-size:80px; font-weight:100; letter-spacing:.4em; margin:0 0 16px;")?;
        title.set_text_content(Some("УЗЫ"));
        let subtitle = ensure(doc, &menu, "p", "uzy-subtitle", "color:rgba(255,255,255,.2); font-size:10px; letter-spacing:.6em; text-transform:uppercase; margin:0 0 48px;")?;
        subtitle.set_text_content(Some("Ты — его единственный свет"));
        let start = ensure(doc, &menu, "button", "uzy-start", "pointer-events:auto; cursor:pointer; padding:16px 64px; background:transparent; border:1px solid rgba(255,255,255,.1); border-radius:999px; color:rgba(255,255,255,.4); font-size:12px; letter-spacing:.4em; text-transform:uppercase;")?;
        start.set_text_content(Some("ВЗАИМОДЕЙСТВОВАТЬ"));

        let hud = ensure(doc, root, "div", "uzy-hud", "display:none;")?;
        let heading = ensure(doc, &hud, "div", "uzy-energy-heading", "display:flex; justify-content:space-between; font-size:10px; letter-spacing:.3em; color:rgba(255,255,255,.3); margin-bottom:8px;")?;
        let energy_label = ensure(doc, &heading, "span", "uzy-energy-label", "")?;
        energy_label.set_text_content(Some("ЖИЗНЕННАЯ СИЛА"));
        let energy_value = ensure(doc, &heading, "span", "uzy-energy-value", "")?;
        let track = ensure(doc, &hud, "div", "uzy-energy-track", "height:2px; width:100%; background:rgba(255,255,255,.05); border-radius:999px; overflow:hidden;")?;
        let energy_bar = ensure(doc, &track, "div", "uzy-energy-bar", "")?;
        let status_row = ensure(doc, &hud, "div", "uzy-status-row", "margin-top:16px; display:flex; align-items:center; gap:8px;")?;
        let status_dot = ensure(doc, &status_row, "div", "uzy-status-dot", "")?;
        let status_label = ensure(doc, &status_row, "span", "uzy-status", "font-size:9px; letter-spacing:.4em; text-transform:uppercase; color:rgba(255,255,255,.2);")?;

        let anchor = ensure(doc, root, "div", "uzy-dialogue-anchor", ANCHOR_STYLE)?;
        let dialogue = ensure(doc, &anchor, "div", "uzy-dialogue", "display:none;")?;
        let response = ensure(doc, &dialogue, "div", "uzy-response", "display:none;")?;
        let response_label = ensure(doc, &response, "span", "uzy-response-label", "display:block; font-size:10px; letter-spacing:.2em; text-transform:uppercase; color:rgba(255,255,255,.5); margin-bottom:4px;")?;
        response_label.set_text_content(Some("Вы:"));
        let response_text = ensure(doc, &response, "p", "uzy-response-text", "margin:0 0 24px; color:rgba(255,255,255,.6); font-style:italic; font-size:14px;")?;
        let speaker = ensure(doc, &dialogue, "span", "uzy-speaker", "display:block; font-size:10px; letter-spacing:.2em; text-transform:uppercase; color:rgba(255,255,255,.3); margin-bottom:4px;")?;
        speaker.set_text_content(Some("Частица:"));
        let line = ensure(doc, &dialogue, "p", "uzy-line", "margin:0; min-height:3em; color:rgba(255,255,255,.9); font-weight:300; font-size:18px; line-height:1.6; letter-spacing:.02em;")?;
        let text = ensure(doc, &line, "span", "uzy-text", "")?;
        let caret = ensure(doc, &line, "span", "uzy-caret", "display:none;")?;
        caret.set_class_name("uzy-caret");
        let choice_row = ensure(doc, &dialogue, "div", "uzy-choices", "display:none;")?;
        let choices = [
            ensure(doc, &choice_row, "button", "uzy-choice-0", "")?,
            ensure(doc, &choice_row, "button", "uzy-choice-1", "")?,
        ];
        for c in &choices {
            c.set_class_name("uzy-choice");
        }

        let cursor = ensure(doc, root, "div", "uzy-cursor", &cursor_style(-100.0, -100.0))?;

        Ok(Self {
            menu,
            hud,
            energy_value,
            energy_bar,
            status_dot,
            status_label,
            anchor,
            dialogue,
            response,
            response_text,
            text,
            caret,
            choice_row,
            choices,
            cursor,
            shown: None,
        })
    }

    fn move_cursor(&self, x: f64, y: f64) {
        self.cursor.set_attribute("style", &cursor_style(x, y)).ok();
    }

    fn sync(&mut self, session: &Session) {
        let view = OverlayView::of(session);
        let prev = self.shown.take();

        if prev.as_ref().is_none_or(|p| p.phase != view.phase) {
            let menu_style = match view.phase {
                Phase::Menu => MENU_STYLE.to_string(),
                _ => format!("{MENU_STYLE} opacity:0; transform:scale(1.1); pointer-events:none;"),
            };
            self.menu.set_attribute("style", &menu_style).ok();
            let active = view.phase == Phase::Active;
            self.hud.set_attribute("style", if active { HUD_STYLE } else { "display:none;" }).ok();
            if !active {
                self.dialogue.set_attribute("style", "display:none;").ok();
                self.anchor.set_class_name("");
            }
        }
        if view.phase == Phase::Active {
            self.sync_active(prev.as_ref(), &view);
        }
        self.shown = Some(view);
    }

    fn sync_active(&self, prev: Option<&OverlayView>, view: &OverlayView) {
        let first = prev.is_none_or(|p| p.phase != Phase::Active);

        if first || prev.is_some_and(|p| p.vitality != view.vitality) {
            let v = view.vitality;
            self.energy_value.set_text_content(Some(&format!("{v}%")));
            let bar = if v < 20 {
                "background:#f43f5e; box-shadow:0 0 12px rgba(244,63,94,.6);"
            } else {
                "background:rgba(255,255,255,.4);"
            };
            self.energy_bar
                .set_attribute("style", &format!("height:100%; width:{v}%; transition:width 1s; {bar}"))
                .ok();
            let border = if v == 0 { "rgba(136,19,55,.4)" } else { "rgba(255,255,255,.1)" };
            self.dialogue
                .set_attribute("style", &format!("{DIALOGUE_STYLE} border:1px solid {border};"))
                .ok();
            // jitter goes on the anchor, never on the box
            self.anchor.set_class_name(jitter_class(v));
        }
        if first || prev.is_some_and(|p| p.status != view.status) {
            self.status_label.set_text_content(Some(view.status.label()));
            self.status_dot
                .set_attribute(
                    "style",
                    &format!("width:6px; height:6px; border-radius:999px; background:{}; box-shadow:0 0 8px rgba(255,255,255,.5);", view.status.color()),
                )
                .ok();
        }
        if first || prev.is_some_and(|p| p.text != view.text) {
            self.text.set_text_content(Some(view.text));
        }
        if first || prev.is_some_and(|p| p.typing != view.typing) {
            self.caret.set_attribute("style", if view.typing { "" } else { "display:none;" }).ok();
        }
        if first || prev.is_some_and(|p| p.response != view.response) {
            match view.response {
                Some(label) => {
                    self.response_text.set_text_content(Some(label));
                    self.response.set_attribute("style", "opacity:.4;").ok();
                    self.response.set_class_name("uzy-fade");
                }
                None => {
                    self.response.set_attribute("style", "display:none;").ok();
                }
            }
        }
        if first || prev.is_some_and(|p| p.choices != view.choices) {
            let offered = view.choices.iter().any(Option::is_some);
            self.choice_row
                .set_attribute("style", if offered { "margin-top:40px; display:flex; flex-wrap:wrap; gap:16px;" } else { "display:none;" })
                .ok();
            self.choice_row.set_class_name(if offered { "uzy-fade" } else { "" });
            for (button, label) in self.choices.iter().zip(view.choices) {
                button.set_text_content(label);
            }
        }
    }
}

const MENU_STYLE: &str = "position:absolute; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; text-align:center; transition:all 2s ease-in-out; z-index:20; user-select:none;";
const HUD_STYLE: &str = "position:absolute; top:48px; right:48px; width:192px; pointer-events:none; z-index:10;";
const ANCHOR_STYLE: &str = "position:absolute; left:0; right:0; bottom:80px; display:flex; justify-content:center; z-index:10; pointer-events:none;";
const DIALOGUE_STYLE: &str = "width:min(672px, calc(100% - 64px)); box-sizing:border-box; padding:40px; background:rgba(15,23,42,.6); backdrop-filter:blur(64px); border-radius:24px; pointer-events:auto;";

const JITTER_BELOW: u32 = 15;

fn jitter_class(vitality: u32) -> &'static str {
    if vitality < JITTER_BELOW { "uzy-jitter" } else { "" }
}

fn cursor_style(x: f64, y: f64) -> String {
    format!(
        "position:fixed; left:{}px; top:{}px; width:16px; height:16px; box-sizing:border-box; border:1px solid rgba(255,255,255,.4); border-radius:999px; transform:scale(.75); pointer-events:none; z-index:50; mix-blend-mode:difference;",
        x - 8.0,
        y - 8.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_starts_below_fifteen() {
        assert_eq!(jitter_class(15), "");
        assert_eq!(jitter_class(14), "uzy-jitter");
        assert_eq!(jitter_class(0), "uzy-jitter");
    }

    #[test]
    fn dialogue_box_is_centred_without_transform() {
        // the jitter keyframes animate `transform`; only the anchor may carry them
        assert!(!DIALOGUE_STYLE.contains("transform"));
        assert!(!ANCHOR_STYLE.contains("transform"));
        assert!(ANCHOR_STYLE.contains("justify-content:center"));
    }
}
