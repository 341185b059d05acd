//! Browser front end: canvas play field, HUD overlays, frame loop and click
//! routing. This layer only renders [`Snapshot`]s and forwards clicks as
//! `start` / `reset` / `catch`; all rules live in [`crate::game`].

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::bindings::host_millis;
use crate::config::GameConfig;
use crate::game::{Cupid, CupidId, Game, Phase, Snapshot};

const CANVAS_W: u32 = 800;
const CANVAS_H: u32 = 450; // 16:9 play field
const CUPID_HIT_RADIUS: f64 = 36.0; // px, roughly the drawn emoji

struct GameView {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: Game,
    // (score, lives, high score) last written to the HUD, to skip redundant DOM writes
    hud: Option<(u32, u32, u32)>,
}

thread_local! {
    static GAME_VIEW: std::cell::RefCell<Option<GameView>> = const { std::cell::RefCell::new(None) };
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen]
pub fn start_game_mode() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("cc-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("cc-canvas");
        c.set_width(CANVAS_W);
        c.set_height(CANVAS_H);
        c.set_attribute("style", "position:fixed; left:50%; top:52%; transform:translate(-50%,-50%); border-radius:18px; border:2px solid #e8a0b4; background:#fff0f5; box-shadow:0 0 32px 0 rgba(0,0,0,0.18); cursor:pointer; z-index:20;").ok();
        body.append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ensure_hud(&doc)?;

    let mut game = Game::new(GameConfig::default());
    if let Some(now) = win.performance().map(|p| p.now()).and_then(host_millis) {
        game.advance_to(now);
    }
    GAME_VIEW.with(|v| {
        v.replace(Some(GameView {
            canvas: canvas.clone(),
            ctx,
            game,
            hud: None,
        }))
    });

    // Clicks are the only input: title screen -> start, game over -> reset,
    // otherwise hit-test the field.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            GAME_VIEW.with(|cell| {
                if let Some(view) = cell.borrow_mut().as_mut() {
                    on_click(view, x, y);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    log::info!("cupid catch mounted");
    Ok(())
}

fn on_click(view: &mut GameView, x: f64, y: f64) {
    match view.game.phase() {
        Phase::NotStarted => view.game.start(),
        Phase::Over => view.game.reset(),
        Phase::Playing => {
            let w = view.canvas.width() as f64;
            let h = view.canvas.height() as f64;
            if let Some(id) = cupid_at(view.game.cupids(), x, y, w, h) {
                view.game.catch(id);
            }
        }
    }
}

/// Topmost (last drawn) uncaught Cupid under the pointer.
fn cupid_at(cupids: &[Cupid], x: f64, y: f64, w: f64, h: f64) -> Option<CupidId> {
    cupids
        .iter()
        .rev()
        .filter(|c| !c.caught)
        .find(|c| {
            let dx = c.x / 100.0 * w - x;
            let dy = c.y / 100.0 * h - y;
            dx * dx + dy * dy <= CUPID_HIT_RADIUS * CUPID_HIT_RADIUS
        })
        .map(|c| c.id)
}

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME_VIEW.with(|cell| {
            if let Some(view) = cell.borrow_mut().as_mut() {
                frame(view, ts);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn frame(view: &mut GameView, ts: f64) {
    if let Some(now) = host_millis(ts) {
        view.game.advance_to(now);
    }
    let snap = view.game.snapshot();
    render(&view.ctx, &snap, view.canvas.width() as f64, view.canvas.height() as f64);
    let hud = (snap.score, snap.lives, snap.high_score);
    if view.hud != Some(hud) {
        update_hud(&snap);
        view.hud = Some(hud);
    }
}

// --- Rendering ----------------------------------------------------------------

fn render(ctx: &CanvasRenderingContext2d, snap: &Snapshot, w: f64, h: f64) {
    ctx.set_fill_style(&JsValue::from_str("#fff0f5"));
    ctx.fill_rect(0.0, 0.0, w, h);

    match snap.phase {
        Phase::NotStarted => {
            ctx.set_font("96px serif");
            ctx.fill_text("❤️", w / 2.0, h / 2.0 - 40.0).ok();
            ctx.set_fill_style(&JsValue::from_str("#c2185b"));
            ctx.set_font("bold 30px sans-serif");
            ctx.fill_text("Click to start!", w / 2.0, h / 2.0 + 60.0).ok();
        }
        Phase::Playing => {
            // Player's heart at the bottom centre
            ctx.set_font("64px serif");
            ctx.fill_text("❤️", w / 2.0, h - 48.0).ok();
            for c in &snap.cupids {
                let cx = c.x / 100.0 * w;
                let cy = c.y / 100.0 * h;
                if c.caught {
                    ctx.set_font("48px serif");
                    ctx.fill_text("💥", cx, cy).ok();
                } else {
                    ctx.set_font("56px serif");
                    ctx.fill_text("💘", cx, cy).ok();
                }
            }
        }
        Phase::Over => {
            ctx.set_fill_style(&JsValue::from_str("#333"));
            ctx.set_font("bold 48px sans-serif");
            ctx.fill_text("Game over!", w / 2.0, h / 2.0 - 70.0).ok();
            ctx.set_font("28px sans-serif");
            ctx.fill_text(&format!("Score: {}", snap.score), w / 2.0, h / 2.0 - 10.0).ok();
            if snap.new_record {
                ctx.set_fill_style(&JsValue::from_str("#2e7d32"));
                ctx.set_font("bold 24px sans-serif");
                ctx.fill_text("New record! 🎉", w / 2.0, h / 2.0 + 30.0).ok();
            }
            ctx.set_fill_style(&JsValue::from_str("#c2185b"));
            ctx.set_font("22px sans-serif");
            ctx.fill_text("Click to play again", w / 2.0, h / 2.0 + 80.0).ok();
        }
    }
}

// --- HUD overlays ---------------------------------------------------------------

const HUD_STYLE: &str = "position:fixed; top:10px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;";

fn ensure_hud(doc: &Document) -> Result<(), JsValue> {
    let Some(body) = doc.body() else { return Ok(()) };
    for (id, left, text) in [("cc-score", 12, "Score: 0"), ("cc-lives", 150, ""), ("cc-record", 290, "Record: 0")] {
        if doc.get_element_by_id(id).is_none() {
            let div = doc.create_element("div")?;
            div.set_id(id);
            div.set_text_content(Some(text));
            div.set_attribute("style", &format!("{HUD_STYLE} left:{left}px;")).ok();
            body.append_child(&div)?;
        }
    }
    Ok(())
}

fn update_hud(snap: &Snapshot) {
    let Some(doc) = window().and_then(|w| w.document()) else { return };
    if let Some(el) = doc.get_element_by_id("cc-score") {
        el.set_text_content(Some(&format!("Score: {}", snap.score)));
    }
    if let Some(el) = doc.get_element_by_id("cc-lives") {
        el.set_inner_html(&hearts_html(snap.lives, snap.max_lives));
    }
    if let Some(el) = doc.get_element_by_id("cc-record") {
        el.set_text_content(Some(&format!("Record: {}", snap.high_score)));
    }
}

/// Filled hearts for remaining lives, greyed out for lost ones.
fn hearts_html(lives: u32, max_lives: u32) -> String {
    (0..max_lives)
        .map(|i| {
            let color = if i < lives { "#ff4d4d" } else { "#555" };
            format!("<span style='color:{color};font-size:16px;margin-right:6px;'>♥</span>")
        })
        .collect()
}
