#![cfg(target_arch = "wasm32")]
use scene_core::ScenePreset;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod options;
mod view;

use constants::*;

type Slot = Rc<RefCell<Option<view::Mounted>>>;

thread_local! {
    // Every view mounted on this page, so `pagehide` can tear them all down.
    static MOUNTED: RefCell<Vec<Slot>> = const { RefCell::new(Vec::new()) };
}

/// Handle to a mounted scene, returned to JavaScript by `mount_scene`.
#[wasm_bindgen]
pub struct SceneHandle {
    slot: Slot,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Stop the animation, release GPU resources and detach listeners.
    /// Calling it again does nothing.
    pub fn dispose(&self) {
        let taken = self.slot.borrow_mut().take();
        if let Some(mounted) = taken {
            mounted.dispose();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.slot.borrow().as_ref().is_some_and(|m| m.is_running())
    }
}

fn register(mounted: view::Mounted) -> SceneHandle {
    wire_pagehide();
    let slot: Slot = Rc::new(RefCell::new(Some(mounted)));
    MOUNTED.with(|all| {
        let mut all = all.borrow_mut();
        all.retain(|s| s.borrow().is_some());
        all.push(slot.clone());
    });
    SceneHandle { slot }
}

fn dispose_all() {
    let slots: Vec<Slot> = MOUNTED.with(|all| all.borrow_mut().drain(..).collect());
    for slot in slots {
        let taken = slot.borrow_mut().take();
        if let Some(mounted) = taken {
            mounted.dispose();
        }
    }
}

fn wire_pagehide() {
    static WIRED: AtomicBool = AtomicBool::new(false);
    if WIRED.swap(true, Ordering::SeqCst) {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    match events::EventListener::new(window.unchecked_ref(), "pagehide", |_| dispose_all()) {
        Ok(listener) => listener.forget(),
        Err(e) => log::warn!("[web] pagehide listener not installed: {:?}", e),
    }
}

/// Mount `preset` ("hero", "vault" or "phone") on the element with id
/// `element_id`. A canvas element is drawn into directly; any other element
/// gets a canvas appended.
#[wasm_bindgen]
pub async fn mount_scene(element_id: String, preset: String) -> Result<SceneHandle, JsValue> {
    let preset: ScenePreset = preset
        .parse()
        .map_err(|e: scene_core::SceneError| JsValue::from_str(&e.to_string()))?;
    let mounted = view::mount(&element_id, preset)
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
    Ok(register(mounted))
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

async fn mount_or_skip(element_id: &str, preset: ScenePreset) {
    match view::mount(element_id, preset).await {
        Ok(mounted) => {
            register(mounted);
        }
        Err(e) => log::info!("[web] {} scene skipped: {e:#}", preset.name()),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("vault-scene-web starting");

    spawn_local(async move {
        mount_or_skip(HERO_CANVAS_ID, ScenePreset::Hero).await;
        sleep_ms(EMBED_DELAY_MS).await;
        mount_or_skip(VAULT_CONTAINER_ID, ScenePreset::Vault).await;
        mount_or_skip(PHONE_CONTAINER_ID, ScenePreset::Phone).await;
    });
    Ok(())
}
