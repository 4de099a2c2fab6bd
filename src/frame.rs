use crate::view::SceneView;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drive `view` from `requestAnimationFrame` until it stops.
///
/// The stop flag is checked after every tick, so a view disposed during or
/// between frames is never ticked again. The callback then frees itself.
pub(crate) fn start_loop(view: Rc<RefCell<SceneView>>) {
    let tick: FrameCallback = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        let keep_going = {
            let mut v = view.borrow_mut();
            v.frame(timestamp_ms);
            !v.is_stopped()
        };
        if keep_going {
            request_frame(&tick_clone);
        } else {
            release(&tick_clone);
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&tick);
}

fn request_frame(tick: &FrameCallback) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// The closure is still on the stack when it decides to stop; hand it to the
// microtask queue instead of dropping it in place.
fn release(tick: &FrameCallback) {
    let closure = tick.borrow_mut().take();
    wasm_bindgen_futures::spawn_local(async move {
        drop(closure);
    });
}
