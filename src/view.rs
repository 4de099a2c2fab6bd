use crate::events::{self, EventListener};
use crate::{dom, input, options};
use scene_core::{FrameClock, SceneAnimator, SceneError, ScenePreset, Viewport};
use scene_render::{GpuContext, GpuState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// How a mounted canvas is sized and which box pointer input is measured
/// against.
#[derive(Clone)]
pub(crate) enum Placement {
    /// Fills the window; pointer is window-relative.
    Fullscreen,
    /// Square of fixed CSS size; pointer is relative to the container.
    Fixed { container: web::Element, css_px: u32 },
    /// Follows the container's layout size.
    Container { container: web::Element },
}

impl Placement {
    pub(crate) fn for_preset(preset: ScenePreset, el: &web::Element) -> Self {
        match preset {
            ScenePreset::Hero => Placement::Fullscreen,
            ScenePreset::Vault => Placement::Fixed {
                container: el.clone(),
                css_px: scene_core::constants::VAULT_SIZE_PX,
            },
            ScenePreset::Phone => Placement::Container {
                container: el.clone(),
            },
        }
    }

    fn css_size(&self) -> (f64, f64) {
        match self {
            Placement::Fullscreen => dom::window_inner_size(),
            Placement::Fixed { css_px, .. } => (*css_px as f64, *css_px as f64),
            Placement::Container { container } => dom::container_size(container),
        }
    }

    fn pointer_area(&self) -> input::PointerArea {
        match self {
            Placement::Fullscreen => dom::window_area(),
            Placement::Fixed { container, .. } | Placement::Container { container } => {
                dom::element_area(container)
            }
        }
    }

    fn pointer_target(&self) -> Option<web::EventTarget> {
        match self {
            Placement::Fullscreen => web::window().map(Into::into),
            Placement::Fixed { container, .. } | Placement::Container { container } => {
                Some(container.clone().into())
            }
        }
    }
}

/// One mounted scene: its animator, canvas and frame clock.
pub(crate) struct SceneView {
    label: String,
    animator: SceneAnimator<GpuState<'static>>,
    clock: FrameClock,
    canvas: web::HtmlCanvasElement,
    placement: Placement,
    stopped: bool,
}

impl SceneView {
    pub(crate) fn frame(&mut self, timestamp_ms: f64) {
        if self.stopped {
            return;
        }
        let elapsed = self.clock.advance_millis(timestamp_ms);
        self.animator.tick(elapsed);
    }

    pub(crate) fn is_stopped(&self) -> bool {
        self.stopped || !self.animator.is_running()
    }

    pub(crate) fn sync_size(&mut self) {
        let (w, h) = self.placement.css_size();
        let (w_px, h_px) = dom::sync_canvas_backing_size(&self.canvas, w, h);
        self.animator.on_resize(w_px, h_px);
    }

    pub(crate) fn pointer_moved(&mut self, ev: &web::Event) {
        let Some((x, y)) = events::client_position(ev) else {
            return;
        };
        let p = input::pointer_in_area(x, y, self.placement.pointer_area());
        self.animator.on_pointer_move(p.x, p.y);
    }

    pub(crate) fn dispose(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.animator.dispose();
            log::info!("[web] {} disposed", self.label);
        }
    }
}

/// A running view plus the listeners feeding it. Dropping the listeners
/// detaches them from the page.
pub(crate) struct Mounted {
    view: Rc<RefCell<SceneView>>,
    _listeners: Vec<EventListener>,
}

impl Mounted {
    pub(crate) fn dispose(self) {
        self.view.borrow_mut().dispose();
    }

    pub(crate) fn is_running(&self) -> bool {
        !self.view.borrow().is_stopped()
    }
}

/// Mount `preset` on the element with id `element_id`.
pub(crate) async fn mount(element_id: &str, preset: ScenePreset) -> anyhow::Result<Mounted> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{element_id}"))?;
    let attr = dom::scene_config_attr(&el);
    let config = options::resolve_scene_config(preset.name(), attr.as_deref())?;
    let canvas = dom::canvas_for(&document, &el)?;
    let placement = Placement::for_preset(preset, &el);

    let (w, h) = placement.css_size();
    let (w_px, h_px) = dom::sync_canvas_backing_size(&canvas, w, h);
    let viewport = Viewport::new(w_px, h_px);

    let instance = wgpu::Instance::default();
    let ctx = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
        Ok(surface) => GpuContext::new(&instance, surface, viewport).await,
        Err(e) => Err(SceneError::SurfaceUnavailable(e.to_string())),
    };
    let mut animator = SceneAnimator::new();
    animator.initialize(&config, viewport, move |setup| Ok(GpuState::new(ctx?, setup)))?;

    let view = Rc::new(RefCell::new(SceneView {
        label: format!("{}#{element_id}", preset.name()),
        animator,
        clock: FrameClock::new(),
        canvas,
        placement: placement.clone(),
        stopped: false,
    }));

    let mut listeners = Vec::new();
    if let Some(window) = web::window() {
        let v = view.clone();
        let target: &web::EventTarget = window.unchecked_ref();
        listeners.push(
            EventListener::new(target, "resize", move |_| v.borrow_mut().sync_size())
                .map_err(|e| anyhow::anyhow!("resize listener: {:?}", e))?,
        );
    }
    if let Some(target) = placement.pointer_target() {
        let v = view.clone();
        listeners.push(
            EventListener::new(&target, "pointermove", move |ev| {
                v.borrow_mut().pointer_moved(&ev)
            })
            .map_err(|e| anyhow::anyhow!("pointermove listener: {:?}", e))?,
        );
    }

    crate::frame::start_loop(view.clone());
    log::info!("[web] mounted {preset:?} on #{element_id} at {w_px}x{h_px}");
    Ok(Mounted {
        view,
        _listeners: listeners,
    })
}
