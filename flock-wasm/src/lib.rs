use std::f64::consts::TAU;

use flock_core::{
    Boid, ConfigPatch, ConfigUpdate, FlockSimulation, Resume, SimulationConfig, Vector2,
};
use flock_shared::{Frame, SettingsUpdate, SimulationSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

struct Surface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

/// Debug layers drawn around the selected boid.
#[derive(Debug, Clone, Copy, Default)]
struct Overlays {
    direction: bool,
    vision: bool,
    cohesion: bool,
    separation: bool,
}

/// Flock simulation handle for the slide page. The page owns the frame
/// clock and calls `tick` from `requestAnimationFrame`.
#[wasm_bindgen]
pub struct BoidSimulation {
    flock: FlockSimulation,
    surface: Option<Surface>,
    selected: Option<usize>,
    overlays: Overlays,
}

#[wasm_bindgen]
impl BoidSimulation {
    /// `settings` is an optional JSON object in the `SettingsUpdate` shape
    /// applied over the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings: Option<String>) -> Result<BoidSimulation, JsValue> {
        let mut config = SimulationConfig::default();
        if let Some(json) = settings {
            let update = SettingsUpdate::from_json(&json).map_err(js_error)?;
            config = update.to_patch().apply_to(&config);
        }

        let flock = FlockSimulation::new(config).map_err(js_error)?;
        console_log!("Initializing boid simulation with {} boids", flock.len());

        Ok(BoidSimulation {
            flock,
            surface: None,
            selected: None,
            overlays: Overlays::default(),
        })
    }

    /// Draw into the canvas with this id from now on; the canvas is sized to
    /// the world.
    pub fn attach_canvas(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let surface = Surface { canvas, context };
        size_canvas(&surface, &self.flock.config());
        self.surface = Some(surface);
        Ok(())
    }

    pub fn start(&mut self) {
        self.flock.start();
    }

    pub fn stop(&mut self) {
        self.flock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.flock.is_running()
    }

    /// Advances one step if running, then redraws. Returns whether the
    /// flock moved.
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let moved = self.flock.tick();
        if moved {
            self.render()?;
        }
        Ok(moved)
    }

    /// Applies a partial JSON config. Returns true when the flock was
    /// reseeded, in which case any per-boid state on the page is stale.
    pub fn update_config(&mut self, settings: &str) -> Result<bool, JsValue> {
        let update = SettingsUpdate::from_json(settings).map_err(js_error)?;
        self.apply(update.to_patch())
    }

    /// Current config as a JSON object string.
    pub fn config(&self) -> Result<String, JsValue> {
        SimulationSettings::from(&self.flock.config())
            .to_json()
            .map_err(js_error)
    }

    pub fn reset(&mut self, resume: bool) {
        let resume = if resume { Resume::Yes } else { Resume::No };
        self.flock.reset(resume);
        self.selected = None;
        console_log!("Reset flock with {} boids", self.flock.len());
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_world_size(width, height))?;
        console_log!("Resized to {}x{}", width, height);
        Ok(())
    }

    pub fn boid_count(&self) -> usize {
        self.flock.len()
    }

    /// Interleaved `x, y` per boid, in stable index order.
    pub fn positions(&self) -> Vec<f32> {
        self.flock
            .agents()
            .flat_map(|agent| [agent.position.x, agent.position.y])
            .collect()
    }

    /// Heading in radians per boid, aligned with `positions`.
    pub fn headings(&self) -> Vec<f32> {
        self.flock.agents().map(|agent| agent.heading).collect()
    }

    /// Current frame as JSON.
    pub fn frame(&self) -> Result<String, JsValue> {
        Frame::capture(self.flock.ticks(), self.flock.boids())
            .to_json()
            .map_err(js_error)
    }

    pub fn add_boid_at(&mut self, x: f32, y: f32) {
        let position = Vector2::new(x, y);
        let velocity = Vector2::new(
            (js_sys::Math::random() as f32 - 0.5) * 4.0,
            (js_sys::Math::random() as f32 - 0.5) * 4.0,
        );
        self.flock.add_boid(Boid::new(position, velocity));
        console_log!(
            "Added boid at ({}, {}). Total boids: {}",
            x,
            y,
            self.flock.len()
        );
    }

    pub fn set_separation_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_separation_force(weight)).map(drop)
    }

    pub fn set_alignment_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_alignment_force(weight)).map(drop)
    }

    pub fn set_cohesion_weight(&mut self, weight: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_cohesion_force(weight)).map(drop)
    }

    pub fn set_max_speed(&mut self, speed: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_max_speed(speed)).map(drop)
    }

    pub fn set_max_force(&mut self, force: f32) -> Result<(), JsValue> {
        self.apply(ConfigPatch::new().with_max_force(force)).map(drop)
    }

    /// Picks the boid the overlays are drawn for. Returns false, leaving the
    /// selection as it was, when `index` is out of range.
    pub fn select_boid(&mut self, index: usize) -> bool {
        if index >= self.flock.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn select_random_boid(&mut self) -> Option<usize> {
        if self.flock.is_empty() {
            return None;
        }
        let index = (js_sys::Math::random() * self.flock.len() as f64) as usize;
        self.selected = Some(index.min(self.flock.len() - 1));
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_boid(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_show_direction(&mut self, show: bool) {
        self.overlays.direction = show;
    }

    pub fn set_show_vision(&mut self, show: bool) {
        self.overlays.vision = show;
    }

    pub fn set_show_cohesion(&mut self, show: bool) {
        self.overlays.cohesion = show;
    }

    pub fn set_show_separation(&mut self, show: bool) {
        self.overlays.separation = show;
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let Some(surface) = &self.surface else {
            return Ok(());
        };
        let width = surface.canvas.width() as f64;
        let height = surface.canvas.height() as f64;

        // Clear canvas with dark background
        surface.context.set_fill_style_str("#1a1a1a");
        surface.context.fill_rect(0.0, 0.0, width, height);

        for boid in self.flock.boids() {
            self.draw_boid(surface, boid)?;
        }
        self.draw_overlays(surface)?;

        Ok(())
    }

    pub fn destroy(self) {
        self.flock.destroy();
    }
}

impl BoidSimulation {
    fn apply(&mut self, patch: ConfigPatch) -> Result<bool, JsValue> {
        let ConfigUpdate {
            agents_recreated,
            bounds_changed,
        } = self.flock.update_config(patch).map_err(js_error)?;

        if bounds_changed {
            if let Some(surface) = &self.surface {
                size_canvas(surface, &self.flock.config());
            }
        }
        if agents_recreated {
            self.selected = None;
            console_log!("Recreated flock with {} boids", self.flock.len());
        }
        Ok(agents_recreated)
    }

    fn draw_boid(&self, surface: &Surface, boid: &Boid) -> Result<(), JsValue> {
        let size = 8.0;
        let context = &surface.context;

        context.save();
        context.translate(boid.position.x as f64, boid.position.y as f64)?;
        context.rotate(boid.heading() as f64)?;

        // Draw a triangle pointing in the direction of movement
        context.begin_path();
        context.move_to(size, 0.0);
        context.line_to(-size / 2.0, size / 2.0);
        context.line_to(-size / 2.0, -size / 2.0);
        context.close_path();

        // Hue follows speed relative to the cap
        let normalized_speed = (boid.speed() / self.flock.config().max_speed).min(1.0);
        let hue = 150.0 + normalized_speed * 30.0;
        let color = format!("hsl({}, 100%, 50%)", hue);

        context.set_fill_style_str(&color);
        context.fill();

        context.set_stroke_style_str("#00aa55");
        context.set_line_width(1.0);
        context.stroke();

        context.restore();

        Ok(())
    }

    fn draw_overlays(&self, surface: &Surface) -> Result<(), JsValue> {
        let Some(index) = self.selected else {
            return Ok(());
        };
        let Some(boid) = self.flock.boids().get(index) else {
            return Ok(());
        };
        let config = self.flock.config();
        let context = &surface.context;
        let origin = boid.position;

        if self.overlays.direction {
            stroke_line(context, origin, origin + boid.velocity * 20.0, "#00ff00", 3.0);
        }

        if self.overlays.vision {
            let dash = js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(5.0));
            context.set_stroke_style_str("#ffff00");
            context.set_line_width(2.0);
            context.set_line_dash(&dash)?;
            context.begin_path();
            context.arc(
                origin.x as f64,
                origin.y as f64,
                config.vision_radius() as f64,
                0.0,
                TAU,
            )?;
            context.stroke();
            context.set_line_dash(&js_sys::Array::new())?;
        }

        if self.overlays.cohesion {
            let boids = self.flock.boids();
            for neighbor in self.flock.neighbors_of(index, config.cohesion_radius) {
                stroke_line(context, origin, boids[neighbor].position, "#00ffff", 1.0);
            }
        }

        if self.overlays.separation {
            if let Some(forces) = self.flock.steering_of(index) {
                // Nothing to draw when no neighbour is inside the radius
                if !forces.separation.is_zero() {
                    let tip = origin + forces.separation * 100.0;
                    stroke_line(context, origin, tip, "#ff0000", 3.0);
                }
            }
        }

        Ok(())
    }
}

fn stroke_line(
    context: &CanvasRenderingContext2d,
    from: Vector2,
    to: Vector2,
    color: &str,
    width: f64,
) {
    context.set_stroke_style_str(color);
    context.set_line_width(width);
    context.begin_path();
    context.move_to(from.x as f64, from.y as f64);
    context.line_to(to.x as f64, to.y as f64);
    context.stroke();
}

fn size_canvas(surface: &Surface, config: &SimulationConfig) {
    surface.canvas.set_width(config.world_width as u32);
    surface.canvas.set_height(config.world_height as u32);
}
