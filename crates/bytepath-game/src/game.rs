use bytepath_engine::batch::{ImmediateBatch, PrimitiveKind, QuadBatch};
use bytepath_engine::coords::{Vec2, Viewport};
use bytepath_engine::core::{App, AppControl, FrameCtx};
use bytepath_engine::input::{InputSnapshot, Key};
use bytepath_engine::paint::Color;
use bytepath_engine::render::{ImmediateRenderer, QuadRenderer};

use crate::config::GameConfig;
use crate::ship::{Ship, ShipControls};

/// Frame driver: simulation, batch recording and rendering, once per refresh.
pub struct Game {
    config: GameConfig,
    ship: Ship,

    quads: QuadBatch,
    immediate: ImmediateBatch,

    quad_renderer: QuadRenderer,
    immediate_renderer: ImmediateRenderer,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let ship = Ship::new(config.ship_start(), config.ship_speed);
        Self {
            config,
            ship,
            quads: QuadBatch::new(),
            immediate: ImmediateBatch::new(),
            quad_renderer: QuadRenderer::new(),
            immediate_renderer: ImmediateRenderer::new(),
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Clears both batches, advances the ship and records the frame.
    ///
    /// Returns the direction the ship moved in.
    pub fn update(&mut self, controls: ShipControls, dt: f32) -> Vec2 {
        self.quads.clear();
        self.immediate.clear();

        let direction = self.ship.step(controls, dt);
        record_frame(
            &mut self.quads,
            &mut self.immediate,
            self.config.viewport,
            &self.ship,
            direction,
            self.config.ship_radius,
        );
        direction
    }
}

impl App for Game {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let quit = quit_requested(&ctx.input);

        self.update(ShipControls::from_input(&ctx.input), ctx.time.fixed_dt);

        // ── Render ────────────────────────────────────────────────────────
        let quads = &self.quads;
        let immediate = &self.immediate;
        let r_q = &mut self.quad_renderer;
        let r_i = &mut self.immediate_renderer;

        let control = ctx.render_in(self.config.viewport, self.config.clear_color, |rctx, target| {
            r_i.render(rctx, target, immediate);
            r_q.render(rctx, target, quads);
        });

        if quit {
            log::info!("quit requested at frame {}", ctx.time.frame_index);
            return AppControl::Exit;
        }
        control
    }
}

/// Escape released or a window close request this frame.
pub fn quit_requested(input: &InputSnapshot<'_>) -> bool {
    input.quit_requested() || input.key(Key::Escape).released
}

/// Records one frame of primitives for `ship` into empty batches.
///
/// Immediate batch: decorative wireframe triangles, the ship outline and the
/// heading line. Quad batch: a red gradient strip along the top.
pub fn record_frame(
    quads: &mut QuadBatch,
    immediate: &mut ImmediateBatch,
    viewport: Viewport,
    ship: &Ship,
    direction: Vec2,
    ship_radius: f32,
) {
    let mut x = 0.0f32;
    while x < 255.0 {
        quads.push_rect_filled(
            Vec2::new(x, 10.0),
            Vec2::new(6.0, 50.0),
            Color::from_straight(x / 255.0, 0.0, 0.0, 1.0),
            0.0,
        );
        x += 5.0;
    }

    immediate.begin_primitive(PrimitiveKind::Triangle, false);
    let previous = immediate.set_color(Color::RED);
    immediate.push_vertex(viewport.at(0.50, 0.25));
    immediate.push_vertex(viewport.at(0.75, 0.75));
    immediate.push_vertex(viewport.at(0.25, 0.75));

    immediate.set_color(Color::YELLOW);
    immediate.push_vertex(viewport.at(0.50, 0.35));
    immediate.push_vertex(viewport.at(0.65, 0.65));
    immediate.push_vertex(viewport.at(0.35, 0.65));
    immediate.set_color(previous);
    immediate.end_primitive();

    immediate.push_circle_outline(ship.position, Color::WHITE, ship_radius);

    immediate.push_line(
        ship.position,
        ship.position + direction * ship.speed,
        Color::WHITE,
    );
}
