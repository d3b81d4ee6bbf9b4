//! Demo host: drives the software rasterizer and presents its frames.
//!
//! Two scenes exercise the two vertex-transform variants. Tab switches scene,
//! F5 cycles the rasterizer mode, F6 cycles the output buffer, F12 saves the
//! presented frame as a PNG, Escape quits.

use std::path::Path;

use softras::prelude::*;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;
const CAPTURE_PATH: &str = "frame.png";

/// Shared geometry stamped around the ring, authored in object space.
const RING_TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, -0.25, 0.0),
    Vec3::new(0.0, 0.5, 0.0),
];
const RING_COUNT: usize = 32;
const RING_RADIUS: f32 = 0.5;
const RING_SCALE: f32 = 0.35;
const RING_SEED: u32 = 0x5EED_1234;

const SPINNER_TRIANGLE: [Vec3; 3] = [
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.0, 0.5, 0.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    /// 32 copies of one triangle on a circle, receding in depth, drawn in
    /// shuffled order so occlusion comes from the depth test alone.
    Ring,
    /// A single triangle driven by a time-varying matrix transform.
    Spinner,
}

impl Scene {
    fn switch(self) -> Self {
        match self {
            Scene::Ring => Scene::Spinner,
            Scene::Spinner => Scene::Ring,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Scene::Ring => "Ring",
            Scene::Spinner => "Spinner",
        }
    }
}

/// Tiny LCG so ring colors and submission order are deterministic without a
/// randomness dependency.
struct Lcg(u32);

impl Lcg {
    fn new(seed: u32) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1 << 24) as f32
    }
}

struct RingScene {
    order: Vec<usize>,
    palette: Vec<u32>,
}

impl RingScene {
    fn new() -> Self {
        let mut rng = Lcg::new(RING_SEED);

        // Colors fade out with the same factor that pushes triangles back
        let palette = (0..RING_COUNT)
            .map(|i| {
                let s = 1.0 - i as f32 / RING_COUNT as f32;
                colors::pack_color(
                    s * rng.next_f32(),
                    s * rng.next_f32(),
                    s * rng.next_f32(),
                    1.0,
                )
            })
            .collect();

        // Fisher-Yates shuffle of the submission order
        let mut order: Vec<usize> = (0..RING_COUNT).collect();
        for i in (1..RING_COUNT).rev() {
            let j = (rng.next_u32() as usize) % (i + 1);
            order.swap(i, j);
        }

        Self { order, palette }
    }

    fn draw(&self, engine: &mut Engine) {
        for &i in &self.order {
            let s = 1.0 - i as f32 / RING_COUNT as f32;
            let angle = std::f32::consts::TAU * s;
            let transform = VertexTransform::OffsetScale {
                offset: Vec3::new(
                    RING_RADIUS * angle.sin(),
                    RING_RADIUS * angle.cos(),
                    0.5 * s,
                ),
                scale: RING_SCALE,
            };
            engine.draw_triangle(RING_TRIANGLE, self.palette[i], &transform);
        }
    }
}

fn draw_spinner(engine: &mut Engine, time: f32) {
    let t = time.max(1.0);
    // Scale first, then spin, then drift; Z stays planar so the whole
    // triangle sits at one depth
    let wvp = Mat4::translation(t / 10.0, t / 10.0, 0.0)
        * Mat4::rotation_z(t)
        * Mat4::scaling(0.5 / t, 0.5 / t, 1.0);
    engine.draw_triangle(
        SPINNER_TRIANGLE,
        colors::WHITE,
        &VertexTransform::Matrix(wvp),
    );
}

fn title(scene: Scene, engine: &Engine) -> String {
    format!(
        "softras : (Tab) {} : (F5) {} Rasterization : (F6) {}",
        scene.name(),
        engine.rasterizer_mode(),
        engine.output_mode()
    )
}

fn main() -> Result<(), String> {
    let mut window = Window::new("softras", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut engine = Engine::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut limiter = FrameLimiter::new(&window);

    let ring = RingScene::new();
    let mut scene = Scene::Ring;
    window.set_title(&title(scene, &engine))?;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                engine.resize(width, height);
                window.resize(width, height)?;
            }
            WindowEvent::CycleRasterizerMode => {
                engine.cycle_rasterizer_mode();
                window.set_title(&title(scene, &engine))?;
            }
            WindowEvent::CycleOutputMode => {
                engine.cycle_output_mode();
                window.set_title(&title(scene, &engine))?;
            }
            WindowEvent::SwitchScene => {
                scene = scene.switch();
                window.set_title(&title(scene, &engine))?;
            }
            WindowEvent::Capture => engine.save_frame(Path::new(CAPTURE_PATH))?,
            WindowEvent::None => {}
        }

        limiter.wait_and_get_delta(&window);
        let time = window.ticks() as f32 / 1000.0;

        engine.clear(colors::BACKGROUND);
        match scene {
            Scene::Ring => ring.draw(&mut engine),
            Scene::Spinner => draw_spinner(&mut engine, time),
        }

        window.present(engine.output_frame())?;
    }

    Ok(())
}
