//! Headless demo: build a small scene, drive it with synthesized input,
//! and print the draw ops each frame produces.

use std::cell::Cell;
use std::rc::Rc;

use lamina::{
    AssetLoader, Capabilities, Color, Delegate, EventCtx, EventOutcome, FrameScheduler, ImageId,
    LayerDelegate, MouseButton, MouseInput, PointerEvent, RawInput, Scene, SceneConfig, Style,
    Surface,
};

struct PrintScheduler(Rc<Cell<usize>>);

impl FrameScheduler for PrintScheduler {
    fn request_frame(&mut self) {
        self.0.set(self.0.get() + 1);
        println!("[scheduler] frame requested (#{})", self.0.get());
    }
}

struct InstantLoader;

impl AssetLoader for InstantLoader {
    fn load(&mut self, _id: ImageId, url: &str) {
        println!("[loader] fetching {url}");
    }
}

/// Prints draw calls instead of rasterizing them.
struct PrintSurface;

impl Surface for PrintSurface {
    fn begin_path(&mut self) {}
    fn move_to(&mut self, _x: f64, _y: f64) {}
    fn line_to(&mut self, _x: f64, _y: f64) {}
    fn quad_to(&mut self, _cx: f64, _cy: f64, _x: f64, _y: f64) {}
    fn close_path(&mut self) {}
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        println!("  rect {width}x{height} at ({x}, {y})");
    }
    fn fill(&mut self, color: Color) {
        println!("  fill {color:?}");
    }
    fn stroke(&mut self, color: Color, line_width: f64) {
        println!("  stroke {color:?} width {line_width}");
    }
    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn translate(&mut self, dx: f64, dy: f64) {
        println!("  translate ({dx}, {dy})");
    }
    fn rotate(&mut self, radians: f64) {
        println!("  rotate {radians}");
    }
    fn draw_image(&mut self, _image: ImageId, x: f64, y: f64, width: f64, height: f64) {
        println!("  image {width}x{height} at ({x}, {y})");
    }
    fn set_font(&mut self, font: &str) {
        println!("  font {font}");
    }
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color) {
        println!("  text {text:?} at ({x}, {y}) {color:?}");
    }
    fn measure_text(&mut self, text: &str) -> f64 {
        text.len() as f64 * 12.0
    }
}

/// A card the user can drag around.
struct DragCard;

impl LayerDelegate for DragCard {
    fn capabilities(&self) -> Capabilities {
        Capabilities::DOWN
    }

    fn on_down(&mut self, event: &PointerEvent, ctx: &mut EventCtx<'_>) -> EventOutcome {
        println!("[card] grabbed at ({}, {})", event.x, event.y);
        let target = event.target;
        let grab = (ctx.scene().layer(target).x, ctx.scene().layer(target).y);
        ctx.follow(move |event, ctx| {
            let delta = event.delta.unwrap_or_default();
            let layer = ctx.scene().layer_mut(target);
            layer.x = grab.0 + delta.x;
            layer.y = grab.1 + delta.y;
            if event.last {
                println!("[card] released after delta ({}, {})", delta.x, delta.y);
            }
        });
        EventOutcome::Consume
    }
}

fn main() {
    let frames = Rc::new(Cell::new(0usize));
    let mut scene = Scene::new(
        SceneConfig {
            width: 320.0,
            height: 240.0,
            ..SceneConfig::default()
        },
        PrintScheduler(frames),
        InstantLoader,
    );
    scene.when_ready(|_| println!("[scene] ready"));

    let root = scene.root();
    let column = scene.new_column(Style {
        padding: 8.0,
        gutter: 4.0,
        ..Style::default()
    });
    scene.layer_mut(column).width = 320.0;
    scene.layer_mut(column).height = 240.0;
    scene.add(root, column);

    let title = scene.new_text(
        "lamina",
        Style {
            padding: 2.0,
            color: Some(Color::WHITE),
            shadow_color: Some(Color::BLACK),
            ..Style::default()
        },
    );
    scene.add(column, title);

    let card = scene.new_layer(Style {
        background: Some(Color::from_u32(0x336699)),
        corner_radius: 6.0,
        grow: 1.0,
        ..Style::default()
    });
    scene.set_delegate(card, Some(Delegate::object(DragCard)));
    scene.add(column, card);

    let badge = scene.load_image("badge.png");
    scene.layer_mut(card).style.background_image = Some(badge);

    scene.mount();
    scene.image_loaded(badge);

    println!("--- frame 1 ---");
    scene.render(&mut PrintSurface);

    // Drag the card 30 to the right.
    let down = RawInput::MouseDown(MouseInput {
        x: 160.0,
        y: 120.0,
        button: Some(MouseButton::Left),
    });
    let drag = RawInput::MouseMove(MouseInput {
        x: 190.0,
        y: 120.0,
        button: Some(MouseButton::Left),
    });
    let up = RawInput::MouseUp(MouseInput {
        x: 190.0,
        y: 120.0,
        button: Some(MouseButton::Left),
    });
    for input in [down, drag, up] {
        let handled = scene.dispatch(&input);
        println!("[input] {input:?} handled={handled}");
    }

    println!("--- frame 2 ---");
    scene.render(&mut PrintSurface);
}
