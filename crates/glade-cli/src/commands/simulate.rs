//! Headless simulation command

use anyhow::{bail, Context, Result};
use glade_runtime::{parse_key, GladeConfig, InputState, LightSource, Simulation};
use glade_scene::load_level;
use winit::keyboard::KeyCode;

pub struct SimulateArgs {
    pub level: String,
    pub frames: u64,
    pub keys: String,
    pub config: GladeConfig,
}

fn key_for_char(c: char) -> Option<KeyCode> {
    if c == ' ' {
        Some(KeyCode::Space)
    } else {
        parse_key(&c.to_string())
    }
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let mut scene = load_level(&args.level)
        .with_context(|| format!("failed to load level {}", args.level))?;
    scene.set_road_steps(args.config.road_steps);

    let keys = args
        .keys
        .chars()
        .map(|c| match key_for_char(c) {
            Some(key) => Ok(key),
            None => bail!("no key for character {c:?}"),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut input = InputState::new(args.config.key_bindings()?);
    let mut sim = Simulation::new(scene);

    // One key press per frame, then keep ticking
    let frames = args.frames.max(keys.len() as u64);
    let mut pending = keys.into_iter();
    for _ in 0..frames {
        if let Some(key) = pending.next() {
            input.process_key_down(key);
            if let Some(command) = input.process_key_up(key) {
                sim.apply(command);
            }
        }
        sim.tick();
    }

    let camera = sim.camera();
    let avatar = camera.avatar_position();
    let lights = sim.lights();
    println!(
        "Frames:   {} ({:.2}s at {} fps)",
        sim.frame(),
        sim.frame() as f64 * args.config.frame_seconds(),
        args.config.target_fps
    );
    println!(
        "Camera:   ({:.3}, {:.3}, {:.3}) yaw {:.3}",
        camera.position.x, camera.position.y, camera.position.z, camera.yaw
    );
    println!(
        "Avatar:   ({:.3}, {:.3}, {:.3}) spin {:.1}{}",
        avatar.x,
        avatar.y,
        avatar.z,
        camera.avatar_spin,
        if camera.show_avatar { "" } else { " (hidden)" }
    );
    println!("Torch:    {}", if lights.torch.enabled { "on" } else { "off" });
    let [x, y, z, _] = lights.light.direction;
    let source = match lights.light.source {
        LightSource::Sun => "sun",
        LightSource::Moon => "moon",
    };
    println!("Light:    {} at ({:.3}, {:.3}, {:.3})", source, x, y, z);
    if let Some(color) = lights.light.color {
        println!("Sun rgb:  ({:.3}, {:.3}, {:.3})", color[0], color[1], color[2]);
    }

    Ok(())
}
