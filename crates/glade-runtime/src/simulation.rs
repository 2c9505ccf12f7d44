//! Frame-driven simulation: scene, camera and lighting advanced together

use glade_scene::{avatar_mesh, DrawPass, Material, Scene, SceneRenderer};

use crate::camera::{CameraState, CameraView, SpotLight};
use crate::daynight::{DayNightCycle, LightUpdate};
use crate::input::Command;

/// Everything the renderer needs to light one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLights {
    pub light: LightUpdate,
    pub torch: SpotLight,
    pub view: CameraView,
}

/// Owns a loaded scene and the state that changes frame to frame.
///
/// Single-threaded: commands are applied between ticks, one at a time.
pub struct Simulation {
    scene: Scene,
    camera: CameraState,
    cycle: DayNightCycle,
    light: LightUpdate,
    frame: u64,
}

impl Simulation {
    /// Start with the default camera and the sun at the scene's sunlight
    pub fn new(scene: Scene) -> Self {
        let mut cycle = DayNightCycle::new(scene.sunlight());
        let light = cycle.tick();
        Self {
            scene,
            camera: CameraState::new(),
            cycle,
            light,
            frame: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn cycle(&self) -> &DayNightCycle {
        &self.cycle
    }

    /// The most recent light update
    pub fn light(&self) -> LightUpdate {
        self.light
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply a navigation command immediately
    pub fn apply(&mut self, command: Command) {
        self.camera = self.camera.apply(command, self.scene.heightfield());
        tracing::trace!(%command, "applied");
    }

    /// Advance one frame: avatar bounce, then one lighting step
    pub fn tick(&mut self) -> FrameLights {
        self.camera = self.camera.bounce(self.scene.heightfield());
        self.light = self.cycle.tick();
        self.frame += 1;
        self.lights()
    }

    /// Lighting for the current state without advancing
    pub fn lights(&self) -> FrameLights {
        FrameLights {
            light: self.light,
            torch: self.camera.torch_light(),
            view: self.camera.view(),
        }
    }

    /// Draw the scene, then the avatar if it is shown
    pub fn render<R: SceneRenderer>(&self, renderer: &mut R) -> usize {
        let mut calls = self.scene.draw(renderer);
        if self.camera.show_avatar {
            let mesh = avatar_mesh(self.camera.avatar_position(), self.camera.avatar_spin);
            renderer.draw_mesh(DrawPass::Avatar, &mesh, &Material::avatar());
            calls += 1;
        }
        calls
    }
}
