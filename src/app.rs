// The player window: wires playback, the scene, the feature tracker texture
// and the panels into eframe's frame loop.
//
// Per frame: playback step, texture re-upload, panel layout, 3D draw, then a
// `glGetError` check queued behind every other draw.

use crate::config::PlayerConfig;
use crate::error::{PlayerError, PlayerResult};
use crate::gui::{self, ControlAction};
use crate::im::SourceIm;
use crate::playback::Playback;
use crate::scene::{Point3, Scene, Trajectory, TrajectoryId};
use crate::texture::ImageTexture;
use crate::view3d::{self, OrbitCamera};
use eframe::egui;
use eframe::glow::{self, HasContext};
use std::sync::Arc;

/// `Ok` for `GL_NO_ERROR`, otherwise the code as an error.
pub fn check_gl_error(code: u32) -> PlayerResult<()> {
    if code == glow::NO_ERROR {
        Ok(())
    } else {
        Err(PlayerError::Gl { code })
    }
}

// There is nothing to recover: report the code and stop before another frame.
fn exit_on_gl_error(code: u32) {
    if let Err(e) = check_gl_error(code) {
        println!("{code}");
        log::error!("{e}, exiting");
        std::process::exit(1);
    }
}

pub struct PlayerApp {
    panel_w: f32,
    scene: Scene,
    trajectory: TrajectoryId,
    playback: Playback,
    camera: OrbitCamera,
    feature_tracker_im: SourceIm,
    feature_tracker_tex: Option<ImageTexture<egui::TextureHandle>>,
}

impl PlayerApp {
    pub fn new(config: &PlayerConfig, feature_tracker_im: SourceIm) -> Self {
        let mut scene = Scene::new();
        let mut trajectory = Trajectory::new(config.trajectory_color);
        trajectory.push(Point3::from(config.origin));
        let trajectory = scene.add_trajectory(trajectory);

        let mut camera = OrbitCamera::default();
        camera.look_at_centroid(scene.all_points());

        Self {
            panel_w: config.image_panel_w,
            scene,
            trajectory,
            playback: Playback::new(config.start_playing, Point3::from(config.step_delta)),
            camera,
            feature_tracker_im,
            feature_tracker_tex: None,
        }
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn trajectory(&self) -> &Trajectory {
        self.scene.trajectory(self.trajectory)
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn feature_tracker_tex(&self) -> Option<&ImageTexture<egui::TextureHandle>> {
        self.feature_tracker_tex.as_ref()
    }

    /// Replaces the image shown in the feature tracker panel from the next frame on.
    pub fn set_feature_tracker_im(&mut self, im: SourceIm) {
        self.feature_tracker_im = im;
    }

    /// Acquires GPU resources.
    pub fn on_load(&mut self, ctx: &egui::Context) {
        log::info!(
            "load: feature tracker image {}x{}",
            self.feature_tracker_im.w,
            self.feature_tracker_im.h
        );
        self.feature_tracker_tex = Some(ImageTexture::load(
            ctx,
            "feature_tracker",
            &self.feature_tracker_im,
        ));
    }

    /// Releases GPU resources.
    pub fn on_unload(&mut self) {
        log::info!("unload");
        if let Some(tex) = &mut self.feature_tracker_tex {
            tex.unload();
        }
        self.feature_tracker_tex = None;
    }

    pub fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::TogglePlay => self.playback.toggle(),
            ControlAction::Step => {
                self.playback.step(self.scene.trajectory_mut(self.trajectory));
            }
        }
    }

    pub fn on_gui(&mut self, ctx: &egui::Context, w: f32, h: f32) {
        if let Some(tex) = &mut self.feature_tracker_tex {
            tex.update_image(ctx, &self.feature_tracker_im);
        }

        self.playback
            .begin_frame(self.scene.trajectory_mut(self.trajectory));

        for action in gui::controls_window(ctx, h, self.playback.state) {
            self.apply(action);
        }

        if let Some(tex) = &self.feature_tracker_tex {
            gui::image_window(ctx, tex, self.panel_w);
        }

        gui::overlay(ctx, w);
    }

    pub fn on_draw(&mut self, ctx: &egui::Context, w: f32, h: f32) {
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(w, h));

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let resp = ui.allocate_rect(ui.max_rect(), egui::Sense::drag());
                if resp.dragged() {
                    let d = resp.drag_delta();
                    self.camera.orbit(d.x, d.y);
                }
                if resp.hovered() {
                    let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                    if scroll != 0.0 {
                        self.camera.zoom(scroll);
                    }
                }
                view3d::paint_scene(ui.painter(), resp.rect, &self.camera, &self.scene);
            });

        // Topmost layer, so the check runs after everything else this frame was painted.
        let check = egui::PaintCallback {
            rect: screen,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(|_info, painter| {
                let code = unsafe { painter.gl().get_error() };
                exit_on_gl_error(code);
            })),
        };
        ctx.layer_painter(egui::LayerId::new(egui::Order::Debug, egui::Id::new("gl_error_check")))
            .add(check);
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        let (w, h) = (screen.width(), screen.height());

        self.on_gui(ctx, w, h);
        self.on_draw(ctx, w, h);

        // Playback advances once per frame, so keep frames coming.
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&glow::Context>) {
        self.on_unload();
    }
}

/// Opens the player window and blocks until it is closed.
pub fn run(config: PlayerConfig, feature_tracker_im: SourceIm) -> PlayerResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size([config.window_w as f32, config.window_h as f32]),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut app = PlayerApp::new(&config, feature_tracker_im);
            app.on_load(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| PlayerError::Window(e.to_string()))
}
