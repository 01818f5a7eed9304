use crate::scene::{Point3, Rgba, Scene};
use eframe::egui;
use nalgebra as na;

const NEAR: f32 = 0.01;
const FAR: f32 = 1000.0;

/// Perspective camera orbiting `target`, z up.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3,
    /// Radians around +z.
    pub yaw: f32,
    /// Radians above the xy plane.
    pub pitch: f32,
    pub distance: f32,
    pub fovy: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Point3::new(0.0, 0.0, 1.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.6,
            distance: 5.0,
            fovy: 45f32.to_radians(),
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> na::Point3<f32> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let offset = Point3::new(cp * cy, cp * sy, sp) * self.distance;
        na::Point3::from(self.target + offset)
    }

    pub fn view(&self) -> na::Isometry3<f32> {
        na::Isometry3::look_at_rh(&self.eye(), &na::Point3::from(self.target), &Point3::z())
    }

    /// Maps a world point to pixel coordinates in a `w` x `h` viewport with the
    /// origin at the top left. `None` if the point is behind the near plane.
    pub fn project(&self, p: &Point3, w: f32, h: f32) -> Option<[f32; 2]> {
        let pc = self.view() * na::Point3::from(*p);
        if pc.z > -NEAR {
            return None;
        }
        let proj = na::Perspective3::new(w / h.max(1.0), self.fovy, NEAR, FAR);
        let ndc = proj.project_point(&pc);
        Some([(ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h])
    }

    /// Drag deltas in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        const RAD_PER_PIX: f32 = 0.01;
        let limit = std::f32::consts::FRAC_PI_2 - 0.01;
        self.yaw -= dx * RAD_PER_PIX;
        self.pitch = (self.pitch + dy * RAD_PER_PIX).clamp(-limit, limit);
    }

    /// Positive `scroll` moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (-scroll * 0.002).exp()).clamp(0.1, 500.0);
    }

    /// Looks at the centroid of `points`; leaves the camera alone if there are none.
    pub fn look_at_centroid<'a>(&mut self, points: impl Iterator<Item = &'a Point3>) {
        let (sum, n) = points.fold((Point3::zeros(), 0usize), |(s, n), p| (s + p, n + 1));
        if n > 0 {
            self.target = sum / n as f32;
        }
    }
}

fn color32(c: Rgba) -> egui::Color32 {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(ch(c[0]), ch(c[1]), ch(c[2]), ch(c[3]))
}

/// Draws every trajectory as a polyline and every point set as dots into `rect`.
pub fn paint_scene(painter: &egui::Painter, rect: egui::Rect, camera: &OrbitCamera, scene: &Scene) {
    let to_screen = |p: &Point3| {
        camera
            .project(p, rect.width(), rect.height())
            .map(|[x, y]| egui::pos2(rect.left() + x, rect.top() + y))
    };

    for traj in scene.trajectories() {
        let stroke = egui::Stroke::new(2.0, color32(traj.color));
        // Split the polyline wherever a point falls behind the camera.
        let mut run: Vec<egui::Pos2> = Vec::with_capacity(traj.len());
        for p in &traj.points {
            match to_screen(p) {
                Some(pos) => run.push(pos),
                None => {
                    if run.len() >= 2 {
                        painter.add(egui::Shape::line(std::mem::take(&mut run), stroke));
                    }
                    run.clear();
                }
            }
        }
        if run.len() >= 2 {
            painter.add(egui::Shape::line(run, stroke));
        } else if let Some(&pos) = run.first() {
            painter.circle_filled(pos, 2.0, stroke.color);
        }
    }

    for set in scene.point_sets() {
        let color = color32(set.color);
        for pos in set.points.iter().filter_map(to_screen) {
            painter.circle_filled(pos, 1.5, color);
        }
    }
}
