// Per-frame panel layout: playback controls at the bottom left, the feature
// tracker image at the top left, an FPS readout at the top right.
//
// Geometry and labels are computed by plain functions so they can be checked
// without a window; the `*_window` functions only hand them to egui.

use crate::playback::PlaybackState;
use crate::texture::ImageTexture;
use eframe::egui::{self, Color32, Rect, pos2, vec2};

pub const CONTROLS_W: f32 = 240.0;
pub const CONTROLS_H: f32 = 40.0;
pub const BUTTON_W: f32 = 80.0;
pub const STATUS_BAR_H: f32 = 10.0;
pub const OVERLAY_W: f32 = 100.0;
pub const OVERLAY_H: f32 = 30.0;

/// Value shown in the overlay. There is no frame timer yet.
pub const DISPLAYED_FPS: f64 = 30.0;

// Longest overlay string, matching the fixed 13 character readout.
const FPS_TEXT_MAX_CHARS: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    TogglePlay,
    Step,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonBehavior {
    /// Fires once per click.
    Default,
    /// Fires every frame while held.
    Repeater,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlButton {
    pub label: &'static str,
    pub behavior: ButtonBehavior,
    pub action: ControlAction,
}

impl ControlButton {
    const fn new(label: &'static str, behavior: ButtonBehavior, action: ControlAction) -> Self {
        Self {
            label,
            behavior,
            action,
        }
    }

    pub fn fired(&self, clicked: bool, held: bool) -> bool {
        match self.behavior {
            ButtonBehavior::Default => clicked,
            ButtonBehavior::Repeater => held,
        }
    }
}

const PLAYING_BUTTONS: [ControlButton; 1] = [ControlButton::new(
    "Playing",
    ButtonBehavior::Default,
    ControlAction::TogglePlay,
)];

const STOPPED_BUTTONS: [ControlButton; 3] = [
    ControlButton::new("Stopped", ButtonBehavior::Default, ControlAction::TogglePlay),
    ControlButton::new("Forward", ButtonBehavior::Repeater, ControlAction::Step),
    ControlButton::new("Step", ButtonBehavior::Default, ControlAction::Step),
];

/// Buttons shown for `state`, left to right. The label names the current state.
pub fn control_buttons(state: PlaybackState) -> &'static [ControlButton] {
    match state {
        PlaybackState::Playing => &PLAYING_BUTTONS,
        PlaybackState::Stopped => &STOPPED_BUTTONS,
    }
}

pub fn controls_rect(screen_h: f32) -> Rect {
    Rect::from_min_size(pos2(0.0, screen_h - CONTROLS_H), vec2(CONTROLS_W, CONTROLS_H))
}

/// Geometry of the feature tracker panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImagePanelLayout {
    pub window: Rect,
    pub image: Rect,
    pub status_bar: Rect,
}

impl ImagePanelLayout {
    pub fn new(panel_w: f32, image_h: f32) -> Self {
        Self {
            window: Rect::from_min_size(pos2(0.0, 0.0), vec2(panel_w, image_h + STATUS_BAR_H)),
            image: Rect::from_min_size(pos2(0.0, 0.0), vec2(panel_w, image_h)),
            status_bar: Rect::from_min_size(pos2(0.0, image_h), vec2(panel_w, STATUS_BAR_H)),
        }
    }

    /// Same layout moved so that the window starts at `origin`.
    pub fn translated(&self, origin: egui::Pos2) -> Self {
        let d = origin - self.window.min;
        Self {
            window: self.window.translate(d),
            image: self.image.translate(d),
            status_bar: self.status_bar.translate(d),
        }
    }
}

/// Fills for the bar under the image, in paint order.
///
/// `level` is clamped to 2.0. Below 0.2 the whole bar is red, then a yellow
/// fill covers `level / 2` of the width.
pub fn status_bar_fills(level: f64, bar: Rect) -> Vec<(Rect, Color32)> {
    let level = level.min(2.0);
    let mut fills = Vec::with_capacity(2);
    if level < 0.2 {
        fills.push((bar, Color32::from_rgb(255, 0, 0)));
    }
    let fill_w = (level / 2.0 * bar.width() as f64) as f32;
    fills.push((
        Rect::from_min_size(bar.min, vec2(fill_w, bar.height())),
        Color32::from_rgb(255, 255, 0),
    ));
    fills
}

pub fn fps_text(fps: f64) -> String {
    let mut text = format!("FPS: {fps:8.3}");
    text.truncate(FPS_TEXT_MAX_CHARS);
    text
}

pub fn overlay_rect(screen_w: f32) -> Rect {
    Rect::from_min_size(pos2(screen_w - OVERLAY_W, 0.0), vec2(OVERLAY_W, OVERLAY_H))
}

fn panel_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_rgba_unmultiplied(48, 48, 48, 128))
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(65)))
        .inner_margin(egui::Margin::ZERO)
}

fn fixed_window(title: &str, rect: Rect) -> egui::Window<'static> {
    egui::Window::new(title)
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .scroll(false)
        .fixed_rect(rect)
        .frame(panel_frame())
}

/// Draws the controls panel and returns the actions fired this frame.
pub fn controls_window(ctx: &egui::Context, screen_h: f32, state: PlaybackState) -> Vec<ControlAction> {
    let mut actions = Vec::new();
    fixed_window("Controls", controls_rect(screen_h)).show(ctx, |ui| {
        ui.spacing_mut().item_spacing = egui::Vec2::ZERO;
        ui.horizontal(|ui| {
            for button in control_buttons(state) {
                let resp = ui.add_sized([BUTTON_W, CONTROLS_H], egui::Button::new(button.label));
                if button.fired(resp.clicked(), resp.is_pointer_button_down_on()) {
                    actions.push(button.action);
                }
            }
        });
    });
    actions
}

/// Draws the feature tracker image with its status bar. Nothing is shown while
/// the texture is empty.
pub fn image_window(ctx: &egui::Context, texture: &ImageTexture<egui::TextureHandle>, panel_w: f32) {
    if texture.is_empty() {
        return;
    }
    let Some(handle) = texture.handle() else {
        return;
    };
    let layout = ImagePanelLayout::new(panel_w, texture.display_h(panel_w));

    fixed_window("Displays", layout.window).show(ctx, |ui| {
        let (rect, _) = ui.allocate_exact_size(layout.window.size(), egui::Sense::hover());
        let placed = layout.translated(rect.min);

        egui::Image::new((handle.id(), placed.image.size())).paint_at(ui, placed.image);

        let level = 0.0;
        for (fill, color) in status_bar_fills(level, placed.status_bar) {
            ui.painter().rect_filled(fill, 0.0, color);
        }
    });
}

/// Non-interactive FPS readout in the top right corner.
pub fn overlay(ctx: &egui::Context, screen_w: f32) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("Overlays"),
    ));
    let rect = overlay_rect(screen_w);
    painter.text(
        pos2(rect.left() + 10.0, rect.top() + 5.0),
        egui::Align2::LEFT_TOP,
        fps_text(DISPLAYED_FPS),
        egui::FontId::monospace(13.0),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(state: PlaybackState) -> Vec<&'static str> {
        control_buttons(state).iter().map(|b| b.label).collect()
    }

    #[test]
    fn buttons_follow_playback_state() {
        assert_eq!(labels(PlaybackState::Playing), vec!["Playing"]);
        assert_eq!(labels(PlaybackState::Stopped), vec!["Stopped", "Forward", "Step"]);
        assert_eq!(control_buttons(PlaybackState::Playing)[0].action, ControlAction::TogglePlay);
    }

    #[test]
    fn forward_repeats_while_held_step_needs_a_click() {
        let [_, forward, step] = STOPPED_BUTTONS;
        assert!(forward.fired(false, true));
        assert!(!forward.fired(true, false));
        assert!(step.fired(true, false));
        assert!(!step.fired(false, true));
    }

    #[test]
    fn controls_sit_in_bottom_left() {
        let r = controls_rect(720.0);
        assert_eq!(r.min, pos2(0.0, 680.0));
        assert_eq!(r.size(), vec2(240.0, 40.0));
        assert_eq!(CONTROLS_W, BUTTON_W * 3.0);
    }

    #[test]
    fn image_panel_adds_status_bar_under_image() {
        let layout = ImagePanelLayout::new(240.0, 153.0);
        assert_eq!(layout.window.size(), vec2(240.0, 163.0));
        assert_eq!(layout.image.size(), vec2(240.0, 153.0));
        assert_eq!(layout.status_bar.min, pos2(0.0, 153.0));
        assert_eq!(layout.status_bar.height(), STATUS_BAR_H);

        let moved = layout.translated(pos2(5.0, 7.0));
        assert_eq!(moved.status_bar.min, pos2(5.0, 160.0));
    }

    #[test]
    fn zero_level_paints_full_red_and_empty_yellow() {
        let bar = Rect::from_min_size(pos2(0.0, 100.0), vec2(240.0, 10.0));
        let fills = status_bar_fills(0.0, bar);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0], (bar, Color32::from_rgb(255, 0, 0)));
        assert_eq!(fills[1].0.width(), 0.0);
        assert_eq!(fills[1].1, Color32::from_rgb(255, 255, 0));
    }

    #[test]
    fn high_level_is_clamped_and_skips_red() {
        let bar = Rect::from_min_size(pos2(0.0, 0.0), vec2(240.0, 10.0));
        let fills = status_bar_fills(5.0, bar);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].0.width(), 240.0);

        let half = status_bar_fills(1.0, bar);
        assert_eq!(half[0].0.width(), 120.0);
    }

    #[test]
    fn fps_text_is_fixed_width() {
        assert_eq!(fps_text(DISPLAYED_FPS), "FPS:   30.000");
        assert_eq!(fps_text(123_456.0).len(), 13);
    }

    #[test]
    fn overlay_hugs_top_right() {
        let r = overlay_rect(1200.0);
        assert_eq!(r.min, pos2(1100.0, 0.0));
        assert_eq!(r.size(), vec2(100.0, 30.0));
    }
}
