// Play / stop / step state for the player. No I/O, so it is tested without a
// window.

use crate::scene::{Point3, Trajectory};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

#[derive(Debug, Clone)]
pub struct Playback {
    pub state: PlaybackState,
    /// Offset from the last trajectory point to the next one.
    pub delta: Point3,
}

impl Playback {
    pub fn new(playing: bool, delta: Point3) -> Self {
        let state = if playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        };
        Self { state, delta }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        };
        log::info!("playback {:?}", self.state);
    }

    /// Advances the trajectory by one point. Returns whether playback should
    /// continue, which is always the case for now.
    pub fn step(&self, trajectory: &mut Trajectory) -> bool {
        let next = match trajectory.last() {
            Some(last) => last + self.delta,
            None => self.delta,
        };
        trajectory.push(next);
        true
    }

    /// Per-frame hook: one step while playing.
    pub fn begin_frame(&mut self, trajectory: &mut Trajectory) {
        if self.is_playing() && !self.step(trajectory) {
            self.state = PlaybackState::Stopped;
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(false, Point3::new(0.1, 0.1, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_trajectory() -> Trajectory {
        let mut t = Trajectory::new([1.0, 0.25, 0.4, 1.0]);
        t.push(Point3::new(0.0, 0.0, 1.0));
        t
    }

    fn assert_close(a: &Point3, b: &Point3) {
        assert!((a - b).norm() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn manual_step_appends_one_offset_point() {
        let pb = Playback::default();
        let mut traj = start_trajectory();
        assert!(pb.step(&mut traj));

        assert_eq!(traj.len(), 2);
        assert_close(&traj.points[1], &Point3::new(0.1, 0.1, 1.0));
        assert_eq!(pb.state, PlaybackState::Stopped);
    }

    #[test]
    fn stopped_frames_do_not_step() {
        let mut pb = Playback::default();
        let mut traj = start_trajectory();
        for _ in 0..5 {
            pb.begin_frame(&mut traj);
        }
        assert_eq!(traj.len(), 1);
    }

    #[test]
    fn playing_n_frames_appends_n_points() {
        let mut pb = Playback::default();
        pb.toggle();
        assert!(pb.is_playing());

        let mut traj = start_trajectory();
        let n = 25;
        for _ in 0..n {
            pb.begin_frame(&mut traj);
        }

        assert_eq!(traj.len(), 1 + n);
        assert!(pb.is_playing());
        for w in traj.points.windows(2) {
            assert_close(&(w[1] - w[0]), &Point3::new(0.1, 0.1, 0.0));
        }
    }

    #[test]
    fn toggle_round_trips() {
        let mut pb = Playback::new(true, Point3::new(0.1, 0.1, 0.0));
        assert_eq!(pb.state, PlaybackState::Playing);
        pb.toggle();
        assert_eq!(pb.state, PlaybackState::Stopped);
        pb.toggle();
        assert_eq!(pb.state, PlaybackState::Playing);
    }

    #[test]
    fn step_on_empty_trajectory_starts_at_delta() {
        let pb = Playback::new(false, Point3::new(1.0, 2.0, 3.0));
        let mut traj = Trajectory::new([1.0; 4]);
        pb.step(&mut traj);
        assert_eq!(traj.points, vec![Point3::new(1.0, 2.0, 3.0)]);
    }
}
