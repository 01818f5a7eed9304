use nalgebra::Vector3;

pub type Point3 = Vector3<f32>;

/// RGBA, each channel in 0..1.
pub type Rgba = [f32; 4];

/// Ordered, append-only polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub points: Vec<Point3>,
    pub color: Rgba,
}

impl Trajectory {
    pub fn new(color: Rgba) -> Self {
        Self {
            points: Vec::new(),
            color,
        }
    }

    pub fn push(&mut self, p: Point3) {
        self.points.push(p);
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Unconnected points, e.g. landmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub points: Vec<Point3>,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrajectoryId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointSetId(usize);

/// Everything drawn in the 3D view.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    trajectories: Vec<Trajectory>,
    point_sets: Vec<PointSet>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_trajectory(&mut self, trajectory: Trajectory) -> TrajectoryId {
        self.trajectories.push(trajectory);
        TrajectoryId(self.trajectories.len() - 1)
    }

    pub fn add_points(&mut self, points: Vec<Point3>, color: Rgba) -> PointSetId {
        self.point_sets.push(PointSet { points, color });
        PointSetId(self.point_sets.len() - 1)
    }

    // Ids are only minted by this scene, so indexing cannot go out of range.
    pub fn trajectory(&self, id: TrajectoryId) -> &Trajectory {
        &self.trajectories[id.0]
    }

    pub fn trajectory_mut(&mut self, id: TrajectoryId) -> &mut Trajectory {
        &mut self.trajectories[id.0]
    }

    pub fn point_set_mut(&mut self, id: PointSetId) -> &mut PointSet {
        &mut self.point_sets[id.0]
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    pub fn point_sets(&self) -> &[PointSet] {
        &self.point_sets
    }

    /// Every registered point, for framing the camera.
    pub fn all_points(&self) -> impl Iterator<Item = &Point3> {
        self.trajectories
            .iter()
            .flat_map(|t| t.points.iter())
            .chain(self.point_sets.iter().flat_map(|s| s.points.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_trajectory_is_mutable_through_its_id() {
        let mut scene = Scene::new();
        let id = scene.add_trajectory(Trajectory::new([1.0, 0.25, 0.4, 1.0]));
        scene.trajectory_mut(id).push(Point3::new(0.0, 0.0, 1.0));
        scene.trajectory_mut(id).push(Point3::new(0.1, 0.1, 1.0));

        assert_eq!(scene.trajectory(id).len(), 2);
        assert_eq!(scene.trajectories()[0].color, [1.0, 0.25, 0.4, 1.0]);
    }

    #[test]
    fn all_points_covers_trajectories_and_point_sets() {
        let mut scene = Scene::new();
        let mut traj = Trajectory::new([1.0; 4]);
        traj.push(Point3::zeros());
        scene.add_trajectory(traj);
        let lm = scene.add_points(vec![Point3::x(), Point3::y()], [0.0, 1.0, 0.0, 1.0]);
        scene.point_set_mut(lm).points.push(Point3::z());

        assert_eq!(scene.all_points().count(), 4);
        assert_eq!(scene.point_sets().len(), 1);
    }
}
