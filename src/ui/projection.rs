// ---------------------------------------------------------------------------
// 3-D → 2-D projection
// ---------------------------------------------------------------------------

type Vec3 = [f64; 3];

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: Vec3) -> Option<Vec3> {
    let len = dot(v, v).sqrt();
    (len > 1e-12).then(|| [v[0] / len, v[1] / len, v[2] / len])
}

/// Maps scene coordinates into a box centred on the origin whose sides are
/// `aspect_ratio` long, so every axis fills the view independently of its
/// data range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    center: Vec3,
    scale: Vec3,
}

impl Normalizer {
    pub fn fit(points: impl IntoIterator<Item = Vec3>, aspect_ratio: Vec3) -> Self {
        let (min, max) = points.into_iter().fold(
            ([f64::INFINITY; 3], [f64::NEG_INFINITY; 3]),
            |(lo, hi): (Vec3, Vec3), p| {
                (
                    std::array::from_fn(|k| lo[k].min(p[k])),
                    std::array::from_fn(|k| hi[k].max(p[k])),
                )
            },
        );
        let bounded = |k: usize| min[k].is_finite() && max[k].is_finite();

        let center = std::array::from_fn(|k| {
            if bounded(k) {
                0.5 * (min[k] + max[k])
            } else {
                0.0
            }
        });
        let scale = std::array::from_fn(|k| {
            let extent = max[k] - min[k];
            if !bounded(k) {
                1.0
            } else if extent > f64::EPSILON {
                aspect_ratio[k] / extent
            } else {
                aspect_ratio[k]
            }
        });
        Normalizer { center, scale }
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        std::array::from_fn(|k| (p[k] - self.center[k]) * self.scale[k])
    }
}

/// Perspective camera at `eye`, looking at the origin with `+z` up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl Camera {
    /// `None` when `eye` sits on the origin.
    pub fn looking_at_origin(eye: Vec3) -> Option<Self> {
        let forward = normalize(sub([0.0; 3], eye))?;
        // Looking straight up or down the z axis: fall back to +y as "up".
        let right = normalize(cross(forward, [0.0, 0.0, 1.0]))
            .or_else(|| normalize(cross(forward, [0.0, 1.0, 0.0])))?;
        let up = cross(right, forward);
        Some(Camera {
            eye,
            right,
            up,
            forward,
        })
    }

    /// Screen-plane coordinates (`+x` right, `+y` up), or `None` for points at
    /// or behind the eye.
    pub fn project(&self, p: Vec3) -> Option<[f64; 2]> {
        let d = sub(p, self.eye);
        let depth = dot(d, self.forward);
        if depth <= 1e-9 {
            return None;
        }
        Some([dot(d, self.right) / depth, dot(d, self.up) / depth])
    }
}

/// Normaliser + camera in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub normalizer: Normalizer,
    pub camera: Camera,
}

impl Projector {
    pub fn project(&self, p: Vec3) -> Option<[f64; 2]> {
        self.camera.project(self.normalizer.apply(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_fits_bounds_into_unit_box() {
        let n = Normalizer::fit([[-2.0, 0.0, 0.0], [2.0, 10.0, 40.0]], [1.0, 1.0, 1.0]);
        assert_eq!(n.apply([-2.0, 0.0, 0.0]), [-0.5, -0.5, -0.5]);
        assert_eq!(n.apply([2.0, 10.0, 40.0]), [0.5, 0.5, 0.5]);
        assert_eq!(n.apply([0.0, 5.0, 20.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn normalizer_handles_flat_axes_and_no_points() {
        let n = Normalizer::fit([[1.0, 1.0, 1.0]], [1.0, 1.0, 1.0]);
        assert_eq!(n.apply([1.0, 1.0, 1.0]), [0.0, 0.0, 0.0]);
        let empty = Normalizer::fit(std::iter::empty(), [1.0, 1.0, 1.0]);
        assert_eq!(empty.apply([0.25, 0.0, 0.0]), [0.25, 0.0, 0.0]);
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let cam = Camera::looking_at_origin([1.2, 1.2, 0.3]).unwrap();
        let [x, y] = cam.project([0.0, 0.0, 0.0]).unwrap();
        assert!(x.abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn up_stays_up() {
        let cam = Camera::looking_at_origin([1.2, 1.2, 0.3]).unwrap();
        let [_, top] = cam.project([0.0, 0.0, 0.5]).unwrap();
        let [_, bottom] = cam.project([0.0, 0.0, -0.5]).unwrap();
        assert!(top > 0.0 && bottom < 0.0);
    }

    #[test]
    fn points_behind_the_eye_are_dropped() {
        let cam = Camera::looking_at_origin([1.0, 0.0, 0.0]).unwrap();
        assert!(cam.project([2.0, 0.0, 0.0]).is_none());
    }

    #[test]
    fn degenerate_eyes() {
        assert!(Camera::looking_at_origin([0.0, 0.0, 0.0]).is_none());
        let top_down = Camera::looking_at_origin([0.0, 0.0, 2.0]).unwrap();
        assert!(top_down.project([0.1, 0.1, 0.0]).is_some());
    }
}
