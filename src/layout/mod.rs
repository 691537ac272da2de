/// Layout layer: geometry of the spiral bundle and the artifacts it produces.
///
/// ```text
///   SpiralParameters + InputTable
///        │
///        ▼
///   ┌──────────┐
///   │  spiral   │  baseline → per-spiral curve → slot indices → nodes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  scene    │  ordered Vec<Artifact> + SceneOptions
///   └──────────┘
/// ```

pub mod params;
pub mod scene;
pub mod spiral;
