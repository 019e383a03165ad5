//! Scene setup and per-frame overlays.

#![allow(clippy::needless_pass_by_value)] // Bevy system parameters
#![allow(clippy::cast_possible_truncation)] // f64 -> f32 is intentional for Bevy

use bevy::prelude::*;

use crate::camera::{OrbitCamera, OrbitCameraPlugin};
use crate::convert::{bevy_mesh, edge_segments, vec3_from_point};
use crate::scene::PreviewScene;

/// Scene data shared with the systems.
#[derive(Resource, Debug, Clone)]
pub struct SceneData {
    /// The scene to draw.
    pub scene: PreviewScene,
    /// Shell edges, drawn as lines every frame.
    pub shell_edges: Vec<(Vec3, Vec3)>,
    /// Minimum corner of the scene.
    pub min: Vec3,
    /// Maximum corner of the scene.
    pub max: Vec3,
}

impl SceneData {
    /// Precompute what the systems need from a scene.
    #[must_use]
    pub fn new(scene: PreviewScene) -> Self {
        let bounds = scene.bounds();
        let (min, max) = if bounds.is_empty() {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            (vec3_from_point(&bounds.min), vec3_from_point(&bounds.max))
        };
        Self {
            shell_edges: edge_segments(&scene.shell),
            scene,
            min,
            max,
        }
    }

    /// The twelve edges of the bounding box.
    #[must_use]
    pub fn box_edges(&self) -> [(Vec3, Vec3); 12] {
        let (a, b) = (self.min, self.max);
        let corner = |x: bool, y: bool, z: bool| {
            Vec3::new(
                if x { b.x } else { a.x },
                if y { b.y } else { a.y },
                if z { b.z } else { a.z },
            )
        };
        [
            (corner(false, false, false), corner(true, false, false)),
            (corner(false, true, false), corner(true, true, false)),
            (corner(false, false, true), corner(true, false, true)),
            (corner(false, true, true), corner(true, true, true)),
            (corner(false, false, false), corner(false, true, false)),
            (corner(true, false, false), corner(true, true, false)),
            (corner(false, false, true), corner(false, true, true)),
            (corner(true, false, true), corner(true, true, true)),
            (corner(false, false, false), corner(false, false, true)),
            (corner(true, false, false), corner(true, false, true)),
            (corner(false, true, false), corner(false, true, true)),
            (corner(true, true, false), corner(true, true, true)),
        ]
    }
}

/// Plugin that spawns a [`PreviewScene`] with camera, lights and overlays.
pub struct SwarmViewerPlugin {
    scene: PreviewScene,
}

impl SwarmViewerPlugin {
    /// Plugin for `scene`.
    #[must_use]
    pub const fn new(scene: PreviewScene) -> Self {
        Self { scene }
    }
}

impl Plugin for SwarmViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneData::new(self.scene.clone()))
            .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)))
            .add_plugins(OrbitCameraPlugin)
            .add_systems(Startup, (spawn_scene, spawn_camera, spawn_lighting))
            .add_systems(Update, (draw_bounds, draw_shell_edges));
    }
}

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<SceneData>,
) {
    let scene = &data.scene;

    if !scene.expanded.faces.is_empty() {
        commands.spawn((
            Mesh3d(meshes.add(bevy_mesh(&scene.expanded))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(0.75, 0.78, 0.85, 0.45),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            })),
            Transform::default(),
        ));
    }

    if !scene.shell.faces.is_empty() {
        commands.spawn((
            Mesh3d(meshes.add(bevy_mesh(&scene.shell))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::WHITE,
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::default(),
        ));
    }

    let sphere = meshes.add(Sphere::new(scene.point_radius() as f32).mesh().build());
    let red = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.1, 0.1),
        ..default()
    });
    for p in &scene.points {
        commands.spawn((
            Mesh3d(sphere.clone()),
            MeshMaterial3d(red.clone()),
            Transform::from_translation(vec3_from_point(p)),
        ));
    }
}

fn spawn_camera(mut commands: Commands, data: Res<SceneData>) {
    let center = (data.min + data.max) * 0.5;
    let radius = (data.max - data.min).length() * 0.5;
    let camera = OrbitCamera::framing(center, radius);

    let mut transform = Transform::default();
    camera.apply(&mut transform);
    commands.spawn((Camera3d::default(), camera, transform));
}

fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.6, 0.5, 0.0)),
    ));

    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
}

/// Bounding box with coloured axes from its minimum corner.
fn draw_bounds(mut gizmos: Gizmos, data: Res<SceneData>) {
    let grey = Color::srgb(0.7, 0.7, 0.7);
    for (a, b) in data.box_edges() {
        gizmos.line(a, b, grey);
    }

    let size = data.max - data.min;
    let origin = data.min;
    gizmos.arrow(origin, origin + Vec3::X * size.x, Color::srgb(1.0, 0.2, 0.2));
    gizmos.arrow(origin, origin + Vec3::Y * size.y, Color::srgb(0.2, 1.0, 0.2));
    gizmos.arrow(origin, origin + Vec3::Z * size.z, Color::srgb(0.3, 0.4, 1.0));
}

fn draw_shell_edges(mut gizmos: Gizmos, data: Res<SceneData>) {
    let dark = Color::srgb(0.2, 0.2, 0.25);
    for &(a, b) in &data.shell_edges {
        gizmos.line(a, b, dark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, IndexedMesh, PointSet};

    #[test]
    fn scene_data_bounds() {
        let data = SceneData::new(PreviewScene::new(
            unit_cube(),
            unit_cube(),
            PointSet::default(),
        ));
        assert_eq!(data.min, Vec3::ZERO);
        assert_eq!(data.max, Vec3::ONE);
        assert_eq!(data.shell_edges.len(), 18);
    }

    #[test]
    fn box_edges_have_axis_lengths() {
        let data = SceneData::new(PreviewScene::new(
            unit_cube(),
            IndexedMesh::new(),
            PointSet::default(),
        ));
        for (a, b) in data.box_edges() {
            assert!((a.distance(b) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn empty_scene_has_zero_box() {
        let data = SceneData::new(PreviewScene::default());
        assert_eq!(data.min, Vec3::ZERO);
        assert_eq!(data.max, Vec3::ZERO);
    }
}
