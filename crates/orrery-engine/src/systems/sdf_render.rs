use crate::components::entity::Entity;
use crate::renderer::camera::Camera3D;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Build the SDF instance buffer from entities with mesh components.
///
/// Every active mesh is projected through the camera; points behind the
/// camera are dropped. Instances are written back-to-front (painter's
/// algorithm) so the renderer can draw them in buffer order.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera3D,
    buffer: &mut SDFBuffer,
) {
    buffer.clear();

    let mut items: Vec<SDFInstance> = Vec::with_capacity(buffer.capacity());
    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let proj = match camera.project(entity.pos) {
            Some(p) => p,
            None => continue,
        };
        items.push(SDFInstance {
            x: proj.pos.x,
            y: proj.pos.y,
            radius: mesh.shape.bounding_radius() * proj.scale,
            rotation: entity.rotation,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            depth: proj.depth,
            _pad0: 0.0,
            _pad1: 0.0,
        });
    }

    // Nearest first, so overflow drops the farthest instances.
    items.sort_by(|a, b| a.depth.partial_cmp(&b.depth).unwrap_or(std::cmp::Ordering::Equal));
    if items.len() > buffer.capacity() {
        log::warn!(
            "SDF buffer full, dropped {} instances",
            items.len() - buffer.capacity()
        );
        items.truncate(buffer.capacity());
    }

    for item in items.into_iter().rev() {
        buffer.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{MeshComponent, SDFColor};
    use glam::Vec3;

    #[test]
    fn projects_entity_with_mesh() {
        let entity = Entity::new(EntityId(1))
            .with_pos(Vec3::ZERO)
            .with_rotation(0.25)
            .with_mesh(
                MeshComponent::sphere(3.0, SDFColor::new(1.0, 1.0, 0.0))
                    .with_shininess(64.0)
                    .with_emissive(0.5),
            );
        let camera = Camera3D::default();
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer(std::iter::once(&entity), &camera, &mut buffer);

        assert_eq!(buffer.instance_count(), 1);
        let inst = buffer.as_slice()[0];
        let proj = camera.project(Vec3::ZERO).unwrap();
        assert!((inst.x - 400.0).abs() < 1e-3);
        assert!((inst.y - 300.0).abs() < 1e-3);
        assert!((inst.radius - 3.0 * proj.scale).abs() < 1e-4);
        assert_eq!(inst.rotation, 0.25);
        assert_eq!(inst.shininess, 64.0);
        assert_eq!(inst.emissive, 0.5);
    }

    #[test]
    fn skips_inactive_meshless_and_hidden() {
        let e1 = Entity::new(EntityId(1)); // no mesh
        let mut e2 = Entity::new(EntityId(2)).with_mesh(MeshComponent::default());
        e2.active = false;
        let e3 = Entity::new(EntityId(3))
            .with_pos(Vec3::new(0.0, 50.0, 110.0)) // behind the camera
            .with_mesh(MeshComponent::default());
        let e4 = Entity::new(EntityId(4)).with_mesh(MeshComponent::default());

        let entities = vec![e1, e2, e3, e4];
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer(entities.iter(), &Camera3D::default(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }

    #[test]
    fn sorted_back_to_front() {
        let near = Entity::new(EntityId(1))
            .with_pos(Vec3::new(0.0, 0.0, 20.0))
            .with_mesh(MeshComponent::default());
        let far = Entity::new(EntityId(2))
            .with_pos(Vec3::new(0.0, 0.0, -20.0))
            .with_mesh(MeshComponent::default());
        let entities = vec![near, far];
        let mut buffer = SDFBuffer::with_capacity(8);
        build_sdf_buffer(entities.iter(), &Camera3D::default(), &mut buffer);

        let out = buffer.as_slice();
        assert!(out[0].depth > out[1].depth);
        assert!(out[0].radius < out[1].radius);
    }

    #[test]
    fn overflow_drops_farthest() {
        let entities: Vec<Entity> = (0..4)
            .map(|i| {
                Entity::new(EntityId(i))
                    .with_pos(Vec3::new(0.0, 0.0, -10.0 * i as f32))
                    .with_mesh(MeshComponent::default())
            })
            .collect();
        let camera = Camera3D::default();
        let mut buffer = SDFBuffer::with_capacity(2);
        build_sdf_buffer(entities.iter(), &camera, &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        let nearest = camera.project(Vec3::ZERO).unwrap().depth;
        assert!((buffer.as_slice()[1].depth - nearest).abs() < 1e-3);
    }
}
