//! Movement domain: collision probing on top of avian's spatial queries.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::probe::{CollisionProbe, ProbeLayer};
use crate::movement::{GameLayer, Hitbox};

/// Solver penetration tolerated before two boxes count as overlapping.
///
/// Casts use a box shrunk by this much on every side and travel this much
/// further, so resting contacts register along the cast direction only.
const CONTACT_TOLERANCE: f32 = 0.01;

pub(crate) struct AvianProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> AvianProbe<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self { spatial_query }
    }
}

fn filter(layer: ProbeLayer) -> SpatialQueryFilter {
    match layer {
        ProbeLayer::Solid => SpatialQueryFilter::from_mask(GameLayer::Solid),
        ProbeLayer::Spring => SpatialQueryFilter::from_mask(GameLayer::Spring),
    }
}

fn probe_shape(hitbox: Hitbox) -> Collider {
    let half = (hitbox.half_extents - Vec2::splat(CONTACT_TOLERANCE)).max(Vec2::splat(0.001));
    Collider::rectangle(half.x * 2.0, half.y * 2.0)
}

impl CollisionProbe for AvianProbe<'_, '_, '_> {
    fn cast(&self, hitbox: Hitbox, direction: Vec2, distance: f32, layer: ProbeLayer) -> bool {
        let Ok(direction) = Dir2::new(direction) else {
            return self.overlaps(hitbox, layer);
        };

        let config = ShapeCastConfig::from_max_distance(distance + CONTACT_TOLERANCE);
        self.spatial_query
            .cast_shape(
                &probe_shape(hitbox),
                hitbox.center,
                0.0,
                direction,
                &config,
                &filter(layer),
            )
            .is_some()
    }

    fn overlaps(&self, hitbox: Hitbox, layer: ProbeLayer) -> bool {
        !self
            .spatial_query
            .shape_intersections(&probe_shape(hitbox), hitbox.center, 0.0, &filter(layer))
            .is_empty()
    }
}
