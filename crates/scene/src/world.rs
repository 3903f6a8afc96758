use crate::components::{
    EntityTimeSpan, Marker, OverlayGrid, OverlayId, PathTrack, Polyline, PolylineId, Transform,
    Visibility,
};
use crate::entity::EntityId;
use geo::time::Time;

/// Entity store for everything the viewer draws.
///
/// Layers spawn and despawn entities here; the viewer's tick reads it.
/// Heavier payloads (polylines, overlay rasters) live in id-addressed pools
/// so layers can detach them without touching entities.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    alive: Vec<bool>,
    transforms: Vec<Option<Transform>>,
    visibility: Vec<Option<Visibility>>,
    time_spans: Vec<Option<EntityTimeSpan>>,
    markers: Vec<Option<Marker>>,
    path_tracks: Vec<Option<PathTrack>>,
    polylines: Vec<Option<Polyline>>,
    overlays: Vec<Option<OverlayGrid>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_index);
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        self.alive[id.index() as usize] = true;
        id
    }

    /// Removes an entity and all of its components. Safe on dead ids.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        let idx = entity.index() as usize;
        if idx >= self.alive.len() || !self.alive[idx] {
            return false;
        }
        self.alive[idx] = false;
        self.transforms[idx] = None;
        self.visibility[idx] = None;
        self.time_spans[idx] = None;
        self.markers[idx] = None;
        self.path_tracks[idx] = None;
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive
            .get(entity.index() as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn set_time_span(&mut self, entity: EntityId, span: EntityTimeSpan) {
        self.time_spans[entity.index() as usize] = Some(span);
    }

    pub fn set_marker(&mut self, entity: EntityId, marker: Marker) {
        self.markers[entity.index() as usize] = Some(marker);
    }

    pub fn set_path_track(&mut self, entity: EntityId, track: PathTrack) {
        self.path_tracks[entity.index() as usize] = Some(track);
    }

    pub fn add_polyline(&mut self, polyline: Polyline) -> PolylineId {
        let id = PolylineId(self.polylines.len() as u32);
        self.polylines.push(Some(polyline));
        id
    }

    pub fn remove_polyline(&mut self, id: PolylineId) -> bool {
        if let Some(slot) = self.polylines.get_mut(id.0 as usize)
            && slot.is_some()
        {
            *slot = None;
            return true;
        }
        false
    }

    pub fn polylines(&self) -> impl Iterator<Item = (PolylineId, &Polyline)> {
        self.polylines
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (PolylineId(i as u32), p)))
    }

    pub fn add_overlay(&mut self, grid: OverlayGrid) -> OverlayId {
        let id = OverlayId(self.overlays.len() as u32);
        self.overlays.push(Some(grid));
        id
    }

    pub fn remove_overlay(&mut self, id: OverlayId) -> bool {
        if let Some(slot) = self.overlays.get_mut(id.0 as usize)
            && slot.is_some()
        {
            *slot = None;
            return true;
        }
        false
    }

    pub fn overlays(&self) -> impl Iterator<Item = (OverlayId, &OverlayGrid)> {
        self.overlays
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|g| (OverlayId(i as u32), g)))
    }

    /// Markers that should draw at `time`: alive, visible (default visible),
    /// and inside their time span if they carry one.
    pub fn visible_markers_at(&self, time: Time) -> Vec<(EntityId, Transform, Marker)> {
        let mut out = Vec::new();
        for (idx, marker) in self.markers.iter().enumerate() {
            let Some(marker) = marker else { continue };
            if !self.alive[idx] {
                continue;
            }
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            let visible = self
                .visibility
                .get(idx)
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                continue;
            }
            if let Some(EntityTimeSpan { span }) = self.time_spans.get(idx).and_then(|s| *s)
                && !span.contains(time)
            {
                continue;
            }

            out.push((EntityId(idx as u32), transform, marker.clone()));
        }
        out
    }

    /// Drives transforms from path tracks. Called once per tick, before
    /// anything reads marker positions for this frame.
    pub fn update_path_transforms(&mut self, time: Time) {
        for idx in 0..self.path_tracks.len() {
            if !self.alive[idx] {
                continue;
            }
            let Some(track) = &self.path_tracks[idx] else {
                continue;
            };
            if let Some(position) = track.position_at(time) {
                self.transforms[idx] = Some(Transform::translate(position));
            }
        }
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.alive.len() <= idx {
            let new_len = idx + 1;
            self.alive.resize(new_len, false);
            self.transforms.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.time_spans.resize(new_len, None);
            self.markers.resize(new_len, None);
            self.path_tracks.resize(new_len, None);
        }
    }
}
