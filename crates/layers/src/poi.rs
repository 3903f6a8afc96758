use feeds::FetchQueue;
use geo::geodesy::Geodetic;
use scene::components::{Marker, Transform};
use scene::{EntityId, Viewer};

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

/// A named point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiSite {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
    pub image: String,
}

impl PoiSite {
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            longitude,
            latitude,
            height,
            image: "textures/pin.png".into(),
        }
    }
}

/// Labelled markers for a fixed site list.
pub struct PoiLayer {
    id: LayerId,
    sites: Vec<PoiSite>,
    spawned: Vec<EntityId>,
    active: bool,
}

impl PoiLayer {
    pub fn new(id: u64, sites: Vec<PoiSite>) -> Self {
        Self {
            id: LayerId(id),
            sites,
            spawned: Vec::new(),
            active: false,
        }
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

impl LayerController for PoiLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Poi
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        viewer: &mut Viewer,
        _fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.active {
            return Ok(());
        }
        for site in &self.sites {
            let entity = viewer.world.spawn();
            let position = Geodetic::new(site.longitude, site.latitude, site.height).to_ecef();
            viewer.world.set_transform(entity, Transform::translate(position));
            viewer.world.set_marker(
                entity,
                Marker::new(site.image.clone()).with_label(site.name.clone()),
            );
            self.spawned.push(entity);
        }
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, viewer: &mut Viewer, _fetch: &mut FetchQueue) {
        for entity in self.spawned.drain(..) {
            viewer.world.despawn(entity);
        }
        self.active = false;
    }
}
