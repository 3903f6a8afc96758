use feeds::{FeedKind, FeedPayload, FeedRequest, FetchQueue, FlightRoute};
use geo::geodesy::Geodetic;
use geo::time::{Time, TimeSpan};
use runtime::work_queue::WorkId;
use scene::components::{EntityTimeSpan, Marker, PathTrack, Polyline, PolylineId, Transform};
use scene::{EntityId, Viewer};

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

const VEHICLE_IMAGE: &str = "textures/drone.png";
const ROUTE_COLOR: [f32; 4] = [0.2, 0.8, 1.0, 0.8];

/// Animated flight routes: one polyline plus one path-tracked vehicle
/// marker per route. The marker follows the route's interpolated samples
/// and only draws inside the route's time range.
///
/// Routes come from the flight-data feed on first activation; the scene
/// stays empty until the fetch completes. Deactivating before that
/// cancels the request.
pub struct FlightPathLayer {
    id: LayerId,
    routes: Vec<FlightRoute>,
    pending: Option<WorkId>,
    vehicles: Vec<EntityId>,
    polylines: Vec<PolylineId>,
    active: bool,
}

impl FlightPathLayer {
    /// A layer that fetches its routes when first activated.
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            routes: Vec::new(),
            pending: None,
            vehicles: Vec::new(),
            polylines: Vec::new(),
            active: false,
        }
    }

    /// A layer with routes already in hand; no fetch is made.
    pub fn with_routes(id: u64, routes: Vec<FlightRoute>) -> Self {
        Self {
            routes,
            ..Self::new(id)
        }
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    fn spawn_route(&mut self, viewer: &mut Viewer, route: &FlightRoute) {
        let positions: Vec<_> = route
            .path
            .iter()
            .map(|s| Geodetic::new(s.longitude, s.latitude, s.height).to_ecef())
            .collect();
        let Some(&start) = positions.first() else {
            return;
        };

        self.polylines.push(
            viewer
                .world
                .add_polyline(Polyline::new(positions.clone()).with_color(ROUTE_COLOR)),
        );

        let mut track = PathTrack::new();
        for (sample, position) in route.path.iter().zip(positions) {
            track.push(Time(sample.time), position);
        }

        let vehicle = viewer.world.spawn();
        viewer.world.set_transform(vehicle, Transform::translate(start));
        viewer.world.set_marker(
            vehicle,
            Marker::new(VEHICLE_IMAGE).with_label(route.name.clone()),
        );
        if let Some((first, last)) = track.span() {
            viewer
                .world
                .set_time_span(vehicle, EntityTimeSpan::new(TimeSpan::new(first, last)));
        }
        viewer.world.set_path_track(vehicle, track);
        self.vehicles.push(vehicle);
    }

    fn spawn_all(&mut self, viewer: &mut Viewer) {
        let routes = std::mem::take(&mut self.routes);
        for route in &routes {
            self.spawn_route(viewer, route);
        }
        self.routes = routes;
    }
}

impl LayerController for FlightPathLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::FlightPath
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        viewer: &mut Viewer,
        fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.active {
            return Ok(());
        }
        if self.routes.is_empty() {
            if self.pending.is_none() {
                let id = fetch
                    .submit(0, FeedRequest::new(FeedKind::FlightData))
                    .map_err(|e| LayerError::FetchBacklog { max_len: e.max_len })?;
                self.pending = Some(id);
            }
        } else {
            self.spawn_all(viewer);
        }
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, viewer: &mut Viewer, fetch: &mut FetchQueue) {
        if let Some(request) = self.pending.take() {
            fetch.cancel(request);
        }
        for vehicle in self.vehicles.drain(..) {
            viewer.world.despawn(vehicle);
        }
        for line in self.polylines.drain(..) {
            viewer.world.remove_polyline(line);
        }
        self.active = false;
    }

    fn on_fetch_complete(
        &mut self,
        request: WorkId,
        payload: &FeedPayload,
        viewer: &mut Viewer,
    ) {
        if self.pending != Some(request) {
            return;
        }
        let FeedPayload::FlightData(routes) = payload else {
            return;
        };
        self.pending = None;
        self.routes = routes.clone();
        if self.active {
            self.spawn_all(viewer);
        }
    }
}
