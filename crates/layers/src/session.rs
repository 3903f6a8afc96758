use feeds::{FeedPayload, FeedRequest, FetchQueue};
use runtime::event_log::{Event, EventLog, Scope};
use runtime::frame::Frame;
use runtime::work_queue::WorkId;
use scene::Viewer;

use crate::layer::{LayerController, LayerError, LayerId};
use crate::wind_field::{WindFieldLayer, WindParams};

const MAX_PENDING_FETCHES: usize = 32;

/// One dashboard run: the scene, the registered layers, the fetch queue,
/// and the trace log, owned together.
///
/// Everything the host app needs goes through this object. Layers are
/// addressed by [`LayerId`]; there are no per-kind entry points and no
/// free-floating handles. The wind layer is held concretely so parameter
/// edits and teardown can reach it without downcasting.
pub struct DashboardSession {
    viewer: Viewer,
    fetch: FetchQueue,
    log: EventLog,
    layers: Vec<Box<dyn LayerController>>,
    wind: Option<WindFieldLayer>,
}

impl DashboardSession {
    pub fn new(dt_s: f64) -> Self {
        Self {
            viewer: Viewer::new(dt_s),
            fetch: FetchQueue::new(MAX_PENDING_FETCHES),
            log: EventLog::new(),
            layers: Vec::new(),
            wind: None,
        }
    }

    /// Registers a layer. Layers start inactive; `toggle` turns them on.
    pub fn add_layer(&mut self, layer: impl LayerController + 'static) -> LayerId {
        let id = layer.id();
        self.layers.push(Box::new(layer));
        id
    }

    /// Registers the wind layer. Only one is kept; registering a second
    /// replaces the first.
    pub fn add_wind_layer(&mut self, layer: WindFieldLayer) -> LayerId {
        let id = layer.id();
        self.wind = Some(layer);
        id
    }

    /// Flips a layer between active and inactive and returns its actual
    /// state afterwards. Activation failures (fetch backlog) leave the
    /// layer off; a layer that refuses to come up logs nothing.
    pub fn toggle(&mut self, id: LayerId) -> Result<bool, LayerError> {
        let frame = self.viewer.frame();
        let Self {
            viewer,
            fetch,
            log,
            layers,
            wind,
        } = self;

        let layer: &mut dyn LayerController = if let Some(w) = wind.as_mut()
            && w.id() == id
        {
            w
        } else {
            layers
                .iter_mut()
                .map(|l| l.as_mut())
                .find(|l| l.id() == id)
                .ok_or(LayerError::UnknownLayer { id })?
        };

        if layer.is_active() {
            layer.deactivate(viewer, fetch);
            log.record(
                frame,
                Scope::Layer,
                format!("deactivate {}", layer.kind().as_str()),
            );
        } else {
            layer.activate(viewer, fetch)?;
            if layer.is_active() {
                log.record(
                    frame,
                    Scope::Layer,
                    format!("activate {}", layer.kind().as_str()),
                );
            }
        }
        Ok(layer.is_active())
    }

    pub fn layer(&self, id: LayerId) -> Option<&dyn LayerController> {
        if let Some(w) = &self.wind
            && w.id() == id
        {
            return Some(w);
        }
        self.layers
            .iter()
            .map(|l| l.as_ref())
            .find(|l| l.id() == id)
    }

    pub fn is_active(&self, id: LayerId) -> Option<bool> {
        self.layer(id).map(|l| l.is_active())
    }

    /// Updates the shared wind parameters. A no-op returning false when no
    /// wind layer is registered; otherwise takes effect on the next tick.
    pub fn update_wind(&mut self, direction_deg: f64, level: f64) -> bool {
        let Some(wind) = self.wind.as_mut() else {
            return false;
        };
        wind.update_params(direction_deg, level);
        let p = wind.params();
        self.log.record(
            self.viewer.frame(),
            Scope::Wind,
            format!("params dir {:.1} level {:.1}", p.direction_deg, p.level),
        );
        true
    }

    pub fn wind_params(&self) -> Option<WindParams> {
        self.wind.as_ref().map(|w| w.params())
    }

    pub fn wind_layer(&self) -> Option<&WindFieldLayer> {
        self.wind.as_ref()
    }

    /// Tears the wind particle system down for good. The layer stays
    /// registered but refuses all further toggles.
    pub fn destroy_wind(&mut self) -> bool {
        let Some(wind) = self.wind.as_mut() else {
            return false;
        };
        wind.destroy(&mut self.viewer);
        self.log
            .record(self.viewer.frame(), Scope::Wind, "destroy".to_string());
        true
    }

    /// Hands the next queued fetch to the host for fulfilment.
    pub fn pump_fetch(&mut self) -> Option<(WorkId, FeedRequest)> {
        self.fetch.pop_next()
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetch.len()
    }

    /// Reports a fulfilled fetch, with its data, back to whichever layer
    /// submitted it. Layers ignore ids they do not recognize, so a
    /// completion that raced a deactivation is harmless.
    pub fn complete_fetch(&mut self, request: WorkId, payload: FeedPayload) {
        let frame = self.viewer.frame();
        let Self {
            viewer,
            log,
            layers,
            wind,
            ..
        } = self;
        if let Some(w) = wind.as_mut() {
            w.on_fetch_complete(request, &payload, viewer);
        }
        for layer in layers.iter_mut() {
            layer.on_fetch_complete(request, &payload, viewer);
        }
        log.record(frame, Scope::Fetch, format!("complete #{}", request.0));
    }

    /// Runs one frame of the scene. Returns the frame that ran.
    pub fn tick(&mut self) -> Frame {
        self.viewer.tick()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    pub fn events(&self) -> &[Event] {
        self.log.events()
    }

    pub fn scoped_events(&self, scope: Scope) -> impl Iterator<Item = &Event> {
        self.log.scoped(scope)
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.log.drain()
    }
}
