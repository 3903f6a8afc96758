use std::sync::Arc;

use feeds::FetchQueue;
use geo::angle::wrap_degrees;
use geo::math::Vec3;
use geo::rect::GeoRect;
use parking_lot::Mutex;
use scene::particles::{Emitter, Particle, ParticleSystem};
use scene::{EffectId, Viewer};

use crate::layer::{LayerController, LayerError, LayerId, LayerKind};

/// Seconds each wind particle lives.
const PARTICLE_LIFETIME_S: f64 = 5.0;
/// Height band of the emission volume (meters above ground).
const EMISSION_FLOOR_M: f64 = 200.0;
const EMISSION_CEILING_M: f64 = 1_200.0;
/// Rough meters per degree at the equator, good enough for a cosmetic
/// emission volume.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Wind parameters read by the per-tick force callback.
///
/// Shared between the layer (writer) and the particle system's callback
/// (reader). The lock keeps a multi-threaded host correct; on the
/// single-threaded tick loop it is uncontended.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindParams {
    /// Degrees, always in [0, 360).
    pub direction_deg: f64,
    /// Wind strength, always in [1, 10].
    pub level: f64,
}

impl WindParams {
    /// Normalizes arbitrary user input: direction wraps mod 360, level
    /// clamps into [1, 10]. Out-of-range values are cosmetic here, so they
    /// are corrected rather than rejected.
    pub fn normalized(direction_deg: f64, level: f64) -> Self {
        Self {
            direction_deg: wrap_degrees(direction_deg),
            level: level.clamp(1.0, 10.0),
        }
    }
}

/// Horizontal force for the given wind: `(east, north)`.
///
/// Magnitude is `level * 0.1`, a linear scaling with no physical units
/// implied. The vertical component is always zero.
pub fn force_components(direction_deg: f64, level: f64) -> (f64, f64) {
    let force = level * 0.1;
    let dir = direction_deg.to_radians();
    (dir.sin() * force, dir.cos() * force)
}

/// The wind-field layer: owns the particle system's lifecycle and the
/// shared wind parameters.
///
/// Lifecycle states: uninitialized (no effect yet), hidden, visible, and
/// destroyed. `destroy` is terminal; construct a new layer to get a wind
/// field back.
pub struct WindFieldLayer {
    id: LayerId,
    params: Arc<Mutex<WindParams>>,
    particle_count: usize,
    bounds: GeoRect,
    effect: Option<EffectId>,
    active: bool,
    destroyed: bool,
}

impl WindFieldLayer {
    /// Whole-globe bounds unless overridden with [`with_bounds`].
    ///
    /// [`with_bounds`]: WindFieldLayer::with_bounds
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            params: Arc::new(Mutex::new(WindParams::normalized(0.0, 3.0))),
            particle_count: 1_000,
            bounds: GeoRect::whole_globe(),
            effect: None,
            active: false,
            destroyed: false,
        }
    }

    pub fn with_bounds(mut self, bounds: GeoRect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self
    }

    pub fn params(&self) -> WindParams {
        *self.params.lock()
    }

    /// Handle for out-of-band parameter edits (e.g. from the session).
    pub fn params_handle(&self) -> Arc<Mutex<WindParams>> {
        Arc::clone(&self.params)
    }

    pub fn is_created(&self) -> bool {
        self.effect.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Lazily instantiates the particle system. Idempotent: a second call
    /// is a no-op, as is any call after `destroy`.
    ///
    /// The new system starts hidden; `toggle` or `activate` shows it.
    pub fn create(&mut self, viewer: &mut Viewer) {
        if self.destroyed || self.effect.is_some() {
            return;
        }

        let mut emitter = Emitter::new(
            self.particle_count as f64 / PARTICLE_LIFETIME_S,
            PARTICLE_LIFETIME_S,
        );
        // Emission volume in a local east/north/up frame centered on the
        // bounds, wide enough to cover the visible map.
        let half_east = self.bounds.width_deg() * 0.5 * METERS_PER_DEGREE;
        let half_north = self.bounds.height_deg() * 0.5 * METERS_PER_DEGREE;
        emitter.volume_min = Vec3::new(-half_east, -half_north, EMISSION_FLOOR_M);
        emitter.volume_max = Vec3::new(half_east, half_north, EMISSION_CEILING_M);
        emitter.image = "textures/wind.png".into();
        emitter.start_color = [1.0, 1.0, 1.0, 0.9];
        emitter.end_color = [1.0, 1.0, 1.0, 0.0];
        emitter.start_scale = 0.4;
        emitter.end_scale = 1.4;

        let mut system = ParticleSystem::new(emitter, self.id.0);
        let params = Arc::clone(&self.params);
        system.set_update(Box::new(move |p: &mut Particle, dt: f64| {
            let (east, north) = {
                let w = params.lock();
                force_components(w.direction_deg, w.level)
            };
            p.velocity = p.velocity + Vec3::new(east, north, 0.0).scale(dt);
        }));

        self.effect = Some(viewer.attach_effect(system));
    }

    /// Creates the system if needed, then flips visibility.
    pub fn toggle(&mut self, viewer: &mut Viewer) {
        if self.destroyed {
            return;
        }
        self.create(viewer);
        self.active = !self.active;
        if let Some(effect) = self.effect {
            viewer.set_effect_shown(effect, self.active);
        }
    }

    /// Stores new wind parameters. Takes effect on the next tick; the
    /// particle system is not restarted.
    pub fn update_params(&mut self, direction_deg: f64, level: f64) {
        *self.params.lock() = WindParams::normalized(direction_deg, level);
    }

    /// Detaches and releases the particle system. Terminal: subsequent
    /// `create`/`toggle` calls are no-ops. Safe before `create` and safe
    /// to repeat.
    pub fn destroy(&mut self, viewer: &mut Viewer) {
        if let Some(effect) = self.effect.take() {
            viewer.detach_effect(effect);
        }
        self.active = false;
        self.destroyed = true;
    }

    pub fn effect_id(&self) -> Option<EffectId> {
        self.effect
    }
}

impl LayerController for WindFieldLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::WindField
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn activate(
        &mut self,
        viewer: &mut Viewer,
        _fetch: &mut FetchQueue,
    ) -> Result<(), LayerError> {
        if self.destroyed || self.active {
            return Ok(());
        }
        self.toggle(viewer);
        Ok(())
    }

    fn deactivate(&mut self, viewer: &mut Viewer, _fetch: &mut FetchQueue) {
        if self.active {
            self.toggle(viewer);
        }
    }
}
