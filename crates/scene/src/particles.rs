use geo::math::Vec3;
use geo::time::{Time, TimeSpan};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One simulated point visual.
///
/// Per-tick callbacks mutate `velocity` only; the system owns `position`
/// and `age`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f64,
}

/// Per-particle per-tick callback: `(particle, dt)`.
pub type ParticleUpdate = Box<dyn FnMut(&mut Particle, f64) + Send>;

/// Emission parameters for a particle system.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    /// Particles spawned per second.
    pub rate: f64,
    /// Seconds each particle lives.
    pub particle_lifetime: f64,
    /// When the system emits; `TimeSpan::forever()` for an endless system.
    pub system_span: TimeSpan,
    /// Axis-aligned emission volume corners.
    pub volume_min: Vec3,
    pub volume_max: Vec3,
    pub image: String,
    pub start_color: [f32; 4],
    pub end_color: [f32; 4],
    pub start_scale: f32,
    pub end_scale: f32,
}

impl Emitter {
    pub fn new(rate: f64, particle_lifetime: f64) -> Self {
        Self {
            rate,
            particle_lifetime,
            system_span: TimeSpan::forever(),
            volume_min: Vec3::zero(),
            volume_max: Vec3::zero(),
            image: String::new(),
            start_color: [1.0, 1.0, 1.0, 1.0],
            end_color: [1.0, 1.0, 1.0, 0.0],
            start_scale: 1.0,
            end_scale: 1.0,
        }
    }

    fn ramp_t(&self, age: f64) -> f32 {
        if self.particle_lifetime <= 0.0 {
            return 1.0;
        }
        (age / self.particle_lifetime).clamp(0.0, 1.0) as f32
    }

    /// Color sampled over a particle's lifetime (start → end).
    pub fn color_at(&self, age: f64) -> [f32; 4] {
        let t = self.ramp_t(age);
        let mut c = [0.0; 4];
        for i in 0..4 {
            c[i] = self.start_color[i] + (self.end_color[i] - self.start_color[i]) * t;
        }
        c
    }

    /// Scale sampled over a particle's lifetime (start → end).
    pub fn scale_at(&self, age: f64) -> f32 {
        let t = self.ramp_t(age);
        self.start_scale + (self.end_scale - self.start_scale) * t
    }
}

/// A host-owned particle system.
///
/// The viewer ticks shown systems once per frame; hidden systems are
/// paused. Each tick: spawn, age and retire, run the per-particle
/// callback, then Euler-integrate positions. Velocity is uncapped and
/// undamped, so a steady force accumulates linearly over a lifetime.
pub struct ParticleSystem {
    emitter: Emitter,
    particles: Vec<Particle>,
    shown: bool,
    update: Option<ParticleUpdate>,
    spawn_carry: f64,
    elapsed: f64,
    rng: SmallRng,
}

impl ParticleSystem {
    /// A new system starts hidden. The seed fixes emission positions so
    /// runs replay exactly.
    pub fn new(emitter: Emitter, seed: u64) -> Self {
        Self {
            emitter,
            particles: Vec::new(),
            shown: false,
            update: None,
            spawn_carry: 0.0,
            elapsed: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn set_update(&mut self, update: ParticleUpdate) {
        self.update = Some(update);
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn tick(&mut self, dt: f64) {
        if !self.shown || dt <= 0.0 {
            return;
        }

        if self.emitter.system_span.contains(Time(self.elapsed)) {
            self.spawn_carry += self.emitter.rate * dt;
            while self.spawn_carry >= 1.0 {
                self.spawn_carry -= 1.0;
                let position = self.random_point_in_volume();
                self.particles.push(Particle {
                    position,
                    velocity: Vec3::zero(),
                    age: 0.0,
                });
            }
        }
        self.elapsed += dt;

        let lifetime = self.emitter.particle_lifetime;
        for p in &mut self.particles {
            p.age += dt;
        }
        self.particles.retain(|p| p.age <= lifetime);

        if let Some(update) = self.update.as_mut() {
            for p in &mut self.particles {
                update(p, dt);
            }
        }

        for p in &mut self.particles {
            p.position = p.position + p.velocity.scale(dt);
        }
    }

    fn random_point_in_volume(&mut self) -> Vec3 {
        let min = self.emitter.volume_min;
        let max = self.emitter.volume_max;
        Vec3::new(
            sample_axis(&mut self.rng, min.x, max.x),
            sample_axis(&mut self.rng, min.y, max.y),
            sample_axis(&mut self.rng, min.z, max.z),
        )
    }
}

fn sample_axis(rng: &mut SmallRng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

impl std::fmt::Debug for ParticleSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleSystem")
            .field("emitter", &self.emitter)
            .field("shown", &self.shown)
            .field("live_particles", &self.particles.len())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Emitter, Particle, ParticleSystem};
    use geo::math::Vec3;
    use geo::time::{Time, TimeSpan};

    fn boxed_emitter() -> Emitter {
        let mut e = Emitter::new(10.0, 5.0);
        e.volume_min = Vec3::new(-1.0, -1.0, 0.0);
        e.volume_max = Vec3::new(1.0, 1.0, 0.0);
        e
    }

    #[test]
    fn hidden_system_does_nothing() {
        let mut sys = ParticleSystem::new(boxed_emitter(), 1);
        sys.tick(1.0);
        assert!(sys.particles().is_empty());
    }

    #[test]
    fn spawn_rate_carries_fractions() {
        let mut sys = ParticleSystem::new(boxed_emitter(), 1);
        sys.set_shown(true);
        // 10 particles/s at 0.05 s per tick: one particle every other tick.
        sys.tick(0.05);
        assert_eq!(sys.particles().len(), 0);
        sys.tick(0.05);
        assert_eq!(sys.particles().len(), 1);
    }

    #[test]
    fn particles_retire_after_lifetime() {
        let mut e = boxed_emitter();
        e.rate = 1.0;
        e.particle_lifetime = 2.0;
        let mut sys = ParticleSystem::new(e, 1);
        sys.set_shown(true);

        sys.tick(1.0); // spawns one
        assert_eq!(sys.particles().len(), 1);
        sys.tick(1.0); // age 1 -> 2, still alive; spawns another
        sys.tick(1.0); // first reaches age 3 and retires
        assert!(sys.particles().iter().all(|p| p.age <= 2.0));
    }

    #[test]
    fn callback_velocity_is_integrated_into_position() {
        let mut e = boxed_emitter();
        e.rate = 1.0;
        e.volume_min = Vec3::zero();
        e.volume_max = Vec3::zero();
        let mut sys = ParticleSystem::new(e, 1);
        sys.set_shown(true);
        sys.set_update(Box::new(|p: &mut Particle, dt: f64| {
            p.velocity = p.velocity + Vec3::new(1.0, 0.0, 0.0).scale(dt);
        }));

        sys.tick(1.0);
        let p = sys.particles()[0];
        assert_eq!(p.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.position, Vec3::new(1.0, 0.0, 0.0));

        sys.tick(1.0);
        // Velocity keeps accumulating: no cap, no damping.
        let p = sys.particles()[0];
        assert_eq!(p.velocity, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p.position, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn emission_stays_inside_volume() {
        let mut e = boxed_emitter();
        e.rate = 100.0;
        let mut sys = ParticleSystem::new(e, 42);
        sys.set_shown(true);
        sys.tick(1.0);
        assert!(!sys.particles().is_empty());
        for p in sys.particles() {
            assert!((-1.0..1.0).contains(&p.position.x));
            assert!((-1.0..1.0).contains(&p.position.y));
            assert_eq!(p.position.z, 0.0);
        }
    }

    #[test]
    fn finite_system_span_stops_emitting() {
        let mut e = boxed_emitter();
        e.rate = 1.0;
        e.system_span = TimeSpan::new(Time(0.0), Time(1.0));
        let mut sys = ParticleSystem::new(e, 1);
        sys.set_shown(true);
        sys.tick(1.0);
        sys.tick(1.0); // t=1.0 is still inside the span
        let emitted = sys.particles().len();
        assert_eq!(emitted, 2);

        sys.tick(1.0);
        sys.tick(1.0);
        // Lifetime keeps the emitted ones alive, but nothing new appears.
        assert_eq!(sys.particles().len(), emitted);
    }

    #[test]
    fn color_and_scale_ramp_over_lifetime() {
        let mut e = Emitter::new(1.0, 5.0);
        e.start_color = [1.0, 1.0, 1.0, 1.0];
        e.end_color = [1.0, 1.0, 1.0, 0.0];
        e.start_scale = 0.5;
        e.end_scale = 1.5;

        assert_eq!(e.color_at(0.0)[3], 1.0);
        assert_eq!(e.color_at(2.5)[3], 0.5);
        assert_eq!(e.color_at(5.0)[3], 0.0);
        assert_eq!(e.scale_at(0.0), 0.5);
        assert_eq!(e.scale_at(5.0), 1.5);
        // Past the lifetime the ramp clamps.
        assert_eq!(e.scale_at(50.0), 1.5);
    }
}
