use crate::particles::ParticleSystem;
use crate::world::World;
use runtime::frame::{Clock, Frame};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EffectId(pub u32);

/// The host scene.
///
/// Owns the entity world, the attached particle systems, and the tick
/// loop. All scene mutation happens inside `tick`, on the caller's thread;
/// there is no hidden concurrency here.
#[derive(Debug)]
pub struct Viewer {
    pub world: World,
    effects: Vec<Option<ParticleSystem>>,
    clock: Clock,
}

impl Viewer {
    pub fn new(dt_s: f64) -> Self {
        Self {
            world: World::new(),
            effects: Vec::new(),
            clock: Clock::new(dt_s),
        }
    }

    /// The frame the next `tick` will run.
    pub fn frame(&self) -> Frame {
        self.clock.current()
    }

    pub fn attach_effect(&mut self, system: ParticleSystem) -> EffectId {
        let id = EffectId(self.effects.len() as u32);
        self.effects.push(Some(system));
        id
    }

    /// Detaches an effect, which stops all future callback invocations for
    /// it. Safe to call with an already-detached id.
    pub fn detach_effect(&mut self, id: EffectId) -> bool {
        if let Some(slot) = self.effects.get_mut(id.0 as usize)
            && slot.is_some()
        {
            *slot = None;
            return true;
        }
        false
    }

    pub fn effect(&self, id: EffectId) -> Option<&ParticleSystem> {
        self.effects.get(id.0 as usize).and_then(|e| e.as_ref())
    }

    pub fn effect_mut(&mut self, id: EffectId) -> Option<&mut ParticleSystem> {
        self.effects.get_mut(id.0 as usize).and_then(|e| e.as_mut())
    }

    /// Flips an effect's show flag. Returns false for detached ids.
    pub fn set_effect_shown(&mut self, id: EffectId, shown: bool) -> bool {
        match self.effect_mut(id) {
            Some(effect) => {
                effect.set_shown(shown);
                true
            }
            None => false,
        }
    }

    /// Runs one frame: path-tracked transforms first, then every shown
    /// particle system. Returns the frame that ran.
    pub fn tick(&mut self) -> Frame {
        let frame = self.clock.advance();
        self.world.update_path_transforms(frame.time());
        for effect in self.effects.iter_mut().flatten() {
            effect.tick(frame.dt_s);
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::Viewer;
    use crate::particles::{Emitter, ParticleSystem};
    use geo::math::Vec3;

    fn small_system() -> ParticleSystem {
        let mut e = Emitter::new(2.0, 5.0);
        e.volume_min = Vec3::zero();
        e.volume_max = Vec3::new(1.0, 1.0, 0.0);
        ParticleSystem::new(e, 7)
    }

    #[test]
    fn tick_advances_the_frame() {
        let mut viewer = Viewer::new(0.5);
        assert_eq!(viewer.tick().index, 0);
        assert_eq!(viewer.tick().index, 1);
        assert_eq!(viewer.frame().index, 2);
    }

    #[test]
    fn attached_hidden_effect_stays_empty() {
        let mut viewer = Viewer::new(1.0);
        let id = viewer.attach_effect(small_system());
        viewer.tick();
        assert!(viewer.effect(id).unwrap().particles().is_empty());
    }

    #[test]
    fn shown_effect_is_ticked() {
        let mut viewer = Viewer::new(1.0);
        let id = viewer.attach_effect(small_system());
        assert!(viewer.set_effect_shown(id, true));
        viewer.tick();
        assert_eq!(viewer.effect(id).unwrap().particles().len(), 2);
    }

    #[test]
    fn detach_is_idempotent_and_stops_ticking() {
        let mut viewer = Viewer::new(1.0);
        let id = viewer.attach_effect(small_system());
        assert!(viewer.detach_effect(id));
        assert!(!viewer.detach_effect(id));
        assert!(viewer.effect(id).is_none());
        assert!(!viewer.set_effect_shown(id, true));
        viewer.tick();
    }
}
