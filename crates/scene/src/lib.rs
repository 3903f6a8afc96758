pub mod components;
pub mod entity;
pub mod particles;
pub mod viewer;
pub mod world;

pub use entity::EntityId;
pub use viewer::{EffectId, Viewer};
pub use world::World;
