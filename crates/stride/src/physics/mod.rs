mod body;
mod world;

pub use body::RapierBody;
pub use world::PhysicsWorld;
