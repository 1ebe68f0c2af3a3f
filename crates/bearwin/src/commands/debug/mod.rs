pub mod events;
pub mod translate;
