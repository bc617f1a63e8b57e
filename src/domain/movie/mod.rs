pub mod entity;

pub use entity::{Genre, GenreId, Movie};
