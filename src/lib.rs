pub mod collage;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod photo;
pub mod repository;
pub mod timer;
pub mod window;
pub mod tasks {
    pub mod ticker;
    pub mod viewer;
}

pub use error::Error;
