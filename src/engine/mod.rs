mod stroke;
pub use stroke::*;

mod region;
pub use region::*;

mod rotation;
pub use rotation::*;

mod ticker;
pub use ticker::*;

pub mod composer;
pub use composer::{create_disc_image, render_disc};

pub mod raster;
pub use raster::Raster;
