mod handler;
mod model;

pub use handler::{catway_detail, catway_reservations, list_catways, reservation_detail};
pub use model::{Catway, CatwayDetails};
