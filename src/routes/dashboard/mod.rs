mod handler;
mod model;

pub use handler::{
    catway_details, create_catway, create_user, dashboard, delete_catway, delete_reservation,
    delete_user, next_catway_number, reservation_details, save_reservation, update_catway_state,
    update_user,
};
