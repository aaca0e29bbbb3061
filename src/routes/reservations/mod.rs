mod model;

pub use model::{Reservation, ReservationDetails, SaveReservationRequest};
