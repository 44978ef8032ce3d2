pub mod routes;
pub mod startup;
pub mod state;
pub mod errors;
pub mod bootstrap;

pub use startup::{run_customer_service, run_rental_service};
