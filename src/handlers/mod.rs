pub mod boarding;
pub mod drivers;
pub mod routes;
pub mod students;
