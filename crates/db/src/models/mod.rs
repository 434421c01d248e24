pub mod adoption_request;
pub mod animal;
pub mod lookup;
pub mod medical_history;
pub mod organization;
pub mod sighting;
pub mod status;
pub mod user;
