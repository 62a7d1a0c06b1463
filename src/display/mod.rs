pub mod agent;
pub mod amenities;
pub mod gallery;
pub mod price;
