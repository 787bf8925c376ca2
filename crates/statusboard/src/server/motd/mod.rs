pub mod favicon;
mod generator;

pub use favicon::load_favicon;
pub use generator::generate_response;
