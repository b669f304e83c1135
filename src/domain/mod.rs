pub mod lead;
pub mod scenario;
