pub mod define_service;
pub mod extraction;
pub mod heuristic;
pub mod model_service;
pub mod quiz_generator;
pub mod simplify_service;
pub mod validation;
