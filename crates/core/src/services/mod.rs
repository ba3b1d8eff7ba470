pub mod metrics_engine;
pub mod normalizer;
pub mod price_service;
pub mod return_calculator;
pub mod weight_validator;
