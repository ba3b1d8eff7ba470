pub mod traits;

// API provider implementations
#[cfg(not(target_arch = "wasm32"))]
pub mod yahoo_finance;
