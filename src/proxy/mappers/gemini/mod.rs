// Gemini mapper 模块

pub mod models;
pub mod wrapper;

pub use models::*;
pub use wrapper::*;
