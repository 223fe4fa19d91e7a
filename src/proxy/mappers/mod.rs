// Mappers 模块 - 入站请求到上游格式的转换

pub mod error_classifier;
pub mod gemini;
