// core 模块 - 运行配置模型
pub mod models;
