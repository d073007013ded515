//! 通用数学工具

pub mod util_methods;
