//! 对象缓存层
//!
//! 通过插件注册表选择后端：moka（进程内，默认）或 redis。
//! JWT 中间件用它缓存已验证用户，避免每个请求都查库。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};
