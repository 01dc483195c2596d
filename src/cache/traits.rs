use async_trait::async_trait;

/// 缓存查询结果
///
/// ExistsButNoValue 用于后端暂时不可用等"查不到但不代表不存在"的情形，
/// 调用方应将其视为缓存未命中但不回写。
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 对象缓存后端抽象
///
/// 以字符串键值对为接口，复杂对象由调用方自行序列化。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为秒；传 0 表示使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明一个缓存后端插件并在程序加载时注册到全局注册表
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(
                        || -> $crate::cache::register::BoxedObjectCacheFuture {
                            Box::pin(async {
                                let cache = $plugin::new()
                                    .map_err($crate::errors::QPSystemError::cache_connection)?;
                                let boxed: Box<dyn $crate::cache::ObjectCache> = Box::new(cache);
                                Ok(boxed)
                            })
                        },
                    ),
                );
            }
        }
    };
}
