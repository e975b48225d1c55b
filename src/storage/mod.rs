//! 存储层模块
//!
//! 只读的内存资源仓库，以及保存会话快照的键值存储。

pub mod kv;
pub mod query;
pub mod seed;
pub mod store;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, create_key_value_store};
pub use query::{Filter, Page, Pagination};
pub use seed::Catalog;
pub use store::{Collection, CollectionName, CollectionView, ResourceStore};
