//! 核心数据模型模块
//!
//! 定义资源仓库中的记录类型：Course, Problem, UserAccount, Document, TokenWallet，
//! 以及会话记录 SessionRecord。

pub mod course;
pub mod document;
pub mod problem;
pub mod record;
pub mod session;
pub mod user;
pub mod wallet;

pub use course::{Course, EnrollmentStatus};
pub use document::Document;
pub use problem::{Problem, TestCase};
pub use record::{Entity, RecordId};
pub use session::{SessionRecord, SessionStatus};
pub use user::{Identity, Role, UserAccount};
pub use wallet::{TokenWallet, Transaction, TransactionKind};
