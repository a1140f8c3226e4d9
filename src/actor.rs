//! Actor storage scanning.

pub mod record;
pub mod scanner;
pub mod storage;

pub use record::ActorRecord;
pub use scanner::{ActorScanner, WorldScan};
pub use storage::{ActorStorage, ActorStub, ContainerStorage, DirectoryStorage, RecordResult};
