//! Convenience re-exports for common use.

pub use crate::auth::{
    AuthClient, FileTokenStore, RefreshCoordinator, SessionEnd, TokenPair, TokenSource, TokenStore,
};
pub use crate::board::{Board, Column, NewTask, Task, TaskApi, TaskPatch, TaskPriority, TaskStatus};
pub use crate::client::TacksClient;
pub use crate::config::ClientConfig;
pub use crate::error::{Result, TacksError};
pub use crate::gateway::Gateway;
