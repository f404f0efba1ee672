//! Client SDK for the Tacks task-board service.
//!
//! Provides authenticated access to a kanban-style task board: login and
//! registration, durable token storage, a request gateway that silently
//! renews expired access tokens (coordinating concurrent callers onto a
//! single refresh call), and a typed task/board API.
//!
//! # Quick Start
//!
//! ```no_run
//! use tacks::prelude::*;
//!
//! # async fn example() -> tacks::error::Result<()> {
//! let client = TacksClient::new(ClientConfig::from_env());
//! client.login("a@x.com", "hunter2").await?;
//! let board = Board::from_tasks(client.tasks().list().await?);
//! println!("{} columns", board.columns.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prelude;
