#![allow(dead_code)]

pub mod entities;
pub mod repositories;
pub mod scope;

pub use entities::{AfterOrderEvent, Order};
pub use repositories::OrderRepository;
pub use scope::{ExecutionLog, InMemoryScope, StatusObserver};
