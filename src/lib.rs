//! MiniMart ordering counter: a fixed catalog, one order draft per customer,
//! validation before the order is placed and a printable receipt afterwards.

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod order;
pub mod output;
pub mod receipt;
pub mod report;
pub mod validate;
