//! Data models for flow documents

pub mod flow;

pub use flow::{Edge, FlowDocument, Node};
