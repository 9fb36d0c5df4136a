pub mod catalog;
pub mod dashboard;
pub mod fallback;
pub mod model;
pub mod mutation;
pub mod query;
pub mod remote;
pub mod sequencer;
pub mod store;
