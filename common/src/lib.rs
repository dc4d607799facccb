//! Types shared between the roster server and its clients.

pub mod model;
pub mod requests;
