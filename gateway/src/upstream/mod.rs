pub mod client;
pub mod feed;
pub mod object;

pub use client::NeoWsClient;
