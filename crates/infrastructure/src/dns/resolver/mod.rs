pub mod client;

pub use client::ResolutionClient;
