//! Product search adapters

mod serpapi;

pub use serpapi::SerpApiSearch;
