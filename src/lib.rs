//! SmartBasket - AI-powered meal planning and shopping list CLI
//!
//! This crate turns a free-form meal request into suggested recipes and a
//! priced, budget-checked shopping list, using Google Gemini for the
//! generative steps and SerpAPI (Walmart engine) for product search.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Pipeline stages, the orchestrating assistant, the
//!   recipe cache, and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, SerpAPI, config)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
