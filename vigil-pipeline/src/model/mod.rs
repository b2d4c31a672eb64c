//! Generative analysis models.

mod heuristic;

pub use heuristic::HeuristicModel;
