pub mod types;
pub mod words;

pub use types::RandomnessRequest;
pub use words::derive_random_words;
