pub mod batch;
pub mod candidate;
pub mod invitation;
