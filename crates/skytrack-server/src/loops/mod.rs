//! Background loops for continuous processing.

pub mod poll_loop;

pub use poll_loop::PollLoop;
