//! `rodio` implementation of [`AudioOutput`](crate::player::AudioOutput).

mod output;
mod position;
mod sink;

pub use output::RodioOutput;
