mod audio;
mod config;
mod error;
mod library;
mod player;
mod runtime;
mod toggle;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
