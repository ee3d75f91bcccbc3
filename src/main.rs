mod audio;
mod config;
mod controls;
mod library;
mod mpris;
mod player;
mod queue;
mod runtime;
mod session;
mod state;
mod track;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
