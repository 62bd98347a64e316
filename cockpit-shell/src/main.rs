mod app;
mod render_text;

fn main() {
    // Initialize the logger
    env_logger::init();
    log::info!("Starting Model Cockpit shell");

    if let Err(e) = app::app_main() {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
