use kart_view::{Error, config::Config, logging, viewer::Viewer};

fn run() -> Result<(), Error> {
    let config = Config::load()?;
    logging::init(config.log_level())?;

    let mut viewer = Viewer::new(&config)?;
    viewer.run();
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // Errors before the logger is installed still need to reach the user.
        if log::max_level() == log::LevelFilter::Off {
            eprintln!("{err}");
        } else {
            log::error!("{err}");
        }
        std::process::exit(1);
    }
}
