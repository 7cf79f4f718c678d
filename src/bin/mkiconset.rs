use safemyhack_icons::{IconError, IconsetConfig, logger, write_iconset};

fn main() -> Result<(), IconError> {
    logger::init();
    write_iconset(&IconsetConfig::default())?;
    Ok(())
}
