#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use folio_foundation::CarouselConfig;
    use gallery_demo::session::Session;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))?;
            CarouselConfig::from_json(&json)?
        }
        None => gallery_demo::demo_config(),
    };

    println!("=== Folio Gallery ===");
    println!("{} items, loop {}", config.len(), config.looped);
    println!();

    let session = Session::start(&config)?;
    session.next();
    session.next();
    session.previous();
    session.go_to(config.len() - 1);
    session.next();
    if config.autoplay_enabled() {
        session.wait(config.autoplay_duration().as_millis() as u64 + 200);
        session.toggle_autoplay();
        session.wait(config.autoplay_duration().as_millis() as u64);
    }

    println!();
    println!("final index {}", session.index());
    println!("{} events", session.events().len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
