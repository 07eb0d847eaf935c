use anyhow::Result;

fn main() -> Result<()> {
    // Initialize core
    skycast_core::init()?;

    // Create and initialize application
    let mut app = skycast_core::App::new()?;
    app.initialize()?;

    tracing::info!("Skycast application started");

    println!("Skycast - Weather Forecast");
    println!("Core services initialized successfully!");
    println!("\nConfiguration:");
    println!("  Config directory: {}", app.config().config_dir.display());
    println!("  Forecast days: {}", app.config().weather.forecast_days);
    println!(
        "  Geolocation endpoint: {}",
        app.config().location.geolocation_endpoint
    );

    // Graceful shutdown
    app.shutdown()?;

    Ok(())
}
