#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "swipedeck",
        options,
        Box::new(|cc| Ok(Box::new(swipedeck_ui::DeckApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start demo: {e}"))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
