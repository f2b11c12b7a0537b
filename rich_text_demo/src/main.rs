//! Rich text demo application
//!
//! Lays out a line of markup with an inline icon and effects using the
//! monospace shaper, prints the resulting quads and icons, then clicks every
//! event rectangle and logs what the listeners receive.
//!
//! Usage: `rich_text_demo [config.toml|config.ron]`

use rich_text::prelude::*;
use thiserror::Error;

/// Demo failures
#[derive(Debug, Error)]
enum DemoError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}

/// Bundled config, or defaults if it does not parse
fn default_config() -> RichTextConfig {
    match RichTextConfig::from_toml_str(include_str!("../demo.toml")) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Bundled demo config is invalid ({}), using defaults", err);
            RichTextConfig::default()
        }
    }
}

fn run(config: &RichTextConfig) -> Result<(), DemoError> {
    let mut text = RichText::from_config(config, MonospaceShaper::new());
    text.add_listener(|event: &ClickEvent| -> Result<(), ListenerError> {
        log::info!("Clicked '{}' with args '{}'", event.name, event.args);
        Ok(())
    });

    let mesh = text.populate_mesh()?;
    log::info!("Mesh: {} quads, {} indices", mesh.quad_count(), mesh.indices.len());
    text.update();

    log::info!("Laid out text: {:?}", text.laid_out_text());
    for icon in text.icons() {
        log::info!(
            "Icon {:<8} size ({:.1}, {:.1}) at ({:.1}, {:.1}){}",
            icon.sprite_name.as_deref().unwrap_or("<bar>"),
            icon.size.x,
            icon.size.y,
            icon.position.x,
            icon.position.y,
            icon.event.as_deref().map(|e| format!(" -> {e}")).unwrap_or_default()
        );
    }
    log::info!("Visible display slots: {}", text.image_pool().visible().count());

    let targets: Vec<Vec2> = text
        .event_rects()
        .iter()
        .map(|event| Vec2::new(event.rect.x + event.rect.width * 0.5, event.rect.y + event.rect.height * 0.5))
        .collect();
    for point in targets {
        if text.on_pointer_click(point).is_none() {
            log::warn!("Click at ({:.1}, {:.1}) hit nothing", point.x, point.y);
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    rich_text::foundation::logging::init();

    log::info!("Starting rich text demo");

    let config = match std::env::args().nth(1) {
        Some(path) => RichTextConfig::load_from_file(&path).map_err(DemoError::from)?,
        None => default_config(),
    };

    run(&config)?;
    log::info!("Demo finished");
    Ok(())
}
