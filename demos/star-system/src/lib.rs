use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod catalog;
mod game;
mod orbit;
mod picking;
mod starfield;
mod theme;
use game::StarSystem;

orrery_web::export_game!(StarSystem, "star-system", vectors);

/// Start the game from a host-supplied catalog instead of the built-in one.
/// Returns false, leaving any running game in place, when the JSON is
/// malformed or fails validation.
#[wasm_bindgen]
pub fn game_init_with_catalog(json: &str) -> bool {
    init_logging();
    match StarSystem::from_catalog_json(json) {
        Ok(game) => {
            install_game(game);
            true
        }
        Err(e) => {
            log::error!("star-system: rejected catalog: {}", e);
            false
        }
    }
}

/// Body catalog as JSON, for building sliders, tooltips and the info panel.
#[wasm_bindgen]
pub fn get_body_catalog() -> String {
    with_runner(|r| r.game().catalog().to_json())
        .and_then(|json| match json {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("star-system: {}", e);
                None
            }
        })
        .unwrap_or_default()
}

/// Display name of a body, or an empty string for an unknown index.
#[wasm_bindgen]
pub fn get_body_name(index: u32) -> String {
    with_runner(|r| {
        r.game()
            .bodies()
            .get(index as usize)
            .map(|b| b.desc.name.clone())
    })
    .flatten()
    .unwrap_or_default()
}
