// Browser smoke test; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_game_builds_the_page() {
    love_maze::start_game().expect("game starts");
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .expect("document");
    assert!(doc.get_element_by_id("maze-canvas").is_some());
    assert!(doc.get_element_by_id("joystick-handle").is_some());
    love_maze::restart_game();
}
