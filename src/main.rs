use activity_board::{ActivityBoard, BoardConfig, BoardProps};

fn main() {
    let props = BoardProps {
        config: BoardConfig::from_document(),
    };

    // index.html provides <div id="app"></div>; fall back to <body> without it
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));

    match root {
        Some(root) => yew::Renderer::<ActivityBoard>::with_root_and_props(root, props).render(),
        None => yew::Renderer::<ActivityBoard>::with_props(props).render(),
    };
}
