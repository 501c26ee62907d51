use fig2deck::converters::serialize_document;
use fig2deck::extract::extract_selection;
use fig2deck::models::page::SelectionPayload;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info) // Set default level
        .parse_default_env() // Allow RUST_LOG override
        .init();

    log::info!("Loading the bundled sample board...");
    let payload: SelectionPayload = serde_json::from_str(include_str!("sample_board.json"))
        .expect("Failed to deserialize the sample board payload");

    let (nodes, page) = extract_selection(&payload).expect("Sample board selection is empty");
    log::info!(
        "Extracted {} top-level node(s) from page {:?}",
        nodes.len(),
        page.name
    );

    let document = serialize_document(&nodes, &page).expect("JSON serialization failed");
    println!("{document}");
}
