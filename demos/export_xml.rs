use fig2deck::converters::serialize_xml;
use fig2deck::extract::extract_selection;
use fig2deck::models::page::SelectionPayload;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let payload: SelectionPayload = serde_json::from_str(include_str!("sample_board.json"))
        .expect("Failed to deserialize the sample board payload");

    let (nodes, page) = extract_selection(&payload).expect("Sample board selection is empty");
    log::info!(
        "Extracted {} top-level node(s) from page {:?}",
        nodes.len(),
        page.name
    );

    let document = serialize_xml(&nodes, &page).expect("XML serialization failed");
    println!("{document}");
}
