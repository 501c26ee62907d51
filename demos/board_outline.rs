use fig2deck::converters::to_markdown;
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
    println!("{}", to_markdown(&nodes, &page));
}
