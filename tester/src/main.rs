//! Manual poke at a running smart-search server.
//!
//! ```sh
//! cargo run -p tester -- "cheap veg snack"
//! ```

use anyhow::Result;
use menu::MenuItem;
use menu::client::SmartSearchRequest;

fn sample_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: "a".into(),
            name: "Veg Thali".into(),
            price: 80.0,
            tags: vec!["veg".into(), "meal".into()],
            available: None,
        },
        MenuItem {
            id: "b".into(),
            name: "Chicken Roll".into(),
            price: 60.0,
            tags: vec!["non-veg".into(), "chicken".into(), "snack".into()],
            available: None,
        },
        MenuItem {
            id: "c".into(),
            name: "Paneer Wrap".into(),
            price: 70.0,
            tags: vec!["veg".into(), "snack".into()],
            available: None,
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cheap veg snack".to_string());

    let body = SmartSearchRequest {
        query,
        menu: sample_menu(),
    };

    let response = reqwest::Client::new()
        .post("http://localhost:3000/smart-search")
        .json(&body)
        .send()
        .await?;

    println!("status: {}", response.status());

    let results: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
