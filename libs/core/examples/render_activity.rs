//! Renders a weather activity from an inline template store.
//!
//! ```bash
//! cargo run -p lg-core --example render_activity
//! ```

use anyhow::Result;
use lg_core::{ActivityGenerator, ActivityOptions, HandlebarsEvaluator};
use serde_json::json;

const STORE: &str = r#"
templates:
  Greeting: "Hi {{name}}, here is your forecast.||Here is the forecast for {{city}}."
  WeatherCard: |
    [HeroCard
      title = Weather for {{city}}
      images = https://example.com/{{city}}.png
      buttons = Today | Tomorrow
    ]
"#;

fn main() -> Result<()> {
    lg_telemetry::install("render-activity-example")?;

    let generator = ActivityGenerator::new(HandlebarsEvaluator::from_yaml_str(STORE)?);
    let options = ActivityOptions::from_value(json!({
        "TextTemplateId": "Greeting",
        "Attachments": [{ "CardTemplateId": "WeatherCard" }],
        "AttachmentLayoutType": "list"
    }))?;
    let activity =
        generator.generate_from_options(&options, &json!({"name": "Ada", "city": "Seattle"}))?;

    println!("{}", serde_json::to_string_pretty(&activity)?);
    Ok(())
}
