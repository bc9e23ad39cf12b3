use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use lg_core::{
    ActivityGenerator, ActivityOptions, AttachmentKind, CardRequest, DirectRequest,
    GenerationRequest, GeneratorSettings, HandlebarsEvaluator, TemplateEvaluator, TextRequest,
    parse_descriptor,
};
use serde_json::{Value, json};

fn main() -> Result<()> {
    lg_telemetry::install("greentic-lg")?;
    let cli = Cli::parse();
    let output = match cli.command {
        CliCommand::Render(args) => handle_render(args)?,
        CliCommand::InspectCard(args) => handle_inspect(args)?,
    };
    println!("{output}");
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "greentic-lg",
    version,
    about = "Render text, speech and card activities from template stores"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Render an activity and print it as JSON
    Render(RenderArgs),
    /// Parse a card template and print its type and fields
    InspectCard(InspectArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Template store (`templates: { id: source }` YAML).
    #[arg(long, value_name = "PATH")]
    templates: PathBuf,
    /// Scope passed to every template (.json, .yaml or .yml).
    #[arg(long, value_name = "PATH")]
    scope: Option<PathBuf>,
    /// Template producing the text/speak pair.
    #[arg(long, value_name = "ID", conflicts_with = "options")]
    text: Option<String>,
    /// Separator between text and speak (defaults to GREENTIC_LG_SEPARATOR or `||`).
    #[arg(long, value_name = "SEP")]
    separator: Option<String>,
    /// Card template written in the `[Type key=value]` syntax.
    #[arg(long, value_name = "ID", conflicts_with_all = ["adaptive_card", "options"])]
    card: Option<String>,
    /// Template producing adaptive card JSON.
    #[arg(long, value_name = "ID", conflicts_with = "options")]
    adaptive_card: Option<String>,
    /// Declarative options document (TextTemplateId, Attachments, ...).
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,
    /// Pretty-print the activity.
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[arg(long, value_name = "PATH")]
    templates: PathBuf,
    #[arg(long, value_name = "ID")]
    card: String,
    #[arg(long, value_name = "PATH")]
    scope: Option<PathBuf>,
}

fn handle_render(args: RenderArgs) -> Result<String> {
    let evaluator = load_store(&args.templates)?;
    let generator = ActivityGenerator::with_settings(evaluator, GeneratorSettings::from_env());
    let scope = load_scope(args.scope.as_deref())?;
    let request = build_request(&args, scope)?;
    let activity = generator.generate(&request)?;
    tracing::info!(
        attachments = activity.attachments.len(),
        layout = activity.attachment_layout.as_str(),
        "rendered activity"
    );
    let output = if args.pretty {
        serde_json::to_string_pretty(&activity)?
    } else {
        serde_json::to_string(&activity)?
    };
    Ok(output)
}

fn handle_inspect(args: InspectArgs) -> Result<String> {
    let evaluator = load_store(&args.templates)?;
    let scope = load_scope(args.scope.as_deref())?;
    let rendered = evaluator
        .evaluate(&args.card, &scope)
        .with_context(|| format!("evaluating template {}", args.card))?;
    let descriptor = parse_descriptor(&args.card, &rendered)?;
    let summary = json!({
        "cardType": descriptor.card_type,
        "contentType": lg_core::card_kind(&descriptor.card_type).map(|kind| kind.content_type()),
        "fields": descriptor.content(),
        "skipped": descriptor.skipped,
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}

fn build_request(args: &RenderArgs, scope: Value) -> Result<GenerationRequest> {
    if let Some(path) = &args.options {
        let options = load_options(path)?;
        return Ok(GenerationRequest::Declarative { options, scope });
    }

    let text = args.text.as_ref().map(|id| TextRequest {
        template_id: id.clone(),
        scope: scope.clone(),
        separator: args.separator.clone(),
    });
    let card = match (&args.card, &args.adaptive_card) {
        (Some(_), Some(_)) => bail!("--card and --adaptive-card are mutually exclusive"),
        (Some(id), None) => Some(CardRequest::new(AttachmentKind::Card, id.clone(), scope)),
        (None, Some(id)) => Some(CardRequest::new(
            AttachmentKind::AdaptiveCard,
            id.clone(),
            scope,
        )),
        (None, None) => None,
    };
    Ok(GenerationRequest::Direct(DirectRequest { text, card }))
}

fn load_store(path: &Path) -> Result<HandlebarsEvaluator> {
    HandlebarsEvaluator::from_yaml_file(path)
        .with_context(|| format!("loading template store {}", path.display()))
}

fn load_scope(path: Option<&Path>) -> Result<Value> {
    match path {
        Some(path) => load_document(path),
        None => Ok(json!({})),
    }
}

fn load_options(path: &Path) -> Result<ActivityOptions> {
    let value = load_document(path)?;
    ActivityOptions::from_value(value).with_context(|| format!("parsing options {}", path.display()))
}

fn load_document(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => serde_yaml_bw::from_str(&content)
            .with_context(|| format!("parsing yaml {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("parsing json {}", path.display())),
    }
}
