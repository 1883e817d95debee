use crate::cli::{NoteCommands, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::mcp_integration::{response_formatting, CliToolContext};
use quicknote::Config;
use serde_json::{json, Value};
use std::io::{self, Read};

/// Run a note subcommand against the configured store
pub async fn handle_note_command(
    command: NoteCommands,
    config: &Config,
    format: OutputFormat,
) -> CliResult<()> {
    let context = CliToolContext::new(config)?;
    let printer = Printer { format };

    match command {
        NoteCommands::Save { content, tags } => {
            let content = get_content_input(content)?;
            save_note(&context, &printer, content, tags).await
        }
        NoteCommands::List { query, limit } => list_notes(&context, &printer, query, limit).await,
        NoteCommands::Recent { count } => recent_notes(&context, &printer, count).await,
        NoteCommands::Delete { id } => delete_note(&context, &printer, &id).await,
        NoteCommands::Tag { tag } => notes_by_tag(&context, &printer, &tag).await,
    }
}

async fn save_note(
    context: &CliToolContext,
    printer: &Printer,
    content: String,
    tags: Vec<String>,
) -> CliResult<()> {
    let args = context.create_arguments(vec![
        ("content", Some(json!(content))),
        ("tags", Some(json!(tags))),
    ]);
    let result = context.execute_tool("save_note", args).await?;

    printer.summary(&result);
    Ok(())
}

async fn list_notes(
    context: &CliToolContext,
    printer: &Printer,
    query: Option<String>,
    limit: Option<usize>,
) -> CliResult<()> {
    let args = context.create_arguments(vec![
        ("query", query.map(Value::from)),
        ("limit", limit.map(Value::from)),
    ]);
    let result = context.execute_tool("list_notes", args).await?;

    printer.listing(&result);
    Ok(())
}

async fn recent_notes(
    context: &CliToolContext,
    printer: &Printer,
    count: Option<usize>,
) -> CliResult<()> {
    let args = context.create_arguments(vec![("count", count.map(Value::from))]);
    let result = context.execute_tool("get_recent_notes", args).await?;

    printer.listing(&result);
    Ok(())
}

async fn delete_note(context: &CliToolContext, printer: &Printer, id: &str) -> CliResult<()> {
    let args = context.create_arguments(vec![("id", Some(json!(id)))]);
    let result = context.execute_tool("delete_note", args).await?;

    if result["structuredContent"]["deleted"].as_bool() == Some(true) {
        printer.summary(&result);
        Ok(())
    } else {
        printer.structured_only(&result);
        Err(CliError::warning(response_formatting::summary_text(&result)))
    }
}

/// Tag lookup has no tool; it reads the store directly
async fn notes_by_tag(context: &CliToolContext, printer: &Printer, tag: &str) -> CliResult<()> {
    let notes = context.store().get_notes_by_tag(tag).await;
    let count = notes.len();
    let text = if count > 0 {
        format!("Found {count} note(s) tagged '{tag}'")
    } else {
        format!("No notes tagged '{tag}'")
    };

    let result = json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "notes": notes, "count": count, "tag": tag }
    });
    printer.listing(&result);
    Ok(())
}

/// Writes tool results to stdout in the selected format
struct Printer {
    format: OutputFormat,
}

impl Printer {
    fn summary(&self, result: &Value) {
        match self.format {
            OutputFormat::Text => {
                println!("{}", response_formatting::format_success_response(result))
            }
            OutputFormat::Json => println!("{}", response_formatting::format_structured(result)),
        }
    }

    fn listing(&self, result: &Value) {
        if self.format == OutputFormat::Json {
            println!("{}", response_formatting::format_structured(result));
            return;
        }

        let notes = result["structuredContent"]["notes"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default();
        if notes.is_empty() {
            println!("{}", response_formatting::format_warning_response(result));
        } else {
            println!("{}", response_formatting::format_success_response(result));
            println!();
            println!("{}", response_formatting::format_notes(notes));
        }
    }

    /// JSON consumers still get the payload when the command fails
    fn structured_only(&self, result: &Value) {
        if self.format == OutputFormat::Json {
            println!("{}", response_formatting::format_structured(result));
        }
    }
}

/// `-` reads the content from stdin
fn get_content_input(content: String) -> CliResult<String> {
    if content != "-" {
        return Ok(content);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer.trim_end().to_string())
}
