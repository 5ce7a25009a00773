//! ladle - query HTML documents from the command line
//!
//! Usage:
//!   ladle <FILE|URL> tree                     Print the document tree
//!   ladle <FILE|URL> find <TAG> [OPTIONS]     Find elements by tag and attribute
//!   ladle <FILE|URL> nav <STEP>...            Walk from the root element
//!
//! Examples:
//!   ladle page.html find a --attr class=nav --all --attrs
//!   ladle --html '<ul><li>a</li><li>b</li></ul>' nav first-child first-child next-element

use std::fmt::Write as _;
use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ladle_common::net::is_remote;
use ladle_dom::{NodeId, NodeKind};
use ladle_html::print_tree;
use ladle_query::{AttributesMap, Document, DocumentOptions, ErrorPolicy, Handle, Query, QueryError};
use log::LevelFilter;
use owo_colors::OwoColorize;
use serde::Serialize;

/// ladle - find elements in an HTML document by tag and attribute
#[derive(Parser, Debug)]
#[command(name = "ladle")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Dump the tree of a local file
    ladle index.html tree

    # First paragraph with class "lead", as text
    ladle index.html find p --attr class=lead --text

    # Every link on a page, with attributes, as JSON
    ladle https://example.com find a --all --json

    # Walk from the root element
    ladle --html '<div><p>Hi</p><p>Bye</p></div>' nav last-child first-child last-child
"#)]
struct Cli {
    /// Path to an HTML file, or an http(s) URL
    #[arg(value_name = "FILE|URL")]
    path: Option<String>,

    /// Parse this HTML string instead of a file or URL
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Log every failed operation and turn on debug logging
    #[arg(short, long)]
    debug: bool,

    /// Refuse documents with parse errors
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the document tree
    Tree {
        /// Also list the issues the parser reported
        #[arg(long)]
        issues: bool,
    },

    /// Find elements below the root element
    Find {
        /// Tag name to look for
        tag: String,

        /// Only elements carrying this attribute value
        #[arg(long, value_name = "KEY=VALUE", value_parser = parse_attribute)]
        attr: Option<(String, String)>,

        /// Print every match instead of the first
        #[arg(short, long)]
        all: bool,

        /// Print the first direct text of each match
        #[arg(long, conflicts_with = "attrs")]
        text: bool,

        /// Print the attributes of each match
        #[arg(long)]
        attrs: bool,

        /// Print matches as JSON
        #[arg(long, conflicts_with_all = ["text", "attrs"])]
        json: bool,
    },

    /// Walk from the root element, one step at a time
    Nav {
        /// Steps to take, in order
        #[arg(required = true, value_enum)]
        steps: Vec<Step>,
    },
}

/// One navigation step.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Step {
    Parent,
    FirstChild,
    LastChild,
    Next,
    Prev,
    NextElement,
    PrevElement,
}

impl Step {
    fn apply(self, handle: Handle<'_>) -> Result<Handle<'_>, QueryError> {
        match self {
            Self::Parent => handle.parent(),
            Self::FirstChild => handle.first_child(),
            Self::LastChild => handle.last_child(),
            Self::Next => handle.next_sibling(),
            Self::Prev => handle.prev_sibling(),
            Self::NextElement => handle.next_element_sibling(),
            Self::PrevElement => handle.prev_element_sibling(),
        }
    }
}

/// A match as printed by `find --json`.
#[derive(Serialize)]
struct MatchJson<'a> {
    node: usize,
    tag: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    attributes: AttributesMap,
}

impl<'a> MatchJson<'a> {
    fn new(handle: Handle<'a>) -> Self {
        Self {
            node: handle.id().0,
            tag: handle.label(),
            text: handle.text_if_any(),
            attributes: attributes_of(handle),
        }
    }
}

/// Attributes of an element, or nothing for other nodes, without going
/// through the document's error policy.
fn attributes_of(handle: Handle<'_>) -> AttributesMap {
    if handle.is_element() {
        handle.attrs().unwrap_or_default()
    } else {
        AttributesMap::new()
    }
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = DocumentOptions {
        policy: if cli.debug {
            ErrorPolicy::Log
        } else {
            ErrorPolicy::Silent
        },
        strict: cli.strict,
    };
    let doc = load_doc(cli, options)?;

    match &cli.command {
        Command::Tree { issues } => print_document(&doc, *issues),
        Command::Find {
            tag,
            attr,
            all,
            text,
            attrs,
            json,
        } => {
            let query = match attr {
                Some((key, value)) => Query::with_attr(tag.as_str(), key.as_str(), value.as_str()),
                None => Query::tag(tag.as_str()),
            };
            let matches = if *all {
                doc.root().find_all(query)?
            } else {
                vec![doc.root().find(query)?]
            };

            if *json {
                print_json(&matches, *all)?;
            } else {
                for handle in matches {
                    print_match(handle, *text, *attrs)?;
                }
            }
        }
        Command::Nav { steps } => {
            let mut current = doc.root();
            for step in steps {
                current = step
                    .apply(current)
                    .with_context(|| format!("step `{}`", step_name(*step)))?;
            }
            println!("{}", describe(current));
        }
    }
    Ok(())
}

/// Load the document named on the command line.
fn load_doc(cli: &Cli, options: DocumentOptions) -> anyhow::Result<Document> {
    if let Some(ref html) = cli.html {
        return Ok(Document::parse_with(html, options)?);
    }
    let Some(ref path) = cli.path else {
        anyhow::bail!("expected a file path, a URL, or --html");
    };
    if is_remote(path) {
        Ok(Document::fetch(path, options)?)
    } else {
        let html = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        Ok(Document::parse_with(&html, options)?)
    }
}

fn step_name(step: Step) -> String {
    step.to_possible_value()
        .map_or_else(|| format!("{step:?}"), |value| value.get_name().to_string())
}

/// Print the document tree and, if asked, the parse issues.
fn print_document(doc: &Document, issues: bool) {
    println!("{}", "=== DOM Tree ===".bold());
    print_tree(doc.tree(), NodeId::ROOT, 0);

    if issues {
        println!("\n{}", "=== Parse Issues ===".bold());
        if doc.issues().is_empty() {
            println!("  (none)");
        }
        for issue in doc.issues() {
            if issue.is_error {
                println!("  - {}", issue.red());
            } else {
                println!("  - {}", issue.yellow());
            }
        }
    }
}

fn print_match(handle: Handle<'_>, text: bool, attrs: bool) -> anyhow::Result<()> {
    if text {
        println!("{}", handle.text()?);
    } else if attrs {
        println!("{}", describe(handle).cyan());
        for (key, value) in handle.attrs()? {
            println!("  {}={value:?}", key.bold());
        }
    } else {
        println!("{}", describe(handle));
    }
    Ok(())
}

fn print_json(matches: &[Handle<'_>], all: bool) -> anyhow::Result<()> {
    let entries: Vec<MatchJson<'_>> = matches.iter().map(|&handle| MatchJson::new(handle)).collect();
    let output = match entries.as_slice() {
        [single] if !all => serde_json::to_string_pretty(single)?,
        _ => serde_json::to_string_pretty(&entries)?,
    };
    println!("{output}");
    Ok(())
}

/// One-line rendering of a node: the start tag for an element, the quoted
/// data for text.
fn describe(handle: Handle<'_>) -> String {
    match handle.kind() {
        NodeKind::Element => {
            let attrs = attributes_of(handle);
            let mut out = format!("<{}", handle.label());
            for (key, value) in &attrs {
                let _ = write!(out, " {key}={value:?}");
            }
            out.push('>');
            out
        }
        NodeKind::Text => format!("{:?}", handle.label()),
        NodeKind::Comment => format!("<!--{}-->", handle.label()),
        NodeKind::Doctype => format!("<!DOCTYPE {}>", handle.label()),
        NodeKind::Document => "#document".to_string(),
    }
}
