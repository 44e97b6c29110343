//! Implementation of the `stencil render` command.
//!
//! Acts as a small host pipeline around the template stage:
//!
//! ```text
//! for each FILE:
//!     split front matter → context     (template key, frontmatter table)
//!     body in --chunk-size pieces      → stage   (suppressed)
//!     terminal marker                  → stage   (rendered file)
//!     write to --out DIR or stdout
//! end-of-stream sentinel               → stage
//! ```

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, info, instrument};

use stencil_core::{
    application::{Emission, StreamFailure, Streamer},
    domain::{FileInfo, RenderOptions},
};

use crate::{
    cli::RenderArgs,
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    front_matter,
    output::OutputManager,
};

/// Execute the `stencil render` command.
#[instrument(skip_all, fields(files = args.files.len()))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = super::templates_dir(&args.templates, &config)?;
    let options = render_options(&args, &config)?;
    let keyword = options.template_keyword.clone();
    let default_template = args
        .default_template
        .clone()
        .or_else(|| config.templates.default_template.clone());
    let chunk_size = chunk_size(args.chunk_size.unwrap_or(config.pipeline.chunk_size))?;

    let mut stage = stencil_adapters::template_with_options(&dir, options);
    if let Some(e) = stage.construction_error() {
        return Err(CliError::Core(e.clone()));
    }
    info!(dir = %dir.display(), chunk_size, "template stage ready");

    let dests: Vec<Option<PathBuf>> = match &args.out {
        Some(out_dir) => {
            let dests = destinations(out_dir, &args.files)?;
            fs::create_dir_all(out_dir).io_context(|| {
                format!("creating output directory '{}'", out_dir.display())
            })?;
            dests.into_iter().map(Some).collect()
        }
        None => vec![None; args.files.len()],
    };

    for (path, dest) in args.files.iter().zip(dests) {
        let input = read_input(path, &keyword, default_template.as_deref())?;
        if !input.selected && args.out.is_some() {
            output.warning(&format!(
                "{}: no template selected, copying unchanged",
                path.display()
            ))?;
        }

        let rendered = feed(&mut stage, input.file, &input.body, chunk_size).map_err(|f| {
            CliError::Render {
                path: path.clone(),
                source: f.error,
            }
        })?;

        match dest {
            Some(dest) => {
                fs::write(&dest, &rendered)
                    .io_context(|| format!("writing '{}'", dest.display()))?;
                output.print(&format!("{} \u{2192} {}", path.display(), dest.display()))?;
            }
            None => output.content(&rendered)?,
        }
        debug!(file = %path.display(), bytes = rendered.len(), "file done");
    }

    match stage.stream(None, None) {
        Ok(Emission::EndOfStream) => {}
        Ok(other) => debug!(?other, "unexpected emission at end of stream"),
        Err(f) => return Err(CliError::Core(f.error)),
    }

    if let Some(out_dir) = &args.out {
        output.success(&format!(
            "Rendered {} file(s) into {}",
            args.files.len(),
            out_dir.display()
        ))?;
    }
    Ok(())
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Drive one file through `stage`: the body in `chunk_size` pieces, then the
/// terminal marker. Returns everything the stage emitted for it.
pub(crate) fn feed<S: Streamer>(
    stage: &mut S,
    file: FileInfo,
    body: &[u8],
    chunk_size: usize,
) -> Result<Vec<u8>, StreamFailure> {
    let mut out = Vec::new();

    for chunk in body.chunks(chunk_size) {
        let emission = stage.stream(Some(file.clone()), Some(chunk.to_vec()))?;
        collect(&emission, &mut out);
    }
    let emission = stage.stream(Some(file), None)?;
    collect(&emission, &mut out);

    Ok(out)
}

fn collect(emission: &Emission, out: &mut Vec<u8>) {
    if let Some(bytes) = emission.bytes() {
        out.extend_from_slice(bytes);
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

/// One input file, ready for the stage.
struct Input {
    file: FileInfo,
    body: Vec<u8>,
    /// Whether the context names a template.
    selected: bool,
}

fn read_input(path: &Path, keyword: &str, default_template: Option<&str>) -> CliResult<Input> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CliError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e).io_context(|| format!("reading '{}'", path.display())),
    };

    let doc = front_matter::split(&content).map_err(|source| CliError::FrontMatter {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = FileInfo::new(path);
    if let Some(fm) = doc.front_matter {
        if let Some(template) = fm.get(keyword) {
            file.ctx.insert(keyword, template.clone());
        }
        file.ctx.set_front_matter(fm);
    }
    if !file.ctx.contains_key(keyword) {
        if let Some(name) = default_template {
            file.ctx.insert(keyword, name);
        }
    }

    let selected = file.ctx.get(keyword).is_some_and(|v| !v.is_null());
    Ok(Input {
        file,
        body: doc.body.to_vec(),
        selected,
    })
}

fn render_options(args: &RenderArgs, config: &AppConfig) -> CliResult<RenderOptions> {
    let mut options = config.render.clone();

    if let Some(keyword) = &args.keyword {
        options = options.template_keyword(keyword.clone());
    }
    if args.ignore_template_errors {
        options = options.ignore_template_errors(true);
    }
    if args.no_front_matter {
        options = options.include_front_matter(false);
    }
    if let Some(path) = &args.data {
        options = options.data(load_data(path)?);
    }

    if options.template_keyword.is_empty() {
        return Err(CliError::InvalidInput {
            message: "the template keyword must not be empty".into(),
            source: None,
        });
    }
    Ok(options)
}

/// Read a TOML data file as a JSON value.
fn load_data(path: &Path) -> CliResult<Value> {
    let invalid = |message: String, source: Box<dyn std::error::Error + Send + Sync>| {
        CliError::InvalidInput {
            message,
            source: Some(source),
        }
    };

    let raw = fs::read_to_string(path).map_err(|e| {
        invalid(
            format!("cannot read data file '{}'", path.display()),
            Box::new(e),
        )
    })?;
    let table: toml::Table = toml::from_str(&raw).map_err(|e| {
        invalid(
            format!("data file '{}' is not valid TOML", path.display()),
            Box::new(e),
        )
    })?;
    serde_json::to_value(table).map_err(|e| {
        invalid(
            format!("data file '{}' cannot be converted", path.display()),
            Box::new(e),
        )
    })
}

fn chunk_size(size: u64) -> CliResult<usize> {
    match usize::try_from(size) {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(CliError::InvalidInput {
            message: format!("chunk size must be between 1 and {}", usize::MAX),
            source: None,
        }),
    }
}

fn destination(out_dir: &Path, input: &Path) -> CliResult<PathBuf> {
    let name = input.file_name().ok_or_else(|| CliError::InvalidInput {
        message: format!("'{}' has no file name", input.display()),
        source: None,
    })?;
    Ok(out_dir.join(name))
}

/// Output path for every input, in order. Two inputs sharing a file name
/// would overwrite each other, so that is rejected before anything is written.
fn destinations(out_dir: &Path, inputs: &[PathBuf]) -> CliResult<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(inputs.len());
    let mut dests = Vec::with_capacity(inputs.len());

    for input in inputs {
        let dest = destination(out_dir, input)?;
        if let Some(earlier) = seen.insert(dest.clone(), input) {
            return Err(CliError::InvalidInput {
                message: format!(
                    "'{}' and '{}' would both be written to '{}'",
                    earlier.display(),
                    input.display(),
                    dest.display()
                ),
                source: None,
            });
        }
        dests.push(dest);
    }
    Ok(dests)
}

// ── tests ─────────────────────────────────────────────────────────────────────
