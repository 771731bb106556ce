//! Perform Compile
//!
//! Template discovery and the compilation entry point of `tplc`. Every
//! template is compiled on its own copy of the context, in parallel.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use rayon::prelude::*;

use template_compiler::logging::Logger;
use template_compiler::{CompilationResult, CompilerConfig, CompilerError, TemplateParser};

use crate::config::ContextDescriptor;

/// Options of one `tplc` run.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Context descriptor JSON.
    pub context: PathBuf,
    /// Compiler configuration JSON, defaults apply when absent.
    pub config: Option<PathBuf>,
    /// Directory receiving one `.json` file per template, mirroring the
    /// template's path below their common directory. Results are
    /// printed to stdout when absent.
    pub out_dir: Option<PathBuf>,
    /// Template paths or glob patterns.
    pub templates: Vec<String>,
}

/// Outcome of one template file.
#[derive(Debug)]
pub struct TemplateOutcome {
    pub path: PathBuf,
    pub result: Result<CompilationResult, CompilerError>,
}

impl TemplateOutcome {
    pub fn is_success(&self) -> bool {
        matches!(&self.result, Ok(result) if !result.has_errors())
    }
}

/// All outcomes of a run, in discovery order.
#[derive(Debug, Default)]
pub struct CompileSummary {
    pub outcomes: Vec<TemplateOutcome>,
}

impl CompileSummary {
    /// Templates with diagnostics or a fatal error
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}

/// Expand template arguments; existing paths are taken as is, anything else
/// is a glob pattern.
pub fn discover_templates(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let paths = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;
        let before = files.len();
        for entry in paths.flatten() {
            if entry.is_file() && !files.contains(&entry) {
                files.push(entry);
            }
        }
        if files.len() == before {
            anyhow::bail!("No template matches '{}'", pattern);
        }
    }
    Ok(files)
}

/// Compile one template file against a fresh copy of the context.
pub fn compile_file(
    path: &Path,
    descriptor: &ContextDescriptor,
    config: &CompilerConfig,
    logger: &dyn Logger,
) -> Result<CompilationResult, CompilerError> {
    let url = path.display().to_string();
    let template = fs::read_to_string(path).map_err(|e| CompilerError::io(&url, e))?;
    let mut context = descriptor.to_context();
    TemplateParser::new(config, logger).parse_html_template_at(&url, &template, &mut context)
}

/// Load the context and config, compile every template and emit the results.
pub fn perform_compilation(
    options: &CompileOptions,
    logger: &dyn Logger,
) -> anyhow::Result<CompileSummary> {
    let descriptor = ContextDescriptor::load(&options.context)?;
    let config = match &options.config {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::default(),
    };
    let templates = discover_templates(&options.templates)?;
    logger.info(&format!("Compiling {} templates", templates.len()));

    let outcomes: Vec<TemplateOutcome> = templates
        .par_iter()
        .map(|path| TemplateOutcome {
            path: path.clone(),
            result: compile_file(path, &descriptor, &config, logger),
        })
        .collect();

    for outcome in &outcomes {
        if let Err(error) = &outcome.result {
            logger.error(&format!("{}: {}", outcome.path.display(), error));
        }
    }

    let summary = CompileSummary { outcomes };
    emit_results(&summary, options.out_dir.as_deref(), logger)?;
    Ok(summary)
}

/// Write one `.json` file per template under `out_dir`, or print a JSON
/// object keyed by template path.
fn emit_results(
    summary: &CompileSummary,
    out_dir: Option<&Path>,
    logger: &dyn Logger,
) -> anyhow::Result<()> {
    let compiled: Vec<(&Path, &CompilationResult)> = summary
        .outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok().map(|result| (o.path.as_path(), result)))
        .collect();

    match out_dir {
        Some(out_dir) => {
            let paths: Vec<&Path> = compiled.iter().map(|(path, _)| *path).collect();
            let files = output_files(&paths)?;
            for (file, (_, result)) in files.iter().zip(&compiled) {
                let target = out_dir.join(file);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                fs::write(&target, result.to_json()?)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                logger.debug(&format!("Wrote {}", target.display()));
            }
        }
        None => {
            let results: IndexMap<String, &CompilationResult> = compiled
                .into_iter()
                .map(|(path, result)| (path.display().to_string(), result))
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}

/// Output file of each template: its path below the templates' common
/// directory, with a `.json` extension. Two templates never share a file.
fn output_files(paths: &[&Path]) -> anyhow::Result<Vec<PathBuf>> {
    let root = common_dir(paths);
    let mut files: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for &path in paths {
        let relative: PathBuf = path
            .strip_prefix(&root)
            .unwrap_or(path)
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .collect();
        let file = relative.with_extension("json");
        if let Some(index) = files.iter().position(|existing| *existing == file) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                paths[index].display(),
                path.display(),
                file.display()
            );
        }
        files.push(file);
    }
    Ok(files)
}

fn common_dir(paths: &[&Path]) -> PathBuf {
    let mut dirs = paths
        .iter()
        .map(|path| path.parent().unwrap_or_else(|| Path::new("")));
    let Some(first) = dirs.next() else {
        return PathBuf::new();
    };
    let mut common: Vec<Component> = first.components().collect();
    for dir in dirs {
        let shared = common
            .iter()
            .zip(dir.components())
            .take_while(|(a, b)| **a == *b)
            .count();
        common.truncate(shared);
    }
    common.into_iter().collect()
}
